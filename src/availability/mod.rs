//! Decide which trios can be plotted from the data available in the ortholog
//! databases, and report the species pairs that are missing.

use crate::database::{PairIndex, PeakDb};
use crate::species::{LatinNames, PairKey};
use crate::trio::{DivergentPair, OutgroupsByPair};
use color_eyre::eyre::{Report, Result};
use log::warn;
use std::collections::BTreeSet;


// ----------------------------------------------------------------------------
// Missing Pairs
// ----------------------------------------------------------------------------

/// Species pairs missing from each database over a whole run.
///
/// Each pair is recorded once no matter how many trios need it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MissingPairs {
    /// Pairs missing from the Ks list database.
    pub ks_list: BTreeSet<PairKey>,
    /// Pairs missing from the peak database, always empty if it was not loaded.
    pub peaks: BTreeSet<PairKey>,
}

impl MissingPairs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.ks_list.is_empty() && self.peaks.is_empty()
    }

    /// Pairs missing from both databases.
    pub fn in_both(&self) -> Vec<&PairKey> {
        self.ks_list.intersection(&self.peaks).collect()
    }

    /// Pairs missing from the peak database only.
    pub fn only_peaks(&self) -> Vec<&PairKey> {
        self.peaks.difference(&self.ks_list).collect()
    }

    /// Pairs missing from the Ks list database only.
    pub fn only_ks_list(&self) -> Vec<&PairKey> {
        self.ks_list.difference(&self.peaks).collect()
    }

    /// Lines of the end-of-run report, empty when nothing is missing.
    pub fn summary(&self) -> Vec<String> {
        if self.is_empty() {
            return Vec::new();
        }

        let mut lines = vec![
            String::new(),
            "The species pairs listed below are not (yet) available in the ortholog databases"
                .to_string(),
            "The trios involving such species pairs have not been plotted".to_string(),
            String::new(),
        ];

        let sections = [
            ("both Ks peak and Ks list ortholog databases", self.in_both()),
            ("the ortholog Ks peak database", self.only_peaks()),
            ("the ortholog Ks list database", self.only_ks_list()),
        ];
        for (title, pairs) in sections.into_iter().filter(|(_, pairs)| !pairs.is_empty()) {
            lines.push(format!("Species pairs not yet available in {title}:"));
            lines.extend(pairs.into_iter().map(|pair| {
                let (a, b) = pair.names();
                format!("  {a} - {b}")
            }));
            lines.push(String::new());
        }

        lines.push(
            "Please compute their ortholog Ks data and/or add the ortholog data to the databases,"
                .to_string(),
        );
        lines.push("then rerun this step.".to_string());
        lines
    }

    /// Log the [summary](MissingPairs::summary) as warnings.
    pub fn report(&self) {
        self.summary().iter().for_each(|line| warn!("{line}"));
    }
}

// ----------------------------------------------------------------------------
// Availability
// ----------------------------------------------------------------------------

/// A candidate outgroup of a divergent pair, with the keys of the two pairs it adds.
#[derive(Clone, Debug, PartialEq)]
pub struct Outgroup {
    pub id: String,
    pub name: String,
    /// Focal species and outgroup.
    pub focal_out: PairKey,
    /// Sister species and outgroup.
    pub sister_out: PairKey,
}

/// The outgroups of a divergent pair, split by whether all their data is available.
#[derive(Clone, Debug, PartialEq)]
pub struct GroupAvailability {
    pub pair: DivergentPair,
    pub focal_name: String,
    pub sister_name: String,
    /// Focal species and sister species.
    pub focal_sister: PairKey,
    pub usable: Vec<Outgroup>,
    pub unusable: Vec<Outgroup>,
}

/// Availability of every divergent pair plus the missing pairs of the run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Resolution {
    pub groups: Vec<GroupAvailability>,
    pub missing: MissingPairs,
}

/// Check one species pair in both databases, recording it if missing.
///
/// The peak database is only consulted if it was loaded.
pub fn check_pair<K>(
    key: &PairKey,
    ks_db: &K,
    peak_db: &PeakDb,
    missing: &mut MissingPairs,
) -> bool
where
    K: PairIndex,
{
    let mut available = true;
    if !ks_db.contains(key) {
        available = false;
        missing.ks_list.insert(key.clone());
    }
    if let PeakDb::Loaded(peaks) = peak_db {
        if !peaks.contains(key) {
            available = false;
            missing.peaks.insert(key.clone());
        }
    }
    available
}

/// Split the outgroups of one divergent pair into usable and unusable.
///
/// An outgroup is usable if the focal-sister, focal-outgroup and
/// sister-outgroup pairs are all available. Every pair is checked, so all of
/// the missing pairs end up in `missing`.
pub fn resolve_group<K>(
    pair: &DivergentPair,
    outgroups: &[String],
    names: &LatinNames,
    ks_db: &K,
    peak_db: &PeakDb,
    missing: &mut MissingPairs,
) -> Result<GroupAvailability, Report>
where
    K: PairIndex,
{
    let focal_name = names.get(&pair.focal)?;
    let sister_name = names.get(&pair.sister)?;
    let focal_sister = PairKey::new(focal_name, sister_name);

    let mut group = GroupAvailability {
        pair: pair.clone(),
        focal_name: focal_name.to_string(),
        sister_name: sister_name.to_string(),
        focal_sister: focal_sister.clone(),
        usable: Vec::new(),
        unusable: Vec::new(),
    };

    for id in outgroups {
        let name = names.get(id)?;
        let outgroup = Outgroup {
            id: id.clone(),
            name: name.to_string(),
            focal_out: PairKey::new(focal_name, name),
            sister_out: PairKey::new(sister_name, name),
        };
        let available = [&focal_sister, &outgroup.focal_out, &outgroup.sister_out]
            .into_iter()
            .map(|key| check_pair(key, ks_db, peak_db, missing))
            // check every pair, do not stop at the first missing one
            .fold(true, |all, available| all && available);

        match available {
            true => group.usable.push(outgroup),
            false => group.unusable.push(outgroup),
        }
    }

    Ok(group)
}

/// Resolve the availability of every divergent pair.
///
/// ## Examples
///
/// ```rust
/// use orthoks::availability::resolve;
/// use orthoks::database::{KsListDb, PeakDb};
/// use orthoks::species::LatinNames;
/// use orthoks::trio::{group_outgroups, Trio};
/// use orthoks_table::Table;
///
/// let names = LatinNames::from_iter([("a", "A"), ("b", "B"), ("x", "X")]);
/// let groups = group_outgroups(&[Trio::new("a", "b", "x")]);
///
/// let mut table = Table::new();
/// table.headers = vec!["".to_string(), "Ks_Values".to_string()];
/// for pair in ["A_B", "A_X"] {
///     table.add_row([pair.to_string(), "[0.5]".to_string()])?;
/// }
/// let ks_db = KsListDb::from_table(table)?;
///
/// let resolution = resolve(&groups, &names, &ks_db, &PeakDb::Unavailable)?;
/// assert!(resolution.groups[0].usable.is_empty());
/// let missing: Vec<String> = resolution.missing.ks_list.iter().map(|k| k.to_string()).collect();
/// assert_eq!(missing, ["B_X"]);
/// # Ok::<(), color_eyre::eyre::Report>(())
/// ```
pub fn resolve<K>(
    groups: &OutgroupsByPair,
    names: &LatinNames,
    ks_db: &K,
    peak_db: &PeakDb,
) -> Result<Resolution, Report>
where
    K: PairIndex,
{
    let mut missing = MissingPairs::new();
    let groups = groups
        .iter()
        .map(|(pair, outgroups)| resolve_group(pair, outgroups, names, ks_db, peak_db, &mut missing))
        .collect::<Result<Vec<_>, Report>>()?;
    Ok(Resolution { groups, missing })
}
