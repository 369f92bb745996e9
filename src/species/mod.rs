//! Species identifiers, their display names, and canonical species [`PairKey`]s.

use color_eyre::eyre::{eyre, Report, Result};
use color_eyre::Help;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};


// ----------------------------------------------------------------------------
// Display Names
// ----------------------------------------------------------------------------

/// Mapping of short species identifiers to display ("Latin") names.
///
/// ## Examples
///
/// ```rust
/// use orthoks::species::LatinNames;
///
/// let names = LatinNames::from_iter([("elaeis", "E. guineensis"), ("oryza", "O. sativa")]);
/// assert_eq!(names.get("elaeis")?, "E. guineensis");
/// assert!(names.get("asparagus").is_err());
/// # Ok::<(), color_eyre::eyre::Report>(())
/// ```
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(transparent)]
pub struct LatinNames(BTreeMap<String, String>);

impl LatinNames {
    /// Returns the display name of a species identifier.
    pub fn get(&self, species: &str) -> Result<&str, Report> {
        self.0.get(species).map(String::as_str).ok_or_else(|| {
            eyre!("Species {species:?} has no display name.")
                .suggestion("Add the species to 'latin_names' in the configuration file.")
        })
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S, L> FromIterator<(S, L)> for LatinNames
where
    S: Into<String>,
    L: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (S, L)>>(iter: I) -> Self {
        LatinNames(iter.into_iter().map(|(s, l)| (s.into(), l.into())).collect())
    }
}

// ----------------------------------------------------------------------------
// Pair Key
// ----------------------------------------------------------------------------

/// Canonical identifier of an unordered pair of species.
///
/// The two display names are ordered case-insensitively and joined by
/// [`PairKey::SEPARATOR`]. Equality, hashing and ordering ignore case, the
/// original casing is kept for display.
///
/// ## Examples
///
/// ```rust
/// use orthoks::species::PairKey;
///
/// let key = PairKey::new("S. cucullata", "A. filiculoides");
/// assert_eq!(key.to_string(), "A. filiculoides_S. cucullata");
/// assert_eq!(key, PairKey::new("A. filiculoides", "S. cucullata"));
/// assert_eq!(key, PairKey::new("a. filiculoides", "s. cucullata"));
/// ```
#[derive(Clone, Debug)]
pub struct PairKey {
    first: String,
    second: String,
    /// Lowercase form of the joined key, used for comparisons and lookups.
    folded: String,
}

impl PairKey {
    pub const SEPARATOR: char = '_';

    pub fn new(a: &str, b: &str) -> Self {
        let (a_folded, b_folded) = (a.to_lowercase(), b.to_lowercase());
        // equal names ignoring case fall back to the original casing
        let order = a_folded.cmp(&b_folded).then_with(|| a.cmp(b));
        let (first, second) = match order {
            Ordering::Greater => (b, a),
            _ => (a, b),
        };
        let folded = format!("{}{}{}", first.to_lowercase(), Self::SEPARATOR, second.to_lowercase());
        PairKey { first: first.to_string(), second: second.to_string(), folded }
    }

    /// Returns the display names in key order.
    pub fn names(&self) -> (&str, &str) {
        (&self.first, &self.second)
    }

    /// Returns the case-folded key, the form stores are indexed by.
    pub fn folded(&self) -> &str {
        &self.folded
    }

    /// Case-fold an index entry of a pair store so it compares with [`PairKey::folded`].
    pub fn fold_index(index: &str) -> String {
        index.to_lowercase()
    }
}

impl Display for PairKey {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}{}{}", self.first, Self::SEPARATOR, self.second)
    }
}

impl PartialEq for PairKey {
    fn eq(&self, other: &Self) -> bool {
        self.folded == other.folded
    }
}

impl Eq for PairKey {}

impl Hash for PairKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.folded.hash(state);
    }
}

impl PartialOrd for PairKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PairKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.folded.cmp(&other.folded)
    }
}
