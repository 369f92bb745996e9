//! Ortholog [`Trio`]s and their grouping by [`DivergentPair`].

use color_eyre::eyre::{Report, Result, WrapErr};
use indexmap::IndexMap;
use orthoks_table::Table;
use std::fmt::{Debug, Display, Formatter};
use std::path::Path;
use thiserror::Error;


pub const FOCAL_SPECIES: &str = "Focal_Species";
pub const SISTER_SPECIES: &str = "Sister_Species";
pub const OUT_SPECIES: &str = "Out_Species";

/// Trio rows that cannot be turned into a [`Trio`].
#[derive(Clone, Debug, Error, PartialEq)]
pub enum MalformedInputError {
    #[error("Trio table is missing the column '{0}'.")]
    MissingColumn(String),
    #[error("Trio on line {line} has no value for '{column}'.")]
    MissingField { line: usize, column: String },
}

// ----------------------------------------------------------------------------
// Trio
// ----------------------------------------------------------------------------

/// A focal species, its sister species and an outgroup, as species identifiers.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Trio {
    pub focal: String,
    pub sister: String,
    pub outgroup: String,
}

impl Trio {
    pub fn new(focal: &str, sister: &str, outgroup: &str) -> Self {
        Trio { focal: focal.to_string(), sister: sister.to_string(), outgroup: outgroup.to_string() }
    }

    /// Returns the (focal, sister) pair of this trio.
    pub fn divergent_pair(&self) -> DivergentPair {
        DivergentPair { focal: self.focal.clone(), sister: self.sister.clone() }
    }

    /// Parse the rows of a trio table.
    ///
    /// The table needs the columns [`FOCAL_SPECIES`], [`SISTER_SPECIES`] and
    /// [`OUT_SPECIES`], other columns are ignored. Every row must have a
    /// non-empty value in each of them.
    ///
    /// ## Examples
    ///
    /// ```rust
    /// use orthoks::trio::Trio;
    /// use orthoks_table::Table;
    ///
    /// let mut table = Table::new();
    /// table.headers = vec!["Focal_Species", "Sister_Species", "Out_Species"];
    /// table.add_row(["elaeis", "oryza", "asparagus"])?;
    ///
    /// let trios = Trio::from_table(&table)?;
    /// assert_eq!(trios, [Trio::new("elaeis", "oryza", "asparagus")]);
    /// # Ok::<(), color_eyre::eyre::Report>(())
    /// ```
    pub fn from_table<T>(table: &Table<T>) -> Result<Vec<Trio>, MalformedInputError>
    where
        T: AsRef<str> + Clone + Debug + Display,
    {
        let columns = [FOCAL_SPECIES, SISTER_SPECIES, OUT_SPECIES].map(|column| {
            table
                .get_header_index(column)
                .map(|i| (i, column))
                .map_err(|_| MalformedInputError::MissingColumn(column.to_string()))
        });
        let [focal, sister, outgroup] = columns;
        let columns = [focal?, sister?, outgroup?];

        table
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| -> Result<Trio, MalformedInputError> {
                // line 1 holds the headers
                let line = i + 2;
                let [focal, sister, outgroup] = columns.map(|(col_i, column)| {
                    row.get(col_i)
                        .map(|value| value.as_ref().trim())
                        .filter(|value| !value.is_empty())
                        .ok_or_else(|| MalformedInputError::MissingField {
                            line,
                            column: column.to_string(),
                        })
                });
                Ok(Trio::new(focal?, sister?, outgroup?))
            })
            .collect()
    }

    /// Read trios from a TSV or CSV file.
    pub fn read<P>(path: &P) -> Result<Vec<Trio>, Report>
    where
        P: AsRef<Path> + Debug,
    {
        let table = Table::read(path)?;
        let trios =
            Trio::from_table(&table).wrap_err_with(|| format!("Malformed trio table: {path:?}"))?;
        Ok(trios)
    }
}

// ----------------------------------------------------------------------------
// Divergent Pair
// ----------------------------------------------------------------------------

/// The (focal, sister) species pair shared by one or more trios.
///
/// Unlike a [`PairKey`](crate::species::PairKey) this pair is ordered, it
/// names the focal species first.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct DivergentPair {
    pub focal: String,
    pub sister: String,
}

impl Display for DivergentPair {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}_{}", self.focal, self.sister)
    }
}

/// Candidate outgroups of each divergent pair, in the order first encountered.
pub type OutgroupsByPair = IndexMap<DivergentPair, Vec<String>>;

/// Group the outgroups of `trios` by their divergent pair.
///
/// Both the divergent pairs and their outgroups keep the order of `trios`.
/// Repeated trios are kept as-is, an outgroup listed twice for the same pair
/// appears twice.
///
/// ## Examples
///
/// ```rust
/// use orthoks::trio::{group_outgroups, DivergentPair, Trio};
///
/// let trios = [Trio::new("A", "B", "X"), Trio::new("A", "B", "Y"), Trio::new("A", "B", "X")];
/// let groups = group_outgroups(&trios);
///
/// let pair = DivergentPair { focal: "A".into(), sister: "B".into() };
/// assert_eq!(groups[&pair], ["X", "Y", "X"]);
/// ```
pub fn group_outgroups(trios: &[Trio]) -> OutgroupsByPair {
    let mut groups = OutgroupsByPair::new();
    for trio in trios {
        groups.entry(trio.divergent_pair()).or_default().push(trio.outgroup.clone());
    }
    groups
}
