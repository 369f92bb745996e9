//! Ortholog databases: the mandatory [`KsListDb`] of divergence values and the
//! optional [`PeakDb`] of distribution peaks, both indexed by [`PairKey`].

use crate::species::PairKey;
use color_eyre::eyre::{eyre, Report, Result, WrapErr};
use color_eyre::Help;
use log::{debug, warn};
use orthoks_table::Table;
use std::collections::HashMap;
use std::fmt::Debug;
use std::path::Path;


/// Column of the Ks list database holding the divergence values.
pub const KS_VALUES: &str = "Ks_Values";
pub const MODE: &str = "Mode";
pub const MODE_SD: &str = "Mode_SD";
pub const MEDIAN: &str = "Median";
pub const MEDIAN_SD: &str = "Median_SD";

/// A store of species pairs, indexed by [`PairKey`].
pub trait PairIndex {
    /// Returns true if the store has an entry for `key`.
    fn contains(&self, key: &PairKey) -> bool;
}

/// Map the first column of a table, the pair index, to row numbers.
fn index_rows(table: &Table<String>) -> HashMap<String, usize> {
    table
        .rows
        .iter()
        .enumerate()
        .filter_map(|(i, row)| row.first().map(|index| (PairKey::fold_index(index), i)))
        .collect()
}

// ----------------------------------------------------------------------------
// Ks List Database
// ----------------------------------------------------------------------------

/// Ortholog Ks values of each species pair.
#[derive(Clone, Debug)]
pub struct KsListDb {
    table: Table<String>,
    index: HashMap<String, usize>,
}

impl KsListDb {
    /// Wrap a table whose first column is the pair index.
    ///
    /// ## Examples
    ///
    /// ```rust
    /// use orthoks::database::{KsListDb, PairIndex};
    /// use orthoks::species::PairKey;
    /// use orthoks_table::Table;
    ///
    /// let mut table = Table::new();
    /// table.headers = vec![String::new(), "Ks_Values".to_string()];
    /// table.add_row(["A_B".to_string(), "[0.5, 0.7]".to_string()])?;
    ///
    /// let db = KsListDb::from_table(table)?;
    /// let key = PairKey::new("B", "A");
    /// assert!(db.contains(&key));
    /// assert_eq!(db.get(&key)?, [0.5, 0.7]);
    /// # Ok::<(), color_eyre::eyre::Report>(())
    /// ```
    pub fn from_table(table: Table<String>) -> Result<Self, Report> {
        table.get_header_index(KS_VALUES)?;
        let index = index_rows(&table);
        Ok(KsListDb { table, index })
    }

    /// Read the database, a missing or malformed file is an error.
    pub fn read<P>(path: &P) -> Result<Self, Report>
    where
        P: AsRef<Path> + Debug,
    {
        let db = Table::read(path)
            .and_then(KsListDb::from_table)
            .wrap_err_with(|| format!("Failed to load the ortholog Ks list database: {path:?}"))
            .suggestion("The Ks list database is required, check 'ks_list_db' in the config.")?;
        debug!("Loaded {} species pairs from the ortholog Ks list database.", db.len());
        Ok(db)
    }

    /// Returns the Ks values of a species pair.
    ///
    /// The values are stored as a bracketed list, ex. `[0.12, 0.5, 1.3]`.
    pub fn get(&self, key: &PairKey) -> Result<Vec<f64>, Report> {
        let row = self
            .index
            .get(key.folded())
            .ok_or_else(|| eyre!("Species pair {key} is not in the ortholog Ks list database."))?;
        let raw = self.table.get(KS_VALUES, *row)?;
        let values: Vec<f64> = serde_json::from_str(raw)
            .wrap_err_with(|| format!("Failed to parse the Ks values of species pair {key}."))?;
        Ok(values)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

impl PairIndex for KsListDb {
    fn contains(&self, key: &PairKey) -> bool {
        self.index.contains_key(key.folded())
    }
}

// ----------------------------------------------------------------------------
// Peak Database
// ----------------------------------------------------------------------------

/// Previously estimated peak of the Ks distribution of a species pair.
///
/// Empty or unparsable cells are [`None`], their markers are not drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PeakRecord {
    pub mode: Option<f64>,
    pub mode_sd: Option<f64>,
    pub median: Option<f64>,
    pub median_sd: Option<f64>,
}

/// Peaks of each species pair, parsed when loaded.
///
/// A pair is in the database if it is in the index column, whatever the
/// values in its row.
#[derive(Clone, Debug, Default)]
pub struct PeakTable {
    records: HashMap<String, PeakRecord>,
}

impl PeakTable {
    /// Parse a table whose first column is the pair index.
    ///
    /// The [`MODE`], [`MODE_SD`], [`MEDIAN`] and [`MEDIAN_SD`] columns are
    /// all optional.
    ///
    /// ## Examples
    ///
    /// ```rust
    /// use orthoks::database::{PairIndex, PeakTable};
    /// use orthoks::species::PairKey;
    /// use orthoks_table::Table;
    ///
    /// let mut table = Table::new();
    /// table.headers = vec![String::new(), "Mode".to_string()];
    /// table.add_row(["A_B".to_string(), String::new()])?;
    ///
    /// let peaks = PeakTable::from_table(&table);
    /// let key = PairKey::new("A", "B");
    /// assert!(peaks.contains(&key));
    /// assert_eq!(peaks.get(&key).and_then(|peak| peak.mode), None);
    /// # Ok::<(), color_eyre::eyre::Report>(())
    /// ```
    pub fn from_table(table: &Table<String>) -> Self {
        let [mode, mode_sd, median, median_sd] =
            [MODE, MODE_SD, MEDIAN, MEDIAN_SD].map(|column| table.get_header_index(column).ok());

        let records = table
            .rows
            .iter()
            .filter_map(|row| {
                let index = row.first()?;
                let field = |col_i: Option<usize>| col_i.and_then(|col_i| parse_field(row, col_i));
                let record = PeakRecord {
                    mode: field(mode),
                    mode_sd: field(mode_sd),
                    median: field(median),
                    median_sd: field(median_sd),
                };
                debug!("Peak of species pair {index}: {record:?}");
                Some((PairKey::fold_index(index), record))
            })
            .collect();

        PeakTable { records }
    }

    pub fn get(&self, key: &PairKey) -> Option<&PeakRecord> {
        self.records.get(key.folded())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Parse a floating-point field, empty or unparsable fields are [`None`].
fn parse_field(row: &[String], col_i: usize) -> Option<f64> {
    let value = row.get(col_i).map(|v| v.trim()).filter(|v| !v.is_empty())?;
    match value.parse() {
        Ok(value) => Some(value),
        Err(e) => {
            debug!("Ignoring peak value {value:?}: {e}");
            None
        }
    }
}

impl PairIndex for PeakTable {
    fn contains(&self, key: &PairKey) -> bool {
        self.records.contains_key(key.folded())
    }
}

/// The optional peak database, either loaded or unavailable for the whole run.
#[derive(Clone, Debug, Default)]
pub enum PeakDb {
    Loaded(PeakTable),
    #[default]
    Unavailable,
}

impl PeakDb {
    /// Load the peak database.
    ///
    /// A missing, empty or unreadable file is not an error: a warning is logged
    /// and [`PeakDb::Unavailable`] is returned.
    pub fn load<P>(path: &P) -> Self
    where
        P: AsRef<Path> + Debug,
    {
        match Table::read(path).map(|table| PeakTable::from_table(&table)) {
            Ok(table) => {
                debug!("Loaded {} species pairs from the ortholog peak database.", table.len());
                PeakDb::Loaded(table)
            }
            Err(e) => {
                warn!("Ortholog Ks peak database empty or not found at {path:?}: distribution peaks will not be shown");
                debug!("{e:?}");
                PeakDb::Unavailable
            }
        }
    }

    /// Returns the peak of a species pair, [`None`] if absent or unavailable.
    pub fn get(&self, key: &PairKey) -> Option<&PeakRecord> {
        match self {
            PeakDb::Loaded(table) => table.get(key),
            PeakDb::Unavailable => None,
        }
    }
}
