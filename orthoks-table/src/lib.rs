//! Read, query and write a row-based [`Table`] of delimited text.

use color_eyre::eyre::{eyre, ContextCompat, Report, Result, WrapErr};
use color_eyre::Help;
use itertools::Itertools;
use std::fmt::{Debug, Display};
use std::path::{Path, PathBuf};


// ----------------------------------------------------------------------------
// Delimiter
// ----------------------------------------------------------------------------

/// Get delimiter based on file extension.
///
/// ## Arguments
///
/// - `path` - File path.
///
/// ## Examples
///
/// - `.tsv` => `\t`
/// - `.txt` => `\t`
/// - `.csv` => `,`
///
/// Note that `.txt` is assumed to be tab-delimited!
///
/// ```rust
/// use orthoks_table::get_delimiter;
///
/// assert_eq!(get_delimiter(&"file.tsv")?, '\t');
/// assert_eq!(get_delimiter(&"file.csv")?, ',');
/// assert_eq!(get_delimiter(&"file.txt")?, '\t');
/// assert!(get_delimiter(&"file").is_err());
/// # Ok::<(), color_eyre::eyre::Report>(())
/// ```
pub fn get_delimiter<P>(path: &P) -> Result<char, Report>
where
    P: AsRef<Path> + Debug,
{
    let ext = path
        .as_ref()
        .extension()
        .wrap_err_with(|| format!("Failed to get file extension: {path:?}"))?
        .to_str()
        .wrap_err_with(|| format!("Failed to convert file extension to str: {path:?}"))?;
    // convert extension to the expected delimiter
    match ext {
        "tsv" | "txt" => Ok('\t'),
        "csv" => Ok(','),
        _ext => {
            Err(eyre!("Unknown file extension: {_ext:?}").suggestion("Options: tsv, csv, or txt"))
        }
    }
}

// ----------------------------------------------------------------------------
// Table
// ----------------------------------------------------------------------------

/// A row-based [`Table`] of generic data.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Table<T> {
    /// Names of the table columns.
    pub headers: Vec<T>,
    /// Rows of table values.
    pub rows: Vec<Vec<T>>,
    /// Optional file path for where the table was read from.
    pub path: Option<PathBuf>,
}

impl<T> Default for Table<T>
where
    T: AsRef<str> + Clone + Debug + Display,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Table<T>
where
    T: AsRef<str> + Clone + Debug + Display,
{
    /// Returns a new row-based [`Table`] with empty headers and rows.
    ///
    /// ## Examples
    ///
    /// Let the compiler figure out the type from subsequent commands.
    ///
    /// ```
    /// let mut table = orthoks_table::Table::new();
    /// table.headers = vec!["1", "2", "3"];
    /// table.add_row(vec!["A", "B", "C"])?;
    /// # assert_eq!(table.rows, vec![vec!["A", "B", "C"]]);
    /// # Ok::<(), color_eyre::eyre::Report>(())
    /// ```
    ///
    /// | 1 | 2 | 3 |
    /// |---|---|---|
    /// | A | B | C |
    pub fn new() -> Self {
        Table { headers: Vec::new(), rows: Vec::new(), path: None }
    }

    /// Add a new row to the table.
    ///
    /// ## Arguments
    ///
    /// * `row` - A iterable object of new data (`T`) to add as a row.
    ///
    /// ## Examples
    ///
    /// ```
    /// let mut table = orthoks_table::Table::new();
    /// table.headers = vec!["1", "2", "3"];
    /// table.add_row(["A", "B", "C"])?;
    /// table.add_row(["D", "E", "F"])?;
    /// assert!(table.add_row(["G"]).is_err());
    /// # assert_eq!(table.rows, [["A", "B", "C"], ["D", "E", "F"]]);
    /// # Ok::<(), color_eyre::eyre::Report>(())
    /// ```
    pub fn add_row<I>(&mut self, row: I) -> Result<(), Report>
    where
        I: IntoIterator<Item = T>,
    {
        let row = row.into_iter().collect::<Vec<T>>();
        // the new row must match the headers
        if !self.headers.is_empty() && row.len() != self.headers.len() {
            return Err(eyre!(
                "New row size ({}) does not match the table headers ({}).",
                row.len(),
                self.headers.len()
            ));
        }
        self.rows.push(row);
        Ok(())
    }

    /// Returns the [`Table`] value under a particular header and row index.
    ///
    /// ## Arguments
    ///
    /// - `header` - Column name.
    /// - `row` - Row index (0-based).
    ///
    /// # Examples
    ///
    /// ```
    /// let mut table = orthoks_table::Table::new();
    /// table.headers = vec!["1", "2", "3"];
    /// table.add_row(["A", "B", "C"])?;
    ///
    /// assert_eq!(table.get("2", 0)?, &"B");
    /// assert!(table.get("4", 0).is_err());
    /// # Ok::<(), color_eyre::eyre::Report>(())
    /// ```
    pub fn get(&self, header: &str, row: usize) -> Result<&T, Report> {
        let header_i = self.get_header_index(header)?;
        let values = self.get_row(row)?;
        values.get(header_i).wrap_err_with(|| {
            format!("Row ({row}) has no value for column '{header}' in table: {:?}.", self.path)
        })
    }

    /// Returns the column index (0-based) of the header in the [`Table`].
    ///
    /// # Examples
    ///
    /// ```
    /// let mut table = orthoks_table::Table::new();
    /// table.headers = vec!["1", "2", "3"];
    ///
    /// assert_eq!(table.get_header_index("1")?, 0);
    /// assert_eq!(table.get_header_index("3")?, 2);
    /// # Ok::<(), color_eyre::eyre::Report>(())
    /// ```
    pub fn get_header_index(&self, header: &str) -> Result<usize, Report> {
        let pos = self.headers.iter().position(|h| h.as_ref() == header).ok_or_else(|| {
            eyre!("Column '{header}' was not found in table: {:?}.", self.path)
        })?;

        Ok(pos)
    }

    /// Return a row of [`Table`] values from a row index.
    pub fn get_row(&self, i: usize) -> Result<&[T], Report> {
        self.rows
            .get(i)
            .map(|row| row.as_slice())
            .ok_or_else(|| eyre!("Row ({i}) does not exist in the table."))
    }

    /// Convert table to markdown format.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut table = orthoks_table::Table::new();
    /// table.headers = vec!["1", "2", "3"];
    /// table.add_row(vec!["A", "B", "C"])?;
    ///
    /// let expected = "| 1 | 2 | 3 |\n|---|---|---|\n| A | B | C |\n";
    /// assert_eq!(table.to_markdown(), expected);
    /// # Ok::<(), color_eyre::eyre::Report>(())
    /// ```
    pub fn to_markdown(&self) -> String {
        // get the maximum width of each column, +2 to add space on either side
        let col_widths = self
            .headers
            .iter()
            .enumerate()
            .map(|(col_i, header)| {
                let header_width = header.as_ref().chars().count();
                self.rows
                    .iter()
                    .filter_map(|row| row.get(col_i))
                    .map(|cell| cell.as_ref().chars().count())
                    .chain(std::iter::once(header_width))
                    .max()
                    .unwrap_or(header_width)
                    + 2
            })
            .collect_vec();

        let mut markdown = String::from("|");
        // frame in between headers and rows
        let mut header_frame = String::from("|");

        for (header, col_width) in self.headers.iter().zip(col_widths.iter()) {
            markdown.push_str(&format!("{:^width$}|", header.as_ref(), width = col_width));
            header_frame.push_str(&format!("{}|", "-".repeat(*col_width)));
        }
        markdown.push('\n');
        markdown.push_str(&header_frame);
        markdown.push('\n');

        for row in &self.rows {
            markdown.push('|');
            for (col_i, col_width) in col_widths.iter().enumerate() {
                let cell = row.get(col_i).map(|c| c.as_ref()).unwrap_or_default();
                markdown.push_str(&format!("{:^width$}|", cell, width = col_width));
            }
            markdown.push('\n');
        }

        markdown
    }
}

impl Table<String> {
    /// Read a TSV or CSV file into a [`Table`].
    ///
    /// The first record becomes the headers. The delimiter is looked up from
    /// the file extension. Rows are not required to have the same number of
    /// fields as the headers, callers check the fields they need.
    ///
    /// ## Examples
    ///
    /// ```
    /// let dir = tempfile::tempdir()?;
    /// let path = dir.path().join("table.tsv");
    /// std::fs::write(&path, "1\t2\t3\nA\tB\tC\n")?;
    ///
    /// let table = orthoks_table::Table::read(&path)?;
    /// assert_eq!(table.headers, ["1", "2", "3"]);
    /// assert_eq!(table.get("3", 0)?, "C");
    /// # Ok::<(), color_eyre::eyre::Report>(())
    /// ```
    pub fn read<P>(path: &P) -> Result<Table<String>, Report>
    where
        P: AsRef<Path> + Debug,
    {
        let delim = get_delimiter(path)?;
        let delim = u8::try_from(delim)
            .wrap_err_with(|| format!("Delimiter is not a single byte: {delim:?}"))?;

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delim)
            .has_headers(false)
            .flexible(true)
            .from_path(path)
            .wrap_err_with(|| eyre!("Failed to read file: {path:?}"))?;

        let mut table = Table::new();
        for (i, record) in reader.records().enumerate() {
            let record =
                record.wrap_err_with(|| format!("Failed to parse line {} of: {path:?}", i + 1))?;
            let row = record.iter().map(String::from).collect_vec();
            // the first line holds the headers
            if i == 0 {
                table.headers = row;
            } else {
                table.rows.push(row);
            }
        }

        if table.headers.is_empty() {
            return Err(eyre!("Table is empty: {path:?}"));
        }

        table.path = Some(path.as_ref().to_path_buf());
        Ok(table)
    }
}
