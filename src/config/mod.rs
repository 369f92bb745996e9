//! Run [`Config`]uration, read from a JSON file.

use crate::species::LatinNames;
use color_eyre::eyre::{eyre, Report, Result, WrapErr};
use color_eyre::Help;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::path::{Path, PathBuf};


/// Directory of the per-species inputs and outputs, relative to the working directory.
pub const RATE_ADJUSTMENT_DIR: &str = "rate_adjustment";

/// Parameters of an ortholog plotting run.
///
/// Every field has a default, only `species` and `latin_names` must be
/// provided.
///
/// ```json
/// {
///   "species": "elaeis",
///   "latin_names": { "elaeis": "E. guineensis", "oryza": "O. sativa", "asparagus": "A. officinalis" },
///   "max_ks_ortho": 5.0,
///   "bin_width_ortho": 0.1,
///   "x_lim_ortho": 3.0,
///   "ks_list_db": "ortholog_ks_list_db.tsv",
///   "peak_db": "ortholog_peak_db.tsv"
/// }
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct Config {
    /// Identifier of the species of interest.
    pub species: String,
    /// Display name of every species identifier.
    pub latin_names: LatinNames,
    /// Upper bound of the ortholog Ks histograms.
    pub max_ks_ortho: f64,
    /// Bin width of the ortholog Ks histograms.
    pub bin_width_ortho: f64,
    /// Upper limit of the x axis, also the upper bound of the density estimates.
    pub x_lim_ortho: f64,
    /// Ortholog Ks list database, required.
    pub ks_list_db: PathBuf,
    /// Ortholog Ks peak database, optional.
    pub peak_db: PathBuf,
    /// Seed of the bootstrap resampling, random if not set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            species: String::new(),
            latin_names: LatinNames::default(),
            max_ks_ortho: 5.0,
            bin_width_ortho: 0.1,
            x_lim_ortho: 5.0,
            ks_list_db: PathBuf::from("ortholog_ks_list_db.tsv"),
            peak_db: PathBuf::from("ortholog_peak_db.tsv"),
            seed: None,
        }
    }
}

impl Config {
    /// Reads a [`Config`] from a JSON file and validates it.
    pub fn read<P>(path: &P) -> Result<Config, Report>
    where
        P: AsRef<Path> + Debug,
    {
        let input = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read configuration file: {path:?}."))?;
        let config: Config = serde_json::from_str(&input)
            .wrap_err_with(|| format!("Failed to deserialize configuration file: {path:?}"))?;
        config.validate().wrap_err_with(|| format!("Invalid configuration file: {path:?}"))?;
        Ok(config)
    }

    /// Write [`Config`] to a JSON file.
    ///
    /// ## Examples
    ///
    /// ```rust
    /// use orthoks::Config;
    ///
    /// let dir = tempfile::tempdir()?;
    /// let path = dir.path().join("config.json");
    /// let config = Config { species: "elaeis".to_string(), ..Default::default() };
    /// config.write(&path)?;
    /// # Ok::<(), color_eyre::eyre::Report>(())
    /// ```
    pub fn write<P>(&self, path: &P) -> Result<(), Report>
    where
        P: AsRef<Path> + Debug,
    {
        crate::utils::create_parent_dir(path)?;
        let output = serde_json::to_string_pretty(self)
            .wrap_err(format!("Failed to serialize configuration: {self:?}"))?;
        std::fs::write(path, output)
            .wrap_err(format!("Failed to write configuration file: {path:?}"))?;
        Ok(())
    }

    /// Check the species of interest and the histogram parameters.
    pub fn validate(&self) -> Result<(), Report> {
        if self.species.is_empty() {
            return Err(eyre!("The species of interest is not set.")
                .suggestion("Set 'species' in the configuration file."));
        }
        if self.latin_names.is_empty() {
            return Err(eyre!("No species display names are configured.")
                .suggestion("Add 'latin_names' to the configuration file."));
        }
        self.latin_names.get(&self.species)?;

        let positive = [
            ("max_ks_ortho", self.max_ks_ortho),
            ("bin_width_ortho", self.bin_width_ortho),
            ("x_lim_ortho", self.x_lim_ortho),
        ];
        if let Some((name, value)) = positive.iter().find(|(_, v)| !v.is_finite() || *v <= 0.0) {
            return Err(eyre!("'{name}' must be a positive number: {value}"));
        }
        if self.bin_width_ortho > self.max_ks_ortho {
            return Err(eyre!(
                "'bin_width_ortho' ({}) is larger than 'max_ks_ortho' ({}).",
                self.bin_width_ortho,
                self.max_ks_ortho
            ));
        }
        Ok(())
    }

    /// Directory of the species of interest, `rate_adjustment/<species>`.
    pub fn species_dir(&self) -> PathBuf {
        Path::new(RATE_ADJUSTMENT_DIR).join(&self.species)
    }

    /// Default trio table, `rate_adjustment/<species>/ortholog_trios_<species>.tsv`.
    pub fn default_trios_path(&self) -> PathBuf {
        self.species_dir().join(format!("ortholog_trios_{}.tsv", self.species))
    }
}
