use crate::config::Config;
use crate::run::{availability_table, check, plot, CheckArgs, PlotArgs};
use crate::species::{LatinNames, PairKey};
use color_eyre::eyre::{Report, Result};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Stroke of the mode and median lines, as written to the lowercased SVG.
const MODE_STROKE: &str = "stroke=\"#d62728\"";
const MEDIAN_STROKE: &str = "stroke=\"#505050\"";

const KS_VALUES: &str = "[0.1, 0.35, 0.4, 0.5, 0.55, 0.9, 1.2, 2.4]";

/// A run directory with a config, a trio table and the databases.
struct Fixture {
    dir: TempDir,
    config: PathBuf,
    trios: PathBuf,
}

impl Fixture {
    /// `peaks` of [`None`] leaves the peak database absent.
    fn new(trios: &[[&str; 3]], ks_pairs: &[&str], peaks: Option<&[&str]>) -> Result<Self, Report> {
        let dir = tempfile::tempdir()?;

        let trios_path = dir.path().join("ortholog_trios.tsv");
        let mut content = "Focal_Species\tSister_Species\tOut_Species\n".to_string();
        trios.iter().for_each(|trio| content.push_str(&format!("{}\n", trio.join("\t"))));
        std::fs::write(&trios_path, content)?;

        let ks_list_db = dir.path().join("ortholog_ks_list_db.tsv");
        let mut content = "\tKs_Values\n".to_string();
        ks_pairs.iter().for_each(|pair| content.push_str(&format!("{pair}\t{KS_VALUES}\n")));
        std::fs::write(&ks_list_db, content)?;

        let peak_db = dir.path().join("ortholog_peak_db.tsv");
        if let Some(pairs) = peaks {
            let mut content = "\tMode\tMode_SD\tMedian\tMedian_SD\n".to_string();
            pairs.iter().for_each(|pair| content.push_str(&format!("{pair}\t0.5\t0.05\t0.6\t0.04\n")));
            std::fs::write(&peak_db, content)?;
        }

        let config = Config {
            species: "sp1".to_string(),
            latin_names: LatinNames::from_iter(
                (1..=4).map(|i| (format!("sp{i}"), format!("Sp{i}"))),
            ),
            x_lim_ortho: 3.0,
            ks_list_db,
            peak_db,
            seed: Some(1),
            ..Default::default()
        };
        let config_path = dir.path().join("config.json");
        config.write(&config_path)?;

        Ok(Fixture { dir, config: config_path, trios: trios_path })
    }

    fn plot_args(&self) -> PlotArgs {
        PlotArgs {
            config: self.config.clone(),
            trios: Some(self.trios.clone()),
            output_dir: Some(self.output_dir()),
            ..Default::default()
        }
    }

    fn output_dir(&self) -> PathBuf {
        self.dir.path().join("figures")
    }
}

fn key(a: &str, b: &str) -> PairKey {
    PairKey::new(a, b)
}

fn read(path: &Path) -> Result<String, Report> {
    Ok(std::fs::read_to_string(path)?)
}

#[test]
fn one_trio_without_peak_database() -> Result<(), Report> {
    let fixture = Fixture::new(&[["sp1", "sp2", "sp3"]], &["Sp1_Sp2", "Sp1_Sp3", "Sp2_Sp3"], None)?;
    let summary = plot(&fixture.plot_args())?;

    let expected = fixture.output_dir().join("orthologs_Sp1_Sp2.svg");
    assert_eq!(summary.documents, [expected.clone()]);
    assert!(summary.missing.is_empty());

    let svg = read(&expected)?;
    assert!(svg.starts_with("<svg"));
    assert_eq!(svg.matches("Sp1 and Sp2, outgroup Sp3").count(), 1);
    Ok(())
}

#[test]
fn one_trio_with_peaks() -> Result<(), Report> {
    let pairs = ["Sp1_Sp2", "Sp1_Sp3", "Sp2_Sp3"];
    let fixture = Fixture::new(&[["sp1", "sp2", "sp3"]], &pairs, Some(pairs.as_slice()))?;
    let summary = plot(&fixture.plot_args())?;

    assert_eq!(summary.documents.len(), 1);
    assert!(summary.missing.is_empty());

    // mode and median lines of each of the three panels
    let svg = read(&summary.documents[0])?.to_lowercase();
    assert_eq!(svg.matches(MODE_STROKE).count(), 3);
    assert_eq!(svg.matches(MEDIAN_STROKE).count(), 3);
    Ok(())
}

#[test]
fn no_peak_markers_without_peak_database() -> Result<(), Report> {
    let fixture = Fixture::new(&[["sp1", "sp2", "sp3"]], &["Sp1_Sp2", "Sp1_Sp3", "Sp2_Sp3"], None)?;
    let summary = plot(&fixture.plot_args())?;

    let svg = read(&summary.documents[0])?.to_lowercase();
    assert!(!svg.contains(MODE_STROKE));
    assert!(!svg.contains(MEDIAN_STROKE));
    Ok(())
}

#[test]
fn peak_rows_without_values_still_count_as_present() -> Result<(), Report> {
    let fixture = Fixture::new(&[["sp1", "sp2", "sp3"]], &["Sp1_Sp2", "Sp1_Sp3", "Sp2_Sp3"], None)?;
    let peak_db = fixture.dir.path().join("ortholog_peak_db.tsv");
    std::fs::write(&peak_db, "\tMode\tMode_SD\nSp1_Sp2\t\t\n")?;

    let summary = plot(&fixture.plot_args())?;

    assert!(summary.documents.is_empty());
    assert!(summary.missing.ks_list.is_empty());
    let expected = [key("Sp1", "Sp3"), key("Sp2", "Sp3")];
    assert_eq!(summary.missing.peaks.iter().cloned().collect::<Vec<_>>(), expected);
    Ok(())
}

#[test]
fn empty_peak_values_draw_no_markers() -> Result<(), Report> {
    let pairs = ["Sp1_Sp2", "Sp1_Sp3", "Sp2_Sp3"];
    let fixture = Fixture::new(&[["sp1", "sp2", "sp3"]], &pairs, None)?;
    let rows = pairs.iter().map(|pair| format!("{pair}\t\tx\n")).collect::<String>();
    std::fs::write(fixture.dir.path().join("ortholog_peak_db.tsv"), format!("\tMode\tMode_SD\n{rows}"))?;

    let summary = plot(&fixture.plot_args())?;

    assert_eq!(summary.documents.len(), 1);
    assert!(summary.missing.is_empty());
    let svg = read(&summary.documents[0])?.to_lowercase();
    assert!(!svg.contains(MODE_STROKE));
    Ok(())
}

#[test]
fn one_trio_with_empty_peak_database() -> Result<(), Report> {
    let fixture =
        Fixture::new(&[["sp1", "sp2", "sp3"]], &["Sp1_Sp2", "Sp1_Sp3", "Sp2_Sp3"], Some(&[][..]))?;
    let summary = plot(&fixture.plot_args())?;

    // a loaded peak database must hold every pair of a usable trio
    assert!(summary.documents.is_empty());
    assert!(summary.missing.ks_list.is_empty());
    let expected = [key("Sp1", "Sp2"), key("Sp1", "Sp3"), key("Sp2", "Sp3")];
    assert_eq!(summary.missing.peaks.iter().cloned().collect::<Vec<_>>(), expected);
    Ok(())
}

#[test]
fn divergent_pair_missing_from_ks_list() -> Result<(), Report> {
    let fixture = Fixture::new(&[["sp1", "sp2", "sp3"]], &["Sp1_Sp3", "Sp2_Sp3"], None)?;
    let summary = plot(&fixture.plot_args())?;

    assert!(summary.documents.is_empty());
    assert_eq!(summary.skipped, ["sp1_sp2"]);
    assert!(summary.missing.ks_list.contains(&key("sp2", "SP1")));
    assert!(!fixture.output_dir().join("orthologs_Sp1_Sp2.svg").exists());
    Ok(())
}

#[test]
fn strict_fails_without_documents() -> Result<(), Report> {
    let fixture = Fixture::new(&[["sp1", "sp2", "sp3"]], &["Sp1_Sp3", "Sp2_Sp3"], None)?;
    let args = PlotArgs { strict: true, ..fixture.plot_args() };
    assert!(plot(&args).is_err());
    Ok(())
}

#[test]
fn only_available_outgroup_is_plotted() -> Result<(), Report> {
    let trios = [["sp1", "sp2", "sp3"], ["sp1", "sp2", "sp4"]];
    let fixture = Fixture::new(&trios, &["Sp1_Sp2", "Sp1_Sp3", "Sp2_Sp3", "Sp1_Sp4"], None)?;
    let summary = plot(&fixture.plot_args())?;

    assert_eq!(summary.documents.len(), 1);
    let svg = read(&summary.documents[0])?;
    assert_eq!(svg.matches("outgroup Sp3").count(), 1);
    assert_eq!(svg.matches("outgroup Sp4").count(), 0);

    assert_eq!(summary.missing.ks_list.len(), 1);
    assert!(summary.missing.ks_list.contains(&key("Sp2", "Sp4")));
    let reported = summary.missing.summary().iter().filter(|line| line.contains("Sp2 - Sp4")).count();
    assert_eq!(reported, 1);
    Ok(())
}

#[test]
fn seeded_runs_are_identical() -> Result<(), Report> {
    let fixture = Fixture::new(&[["sp1", "sp2", "sp3"]], &["Sp1_Sp2", "Sp1_Sp3", "Sp2_Sp3"], None)?;

    let first = PlotArgs { seed: Some(42), ..fixture.plot_args() };
    let second = PlotArgs { seed: Some(42), output_dir: Some(fixture.dir.path().join("again")), ..fixture.plot_args() };
    let first = plot(&first)?;
    let second = plot(&second)?;

    assert_eq!(read(&first.documents[0])?, read(&second.documents[0])?);
    Ok(())
}

#[test]
fn missing_trios_is_an_error() -> Result<(), Report> {
    let fixture = Fixture::new(&[["sp1", "sp2", "sp3"]], &["Sp1_Sp2"], None)?;
    let args = PlotArgs { trios: Some(fixture.dir.path().join("missing.tsv")), ..fixture.plot_args() };
    assert!(plot(&args).is_err());
    Ok(())
}

#[test]
fn check_lists_every_outgroup() -> Result<(), Report> {
    let trios = [["sp1", "sp2", "sp3"], ["sp1", "sp2", "sp4"]];
    let fixture = Fixture::new(&trios, &["Sp1_Sp2", "Sp1_Sp3", "Sp2_Sp3"], None)?;
    let args = CheckArgs { config: fixture.config.clone(), trios: Some(fixture.trios.clone()) };
    let resolution = check(&args)?;

    let table = availability_table(&resolution)?;
    let expected = [
        ["Sp1 - Sp2", "Sp3", "usable"],
        ["Sp1 - Sp2", "Sp4", "missing data"],
    ];
    assert_eq!(table.rows, expected.map(|row| row.map(String::from).to_vec()));
    assert_eq!(resolution.missing.ks_list.len(), 2);
    assert!(!fixture.output_dir().exists());
    Ok(())
}
