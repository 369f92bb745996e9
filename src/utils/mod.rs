use color_eyre::eyre::{eyre, Report, Result, WrapErr};
use color_eyre::Help;
use log::warn;
use std::fmt::Debug;
use std::path::{Path, PathBuf};


/// Create the parent directory of a file path, if it does not exist.
pub fn create_parent_dir<P>(path: &P) -> Result<(), Report>
where
    P: AsRef<Path> + Debug,
{
    if let Some(parent) = path.as_ref().parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)
                .wrap_err_with(|| format!("Failed to create directory: {parent:?}"))?;
        }
    }
    Ok(())
}

/// Returns the path given as an argument, or the default path.
///
/// A supplied path that does not exist falls back to the default with a
/// warning. It is an error if neither exists.
///
/// ## Arguments
///
/// - `argument` - Optional path from the command-line.
/// - `default` - Default location of the file.
/// - `description` - What the file is, for messages.
pub fn get_argument_path(
    argument: Option<&Path>,
    default: &Path,
    description: &str,
) -> Result<PathBuf, Report> {
    if let Some(path) = argument {
        if path.exists() {
            return Ok(path.to_path_buf());
        }
        warn!("{description} not found at {path:?}, trying the default position {default:?}");
    }

    if default.exists() {
        return Ok(default.to_path_buf());
    }

    let mut error = eyre!("{description} not found at default position {default:?}");
    if let Some(path) = argument {
        error = error.note(format!("Also not found at the supplied path: {path:?}"));
    }
    Err(error)
}
