//! Diagnostic logging setup.
//!
//! The terminal is owned by the interface while the game runs, so log records go to a file instead
//! of standard output. Filtering follows `RUST_LOG` and defaults to the debug level.

use std::{fs::File, path::Path, sync::Mutex};

use color_eyre::eyre::{Result, WrapErr as _};
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

/// Installs a global tracing subscriber that writes plain-text records to `path`.
///
/// # Errors
///
/// This function returns an error if:
/// - The log file cannot be created
/// - A global subscriber was already installed
pub fn init(path: &Path) -> Result<()> {
    let file = File::create(path)
        .wrap_err_with(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::DEBUG.into())
        .from_env_lossy();

    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .wrap_err("failed to install log subscriber")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{env, fs, process};

    use super::*;

    #[test]
    fn test_unwritable_path_is_an_error() {
        let path = env::temp_dir()
            .join(format!("labyrunner-missing-{}", process::id()))
            .join("run.log");

        assert!(init(&path).is_err(), "missing parent directory should fail");
        assert!(fs::metadata(&path).is_err());
    }
}
