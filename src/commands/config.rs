//! Settings file commands

use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};

use crate::config::Settings;

/// Print the effective settings as TOML
pub fn show(settings: &Settings) -> Result<()> {
    let rendered = toml::to_string_pretty(settings).context("Failed to serialize settings")?;
    print!("{}", rendered);
    Ok(())
}

/// Print an annotated example settings file
pub fn example() -> Result<()> {
    print!("{}", Settings::example_config());
    Ok(())
}

/// Write default settings to `path`, or to the per-user location
pub fn init(path: Option<PathBuf>, force: bool) -> Result<()> {
    let path = match path {
        Some(p) => p,
        None => Settings::user_config_path().context("Could not determine config directory")?,
    };

    write_defaults(&path, force)?;
    crate::log_info!("Wrote {}", path.display());
    println!("{}", path.display());
    Ok(())
}

fn write_defaults(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists; pass --force to overwrite",
            path.display()
        );
    }
    Settings::default().save(path)
}
