//! Write a starter configuration file

use std::path::PathBuf;

use anyhow::Result;

use wearscout::config::Config;

pub fn init(path: PathBuf) -> Result<()> {
    if path.exists() {
        anyhow::bail!("'{}' already exists, refusing to overwrite", path.display());
    }
    Config::write_default(&path)?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}
