//! Init command implementation.

use std::fs;

use crate::Result;
use crate::cli::InitArgs;
use crate::config::{CONFIG_TEMPLATE, Config};

/// Execute the init command.
///
/// Creates the data directory and a commented `config.yaml`. An existing
/// config is left alone unless `--force` is given. The slot file itself is
/// created by the first mutation.
///
/// # Errors
///
/// Returns an error if the directory or config file cannot be written.
pub fn execute(args: &InitArgs, config: &Config) -> Result<()> {
    fs::create_dir_all(&config.data_dir)?;

    let config_path = config.config_path();
    if config_path.exists() && !args.force {
        println!("Already initialized: {}", config_path.display());
        return Ok(());
    }
    fs::write(&config_path, CONFIG_TEMPLATE)?;

    let gitignore_path = config.data_dir.join(".gitignore");
    if !gitignore_path.exists() {
        fs::write(gitignore_path, "# Temporary\n*.tmp\n*.log\n")?;
    }

    tracing::info!("Wrote {}", config_path.display());
    println!("Initialized issuebook in {}", config.data_dir.display());
    Ok(())
}
