use crate::core::config::{path_display, Config};
use std::error::Error;
use std::path::Path;

/// Writes a config file with every default spelled out. An existing file is
/// only replaced when `force` is set.
pub fn write_default_config(path: &Path, force: bool) -> Result<String, Box<dyn Error>> {
    if path.exists() && !force {
        return Err(format!(
            "Config already exists at {} (use --force to overwrite)",
            path_display(path)
        )
        .into());
    }
    Config::with_defaults().save_to_path(path)?;
    Ok(format!("✅ Wrote default config to {}", path_display(path)))
}
