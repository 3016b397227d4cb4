use std::path::PathBuf;

/// Get the location of the crate's config dir
pub(crate) fn config_dir() -> anyhow::Result<PathBuf> {
    let dir = dirs::config_dir()
        .ok_or_else(|| anyhow::anyhow!("could not find a config dir for the current OS"))?;
    Ok(dir.join("wrangler"))
}
