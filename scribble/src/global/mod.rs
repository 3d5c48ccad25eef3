//! Global singletons and user preference files.

pub mod hotkeys;
pub mod settings;

#[must_use]
pub fn preferences_dir() -> Option<std::path::PathBuf> {
    let mut base_dir = dirs::preference_dir()?;
    base_dir.push(env!("CARGO_PKG_NAME"));
    Some(base_dir)
}

/// Write a preferences file, prefixed with a commented header.
///
/// The preferences directory itself is created if missing, but not its parents. If those don't
/// exist, the user probably has a good reason.
pub(crate) fn write_preference(
    filename: &str,
    header: &str,
    body: &str,
) -> anyhow::Result<std::path::PathBuf> {
    let mut path =
        preferences_dir().ok_or_else(|| anyhow::anyhow!("No preferences dir found"))?;
    // Errors (already exists...) are ignored, real problems surface on write below.
    let _ = std::fs::DirBuilder::new().create(&path);

    path.push(filename);
    std::fs::write(&path, header.to_owned() + body)?;
    Ok(path)
}
