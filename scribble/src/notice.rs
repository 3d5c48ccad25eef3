//! Messages shown to the user as toasts, snackbars, or alert dialogs.

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    /// Export started. Shown as a progress indicator until the outcome arrives.
    Saving,
    Saved(std::path::PathBuf),
    SaveFailed,
    StorageDenied,
    /// Explain why a previously refused permission is needed.
    Rationale {
        title: &'static str,
        message: &'static str,
    },
    BackgroundSet,
    BackgroundFailed,
}
impl Notice {
    /// Whether this notice is a modal alert rather than a transient message.
    #[must_use]
    pub fn is_alert(&self) -> bool {
        matches!(self, Self::Rationale { .. })
    }
}
impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Saving => f.write_str("Saving the image..."),
            Self::Saved(path) => write!(f, "File has been saved successfully: {}", path.display()),
            Self::SaveFailed => f.write_str("Something went wrong while saving the file"),
            Self::StorageDenied => f.write_str("External storage access denied"),
            Self::Rationale { title, message } => write!(f, "{title}: {message}"),
            Self::BackgroundSet => f.write_str("Background image set"),
            Self::BackgroundFailed => f.write_str("Couldn't open that image"),
        }
    }
}
