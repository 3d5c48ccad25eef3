//! # Actions
//!
//! Everything the toolbar and dialogs can ask of the app, independent of which button,
//! hotkey, or script line asked for it.

pub mod hotkeys;

#[derive(
    serde::Serialize,
    serde::Deserialize,
    Hash,
    PartialEq,
    Eq,
    Debug,
    strum::AsRefStr,
    strum::EnumString,
    strum::EnumIter,
    Clone,
    Copy,
)]
#[strum(ascii_case_insensitive)]
pub enum Action {
    Undo,
    Redo,

    BrushSmall,
    BrushMedium,
    BrushLarge,

    Clear,
    Save,
}
impl Action {
    /// The brush preset this action selects, if it is a brush action.
    #[must_use]
    pub fn brush_size(self) -> Option<scribble_core::BrushSize> {
        use scribble_core::BrushSize;
        match self {
            Self::BrushSmall => Some(BrushSize::Small),
            Self::BrushMedium => Some(BrushSize::Medium),
            Self::BrushLarge => Some(BrushSize::Large),
            _ => None,
        }
    }
}
