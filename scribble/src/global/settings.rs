use scribble_core::{
    palette::{Palette, SwatchIndex},
    BrushSize, Color, Density, RedoPolicy,
};

use crate::renderer::MAX_SIDE;

const DOCUMENTATION: &str = r##"# Scribble settings. You may edit this file, but be aware that formatting and comments will not
# be preserved. Missing fields take their default value.

# width, height     - Canvas size in pixels, at most 16384 each.
# density           - Display pixels per density-independent pixel, at most 16. Brush presets are
#                     10, 20, and 30dp.
# brush             - Starting brush: "Small", "Medium", or "Large".
# palette           - Swatch colors, as "#RRGGBB", "#AARRGGBB", or a color name.
# swatch            - Index into `palette` selected at startup.
# redo_policy       - "clear-on-commit" forgets undone strokes once something new is drawn,
#                     "preserve" keeps them redoable.
# export_dir        - Where exported PNGs are written. Defaults to the user cache directory.
# export_prefix     - File name prefix of exported PNGs.

"##;

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub width: u32,
    pub height: u32,
    pub density: Density,
    pub brush: BrushSize,
    pub palette: Vec<Color>,
    pub swatch: SwatchIndex,
    pub redo_policy: RedoPolicy,
    pub export_dir: Option<std::path::PathBuf>,
    pub export_prefix: String,
}
impl Default for Settings {
    fn default() -> Self {
        let palette = Palette::default();
        Self {
            width: 1080,
            height: 1920,
            density: Density::BASELINE,
            brush: BrushSize::Medium,
            palette: palette.iter().copied().collect(),
            swatch: palette.selected(),
            redo_policy: RedoPolicy::default(),
            export_dir: None,
            export_prefix: env!("CARGO_PKG_NAME").to_owned(),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Parse(#[from] toml::de::Error),
    #[error("canvas must be at least 1x1 pixels, got {0}x{1}")]
    EmptyCanvas(u32, u32),
    #[error("canvas sides must be at most {max} pixels, got {width}x{height}")]
    CanvasTooLarge { width: u32, height: u32, max: u32 },
    #[error("palette is empty or swatch {0} is out of range")]
    BadPalette(usize),
    #[error("export prefix must be a plain file name, got {0:?}")]
    BadPrefix(String),
}

impl Settings {
    const FILENAME: &'static str = "settings.toml";
    /// Load from the user preferences directory, defaulting if there is none or it's broken.
    #[must_use]
    pub fn load_user() -> Self {
        match super::preferences_dir() {
            None => {
                log::warn!("Settings weren't available, defaulting.");
                Self::default()
            }
            Some(mut dir) => {
                dir.push(Self::FILENAME);
                Self::load_or_default(&dir)
            }
        }
    }
    #[must_use]
    pub fn load_or_default(path: &std::path::Path) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(SettingsError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No settings at {}, defaulting.", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("Failed to load settings at {}: {e}", path.display());
                Self::default()
            }
        }
    }
    pub fn load(path: &std::path::Path) -> Result<Self, SettingsError> {
        let string = std::fs::read_to_string(path)?;
        let settings: Self = toml::from_str(&string)?;
        settings.validate()?;
        Ok(settings)
    }
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.width == 0 || self.height == 0 {
            return Err(SettingsError::EmptyCanvas(self.width, self.height));
        }
        if self.width > MAX_SIDE || self.height > MAX_SIDE {
            return Err(SettingsError::CanvasTooLarge {
                width: self.width,
                height: self.height,
                max: MAX_SIDE,
            });
        }
        if self.swatch.0 >= self.palette.len() {
            return Err(SettingsError::BadPalette(self.swatch.0));
        }
        let prefix_is_plain = !self.export_prefix.is_empty()
            && !self
                .export_prefix
                .contains(|c: char| std::path::is_separator(c) || c == '.');
        if !prefix_is_plain {
            return Err(SettingsError::BadPrefix(self.export_prefix.clone()));
        }
        Ok(())
    }
    /// The palette these settings describe, or the default one if they don't describe a valid one.
    #[must_use]
    pub fn palette(&self) -> Palette {
        Palette::new(self.palette.clone(), self.swatch).unwrap_or_default()
    }
    /// Directory exports are written to. `None` if no directory is configured and the
    /// platform has no cache directory.
    #[must_use]
    pub fn export_dir(&self) -> Option<std::path::PathBuf> {
        self.export_dir.clone().or_else(|| {
            let mut dir = dirs::cache_dir()?;
            dir.push(env!("CARGO_PKG_NAME"));
            Some(dir)
        })
    }
    pub fn save(&self) -> anyhow::Result<()> {
        let string = toml::ser::to_string_pretty(self)?;
        super::write_preference(Self::FILENAME, DOCUMENTATION, &string)?;
        Ok(())
    }
}
