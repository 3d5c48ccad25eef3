use crate::color::Color;

/// Index of a swatch within a [`Palette`].
#[repr(transparent)]
#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct SwatchIndex(pub usize);

/// A fixed row of color swatches, exactly one of which is selected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    /// Invariant: never empty.
    colors: Vec<Color>,
    /// Invariant: in bounds of `colors`.
    selected: SwatchIndex,
}
impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: Self::DEFAULT_COLORS.to_vec(),
            // Red, matching the canvas default color.
            selected: SwatchIndex(2),
        }
    }
}
impl Palette {
    pub const DEFAULT_COLORS: &'static [Color] = &[
        Color::from_argb(0xFFFF_CC99),
        Color::from_argb(0xFF00_0000),
        Color::RED,
        Color::from_argb(0xFF00_A859),
        Color::from_argb(0xFF21_96F3),
        Color::from_argb(0xFFFF_EB3B),
        Color::from_argb(0xFFB3_9DDB),
        Color::WHITE,
    ];
    /// Build a palette. Returns `None` if `colors` is empty or `selected` is out of bounds.
    #[must_use]
    pub fn new(colors: Vec<Color>, selected: SwatchIndex) -> Option<Self> {
        (selected.0 < colors.len()).then_some(Self { colors, selected })
    }
    #[must_use]
    pub fn selected(&self) -> SwatchIndex {
        self.selected
    }
    #[must_use]
    pub fn selected_color(&self) -> Color {
        self.colors[self.selected.0]
    }
    #[must_use]
    pub fn get(&self, index: SwatchIndex) -> Option<Color> {
        self.colors.get(index.0).copied()
    }
    /// Select a swatch, returning its color if the selection changed.
    ///
    /// Re-selecting the current swatch or an unknown index changes nothing.
    pub fn select(&mut self, index: SwatchIndex) -> Option<Color> {
        if index == self.selected {
            return None;
        }
        let color = self.get(index)?;
        self.selected = index;
        Some(color)
    }
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Color> + '_ {
        self.colors.iter()
    }
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::{Palette, SwatchIndex};
    use crate::color::Color;
    #[test]
    fn default_selects_red() {
        let palette = Palette::default();
        assert_eq!(palette.selected_color(), Color::RED);
    }
    #[test]
    fn select_reports_changes_only() {
        let mut palette = Palette::default();
        assert_eq!(palette.select(SwatchIndex(2)), None);
        assert_eq!(palette.select(SwatchIndex(99)), None);
        assert_eq!(palette.selected(), SwatchIndex(2));
        assert_eq!(palette.select(SwatchIndex(1)), Some(Color::BLACK));
        assert_eq!(palette.selected_color(), Color::BLACK);
    }
    #[test]
    fn rejects_bad_construction() {
        assert!(Palette::new(vec![], SwatchIndex(0)).is_none());
        assert!(Palette::new(vec![Color::RED], SwatchIndex(1)).is_none());
        assert!(Palette::new(vec![Color::RED], SwatchIndex(0)).is_some());
    }
}
