//! Small numeric wrappers shared by the canvas types.

/// A float which is neither NaN nor infinite.
///
/// Touch coordinates and brush widths come straight from the platform, and a single
/// NaN would poison every distance computation the rasterizer does with it.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug)]
pub struct FiniteF32(f32);
impl FiniteF32 {
    pub const ONE: Self = Self(1.0);
    pub fn new(val: f32) -> Result<Self, FiniteF32Error> {
        if val.is_finite() {
            Ok(Self(val))
        } else {
            Err(FiniteF32Error::NotFinite)
        }
    }
    #[must_use]
    pub fn get(self) -> f32 {
        self.0
    }
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FiniteF32Error {
    #[error("not finite")]
    NotFinite,
}

// No NaN ever gets in, so equality is reflexive.
impl Eq for FiniteF32 {}
#[allow(clippy::derive_ord_xor_partial_ord)]
impl Ord for FiniteF32 {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Never `None` for finite operands.
        self.0
            .partial_cmp(&other.0)
            .unwrap_or(std::cmp::Ordering::Equal)
    }
}
impl std::hash::Hash for FiniteF32 {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        // -0.0 and 0.0 compare equal, so they must hash equal too.
        let normalized = if self.0 == 0.0 { 0.0f32 } else { self.0 };
        state.write_u32(normalized.to_bits());
    }
}
