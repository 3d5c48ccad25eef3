//! Pointer events, as delivered by whatever touch or mouse source drives the canvas.

use crate::stroke::Point;

/// One phase of a single-pointer gesture.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum PointerEvent {
    /// Contact started at this position.
    Down(Point),
    /// Contact moved to this position.
    Move(Point),
    /// Contact ended.
    Up,
}
impl PointerEvent {
    /// Position carried by the event, if any.
    #[must_use]
    pub fn position(&self) -> Option<Point> {
        match self {
            Self::Down(p) | Self::Move(p) => Some(*p),
            Self::Up => None,
        }
    }
}
