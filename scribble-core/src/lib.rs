#![warn(clippy::pedantic)]

pub mod brush;
pub mod canvas;
pub mod color;
pub mod input;
pub mod palette;
pub mod stroke;
pub mod util;

pub use brush::{BrushSize, Density, Thickness};
pub use canvas::{Canvas, RedoPolicy};
pub use color::Color;
pub use input::PointerEvent;
pub use stroke::{Point, Stroke};
