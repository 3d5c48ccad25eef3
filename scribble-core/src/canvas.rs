//! # Canvas
//!
//! The stroke canvas model: committed strokes, the stroke currently under the finger, and
//! the stack of undone strokes that redo draws from.
//!
//! Every operation is total. Undo with nothing to undo, redo with nothing to redo, or moves
//! without a preceding pointer-down are silently ignored, since they arise naturally from
//! racing UI buttons and touch streams.

use crate::{
    brush::Thickness,
    color::Color,
    input::PointerEvent,
    stroke::{Point, Stroke},
};

/// What committing a new stroke does to strokes waiting to be redone.
#[derive(
    Copy, Clone, PartialEq, Eq, Debug, Default, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum RedoPolicy {
    /// Drawing something new forgets the undone strokes.
    #[default]
    ClearOnCommit,
    /// Undone strokes stay redoable, and land on top of newer strokes when redone.
    Preserve,
}

#[derive(Clone, Debug)]
pub struct Canvas {
    /// Paint order. The last element is the most recently committed.
    committed: Vec<Stroke>,
    /// Strokes removed by undo, most recently undone last.
    undone: Vec<Stroke>,
    /// Always present so rendering has a uniform shape, even while idle.
    in_progress: Stroke,
    /// Idle or tracking a pointer.
    tracking: bool,
    color: Color,
    thickness: Thickness,
    redo_policy: RedoPolicy,
}
impl Default for Canvas {
    fn default() -> Self {
        Self::new(Color::RED, Thickness::HAIRLINE, RedoPolicy::default())
    }
}
impl Canvas {
    #[must_use]
    pub fn new(color: Color, thickness: Thickness, redo_policy: RedoPolicy) -> Self {
        Self {
            committed: Vec::new(),
            undone: Vec::new(),
            in_progress: Stroke::new(color, thickness),
            tracking: false,
            color,
            thickness,
            redo_policy,
        }
    }
    /// Start a new stroke at `point` with the current color and thickness.
    ///
    /// If a stroke was already being tracked (a lost pointer-up), its points are discarded.
    pub fn begin_stroke(&mut self, point: Point) {
        if self.tracking {
            log::debug!(
                "pointer down while tracking, dropping {} unfinished points",
                self.in_progress.len()
            );
        }
        self.in_progress = Stroke::new(self.color, self.thickness);
        self.in_progress.push(point);
        self.tracking = true;
    }
    /// Append a point to the in-progress stroke. Ignored while idle.
    pub fn extend_stroke(&mut self, point: Point) {
        if self.tracking {
            self.in_progress.push(point);
        }
    }
    /// Freeze the in-progress stroke into the committed sequence. Ignored while idle.
    pub fn commit_stroke(&mut self) {
        if !self.tracking {
            log::trace!("pointer up while idle, nothing to commit");
            return;
        }
        let fresh = Stroke::new(self.color, self.thickness);
        let finished = std::mem::replace(&mut self.in_progress, fresh);
        self.committed.push(finished);
        self.tracking = false;

        if self.redo_policy == RedoPolicy::ClearOnCommit && !self.undone.is_empty() {
            log::trace!("new stroke invalidates {} redo entries", self.undone.len());
            self.undone.clear();
        }
    }
    /// Dispatch a pointer event to begin, extend, or commit.
    pub fn handle(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down(point) => self.begin_stroke(point),
            PointerEvent::Move(point) => self.extend_stroke(point),
            PointerEvent::Up => self.commit_stroke(),
        }
    }
    /// Move the most recent stroke onto the redo stack. Returns whether anything changed.
    pub fn undo(&mut self) -> bool {
        match self.committed.pop() {
            Some(stroke) => {
                self.undone.push(stroke);
                true
            }
            None => false,
        }
    }
    /// Restore the most recently undone stroke. Returns whether anything changed.
    pub fn redo(&mut self) -> bool {
        match self.undone.pop() {
            Some(stroke) => {
                self.committed.push(stroke);
                true
            }
            None => false,
        }
    }
    /// Color for strokes begun from now on.
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
        if !self.tracking {
            // The idle placeholder mirrors the current settings.
            self.in_progress = Stroke::new(self.color, self.thickness);
        }
    }
    /// Thickness for strokes begun from now on.
    pub fn set_thickness(&mut self, thickness: Thickness) {
        self.thickness = thickness;
        if !self.tracking {
            self.in_progress = Stroke::new(self.color, self.thickness);
        }
    }
    pub fn set_redo_policy(&mut self, policy: RedoPolicy) {
        self.redo_policy = policy;
    }
    /// Drop every stroke, including redo history and any unfinished stroke.
    pub fn clear(&mut self) {
        self.committed.clear();
        self.undone.clear();
        self.in_progress = Stroke::new(self.color, self.thickness);
        self.tracking = false;
    }
    /// Strokes in paint order: everything committed, then the in-progress stroke.
    ///
    /// The in-progress stroke is always yielded, even when it has no points.
    pub fn render_sequence(&self) -> impl Iterator<Item = &Stroke> + Clone + '_ {
        self.committed
            .iter()
            .chain(std::iter::once(&self.in_progress))
    }
    /// Number of strokes [`Canvas::render_sequence`] yields.
    #[must_use]
    pub fn render_len(&self) -> usize {
        self.committed.len() + 1
    }
    #[must_use]
    pub fn committed(&self) -> &[Stroke] {
        &self.committed
    }
    /// Undone strokes, most recently undone last.
    #[must_use]
    pub fn redo_stack(&self) -> &[Stroke] {
        &self.undone
    }
    #[must_use]
    pub fn in_progress(&self) -> &Stroke {
        &self.in_progress
    }
    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.tracking
    }
    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.committed.is_empty()
    }
    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.undone.is_empty()
    }
    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }
    #[must_use]
    pub fn thickness(&self) -> Thickness {
        self.thickness
    }
    #[must_use]
    pub fn redo_policy(&self) -> RedoPolicy {
        self.redo_policy
    }
}
