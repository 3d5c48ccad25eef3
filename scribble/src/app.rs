//! # App
//!
//! The glue between the toolbar, the canvas model, and the collaborators around it. Holds no
//! drawing logic of its own: pointer events go straight to [`Canvas`], button presses become
//! model calls, and storage work is gated, handed to a worker, and reported back as notices.

use crate::{
    actions::{hotkeys::KeyboardHotkey, Action},
    export::ExportWorker,
    global::{hotkeys::Hotkeys, settings::Settings},
    notice::Notice,
    permissions::{Permission, PermissionGate},
    renderer::{self, Background, Surface},
    share::ShareTarget,
};
use scribble_core::{
    brush::ThicknessError,
    palette::{Palette, SwatchIndex},
    BrushSize, Canvas, Color, Density, PointerEvent, Thickness,
};

const READ_RATIONALE: Notice = Notice::Rationale {
    title: "Read external storage access is denied",
    message: "Scribble needs storage access to load pictures",
};
const WRITE_RATIONALE: Notice = Notice::Rationale {
    title: "Write external storage access is denied",
    message: "Scribble needs storage access to save drawings",
};

pub struct App<Gate, Share> {
    canvas: Canvas,
    palette: Palette,
    density: Density,
    width: u32,
    height: u32,
    background: Background,
    export: ExportWorker,
    gate: Gate,
    share: Share,
    notices: Vec<Notice>,
    /// Set whenever the visible drawing may have changed since the last frame.
    invalidated: bool,
}
impl<Gate: PermissionGate, Share: ShareTarget> App<Gate, Share> {
    #[must_use]
    pub fn new(settings: &Settings, gate: Gate, share: Share) -> Self {
        let palette = settings.palette();
        let canvas = Canvas::new(
            palette.selected_color(),
            settings.brush.thickness(settings.density),
            settings.redo_policy,
        );
        Self {
            canvas,
            palette,
            density: settings.density,
            width: settings.width,
            height: settings.height,
            background: Background::default(),
            export: ExportWorker::new(settings.export_dir(), settings.export_prefix.clone()),
            gate,
            share,
            notices: Vec::new(),
            invalidated: true,
        }
    }
    pub fn pointer(&mut self, event: PointerEvent) {
        self.canvas.handle(event);
        self.invalidated = true;
    }
    pub fn perform(&mut self, action: Action) {
        log::debug!("action {}", action.as_ref());
        match action {
            Action::Undo => self.invalidated |= self.canvas.undo(),
            Action::Redo => self.invalidated |= self.canvas.redo(),
            Action::BrushSmall | Action::BrushMedium | Action::BrushLarge => {
                if let Some(size) = action.brush_size() {
                    self.set_brush(size);
                }
            }
            Action::Clear => {
                self.canvas.clear();
                self.invalidated = true;
            }
            Action::Save => self.save(),
        }
    }
    /// Resolve a hotkey and perform its action. Returns false if the key is unbound.
    pub fn hotkey(&mut self, hotkeys: &Hotkeys, key: &KeyboardHotkey) -> bool {
        match hotkeys.action_of(key) {
            Some(action) => {
                self.perform(action);
                true
            }
            None => {
                log::debug!("unbound hotkey {key}");
                false
            }
        }
    }
    pub fn set_brush(&mut self, size: BrushSize) {
        self.canvas.set_thickness(size.thickness(self.density));
    }
    /// Set an arbitrary brush width, in density-independent pixels.
    pub fn set_brush_dp(&mut self, dp: f32) -> Result<(), ThicknessError> {
        self.canvas.set_thickness(Thickness::from_dp(dp, self.density)?);
        Ok(())
    }
    /// Pick a color outside the palette.
    pub fn set_color(&mut self, color: Color) {
        self.canvas.set_color(color);
    }
    /// Pick a palette swatch. Re-selecting the current swatch does nothing.
    pub fn select_swatch(&mut self, index: SwatchIndex) {
        if let Some(color) = self.palette.select(index) {
            self.canvas.set_color(color);
        }
    }
    /// Snapshot the drawing and export it in the background.
    pub fn save(&mut self) {
        if !self.gate.is_granted(Permission::WriteStorage) {
            if self.gate.should_show_rationale(Permission::WriteStorage) {
                self.notices.push(WRITE_RATIONALE);
            } else {
                self.notices.push(Notice::StorageDenied);
            }
            return;
        }
        self.notices.push(Notice::Saving);
        let bitmap = self.frame().into_image();
        let ticket = self.export.request(bitmap);
        log::debug!("export #{ticket} requested");
    }
    /// Load a picture from `path` as the canvas background, asking for storage access first.
    pub fn import_background(&mut self, path: &std::path::Path) {
        let wanted = [Permission::ReadStorage, Permission::WriteStorage];
        if self.gate.should_show_rationale(Permission::ReadStorage) {
            self.notices.push(READ_RATIONALE);
            return;
        }
        if self.gate.should_show_rationale(Permission::WriteStorage) {
            self.notices.push(WRITE_RATIONALE);
            return;
        }
        let answers = self.gate.request(&wanted);
        let read_granted = answers
            .iter()
            .any(|&(permission, granted)| permission == Permission::ReadStorage && granted);
        if !read_granted {
            self.notices.push(Notice::StorageDenied);
            return;
        }
        match Background::open(path) {
            Ok(background) => {
                self.background = background;
                self.invalidated = true;
                self.notices.push(Notice::BackgroundSet);
            }
            Err(e) => {
                log::warn!("failed to open background {}: {e}", path.display());
                self.notices.push(Notice::BackgroundFailed);
            }
        }
    }
    /// Deliver finished exports: notify, and share the ones that succeeded.
    pub fn pump(&mut self) {
        let outcomes = self.export.poll();
        self.deliver(outcomes);
    }
    /// Block until all exports are done, then deliver them.
    pub fn finish(&mut self) {
        let outcomes = self.export.wait_all();
        self.deliver(outcomes);
    }
    fn deliver(&mut self, outcomes: Vec<crate::export::ExportOutcome>) {
        for outcome in outcomes {
            match outcome.result {
                Ok(path) => {
                    self.share.share(&path, "image/png");
                    self.notices.push(Notice::Saved(path));
                }
                Err(e) => {
                    log::error!("export #{} failed: {e}", outcome.ticket);
                    self.notices.push(Notice::SaveFailed);
                }
            }
        }
    }
    /// Take all notices queued since the last call.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
    /// Returns whether a redraw is needed, clearing the flag.
    pub fn take_invalidated(&mut self) -> bool {
        std::mem::take(&mut self.invalidated)
    }
    /// Render the current drawing, background included.
    #[must_use]
    pub fn frame(&self) -> Surface {
        renderer::snapshot(&self.canvas, &self.background, self.width, self.height)
    }
    #[must_use]
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }
    #[must_use]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }
    #[must_use]
    pub fn share_target(&self) -> &Share {
        &self.share
    }
    #[must_use]
    pub fn exports_in_flight(&self) -> usize {
        self.export.in_flight()
    }
}
