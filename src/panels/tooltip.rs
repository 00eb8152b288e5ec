//! Small helpers shared by the chart views: pointer enter/leave tracking and tooltip popups.

use std::time::Duration;

use egui::{Context, Id, Pos2, Ui};

use crate::data::resolver::PointerResolver;

/// Turns egui's per-frame hover position into enter/leave transitions.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerTracker {
    inside: bool,
    left: bool,
}

impl PointerTracker {
    /// Feed this frame's hover position (`None` when the pointer is outside the view).
    pub fn update(&mut self, hover: Option<Pos2>) -> Option<Pos2> {
        self.left = self.inside && hover.is_none();
        self.inside = hover.is_some();
        hover
    }

    /// The pointer was inside on the previous frame and is outside now.
    pub fn just_left(&self) -> bool {
        self.left
    }
}

/// Ask for a repaint when the resolver's pending tooltip clear comes due.
pub fn schedule_tooltip_clear(ctx: &Context, resolver: &PointerResolver, now: f64) {
    if let Some(deadline) = resolver.pending_clear() {
        ctx.request_repaint_after(Duration::from_secs_f64((deadline - now).max(0.0)));
    }
}

/// Non-interactive popup anchored at `pos` (screen coordinates).
pub fn tooltip_area(ctx: &Context, id: Id, pos: Pos2, add_contents: impl FnOnce(&mut Ui)) {
    egui::Area::new(id)
        .fixed_pos(pos)
        .order(egui::Order::Tooltip)
        .interactable(false)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, add_contents);
        });
}
