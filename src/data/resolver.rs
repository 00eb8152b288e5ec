//! Pointer event resolution: hover tooltips and click selection on top of a [`SpatialIndex`].
//!
//! Each view owns one [`PointerResolver`]. Hovering shows a tooltip for the
//! nearest point within the hover radius. Leaving the view does not hide the
//! tooltip immediately; a clear is scheduled after a short delay and any
//! pointer movement in the meantime cancels it, so crossing a small gap between
//! two elements does not make the tooltip flicker.
//!
//! Times are plain `f64` seconds on a monotonic clock (egui's `InputState::time`).

use serde::{Deserialize, Serialize};

use super::spatial::{ProjectedIndex, SpatialIndex};

/// Tuning for a [`PointerResolver`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Search cutoff in pixels for hover tooltips.
    pub hover_radius: f64,
    /// Search cutoff in pixels for click selection. `None` disables click selection.
    pub click_radius: Option<f64>,
    /// Seconds between pointer-leave and the tooltip being hidden.
    pub leave_delay_secs: f64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            hover_radius: 100.0,
            click_radius: Some(50.0),
            leave_delay_secs: 0.3,
        }
    }
}

/// Per-view hover/click state.
#[derive(Debug, Clone, Default)]
pub struct PointerResolver {
    pub config: ResolverConfig,
    tooltip: Option<usize>,
    clear_at: Option<f64>,
}

impl PointerResolver {
    pub fn new(config: ResolverConfig) -> Self {
        Self {
            config,
            tooltip: None,
            clear_at: None,
        }
    }

    /// Record currently shown in the tooltip.
    pub fn tooltip(&self) -> Option<usize> {
        self.tooltip
    }

    /// Deadline of the scheduled tooltip clear, if any.
    pub fn pending_clear(&self) -> Option<f64> {
        self.clear_at
    }

    /// Pointer moved to `(x, y)` relative to the view origin.
    ///
    /// Cancels a pending clear. A hit replaces the tooltip; a miss leaves the
    /// current tooltip in place. Returns the resulting tooltip target.
    pub fn pointer_move(&mut self, x: f64, y: f64, index: &SpatialIndex) -> Option<usize> {
        self.clear_at = None;
        if let Some(hit) = index.nearest_within(x, y, self.config.hover_radius) {
            self.tooltip = Some(hit);
        }
        self.tooltip
    }

    /// Pointer left the view at time `now`; schedule the tooltip to clear.
    pub fn pointer_leave(&mut self, now: f64) {
        if self.tooltip.is_none() {
            return;
        }
        let deadline = now + self.config.leave_delay_secs;
        self.clear_at = Some(self.clear_at.map_or(deadline, |d| d.min(deadline)));
    }

    /// Apply a due clear. Returns `true` if the tooltip was hidden by this call.
    pub fn tick(&mut self, now: f64) -> bool {
        match self.clear_at {
            Some(deadline) if now >= deadline => {
                self.clear_at = None;
                self.tooltip.take().is_some()
            }
            _ => false,
        }
    }

    /// Click at `(x, y)`: the record to commit as the persistent selection, if any.
    ///
    /// Does not touch the tooltip other than cancelling a pending clear.
    pub fn click(&mut self, x: f64, y: f64, index: &SpatialIndex) -> Option<usize> {
        self.clear_at = None;
        let radius = self.config.click_radius?;
        index.nearest_within(x, y, radius)
    }

    /// Bring `projected` up to date with `fingerprint`.
    ///
    /// A rebuild invalidates every record position, so it also drops the tooltip
    /// and any pending clear. Returns `true` if the index was rebuilt.
    pub fn refresh_index<F: PartialEq>(
        &mut self,
        projected: &mut ProjectedIndex<F>,
        fingerprint: F,
        build: impl FnOnce() -> SpatialIndex,
    ) -> bool {
        let rebuilt = projected.ensure(fingerprint, build);
        if rebuilt {
            self.clear();
        }
        rebuilt
    }

    /// Drop tooltip and pending timer, e.g. after the index was rebuilt over new data.
    pub fn clear(&mut self) {
        self.tooltip = None;
        self.clear_at = None;
    }
}
