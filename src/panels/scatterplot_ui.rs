//! Urgency scatterplot: days-to-full (negated, so urgent points sit right) vs. current saturation.
//!
//! Hovering shows a tooltip for the nearest point within the hover radius;
//! clicking selects the nearest point within the (narrower) click radius,
//! which the metric table then pins to its first row.

use egui::{Color32, Id, Pos2, Ui};
use egui_plot::{Plot, Points};

use crate::config::ScatterplotConfig;
use crate::data::glyphs::urgency_color;
use crate::data::metric::{format_days_to_full, format_percent, scatter_records, MetricRow, ScatterRecord};
use crate::data::resolver::{PointerResolver, ResolverConfig};
use crate::data::scale::LinearScale;
use crate::data::selection::SharedSelection;
use crate::data::spatial::{ProjectedIndex, SpatialIndex};

use super::tooltip::{schedule_tooltip_clear, tooltip_area, PointerTracker};

/// Inputs that determine the projection. The index is rebuilt whenever they change.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Projection {
    x: LinearScale,
    y: LinearScale,
    generation: u64,
}

pub struct ScatterplotPanel {
    pub config: ScatterplotConfig,
    resolver: PointerResolver,
    tracker: PointerTracker,
    records: Vec<ScatterRecord>,
    index: ProjectedIndex<Projection>,
}

impl ScatterplotPanel {
    pub fn new(config: ScatterplotConfig, resolver: ResolverConfig) -> Self {
        Self {
            config,
            resolver: PointerResolver::new(resolver),
            tracker: PointerTracker::default(),
            records: Vec::new(),
            index: ProjectedIndex::default(),
        }
    }

    /// Row index currently under the tooltip.
    pub fn hovered_row(&self) -> Option<usize> {
        self.resolver
            .tooltip()
            .and_then(|i| self.records.get(i))
            .map(|r| r.row)
    }

    /// Render the plot for `rows`. `generation` must change whenever `rows` is replaced.
    pub fn show(&mut self, ui: &mut Ui, rows: &[MetricRow], generation: u64, selection: &SharedSelection) {
        if self.index.fingerprint().map(|p| p.generation) != Some(generation) {
            self.records = scatter_records(rows);
            self.resolver.clear();
        }
        let m = self.config.margin;
        ui.add_space(m.top);

        let (x_dom, y_dom) = domains(&self.records);

        let selected_row = selection
            .borrow()
            .selected()
            .and_then(|key| rows.iter().position(|r| r.uuid == key));
        let hovered = self.resolver.tooltip();

        let resp = ui
            .horizontal(|ui| {
                ui.add_space(m.left);
                let width = (ui.available_width() - m.right).max(10.0);
                Plot::new("urgency_scatter")
                    .width(width)
                    .height(self.config.height)
                    .allow_drag(false)
                    .allow_zoom(false)
                    .allow_scroll(false)
                    .allow_boxed_zoom(false)
                    .allow_double_click_reset(false)
                    .show_x(false)
                    .show_y(false)
                    .x_axis_label("Days to full capacity")
                    .y_axis_label("Saturation")
                    .x_axis_formatter(|mark, _range| format!("{:.0}d", mark.value))
                    .y_axis_formatter(|mark, _range| format_percent(mark.value, 2))
                    .show(ui, |plot_ui| {
                        plot_ui.set_plot_bounds_x(x_dom.0..=x_dom.1);
                        plot_ui.set_plot_bounds_y(y_dom.0..=y_dom.1);
                        for (i, rec) in self.records.iter().enumerate() {
                            let is_selected = selected_row == Some(rec.row);
                            let pt = vec![[rec.neg_days_to_full, rec.current_saturation]];
                            let radius = if is_selected {
                                self.config.selected_point_radius
                            } else {
                                self.config.point_radius
                            };
                            plot_ui.points(
                                Points::new("", pt.clone())
                                    .radius(radius + 1.0)
                                    .color(Color32::WHITE),
                            );
                            let fill = if hovered == Some(i) {
                                Color32::WHITE
                            } else {
                                urgency_color(rec.neg_days_to_full)
                            };
                            plot_ui.points(Points::new("", pt).radius(radius).color(fill));
                        }
                    })
            })
            .inner;
        ui.add_space(m.bottom);

        // Pixel-space scales matching what the plot just drew.
        let frame = *resp.transform.frame();
        let projection = Projection {
            x: LinearScale::new(x_dom, (0.0, frame.width() as f64))
                .with_clamp(true)
                .with_round(true),
            y: LinearScale::new(y_dom, (frame.height() as f64, 0.0)).with_clamp(true),
            generation,
        };
        let records = &self.records;
        self.resolver.refresh_index(&mut self.index, projection, || {
            SpatialIndex::build(
                records,
                |r| projection.x.map(r.neg_days_to_full),
                |r| projection.y.map(r.current_saturation),
            )
        });

        let now = ui.input(|i| i.time);
        let local = |p: Pos2| ((p.x - frame.min.x) as f64, (p.y - frame.min.y) as f64);
        match self.tracker.update(resp.response.hover_pos()) {
            Some(pos) => {
                let (x, y) = local(pos);
                self.resolver.pointer_move(x, y, self.index.index());
            }
            None if self.tracker.just_left() => self.resolver.pointer_leave(now),
            None => {}
        }
        if resp.response.clicked() {
            if let Some(pos) = resp.response.interact_pointer_pos() {
                let (x, y) = local(pos);
                if let Some(i) = self.resolver.click(x, y, self.index.index()) {
                    let uuid = &rows[self.records[i].row].uuid;
                    selection.borrow_mut().select(uuid);
                }
            }
        }
        self.resolver.tick(now);
        schedule_tooltip_clear(ui.ctx(), &self.resolver, now);

        if let Some(i) = self.resolver.tooltip() {
            let rec = self.records[i];
            let row = &rows[rec.row];
            if let Some((px, py)) = self.index.index().position_of(i) {
                let anchor = frame.min + egui::vec2(px as f32 + 5.0, py as f32 + 5.0);
                tooltip_area(ui.ctx(), Id::new("scatter_tooltip"), anchor, |ui| {
                    egui::Grid::new("scatter_tooltip_grid").show(ui, |ui| {
                        ui.strong("Host Name");
                        ui.label(row.host_name.as_str());
                        ui.end_row();
                        ui.strong("Service");
                        ui.label(row.service_name.as_str());
                        ui.end_row();
                        ui.strong("Saturation");
                        ui.label(format_percent(rec.current_saturation, 2));
                        ui.end_row();
                        ui.strong("Days to full capacity");
                        ui.label(format!("{}d", format_days_to_full(row.days_to_full)));
                        ui.end_row();
                    });
                });
            }
        }
    }
}

/// Niced data-space extents of the scatter records.
///
/// An empty or single-valued side is widened by `pad` so the plot never gets a zero-width axis.
fn domains(records: &[ScatterRecord]) -> ((f64, f64), (f64, f64)) {
    let extent = |f: &dyn Fn(&ScatterRecord) -> f64, pad: f64| {
        let lo = records.iter().map(f).fold(f64::INFINITY, f64::min);
        let hi = records.iter().map(f).fold(f64::NEG_INFINITY, f64::max);
        let (lo, hi) = if lo.is_finite() { (lo, hi) } else { (0.0, 0.0) };
        if lo == hi {
            (lo - pad, hi + pad)
        } else {
            (lo, hi)
        }
    };
    let x = LinearScale::new(extent(&|r| r.neg_days_to_full, 1.0), (0.0, 1.0)).nice(10);
    let y = LinearScale::new(extent(&|r| r.current_saturation, 0.05), (0.0, 1.0)).nice(10);
    (x.domain, y.domain)
}
