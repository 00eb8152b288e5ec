//! Forecast chart for one expanded table row.
//!
//! History and forecast are drawn as two lines. The hover tooltip snaps to the
//! nearest sample along the time axis only; every sample is indexed at `y = 0`,
//! so the vertical pointer position is irrelevant.

use chrono::DateTime;
use egui::{Color32, Id, Pos2, Ui};
use egui_plot::{HLine, Legend, Line, LineStyle, Plot, Points, VLine};

use crate::config::TimeSeriesConfig;
use crate::data::metric::format_percent;
use crate::data::prediction::TimeSeriesRecord;
use crate::data::resolver::{PointerResolver, ResolverConfig};
use crate::data::scale::{LinearScale, TimeScale};
use crate::data::spatial::{ProjectedIndex, SpatialIndex};

use super::tooltip::{schedule_tooltip_clear, tooltip_area, PointerTracker};

const METRIC_COLOR: Color32 = Color32::from_rgb(30, 144, 255);
const FORECAST_COLOR: Color32 = Color32::from_rgb(0, 128, 0);
const CROSSHAIR_COLOR: Color32 = Color32::from_rgba_premultiplied(53, 71, 125, 90);

#[derive(Debug, Clone, Copy, PartialEq)]
struct Projection {
    x: TimeScale,
    y: LinearScale,
    len: usize,
}

/// Format UNIX seconds as e.g. `Mar 04, 2024`.
pub fn format_date(t_secs: f64) -> String {
    DateTime::from_timestamp(t_secs.floor() as i64, 0)
        .map(|dt| dt.format("%b %d, %Y").to_string())
        .unwrap_or_default()
}

pub struct TimeSeriesView {
    pub config: TimeSeriesConfig,
    resolver: PointerResolver,
    tracker: PointerTracker,
    index: ProjectedIndex<Projection>,
}

impl TimeSeriesView {
    pub fn new(config: TimeSeriesConfig, resolver: ResolverConfig) -> Self {
        Self {
            config,
            resolver: PointerResolver::new(resolver),
            tracker: PointerTracker::default(),
            index: ProjectedIndex::default(),
        }
    }

    pub fn show(&mut self, ui: &mut Ui, id_salt: &str, record: &TimeSeriesRecord) {
        let Some(x_dom) = record.date_extent() else {
            ui.weak("No data points for this metric.");
            return;
        };
        let (lo, hi) = record.value_extent();
        let y_dom = LinearScale::new(if lo == hi { (lo - 0.05, hi + 0.05) } else { (lo, hi) }, (0.0, 1.0))
            .nice(10)
            .domain;
        let x_dom = if x_dom.0 == x_dom.1 {
            (x_dom.0 - 86_400.0, x_dom.1 + 86_400.0)
        } else {
            x_dom
        };

        let points: Vec<[f64; 2]> = record.all_points().copied().collect();
        let tooltip_point = self.resolver.tooltip().and_then(|i| points.get(i).copied());

        let m = self.config.margin;
        ui.add_space(m.top);
        let resp = ui
            .horizontal(|ui| {
                ui.add_space(m.left);
                let width = (ui.available_width() - m.right).max(10.0);
                Plot::new(("forecast_plot", id_salt))
                    .width(width)
                    .height(self.config.height)
                    .legend(Legend::default())
                    .allow_drag(false)
                    .allow_zoom(false)
                    .allow_scroll(false)
                    .allow_boxed_zoom(false)
                    .allow_double_click_reset(false)
                    .show_x(false)
                    .show_y(false)
                    .show_axes([!self.config.compact, true])
                    .x_axis_formatter(|mark, _range| {
                        DateTime::from_timestamp(mark.value as i64, 0)
                            .map(|dt| dt.format("%b %d").to_string())
                            .unwrap_or_default()
                    })
                    .y_axis_formatter(|mark, _range| format_percent(mark.value, 0))
                    .show(ui, |plot_ui| {
                        plot_ui.set_plot_bounds_x(x_dom.0..=x_dom.1);
                        plot_ui.set_plot_bounds_y(y_dom.0..=y_dom.1);
                        plot_ui.line(Line::new("metric", record.history.clone()).color(METRIC_COLOR));
                        plot_ui.line(
                            Line::new("forecast", record.forecast.clone()).color(FORECAST_COLOR),
                        );
                        if let Some([t, v]) = tooltip_point {
                            let dashed = LineStyle::Dashed { length: 4.0 };
                            plot_ui.vline(VLine::new("", t).color(CROSSHAIR_COLOR).style(dashed));
                            plot_ui.hline(HLine::new("", v).color(CROSSHAIR_COLOR).style(dashed));
                            plot_ui.points(
                                Points::new("", vec![[t, v]])
                                    .radius(4.0)
                                    .color(CROSSHAIR_COLOR),
                            );
                        }
                    })
            })
            .inner;
        ui.add_space(m.bottom);

        let frame = *resp.transform.frame();
        let projection = Projection {
            x: TimeScale::new(x_dom, (0.0, frame.width() as f64)),
            y: LinearScale::new(y_dom, (frame.height() as f64, 0.0)),
            len: points.len(),
        };
        self.resolver.refresh_index(&mut self.index, projection, || {
            SpatialIndex::build(&points, |p| projection.x.map(p[0]), |_| 0.0)
        });

        let now = ui.input(|i| i.time);
        match self.tracker.update(resp.response.hover_pos()) {
            Some(pos) => {
                self.resolver
                    .pointer_move((pos.x - frame.min.x) as f64, 0.0, self.index.index());
            }
            None if self.tracker.just_left() => self.resolver.pointer_leave(now),
            None => {}
        }
        self.resolver.tick(now);
        schedule_tooltip_clear(ui.ctx(), &self.resolver, now);

        if let Some([t, v]) = self.resolver.tooltip().and_then(|i| points.get(i).copied()) {
            let px = projection.x.map(t) as f32;
            let py = projection.y.map(v) as f32;
            let value_anchor = frame.min + egui::vec2(px + 8.0, py - 28.0);
            tooltip_area(ui.ctx(), Id::new(("forecast_value_tip", id_salt)), value_anchor, |ui| {
                ui.strong(format_percent(v, 2));
            });
            let date_anchor = Pos2::new(frame.min.x + px - 36.0, frame.max.y + 4.0);
            tooltip_area(ui.ctx(), Id::new(("forecast_date_tip", id_salt)), date_anchor, |ui| {
                ui.label(format_date(t));
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::format_date;

    #[test]
    fn date_label() {
        assert_eq!(format_date(0.0), "Jan 01, 1970");
        assert_eq!(format_date(86_400.0 * 31.0), "Feb 01, 1970");
    }
}
