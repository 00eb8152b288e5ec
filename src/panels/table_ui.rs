//! Metric table: sortable columns, radio-style row selection and expandable forecast charts.

use std::collections::HashMap;

use egui::{vec2, Align, Color32, Layout, Shape, Ui};
use egui_phosphor::regular as icons;

use crate::config::TimeSeriesConfig;
use crate::data::loader::{DetailLoader, DetailState, PredictionSource};
use crate::data::metric::{format_days_to_full, Horizon, MetricRow};
use crate::data::resolver::ResolverConfig;
use crate::data::selection::SharedSelection;
use crate::data::sorting::{table_order, SortColumn, SortOrder, TableSort};

use super::glyphs_ui::{confidence_stars, saturation_arrow};
use super::timeseries_ui::TimeSeriesView;

const ROW_HEIGHT: f32 = 32.0;
const W_TOGGLE: f32 = 26.0;
const W_DAYS: f32 = 120.0;
const W_SATURATION: f32 = 280.0;
const W_CONFIDENCE: f32 = 120.0;
const W_NAME: f32 = 170.0;

pub struct MetricTable {
    /// `None` keeps listing order.
    pub sort: Option<TableSort>,
    pub horizon: Horizon,
    time_series: TimeSeriesConfig,
    time_series_resolver: ResolverConfig,
    /// One chart view per expanded row, each with its own index and tooltip timer.
    views: HashMap<String, TimeSeriesView>,
}

impl MetricTable {
    pub fn new(horizon: Horizon, time_series: TimeSeriesConfig, resolver: ResolverConfig) -> Self {
        Self {
            sort: Some(TableSort::default()),
            horizon,
            time_series,
            time_series_resolver: resolver,
            views: HashMap::new(),
        }
    }

    /// Forget per-row chart state, e.g. after the listing was reloaded.
    pub fn reset_views(&mut self) {
        self.views.clear();
    }

    pub fn show<S: PredictionSource>(
        &mut self,
        ui: &mut Ui,
        rows: &[MetricRow],
        selection: &SharedSelection,
        loader: &mut DetailLoader<S>,
        hovered_row: Option<usize>,
    ) {
        self.header_ui(ui);
        ui.separator();

        let order = table_order(rows, self.sort, selection.borrow().selected());
        for idx in order {
            let row = &rows[idx];
            let is_selected = selection.borrow().is_selected(&row.uuid);
            let expanded = loader.is_expanded(&row.uuid);

            let bg = ui.painter().add(Shape::Noop);
            let resp = ui.horizontal(|ui| {
                ui.set_min_height(ROW_HEIGHT);
                cell(ui, W_TOGGLE, |ui| {
                    let icon = if expanded { icons::CARET_DOWN } else { icons::CARET_RIGHT };
                    if ui.small_button(icon).on_hover_text("Show forecast").clicked() {
                        loader.toggle(&row.uuid);
                    }
                });
                cell(ui, W_TOGGLE, |ui| {
                    if ui.radio(is_selected, "").clicked() {
                        selection.borrow_mut().select(&row.uuid);
                    }
                });
                cell(ui, W_DAYS, |ui| {
                    ui.label(format_days_to_full(row.days_to_full));
                });
                cell(ui, W_SATURATION, |ui| {
                    let s = row.saturation(self.horizon);
                    saturation_arrow(ui, s.current_saturation, s.forecast, W_SATURATION - 20.0);
                });
                cell(ui, W_CONFIDENCE, |ui| {
                    confidence_stars(ui, row.confidence_level);
                });
                for text in [&row.host_name, &row.service_name, &row.metric_name] {
                    cell(ui, W_NAME, |ui| {
                        ui.add(egui::Label::new(text.as_str()).truncate());
                    });
                }
            });
            let highlight = if is_selected {
                Some(ui.visuals().selection.bg_fill.gamma_multiply(0.5))
            } else if hovered_row == Some(idx) {
                Some(ui.visuals().widgets.hovered.weak_bg_fill)
            } else {
                None
            };
            if let Some(color) = highlight {
                ui.painter()
                    .set(bg, Shape::rect_filled(resp.response.rect, 2.0, color));
            }

            if expanded {
                self.detail_ui(ui, &row.uuid, loader);
            }
            ui.separator();
        }
    }

    fn header_ui(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            ui.add_space(2.0 * W_TOGGLE + 2.0 * ui.spacing().item_spacing.x);
            self.sort_header(ui, W_DAYS, "Days until full", SortColumn::DaysToFull);
            cell(ui, W_SATURATION, |ui| {
                ui.menu_button(
                    format!("Saturation in {} {}", self.horizon, icons::CARET_DOWN),
                    |ui| {
                        for h in Horizon::ALL {
                            ui.selectable_value(&mut self.horizon, h, h.label());
                        }
                    },
                );
            });
            self.sort_header(ui, W_CONFIDENCE, "Confidence", SortColumn::ConfidenceLevel);
            self.sort_header(ui, W_NAME, "Host Name", SortColumn::HostName);
            self.sort_header(ui, W_NAME, "Service", SortColumn::ServiceName);
            self.sort_header(ui, W_NAME, "Metric", SortColumn::MetricName);
        });
    }

    fn sort_header(&mut self, ui: &mut Ui, width: f32, title: &str, column: SortColumn) {
        let indicator = match self.sort {
            Some(s) if s.column == column => match s.order {
                SortOrder::Ascending => icons::CARET_UP,
                SortOrder::Descending => icons::CARET_DOWN,
            },
            _ => "",
        };
        cell(ui, width, |ui| {
            let label = egui::RichText::new(format!("{title} {indicator}")).strong();
            if ui.add(egui::Button::new(label).frame(false)).clicked() {
                self.sort = Some(match self.sort {
                    Some(s) => s.clicked(column),
                    None => TableSort {
                        column,
                        order: SortOrder::Ascending,
                    },
                });
            }
        });
    }

    fn detail_ui<S: PredictionSource>(&mut self, ui: &mut Ui, uuid: &str, loader: &mut DetailLoader<S>) {
        let views = &mut self.views;
        let (ts_config, ts_resolver) = (&self.time_series, self.time_series_resolver);
        ui.indent(("detail", uuid), |ui| match loader.state(uuid).cloned() {
            None | Some(DetailState::Loading) => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("loading...");
                });
            }
            Some(DetailState::Loaded(record)) => {
                let view = views
                    .entry(uuid.to_string())
                    .or_insert_with(|| TimeSeriesView::new(ts_config.clone(), ts_resolver));
                view.show(ui, uuid, &record);
            }
            Some(DetailState::Failed(msg)) => {
                ui.horizontal(|ui| {
                    ui.colored_label(Color32::from_rgb(0xFF, 0x5D, 0x52), format!("Failed to load forecast: {msg}"));
                    if ui.button(format!("{} Retry", icons::ARROWS_CLOCKWISE)).clicked() {
                        loader.retry(uuid);
                    }
                });
            }
        });
    }
}

/// Fixed-width, vertically centred table cell.
fn cell(ui: &mut Ui, width: f32, add_contents: impl FnOnce(&mut Ui)) {
    ui.allocate_ui_with_layout(
        vec2(width, ROW_HEIGHT),
        Layout::left_to_right(Align::Center),
        |ui| {
            ui.set_width(width);
            add_contents(ui);
        },
    );
}
