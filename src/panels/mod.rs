pub mod glyphs_ui;
pub mod scatterplot_ui;
pub mod table_ui;
pub mod timeseries_ui;
pub mod tooltip;

pub use scatterplot_ui::ScatterplotPanel;
pub use table_ui::MetricTable;
pub use timeseries_ui::TimeSeriesView;
