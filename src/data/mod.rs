//! UI-independent state and logic behind the dashboard views.

pub mod glyphs;
pub mod loader;
pub mod metric;
pub mod prediction;
pub mod resolver;
pub mod scale;
pub mod selection;
pub mod sorting;
pub mod spatial;
