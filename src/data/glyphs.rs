//! Geometry and colours for the small table glyphs and scatterplot markers.

use egui::{pos2, Color32, Pos2};

use super::scale::LinearScale;

pub const NORMAL_COLOR: Color32 = Color32::from_rgb(0x57, 0xA7, 0x73);
pub const WARNING_COLOR: Color32 = Color32::from_rgb(0xEC, 0xC3, 0x0B);
pub const CRITICAL_COLOR: Color32 = Color32::from_rgb(0xFF, 0x5D, 0x52);

/// Urgency colour for a scatter point by negated days-to-full.
///
/// Thresholds at -50 and -10 days split it into normal, warning and critical.
///
/// ```
/// # use capdash::data::glyphs::*;
/// assert_eq!(urgency_color(-120.0), NORMAL_COLOR);
/// assert_eq!(urgency_color(-50.0), WARNING_COLOR);
/// assert_eq!(urgency_color(-3.0), CRITICAL_COLOR);
/// ```
pub fn urgency_color(neg_days_to_full: f64) -> Color32 {
    if neg_days_to_full < -50.0 {
        NORMAL_COLOR
    } else if neg_days_to_full < -10.0 {
        WARNING_COLOR
    } else {
        CRITICAL_COLOR
    }
}

/// Which of the three confidence stars are filled. The first one always is.
pub fn filled_stars(confidence_level: f64) -> [bool; 3] {
    [true, confidence_level > 0.0, confidence_level > 1.0]
}

/// Vertices of a five-pointed star, starting at the top point, clockwise.
pub fn star_polygon(center: Pos2, outer: f32, inner: f32) -> Vec<Pos2> {
    (0..10)
        .map(|i| {
            let r = if i % 2 == 0 { outer } else { inner };
            let angle = -std::f32::consts::FRAC_PI_2 + i as f32 * std::f32::consts::PI / 5.0;
            pos2(center.x + r * angle.cos(), center.y + r * angle.sin())
        })
        .collect()
}

/// Differences below this are drawn as "steady" with a tick marker instead of a visible arrow.
pub const STEADY_THRESHOLD: f64 = 0.02;

/// Layout of a saturation arrow glyph inside a bar of `width` pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrowLayout {
    /// Width of the filled "current saturation" bar.
    pub current_x: f32,
    /// Position of the arrow head (forecast).
    pub forecast_x: f32,
    /// Forecast is within [`STEADY_THRESHOLD`] of the current value.
    pub steady: bool,
    /// Forecast is above the current value.
    pub rising: bool,
    pub current_label: String,
    pub forecast_label: String,
}

impl ArrowLayout {
    /// `None` if either value is missing.
    pub fn new(current: f64, forecast: f64, width: f32) -> Option<Self> {
        if !(current.is_finite() && forecast.is_finite()) {
            return None;
        }
        let x = LinearScale::new((0.0, 1.0), (0.0, width as f64))
            .with_clamp(true)
            .with_round(true);
        Some(Self {
            current_x: x.map(current) as f32,
            forecast_x: x.map(forecast) as f32,
            steady: (forecast - current).abs() < STEADY_THRESHOLD,
            rising: forecast > current,
            current_label: format!("{:.0}%", (100.0 * current).round()),
            forecast_label: format!("{:.0}%", (100.0 * forecast).round()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stars_follow_level() {
        assert_eq!(filled_stars(0.0), [true, false, false]);
        assert_eq!(filled_stars(1.0), [true, true, false]);
        assert_eq!(filled_stars(2.0), [true, true, true]);
        assert_eq!(filled_stars(f64::NAN), [true, false, false]);
    }

    #[test]
    fn star_has_ten_vertices_top_first() {
        let pts = star_polygon(pos2(10.0, 10.0), 8.0, 3.0);
        assert_eq!(pts.len(), 10);
        assert!((pts[0].x - 10.0).abs() < 1e-4);
        assert!((pts[0].y - 2.0).abs() < 1e-4);
    }

    #[test]
    fn arrow_layout_scales_and_clamps() {
        let a = ArrowLayout::new(0.25, 1.4, 200.0).unwrap();
        assert_eq!(a.current_x, 50.0);
        assert_eq!(a.forecast_x, 200.0);
        assert!(a.rising);
        assert!(!a.steady);
        assert_eq!(a.forecast_label, "140%");
        assert!(ArrowLayout::new(f64::NAN, 0.5, 200.0).is_none());
    }

    #[test]
    fn arrow_layout_owns_its_labels() {
        let a = ArrowLayout::new(0.46, 0.47, 100.0).unwrap();
        let b = a.clone();
        assert_eq!(a, b);
        assert!(b.steady);
        assert_eq!(b.current_label, "46%");
        assert_eq!(b.forecast_label, "47%");
    }
}
