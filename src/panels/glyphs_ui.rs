//! Painters for the table glyphs: confidence stars and saturation arrows.

use egui::{pos2, vec2, Align2, Color32, FontId, Rect, Sense, Shape, Stroke, Ui};

use crate::data::glyphs::{filled_stars, star_polygon, ArrowLayout};

const STAR_COLOR: Color32 = Color32::from_rgb(0xE0, 0x30, 0x30);
const BAR_COLOR: Color32 = Color32::from_gray(150);
const ARROW_COLOR: Color32 = Color32::from_rgb(0x29, 0x80, 0xD0);

/// Three stars, filled according to `confidence_level` (0–2).
pub fn confidence_stars(ui: &mut Ui, confidence_level: f64) -> egui::Response {
    let size = 18.0;
    let (rect, resp) = ui.allocate_exact_size(vec2(size * 3.0, size), Sense::hover());
    if !ui.is_rect_visible(rect) {
        return resp;
    }
    let painter = ui.painter_at(rect);
    for (i, filled) in filled_stars(confidence_level).into_iter().enumerate() {
        let center = pos2(rect.left() + size * (i as f32 + 0.5), rect.center().y);
        let pts = star_polygon(center, size * 0.45, size * 0.18);
        if filled {
            // Non-convex: fill the inner pentagon and each tip separately.
            let inner: Vec<_> = pts.iter().skip(1).step_by(2).copied().collect();
            painter.add(Shape::convex_polygon(inner, STAR_COLOR, Stroke::NONE));
            for tip in (0..10).step_by(2) {
                let tri = vec![pts[(tip + 9) % 10], pts[tip], pts[tip + 1]];
                painter.add(Shape::convex_polygon(tri, STAR_COLOR, Stroke::NONE));
            }
        } else {
            painter.add(Shape::closed_line(pts, Stroke::new(1.2, STAR_COLOR)));
        }
    }
    let level = if confidence_level.is_finite() {
        format!("Confidence level {confidence_level:.0} of 2")
    } else {
        "Confidence level unknown".to_string()
    };
    resp.on_hover_text(level)
}

/// Horizontal bar filled to the current saturation with an arrow toward the forecast.
pub fn saturation_arrow(ui: &mut Ui, current: f64, forecast: f64, width: f32) -> egui::Response {
    let height = 28.0;
    let (rect, resp) = ui.allocate_exact_size(vec2(width, height), Sense::hover());
    if !ui.is_rect_visible(rect) {
        return resp;
    }
    let Some(layout) = ArrowLayout::new(current, forecast, width) else {
        ui.painter_at(rect).text(
            rect.left_center(),
            Align2::LEFT_CENTER,
            "no forecast",
            FontId::proportional(11.0),
            ui.visuals().weak_text_color(),
        );
        return resp;
    };
    let painter = ui.painter_at(rect);
    let text_color = ui.visuals().strong_text_color();

    painter.rect_stroke(rect, 0.0, Stroke::new(1.0, BAR_COLOR), egui::StrokeKind::Inside);
    let filled = Rect::from_min_size(rect.min, vec2(layout.current_x, height));
    painter.rect_filled(filled, 0.0, BAR_COLOR);

    let mid_y = rect.center().y;
    let from = pos2(rect.left() + layout.current_x, mid_y);
    let to = pos2(rect.left() + layout.forecast_x, mid_y);
    if layout.steady {
        // Too short for an arrow: a downward tick at the forecast position.
        let tri = vec![
            pos2(to.x - 5.0, rect.top()),
            pos2(to.x + 5.0, rect.top()),
            pos2(to.x, rect.top() + 5.0),
        ];
        painter.add(Shape::convex_polygon(tri, ARROW_COLOR, Stroke::NONE));
    } else {
        painter.arrow(from, to - from, Stroke::new(2.0, ARROW_COLOR));
    }

    painter.text(
        pos2(rect.left() + 2.0, mid_y),
        Align2::LEFT_CENTER,
        &layout.current_label,
        FontId::proportional(13.0),
        text_color,
    );
    let (anchor, dx) = if layout.rising {
        (Align2::RIGHT_CENTER, -4.0)
    } else {
        (Align2::LEFT_CENTER, 4.0)
    };
    painter.text(
        pos2(to.x + dx, mid_y - 8.0),
        anchor,
        &layout.forecast_label,
        FontId::proportional(11.0),
        ARROW_COLOR,
    );
    resp.on_hover_text(format!(
        "current {}  →  forecast {}",
        layout.current_label, layout.forecast_label
    ))
}
