use eframe::egui::{Color32, Painter, Pos2, Rect, Stroke};

use crate::scene::RenderColor;

pub(super) fn to_color32(color: RenderColor) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.alpha_byte())
}

/// Fades distant primitives toward the background.
pub(super) fn depth_fade(color: Color32, depth: f32, far: f32) -> Color32 {
    let t = (depth / far.max(1.0)).clamp(0.0, 1.0);
    blend_color(color, background_color(), t * 0.6)
}

fn blend_color(base: Color32, overlay: Color32, amount: f32) -> Color32 {
    let amount = amount.clamp(0.0, 1.0);
    let inverse = 1.0 - amount;

    Color32::from_rgba_unmultiplied(
        ((base.r() as f32 * inverse) + (overlay.r() as f32 * amount)) as u8,
        ((base.g() as f32 * inverse) + (overlay.g() as f32 * amount)) as u8,
        ((base.b() as f32 * inverse) + (overlay.b() as f32 * amount)) as u8,
        base.a(),
    )
}

fn background_color() -> Color32 {
    Color32::from_rgb(19, 23, 29)
}

pub(super) fn draw_background(painter: &Painter, rect: Rect, horizon_y: f32) {
    painter.rect_filled(rect, 0.0, background_color());

    let horizon_y = horizon_y.clamp(rect.top(), rect.bottom());
    let step = 56.0;
    let mut y = horizon_y;
    while y < rect.bottom() {
        painter.line_segment(
            [Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)],
            Stroke::new(1.0, Color32::from_rgba_unmultiplied(60, 70, 80, 70)),
        );
        y += step;
    }
}

pub(super) fn draw_reticle(painter: &Painter, center: Pos2, active: bool) {
    let color = if active {
        Color32::from_rgb(245, 245, 245)
    } else {
        Color32::from_rgba_unmultiplied(200, 200, 200, 140)
    };
    painter.circle_stroke(center, 6.0, Stroke::new(1.5, color));
    painter.circle_filled(center, 1.5, color);
}

pub(super) fn circle_visible(rect: Rect, position: Pos2, radius: f32) -> bool {
    !(position.x + radius < rect.left()
        || position.x - radius > rect.right()
        || position.y + radius < rect.top()
        || position.y - radius > rect.bottom())
}

pub(super) fn edge_visible(rect: Rect, start: Pos2, end: Pos2, padding: f32) -> bool {
    let min_x = start.x.min(end.x) - padding;
    let max_x = start.x.max(end.x) + padding;
    let min_y = start.y.min(end.y) - padding;
    let max_y = start.y.max(end.y) + padding;

    !(max_x < rect.left() || min_x > rect.right() || max_y < rect.top() || min_y > rect.bottom())
}

pub(super) fn distance_to_segment(point: Pos2, start: Pos2, end: Pos2) -> f32 {
    let segment = end - start;
    let length_sq = segment.length_sq();
    if length_sq <= f32::EPSILON {
        return point.distance(start);
    }

    let t = ((point - start).dot(segment) / length_sq).clamp(0.0, 1.0);
    point.distance(start + segment * t)
}

#[cfg(test)]
mod tests {
    use eframe::egui::{pos2, vec2};

    use super::*;

    #[test]
    fn segment_distance_clamps_to_endpoints() {
        let start = pos2(0.0, 0.0);
        let end = pos2(10.0, 0.0);
        assert_eq!(distance_to_segment(pos2(5.0, 3.0), start, end), 3.0);
        assert_eq!(distance_to_segment(pos2(-4.0, 3.0), start, end), 5.0);
        assert_eq!(distance_to_segment(pos2(2.0, 2.0), start, start), 8.0_f32.sqrt());
    }

    #[test]
    fn visibility_checks_use_padding() {
        let rect = Rect::from_min_size(Pos2::ZERO, vec2(100.0, 100.0));
        assert!(circle_visible(rect, pos2(-5.0, 50.0), 6.0));
        assert!(!circle_visible(rect, pos2(-5.0, 50.0), 4.0));
        assert!(edge_visible(rect, pos2(-20.0, -20.0), pos2(-3.0, 50.0), 4.0));
        assert!(!edge_visible(rect, pos2(-20.0, -20.0), pos2(-10.0, 50.0), 4.0));
    }

    #[test]
    fn render_color_alpha_maps_to_byte() {
        let color = to_color32(RenderColor { r: 10, g: 20, b: 30, a: 1.0 });
        assert_eq!(color, Color32::from_rgb(10, 20, 30));
    }
}
