use egui::{Pos2, Rect};

/// Distance from a point to the closest point on a line segment
pub(crate) fn distance_to_line_segment(point: Pos2, line_start: Pos2, line_end: Pos2) -> f32 {
    let line_vec = line_end - line_start;
    let point_vec = point - line_start;

    let line_len = line_vec.length();
    if line_len == 0.0 {
        return point_vec.length();
    }

    let t = ((point_vec.x * line_vec.x + point_vec.y * line_vec.y) / line_len).clamp(0.0, line_len);
    let projection = line_start + (line_vec * t / line_len);
    (point - projection).length()
}

/// Bounding box of a point set, grown by `padding` on every side
pub(crate) fn calculate_bounds(points: &[Pos2], padding: f32) -> Rect {
    if points.is_empty() {
        return Rect::NOTHING;
    }

    let mut min_x = f32::INFINITY;
    let mut min_y = f32::INFINITY;
    let mut max_x = f32::NEG_INFINITY;
    let mut max_y = f32::NEG_INFINITY;

    for point in points {
        min_x = min_x.min(point.x);
        min_y = min_y.min(point.y);
        max_x = max_x.max(point.x);
        max_y = max_y.max(point.y);
    }

    Rect::from_min_max(
        Pos2::new(min_x - padding, min_y - padding),
        Pos2::new(max_x + padding, max_y + padding),
    )
}

/// Clamp a float rect to pixel indices of a `width`x`height` grid.
///
/// Returns inclusive `(min_x, min_y, max_x, max_y)`, or `None` when the
/// rect misses the grid entirely.
pub(crate) fn pixel_span(rect: Rect, width: u32, height: u32) -> Option<(u32, u32, u32, u32)> {
    if width == 0 || height == 0 || !rect.is_finite() || !rect.is_positive() {
        return None;
    }
    if rect.max.x < 0.0
        || rect.max.y < 0.0
        || rect.min.x >= width as f32
        || rect.min.y >= height as f32
    {
        return None;
    }

    let min_x = rect.min.x.floor().max(0.0) as u32;
    let min_y = rect.min.y.floor().max(0.0) as u32;
    let max_x = (rect.max.x.ceil() as u32).min(width - 1);
    let max_y = (rect.max.y.ceil() as u32).min(height - 1);
    Some((min_x, min_y, max_x, max_y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn test_distance_to_segment() {
        let a = pos2(0.0, 0.0);
        let b = pos2(10.0, 0.0);
        assert!((distance_to_line_segment(pos2(5.0, 3.0), a, b) - 3.0).abs() < 1e-5);
        // past the end the distance is to the endpoint
        assert!((distance_to_line_segment(pos2(13.0, 4.0), a, b) - 5.0).abs() < 1e-5);
        // degenerate segment
        assert!((distance_to_line_segment(pos2(3.0, 4.0), a, a) - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_pixel_span_clamps() {
        let rect = Rect::from_min_max(pos2(-5.0, 2.5), pos2(120.0, 8.2));
        assert_eq!(pixel_span(rect, 100, 50), Some((0, 2, 99, 9)));
    }

    #[test]
    fn test_pixel_span_outside() {
        let rect = Rect::from_min_max(pos2(200.0, 200.0), pos2(210.0, 210.0));
        assert_eq!(pixel_span(rect, 100, 50), None);
        assert_eq!(pixel_span(Rect::NOTHING, 100, 50), None);
    }
}
