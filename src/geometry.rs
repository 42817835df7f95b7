use egui::{Pos2, Rect};

/// Centre of the pixel at integer coordinates `(x, y)`.
pub(crate) fn pixel_center(x: u32, y: u32) -> Pos2 {
    Pos2::new(x as f32 + 0.5, y as f32 + 0.5)
}

/// Euclidean distance between two points
pub fn distance(a: Pos2, b: Pos2) -> f32 {
    ((b.x - a.x).powi(2) + (b.y - a.y).powi(2)).sqrt()
}

/// Distance from a point to a line segment, or `None` when the point
/// projects outside the segment (butt caps) or the segment is degenerate.
pub(crate) fn distance_to_segment_butt(point: Pos2, start: Pos2, end: Pos2) -> Option<f32> {
    let line_vec = end - start;
    let point_vec = point - start;

    let len_sq = line_vec.x * line_vec.x + line_vec.y * line_vec.y;
    if len_sq == 0.0 {
        return None;
    }

    let t = (point_vec.x * line_vec.x + point_vec.y * line_vec.y) / len_sq;
    if !(0.0..=1.0).contains(&t) {
        return None;
    }

    let projection = start + line_vec * t;
    Some((point - projection).length())
}

/// The axis-aligned box spanned by two corners, whatever their order.
pub fn rect_from_corners(a: Pos2, b: Pos2) -> Rect {
    Rect::from_two_pos(a, b)
}

/// Pixel index range `(min_x, min_y, max_x, max_y)` (exclusive max) whose
/// centres may fall inside `bounds`, clamped to a `width` x `height` buffer.
///
/// Returns `None` when nothing of the box lies on the buffer.
pub(crate) fn pixel_span(bounds: Rect, width: u32, height: u32) -> Option<(u32, u32, u32, u32)> {
    if !bounds.min.x.is_finite()
        || !bounds.min.y.is_finite()
        || !bounds.max.x.is_finite()
        || !bounds.max.y.is_finite()
    {
        return None;
    }

    let clamp = |v: f32, hi: u32| v.clamp(0.0, hi as f32) as u32;
    let min_x = clamp((bounds.min.x - 0.5).floor(), width);
    let min_y = clamp((bounds.min.y - 0.5).floor(), height);
    let max_x = clamp((bounds.max.x + 0.5).ceil(), width);
    let max_y = clamp((bounds.max.y + 0.5).ceil(), height);

    if min_x >= max_x || min_y >= max_y {
        None
    } else {
        Some((min_x, min_y, max_x, max_y))
    }
}
