use std::sync::Arc;

use egui::{Color32, Pos2, Rect, Vec2};
use image::{Rgba, RgbaImage};

use crate::geometry;

/// Width of the drawing surface in pixels
pub const CANVAS_WIDTH: u32 = 800;
/// Height of the drawing surface in pixels
pub const CANVAS_HEIGHT: u32 = 600;

/// Value of every pixel in a cleared buffer
const CLEARED: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Immutable capture of the whole pixel buffer.
///
/// Snapshots share their pixels, so cloning one (for example to hold it as
/// the base of a drag preview) does not copy the buffer.
#[derive(Clone, PartialEq, Eq)]
pub struct Snapshot(Arc<RgbaImage>);

impl Snapshot {
    /// A snapshot of a cleared buffer with the given dimensions
    pub fn blank(width: u32, height: u32) -> Self {
        Self(Arc::new(RgbaImage::from_pixel(width, height, CLEARED)))
    }

    pub fn image(&self) -> &RgbaImage {
        &self.0
    }

    pub fn width(&self) -> u32 {
        self.0.width()
    }

    pub fn height(&self) -> u32 {
        self.0.height()
    }
}

impl std::fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Snapshot")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

/// The pixel buffer everything is drawn into.
///
/// Shapes are rasterized immediately; nothing is retained about them besides
/// their pixels. A pixel is covered when its centre lies inside the shape,
/// without anti-aliasing, so that identical operations always produce
/// identical bytes.
pub struct CanvasSurface {
    buffer: RgbaImage,
    /// Bumped on every mutation so the renderer knows when to re-upload
    version: u64,
}

impl std::fmt::Debug for CanvasSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CanvasSurface")
            .field("width", &self.buffer.width())
            .field("height", &self.buffer.height())
            .field("version", &self.version)
            .finish()
    }
}

impl Default for CanvasSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl CanvasSurface {
    /// Creates a cleared 800x600 surface
    pub fn new() -> Self {
        Self::with_size(CANVAS_WIDTH, CANVAS_HEIGHT)
    }

    /// Creates a cleared surface of arbitrary size
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            buffer: RgbaImage::from_pixel(width, height, CLEARED),
            version: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width() as f32, self.height() as f32)
    }

    pub fn image(&self) -> &RgbaImage {
        &self.buffer
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// The RGBA value at `(x, y)`, or `None` outside the buffer
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.buffer.get_pixel_checked(x, y).map(|p| p.0)
    }

    /// True when every pixel is in the cleared state
    pub fn is_blank(&self) -> bool {
        self.buffer.pixels().all(|p| *p == CLEARED)
    }

    pub fn clear(&mut self) {
        self.buffer.pixels_mut().for_each(|p| *p = CLEARED);
        self.touch();
    }

    pub fn capture_snapshot(&self) -> Snapshot {
        Snapshot(Arc::new(self.buffer.clone()))
    }

    /// Replaces the entire buffer with the contents of `snapshot`.
    pub fn restore(&mut self, snapshot: &Snapshot) {
        if snapshot.image().dimensions() == self.buffer.dimensions() {
            self.buffer.copy_from_slice(snapshot.image().as_raw());
        } else {
            log::warn!(
                "Restoring a {}x{} snapshot onto a {}x{} surface",
                snapshot.width(),
                snapshot.height(),
                self.width(),
                self.height()
            );
            self.buffer = snapshot.image().clone();
        }
        self.touch();
    }

    /// Draws the box with one corner at `origin` and the opposite corner at
    /// `origin + extent`. Negative extents are valid and span the mirrored box.
    pub fn draw_rectangle(
        &mut self,
        origin: Pos2,
        extent: Vec2,
        stroke: Color32,
        fill: Color32,
        width: f32,
    ) {
        let rect = geometry::rect_from_corners(origin, origin + extent);

        self.paint_where(rect, fill, |p| contains_half_open(rect, p));

        if rect.width() == 0.0 && rect.height() == 0.0 {
            return;
        }
        if let Some(half) = stroke_half_width(width) {
            let outer = rect.expand(half);
            let inner = rect.shrink(half);
            self.paint_where(outer, stroke, |p| {
                contains_half_open(outer, p) && !contains_half_open(inner, p)
            });
        }
        self.touch();
    }

    /// Draws a full circle around `center`.
    pub fn draw_circle(
        &mut self,
        center: Pos2,
        radius: f32,
        stroke: Color32,
        fill: Color32,
        width: f32,
    ) {
        if !radius.is_finite() || radius < 0.0 {
            log::debug!("Skipping circle with radius {}", radius);
            return;
        }

        let bounds = Rect::from_center_size(center, Vec2::splat(radius * 2.0));
        self.paint_where(bounds, fill, |p| geometry::distance(center, p) <= radius);

        // A zero radius outlines nothing
        if radius == 0.0 {
            self.touch();
            return;
        }
        if let Some(half) = stroke_half_width(width) {
            self.paint_where(bounds.expand(half), stroke, |p| {
                (geometry::distance(center, p) - radius).abs() <= half
            });
        }
        self.touch();
    }

    /// Draws a straight segment with butt caps.
    pub fn draw_line(&mut self, start: Pos2, end: Pos2, stroke: Color32, width: f32) {
        let Some(half) = stroke_half_width(width) else {
            return;
        };

        let bounds = Rect::from_two_pos(start, end).expand(half);
        self.paint_where(bounds, stroke, |p| {
            geometry::distance_to_segment_butt(p, start, end).is_some_and(|d| d <= half)
        });
        self.touch();
    }

    /// Blends `color` into every pixel within `bounds` whose centre passes `covers`.
    fn paint_where(&mut self, bounds: Rect, color: Color32, covers: impl Fn(Pos2) -> bool) {
        if color.a() == 0 {
            return;
        }
        let Some((min_x, min_y, max_x, max_y)) =
            geometry::pixel_span(bounds, self.width(), self.height())
        else {
            return;
        };

        for y in min_y..max_y {
            for x in min_x..max_x {
                if covers(geometry::pixel_center(x, y)) {
                    blend(self.buffer.get_pixel_mut(x, y), color);
                }
            }
        }
    }

    fn touch(&mut self) {
        self.version = self.version.wrapping_add(1);
    }
}

fn contains_half_open(rect: Rect, p: Pos2) -> bool {
    rect.min.x <= p.x && p.x < rect.max.x && rect.min.y <= p.y && p.y < rect.max.y
}

/// Half of a usable line width. Invalid widths draw no stroke at all.
fn stroke_half_width(width: f32) -> Option<f32> {
    (width.is_finite() && width > 0.0).then_some(width / 2.0)
}

/// Source-over compositing of an unmultiplied color onto an unmultiplied pixel.
fn blend(dst: &mut Rgba<u8>, src: Color32) {
    let [r, g, b, a] = src.to_srgba_unmultiplied();
    if a == u8::MAX {
        *dst = Rgba([r, g, b, a]);
        return;
    }

    let src_a = a as f32 / 255.0;
    let dst_a = dst[3] as f32 / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);
    if out_a <= 0.0 {
        *dst = CLEARED;
        return;
    }

    let mix = |s: u8, d: u8| {
        ((s as f32 * src_a + d as f32 * dst_a * (1.0 - src_a)) / out_a).round() as u8
    };
    *dst = Rgba([
        mix(r, dst[0]),
        mix(g, dst[1]),
        mix(b, dst[2]),
        (out_a * 255.0).round() as u8,
    ]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};

    const BLACK: [u8; 4] = [0, 0, 0, 255];
    const WHITE: [u8; 4] = [255, 255, 255, 255];
    const EMPTY: [u8; 4] = [0, 0, 0, 0];

    fn outline_white(canvas: &mut CanvasSurface, origin: Pos2, extent: Vec2, width: f32) {
        canvas.draw_rectangle(origin, extent, Color32::BLACK, Color32::WHITE, width);
    }

    #[test]
    fn test_new_surface_is_blank() {
        let canvas = CanvasSurface::new();
        assert_eq!(canvas.width(), 800);
        assert_eq!(canvas.height(), 600);
        assert!(canvas.is_blank());
    }

    #[test]
    fn test_rectangle_border_and_fill() {
        let mut canvas = CanvasSurface::with_size(120, 80);
        outline_white(&mut canvas, pos2(10.0, 10.0), vec2(90.0, 40.0), 2.0);

        // Two pixel border centred on the outline
        for x in [9, 10, 99, 100] {
            assert_eq!(canvas.pixel(x, 30), Some(BLACK), "column {x}");
        }
        for y in [9, 10, 49, 50] {
            assert_eq!(canvas.pixel(50, y), Some(BLACK), "row {y}");
        }
        assert_eq!(canvas.pixel(11, 11), Some(WHITE));
        assert_eq!(canvas.pixel(98, 48), Some(WHITE));
        assert_eq!(canvas.pixel(8, 30), Some(EMPTY));
        assert_eq!(canvas.pixel(101, 30), Some(EMPTY));
        assert_eq!(canvas.pixel(50, 51), Some(EMPTY));
    }

    #[test]
    fn test_negative_extent_matches_positive() {
        let mut forward = CanvasSurface::with_size(120, 80);
        outline_white(&mut forward, pos2(10.0, 10.0), vec2(90.0, 40.0), 2.0);

        let mut backward = CanvasSurface::with_size(120, 80);
        outline_white(&mut backward, pos2(100.0, 50.0), vec2(-90.0, -40.0), 2.0);

        assert_eq!(forward.image(), backward.image());
    }

    #[test]
    fn test_circle_radius() {
        let mut canvas = CanvasSurface::with_size(120, 120);
        canvas.draw_circle(pos2(50.0, 50.0), 30.0, Color32::BLACK, Color32::WHITE, 2.0);

        assert_eq!(canvas.pixel(50, 50), Some(WHITE));
        assert_eq!(canvas.pixel(79, 49), Some(BLACK));
        assert_eq!(canvas.pixel(20, 49), Some(BLACK));
        assert_eq!(canvas.pixel(83, 49), Some(EMPTY));
        assert_eq!(canvas.pixel(0, 0), Some(EMPTY));
    }

    #[test]
    fn test_zero_radius_circle_paints_nothing() {
        let mut canvas = CanvasSurface::with_size(20, 20);
        canvas.draw_circle(pos2(10.0, 10.0), 0.0, Color32::BLACK, Color32::WHITE, 4.0);
        assert!(canvas.is_blank());
    }

    #[test]
    fn test_line_has_butt_caps() {
        let mut canvas = CanvasSurface::with_size(40, 20);
        canvas.draw_line(pos2(5.0, 10.0), pos2(30.0, 10.0), Color32::RED, 4.0);

        assert_eq!(canvas.pixel(5, 10), Some([255, 0, 0, 255]));
        assert_eq!(canvas.pixel(29, 8), Some([255, 0, 0, 255]));
        assert_eq!(canvas.pixel(4, 10), Some(EMPTY));
        assert_eq!(canvas.pixel(30, 10), Some(EMPTY));
        assert_eq!(canvas.pixel(15, 13), Some(EMPTY));
    }

    #[test]
    fn test_invalid_width_skips_stroke() {
        let mut canvas = CanvasSurface::with_size(40, 40);
        canvas.draw_line(pos2(0.0, 0.0), pos2(30.0, 30.0), Color32::RED, -3.0);
        canvas.draw_line(pos2(0.0, 0.0), pos2(30.0, 30.0), Color32::RED, f32::NAN);
        assert!(canvas.is_blank());

        outline_white(&mut canvas, pos2(5.0, 5.0), vec2(10.0, 10.0), -1.0);
        assert_eq!(canvas.pixel(5, 5), Some(WHITE));
        assert_eq!(canvas.pixel(4, 4), Some(EMPTY));
    }

    #[test]
    fn test_shapes_are_clipped_to_buffer() {
        let mut canvas = CanvasSurface::with_size(20, 20);
        outline_white(&mut canvas, pos2(-50.0, -50.0), vec2(200.0, 200.0), 2.0);
        assert_eq!(canvas.pixel(0, 0), Some(WHITE));
        assert_eq!(canvas.pixel(19, 19), Some(WHITE));
    }

    #[test]
    fn test_translucent_fill_blends() {
        let mut canvas = CanvasSurface::with_size(4, 4);
        let (origin, extent) = (pos2(0.0, 0.0), vec2(4.0, 4.0));
        canvas.draw_rectangle(origin, extent, Color32::TRANSPARENT, Color32::WHITE, 0.0);
        let half_black = Color32::from_rgba_unmultiplied(0, 0, 0, 128);
        canvas.draw_rectangle(origin, extent, Color32::TRANSPARENT, half_black, 0.0);

        let [r, g, b, a] = canvas.pixel(1, 1).unwrap();
        assert_eq!(a, 255);
        assert!(r == g && g == b);
        assert!((120..=135).contains(&r), "got {r}");
    }

    #[test]
    fn test_snapshot_restore_round_trip() {
        let mut canvas = CanvasSurface::with_size(30, 30);
        canvas.draw_line(pos2(0.0, 15.0), pos2(30.0, 15.0), Color32::BLUE, 2.0);
        let snapshot = canvas.capture_snapshot();

        canvas.draw_circle(pos2(15.0, 15.0), 8.0, Color32::RED, Color32::GREEN, 1.0);
        assert_ne!(canvas.image(), snapshot.image());

        canvas.restore(&snapshot);
        assert_eq!(canvas.image(), snapshot.image());
    }

    #[test]
    fn test_mutations_bump_version() {
        let mut canvas = CanvasSurface::with_size(10, 10);
        let before = canvas.version();
        canvas.clear();
        assert!(canvas.version() > before);
    }
}
