use egui::{
    Color32, ColorImage, Context, Painter, Rect, TextureHandle, TextureId, TextureOptions, pos2,
};

use crate::canvas::CanvasSurface;

/// Shows the canvas pixel buffer on screen.
///
/// The buffer is uploaded to a texture only when its version changed since
/// the last upload, so idle frames cost nothing.
#[derive(Default)]
pub struct Renderer {
    texture: Option<TextureHandle>,
    uploaded_version: Option<u64>,
}

// Custom Debug implementation since TextureHandle doesn't implement Debug
impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("has_texture", &self.texture.is_some())
            .field("uploaded_version", &self.uploaded_version)
            .finish()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the texture does not reflect the canvas yet
    pub fn needs_upload(&self, canvas: &CanvasSurface) -> bool {
        self.texture.is_none() || self.uploaded_version != Some(canvas.version())
    }

    /// Makes sure the texture holds the current buffer and returns its id
    pub fn sync_texture(&mut self, ctx: &Context, canvas: &CanvasSurface) -> TextureId {
        let needs_upload = self.needs_upload(canvas);
        let texture = self.texture.get_or_insert_with(|| {
            ctx.load_texture(
                "canvas",
                ColorImage::new([1, 1], Color32::TRANSPARENT),
                TextureOptions::NEAREST,
            )
        });
        if needs_upload {
            texture.set(to_color_image(canvas), TextureOptions::NEAREST);
            self.uploaded_version = Some(canvas.version());
        }
        texture.id()
    }

    /// Paints the canvas into `rect`, on a white page with a thin border
    pub fn render(
        &mut self,
        ctx: &Context,
        painter: &Painter,
        rect: Rect,
        canvas: &CanvasSurface,
    ) {
        let texture_id = self.sync_texture(ctx, canvas);

        painter.rect_filled(rect, 0.0, Color32::WHITE);
        painter.image(
            texture_id,
            rect,
            Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)),
            Color32::WHITE,
        );
        painter.rect_stroke(rect, 0.0, egui::Stroke::new(1.0, Color32::GRAY));
    }
}

fn to_color_image(canvas: &CanvasSurface) -> ColorImage {
    ColorImage::from_rgba_unmultiplied(
        [canvas.width() as usize, canvas.height() as usize],
        canvas.image().as_raw(),
    )
}
