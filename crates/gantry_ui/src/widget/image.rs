//! Texture display.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::content::{Texture, TextureSlot};
use crate::render::RenderBatch;
use crate::style::Color;

use super::{EventCtx, RenderCtx, Widget, WidgetResponse};

/// Draws a texture stretched over its bounds.
///
/// The texture is requested from the content loader on the first update.
/// Nothing is drawn until it arrives; a failed load leaves the image empty.
#[derive(Debug, Clone)]
pub struct Image {
    path: String,
    slot: TextureSlot,
    requested: bool,
    tint: Color,
}

impl Image {
    /// Creates an image for the asset at `path`.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            slot: Arc::new(Mutex::new(None)),
            requested: false,
            tint: Color::WHITE,
        }
    }

    /// Multiplies the texture by `tint`.
    #[must_use]
    pub const fn with_tint(mut self, tint: Color) -> Self {
        self.tint = tint;
        self
    }

    /// Asset path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The loaded texture, if any.
    #[must_use]
    pub fn texture(&self) -> Option<Texture> {
        *self.slot.lock()
    }

    /// Whether the texture has arrived.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.slot.lock().is_some()
    }
}

impl Widget for Image {
    widget_any!("Image");

    fn update(&mut self, _dt: f32, ctx: &mut EventCtx<'_>) -> WidgetResponse {
        if !self.requested && !self.path.is_empty() {
            self.requested = true;
            let slot = Arc::clone(&self.slot);
            ctx.services.content.request(
                &self.path,
                Box::new(move |result| *slot.lock() = result.ok()),
            );
        }
        WidgetResponse::IGNORED
    }

    fn render(&self, ctx: &RenderCtx<'_>, batch: &mut dyn RenderBatch) {
        if let Some(texture) = self.texture() {
            batch.draw_texture(ctx.bounds, texture.id, self.tint);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::config::UiConfig;
    use crate::content::{ContentError, ContentLoader, TextureId, TextureSource};
    use crate::input::InputState;
    use crate::layout::Rect;
    use crate::render::{RenderCommand, UIRenderer};
    use crate::services::Services;
    use crate::tree::UiTree;

    struct OneTexture;

    impl TextureSource for OneTexture {
        fn load(&mut self, path: &str) -> Result<Texture, ContentError> {
            if path == "logo.png" {
                Ok(Texture {
                    id: TextureId(3),
                    width: 32,
                    height: 32,
                })
            } else {
                Err(ContentError::NotFound(path.to_owned()))
            }
        }
    }

    fn tree_with_loader() -> UiTree {
        let services = Services {
            content: ContentLoader::new(OneTexture),
            ..Services::default()
        };
        UiTree::with_services(Rect::new(0, 0, 100, 100), UiConfig::default(), services)
    }

    fn textures(tree: &mut UiTree) -> usize {
        let mut renderer = UIRenderer::new();
        tree.render(&mut renderer);
        renderer
            .commands()
            .iter()
            .filter(|c| matches!(c, RenderCommand::Texture { .. }))
            .count()
    }

    #[test]
    fn test_texture_arrives_after_poll() {
        let mut tree = tree_with_loader();
        let image = tree.create("logo", Image::new("logo.png"));
        tree.set_local_bounds(image, Rect::new(0, 0, 32, 32)).unwrap();
        tree.add_child(tree.root(), image).unwrap();

        assert_eq!(textures(&mut tree), 0);
        tree.update(&InputState::new(), 0.016);
        assert_eq!(tree.services_mut().content.wait_idle(Duration::from_secs(5)), 1);

        assert_eq!(tree.widget::<Image>(image).and_then(Image::texture).map(|t| t.id), Some(TextureId(3)));
        assert_eq!(textures(&mut tree), 1);
    }

    #[test]
    fn test_missing_texture_stays_empty() {
        let mut tree = tree_with_loader();
        let image = tree.create("missing", Image::new("missing.png"));
        tree.set_local_bounds(image, Rect::new(0, 0, 32, 32)).unwrap();
        tree.add_child(tree.root(), image).unwrap();

        tree.update(&InputState::new(), 0.016);
        tree.services_mut().content.wait_idle(Duration::from_secs(5));
        assert_eq!(tree.widget::<Image>(image).map(Image::is_loaded), Some(false));
        assert_eq!(textures(&mut tree), 0);
    }
}
