//! UI rendering system.
//!
//! Widgets draw through the [`RenderBatch`] trait. [`UIRenderer`] is the
//! built-in batch: it records [`RenderCommand`]s, keeps a clip stack, and at
//! the end of the frame splits the commands into [`UIBatch`]es, one per clip
//! rectangle, ready for the sprite renderer.

use crate::content::TextureId;
use crate::layout::{Point, Rect};
use crate::style::Color;

/// A render command for the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Filled rectangle.
    Rect {
        /// Bounds.
        bounds: Rect,
        /// Fill color.
        color: Color,
    },
    /// Rectangle outline.
    RectOutline {
        /// Bounds.
        bounds: Rect,
        /// Stroke color.
        color: Color,
        /// Line width.
        width: i32,
    },
    /// Text.
    Text {
        /// Text content.
        text: String,
        /// Top-left of the first glyph.
        position: Point,
        /// Text color.
        color: Color,
    },
    /// Textured quad.
    Texture {
        /// Bounds.
        bounds: Rect,
        /// Texture to sample.
        texture: TextureId,
        /// Tint color.
        color: Color,
    },
    /// Scissor rect (clip subsequent commands).
    PushClip {
        /// Clip bounds.
        bounds: Rect,
    },
    /// Pop scissor rect.
    PopClip,
}

/// Primitive draw calls exposed to widgets.
pub trait RenderBatch {
    /// Draws a filled rectangle.
    fn fill_rect(&mut self, bounds: Rect, color: Color);

    /// Draws a rectangle outline.
    fn stroke_rect(&mut self, bounds: Rect, color: Color, width: i32);

    /// Draws a single line of text.
    fn draw_text(&mut self, text: &str, position: Point, color: Color);

    /// Draws a textured quad.
    fn draw_texture(&mut self, bounds: Rect, texture: TextureId, color: Color);

    /// Restricts subsequent drawing to `bounds` (intersected with the
    /// current clip).
    fn push_clip(&mut self, bounds: Rect);

    /// Restores the previous clip.
    fn pop_clip(&mut self);
}

/// A batch of render commands sharing one clip rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct UIBatch {
    /// Commands in this batch.
    pub commands: Vec<RenderCommand>,
    /// Clip rect (if any).
    pub clip: Option<Rect>,
    /// Submission order.
    pub z_index: i32,
}

impl UIBatch {
    /// Creates a new empty batch.
    #[must_use]
    pub fn new(clip: Option<Rect>, z_index: i32) -> Self {
        Self {
            commands: Vec::new(),
            clip,
            z_index,
        }
    }

    /// Builds GPU vertices for the filled and textured quads in this batch.
    ///
    /// Text is left to the engine's glyph renderer.
    #[must_use]
    pub fn vertices(&self) -> Vec<UIVertex> {
        let mut vertices = Vec::with_capacity(self.commands.len() * 6);
        for command in &self.commands {
            match command {
                RenderCommand::Rect { bounds, color }
                | RenderCommand::Texture { bounds, color, .. } => {
                    vertices.extend_from_slice(&UIVertex::quad(*bounds, *color));
                }
                RenderCommand::RectOutline { bounds, color, width } => {
                    for edge in outline_edges(*bounds, *width) {
                        vertices.extend_from_slice(&UIVertex::quad(edge, *color));
                    }
                }
                RenderCommand::Text { .. }
                | RenderCommand::PushClip { .. }
                | RenderCommand::PopClip => {}
            }
        }
        vertices
    }
}

impl Default for UIBatch {
    fn default() -> Self {
        Self::new(None, 0)
    }
}

/// The four edge strips of an outline.
fn outline_edges(bounds: Rect, width: i32) -> [Rect; 4] {
    let w = width.min(bounds.width / 2).min(bounds.height / 2).max(0);
    [
        Rect::new(bounds.x, bounds.y, bounds.width, w),
        Rect::new(bounds.x, bounds.bottom() - w, bounds.width, w),
        Rect::new(bounds.x, bounds.y + w, w, bounds.height - 2 * w),
        Rect::new(bounds.right() - w, bounds.y + w, w, bounds.height - 2 * w),
    ]
}

/// UI renderer that collects and batches commands.
pub struct UIRenderer {
    /// All commands from the frame.
    commands: Vec<RenderCommand>,
    /// Clip stack.
    clip_stack: Vec<Rect>,
    /// Final batches for rendering.
    batches: Vec<UIBatch>,
}

impl UIRenderer {
    /// Creates a new UI renderer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(4096),
            clip_stack: Vec::with_capacity(16),
            batches: Vec::with_capacity(64),
        }
    }

    /// Begins a new frame.
    pub fn begin_frame(&mut self) {
        self.commands.clear();
        self.clip_stack.clear();
        self.batches.clear();
    }

    /// Adds a render command.
    pub fn push(&mut self, command: RenderCommand) {
        self.commands.push(command);
    }

    /// Returns the current clip rect.
    #[must_use]
    pub fn current_clip(&self) -> Option<Rect> {
        self.clip_stack.last().copied()
    }

    /// Returns the commands recorded so far this frame.
    #[must_use]
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Returns the total command count.
    #[must_use]
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Ends the frame and returns batches for rendering.
    ///
    /// A new batch starts whenever the active clip changes. Empty batches are
    /// dropped.
    pub fn end_frame(&mut self) -> &[UIBatch] {
        self.batches.clear();

        let mut clips: Vec<Rect> = Vec::with_capacity(self.clip_stack.len());
        let mut current = UIBatch::new(None, 0);

        for command in self.commands.drain(..) {
            match command {
                RenderCommand::PushClip { bounds } => {
                    clips.push(bounds);
                }
                RenderCommand::PopClip => {
                    clips.pop();
                }
                draw => {
                    let clip = clips.last().copied();
                    if clip != current.clip {
                        let z_index = current.z_index + 1;
                        let finished = std::mem::replace(&mut current, UIBatch::new(clip, z_index));
                        if !finished.commands.is_empty() {
                            self.batches.push(finished);
                        }
                    }
                    current.commands.push(draw);
                }
            }
        }

        if !current.commands.is_empty() {
            self.batches.push(current);
        }
        self.clip_stack.clear();

        &self.batches
    }
}

impl Default for UIRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderBatch for UIRenderer {
    fn fill_rect(&mut self, bounds: Rect, color: Color) {
        if !bounds.is_empty() {
            self.commands.push(RenderCommand::Rect { bounds, color });
        }
    }

    fn stroke_rect(&mut self, bounds: Rect, color: Color, width: i32) {
        if !bounds.is_empty() && width > 0 {
            self.commands.push(RenderCommand::RectOutline {
                bounds,
                color,
                width,
            });
        }
    }

    fn draw_text(&mut self, text: &str, position: Point, color: Color) {
        if !text.is_empty() {
            self.commands.push(RenderCommand::Text {
                text: text.to_owned(),
                position,
                color,
            });
        }
    }

    fn draw_texture(&mut self, bounds: Rect, texture: TextureId, color: Color) {
        if !bounds.is_empty() {
            self.commands.push(RenderCommand::Texture {
                bounds,
                texture,
                color,
            });
        }
    }

    fn push_clip(&mut self, bounds: Rect) {
        // Intersect with current clip if any
        let actual_clip = if let Some(current) = self.clip_stack.last() {
            current
                .intersection(&bounds)
                .unwrap_or(Rect::new(bounds.x, bounds.y, 0, 0))
        } else {
            bounds
        };

        self.clip_stack.push(actual_clip);
        self.commands.push(RenderCommand::PushClip {
            bounds: actual_clip,
        });
    }

    fn pop_clip(&mut self) {
        self.clip_stack.pop();
        self.commands.push(RenderCommand::PopClip);
    }
}

/// Vertex for UI rendering.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct UIVertex {
    /// Position (x, y).
    pub position: [f32; 2],
    /// UV coordinates.
    pub uv: [f32; 2],
    /// Color (RGBA).
    pub color: [f32; 4],
}

impl UIVertex {
    /// Creates a new vertex.
    #[must_use]
    pub const fn new(x: f32, y: f32, u: f32, v: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            uv: [u, v],
            color,
        }
    }

    /// Two triangles covering `bounds`, UV spanning the unit square.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn quad(bounds: Rect, color: Color) -> [Self; 6] {
        let c = color.to_array();
        let (x0, y0) = (bounds.x as f32, bounds.y as f32);
        let (x1, y1) = (bounds.right() as f32, bounds.bottom() as f32);
        [
            Self::new(x0, y0, 0.0, 0.0, c),
            Self::new(x1, y0, 1.0, 0.0, c),
            Self::new(x1, y1, 1.0, 1.0, c),
            Self::new(x0, y0, 0.0, 0.0, c),
            Self::new(x1, y1, 1.0, 1.0, c),
            Self::new(x0, y1, 0.0, 1.0, c),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renderer_frame() {
        let mut renderer = UIRenderer::new();

        renderer.begin_frame();
        renderer.fill_rect(Rect::new(0, 0, 100, 50), Color::WHITE);

        let batches = renderer.end_frame();
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].commands.len(), 1);
        assert_eq!(batches[0].clip, None);
    }

    #[test]
    fn test_empty_shapes_are_skipped() {
        let mut renderer = UIRenderer::new();
        renderer.fill_rect(Rect::new(0, 0, 0, 50), Color::WHITE);
        renderer.draw_text("", Point::ZERO, Color::WHITE);
        assert_eq!(renderer.command_count(), 0);
    }

    #[test]
    fn test_clip_stack() {
        let mut renderer = UIRenderer::new();
        renderer.begin_frame();

        renderer.push_clip(Rect::new(0, 0, 100, 100));
        renderer.push_clip(Rect::new(50, 50, 100, 100));
        assert_eq!(renderer.current_clip(), Some(Rect::new(50, 50, 50, 50)));

        renderer.pop_clip();
        renderer.pop_clip();
        assert!(renderer.current_clip().is_none());
    }

    #[test]
    fn test_batches_split_on_clip_change() {
        let mut renderer = UIRenderer::new();
        renderer.begin_frame();

        renderer.fill_rect(Rect::new(0, 0, 10, 10), Color::WHITE);
        renderer.push_clip(Rect::new(0, 0, 5, 5));
        renderer.fill_rect(Rect::new(0, 0, 10, 10), Color::BLACK);
        renderer.fill_rect(Rect::new(1, 1, 10, 10), Color::BLACK);
        renderer.pop_clip();
        renderer.fill_rect(Rect::new(2, 2, 10, 10), Color::WHITE);

        let batches = renderer.end_frame();
        assert_eq!(batches.len(), 3);
        assert_eq!(batches[0].clip, None);
        assert_eq!(batches[1].clip, Some(Rect::new(0, 0, 5, 5)));
        assert_eq!(batches[1].commands.len(), 2);
        assert_eq!(batches[2].clip, None);
        assert!(batches[0].z_index < batches[2].z_index);
    }

    #[test]
    fn test_vertices() {
        let mut batch = UIBatch::default();
        batch.commands.push(RenderCommand::Rect {
            bounds: Rect::new(0, 0, 4, 2),
            color: Color::WHITE,
        });
        batch.commands.push(RenderCommand::Text {
            text: "skip".into(),
            position: Point::ZERO,
            color: Color::WHITE,
        });
        batch.commands.push(RenderCommand::RectOutline {
            bounds: Rect::new(0, 0, 10, 10),
            color: Color::WHITE,
            width: 1,
        });

        let vertices = batch.vertices();
        assert_eq!(vertices.len(), 6 + 4 * 6);
        assert_eq!(vertices[2].position, [4.0, 2.0]);

        let bytes: &[u8] = bytemuck::cast_slice(&vertices);
        assert_eq!(bytes.len(), vertices.len() * std::mem::size_of::<UIVertex>());
    }
}
