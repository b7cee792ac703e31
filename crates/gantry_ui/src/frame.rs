//! # Frame Handoff
//!
//! The update thread renders the tree into batches; the render thread reads
//! the last published batches without ever touching the tree.
//!
//! ```text
//! update thread                         render thread
//! ─────────────                         ─────────────
//! tree.update(input, dt)
//! exchange.publish(&mut tree) ──swap──▶ reader.latest()  (Arc snapshot)
//! ```
//!
//! A frame identical to the previous one is not republished, so readers can
//! skip re-uploading with [`FrameReader::frame_count`].

use std::sync::Arc;

use gantry_core::{DoubleBuffer, ReadHandle};

use crate::render::{UIBatch, UIRenderer};
use crate::tree::UiTree;

type Frames = DoubleBuffer<Vec<UIBatch>>;

/// Update-thread side of the handoff.
pub struct FrameExchange {
    frames: Arc<Frames>,
    renderer: UIRenderer,
}

impl FrameExchange {
    /// Creates an exchange whose first published frame is empty.
    #[must_use]
    pub fn new() -> Self {
        Self {
            frames: DoubleBuffer::new(Vec::new()),
            renderer: UIRenderer::new(),
        }
    }

    /// A reader for the render thread.
    #[must_use]
    pub fn reader(&self) -> FrameReader {
        FrameReader {
            frames: Arc::clone(&self.frames),
        }
    }

    /// Renders `tree` and publishes the batches if they differ from the last
    /// published frame. Returns true if a new frame was published.
    pub fn publish(&mut self, tree: &mut UiTree) -> bool {
        self.renderer.begin_frame();
        tree.render(&mut self.renderer);
        let batches = self.renderer.end_frame();

        {
            let mut back = self.frames.write_handle();
            if back.as_slice() != batches {
                back.clear();
                back.extend_from_slice(batches);
            }
        }
        let published = self.frames.swap_buffers();
        if published {
            tracing::trace!(
                frame = self.frames.frame_count(),
                batches = batches.len(),
                "frame published"
            );
        }
        published
    }

    /// Number of frames published so far.
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.frames.frame_count()
    }
}

impl Default for FrameExchange {
    fn default() -> Self {
        Self::new()
    }
}

/// Render-thread side of the handoff. Cheap to clone.
#[derive(Clone)]
pub struct FrameReader {
    frames: Arc<Frames>,
}

impl FrameReader {
    /// The last published batches. The snapshot stays valid while held.
    #[must_use]
    pub fn latest(&self) -> ReadHandle<Vec<UIBatch>> {
        self.frames.read_handle()
    }

    /// Number of frames published so far.
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.frames.frame_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Rect;
    use crate::widget::Label;

    #[test]
    fn test_unchanged_frame_is_not_republished() {
        let mut tree = UiTree::new(Rect::new(0, 0, 100, 100));
        let mut exchange = FrameExchange::new();
        let reader = exchange.reader();

        assert!(exchange.publish(&mut tree));
        assert!(!exchange.publish(&mut tree));
        assert_eq!(reader.frame_count(), 1);

        let label = tree.create("fps", Label::new("60"));
        tree.add_child(tree.root(), label).unwrap();
        assert!(exchange.publish(&mut tree));
        assert_eq!(reader.frame_count(), 2);
    }

    #[test]
    fn test_reader_keeps_its_snapshot() {
        let mut tree = UiTree::new(Rect::new(0, 0, 100, 100));
        let mut exchange = FrameExchange::new();
        let reader = exchange.reader();
        exchange.publish(&mut tree);

        let held = reader.latest();
        let commands = held.iter().map(|b| b.commands.len()).sum::<usize>();

        let label = tree.create("fps", Label::new("60"));
        tree.add_child(tree.root(), label).unwrap();
        exchange.publish(&mut tree);

        assert_eq!(held.iter().map(|b| b.commands.len()).sum::<usize>(), commands);
        assert!(!held.same_frame(&reader.latest()));
    }
}
