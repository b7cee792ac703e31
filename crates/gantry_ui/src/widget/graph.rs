//! Rolling bar graph (frame times, network jitter, and the like).

use std::collections::VecDeque;

use crate::layout::Rect;
use crate::render::RenderBatch;

use super::{RenderCtx, Widget};

/// A bounded series of samples drawn as bars, oldest on the left.
///
/// Bars are scaled against `max`, or against the largest sample when no
/// fixed range is set.
#[derive(Debug, Clone)]
pub struct Graph {
    samples: VecDeque<f32>,
    capacity: usize,
    max: Option<f32>,
}

impl Graph {
    /// Creates a graph that keeps the last `capacity` samples.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
            max: None,
        }
    }

    /// Scales bars against a fixed maximum.
    #[must_use]
    pub const fn with_max(mut self, max: f32) -> Self {
        self.max = Some(max);
        self
    }

    /// Appends a sample, evicting the oldest when full. Non-finite samples
    /// are recorded as zero.
    pub fn push(&mut self, value: f32) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(if value.is_finite() { value } else { 0.0 });
    }

    /// Drops every sample.
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Samples, oldest first.
    pub fn samples(&self) -> impl Iterator<Item = f32> + '_ {
        self.samples.iter().copied()
    }

    /// Number of samples held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if no sample has been pushed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    fn scale(&self) -> f32 {
        self.max
            .unwrap_or_else(|| self.samples.iter().copied().fold(0.0, f32::max))
    }

    /// Bar rectangles for `bounds`, oldest first.
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    fn bars(&self, bounds: Rect) -> Vec<Rect> {
        let slots = i32::try_from(self.capacity).unwrap_or(i32::MAX);
        let width = (bounds.width / slots).max(1);
        let scale = self.scale();
        if scale <= 0.0 {
            return Vec::new();
        }

        self.samples
            .iter()
            .zip(0..)
            .map(|(&value, slot)| {
                let ratio = (value / scale).clamp(0.0, 1.0);
                let height = (ratio * bounds.height as f32).round() as i32;
                Rect::new(
                    bounds.x + slot * width,
                    bounds.bottom() - height,
                    width,
                    height,
                )
            })
            .collect()
    }
}

impl Widget for Graph {
    widget_any!("Graph");

    fn render(&self, ctx: &RenderCtx<'_>, batch: &mut dyn RenderBatch) {
        batch.fill_rect(ctx.bounds, ctx.theme.background);
        for bar in self.bars(ctx.bounds) {
            batch.fill_rect(bar, ctx.theme.accent);
        }
        batch.stroke_rect(ctx.bounds, ctx.theme.border, 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut graph = Graph::new(3);
        for v in [1.0, 2.0, 3.0, 4.0] {
            graph.push(v);
        }
        assert_eq!(graph.samples().collect::<Vec<_>>(), vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_bars_scale_to_largest_sample() {
        let mut graph = Graph::new(4);
        graph.push(5.0);
        graph.push(10.0);
        graph.push(f32::NAN);

        let bars = graph.bars(Rect::new(0, 0, 40, 20));
        assert_eq!(
            bars,
            vec![
                Rect::new(0, 10, 10, 10),
                Rect::new(10, 0, 10, 20),
                Rect::new(20, 20, 10, 0),
            ]
        );
    }

    #[test]
    fn test_fixed_max_clamps() {
        let mut graph = Graph::new(2).with_max(4.0);
        graph.push(8.0);
        assert_eq!(graph.bars(Rect::new(0, 0, 20, 10)), vec![Rect::new(0, 0, 10, 10)]);
    }
}
