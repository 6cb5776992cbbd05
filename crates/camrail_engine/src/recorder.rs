// SPDX-License-Identifier: MIT OR Apache-2.0
//! Bounded buffers of path sample points for debug drawing.

use glam::Vec3;

/// Default capacity of the curve sample buffer
pub const DEFAULT_DOT_CAPACITY: usize = 1000;

/// Default capacity of the keyframe marker buffer
pub const DEFAULT_MARKER_CAPACITY: usize = 100;

/// Append-only buffer with a fixed capacity
///
/// Storage is allocated once. Writes past capacity are dropped; the buffer
/// never wraps.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T: Copy> SampleBuffer<T> {
    /// Create an empty buffer holding at most `capacity` items
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Append one item; returns `false` when the buffer is full
    pub fn push(&mut self, item: T) -> bool {
        if self.is_full() {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Append as many items as fit; returns how many were accepted
    pub fn record(&mut self, items: &[T]) -> usize {
        let accepted = items.len().min(self.remaining());
        self.items.extend_from_slice(&items[..accepted]);
        accepted
    }

    /// Forget all items, keeping the storage
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Valid items
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Number of valid items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether no items are recorded
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Maximum number of items
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Free slots left
    pub fn remaining(&self) -> usize {
        self.capacity - self.items.len()
    }

    /// Whether no further items fit
    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }
}

/// Curve samples ("dots") and keyframe markers for external rendering
#[derive(Debug, Clone, PartialEq)]
pub struct PathSampleRecorder {
    dots: SampleBuffer<Vec3>,
    markers: SampleBuffer<Vec3>,
}

impl PathSampleRecorder {
    /// Create a recorder with the given capacities
    pub fn new(dot_capacity: usize, marker_capacity: usize) -> Self {
        Self {
            dots: SampleBuffer::with_capacity(dot_capacity),
            markers: SampleBuffer::with_capacity(marker_capacity),
        }
    }

    /// Record curve sample points
    pub fn record_dots(&mut self, points: &[Vec3]) -> usize {
        let accepted = self.dots.record(points);
        if accepted < points.len() {
            tracing::debug!(
                "Dot buffer full, dropped {} of {} samples",
                points.len() - accepted,
                points.len()
            );
        }
        accepted
    }

    /// Record keyframe marker points
    pub fn record_markers(&mut self, points: &[Vec3]) -> usize {
        let accepted = self.markers.record(points);
        if accepted < points.len() {
            tracing::debug!(
                "Marker buffer full, dropped {} of {} markers",
                points.len() - accepted,
                points.len()
            );
        }
        accepted
    }

    /// Clear both buffers
    pub fn clear(&mut self) {
        self.dots.clear();
        self.markers.clear();
    }

    /// Curve samples
    pub fn dots(&self) -> &SampleBuffer<Vec3> {
        &self.dots
    }

    /// Keyframe markers
    pub fn markers(&self) -> &SampleBuffer<Vec3> {
        &self.markers
    }
}

impl Default for PathSampleRecorder {
    fn default() -> Self {
        Self::new(DEFAULT_DOT_CAPACITY, DEFAULT_MARKER_CAPACITY)
    }
}
