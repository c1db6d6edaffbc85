//! Bounded FIFO of recent bob positions
//!
//! Stores the path of the second bob for the trailing line.

use std::collections::VecDeque;

/// Default number of points kept in the trail
pub const TRAIL_CAPACITY: usize = 5000;

/// Ring of 3D points; the oldest point is evicted once full
pub struct TrailBuffer {
    points: VecDeque<[f32; 3]>,
    capacity: usize,
}

impl TrailBuffer {
    pub fn new() -> Self {
        Self::with_capacity(TRAIL_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a point, evicting the oldest when over capacity
    pub fn push(&mut self, point: [f32; 3]) {
        self.points.push_back(point);
        while self.points.len() > self.capacity {
            self.points.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn first(&self) -> Option<&[f32; 3]> {
        self.points.front()
    }

    pub fn last(&self) -> Option<&[f32; 3]> {
        self.points.back()
    }

    /// Points in chronological order (oldest first)
    pub fn iter(&self) -> impl Iterator<Item = &[f32; 3]> {
        self.points.iter()
    }

    /// Fixed-size line buffer: unused slots repeat the newest point so the
    /// line never draws back to the origin.
    pub fn as_padded(&self) -> Vec<[f32; 3]> {
        let mut result = Vec::with_capacity(self.capacity);
        result.extend(self.points.iter().copied());
        let pad = self.points.back().copied().unwrap_or([0.0; 3]);
        result.resize(self.capacity, pad);
        result
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}

impl Default for TrailBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fills_up_to_capacity() {
        let mut trail = TrailBuffer::with_capacity(3);
        trail.push([1.0, 0.0, 0.0]);
        trail.push([2.0, 0.0, 0.0]);
        assert_eq!(trail.len(), 2);
        assert_eq!(trail.first(), Some(&[1.0, 0.0, 0.0]));
        assert_eq!(trail.last(), Some(&[2.0, 0.0, 0.0]));
    }

    #[test]
    fn test_evicts_oldest_past_capacity() {
        let mut trail = TrailBuffer::new();
        for i in 0..(TRAIL_CAPACITY + 1) {
            trail.push([i as f32, 0.0, 0.0]);
        }
        assert_eq!(trail.len(), TRAIL_CAPACITY);
        // first element is the second point ever pushed
        assert_eq!(trail.first(), Some(&[1.0, 0.0, 0.0]));
        assert_eq!(trail.last(), Some(&[TRAIL_CAPACITY as f32, 0.0, 0.0]));
    }

    #[test]
    fn test_never_grows_past_capacity() {
        let mut trail = TrailBuffer::with_capacity(10);
        for i in 0..1000 {
            trail.push([i as f32, 1.0, 2.0]);
            assert!(trail.len() <= 10);
        }
        let xs: Vec<f32> = trail.iter().map(|p| p[0]).collect();
        assert_eq!(xs, (990..1000).map(|i| i as f32).collect::<Vec<_>>());
    }

    #[test]
    fn test_padded_repeats_newest() {
        let mut trail = TrailBuffer::with_capacity(4);
        assert_eq!(trail.as_padded(), vec![[0.0; 3]; 4]);
        trail.push([1.0, 2.0, 0.0]);
        trail.push([3.0, 4.0, 0.0]);
        let padded = trail.as_padded();
        assert_eq!(padded.len(), 4);
        assert_eq!(padded[0], [1.0, 2.0, 0.0]);
        assert_eq!(padded[3], [3.0, 4.0, 0.0]);
    }

    #[test]
    fn test_clear() {
        let mut trail = TrailBuffer::with_capacity(4);
        trail.push([1.0, 1.0, 1.0]);
        trail.clear();
        assert!(trail.is_empty());
    }
}
