//! Sliding mean over the most recent samples
//!
//! Keeps a short history and reports its arithmetic mean. Used to steady
//! the wrist-height parameter, which jitters frame to frame.

use std::collections::VecDeque;

/// Default number of samples averaged
pub const WINDOW_SIZE: usize = 5;

pub struct SlidingMean {
    history: VecDeque<f32>,
    capacity: usize,
}

impl SlidingMean {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            history: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Add a sample, evict the oldest beyond capacity, return the mean
    pub fn push(&mut self, value: f32) -> f32 {
        self.history.push_back(value);
        if self.history.len() > self.capacity {
            self.history.pop_front();
        }
        self.mean()
    }

    /// Mean of the current window; 0 while empty
    pub fn mean(&self) -> f32 {
        if self.history.is_empty() {
            return 0.0;
        }
        self.history.iter().sum::<f32>() / self.history.len() as f32
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }
}

impl Default for SlidingMean {
    fn default() -> Self {
        Self::new(WINDOW_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_of_full_window() {
        let mut window = SlidingMean::default();
        let mut last = 0.0;
        for v in [1.0, 2.0, 3.0, 4.0, 5.0] {
            last = window.push(v);
        }
        assert_eq!(last, 3.0);
    }

    #[test]
    fn test_oldest_evicted() {
        let mut window = SlidingMean::default();
        for v in [1.0, 2.0, 3.0, 4.0, 5.0] {
            window.push(v);
        }
        assert_eq!(window.push(6.0), 4.0);
        assert_eq!(window.len(), 5);
    }

    #[test]
    fn test_partial_window() {
        let mut window = SlidingMean::new(5);
        assert_eq!(window.mean(), 0.0);
        assert_eq!(window.push(2.0), 2.0);
        assert_eq!(window.push(4.0), 3.0);
    }

    #[test]
    fn test_clear() {
        let mut window = SlidingMean::new(3);
        window.push(1.0);
        window.clear();
        assert!(window.is_empty());
    }
}
