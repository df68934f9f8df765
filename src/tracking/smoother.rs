//! Median angle smoother
//!
//! Rolling window over the most recent raw angles. The median keeps a
//! single spurious spike from moving the output.

use std::collections::VecDeque;

/// Default number of samples in the smoothing window
pub const DEFAULT_SMOOTHING_WINDOW: usize = 5;

#[derive(Debug, Clone)]
pub struct AngleSmoother {
    window: VecDeque<f32>,
    capacity: usize,
}

impl AngleSmoother {
    /// Create a smoother holding `capacity` samples (minimum 1)
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            window: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push a raw sample, evicting the oldest on overflow, and return the median
    pub fn update(&mut self, raw: f32) -> f32 {
        if self.window.len() == self.capacity {
            self.window.pop_front();
        }
        self.window.push_back(raw);

        median(self.window.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.window.clear();
    }
}

impl Default for AngleSmoother {
    fn default() -> Self {
        Self::new(DEFAULT_SMOOTHING_WINDOW)
    }
}

/// Median of the samples; an even count averages the two middle values
fn median(samples: impl Iterator<Item = f32>) -> f32 {
    let mut sorted: Vec<f32> = samples.collect();
    if sorted.is_empty() {
        return 0.0;
    }
    sorted.sort_by(f32::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}
