//! Fixed-size sliding window, most recent item first.
//!
//! The window keeps at most `size` items. Once full, every push evicts the
//! oldest item and hands it back to the caller.

use std::collections::VecDeque;

use crate::indicator::IndicatorError;

#[derive(Debug, Clone)]
pub struct RollingWindow<T> {
    items: VecDeque<T>,
    size: usize,
    samples: u64,
}

impl<T> RollingWindow<T> {
    pub fn new(size: usize) -> Result<Self, IndicatorError> {
        if size == 0 {
            return Err(IndicatorError::InvalidWindowSize);
        }
        Ok(Self {
            items: VecDeque::with_capacity(size),
            size,
            samples: 0,
        })
    }

    /// Push a new item. Returns the evicted item once the window is full.
    pub fn push(&mut self, item: T) -> Option<T> {
        self.samples += 1;
        let evicted = if self.items.len() == self.size {
            self.items.pop_back()
        } else {
            None
        };
        self.items.push_front(item);
        evicted
    }

    /// Item `index` pushes ago; 0 is the most recent.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn most_recent(&self) -> Option<&T> {
        self.items.front()
    }

    /// Number of items currently held.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Maximum number of items held.
    pub fn size(&self) -> usize {
        self.size
    }

    /// True once the window has been filled.
    pub fn is_ready(&self) -> bool {
        self.samples >= self.size as u64
    }

    /// Total pushes since construction or the last reset.
    pub fn samples(&self) -> u64 {
        self.samples
    }

    /// Iterate from the most recent item to the oldest.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    pub fn reset(&mut self) {
        self.items.clear();
        self.samples = 0;
    }
}
