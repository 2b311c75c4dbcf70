//! Caller-owned batch accumulator
//!
//! Collects transform outputs and hands them over in fixed-size batches.
//! The accumulator is an ordinary value: whoever drives the pipeline owns
//! it, decides the threshold, and must call [`BatchAccumulator::flush`] at
//! the end of the input.

/// Buffer that releases items in batches of `threshold`
#[derive(Debug, Clone)]
pub struct BatchAccumulator<T> {
    threshold: usize,
    buffer: Vec<T>,
    flushed: usize,
}

impl<T> BatchAccumulator<T> {
    /// Create an accumulator; a zero threshold is treated as 1
    pub fn new(threshold: usize) -> Self {
        let threshold = threshold.max(1);
        Self {
            threshold,
            buffer: Vec::with_capacity(threshold),
            flushed: 0,
        }
    }

    /// Add an item, returning a full batch once the threshold is reached
    pub fn push(&mut self, item: T) -> Option<Vec<T>> {
        self.buffer.push(item);
        if self.buffer.len() >= self.threshold {
            Some(self.take())
        } else {
            None
        }
    }

    /// Add many items, returning every batch that filled up
    pub fn extend<I: IntoIterator<Item = T>>(&mut self, items: I) -> Vec<Vec<T>> {
        items.into_iter().filter_map(|item| self.push(item)).collect()
    }

    /// Drain whatever is buffered; `None` when empty
    pub fn flush(&mut self) -> Option<Vec<T>> {
        if self.buffer.is_empty() {
            None
        } else {
            Some(self.take())
        }
    }

    /// Items waiting for the next batch
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Items handed out so far
    pub fn flushed(&self) -> usize {
        self.flushed
    }

    /// Batch size
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    fn take(&mut self) -> Vec<T> {
        let batch = std::mem::replace(&mut self.buffer, Vec::with_capacity(self.threshold));
        self.flushed += batch.len();
        tracing::debug!(size = batch.len(), total = self.flushed, "Batch ready");
        batch
    }
}
