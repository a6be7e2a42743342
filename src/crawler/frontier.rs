//! The crawl frontier
//!
//! A FIFO queue of not-yet-fetched `(url, depth)` pairs, in-memory only.
//! Deduplication happens against the visited store at dequeue time, so the
//! queue itself may hold duplicates.

use std::collections::VecDeque;
use url::Url;

/// A queued URL with its discovery depth
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    pub url: Url,
    pub depth: u32,
}

/// FIFO frontier driving one domain's crawl
#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<FrontierEntry>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the frontier with a start URL at depth 0
    pub fn seed(start_url: Url) -> Self {
        let mut frontier = Self::new();
        frontier.push(start_url, 0);
        frontier
    }

    pub fn push(&mut self, url: Url, depth: u32) {
        self.queue.push_back(FrontierEntry { url, depth });
    }

    /// Dequeues up to `n` entries for the next fetch batch
    pub fn take_batch(&mut self, n: usize) -> Vec<FrontierEntry> {
        let count = n.min(self.queue.len());
        self.queue.drain(..count).collect()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
