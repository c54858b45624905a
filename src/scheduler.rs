//! Time-sliced batch highlighting
//!
//! Large pages carry many code blocks. The scheduler works through them
//! in slices bounded by the configured budget so a caller can interleave
//! other work (progress output, event handling) between slices.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::highlighter::{HighlightOutput, HighlightRequest, Highlighter};

/// Result of one slice of work
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliceOutcome {
    /// Budget exhausted with requests still queued
    Yielded { remaining: usize },
    /// Queue drained
    Finished,
}

/// Queue of requests processed against one highlighter
pub struct BatchScheduler<'a> {
    highlighter: &'a Highlighter,
    queue: VecDeque<HighlightRequest>,
    results: Vec<HighlightOutput>,
    budget: Duration,
}

impl<'a> BatchScheduler<'a> {
    pub fn new(highlighter: &'a Highlighter, requests: impl IntoIterator<Item = HighlightRequest>) -> Self {
        let queue: VecDeque<_> = requests.into_iter().collect();
        Self {
            highlighter,
            results: Vec::with_capacity(queue.len()),
            queue,
            budget: highlighter.config().slice_budget,
        }
    }

    /// Builder: override the configured slice budget
    pub fn with_budget(mut self, budget: Duration) -> Self {
        self.budget = budget;
        self
    }

    /// Requests not yet processed
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    /// Outputs so far, in request order
    pub fn results(&self) -> &[HighlightOutput] {
        &self.results
    }

    pub fn into_results(self) -> Vec<HighlightOutput> {
        self.results
    }

    /// Process requests until the queue is empty or the budget is spent
    ///
    /// At least one request is processed per call, however small the
    /// budget.
    pub fn run_slice(&mut self) -> SliceOutcome {
        let start = Instant::now();
        while let Some(request) = self.queue.pop_front() {
            let output = self.highlighter.highlight(&request);
            self.results.push(output);

            if !self.queue.is_empty() && start.elapsed() >= self.budget {
                let remaining = self.queue.len();
                tracing::debug!(remaining, elapsed = ?start.elapsed(), "slice budget spent, yielding");
                return SliceOutcome::Yielded { remaining };
            }
        }
        SliceOutcome::Finished
    }

    /// Run slices until done, calling `on_yield` with the number of
    /// requests left between slices
    pub fn run_to_completion(mut self, mut on_yield: impl FnMut(usize)) -> Vec<HighlightOutput> {
        while let SliceOutcome::Yielded { remaining } = self.run_slice() {
            on_yield(remaining);
        }
        self.results
    }
}
