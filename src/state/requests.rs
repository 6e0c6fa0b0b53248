// Request generation tracking.
// Tags each issued request so that only the newest completion is applied.

/// Monotonic generation counter for one kind of request.
#[derive(Debug, Default, Clone)]
pub struct RequestSequence {
    latest: u64,
}

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new generation; every earlier one becomes stale.
    pub fn issue(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    /// Whether `generation` is the most recently issued one.
    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.latest
    }

    /// Make every outstanding generation stale without issuing a new request.
    pub fn invalidate(&mut self) {
        self.latest += 1;
    }
}
