#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeferredState {
    Pending,
    Fired,
    Cancelled,
}

/// One-shot action due at a fixed host time.
///
/// `poll` reports `true` exactly once, on the first call at or after the due
/// time. A cancelled action never fires.
#[derive(Clone, Debug)]
pub struct Deferred {
    due_at_ms: f64,
    state: DeferredState,
}

impl Deferred {
    pub fn new(now_ms: f64, delay_ms: f64) -> Self {
        Self {
            due_at_ms: now_ms + delay_ms.max(0.0),
            state: DeferredState::Pending,
        }
    }

    pub fn due_at_ms(&self) -> f64 {
        self.due_at_ms
    }

    pub fn state(&self) -> DeferredState {
        self.state
    }

    pub fn is_pending(&self) -> bool {
        self.state == DeferredState::Pending
    }

    pub fn poll(&mut self, now_ms: f64) -> bool {
        if self.state == DeferredState::Pending && now_ms >= self.due_at_ms {
            self.state = DeferredState::Fired;
            return true;
        }
        false
    }

    /// Returns `true` if the action was still pending
    pub fn cancel(&mut self) -> bool {
        if self.state == DeferredState::Pending {
            self.state = DeferredState::Cancelled;
            return true;
        }
        false
    }
}
