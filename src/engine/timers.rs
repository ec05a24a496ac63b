//! Deferred timer events
//!
//! Spawn intervals and the challenge countdown are not threads: they are
//! self-posted events with a due time, drained into the same single-threaded
//! queue as user input. Changing modes cancels everything pending, so a late
//! spawn tick can never leak into the next mode's target collection.

/// What a timer delivers when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Recurring shooting-mode spawn tick
    SpawnTarget,
    /// One-shot challenge countdown; ends the round
    ChallengeOver,
}

#[derive(Debug, Clone)]
struct PendingTimer {
    kind: TimerKind,
    due_ms: u64,
    /// Re-arm interval; `None` for one-shots
    every_ms: Option<u64>,
}

/// Pending-timer queue for the active mode
#[derive(Debug, Default)]
pub struct Scheduler {
    pending: Vec<PendingTimer>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a one-shot timer
    pub fn arm(&mut self, kind: TimerKind, due_ms: u64) {
        self.pending.push(PendingTimer {
            kind,
            due_ms,
            every_ms: None,
        });
    }

    /// Arm a recurring timer; first fire at `now_ms + every_ms`
    pub fn arm_recurring(&mut self, kind: TimerKind, now_ms: u64, every_ms: u64) {
        let every_ms = every_ms.max(1);
        self.pending.push(PendingTimer {
            kind,
            due_ms: now_ms + every_ms,
            every_ms: Some(every_ms),
        });
    }

    /// Drop every pending timer. Called on each mode transition.
    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    /// Pop everything due at `now_ms` in due order. Recurring timers re-arm
    /// themselves; a long frame delivers each missed tick.
    pub fn drain_due(&mut self, now_ms: u64) -> Vec<TimerKind> {
        let mut due: Vec<(u64, TimerKind)> = Vec::new();
        for timer in &mut self.pending {
            while timer.due_ms <= now_ms {
                due.push((timer.due_ms, timer.kind));
                match timer.every_ms {
                    Some(every) => timer.due_ms += every,
                    None => break,
                }
            }
        }
        self.pending
            .retain(|t| t.every_ms.is_some() || t.due_ms > now_ms);

        due.sort_by_key(|(at, _)| *at);
        due.into_iter().map(|(_, kind)| kind).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
