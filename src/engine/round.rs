//! A live shooting round: target collection, click handling, removal
//!
//! Removal is two-phase. Clicks and expirations only mark a target's id as
//! doomed; the collection itself shrinks once at end of frame, so iteration
//! never races its own mutation. Marking an id twice (double-click race, or
//! a click landing on a target that expired the same frame) is a no-op.

use glam::Vec2;
use rand_pcg::Pcg32;

use super::score::ScoreCounter;
use super::target::{Rect, Target, TargetConfig, TargetPhase};

/// Targets and score for one shooting session
#[derive(Debug)]
pub struct Round {
    pub targets: Vec<Target>,
    pub score: ScoreCounter,
    doomed: Vec<u32>,
    next_id: u32,
}

impl Round {
    pub fn new(now_ms: u64) -> Self {
        Self {
            targets: Vec::new(),
            score: ScoreCounter::new(now_ms),
            doomed: Vec::new(),
            next_id: 1,
        }
    }

    /// Reserved footprints of every target still in the collection,
    /// doomed-but-not-yet-removed ones included
    pub fn occupied_rects(&self) -> Vec<Rect> {
        self.targets.iter().map(Target::occupied_rect).collect()
    }

    /// Place one new target avoiding all current reservations
    pub fn spawn_target(&mut self, config: &TargetConfig, bounds: Vec2, rng: &mut Pcg32) {
        let occupied = self.occupied_rects();
        let id = self.next_id;
        self.next_id += 1;
        self.targets
            .push(Target::spawn(id, config, &occupied, bounds, rng));
    }

    /// Handle one click at `pos`. The shot always counts; targets are tested
    /// in stored order and the first match takes the hit, so overlapping
    /// targets resolve deterministically and one click never credits twice.
    pub fn click(&mut self, pos: Vec2, now_ms: u64) -> bool {
        self.score.record_shot();
        for target in &self.targets {
            if self.doomed.contains(&target.id) {
                continue;
            }
            if target.hit_test(pos) {
                self.score.record_hit(now_ms);
                self.score.record_target_resolved();
                self.doomed.push(target.id);
                return true;
            }
        }
        false
    }

    /// Advance every live target's animation; expired ones are marked for
    /// removal and counted as resolved without a hit.
    pub fn advance(&mut self, elapsed_ms: f32) {
        for target in &mut self.targets {
            if self.doomed.contains(&target.id) {
                continue;
            }
            if target.update(elapsed_ms) == TargetPhase::Expired {
                self.doomed.push(target.id);
                self.score.record_target_resolved();
            }
        }
    }

    /// End-of-frame removal pass
    pub fn apply_removals(&mut self) {
        if self.doomed.is_empty() {
            return;
        }
        let doomed = std::mem::take(&mut self.doomed);
        self.targets.retain(|t| !doomed.contains(&t.id));
    }

    /// Targets not marked for removal
    pub fn live_count(&self) -> usize {
        self.targets
            .iter()
            .filter(|t| !self.doomed.contains(&t.id))
            .count()
    }
}
