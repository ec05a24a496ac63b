//! Round scoring and telemetry
//!
//! One counter per round. Clicks, hits, and resolved targets feed running
//! totals; consecutive hits feed reaction-time samples. Time is the engine's
//! millisecond clock, never the wall clock, so rounds replay deterministically.

/// Running counters for a single round
#[derive(Debug, Clone)]
pub struct ScoreCounter {
    hits: u32,
    shots_fired: u32,
    targets_resolved: u32,
    round_start_ms: u64,
    round_end_ms: Option<u64>,
    last_hit_ms: Option<u64>,
    reaction_samples: Vec<u64>,
}

impl ScoreCounter {
    pub fn new(now_ms: u64) -> Self {
        Self {
            hits: 0,
            shots_fired: 0,
            targets_resolved: 0,
            round_start_ms: now_ms,
            round_end_ms: None,
            last_hit_ms: None,
            reaction_samples: Vec::new(),
        }
    }

    /// One click fired, hit or miss
    pub fn record_shot(&mut self) {
        self.shots_fired += 1;
    }

    /// A click landed. The first hit of a round has no predecessor and
    /// contributes no reaction sample.
    pub fn record_hit(&mut self, now_ms: u64) {
        self.hits += 1;
        if let Some(last) = self.last_hit_ms {
            self.reaction_samples.push(now_ms.saturating_sub(last));
        }
        self.last_hit_ms = Some(now_ms);
    }

    /// A target left the playfield, by hit or by natural expiration
    pub fn record_target_resolved(&mut self) {
        self.targets_resolved += 1;
    }

    /// Latch the round end. Idempotent; later freezes keep the first end.
    pub fn freeze(&mut self, now_ms: u64) {
        if self.round_end_ms.is_none() {
            self.round_end_ms = Some(now_ms);
        }
    }

    pub fn hits(&self) -> u32 {
        self.hits
    }

    pub fn shots_fired(&self) -> u32 {
        self.shots_fired
    }

    pub fn targets_resolved(&self) -> u32 {
        self.targets_resolved
    }

    /// Hit percentage; exactly 0.0 before the first shot, never NaN
    pub fn accuracy(&self) -> f64 {
        if self.shots_fired == 0 {
            0.0
        } else {
            f64::from(self.hits) * 100.0 / f64::from(self.shots_fired)
        }
    }

    /// Seconds from round start to the latched end, or to `now_ms` while
    /// the round is still running. A frozen counter stops advancing.
    pub fn elapsed_seconds(&self, now_ms: u64) -> f64 {
        let end = self.round_end_ms.unwrap_or(now_ms);
        end.saturating_sub(self.round_start_ms) as f64 / 1000.0
    }

    /// Median of the reaction samples in milliseconds; 0 when empty.
    /// Even sample counts average the two middle values.
    pub fn median_reaction_ms(&self) -> f64 {
        if self.reaction_samples.is_empty() {
            return 0.0;
        }
        let mut sorted = self.reaction_samples.clone();
        sorted.sort_unstable();
        let mid = sorted.len() / 2;
        if sorted.len() % 2 == 1 {
            sorted[mid] as f64
        } else {
            (sorted[mid - 1] + sorted[mid]) as f64 / 2.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accuracy_zero_shots_is_zero() {
        let counter = ScoreCounter::new(0);
        assert_eq!(counter.accuracy(), 0.0);
    }

    #[test]
    fn test_accuracy_ratio() {
        let mut counter = ScoreCounter::new(0);
        counter.record_shot();
        counter.record_shot();
        counter.record_shot();
        counter.record_hit(100);
        assert!((counter.accuracy() - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_miss_only_round() {
        let mut counter = ScoreCounter::new(0);
        counter.record_shot();
        assert_eq!(counter.hits(), 0);
        assert_eq!(counter.accuracy(), 0.0);
    }

    #[test]
    fn test_first_hit_has_no_reaction_sample() {
        let mut counter = ScoreCounter::new(0);
        counter.record_hit(500);
        assert_eq!(counter.median_reaction_ms(), 0.0);
    }

    #[test]
    fn test_reaction_samples_are_inter_hit_deltas() {
        let mut counter = ScoreCounter::new(0);
        counter.record_hit(1000);
        counter.record_hit(1100);
        counter.record_hit(1400);
        // samples: [100, 300]
        assert_eq!(counter.median_reaction_ms(), 200.0);
    }

    #[test]
    fn test_median_cases() {
        let mut counter = ScoreCounter::new(0);
        assert_eq!(counter.median_reaction_ms(), 0.0);

        counter.record_hit(0);
        counter.record_hit(100);
        assert_eq!(counter.median_reaction_ms(), 100.0);

        // append 300 then 50: samples [100, 300, 50], median 100
        counter.record_hit(400);
        counter.record_hit(450);
        assert_eq!(counter.median_reaction_ms(), 100.0);
    }

    #[test]
    fn test_elapsed_latches_on_freeze() {
        let mut counter = ScoreCounter::new(2_000);
        assert_eq!(counter.elapsed_seconds(5_000), 3.0);

        counter.freeze(7_000);
        assert_eq!(counter.elapsed_seconds(9_000), 5.0);

        // freezing again must not advance the clock
        counter.freeze(30_000);
        assert_eq!(counter.elapsed_seconds(60_000), 5.0);
    }
}
