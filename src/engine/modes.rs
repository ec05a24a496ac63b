//! Mode variants and their per-frame state
//!
//! Each top-level game state is a variant of [`Mode`]; the three shooting
//! modes share a [`Round`] plus a [`SpawnPolicy`] and differ only in their
//! profile-derived target configuration. Transitioning discards a variant's
//! mutable state except what [`super::game::Game`] explicitly exports (the
//! frozen counter and the "play again" mode id).

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::round::Round;
use super::score::ScoreCounter;
use super::target::TargetConfig;
use crate::history::History;
use crate::settings::{ModeProfile, SettingKey};

/// Identity of every top-level game state
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ModeId {
    Lobby,
    Arcade,
    SpeedyFingers,
    Awp,
    Settings,
    Summary,
}

impl ModeId {
    /// The modes that run a shooting round
    pub const SHOOTING: [ModeId; 3] = [ModeId::Arcade, ModeId::SpeedyFingers, ModeId::Awp];

    /// Stable name used for settings profiles and history keys
    pub fn name(&self) -> &'static str {
        match self {
            ModeId::Lobby => "Lobby",
            ModeId::Arcade => "Arcade",
            ModeId::SpeedyFingers => "SpeedyFingers",
            ModeId::Awp => "AWP",
            ModeId::Settings => "Settings",
            ModeId::Summary => "Summary",
        }
    }

    pub fn is_shooting(&self) -> bool {
        Self::SHOOTING.contains(self)
    }
}

/// How a shooting mode keeps targets coming
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnPolicy {
    /// Recurring spawn timer (Arcade)
    Timed { interval_ms: u64 },
    /// Fixed live-target count, re-filled after every removal
    /// (SpeedyFingers, AWP)
    Maintain { count: usize },
}

/// A running shooting session
#[derive(Debug)]
pub struct ShootingMode {
    pub id: ModeId,
    pub config: TargetConfig,
    pub policy: SpawnPolicy,
    pub round: Round,
    rng: Pcg32,
}

impl ShootingMode {
    /// Build a session from the mode's settings profile. Grow/duration
    /// matter only to modes whose profile declares them; the rest run
    /// static full-size targets.
    pub fn new(id: ModeId, profile: &ModeProfile, now_ms: u64, seed: u64) -> Self {
        debug_assert!(id.is_shooting());
        let config = TargetConfig {
            max_radius: profile.get(SettingKey::MaxRadius).unwrap_or(50.0) as f32,
            outline_margin: profile.get(SettingKey::OutlineMargin).unwrap_or(0.0) as f32,
            grows: profile.get(SettingKey::Grow).unwrap_or(0.0) != 0.0,
            grow_duration_ms: profile.get(SettingKey::Duration).unwrap_or(2.0) as f32 * 1000.0,
        };
        let policy = match id {
            ModeId::Arcade => SpawnPolicy::Timed {
                interval_ms: (1000.0 / profile.get(SettingKey::SpawnRate).unwrap_or(2.0)) as u64,
            },
            ModeId::SpeedyFingers => SpawnPolicy::Maintain {
                count: profile.get(SettingKey::TargetsAmount).unwrap_or(5.0) as usize,
            },
            // One slow, tiny target at a time
            _ => SpawnPolicy::Maintain { count: 1 },
        };
        Self {
            id,
            config,
            policy,
            round: Round::new(now_ms),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Place one target now (spawn-timer tick, or session start)
    pub fn spawn_target(&mut self, bounds: Vec2) {
        let config = self.config;
        self.round.spawn_target(&config, bounds, &mut self.rng);
    }

    /// Top the collection back up to the maintained count. No-op for
    /// timer-driven modes.
    pub fn refill(&mut self, bounds: Vec2) {
        if let SpawnPolicy::Maintain { count } = self.policy {
            while self.round.targets.len() < count {
                self.spawn_target(bounds);
            }
        }
    }
}

/// Settings screen state: which mode's profile is being edited
#[derive(Debug)]
pub struct SettingsMenu {
    pub tab: ModeId,
}

impl SettingsMenu {
    pub fn new() -> Self {
        Self {
            tab: ModeId::Arcade,
        }
    }
}

impl Default for SettingsMenu {
    fn default() -> Self {
        Self::new()
    }
}

/// Summary screen: the finished round's frozen counter plus the metric
/// series currently graphed
#[derive(Debug)]
pub struct SummaryScreen {
    pub score: ScoreCounter,
    /// Mode that produced the round; "play again" returns here
    pub previous: ModeId,
    metrics: Vec<String>,
    selected: usize,
    pub series: Vec<(u64, f64)>,
}

impl SummaryScreen {
    pub fn new(score: ScoreCounter, previous: ModeId, history: &History) -> Self {
        let metrics: Vec<String> = history.available_metrics(previous.name()).into_iter().collect();
        let series = metrics
            .first()
            .map(|m| history.select_series(previous.name(), m))
            .unwrap_or_default();
        Self {
            score,
            previous,
            metrics,
            selected: 0,
            series,
        }
    }

    /// Metric currently graphed, if the mode has any history at all
    pub fn selected_metric(&self) -> Option<&str> {
        self.metrics.get(self.selected).map(String::as_str)
    }

    /// Advance to the next available metric, wrapping past the end
    pub fn cycle_metric(&mut self, history: &History) {
        if self.metrics.is_empty() {
            return;
        }
        self.selected = (self.selected + 1) % self.metrics.len();
        self.series = history.select_series(self.previous.name(), &self.metrics[self.selected]);
    }
}

/// Active top-level game state
#[derive(Debug)]
pub enum Mode {
    Lobby,
    Settings(SettingsMenu),
    Shooting(ShootingMode),
    Summary(SummaryScreen),
}

impl Mode {
    pub fn id(&self) -> ModeId {
        match self {
            Mode::Lobby => ModeId::Lobby,
            Mode::Settings(_) => ModeId::Settings,
            Mode::Shooting(m) => m.id,
            Mode::Summary(_) => ModeId::Summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::History;

    fn bounds() -> Vec2 {
        Vec2::new(800.0, 600.0)
    }

    #[test]
    fn test_arcade_profile_maps_to_timed_policy() {
        let profile = ModeProfile::defaults(ModeId::Arcade);
        let mode = ShootingMode::new(ModeId::Arcade, &profile, 0, 1);

        assert_eq!(mode.policy, SpawnPolicy::Timed { interval_ms: 333 });
        assert!(mode.config.grows);
        assert_eq!(mode.config.grow_duration_ms, 2000.0);
        assert_eq!(mode.config.max_radius, 50.0);
    }

    #[test]
    fn test_speedy_fingers_prepopulates_count() {
        let profile = ModeProfile::defaults(ModeId::SpeedyFingers);
        let mut mode = ShootingMode::new(ModeId::SpeedyFingers, &profile, 0, 1);
        mode.refill(bounds());

        assert_eq!(mode.round.targets.len(), 5);
        // static targets, full size from the first frame
        assert!(mode.round.targets.iter().all(|t| t.current_radius == 50.0));

        // none overlapping (800x600 holds five 100px squares comfortably)
        let rects = mode.round.occupied_rects();
        for (i, a) in rects.iter().enumerate() {
            for b in rects.iter().skip(i + 1) {
                assert!(!a.overlaps(b));
            }
        }
    }

    #[test]
    fn test_refill_restores_maintained_count() {
        let profile = ModeProfile::defaults(ModeId::Awp);
        let mut mode = ShootingMode::new(ModeId::Awp, &profile, 0, 1);
        mode.refill(bounds());
        assert_eq!(mode.round.targets.len(), 1);

        let center = mode.round.targets[0].position;
        assert!(mode.round.click(center, 100));
        mode.round.apply_removals();
        mode.refill(bounds());

        assert_eq!(mode.round.targets.len(), 1);
        assert_eq!(mode.round.score.hits(), 1);
    }

    #[test]
    fn test_summary_cycles_metrics_with_wraparound() {
        let mut history = History::ephemeral();
        let metrics: crate::history::RoundMetrics = [
            ("Accuracy".to_string(), 90.0),
            ("Hits".to_string(), 9.0),
        ]
        .into_iter()
        .collect();
        history.append("Arcade", 100, metrics);

        let score = ScoreCounter::new(0);
        let mut summary = SummaryScreen::new(score, ModeId::Arcade, &history);

        assert_eq!(summary.selected_metric(), Some("Accuracy"));
        summary.cycle_metric(&history);
        assert_eq!(summary.selected_metric(), Some("Hits"));
        assert_eq!(summary.series, vec![(100, 9.0)]);
        summary.cycle_metric(&history);
        assert_eq!(summary.selected_metric(), Some("Accuracy"));
    }

    #[test]
    fn test_summary_with_no_history_has_no_series() {
        let history = History::ephemeral();
        let mut summary = SummaryScreen::new(ScoreCounter::new(0), ModeId::Awp, &history);

        assert_eq!(summary.selected_metric(), None);
        summary.cycle_metric(&history); // must not panic
        assert!(summary.series.is_empty());
    }
}
