//! Game engine
//!
//! Everything that must behave deterministically lives here: the mode state
//! machine, target lifecycle, round scoring, and timer queue. No rendering
//! or platform dependencies; the engine consumes [`InputEvent`]s and
//! [`Command`]s and emits draw calls through the platform seam.

pub mod game;
pub mod modes;
pub mod round;
pub mod score;
pub mod target;
pub mod timers;

pub use game::Game;
pub use modes::{Mode, ModeId, ShootingMode, SpawnPolicy, SummaryScreen};
pub use round::Round;
pub use score::ScoreCounter;
pub use target::{Rect, Target, TargetConfig, TargetPhase};
pub use timers::{Scheduler, TimerKind};

use glam::Vec2;

use crate::settings::SettingKey;

/// Keys the engine reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Ends a running round
    Escape,
}

/// Raw input delivered by the frontend, in arrival order
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Click(Vec2),
    KeyPress(Key),
    Quit,
}

/// UI intent, produced by the frontend's widget layer and dispatched by the
/// state machine. Keeping transitions here - instead of in per-button
/// callbacks - makes the mode state machine the single place they live.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Start a shooting mode from the lobby
    Play(ModeId),
    OpenSettings,
    ToggleChallenge,
    /// Summary: restart the mode that produced the shown round
    PlayAgain,
    ReturnToLobby,
    /// Summary: advance the graphed metric, wrapping around
    CycleMetric,
    /// Settings: switch the edited mode profile
    SelectTab(ModeId),
    /// Settings: clamp and write through one value
    Adjust { key: SettingKey, value: f64 },
    Quit,
}
