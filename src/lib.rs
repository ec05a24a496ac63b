//! Aim Arena - an aim-training arcade game
//!
//! Core modules:
//! - `engine`: game mode state machine, target lifecycle, scoring
//! - `settings`: per-mode tunable profiles with a persisted store
//! - `history`: append-only per-mode result time series
//! - `graph`: summary graph data preparation
//! - `platform`: render/input adapter seam

pub mod engine;
pub mod graph;
pub mod history;
pub mod platform;
pub mod settings;

pub use engine::{Command, Game, InputEvent, Key, ModeId};
pub use history::History;
pub use settings::{SettingKey, SettingsStore};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (logical pixels)
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Host frame pacing target
    pub const TARGET_FPS: u32 = 144;

    /// Challenge round length
    pub const CHALLENGE_TIME_MS: u64 = 30_000;

    /// Placement search bound before giving up on a free spot
    pub const PLACEMENT_ATTEMPTS: u32 = 200;

    /// Where a target lands when the placement search is exhausted
    pub const FALLBACK_X: f32 = 100.0;
    pub const FALLBACK_Y: f32 = 100.0;

    /// Appearance palette (r, g, b)
    pub const BACKGROUND_COLOR: [u8; 3] = [222, 222, 222];
    pub const OUTLINE_COLOR: [u8; 3] = [0, 0, 0];
    pub const FILLING_COLOR: [u8; 3] = [255, 255, 255];
    pub const SCORE_COLOR: [u8; 3] = [74, 74, 74];
}

/// Playfield bounds as a vector
#[inline]
pub fn screen_bounds() -> Vec2 {
    Vec2::new(consts::SCREEN_WIDTH, consts::SCREEN_HEIGHT)
}
