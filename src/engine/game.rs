//! Game mode state machine
//!
//! Owns the active [`Mode`], the timer queue, the settings and history
//! stores, and the engine clock. The host loop feeds it one frame at a time:
//! drained input events first, then due timer events, then the animation
//! pass with end-of-frame removal. Mode transitions cancel every pending
//! timer before arming the next mode's, so stale spawn ticks cannot leak
//! across modes.

use glam::Vec2;
use std::time::{SystemTime, UNIX_EPOCH};

use super::modes::{Mode, ModeId, SettingsMenu, ShootingMode, SpawnPolicy, SummaryScreen};
use super::score::ScoreCounter;
use super::target::Rect;
use super::timers::{Scheduler, TimerKind};
use super::{Command, InputEvent, Key};
use crate::consts::{
    CHALLENGE_TIME_MS, FILLING_COLOR, OUTLINE_COLOR, SCORE_COLOR, TARGET_FPS,
};
use crate::history::{History, RoundMetrics};
use crate::platform::Frontend;
use crate::settings::SettingsStore;
use crate::{graph, screen_bounds};

/// Where the summary screen plots the metric graph
const GRAPH_FRAME: (Vec2, Vec2) = (Vec2::new(150.0, 150.0), Vec2::new(650.0, 450.0));

/// The engine: mode state machine plus everything modes share
pub struct Game {
    pub mode: Mode,
    pub settings: SettingsStore,
    pub history: History,
    /// Engine clock, milliseconds since construction
    pub now_ms: u64,
    pub challenge_enabled: bool,
    scheduler: Scheduler,
    bounds: Vec2,
    seed: u64,
    rounds_started: u64,
    quit: bool,
}

impl Game {
    pub fn new(settings: SettingsStore, history: History, seed: u64) -> Self {
        Self {
            mode: Mode::Lobby,
            settings,
            history,
            now_ms: 0,
            challenge_enabled: false,
            scheduler: Scheduler::new(),
            bounds: screen_bounds(),
            seed,
            rounds_started: 0,
            quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// One host-loop pass: pace, drain, update, draw
    pub fn run_frame(&mut self, frontend: &mut dyn Frontend) {
        let dt_ms = frontend.tick(TARGET_FPS);
        let events = frontend.poll_events();
        self.frame(dt_ms, events);
        self.draw(frontend);
    }

    /// Advance the engine by `dt_ms`, consuming this frame's input
    pub fn frame(&mut self, dt_ms: u64, events: Vec<InputEvent>) {
        self.now_ms += dt_ms;

        for event in events {
            self.handle_input(event);
        }
        for timer in self.scheduler.drain_due(self.now_ms) {
            self.handle_timer(timer);
        }

        if let Mode::Shooting(mode) = &mut self.mode {
            mode.round.advance(dt_ms as f32);
            mode.round.apply_removals();
            mode.refill(self.bounds);
        }
    }

    fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::Click(pos) => {
                if let Mode::Shooting(mode) = &mut self.mode {
                    mode.round.click(pos, self.now_ms);
                }
            }
            InputEvent::KeyPress(Key::Escape) => {
                if matches!(self.mode, Mode::Shooting(_)) {
                    self.enter_mode(ModeId::Summary);
                }
            }
            InputEvent::Quit => self.quit = true,
        }
    }

    fn handle_timer(&mut self, timer: TimerKind) {
        match timer {
            TimerKind::SpawnTarget => match &mut self.mode {
                Mode::Shooting(mode) => mode.spawn_target(self.bounds),
                // Drained alongside a transition-triggering event this frame
                _ => log::debug!("dropping stale spawn tick"),
            },
            TimerKind::ChallengeOver => {
                if matches!(self.mode, Mode::Shooting(_)) {
                    log::info!("challenge time up");
                    self.enter_mode(ModeId::Summary);
                } else {
                    log::debug!("dropping stale challenge tick");
                }
            }
        }
    }

    /// Dispatch a widget-layer intent
    pub fn handle_command(&mut self, command: Command) {
        match command {
            Command::Play(id) => {
                if !id.is_shooting() {
                    panic!("Play({id:?}) is not a shooting mode");
                }
                self.enter_mode(id);
            }
            Command::OpenSettings => self.enter_mode(ModeId::Settings),
            Command::ToggleChallenge => {
                self.challenge_enabled = !self.challenge_enabled;
                log::info!("challenge mode {}", if self.challenge_enabled { "on" } else { "off" });
            }
            Command::PlayAgain => match &self.mode {
                Mode::Summary(summary) => {
                    let previous = summary.previous;
                    self.enter_mode(previous);
                }
                _ => panic!("PlayAgain outside Summary"),
            },
            Command::ReturnToLobby => self.enter_mode(ModeId::Lobby),
            Command::CycleMetric => match &mut self.mode {
                Mode::Summary(summary) => summary.cycle_metric(&self.history),
                _ => panic!("CycleMetric outside Summary"),
            },
            Command::SelectTab(id) => match &mut self.mode {
                Mode::Settings(menu) if id.is_shooting() => menu.tab = id,
                Mode::Settings(_) => panic!("SelectTab({id:?}) is not a shooting mode"),
                _ => panic!("SelectTab outside Settings"),
            },
            Command::Adjust { key, value } => match &self.mode {
                Mode::Settings(menu) => {
                    let tab = menu.tab;
                    if self.settings.change_setting(tab, key, value).is_none() {
                        log::warn!("{:?} declares no {:?}", tab, key);
                    }
                }
                _ => panic!("Adjust outside Settings"),
            },
            Command::Quit => self.quit = true,
        }
    }

    /// Transition to `id`: tear down the outgoing mode (cancel its timers,
    /// persist its results), then construct the new one.
    pub fn enter_mode(&mut self, id: ModeId) {
        log::info!("mode change {:?} -> {:?}", self.mode.id(), id);
        self.scheduler.cancel_all();

        let outgoing = std::mem::replace(&mut self.mode, Mode::Lobby);
        let finished = self.finish_round(outgoing);

        self.mode = match id {
            ModeId::Lobby => Mode::Lobby,
            ModeId::Settings => Mode::Settings(SettingsMenu::new()),
            ModeId::Arcade | ModeId::SpeedyFingers | ModeId::Awp => {
                Mode::Shooting(self.start_shooting(id))
            }
            ModeId::Summary => {
                // Reaching Summary without a finished round is a wiring bug
                let Some((previous, score)) = finished else {
                    panic!("Summary entered without a finished shooting round");
                };
                Mode::Summary(SummaryScreen::new(score, previous, &self.history))
            }
        };
    }

    /// Freeze and persist the outgoing shooting round, exporting its
    /// counter and mode id for a possible Summary screen.
    fn finish_round(&mut self, outgoing: Mode) -> Option<(ModeId, ScoreCounter)> {
        let Mode::Shooting(mut mode) = outgoing else {
            return None;
        };
        mode.round.score.freeze(self.now_ms);
        let score = mode.round.score.clone();
        if score.shots_fired() > 0 {
            self.history
                .append(mode.id.name(), unix_now(), round_metrics(&score, self.now_ms));
        } else {
            log::debug!("round with no shots, skipping history entry");
        }
        Some((mode.id, score))
    }

    fn start_shooting(&mut self, id: ModeId) -> ShootingMode {
        self.rounds_started += 1;
        let seed = self.seed.wrapping_add(self.rounds_started);
        let mut mode = ShootingMode::new(id, self.settings.profile(id), self.now_ms, seed);

        match mode.policy {
            SpawnPolicy::Timed { interval_ms } => {
                // One target up front, then the timer takes over
                mode.spawn_target(self.bounds);
                self.scheduler
                    .arm_recurring(TimerKind::SpawnTarget, self.now_ms, interval_ms);
            }
            SpawnPolicy::Maintain { .. } => mode.refill(self.bounds),
        }
        if self.challenge_enabled {
            self.scheduler
                .arm(TimerKind::ChallengeOver, self.now_ms + CHALLENGE_TIME_MS);
        }
        mode
    }

    /// Emit this frame's draw calls through the adapter
    pub fn draw(&self, frontend: &mut dyn Frontend) {
        match &self.mode {
            Mode::Shooting(mode) => {
                for target in &mode.round.targets {
                    frontend.draw_circle(
                        target.position,
                        target.current_radius + target.outline_margin,
                        OUTLINE_COLOR,
                        2.0,
                    );
                    frontend.draw_circle(target.position, target.current_radius, FILLING_COLOR, 0.0);
                }
                // crosshair ring follows the pointer
                let cursor = frontend.mouse_position();
                frontend.draw_circle(cursor, 3.0, SCORE_COLOR, 1.5);
            }
            Mode::Summary(summary) => {
                let frame = Rect::new(GRAPH_FRAME.0, GRAPH_FRAME.1);
                // axes
                frontend.draw_line(
                    Vec2::new(frame.min.x, frame.min.y),
                    Vec2::new(frame.min.x, frame.max.y),
                    OUTLINE_COLOR,
                    3.0,
                );
                frontend.draw_line(
                    Vec2::new(frame.min.x, frame.max.y),
                    Vec2::new(frame.max.x, frame.max.y),
                    OUTLINE_COLOR,
                    3.0,
                );
                for pair in graph::polyline(&summary.series, &frame).windows(2) {
                    frontend.draw_line(pair[0], pair[1], SCORE_COLOR, 2.0);
                }
            }
            // Lobby and Settings are widget-only screens; the frontend owns them
            Mode::Lobby | Mode::Settings(_) => {}
        }
    }
}

/// Metrics recorded to history for one finished round
fn round_metrics(score: &ScoreCounter, now_ms: u64) -> RoundMetrics {
    let mut metrics = RoundMetrics::new();
    metrics.insert("Hits".to_string(), f64::from(score.hits()));
    metrics.insert("Targets".to_string(), f64::from(score.targets_resolved()));
    metrics.insert("Accuracy".to_string(), score.accuracy());
    metrics.insert("Time".to_string(), score.elapsed_seconds(now_ms));
    metrics.insert(
        "Median reaction time".to_string(),
        score.median_reaction_ms(),
    );
    metrics
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
