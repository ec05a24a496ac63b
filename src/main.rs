//! Aim Arena entry point
//!
//! A windowed frontend is wired in through [`aim_arena::platform::Frontend`];
//! this binary runs a short headless exhibition round against the scripted
//! adapter and prints the resulting summary, exercising the whole engine
//! without a display.

use std::path::PathBuf;

use aim_arena::engine::{Mode, SummaryScreen};
use aim_arena::platform::ScriptedFrontend;
use aim_arena::{Command, Game, History, InputEvent, Key, ModeId, SettingsStore};

/// Persisted stores live next to each other in the home directory
fn data_path(file: &str) -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(file)
}

fn main() {
    env_logger::init();

    let settings = SettingsStore::load(&data_path("aim-arena.settings"));
    let history = History::load(&data_path("aim-arena.stats"));
    let mut game = Game::new(settings, history, rand::random());

    log::info!("starting exhibition round");
    game.handle_command(Command::Play(ModeId::SpeedyFingers));

    // ~144 Hz frames for five simulated seconds; twice a second the script
    // clicks the oldest live target dead-center
    let mut frontend = ScriptedFrontend::new(7);
    let mut frame_index: u64 = 0;
    while game.now_ms < 5_000 && !game.should_quit() {
        let mut events = Vec::new();
        if frame_index % 72 == 0 {
            if let Mode::Shooting(mode) = &game.mode {
                if let Some(target) = mode.round.targets.first() {
                    events.push(InputEvent::Click(target.position));
                }
            }
        }
        frontend.push_frame(events);
        game.run_frame(&mut frontend);
        frame_index += 1;
    }

    game.frame(0, vec![InputEvent::KeyPress(Key::Escape)]);
    match &game.mode {
        Mode::Summary(summary) => print_summary(summary, game.now_ms),
        _ => log::error!("exhibition round did not reach the summary"),
    }
}

fn print_summary(summary: &SummaryScreen, now_ms: u64) {
    println!(
        "Hits: {}/{}",
        summary.score.hits(),
        summary.score.targets_resolved()
    );
    println!("Accuracy: {:.1}%", summary.score.accuracy());
    println!("Time: {:.1} s", summary.score.elapsed_seconds(now_ms));
    println!(
        "M. response: {} msec",
        summary.score.median_reaction_ms() as i64
    );
    if let Some(metric) = summary.selected_metric() {
        println!("History: {} rounds of {metric} recorded", summary.series.len());
    }
}
