//! Game loop thread: runs the simulation engine at its fixed frame rate.
//!
//! The engine is moved into the thread. Commands arrive via `mpsc` channel.
//! Every pilot event is logged through `tracing`, and the thread returns a
//! [`RunSummary`] when the run ends.

use std::collections::BTreeMap;
use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, info};

use flightdeck_core::events::{PilotEvent, PilotEventKind};
use flightdeck_sim::{FrameReport, SimulationEngine};

/// Commands sent to the game loop thread.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoopCommand {
    /// Change wall-clock pacing. Ignored when the loop is unpaced.
    SetTimeScale(f64),
    /// Stop after the current frame.
    Shutdown,
}

/// How long and how fast to run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopOptions {
    /// Simulated seconds to run.
    pub duration_secs: f64,
    /// Sleep between frames to track wall-clock time.
    pub realtime: bool,
    pub time_scale: f64,
}

impl Default for LoopOptions {
    fn default() -> Self {
        Self {
            duration_secs: 60.0,
            realtime: false,
            time_scale: 1.0,
        }
    }
}

/// Totals for one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunSummary {
    pub frames: u64,
    pub elapsed_secs: f64,
    pub shots_fired: u64,
    /// Pilot event counts keyed by event name.
    pub events: BTreeMap<String, u64>,
}

impl RunSummary {
    pub fn record(&mut self, report: &FrameReport) {
        self.frames = report.time.frame;
        self.elapsed_secs = report.time.elapsed_secs;
        self.shots_fired += u64::from(report.shots_fired);
        for event in &report.events {
            *self.events.entry(event.kind.name().to_string()).or_default() += 1;
        }
    }
}

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and the handle yielding the run summary.
pub fn spawn_game_loop(
    engine: SimulationEngine,
    options: LoopOptions,
) -> std::io::Result<(mpsc::Sender<LoopCommand>, JoinHandle<RunSummary>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<LoopCommand>();

    let handle = std::thread::Builder::new()
        .name("flightdeck-game-loop".into())
        .spawn(move || run_game_loop(engine, options, &cmd_rx))?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until the duration elapses, a Shutdown command
/// arrives or the channel disconnects.
pub fn run_game_loop(
    mut engine: SimulationEngine,
    options: LoopOptions,
    cmd_rx: &mpsc::Receiver<LoopCommand>,
) -> RunSummary {
    let frame_duration = Duration::from_secs_f64(engine.config().dt());
    let total_frames = (options.duration_secs * f64::from(engine.config().frame_rate)).round() as u64;
    let mut time_scale = options.time_scale;
    let mut summary = RunSummary::default();
    let mut next_tick_time = Instant::now();

    info!(
        frames = total_frames,
        realtime = options.realtime,
        "game loop started"
    );

    for _ in 0..total_frames {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(LoopCommand::SetTimeScale(scale)) => {
                    debug!(scale, "time scale changed");
                    time_scale = scale;
                }
                Ok(LoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    info!(frame = summary.frames, "game loop stopped early");
                    return summary;
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // 2. Advance one frame
        let report = engine.tick();
        for event in &report.events {
            log_event(report.time.elapsed_secs, event);
        }
        summary.record(&report);

        // 3. Sleep until next frame
        if options.realtime {
            let effective = if time_scale > 0.001 {
                frame_duration.div_f64(time_scale)
            } else {
                frame_duration
            };
            next_tick_time += effective;
            let now = Instant::now();
            if next_tick_time > now {
                std::thread::sleep(next_tick_time - now);
            } else if now - next_tick_time > effective * 2 {
                // Too far behind, reset to avoid catch-up spiral
                next_tick_time = now;
            }
        }
    }

    info!(
        frames = summary.frames,
        shots = summary.shots_fired,
        "game loop finished"
    );
    summary
}

fn log_event(time: f64, event: &PilotEvent) {
    let ship = event.ship;
    match &event.kind {
        PilotEventKind::PhaseChanged { from, to } => {
            debug!(time, %ship, ?from, ?to, "phase changed");
        }
        PilotEventKind::Fleeing { threat, distance } => {
            info!(time, %ship, %threat, distance, "fleeing");
        }
        PilotEventKind::ReturningForRepair { station } => {
            info!(time, %ship, %station, "returning for repair");
        }
        kind => {
            info!(time, %ship, event = ?kind, "{}", kind.name());
        }
    }
}
