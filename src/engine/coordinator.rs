// src/engine/coordinator.rs

use std::fmt;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::timeout;
use tracing::{debug, info};

use crate::changes::ChangeSource;

use super::pipeline::Pipeline;
use super::report::Reporter;
use super::{CoordinatorState, WatchEvent};

/// Re-runs the pipeline whenever the workspace changes.
///
/// - One pass runs at startup.
/// - The first event after a pass opens a quiet window; every further event
///   restarts it. When the window elapses, exactly one pass runs.
/// - Passes run on this task, so two passes never overlap. Events arriving
///   mid-pass wait in the channel and open the next window.
/// - A `created` event invalidates the cached workspace config, so projects
///   added mid-session are picked up by the next pass.
pub struct WatchCoordinator<C: ChangeSource, R: Reporter> {
    pipeline: Pipeline<C>,
    reporter: R,
    debounce: Duration,
    event_rx: mpsc::Receiver<WatchEvent>,
    state: CoordinatorState,
    passes: usize,
}

impl<C: ChangeSource, R: Reporter> fmt::Debug for WatchCoordinator<C, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WatchCoordinator")
            .field("debounce", &self.debounce)
            .field("state", &self.state)
            .field("passes", &self.passes)
            .finish_non_exhaustive()
    }
}

impl<C: ChangeSource, R: Reporter> WatchCoordinator<C, R> {
    pub fn new(
        pipeline: Pipeline<C>,
        reporter: R,
        debounce: Duration,
        event_rx: mpsc::Receiver<WatchEvent>,
    ) -> Self {
        Self {
            pipeline,
            reporter,
            debounce,
            event_rx,
            state: CoordinatorState::Idle,
            passes: 0,
        }
    }

    /// Main loop. Returns after `ShutdownRequested` or when every event
    /// sender is gone. Returns the number of passes run.
    pub async fn run(mut self) -> usize {
        info!(debounce_ms = self.debounce.as_millis() as u64, "watch mode started");
        self.run_pass().await;

        loop {
            self.state = CoordinatorState::Idle;
            let Some(event) = self.event_rx.recv().await else {
                info!("watch event channel closed; exiting");
                break;
            };
            if !self.absorb(event) {
                break;
            }

            self.state = CoordinatorState::Debouncing;
            if !self.wait_for_quiet().await {
                break;
            }

            self.run_pass().await;
        }

        info!(passes = self.passes, "watch mode stopped");
        self.passes
    }

    /// Swallow events until the debounce window passes without one.
    ///
    /// Returns `false` if the loop should stop instead.
    async fn wait_for_quiet(&mut self) -> bool {
        loop {
            match timeout(self.debounce, self.event_rx.recv()).await {
                Err(_elapsed) => return true,
                Ok(Some(event)) => {
                    if !self.absorb(event) {
                        return false;
                    }
                }
                Ok(None) => {
                    info!("watch event channel closed while debouncing; exiting");
                    return false;
                }
            }
        }
    }

    /// Apply an event's side effects. Returns `false` on shutdown.
    fn absorb(&mut self, event: WatchEvent) -> bool {
        match event {
            WatchEvent::FileChanged { path, created } => {
                debug!(%path, created, state = ?self.state, "file change noted");
                if created {
                    self.pipeline.workspace().invalidate();
                }
                true
            }
            WatchEvent::ShutdownRequested => {
                info!("shutdown requested");
                false
            }
        }
    }

    async fn run_pass(&mut self) {
        self.state = CoordinatorState::Running;
        self.passes += 1;
        info!(pass = self.passes, "starting pass");

        let outcome = self.pipeline.run_pass().await;
        self.reporter.report(&outcome);
    }
}
