//! Session controller and fixed tick
//!
//! One call to [`Session::tick`] per displayed frame. Switch requests are
//! queued as they arrive and applied at the start of the next tick, so a tick
//! never observes a half-applied switch.

use std::collections::VecDeque;

use glam::{Quat, Vec3};

use super::collision::CollisionScorer;
use super::path::PathSet;
use super::state::{Follower, FollowerPhase, Marker, RunEvent, RunSummary, ScoreState};
use super::switch::{PathSwitcher, SwitchDirection, SwitchOutcome};
use crate::config::{ConfigError, PenaltyWeights, SessionConfig};

/// What the render driver reads back after a tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub position: Vec3,
    pub orientation: Quat,
    /// Present only on the tick a run completed
    pub final_score: Option<RunSummary>,
    pub events: Vec<RunEvent>,
}

/// One player's session: owns the follower, the cards and the tally
#[derive(Debug, Clone)]
pub struct Session {
    paths: PathSet,
    markers: Vec<Marker>,
    follower: Follower,
    score: ScoreState,
    switcher: PathSwitcher,
    scorer: CollisionScorer,
    penalties: PenaltyWeights,
    pending_switches: VecDeque<SwitchDirection>,
    /// Completed runs
    runs: u64,
    time_ticks: u64,
}

impl Session {
    pub fn new(config: &SessionConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let paths = config.build_paths();
        let markers = config.build_markers();
        let follower = Follower::new(&paths, config.start_path, config.speed, config.spin_speed);

        log::info!(
            "Session ready: {} paths, {} cards, speed {}",
            paths.len(),
            markers.len(),
            config.speed
        );

        Ok(Self {
            paths,
            markers,
            follower,
            score: ScoreState::default(),
            switcher: PathSwitcher::new(config.continuity_axis, config.continuity_samples),
            scorer: CollisionScorer::new(config.hit_window),
            penalties: config.penalties,
            pending_switches: VecDeque::new(),
            runs: 0,
            time_ticks: 0,
        })
    }

    /// Queue a switch; applied at the start of the next tick
    pub fn request_switch(&mut self, direction: SwitchDirection) {
        self.pending_switches.push_back(direction);
    }

    /// Advance the session by one tick
    pub fn tick(&mut self) -> TickReport {
        let mut events = Vec::new();
        self.time_ticks += 1;

        while let Some(direction) = self.pending_switches.pop_front() {
            events.push(self.apply_switch(direction));
        }

        let mut final_score = None;
        match self.follower.advance(&self.paths) {
            FollowerPhase::Traveling => {
                let shown = self
                    .scorer
                    .check_cards(&self.follower, &mut self.markers, &mut self.score);
                for id in shown {
                    if let Some(marker) = self.markers.iter().find(|m| m.id == id) {
                        log::debug!(
                            "Card {} ({:?}) shown on path {} at t={:.3}",
                            id,
                            marker.kind,
                            marker.path,
                            self.follower.progress
                        );
                        events.push(RunEvent::CardShown {
                            marker: id,
                            kind: marker.kind,
                        });
                    }
                }
            }
            FollowerPhase::Finished => {
                let summary = self.finish_run();
                events.push(RunEvent::RunComplete(summary));
                final_score = Some(summary);
            }
        }

        TickReport {
            position: self.follower.position,
            orientation: self.follower.orientation(),
            final_score,
            events,
        }
    }

    fn apply_switch(&mut self, direction: SwitchDirection) -> RunEvent {
        match self.switcher.apply(&mut self.follower, &self.paths, direction) {
            SwitchOutcome::Switched { from, to, progress } => {
                log::debug!(
                    "Switched {:?}: path {} -> {} at t={:.2}",
                    direction,
                    from,
                    to,
                    progress
                );
                RunEvent::PathSwitched { from, to, progress }
            }
            SwitchOutcome::Ignored => {
                log::warn!("Switch {:?} ignored: run already finished", direction);
                RunEvent::SwitchIgnored
            }
        }
    }

    /// Score the run, then reset cards, tally and progress for the next one
    fn finish_run(&mut self) -> RunSummary {
        let summary = RunSummary {
            run: self.runs,
            score: self.penalties.score_run(&self.score),
            minor_cards: self.score.minor_cards,
            major_cards: self.score.major_cards,
            path: self.follower.path(),
        };
        log::info!(
            "Run {} complete on path {}: fair play score {:.2} ({} yellow, {} red)",
            summary.run + 1,
            summary.path,
            summary.score,
            summary.minor_cards,
            summary.major_cards
        );

        self.runs += 1;
        self.score.reset();
        for marker in &mut self.markers {
            marker.consumed = false;
        }
        self.follower.restart();
        summary
    }

    pub fn paths(&self) -> &PathSet {
        &self.paths
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn follower(&self) -> &Follower {
        &self.follower
    }

    /// Penalty tally of the run in progress
    pub fn score_state(&self) -> &ScoreState {
        &self.score
    }

    /// Score the run in progress would get if it ended now
    pub fn current_score(&self) -> f32 {
        self.penalties.score_run(&self.score)
    }

    pub fn completed_runs(&self) -> u64 {
        self.runs
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn position(&self) -> Vec3 {
        self.follower.position
    }

    pub fn orientation(&self) -> Quat {
        self.follower.orientation()
    }
}
