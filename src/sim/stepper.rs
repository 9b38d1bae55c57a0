//! Fixed-timestep run loop
//!
//! The stepper owns one simulation run: parameters, evolving state, tick
//! counter, and lifecycle phase. Elapsed simulated time is always
//! `ticks * dt` exactly; the float accumulator is only used to pace
//! real-time frames into fixed substeps.

use serde::{Deserialize, Serialize};

use super::model::Model;
use crate::consts::MAX_SUBSTEPS;

/// Lifecycle phase of a simulation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    /// No run in progress; state holds initial values
    Idle,
    /// Ticking
    Running,
    /// Suspended, resumable via `start()`
    Paused,
    /// Finish predicate fired; state frozen
    Finished,
}

/// Events that fired during a tick or frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickEvents {
    /// Milestone latched this tick (fires at most once per run)
    pub milestone: bool,
    /// Run finished this tick
    pub finished: bool,
}

impl TickEvents {
    fn merge(&mut self, other: TickEvents) {
        self.milestone |= other.milestone;
        self.finished |= other.finished;
    }
}

/// One simulation run of model `M` at a fixed timestep.
pub struct Stepper<M: Model> {
    model: M,
    params: M::Params,
    state: M::State,
    dt: f64,
    ticks: u64,
    phase: RunPhase,
    milestone_latched: bool,
    accumulator: f64,
}

impl<M: Model> Stepper<M> {
    pub fn new(model: M, params: M::Params, dt: f64) -> Self {
        let state = model.initial(&params);
        Self {
            model,
            params,
            state,
            dt,
            ticks: 0,
            phase: RunPhase::Idle,
            milestone_latched: false,
            accumulator: 0.0,
        }
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn state(&self) -> &M::State {
        &self.state
    }

    pub fn params(&self) -> &M::Params {
        &self.params
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Elapsed simulated time; exactly `ticks * dt`.
    pub fn elapsed(&self) -> f64 {
        self.ticks as f64 * self.dt
    }

    /// Whether the milestone has fired during this run.
    pub fn milestone(&self) -> bool {
        self.milestone_latched
    }

    /// Begin ticking. From `Idle` the run starts at elapsed zero; from
    /// `Paused` it resumes where it left off. No-op while running or
    /// after the run has finished.
    pub fn start(&mut self) {
        match self.phase {
            RunPhase::Idle => {
                log::debug!("run started");
                self.phase = RunPhase::Running;
            }
            RunPhase::Paused => {
                log::debug!("run resumed at t={}", self.elapsed());
                self.phase = RunPhase::Running;
            }
            RunPhase::Running | RunPhase::Finished => {}
        }
    }

    /// Suspend ticking without losing state.
    pub fn pause(&mut self) {
        if self.phase == RunPhase::Running {
            self.phase = RunPhase::Paused;
        }
    }

    /// Stop, zero elapsed time, restore the initial state, clear the
    /// milestone latch. Calling repeatedly is equivalent to calling once.
    pub fn reset(&mut self) {
        self.phase = RunPhase::Idle;
        self.ticks = 0;
        self.accumulator = 0.0;
        self.state = self.model.initial(&self.params);
        self.milestone_latched = false;
    }

    /// Swap in a new parameter set. A live run (running, paused, or
    /// finished) restarts from zero with the new parameters - the
    /// restart-on-change convention. An idle stepper just re-initializes.
    pub fn set_params(&mut self, params: M::Params) {
        let live = self.phase != RunPhase::Idle;
        self.params = params;
        self.reset();
        if live {
            self.start();
        }
    }

    /// Advance exactly one timestep. No-op unless running.
    pub fn tick(&mut self) -> TickEvents {
        let mut events = TickEvents::default();
        if self.phase != RunPhase::Running {
            return events;
        }

        self.ticks += 1;
        self.state = self.model.step(&self.params, &self.state, self.dt);

        if !self.milestone_latched && self.model.milestone(&self.params, &self.state) {
            self.milestone_latched = true;
            events.milestone = true;
            log::info!("milestone reached at t={}", self.elapsed());
        }
        if self.model.finished(&self.params, &self.state) {
            self.phase = RunPhase::Finished;
            events.finished = true;
        }
        events
    }

    /// Drive from a real-time frame delta: accumulate and run fixed
    /// substeps, capped to avoid the spiral of death after a long frame.
    pub fn advance(&mut self, frame_dt: f64) -> TickEvents {
        let mut events = TickEvents::default();
        if self.phase != RunPhase::Running {
            return events;
        }

        let max_frame = self.dt * MAX_SUBSTEPS as f64;
        self.accumulator += frame_dt.clamp(0.0, max_frame);

        let mut substeps = 0;
        while self.accumulator >= self.dt && substeps < MAX_SUBSTEPS {
            events.merge(self.tick());
            self.accumulator -= self.dt;
            substeps += 1;
            if self.phase != RunPhase::Running {
                break;
            }
        }
        events
    }

    /// Start (or resume) and tick until the run finishes or `max_ticks`
    /// elapse. Batch driver for table-style labs and the headless demo.
    pub fn run_to_finish(&mut self, max_ticks: u64) -> TickEvents {
        self.start();
        let mut events = TickEvents::default();
        for _ in 0..max_ticks {
            events.merge(self.tick());
            if self.phase != RunPhase::Running {
                break;
            }
        }
        events
    }
}
