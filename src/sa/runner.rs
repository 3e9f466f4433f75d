//! SA execution loop.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::config::{CoolingSchedule, SaConfig};
use super::types::SaProblem;
use crate::error::Result;

/// Lifecycle of a search. Initialization happens in [`SaSearch::new`], so a
/// constructed search is already `Searching`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    Searching,
    Terminated,
}

/// Why a search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// `max_iterations` reached.
    IterationBudget,
    /// Temperature fell below `min_temperature`.
    TemperatureFloor,
}

/// Result of a Simulated Annealing run.
#[derive(Debug, Clone)]
pub struct SaResult<S: Clone> {
    /// The best solution found.
    pub best: S,

    /// Cost of the best solution. Infinite if nothing feasible was found.
    pub best_cost: f64,

    /// Cost of the initial solution.
    pub initial_cost: f64,

    /// Total number of iterations (neighbor evaluations).
    pub iterations: usize,

    /// Final temperature when the search stopped.
    pub final_temperature: f64,

    /// Number of accepted moves (including improvements).
    pub accepted_moves: usize,

    /// Number of improving moves.
    pub improving_moves: usize,

    /// Candidates rejected because their cost was not finite.
    pub rejected_infeasible: usize,

    /// Why the search stopped.
    pub termination: Termination,

    /// Best cost sampled every `history_interval` iterations, plus the
    /// initial and final values. Non-increasing.
    pub cost_history: Vec<f64>,
}

/// A Simulated Annealing search that can be advanced one iteration at a time.
///
/// # Algorithm
///
/// Each [`step`](SaSearch::step):
///
/// 1. Propose a neighbor of the current solution and evaluate it.
/// 2. Non-finite cost: reject.
/// 3. Otherwise, with `delta = candidate - current`, accept if `delta < 0`
///    or with probability `exp(-delta / T)`. An accepted candidate becomes
///    current, and best if strictly cheaper than best.
/// 4. Cool the temperature, regardless of the outcome.
///
/// The search terminates when the iteration budget is used up or the
/// temperature drops below the floor.
///
/// All randomness comes from the `rng` handed to [`new`](SaSearch::new).
pub struct SaSearch<'p, P: SaProblem, R: Rng> {
    problem: &'p P,
    config: SaConfig,
    rng: R,
    phase: SearchPhase,
    termination: Option<Termination>,

    current: P::Solution,
    current_cost: f64,
    best: P::Solution,
    best_cost: f64,
    initial_cost: f64,

    temperature: f64,
    iterations: usize,
    accepted_moves: usize,
    improving_moves: usize,
    rejected_infeasible: usize,
    linear_steps: usize,
    cost_history: Vec<f64>,
}

impl<'p, P: SaProblem, R: Rng> SaSearch<'p, P, R> {
    /// Validates `config`, builds the initial solution and makes it both
    /// current and best.
    pub fn new(problem: &'p P, config: &SaConfig, mut rng: R) -> Result<Self> {
        config.validate()?;

        let current = problem.initial_solution(&mut rng);
        let current_cost = problem.cost(&current);
        tracing::debug!(
            initial_cost = current_cost,
            temperature = config.initial_temperature,
            max_iterations = config.max_iterations,
            "starting simulated annealing"
        );

        let mut search = Self {
            problem,
            config: config.clone(),
            rng,
            phase: SearchPhase::Searching,
            termination: None,
            best: current.clone(),
            best_cost: current_cost,
            initial_cost: current_cost,
            current,
            current_cost,
            temperature: config.initial_temperature,
            iterations: 0,
            accepted_moves: 0,
            improving_moves: 0,
            rejected_infeasible: 0,
            linear_steps: compute_linear_steps(config),
            cost_history: vec![current_cost],
        };
        search.check_termination();
        Ok(search)
    }

    /// Runs one iteration. Returns `false` once the search has terminated.
    pub fn step(&mut self) -> bool {
        if self.phase == SearchPhase::Terminated {
            return false;
        }

        let candidate = self.problem.neighbor(&self.current, &mut self.rng);
        let candidate_cost = self.problem.cost(&candidate);

        if !candidate_cost.is_finite() {
            self.rejected_infeasible += 1;
        } else {
            let delta = candidate_cost - self.current_cost;

            // Metropolis acceptance criterion
            let accept = if delta < 0.0 {
                self.improving_moves += 1;
                true
            } else {
                let probability = (-delta / self.temperature).exp();
                self.rng.random_range(0.0..1.0) < probability
            };

            if accept {
                self.current = candidate;
                self.current_cost = candidate_cost;
                self.accepted_moves += 1;

                if self.current_cost < self.best_cost {
                    tracing::trace!(
                        iteration = self.iterations,
                        cost = self.current_cost,
                        "new best"
                    );
                    self.best = self.current.clone();
                    self.best_cost = self.current_cost;
                }
            }
        }

        self.iterations += 1;
        if self.config.history_interval > 0
            && self.iterations % self.config.history_interval == 0
        {
            self.cost_history.push(self.best_cost);
        }

        self.temperature = cool(
            self.temperature,
            &self.config,
            self.iterations - 1,
            self.linear_steps,
        );
        self.check_termination();
        self.phase == SearchPhase::Searching
    }

    /// Steps until termination and returns the result.
    pub fn run_to_end(mut self) -> SaResult<P::Solution> {
        while self.step() {}
        self.into_result()
    }

    /// Consumes the search and returns its result so far.
    pub fn into_result(mut self) -> SaResult<P::Solution> {
        let recorded = self
            .cost_history
            .last()
            .is_some_and(|&last| last.to_bits() == self.best_cost.to_bits());
        if !recorded {
            self.cost_history.push(self.best_cost);
        }

        let termination = self.termination.unwrap_or(Termination::IterationBudget);
        if self.best_cost.is_finite() {
            tracing::debug!(
                best_cost = self.best_cost,
                iterations = self.iterations,
                accepted = self.accepted_moves,
                rejected_infeasible = self.rejected_infeasible,
                ?termination,
                "simulated annealing finished"
            );
        } else {
            tracing::warn!(
                iterations = self.iterations,
                "simulated annealing found no feasible solution"
            );
        }

        SaResult {
            best: self.best,
            best_cost: self.best_cost,
            initial_cost: self.initial_cost,
            iterations: self.iterations,
            final_temperature: self.temperature,
            accepted_moves: self.accepted_moves,
            improving_moves: self.improving_moves,
            rejected_infeasible: self.rejected_infeasible,
            termination,
            cost_history: self.cost_history,
        }
    }

    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    pub fn termination(&self) -> Option<Termination> {
        self.termination
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn current(&self) -> &P::Solution {
        &self.current
    }

    pub fn current_cost(&self) -> f64 {
        self.current_cost
    }

    pub fn best(&self) -> &P::Solution {
        &self.best
    }

    pub fn best_cost(&self) -> f64 {
        self.best_cost
    }

    fn check_termination(&mut self) {
        let budget_spent =
            self.config.max_iterations > 0 && self.iterations >= self.config.max_iterations;
        let reason = if budget_spent {
            Some(Termination::IterationBudget)
        } else if self.temperature < self.config.min_temperature {
            Some(Termination::TemperatureFloor)
        } else {
            None
        };
        if let Some(reason) = reason {
            self.termination = Some(reason);
            self.phase = SearchPhase::Terminated;
        }
    }
}

/// Executes the Simulated Annealing algorithm.
pub struct SaRunner;

impl SaRunner {
    /// Runs SA with a ChaCha8 stream seeded from `config.seed`, or from a
    /// fresh random seed when none is set.
    pub fn run<P: SaProblem>(problem: &P, config: &SaConfig) -> Result<SaResult<P::Solution>> {
        let seed = config.seed.unwrap_or_else(rand::random);
        Self::run_with_rng(problem, config, ChaCha8Rng::seed_from_u64(seed))
    }

    /// Runs SA drawing all randomness from `rng`.
    pub fn run_with_rng<P: SaProblem, R: Rng>(
        problem: &P,
        config: &SaConfig,
        rng: R,
    ) -> Result<SaResult<P::Solution>> {
        Ok(SaSearch::new(problem, config, rng)?.run_to_end())
    }
}

/// Apply the cooling schedule to compute the next temperature.
fn cool(temperature: f64, config: &SaConfig, step: usize, linear_steps: usize) -> f64 {
    match config.cooling {
        CoolingSchedule::Geometric { alpha } => temperature * alpha,

        CoolingSchedule::Linear => {
            let t = config.initial_temperature
                - (step + 1) as f64 * (config.initial_temperature - config.min_temperature)
                    / linear_steps as f64;
            t.max(0.0)
        }

        CoolingSchedule::LundyMees { beta } => temperature / (1.0 + beta * temperature),
    }
}

/// Number of temperature steps for linear cooling to reach the floor.
fn compute_linear_steps(config: &SaConfig) -> usize {
    if config.max_iterations > 0 {
        config.max_iterations
    } else {
        1000
    }
}
