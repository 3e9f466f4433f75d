//! Comparing heuristic results against an exact solver.
//!
//! The exact MILP solver is an external collaborator; this module only
//! defines the shapes it exchanges (configuration, status, reference
//! solution) and the gap arithmetic. Nothing here calls a solver.

use std::time::Duration;

use crate::model::{Solution, SolutionData};

/// Termination status reported by an exact solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolverStatus {
    /// Proven optimal.
    Optimal,
    /// Feasible, stopped by the gap tolerance.
    Feasible,
    /// Proven infeasible.
    Infeasible,
    /// Hit the time limit; the solution (if any) is the incumbent.
    TimedOut,
    NotSolved,
}

impl SolverStatus {
    /// Whether the accompanying solution can be used as a reference.
    pub fn has_solution(self) -> bool {
        matches!(self, SolverStatus::Optimal | SolverStatus::Feasible | SolverStatus::TimedOut)
    }
}

/// Settings passed to an exact solver.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExactConfig {
    pub time_limit: Option<Duration>,
    /// Relative MIP gap at which the solver may stop, e.g. `0.01` for 1%.
    pub relative_gap: Option<f64>,
    pub threads: usize,
}

impl Default for ExactConfig {
    fn default() -> Self {
        Self {
            time_limit: None,
            relative_gap: None,
            threads: 1,
        }
    }
}

impl ExactConfig {
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    pub fn with_relative_gap(mut self, gap: f64) -> Self {
        self.relative_gap = Some(gap);
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }
}

/// A solution returned by an exact solver, with its solve statistics.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReferenceSolution {
    pub solution: SolutionData,
    pub status: SolverStatus,
    pub elapsed: Duration,
    /// Gap reported by the solver itself, if any.
    pub gap: Option<f64>,
}

/// Heuristic cost measured against a reference cost.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Comparison {
    pub heuristic_cost: f64,
    pub reference_cost: f64,
    /// `heuristic - reference`.
    pub absolute_gap: f64,
    /// `(heuristic - reference) / |reference|`; 0 when the costs are equal.
    pub relative_gap: f64,
}

impl Comparison {
    /// Infeasible costs are infinite:
    ///
    /// - both infeasible: gaps are 0;
    /// - only the heuristic infeasible: gaps are `+inf`;
    /// - only the reference infeasible: gaps are `-inf`.
    pub fn new(heuristic_cost: f64, reference_cost: f64) -> Self {
        let absolute_gap = if heuristic_cost == reference_cost {
            0.0
        } else {
            heuristic_cost - reference_cost
        };
        let relative_gap = if absolute_gap == 0.0 {
            0.0
        } else if absolute_gap.is_infinite() {
            absolute_gap
        } else if reference_cost == 0.0 {
            f64::INFINITY.copysign(absolute_gap)
        } else {
            absolute_gap / reference_cost.abs()
        };
        Self {
            heuristic_cost,
            reference_cost,
            absolute_gap,
            relative_gap,
        }
    }

    /// Uses the reference's reported total cost.
    pub fn against(heuristic: &Solution, reference: &ReferenceSolution) -> Self {
        Self::new(heuristic.cost(), reference.solution.total_cost)
    }

    /// Heuristic within `tolerance` (relative) of the reference.
    pub fn within(&self, tolerance: f64) -> bool {
        self.relative_gap <= tolerance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Instance;
    use indexmap::IndexMap;

    #[test]
    fn test_gaps() {
        let c = Comparison::new(110.0, 100.0);
        assert_eq!(c.absolute_gap, 10.0);
        assert!((c.relative_gap - 0.1).abs() < 1e-12);
        assert!(c.within(0.1 + 1e-9));
        assert!(!c.within(0.05));

        let same = Comparison::new(0.0, 0.0);
        assert_eq!(same.relative_gap, 0.0);

        let infeasible = Comparison::new(f64::INFINITY, 100.0);
        assert_eq!(infeasible.relative_gap, f64::INFINITY);
        assert!(!infeasible.within(1e9));
    }

    #[test]
    fn test_infeasible_costs() {
        let both = Comparison::new(f64::INFINITY, f64::INFINITY);
        assert_eq!(both.absolute_gap, 0.0);
        assert_eq!(both.relative_gap, 0.0);
        assert!(both.within(0.0));

        let reference_only = Comparison::new(250.0, f64::INFINITY);
        assert_eq!(reference_only.absolute_gap, f64::NEG_INFINITY);
        assert_eq!(reference_only.relative_gap, f64::NEG_INFINITY);
        assert!(reference_only.within(0.0));

        let heuristic_only = Comparison::new(f64::INFINITY, 0.0);
        assert_eq!(heuristic_only.relative_gap, f64::INFINITY);
    }

    #[test]
    fn test_against_reference() {
        let reference = ReferenceSolution {
            solution: SolutionData {
                open_facilities: IndexMap::new(),
                allocation: IndexMap::new(),
                total_cost: 4000.0,
            },
            status: SolverStatus::Optimal,
            elapsed: Duration::from_millis(12),
            gap: Some(0.0),
        };
        let inst = Instance::builder().build().unwrap();
        let heuristic = crate::facility::solve_greedy(&inst);
        let c = Comparison::against(&heuristic, &reference);
        assert_eq!(c.heuristic_cost, 0.0);
        assert_eq!(c.relative_gap, -1.0);
        assert!(SolverStatus::Optimal.has_solution());
        assert!(!SolverStatus::Infeasible.has_solution());
    }
}
