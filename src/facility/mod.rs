//! Capacitated facility location on top of the generic SA engine.
//!
//! # Examples
//!
//! ```
//! use u_facility::facility::solve_annealing;
//! use u_facility::model::Instance;
//! use u_facility::sa::SaConfig;
//!
//! let instance = Instance::from_dense(
//!     &[1000.0, 1200.0, 800.0],
//!     &[100.0, 80.0, 120.0],
//!     &[70.0, 60.0, 50.0],
//!     &[
//!         vec![10.0, 12.0, 20.0],
//!         vec![15.0, 8.0, 25.0],
//!         vec![9.0, 14.0, 18.0],
//!     ],
//! ).unwrap();
//!
//! let result = solve_annealing(&instance, &SaConfig::default().with_seed(42)).unwrap();
//! assert!(result.best.is_feasible());
//! assert!(result.best_cost <= result.initial_cost);
//! ```

mod operators;
mod problem;

pub use operators::{flip_neighbor, initial_open_set};
pub use problem::FacilityProblem;

use crate::error::Result;
use crate::greedy::GreedyAllocator;
use crate::model::{Instance, Solution};
use crate::sa::{SaConfig, SaResult, SaRunner};

/// Greedy allocation with every facility available.
pub fn solve_greedy(instance: &Instance) -> Solution {
    GreedyAllocator::default().allocate(instance, None)
}

/// Simulated annealing over open sets with single-facility flips.
///
/// The returned best solution may be infeasible (infinite cost) if no
/// feasible configuration was reached; check
/// [`Solution::is_feasible`].
pub fn solve_annealing(instance: &Instance, config: &SaConfig) -> Result<SaResult<Solution>> {
    SaRunner::run(&FacilityProblem::new(instance), config)
}
