//! CFLP data model.
//!
//! [`Instance`] is the static input of a run. [`OpenSet`], [`Allocation`]
//! and [`Solution`] are value types: each candidate the search looks at is
//! built fresh, so current, candidate and best never alias.
//!
//! The `*Data` types mirror the identifier-keyed shapes used by external
//! collaborators; everything else is index based.

mod allocation;
mod instance;
mod open_set;
mod solution;

pub use allocation::Allocation;
pub use instance::{Customer, Facility, Instance, InstanceBuilder, InstanceData, Validation};
pub use open_set::OpenSet;
pub use solution::{Solution, SolutionData, Violation};

/// Absolute tolerance when comparing allocated quantity against demand.
pub const DEMAND_TOLERANCE: f64 = 1e-6;
