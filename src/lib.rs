//! Heuristics for the capacitated facility location problem (CFLP).
//!
//! Choose which facilities to open and how to route each customer's demand
//! so that fixed opening costs plus transport costs are minimal, subject to
//! facility capacities and exact demand satisfaction.
//!
//! - **Model**: [`model::Instance`] (validated, index based) and the value
//!   types [`model::OpenSet`], [`model::Allocation`], [`model::Solution`].
//! - **Greedy allocation**: [`greedy::GreedyAllocator`] serves each customer
//!   from its cheapest open facilities with spare capacity.
//! - **Simulated Annealing (SA)**: generic engine in [`sa`], bound to CFLP
//!   by [`facility::FacilityProblem`] (flip one facility, re-allocate,
//!   accept or reject, cool).
//! - **Multi-start**: independent seeded runs in [`multistart`], optionally
//!   on rayon (`parallel` feature).
//! - **Comparison**: exact-solver result shapes and gap arithmetic in
//!   [`compare`].
//!
//! # Architecture
//!
//! All randomness flows through an explicit seedable generator, so every
//! run is reproducible from its seed. Infeasibility (demand left unserved)
//! is not an error: it is an infinite cost, which the search rejects.

pub mod compare;
pub mod cost;
pub mod error;
pub mod facility;
pub mod greedy;
pub mod model;
pub mod multistart;
pub mod sa;

pub use error::{FacilityError, Result};
