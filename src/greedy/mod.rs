//! Greedy allocation for a fixed open/closed configuration.
//!
//! This is the inner sub-problem of the annealing search: every proposed
//! open set is realized into a full [`Solution`](crate::model::Solution)
//! by serving each customer from its cheapest open facilities with spare
//! capacity.

mod allocator;

pub use allocator::GreedyAllocator;
