//! CFLP as an SA problem.

use rand::Rng;

use super::operators::{flip_neighbor, initial_open_set};
use crate::greedy::GreedyAllocator;
use crate::model::{Instance, Solution};
use crate::sa::SaProblem;

/// Searches over open sets; every proposed open set is realized into a
/// full [`Solution`] by the [`GreedyAllocator`].
///
/// Neighbors are generated from the *realized* open set of the current
/// solution, so facilities the allocator left unused are closed before
/// the next flip. A proposal-based search would instead keep flipping the
/// proposed set, where unused facilities stay nominally open.
#[derive(Debug, Clone, Copy)]
pub struct FacilityProblem<'a> {
    instance: &'a Instance,
    allocator: GreedyAllocator,
    flip_count: usize,
}

impl<'a> FacilityProblem<'a> {
    pub fn new(instance: &'a Instance) -> Self {
        Self {
            instance,
            allocator: GreedyAllocator::default(),
            flip_count: 1,
        }
    }

    /// Number of facilities flipped per move. Values below 1 are raised to 1.
    pub fn with_flip_count(mut self, flip_count: usize) -> Self {
        self.flip_count = flip_count.max(1);
        self
    }

    pub fn with_allocator(mut self, allocator: GreedyAllocator) -> Self {
        self.allocator = allocator;
        self
    }

    pub fn instance(&self) -> &'a Instance {
        self.instance
    }

    pub fn flip_count(&self) -> usize {
        self.flip_count
    }
}

impl SaProblem for FacilityProblem<'_> {
    type Solution = Solution;

    fn initial_solution<R: Rng>(&self, rng: &mut R) -> Solution {
        let open_set = initial_open_set(self.instance, rng);
        self.allocator.allocate(self.instance, Some(&open_set))
    }

    fn cost(&self, solution: &Solution) -> f64 {
        solution.cost()
    }

    fn neighbor<R: Rng>(&self, solution: &Solution, rng: &mut R) -> Solution {
        let open_set = flip_neighbor(solution.open_set(), self.flip_count, rng);
        self.allocator.allocate(self.instance, Some(&open_set))
    }
}
