//! Core trait for Simulated Annealing.

use rand::Rng;

/// Defines a Simulated Annealing problem.
///
/// The implementor supplies the initial solution, neighbor generation and
/// cost evaluation. The SA framework handles temperature, acceptance and
/// best-solution tracking.
///
/// # Minimization and infeasibility
///
/// SA minimizes the cost. A non-finite cost marks an infeasible solution:
/// such candidates are rejected outright rather than put through the
/// Metropolis test, so once a feasible solution is current the search
/// never leaves the feasible region.
///
/// # Examples
///
/// ```
/// use rand::Rng;
/// use u_facility::sa::SaProblem;
///
/// struct Parabola;
///
/// impl SaProblem for Parabola {
///     type Solution = f64;
///
///     fn initial_solution<R: Rng>(&self, rng: &mut R) -> f64 {
///         rng.random_range(-10.0..10.0)
///     }
///
///     fn cost(&self, x: &f64) -> f64 {
///         x * x
///     }
///
///     fn neighbor<R: Rng>(&self, x: &f64, rng: &mut R) -> f64 {
///         x + rng.random_range(-1.0..1.0)
///     }
/// }
/// ```
pub trait SaProblem: Send + Sync {
    /// The solution representation type.
    type Solution: Clone + Send;

    /// Creates the starting solution.
    fn initial_solution<R: Rng>(&self, rng: &mut R) -> Self::Solution;

    /// Computes the cost of a solution. Lower is better; non-finite means
    /// infeasible.
    fn cost(&self, solution: &Self::Solution) -> f64;

    /// Generates a neighbor of the current solution.
    ///
    /// Must return a fresh value; the current solution is left untouched.
    fn neighbor<R: Rng>(&self, solution: &Self::Solution, rng: &mut R) -> Self::Solution;
}
