//! Cheapest-first capacitated allocation.

use crate::cost::total_cost;
use crate::model::{Allocation, Instance, OpenSet, Solution, DEMAND_TOLERANCE};

/// Greedy allocator for a fixed open/closed configuration.
///
/// # Algorithm
///
/// 1. Serve customers in instance order (the order is significant).
/// 2. For each customer, walk the open facilities by ascending unit cost
///    (ties by facility index) and ship `min(remaining demand, remaining
///    capacity)` to each until the demand is met or candidates run out.
/// 3. Mark a facility open in the result only if it shipped something.
///    Leftover demand or capacity no larger than the tolerance counts as
///    zero, so rounding residue never opens a facility.
/// 4. If the total shipped differs from total demand by more than the
///    tolerance, the cost is `f64::INFINITY` and the partial allocation is
///    returned as is.
///
/// Runs in `O(customers * facilities)`: the per-customer cost ordering is
/// precomputed by [`Instance`].
///
/// # Examples
///
/// ```
/// use u_facility::greedy::GreedyAllocator;
/// use u_facility::model::Instance;
///
/// let instance = Instance::from_dense(
///     &[10.0, 5.0],
///     &[8.0, 8.0],
///     &[6.0],
///     &[vec![1.0], vec![2.0]],
/// ).unwrap();
///
/// let solution = GreedyAllocator::default().allocate(&instance, None);
/// assert!(solution.is_feasible());
/// assert_eq!(solution.cost(), 10.0 + 6.0 * 1.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct GreedyAllocator {
    tolerance: f64,
}

impl Default for GreedyAllocator {
    fn default() -> Self {
        Self {
            tolerance: DEMAND_TOLERANCE,
        }
    }
}

impl GreedyAllocator {
    /// Overrides the tolerance used for the demand-coverage check.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Allocates all demand to the facilities open in `open_set`
    /// (every facility when `None`).
    ///
    /// # Panics
    ///
    /// Panics if `open_set` does not have one flag per facility.
    pub fn allocate(&self, instance: &Instance, open_set: Option<&OpenSet>) -> Solution {
        let n = instance.num_facilities();
        let all_open;
        let open_set = match open_set {
            Some(set) => set,
            None => {
                all_open = OpenSet::all_open(n);
                &all_open
            }
        };
        assert_eq!(open_set.len(), n, "open set size must match facility count");

        let mut remaining: Vec<f64> = instance.facilities().iter().map(|f| f.capacity).collect();
        let mut allocation = Allocation::empty_for(instance);
        let mut realized = OpenSet::all_closed(n);

        for (j, customer) in instance.customers().iter().enumerate() {
            let mut to_assign = customer.demand;

            for &i in instance.sorted_facilities_for(j) {
                if to_assign <= self.tolerance {
                    break;
                }
                if !open_set.is_open(i) || remaining[i] <= self.tolerance {
                    continue;
                }

                let quantity = remaining[i].min(to_assign);
                allocation.add(i, j, quantity);
                remaining[i] -= quantity;
                to_assign -= quantity;
                realized.set(i, true);
            }
        }

        let shortfall = instance.total_demand() - allocation.total_allocated();
        let cost = if shortfall.abs() > self.tolerance {
            tracing::trace!(shortfall, "greedy allocation left demand unserved");
            f64::INFINITY
        } else {
            total_cost(instance, &realized, &allocation)
        };

        Solution::new(realized, allocation, cost)
    }
}
