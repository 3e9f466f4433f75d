//! Total-cost evaluation.

use crate::model::{Allocation, Instance, OpenSet};

/// Fixed cost of every open facility plus `quantity * unit cost` over all
/// allocation entries.
///
/// Pure: the same inputs always give the same result. Entries allocated to a
/// closed facility are still charged their transport cost; only the fixed
/// cost depends on the open flag.
pub fn total_cost(instance: &Instance, open_set: &OpenSet, allocation: &Allocation) -> f64 {
    fixed_cost(instance, open_set) + transport_cost(instance, allocation)
}

/// Sum of fixed costs of the open facilities.
pub fn fixed_cost(instance: &Instance, open_set: &OpenSet) -> f64 {
    open_set
        .iter_open()
        .map(|i| instance.facility(i).fixed_cost)
        .sum()
}

/// Sum of `quantity * unit cost` over the allocation.
pub fn transport_cost(instance: &Instance, allocation: &Allocation) -> f64 {
    allocation
        .iter_nonzero()
        .map(|(i, j, q)| q * instance.transport_cost(i, j))
        .sum()
}
