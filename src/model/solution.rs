//! Complete candidate solutions.

use indexmap::IndexMap;

use super::{Allocation, Instance, OpenSet, DEMAND_TOLERANCE};

/// An open set, its allocation and the total cost, produced together.
///
/// Solutions are never mutated after construction; every candidate in a
/// search is a fresh value. An infinite cost marks an allocation that left
/// some demand unserved.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    open_set: OpenSet,
    allocation: Allocation,
    cost: f64,
}

/// A broken feasibility condition, reported by [`Solution::check`].
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    /// Customer received a total different from its demand.
    DemandMismatch {
        customer: usize,
        demand: f64,
        supplied: f64,
    },
    /// Open facility ships more than its capacity.
    CapacityExceeded {
        facility: usize,
        capacity: f64,
        load: f64,
    },
    /// Closed facility ships a nonzero quantity.
    ClosedFacilityUsed { facility: usize, load: f64 },
}

/// Map-based solution representation shared with the exact solver and
/// reporting collaborators.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolutionData {
    /// Facility id -> 1 if open, 0 otherwise.
    pub open_facilities: IndexMap<String, u8>,
    /// Facility id -> customer id -> quantity.
    pub allocation: IndexMap<String, IndexMap<String, f64>>,
    /// Total cost; `f64::INFINITY` denotes infeasibility. Serialized as
    /// `null` when not finite.
    #[cfg_attr(feature = "serde", serde(with = "infinite_as_null"))]
    pub total_cost: f64,
}

/// JSON has no infinity; an infeasible cost travels as `null`.
#[cfg(feature = "serde")]
mod infinite_as_null {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(cost: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if cost.is_finite() {
            serializer.serialize_some(cost)
        } else {
            serializer.serialize_none()
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::INFINITY))
    }
}

impl Solution {
    pub fn new(open_set: OpenSet, allocation: Allocation, cost: f64) -> Self {
        Self {
            open_set,
            allocation,
            cost,
        }
    }

    pub fn open_set(&self) -> &OpenSet {
        &self.open_set
    }

    pub fn allocation(&self) -> &Allocation {
        &self.allocation
    }

    #[inline]
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// `false` when the cost is the infinite sentinel.
    #[inline]
    pub fn is_feasible(&self) -> bool {
        self.cost.is_finite()
    }

    pub fn into_parts(self) -> (OpenSet, Allocation, f64) {
        (self.open_set, self.allocation, self.cost)
    }

    pub fn to_data(&self, instance: &Instance) -> SolutionData {
        SolutionData {
            open_facilities: self.open_set.to_map(instance),
            allocation: self.allocation.to_map(instance),
            total_cost: self.cost,
        }
    }

    /// Lists every violated feasibility condition against `instance`.
    ///
    /// Demand equality uses [`DEMAND_TOLERANCE`]; capacity allows the same
    /// slack. A closed facility must ship exactly zero.
    pub fn check(&self, instance: &Instance) -> Vec<Violation> {
        let mut violations = Vec::new();

        for (j, c) in instance.customers().iter().enumerate() {
            let supplied = self.allocation.customer_supply(j);
            if (supplied - c.demand).abs() > DEMAND_TOLERANCE {
                violations.push(Violation::DemandMismatch {
                    customer: j,
                    demand: c.demand,
                    supplied,
                });
            }
        }

        for (i, f) in instance.facilities().iter().enumerate() {
            let load = self.allocation.facility_load(i);
            if self.open_set.is_open(i) {
                if load > f.capacity + DEMAND_TOLERANCE {
                    violations.push(Violation::CapacityExceeded {
                        facility: i,
                        capacity: f.capacity,
                        load,
                    });
                }
            } else if load != 0.0 {
                violations.push(Violation::ClosedFacilityUsed { facility: i, load });
            }
        }

        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instance() -> Instance {
        Instance::from_dense(&[10.0, 20.0], &[5.0, 5.0], &[4.0], &[vec![1.0], vec![2.0]]).unwrap()
    }

    #[test]
    fn test_check_reports_each_violation() {
        let inst = instance();
        let mut alloc = Allocation::empty_for(&inst);
        alloc.add(0, 0, 6.0);
        alloc.add(1, 0, 1.0);
        let sol = Solution::new(OpenSet::from_flags(vec![true, false]), alloc, 0.0);

        let violations = sol.check(&inst);
        assert_eq!(violations.len(), 3);
        assert!(violations.contains(&Violation::DemandMismatch {
            customer: 0,
            demand: 4.0,
            supplied: 7.0
        }));
        assert!(violations.contains(&Violation::CapacityExceeded {
            facility: 0,
            capacity: 5.0,
            load: 6.0
        }));
        assert!(violations.contains(&Violation::ClosedFacilityUsed {
            facility: 1,
            load: 1.0
        }));
    }

    #[test]
    fn test_to_data() {
        let inst = instance();
        let mut alloc = Allocation::empty_for(&inst);
        alloc.add(0, 0, 4.0);
        let sol = Solution::new(OpenSet::from_flags(vec![true, false]), alloc, 14.0);

        assert!(sol.check(&inst).is_empty());
        let data = sol.to_data(&inst);
        assert_eq!(data.open_facilities["F1"], 1);
        assert_eq!(data.open_facilities["F2"], 0);
        assert_eq!(data.allocation["F1"]["C1"], 4.0);
        assert_eq!(data.allocation["F2"]["C1"], 0.0);
        assert_eq!(data.total_cost, 14.0);
    }

    #[test]
    fn test_infinite_cost_is_infeasible() {
        let inst = instance();
        let sol = Solution::new(
            OpenSet::all_closed(2),
            Allocation::empty_for(&inst),
            f64::INFINITY,
        );
        assert!(!sol.is_feasible());
    }
}
