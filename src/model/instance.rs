//! Problem instance: facilities, customers and the transport-cost table.
//!
//! Identifiers are kept for the external interface; all internal storage is
//! index based. Facility `i` and customer `j` are the `i`-th and `j`-th
//! entries in insertion order, and the transport table is a dense row-major
//! `facility x customer` matrix.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::error::{FacilityError, Result};

/// A candidate facility location.
#[derive(Debug, Clone, PartialEq)]
pub struct Facility {
    pub id: String,
    /// Cost charged once if the facility serves any demand.
    pub fixed_cost: f64,
    /// Maximum total quantity the facility can ship.
    pub capacity: f64,
}

/// A demand point.
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub id: String,
    pub demand: f64,
}

/// How missing entries are treated when an instance is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Validation {
    /// Fail with an error naming the first missing key.
    #[default]
    Strict,
    /// Substitute zero for missing entries and log a warning for each.
    ///
    /// A missing transport cost makes the facility free to ship to that
    /// customer, so this mode can hide data-entry errors.
    Lenient,
}

/// Map-based instance representation shared with external collaborators
/// (instance generators, exact solvers).
///
/// Ordered maps keep insertion order: the order of `demands` is the order in
/// which the greedy allocator serves customers.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InstanceData {
    /// Facility id -> fixed opening cost.
    pub fixed_costs: IndexMap<String, f64>,
    /// Facility id -> customer id -> unit transport cost.
    pub transport_costs: IndexMap<String, IndexMap<String, f64>>,
    /// Facility id -> capacity.
    pub capacities: IndexMap<String, f64>,
    /// Customer id -> demand.
    pub demands: IndexMap<String, f64>,
}

/// A validated, immutable CFLP instance.
///
/// Cheap to share by reference across independent searches.
#[derive(Debug, Clone)]
pub struct Instance {
    facilities: Vec<Facility>,
    customers: Vec<Customer>,
    facility_lookup: HashMap<String, usize>,
    customer_lookup: HashMap<String, usize>,
    /// Row-major `facilities x customers`.
    transport: Vec<f64>,
    /// Per customer: facility indices sorted by ascending unit cost, ties by index.
    cost_order: Vec<Vec<usize>>,
    total_demand: f64,
    total_capacity: f64,
}

impl Instance {
    /// Starts building an instance in [`Validation::Strict`] mode.
    pub fn builder() -> InstanceBuilder {
        InstanceBuilder::default()
    }

    /// Builds an instance from the map-based external representation.
    ///
    /// Facilities are taken from `fixed_costs` in order, followed by any
    /// facility that only appears in `capacities`. Customers are the keys of
    /// `demands`.
    pub fn from_data(data: &InstanceData, validation: Validation) -> Result<Self> {
        let mut facility_ids: Vec<&String> = data.fixed_costs.keys().collect();
        facility_ids.extend(
            data.capacities
                .keys()
                .filter(|id| !data.fixed_costs.contains_key(*id)),
        );

        let mut builder = Instance::builder().validation(validation);
        for id in facility_ids {
            let fixed_cost = match data.fixed_costs.get(id) {
                Some(&v) => v,
                None => missing(validation, || FacilityError::MissingFixedCost(id.clone()))?,
            };
            let capacity = match data.capacities.get(id) {
                Some(&v) => v,
                None => missing(validation, || FacilityError::MissingCapacity(id.clone()))?,
            };
            builder = builder.facility(id.clone(), fixed_cost, capacity);
        }
        for (id, &demand) in &data.demands {
            builder = builder.customer(id.clone(), demand);
        }
        for (facility, row) in &data.transport_costs {
            for (customer, &cost) in row {
                builder = builder.transport_cost(facility.clone(), customer.clone(), cost);
            }
        }
        builder.build()
    }

    /// Builds an instance from dense vectors, naming facilities `F1..Fn` and
    /// customers `C1..Cm`. `transport[i][j]` is the unit cost from facility
    /// `i` to customer `j`.
    pub fn from_dense(
        fixed_costs: &[f64],
        capacities: &[f64],
        demands: &[f64],
        transport: &[Vec<f64>],
    ) -> Result<Self> {
        let n = fixed_costs.len();
        let m = demands.len();
        check_len("capacities", n, capacities.len())?;
        check_len("transport rows", n, transport.len())?;

        let mut builder = Instance::builder();
        for i in 0..n {
            builder = builder.facility(format!("F{}", i + 1), fixed_costs[i], capacities[i]);
        }
        for (j, &d) in demands.iter().enumerate() {
            builder = builder.customer(format!("C{}", j + 1), d);
        }
        for (i, row) in transport.iter().enumerate() {
            check_len("transport row", m, row.len())?;
            for (j, &cost) in row.iter().enumerate() {
                builder =
                    builder.transport_cost(format!("F{}", i + 1), format!("C{}", j + 1), cost);
            }
        }
        builder.build()
    }

    /// Converts back to the map-based external representation.
    pub fn to_data(&self) -> InstanceData {
        let mut data = InstanceData::default();
        for (i, f) in self.facilities.iter().enumerate() {
            data.fixed_costs.insert(f.id.clone(), f.fixed_cost);
            data.capacities.insert(f.id.clone(), f.capacity);
            let row = self
                .customers
                .iter()
                .enumerate()
                .map(|(j, c)| (c.id.clone(), self.transport_cost(i, j)))
                .collect();
            data.transport_costs.insert(f.id.clone(), row);
        }
        for c in &self.customers {
            data.demands.insert(c.id.clone(), c.demand);
        }
        data
    }

    #[inline]
    pub fn num_facilities(&self) -> usize {
        self.facilities.len()
    }

    #[inline]
    pub fn num_customers(&self) -> usize {
        self.customers.len()
    }

    pub fn facilities(&self) -> &[Facility] {
        &self.facilities
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    #[inline]
    pub fn facility(&self, i: usize) -> &Facility {
        &self.facilities[i]
    }

    #[inline]
    pub fn customer(&self, j: usize) -> &Customer {
        &self.customers[j]
    }

    pub fn facility_index(&self, id: &str) -> Option<usize> {
        self.facility_lookup.get(id).copied()
    }

    pub fn customer_index(&self, id: &str) -> Option<usize> {
        self.customer_lookup.get(id).copied()
    }

    /// Unit transport cost from facility `i` to customer `j`.
    #[inline]
    pub fn transport_cost(&self, i: usize, j: usize) -> f64 {
        self.transport[i * self.customers.len() + j]
    }

    /// Facility indices sorted by ascending transport cost to customer `j`,
    /// ties broken by facility index.
    #[inline]
    pub fn sorted_facilities_for(&self, j: usize) -> &[usize] {
        &self.cost_order[j]
    }

    pub fn total_demand(&self) -> f64 {
        self.total_demand
    }

    pub fn total_capacity(&self) -> f64 {
        self.total_capacity
    }
}

/// Incremental constructor for [`Instance`].
///
/// Entries are validated in [`build`](InstanceBuilder::build): ids must be
/// unique, every number finite and non-negative, and every
/// `(facility, customer)` pair must have a transport cost unless the
/// builder is [`Validation::Lenient`].
#[derive(Debug, Clone, Default)]
pub struct InstanceBuilder {
    facilities: Vec<Facility>,
    customers: Vec<Customer>,
    transport: Vec<(String, String, f64)>,
    validation: Validation,
}

impl InstanceBuilder {
    pub fn facility(mut self, id: impl Into<String>, fixed_cost: f64, capacity: f64) -> Self {
        self.facilities.push(Facility {
            id: id.into(),
            fixed_cost,
            capacity,
        });
        self
    }

    pub fn customer(mut self, id: impl Into<String>, demand: f64) -> Self {
        self.customers.push(Customer {
            id: id.into(),
            demand,
        });
        self
    }

    /// Sets the unit cost of shipping from `facility` to `customer`.
    /// A later entry for the same pair overwrites an earlier one.
    pub fn transport_cost(
        mut self,
        facility: impl Into<String>,
        customer: impl Into<String>,
        cost: f64,
    ) -> Self {
        self.transport.push((facility.into(), customer.into(), cost));
        self
    }

    pub fn validation(mut self, validation: Validation) -> Self {
        self.validation = validation;
        self
    }

    pub fn build(self) -> Result<Instance> {
        let mut facility_lookup = HashMap::with_capacity(self.facilities.len());
        for (i, f) in self.facilities.iter().enumerate() {
            if facility_lookup.insert(f.id.clone(), i).is_some() {
                return Err(FacilityError::DuplicateFacility(f.id.clone()));
            }
            non_negative("fixed cost", &f.id, f.fixed_cost)?;
            non_negative("capacity", &f.id, f.capacity)?;
        }

        let mut customer_lookup = HashMap::with_capacity(self.customers.len());
        for (j, c) in self.customers.iter().enumerate() {
            if customer_lookup.insert(c.id.clone(), j).is_some() {
                return Err(FacilityError::DuplicateCustomer(c.id.clone()));
            }
            non_negative("demand", &c.id, c.demand)?;
        }

        let n = self.facilities.len();
        let m = self.customers.len();

        // NaN marks "not supplied"; all real entries are checked non-negative.
        let mut transport = vec![f64::NAN; n * m];
        for (facility, customer, cost) in &self.transport {
            let i = *facility_lookup
                .get(facility)
                .ok_or_else(|| FacilityError::UnknownFacility(facility.clone()))?;
            let j = *customer_lookup
                .get(customer)
                .ok_or_else(|| FacilityError::UnknownCustomer(customer.clone()))?;
            non_negative("transport cost", &format!("{facility}->{customer}"), *cost)?;
            transport[i * m + j] = *cost;
        }

        for i in 0..n {
            for j in 0..m {
                if transport[i * m + j].is_nan() {
                    transport[i * m + j] = missing(self.validation, || {
                        FacilityError::MissingTransportCost {
                            facility: self.facilities[i].id.clone(),
                            customer: self.customers[j].id.clone(),
                        }
                    })?;
                }
            }
        }

        let cost_order = (0..m)
            .map(|j| {
                let mut order: Vec<usize> = (0..n).collect();
                // Stable sort keeps index order among equal costs.
                order.sort_by(|&a, &b| transport[a * m + j].total_cmp(&transport[b * m + j]));
                order
            })
            .collect();

        let total_demand = self.customers.iter().map(|c| c.demand).sum();
        let total_capacity = self.facilities.iter().map(|f| f.capacity).sum();

        Ok(Instance {
            facilities: self.facilities,
            customers: self.customers,
            facility_lookup,
            customer_lookup,
            transport,
            cost_order,
            total_demand,
            total_capacity,
        })
    }
}

/// Resolves a missing entry: an error in strict mode, zero in lenient mode.
fn missing(validation: Validation, err: impl FnOnce() -> FacilityError) -> Result<f64> {
    match validation {
        Validation::Strict => Err(err()),
        Validation::Lenient => {
            tracing::warn!("{}; substituting 0", err());
            Ok(0.0)
        }
    }
}

fn non_negative(what: &'static str, id: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(FacilityError::InvalidValue {
            what,
            id: id.to_string(),
            value,
        })
    }
}

fn check_len(what: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(FacilityError::DimensionMismatch {
            what,
            expected,
            actual,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_data() -> InstanceData {
        let mut data = InstanceData::default();
        for (id, fixed, cap) in [("F1", 1000.0, 100.0), ("F2", 1200.0, 80.0)] {
            data.fixed_costs.insert(id.into(), fixed);
            data.capacities.insert(id.into(), cap);
        }
        data.demands.insert("C1".into(), 70.0);
        data.demands.insert("C2".into(), 60.0);
        data.transport_costs.insert(
            "F1".into(),
            [("C1".to_string(), 10.0), ("C2".to_string(), 12.0)]
                .into_iter()
                .collect(),
        );
        data.transport_costs.insert(
            "F2".into(),
            [("C1".to_string(), 15.0), ("C2".to_string(), 8.0)]
                .into_iter()
                .collect(),
        );
        data
    }

    #[test]
    fn test_from_data_preserves_order() {
        let inst = Instance::from_data(&small_data(), Validation::Strict).unwrap();
        assert_eq!(inst.num_facilities(), 2);
        assert_eq!(inst.num_customers(), 2);
        assert_eq!(inst.facility(1).id, "F2");
        assert_eq!(inst.customer(0).id, "C1");
        assert_eq!(inst.facility_index("F2"), Some(1));
        assert_eq!(inst.customer_index("C9"), None);
        assert!((inst.transport_cost(1, 1) - 8.0).abs() < 1e-12);
        assert!((inst.total_demand() - 130.0).abs() < 1e-12);
        assert!((inst.total_capacity() - 180.0).abs() < 1e-12);
    }

    #[test]
    fn test_to_data_round_trips() {
        let data = small_data();
        let inst = Instance::from_data(&data, Validation::Strict).unwrap();
        assert_eq!(inst.to_data(), data);
    }

    #[test]
    fn test_strict_rejects_missing_transport_cost() {
        let mut data = small_data();
        data.transport_costs.get_mut("F2").unwrap().shift_remove("C1");

        let err = Instance::from_data(&data, Validation::Strict).unwrap_err();
        assert_eq!(
            err,
            FacilityError::MissingTransportCost {
                facility: "F2".into(),
                customer: "C1".into(),
            }
        );
    }

    #[test]
    fn test_lenient_substitutes_zero() {
        let mut data = small_data();
        data.transport_costs.get_mut("F2").unwrap().shift_remove("C1");
        data.capacities.shift_remove("F1");

        let inst = Instance::from_data(&data, Validation::Lenient).unwrap();
        assert_eq!(inst.transport_cost(1, 0), 0.0);
        assert_eq!(inst.facility(0).capacity, 0.0);
    }

    #[test]
    fn test_strict_rejects_missing_capacity() {
        let mut data = small_data();
        data.capacities.shift_remove("F1");
        let err = Instance::from_data(&data, Validation::Strict).unwrap_err();
        assert_eq!(err, FacilityError::MissingCapacity("F1".into()));
    }

    #[test]
    fn test_capacity_only_facility_needs_fixed_cost() {
        let mut data = small_data();
        data.capacities.insert("F3".into(), 50.0);
        let err = Instance::from_data(&data, Validation::Strict).unwrap_err();
        assert_eq!(err, FacilityError::MissingFixedCost("F3".into()));
    }

    #[test]
    fn test_unknown_ids_rejected() {
        let err = Instance::builder()
            .facility("F1", 1.0, 1.0)
            .customer("C1", 1.0)
            .transport_cost("F1", "C2", 1.0)
            .build()
            .unwrap_err();
        assert_eq!(err, FacilityError::UnknownCustomer("C2".into()));

        let err = Instance::builder()
            .facility("F1", 1.0, 1.0)
            .customer("C1", 1.0)
            .transport_cost("F9", "C1", 1.0)
            .validation(Validation::Lenient)
            .build()
            .unwrap_err();
        assert_eq!(err, FacilityError::UnknownFacility("F9".into()));
    }

    #[test]
    fn test_duplicates_and_negative_values_rejected() {
        let err = Instance::builder()
            .facility("F1", 1.0, 1.0)
            .facility("F1", 2.0, 2.0)
            .build()
            .unwrap_err();
        assert_eq!(err, FacilityError::DuplicateFacility("F1".into()));

        let err = Instance::builder()
            .customer("C1", -5.0)
            .build()
            .unwrap_err();
        assert!(matches!(err, FacilityError::InvalidValue { what: "demand", .. }));

        let err = Instance::builder()
            .facility("F1", f64::NAN, 1.0)
            .build()
            .unwrap_err();
        assert!(matches!(err, FacilityError::InvalidValue { what: "fixed cost", .. }));
    }

    #[test]
    fn test_sorted_facilities_ties_by_index() {
        let inst = Instance::from_dense(
            &[0.0, 0.0, 0.0],
            &[1.0, 1.0, 1.0],
            &[1.0],
            &[vec![5.0], vec![3.0], vec![5.0]],
        )
        .unwrap();
        assert_eq!(inst.sorted_facilities_for(0), &[1, 0, 2]);
    }

    #[test]
    fn test_from_dense_dimension_mismatch() {
        let err = Instance::from_dense(&[1.0], &[1.0, 2.0], &[1.0], &[vec![1.0]]).unwrap_err();
        assert!(matches!(
            err,
            FacilityError::DimensionMismatch { what: "capacities", expected: 1, actual: 2 }
        ));

        let err = Instance::from_dense(&[1.0], &[1.0], &[1.0, 1.0], &[vec![1.0]]).unwrap_err();
        assert!(matches!(err, FacilityError::DimensionMismatch { what: "transport row", .. }));
    }

    #[test]
    fn test_empty_instance() {
        let inst = Instance::builder().build().unwrap();
        assert_eq!(inst.num_facilities(), 0);
        assert_eq!(inst.num_customers(), 0);
        assert_eq!(inst.total_demand(), 0.0);
    }
}
