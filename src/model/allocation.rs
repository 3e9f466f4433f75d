//! Quantities shipped from facilities to customers.

use indexmap::IndexMap;

use super::Instance;

/// Dense `facility x customer` matrix of shipped quantities.
#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    num_facilities: usize,
    num_customers: usize,
    quantities: Vec<f64>,
}

impl Allocation {
    pub fn zeros(num_facilities: usize, num_customers: usize) -> Self {
        Self {
            num_facilities,
            num_customers,
            quantities: vec![0.0; num_facilities * num_customers],
        }
    }

    /// Shaped after `instance`, everything zero.
    pub fn empty_for(instance: &Instance) -> Self {
        Self::zeros(instance.num_facilities(), instance.num_customers())
    }

    pub fn num_facilities(&self) -> usize {
        self.num_facilities
    }

    pub fn num_customers(&self) -> usize {
        self.num_customers
    }

    #[inline]
    pub fn get(&self, facility: usize, customer: usize) -> f64 {
        self.quantities[facility * self.num_customers + customer]
    }

    #[inline]
    pub(crate) fn add(&mut self, facility: usize, customer: usize, quantity: f64) {
        self.quantities[facility * self.num_customers + customer] += quantity;
    }

    /// Total quantity shipped by `facility`.
    pub fn facility_load(&self, facility: usize) -> f64 {
        let start = facility * self.num_customers;
        self.quantities[start..start + self.num_customers].iter().sum()
    }

    /// Total quantity received by `customer`.
    pub fn customer_supply(&self, customer: usize) -> f64 {
        (0..self.num_facilities).map(|i| self.get(i, customer)).sum()
    }

    pub fn total_allocated(&self) -> f64 {
        self.quantities.iter().sum()
    }

    /// Nonzero entries as `(facility, customer, quantity)`.
    pub fn iter_nonzero(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        let m = self.num_customers;
        self.quantities
            .iter()
            .enumerate()
            .filter(|&(_, &q)| q != 0.0)
            .map(move |(k, &q)| (k / m, k % m, q))
    }

    /// External `facility id -> customer id -> quantity` shape, with every
    /// pair present (zeros included).
    pub fn to_map(&self, instance: &Instance) -> IndexMap<String, IndexMap<String, f64>> {
        instance
            .facilities()
            .iter()
            .enumerate()
            .map(|(i, f)| {
                let row = instance
                    .customers()
                    .iter()
                    .enumerate()
                    .map(|(j, c)| (c.id.clone(), self.get(i, j)))
                    .collect();
                (f.id.clone(), row)
            })
            .collect()
    }
}
