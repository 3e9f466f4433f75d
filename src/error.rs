//! Error types.
//!
//! Capacity shortfall is not an error: the greedy allocator reports it as an
//! infinite-cost [`Solution`](crate::model::Solution). Errors are reserved
//! for malformed instances and invalid configuration.

/// Errors raised while building an instance or configuring a search.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FacilityError {
    #[error("missing fixed cost for facility `{0}`")]
    MissingFixedCost(String),

    #[error("missing capacity for facility `{0}`")]
    MissingCapacity(String),

    #[error("missing transport cost for facility `{facility}` -> customer `{customer}`")]
    MissingTransportCost { facility: String, customer: String },

    #[error("unknown facility `{0}`")]
    UnknownFacility(String),

    #[error("unknown customer `{0}`")]
    UnknownCustomer(String),

    #[error("duplicate facility `{0}`")]
    DuplicateFacility(String),

    #[error("duplicate customer `{0}`")]
    DuplicateCustomer(String),

    /// A negative or non-finite number where a non-negative one is required.
    #[error("invalid {what} for `{id}`: {value}")]
    InvalidValue {
        what: &'static str,
        id: String,
        value: f64,
    },

    #[error("{what} has length {actual}, expected {expected}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, FacilityError>;
