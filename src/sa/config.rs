//! SA configuration and cooling schedules.

use crate::error::{FacilityError, Result};

/// Cooling schedule for temperature reduction.
///
/// The temperature is updated once per iteration, whether or not the
/// candidate was accepted.
///
/// # References
///
/// - Geometric: standard textbook approach
/// - Linear: fixed-duration cooling
/// - LundyMees: Lundy & Mees (1986), with convergence proof
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CoolingSchedule {
    /// Geometric (exponential) cooling: `T_{k+1} = alpha * T_k`.
    Geometric {
        /// Cooling rate in (0, 1). Higher = slower cooling.
        alpha: f64,
    },

    /// Linear cooling: `T_k = T_0 - k * (T_0 - T_min) / steps`, where
    /// `steps` is `max_iterations` (or 1000 when unbounded).
    Linear,

    /// Lundy-Mees cooling: `T_{k+1} = T_k / (1 + beta * T_k)`.
    ///
    /// Cools fast at high T, slow at low T.
    LundyMees {
        /// Cooling parameter. Typically `(T_0 - T_min) / (max_iter * T_0 * T_min)`.
        beta: f64,
    },
}

impl Default for CoolingSchedule {
    fn default() -> Self {
        CoolingSchedule::Geometric { alpha: 0.9 }
    }
}

/// Configuration for the Simulated Annealing search.
///
/// One iteration is one temperature step. The search stops when
/// `max_iterations` is reached or the temperature drops below
/// `min_temperature`, whichever happens first.
///
/// # Examples
///
/// ```
/// use u_facility::sa::{SaConfig, CoolingSchedule};
///
/// let config = SaConfig::default()
///     .with_initial_temperature(1000.0)
///     .with_cooling(CoolingSchedule::Geometric { alpha: 0.95 })
///     .with_max_iterations(1000)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaConfig {
    /// Initial temperature. Higher values allow more exploration.
    pub initial_temperature: f64,

    /// Temperature floor. The search stops when T drops below this.
    pub min_temperature: f64,

    /// Cooling schedule.
    pub cooling: CoolingSchedule,

    /// Maximum number of iterations. 0 = stop on temperature only.
    pub max_iterations: usize,

    /// Record the best cost every this many iterations. 0 = only the
    /// initial and final entries.
    pub history_interval: usize,

    /// Random seed for reproducibility. `None` draws a fresh seed.
    pub seed: Option<u64>,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 500.0,
            min_temperature: 1e-3,
            cooling: CoolingSchedule::default(),
            max_iterations: 500,
            history_interval: 1,
            seed: None,
        }
    }
}

impl SaConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    pub fn with_cooling(mut self, cooling: CoolingSchedule) -> Self {
        self.cooling = cooling;
        self
    }

    /// Shorthand for geometric cooling with the given rate.
    pub fn with_cooling_rate(self, alpha: f64) -> Self {
        self.with_cooling(CoolingSchedule::Geometric { alpha })
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_history_interval(mut self, n: usize) -> Self {
        self.history_interval = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if !(self.initial_temperature > 0.0 && self.initial_temperature.is_finite()) {
            return Err(invalid("initial_temperature must be positive and finite"));
        }
        if !(self.min_temperature > 0.0) {
            return Err(invalid("min_temperature must be positive"));
        }
        if self.min_temperature >= self.initial_temperature {
            return Err(invalid("min_temperature must be less than initial_temperature"));
        }
        match self.cooling {
            CoolingSchedule::Geometric { alpha } => {
                if !(alpha > 0.0 && alpha < 1.0) {
                    return Err(invalid(format!("geometric alpha must be in (0, 1), got {alpha}")));
                }
            }
            CoolingSchedule::LundyMees { beta } => {
                if !(beta > 0.0 && beta.is_finite()) {
                    return Err(invalid(format!("lundy-mees beta must be positive, got {beta}")));
                }
            }
            CoolingSchedule::Linear => {}
        }
        Ok(())
    }
}

fn invalid(msg: impl Into<String>) -> FacilityError {
    FacilityError::InvalidConfig(msg.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SaConfig::default();
        assert!((config.initial_temperature - 500.0).abs() < 1e-10);
        assert!((config.min_temperature - 1e-3).abs() < 1e-15);
        assert_eq!(config.cooling, CoolingSchedule::Geometric { alpha: 0.9 });
        assert_eq!(config.max_iterations, 500);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_validate_ok() {
        assert!(SaConfig::default().validate().is_ok());
        assert!(SaConfig::default()
            .with_cooling(CoolingSchedule::Linear)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_validate_bad_temperature() {
        let config = SaConfig::default().with_initial_temperature(-1.0);
        assert!(config.validate().is_err());

        let config = SaConfig::default().with_initial_temperature(f64::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_min_ge_initial() {
        let config = SaConfig::default()
            .with_initial_temperature(10.0)
            .with_min_temperature(20.0);
        assert!(matches!(config.validate(), Err(FacilityError::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_bad_alpha() {
        assert!(SaConfig::default().with_cooling_rate(1.5).validate().is_err());
        assert!(SaConfig::default().with_cooling_rate(1.0).validate().is_err());
        assert!(SaConfig::default().with_cooling_rate(0.0).validate().is_err());
    }

    #[test]
    fn test_validate_bad_beta() {
        let config = SaConfig::default().with_cooling(CoolingSchedule::LundyMees { beta: -1.0 });
        assert!(config.validate().is_err());
    }
}
