//! Independent annealing runs from different seeds.
//!
//! Each start owns its random stream and search state; only the read-only
//! [`Instance`] is shared. With the `parallel` feature the starts run on
//! rayon's thread pool. Results do not depend on whether the starts ran in
//! parallel, since start `k` always uses seed `base_seed + k`.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::{FacilityError, Result};
use crate::facility::FacilityProblem;
use crate::model::{Instance, Solution};
use crate::sa::{SaConfig, SaResult, SaRunner};

/// Configuration for [`MultiStart`].
///
/// # Examples
///
/// ```
/// use u_facility::multistart::MultiStartConfig;
///
/// let config = MultiStartConfig::default().with_starts(16).with_base_seed(100);
/// assert_eq!(config.starts, 16);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MultiStartConfig {
    /// Number of independent runs. Must be at least 1.
    pub starts: usize,
    /// Seed of start 0; start `k` uses `base_seed + k`.
    pub base_seed: u64,
    /// Facilities flipped per move.
    pub flip_count: usize,
    /// Run starts on the rayon pool (only with the `parallel` feature).
    pub parallel: bool,
}

impl Default for MultiStartConfig {
    fn default() -> Self {
        Self {
            starts: 8,
            base_seed: 42,
            flip_count: 1,
            parallel: true,
        }
    }
}

impl MultiStartConfig {
    pub fn with_starts(mut self, n: usize) -> Self {
        self.starts = n;
        self
    }

    pub fn with_base_seed(mut self, seed: u64) -> Self {
        self.base_seed = seed;
        self
    }

    pub fn with_flip_count(mut self, n: usize) -> Self {
        self.flip_count = n;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.starts == 0 {
            return Err(FacilityError::InvalidConfig("starts must be at least 1".into()));
        }
        if self.flip_count == 0 {
            return Err(FacilityError::InvalidConfig("flip_count must be at least 1".into()));
        }
        Ok(())
    }
}

/// Outcome of a multi-start run.
#[derive(Debug, Clone)]
pub struct MultiStartResult {
    /// Result of the winning start.
    pub best: SaResult<Solution>,
    /// Index of the winning start (lowest index on ties).
    pub best_start: usize,
    /// Best cost reached by each start, in start order.
    pub start_costs: Vec<f64>,
}

/// Runs several annealing searches and keeps the cheapest.
pub struct MultiStart;

impl MultiStart {
    /// `sa.seed` is ignored; seeds come from `config.base_seed`.
    pub fn run(
        instance: &Instance,
        sa: &SaConfig,
        config: &MultiStartConfig,
    ) -> Result<MultiStartResult> {
        sa.validate()?;
        config.validate()?;

        let problem = FacilityProblem::new(instance).with_flip_count(config.flip_count);
        let run_one = |k: usize| {
            let seed = config.base_seed.wrapping_add(k as u64);
            SaRunner::run(&problem, &sa.clone().with_seed(seed))
        };

        #[cfg(feature = "parallel")]
        let results: Vec<SaResult<Solution>> = if config.parallel {
            (0..config.starts)
                .into_par_iter()
                .map(run_one)
                .collect::<Result<_>>()?
        } else {
            (0..config.starts).map(run_one).collect::<Result<_>>()?
        };

        #[cfg(not(feature = "parallel"))]
        let results: Vec<SaResult<Solution>> =
            (0..config.starts).map(run_one).collect::<Result<_>>()?;

        let start_costs: Vec<f64> = results.iter().map(|r| r.best_cost).collect();
        let mut best_start = 0;
        for (k, &cost) in start_costs.iter().enumerate().skip(1) {
            if cost < start_costs[best_start] {
                best_start = k;
            }
        }
        tracing::debug!(
            starts = config.starts,
            best_start,
            best_cost = start_costs[best_start],
            "multi-start finished"
        );

        let best = results.into_iter().nth(best_start).ok_or_else(|| {
            FacilityError::InvalidConfig("multi-start produced no results".into())
        })?;

        Ok(MultiStartResult {
            best,
            best_start,
            start_costs,
        })
    }
}
