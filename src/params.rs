use std::convert::TryFrom;
use std::fs;

use serde::{Serialize, Deserialize};

use crate::error::ColorError;

/// default probability of a global (pollination) move
pub const DEFAULT_SWITCH_PROBABILITY:f64 = 0.2;

/// default upper bound on Lévy steps
pub const DEFAULT_MAX_STEP:f64 = 1000.;

/// default number of generations without improvement before a member restarts
pub const DEFAULT_LIFETIME_LIMIT:usize = 30;

/** search parameters. Checked by `validate` before any search starts. */
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Parameters {
    /// number of colorings in the population (n)
    pub population_size: usize,
    /// maximum number of generations per trial (t)
    pub generations: usize,
    /// Lévy scale (c)
    pub lambda: f64,
    /// fraction of the population kept by the selection
    pub gamma: f64,
    /// probability that a member copies part of the elite instead of a local move
    pub switch_probability: f64,
    /// upper bound on the Lévy steps
    pub max_step: f64,
    /// generations without improvement after which a member is randomly re-initialized
    pub lifetime_limit: usize,
}

impl Parameters {
    /// returns a configuration error if a parameter is out of its domain
    pub fn validate(&self) -> Result<(), ColorError> {
        if self.population_size < 1 {
            return Err(ColorError::config("population_size must be at least 1"));
        }
        if self.generations < 1 {
            return Err(ColorError::config("generations must be at least 1"));
        }
        if !(self.lambda.is_finite() && self.lambda > 0.) {
            return Err(ColorError::config(format!("lambda must be positive (got {})", self.lambda)));
        }
        if !(self.gamma > 0. && self.gamma <= 1.) {
            return Err(ColorError::config(format!("gamma must be in (0,1] (got {})", self.gamma)));
        }
        if !(0. ..=1.).contains(&self.switch_probability) {
            return Err(ColorError::config(format!(
                "switch_probability must be in [0,1] (got {})", self.switch_probability
            )));
        }
        if !(self.max_step.is_finite() && self.max_step > 0.) {
            return Err(ColorError::config(format!("max_step must be positive (got {})", self.max_step)));
        }
        if self.lifetime_limit < 1 {
            return Err(ColorError::config("lifetime_limit must be at least 1"));
        }
        Ok(())
    }

    /// number of survivors kept by the selection: ceil(γ.n) bounded by [1,n]
    pub fn nb_survivors(&self) -> usize {
        let s = (self.gamma * self.population_size as f64).ceil() as usize;
        s.max(1).min(self.population_size)
    }
}


/** parameters as read from the command line or a JSON file, before validation.
The four search parameters have no default: a missing one is rejected.
*/
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawParameters {
    /// population size (required)
    pub population_size: Option<usize>,
    /// generations per trial (required)
    pub generations: Option<usize>,
    /// Lévy scale (required)
    pub lambda: Option<f64>,
    /// survivor fraction (required)
    pub gamma: Option<f64>,
    /// global move probability (optional)
    pub switch_probability: Option<f64>,
    /// maximum Lévy step (optional)
    pub max_step: Option<f64>,
    /// generations without improvement before a restart (optional)
    pub lifetime_limit: Option<usize>,
}

impl RawParameters {
    /// reads parameters from a JSON file
    pub fn from_json_file(filename:&str) -> Result<Self, ColorError> {
        let content = fs::read_to_string(filename)?;
        let res = serde_json::from_str(&content)?;
        Ok(res)
    }

    /// values defined in other replace the ones of self
    pub fn overridden_by(self, other:RawParameters) -> Self {
        Self {
            population_size: other.population_size.or(self.population_size),
            generations: other.generations.or(self.generations),
            lambda: other.lambda.or(self.lambda),
            gamma: other.gamma.or(self.gamma),
            switch_probability: other.switch_probability.or(self.switch_probability),
            max_step: other.max_step.or(self.max_step),
            lifetime_limit: other.lifetime_limit.or(self.lifetime_limit),
        }
    }
}

fn required<T>(value:Option<T>, name:&str) -> Result<T, ColorError> {
    value.ok_or_else(|| ColorError::config(format!("missing required parameter '{}'", name)))
}

impl TryFrom<RawParameters> for Parameters {
    type Error = ColorError;

    fn try_from(raw:RawParameters) -> Result<Self, Self::Error> {
        let res = Self {
            population_size: required(raw.population_size, "population_size")?,
            generations: required(raw.generations, "generations")?,
            lambda: required(raw.lambda, "lambda")?,
            gamma: required(raw.gamma, "gamma")?,
            switch_probability: raw.switch_probability.unwrap_or(DEFAULT_SWITCH_PROBABILITY),
            max_step: raw.max_step.unwrap_or(DEFAULT_MAX_STEP),
            lifetime_limit: raw.lifetime_limit.unwrap_or(DEFAULT_LIFETIME_LIMIT),
        };
        res.validate()?;
        Ok(res)
    }
}
