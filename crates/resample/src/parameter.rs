//! Static per-parameter metadata and the lookup table.

use std::collections::BTreeMap;

use aeolus_series::MissingPolicy;
use tracing::warn;

use crate::error::ResampleError;

/// Offset between Kelvin and degrees Celsius.
pub const KELVIN_OFFSET: f64 = 273.15;

/// Pascal per hectopascal.
pub const PA_PER_HPA: f64 = 100.0;

/// Converts a mass flux in kg m-2 s-1 to mm h-1.
pub const SECONDS_PER_HOUR: f64 = 3600.0;

/// Upper bound for stomatal resistance, in s/m.
pub const STOMATAL_RESISTANCE_MAX: f64 = 20000.0;

/// How samples inside one bucket are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Aggregation {
    /// Mean of the non-missing samples; all-missing bucket gives `NaN`.
    #[default]
    Mean,
    /// Sum of the non-missing samples; all-missing bucket gives 0.0.
    Sum,
}

/// Sign convention of the source relative to the comparison convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sign {
    /// Source already uses the comparison convention.
    #[default]
    Keep,
    /// Source is defined with the opposite sign.
    Flip,
}

impl Sign {
    fn factor(self) -> f64 {
        match self {
            Self::Keep => 1.0,
            Self::Flip => -1.0,
        }
    }
}

/// Static metadata for one physical variable.
///
/// Resampling applies, in order: the clamp to raw samples, the bucket
/// aggregation, then `value * sign * scale + offset`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSpec {
    name: String,
    aggregation: Aggregation,
    sign: Sign,
    scale: f64,
    offset: f64,
    clamp_max: Option<f64>,
    missing: MissingPolicy,
}

impl ParameterSpec {
    /// Mean-aggregated parameter with no transform.
    pub fn mean(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aggregation: Aggregation::Mean,
            sign: Sign::Keep,
            scale: 1.0,
            offset: 0.0,
            clamp_max: None,
            missing: MissingPolicy::Fail,
        }
    }

    /// Sum-aggregated parameter with no transform.
    pub fn sum(name: impl Into<String>) -> Self {
        Self {
            aggregation: Aggregation::Sum,
            ..Self::mean(name)
        }
    }

    /// Negates the aggregated value.
    pub fn flipped(mut self) -> Self {
        self.sign = Sign::Flip;
        self
    }

    /// Multiplies the aggregated value by `factor`.
    pub fn scaled(mut self, factor: f64) -> Self {
        self.scale = factor;
        self
    }

    /// Adds `offset` to the aggregated value after scaling.
    pub fn shifted(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    /// Caps raw samples at `max` before aggregation.
    pub fn clamped_at(mut self, max: f64) -> Self {
        self.clamp_max = Some(max);
        self
    }

    /// Sets the missing-column policy.
    pub fn on_missing(mut self, policy: MissingPolicy) -> Self {
        self.missing = policy;
        self
    }

    /// Parameter name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Aggregation verb.
    pub fn aggregation(&self) -> Aggregation {
        self.aggregation
    }

    /// Sign convention.
    pub fn sign(&self) -> Sign {
        self.sign
    }

    /// Multiplicative unit factor.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Additive unit offset.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Upper clamp for raw samples.
    pub fn clamp_max(&self) -> Option<f64> {
        self.clamp_max
    }

    /// Missing-column policy.
    pub fn missing_policy(&self) -> &MissingPolicy {
        &self.missing
    }

    /// Caps one raw sample. `NaN` passes through.
    pub fn clamp(&self, raw: f64) -> f64 {
        match self.clamp_max {
            Some(max) if raw > max => max,
            _ => raw,
        }
    }

    /// Applies sign, scale and offset to one aggregated value.
    pub fn transform(&self, aggregated: f64) -> f64 {
        aggregated * self.sign.factor() * self.scale + self.offset
    }

    fn validate(&self) -> Result<(), ResampleError> {
        let invalid = |reason: &str| ResampleError::InvalidSpec {
            name: self.name.clone(),
            reason: reason.to_string(),
        };
        if !self.scale.is_finite() || self.scale == 0.0 {
            return Err(invalid("scale must be finite and non-zero"));
        }
        if !self.offset.is_finite() {
            return Err(invalid("offset must be finite"));
        }
        if let Some(max) = self.clamp_max
            && !max.is_finite()
        {
            return Err(invalid("clamp must be finite"));
        }
        Ok(())
    }
}

/// Lookup from parameter name to its [`ParameterSpec`].
///
/// Holds at most one spec per name.
#[derive(Debug, Clone, Default)]
pub struct ParameterTable {
    specs: BTreeMap<String, ParameterSpec>,
}

impl ParameterTable {
    /// Builds a table from specs.
    ///
    /// # Errors
    ///
    /// Returns [`ResampleError::DuplicateParameter`] if a name appears twice,
    /// or [`ResampleError::InvalidSpec`] if a spec has non-finite factors.
    pub fn new(specs: impl IntoIterator<Item = ParameterSpec>) -> Result<Self, ResampleError> {
        let mut table = BTreeMap::new();
        for spec in specs {
            spec.validate()?;
            if table.contains_key(spec.name()) {
                return Err(ResampleError::DuplicateParameter {
                    name: spec.name().to_string(),
                });
            }
            table.insert(spec.name().to_string(), spec);
        }
        Ok(Self { specs: table })
    }

    /// The built-in table for regional-model output and the observation
    /// products it is compared against.
    pub fn standard() -> Self {
        Self::new(standard_specs()).expect("built-in parameter table is valid")
    }

    /// Returns a copy of this table with `spec` added or replaced.
    ///
    /// # Errors
    ///
    /// Returns [`ResampleError::InvalidSpec`] if the spec has non-finite factors.
    pub fn with(mut self, spec: ParameterSpec) -> Result<Self, ResampleError> {
        spec.validate()?;
        self.specs.insert(spec.name().to_string(), spec);
        Ok(self)
    }

    /// Exact lookup.
    pub fn get(&self, name: &str) -> Option<&ParameterSpec> {
        self.specs.get(name)
    }

    /// Lookup that falls back to plain mean aggregation for unknown names.
    pub fn resolve(&self, name: &str) -> ParameterSpec {
        match self.get(name) {
            Some(spec) => spec.clone(),
            None => {
                warn!(parameter = name, "no parameter spec, using plain mean");
                ParameterSpec::mean(name)
            }
        }
    }

    /// Known parameter names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.specs.keys().map(String::as_str)
    }

    /// Number of specs.
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Returns `true` if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

fn standard_specs() -> Vec<ParameterSpec> {
    let mut specs = Vec::new();

    // Model turbulent fluxes are downward-positive.
    for name in ["LHFL_S", "SHFL_S"] {
        specs.push(ParameterSpec::mean(name).flipped());
    }
    for name in ["T_2M", "T_S", "TD_2M", "T_G"] {
        specs.push(ParameterSpec::mean(name).shifted(-KELVIN_OFFSET));
    }
    for name in ["ZTRANG", "ZTRALEAF", "ZVERBO"] {
        specs.push(
            ParameterSpec::mean(name)
                .flipped()
                .scaled(SECONDS_PER_HOUR),
        );
    }
    specs.push(ParameterSpec::mean("PS").scaled(1.0 / PA_PER_HPA));
    specs.push(ParameterSpec::sum("AEVAP_S").flipped());
    specs.push(ParameterSpec::mean("RSTOM").clamped_at(STOMATAL_RESISTANCE_MAX));

    // Observation products.
    specs.push(
        ParameterSpec::mean("LE_CORR")
            .on_missing(MissingPolicy::SubstituteColumn("LE_F_MDS".to_string())),
    );
    specs.push(
        ParameterSpec::mean("H_CORR")
            .on_missing(MissingPolicy::SubstituteColumn("H_F_MDS".to_string())),
    );
    specs.push(ParameterSpec::mean("G_F_MDS").on_missing(MissingPolicy::SubstituteNan));
    for name in ["Et", "Eb", "Ei", "Es", "Ew"] {
        specs.push(ParameterSpec::mean(name).on_missing(MissingPolicy::SubstituteZero));
    }

    specs
}
