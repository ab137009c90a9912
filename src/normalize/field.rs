//! Field descriptors: alias chain, default and floor for one logical input.

use crate::models::SimulationParameters;

/// Describes how one logical quantity is read from a parameter record.
///
/// # Resolution
/// 1. Walk the alias chain; the first *populated* alias wins. An alias is
///    populated when present and coercible to a finite, non-zero number.
/// 2. Otherwise use the default.
/// 3. Counts are truncated toward negative infinity (`floor`).
/// 4. The result is raised to the floor.
///
/// # Example
/// ```
/// use u_hospital::normalize::FieldSpec;
/// use u_hospital::models::SimulationParameters;
///
/// let doctors = FieldSpec::new("doctors").default_value(1.0).floor(1.0).count();
/// let params = SimulationParameters::new().with("doctors", "3.7");
/// assert_eq!(doctors.resolve(&params), 3.0);
/// assert_eq!(doctors.resolve(&SimulationParameters::new()), 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    aliases: Vec<&'static str>,
    default: f64,
    floor: f64,
    count: bool,
    positive_only: bool,
}

impl FieldSpec {
    /// Creates a field read under `name`, default 0, floor 0.
    pub fn new(name: &'static str) -> Self {
        Self {
            aliases: vec![name],
            default: 0.0,
            floor: 0.0,
            count: false,
            positive_only: false,
        }
    }

    /// Appends a fallback alias.
    pub fn alias(mut self, name: &'static str) -> Self {
        self.aliases.push(name);
        self
    }

    /// Sets the default used when no alias is populated.
    pub fn default_value(mut self, default: f64) -> Self {
        self.default = default;
        self
    }

    /// Sets the domain floor.
    pub fn floor(mut self, floor: f64) -> Self {
        self.floor = floor;
        self
    }

    /// Marks the field as an integer count.
    pub fn count(mut self) -> Self {
        self.count = true;
        self
    }

    /// Treats non-positive values as unpopulated (e.g. durations).
    pub fn positive_only(mut self) -> Self {
        self.positive_only = true;
        self
    }

    /// Primary field name.
    pub fn name(&self) -> &'static str {
        self.aliases[0]
    }

    /// All names this field is read under, primary first.
    pub fn aliases(&self) -> &[&'static str] {
        &self.aliases
    }

    /// First populated alias value, before default and floor.
    pub fn lookup(&self, params: &SimulationParameters) -> Option<f64> {
        self.aliases
            .iter()
            .filter_map(|alias| params.number(alias))
            .find(|&v| v != 0.0 && (!self.positive_only || v > 0.0))
    }

    /// Resolves the field with its own default.
    pub fn resolve(&self, params: &SimulationParameters) -> f64 {
        self.resolve_or(params, self.default)
    }

    /// Resolves the field with a caller-computed default.
    ///
    /// Used when the default depends on another resolved field
    /// (e.g. doctors defaulting to a fifth of the beds).
    pub fn resolve_or(&self, params: &SimulationParameters, default: f64) -> f64 {
        let raw = self.lookup(params).unwrap_or(default);
        let value = if self.count { raw.floor() } else { raw };
        value.max(self.floor)
    }
}
