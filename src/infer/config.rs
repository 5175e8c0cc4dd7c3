use std::path::Path;

use crate::foundation::error::{FlexError, FlexResult};

/// Gap below which two consecutive siblings still count as non-overlapping.
pub const OVERLAP_TOLERANCE: f64 = 1.0;
/// Cross-axis center offset beyond which a child is aligned to an edge.
pub const CENTER_THRESHOLD: f64 = 4.0;
/// Difference under which opposite paddings collapse to one value.
pub const SYMMETRY_TOLERANCE: f64 = 0.5;
/// Mean gap below which children are treated as touching.
pub const MIN_SPACING: f64 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
/// Thresholds used by the inference passes.
pub struct InferenceConfig {
    /// See [`OVERLAP_TOLERANCE`].
    pub overlap_tolerance: f64,
    /// See [`CENTER_THRESHOLD`].
    pub center_threshold: f64,
    /// See [`SYMMETRY_TOLERANCE`].
    pub symmetry_tolerance: f64,
    /// See [`MIN_SPACING`].
    pub min_spacing: f64,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            overlap_tolerance: OVERLAP_TOLERANCE,
            center_threshold: CENTER_THRESHOLD,
            symmetry_tolerance: SYMMETRY_TOLERANCE,
            min_spacing: MIN_SPACING,
        }
    }
}

impl InferenceConfig {
    pub fn validate(&self) -> FlexResult<()> {
        for (name, value) in [
            ("overlapTolerance", self.overlap_tolerance),
            ("centerThreshold", self.center_threshold),
            ("symmetryTolerance", self.symmetry_tolerance),
            ("minSpacing", self.min_spacing),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(FlexError::validation(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        Ok(())
    }

    /// Read a JSON config file; missing keys keep their defaults.
    pub fn from_path(path: &Path) -> FlexResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            FlexError::Other(anyhow::Error::new(e).context(format!(
                "read config '{}'",
                path.display()
            )))
        })?;
        let cfg: Self =
            serde_json::from_str(&json).map_err(|e| FlexError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }
}
