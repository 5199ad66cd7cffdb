use serde::Serialize;

use crate::constants::{
    DEFAULT_DIVALENT_SALT, DEFAULT_MONOVALENT_SALT, DEFAULT_STRIDE, DEFAULT_THRESHOLD,
    DEFAULT_WINDOW_SIZE,
};
use crate::features::SaltConditions;
use crate::thermo::SaltModel;
use crate::types::StrandscopeError;

/// Output format options for analysis results.
///
/// # Formats
///
/// - **TSV**: One row per window with coordinates, features, scores and labels
/// - **JSON**: The complete result object, including statistics and configuration
/// - **Report**: Plain-text diagnostic report for anomalous windows only
///
/// # Examples
///
/// ```rust
/// use strandscope_core::config::OutputFormat;
///
/// assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
/// assert!("gbk".parse::<OutputFormat>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Tab-separated table, one line per window.
    ///
    /// Lightweight and easy to load into spreadsheets or dataframes.
    #[default]
    Tsv,

    /// Full result serialized with `serde_json`.
    Json,

    /// Human-readable diagnostic report.
    ///
    /// Lists every anomalous window with its top drivers and a biological
    /// hypothesis.
    Report,
}

impl std::str::FromStr for OutputFormat {
    type Err = StrandscopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tsv" => Ok(Self::Tsv),
            "json" => Ok(Self::Json),
            "report" => Ok(Self::Report),
            other => Err(StrandscopeError::InvalidParameter(format!(
                "unknown output format '{other}'"
            ))),
        }
    }
}

/// Configuration settings for a windowed analysis run.
///
/// # Examples
///
/// ## Default configuration
///
/// ```rust
/// use strandscope_core::config::AnalysisConfig;
///
/// let config = AnalysisConfig::default();
/// assert_eq!(config.window_size, 15);
/// assert_eq!(config.stride, 5);
/// ```
///
/// ## Low-salt run on a dedicated pool
///
/// ```rust
/// use strandscope_core::config::AnalysisConfig;
/// use strandscope_core::thermo::SaltModel;
///
/// let config = AnalysisConfig {
///     monovalent_salt: 0.05,
///     salt_model: SaltModel::MonovalentOnly,
///     num_threads: Some(2),
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisConfig {
    /// Z-score magnitude above which a single channel flags a window.
    ///
    /// The multivariate rule fires at twice this value.
    ///
    /// **Default**: `3.0`
    pub threshold: f64,

    /// Window length in bases.
    ///
    /// **Default**: `15`
    pub window_size: usize,

    /// Distance between consecutive window starts.
    ///
    /// **Default**: `5`
    pub stride: usize,

    /// Monovalent cation concentration in molar.
    ///
    /// **Default**: `0.1`
    pub monovalent_salt: f64,

    /// Divalent (Mg2+) concentration in molar.
    ///
    /// Ignored by [`SaltModel::MonovalentOnly`].
    ///
    /// **Default**: `0.0015`
    pub divalent_salt: f64,

    /// How salt enters the entropy correction and Tm.
    ///
    /// **Default**: [`SaltModel::MagnesiumEquivalent`]
    pub salt_model: SaltModel,

    /// Number of worker threads for the analysis.
    ///
    /// When set, each analyzer runs its phases on a dedicated Rayon pool of
    /// this size. Results do not depend on the thread count.
    ///
    /// **Default**: `None` (use the global Rayon pool)
    pub num_threads: Option<usize>,

    /// Suppress informational log output.
    ///
    /// The per-run summary is logged at `debug` instead of `info`.
    ///
    /// **Default**: `false`
    #[serde(skip)]
    pub quiet: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            window_size: DEFAULT_WINDOW_SIZE,
            stride: DEFAULT_STRIDE,
            monovalent_salt: DEFAULT_MONOVALENT_SALT,
            divalent_salt: DEFAULT_DIVALENT_SALT,
            salt_model: SaltModel::default(),
            num_threads: None,
            quiet: false,
        }
    }
}

impl AnalysisConfig {
    /// Reject parameters that make the computation meaningless.
    ///
    /// # Errors
    ///
    /// Returns [`StrandscopeError::InvalidParameter`] for a zero window size,
    /// zero stride, zero thread count, or a threshold or salt concentration
    /// that is not a finite number.
    pub fn validate(&self) -> Result<(), StrandscopeError> {
        if self.window_size == 0 {
            return Err(StrandscopeError::InvalidParameter(
                "window size must be at least 1".to_string(),
            ));
        }
        if self.stride == 0 {
            return Err(StrandscopeError::InvalidParameter(
                "stride must be at least 1".to_string(),
            ));
        }
        if self.num_threads == Some(0) {
            return Err(StrandscopeError::InvalidParameter(
                "thread count must be at least 1".to_string(),
            ));
        }
        for (name, value) in [
            ("threshold", self.threshold),
            ("monovalent salt", self.monovalent_salt),
            ("divalent salt", self.divalent_salt),
        ] {
            if !value.is_finite() {
                return Err(StrandscopeError::InvalidParameter(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }
        Ok(())
    }

    #[must_use]
    pub const fn salt_conditions(&self) -> SaltConditions {
        SaltConditions {
            monovalent: self.monovalent_salt,
            divalent: self.divalent_salt,
            model: self.salt_model,
        }
    }
}
