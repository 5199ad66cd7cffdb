//! Salt correction policy and melting temperature.
//!
//! Two salt models are available. [`SaltModel::MagnesiumEquivalent`] folds the
//! divalent concentration into an equivalent monovalent one
//! (`[Na+] + 120·sqrt([Mg2+])`) and is the default.
//! [`SaltModel::MonovalentOnly`] ignores magnesium entirely.
//! Whichever model is selected drives both the nearest-neighbor entropy
//! correction and the melting-temperature estimate.

use serde::Serialize;

use crate::constants::{
    K_SALT, MAGNESIUM_EQUIVALENCE, MIN_EFFECTIVE_SALT, TM_GC_SLOPE, TM_INTERCEPT, TM_SALT_SLOPE,
};

/// How cation concentrations are folded into the thermodynamic model.
///
/// # Examples
///
/// ```rust
/// use strandscope_core::thermo::SaltModel;
///
/// let salt = SaltModel::MagnesiumEquivalent.effective_salt(0.1, 0.0025);
/// assert!((salt - 6.1).abs() < 1e-12);
///
/// let salt = SaltModel::MonovalentOnly.effective_salt(0.1, 0.0025);
/// assert_eq!(salt, 0.1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SaltModel {
    /// `[Na+] + 120·sqrt(max([Mg2+], 0))`
    #[default]
    MagnesiumEquivalent,
    /// `[Na+]` alone
    MonovalentOnly,
}

impl SaltModel {
    /// Monovalent-equivalent cation concentration (molar), before flooring.
    #[must_use]
    pub fn effective_salt(self, monovalent: f64, divalent: f64) -> f64 {
        match self {
            Self::MagnesiumEquivalent => {
                monovalent + MAGNESIUM_EQUIVALENCE * divalent.max(0.0).sqrt()
            }
            Self::MonovalentOnly => monovalent,
        }
    }

    /// Entropy correction in cal/(K·mol) for `pair_count` valid nearest-neighbor pairs.
    #[must_use]
    pub fn entropy_correction(self, pair_count: usize, monovalent: f64, divalent: f64) -> f64 {
        let salt = self
            .effective_salt(monovalent, divalent)
            .max(MIN_EFFECTIVE_SALT);
        K_SALT * pair_count as f64 * salt.ln()
    }

    /// Salt-adjusted melting temperature (°C) for a given GC fraction.
    #[must_use]
    pub fn melting_temperature(self, gc_fraction: f64, monovalent: f64, divalent: f64) -> f64 {
        melting_temperature(gc_fraction, self.effective_salt(monovalent, divalent))
    }
}

/// `Tm = 64.9 + 41·(gc − 0.5) + 16.6·log10(max(salt, 1e-5))`
#[must_use]
pub fn melting_temperature(gc_fraction: f64, effective_salt: f64) -> f64 {
    TM_INTERCEPT
        + TM_GC_SLOPE * (gc_fraction - 0.5)
        + TM_SALT_SLOPE * effective_salt.max(MIN_EFFECTIVE_SALT).log10()
}
