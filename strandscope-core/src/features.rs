//! Nearest-neighbor feature extraction for a single window.

use crate::constants::{
    BENDABILITY_INDEX, DELTA_H, DELTA_S_CAL, HBOND_PER_BASE, STACK_E_KCAL, T_KELVIN, Z_VEC,
};
use crate::sequence::Nucleotide;
use crate::thermo::SaltModel;
use crate::types::{BiophysicalFeatures, Feature, FeatureVector};

/// Salt conditions shared by every window of a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SaltConditions {
    /// Monovalent cation concentration (molar)
    pub monovalent: f64,
    /// Divalent (Mg2+) concentration (molar)
    pub divalent: f64,
    pub model: SaltModel,
}

impl SaltConditions {
    #[must_use]
    pub fn effective_salt(&self) -> f64 {
        self.model.effective_salt(self.monovalent, self.divalent)
    }

    #[must_use]
    pub fn melting_temperature(&self, gc_fraction: f64) -> f64 {
        self.model
            .melting_temperature(gc_fraction, self.monovalent, self.divalent)
    }
}

/// Compute the 8-component biophysical profile of one sanitized window.
///
/// Per-base channels (GC, H-bonds, displacement) are divided by the window
/// length, with `N` contributing nothing. Pair channels (stacking, free
/// energy, bendability) use only pairs whose two bases are both known and are
/// divided by `max(pair_count, 1)`.
///
/// # Examples
///
/// ```rust
/// use strandscope_core::features::{calculate_window_features, SaltConditions};
/// use strandscope_core::thermo::SaltModel;
///
/// let salt = SaltConditions { monovalent: 0.1, divalent: 0.0015, model: SaltModel::default() };
/// let f = calculate_window_features("GGGGGGGGGGGGGGG", &salt);
/// assert_eq!(f.gc(), 1.0);
/// assert_eq!(f.hb_per_base(), 3.0);
/// assert!(f.dg_per_base() < 0.0);
/// ```
#[must_use]
pub fn calculate_window_features(window: &str, salt: &SaltConditions) -> BiophysicalFeatures {
    let bases: Vec<Option<Nucleotide>> = window.bytes().map(Nucleotide::from_byte).collect();
    let length = bases.len();

    let mut gc_count = 0usize;
    let mut hb_sum = 0.0;
    let mut displacement = [0.0f64; 3];
    for base in bases.iter().flatten() {
        let id = base.index();
        if base.is_gc() {
            gc_count += 1;
        }
        hb_sum += HBOND_PER_BASE[id];
        for (axis, sum) in displacement.iter_mut().enumerate() {
            *sum += Z_VEC[id][axis];
        }
    }

    let mut stack_sum = 0.0;
    let mut enthalpy_sum = 0.0;
    let mut entropy_sum = 0.0;
    let mut bend_sum = 0.0;
    let mut pair_count = 0usize;
    for pair in bases.windows(2) {
        if let [Some(current), Some(next)] = pair {
            let (i, j) = (current.index(), next.index());
            stack_sum += STACK_E_KCAL[i][j];
            enthalpy_sum += DELTA_H[i][j];
            entropy_sum += DELTA_S_CAL[i][j];
            bend_sum += BENDABILITY_INDEX[i][j];
            pair_count += 1;
        }
    }

    entropy_sum += salt
        .model
        .entropy_correction(pair_count, salt.monovalent, salt.divalent);
    let free_energy = enthalpy_sum - T_KELVIN * (entropy_sum / 1000.0);

    let per_base = length.max(1) as f64;
    let per_pair = pair_count.max(1) as f64;

    let mut features = FeatureVector::zeros();
    features[Feature::Gc] = gc_count as f64 / per_base;
    features[Feature::HBond] = hb_sum / per_base;
    features[Feature::Stack] = stack_sum / per_pair;
    features[Feature::Dg] = free_energy / per_pair;
    features[Feature::Zx] = displacement[0] / per_base;
    features[Feature::Zy] = displacement[1] / per_base;
    features[Feature::Zz] = displacement[2] / per_base;
    features[Feature::Bend] = bend_sum / per_pair;
    features
}
