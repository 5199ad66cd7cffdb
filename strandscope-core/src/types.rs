use std::fmt;
use std::ops::{Index, IndexMut};

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use thiserror::Error;

/// Number of biophysical features computed per window.
pub const FEATURE_COUNT: usize = 8;

/// The biophysical channels computed for every window.
///
/// The declaration order is the iteration order everywhere in the crate:
/// feature vectors, statistics, contributions and serialized output.
///
/// # Examples
///
/// ```rust
/// use strandscope_core::types::Feature;
///
/// assert_eq!(Feature::Dg.index(), 3);
/// assert_eq!(Feature::Dg.key(), "dG_per_base");
/// assert_eq!(Feature::ALL.len(), 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Feature {
    /// GC + 5mC fraction
    Gc,
    /// Hydrogen bonds per base
    HBond,
    /// Stacking energy per valid base pair
    Stack,
    /// Gibbs free energy per valid base pair
    Dg,
    /// Mean helical displacement, x axis
    Zx,
    /// Mean helical displacement, y axis
    Zy,
    /// Mean helical displacement, z axis
    Zz,
    /// Bendability index per valid base pair
    Bend,
}

impl Feature {
    /// All features in vector order
    pub const ALL: [Self; FEATURE_COUNT] = [
        Self::Gc,
        Self::HBond,
        Self::Stack,
        Self::Dg,
        Self::Zx,
        Self::Zy,
        Self::Zz,
        Self::Bend,
    ];

    /// Position of this feature inside a [`FeatureVector`]
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Gc => 0,
            Self::HBond => 1,
            Self::Stack => 2,
            Self::Dg => 3,
            Self::Zx => 4,
            Self::Zy => 5,
            Self::Zz => 6,
            Self::Bend => 7,
        }
    }

    /// Stable key used in serialized output
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Gc => "gc",
            Self::HBond => "hb_per_base",
            Self::Stack => "stack_per_base",
            Self::Dg => "dG_per_base",
            Self::Zx => "zx",
            Self::Zy => "zy",
            Self::Zz => "zz",
            Self::Bend => "bendability",
        }
    }

    /// Short upper-case label for reports
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Gc => "GC",
            Self::HBond => "HBOND",
            Self::Stack => "STACK",
            Self::Dg => "DG",
            Self::Zx => "ZX",
            Self::Zy => "ZY",
            Self::Zz => "ZZ",
            Self::Bend => "BEND",
        }
    }

    /// Whether this feature is one of the helical displacement axes
    #[must_use]
    pub const fn is_displacement(self) -> bool {
        matches!(self, Self::Zx | Self::Zy | Self::Zz)
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl Serialize for Feature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

/// Fixed-size vector with one value per [`Feature`].
///
/// Used for raw features, z-scores, means, standard deviations and deltas.
/// Serializes as a map keyed by [`Feature::key`] in declaration order.
///
/// # Examples
///
/// ```rust
/// use strandscope_core::types::{Feature, FeatureVector};
///
/// let mut v = FeatureVector::zeros();
/// v[Feature::Gc] = 0.5;
/// assert_eq!(v.gc(), 0.5);
/// assert_eq!(v.iter().count(), 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FeatureVector(pub [f64; FEATURE_COUNT]);

/// The per-window biophysical profile.
pub type BiophysicalFeatures = FeatureVector;

impl FeatureVector {
    #[must_use]
    pub const fn zeros() -> Self {
        Self([0.0; FEATURE_COUNT])
    }

    #[must_use]
    pub const fn get(&self, feature: Feature) -> f64 {
        self.0[feature.index()]
    }

    #[must_use]
    pub const fn gc(&self) -> f64 {
        self.get(Feature::Gc)
    }

    #[must_use]
    pub const fn hb_per_base(&self) -> f64 {
        self.get(Feature::HBond)
    }

    #[must_use]
    pub const fn stack_per_base(&self) -> f64 {
        self.get(Feature::Stack)
    }

    #[must_use]
    pub const fn dg_per_base(&self) -> f64 {
        self.get(Feature::Dg)
    }

    #[must_use]
    pub const fn bendability(&self) -> f64 {
        self.get(Feature::Bend)
    }

    /// Iterate `(feature, value)` pairs in feature order
    pub fn iter(&self) -> impl Iterator<Item = (Feature, f64)> + '_ {
        Feature::ALL
            .into_iter()
            .map(move |feature| (feature, self.get(feature)))
    }

    /// Apply `f` to every component
    #[must_use]
    pub fn map(&self, mut f: impl FnMut(Feature, f64) -> f64) -> Self {
        let mut out = Self::zeros();
        for (feature, value) in self.iter() {
            out[feature] = f(feature, value);
        }
        out
    }

    /// Component-wise `self - other`
    #[must_use]
    pub fn delta_from(&self, other: &Self) -> Self {
        self.map(|feature, value| value - other.get(feature))
    }

    /// Component-wise in-place addition
    pub fn accumulate(&mut self, other: &Self) {
        for (slot, value) in self.0.iter_mut().zip(other.0) {
            *slot += value;
        }
    }

    /// Sum of squared components
    #[must_use]
    pub fn squared_norm(&self) -> f64 {
        self.0.iter().map(|v| v * v).sum()
    }
}

impl Index<Feature> for FeatureVector {
    type Output = f64;

    fn index(&self, feature: Feature) -> &f64 {
        &self.0[feature.index()]
    }
}

impl IndexMut<Feature> for FeatureVector {
    fn index_mut(&mut self, feature: Feature) -> &mut f64 {
        &mut self.0[feature.index()]
    }
}

impl Serialize for FeatureVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(FEATURE_COUNT))?;
        for (feature, value) in self.iter() {
            map.serialize_entry(feature.key(), &value)?;
        }
        map.end()
    }
}

/// Share of a window's combined score attributed to one feature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureContribution {
    pub feature: Feature,
    /// Portion of the combined score carried by this feature
    pub score: f64,
    /// Same share expressed as a percentage (0-100)
    pub percentage: f64,
}

/// Anomaly label assigned by the threshold rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum AnomalyType {
    #[default]
    #[serde(rename = "None")]
    None,
    /// Free energy far below the run baseline
    #[serde(rename = "Thermal Dip")]
    ThermalDip,
    /// Free energy far above the run baseline
    #[serde(rename = "Structural Shift")]
    StructuralShift,
    #[serde(rename = "Stacking Anchor")]
    StackingAnchor,
    /// No single channel crossed the threshold but the combined score did
    #[serde(rename = "Multivariate Deviation")]
    MultivariateDeviation,
}

impl AnomalyType {
    #[must_use]
    pub const fn is_anomalous(self) -> bool {
        !matches!(self, Self::None)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::ThermalDip => "Thermal Dip",
            Self::StructuralShift => "Structural Shift",
            Self::StackingAnchor => "Stacking Anchor",
            Self::MultivariateDeviation => "Multivariate Deviation",
        }
    }
}

impl fmt::Display for AnomalyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Heuristic structural/functional class of a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
pub enum Archetype {
    #[serde(rename = "Z-DNA Candidate")]
    ZDnaCandidate,
    #[serde(rename = "Putative Promoter")]
    PutativePromoter,
    #[serde(rename = "Mechanical Anchor")]
    MechanicalAnchor,
    #[serde(rename = "G-Quadruplex")]
    GQuadruplex,
    #[serde(rename = "Flexible Linker")]
    FlexibleLinker,
    #[serde(rename = "Unknown Anomaly")]
    UnknownAnomaly,
    #[default]
    #[serde(rename = "Stable Helix")]
    StableHelix,
}

impl Archetype {
    pub const COUNT: usize = 7;

    pub const ALL: [Self; Self::COUNT] = [
        Self::ZDnaCandidate,
        Self::PutativePromoter,
        Self::MechanicalAnchor,
        Self::GQuadruplex,
        Self::FlexibleLinker,
        Self::UnknownAnomaly,
        Self::StableHelix,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::ZDnaCandidate => 0,
            Self::PutativePromoter => 1,
            Self::MechanicalAnchor => 2,
            Self::GQuadruplex => 3,
            Self::FlexibleLinker => 4,
            Self::UnknownAnomaly => 5,
            Self::StableHelix => 6,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ZDnaCandidate => "Z-DNA Candidate",
            Self::PutativePromoter => "Putative Promoter",
            Self::MechanicalAnchor => "Mechanical Anchor",
            Self::GQuadruplex => "G-Quadruplex",
            Self::FlexibleLinker => "Flexible Linker",
            Self::UnknownAnomaly => "Unknown Anomaly",
            Self::StableHelix => "Stable Helix",
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Local H-bond/stacking correlation ending just before window `index`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CorrelationPoint {
    pub index: usize,
    /// Pearson coefficient in `[-1, 1]`; 0 when either series is flat
    pub correlation: f64,
}

/// Error types that can occur during sequence analysis
#[derive(Error, Debug)]
pub enum StrandscopeError {
    /// Sequence cannot hold a single window
    #[error("Sequence length ({length}) must be at least window size ({window_size}).")]
    SequenceTooShort { length: usize, window_size: usize },
    /// Analysis parameter outside its meaningful range
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    /// File I/O operation failed
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    /// Error parsing input data
    #[error("Parse error: {0}")]
    ParseError(String),
    /// Results could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// Dedicated worker pool could not be built
    #[error("Failed to configure thread pool: {0}")]
    ThreadPool(String),
}

impl From<serde_json::Error> for StrandscopeError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_indices_match_order() {
        for (i, feature) in Feature::ALL.iter().enumerate() {
            assert_eq!(feature.index(), i);
        }
    }

    #[test]
    fn test_archetype_indices_match_order() {
        for (i, archetype) in Archetype::ALL.iter().enumerate() {
            assert_eq!(archetype.index(), i);
        }
    }

    #[test]
    fn test_feature_vector_indexing() {
        let mut v = FeatureVector::zeros();
        v[Feature::Stack] = -1.5;
        v[Feature::Bend] = 0.25;
        assert_eq!(v.stack_per_base(), -1.5);
        assert_eq!(v.bendability(), 0.25);
        assert_eq!(v.0[2], -1.5);
        assert_eq!(v.0[7], 0.25);
    }

    #[test]
    fn test_feature_vector_delta_and_accumulate() {
        let a = FeatureVector([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        let b = FeatureVector([2.0; FEATURE_COUNT]);
        let d = b.delta_from(&a);
        assert_eq!(d.0, [1.0, 0.0, -1.0, -2.0, -3.0, -4.0, -5.0, -6.0]);

        let mut sum = FeatureVector::zeros();
        sum.accumulate(&a);
        sum.accumulate(&b);
        assert_eq!(sum.0[0], 3.0);
        assert_eq!(sum.0[7], 10.0);
    }

    #[test]
    fn test_squared_norm() {
        let v = FeatureVector([3.0, 4.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(v.squared_norm(), 25.0);
    }

    #[test]
    fn test_feature_vector_serializes_as_ordered_map() {
        let mut v = FeatureVector::zeros();
        v[Feature::Dg] = -1.25;
        let json = serde_json::to_string(&v).unwrap();
        assert!(json.starts_with("{\"gc\":0.0,\"hb_per_base\":0.0"));
        assert!(json.contains("\"dG_per_base\":-1.25"));
        assert!(json.ends_with("\"bendability\":0.0}"));
    }

    #[test]
    fn test_labels_serialize_as_display_text() {
        assert_eq!(
            serde_json::to_string(&AnomalyType::ThermalDip).unwrap(),
            "\"Thermal Dip\""
        );
        assert_eq!(
            serde_json::to_string(&Archetype::ZDnaCandidate).unwrap(),
            "\"Z-DNA Candidate\""
        );
        assert_eq!(AnomalyType::StackingAnchor.to_string(), "Stacking Anchor");
        assert_eq!(Archetype::default(), Archetype::StableHelix);
    }

    #[test]
    fn test_anomaly_flag() {
        assert!(!AnomalyType::None.is_anomalous());
        assert!(AnomalyType::MultivariateDeviation.is_anomalous());
    }

    #[test]
    fn test_sequence_too_short_message() {
        let err = StrandscopeError::SequenceTooShort {
            length: 14,
            window_size: 15,
        };
        assert_eq!(
            err.to_string(),
            "Sequence length (14) must be at least window size (15)."
        );
    }
}
