// =============================================================================
// PROGRAM
// =============================================================================

use crate::sequence::NUCLEOTIDE_COUNT;

/// Version string for strandscope
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// SIMD processing chunk size for sequence sanitization
pub const CHUNK_SIZE: usize = 32;

// =============================================================================
// ANALYSIS DEFAULTS
// =============================================================================

/// Default anomaly threshold, in standard deviations
pub const DEFAULT_THRESHOLD: f64 = 3.0;

/// Default sliding window length in bases
pub const DEFAULT_WINDOW_SIZE: usize = 15;

/// Default offset between consecutive window starts
pub const DEFAULT_STRIDE: usize = 5;

/// Default monovalent cation concentration (molar)
pub const DEFAULT_MONOVALENT_SALT: f64 = 0.1;

/// Default divalent (Mg2+) cation concentration (molar)
pub const DEFAULT_DIVALENT_SALT: f64 = 0.0015;

/// Number of trailing windows used for local cross-correlation
pub const CORRELATION_LOOKBACK: usize = 5;

/// Number of ranked contributions shown in a diagnostic report
pub const REPORT_TOP_DRIVERS: usize = 3;

// =============================================================================
// THERMODYNAMIC SCALARS
// =============================================================================

/// Reference temperature (37 °C) in Kelvin
pub const T_KELVIN: f64 = 310.15;

/// Entropy salt-correction coefficient, cal/(K·mol) per nearest-neighbor pair
pub const K_SALT: f64 = 0.368;

/// Numeric floor for standard deviations and squared distances
pub const EPS: f64 = 1e-9;

/// Floor applied to salt concentrations before taking logarithms
pub const MIN_EFFECTIVE_SALT: f64 = 1e-5;

/// Scale folding sqrt([Mg2+]) into an equivalent monovalent concentration
pub const MAGNESIUM_EQUIVALENCE: f64 = 120.0;

/// Intercept of the salt-adjusted melting temperature estimate (°C)
pub const TM_INTERCEPT: f64 = 64.9;

/// Tm change per unit of GC fraction above 0.5
pub const TM_GC_SLOPE: f64 = 41.0;

/// Tm change per decade of effective salt
pub const TM_SALT_SLOPE: f64 = 16.6;

// =============================================================================
// PER-BASE TABLES (order: A, C, G, T, M)
// =============================================================================

/// Watson-Crick hydrogen bonds contributed by each base
pub const HBOND_PER_BASE: [f64; NUCLEOTIDE_COUNT] = [2.0, 3.0, 3.0, 2.0, 3.0];

/// Helical displacement vector (x, y, z in Å) attributed to each base
pub const Z_VEC: [[f64; 3]; NUCLEOTIDE_COUNT] = [
    [-0.03, 0.05, 3.32],
    [0.14, -0.08, 3.36],
    [-0.11, 0.09, 3.39],
    [0.02, -0.06, 3.30],
    [0.17, -0.10, 3.41],
];

// =============================================================================
// DINUCLEOTIDE TABLES [5' base][3' base]
// =============================================================================

/// Stacking free energy at 37 °C (kcal/mol), SantaLucia 1998 unified set.
/// 5mC steps are stabilized by 0.1 kcal/mol relative to C.
pub const STACK_E_KCAL: [[f64; NUCLEOTIDE_COUNT]; NUCLEOTIDE_COUNT] = [
    [-1.00, -1.44, -1.28, -0.88, -1.54],
    [-1.45, -1.84, -2.17, -1.28, -1.94],
    [-1.30, -2.24, -1.84, -1.44, -2.34],
    [-0.58, -1.30, -1.45, -1.00, -1.40],
    [-1.55, -1.94, -2.27, -1.38, -2.04],
];

/// Nearest-neighbor enthalpy (kcal/mol)
pub const DELTA_H: [[f64; NUCLEOTIDE_COUNT]; NUCLEOTIDE_COUNT] = [
    [-7.9, -8.4, -7.8, -7.2, -8.4],
    [-8.5, -8.0, -10.6, -7.8, -8.0],
    [-8.2, -9.8, -8.0, -8.4, -9.8],
    [-7.2, -8.2, -8.5, -7.9, -8.2],
    [-8.5, -8.0, -10.6, -7.8, -8.0],
];

/// Nearest-neighbor entropy (cal/(K·mol))
pub const DELTA_S_CAL: [[f64; NUCLEOTIDE_COUNT]; NUCLEOTIDE_COUNT] = [
    [-22.2, -22.4, -21.0, -20.4, -22.4],
    [-22.7, -19.9, -27.2, -21.0, -19.9],
    [-22.2, -24.4, -19.9, -22.4, -24.4],
    [-21.3, -22.2, -22.7, -22.2, -22.2],
    [-22.7, -19.9, -27.2, -21.0, -19.9],
];

/// Dinucleotide bendability index (dimensionless, higher is more flexible).
/// Methylated steps are 0.05 stiffer than their unmethylated counterparts.
pub const BENDABILITY_INDEX: [[f64; NUCLEOTIDE_COUNT]; NUCLEOTIDE_COUNT] = [
    [-0.27, -0.21, -0.08, -0.28, -0.26],
    [0.18, -0.01, 0.07, -0.08, -0.06],
    [-0.04, 0.02, -0.01, -0.21, -0.03],
    [0.36, -0.04, 0.18, -0.27, -0.09],
    [0.13, -0.06, 0.02, -0.13, -0.06],
];

#[cfg(test)]
mod tests {
    use super::*;

    const COMPLEMENT: [usize; 4] = [3, 2, 1, 0];

    #[test]
    fn test_unmethylated_tables_are_strand_symmetric() {
        // 5'-XY-3' on one strand is 5'-Y'X'-3' on the other
        for x in 0..4 {
            for y in 0..4 {
                let (cx, cy) = (COMPLEMENT[y], COMPLEMENT[x]);
                assert_eq!(STACK_E_KCAL[x][y], STACK_E_KCAL[cx][cy]);
                assert_eq!(DELTA_H[x][y], DELTA_H[cx][cy]);
                assert_eq!(DELTA_S_CAL[x][y], DELTA_S_CAL[cx][cy]);
                assert_eq!(BENDABILITY_INDEX[x][y], BENDABILITY_INDEX[cx][cy]);
            }
        }
    }

    #[test]
    fn test_methylation_stabilizes_stacking() {
        for y in 0..NUCLEOTIDE_COUNT {
            assert!(STACK_E_KCAL[4][y] < STACK_E_KCAL[1][y]);
        }
    }

    #[test]
    fn test_hydrogen_bonds() {
        assert_eq!(HBOND_PER_BASE[0] + HBOND_PER_BASE[3], 4.0);
        assert_eq!(HBOND_PER_BASE[1] + HBOND_PER_BASE[2], 6.0);
        assert_eq!(HBOND_PER_BASE[4], HBOND_PER_BASE[1]);
    }
}
