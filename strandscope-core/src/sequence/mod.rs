//! Sequence sanitization, nucleotide identity and windowing.
//!
//! ## Overview
//!
//! Raw input is normalized to the alphabet {A, C, G, T, M, N}:
//! - letters are upper-cased
//! - `M` denotes 5-methylcytosine and is kept
//! - anything else (including `U`, gaps and IUPAC codes) becomes `N`
//!
//! Sanitization never changes the number of characters, so window
//! coordinates computed on the sanitized sequence are valid on the input.
//!
//! ## Modules
//!
//! - [`io`]: FASTA file reading and parsing
//!
//! ## Examples
//!
//! ```rust
//! use strandscope_core::sequence::{sanitize_sequence, window_starts};
//!
//! let clean = sanitize_sequence("acgu-M");
//! assert_eq!(clean, "ACGNNM");
//!
//! let starts: Vec<usize> = window_starts(20, 15, 5).collect();
//! assert_eq!(starts, vec![0, 5]);
//! ```

pub mod io;

pub use io::*;

use wide::CmpEq;
use wide::u8x32;

use crate::constants::CHUNK_SIZE;

/// Number of recognized nucleotides (A, C, G, T, M)
pub const NUCLEOTIDE_COUNT: usize = 5;

/// A nucleotide with entries in the constant tables.
///
/// `N` is deliberately absent: unknown bases have no table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Nucleotide {
    A,
    C,
    G,
    T,
    /// 5-methylcytosine
    M,
}

impl Nucleotide {
    /// Map a sanitized byte to its nucleotide, `None` for `N` or anything unknown
    #[must_use]
    pub const fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'A' => Some(Self::A),
            b'C' => Some(Self::C),
            b'G' => Some(Self::G),
            b'T' => Some(Self::T),
            b'M' => Some(Self::M),
            _ => None,
        }
    }

    /// Row/column of this nucleotide in the constant tables
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::C => 1,
            Self::G => 2,
            Self::T => 3,
            Self::M => 4,
        }
    }

    /// Whether this base counts towards the GC (+5mC) fraction
    #[must_use]
    pub const fn is_gc(self) -> bool {
        matches!(self, Self::C | Self::G | Self::M)
    }
}

const fn sanitize_byte(byte: u8) -> u8 {
    match byte.to_ascii_uppercase() {
        upper @ (b'A' | b'C' | b'G' | b'T' | b'M') => upper,
        _ => b'N',
    }
}

/// Upper-case the input and replace every character outside {A,C,G,T,M} with `N`.
///
/// ASCII input is classified 32 bytes at a time; other input falls back to a
/// per-character pass so that multi-byte characters become a single `N`.
#[must_use]
pub fn sanitize_sequence(sequence: &str) -> String {
    if !sequence.is_ascii() {
        return sequence
            .chars()
            .map(|c| {
                if c.is_ascii() {
                    char::from(sanitize_byte(c as u8))
                } else {
                    'N'
                }
            })
            .collect();
    }

    let bytes = sequence.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let chunks = bytes.len() / CHUNK_SIZE;

    // Clearing bit 5 upper-cases ASCII letters
    let case_mask = u8x32::splat(!0x20);
    let a_upper = u8x32::splat(b'A');
    let c_upper = u8x32::splat(b'C');
    let g_upper = u8x32::splat(b'G');
    let t_upper = u8x32::splat(b'T');
    let m_upper = u8x32::splat(b'M');

    for chunk_idx in 0..chunks {
        let chunk_start = chunk_idx * CHUNK_SIZE;
        let mut input_array = [0u8; CHUNK_SIZE];
        input_array.copy_from_slice(&bytes[chunk_start..chunk_start + CHUNK_SIZE]);
        let upper = u8x32::from(input_array) & case_mask;

        let valid = upper.cmp_eq(a_upper)
            | upper.cmp_eq(c_upper)
            | upper.cmp_eq(g_upper)
            | upper.cmp_eq(t_upper)
            | upper.cmp_eq(m_upper);

        let upper_array: [u8; CHUNK_SIZE] = upper.into();
        let valid_array: [u8; CHUNK_SIZE] = valid.into();
        out.extend(
            upper_array
                .iter()
                .zip(valid_array.iter())
                .map(|(&base, &is_valid)| if is_valid != 0 { base } else { b'N' }),
        );
    }

    out.extend(bytes[chunks * CHUNK_SIZE..].iter().map(|&b| sanitize_byte(b)));

    // Every byte is one of A, C, G, T, M, N
    String::from_utf8(out).unwrap_or_default()
}

/// Fraction of G, C and M bases over the whole sequence length.
///
/// Unknown bases count in the denominator. Returns 0 for an empty sequence.
#[must_use]
pub fn gc_fraction(sanitized: &str) -> f64 {
    if sanitized.is_empty() {
        return 0.0;
    }
    let gc = sanitized
        .bytes()
        .filter_map(Nucleotide::from_byte)
        .filter(|n| n.is_gc())
        .count();
    gc as f64 / sanitized.len() as f64
}

/// Start offsets of every full window: `0, S, 2S, ...` while `start + W <= len`.
///
/// Yields nothing when `window_size > length` or `stride == 0`.
pub fn window_starts(
    length: usize,
    window_size: usize,
    stride: usize,
) -> impl Iterator<Item = usize> {
    let count = window_count(length, window_size, stride);
    (0..count).map(move |k| k * stride)
}

/// Number of windows produced for the given geometry: `floor((len - W) / S) + 1`.
#[must_use]
pub const fn window_count(length: usize, window_size: usize, stride: usize) -> usize {
    if stride == 0 || window_size > length {
        0
    } else {
        (length - window_size) / stride + 1
    }
}
