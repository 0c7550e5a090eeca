//! Polynomials with coefficients in a Galois field.
//!
//! Coefficients are stored most significant first, so `[1, 0, 3]` is
//! x^2 + 3. Degree equals length minus one, and sums align the operands at
//! their constant terms rather than at index 0.

use smallvec::{smallvec, SmallVec};

use crate::galois::GaloisField;

#[cfg(test)]
use crate::galois::FieldOrder;
#[cfg(test)]
use pretty_assertions::assert_eq;

/// Coefficient storage for the short polynomials the codec juggles
/// (generator, syndromes, locator, evaluator). Inline up to a redundancy
/// length of 31, spilling to the heap beyond that.
pub(crate) type Poly = SmallVec<[u16; 32]>;

/// Multiply every coefficient of `p` by the field element `x`.
pub(crate) fn scale(gf: &GaloisField, p: &[u16], x: u16) -> Poly {
    p.iter().map(|&c| gf.mul(c, x)).collect()
}

/// Coefficient-wise sum (XOR), right-aligned.
pub(crate) fn add(p: &[u16], q: &[u16]) -> Poly {
    let len = p.len().max(q.len());
    let mut r: Poly = smallvec![0; len];
    for (i, &c) in p.iter().enumerate() {
        r[i + len - p.len()] = c;
    }
    for (i, &c) in q.iter().enumerate() {
        r[i + len - q.len()] ^= c;
    }
    r
}

/// Full convolution product of `p` and `q`.
pub(crate) fn mul(gf: &GaloisField, p: &[u16], q: &[u16]) -> Poly {
    let mut r: Poly = smallvec![0; (p.len() + q.len()).saturating_sub(1)];
    for (j, &qj) in q.iter().enumerate() {
        for (i, &pi) in p.iter().enumerate() {
            r[i + j] ^= gf.mul(pi, qj);
        }
    }
    r
}

/// Horner evaluation of `p` at `x`. The empty polynomial is the zero
/// polynomial and evaluates to 0.
pub(crate) fn eval(gf: &GaloisField, p: &[u16], x: u16) -> u16 {
    let mut y = 0;
    for &c in p {
        y = gf.mul(y, x) ^ c;
    }
    y
}

#[test]
fn add_right_aligns_operands() {
    assert_eq!(add(&[1, 2, 3], &[5, 1]).as_slice(), &[1, 7, 2]);
    assert_eq!(add(&[5, 1], &[1, 2, 3]).as_slice(), &[1, 7, 2]);
    assert_eq!(add(&[], &[4, 2]).as_slice(), &[4, 2]);
}

#[test]
fn scale_multiplies_each_coefficient() {
    let gf = GaloisField::new(FieldOrder::Gf256);
    assert_eq!(scale(&gf, &[1, 2, 4], 2).as_slice(), &[2, 4, 8]);
    assert_eq!(scale(&gf, &[1, 0, 3], 0).as_slice(), &[0, 0, 0]);
}

#[test]
fn mul_convolves() {
    let gf = GaloisField::new(FieldOrder::Gf256);
    // (x + 1)(x + 2) = x^2 + 3x + 2 over characteristic 2
    assert_eq!(mul(&gf, &[1, 1], &[1, 2]).as_slice(), &[1, 3, 2]);
    assert_eq!(mul(&gf, &[], &[1]).as_slice(), &[] as &[u16]);
}

#[test]
fn eval_is_horner() {
    let gf = GaloisField::new(FieldOrder::Gf256);
    // x^2 at the generator
    assert_eq!(eval(&gf, &[1, 0, 0], 2), 4);
    // 3x^2 + 5 at 4: 3 * 16 + 5 = 48 + 5, all below the reduction bit
    assert_eq!(eval(&gf, &[3, 0, 5], 4), 53);
    assert_eq!(eval(&gf, &[], 7), 0);
}
