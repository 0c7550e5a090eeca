//! Erasure folding and Forney's magnitude formula.
//!
//! A marked erasure is half an error: the position is known, only the
//! value is missing. [`forney_syndromes`] folds every known position out
//! of the syndrome sequence so the locator search afterwards spends the
//! whole remaining budget on the positions nobody told us about.
//!
//! [`correct`] computes the magnitudes for the combined list of bad
//! positions and repairs the word in place. Each magnitude is the errata
//! evaluator over the locator's formal derivative, both evaluated at the
//! inverse of the position's root.

use smallvec::smallvec;

use super::DecodeError;
use crate::galois::GaloisField;
use crate::poly::{self, Poly};

#[cfg(test)]
use pretty_assertions::assert_eq;

/// Fold the known erasure positions out of the syndromes.
///
/// Each fold shortens the sequence by one. Corruption that sits only at
/// erased positions cancels completely, leaving all-zero syndromes for
/// the locator.
pub(super) fn forney_syndromes(
    gf: &GaloisField,
    synd: &[u16],
    erasures: &[usize],
    nmess: usize,
) -> Poly {
    let mut fsynd = Poly::from_slice(synd);
    for &pos in erasures {
        let x = gf.alpha_pow(nmess - 1 - pos);
        for i in 0..fsynd.len().saturating_sub(1) {
            fsynd[i] = gf.mul(fsynd[i], x) ^ fsynd[i + 1];
        }
        fsynd.pop();
    }
    fsynd
}

/// Repair `word` in place given every bad position, erasures and located
/// errors alike.
///
/// Wants the unfolded syndromes, since the magnitudes at the erased
/// positions still have to come out right. Callers guarantee that
/// `positions` has no more entries than there are syndromes.
pub(super) fn correct(
    gf: &GaloisField,
    word: &mut [u16],
    synd: &[u16],
    positions: &[usize],
) -> Result<(), DecodeError> {
    // errata locator, one root per bad position
    let mut locator: Poly = smallvec![1];
    for &pos in positions {
        let x = gf.alpha_pow(word.len() - 1 - pos);
        locator = poly::mul(gf, &locator, &[x, 1]);
    }

    // errata evaluator: reversed syndromes times the locator, keeping
    // only the low-order tail
    let count = positions.len();
    let reversed: Poly = synd[..count].iter().rev().copied().collect();
    let product = poly::mul(gf, &reversed, &locator);
    let evaluator = &product[product.len() - count..];

    // formal derivative of the locator, even powers vanish in
    // characteristic 2
    let derivative: Poly = locator
        .iter()
        .copied()
        .skip(locator.len() & 1)
        .step_by(2)
        .collect();

    for &pos in positions {
        let x = gf.alpha_pow(pos + gf.order() - word.len());
        let numerator = poly::eval(gf, evaluator, x);
        let slope = poly::eval(gf, &derivative, gf.mul(x, x));
        let denominator = gf.mul(x, slope);
        if denominator == 0 {
            return Err(DecodeError::DivisionByZero);
        }
        word[pos] ^= gf.div(numerator, denominator);
    }
    Ok(())
}

#[cfg(test)]
use crate::galois::FieldOrder;

#[test]
fn forney_syndromes_cancel_known_positions() {
    let gf = GaloisField::new(FieldOrder::Gf256);
    let data: Vec<u16> = (0u16..20).map(|i| i * 5).collect();
    let mut codeword = crate::encoding::encode(&gf, &data, 8);
    let erasures = [4usize, 13];
    for &pos in &erasures {
        codeword[pos] ^= 0x5a;
    }
    let synd = super::syndromes(&gf, &codeword, 8);
    assert!(synd.iter().any(|&s| s != 0));

    let fsynd = forney_syndromes(&gf, &synd, &erasures, codeword.len());
    assert_eq!(fsynd.len(), 6);
    assert!(fsynd.iter().all(|&s| s == 0));
}

#[test]
fn forney_syndromes_keep_unknown_errors_visible() {
    let gf = GaloisField::new(FieldOrder::Gf256);
    let data: Vec<u16> = (0u16..20).map(|i| i * 5).collect();
    let mut codeword = crate::encoding::encode(&gf, &data, 8);
    codeword[4] ^= 0x5a;
    codeword[17] ^= 0x33;
    let synd = super::syndromes(&gf, &codeword, 8);

    // folding out position 4 must not hide the error at 17
    let fsynd = forney_syndromes(&gf, &synd, &[4], codeword.len());
    assert!(fsynd.iter().any(|&s| s != 0));
}

#[test]
fn correct_repairs_a_marked_position() {
    let gf = GaloisField::new(FieldOrder::Gf256);
    let data: Vec<u16> = (0u16..20).map(|i| i + 40).collect();
    let clean = crate::encoding::encode(&gf, &data, 8);
    let mut word = clean.clone();
    word[7] ^= 0x21;
    let synd = super::syndromes(&gf, &word, 8);

    correct(&gf, &mut word, &synd, &[7]).unwrap();
    assert_eq!(word, clean);
}

#[test]
fn correct_repairs_message_and_parity_together() {
    let gf = GaloisField::new(FieldOrder::Gf256);
    let data: Vec<u16> = (0u16..20).map(|i| 3 * i + 1).collect();
    let clean = crate::encoding::encode(&gf, &data, 8);
    let mut word = clean.clone();
    word[2] ^= 0x11;
    word[24] ^= 0xc3;
    let synd = super::syndromes(&gf, &word, 8);

    correct(&gf, &mut word, &synd, &[2, 24]).unwrap();
    assert_eq!(word, clean);
}
