//! Error locator derivation (Berlekamp-Massey) and root search.

use smallvec::smallvec;

use super::DecodeError;
use crate::galois::GaloisField;
use crate::poly::{self, Poly};

#[cfg(test)]
use pretty_assertions::assert_eq;

/// Berlekamp-Massey: the minimal polynomial whose linear recurrence
/// generates the syndrome sequence.
///
/// The result has its most significant coefficient first and its degree is
/// the number of errors. More than `syn.len() / 2` errors exceed what the
/// syndromes can pin down.
pub(super) fn error_locator(gf: &GaloisField, syn: &[u16]) -> Result<Poly, DecodeError> {
    let mut err_loc: Poly = smallvec![1];
    let mut old_loc: Poly = smallvec![1];
    for i in 0..syn.len() {
        old_loc.push(0);
        // discrepancy between this syndrome and what the current locator
        // predicts from the previous ones
        let mut delta = syn[i];
        for j in 1..err_loc.len() {
            delta ^= gf.mul(err_loc[err_loc.len() - 1 - j], syn[i - j]);
        }
        if delta != 0 {
            if old_loc.len() > err_loc.len() {
                // length change: the scaled old polynomial becomes the new
                // base and the rescaled current one is kept for later
                // updates. The order of these three assignments matters.
                let new_loc = poly::scale(gf, &old_loc, delta);
                old_loc = poly::scale(gf, &err_loc, gf.div(1, delta));
                err_loc = new_loc;
            }
            let correction = poly::scale(gf, &old_loc, delta);
            err_loc = poly::add(&err_loc, &correction);
        }
    }
    let errors = err_loc.len() - 1;
    if errors * 2 > syn.len() {
        return Err(DecodeError::TooManyErrors);
    }
    Ok(err_loc)
}

/// Trial-evaluate the locator at the inverse root of every position.
///
/// A zero of the locator at `2^(n - i)` marks position `nmess - 1 - i` of
/// the received word as corrupted.
fn locator_roots(gf: &GaloisField, locator: &[u16], nmess: usize) -> Vec<usize> {
    let n = gf.group_order();
    let mut positions = Vec::new();
    for i in 0..nmess {
        if poly::eval(gf, locator, gf.alpha_pow(n - i)) == 0 {
            positions.push(nmess - 1 - i);
        }
    }
    positions
}

/// Locate the errors described by the (erasure-adjusted) syndromes.
pub(super) fn find_errors(
    gf: &GaloisField,
    syn: &[u16],
    nmess: usize,
) -> Result<Vec<usize>, DecodeError> {
    let locator = error_locator(gf, syn)?;
    let positions = locator_roots(gf, &locator, nmess);
    // the locator degree promises a number of errors, the root search
    // must turn up exactly that many inside the word
    if positions.len() != locator.len() - 1 {
        return Err(DecodeError::CouldNotLocate);
    }
    Ok(positions)
}

#[cfg(test)]
use crate::galois::FieldOrder;

#[cfg(test)]
fn corrupted_syndromes(positions_and_masks: &[(usize, u16)]) -> (GaloisField, Poly, usize) {
    let gf = GaloisField::new(FieldOrder::Gf256);
    let data: Vec<u16> = (0u16..20).map(|i| i * 3).collect();
    let mut codeword = crate::encoding::encode(&gf, &data, 8);
    for &(pos, mask) in positions_and_masks {
        // a nonzero mask changes the symbol no matter its value
        codeword[pos] ^= mask;
    }
    let nmess = codeword.len();
    let syn = super::syndromes(&gf, &codeword, 8);
    (gf, syn, nmess)
}

#[test]
fn locates_a_single_error() {
    let (gf, syn, nmess) = corrupted_syndromes(&[(11, 200)]);
    assert_eq!(find_errors(&gf, &syn, nmess).unwrap(), vec![11]);
}

#[test]
fn locates_errors_in_message_and_parity() {
    let (gf, syn, nmess) = corrupted_syndromes(&[(0, 91), (19, 1), (22, 13)]);
    let mut positions = find_errors(&gf, &syn, nmess).unwrap();
    positions.sort_unstable();
    assert_eq!(positions, vec![0, 19, 22]);
}

#[test]
fn locator_degree_matches_error_count() {
    let (gf, syn, _) = corrupted_syndromes(&[(2, 77), (9, 1)]);
    let locator = error_locator(&gf, &syn).unwrap();
    assert_eq!(locator.len() - 1, 2);
}

#[test]
fn impossible_syndromes_are_too_many_errors() {
    // No error pattern of weight <= 1 produces S = [0, 1]: the locator
    // comes out with degree 2, which two syndromes cannot support.
    let gf = GaloisField::new(FieldOrder::Gf256);
    assert_eq!(
        error_locator(&gf, &[0, 1]),
        Err(DecodeError::TooManyErrors)
    );
}

#[test]
fn clean_syndromes_locate_nothing() {
    let gf = GaloisField::new(FieldOrder::Gf256);
    let locator = error_locator(&gf, &[0, 0, 0, 0]).unwrap();
    assert_eq!(locator.as_slice(), &[1]);
    assert_eq!(find_errors(&gf, &[0, 0, 0, 0], 30).unwrap(), vec![]);
}
