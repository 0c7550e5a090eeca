//! Syndrome based decoding with error and erasure correction.
//!
//! A syndrome based decoder runs in four classic steps:
//!
//! 1. Compute the syndrome values.
//! 2. Compute the error locator polynomial.
//! 3. Compute the error locations.
//! 4. Compute the error values.
//!
//! Erasures, that is positions the caller already knows are unreadable,
//! get a treatment ahead of step 2: their contribution is folded out of the
//! syndromes (see [`errata::forney_syndromes`]) so the locator only has to
//! find the remaining unknown errors. An erasure costs one redundancy
//! symbol, an unknown error two, which gives the correction bound
//! `2·errors + erasures ≤ nsym`.
//!
//! Step 2 uses the Berlekamp-Massey algorithm, step 3 a trial evaluation
//! over all positions, and step 4 Forney's formula. A readable
//! walk-through of this decoder family is the Wikiversity article
//! ["Reed-Solomon codes for coders"](https://en.wikiversity.org/wiki/Reed%E2%80%93Solomon_codes_for_coders).
//!
//! The corrected word is not trusted blindly: its syndromes are computed
//! once more at the end, and only an all-zero result is accepted. Corruption
//! beyond the bound therefore fails loudly instead of handing back garbage.

mod errata;
mod locator;

use log::{debug, trace};
use thiserror::Error;

use crate::galois::GaloisField;
use crate::poly::{self, Poly};

#[cfg(test)]
use pretty_assertions::assert_eq;

/// Ways a block can fail to decode.
///
/// Every variant is a deterministic verdict about the received block,
/// never a transient condition, so retrying cannot help.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The received block is longer than a codeword of this field.
    #[error("received block of {len} symbols exceeds the codeword capacity {capacity}")]
    BlockTooLong { len: usize, capacity: usize },
    /// A received symbol does not fit into the configured field.
    #[error("symbol {value} at position {index} is no element of GF({order})")]
    SymbolOutOfRange {
        index: usize,
        value: u16,
        order: usize,
    },
    /// More positions are marked erased than there are parity symbols.
    #[error("too many erasures to correct ({count} marked, {max} correctable)")]
    TooManyErasures { count: usize, max: usize },
    /// The locator polynomial degree exceeds what the parity can fix.
    #[error("too many errors to correct")]
    TooManyErrors,
    /// The locator polynomial's root count does not match its degree.
    #[error("could not locate error")]
    CouldNotLocate,
    /// Syndromes still nonzero after all corrections were applied.
    #[error("could not correct message")]
    CouldNotCorrect,
    /// A correction magnitude had a zero denominator. Only degenerate,
    /// uncorrectable corruption patterns end up here.
    #[error("division by zero while computing an error magnitude")]
    DivisionByZero,
}

/// Evaluate the received word at the generator roots `2^0 .. 2^(nsym-1)`.
///
/// A codeword is a multiple of the generator polynomial, so for an intact
/// word every entry is zero. Anything nonzero pinpoints corruption, and the
/// values depend only on the error pattern, not on the message.
pub(crate) fn syndromes(gf: &GaloisField, word: &[u16], nsym: usize) -> Poly {
    (0..nsym)
        .map(|i| poly::eval(gf, word, gf.alpha_pow(i)))
        .collect()
}

/// Recover the message from a received block.
///
/// `None` slots mark erasures. On success the parity tail is stripped and
/// only the message symbols are returned.
pub(crate) fn decode(
    gf: &GaloisField,
    received: &[Option<u16>],
    nsym: usize,
) -> Result<Vec<u16>, DecodeError> {
    let capacity = gf.group_order();
    if received.len() > capacity {
        return Err(DecodeError::BlockTooLong {
            len: received.len(),
            capacity,
        });
    }
    let order = gf.order();

    // record erasure positions, blank the slots for syndrome computation
    let mut work = Vec::with_capacity(received.len());
    let mut erasures = Vec::new();
    for (index, slot) in received.iter().enumerate() {
        match *slot {
            Some(value) => {
                if (value as usize) >= order {
                    return Err(DecodeError::SymbolOutOfRange {
                        index,
                        value,
                        order,
                    });
                }
                work.push(value);
            }
            None => {
                erasures.push(index);
                work.push(0);
            }
        }
    }
    if erasures.len() > nsym {
        return Err(DecodeError::TooManyErasures {
            count: erasures.len(),
            max: nsym,
        });
    }
    if !erasures.is_empty() {
        trace!("{} position(s) marked erased: {:?}", erasures.len(), erasures);
    }

    let synd = syndromes(gf, &work, nsym);
    if synd.iter().all(|&s| s == 0) {
        trace!("syndromes all zero, nothing to correct");
        work.truncate(work.len().saturating_sub(nsym));
        return Ok(work);
    }

    // fold the known erasure locations out of the syndromes, then locate
    // the unknown errors among what is left
    let fsynd = errata::forney_syndromes(gf, &synd, &erasures, work.len());
    let mut positions = erasures;
    positions.extend(locator::find_errors(gf, &fsynd, work.len())?);
    debug!(
        "correcting {} position(s) of {} received symbols: {:?}",
        positions.len(),
        work.len(),
        positions
    );

    errata::correct(gf, &mut work, &synd, &positions)?;

    // the patched word must be a codeword again, otherwise the corruption
    // exceeded the bound and slipped past the locator
    if syndromes(gf, &work, nsym).iter().any(|&s| s != 0) {
        return Err(DecodeError::CouldNotCorrect);
    }
    work.truncate(work.len().saturating_sub(nsym));
    Ok(work)
}

#[cfg(test)]
fn intact(codeword: &[u16]) -> Vec<Option<u16>> {
    codeword.iter().map(|&c| Some(c)).collect()
}

#[cfg(test)]
fn gf256() -> GaloisField {
    GaloisField::new(crate::galois::FieldOrder::Gf256)
}

#[test]
fn syndromes_flag_corruption() {
    let gf = gf256();
    let codeword = crate::encoding::encode(&gf, &[10, 20, 30, 40], 6);
    assert!(syndromes(&gf, &codeword, 6).iter().all(|&s| s == 0));
    let mut bad = codeword;
    bad[2] ^= 0x55;
    assert!(syndromes(&gf, &bad, 6).iter().any(|&s| s != 0));
}

#[test]
fn misplaced_correction_leaves_nonzero_syndromes() {
    let gf = gf256();
    let mut word = crate::encoding::encode(&gf, &[5, 10, 15, 20, 25], 8);
    word[3] ^= 0x55;
    let synd = syndromes(&gf, &word, 8);
    errata::correct(&gf, &mut word, &synd, &[6]).unwrap();
    // one wrong symbol plus one misplaced patch differ from the codeword
    // in at most two places, far below the code distance of nine
    assert!(syndromes(&gf, &word, 8).iter().any(|&s| s != 0));
}

#[test]
fn test_recovery() {
    let gf = gf256();
    let data = vec![1, 2, 3];
    let codeword = crate::encoding::encode(&gf, &data, 5);
    let mut received = intact(&codeword);
    // make two wrong
    received[0] = Some(230);
    received[3 + 5 - 1] = Some(32);
    assert_eq!(decode(&gf, &received, 5).unwrap(), data);
}

#[test]
fn test_recovery_unchanged_block() {
    let gf = gf256();
    let data = vec![144, 144, 255, 255, 0, 81];
    let codeword = crate::encoding::encode(&gf, &data, 8);
    assert_eq!(decode(&gf, &intact(&codeword), 8).unwrap(), data);
}

#[test]
fn test_recovery_erasures_only() {
    let gf = gf256();
    let data = vec![7, 0, 99, 250, 1];
    let codeword = crate::encoding::encode(&gf, &data, 4);
    let mut received = intact(&codeword);
    // erase as many positions as there are parity symbols
    received[0] = None;
    received[2] = None;
    received[5] = None;
    received[8] = None;
    assert_eq!(decode(&gf, &received, 4).unwrap(), data);
}

#[test]
fn test_recovery_mixed() {
    let gf = gf256();
    let data: Vec<u16> = (0u16..30).map(|i| (i * 11 + 5) % 256).collect();
    let codeword = crate::encoding::encode(&gf, &data, 10);
    let mut received = intact(&codeword);
    // two errors and six erasures, 2 * 2 + 6 = 10 fills the budget
    received[4] = Some(codeword[4] ^ 0xFF);
    received[20] = Some(codeword[20] ^ 0x01);
    for &i in &[0, 7, 13, 25, 31, 38] {
        received[i] = None;
    }
    assert_eq!(decode(&gf, &received, 10).unwrap(), data);
}

#[test]
fn erased_parity_is_recoverable() {
    let gf = gf256();
    let data = vec![42];
    let codeword = crate::encoding::encode(&gf, &data, 2);
    let mut received = intact(&codeword);
    received[1] = None;
    received[2] = None;
    assert_eq!(decode(&gf, &received, 2).unwrap(), data);
}

#[test]
fn rejects_too_many_erasures() {
    let gf = gf256();
    let codeword = crate::encoding::encode(&gf, &[1, 2, 3, 4], 3);
    let mut received = intact(&codeword);
    received[0] = None;
    received[1] = None;
    received[3] = None;
    received[6] = None;
    assert_eq!(
        decode(&gf, &received, 3),
        Err(DecodeError::TooManyErasures { count: 4, max: 3 })
    );
}

#[test]
fn rejects_oversized_block() {
    let gf = GaloisField::new(crate::galois::FieldOrder::Gf16);
    let received = vec![Some(1); 16];
    assert_eq!(
        decode(&gf, &received, 4),
        Err(DecodeError::BlockTooLong {
            len: 16,
            capacity: 15
        })
    );
}

#[test]
fn rejects_out_of_range_symbol() {
    let gf = GaloisField::new(crate::galois::FieldOrder::Gf16);
    let received = vec![Some(3), Some(16), Some(1)];
    assert_eq!(
        decode(&gf, &received, 2),
        Err(DecodeError::SymbolOutOfRange {
            index: 1,
            value: 16,
            order: 16
        })
    );
}

#[test]
fn zero_parity_decodes_to_itself() {
    let gf = gf256();
    let data = vec![9, 8, 7];
    assert_eq!(decode(&gf, &intact(&data), 0).unwrap(), data);
}

#[test]
fn block_shorter_than_parity_strips_to_nothing() {
    let gf = gf256();
    // an all-zero word is a codeword of any length, nothing of it is data
    assert_eq!(decode(&gf, &[Some(0), Some(0), Some(0)], 4).unwrap(), vec![]);
}

#[test]
fn recovery_in_every_field() {
    for order in enum_iterator::all::<crate::galois::FieldOrder>() {
        let gf = GaloisField::new(order);
        let nsym = if gf.group_order() > 4 { 4 } else { 2 };
        let len = (gf.group_order() - nsym).min(3);
        let data: Vec<u16> = (0..len).map(|i| ((i * 7 + 3) % gf.order()) as u16).collect();
        let codeword = crate::encoding::encode(&gf, &data, nsym);
        let mut received = intact(&codeword);
        // flipping the lowest bit always stays inside the field
        received[len] = Some(codeword[len] ^ 1);
        assert_eq!(decode(&gf, &received, nsym).unwrap(), data, "{order:?}");
    }
}
