//! Systematic Reed-Solomon encoding.

use smallvec::smallvec;
use thiserror::Error;

use crate::galois::GaloisField;
use crate::poly::{self, Poly};

#[cfg(test)]
use crate::galois::FieldOrder;
#[cfg(test)]
use pretty_assertions::assert_eq;

/// Ways encoding can reject a message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// Message plus parity does not fit into one codeword of the field.
    #[error("message of {len} symbols exceeds the block capacity {capacity}")]
    MessageTooLong { len: usize, capacity: usize },
    /// A message symbol does not fit into the configured field.
    #[error("symbol {value} at position {index} is no element of GF({order})")]
    SymbolOutOfRange {
        index: usize,
        value: u16,
        order: usize,
    },
}

/// The generator polynomial `(x - 2^0)(x - 2^1) ⋯` with `nsym` factors.
///
/// Every codeword is a multiple of this polynomial, so it vanishes at the
/// powers `2^0 .. 2^(nsym-1)`, exactly the points the decoder evaluates
/// its syndromes at.
pub(crate) fn generator_poly(gf: &GaloisField, nsym: usize) -> Poly {
    let mut g: Poly = smallvec![1];
    for i in 0..nsym {
        g = poly::mul(gf, &g, &[1, gf.alpha_pow(i)]);
    }
    g
}

/// Append `nsym` parity symbols to `message`.
///
/// Let d be the message polynomial and g the generator with nsym + 1
/// coefficients. Euclidean division of `d(x) * x^nsym` by g gives a
/// quotient and a remainder r, and `d(x) * x^nsym - r(x)` is then
/// divisible by g. Since subtraction is XOR, the codeword is the message
/// followed by the coefficients of r: the message stays verbatim in the
/// prefix (systematic form). The division below never stores the quotient,
/// it only folds the scaled generator into the working buffer.
pub(crate) fn encode(gf: &GaloisField, message: &[u16], nsym: usize) -> Vec<u16> {
    let gen = generator_poly(gf, nsym);
    let mut codeword = vec![0u16; message.len() + nsym];
    codeword[..message.len()].copy_from_slice(message);
    for i in 0..message.len() {
        let coef = codeword[i];
        if coef != 0 {
            for (j, &g) in gen.iter().enumerate() {
                codeword[i + j] ^= gf.mul(g, coef);
            }
        }
    }
    // the division zeroed the head of the buffer, restore the message
    codeword[..message.len()].copy_from_slice(message);
    codeword
}

#[test]
fn generator_vanishes_at_syndrome_points() {
    let gf = GaloisField::new(FieldOrder::Gf256);
    let g = generator_poly(&gf, 10);
    assert_eq!(g.len(), 11);
    assert_eq!(g[0], 1);
    for i in 0..10 {
        assert_eq!(poly::eval(&gf, &g, gf.alpha_pow(i)), 0);
    }
    assert_ne!(poly::eval(&gf, &g, gf.alpha_pow(10)), 0);
}

#[test]
fn generator_of_degree_zero_is_one() {
    let gf = GaloisField::new(FieldOrder::Gf256);
    assert_eq!(generator_poly(&gf, 0).as_slice(), &[1]);
}

#[test]
fn encodes_systematically() {
    let gf = GaloisField::new(FieldOrder::Gf256);
    let message = [64, 12, 0, 7, 255];
    let codeword = encode(&gf, &message, 6);
    assert_eq!(codeword.len(), message.len() + 6);
    assert_eq!(&codeword[..message.len()], &message);
    // a codeword evaluates to zero at every generator root
    for i in 0..6 {
        assert_eq!(poly::eval(&gf, &codeword, gf.alpha_pow(i)), 0);
    }
}

#[test]
fn parity_of_known_message() {
    // Reference parity computed with an independent Reed-Solomon
    // implementation, GF(256) and ten parity symbols.
    let gf = GaloisField::new(FieldOrder::Gf256);
    let message: Vec<u16> = b"hello world".iter().map(|&b| b as u16).collect();
    let codeword = encode(&gf, &message, 10);
    assert_eq!(
        &codeword[11..],
        &[0xED, 0x25, 0x54, 0xC4, 0xFD, 0xFD, 0x89, 0xF3, 0xA8, 0xAA]
    );
}

#[test]
fn empty_message_gets_zero_parity() {
    let gf = GaloisField::new(FieldOrder::Gf16);
    assert_eq!(encode(&gf, &[], 5), vec![0; 5]);
}
