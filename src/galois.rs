//! Arithmetic for the Galois fields GF(q) the codec can operate in.
//!
//! An element of GF(q) with q = 2^m is represented by an integer whose bits
//! are the coefficients of a polynomial over GF(2) of degree below m. The
//! least significant bit is the coefficient for 1. For example in GF(256):
//!
//! > 242 = 0b11110010 = x^7 + x^6 + x^5 + x^4 + x.
//!
//! Addition works coefficient by coefficient, which is a plain XOR of the
//! two integers.
//!
//! Multiplying two such polynomials can produce powers of x of degree m and
//! beyond, so multiplication is defined modulo a fixed irreducible
//! polynomial. With the polynomials chosen here the element 2 (that is, x)
//! generates every nonzero element: 2^0, 2^1, ..., 2^(q-2) enumerate all of
//! them, and 2^(q-1) wraps around to 1. So any nonzero element can be
//! written as a power of 2, and a product reduces to an addition of
//! exponents. The [`GaloisField`] struct holds the two lookup tables for
//! this: `exp` maps an exponent to the element, `log` maps an element back
//! to its exponent.
//!
//! Unlike a fixed GF(256) implementation the field size is picked at
//! runtime, so the tables live in heap storage owned by the codec instance
//! instead of being `const` data.

#[cfg(test)]
use enum_iterator::Sequence;
#[cfg(test)]
use pretty_assertions::assert_eq;

/// Field sizes supported by the codec, each with its reduction polynomial.
///
/// A codec for codewords of `n` symbols works in GF(n + 1), so the variant
/// is normally picked through [`from_order`](FieldOrder::from_order) with
/// `q = n + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(Sequence))]
pub enum FieldOrder {
    Gf4,
    Gf8,
    Gf16,
    Gf32,
    Gf64,
    Gf128,
    Gf256,
    Gf512,
    Gf1024,
    Gf2048,
    Gf4096,
    Gf8192,
    Gf16384,
    Gf32768,
    Gf65536,
}

impl FieldOrder {
    /// Look up the variant for a field of `q` elements.
    ///
    /// Returns `None` if no reduction polynomial is on file for `q`.
    pub fn from_order(q: usize) -> Option<Self> {
        match q {
            4 => Some(Self::Gf4),
            8 => Some(Self::Gf8),
            16 => Some(Self::Gf16),
            32 => Some(Self::Gf32),
            64 => Some(Self::Gf64),
            128 => Some(Self::Gf128),
            256 => Some(Self::Gf256),
            512 => Some(Self::Gf512),
            1024 => Some(Self::Gf1024),
            2048 => Some(Self::Gf2048),
            4096 => Some(Self::Gf4096),
            8192 => Some(Self::Gf8192),
            16384 => Some(Self::Gf16384),
            32768 => Some(Self::Gf32768),
            65536 => Some(Self::Gf65536),
            _ => None,
        }
    }

    /// Number of field elements q.
    pub fn order(self) -> usize {
        match self {
            Self::Gf4 => 4,
            Self::Gf8 => 8,
            Self::Gf16 => 16,
            Self::Gf32 => 32,
            Self::Gf64 => 64,
            Self::Gf128 => 128,
            Self::Gf256 => 256,
            Self::Gf512 => 512,
            Self::Gf1024 => 1024,
            Self::Gf2048 => 2048,
            Self::Gf4096 => 4096,
            Self::Gf8192 => 8192,
            Self::Gf16384 => 16384,
            Self::Gf32768 => 32768,
            Self::Gf65536 => 65536,
        }
    }

    /// Bits needed to store one symbol of this field.
    pub fn symbol_bits(self) -> u32 {
        self.order().trailing_zeros()
    }

    /// The irreducible polynomial defining multiplication in this field,
    /// in the same bit representation as the elements.
    ///
    /// Element 2 is a generator of the multiplicative group for each of
    /// these polynomials.
    pub fn primitive_polynomial(self) -> u32 {
        match self {
            Self::Gf4 => 0x7,
            Self::Gf8 => 0xB,
            Self::Gf16 => 0x13,
            Self::Gf32 => 0x25,
            Self::Gf64 => 0x43,
            Self::Gf128 => 0x89,
            Self::Gf256 => 0x11D,
            Self::Gf512 => 0x211,
            Self::Gf1024 => 0x409,
            Self::Gf2048 => 0x805,
            Self::Gf4096 => 0x1053,
            Self::Gf8192 => 0x201B,
            Self::Gf16384 => 0x4443,
            Self::Gf32768 => 0x8003,
            Self::Gf65536 => 0x1100B,
        }
    }
}

/// Exp/log lookup tables for one field, built once per codec instance.
///
/// The tables are immutable after construction, all operations only read
/// from them.
pub(crate) struct GaloisField {
    order: FieldOrder,
    exp: Vec<u16>,
    log: Vec<u16>,
}

impl GaloisField {
    pub(crate) fn new(order: FieldOrder) -> Self {
        let q = order.order();
        let n = q - 1;
        let poly = order.primitive_polynomial();
        let mut exp = vec![1u16; 2 * q];
        let mut log = vec![0u16; q];
        // Walk the powers of the generator 2: shifting left multiplies by
        // x, and whenever the result grows a bit at position q it is
        // reduced with the irreducible polynomial. The shift happens in u32
        // because the unreduced value exceeds u16 for GF(65536).
        let mut x: u32 = 1;
        for i in 1..n {
            x <<= 1;
            if x & q as u32 != 0 {
                x ^= poly;
            }
            exp[i] = x as u16;
            log[x as usize] = i as u16;
        }
        // The exponents repeat with period n. Doubling the table lets
        // multiplication and division index with summed logs directly,
        // without reducing the exponent modulo n first.
        for i in n..2 * q {
            exp[i] = exp[i - n];
        }
        Self { order, exp, log }
    }

    pub(crate) fn field_order(&self) -> FieldOrder {
        self.order
    }

    /// Number of field elements q.
    pub(crate) fn order(&self) -> usize {
        self.order.order()
    }

    /// Number of nonzero elements, q - 1. This is the period of the powers
    /// of the generator and the codeword capacity of the field.
    pub(crate) fn group_order(&self) -> usize {
        self.order.order() - 1
    }

    /// The generator raised to the power `i`.
    ///
    /// Valid for any `i` below twice the field order; the doubled table
    /// covers one full wraparound.
    pub(crate) fn alpha_pow(&self, i: usize) -> u16 {
        self.exp[i]
    }

    pub(crate) fn mul(&self, x: u16, y: u16) -> u16 {
        if x == 0 || y == 0 {
            return 0;
        }
        self.exp[self.log[x as usize] as usize + self.log[y as usize] as usize]
    }

    pub(crate) fn div(&self, x: u16, y: u16) -> u16 {
        assert_ne!(y, 0, "division by zero");
        if x == 0 {
            return 0;
        }
        self.exp[self.log[x as usize] as usize + self.group_order() - self.log[y as usize] as usize]
    }
}

#[test]
fn sanity_check_tables() {
    for order in enum_iterator::all::<FieldOrder>() {
        let gf = GaloisField::new(order);
        let n = gf.group_order();
        for i in 0..n {
            assert_eq!(gf.log[gf.exp[i] as usize] as usize, i);
            assert_eq!(gf.exp[i], gf.exp[i + n]);
        }
        for x in 1..order.order() {
            assert_eq!(gf.exp[gf.log[x] as usize] as usize, x);
        }
    }
}

#[test]
fn gf256_mul() {
    let gf = GaloisField::new(FieldOrder::Gf256);
    assert_eq!(gf.mul(123, 1), 123);
    assert_eq!(gf.mul(234, 0), 0);
    assert_eq!(gf.mul(0, 23), 0);
    // 3 * 7 = (x + 1)(x^2 + x + 1) = x^3 + 1, no reduction involved
    assert_eq!(gf.mul(3, 7), 9);
    // 2 * 4 * 8 * 16 * 32 = 2^(1+2+3+4+5)
    let chained = gf.mul(gf.mul(gf.mul(gf.mul(2, 4), 8), 16), 32);
    assert_eq!(chained, gf.alpha_pow(15));
    assert_eq!(chained, 38);
}

#[test]
fn gf256_div_mul() {
    let gf = GaloisField::new(FieldOrder::Gf256);
    for a in 0..=255 {
        for b in 1..=255 {
            let a_div_b = gf.div(a, b);
            assert_eq!(gf.mul(a_div_b, b), a);
        }
    }
}

#[test]
fn gf4_full_multiplication_table() {
    // Small enough to spell out: 2 = x generates 2, 3 = x^2, 1 = x^3.
    let gf = GaloisField::new(FieldOrder::Gf4);
    assert_eq!(gf.mul(2, 2), 3);
    assert_eq!(gf.mul(2, 3), 1);
    assert_eq!(gf.mul(3, 3), 2);
    assert_eq!(gf.div(1, 2), 3);
    assert_eq!(gf.div(1, 3), 2);
}

#[test]
fn gf65536_uses_full_symbol_range() {
    let gf = GaloisField::new(FieldOrder::Gf65536);
    let a = gf.mul(0x8000, 2);
    assert_ne!(a, 0);
    assert_eq!(gf.div(a, 2), 0x8000);
    assert_eq!(gf.mul(0xFFFF, 1), 0xFFFF);
}

#[test]
#[should_panic(expected = "division by zero")]
fn division_by_zero_panics() {
    let gf = GaloisField::new(FieldOrder::Gf16);
    gf.div(5, 0);
}

#[test]
fn order_round_trip() {
    for order in enum_iterator::all::<FieldOrder>() {
        assert_eq!(FieldOrder::from_order(order.order()), Some(order));
    }
    assert_eq!(FieldOrder::from_order(0), None);
    assert_eq!(FieldOrder::from_order(6), None);
    assert_eq!(FieldOrder::from_order(255), None);
    assert_eq!(FieldOrder::from_order(131072), None);
}

#[test]
fn symbol_bits_match_order() {
    assert_eq!(FieldOrder::Gf4.symbol_bits(), 2);
    assert_eq!(FieldOrder::Gf256.symbol_bits(), 8);
    assert_eq!(FieldOrder::Gf65536.symbol_bits(), 16);
}
