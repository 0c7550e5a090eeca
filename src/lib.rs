//! Reed-Solomon error and erasure correction over configurable Galois
//! fields.
//!
//! The entry point is [RsCodec]. It appends parity symbols to a message
//! and later repairs corrupted or unreadable symbols out of that parity.

mod decoding;
mod encoding;
mod galois;
mod poly;

pub use decoding::DecodeError;
pub use encoding::EncodeError;
pub use galois::FieldOrder;

use galois::GaloisField;
use thiserror::Error;

#[cfg(test)]
use pretty_assertions::assert_eq;

/// Ways a codec configuration can be rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The codeword length does not match any supported field.
    #[error("no supported field of order {order}")]
    UnsupportedOrder { order: usize },
    /// More message symbols requested than fit into one codeword.
    #[error("message capacity {k} exceeds codeword capacity {n}")]
    InvalidDimensions { n: usize, k: usize },
}

/// A Reed-Solomon codec with codewords of `n` symbols, `k` of them data.
///
/// The codeword length `n` must be one less than a supported field order,
/// see [FieldOrder]. The remaining `n - k` symbols are parity. Messages
/// may be shorter than `k`, the code then simply runs shortened.
///
/// Up to `(n - k) / 2` corrupted symbols at unknown positions can be
/// repaired per block. A position the caller knows to be unreadable (an
/// *erasure*, marked `None`) costs one parity symbol instead of two, so
/// up to `n - k` pure erasures are repairable.
///
/// ## Examples
///
/// ```rust
/// # use rscodec::RsCodec;
/// let codec = RsCodec::new(255, 245).unwrap();
/// let message: Vec<u16> = b"hello world".iter().map(|&b| b as u16).collect();
/// let codeword = codec.encode_block(&message).unwrap();
/// assert_eq!(codeword.len(), message.len() + 10);
///
/// // corrupt five symbols, the most ten parity symbols can repair
/// let mut received: Vec<Option<u16>> = codeword.iter().map(|&c| Some(c)).collect();
/// for pos in [1, 2, 3, 9, 16] {
///     received[pos] = Some(0x2a);
/// }
/// assert_eq!(codec.decode_block(&received).unwrap(), message);
/// ```
///
/// Marking the unreadable positions stretches the same parity twice as
/// far:
///
/// ```rust
/// # use rscodec::RsCodec;
/// # let codec = RsCodec::new(255, 245).unwrap();
/// # let message: Vec<u16> = b"hello world".iter().map(|&b| b as u16).collect();
/// # let codeword = codec.encode_block(&message).unwrap();
/// let mut received: Vec<Option<u16>> = codeword.iter().map(|&c| Some(c)).collect();
/// for pos in [0, 4, 5, 6, 7, 12, 14, 18, 19, 20] {
///     received[pos] = None;
/// }
/// assert_eq!(codec.decode_block(&received).unwrap(), message);
/// ```
pub struct RsCodec {
    gf: GaloisField,
    nsym: usize,
}

impl RsCodec {
    /// Configure a codec for codewords of `n` symbols carrying `k`
    /// message symbols.
    ///
    /// Fails unless `n + 1` is one of the supported field orders and
    /// `k <= n`.
    pub fn new(n: usize, k: usize) -> Result<Self, ConfigError> {
        let order = FieldOrder::from_order(n + 1)
            .ok_or(ConfigError::UnsupportedOrder { order: n + 1 })?;
        if k > n {
            return Err(ConfigError::InvalidDimensions { n, k });
        }
        Ok(RsCodec {
            gf: GaloisField::new(order),
            nsym: n - k,
        })
    }

    /// Number of symbols in a full codeword.
    pub fn n(&self) -> usize {
        self.gf.group_order()
    }

    /// Number of message symbols in a full codeword.
    pub fn k(&self) -> usize {
        self.n() - self.nsym
    }

    /// Number of parity symbols appended to each message.
    pub fn nsym(&self) -> usize {
        self.nsym
    }

    /// The field the codec computes in.
    pub fn field_order(&self) -> FieldOrder {
        self.gf.field_order()
    }

    /// Append parity to `message`, yielding a codeword.
    pub fn encode_block(&self, message: &[u16]) -> Result<Vec<u16>, EncodeError> {
        if message.len() + self.nsym > self.n() {
            return Err(EncodeError::MessageTooLong {
                len: message.len(),
                capacity: self.k(),
            });
        }
        let order = self.gf.order();
        for (index, &value) in message.iter().enumerate() {
            if (value as usize) >= order {
                return Err(EncodeError::SymbolOutOfRange {
                    index,
                    value,
                    order,
                });
            }
        }
        Ok(encoding::encode(&self.gf, message, self.nsym))
    }

    /// Recover the message symbols from a received block.
    ///
    /// Mark unreadable positions with `None`. On success the parity tail
    /// is stripped, so the result compares directly against the encoded
    /// message.
    pub fn decode_block(&self, received: &[Option<u16>]) -> Result<Vec<u16>, DecodeError> {
        decoding::decode(&self.gf, received, self.nsym)
    }
}

#[test]
fn dimensions_are_derived_from_the_field() {
    let codec = RsCodec::new(255, 223).unwrap();
    assert_eq!(codec.n(), 255);
    assert_eq!(codec.k(), 223);
    assert_eq!(codec.nsym(), 32);
    assert_eq!(codec.field_order(), FieldOrder::Gf256);
}

#[test]
fn rejects_unsupported_codeword_length() {
    assert_eq!(
        RsCodec::new(100, 80).err(),
        Some(ConfigError::UnsupportedOrder { order: 101 })
    );
}

#[test]
fn rejects_more_data_than_codeword() {
    assert_eq!(
        RsCodec::new(15, 16).err(),
        Some(ConfigError::InvalidDimensions { n: 15, k: 16 })
    );
}

#[test]
fn encode_rejects_overlong_message() {
    let codec = RsCodec::new(15, 11).unwrap();
    let message = [0u16; 12];
    assert_eq!(
        codec.encode_block(&message),
        Err(EncodeError::MessageTooLong {
            len: 12,
            capacity: 11
        })
    );
}

#[test]
fn encode_rejects_symbols_outside_field() {
    let codec = RsCodec::new(15, 11).unwrap();
    assert_eq!(
        codec.encode_block(&[1, 16]),
        Err(EncodeError::SymbolOutOfRange {
            index: 1,
            value: 16,
            order: 16
        })
    );
}

#[test]
fn zero_parity_codec_passes_data_through() {
    let codec = RsCodec::new(15, 15).unwrap();
    let codeword = codec.encode_block(&[1, 2, 3]).unwrap();
    assert_eq!(codeword, vec![1, 2, 3]);
    let received: Vec<Option<u16>> = codeword.iter().map(|&c| Some(c)).collect();
    assert_eq!(codec.decode_block(&received).unwrap(), vec![1, 2, 3]);
}
