//! Randomized properties of the block codec.
//!
//! Every scenario stays inside the documented correction bound, so the
//! decoder has no excuse: whatever the corruption pattern, the original
//! message must come back.

use proptest::collection::{btree_map, btree_set, vec};
use proptest::prelude::*;

use rscodec::RsCodec;

fn intact(codeword: &[u16]) -> Vec<Option<u16>> {
    codeword.iter().map(|&c| Some(c)).collect()
}

proptest! {
    /// An untouched block always decodes back to its message.
    #[test]
    fn prop_round_trip(message in vec(0u16..256, 0..=245)) {
        let codec = RsCodec::new(255, 245).unwrap();
        let codeword = codec.encode_block(&message).unwrap();
        prop_assert_eq!(codec.decode_block(&intact(&codeword)).unwrap(), message);
    }

    /// Ten parity symbols repair any five corrupted positions.
    #[test]
    fn prop_corruption_is_repaired(
        message in vec(0u16..256, 50),
        flips in btree_map(0usize..60, 1u16..256, 1..=5),
    ) {
        let codec = RsCodec::new(255, 245).unwrap();
        let codeword = codec.encode_block(&message).unwrap();
        let mut received = intact(&codeword);
        for (&pos, &mask) in &flips {
            received[pos] = Some(codeword[pos] ^ mask);
        }
        prop_assert_eq!(codec.decode_block(&received).unwrap(), message);
    }

    /// Ten parity symbols repair any ten erased positions.
    #[test]
    fn prop_erasures_are_repaired(
        message in vec(0u16..256, 50),
        erased in btree_set(0usize..60, 1..=10),
    ) {
        let codec = RsCodec::new(255, 245).unwrap();
        let codeword = codec.encode_block(&message).unwrap();
        let mut received = intact(&codeword);
        for &pos in &erased {
            received[pos] = None;
        }
        prop_assert_eq!(codec.decode_block(&received).unwrap(), message);
    }

    /// Errors and erasures mix freely while `2·errors + erasures` stays
    /// within the parity budget.
    #[test]
    fn prop_mixed_corruption_is_repaired(
        message in vec(0u16..256, 50),
        flips in btree_map(0usize..30, 1u16..256, 0..=2),
        erased in btree_set(30usize..60, 0..=6),
    ) {
        let codec = RsCodec::new(255, 245).unwrap();
        let codeword = codec.encode_block(&message).unwrap();
        let mut received = intact(&codeword);
        for (&pos, &mask) in &flips {
            received[pos] = Some(codeword[pos] ^ mask);
        }
        for &pos in &erased {
            received[pos] = None;
        }
        prop_assert_eq!(codec.decode_block(&received).unwrap(), message);
    }
}
