//! End-to-end block correction against fixed reference vectors.
//!
//! Parity bytes and corruption patterns come from an independent GF(256)
//! Reed-Solomon implementation. They pin down the generator convention,
//! not just self-consistency of encoder and decoder.

use rscodec::{DecodeError, RsCodec};

fn as_symbols(bytes: &[u8]) -> Vec<u16> {
    bytes.iter().map(|&b| b as u16).collect()
}

fn intact(codeword: &[u16]) -> Vec<Option<u16>> {
    codeword.iter().map(|&c| Some(c)).collect()
}

/// Overwrite the given positions with the byte 'X', like a transmission
/// that garbled a few symbols.
fn tampered(codeword: &[u16], positions: &[usize]) -> Vec<Option<u16>> {
    let mut received = intact(codeword);
    for &pos in positions {
        received[pos] = Some(0x58);
    }
    received
}

const HELLO: &[u8] = b"hello world";

#[test]
fn parity_matches_reference_vector() {
    let codec = RsCodec::new(255, 245).unwrap();
    let codeword = codec.encode_block(&as_symbols(HELLO)).unwrap();

    let mut expected = as_symbols(HELLO);
    expected.extend_from_slice(&[0xed, 0x25, 0x54, 0xc4, 0xfd, 0xfd, 0x89, 0xf3, 0xa8, 0xaa]);
    assert_eq!(codeword, expected);

    assert_eq!(codec.decode_block(&intact(&codeword)).unwrap(), as_symbols(HELLO));
}

#[test]
fn parity_matches_reference_vector_for_short_message() {
    let codec = RsCodec::new(255, 245).unwrap();
    let codeword = codec.encode_block(&[1, 2, 3, 4]).unwrap();
    assert_eq!(
        codeword,
        vec![1, 2, 3, 4, 0x2c, 0x9d, 0x1c, 0x2b, 0x3d, 0xf8, 0x68, 0xfa, 0x98, 0x4d]
    );
}

#[test]
fn three_errors_are_recovered() {
    let codec = RsCodec::new(255, 245).unwrap();
    let codeword = codec.encode_block(&as_symbols(HELLO)).unwrap();
    let received = tampered(&codeword, &[2, 9, 16]);
    assert_eq!(codec.decode_block(&received).unwrap(), as_symbols(HELLO));
}

#[test]
fn five_errors_fill_the_budget_of_ten_parity_symbols() {
    let codec = RsCodec::new(255, 245).unwrap();
    let codeword = codec.encode_block(&as_symbols(HELLO)).unwrap();
    let received = tampered(&codeword, &[1, 2, 3, 9, 16]);
    assert_eq!(codec.decode_block(&received).unwrap(), as_symbols(HELLO));
}

#[test]
fn six_errors_overwhelm_ten_parity_symbols() {
    let codec = RsCodec::new(255, 245).unwrap();
    let codeword = codec.encode_block(&as_symbols(HELLO)).unwrap();
    let received = tampered(&codeword, &[1, 2, 3, 9, 16, 17]);
    assert_eq!(
        codec.decode_block(&received),
        Err(DecodeError::CouldNotLocate)
    );
}

#[test]
fn six_errors_are_recovered_with_twelve_parity_symbols() {
    let codec = RsCodec::new(255, 243).unwrap();
    let codeword = codec.encode_block(&as_symbols(HELLO)).unwrap();

    let mut expected = as_symbols(HELLO);
    expected.extend_from_slice(&[
        0x3f, 0x41, 0x79, 0xb2, 0xbc, 0xdc, 0x01, 0x71, 0xb9, 0xe3, 0xe2, 0x3d,
    ]);
    assert_eq!(codeword, expected);

    let received = tampered(&codeword, &[9, 10, 11, 12, 15, 16]);
    assert_eq!(codec.decode_block(&received).unwrap(), as_symbols(HELLO));
}

#[test]
fn ten_erasures_are_recovered() {
    let codec = RsCodec::new(255, 245).unwrap();
    let codeword = codec.encode_block(&as_symbols(HELLO)).unwrap();
    let mut received = intact(&codeword);
    for pos in [0, 2, 4, 6, 8, 11, 13, 15, 17, 19] {
        received[pos] = None;
    }
    assert_eq!(codec.decode_block(&received).unwrap(), as_symbols(HELLO));
}

#[test]
fn eleven_erasures_are_rejected_up_front() {
    let codec = RsCodec::new(255, 245).unwrap();
    let codeword = codec.encode_block(&as_symbols(HELLO)).unwrap();
    let mut received = intact(&codeword);
    for pos in 0..11 {
        received[pos] = None;
    }
    assert_eq!(
        codec.decode_block(&received),
        Err(DecodeError::TooManyErasures { count: 11, max: 10 })
    );
}

#[test]
fn errors_and_erasures_share_the_parity_budget() {
    let codec = RsCodec::new(255, 245).unwrap();
    let codeword = codec.encode_block(&as_symbols(HELLO)).unwrap();
    // two errors cost four parity symbols, six erasures the other six
    let mut received = tampered(&codeword, &[1, 7]);
    for pos in [3, 5, 11, 14, 18, 20] {
        received[pos] = None;
    }
    assert_eq!(codec.decode_block(&received).unwrap(), as_symbols(HELLO));
}

#[test]
fn overfilled_budget_never_passes_as_the_original() {
    let codec = RsCodec::new(255, 245).unwrap();
    let codeword = codec.encode_block(&as_symbols(HELLO)).unwrap();
    // three errors and six erasures want 2 * 3 + 6 = 12 parity symbols,
    // two more than exist. The decoder patches at most eight positions
    // (six erased, two located), so at least one of the nine wrong ones
    // stays wrong: it may answer with an error or with a different valid
    // word, but never with the original message.
    let mut received = tampered(&codeword, &[1, 7, 10]);
    for pos in [3, 5, 11, 14, 18, 20] {
        received[pos] = None;
    }
    match codec.decode_block(&received) {
        Ok(decoded) => assert_ne!(decoded, as_symbols(HELLO)),
        Err(_) => {}
    }
}

#[test]
fn error_located_at_an_erased_position_reports_division_by_zero() {
    let codec = RsCodec::new(255, 245).unwrap();
    // Noise far past the bound can steer the locator onto a position that
    // is already marked erased. The repeated locator root then zeroes the
    // Forney denominator, which must come back as an error, not a panic.
    #[rustfmt::skip]
    let received = vec![
        Some(0), Some(1), Some(2), Some(3), None, Some(5), Some(65), None, Some(8), Some(9),
        None, Some(11), None, Some(13), None, Some(15), Some(16), None, Some(18), Some(19),
        Some(154), Some(21), Some(22), Some(23), Some(24), Some(25), Some(26), Some(27), Some(28), None,
        Some(30), Some(144), Some(191), Some(33), Some(7), Some(35), Some(173), Some(37), Some(127), Some(39),
        Some(152), Some(121), Some(33), None, Some(48), Some(20), Some(74), Some(52), Some(139), Some(150),
    ];
    assert_eq!(
        codec.decode_block(&received),
        Err(DecodeError::DivisionByZero)
    );
}

#[test]
fn small_field_corrects_within_its_own_bound() {
    let codec = RsCodec::new(15, 11).unwrap();
    let message: Vec<u16> = vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11];
    let codeword = codec.encode_block(&message).unwrap();
    let mut received = intact(&codeword);
    received[0] = Some(codeword[0] ^ 0xf);
    received[12] = Some(codeword[12] ^ 0x3);
    assert_eq!(codec.decode_block(&received).unwrap(), message);
}

#[test]
fn widest_field_carries_full_u16_symbols() {
    let codec = RsCodec::new(65535, 65525).unwrap();
    let message: Vec<u16> = vec![0x1234, 0xffff, 0, 42, 0x8000];
    let codeword = codec.encode_block(&message).unwrap();
    let mut received = intact(&codeword);
    received[1] = Some(codeword[1] ^ 0x4001);
    received[4] = None;
    received[7] = Some(codeword[7] ^ 0x00ff);
    assert_eq!(codec.decode_block(&received).unwrap(), message);
}
