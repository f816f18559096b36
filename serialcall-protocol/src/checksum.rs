//! Fletcher-16 checksum and the complement footer carried on the wire

/// Fletcher-16 over `data`, modulo 255
///
/// Returns `(sum2 << 8) | sum1`.
pub fn fletcher16(data: &[u8]) -> u16 {
    let mut sum1: u16 = 0;
    let mut sum2: u16 = 0;
    for &byte in data {
        sum1 = (sum1 + byte as u16) % 255;
        sum2 = (sum2 + sum1) % 255;
    }
    (sum2 << 8) | sum1
}

/// Footer bytes `[c0, c1]` for a request body without its footer
///
/// `data` is `<cmd> <len> <payload...>`.
pub fn footer(data: &[u8]) -> [u8; 2] {
    let sum = fletcher16(data);
    let f0 = sum & 0xFF;
    let f1 = (sum >> 8) & 0xFF;
    let c0 = 0xFF - ((f0 + f1) % 0xFF);
    let c1 = 0xFF - ((f0 + c0) % 0xFF);
    [c0 as u8, c1 as u8]
}

/// Whether `received` is the footer for `data`
pub fn footer_matches(data: &[u8], received: [u8; 2]) -> bool {
    footer(data) == received
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_fletcher16_known_vectors() {
        assert_eq!(fletcher16(b""), 0x0000);
        assert_eq!(fletcher16(b"abcde"), 0xC8F0);
        assert_eq!(fletcher16(b"abcdef"), 0x2057);
    }

    #[test]
    fn test_handshake_footer() {
        // cmd=1, len=0: sum1=1, sum2=2 -> f0=1, f1=2
        // c0 = 255 - 3 = 252, c1 = 255 - (1 + 252) % 255 = 2
        assert_eq!(footer(&[0x01, 0x00]), [0xFC, 0x02]);
    }

    #[test]
    fn test_footer_of_all_ones_wraps() {
        // 0xFF is 0 mod 255, so the sums never move
        assert_eq!(fletcher16(&[0xFF; 8]), 0);
        assert_eq!(footer(&[0xFF; 8]), [0xFF, 0xFF]);
    }

    proptest! {
        #[test]
        fn prop_footer_is_pure(body in proptest::collection::vec(any::<u8>(), 2..=126)) {
            prop_assert_eq!(footer(&body), footer(&body));
            prop_assert!(footer_matches(&body, footer(&body)));
        }

        #[test]
        fn prop_single_bit_flip_is_detected(
            body in proptest::collection::vec(any::<u8>(), 2..=126),
            index in any::<prop::sample::Index>(),
            bit in 0u8..8,
        ) {
            let expected = footer(&body);
            let mut corrupted = body.clone();
            let i = index.index(corrupted.len());
            corrupted[i] ^= 1 << bit;
            prop_assert!(!footer_matches(&corrupted, expected));
        }
    }
}
