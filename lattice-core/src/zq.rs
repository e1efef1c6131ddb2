/// Reduces `x` modulo `q` to its centered representative.
///
/// The result `r` satisfies `r ≡ x (mod q)` and `-q/2 < r <= q/2`.
/// Inputs are taken as `i128` so callers can pass unreduced sums of
/// products without overflowing.
pub fn centered_mod(x: i128, q: i64) -> i64 {
    debug_assert!(q > 0, "modulus must be positive");
    let q = q as i128;
    let r = x.rem_euclid(q);
    let centered = if r > q / 2 { r - q } else { r };
    centered as i64
}

/// Returns `true` if `x` already lies in the centered range `(-q/2, q/2]`
pub fn is_centered(x: i64, q: i64) -> bool {
    let doubled = 2 * x as i128;
    let q = q as i128;
    -q < doubled && doubled <= q
}

/// Inclusive bounds `(low, high)` of the centered residue range of Z/qZ.
///
/// There are exactly `q` integers in `[low, high]`.
pub fn balanced_bounds(q: i64) -> (i64, i64) {
    let high = q / 2;
    let low = centered_mod(1 + high as i128, q);
    (low, high)
}

/// The offset `(q - 1) / 2` that encodes a one bit
pub fn message_scale(q: i64) -> i64 {
    (q - 1) / 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_mod_small_values() {
        assert_eq!(centered_mod(0, 7), 0);
        assert_eq!(centered_mod(3, 7), 3);
        assert_eq!(centered_mod(4, 7), -3);
        assert_eq!(centered_mod(7, 7), 0);
        assert_eq!(centered_mod(-1, 7), -1);
        assert_eq!(centered_mod(-4, 7), 3);
        assert_eq!(centered_mod(100, 13), -4);
    }

    #[test]
    fn test_centered_mod_range() {
        let q = 257;
        for x in -1000i128..1000 {
            let r = centered_mod(x, q);
            assert!(is_centered(r, q), "{} reduced to {} outside range", x, r);
            assert_eq!((x - r as i128).rem_euclid(q as i128), 0);
        }
    }

    #[test]
    fn test_centered_mod_even_modulus_keeps_upper_half() {
        // (-q/2, q/2] includes q/2 but not -q/2
        assert_eq!(centered_mod(4, 8), 4);
        assert_eq!(centered_mod(-4, 8), 4);
        assert_eq!(centered_mod(5, 8), -3);
    }

    #[test]
    fn test_centered_mod_wide_input() {
        let q = 40961;
        let x = (q as i128) * (q as i128) * 1_000 + 17;
        assert_eq!(centered_mod(x, q), 17);
        assert_eq!(centered_mod(-x, q), -17);
    }

    #[test]
    fn test_balanced_bounds() {
        assert_eq!(balanced_bounds(7), (-3, 3));
        assert_eq!(balanced_bounds(257), (-128, 128));
        let (low, high) = balanced_bounds(347);
        assert_eq!(high - low + 1, 347);
    }

    #[test]
    fn test_message_scale() {
        assert_eq!(message_scale(257), 128);
        assert_eq!(message_scale(12289), 6144);
    }
}
