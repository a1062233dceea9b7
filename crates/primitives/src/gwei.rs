/// One gwei in wei.
pub const WEI_PER_GWEI: u128 = 1_000_000_000;

/// Convert a gas price in wei to a whole-number gwei string.
///
/// Rounds to the nearest gwei (half up), so sub-gwei prices render as `"0"`.
/// Computed in integer arithmetic; exact over the full `u128` range, where a
/// float division would lose precision above 2^53 wei.
pub fn wei_to_gwei(wei: u128) -> String {
    let gwei = (wei + WEI_PER_GWEI / 2) / WEI_PER_GWEI;
    gwei.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sub_gwei_rounds_to_zero() {
        assert_eq!(wei_to_gwei(123_456_789), "0");
    }

    #[test]
    fn exact_multiple() {
        assert_eq!(wei_to_gwei(5_000_000_000), "5");
    }

    #[test]
    fn zero() {
        assert_eq!(wei_to_gwei(0), "0");
    }

    #[test]
    fn rounds_half_up() {
        assert_eq!(wei_to_gwei(1_500_000_000), "2");
        assert_eq!(wei_to_gwei(1_499_999_999), "1");
    }

    #[test]
    fn large_values_stay_exact() {
        // 2^90 wei is far beyond f64 integer precision
        let wei = 1u128 << 90;
        assert_eq!(wei_to_gwei(wei), (wei / WEI_PER_GWEI).to_string());
    }
}
