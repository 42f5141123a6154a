//! Automatic slippage tiers.
//!
//! Larger price impact means the quote is more likely to move before the
//! transaction lands, so the tolerated slippage widens with it.

use crate::solana::tokens::constants::DEFAULT_SLIPPAGE_VALUE;

/// Map a price impact percentage (e.g. `"0.35"`) to slippage in basis points.
///
/// Invalid or zero input falls back to 50 bps.
pub fn calculate_auto_slippage(price_impact_pct: &str) -> u16 {
    let impact = match price_impact_pct.trim().parse::<f64>() {
        Ok(value) => value.abs(),
        Err(_) => return DEFAULT_SLIPPAGE_VALUE,
    };

    if impact == 0.0 || impact.is_nan() {
        return DEFAULT_SLIPPAGE_VALUE;
    }

    match impact {
        i if i <= 0.1 => 50,
        i if i <= 0.5 => 100,
        i if i <= 1.0 => 200,
        i if i <= 2.0 => 500,
        i if i <= 5.0 => 1000,
        _ => 1500,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries_are_inclusive() {
        assert_eq!(calculate_auto_slippage("0.05"), 50);
        assert_eq!(calculate_auto_slippage("0.1"), 50);
        assert_eq!(calculate_auto_slippage("0.5"), 100);
        assert_eq!(calculate_auto_slippage("1"), 200);
        assert_eq!(calculate_auto_slippage("2.0"), 500);
        assert_eq!(calculate_auto_slippage("3"), 1000);
        assert_eq!(calculate_auto_slippage("5"), 1000);
        assert_eq!(calculate_auto_slippage("5.01"), 1500);
    }

    #[test]
    fn test_negative_impact_uses_absolute_value() {
        assert_eq!(calculate_auto_slippage("-0.7"), 200);
    }

    #[test]
    fn test_invalid_or_zero_defaults_to_50() {
        assert_eq!(calculate_auto_slippage("abc"), 50);
        assert_eq!(calculate_auto_slippage(""), 50);
        assert_eq!(calculate_auto_slippage("0"), 50);
        assert_eq!(calculate_auto_slippage("NaN"), 50);
    }

    #[test]
    fn test_monotonic_in_impact() {
        let impacts = ["0.01", "0.2", "0.8", "1.5", "4", "9", "50"];
        let tiers: Vec<u16> = impacts.iter().map(|i| calculate_auto_slippage(i)).collect();

        assert!(tiers.windows(2).all(|pair| pair[0] <= pair[1]));
    }
}
