use log::error;

use crate::utils::{from_smallest_unit, parse_base_units};

/// Derives "25% / 50% / max" amounts from a raw wallet balance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmountPercentageInteractor {
    balance: Option<u128>,
    decimals: u8,
}

impl AmountPercentageInteractor {
    pub fn new(balance: Option<u128>, decimals: u8) -> Self {
        Self { balance, decimals }
    }

    /// Balance given as a base-unit integer string; unparseable strings count as absent
    pub fn from_raw_balance(balance: Option<&str>, decimals: u8) -> Self {
        let balance = balance.and_then(|raw| {
            let parsed = parse_base_units(raw);
            if parsed.is_none() {
                error!("Error parsing raw balance: {}", raw);
            }
            parsed
        });

        Self::new(balance, decimals)
    }

    /// `percentage` of the balance as a decimal string, or `"0"` when unavailable
    pub fn get_amount_by_percentage(&self, percentage: u32) -> String {
        let balance = match self.balance {
            Some(balance) if balance > 0 => balance,
            _ => return "0".to_string(),
        };

        if percentage > 100 {
            return "0".to_string();
        }

        match balance.checked_mul(percentage as u128) {
            Some(scaled) => from_smallest_unit(scaled / 100, self.decimals),
            None => {
                error!("Error calculating percentage amount: balance overflow");
                "0".to_string()
            }
        }
    }

    /// Compute the amount and hand it to `on_amount_change`
    pub fn set_amount_by_percentage<R>(
        &self,
        percentage: u32,
        on_amount_change: impl FnOnce(String) -> R,
    ) -> R {
        on_amount_change(self.get_amount_by_percentage(percentage))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::TokenInfo;
    use crate::interactor::SwapInputsInteractor;

    #[test]
    fn test_half_of_balance() {
        let calculator = AmountPercentageInteractor::new(Some(1_000_000), 6);
        assert_eq!(calculator.get_amount_by_percentage(50), "0.5");
        assert_eq!(calculator.get_amount_by_percentage(100), "1");
        assert_eq!(calculator.get_amount_by_percentage(0), "0");
    }

    #[test]
    fn test_floor_division() {
        let calculator = AmountPercentageInteractor::new(Some(3), 0);
        assert_eq!(calculator.get_amount_by_percentage(50), "1");
    }

    #[test]
    fn test_out_of_range_or_missing_balance() {
        let calculator = AmountPercentageInteractor::new(Some(1_000_000), 6);
        assert_eq!(calculator.get_amount_by_percentage(101), "0");

        let no_balance = AmountPercentageInteractor::new(None, 6);
        assert_eq!(no_balance.get_amount_by_percentage(50), "0");

        let overflow = AmountPercentageInteractor::new(Some(u128::MAX), 6);
        assert_eq!(overflow.get_amount_by_percentage(50), "0");
    }

    #[test]
    fn test_from_raw_balance() {
        let calculator = AmountPercentageInteractor::from_raw_balance(Some("2500000000"), 9);
        assert_eq!(calculator.get_amount_by_percentage(25), "0.625");

        let invalid = AmountPercentageInteractor::from_raw_balance(Some("12abc"), 9);
        assert_eq!(invalid.get_amount_by_percentage(25), "0");
    }

    #[test]
    fn test_set_amount_forwards_to_input_field() {
        let mut inputs = SwapInputsInteractor::new(Some(TokenInfo::sol()), Some(TokenInfo::usdc()), "");
        let calculator = AmountPercentageInteractor::new(Some(2_000_000_000), 9);

        let accepted = calculator.set_amount_by_percentage(25, |amount| {
            inputs.handle_amount_change(&amount, true)
        });

        assert!(accepted);
        assert_eq!(inputs.input_amount(), "0.5");
    }
}
