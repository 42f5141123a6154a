use crate::entity::TokenInfo;
use crate::interactor::swap_interactor::SwapInputs;
use crate::solana::jupiter::SwapMode;
use crate::solana::tokens::constants::DEFAULT_DECIMALS;
use crate::utils::{is_valid_amount_input, validate_amount};

/// Token selection, amount fields and swap direction of a swap form
#[derive(Debug, Clone, PartialEq)]
pub struct SwapInputsInteractor {
    input_token: Option<TokenInfo>,
    output_token: Option<TokenInfo>,
    input_amount: String,
    output_amount: String,
    swap_mode: SwapMode,
}

impl Default for SwapInputsInteractor {
    fn default() -> Self {
        Self::new(None, None, "")
    }
}

impl SwapInputsInteractor {
    pub fn new(
        default_input_token: Option<TokenInfo>,
        default_output_token: Option<TokenInfo>,
        default_amount: &str,
    ) -> Self {
        Self {
            input_token: default_input_token,
            output_token: default_output_token,
            input_amount: default_amount.to_string(),
            output_amount: String::new(),
            swap_mode: SwapMode::ExactIn,
        }
    }

    pub fn input_token(&self) -> Option<&TokenInfo> {
        self.input_token.as_ref()
    }

    pub fn output_token(&self) -> Option<&TokenInfo> {
        self.output_token.as_ref()
    }

    pub fn input_amount(&self) -> &str {
        &self.input_amount
    }

    pub fn output_amount(&self) -> &str {
        &self.output_amount
    }

    pub fn swap_mode(&self) -> SwapMode {
        self.swap_mode
    }

    pub fn set_input_token(&mut self, token: TokenInfo) {
        self.input_token = Some(token);
    }

    pub fn set_output_token(&mut self, token: TokenInfo) {
        self.output_token = Some(token);
    }

    pub fn set_input_amount(&mut self, amount: &str) {
        self.input_amount = amount.to_string();
    }

    pub fn set_output_amount(&mut self, amount: &str) {
        self.output_amount = amount.to_string();
    }

    pub fn set_swap_mode(&mut self, mode: SwapMode) {
        self.swap_mode = mode;
    }

    /// Apply a keystroke to one of the amount fields.
    ///
    /// Returns `false` and leaves the state untouched when the value is rejected.
    /// An accepted edit also fixes that side of the trade (ExactIn for the input
    /// field, ExactOut for the output field).
    pub fn handle_amount_change(&mut self, value: &str, is_input: bool) -> bool {
        if !is_valid_amount_input(value) {
            return false;
        }

        let token = if is_input {
            &self.input_token
        } else {
            &self.output_token
        };
        let decimals = token
            .as_ref()
            .map(|token| token.decimals)
            .unwrap_or(DEFAULT_DECIMALS);

        if !value.is_empty() && !validate_amount(value, decimals) {
            return false;
        }

        if is_input {
            self.input_amount = value.to_string();
            self.swap_mode = SwapMode::ExactIn;
        } else {
            self.output_amount = value.to_string();
            self.swap_mode = SwapMode::ExactOut;
        }

        true
    }

    /// Exchange both sides of the trade and flip the swap mode
    pub fn swap_tokens(&mut self) {
        std::mem::swap(&mut self.input_token, &mut self.output_token);
        std::mem::swap(&mut self.input_amount, &mut self.output_amount);
        self.swap_mode = self.swap_mode.flip();
    }

    /// Orchestrator inputs for the current form. The fixed side's amount is quoted.
    pub fn swap_inputs(&self) -> SwapInputs {
        let amount = match self.swap_mode {
            SwapMode::ExactIn => &self.input_amount,
            SwapMode::ExactOut => &self.output_amount,
        };

        SwapInputs {
            input_mint: self
                .input_token
                .as_ref()
                .map(|token| token.address.clone())
                .unwrap_or_default(),
            output_mint: self
                .output_token
                .as_ref()
                .map(|token| token.address.clone())
                .unwrap_or_default(),
            amount: amount.clone(),
            input_decimals: self.input_token.as_ref().map(|token| token.decimals),
            output_decimals: self.output_token.as_ref().map(|token| token.decimals),
            swap_mode: self.swap_mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solana::tokens::constants::{SOL_MINT, USDC_MINT};

    fn sol_to_usdc() -> SwapInputsInteractor {
        SwapInputsInteractor::new(Some(TokenInfo::sol()), Some(TokenInfo::usdc()), "1")
    }

    #[test]
    fn test_defaults() {
        let inputs = sol_to_usdc();

        assert_eq!(inputs.input_token().unwrap().symbol, "SOL");
        assert_eq!(inputs.output_token().unwrap().symbol, "USDC");
        assert_eq!(inputs.input_amount(), "1");
        assert_eq!(inputs.output_amount(), "");
        assert_eq!(inputs.swap_mode(), SwapMode::ExactIn);
    }

    #[test]
    fn test_handle_amount_change_accepts_and_sets_mode() {
        let mut inputs = sol_to_usdc();

        assert!(inputs.handle_amount_change("150.25", false));
        assert_eq!(inputs.output_amount(), "150.25");
        assert_eq!(inputs.swap_mode(), SwapMode::ExactOut);

        assert!(inputs.handle_amount_change("2.5", true));
        assert_eq!(inputs.input_amount(), "2.5");
        assert_eq!(inputs.swap_mode(), SwapMode::ExactIn);

        assert!(inputs.handle_amount_change("", true));
        assert_eq!(inputs.input_amount(), "");
    }

    #[test]
    fn test_handle_amount_change_rejects_without_mutation() {
        let mut inputs = sol_to_usdc();
        let before = inputs.clone();

        assert!(!inputs.handle_amount_change("12.34.5", true));
        assert!(!inputs.handle_amount_change("abc", false));
        // USDC has 6 decimals
        assert!(!inputs.handle_amount_change("1.1234567", false));
        assert!(!inputs.handle_amount_change("0", true));

        assert_eq!(inputs, before);
    }

    #[test]
    fn test_handle_amount_change_uses_token_precision() {
        let mut inputs = sol_to_usdc();

        // SOL allows 9 fractional digits, USDC only 6
        assert!(inputs.handle_amount_change("0.123456789", true));
        assert!(!inputs.handle_amount_change("0.123456789", false));
    }

    #[test]
    fn test_handle_amount_change_defaults_to_six_decimals() {
        let mut inputs = SwapInputsInteractor::default();

        assert!(inputs.handle_amount_change("1.123456", true));
        assert!(!inputs.handle_amount_change("1.1234567", true));
    }

    #[test]
    fn test_swap_tokens() {
        let mut inputs = sol_to_usdc();
        inputs.set_output_amount("1500");

        inputs.swap_tokens();

        assert_eq!(inputs.input_token().unwrap().symbol, "USDC");
        assert_eq!(inputs.input_amount(), "1500");
        assert_eq!(inputs.output_token().unwrap().symbol, "SOL");
        assert_eq!(inputs.output_amount(), "1");
        assert_eq!(inputs.swap_mode(), SwapMode::ExactOut);

        inputs.swap_tokens();
        assert_eq!(inputs.swap_mode(), SwapMode::ExactIn);
        assert_eq!(inputs.input_token().unwrap().symbol, "SOL");
    }

    #[test]
    fn test_setters_do_not_validate() {
        let mut inputs = SwapInputsInteractor::default();

        inputs.set_input_amount("not a number");
        inputs.set_swap_mode(SwapMode::ExactOut);
        inputs.set_input_token(TokenInfo::sse());

        assert_eq!(inputs.input_amount(), "not a number");
        assert_eq!(inputs.swap_mode(), SwapMode::ExactOut);
        assert_eq!(inputs.input_token().unwrap().symbol, "SSE");
    }

    #[test]
    fn test_swap_inputs_follow_fixed_side() {
        let mut inputs = sol_to_usdc();

        let exact_in = inputs.swap_inputs();
        assert_eq!(exact_in.input_mint, SOL_MINT);
        assert_eq!(exact_in.output_mint, USDC_MINT);
        assert_eq!(exact_in.amount, "1");
        assert_eq!(exact_in.input_decimals, Some(9));
        assert_eq!(exact_in.output_decimals, Some(6));

        assert!(inputs.handle_amount_change("25", false));
        let exact_out = inputs.swap_inputs();
        assert_eq!(exact_out.amount, "25");
        assert_eq!(exact_out.swap_mode, SwapMode::ExactOut);
    }
}
