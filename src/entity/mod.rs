mod swap_error;
mod swap_result;
mod swap_state;
mod token_info;

pub use swap_error::SwapError;
pub use swap_result::SwapResult;
pub use swap_state::{SwapState, SwapStatus};
pub use token_info::TokenInfo;
