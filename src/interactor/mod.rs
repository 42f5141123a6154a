pub mod amount_percentage_interactor;
pub mod swap_inputs_interactor;
pub mod swap_interactor;

pub use amount_percentage_interactor::AmountPercentageInteractor;
pub use swap_inputs_interactor::SwapInputsInteractor;
pub use swap_interactor::{
    QuoteTarget, SwapEventListener, SwapInputs, SwapInteractor, SwapInteractorImpl,
};
