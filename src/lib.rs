pub mod di;
pub mod entity;
pub mod interactor;
pub mod services;
pub mod solana;
pub mod utils;
pub mod view;

// Re-export commonly used items
pub use di::*;
pub use entity::*;
pub use interactor::*;
pub use services::*;
pub use solana::*;
pub use utils::*;
pub use view::*;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
