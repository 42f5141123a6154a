pub mod quote_refresh_service;

pub use quote_refresh_service::{QuoteRefreshService, RefreshTarget};
