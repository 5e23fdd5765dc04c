//! Reusable UI components.

mod error_banner;
mod loading;
mod stat_card;

pub use error_banner::ErrorBanner;
pub use loading::Loading;
pub use stat_card::StatCard;
