//! HTTP handlers for records, the HTML page, health, and the API document.

pub mod health;
pub mod pages;
pub mod records;
pub use health::health;
pub use pages::index;
pub use records::*;
