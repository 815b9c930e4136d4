//! Request extractors that validate bodies before handlers run.

mod validated;
pub use validated::{ValidForm, ValidJson};
