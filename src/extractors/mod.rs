//! Request extractors that turn every malformed-input rejection into a 422.

mod validated;
pub use validated::{ValidJson, ValidPath};
