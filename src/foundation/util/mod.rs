pub mod encoding;
pub mod hex_fmt;
pub mod serde_helpers;
