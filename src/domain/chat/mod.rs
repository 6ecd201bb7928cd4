//! Chat request and result types

mod request;
mod result;

pub use request::{ChatMode, ChatRequest, UnknownMode};
pub use result::{ChatResult, ErrorKind, ERROR_MARKER};
