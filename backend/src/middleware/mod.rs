//! Request middleware.
//!
//! Purpose: request lifecycle concerns such as correlation identifiers and
//! access logging.

pub mod trace;

pub use trace::RequestTrace;
