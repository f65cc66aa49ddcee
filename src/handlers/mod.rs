//! Per-element handlers
//!
//! Every descriptor element type (`view`, `label`, `tableViewCell`, ...) is
//! described by a plain function looked up by element name. The registry is
//! open: callers can add handlers for elements the built-ins do not cover.

mod registry;
pub mod values;
pub mod views;

pub use registry::{Handler, HandlerError, HandlerRegistry};
