//! Objective-C code generation
//!
//! This module takes a built ObjectModel and produces the Masonry-based
//! layout body, the property declarations, and the final header and
//! implementation files.

pub mod config;
pub mod constraints;
pub mod emit;
pub mod template;

pub use config::EmitConfig;
pub use constraints::{classify_record, resolve, ConstraintBlock, ConstraintRole};
pub use emit::{render_layout, render_properties, ObjcBuilder};
pub use template::{Artifacts, ProjectInfo, TemplateSet};
