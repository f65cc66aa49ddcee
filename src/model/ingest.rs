//! Locating the top-level view and rejecting unsupported descriptors

use tracing::debug;

use crate::error::CompileError;
use crate::parser::ast::{Document, Element};

/// Find the single top-level view under `document/objects`
///
/// The objects list starts with placeholders (File's Owner, First Responder)
/// and may contain other non-view objects; the first remaining element is the
/// view to compile.
pub fn locate_root(doc: &Document) -> Result<&Element, CompileError> {
    if doc.root.name != "document" {
        return Err(CompileError::MissingRootView);
    }
    let objects = doc
        .root
        .child("objects")
        .ok_or(CompileError::MissingRootView)?;

    let root = objects
        .children
        .iter()
        .find(|c| !is_non_view(&c.name))
        .ok_or(CompileError::MissingRootView)?;

    if has_active_safe_area(root) {
        return Err(CompileError::unsupported(
            "safe area layout guide; uncheck \"Use Safe Area Layout Guides\" in the xib",
        ));
    }

    debug!(element = %root.name, id = root.id(), "located top-level view");
    Ok(root)
}

fn is_non_view(name: &str) -> bool {
    matches!(name, "placeholder" | "customObject") || name.ends_with("GestureRecognizer")
}

fn has_active_safe_area(el: &Element) -> bool {
    el.children_named("viewLayoutGuide")
        .any(|guide| guide.attr("key") == Some("safeArea"))
}
