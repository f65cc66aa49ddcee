//! Object model for a compiled descriptor
//!
//! This module walks the parsed element tree from its top-level view and
//! records nodes, the subview hierarchy and the declared constraints in
//! deterministic traversal order.

pub mod builder;
pub mod ingest;
pub mod types;

pub use builder::{build_model, DEFAULT_VIEW_NAME};
pub use ingest::locate_root;
pub use types::*;

use crate::error::CompileError;
use crate::handlers::HandlerRegistry;
use crate::parser::ast::Document;

/// Locate the top-level view of `doc` and build its object model
pub fn build(
    doc: &Document,
    registry: &HandlerRegistry,
    view_name: Option<&str>,
) -> Result<ObjectModel, CompileError> {
    let root = locate_root(doc)?;
    build_model(root, registry, view_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn test_build_from_document() {
        let doc = parse(
            r#"<document type="com.apple.InterfaceBuilder3.CocoaTouch.XIB">
                <objects>
                    <placeholder placeholderIdentifier="IBFilesOwner" id="-1"/>
                    <view contentMode="scaleToFill" id="root" customClass="ProfileView">
                        <subviews>
                            <label userLabel="name" id="n"/>
                        </subviews>
                    </view>
                </objects>
            </document>"#,
        )
        .unwrap();
        let model = build(&doc, &HandlerRegistry::default(), None).unwrap();
        assert_eq!(model.nodes.len(), 2);
        let file = model.view_file.as_ref().unwrap();
        assert_eq!(file.name, "ProfileView");
        assert_eq!(file.inherit_name, "UIView");
        assert_eq!(model.node("n").unwrap().instance_name, "self.name");
    }

    #[test]
    fn test_build_without_name_or_class() {
        let doc = parse(r#"<document><objects><view id="root"/></objects></document>"#).unwrap();
        let model = build(&doc, &HandlerRegistry::default(), None).unwrap();
        assert_eq!(model.view_file.unwrap().name, DEFAULT_VIEW_NAME);
    }
}
