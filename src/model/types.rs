//! Core types for the descriptor object model

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::error::CompileError;

/// Insertion-ordered map from descriptor identifier to payload
///
/// Emission order is load-bearing (declarations must precede uses), so the
/// entries live in a plain vector and the hash index only serves lookups.
#[derive(Debug, Clone)]
pub struct OrderedMap<T> {
    entries: Vec<(String, T)>,
    index: HashMap<String, usize>,
}

impl<T> Default for OrderedMap<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T> OrderedMap<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace; replacing keeps the original position
    pub fn insert(&mut self, key: impl Into<String>, value: T) {
        let key = key.into();
        match self.index.get(&key) {
            Some(&pos) => self.entries[pos].1 = value,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.index.get(key).map(|&pos| &self.entries[pos].1)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&str, &T)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl DoubleEndedIterator<Item = &T> {
        self.entries.iter().map(|(_, v)| v)
    }
}

/// What a handler reports about one descriptor element
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectDescription {
    /// Objective-C class name (custom class when the descriptor sets one)
    pub class: String,
    /// UIKit class the element maps to, ignoring any custom class
    pub base_class: String,
    /// Constructor expression, e.g. `[[UILabel alloc] init]`
    pub constructor: String,
    /// Property name -> value expression, rendered as `x.name = value;`
    pub properties: BTreeMap<String, String>,
    /// Sort key -> message send body, rendered as `[x body];`
    pub methods: BTreeMap<String, String>,
    /// Label assigned in Interface Builder's document outline
    pub user_label: Option<String>,
}

impl ObjectDescription {
    pub fn new(class: impl Into<String>) -> Self {
        let class = class.into();
        Self {
            constructor: format!("[[{} alloc] init]", class),
            base_class: class.clone(),
            class,
            ..Self::default()
        }
    }

    pub fn set(&mut self, property: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(property.into(), value.into());
    }

    pub fn call(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.methods.insert(key.into(), message.into());
    }
}

/// One view in the compiled hierarchy
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: String,
    /// Descriptor element name, e.g. `label`
    pub element: String,
    pub class: String,
    pub base_class: String,
    pub constructor: String,
    pub properties: BTreeMap<String, String>,
    pub methods: BTreeMap<String, String>,
    pub user_label: Option<String>,
    /// Name used to refer to the instance in generated code
    pub instance_name: String,
}

impl Node {
    pub fn is_root(&self) -> bool {
        self.instance_name == ROOT_INSTANCE
    }

    /// Whether the instance is a property on the generated class
    pub fn is_property(&self) -> bool {
        !self.is_root() && self.user_label.is_some()
    }

    /// Property name without the `self.` prefix
    pub fn property_name(&self) -> Option<&str> {
        if self.is_property() {
            self.instance_name.strip_prefix("self.")
        } else {
            None
        }
    }

    /// Whether subviews and constraints live in an implicit content view
    pub fn is_container_style(&self) -> bool {
        CONTAINER_ELEMENTS.contains(&self.element.as_str())
    }

    /// Instance expression addressing this node's subview scope
    pub fn scope_name(&self) -> String {
        if self.is_container_style() {
            format!("{}.contentView", self.instance_name)
        } else {
            self.instance_name.clone()
        }
    }

    /// Selector that adds a subview to this node's scope
    pub fn attach_selector(&self) -> &'static str {
        match self.element.as_str() {
            "stackView" => "addArrangedSubview:",
            _ => "addSubview:",
        }
    }
}

/// Instance name of the root node: the generated class itself
pub const ROOT_INSTANCE: &str = "self";

/// Elements whose subviews live under a content view
pub const CONTAINER_ELEMENTS: &[&str] = &["tableViewCell", "collectionViewCell", "visualEffectView"];

/// Parent identifier and its ordered children
#[derive(Debug, Clone, PartialEq)]
pub struct HierarchyEdge {
    pub parent: String,
    pub children: Vec<String>,
}

/// Layout attributes understood by the Masonry maker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutAttribute {
    Left,
    Right,
    Top,
    Bottom,
    Leading,
    Trailing,
    Width,
    Height,
    CenterX,
    CenterY,
    Baseline,
    FirstBaseline,
    LastBaseline,
    LeftMargin,
    RightMargin,
    TopMargin,
    BottomMargin,
    LeadingMargin,
    TrailingMargin,
    CenterXWithinMargins,
    CenterYWithinMargins,
}

impl LayoutAttribute {
    pub fn parse(name: &str) -> Result<Self, CompileError> {
        use LayoutAttribute::*;
        Ok(match name {
            "left" => Left,
            "right" => Right,
            "top" => Top,
            "bottom" => Bottom,
            "leading" => Leading,
            "trailing" => Trailing,
            "width" => Width,
            "height" => Height,
            "centerX" => CenterX,
            "centerY" => CenterY,
            "baseline" => Baseline,
            "firstBaseline" => FirstBaseline,
            "lastBaseline" => LastBaseline,
            "leftMargin" => LeftMargin,
            "rightMargin" => RightMargin,
            "topMargin" => TopMargin,
            "bottomMargin" => BottomMargin,
            "leadingMargin" => LeadingMargin,
            "trailingMargin" => TrailingMargin,
            "centerXWithinMargins" => CenterXWithinMargins,
            "centerYWithinMargins" => CenterYWithinMargins,
            other => {
                return Err(CompileError::unsupported(format!(
                    "layout attribute '{}'",
                    other
                )))
            }
        })
    }

    /// Name as used in `make.<name>` and `view.mas_<name>`
    pub fn as_str(&self) -> &'static str {
        use LayoutAttribute::*;
        match self {
            Left => "left",
            Right => "right",
            Top => "top",
            Bottom => "bottom",
            Leading => "leading",
            Trailing => "trailing",
            Width => "width",
            Height => "height",
            CenterX => "centerX",
            CenterY => "centerY",
            Baseline => "baseline",
            FirstBaseline => "firstBaseline",
            LastBaseline => "lastBaseline",
            LeftMargin => "leftMargin",
            RightMargin => "rightMargin",
            TopMargin => "topMargin",
            BottomMargin => "bottomMargin",
            LeadingMargin => "leadingMargin",
            TrailingMargin => "trailingMargin",
            CenterXWithinMargins => "centerXWithinMargins",
            CenterYWithinMargins => "centerYWithinMargins",
        }
    }
}

impl fmt::Display for LayoutAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Constraint relation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Relation {
    #[default]
    Equal,
    GreaterOrEqual,
    LessOrEqual,
}

impl Relation {
    /// Parse the descriptor's `relation` attribute; absent means equal
    pub fn parse(value: Option<&str>) -> Result<Self, CompileError> {
        match value {
            None | Some("equal") => Ok(Relation::Equal),
            Some("greaterThanOrEqual") => Ok(Relation::GreaterOrEqual),
            Some("lessThanOrEqual") => Ok(Relation::LessOrEqual),
            Some(other) => Err(CompileError::unsupported(format!(
                "constraint relation '{}'",
                other
            ))),
        }
    }

    /// Maker method relating to another view's attribute
    pub fn view_method(&self) -> &'static str {
        match self {
            Relation::Equal => "equalTo",
            Relation::GreaterOrEqual => "greaterThanOrEqualTo",
            Relation::LessOrEqual => "lessThanOrEqualTo",
        }
    }

    /// Maker method relating to a scalar
    pub fn value_method(&self) -> &'static str {
        match self {
            Relation::Equal => "mas_equalTo",
            Relation::GreaterOrEqual => "mas_greaterThanOrEqualTo",
            Relation::LessOrEqual => "mas_lessThanOrEqualTo",
        }
    }
}

/// One `<constraint>` as declared in some node's constraint list
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintRecord {
    /// Descriptor id of the constraint itself
    pub id: String,
    /// Node whose constraint list declares this record
    pub owner: String,
    /// None when the constraint's first item is the owner
    pub first_item: Option<String>,
    pub first_attribute: LayoutAttribute,
    pub second_item: Option<String>,
    pub second_attribute: Option<LayoutAttribute>,
    pub relation: Relation,
    pub constant: Option<f64>,
    pub multiplier: Option<f64>,
    pub priority: Option<u32>,
}

impl ConstraintRecord {
    /// A constant-only constraint on the owner itself
    pub fn is_self_only(&self) -> bool {
        self.first_item.is_none() && self.second_item.is_none()
    }

    /// Multiplier when it changes the expression
    pub fn effective_multiplier(&self) -> Option<f64> {
        self.multiplier.filter(|m| *m != 1.0)
    }

    /// Priority when it differs from required
    pub fn effective_priority(&self) -> Option<u32> {
        self.priority.filter(|p| *p != REQUIRED_PRIORITY)
    }
}

/// Layout priority of a required constraint
pub const REQUIRED_PRIORITY: u32 = 1000;

/// Target artifact descriptor, derived once from the root node
#[derive(Debug, Clone, PartialEq)]
pub struct ViewFile {
    pub name: String,
    pub inherit_name: String,
    /// Initializer signature, e.g. `initWithFrame:(CGRect)frame`
    pub constructor: String,
}

impl ViewFile {
    /// Derive the artifact descriptor for a root of the given element and classes
    pub fn for_root(name: &str, element: &str, class: &str, base_class: &str) -> Self {
        let inherit_name = if class != name {
            class.to_string()
        } else {
            base_class.to_string()
        };
        let constructor = match element {
            "tableViewCell" => {
                "initWithStyle:(UITableViewCellStyle)style reuseIdentifier:(NSString *)reuseIdentifier"
            }
            _ => "initWithFrame:(CGRect)frame",
        };
        Self {
            name: name.to_string(),
            inherit_name,
            constructor: constructor.to_string(),
        }
    }

    /// The initializer as a message to `super`: `initWithFrame:frame`
    pub fn super_invocation(&self) -> String {
        // Drop the parenthesized parameter types
        let mut stripped = String::with_capacity(self.constructor.len());
        let mut depth = 0usize;
        for c in self.constructor.chars() {
            match c {
                '(' => depth += 1,
                ')' => depth = depth.saturating_sub(1),
                _ if depth == 0 => stripped.push(c),
                _ => {}
            }
        }
        stripped.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

/// Everything recorded while walking one descriptor
#[derive(Debug, Clone, Default)]
pub struct ObjectModel {
    /// Nodes in traversal (pre-)order
    pub nodes: OrderedMap<Node>,
    /// Parent id -> child ids, only for parents with children
    pub hierarchy: OrderedMap<Vec<String>>,
    /// Owner id -> declared constraints
    pub constraints: OrderedMap<Vec<ConstraintRecord>>,
    /// Alternate ids (a cell's own id) -> node id (its content view)
    pub aliases: HashMap<String, String>,
    pub view_file: Option<ViewFile>,
}

impl ObjectModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map an alias to the identifier the node is registered under
    pub fn canonical<'a>(&'a self, id: &'a str) -> &'a str {
        self.aliases.get(id).map(|s| s.as_str()).unwrap_or(id)
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(self.canonical(id))
    }

    pub fn children_of(&self, id: &str) -> &[String] {
        self.hierarchy
            .get(id)
            .map(|c| c.as_slice())
            .unwrap_or_default()
    }

    pub fn constraints_of(&self, id: &str) -> &[ConstraintRecord] {
        self.constraints
            .get(id)
            .map(|c| c.as_slice())
            .unwrap_or_default()
    }

    /// Hierarchy edges in forward order
    pub fn edges(&self) -> impl Iterator<Item = HierarchyEdge> + '_ {
        self.hierarchy.iter().map(|(parent, children)| HierarchyEdge {
            parent: parent.to_string(),
            children: children.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordered_map_keeps_insertion_order() {
        let mut map = OrderedMap::new();
        map.insert("z", 1);
        map.insert("a", 2);
        map.insert("m", 3);
        map.insert("a", 4);
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["z", "a", "m"]);
        assert_eq!(map.get("a"), Some(&4));
        assert_eq!(map.keys().rev().next(), Some("m"));
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_layout_attribute_roundtrip_names() {
        for name in ["leading", "centerY", "lastBaseline", "trailingMargin"] {
            assert_eq!(LayoutAttribute::parse(name).unwrap().as_str(), name);
        }
    }

    #[test]
    fn test_unknown_layout_attribute_is_unsupported() {
        let err = LayoutAttribute::parse("notAnAttribute").unwrap_err();
        assert!(matches!(err, CompileError::UnsupportedFeature { .. }));
    }

    #[test]
    fn test_relation_parse() {
        assert_eq!(Relation::parse(None).unwrap(), Relation::Equal);
        let ge = Relation::parse(Some("greaterThanOrEqual")).unwrap();
        assert_eq!(ge, Relation::GreaterOrEqual);
        assert_eq!(ge.view_method(), "greaterThanOrEqualTo");
        assert!(Relation::parse(Some("sometimes")).is_err());
    }

    fn node(element: &str, instance_name: &str) -> Node {
        Node {
            id: "n".to_string(),
            element: element.to_string(),
            class: "UIView".to_string(),
            base_class: "UIView".to_string(),
            constructor: "[[UIView alloc] init]".to_string(),
            properties: BTreeMap::new(),
            methods: BTreeMap::new(),
            user_label: None,
            instance_name: instance_name.to_string(),
        }
    }

    #[test]
    fn test_node_scope_and_attach() {
        let cell = node("collectionViewCell", "self");
        assert_eq!(cell.scope_name(), "self.contentView");
        assert!(cell.is_root());
        let stack = node("stackView", "stackView_s1");
        assert_eq!(stack.scope_name(), "stackView_s1");
        assert_eq!(stack.attach_selector(), "addArrangedSubview:");
        assert_eq!(node("view", "view_v").attach_selector(), "addSubview:");
    }

    #[test]
    fn test_view_file_for_view_root() {
        let file = ViewFile::for_root("ProfileView", "view", "UIView", "UIView");
        assert_eq!(file.inherit_name, "UIView");
        assert_eq!(file.super_invocation(), "initWithFrame:frame");
    }

    #[test]
    fn test_view_file_for_cell_with_own_custom_class() {
        let file = ViewFile::for_root("FeedCell", "tableViewCell", "FeedCell", "UITableViewCell");
        assert_eq!(file.inherit_name, "UITableViewCell");
        assert_eq!(
            file.super_invocation(),
            "initWithStyle:style reuseIdentifier:reuseIdentifier"
        );
    }

    #[test]
    fn test_view_file_inherits_foreign_custom_class() {
        let file = ViewFile::for_root("CardView", "view", "BaseCardView", "UIView");
        assert_eq!(file.inherit_name, "BaseCardView");
    }
}
