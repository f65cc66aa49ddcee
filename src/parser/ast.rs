//! Element tree for Interface Builder XML descriptors

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// A single `name="value"` pair on an element
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
    pub span: Span,
}

/// An XML element with its attributes, child elements and text content
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Element>,
    /// Concatenated non-whitespace text content, if any
    pub text: Option<String>,
    pub span: Span,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: vec![],
            children: vec![],
            text: None,
            span: 0..0,
        }
    }

    /// Look up an attribute value by name
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// True when the attribute is present and set to `YES`
    pub fn flag(&self, name: &str) -> bool {
        self.attr(name) == Some("YES")
    }

    /// The descriptor identifier, or an empty string when absent
    pub fn id(&self) -> &str {
        self.attr("id").unwrap_or_default()
    }

    /// First child element with the given tag name
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// First child element with the given tag name and `key` attribute
    pub fn keyed_child(&self, name: &str, key: &str) -> Option<&Element> {
        self.children
            .iter()
            .find(|c| c.name == name && c.attr("key") == Some(key))
    }

    /// All child elements with the given tag name
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(Attribute {
            name: name.into(),
            value: value.into(),
            span: 0..0,
        });
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }
}

/// Root of a parsed descriptor
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub root: Element,
}
