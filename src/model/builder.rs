//! Depth-first traversal from the top-level view into an [`ObjectModel`]

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::error::CompileError;
use crate::handlers::HandlerRegistry;
use crate::parser::ast::Element;

use super::types::{
    ConstraintRecord, LayoutAttribute, Node, ObjectModel, Relation, ViewFile, ROOT_INSTANCE,
};

/// File name used when neither a name nor a custom class is available
pub const DEFAULT_VIEW_NAME: &str = "GeneratedView";

/// Names that would shadow UIKit or Objective-C members
const RESERVED_NAMES: &[&str] = &[
    "self",
    "super",
    "id",
    "class",
    "frame",
    "bounds",
    "center",
    "layer",
    "tag",
    "alpha",
    "hidden",
    "superview",
    "subviews",
    "window",
    "contentView",
    "backgroundView",
    "textLabel",
    "imageView",
];

/// Build the object model for the view rooted at `root`
///
/// `view_name` names the generated class; without it the root's custom class
/// is used, then [`DEFAULT_VIEW_NAME`].
pub fn build_model(
    root: &Element,
    registry: &HandlerRegistry,
    view_name: Option<&str>,
) -> Result<ObjectModel, CompileError> {
    let mut builder = ModelBuilder::new(registry, view_name);
    builder.enumerate(root, 0)?;
    builder.finish()
}

struct ModelBuilder<'a> {
    registry: &'a HandlerRegistry,
    view_name: Option<&'a str>,
    model: ObjectModel,
    taken_names: HashSet<String>,
    /// Parent id -> children, ordered afterwards by parent traversal order
    pending_edges: HashMap<String, Vec<String>>,
    /// Owner id -> raw `<constraint>` elements, parsed once aliases are known
    pending_constraints: Vec<(String, Vec<&'a Element>)>,
}

impl<'a> ModelBuilder<'a> {
    fn new(registry: &'a HandlerRegistry, view_name: Option<&'a str>) -> Self {
        Self {
            registry,
            view_name,
            model: ObjectModel::new(),
            taken_names: RESERVED_NAMES.iter().map(|s| s.to_string()).collect(),
            pending_edges: HashMap::new(),
            pending_constraints: Vec::new(),
        }
    }

    /// Record `el` and its subtree; returns the id it was registered under
    fn enumerate(&mut self, el: &'a Element, depth: usize) -> Result<String, CompileError> {
        let desc = self.registry.describe(el)?;

        // Cells keep their subviews and constraints in an implicit content view
        let content = content_container(el);
        let scope = content.unwrap_or(el);
        let id = if scope.id().is_empty() {
            el.id().to_string()
        } else {
            scope.id().to_string()
        };
        self.claim(&id)?;
        if content.is_some() && !el.id().is_empty() && el.id() != id {
            self.claim(el.id())?;
            self.model.aliases.insert(el.id().to_string(), id.clone());
        }

        let instance_name = if depth == 0 {
            let name = self
                .view_name
                .or_else(|| el.attr("customClass"))
                .unwrap_or(DEFAULT_VIEW_NAME);
            self.model.view_file = Some(ViewFile::for_root(
                name,
                &el.name,
                &desc.class,
                &desc.base_class,
            ));
            ROOT_INSTANCE.to_string()
        } else {
            let name_id = if el.id().is_empty() { id.as_str() } else { el.id() };
            self.assign_instance_name(&el.name, name_id, desc.user_label.as_deref())
        };

        debug!(depth, id = %id, element = %el.name, instance = %instance_name, "visit node");

        self.model.nodes.insert(
            id.clone(),
            Node {
                id: id.clone(),
                element: el.name.clone(),
                class: desc.class,
                base_class: desc.base_class,
                constructor: desc.constructor,
                properties: desc.properties,
                methods: desc.methods,
                user_label: desc.user_label,
                instance_name,
            },
        );

        // Content view list first, then the container's own size constraints
        let mut constraints: Vec<&'a Element> = Vec::new();
        if let Some(list) = scope.child("constraints") {
            constraints.extend(list.children_named("constraint"));
        }
        if content.is_some() {
            if let Some(list) = el.child("constraints") {
                constraints.extend(list.children_named("constraint"));
            }
        }
        if !constraints.is_empty() {
            self.pending_constraints.push((id.clone(), constraints));
        }

        let mut children = Vec::new();
        if let Some(subviews) = scope.child("subviews") {
            for child in &subviews.children {
                children.push(self.enumerate(child, depth + 1)?);
            }
        }
        if !children.is_empty() {
            self.pending_edges.insert(id.clone(), children);
        }

        Ok(id)
    }

    /// Identifiers name exactly one node, directly or through an alias
    fn claim(&self, id: &str) -> Result<(), CompileError> {
        if self.model.nodes.contains_key(id) || self.model.aliases.contains_key(id) {
            return Err(CompileError::duplicate_identifier(id));
        }
        Ok(())
    }

    fn assign_instance_name(&mut self, element: &str, id: &str, label: Option<&str>) -> String {
        let base = match label {
            Some(label) => sanitize_label(label, element),
            None => format!("{}_{}", element, sanitize_id(id)),
        };

        let mut candidate = base.clone();
        let mut suffix = 2;
        while !self.taken_names.insert(candidate.clone()) {
            candidate = format!("{}{}", base, suffix);
            suffix += 1;
        }

        if label.is_some() {
            format!("self.{}", candidate)
        } else {
            candidate
        }
    }

    fn finish(mut self) -> Result<ObjectModel, CompileError> {
        // Hierarchy edges in parent-before-child order
        let parents: Vec<String> = self.model.nodes.keys().map(str::to_string).collect();
        for parent in parents {
            if let Some(children) = self.pending_edges.remove(&parent) {
                self.model.hierarchy.insert(parent, children);
            }
        }

        let pending = std::mem::take(&mut self.pending_constraints);
        for (owner, elements) in pending {
            let mut records = Vec::with_capacity(elements.len());
            for el in elements {
                let record = parse_constraint(el, &owner, &self.model)?;
                validate_record(&record, &self.model)?;
                records.push(record);
            }
            self.model.constraints.insert(owner, records);
        }

        debug!(
            nodes = self.model.nodes.len(),
            parents = self.model.hierarchy.len(),
            owners = self.model.constraints.len(),
            "object model built"
        );
        Ok(self.model)
    }
}

/// The implicit content view of container-style elements
fn content_container(el: &Element) -> Option<&Element> {
    match el.name.as_str() {
        "tableViewCell" => el.child("tableViewCellContentView"),
        "collectionViewCell" | "visualEffectView" => el
            .keyed_child("view", "contentView")
            .or_else(|| el.child("view")),
        _ => None,
    }
}

/// Turn a `<constraint>` element into a record owned by `owner`
fn parse_constraint(
    el: &Element,
    owner: &str,
    model: &ObjectModel,
) -> Result<ConstraintRecord, CompileError> {
    let item = |name: &str| {
        el.attr(name)
            .filter(|v| !v.is_empty())
            .map(|v| model.canonical(v).to_string())
    };

    let first_attribute = el
        .attr("firstAttribute")
        .ok_or_else(|| CompileError::unsupported(format!("constraint {} without firstAttribute", el.id())))
        .and_then(LayoutAttribute::parse)?;
    let second_attribute = el
        .attr("secondAttribute")
        .map(LayoutAttribute::parse)
        .transpose()?;

    let constant = el
        .attr("constant")
        .map(|raw| {
            raw.parse::<f64>().map_err(|_| {
                CompileError::unsupported(format!("constraint constant '{}'", raw))
            })
        })
        .transpose()?;

    Ok(ConstraintRecord {
        id: el.id().to_string(),
        owner: owner.to_string(),
        first_item: item("firstItem").filter(|first| first != owner),
        first_attribute,
        second_item: item("secondItem"),
        second_attribute,
        relation: Relation::parse(el.attr("relation"))?,
        constant,
        multiplier: el.attr("multiplier").and_then(parse_multiplier),
        priority: el
            .attr("priority")
            .and_then(|p| p.parse::<f64>().ok())
            .map(|p| p.round() as u32),
    })
}

fn validate_record(record: &ConstraintRecord, model: &ObjectModel) -> Result<(), CompileError> {
    for item in [&record.first_item, &record.second_item].into_iter().flatten() {
        if !model.nodes.contains_key(item) {
            return Err(CompileError::dangling(item, &record.id));
        }
    }
    Ok(())
}

/// Parse `3:4` ratios and plain decimals
fn parse_multiplier(raw: &str) -> Option<f64> {
    match raw.split_once(':') {
        Some((num, den)) => {
            let num: f64 = num.trim().parse().ok()?;
            let den: f64 = den.trim().parse().ok()?;
            if den == 0.0 {
                None
            } else {
                Some(num / den)
            }
        }
        None => raw.trim().parse().ok(),
    }
}

/// `"Title Label"` -> `titleLabel`
fn sanitize_label(label: &str, element: &str) -> String {
    let mut name = String::new();
    for word in label
        .split(|c: char| !c.is_ascii_alphanumeric() && c != '_')
        .filter(|w| !w.is_empty())
    {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            if name.is_empty() {
                name.push(first.to_ascii_lowercase());
            } else {
                name.push(first.to_ascii_uppercase());
            }
            name.push_str(chars.as_str());
        }
    }

    match name.chars().next() {
        None => element.to_string(),
        Some(c) if c.is_ascii_digit() => format!("{}{}", element, name),
        Some(_) => name,
    }
}

/// Interface Builder ids (`iN0-l1-epB`) as identifier fragments
fn sanitize_id(id: &str) -> String {
    id.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}
