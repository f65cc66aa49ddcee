//! Constraint resolution into Masonry maker expressions
//!
//! Interface Builder stores each constraint on the nearest common ancestor of
//! its endpoints, so a child's constraints are spread over two lists: its own
//! (size constraints and aspect ratios) and its parent's (everything relating
//! it to the parent or to siblings). A record in the parent's list may name
//! the child as either endpoint, and the two roles render differently.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::handlers::values::format_number;
use crate::model::{ConstraintRecord, Node, ObjectModel};

/// How a record relates to the child whose block is being built
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintRole {
    /// Child's own list, constant only
    SelfOnly,
    /// Child's own list, second item is the child itself (aspect ratio)
    SelfRelative,
    /// Parent's list, child is the first item
    OwnerAsFirst,
    /// Parent's list, first item is the parent and the child is the second item
    OwnerAsSecond,
}

/// Classify a record for `child`
///
/// # Arguments
/// * `record` - The constraint record
/// * `child` - Identifier of the child whose block is being built
///
/// # Returns
/// `None` when the record does not constrain `child` directly.
pub fn classify_record(record: &ConstraintRecord, child: &str) -> Option<ConstraintRole> {
    let first = record.first_item.as_deref();
    let second = record.second_item.as_deref();

    if record.owner == child {
        return match (first, second) {
            (None, None) => Some(ConstraintRole::SelfOnly),
            (None, Some(s)) if s == child => Some(ConstraintRole::SelfRelative),
            _ => None,
        };
    }

    match (first, second) {
        (Some(f), _) if f == child => Some(ConstraintRole::OwnerAsFirst),
        (None, Some(s)) if s == child => Some(ConstraintRole::OwnerAsSecond),
        _ => None,
    }
}

/// Ordered maker expressions for one child
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintBlock {
    pub child: String,
    /// Receiver of `mas_makeConstraints:`
    pub target: String,
    pub expressions: Vec<String>,
}

/// Resolve every child's constraints, in hierarchy order
///
/// Children without any resolved expression get no block. Records that
/// constrain no direct child of their owner are logged and skipped.
pub fn resolve(model: &ObjectModel) -> Vec<ConstraintBlock> {
    let mut used: HashSet<(&str, &str)> = HashSet::new();
    let mut blocks = Vec::new();

    for (parent_id, children) in model.hierarchy.iter() {
        let Some(parent) = model.nodes.get(parent_id) else {
            continue;
        };
        let parent_records = model.constraints_of(parent_id);

        for child_id in children {
            let Some(child) = model.nodes.get(child_id) else {
                continue;
            };
            let mut expressions = Vec::new();

            // Own list first, in declaration order
            for record in model.constraints_of(child_id) {
                let expression = match classify_record(record, child_id) {
                    Some(ConstraintRole::SelfOnly) => constant_expression(record),
                    Some(ConstraintRole::SelfRelative) => relative_expression(record, child),
                    _ => continue,
                };
                used.insert((record.owner.as_str(), record.id.as_str()));
                expressions.push(expression);
            }

            for record in parent_records {
                if classify_record(record, child_id) != Some(ConstraintRole::OwnerAsFirst) {
                    continue;
                }
                let expression = match record.second_item.as_deref().and_then(|s| model.nodes.get(s)) {
                    Some(counterpart) => relative_expression(record, counterpart),
                    None => constant_expression(record),
                };
                used.insert((record.owner.as_str(), record.id.as_str()));
                expressions.push(expression);
            }

            for record in parent_records {
                if classify_record(record, child_id) != Some(ConstraintRole::OwnerAsSecond) {
                    continue;
                }
                used.insert((record.owner.as_str(), record.id.as_str()));
                expressions.push(mirrored_expression(record, parent));
            }

            debug!(child = %child_id, count = expressions.len(), "resolved constraints");
            if !expressions.is_empty() {
                blocks.push(ConstraintBlock {
                    child: child_id.clone(),
                    target: child.instance_name.clone(),
                    expressions,
                });
            }
        }
    }

    for (owner, records) in model.constraints.iter() {
        for record in records {
            if !used.contains(&(owner, record.id.as_str())) {
                warn!(
                    constraint = %record.id,
                    owner = %owner,
                    first = record.first_item.as_deref().unwrap_or(owner),
                    second = record.second_item.as_deref().unwrap_or("-"),
                    "skipping constraint that relates no direct child of its owner"
                );
            }
        }
    }

    blocks
}

/// `make.<attr>.mas_equalTo(<constant>)`
fn constant_expression(record: &ConstraintRecord) -> String {
    let mut expr = format!(
        "make.{}.{}({})",
        record.first_attribute,
        record.relation.value_method(),
        format_number(record.constant.unwrap_or(0.0))
    );
    push_priority(&mut expr, record);
    expr
}

/// `make.<first>.equalTo(<counterpart>.mas_<second>)`, read from the first item
fn relative_expression(record: &ConstraintRecord, counterpart: &Node) -> String {
    let second = record.second_attribute.unwrap_or(record.first_attribute);
    let mut expr = format!(
        "make.{}.{}({}.mas_{})",
        record.first_attribute,
        record.relation.view_method(),
        counterpart_name(counterpart),
        second
    );
    if let Some(m) = record.effective_multiplier() {
        expr.push_str(&format!(".multipliedBy({})", format_number(m)));
    }
    if let Some(c) = record.constant {
        expr.push_str(&format!(".offset({})", format_number(c)));
    }
    push_priority(&mut expr, record);
    expr
}

/// The same geometry read from the second item
///
/// `owner.first = child.second * m + c` becomes
/// `child.second = owner.first / m - c / m`. Only the constant changes sign;
/// the relation is emitted as recorded.
fn mirrored_expression(record: &ConstraintRecord, owner: &Node) -> String {
    let second = record.second_attribute.unwrap_or(record.first_attribute);
    let multiplier = record.effective_multiplier();
    let mut expr = format!(
        "make.{}.{}({}.mas_{})",
        second,
        record.relation.view_method(),
        counterpart_name(owner),
        record.first_attribute
    );
    if let Some(m) = multiplier {
        expr.push_str(&format!(".dividedBy({})", format_number(m)));
    }
    if let Some(c) = record.constant {
        let offset = -c / multiplier.unwrap_or(1.0);
        expr.push_str(&format!(".offset({})", format_number(offset)));
    }
    push_priority(&mut expr, record);
    expr
}

/// Container-style nodes are addressed through their content view
fn counterpart_name(node: &Node) -> String {
    node.scope_name()
}

fn push_priority(expr: &mut String, record: &ConstraintRecord) {
    if let Some(p) = record.effective_priority() {
        expr.push_str(&format!(".priority({})", p));
    }
}
