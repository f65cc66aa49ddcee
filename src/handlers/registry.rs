//! Handler registry mapping descriptor element names to handler functions

use std::collections::HashMap;

use thiserror::Error;

use crate::error::CompileError;
use crate::model::ObjectDescription;
use crate::parser::ast::Element;

use super::views;

/// Describe one element: class, constructor, properties and method calls
pub type Handler = fn(&Element) -> ObjectDescription;

/// Errors that can occur while registering handlers
#[derive(Debug, Error)]
pub enum HandlerError {
    /// A handler for this element already exists
    #[error("duplicate handler for element: {element}")]
    Duplicate { element: String },
}

/// Registry of element handlers
#[derive(Debug, Clone)]
pub struct HandlerRegistry {
    handlers: HashMap<String, Handler>,
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl HandlerRegistry {
    /// Create a registry with no handlers
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Create a registry with handlers for the common UIKit elements
    pub fn with_builtins() -> Self {
        let builtins: [(&str, Handler); 19] = [
            ("view", views::view),
            ("label", views::label),
            ("button", views::button),
            ("imageView", views::image_view),
            ("textField", views::text_field),
            ("textView", views::text_view),
            ("scrollView", views::scroll_view),
            ("tableView", views::table_view),
            ("tableViewCell", views::table_view_cell),
            ("collectionView", views::collection_view),
            ("collectionViewCell", views::collection_view_cell),
            ("switch", views::switch),
            ("slider", views::slider),
            ("activityIndicatorView", views::activity_indicator_view),
            ("progressView", views::progress_view),
            ("segmentedControl", views::segmented_control),
            ("pageControl", views::page_control),
            ("stackView", views::stack_view),
            ("visualEffectView", views::visual_effect_view),
        ];

        Self {
            handlers: builtins
                .into_iter()
                .map(|(name, handler)| (name.to_string(), handler))
                .collect(),
        }
    }

    /// Register a handler for an element name
    pub fn register(&mut self, element: &str, handler: Handler) -> Result<(), HandlerError> {
        if self.handlers.contains_key(element) {
            return Err(HandlerError::Duplicate {
                element: element.to_string(),
            });
        }
        self.handlers.insert(element.to_string(), handler);
        Ok(())
    }

    /// Register a handler, replacing any existing one
    pub fn replace(&mut self, element: &str, handler: Handler) -> Option<Handler> {
        self.handlers.insert(element.to_string(), handler)
    }

    /// Get a handler by element name
    pub fn get(&self, element: &str) -> Option<Handler> {
        self.handlers.get(element).copied()
    }

    /// Check if an element has a handler
    pub fn contains(&self, element: &str) -> bool {
        self.handlers.contains_key(element)
    }

    /// All registered element names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Dispatch an element to its handler
    pub fn describe(&self, el: &Element) -> Result<ObjectDescription, CompileError> {
        let handler = self
            .get(&el.name)
            .ok_or_else(|| CompileError::unknown_object(&el.name))?;
        Ok(handler(el))
    }
}
