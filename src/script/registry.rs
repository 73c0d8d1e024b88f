//! Registry of named completion handlers

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;
use tracing::info;

use crate::align::PositionChange;

/// A completion handler as seen by scripts: records carry element ids
pub type Handler = Box<dyn FnMut(&[PositionChange<String>])>;

/// Errors that can occur during handler registration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// Duplicate handler name
    #[error("duplicate handler definition: {name}")]
    Duplicate { name: String },
}

/// Handlers that scripts can name after `then`
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<String, Handler>,
}

impl HandlerRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the `log` and `print` handlers
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.handlers.insert("log".to_string(), Box::new(log_records));
        registry.handlers.insert("print".to_string(), Box::new(print_records));
        registry
    }

    /// Register a handler under a new name
    pub fn register<F>(&mut self, name: impl Into<String>, handler: F) -> Result<(), RegistryError>
    where
        F: FnMut(&[PositionChange<String>]) + 'static,
    {
        let name = name.into();
        if self.handlers.contains_key(&name) {
            return Err(RegistryError::Duplicate { name });
        }
        self.handlers.insert(name, Box::new(handler));
        Ok(())
    }

    /// Get a handler by name
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Handler> {
        self.handlers.get_mut(name)
    }

    /// All handler names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("handlers", &self.names())
            .finish()
    }
}

/// One line per record, e.g. `card-2: (40, 10) -> (52, 10)`
pub fn describe(record: &PositionChange<String>) -> String {
    format!(
        "{}: ({}, {}) -> ({}, {})",
        record.node.as_deref().unwrap_or("-"),
        record.prev_x,
        record.prev_y,
        record.next_x,
        record.next_y
    )
}

fn log_records(records: &[PositionChange<String>]) {
    for record in records {
        info!(
            node = record.node.as_deref().unwrap_or("-"),
            dx = record.dx(),
            dy = record.dy(),
            "moved to ({}, {})",
            record.next_x,
            record.next_y
        );
    }
}

fn print_records(records: &[PositionChange<String>]) {
    for record in records {
        println!("{}", describe(record));
    }
}
