//! Validation failure accumulator.
//!
//! A [`Notifications`] value is owned by a single command invocation:
//! validators push into it, the handler inspects it, and it is consumed into
//! the command outcome. Nothing about it is shared between requests.

use serde::{Deserialize, Serialize};

/// A single validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// The input field that failed (snake_case).
    pub code: String,

    /// Human-readable failure message.
    pub message: String,
}

impl Notification {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Ordered collection of validation failures for one command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notifications {
    items: Vec<Notification>,
}

impl Notifications {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a failure. Duplicates are kept.
    pub fn notify(&mut self, code: impl Into<String>, message: impl Into<String>) {
        self.items.push(Notification::new(code, message));
    }

    /// Returns true if any failure has been recorded.
    pub fn has_notifications(&self) -> bool {
        !self.items.is_empty()
    }

    /// Returns the recorded failures in insertion order.
    pub fn notifications(&self) -> &[Notification] {
        &self.items
    }

    /// Returns the number of recorded failures.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates over the failure messages.
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|n| n.message.as_str())
    }

    /// Consumes the sink, returning the recorded failures.
    pub fn into_vec(self) -> Vec<Notification> {
        self.items
    }
}

impl IntoIterator for Notifications {
    type Item = Notification;
    type IntoIter = std::vec::IntoIter<Notification>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
