//! Command handling infrastructure.

use async_trait::async_trait;

use crate::error::DomainError;
use crate::notification::Notification;

/// Trait for commands that can be dispatched to a handler.
///
/// Commands represent an intention to change catalog state. They may be
/// rejected by validation before anything is touched.
pub trait Command: Send + Sync {
    /// Returns the command name, used for logging and metrics labels.
    fn message_type(&self) -> &'static str;
}

/// Outcome of a command that ran without an infrastructure fault.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome<T> {
    /// The command was valid and its effect has been persisted.
    Completed(T),

    /// Validation failed; nothing was mutated or persisted.
    Rejected(Vec<Notification>),

    /// The target of the command does not exist.
    NotFound,
}

impl<T> CommandOutcome<T> {
    pub fn is_completed(&self) -> bool {
        matches!(self, CommandOutcome::Completed(_))
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, CommandOutcome::Rejected(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CommandOutcome::NotFound)
    }

    /// Returns the completed value, if any.
    pub fn completed(self) -> Option<T> {
        match self {
            CommandOutcome::Completed(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the validation failures, if the command was rejected.
    pub fn notifications(&self) -> Option<&[Notification]> {
        match self {
            CommandOutcome::Rejected(notifications) => Some(notifications),
            _ => None,
        }
    }

    /// Short label for logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            CommandOutcome::Completed(_) => "completed",
            CommandOutcome::Rejected(_) => "rejected",
            CommandOutcome::NotFound => "not_found",
        }
    }
}

/// Handler for one command type.
///
/// A handler validates the command, and only when validation passes does it
/// touch the entity and the repository. Repository faults are returned as
/// `Err`; rule violations are returned as `Ok(CommandOutcome::Rejected)`.
#[async_trait]
pub trait CommandHandler<C: Command + 'static>: Send + Sync {
    /// Value produced by a completed command.
    type Output: Send;

    async fn handle(&self, command: C) -> Result<CommandOutcome<Self::Output>, DomainError>;
}
