//! # UI Error Types
//!
//! All errors that can occur while mutating the widget tree or loading
//! configuration.

use thiserror::Error;

use crate::tree::NodeId;

/// Errors that can occur in the widget tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UiError {
    /// Attempted to add a node as its own child.
    #[error("node {node} cannot be added to itself")]
    SelfParent {
        /// The offending node.
        node: NodeId,
    },

    /// Adding the node would make it its own ancestor.
    #[error("adding node {node} under {ancestor} would create a cycle")]
    Cycle {
        /// The node being added.
        node: NodeId,
        /// The would-be parent, which is a descendant of `node`.
        ancestor: NodeId,
    },

    /// A sibling with the same name already exists.
    #[error("parent {parent} already has a child named {name:?}")]
    DuplicateName {
        /// The parent whose names collide.
        parent: NodeId,
        /// The colliding name.
        name: String,
    },

    /// Attempted to remove a node from a parent it does not belong to.
    #[error("node {child} is not a child of {parent}")]
    NotAChild {
        /// The parent the removal targeted.
        parent: NodeId,
        /// The node that was not found among its children.
        child: NodeId,
    },

    /// The handle refers to a node that has been disposed.
    #[error("node {0} has been disposed")]
    StaleNode(NodeId),

    /// A compound part was passed where an ordinary node was expected, or
    /// the node is already owned by another widget.
    #[error("node {0} is a part of another widget")]
    PartConflict(NodeId),

    /// Invalid configuration file.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Configuration file could not be read.
    #[error("failed to read {path}: {reason}")]
    Io {
        /// Path that failed.
        path: String,
        /// Underlying I/O error text.
        reason: String,
    },
}

/// Result type for widget tree operations.
pub type UiResult<T> = Result<T, UiError>;
