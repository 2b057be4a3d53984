//! Error types for strict path resolution.

use thiserror::Error;

/// Errors produced by [`crate::resolve_strict`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The specifier climbs above the root of the virtual file set.
    #[error("import {spec:?} in {from} escapes the project root")]
    EscapesRoot { from: String, spec: String },

    /// The specifier is not a relative (`./` or `../`) import.
    #[error("import {spec:?} is not a relative specifier")]
    NotRelative { spec: String },
}
