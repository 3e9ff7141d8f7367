//! Runtime error taxonomy.
//!
//! Every failure here is terminal for the specific bind/unbind call. Callers
//! should treat these as programming errors to fix, not transient conditions
//! to retry.

use thiserror::Error;

use crate::element::ElementId;

/// Errors raised while resolving a binder or while a binder runs.
#[derive(Debug, Error)]
pub enum BindError {
    /// A required field's element could not be located at bind time.
    #[error(
        "required element '{symbol}' with id {id} for field '{field}' was not found in {context}. \
         If this element is optional add the '#[nullable]' attribute."
    )]
    RequiredLookup {
        id: ElementId,
        /// Symbolic resource name, or the id rendered as text when the host
        /// cannot resolve one.
        symbol: String,
        field: String,
        context: String,
    },

    /// A located element does not satisfy the capability type the field
    /// declares.
    #[error("element with id {id} for field '{field}' was of the wrong kind in {context}")]
    WrongKind {
        id: ElementId,
        field: String,
        context: String,
    },

    /// Locating or constructing a generated binder failed.
    #[error("unable to resolve binder for {type_path}: {reason}")]
    Resolution { type_path: String, reason: String },

    /// A binder was handed a target it cannot downcast, even after walking
    /// the target's ancestor chain.
    #[error("binder for {expected} received incompatible target {actual}")]
    TargetMismatch {
        expected: &'static str,
        actual: String,
    },

    /// Wrapper for any failure on the bind path, naming the target's runtime
    /// type.
    #[error("unable to bind fields for {type_path}")]
    Bind {
        type_path: String,
        #[source]
        source: Box<BindError>,
    },

    /// Wrapper for any failure on the unbind path.
    #[error("unable to unbind fields for {type_path}")]
    Unbind {
        type_path: String,
        #[source]
        source: Box<BindError>,
    },
}
