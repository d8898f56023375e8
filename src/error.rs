//! Errors raised while reasoning on Abstract Dialectical Frameworks.

use thiserror::Error;

/// The errors that may occur while building, encoding or solving ADFs.
///
/// Public functions return [anyhow::Result]; these errors can be recovered from an [anyhow::Error] with `downcast_ref`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReasoningError {
    /// An acceptance condition references an argument that is absent from the framework.
    #[error("the acceptance condition of {owner} references the unknown argument {argument}")]
    UnknownArgumentReference {
        /// The unknown argument.
        argument: String,
        /// The argument owning the acceptance condition.
        owner: String,
    },
    /// An attempt was made to decide an argument to a value that conflicts with its current one.
    #[error("the argument with id {argument_id} is already decided to another value")]
    AlreadyDecidedConflict {
        /// The id of the argument involved in the conflict.
        argument_id: usize,
    },
    /// The SAT solver failed.
    #[error("SAT solver failure: {0}")]
    SolverFailure(String),
}
