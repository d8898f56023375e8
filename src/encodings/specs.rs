use super::EncodingContext;
use crate::sat::SatSolver;

/// The trait for encoders of the structural constraints of a semantics.
///
/// These constraints are added once to a search session, before any candidate is computed.
/// Each model of the constraints decodes (see [EncodingContext::decode]) into a candidate interpretation.
pub trait ConstraintsEncoder: Send + Sync {
    /// Encodes the constraints into the SAT solver.
    ///
    /// The solver must have been prepared by [EncodingContext::prepare_solver].
    fn encode_constraints(&self, context: &EncodingContext, solver: &mut dyn SatSolver);
}
