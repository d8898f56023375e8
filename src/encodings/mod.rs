//! Objects used to encode ADF semantics into SAT solvers.

mod bipolarity_constraints_encoder;
pub use bipolarity_constraints_encoder::BipolarityConstraintsEncoder;

mod conflict_freeness_constraints_encoder;
pub use conflict_freeness_constraints_encoder::ConflictFreenessConstraintsEncoder;

mod encoding_context;
pub use encoding_context::EncodedLink;
pub use encoding_context::EncodingContext;

mod interpretation_constraints;
pub use interpretation_constraints::fix_partial_clauses;
pub use interpretation_constraints::larger_clauses;
pub use interpretation_constraints::not_smaller_clause;
pub use interpretation_constraints::prefix_clauses;
pub use interpretation_constraints::specific_larger_clauses;
pub use interpretation_constraints::unequal_clause;

mod specs;
pub use specs::ConstraintsEncoder;

mod tseitin_transformer;

mod two_valued_constraints_encoder;
pub use two_valued_constraints_encoder::TwoValuedConstraintsEncoder;
