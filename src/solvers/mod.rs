//! Solvers computing the models of Abstract Dialectical Frameworks.

mod decomposer;
pub use decomposer::Decomposer;

mod ground_generator;
pub use ground_generator::GroundGenerator;
pub use ground_generator::KleeneGroundGenerator;
pub use ground_generator::SatGroundGenerator;
pub use ground_generator::SatGroundGeneratorState;

mod maximizer;
pub(crate) use maximizer::Maximizer;

mod model_iterator;
pub use model_iterator::ModelIterator;

mod reasoner;
pub use reasoner::AdfReasoner;

mod search_space;
pub use search_space::SearchSpace;

mod semantics;
pub use semantics::Semantics;

mod verifiers;
pub use verifiers::VerificationSession;
pub use verifiers::Verifier;
