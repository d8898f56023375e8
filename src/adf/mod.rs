//! Data structures for Abstract Dialectical Frameworks.

mod acceptance_condition;
pub use acceptance_condition::AcceptanceCondition;

mod adf_framework;
pub use adf_framework::AbstractDialecticalFramework;

mod arguments;
pub use arguments::Argument;
pub use arguments::ArgumentSet;
pub use arguments::LabelType;

mod interpretation;
pub use interpretation::Completions;
pub use interpretation::Interpretation;
pub use interpretation::Prefix;
pub use interpretation::TruthValue;

mod link;
pub use link::Link;
pub use link::LinkType;
