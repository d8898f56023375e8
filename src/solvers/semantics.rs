use super::{
    model_iterator::Refinement, GroundGenerator, Maximizer, SatGroundGenerator, SearchSpace,
    Verifier,
};
use crate::{
    adf::{AbstractDialecticalFramework, LabelType, Prefix},
    encodings::{
        BipolarityConstraintsEncoder, ConflictFreenessConstraintsEncoder, ConstraintsEncoder,
        EncodingContext, TwoValuedConstraintsEncoder,
    },
    sat::SatSolverFactory,
};
use anyhow::Result;
use strum_macros::{AsRefStr, EnumIter, EnumString};

/// The semantics for which models can be computed.
///
/// The short names (`cf`, `adm`, ...) are used to parse and display the semantics.
///
/// ```
/// # use crustadf::solvers::Semantics;
/// # use std::str::FromStr;
/// assert_eq!(Semantics::Preferred, Semantics::from_str("prf").unwrap());
/// assert_eq!("stb", Semantics::Stable.as_ref());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, EnumIter, EnumString)]
pub enum Semantics {
    /// Conflict-free interpretations.
    #[strum(serialize = "cf")]
    ConflictFree,
    /// Maximal conflict-free interpretations.
    #[strum(serialize = "nai")]
    Naive,
    /// Admissible interpretations.
    #[strum(serialize = "adm")]
    Admissible,
    /// Maximal admissible interpretations.
    #[strum(serialize = "prf")]
    Preferred,
    /// Complete interpretations.
    #[strum(serialize = "com")]
    Complete,
    /// Stable models.
    #[strum(serialize = "stb")]
    Stable,
    /// Two-valued models.
    #[strum(serialize = "mod")]
    Model,
    /// The grounded interpretation.
    #[strum(serialize = "grd")]
    Grounded,
}

impl Semantics {
    /// Returns the encoder of the structural constraints satisfied by the candidates.
    pub fn constraints_encoder(&self) -> &'static dyn ConstraintsEncoder {
        match self {
            Semantics::ConflictFree | Semantics::Naive | Semantics::Grounded => {
                &ConflictFreenessConstraintsEncoder
            }
            Semantics::Admissible | Semantics::Preferred | Semantics::Complete => {
                &BipolarityConstraintsEncoder
            }
            Semantics::Stable | Semantics::Model => &TwoValuedConstraintsEncoder,
        }
    }

    /// Returns the verifier candidates must pass, if any.
    pub fn verifier(&self) -> Option<Verifier> {
        match self {
            Semantics::Admissible | Semantics::Preferred => Some(Verifier::Admissible),
            Semantics::Complete => Some(Verifier::Complete),
            Semantics::Stable => Some(Verifier::Stable),
            Semantics::ConflictFree | Semantics::Naive | Semantics::Model | Semantics::Grounded => {
                None
            }
        }
    }

    /// Returns `true` iff the models are the maximal verified candidates w.r.t. the information order.
    pub fn is_maximizing(&self) -> bool {
        matches!(self, Semantics::Naive | Semantics::Preferred)
    }

    /// Returns `true` iff all the models are two-valued.
    pub fn is_two_valued(&self) -> bool {
        matches!(self, Semantics::Stable | Semantics::Model)
    }

    /// Adds the constraints a search space needs before its first candidate.
    ///
    /// The grounded semantics pins the search space to the grounded interpretation.
    pub(crate) fn restrict_search_space<T>(
        &self,
        adf: &AbstractDialecticalFramework<T>,
        search_space: &mut SearchSpace<'_>,
        solver_factory: &dyn SatSolverFactory,
    ) -> Result<()>
    where
        T: LabelType,
    {
        if *self == Semantics::Grounded {
            let generator = SatGroundGenerator::new(solver_factory);
            let mut state = generator.initialize(adf)?;
            let grounded = generator.generate(&mut state, adf)?;
            search_space.restrict_to_prefix(&Prefix::from_interpretation(&grounded));
        }
        Ok(())
    }

    /// Returns the way verified candidates are turned into models.
    pub(crate) fn refinement<'a>(
        &self,
        context: &'a EncodingContext,
        solver_factory: &'a dyn SatSolverFactory,
    ) -> Refinement<'a> {
        if self.is_maximizing() {
            Refinement::Maximize(Maximizer::new(
                context,
                self.constraints_encoder(),
                solver_factory,
            ))
        } else {
            Refinement::ExcludeCandidate
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_names_round_trip() {
        for semantics in Semantics::iter() {
            assert_eq!(semantics, Semantics::from_str(semantics.as_ref()).unwrap());
        }
        assert!(Semantics::from_str("foo").is_err());
    }

    #[test]
    fn test_configuration() {
        assert!(Semantics::Preferred.is_maximizing());
        assert_eq!(Some(Verifier::Admissible), Semantics::Preferred.verifier());
        assert!(Semantics::Model.is_two_valued());
        assert_eq!(None, Semantics::Model.verifier());
        assert!(!Semantics::Complete.is_maximizing());
    }

    #[test]
    fn test_refinement() {
        let adf = AbstractDialecticalFramework::new_with_argument_set(
            crate::adf::ArgumentSet::new_with_labels(&["a"]),
        );
        let context = EncodingContext::new(&adf);
        let factory = crate::sat::DefaultSatSolverFactory;
        for semantics in Semantics::iter() {
            let maximizing = matches!(
                semantics.refinement(&context, &factory),
                Refinement::Maximize(_)
            );
            assert_eq!(semantics.is_maximizing(), maximizing);
        }
    }
}
