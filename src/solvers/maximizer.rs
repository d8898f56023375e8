use super::{GroundGenerator, SearchSpace, VerificationSession};
use crate::{
    adf::{Interpretation, LabelType},
    encodings::{ConstraintsEncoder, EncodingContext},
    sat::SatSolverFactory,
};
use anyhow::Result;
use log::trace;

/// Extends candidates into maximal ones w.r.t. the information order.
///
/// Each maximization takes place in a dedicated search space, which is dropped at the end of the process.
/// When a verification session is provided, only the verified interpretations are kept as intermediate results.
pub(crate) struct Maximizer<'a> {
    context: &'a EncodingContext,
    encoder: &'a dyn ConstraintsEncoder,
    solver_factory: &'a dyn SatSolverFactory,
}

impl<'a> Maximizer<'a> {
    pub(crate) fn new(
        context: &'a EncodingContext,
        encoder: &'a dyn ConstraintsEncoder,
        solver_factory: &'a dyn SatSolverFactory,
    ) -> Self {
        Self {
            context,
            encoder,
            solver_factory,
        }
    }

    /// Returns a maximal interpretation that is more informative than the provided one, which must be verified.
    pub(crate) fn maximize<T, G>(
        &self,
        interpretation: Interpretation,
        mut verification_session: Option<&mut VerificationSession<'_, T, G>>,
    ) -> Result<Interpretation>
    where
        T: LabelType,
        G: GroundGenerator,
    {
        let mut search_space = SearchSpace::new(self.context, self.encoder, self.solver_factory)?;
        let mut maximal = interpretation;
        search_space.update_specific_larger(&maximal);
        let mut n_steps = 0;
        while let Some(candidate) = search_space.candidate()? {
            let verified = match verification_session.as_mut() {
                Some(session) => session.verify(&candidate)?,
                None => true,
            };
            if verified {
                maximal = candidate;
                n_steps += 1;
                search_space.update_specific_larger(&maximal);
            } else {
                search_space.update_unequal(&candidate);
            }
        }
        trace!("maximal interpretation reached in {} steps", n_steps);
        Ok(maximal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        adf::{AbstractDialecticalFramework, AcceptanceCondition as AC, ArgumentSet, TruthValue},
        encodings::{BipolarityConstraintsEncoder, ConflictFreenessConstraintsEncoder},
        sat::DefaultSatSolverFactory,
        solvers::{SatGroundGenerator, Verifier},
    };
    use TruthValue::{In, Out, Undecided};

    fn adf() -> AbstractDialecticalFramework<&'static str> {
        AbstractDialecticalFramework::new_with_conditions(
            ArgumentSet::new_with_labels(&["a", "b", "c"]),
            vec![
                AC::neg(AC::atom(1)),
                AC::neg(AC::atom(0)),
                AC::conj(vec![AC::atom(0), AC::neg(AC::atom(1))]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_maximize_admissible() {
        let adf = adf();
        let context = EncodingContext::new(&adf);
        let mut session = Verifier::Admissible
            .new_session(&adf, &context, &DefaultSatSolverFactory)
            .unwrap();
        let maximizer = Maximizer::new(&context, &BipolarityConstraintsEncoder, &DefaultSatSolverFactory);
        let start = Interpretation::from_values(vec![In, Out, Undecided]);
        let maximal = maximizer.maximize(start, Some(&mut session)).unwrap();
        assert_eq!(Interpretation::from_values(vec![In, Out, In]), maximal);
    }

    #[test]
    fn test_maximize_without_verification() {
        let adf = adf();
        let context = EncodingContext::new(&adf);
        let maximizer =
            Maximizer::new(&context, &ConflictFreenessConstraintsEncoder, &DefaultSatSolverFactory);
        let start = Interpretation::from_values(vec![Out, Undecided, Undecided]);
        let maximal = maximizer
            .maximize::<&str, SatGroundGenerator>(start, None)
            .unwrap();
        assert!(maximal.is_two_valued());
        assert_eq!(In, maximal.value(1));
        assert_eq!(Out, maximal.value(2));
    }
}
