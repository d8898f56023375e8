use super::{
    verifiers::display_values, GroundGenerator, Maximizer, SatGroundGenerator, SearchSpace,
    Semantics, VerificationSession,
};
use crate::{
    adf::{AbstractDialecticalFramework, Interpretation, LabelType, Prefix},
    encodings::EncodingContext,
    sat::SatSolverFactory,
};
use anyhow::Result;
use log::debug;

/// What is done with a verified candidate before it is returned.
pub(crate) enum Refinement<'a> {
    /// The candidate is returned as is and excluded from the search space.
    ExcludeCandidate,
    /// The candidate is extended into a maximal one; the latter and all the interpretations below it are excluded.
    Maximize(Maximizer<'a>),
}

impl Refinement<'_> {
    fn apply<T, G>(
        &self,
        search_space: &mut SearchSpace<'_>,
        candidate: Interpretation,
        verification_session: Option<&mut VerificationSession<'_, T, G>>,
    ) -> Result<Interpretation>
    where
        T: LabelType,
        G: GroundGenerator,
    {
        match self {
            Refinement::ExcludeCandidate => {
                search_space.update_unequal(&candidate);
                Ok(candidate)
            }
            Refinement::Maximize(maximizer) => {
                let maximal = maximizer.maximize(candidate, verification_session)?;
                search_space.update_not_smaller(&maximal);
                Ok(maximal)
            }
        }
    }
}

enum ModelIteratorState {
    NotStarted,
    Peeked(Interpretation),
    Exhausted,
}

/// An iterator over the models of an ADF under a semantics.
///
/// Candidates are pulled from a [SearchSpace]; the ones that pass the verifier of the semantics
/// (and are maximized, for the maximizing semantics) are returned, and the search space is refined
/// so that no model is returned twice.
///
/// When a prefix is given, only the models agreeing with it are returned;
/// verification still takes the whole framework into account.
///
/// # Example
///
/// ```
/// # use crustadf::adf::{AbstractDialecticalFramework, AcceptanceCondition, ArgumentSet, Prefix};
/// # use crustadf::encodings::EncodingContext;
/// # use crustadf::sat::DefaultSatSolverFactory;
/// # use crustadf::solvers::{ModelIterator, Semantics};
/// let adf = AbstractDialecticalFramework::new_with_conditions(
///     ArgumentSet::new_with_labels(&["a", "b"]),
///     vec![
///         AcceptanceCondition::neg(AcceptanceCondition::atom(1)),
///         AcceptanceCondition::neg(AcceptanceCondition::atom(0)),
///     ],
/// ).unwrap();
/// let context = EncodingContext::new(&adf);
/// let models = ModelIterator::new(
///     &adf,
///     &context,
///     Semantics::Stable,
///     &DefaultSatSolverFactory,
///     Prefix::default(),
/// )
/// .unwrap()
/// .collect::<anyhow::Result<Vec<_>>>()
/// .unwrap();
/// assert_eq!(2, models.len());
/// ```
pub struct ModelIterator<'a, T>
where
    T: LabelType,
{
    search_space: SearchSpace<'a>,
    verification_session: Option<VerificationSession<'a, T, SatGroundGenerator<'a>>>,
    refinement: Refinement<'a>,
    prefix: Prefix,
    state: ModelIteratorState,
}

impl<'a, T> ModelIterator<'a, T>
where
    T: LabelType,
{
    /// Builds a new iterator over the models agreeing with the prefix.
    ///
    /// The SAT sessions are created by the solver factory and are owned by the iterator.
    pub fn new(
        adf: &'a AbstractDialecticalFramework<T>,
        context: &'a EncodingContext,
        semantics: Semantics,
        solver_factory: &'a dyn SatSolverFactory,
        prefix: Prefix,
    ) -> Result<Self> {
        let mut search_space =
            SearchSpace::new(context, semantics.constraints_encoder(), solver_factory)?;
        search_space.restrict_to_prefix(&prefix);
        semantics.restrict_search_space(adf, &mut search_space, solver_factory)?;
        let verification_session = match semantics.verifier() {
            Some(v) => Some(v.new_session(adf, context, solver_factory)?),
            None => None,
        };
        Ok(Self {
            search_space,
            verification_session,
            refinement: semantics.refinement(context, solver_factory),
            prefix,
            state: ModelIteratorState::NotStarted,
        })
    }

    /// Returns `true` iff a call to `next` would return a model.
    ///
    /// The model found by this function, if any, is kept until it is consumed by `next`.
    pub fn has_next(&mut self) -> Result<bool> {
        match &self.state {
            ModelIteratorState::Peeked(_) => Ok(true),
            ModelIteratorState::Exhausted => Ok(false),
            ModelIteratorState::NotStarted => match self.find_next() {
                Ok(Some(model)) => {
                    self.state = ModelIteratorState::Peeked(model);
                    Ok(true)
                }
                Ok(None) => {
                    self.state = ModelIteratorState::Exhausted;
                    Ok(false)
                }
                Err(e) => {
                    self.state = ModelIteratorState::Exhausted;
                    Err(e)
                }
            },
        }
    }

    fn find_next(&mut self) -> Result<Option<Interpretation>> {
        while let Some(candidate) = self.search_space.candidate()? {
            debug!("new candidate: {}", display_values(&candidate));
            let verified = match self.verification_session.as_mut() {
                Some(session) => session.verify(&candidate)?,
                None => true,
            };
            if !verified {
                self.search_space.update_unequal(&candidate);
                continue;
            }
            let model = self.refinement.apply(
                &mut self.search_space,
                candidate,
                self.verification_session.as_mut(),
            )?;
            if self.prefix.is_agreed_by(&model) {
                return Ok(Some(model));
            }
            debug!("model {} left to another prefix", display_values(&model));
        }
        Ok(None)
    }
}

impl<T> Iterator for ModelIterator<'_, T>
where
    T: LabelType,
{
    type Item = Result<Interpretation>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Err(e) = self.has_next() {
            return Some(Err(e));
        }
        match std::mem::replace(&mut self.state, ModelIteratorState::NotStarted) {
            ModelIteratorState::Peeked(model) => Some(Ok(model)),
            ModelIteratorState::Exhausted => {
                self.state = ModelIteratorState::Exhausted;
                None
            }
            ModelIteratorState::NotStarted => None,
        }
    }
}
