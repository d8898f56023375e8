use crate::{
    adf::{Interpretation, Prefix},
    encodings::{self, ConstraintsEncoder, EncodingContext},
    sat::{Literal, SatSolver, SatSolverFactory},
};
use anyhow::Result;
use log::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SearchSpaceState {
    Open,
    Closed,
}

/// A set of candidate interpretations, backed by an incremental SAT session.
///
/// The candidates are the interpretations encoded by the models of the structural constraints of a semantics,
/// narrowed by the refinements applied so far.
/// Refinements are never retracted, so that each refinement shrinks the set of remaining candidates.
///
/// Once no candidate remains (or [close](Self::close) is called), the search space is closed:
/// no candidate is returned anymore and refinements are ignored.
///
/// # Example
///
/// ```
/// # use crustadf::adf::{AbstractDialecticalFramework, AcceptanceCondition, ArgumentSet};
/// # use crustadf::encodings::{ConflictFreenessConstraintsEncoder, EncodingContext};
/// # use crustadf::sat::DefaultSatSolverFactory;
/// # use crustadf::solvers::SearchSpace;
/// let adf = AbstractDialecticalFramework::new_with_conditions(
///     ArgumentSet::new_with_labels(&["a"]),
///     vec![AcceptanceCondition::TrueConst],
/// ).unwrap();
/// let context = EncodingContext::new(&adf);
/// let mut search_space = SearchSpace::new(
///     &context,
///     &ConflictFreenessConstraintsEncoder,
///     &DefaultSatSolverFactory,
/// ).unwrap();
/// let mut n_candidates = 0;
/// while let Some(candidate) = search_space.candidate().unwrap() {
///     search_space.update_unequal(&candidate);
///     n_candidates += 1;
/// }
/// assert_eq!(2, n_candidates);
/// assert!(search_space.is_closed());
/// ```
pub struct SearchSpace<'a> {
    context: &'a EncodingContext,
    solver: Box<dyn SatSolver>,
    state: SearchSpaceState,
}

impl<'a> SearchSpace<'a> {
    /// Builds a new search space whose candidates satisfy the constraints produced by an encoder.
    ///
    /// The SAT session is created by the provided factory and is owned by the search space.
    pub fn new(
        context: &'a EncodingContext,
        encoder: &dyn ConstraintsEncoder,
        solver_factory: &dyn SatSolverFactory,
    ) -> Result<Self> {
        let mut solver = solver_factory.new_solver()?;
        context.prepare_solver(solver.as_mut());
        encoder.encode_constraints(context, solver.as_mut());
        Ok(Self {
            context,
            solver,
            state: SearchSpaceState::Open,
        })
    }

    /// Returns the encoding context this search space relies on.
    pub fn context(&self) -> &EncodingContext {
        self.context
    }

    /// Returns a candidate, or `None` if no candidate remains.
    ///
    /// Returning a candidate does not discard it; a refinement must be applied to get a different one.
    pub fn candidate(&mut self) -> Result<Option<Interpretation>> {
        if self.is_closed() {
            return Ok(None);
        }
        match self.solver.solve().into_model()? {
            Some(model) => Ok(Some(self.context.decode(&model))),
            None => {
                trace!("no more candidates; closing the search space");
                self.close();
                Ok(None)
            }
        }
    }

    /// Restricts the candidates to the ones agreeing with a prefix.
    pub fn restrict_to_prefix(&mut self, prefix: &Prefix) {
        let clauses = encodings::prefix_clauses(self.context, prefix);
        self.add_clauses(clauses);
    }

    /// Restricts the candidates to the ones that are at least as informative as the interpretation.
    pub fn update_larger(&mut self, interpretation: &Interpretation) {
        let clauses = encodings::larger_clauses(self.context, interpretation);
        self.add_clauses(clauses);
    }

    /// Restricts the candidates to the ones that are strictly more informative than the interpretation.
    pub fn update_specific_larger(&mut self, interpretation: &Interpretation) {
        let clauses = encodings::specific_larger_clauses(self.context, interpretation);
        self.add_clauses(clauses);
    }

    /// Discards the interpretation from the candidates.
    pub fn update_unequal(&mut self, interpretation: &Interpretation) {
        let clause = encodings::unequal_clause(self.context, interpretation);
        self.add_clauses(vec![clause]);
    }

    /// Discards the interpretation and all the less informative ones from the candidates.
    pub fn update_not_smaller(&mut self, interpretation: &Interpretation) {
        let clause = encodings::not_smaller_clause(self.context, interpretation);
        self.add_clauses(vec![clause]);
    }

    fn add_clauses(&mut self, clauses: Vec<Vec<Literal>>) {
        if self.is_closed() {
            return;
        }
        clauses.into_iter().for_each(|cl| self.solver.add_clause(cl));
    }

    /// Closes the search space.
    pub fn close(&mut self) {
        self.state = SearchSpaceState::Closed;
    }

    /// Returns `true` iff the search space is closed.
    pub fn is_closed(&self) -> bool {
        self.state == SearchSpaceState::Closed
    }
}
