use super::{GroundGenerator, SatGroundGenerator};
use crate::{
    adf::{AbstractDialecticalFramework, Interpretation, LabelType},
    encodings::EncodingContext,
    sat::{Literal, SatSolver, SatSolverFactory},
};
use anyhow::Result;
use log::debug;
use strum_macros::{AsRefStr, EnumIter};

/// The kinds of checks that can be applied on candidate interpretations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Verifier {
    /// Checks the candidate is admissible: the condition of each decided argument has the value of the argument
    /// for every completion of the candidate.
    Admissible,
    /// Checks the candidate is complete: it is admissible, and no undecided argument is forced by the candidate.
    Complete,
    /// Checks the candidate is stable: it is a two-valued model, and the grounded interpretation of its omega-reduct is itself.
    Stable,
}

impl Verifier {
    /// Opens a verification session for an ADF, relying on a [SatGroundGenerator] for the stable semantics.
    pub fn new_session<'a, T>(
        &self,
        adf: &'a AbstractDialecticalFramework<T>,
        context: &'a EncodingContext,
        solver_factory: &'a dyn SatSolverFactory,
    ) -> Result<VerificationSession<'a, T, SatGroundGenerator<'a>>>
    where
        T: LabelType,
    {
        self.new_session_with_ground_generator(
            adf,
            context,
            solver_factory,
            SatGroundGenerator::new(solver_factory),
        )
    }

    /// Opens a verification session for an ADF, using the provided ground generator for the stable semantics.
    pub fn new_session_with_ground_generator<'a, T, G>(
        &self,
        adf: &'a AbstractDialecticalFramework<T>,
        context: &'a EncodingContext,
        solver_factory: &'a dyn SatSolverFactory,
        ground_generator: G,
    ) -> Result<VerificationSession<'a, T, G>>
    where
        T: LabelType,
        G: GroundGenerator,
    {
        let mut solver = solver_factory.new_solver()?;
        context.prepare_solver(solver.as_mut());
        context.encode_all_conditions(solver.as_mut());
        Ok(VerificationSession {
            verifier: *self,
            adf,
            context,
            solver,
            ground_generator,
        })
    }
}

/// A SAT session dedicated to the verification of candidates.
///
/// The session holds the definitions of the acceptance conditions of the ADF;
/// the clauses specific to a candidate are guarded by a selector which is disabled after the check.
pub struct VerificationSession<'a, T, G>
where
    T: LabelType,
    G: GroundGenerator,
{
    verifier: Verifier,
    adf: &'a AbstractDialecticalFramework<T>,
    context: &'a EncodingContext,
    solver: Box<dyn SatSolver>,
    ground_generator: G,
}

impl<T, G> VerificationSession<'_, T, G>
where
    T: LabelType,
    G: GroundGenerator,
{
    /// Returns the kind of check applied by this session.
    pub fn verifier(&self) -> Verifier {
        self.verifier
    }

    /// Checks a candidate.
    pub fn verify(&mut self, candidate: &Interpretation) -> Result<bool> {
        let verdict = match self.verifier {
            Verifier::Admissible => self.is_admissible(candidate)?,
            Verifier::Complete => {
                self.is_admissible(candidate)? && self.has_no_forced_undecided(candidate)?
            }
            Verifier::Stable => self.is_stable(candidate)?,
        };
        debug!(
            "candidate {} is {}{}",
            display_values(candidate),
            if verdict { "" } else { "not " },
            self.verifier.as_ref()
        );
        Ok(verdict)
    }

    fn is_admissible(&mut self, candidate: &Interpretation) -> Result<bool> {
        let violations = candidate
            .in_arguments()
            .map(|a| self.context.condition_literal(a).negate())
            .chain(
                candidate
                    .out_arguments()
                    .map(|a| self.context.condition_literal(a)),
            )
            .collect::<Vec<Literal>>();
        if violations.is_empty() {
            return Ok(true);
        }
        let selector = Literal::from(1 + self.solver.n_vars() as isize);
        let mut guarded = Vec::with_capacity(violations.len() + 1);
        guarded.push(selector.negate());
        guarded.extend(violations);
        self.solver.add_clause(guarded);
        let mut assumptions = vec![selector];
        (0..candidate.n_arguments())
            .filter(|a| candidate.value(*a).is_decided())
            .for_each(|a| assumptions.append(&mut self.context.decided_parent_literals(candidate, a)));
        let violated = self
            .solver
            .solve_under_assumptions(&assumptions)
            .into_satisfiability();
        self.solver.add_clause(vec![selector.negate()]);
        Ok(!violated?)
    }

    fn has_no_forced_undecided(&mut self, candidate: &Interpretation) -> Result<bool> {
        for arg in candidate.undecided_arguments() {
            let mut assumptions = self.context.decided_parent_literals(candidate, arg);
            let acc = self.context.condition_literal(arg);
            for polarity in [acc, acc.negate()] {
                assumptions.push(polarity);
                if !self
                    .solver
                    .solve_under_assumptions(&assumptions)
                    .into_satisfiability()?
                {
                    return Ok(false);
                }
                assumptions.pop();
            }
        }
        Ok(true)
    }

    fn is_stable(&mut self, candidate: &Interpretation) -> Result<bool> {
        if !candidate.is_two_valued() {
            return Ok(false);
        }
        let is_model = (0..self.adf.n_arguments()).all(|a| {
            candidate.satisfies(self.adf.acceptance_condition(a)) == candidate.value(a).as_bool()
        });
        if !is_model {
            return Ok(false);
        }
        let reduct = self.adf.omega_reduct(candidate);
        let mut state = self.ground_generator.initialize(&reduct)?;
        let grounded = self.ground_generator.generate(&mut state, &reduct)?;
        Ok(grounded == *candidate)
    }
}

pub(crate) fn display_values(interpretation: &Interpretation) -> String {
    interpretation
        .values()
        .iter()
        .map(|v| v.as_ref())
        .collect::<Vec<&str>>()
        .join("")
}
