use crate::{
    adf::{AbstractDialecticalFramework, Interpretation, LabelType, TruthValue},
    encodings::EncodingContext,
    sat::{SatSolver, SatSolverFactory},
};
use anyhow::Result;
use log::trace;

/// A trait for objects computing the grounded interpretation of an ADF.
///
/// The computation is split in an initialization step, which may build costly structures,
/// and a generation step, which may be called several times on the same state.
pub trait GroundGenerator {
    /// The state built by the initialization step.
    type State;

    /// Builds the state used to compute the grounded interpretation of the ADF.
    fn initialize<T>(&self, adf: &AbstractDialecticalFramework<T>) -> Result<Self::State>
    where
        T: LabelType;

    /// Computes the grounded interpretation of the ADF the state was initialized with.
    fn generate<T>(
        &self,
        state: &mut Self::State,
        adf: &AbstractDialecticalFramework<T>,
    ) -> Result<Interpretation>
    where
        T: LabelType;
}

/// A grounded interpretation generator relying on the strong Kleene evaluation of the acceptance conditions.
///
/// An argument is decided as soon as its condition evaluates to true or false under the current interpretation.
/// This is an under-approximation of the characteristic operator for conditions in which an unknown atom
/// occurs several times (e.g. `or(a, neg(a))` is never decided).
#[derive(Default)]
pub struct KleeneGroundGenerator;

impl GroundGenerator for KleeneGroundGenerator {
    type State = ();

    fn initialize<T>(&self, _adf: &AbstractDialecticalFramework<T>) -> Result<Self::State>
    where
        T: LabelType,
    {
        Ok(())
    }

    fn generate<T>(
        &self,
        _state: &mut Self::State,
        adf: &AbstractDialecticalFramework<T>,
    ) -> Result<Interpretation>
    where
        T: LabelType,
    {
        let mut interpretation = Interpretation::new_undecided(adf.n_arguments());
        let mut changed = true;
        while changed {
            changed = false;
            for arg in 0..adf.n_arguments() {
                if interpretation.value(arg).is_decided() {
                    continue;
                }
                if let Some(b) = interpretation.satisfies(adf.acceptance_condition(arg)) {
                    interpretation = interpretation.decide(arg, b)?;
                    changed = true;
                }
            }
        }
        Ok(interpretation)
    }
}

/// A grounded interpretation generator relying on SAT calls.
///
/// An undecided argument is decided in when its condition cannot be false under the decided parents,
/// and out when it cannot be true; this is repeated until a fixpoint is reached.
pub struct SatGroundGenerator<'a> {
    solver_factory: &'a dyn SatSolverFactory,
}

impl<'a> SatGroundGenerator<'a> {
    /// Builds a new generator which gets its SAT sessions from the provided factory.
    pub fn new(solver_factory: &'a dyn SatSolverFactory) -> Self {
        Self { solver_factory }
    }
}

/// The state of a [SatGroundGenerator].
pub struct SatGroundGeneratorState {
    context: EncodingContext,
    solver: Box<dyn SatSolver>,
}

impl GroundGenerator for SatGroundGenerator<'_> {
    type State = SatGroundGeneratorState;

    fn initialize<T>(&self, adf: &AbstractDialecticalFramework<T>) -> Result<Self::State>
    where
        T: LabelType,
    {
        let context = EncodingContext::new(adf);
        let mut solver = self.solver_factory.new_solver()?;
        context.prepare_solver(solver.as_mut());
        context.encode_all_conditions(solver.as_mut());
        Ok(SatGroundGeneratorState { context, solver })
    }

    fn generate<T>(
        &self,
        state: &mut Self::State,
        adf: &AbstractDialecticalFramework<T>,
    ) -> Result<Interpretation>
    where
        T: LabelType,
    {
        let mut interpretation = Interpretation::new_undecided(adf.n_arguments());
        let mut changed = true;
        let mut n_rounds = 0;
        while changed {
            changed = false;
            n_rounds += 1;
            for arg in 0..adf.n_arguments() {
                if interpretation.value(arg) != TruthValue::Undecided {
                    continue;
                }
                let mut assumptions = state.context.decided_parent_literals(&interpretation, arg);
                let acc = state.context.condition_literal(arg);
                assumptions.push(acc.negate());
                if !state
                    .solver
                    .solve_under_assumptions(&assumptions)
                    .into_satisfiability()?
                {
                    interpretation = interpretation.decide(arg, true)?;
                    changed = true;
                    continue;
                }
                assumptions.pop();
                assumptions.push(acc);
                if !state
                    .solver
                    .solve_under_assumptions(&assumptions)
                    .into_satisfiability()?
                {
                    interpretation = interpretation.decide(arg, false)?;
                    changed = true;
                }
            }
        }
        trace!("grounded interpretation computed in {} rounds", n_rounds);
        Ok(interpretation)
    }
}
