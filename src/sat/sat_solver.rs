use super::cadical_solver::CadicalSolver;
use crate::error::ReasoningError;
use anyhow::Result;
use std::{
    fmt::Display,
    num::{NonZeroIsize, NonZeroUsize},
};

/// A variable in a SAT solver.
///
/// A variable is represented by a non-null positive integer.
/// It can be obtained through the [From] trait from an unsigned integer type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Variable(NonZeroUsize);

macro_rules! impl_var_from {
    ($t: ty) => {
        impl From<$t> for Variable {
            fn from(v: $t) -> Self {
                match NonZeroUsize::new(v as usize) {
                    Some(n) => Self(n),
                    None => panic!("cannot build a variable from zero"),
                }
            }
        }
    };
}
impl_var_from!(usize);
impl_var_from!(u64);
impl_var_from!(u32);

impl From<Variable> for usize {
    fn from(v: Variable) -> Self {
        v.0.into()
    }
}

/// A literal in a SAT solver.
///
/// A literal is represented by a non-null integer, its sign giving its polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Literal(NonZeroIsize);

impl Literal {
    /// Returns the literal of opposite polarity.
    pub fn negate(self) -> Self {
        Self::from(-self.0.get())
    }

    /// Returns the variable of this literal.
    pub fn var(&self) -> Variable {
        Variable(self.0.unsigned_abs())
    }

    /// Returns `true` iff this literal is the positive one of its variable.
    pub fn is_positive(&self) -> bool {
        self.0.get() > 0
    }

    /// Builds a literal given its variable and its polarity.
    pub fn with_polarity(var: Variable, polarity: bool) -> Self {
        let l = Literal::from(var);
        if polarity {
            l
        } else {
            l.negate()
        }
    }
}

macro_rules! impl_lit_from {
    ($t: ty) => {
        impl From<$t> for Literal {
            fn from(l: $t) -> Self {
                match NonZeroIsize::new(l as isize) {
                    Some(n) => Self(n),
                    None => panic!("cannot build a literal from zero"),
                }
            }
        }
    };
}
impl_lit_from!(isize);
impl_lit_from!(i64);
impl_lit_from!(i32);

impl From<Variable> for Literal {
    fn from(v: Variable) -> Self {
        Literal::from(usize::from(v) as isize)
    }
}

impl From<Literal> for isize {
    fn from(l: Literal) -> Self {
        l.0.into()
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Builds a clause from a list of integers.
#[macro_export]
macro_rules! clause {
    () => (
        vec![] as Vec<$crate::sat::Literal>
    );
    ($($x:expr),+ $(,)?) => (
        [$($x),+].into_iter().map($crate::sat::Literal::from).collect::<Vec<$crate::sat::Literal>>()
    );
}

/// An assignment of a set of variables.
///
/// Inside the set of variables involved in the assignment, some may be unassigned.
/// This is the reason why accessors to assigned value returns an [Option<bool>].
#[derive(Debug, PartialEq, Eq)]
pub struct Assignment(Vec<Option<bool>>);

impl Assignment {
    pub(crate) fn new(assignment: Vec<Option<bool>>) -> Self {
        Self(assignment)
    }

    /// Returns the value potentially assigned to the variable.
    ///
    /// In case the variable is not assigned (or is out of the scope of the assignment), [Option::None] is returned.
    pub fn value_of<T>(&self, v: T) -> Option<bool>
    where
        T: Into<Variable>,
    {
        self.0.get(usize::from(v.into()) - 1).copied().flatten()
    }

    /// Returns `true` iff the literal is set to true by this assignment.
    pub fn is_satisfied(&self, l: Literal) -> bool {
        self.value_of(l.var()) == Some(l.is_positive())
    }
}

/// The result of a call to a SAT solver.
#[derive(Debug, PartialEq, Eq)]
pub enum SolvingResult {
    /// The problem is satisfiable; a model is given.
    Satisfiable(Assignment),
    /// The problem is unsatisfiable.
    Unsatisfiable,
    /// The solver was not able to decide the problem.
    Unknown,
}

impl SolvingResult {
    /// Returns the underlying model if it exists, or [Option::None].
    ///
    /// A [SolvingResult::Unknown] result is turned into a [ReasoningError::SolverFailure].
    pub fn into_model(self) -> Result<Option<Assignment>> {
        match self {
            SolvingResult::Satisfiable(assignment) => Ok(Some(assignment)),
            SolvingResult::Unsatisfiable => Ok(None),
            SolvingResult::Unknown => Err(ReasoningError::SolverFailure(
                r#"the SAT solver returned "Unknown""#.to_string(),
            )
            .into()),
        }
    }

    /// Returns `true` iff the result is [SolvingResult::Satisfiable], failing on unknown results.
    pub fn into_satisfiability(self) -> Result<bool> {
        self.into_model().map(|m| m.is_some())
    }

    /// Returns the underlying model if it exists, or [Option::None].
    ///
    /// # Panics
    ///
    /// If the solving result is set [SolvingResult::Unknown], this function panics.
    pub fn unwrap_model(self) -> Option<Assignment> {
        match self {
            SolvingResult::Satisfiable(assignment) => Some(assignment),
            SolvingResult::Unsatisfiable => None,
            SolvingResult::Unknown => {
                panic!(r#"cannot unwrap solving result when the solver returned "Unknown""#)
            }
        }
    }
}

/// A trait for incremental SAT solvers.
///
/// A solver is an exclusively owned session: clauses accumulate across calls,
/// and resources are released when the value is dropped.
pub trait SatSolver {
    /// Adds a clause to this solver.
    fn add_clause(&mut self, cl: Vec<Literal>);

    /// Solves the problem formed by the clauses added so far.
    fn solve(&mut self) -> SolvingResult;

    /// Solves the problem formed by the clauses added so far and the provided assumptions.
    fn solve_under_assumptions(&mut self, assumptions: &[Literal]) -> SolvingResult;

    /// Returns the highest variable index known by this solver.
    fn n_vars(&self) -> usize;

    /// Adds a listener triggered at each solver call.
    fn add_listener(&mut self, listener: Box<dyn SolvingListener>);

    /// Makes the solver aware of variables up to `new_max_id`, even if they do not appear in clauses.
    fn reserve(&mut self, new_max_id: usize);
}

/// A listener for SAT solver calls.
pub trait SolvingListener {
    /// Called when a solver call begins.
    fn solving_start(&self, n_vars: usize, n_clauses: usize);

    /// Called when a solver call ends.
    fn solving_end(&self, result: &SolvingResult);
}

/// A factory for SAT solvers.
///
/// Factories are shared among worker threads; each solver they build is owned by a single session.
pub trait SatSolverFactory: Send + Sync {
    /// Builds a new, empty SAT solver.
    fn new_solver(&self) -> Result<Box<dyn SatSolver>>;
}

/// The default SAT solver (Cadical).
pub fn default_solver() -> Box<dyn SatSolver> {
    Box::<CadicalSolver>::default()
}

/// A factory returning the [default solver](default_solver).
#[derive(Default, Clone, Copy)]
pub struct DefaultSatSolverFactory;

impl SatSolverFactory for DefaultSatSolverFactory {
    fn new_solver(&self) -> Result<Box<dyn SatSolver>> {
        Ok(default_solver())
    }
}

/// A factory building solvers that return [SolvingResult::Unknown] on every call.
#[cfg(test)]
#[derive(Default, Clone, Copy)]
pub(crate) struct UnknownResultSatSolverFactory;

#[cfg(test)]
impl SatSolverFactory for UnknownResultSatSolverFactory {
    fn new_solver(&self) -> Result<Box<dyn SatSolver>> {
        Ok(Box::<UnknownResultSatSolver>::default())
    }
}

#[cfg(test)]
#[derive(Default)]
struct UnknownResultSatSolver {
    n_vars: usize,
}

#[cfg(test)]
impl SatSolver for UnknownResultSatSolver {
    fn add_clause(&mut self, cl: Vec<Literal>) {
        cl.iter()
            .for_each(|l| self.n_vars = usize::max(self.n_vars, usize::from(l.var())));
    }

    fn solve(&mut self) -> SolvingResult {
        SolvingResult::Unknown
    }

    fn solve_under_assumptions(&mut self, _assumptions: &[Literal]) -> SolvingResult {
        SolvingResult::Unknown
    }

    fn n_vars(&self) -> usize {
        self.n_vars
    }

    fn add_listener(&mut self, _listener: Box<dyn SolvingListener>) {}

    fn reserve(&mut self, new_max_id: usize) {
        self.n_vars = usize::max(self.n_vars, new_max_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_var_from_pos() {
        let v = Variable::from(1usize);
        assert_eq!(1, usize::from(v))
    }

    #[test]
    #[allow(unused_must_use)]
    #[should_panic]
    fn test_var_from_null() {
        Variable::from(0usize);
    } // kcov-ignore

    #[test]
    fn test_lit_from_neg() {
        let l = Literal::from(-1);
        assert_eq!(-1, isize::from(l));
        assert!(!l.is_positive());
        assert_eq!(Variable::from(1usize), l.var());
    }

    #[test]
    #[allow(unused_must_use)]
    #[should_panic]
    fn test_lit_from_null() {
        Literal::from(0);
    } // kcov-ignore

    #[test]
    fn test_negate_lit() {
        assert_eq!(Literal::from(-1), Literal::from(1).negate());
        assert_eq!(Literal::from(1), Literal::from(-1).negate());
    }

    #[test]
    fn test_with_polarity() {
        let v = Variable::from(3usize);
        assert_eq!(Literal::from(3), Literal::with_polarity(v, true));
        assert_eq!(Literal::from(-3), Literal::with_polarity(v, false));
    }

    #[test]
    fn test_assignment_out_of_scope() {
        let assignment = Assignment::new(vec![Some(true), None]);
        assert_eq!(Some(true), assignment.value_of(1usize));
        assert_eq!(None, assignment.value_of(2usize));
        assert_eq!(None, assignment.value_of(3usize));
        assert!(assignment.is_satisfied(Literal::from(1)));
        assert!(!assignment.is_satisfied(Literal::from(-1)));
    }

    #[test]
    fn test_into_model() {
        assert_eq!(
            Some(Assignment::new(vec![])),
            SolvingResult::Satisfiable(Assignment::new(vec![]))
                .into_model()
                .unwrap()
        );
        assert_eq!(None, SolvingResult::Unsatisfiable.into_model().unwrap());
        let err = SolvingResult::Unknown.into_model().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ReasoningError>(),
            Some(ReasoningError::SolverFailure(_))
        ));
    }

    #[test]
    fn test_unknown_result_solver() {
        let mut solver = UnknownResultSatSolverFactory.new_solver().unwrap();
        solver.add_clause(vec![Literal::from(1), Literal::from(-2)]);
        assert_eq!(2, solver.n_vars());
        assert_eq!(SolvingResult::Unknown, solver.solve());
    }

    #[test]
    #[should_panic]
    fn test_solving_result_unwrap_model_unknown() {
        SolvingResult::Unknown.unwrap_model();
    } // kcov-ignore
}
