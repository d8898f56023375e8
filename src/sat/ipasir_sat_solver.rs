use super::{Assignment, Literal, SatSolver, SatSolverFactory, SolvingListener, SolvingResult};
use crate::error::ReasoningError;
use anyhow::Result;
use ipasir_loading::{IpasirSolverLoader, IpasirSolverWrapper};
use log::warn;

/// A wrapper for solvers that implement the IPASIR interface.
///
/// Errors raised by the underlying library are kept until the next call to a solving function,
/// which then returns [SolvingResult::Unknown].
pub struct IpasirSatSolver {
    solver: IpasirSolverWrapper,
    listeners: Vec<Box<dyn SolvingListener>>,
    n_vars: usize,
    n_clauses: usize,
    failure: Option<String>,
}

impl IpasirSatSolver {
    /// Builds a new [`IpasirSatSolver`] given the underlying solver.
    pub fn new(solver: IpasirSolverWrapper) -> Self {
        Self {
            solver,
            listeners: vec![],
            n_vars: 0,
            n_clauses: 0,
            failure: None,
        }
    }

    fn record_failure<E>(&mut self, e: E)
    where
        E: std::fmt::Display,
    {
        if self.failure.is_none() {
            self.failure = Some(e.to_string());
        }
    }

    fn push_lit(&mut self, l: i32) {
        if let Err(e) = self.solver.ipasir_add(l) {
            self.record_failure(e);
        }
    }

    fn solve_with_library(&mut self, assumptions: &[Literal]) -> SolvingResult {
        for l in assumptions {
            let i32_lit = isize::from(*l) as i32;
            if let Err(e) = self.solver.ipasir_assume(i32_lit) {
                self.record_failure(e);
            }
            self.n_vars = usize::max(self.n_vars, usize::from(l.var()));
        }
        if let Some(f) = self.failure.as_ref() {
            warn!("IPASIR solver is in a failed state: {}", f);
            return SolvingResult::Unknown;
        }
        match self.solver.ipasir_solve() {
            Ok(Some(true)) => {
                let mut values = Vec::with_capacity(self.n_vars);
                for i in 1..=self.n_vars {
                    match self.solver.ipasir_val(i as i32) {
                        Ok(v) => values.push(v),
                        Err(e) => {
                            self.record_failure(e);
                            return SolvingResult::Unknown;
                        }
                    }
                }
                SolvingResult::Satisfiable(Assignment::new(values))
            }
            Ok(Some(false)) => SolvingResult::Unsatisfiable,
            Ok(None) => SolvingResult::Unknown,
            Err(e) => {
                self.record_failure(e);
                SolvingResult::Unknown
            }
        }
    }
}

impl SatSolver for IpasirSatSolver {
    fn add_clause(&mut self, cl: Vec<Literal>) {
        for l in cl {
            self.n_vars = usize::max(self.n_vars, usize::from(l.var()));
            self.push_lit(isize::from(l) as i32);
        }
        self.push_lit(0);
        self.n_clauses += 1;
    }

    fn solve(&mut self) -> SolvingResult {
        self.solve_under_assumptions(&[])
    }

    fn solve_under_assumptions(&mut self, assumptions: &[Literal]) -> SolvingResult {
        self.listeners
            .iter()
            .for_each(|l| l.solving_start(self.n_vars, self.n_clauses));
        let solving_result = self.solve_with_library(assumptions);
        self.listeners
            .iter()
            .for_each(|l| l.solving_end(&solving_result));
        solving_result
    }

    fn n_vars(&self) -> usize {
        self.n_vars
    }

    fn add_listener(&mut self, listener: Box<dyn SolvingListener>) {
        self.listeners.push(listener);
    }

    fn reserve(&mut self, new_max_id: usize) {
        self.n_vars = usize::max(self.n_vars, new_max_id)
    }
}

/// A factory building [IpasirSatSolver] objects from a shared library.
///
/// The library is loaded again for each new solver, so that the factory can be shared among threads.
pub struct IpasirSatSolverFactory {
    library_path: String,
}

impl IpasirSatSolverFactory {
    /// Builds a new factory given the path to a shared library exporting the IPASIR interface.
    ///
    /// The library is loaded once to check it is a valid IPASIR library.
    pub fn new(library_path: &str) -> Result<Self> {
        let factory = Self {
            library_path: library_path.to_string(),
        };
        factory.load()?;
        Ok(factory)
    }

    fn loader(&self) -> Result<IpasirSolverLoader> {
        IpasirSolverLoader::from_path(&self.library_path).map_err(|e| {
            ReasoningError::SolverFailure(format!(
                "cannot load IPASIR library {}: {}",
                self.library_path, e
            ))
            .into()
        })
    }

    fn load(&self) -> Result<IpasirSolverWrapper> {
        let solver = self.loader()?.new_solver().map_err(|e| {
            ReasoningError::SolverFailure(format!("cannot create an IPASIR solver: {}", e))
        })?;
        Ok(solver)
    }

    /// Returns the signature of the IPASIR solver.
    pub fn ipasir_signature(&self) -> Result<String> {
        self.loader()?.ipasir_signature().map_err(|e| {
            ReasoningError::SolverFailure(format!("cannot get the IPASIR signature: {}", e)).into()
        })
    }
}

impl SatSolverFactory for IpasirSatSolverFactory {
    fn new_solver(&self) -> Result<Box<dyn SatSolver>> {
        Ok(Box::new(IpasirSatSolver::new(self.load()?)))
    }
}
