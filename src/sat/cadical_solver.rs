use super::{Assignment, Literal, SatSolver, SolvingListener, SolvingResult};
use cadical::Solver as CadicalCSolver;

/// A wrapper around the Cadical SAT solver.
#[derive(Default)]
pub struct CadicalSolver {
    solver: CadicalCSolver,
    listeners: Vec<Box<dyn SolvingListener>>,
    n_reserved: usize,
    n_clauses: usize,
}

impl SatSolver for CadicalSolver {
    fn add_clause(&mut self, cl: Vec<Literal>) {
        self.n_clauses += 1;
        self.solver
            .add_clause(cl.into_iter().map(|l| isize::from(l) as i32))
    }

    fn solve(&mut self) -> SolvingResult {
        self.solve_under_assumptions(&[])
    }

    fn solve_under_assumptions(&mut self, assumptions: &[Literal]) -> SolvingResult {
        self.listeners
            .iter()
            .for_each(|l| l.solving_start(self.n_vars(), self.n_clauses));
        let result = match self
            .solver
            .solve_with(assumptions.iter().map(|l| isize::from(*l) as i32))
        {
            Some(true) => {
                let assignment = Assignment::new(
                    (1..=self.solver.max_variable())
                        .map(|i| self.solver.value(i))
                        .collect(),
                );
                SolvingResult::Satisfiable(assignment)
            }
            Some(false) => SolvingResult::Unsatisfiable,
            None => SolvingResult::Unknown,
        };
        self.listeners.iter().for_each(|l| l.solving_end(&result));
        result
    }

    fn n_vars(&self) -> usize {
        usize::max(self.solver.max_variable() as usize, self.n_reserved)
    }

    fn add_listener(&mut self, listener: Box<dyn SolvingListener>) {
        self.listeners.push(listener);
    }

    fn reserve(&mut self, new_max_id: usize) {
        self.n_reserved = usize::max(self.n_reserved, new_max_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clause;
    use std::{cell::RefCell, rc::Rc};

    #[test]
    fn test_sat() {
        let mut s = CadicalSolver::default();
        s.add_clause(clause![-1, 2]);
        let assignment = s.solve().unwrap_model().unwrap();
        assert!(assignment.value_of(1usize) == Some(false) || assignment.value_of(2usize) == Some(true))
    }

    #[test]
    fn test_unsat() {
        let mut s = CadicalSolver::default();
        s.add_clause(clause![-1, 2]);
        s.add_clause(clause![-1, -2]);
        s.add_clause(clause![1]);
        assert!(s.solve().unwrap_model().is_none());
    }

    #[test]
    fn test_iterative() {
        let mut s = CadicalSolver::default();
        s.add_clause(clause![-1, 2]);
        assert!(s.solve().unwrap_model().is_some());
        s.add_clause(clause![1, 3]);
        s.add_clause(clause![-2, 3]);
        let assignment = s.solve().unwrap_model().unwrap();
        assert_eq!(Some(true), assignment.value_of(3usize));
        s.add_clause(clause![-3]);
        assert!(s.solve().unwrap_model().is_none());
    }

    #[test]
    fn test_solve_under_assumptions() {
        let mut s = CadicalSolver::default();
        s.add_clause(clause![1]);
        assert!(s
            .solve_under_assumptions(&[Literal::from(-1)])
            .unwrap_model()
            .is_none());
        assert!(s.solve().unwrap_model().is_some());
    }

    #[test]
    fn test_reserve() {
        let mut s = CadicalSolver::default();
        s.add_clause(clause![1, 2]);
        assert_eq!(2, s.n_vars());
        s.reserve(10);
        assert_eq!(10, s.n_vars());
        s.reserve(5);
        assert_eq!(10, s.n_vars());
    }

    struct CountingListener(Rc<RefCell<usize>>);

    impl SolvingListener for CountingListener {
        fn solving_start(&self, _n_vars: usize, _n_clauses: usize) {
            *self.0.borrow_mut() += 1;
        }

        fn solving_end(&self, _result: &SolvingResult) {}
    }

    #[test]
    fn test_listener() {
        let count = Rc::new(RefCell::new(0));
        let mut s = CadicalSolver::default();
        s.add_listener(Box::new(CountingListener(Rc::clone(&count))));
        s.add_clause(clause![1]);
        s.solve();
        s.solve_under_assumptions(&[Literal::from(1)]);
        assert_eq!(2, *count.borrow());
    }
}
