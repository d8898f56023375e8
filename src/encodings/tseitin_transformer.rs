use crate::{adf::AcceptanceCondition, sat::Literal};
use std::collections::HashMap;

/// Transforms acceptance conditions into CNF by introducing one auxiliary variable per connective node.
///
/// The definitions are equivalences, so that both the root literal and its negation can be assumed.
/// Identical subformulas of the same tree share their variable; the cache is dropped with the transformer,
/// so a new transformer must be used for each tree.
pub(crate) struct TseitinTransformer<'c, F>
where
    F: Fn(usize) -> Literal,
{
    atom_literal: F,
    true_literal: Literal,
    next_var: usize,
    cache: HashMap<&'c AcceptanceCondition, Literal>,
    clauses: Vec<Vec<Literal>>,
}

impl<'c, F> TseitinTransformer<'c, F>
where
    F: Fn(usize) -> Literal,
{
    /// Builds a new transformer.
    ///
    /// Atoms are translated by `atom_literal`, constants by `true_literal` (which must be forced elsewhere),
    /// and auxiliary variables are allocated starting at `first_free_var`.
    pub(crate) fn new(atom_literal: F, true_literal: Literal, first_free_var: usize) -> Self {
        Self {
            atom_literal,
            true_literal,
            next_var: first_free_var,
            cache: HashMap::new(),
            clauses: vec![],
        }
    }

    /// Returns a literal equivalent to the condition under the definitions produced so far.
    pub(crate) fn transform(&mut self, condition: &'c AcceptanceCondition) -> Literal {
        if let Some(l) = self.cache.get(condition) {
            return *l;
        }
        let literal = match condition {
            AcceptanceCondition::Atom(a) => (self.atom_literal)(*a),
            AcceptanceCondition::TrueConst => self.true_literal,
            AcceptanceCondition::FalseConst => self.true_literal.negate(),
            AcceptanceCondition::Not(c) => self.transform(c).negate(),
            AcceptanceCondition::And(children) => {
                if children.is_empty() {
                    self.true_literal
                } else {
                    let lits = children
                        .iter()
                        .map(|c| self.transform(c))
                        .collect::<Vec<Literal>>();
                    self.encode_and(lits)
                }
            }
            AcceptanceCondition::Or(children) => {
                if children.is_empty() {
                    self.true_literal.negate()
                } else {
                    let lits = children
                        .iter()
                        .map(|c| self.transform(c))
                        .collect::<Vec<Literal>>();
                    self.encode_or(lits)
                }
            }
            AcceptanceCondition::Imp(l, r) => {
                let (l, r) = (self.transform(l), self.transform(r));
                let n = self.new_var();
                self.clauses.push(vec![n.negate(), l.negate(), r]);
                self.clauses.push(vec![n, l]);
                self.clauses.push(vec![n, r.negate()]);
                n
            }
            AcceptanceCondition::Iff(l, r) => {
                let (l, r) = (self.transform(l), self.transform(r));
                let n = self.new_var();
                self.clauses.push(vec![n.negate(), l.negate(), r]);
                self.clauses.push(vec![n.negate(), l, r.negate()]);
                self.clauses.push(vec![n, l, r]);
                self.clauses.push(vec![n, l.negate(), r.negate()]);
                n
            }
            AcceptanceCondition::Xor(l, r) => {
                let (l, r) = (self.transform(l), self.transform(r));
                let n = self.new_var();
                self.clauses.push(vec![n.negate(), l, r]);
                self.clauses.push(vec![n.negate(), l.negate(), r.negate()]);
                self.clauses.push(vec![n, l.negate(), r]);
                self.clauses.push(vec![n, l, r.negate()]);
                n
            }
        };
        self.cache.insert(condition, literal);
        literal
    }

    fn new_var(&mut self) -> Literal {
        let l = Literal::from(self.next_var as isize);
        self.next_var += 1;
        l
    }

    fn encode_and(&mut self, lits: Vec<Literal>) -> Literal {
        let n = self.new_var();
        let mut long_clause = Vec::with_capacity(lits.len() + 1);
        long_clause.push(n);
        for l in lits {
            self.clauses.push(vec![n.negate(), l]);
            long_clause.push(l.negate());
        }
        self.clauses.push(long_clause);
        n
    }

    fn encode_or(&mut self, lits: Vec<Literal>) -> Literal {
        let n = self.new_var();
        let mut long_clause = Vec::with_capacity(lits.len() + 1);
        long_clause.push(n.negate());
        for l in lits {
            self.clauses.push(vec![n, l.negate()]);
            long_clause.push(l);
        }
        self.clauses.push(long_clause);
        n
    }

    /// Consumes the transformer, returning the next free variable and the definition clauses.
    pub(crate) fn into_parts(self) -> (usize, Vec<Vec<Literal>>) {
        (self.next_var, self.clauses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::{default_solver, Literal};
    use AcceptanceCondition as AC;

    // vars 1..=3 for atoms 0..=2, var 4 for the constant
    fn check_equivalence(condition: &AC) {
        let mut transformer =
            TseitinTransformer::new(|a| Literal::from(a as isize + 1), Literal::from(4), 5);
        let root = transformer.transform(condition);
        let (_, clauses) = transformer.into_parts();
        for bits in 0..8usize {
            let mut solver = default_solver();
            solver.add_clause(vec![Literal::from(4)]);
            clauses.iter().for_each(|cl| solver.add_clause(cl.clone()));
            let mut assumptions = (0..3)
                .map(|a| Literal::with_polarity((a + 1usize).into(), bits & (1 << a) != 0))
                .collect::<Vec<Literal>>();
            let expected = condition.evaluate(&|a| bits & (1 << a) != 0);
            assumptions.push(root);
            assert_eq!(
                expected,
                solver.solve_under_assumptions(&assumptions).unwrap_model().is_some()
            );
            assumptions.pop();
            assumptions.push(root.negate());
            assert_eq!(
                !expected,
                solver.solve_under_assumptions(&assumptions).unwrap_model().is_some()
            );
        }
    }

    #[test]
    fn test_connectives() {
        check_equivalence(&AC::conj(vec![AC::atom(0), AC::neg(AC::atom(1))]));
        check_equivalence(&AC::disj(vec![AC::atom(0), AC::atom(1), AC::atom(2)]));
        check_equivalence(&AC::imp(AC::atom(0), AC::atom(2)));
        check_equivalence(&AC::iff(AC::atom(1), AC::atom(2)));
        check_equivalence(&AC::xor(AC::atom(0), AC::atom(1)));
    }

    #[test]
    fn test_constants() {
        check_equivalence(&AC::TrueConst);
        check_equivalence(&AC::FalseConst);
        check_equivalence(&AC::conj(vec![]));
        check_equivalence(&AC::disj(vec![]));
        check_equivalence(&AC::disj(vec![AC::atom(0), AC::FalseConst]));
    }

    #[test]
    fn test_nested() {
        check_equivalence(&AC::iff(
            AC::disj(vec![AC::atom(0), AC::conj(vec![AC::atom(1), AC::atom(2)])]),
            AC::xor(AC::neg(AC::atom(2)), AC::imp(AC::atom(0), AC::atom(1))),
        ));
    }

    #[test]
    fn test_identical_subformulas_share_variables() {
        let shared = AC::conj(vec![AC::atom(0), AC::atom(1)]);
        let condition = AC::disj(vec![shared.clone(), AC::neg(shared)]);
        let mut transformer =
            TseitinTransformer::new(|a| Literal::from(a as isize + 1), Literal::from(4), 5);
        transformer.transform(&condition);
        let (next_var, _) = transformer.into_parts();
        assert_eq!(7, next_var);
        check_equivalence(&condition);
    }
}
