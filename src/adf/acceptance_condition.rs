use std::collections::BTreeSet;

/// An acceptance condition: a propositional formula over the arguments of an ADF.
///
/// Atoms refer to arguments by their ids (see [ArgumentSet](super::ArgumentSet)).
/// Conditions are finite trees; the graph between arguments they induce may be cyclic.
///
/// # Example
///
/// ```
/// # use crustadf::adf::AcceptanceCondition;
/// // a condition that holds iff the argument with id 0 holds and the one with id 1 does not
/// let condition = AcceptanceCondition::conj(vec![
///     AcceptanceCondition::atom(0),
///     AcceptanceCondition::neg(AcceptanceCondition::atom(1)),
/// ]);
/// assert!(condition.evaluate(&|a| a == 0));
/// assert!(!condition.evaluate(&|_| true));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum AcceptanceCondition {
    /// An argument, given by its id.
    Atom(usize),
    /// A negation.
    Not(Box<AcceptanceCondition>),
    /// A conjunction; an empty one is true.
    And(Vec<AcceptanceCondition>),
    /// A disjunction; an empty one is false.
    Or(Vec<AcceptanceCondition>),
    /// An implication.
    Imp(Box<AcceptanceCondition>, Box<AcceptanceCondition>),
    /// An equivalence.
    Iff(Box<AcceptanceCondition>, Box<AcceptanceCondition>),
    /// An exclusive disjunction.
    Xor(Box<AcceptanceCondition>, Box<AcceptanceCondition>),
    /// The tautology.
    TrueConst,
    /// The contradiction.
    FalseConst,
}

impl AcceptanceCondition {
    /// Builds an atom.
    pub fn atom(arg_id: usize) -> Self {
        AcceptanceCondition::Atom(arg_id)
    }

    /// Builds a negation.
    pub fn neg(child: AcceptanceCondition) -> Self {
        AcceptanceCondition::Not(Box::new(child))
    }

    /// Builds a conjunction.
    pub fn conj(children: Vec<AcceptanceCondition>) -> Self {
        AcceptanceCondition::And(children)
    }

    /// Builds a disjunction.
    pub fn disj(children: Vec<AcceptanceCondition>) -> Self {
        AcceptanceCondition::Or(children)
    }

    /// Builds an implication.
    pub fn imp(left: AcceptanceCondition, right: AcceptanceCondition) -> Self {
        AcceptanceCondition::Imp(Box::new(left), Box::new(right))
    }

    /// Builds an equivalence.
    pub fn iff(left: AcceptanceCondition, right: AcceptanceCondition) -> Self {
        AcceptanceCondition::Iff(Box::new(left), Box::new(right))
    }

    /// Builds an exclusive disjunction.
    pub fn xor(left: AcceptanceCondition, right: AcceptanceCondition) -> Self {
        AcceptanceCondition::Xor(Box::new(left), Box::new(right))
    }

    /// Returns the direct subformulas of this condition.
    pub fn children(&self) -> Vec<&AcceptanceCondition> {
        match self {
            AcceptanceCondition::Atom(_)
            | AcceptanceCondition::TrueConst
            | AcceptanceCondition::FalseConst => vec![],
            AcceptanceCondition::Not(c) => vec![c.as_ref()],
            AcceptanceCondition::And(children) | AcceptanceCondition::Or(children) => {
                children.iter().collect()
            }
            AcceptanceCondition::Imp(l, r)
            | AcceptanceCondition::Iff(l, r)
            | AcceptanceCondition::Xor(l, r) => vec![l.as_ref(), r.as_ref()],
        }
    }

    /// Returns the ids of the arguments occurring in this condition, sorted and without duplicates.
    pub fn atoms(&self) -> BTreeSet<usize> {
        let mut atoms = BTreeSet::new();
        let mut stack = vec![self];
        while let Some(c) = stack.pop() {
            if let AcceptanceCondition::Atom(a) = c {
                atoms.insert(*a);
            } else {
                stack.append(&mut c.children());
            }
        }
        atoms
    }

    /// Returns `true` iff the argument occurs in this condition.
    pub fn contains_atom(&self, arg_id: usize) -> bool {
        match self {
            AcceptanceCondition::Atom(a) => *a == arg_id,
            _ => self.children().iter().any(|c| c.contains_atom(arg_id)),
        }
    }

    /// Returns the number of nodes of this condition tree.
    pub fn node_count(&self) -> usize {
        1 + self
            .children()
            .iter()
            .map(|c| c.node_count())
            .sum::<usize>()
    }

    /// Evaluates the condition under a two-valued assignment of its atoms.
    pub fn evaluate<F>(&self, valuation: &F) -> bool
    where
        F: Fn(usize) -> bool,
    {
        match self {
            AcceptanceCondition::Atom(a) => valuation(*a),
            AcceptanceCondition::Not(c) => !c.evaluate(valuation),
            AcceptanceCondition::And(children) => children.iter().all(|c| c.evaluate(valuation)),
            AcceptanceCondition::Or(children) => children.iter().any(|c| c.evaluate(valuation)),
            AcceptanceCondition::Imp(l, r) => !l.evaluate(valuation) || r.evaluate(valuation),
            AcceptanceCondition::Iff(l, r) => l.evaluate(valuation) == r.evaluate(valuation),
            AcceptanceCondition::Xor(l, r) => l.evaluate(valuation) != r.evaluate(valuation),
            AcceptanceCondition::TrueConst => true,
            AcceptanceCondition::FalseConst => false,
        }
    }

    /// Evaluates the condition with the strong Kleene logic.
    ///
    /// The valuation gives `None` for unknown atoms; the result is `None` if the condition is unknown.
    pub fn evaluate_three_valued<F>(&self, valuation: &F) -> Option<bool>
    where
        F: Fn(usize) -> Option<bool>,
    {
        match self {
            AcceptanceCondition::Atom(a) => valuation(*a),
            AcceptanceCondition::Not(c) => c.evaluate_three_valued(valuation).map(|v| !v),
            AcceptanceCondition::And(children) => {
                let mut unknown = false;
                for c in children {
                    match c.evaluate_three_valued(valuation) {
                        Some(false) => return Some(false),
                        None => unknown = true,
                        Some(true) => {}
                    }
                }
                if unknown {
                    None
                } else {
                    Some(true)
                }
            }
            AcceptanceCondition::Or(children) => {
                let mut unknown = false;
                for c in children {
                    match c.evaluate_three_valued(valuation) {
                        Some(true) => return Some(true),
                        None => unknown = true,
                        Some(false) => {}
                    }
                }
                if unknown {
                    None
                } else {
                    Some(false)
                }
            }
            AcceptanceCondition::Imp(l, r) => {
                match (l.evaluate_three_valued(valuation), r.evaluate_three_valued(valuation)) {
                    (Some(false), _) | (_, Some(true)) => Some(true),
                    (Some(true), Some(false)) => Some(false),
                    _ => None,
                }
            }
            AcceptanceCondition::Iff(l, r) => {
                match (l.evaluate_three_valued(valuation), r.evaluate_three_valued(valuation)) {
                    (Some(a), Some(b)) => Some(a == b),
                    _ => None,
                }
            }
            AcceptanceCondition::Xor(l, r) => {
                match (l.evaluate_three_valued(valuation), r.evaluate_three_valued(valuation)) {
                    (Some(a), Some(b)) => Some(a != b),
                    _ => None,
                }
            }
            AcceptanceCondition::TrueConst => Some(true),
            AcceptanceCondition::FalseConst => Some(false),
        }
    }

    /// Replaces the atoms fixed by the partial valuation by constants, and simplifies the result.
    ///
    /// Constants are propagated upward, so that the result is either a constant or a condition without constants.
    ///
    /// ```
    /// # use crustadf::adf::AcceptanceCondition;
    /// let condition = AcceptanceCondition::disj(vec![
    ///     AcceptanceCondition::atom(0),
    ///     AcceptanceCondition::atom(1),
    /// ]);
    /// let fixed = condition.fix_partial(&|a| if a == 0 { Some(false) } else { None });
    /// assert_eq!(AcceptanceCondition::atom(1), fixed);
    /// ```
    pub fn fix_partial<F>(&self, valuation: &F) -> AcceptanceCondition
    where
        F: Fn(usize) -> Option<bool>,
    {
        match self {
            AcceptanceCondition::Atom(a) => match valuation(*a) {
                Some(true) => AcceptanceCondition::TrueConst,
                Some(false) => AcceptanceCondition::FalseConst,
                None => AcceptanceCondition::Atom(*a),
            },
            AcceptanceCondition::Not(c) => simplified_negation(c.fix_partial(valuation)),
            AcceptanceCondition::And(children) => {
                let mut filtered = Vec::with_capacity(children.len());
                for c in children {
                    match c.fix_partial(valuation) {
                        AcceptanceCondition::FalseConst => return AcceptanceCondition::FalseConst,
                        AcceptanceCondition::TrueConst => {}
                        other => filtered.push(other),
                    }
                }
                match filtered.len() {
                    0 => AcceptanceCondition::TrueConst,
                    1 => filtered.remove(0),
                    _ => AcceptanceCondition::And(filtered),
                }
            }
            AcceptanceCondition::Or(children) => {
                let mut filtered = Vec::with_capacity(children.len());
                for c in children {
                    match c.fix_partial(valuation) {
                        AcceptanceCondition::TrueConst => return AcceptanceCondition::TrueConst,
                        AcceptanceCondition::FalseConst => {}
                        other => filtered.push(other),
                    }
                }
                match filtered.len() {
                    0 => AcceptanceCondition::FalseConst,
                    1 => filtered.remove(0),
                    _ => AcceptanceCondition::Or(filtered),
                }
            }
            AcceptanceCondition::Imp(l, r) => {
                match (l.fix_partial(valuation), r.fix_partial(valuation)) {
                    (AcceptanceCondition::FalseConst, _) | (_, AcceptanceCondition::TrueConst) => {
                        AcceptanceCondition::TrueConst
                    }
                    (AcceptanceCondition::TrueConst, right) => right,
                    (left, AcceptanceCondition::FalseConst) => simplified_negation(left),
                    (left, right) => AcceptanceCondition::imp(left, right),
                }
            }
            AcceptanceCondition::Iff(l, r) => {
                match (l.fix_partial(valuation), r.fix_partial(valuation)) {
                    (AcceptanceCondition::TrueConst, other)
                    | (other, AcceptanceCondition::TrueConst) => other,
                    (AcceptanceCondition::FalseConst, other)
                    | (other, AcceptanceCondition::FalseConst) => simplified_negation(other),
                    (left, right) => AcceptanceCondition::iff(left, right),
                }
            }
            AcceptanceCondition::Xor(l, r) => {
                match (l.fix_partial(valuation), r.fix_partial(valuation)) {
                    (AcceptanceCondition::FalseConst, other)
                    | (other, AcceptanceCondition::FalseConst) => other,
                    (AcceptanceCondition::TrueConst, other)
                    | (other, AcceptanceCondition::TrueConst) => simplified_negation(other),
                    (left, right) => AcceptanceCondition::xor(left, right),
                }
            }
            AcceptanceCondition::TrueConst => AcceptanceCondition::TrueConst,
            AcceptanceCondition::FalseConst => AcceptanceCondition::FalseConst,
        }
    }
}

fn simplified_negation(c: AcceptanceCondition) -> AcceptanceCondition {
    match c {
        AcceptanceCondition::TrueConst => AcceptanceCondition::FalseConst,
        AcceptanceCondition::FalseConst => AcceptanceCondition::TrueConst,
        AcceptanceCondition::Not(inner) => *inner,
        other => AcceptanceCondition::neg(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use AcceptanceCondition as AC;

    #[test]
    fn test_atoms_and_node_count() {
        let c = AC::conj(vec![
            AC::atom(2),
            AC::neg(AC::atom(0)),
            AC::imp(AC::atom(2), AC::TrueConst),
        ]);
        assert_eq!(vec![0, 2], c.atoms().into_iter().collect::<Vec<usize>>());
        assert_eq!(7, c.node_count());
        assert!(c.contains_atom(0));
        assert!(!c.contains_atom(1));
    }

    #[test]
    fn test_evaluate() {
        let c = AC::xor(AC::atom(0), AC::atom(1));
        assert!(c.evaluate(&|a| a == 0));
        assert!(!c.evaluate(&|_| true));
        assert!(AC::conj(vec![]).evaluate(&|_| false));
        assert!(!AC::disj(vec![]).evaluate(&|_| false));
    }

    #[test]
    fn test_kleene_and() {
        let c = AC::conj(vec![AC::atom(0), AC::atom(1)]);
        assert_eq!(
            Some(false),
            c.evaluate_three_valued(&|a| if a == 0 { None } else { Some(false) })
        );
        assert_eq!(
            None,
            c.evaluate_three_valued(&|a| if a == 0 { None } else { Some(true) })
        );
        assert_eq!(Some(true), c.evaluate_three_valued(&|_| Some(true)));
    }

    #[test]
    fn test_kleene_or_imp() {
        let c = AC::disj(vec![AC::atom(0), AC::atom(1)]);
        assert_eq!(
            Some(true),
            c.evaluate_three_valued(&|a| if a == 0 { None } else { Some(true) })
        );
        assert_eq!(None, c.evaluate_three_valued(&|_| None));
        let imp = AC::imp(AC::atom(0), AC::atom(1));
        assert_eq!(
            Some(true),
            imp.evaluate_three_valued(&|a| if a == 0 { Some(false) } else { None })
        );
        assert_eq!(
            None,
            imp.evaluate_three_valued(&|a| if a == 0 { Some(true) } else { None })
        );
    }

    #[test]
    fn test_kleene_excluded_middle_is_unknown() {
        let c = AC::disj(vec![AC::atom(0), AC::neg(AC::atom(0))]);
        assert_eq!(None, c.evaluate_three_valued(&|_| None));
    }

    #[test]
    fn test_fix_partial_propagates_constants() {
        let c = AC::conj(vec![AC::atom(0), AC::disj(vec![AC::atom(1), AC::atom(2)])]);
        assert_eq!(
            AC::FalseConst,
            c.fix_partial(&|a| if a == 0 { Some(false) } else { None })
        );
        assert_eq!(
            AC::atom(0),
            c.fix_partial(&|a| if a == 2 { Some(true) } else { None })
        );
    }

    #[test]
    fn test_fix_partial_binary_connectives() {
        let fix_0_true = |a: usize| if a == 0 { Some(true) } else { None };
        assert_eq!(
            AC::atom(1),
            AC::imp(AC::atom(0), AC::atom(1)).fix_partial(&fix_0_true)
        );
        assert_eq!(
            AC::atom(1),
            AC::iff(AC::atom(0), AC::atom(1)).fix_partial(&fix_0_true)
        );
        assert_eq!(
            AC::neg(AC::atom(1)),
            AC::xor(AC::atom(0), AC::atom(1)).fix_partial(&fix_0_true)
        );
        assert_eq!(
            AC::neg(AC::atom(1)),
            AC::imp(AC::atom(1), AC::atom(0)).fix_partial(&|a| if a == 0 {
                Some(false)
            } else {
                None
            })
        );
        assert_eq!(
            AC::atom(1),
            AC::neg(AC::neg(AC::atom(1))).fix_partial(&fix_0_true)
        );
    }

    #[test]
    fn test_fix_partial_is_equivalent_on_completions() {
        let c = AC::iff(
            AC::disj(vec![AC::atom(0), AC::atom(1)]),
            AC::xor(AC::atom(1), AC::atom(2)),
        );
        let fixed = c.fix_partial(&|a| if a == 1 { Some(true) } else { None });
        for bits in 0..4 {
            let valuation = |a: usize| match a {
                0 => bits & 1 != 0,
                1 => true,
                _ => bits & 2 != 0,
            };
            assert_eq!(c.evaluate(&valuation), fixed.evaluate(&valuation));
        }
    }
}
