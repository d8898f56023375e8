use super::tseitin_transformer::TseitinTransformer;
use crate::{
    adf::{AbstractDialecticalFramework, Interpretation, LabelType, LinkType, TruthValue},
    sat::{Assignment, Literal, SatSolver},
};

/// A link as seen by the encodings: the other endpoint, the link variable, and the polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodedLink {
    /// The id of the other argument of the link (the parent for incoming links, the child for outgoing ones).
    pub other: usize,
    /// The literal of the link variable.
    pub literal: Literal,
    /// The polarity of the link.
    pub link_type: LinkType,
}

#[derive(Debug, Clone)]
struct EncodedCondition {
    root: Literal,
    definitions: Vec<Vec<Literal>>,
}

/// The mapping between an ADF and the propositional variables used to reason on it.
///
/// Each argument `a` gets two variables: `t(a)` (the argument is in) and `f(a)` (the argument is out);
/// an argument with both variables false is undecided.
/// Each link `(p, c)` gets a variable standing for the value of `p` as seen by the condition of `c`.
/// The acceptance conditions are Tseitin-encoded over link variables once, when the context is built.
///
/// A context is immutable after its creation and can be shared among threads.
///
/// # Example
///
/// ```
/// # use crustadf::adf::{AbstractDialecticalFramework, AcceptanceCondition, ArgumentSet};
/// # use crustadf::encodings::EncodingContext;
/// let adf = AbstractDialecticalFramework::new_with_conditions(
///     ArgumentSet::new_with_labels(&["a", "b"]),
///     vec![AcceptanceCondition::TrueConst, AcceptanceCondition::atom(0)],
/// ).unwrap();
/// let context = EncodingContext::new(&adf);
/// assert!(context.link_literal(0, 1).is_some());
/// assert!(context.link_literal(1, 0).is_none());
/// ```
#[derive(Debug, Clone)]
pub struct EncodingContext {
    n_arguments: usize,
    true_literal: Literal,
    links_to: Vec<Vec<EncodedLink>>,
    links_from: Vec<Vec<EncodedLink>>,
    conditions: Vec<EncodedCondition>,
    n_vars: usize,
}

impl EncodingContext {
    /// Builds the encoding context of an ADF.
    pub fn new<T>(adf: &AbstractDialecticalFramework<T>) -> Self
    where
        T: LabelType,
    {
        let n_arguments = adf.n_arguments();
        let true_literal = Literal::from((2 * n_arguments + 1) as isize);
        let mut next_var = 2 * n_arguments + 2;
        let mut links_to = vec![vec![]; n_arguments];
        let mut links_from = vec![vec![]; n_arguments];
        for link in adf.iter_links() {
            let literal = Literal::from(next_var as isize);
            next_var += 1;
            links_to[link.child()].push(EncodedLink {
                other: link.parent(),
                literal,
                link_type: link.link_type(),
            });
            links_from[link.parent()].push(EncodedLink {
                other: link.child(),
                literal,
                link_type: link.link_type(),
            });
        }
        let mut conditions = Vec::with_capacity(n_arguments);
        for (child, child_links) in links_to.iter().enumerate() {
            let atom_literal = |parent: usize| {
                child_links
                    .iter()
                    .find(|l: &&EncodedLink| l.other == parent)
                    .map(|l| l.literal)
                    .unwrap_or(true_literal)
            };
            let mut transformer = TseitinTransformer::new(atom_literal, true_literal, next_var);
            let root = transformer.transform(adf.acceptance_condition(child));
            let (new_next_var, definitions) = transformer.into_parts();
            next_var = new_next_var;
            conditions.push(EncodedCondition { root, definitions });
        }
        Self {
            n_arguments,
            true_literal,
            links_to,
            links_from,
            conditions,
            n_vars: next_var - 1,
        }
    }

    /// Returns the number of arguments of the underlying ADF.
    pub fn n_arguments(&self) -> usize {
        self.n_arguments
    }

    /// Returns the number of variables used by this context; other variables may be used freely.
    pub fn n_vars(&self) -> usize {
        self.n_vars
    }

    /// Returns the literal standing for "the argument is in".
    pub fn in_literal(&self, arg_id: usize) -> Literal {
        Literal::from((2 * arg_id + 1) as isize)
    }

    /// Returns the literal standing for "the argument is out".
    pub fn out_literal(&self, arg_id: usize) -> Literal {
        Literal::from((2 * arg_id + 2) as isize)
    }

    /// Returns a literal forced to true by [prepare_solver](Self::prepare_solver).
    pub fn true_literal(&self) -> Literal {
        self.true_literal
    }

    /// Returns the literal of the link between two arguments, if it exists.
    pub fn link_literal(&self, parent: usize, child: usize) -> Option<Literal> {
        self.links_to[child]
            .iter()
            .find(|l| l.other == parent)
            .map(|l| l.literal)
    }

    /// Returns the links from the parents of an argument.
    pub fn links_to(&self, child: usize) -> &[EncodedLink] {
        &self.links_to[child]
    }

    /// Returns the links to the children of an argument.
    pub fn links_from(&self, parent: usize) -> &[EncodedLink] {
        &self.links_from[parent]
    }

    /// Returns the literal equivalent to the acceptance condition of an argument, over link variables.
    ///
    /// The equivalence holds once the [definition](Self::condition_definition) of the condition has been added.
    pub fn condition_literal(&self, arg_id: usize) -> Literal {
        self.conditions[arg_id].root
    }

    /// Returns the clauses defining the auxiliary variables of the condition of an argument.
    pub fn condition_definition(&self, arg_id: usize) -> &[Vec<Literal>] {
        &self.conditions[arg_id].definitions
    }

    /// Prepares a fresh solver: reserves the variables of this context and forces the true literal.
    pub fn prepare_solver(&self, solver: &mut dyn SatSolver) {
        solver.reserve(self.n_vars);
        solver.add_clause(vec![self.true_literal]);
    }

    /// Adds the definitions of all the acceptance conditions.
    pub fn encode_all_conditions(&self, solver: &mut dyn SatSolver) {
        (0..self.n_arguments).for_each(|a| self.encode_condition(solver, a));
    }

    /// Adds the definition of the acceptance condition of an argument.
    pub fn encode_condition(&self, solver: &mut dyn SatSolver, arg_id: usize) {
        self.conditions[arg_id]
            .definitions
            .iter()
            .for_each(|cl| solver.add_clause(cl.clone()));
    }

    /// Returns the literals fixing the link variables from the decided parents of an argument to their values.
    pub fn decided_parent_literals(
        &self,
        interpretation: &Interpretation,
        child: usize,
    ) -> Vec<Literal> {
        self.links_to[child]
            .iter()
            .filter_map(|l| match interpretation.value(l.other) {
                TruthValue::In => Some(l.literal),
                TruthValue::Out => Some(l.literal.negate()),
                TruthValue::Undecided => None,
            })
            .collect()
    }

    /// Builds the interpretation encoded by a model.
    ///
    /// Arguments whose `t` and `f` variables are both false (or unassigned) are undecided.
    pub fn decode(&self, assignment: &Assignment) -> Interpretation {
        let values = (0..self.n_arguments)
            .map(|a| {
                if assignment.is_satisfied(self.in_literal(a)) {
                    TruthValue::In
                } else if assignment.is_satisfied(self.out_literal(a)) {
                    TruthValue::Out
                } else {
                    TruthValue::Undecided
                }
            })
            .collect();
        Interpretation::from_values(values)
    }
}
