//! Clauses restricting the candidates relative to a given interpretation.

use super::EncodingContext;
use crate::{
    adf::{Interpretation, Prefix, TruthValue},
    sat::Literal,
};

/// Returns the unit clauses fixing the decided arguments of an interpretation, leaving the undecided ones free.
pub fn fix_partial_clauses(
    context: &EncodingContext,
    interpretation: &Interpretation,
) -> Vec<Vec<Literal>> {
    interpretation
        .values()
        .iter()
        .enumerate()
        .filter_map(|(arg, value)| match value {
            TruthValue::In => Some(vec![context.in_literal(arg)]),
            TruthValue::Out => Some(vec![context.out_literal(arg)]),
            TruthValue::Undecided => None,
        })
        .collect()
}

/// Returns the unit clauses fixing all the arguments of a prefix.
///
/// Unlike [fix_partial_clauses], an undecided value in the prefix requires the argument to be undecided.
pub fn prefix_clauses(context: &EncodingContext, prefix: &Prefix) -> Vec<Vec<Literal>> {
    prefix
        .assignments()
        .iter()
        .flat_map(|(arg, value)| {
            let (in_lit, out_lit) = (context.in_literal(*arg), context.out_literal(*arg));
            match value {
                TruthValue::In => vec![vec![in_lit]],
                TruthValue::Out => vec![vec![out_lit]],
                TruthValue::Undecided => vec![vec![in_lit.negate()], vec![out_lit.negate()]],
            }
        })
        .collect()
}

/// Returns the clauses restricting the candidates to the ones that are at least as informative as the interpretation.
pub fn larger_clauses(context: &EncodingContext, interpretation: &Interpretation) -> Vec<Vec<Literal>> {
    fix_partial_clauses(context, interpretation)
}

/// Returns the clauses restricting the candidates to the ones that are strictly more informative than the interpretation.
///
/// If the interpretation is two-valued, the returned clauses are unsatisfiable.
pub fn specific_larger_clauses(
    context: &EncodingContext,
    interpretation: &Interpretation,
) -> Vec<Vec<Literal>> {
    let mut clauses = larger_clauses(context, interpretation);
    clauses.push(
        interpretation
            .undecided_arguments()
            .flat_map(|arg| [context.in_literal(arg), context.out_literal(arg)])
            .collect(),
    );
    clauses
}

/// Returns the clause discarding exactly the given interpretation.
pub fn unequal_clause(context: &EncodingContext, interpretation: &Interpretation) -> Vec<Literal> {
    interpretation
        .values()
        .iter()
        .enumerate()
        .flat_map(|(arg, value)| match value {
            TruthValue::In => vec![context.in_literal(arg).negate()],
            TruthValue::Out => vec![context.out_literal(arg).negate()],
            TruthValue::Undecided => vec![context.in_literal(arg), context.out_literal(arg)],
        })
        .collect()
}

/// Returns the clause discarding the interpretation and all the interpretations it is more informative than.
pub fn not_smaller_clause(context: &EncodingContext, interpretation: &Interpretation) -> Vec<Literal> {
    interpretation
        .values()
        .iter()
        .enumerate()
        .flat_map(|(arg, value)| match value {
            TruthValue::In => vec![context.out_literal(arg)],
            TruthValue::Out => vec![context.in_literal(arg)],
            TruthValue::Undecided => vec![context.in_literal(arg), context.out_literal(arg)],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        adf::{AbstractDialecticalFramework, AcceptanceCondition, ArgumentSet},
        encodings::{ConflictFreenessConstraintsEncoder, ConstraintsEncoder},
        sat::{default_solver, SatSolver},
    };

    // three self-supporting arguments: every interpretation is conflict-free
    fn setup() -> (EncodingContext, Box<dyn SatSolver>) {
        let adf = AbstractDialecticalFramework::new_with_conditions(
            ArgumentSet::new_with_labels(&["a", "b", "c"]),
            (0..3).map(AcceptanceCondition::atom).collect(),
        )
        .unwrap();
        let context = EncodingContext::new(&adf);
        let mut solver = default_solver();
        context.prepare_solver(solver.as_mut());
        ConflictFreenessConstraintsEncoder.encode_constraints(&context, solver.as_mut());
        (context, solver)
    }

    fn enumerate(context: &EncodingContext, solver: &mut dyn SatSolver) -> Vec<Interpretation> {
        let mut result = vec![];
        while let Some(model) = solver.solve().unwrap_model() {
            let interpretation = context.decode(&model);
            solver.add_clause(unequal_clause(context, &interpretation));
            result.push(interpretation);
        }
        result
    }

    fn interpretation(values: &[TruthValue]) -> Interpretation {
        Interpretation::from_values(values.to_vec())
    }

    #[test]
    fn test_unequal_enumerates_all() {
        let (context, mut solver) = setup();
        let all = enumerate(&context, solver.as_mut());
        assert_eq!(27, all.len());
        for (i, a) in all.iter().enumerate() {
            assert!(all.iter().skip(i + 1).all(|b| a != b));
        }
    }

    #[test]
    fn test_larger() {
        let (context, mut solver) = setup();
        let i = interpretation(&[TruthValue::In, TruthValue::Undecided, TruthValue::Undecided]);
        larger_clauses(&context, &i)
            .into_iter()
            .for_each(|cl| solver.add_clause(cl));
        let all = enumerate(&context, solver.as_mut());
        assert_eq!(9, all.len());
        assert!(all.iter().all(|j| j.is_more_informative_than(&i)));
    }

    #[test]
    fn test_specific_larger() {
        let (context, mut solver) = setup();
        let i = interpretation(&[TruthValue::In, TruthValue::Undecided, TruthValue::Undecided]);
        specific_larger_clauses(&context, &i)
            .into_iter()
            .for_each(|cl| solver.add_clause(cl));
        let all = enumerate(&context, solver.as_mut());
        assert_eq!(8, all.len());
        assert!(all.iter().all(|j| j.is_more_informative_than(&i) && *j != i));
    }

    #[test]
    fn test_specific_larger_than_two_valued() {
        let (context, mut solver) = setup();
        let i = interpretation(&[TruthValue::In, TruthValue::Out, TruthValue::In]);
        specific_larger_clauses(&context, &i)
            .into_iter()
            .for_each(|cl| solver.add_clause(cl));
        assert!(enumerate(&context, solver.as_mut()).is_empty());
    }

    #[test]
    fn test_not_smaller() {
        let (context, mut solver) = setup();
        let i = interpretation(&[TruthValue::In, TruthValue::Out, TruthValue::Undecided]);
        solver.add_clause(not_smaller_clause(&context, &i));
        let all = enumerate(&context, solver.as_mut());
        // the 4 interpretations below i are excluded
        assert_eq!(23, all.len());
        assert!(all.iter().all(|j| !i.is_more_informative_than(j)));
    }

    #[test]
    fn test_prefix() {
        let (context, mut solver) = setup();
        let prefix = Prefix::new(vec![(0, TruthValue::Undecided), (2, TruthValue::Out)]);
        prefix_clauses(&context, &prefix)
            .into_iter()
            .for_each(|cl| solver.add_clause(cl));
        let all = enumerate(&context, solver.as_mut());
        assert_eq!(3, all.len());
        assert!(all.iter().all(|j| prefix.is_agreed_by(j)));
    }

    #[test]
    fn test_fix_partial() {
        let context = setup().0;
        let i = interpretation(&[TruthValue::Out, TruthValue::Undecided, TruthValue::In]);
        assert_eq!(
            vec![vec![context.out_literal(0)], vec![context.in_literal(2)]],
            fix_partial_clauses(&context, &i)
        );
    }
}
