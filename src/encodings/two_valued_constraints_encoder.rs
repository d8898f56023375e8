use super::{ConflictFreenessConstraintsEncoder, ConstraintsEncoder, EncodingContext};
use crate::sat::SatSolver;

/// The encoder for two-valued candidates.
///
/// Every argument is either in or out, and its condition agrees with its value.
/// Since no parent is undecided, the models of these constraints are exactly the two-valued models of the ADF.
#[derive(Default)]
pub struct TwoValuedConstraintsEncoder;

impl ConstraintsEncoder for TwoValuedConstraintsEncoder {
    fn encode_constraints(&self, context: &EncodingContext, solver: &mut dyn SatSolver) {
        ConflictFreenessConstraintsEncoder.encode_constraints(context, solver);
        (0..context.n_arguments()).for_each(|arg| {
            solver.add_clause(vec![context.in_literal(arg), context.out_literal(arg)])
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        adf::{AbstractDialecticalFramework, AcceptanceCondition as AC, ArgumentSet, TruthValue},
        encodings::unequal_clause,
        sat::default_solver,
    };

    #[test]
    fn test_two_valued_models() {
        let adf = AbstractDialecticalFramework::new_with_conditions(
            ArgumentSet::new_with_labels(&["a", "b", "c"]),
            vec![
                AC::neg(AC::atom(1)),
                AC::neg(AC::atom(0)),
                AC::conj(vec![AC::atom(0), AC::atom(2)]),
            ],
        )
        .unwrap();
        let context = EncodingContext::new(&adf);
        let mut solver = default_solver();
        context.prepare_solver(solver.as_mut());
        TwoValuedConstraintsEncoder.encode_constraints(&context, solver.as_mut());
        let mut models = vec![];
        while let Some(model) = solver.solve().unwrap_model() {
            let interpretation = context.decode(&model);
            assert!(interpretation.is_two_valued());
            solver.add_clause(unequal_clause(&context, &interpretation));
            models.push(interpretation);
        }
        // {a, c}, {a}, {b}
        assert_eq!(3, models.len());
        assert!(models
            .iter()
            .all(|m| m.value(0) != m.value(1) && (m.value(0) == TruthValue::In || m.value(2) == TruthValue::Out)));
    }
}
