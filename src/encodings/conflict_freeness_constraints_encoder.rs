use super::{ConstraintsEncoder, EncodingContext};
use crate::sat::SatSolver;

/// The encoder for conflict-free interpretations.
///
/// An argument that is in must have a condition that can still be true,
/// and an argument that is out must have a condition that can still be false.
/// The link variables of the decided parents are fixed to their value;
/// the ones of undecided parents are free, so that a model exhibits a completion witnessing the conflict-freeness.
#[derive(Default)]
pub struct ConflictFreenessConstraintsEncoder;

impl ConstraintsEncoder for ConflictFreenessConstraintsEncoder {
    fn encode_constraints(&self, context: &EncodingContext, solver: &mut dyn SatSolver) {
        context.encode_all_conditions(solver);
        (0..context.n_arguments()).for_each(|arg| {
            let in_lit = context.in_literal(arg);
            let out_lit = context.out_literal(arg);
            let acc = context.condition_literal(arg);
            solver.add_clause(vec![in_lit.negate(), out_lit.negate()]);
            solver.add_clause(vec![in_lit.negate(), acc]);
            solver.add_clause(vec![out_lit.negate(), acc.negate()]);
        });
        (0..context.n_arguments()).for_each(|child| {
            context.links_to(child).iter().for_each(|link| {
                solver.add_clause(vec![context.in_literal(link.other).negate(), link.literal]);
                solver.add_clause(vec![
                    context.out_literal(link.other).negate(),
                    link.literal.negate(),
                ]);
            })
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        adf::{AbstractDialecticalFramework, AcceptanceCondition as AC, ArgumentSet, Interpretation},
        sat::default_solver,
    };

    fn count_models(
        adf: &AbstractDialecticalFramework<&'static str>,
        encoder: &dyn ConstraintsEncoder,
    ) -> Vec<Interpretation> {
        let context = EncodingContext::new(adf);
        let mut solver = default_solver();
        context.prepare_solver(solver.as_mut());
        encoder.encode_constraints(&context, solver.as_mut());
        let mut result = vec![];
        while let Some(model) = solver.solve().unwrap_model() {
            let interpretation = context.decode(&model);
            solver.add_clause(crate::encodings::unequal_clause(&context, &interpretation));
            result.push(interpretation);
        }
        result
    }

    #[test]
    fn test_mutual_attack() {
        let adf = AbstractDialecticalFramework::new_with_conditions(
            ArgumentSet::new_with_labels(&["a", "b"]),
            vec![AC::neg(AC::atom(1)), AC::neg(AC::atom(0))],
        )
        .unwrap();
        let models = count_models(&adf, &ConflictFreenessConstraintsEncoder);
        // all but {a: in, b: in} and {a: out, b: out}
        assert_eq!(7, models.len());
    }

    #[test]
    fn test_contradiction_cannot_be_in() {
        let adf = AbstractDialecticalFramework::new_with_conditions(
            ArgumentSet::new_with_labels(&["a"]),
            vec![AC::FalseConst],
        )
        .unwrap();
        let models = count_models(&adf, &ConflictFreenessConstraintsEncoder);
        assert_eq!(2, models.len());
        assert!(models.iter().all(|m| m.in_arguments().count() == 0));
    }
}
