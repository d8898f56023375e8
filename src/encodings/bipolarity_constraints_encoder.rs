use super::{ConflictFreenessConstraintsEncoder, ConstraintsEncoder, EncodingContext};
use crate::{adf::LinkType, sat::SatSolver};

/// The encoder for the candidates of the admissibility-based semantics.
///
/// In addition to the conflict-freeness constraints, the link variables of the bipolar links are set
/// to their worst case for the decided children: an undecided attacker of an accepted argument is
/// considered accepted, an undecided supporter of an accepted argument is considered rejected, and conversely
/// for rejected arguments.
/// Dependent links are left free and are handled by the verifiers.
#[derive(Default)]
pub struct BipolarityConstraintsEncoder;

impl ConstraintsEncoder for BipolarityConstraintsEncoder {
    fn encode_constraints(&self, context: &EncodingContext, solver: &mut dyn SatSolver) {
        ConflictFreenessConstraintsEncoder.encode_constraints(context, solver);
        (0..context.n_arguments()).for_each(|child| {
            let child_in = context.in_literal(child);
            let child_out = context.out_literal(child);
            context.links_to(child).iter().for_each(|link| {
                let parent_in = context.in_literal(link.other);
                let parent_out = context.out_literal(link.other);
                match link.link_type {
                    LinkType::Attacking => {
                        solver.add_clause(vec![child_in.negate(), parent_out, link.literal]);
                        solver.add_clause(vec![child_out.negate(), parent_in, link.literal.negate()]);
                    }
                    LinkType::Supporting => {
                        solver.add_clause(vec![child_in.negate(), parent_in, link.literal.negate()]);
                        solver.add_clause(vec![child_out.negate(), parent_out, link.literal]);
                    }
                    LinkType::Bipolar | LinkType::Dependent => {}
                }
            })
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        adf::{
            AbstractDialecticalFramework, AcceptanceCondition as AC, ArgumentSet, Interpretation,
            TruthValue,
        },
        sat::default_solver,
    };

    fn is_candidate(adf: &AbstractDialecticalFramework<&'static str>, values: Vec<TruthValue>) -> bool {
        let context = EncodingContext::new(adf);
        let mut solver = default_solver();
        context.prepare_solver(solver.as_mut());
        BipolarityConstraintsEncoder.encode_constraints(&context, solver.as_mut());
        let interpretation = Interpretation::from_values(values);
        crate::encodings::fix_partial_clauses(&context, &interpretation)
            .into_iter()
            .for_each(|cl| solver.add_clause(cl));
        (0..adf.n_arguments())
            .filter(|a| interpretation.value(*a) == TruthValue::Undecided)
            .for_each(|a| {
                solver.add_clause(vec![context.in_literal(a).negate()]);
                solver.add_clause(vec![context.out_literal(a).negate()]);
            });
        solver.solve().unwrap_model().is_some()
    }

    #[test]
    fn test_undecided_attacker_prunes() {
        let adf = AbstractDialecticalFramework::new_with_conditions(
            ArgumentSet::new_with_labels(&["a", "b"]),
            vec![AC::neg(AC::atom(1)), AC::neg(AC::atom(0))],
        )
        .unwrap();
        assert!(!is_candidate(&adf, vec![TruthValue::In, TruthValue::Undecided]));
        assert!(is_candidate(&adf, vec![TruthValue::In, TruthValue::Out]));
        assert!(is_candidate(&adf, vec![TruthValue::Undecided, TruthValue::Undecided]));
    }

    #[test]
    fn test_undecided_supporter_prunes() {
        let adf = AbstractDialecticalFramework::new_with_conditions(
            ArgumentSet::new_with_labels(&["a", "b"]),
            vec![AC::atom(1), AC::TrueConst],
        )
        .unwrap();
        assert!(!is_candidate(&adf, vec![TruthValue::In, TruthValue::Undecided]));
        assert!(is_candidate(&adf, vec![TruthValue::In, TruthValue::In]));
        assert!(!is_candidate(&adf, vec![TruthValue::Out, TruthValue::Undecided]));
    }

    #[test]
    fn test_dependent_links_are_free() {
        let adf = AbstractDialecticalFramework::new_with_conditions(
            ArgumentSet::new_with_labels(&["a", "b", "c"]),
            vec![AC::xor(AC::atom(1), AC::atom(2)), AC::TrueConst, AC::TrueConst],
        )
        .unwrap();
        assert!(is_candidate(
            &adf,
            vec![TruthValue::In, TruthValue::Undecided, TruthValue::Undecided]
        ));
    }
}
