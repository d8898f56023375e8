use crate::adf::{AbstractDialecticalFramework, LabelType, Prefix, TruthValue};
use log::info;
use permutator::CartesianProduct;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use strum_macros::{AsRefStr, EnumIter, EnumString};

/// Splits the search for models into independent searches, each one restricted by a prefix.
///
/// A decomposer selects a subset of k arguments and returns one prefix per combination of values of these arguments.
/// The value k is chosen so that the number of prefixes is close to the desired one.
/// The strategies only differ by the way the arguments are selected; ties are broken by lowest argument id.
///
/// # Example
///
/// ```
/// # use crustadf::adf::{AbstractDialecticalFramework, ArgumentSet};
/// # use crustadf::solvers::Decomposer;
/// let adf = AbstractDialecticalFramework::new_with_argument_set(
///     ArgumentSet::new_with_labels(&["a", "b", "c", "d"]),
/// );
/// let prefixes = Decomposer::MostComplexAcceptanceCondition.decompose(&adf, 9, false);
/// assert_eq!(9, prefixes.len());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, EnumIter, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum Decomposer {
    /// Selects the arguments with the highest number of bipolar links from their parents.
    MostBipolarParents,
    /// Selects the arguments with the largest acceptance conditions.
    MostComplexAcceptanceCondition,
    /// Selects arguments at random, using the given seed.
    Random(u64),
}

impl Decomposer {
    /// Computes the prefixes.
    ///
    /// When `two_valued` is `true`, the prefixes only use the `in` and `out` values.
    /// At least one prefix is returned; a desired number of prefixes lower than 2 gives a single empty prefix.
    pub fn decompose<T>(
        &self,
        adf: &AbstractDialecticalFramework<T>,
        desired: usize,
        two_valued: bool,
    ) -> Vec<Prefix>
    where
        T: LabelType,
    {
        let values: &[TruthValue] = if two_valued {
            &[TruthValue::In, TruthValue::Out]
        } else {
            &[TruthValue::In, TruthValue::Out, TruthValue::Undecided]
        };
        let k = n_selected_arguments(adf.n_arguments(), desired, values.len());
        if k == 0 {
            return vec![Prefix::default()];
        }
        let selected = self.partition(adf, k);
        info!(
            "decomposing on {} arguments with {} heuristic",
            k,
            self.as_ref()
        );
        let domains = vec![values; k];
        domains
            .as_slice()
            .cart_prod()
            .map(|combination| {
                Prefix::new(
                    selected
                        .iter()
                        .zip(combination.into_iter())
                        .map(|(a, v)| (*a, *v))
                        .collect(),
                )
            })
            .collect()
    }

    fn partition<T>(&self, adf: &AbstractDialecticalFramework<T>, k: usize) -> Vec<usize>
    where
        T: LabelType,
    {
        let mut ids = (0..adf.n_arguments()).collect::<Vec<usize>>();
        match self {
            Decomposer::MostBipolarParents => ids.sort_by_key(|a| {
                std::cmp::Reverse(
                    adf.links_to(*a)
                        .iter()
                        .filter(|l| l.link_type().is_bipolar())
                        .count(),
                )
            }),
            Decomposer::MostComplexAcceptanceCondition => ids.sort_by_key(|a| {
                std::cmp::Reverse(adf.acceptance_condition(*a).node_count())
            }),
            Decomposer::Random(seed) => ids.shuffle(&mut StdRng::seed_from_u64(*seed)),
        }
        ids.truncate(k);
        ids
    }
}

fn n_selected_arguments(n_arguments: usize, desired: usize, n_values: usize) -> usize {
    if desired <= 1 {
        return 0;
    }
    let k = ((desired as f64).ln() / (n_values as f64).ln()).round() as usize;
    usize::min(n_arguments, k)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adf::{AcceptanceCondition as AC, ArgumentSet};
    use std::collections::HashSet;
    use std::str::FromStr;

    fn six_arguments() -> AbstractDialecticalFramework<&'static str> {
        AbstractDialecticalFramework::new_with_conditions(
            ArgumentSet::new_with_labels(&["a", "b", "c", "d", "e", "f"]),
            vec![
                AC::TrueConst,
                AC::conj(vec![AC::atom(0), AC::neg(AC::atom(2)), AC::atom(3)]),
                AC::neg(AC::atom(0)),
                AC::xor(AC::atom(4), AC::atom(5)),
                AC::atom(0),
                AC::disj(vec![AC::atom(0), AC::atom(1)]),
            ],
        )
        .unwrap()
    }

    macro_rules! decomposer_tests {
        ($decomposer:expr, $suffix:literal) => {
            paste::item! {
                #[test]
                fn [< test_nine_prefixes_ $suffix >] () {
                    let adf = six_arguments();
                    let prefixes = $decomposer.decompose(&adf, 9, false);
                    assert_eq!(9, prefixes.len());
                    assert!(prefixes.iter().all(|p| p.assignments().len() == 2));
                    let distinct = prefixes.iter().collect::<HashSet<&Prefix>>();
                    assert_eq!(9, distinct.len());
                }

                #[test]
                fn [< test_two_valued_ $suffix >] () {
                    let adf = six_arguments();
                    let prefixes = $decomposer.decompose(&adf, 8, true);
                    assert_eq!(8, prefixes.len());
                    assert!(prefixes
                        .iter()
                        .flat_map(|p| p.assignments().iter())
                        .all(|(_, v)| v.is_decided()));
                }

                #[test]
                fn [< test_single_prefix_ $suffix >] () {
                    let adf = six_arguments();
                    assert_eq!(vec![Prefix::default()], $decomposer.decompose(&adf, 1, false));
                    assert_eq!(vec![Prefix::default()], $decomposer.decompose(&adf, 0, true));
                }

                #[test]
                fn [< test_more_desired_than_arguments_ $suffix >] () {
                    let adf = six_arguments();
                    assert_eq!(729, $decomposer.decompose(&adf, 1_000_000, false).len());
                }
            }
        };
    }

    decomposer_tests!(Decomposer::MostBipolarParents, "most_bipolar_parents");
    decomposer_tests!(Decomposer::MostComplexAcceptanceCondition, "most_complex");
    decomposer_tests!(Decomposer::Random(42), "random");

    #[test]
    fn test_most_bipolar_parents_selection() {
        let adf = six_arguments();
        assert_eq!(vec![1, 5], Decomposer::MostBipolarParents.partition(&adf, 2));
    }

    #[test]
    fn test_most_complex_selection() {
        let adf = six_arguments();
        assert_eq!(vec![1, 3], Decomposer::MostComplexAcceptanceCondition.partition(&adf, 2));
    }

    #[test]
    fn test_random_is_reproducible() {
        let adf = six_arguments();
        assert_eq!(
            Decomposer::Random(7).partition(&adf, 3),
            Decomposer::Random(7).partition(&adf, 3)
        );
    }

    #[test]
    fn test_names() {
        assert_eq!(
            Decomposer::MostBipolarParents,
            Decomposer::from_str("most-bipolar-parents").unwrap()
        );
        assert_eq!("random", Decomposer::Random(3).as_ref());
    }
}
