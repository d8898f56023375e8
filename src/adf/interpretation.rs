use super::AcceptanceCondition;
use crate::error::ReasoningError;
use anyhow::Result;
use strum_macros::{AsRefStr, EnumIter};

/// The value of an argument in a three-valued interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, EnumIter)]
pub enum TruthValue {
    /// The argument is accepted.
    #[strum(serialize = "t")]
    In,
    /// The argument is rejected.
    #[strum(serialize = "f")]
    Out,
    /// The argument is neither accepted nor rejected.
    #[strum(serialize = "u")]
    Undecided,
}

impl TruthValue {
    /// Returns `true` iff the value is not [TruthValue::Undecided].
    pub fn is_decided(&self) -> bool {
        !matches!(self, TruthValue::Undecided)
    }

    /// Returns the Boolean counterpart of this value, `None` for [TruthValue::Undecided].
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            TruthValue::In => Some(true),
            TruthValue::Out => Some(false),
            TruthValue::Undecided => None,
        }
    }

    /// Builds a value from a Boolean, `None` giving [TruthValue::Undecided].
    pub fn from_bool(b: Option<bool>) -> Self {
        match b {
            Some(true) => TruthValue::In,
            Some(false) => TruthValue::Out,
            None => TruthValue::Undecided,
        }
    }
}

/// A three-valued interpretation of the arguments of an ADF.
///
/// Each argument, given by its id, is either in, out, or undecided.
/// Two interpretations are equal iff their in, out and undecided sets are equal.
///
/// # Example
///
/// ```
/// # use crustadf::adf::{Interpretation, TruthValue};
/// let bottom = Interpretation::new_undecided(2);
/// let decided = bottom.decide(0, true).unwrap();
/// assert!(decided.is_more_informative_than(&bottom));
/// assert_eq!(TruthValue::In, decided.value(0));
/// assert!(decided.decide(0, false).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Interpretation {
    values: Vec<TruthValue>,
}

impl Interpretation {
    /// Builds the interpretation in which all the arguments are undecided.
    pub fn new_undecided(n_arguments: usize) -> Self {
        Self {
            values: vec![TruthValue::Undecided; n_arguments],
        }
    }

    /// Builds an interpretation from the values of the arguments, indexed by their ids.
    pub fn from_values(values: Vec<TruthValue>) -> Self {
        Self { values }
    }

    /// Returns the number of arguments this interpretation is defined on.
    pub fn n_arguments(&self) -> usize {
        self.values.len()
    }

    /// Returns the value of an argument.
    pub fn value(&self, arg_id: usize) -> TruthValue {
        self.values[arg_id]
    }

    /// Returns the values of the arguments, indexed by their ids.
    pub fn values(&self) -> &[TruthValue] {
        &self.values
    }

    /// Returns the ids of the arguments that are in.
    pub fn in_arguments(&self) -> impl Iterator<Item = usize> + '_ {
        self.arguments_with_value(TruthValue::In)
    }

    /// Returns the ids of the arguments that are out.
    pub fn out_arguments(&self) -> impl Iterator<Item = usize> + '_ {
        self.arguments_with_value(TruthValue::Out)
    }

    /// Returns the ids of the undecided arguments.
    pub fn undecided_arguments(&self) -> impl Iterator<Item = usize> + '_ {
        self.arguments_with_value(TruthValue::Undecided)
    }

    fn arguments_with_value(&self, value: TruthValue) -> impl Iterator<Item = usize> + '_ {
        self.values
            .iter()
            .enumerate()
            .filter_map(move |(i, v)| if *v == value { Some(i) } else { None })
    }

    /// Returns `true` iff no argument is undecided.
    pub fn is_two_valued(&self) -> bool {
        self.values.iter().all(|v| v.is_decided())
    }

    /// Returns a new interpretation in which the argument is accepted (if `accepted` is `true`) or rejected.
    ///
    /// Deciding an argument to its current value is a no-op.
    /// An [AlreadyDecidedConflict](ReasoningError::AlreadyDecidedConflict) error is returned if the argument already has the other value.
    pub fn decide(&self, arg_id: usize, accepted: bool) -> Result<Interpretation> {
        let new_value = TruthValue::from_bool(Some(accepted));
        match self.values[arg_id] {
            TruthValue::Undecided => {
                let mut values = self.values.clone();
                values[arg_id] = new_value;
                Ok(Interpretation { values })
            }
            v if v == new_value => Ok(self.clone()),
            _ => Err(ReasoningError::AlreadyDecidedConflict { argument_id: arg_id }.into()),
        }
    }

    /// Returns `true` iff every argument decided in `other` has the same value in this interpretation.
    ///
    /// This is the information order; an interpretation is more informative than itself.
    pub fn is_more_informative_than(&self, other: &Interpretation) -> bool {
        self.values
            .iter()
            .zip(other.values.iter())
            .all(|(mine, theirs)| !theirs.is_decided() || mine == theirs)
    }

    /// Evaluates a condition under this interpretation with the strong Kleene logic.
    ///
    /// In arguments are true, out arguments are false, and undecided ones are unknown.
    /// The result is `None` if the condition is unknown.
    pub fn satisfies(&self, condition: &AcceptanceCondition) -> Option<bool> {
        condition.evaluate_three_valued(&|a| self.values[a].as_bool())
    }

    /// Returns the two-valued interpretations that are more informative than this one.
    ///
    /// There are 2^u of them, where u is the number of undecided arguments;
    /// this function must only be called on interpretations with few undecided arguments.
    /// Calling it again restarts the enumeration.
    pub fn completions(&self) -> Completions {
        Completions {
            base: self.clone(),
            undecided: self.undecided_arguments().collect(),
            counter: Some(vec![false; self.undecided_arguments().count()]),
        }
    }
}

/// The iterator returned by [Interpretation::completions].
#[derive(Clone)]
pub struct Completions {
    base: Interpretation,
    undecided: Vec<usize>,
    counter: Option<Vec<bool>>,
}

impl Iterator for Completions {
    type Item = Interpretation;

    fn next(&mut self) -> Option<Self::Item> {
        let counter = self.counter.as_mut()?;
        let mut values = self.base.values.clone();
        self.undecided
            .iter()
            .zip(counter.iter())
            .for_each(|(a, v)| values[*a] = TruthValue::from_bool(Some(*v)));
        match counter.iter().position(|b| !*b) {
            Some(p) => {
                counter.iter_mut().take(p).for_each(|b| *b = false);
                counter[p] = true;
            }
            None => self.counter = None,
        }
        Some(Interpretation { values })
    }
}

/// A partial interpretation over a subset of the arguments, used to seed a search.
///
/// Unlike [Interpretation], the arguments a prefix is about are explicit:
/// an undecided value in a prefix means the argument is required to be undecided.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Prefix {
    assignments: Vec<(usize, TruthValue)>,
}

impl Prefix {
    /// Builds a new prefix from a list of (argument id, value) pairs.
    pub fn new(assignments: Vec<(usize, TruthValue)>) -> Self {
        Self { assignments }
    }

    /// Builds the prefix fixing all the arguments of an interpretation.
    pub fn from_interpretation(interpretation: &Interpretation) -> Self {
        Self {
            assignments: interpretation.values().iter().copied().enumerate().collect(),
        }
    }

    /// Returns the (argument id, value) pairs of this prefix.
    pub fn assignments(&self) -> &[(usize, TruthValue)] {
        &self.assignments
    }

    /// Returns `true` iff the prefix does not fix any argument.
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Returns `true` iff the interpretation gives each argument of the prefix its prefix value.
    pub fn is_agreed_by(&self, interpretation: &Interpretation) -> bool {
        self.assignments
            .iter()
            .all(|(a, v)| interpretation.value(*a) == *v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReasoningError;
    use AcceptanceCondition as AC;

    fn interpretation(values: &[TruthValue]) -> Interpretation {
        Interpretation::from_values(values.to_vec())
    }

    #[test]
    fn test_partition() {
        let i = interpretation(&[TruthValue::In, TruthValue::Undecided, TruthValue::Out]);
        assert_eq!(vec![0], i.in_arguments().collect::<Vec<usize>>());
        assert_eq!(vec![2], i.out_arguments().collect::<Vec<usize>>());
        assert_eq!(vec![1], i.undecided_arguments().collect::<Vec<usize>>());
        assert!(!i.is_two_valued());
    }

    #[test]
    fn test_decide() {
        let i = Interpretation::new_undecided(2).decide(1, false).unwrap();
        assert_eq!(TruthValue::Out, i.value(1));
        assert_eq!(i, i.decide(1, false).unwrap());
        let err = i.decide(1, true).unwrap_err();
        assert_eq!(
            Some(&ReasoningError::AlreadyDecidedConflict { argument_id: 1 }),
            err.downcast_ref::<ReasoningError>()
        );
    }

    #[test]
    fn test_information_order() {
        let bottom = Interpretation::new_undecided(2);
        let i1 = interpretation(&[TruthValue::In, TruthValue::Undecided]);
        let i2 = interpretation(&[TruthValue::In, TruthValue::Out]);
        let i3 = interpretation(&[TruthValue::Out, TruthValue::Out]);
        assert!(i1.is_more_informative_than(&bottom));
        assert!(i2.is_more_informative_than(&i1));
        assert!(!i1.is_more_informative_than(&i2));
        assert!(!i3.is_more_informative_than(&i1));
        assert!(i3.is_more_informative_than(&i3));
    }

    #[test]
    fn test_satisfies() {
        let i = interpretation(&[TruthValue::In, TruthValue::Undecided, TruthValue::Out]);
        assert_eq!(Some(true), i.satisfies(&AC::atom(0)));
        assert_eq!(None, i.satisfies(&AC::atom(1)));
        assert_eq!(
            Some(false),
            i.satisfies(&AC::conj(vec![AC::atom(1), AC::atom(2)]))
        );
        assert_eq!(
            None,
            i.satisfies(&AC::conj(vec![AC::atom(0), AC::atom(1)]))
        );
    }

    #[test]
    fn test_completions() {
        let i = interpretation(&[TruthValue::Undecided, TruthValue::In, TruthValue::Undecided]);
        let completions = i.completions().collect::<Vec<Interpretation>>();
        assert_eq!(4, completions.len());
        for c in completions.iter() {
            assert!(c.is_two_valued());
            assert!(c.is_more_informative_than(&i));
        }
        let mut dedup = completions.clone();
        dedup.dedup();
        assert_eq!(4, dedup.len());
        assert_eq!(completions, i.completions().collect::<Vec<Interpretation>>());
    }

    #[test]
    fn test_completions_of_two_valued() {
        let i = interpretation(&[TruthValue::In, TruthValue::Out]);
        assert_eq!(vec![i.clone()], i.completions().collect::<Vec<Interpretation>>());
    }

    #[test]
    fn test_prefix() {
        let prefix = Prefix::new(vec![(0, TruthValue::Undecided), (2, TruthValue::In)]);
        assert!(prefix.is_agreed_by(&interpretation(&[
            TruthValue::Undecided,
            TruthValue::Out,
            TruthValue::In
        ])));
        assert!(!prefix.is_agreed_by(&interpretation(&[
            TruthValue::Out,
            TruthValue::Out,
            TruthValue::In
        ])));
        assert!(Prefix::default().is_empty());
    }

    #[test]
    fn test_truth_value_names() {
        assert_eq!("t", TruthValue::In.as_ref());
        assert_eq!("f", TruthValue::Out.as_ref());
        assert_eq!("u", TruthValue::Undecided.as_ref());
    }
}
