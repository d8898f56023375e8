use anyhow::{anyhow, Result};
use std::collections::HashMap;
use std::fmt::Debug;
use std::fmt::Display;
use std::hash::Hash;

/// The trait for argument labels.
///
/// Arguments may be labeled by any type implementing some traits.
/// This trait is used to combine them.
pub trait LabelType: Clone + Debug + Display + Eq + Hash + Send + Sync {}
impl<T: Clone + Debug + Display + Eq + Hash + Send + Sync> LabelType for T {}

/// A single argument (or statement) of an ADF.
///
/// Each argument has a label and an identifier which is unique in an argument set.
/// Identifiers are the indices used everywhere else in the crate (acceptance condition atoms, interpretations, SAT encodings).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Argument<T: LabelType> {
    id: usize,
    label: T,
}

impl<T> Argument<T>
where
    T: LabelType,
{
    /// Returns the label of the argument.
    pub fn label(&self) -> &T {
        &self.label
    }

    /// Returns the id of the argument.
    ///
    /// ```
    /// # use crustadf::adf::{Argument, LabelType};
    /// fn describe_argument<T: LabelType>(a: &Argument<T>) {
    ///     println!("argument with id {} has the label {}", a.id(), a.label());
    /// }
    /// ```
    pub fn id(&self) -> usize {
        self.id
    }
}

impl<T> Display for Argument<T>
where
    T: LabelType,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label)
    }
}

/// The interned set of arguments of an ADF.
///
/// Arguments get consecutive ids, starting at zero, in their insertion order.
#[derive(Clone, Debug, Default)]
pub struct ArgumentSet<T>
where
    T: LabelType,
{
    arguments: Vec<Argument<T>>,
    label_to_id: HashMap<T, usize>,
}

impl<T> ArgumentSet<T>
where
    T: LabelType,
{
    /// Builds a new argument set given the labels of the arguments.
    ///
    /// Each argument will be assigned an id equal to its index in the provided slice of argument labels.
    /// If a label appears multiple times, the first occurrence is the only one that is considered.
    ///
    /// # Example
    ///
    /// ```
    /// # use crustadf::adf::ArgumentSet;
    /// let labels = vec!["a", "b", "c"];
    /// let arguments = ArgumentSet::new_with_labels(&labels);
    /// assert_eq!(3, arguments.len());
    /// ```
    pub fn new_with_labels(labels: &[T]) -> Self {
        let mut argument_set = ArgumentSet {
            arguments: Vec::with_capacity(labels.len()),
            label_to_id: HashMap::with_capacity(labels.len()),
        };
        for l in labels {
            argument_set.new_argument(l.clone());
        }
        argument_set
    }

    /// Adds a new argument to this set and returns its id.
    ///
    /// If an argument with the same label is already defined, no argument is added and the id of the existing one is returned.
    pub fn new_argument(&mut self, label: T) -> usize {
        *self.label_to_id.entry(label.clone()).or_insert_with(|| {
            self.arguments.push(Argument {
                id: self.arguments.len(),
                label,
            });
            self.arguments.len() - 1
        })
    }

    /// Returns the number of arguments in the set.
    pub fn len(&self) -> usize {
        self.arguments.len()
    }

    /// Returns `true` iff the set has no argument.
    pub fn is_empty(&self) -> bool {
        self.arguments.is_empty()
    }

    /// Returns the argument with the given label.
    ///
    /// An error is returned if no such argument exists.
    ///
    /// ```
    /// # use crustadf::adf::ArgumentSet;
    /// let arguments = ArgumentSet::new_with_labels(&["a", "b"]);
    /// assert_eq!(1, arguments.get_argument(&"b").unwrap().id());
    /// assert!(arguments.get_argument(&"c").is_err());
    /// ```
    pub fn get_argument(&self, label: &T) -> Result<&Argument<T>> {
        match self.label_to_id.get(label) {
            Some(id) => Ok(&self.arguments[*id]),
            None => Err(anyhow!("no such argument: {}", label)),
        }
    }

    /// Returns the argument with the given id.
    ///
    /// # Panics
    ///
    /// Panics if no argument has this id.
    pub fn get_argument_by_id(&self, id: usize) -> &Argument<T> {
        &self.arguments[id]
    }

    /// Returns `true` iff an argument has the given label.
    pub fn contains(&self, label: &T) -> bool {
        self.label_to_id.contains_key(label)
    }

    /// Iterates over the arguments, by increasing id.
    pub fn iter(&self) -> impl Iterator<Item = &Argument<T>> + '_ {
        self.arguments.iter()
    }
}

impl<'a, T> IntoIterator for &'a ArgumentSet<T>
where
    T: LabelType,
{
    type Item = &'a Argument<T>;
    type IntoIter = std::slice::Iter<'a, Argument<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.arguments.iter()
    }
}
