use super::{
    AcceptanceCondition, Argument, ArgumentSet, Interpretation, LabelType, Link, LinkType,
};
use crate::error::ReasoningError;
use anyhow::{Context, Result};

/// An Abstract Dialectical Framework.
///
/// Each argument has exactly one acceptance condition, [TrueConst](AcceptanceCondition::TrueConst) by default.
/// The links between arguments and their polarities are computed when a condition is set, and kept afterwards.
///
/// # Example
///
/// ```
/// # use crustadf::adf::{AbstractDialecticalFramework, AcceptanceCondition, ArgumentSet, LinkType};
/// let arguments = ArgumentSet::new_with_labels(&["a", "b"]);
/// let mut adf = AbstractDialecticalFramework::new_with_argument_set(arguments);
/// adf.set_acceptance_condition(&"b", AcceptanceCondition::neg(AcceptanceCondition::atom(0)))
///     .unwrap();
/// assert_eq!(1, adf.n_links());
/// assert_eq!(LinkType::Attacking, adf.links_to(1)[0].link_type());
/// ```
#[derive(Clone, Debug)]
pub struct AbstractDialecticalFramework<T>
where
    T: LabelType,
{
    argument_set: ArgumentSet<T>,
    conditions: Vec<AcceptanceCondition>,
    links_to: Vec<Vec<Link>>,
    links_from: Vec<Vec<Link>>,
    n_links: usize,
}

impl<T> AbstractDialecticalFramework<T>
where
    T: LabelType,
{
    /// Builds a new ADF given its arguments, all of them having a [TrueConst](AcceptanceCondition::TrueConst) condition.
    pub fn new_with_argument_set(argument_set: ArgumentSet<T>) -> Self {
        let n = argument_set.len();
        Self {
            argument_set,
            conditions: vec![AcceptanceCondition::TrueConst; n],
            links_to: vec![vec![]; n],
            links_from: vec![vec![]; n],
            n_links: 0,
        }
    }

    /// Builds a new ADF given its arguments and their conditions, indexed by argument ids.
    ///
    /// An [UnknownArgumentReference](ReasoningError::UnknownArgumentReference) error is returned if a condition refers to an unknown argument.
    pub fn new_with_conditions(
        argument_set: ArgumentSet<T>,
        conditions: Vec<AcceptanceCondition>,
    ) -> Result<Self> {
        let mut adf = Self::new_with_argument_set(argument_set);
        for (id, condition) in conditions.into_iter().enumerate() {
            adf.set_acceptance_condition_by_id(id, condition)?;
        }
        Ok(adf)
    }

    /// Sets the acceptance condition of an argument, given by its label.
    ///
    /// The links to this argument are computed again.
    pub fn set_acceptance_condition(&mut self, label: &T, condition: AcceptanceCondition) -> Result<()> {
        let id = self.argument_set.get_argument(label)?.id();
        self.set_acceptance_condition_by_id(id, condition)
            .with_context(|| format!("while setting the acceptance condition of {}", label))
    }

    /// Sets the acceptance condition of an argument, given by its id.
    ///
    /// The links to this argument are computed again.
    pub fn set_acceptance_condition_by_id(
        &mut self,
        id: usize,
        condition: AcceptanceCondition,
    ) -> Result<()> {
        let n = self.argument_set.len();
        if id >= n {
            return Err(ReasoningError::UnknownArgumentReference {
                argument: format!("#{}", id),
                owner: format!("#{}", id),
            }
            .into());
        }
        if let Some(unknown) = condition.atoms().into_iter().find(|a| *a >= n) {
            return Err(ReasoningError::UnknownArgumentReference {
                argument: format!("#{}", unknown),
                owner: self.argument_set.get_argument_by_id(id).to_string(),
            }
            .into());
        }
        self.install_condition(id, condition);
        Ok(())
    }

    fn install_condition(&mut self, id: usize, condition: AcceptanceCondition) {
        for old_link in std::mem::take(&mut self.links_to[id]) {
            self.links_from[old_link.parent()].retain(|l| l.child() != id);
            self.n_links -= 1;
        }
        for parent in condition.atoms() {
            if let Some(link_type) = LinkType::classify(&condition, parent) {
                let link = Link::new(parent, id, link_type);
                self.links_to[id].push(link);
                self.links_from[parent].push(link);
                self.n_links += 1;
            }
        }
        self.conditions[id] = condition;
    }

    /// Returns the arguments of this ADF.
    pub fn argument_set(&self) -> &ArgumentSet<T> {
        &self.argument_set
    }

    /// Returns the argument with the given id.
    pub fn argument(&self, id: usize) -> &Argument<T> {
        self.argument_set.get_argument_by_id(id)
    }

    /// Returns the number of arguments.
    pub fn n_arguments(&self) -> usize {
        self.argument_set.len()
    }

    /// Returns the number of links.
    pub fn n_links(&self) -> usize {
        self.n_links
    }

    /// Returns the acceptance condition of an argument, given by its id.
    pub fn acceptance_condition(&self, id: usize) -> &AcceptanceCondition {
        &self.conditions[id]
    }

    /// Returns the links whose child is the given argument, i.e. the links from its parents.
    pub fn links_to(&self, child: usize) -> &[Link] {
        &self.links_to[child]
    }

    /// Returns the links whose parent is the given argument.
    pub fn links_from(&self, parent: usize) -> &[Link] {
        &self.links_from[parent]
    }

    /// Returns the link between two arguments, if it exists.
    pub fn link(&self, parent: usize, child: usize) -> Option<&Link> {
        self.links_to[child].iter().find(|l| l.parent() == parent)
    }

    /// Iterates over all the links, by increasing child id.
    pub fn iter_links(&self) -> impl Iterator<Item = &Link> + '_ {
        self.links_to.iter().flat_map(|links| links.iter())
    }

    /// Returns `true` iff all the links of this ADF are bipolar (i.e. not dependent).
    pub fn is_bipolar(&self) -> bool {
        self.iter_links().all(|l| l.link_type().is_bipolar())
    }

    /// Computes the omega-reduct of this ADF relative to an interpretation.
    ///
    /// The arguments that are out in the interpretation get a [FalseConst](AcceptanceCondition::FalseConst) condition,
    /// and their occurrences in the other conditions are replaced by the contradiction before simplification.
    pub fn omega_reduct(&self, interpretation: &Interpretation) -> Self {
        let is_out = |a: usize| {
            if interpretation.value(a) == super::TruthValue::Out {
                Some(false)
            } else {
                None
            }
        };
        let conditions = (0..self.n_arguments())
            .map(|id| {
                if is_out(id).is_some() {
                    AcceptanceCondition::FalseConst
                } else {
                    self.conditions[id].fix_partial(&is_out)
                }
            })
            .collect::<Vec<AcceptanceCondition>>();
        let mut reduct = Self::new_with_argument_set(self.argument_set.clone());
        for (id, condition) in conditions.into_iter().enumerate() {
            reduct.install_condition(id, condition);
        }
        reduct
    }
}
