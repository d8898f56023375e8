use super::AcceptanceCondition;
use permutator::CartesianProduct;
use std::collections::HashMap;
use strum_macros::{AsRefStr, EnumIter};

/// The polarity of a link between a parent argument and a child argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum LinkType {
    /// Accepting the parent never turns the child condition from true to false.
    Supporting,
    /// Accepting the parent never turns the child condition from false to true.
    Attacking,
    /// The link is both supporting and attacking: the parent never changes the truth value of the child condition.
    Bipolar,
    /// The link is neither supporting nor attacking.
    Dependent,
}

impl LinkType {
    /// Classifies the link from `parent` to the owner of `condition`.
    ///
    /// The condition is evaluated on each pair of two-valued assignments that differ only on `parent`,
    /// for all the combinations of the other atoms.
    /// Returns `None` if `parent` does not occur in the condition.
    ///
    /// ```
    /// # use crustadf::adf::{AcceptanceCondition, LinkType};
    /// let attack = AcceptanceCondition::neg(AcceptanceCondition::atom(0));
    /// assert_eq!(Some(LinkType::Attacking), LinkType::classify(&attack, 0));
    /// assert_eq!(None, LinkType::classify(&attack, 1));
    /// ```
    pub fn classify(condition: &AcceptanceCondition, parent: usize) -> Option<LinkType> {
        let atoms = condition.atoms();
        if !atoms.contains(&parent) {
            return None;
        }
        let others = atoms
            .into_iter()
            .filter(|a| *a != parent)
            .collect::<Vec<usize>>();
        let mut supporting = true;
        let mut attacking = true;
        let mut check = |valuation: &HashMap<usize, bool>| {
            let without = condition.evaluate(&|a| a != parent && valuation[&a]);
            let with = condition.evaluate(&|a| a == parent || valuation[&a]);
            if without && !with {
                supporting = false;
            }
            if with && !without {
                attacking = false;
            }
            supporting || attacking
        };
        if others.is_empty() {
            check(&HashMap::new());
        } else {
            let domain: &[bool] = &[false, true];
            let domains = vec![domain; others.len()];
            for combination in domains.as_slice().cart_prod() {
                let valuation = others
                    .iter()
                    .zip(combination.into_iter())
                    .map(|(a, v)| (*a, *v))
                    .collect::<HashMap<usize, bool>>();
                if !check(&valuation) {
                    break;
                }
            }
        }
        Some(match (supporting, attacking) {
            (true, true) => LinkType::Bipolar,
            (true, false) => LinkType::Supporting,
            (false, true) => LinkType::Attacking,
            (false, false) => LinkType::Dependent,
        })
    }

    /// Returns `true` iff the link is not dependent, i.e. the child condition is monotone in the parent.
    pub fn is_bipolar(&self) -> bool {
        !matches!(self, LinkType::Dependent)
    }

    /// Returns `true` iff the link is supporting (bipolar links included).
    pub fn is_supporting(&self) -> bool {
        matches!(self, LinkType::Supporting | LinkType::Bipolar)
    }

    /// Returns `true` iff the link is attacking (bipolar links included).
    pub fn is_attacking(&self) -> bool {
        matches!(self, LinkType::Attacking | LinkType::Bipolar)
    }
}

/// A link between two arguments, given by their ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Link {
    parent: usize,
    child: usize,
    link_type: LinkType,
}

impl Link {
    pub(crate) fn new(parent: usize, child: usize, link_type: LinkType) -> Self {
        Self {
            parent,
            child,
            link_type,
        }
    }

    /// Returns the id of the parent argument.
    pub fn parent(&self) -> usize {
        self.parent
    }

    /// Returns the id of the child argument, the one whose condition contains the parent.
    pub fn child(&self) -> usize {
        self.child
    }

    /// Returns the polarity of this link.
    pub fn link_type(&self) -> LinkType {
        self.link_type
    }
}
