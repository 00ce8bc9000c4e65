//! The candidate words of every variable.

use log::debug;
use std::collections::BTreeSet;
use std::fmt;

use crate::{Crossword, VarToken, Word};

/// The domain store propagation and search work on.
///
/// Each variable starts with the full vocabulary of its crossword.
/// Domains only ever shrink.
#[derive(Clone)]
pub struct Domains<'a> {
    pub(crate) crossword: &'a Crossword,
    pub(crate) sets: Vec<BTreeSet<Word>>,
}

impl<'a> Domains<'a> {
    /// Allocate a new domain store.
    ///
    /// # Examples
    ///
    /// ```
    /// use crossword_solver::{Crossword, Domains};
    ///
    /// let crossword = Crossword::new("___\n", "cat\nox\n").unwrap();
    /// let mut domains = Domains::new(&crossword);
    /// domains.enforce_node_consistency();
    ///
    /// let var = crossword.var_tokens().next().unwrap();
    /// assert_eq!(domains.count(var), 1);
    /// ```
    pub fn new(crossword: &'a Crossword) -> Self {
        let sets = vec![crossword.words().clone(); crossword.num_vars()];
        Domains { crossword, sets }
    }

    pub fn crossword(&self) -> &'a Crossword {
        self.crossword
    }

    /// Get the remaining candidates of a variable.
    pub fn get(&self, var: VarToken) -> &BTreeSet<Word> {
        let VarToken(idx) = var;
        &self.sets[idx]
    }

    /// Count the remaining candidates of a variable.
    pub fn count(&self, var: VarToken) -> usize {
        self.get(var).len()
    }

    /// The first variable left without candidates, if any.
    pub fn wiped_out(&self) -> Option<VarToken> {
        self.sets.iter().position(|set| set.is_empty()).map(VarToken)
    }

    /// Remove every candidate whose length differs from its slot's length.
    pub fn enforce_node_consistency(&mut self) {
        let crossword = self.crossword;
        for (idx, set) in self.sets.iter_mut().enumerate() {
            let length = crossword.variable(VarToken(idx)).length;
            let before = set.len();
            set.retain(|word| word.len() == length);
            debug!(
                "node consistency: x{} kept {} of {} words",
                idx,
                set.len(),
                before
            );
        }
    }
}

impl fmt::Debug for Domains<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "Domains={{")?;
        for (idx, set) in self.sets.iter().enumerate() {
            writeln!(f)?;
            write!(f, "  var {}:", idx)?;
            for word in set.iter() {
                write!(f, " {}", word)?;
            }
        }
        write!(f, "}}")?;
        Ok(())
    }
}
