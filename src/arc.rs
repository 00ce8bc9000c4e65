//! Arc consistency over the crossing slots (AC-3).

use log::{debug, trace};
use std::collections::{BTreeSet, VecDeque};

use crate::{Domains, Error, PsResult, VarToken};

impl Domains<'_> {
    /// Make `x` arc consistent with `y`.
    ///
    /// Removes every candidate of `x` for which no candidate of `y` has
    /// the same letter in the shared cell.  Returns whether any candidate
    /// was removed.  Slots that do not cross are left alone.  A word too
    /// short to reach the shared cell has no support.
    pub fn revise(&mut self, x: VarToken, y: VarToken) -> bool {
        let (i, j) = match self.crossword.overlap(x, y) {
            Some(overlap) => overlap,
            None => return false,
        };

        let supported: BTreeSet<char> = self.get(y).iter().filter_map(|word| word.get(j)).collect();

        let set = &mut self.sets[x.index()];
        let before = set.len();
        set.retain(|word| word.get(i).map_or(false, |c| supported.contains(&c)));

        let removed = before - set.len();
        if removed > 0 {
            trace!("revise {} against {}: removed {} words", x, y, removed);
        }
        removed > 0
    }

    /// Enforce arc consistency, starting from every ordered pair of
    /// distinct variables.
    ///
    /// Returns an error naming the variable whose domain was wiped out.
    ///
    /// # Examples
    ///
    /// ```
    /// use crossword_solver::{Crossword, Domains};
    ///
    /// let crossword = Crossword::new("___\n#_#\n#_#\n", "cat\nact\ntic\n").unwrap();
    /// let mut domains = Domains::new(&crossword);
    /// domains.enforce_node_consistency();
    /// assert!(domains.ac3().is_ok());
    ///
    /// let vars: Vec<_> = crossword.var_tokens().collect();
    /// assert_eq!(domains.count(vars[0]), 2);
    /// assert_eq!(domains.count(vars[1]), 2);
    /// ```
    pub fn ac3(&mut self) -> PsResult<()> {
        let n = self.crossword.num_vars();
        let arcs = (0..n)
            .flat_map(|x| (0..n).filter(move |&y| y != x).map(move |y| (x, y)))
            .map(|(x, y)| (VarToken(x), VarToken(y)));
        self.ac3_from(arcs)
    }

    /// Enforce arc consistency, starting from the given arcs.
    ///
    /// Arcs are processed first in, first out.  Whenever the domain of
    /// `x` shrinks while revising `(x, y)`, every arc `(z, x)` with `z`
    /// other than `x` and `y` is queued again.
    pub fn ac3_from<I>(&mut self, arcs: I) -> PsResult<()>
    where
        I: IntoIterator<Item = (VarToken, VarToken)>,
    {
        let mut queue: VecDeque<(VarToken, VarToken)> = arcs.into_iter().collect();
        let mut revisions = 0;

        while let Some((x, y)) = queue.pop_front() {
            revisions += 1;
            if !self.revise(x, y) {
                continue;
            }

            if self.get(x).is_empty() {
                debug!("arc consistency: domain of {} wiped out", x);
                return Err(Error::Contradiction(x));
            }

            queue.extend(
                self.crossword
                    .var_tokens()
                    .filter(|&z| z != x && z != y)
                    .map(|z| (z, x)),
            );
        }

        debug!("arc consistency reached after {} revisions", revisions);
        Ok(())
    }
}
