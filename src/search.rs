//! Backtracking search over partial assignments.

use log::{debug, trace};
use std::cmp::Reverse;
use std::collections::HashMap;

use crate::{Crossword, Domains, Solution, SolverOptions, VarToken, Word};

/// A partial mapping from variables to words.
///
/// Each branch of the search owns its own assignment, so a failed branch
/// leaves nothing behind for its siblings.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Assignment {
    words: Vec<Option<Word>>,
    len: usize,
}

impl Assignment {
    /// Allocate an empty assignment for a crossword.
    pub fn new(crossword: &Crossword) -> Self {
        Assignment {
            words: vec![None; crossword.num_vars()],
            len: 0,
        }
    }

    /// The number of assigned variables.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn get(&self, var: VarToken) -> Option<&Word> {
        self.words.get(var.index()).and_then(Option::as_ref)
    }

    pub fn contains(&self, var: VarToken) -> bool {
        self.get(var).is_some()
    }

    /// Assign a word to a variable, returning the word it replaced.
    pub fn insert(&mut self, var: VarToken, word: Word) -> Option<Word> {
        let previous = self.words[var.index()].replace(word);
        if previous.is_none() {
            self.len += 1;
        }
        previous
    }

    pub fn remove(&mut self, var: VarToken) -> Option<Word> {
        let previous = self.words[var.index()].take();
        if previous.is_some() {
            self.len -= 1;
        }
        previous
    }

    pub fn iter(&self) -> impl Iterator<Item = (VarToken, &Word)> + '_ {
        self.words
            .iter()
            .enumerate()
            .filter_map(|(idx, word)| word.as_ref().map(|w| (VarToken(idx), w)))
    }

    /// Convert a complete assignment into a solution.
    pub fn into_solution(self) -> Option<Solution> {
        let words = self.words.into_iter().collect::<Option<Vec<Word>>>()?;
        Some(Solution { words })
    }
}

/// Backtracking search over a fixed domain store.
///
/// The domains are only read; every recursive call receives its own copy
/// of the assignment.
#[derive(Debug)]
pub struct CrosswordSearch<'a> {
    crossword: &'a Crossword,
    domains: &'a Domains<'a>,
    options: SolverOptions,

    // The number of tentative assignments made.
    num_guesses: u32,
}

impl<'a> CrosswordSearch<'a> {
    pub fn new(domains: &'a Domains<'a>, options: SolverOptions) -> Self {
        CrosswordSearch {
            crossword: domains.crossword(),
            domains,
            options,
            num_guesses: 0,
        }
    }

    pub fn num_guesses(&self) -> u32 {
        self.num_guesses
    }

    /// Extend the assignment until every variable holds a word.
    ///
    /// Returns the first complete, consistent assignment found, or None
    /// once every branch below `assignment` is exhausted.
    pub fn backtrack(&mut self, assignment: Assignment) -> Option<Assignment> {
        if self.assignment_complete(&assignment) {
            return Some(assignment);
        }

        let var = self.select_unassigned_variable(&assignment)?;
        for word in self.order_domain_values(var, &assignment) {
            self.num_guesses += 1;
            if !self.consistent_with(&assignment, var, &word) {
                continue;
            }

            trace!("guess {} = {} at depth {}", var, word, assignment.len());

            let mut next = assignment.clone();
            next.insert(var, word);
            if let Some(result) = self.backtrack(next) {
                return Some(result);
            }
        }

        if assignment.is_empty() {
            debug!("search exhausted after {} guesses", self.num_guesses);
        }
        None
    }

    /// Check whether every variable of the crossword holds a word.
    pub fn assignment_complete(&self, assignment: &Assignment) -> bool {
        assignment.len() == self.crossword.num_vars()
    }

    /// Check a whole assignment: words are distinct, fit their slots, and
    /// agree wherever two assigned slots cross.
    pub fn consistent(&self, assignment: &Assignment) -> bool {
        let mut seen = HashMap::with_capacity(assignment.len());
        for (var, word) in assignment.iter() {
            if seen.insert(word, var).is_some() {
                return false;
            }
            if word.len() != self.crossword.variable(var).length {
                return false;
            }
        }

        for (var, word) in assignment.iter() {
            for other in self.crossword.neighbors(var) {
                if let (Some(theirs), Some((i, j))) =
                    (assignment.get(other), self.crossword.overlap(var, other))
                {
                    if word.letter(i) != theirs.letter(j) {
                        return false;
                    }
                }
            }
        }
        true
    }

    /// Check `var = word` against the variables already assigned.
    ///
    /// Equivalent to `consistent` on the extended assignment, provided the
    /// assignment itself is consistent.
    fn consistent_with(&self, assignment: &Assignment, var: VarToken, word: &Word) -> bool {
        if word.len() != self.crossword.variable(var).length {
            return false;
        }
        if assignment.iter().any(|(_, other)| other == word) {
            return false;
        }
        self.crossword.neighbors(var).all(|other| {
            match (assignment.get(other), self.crossword.overlap(var, other)) {
                (Some(theirs), Some((i, j))) => word.letter(i) == theirs.letter(j),
                _ => true,
            }
        })
    }

    /// Choose the unassigned variable with the fewest remaining
    /// candidates, preferring the one crossing the most slots, then the
    /// lowest token.
    pub fn select_unassigned_variable(&self, assignment: &Assignment) -> Option<VarToken> {
        self.crossword
            .var_tokens()
            .filter(|&var| !assignment.contains(var))
            .min_by_key(|&var| (self.domains.count(var), Reverse(self.crossword.degree(var))))
    }

    /// The candidates of `var`, least constraining first.
    ///
    /// A candidate rules out every word of an unassigned neighbor that
    /// disagrees with it in the shared cell; a word too short to reach the
    /// cell rules out everything.  Ties keep the domain's lexicographic
    /// order.
    pub fn order_domain_values(&self, var: VarToken, assignment: &Assignment) -> Vec<Word> {
        let domain = self.domains.get(var);
        if !self.options.least_constraining_value {
            return domain.iter().cloned().collect();
        }

        // For each open neighbor: the index into `var`'s word, the size of
        // the neighbor's domain, and how many of its words carry each
        // letter at the shared cell.
        let neighbors: Vec<(usize, usize, HashMap<char, usize>)> = self
            .crossword
            .neighbors(var)
            .filter(|&other| !assignment.contains(other))
            .filter_map(|other| {
                let (i, j) = self.crossword.overlap(var, other)?;
                let words = self.domains.get(other);
                let mut letters = HashMap::new();
                for letter in words.iter().filter_map(|word| word.get(j)) {
                    *letters.entry(letter).or_insert(0) += 1;
                }
                Some((i, words.len(), letters))
            })
            .collect();

        let mut ranked: Vec<(usize, Word)> = domain
            .iter()
            .map(|word| {
                let ruled_out = neighbors
                    .iter()
                    .map(|(i, total, letters)| {
                        let kept = word.get(*i).and_then(|c| letters.get(&c).copied());
                        total - kept.unwrap_or(0)
                    })
                    .sum::<usize>();
                (ruled_out, word.clone())
            })
            .collect();

        ranked.sort_by_key(|&(ruled_out, _)| ruled_out);
        ranked.into_iter().map(|(_, word)| word).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{Assignment, CrosswordSearch};
    use crate::{Crossword, Direction, Domains, SolverOptions, Word};

    fn grid() -> Crossword {
        Crossword::new(
            "____\n_##_\n____\n",
            "cart\nwife\nfish\ncow\ntoe\ndog\nbe\n",
        )
        .unwrap()
    }

    #[test]
    fn test_assignment_bookkeeping() {
        let crossword = grid();
        let vars: Vec<_> = crossword.var_tokens().collect();
        let mut assignment = Assignment::new(&crossword);
        assert!(assignment.is_empty());

        assert_eq!(assignment.insert(vars[0], Word::new("CART")), None);
        assert_eq!(assignment.insert(vars[0], Word::new("FISH")), Some(Word::new("CART")));
        assert_eq!(assignment.len(), 1);
        assert!(assignment.contains(vars[0]));
        assert!(assignment.clone().into_solution().is_none());

        assert_eq!(assignment.remove(vars[0]), Some(Word::new("FISH")));
        assert_eq!(assignment.remove(vars[0]), None);
        assert!(assignment.is_empty());
    }

    #[test]
    fn test_assignment_complete() {
        let crossword = grid();
        let mut domains = Domains::new(&crossword);
        domains.enforce_node_consistency();
        let search = CrosswordSearch::new(&domains, SolverOptions::default());

        let mut assignment = Assignment::new(&crossword);
        for (var, word) in crossword.var_tokens().zip(["CART", "WIFE", "COW", "TOE"]) {
            assert!(!search.assignment_complete(&assignment));
            assignment.insert(var, Word::new(word));
        }
        assert!(search.assignment_complete(&assignment));

        let solution = assignment.into_solution().unwrap();
        assert_eq!(solution.len(), 4);
    }

    #[test]
    fn test_consistent() {
        let crossword = grid();
        let top = crossword.find(0, 0, Direction::Across).unwrap();
        let bottom = crossword.find(2, 0, Direction::Across).unwrap();
        let left = crossword.find(0, 0, Direction::Down).unwrap();
        let domains = Domains::new(&crossword);
        let search = CrosswordSearch::new(&domains, SolverOptions::default());

        let mut assignment = Assignment::new(&crossword);
        assignment.insert(top, Word::new("CART"));
        assignment.insert(left, Word::new("COW"));
        assert!(search.consistent(&assignment));

        // Wrong letter in the shared cell.
        assignment.insert(left, Word::new("DOG"));
        assert!(!search.consistent(&assignment));

        // Wrong length.
        assignment.insert(left, Word::new("CO"));
        assert!(!search.consistent(&assignment));

        // The same word twice.
        assignment.insert(left, Word::new("COW"));
        assignment.insert(bottom, Word::new("CART"));
        assert!(!search.consistent(&assignment));
    }

    #[test]
    fn test_select_unassigned_variable() {
        let crossword = grid();
        let top = crossword.find(0, 0, Direction::Across).unwrap();
        let bottom = crossword.find(2, 0, Direction::Across).unwrap();
        let left = crossword.find(0, 0, Direction::Down).unwrap();
        let right = crossword.find(0, 3, Direction::Down).unwrap();

        let mut domains = Domains::new(&crossword);
        domains.enforce_node_consistency();
        let search = CrosswordSearch::new(&domains, SolverOptions::default());

        // Every slot has three candidates and two neighbors.
        let mut assignment = Assignment::new(&crossword);
        assert_eq!(search.select_unassigned_variable(&assignment), Some(top));

        assignment.insert(top, Word::new("CART"));
        assert_eq!(search.select_unassigned_variable(&assignment), Some(bottom));

        domains.sets[right.index()].remove(&Word::new("DOG"));
        let search = CrosswordSearch::new(&domains, SolverOptions::default());
        assert_eq!(search.select_unassigned_variable(&assignment), Some(right));

        assignment.insert(bottom, Word::new("WIFE"));
        assignment.insert(left, Word::new("COW"));
        assignment.insert(right, Word::new("TOE"));
        assert_eq!(search.select_unassigned_variable(&assignment), None);
    }

    #[test]
    fn test_select_prefers_higher_degree() {
        // The down slot crosses both across slots.
        let crossword = Crossword::new("___\n#_#\n___\n", "abc\ndef\n").unwrap();
        let down = crossword.find(0, 1, Direction::Down).unwrap();
        let mut domains = Domains::new(&crossword);
        domains.enforce_node_consistency();
        let search = CrosswordSearch::new(&domains, SolverOptions::default());

        let assignment = Assignment::new(&crossword);
        assert_eq!(search.select_unassigned_variable(&assignment), Some(down));
    }

    #[test]
    fn test_order_domain_values() {
        let crossword = Crossword::new("___\n#_#\n#_#\n", "cat\nact\ntic\nabc\n").unwrap();
        let across = crossword.find(0, 0, Direction::Across).unwrap();
        let down = crossword.find(0, 1, Direction::Down).unwrap();
        let mut domains = Domains::new(&crossword);
        domains.enforce_node_consistency();
        let search = CrosswordSearch::new(&domains, SolverOptions::default());

        // Down words start with A, A, C, T.  CAT rules out two of them,
        // ACT three, ABC and TIC all four.
        let assignment = Assignment::new(&crossword);
        let ordered: Vec<String> = search
            .order_domain_values(across, &assignment)
            .iter()
            .map(|w| w.to_string())
            .collect();
        assert_eq!(ordered, vec!["CAT", "ACT", "ABC", "TIC"]);

        // An assigned neighbor no longer constrains anything.
        let mut assignment = Assignment::new(&crossword);
        assignment.insert(down, Word::new("ACT"));
        let ordered: Vec<String> = search
            .order_domain_values(across, &assignment)
            .iter()
            .map(|w| w.to_string())
            .collect();
        assert_eq!(ordered, vec!["ABC", "ACT", "CAT", "TIC"]);
    }

    #[test]
    fn test_order_domain_values_disabled() {
        let crossword = Crossword::new("___\n#_#\n#_#\n", "cat\nact\ntic\nabc\n").unwrap();
        let across = crossword.find(0, 0, Direction::Across).unwrap();
        let mut domains = Domains::new(&crossword);
        domains.enforce_node_consistency();
        let options = SolverOptions {
            least_constraining_value: false,
            ..SolverOptions::default()
        };
        let search = CrosswordSearch::new(&domains, options);

        let ordered: Vec<String> = search
            .order_domain_values(across, &Assignment::new(&crossword))
            .iter()
            .map(|w| w.to_string())
            .collect();
        assert_eq!(ordered, vec!["ABC", "ACT", "CAT", "TIC"]);
    }

    #[test]
    fn test_backtrack() {
        let crossword = grid();
        let mut domains = Domains::new(&crossword);
        domains.enforce_node_consistency();
        let mut search = CrosswordSearch::new(&domains, SolverOptions::default());

        let result = search.backtrack(Assignment::new(&crossword)).unwrap();
        assert!(search.assignment_complete(&result));
        assert!(search.consistent(&result));
        assert!(search.num_guesses() >= 4);

        let top = crossword.find(0, 0, Direction::Across).unwrap();
        assert_eq!(result.get(top), Some(&Word::new("CART")));
    }

    #[test]
    fn test_backtrack_without_node_consistency() {
        let crossword = Crossword::new("___\n#_#\n#_#\n", "cat\nact\na\n").unwrap();
        let across = crossword.find(0, 0, Direction::Across).unwrap();
        let down = crossword.find(0, 1, Direction::Down).unwrap();
        let domains = Domains::new(&crossword);
        let mut search = CrosswordSearch::new(&domains, SolverOptions::default());

        // "A" cannot reach the shared cell, so it rules out every down word.
        let ordered: Vec<String> = search
            .order_domain_values(across, &Assignment::new(&crossword))
            .iter()
            .map(|w| w.to_string())
            .collect();
        assert_eq!(ordered, vec!["CAT", "ACT", "A"]);

        let result = search.backtrack(Assignment::new(&crossword)).unwrap();
        assert!(search.consistent(&result));
        assert_eq!(result.get(across), Some(&Word::new("CAT")));
        assert_eq!(result.get(down), Some(&Word::new("ACT")));
    }
}
