//! Node consistency, arc consistency, then search.

use log::{debug, info};

use crate::{Assignment, Crossword, CrosswordSearch, Domains, Solution};

/// Switches for the stages of a solve.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SolverOptions {
    /// Run AC-3 before searching.
    pub arc_consistency: bool,

    /// Try the least constraining words first.  Otherwise words are tried
    /// in lexicographic order.
    pub least_constraining_value: bool,
}

impl Default for SolverOptions {
    fn default() -> Self {
        SolverOptions {
            arc_consistency: true,
            least_constraining_value: true,
        }
    }
}

/// Fills a crossword from its vocabulary.
#[derive(Debug)]
pub struct Solver<'a> {
    crossword: &'a Crossword,
    options: SolverOptions,
    domains: Domains<'a>,

    // The number of guesses taken by the last solve.
    num_guesses: u32,
}

impl<'a> Solver<'a> {
    pub fn new(crossword: &'a Crossword) -> Self {
        Self::with_options(crossword, SolverOptions::default())
    }

    pub fn with_options(crossword: &'a Crossword, options: SolverOptions) -> Self {
        Solver {
            crossword,
            options,
            domains: Domains::new(crossword),
            num_guesses: 0,
        }
    }

    pub fn options(&self) -> SolverOptions {
        self.options
    }

    /// The domains as left by the last solve or step.
    pub fn domains(&self) -> &Domains<'a> {
        &self.domains
    }

    /// Find any filling of the crossword.
    ///
    /// Returns None when the vocabulary cannot fill the grid.
    ///
    /// # Examples
    ///
    /// ```
    /// use crossword_solver::{Crossword, Solver};
    ///
    /// let crossword = Crossword::new("___\n", "cat\ndog\n").unwrap();
    /// let solution = Solver::new(&crossword).solve().unwrap();
    /// assert_eq!(solution.len(), 1);
    ///
    /// let crossword = Crossword::new("____\n", "cat\ndog\n").unwrap();
    /// assert!(Solver::new(&crossword).solve().is_none());
    /// ```
    pub fn solve(&mut self) -> Option<Solution> {
        self.num_guesses = 0;
        info!(
            "solving {} slots with {} words",
            self.crossword.num_vars(),
            self.crossword.words().len()
        );

        self.propagate()?;

        let (result, num_guesses) = {
            let mut search = CrosswordSearch::new(&self.domains, self.options);
            let result = search.backtrack(Assignment::new(self.crossword));
            (result, search.num_guesses())
        };
        self.num_guesses = num_guesses;

        match result {
            Some(assignment) => {
                info!("solution found after {} guesses", num_guesses);
                assignment.into_solution()
            }
            None => {
                info!("no solution after {} guesses", num_guesses);
                None
            }
        }
    }

    /// Take any obvious non-choices: enforce node consistency and, if
    /// enabled, arc consistency.  Stops when it must start guessing.
    /// Primarily for testing.
    ///
    /// Returns the pruned domains, or None if a domain was wiped out.
    pub fn step(&mut self) -> Option<&Domains<'a>> {
        self.propagate()?;
        Some(&self.domains)
    }

    /// Get the number of guesses taken to solve the last crossword.
    pub fn num_guesses(&self) -> u32 {
        self.num_guesses
    }

    fn propagate(&mut self) -> Option<()> {
        self.domains = Domains::new(self.crossword);
        self.domains.enforce_node_consistency();

        if self.options.arc_consistency {
            if let Err(err) = self.domains.ac3() {
                info!("no solution: {}", err);
                return None;
            }
        }

        debug!("{:?}", self.domains);
        Some(())
    }
}
