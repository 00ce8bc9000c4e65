//! Laying a filling out on the grid.

use std::fmt;

use crate::{Assignment, Crossword, Solution, VarToken, Word};

/// The letters of an assignment laid out on the grid.
pub struct LetterGrid<'a> {
    crossword: &'a Crossword,
    letters: Vec<Vec<Option<char>>>,
}

impl<'a> LetterGrid<'a> {
    /// Lay out a possibly partial assignment.
    pub fn new(crossword: &'a Crossword, assignment: &Assignment) -> Self {
        Self::build(crossword, assignment.iter())
    }

    /// Lay out a complete solution.
    ///
    /// # Examples
    ///
    /// ```
    /// use crossword_solver::{Crossword, LetterGrid, Solver};
    ///
    /// let crossword = Crossword::new("___\n#_#\n", "cab\nab\n").unwrap();
    /// let solution = Solver::new(&crossword).solve().unwrap();
    /// let grid = LetterGrid::from_solution(&crossword, &solution);
    /// assert_eq!(grid.to_string(), "CAB\n█B█\n");
    /// ```
    pub fn from_solution(crossword: &'a Crossword, solution: &Solution) -> Self {
        Self::build(crossword, solution.iter())
    }

    fn build<'w, I>(crossword: &'a Crossword, words: I) -> Self
    where
        I: Iterator<Item = (VarToken, &'w Word)>,
    {
        let mut letters = vec![vec![None; crossword.width()]; crossword.height()];
        for (var, word) in words {
            for (letter, (row, col)) in word.letters().zip(crossword.variable(var).cells()) {
                letters[row][col] = Some(letter);
            }
        }

        LetterGrid { crossword, letters }
    }

    pub fn letter(&self, row: usize, col: usize) -> Option<char> {
        self.letters.get(row)?.get(col).copied().flatten()
    }
}

impl fmt::Display for LetterGrid<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, cells) in self.letters.iter().enumerate() {
            for (col, letter) in cells.iter().enumerate() {
                if self.crossword.is_open(row, col) {
                    write!(f, "{}", letter.unwrap_or(' '))?;
                } else {
                    write!(f, "█")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
