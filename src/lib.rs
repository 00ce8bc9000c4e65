//! This crate fills crossword grids with words from a vocabulary.
//! Every slot of the grid is a variable, its candidate words form its
//! domain, and crossing slots must agree on the letter they share.

mod arc;
mod crossword;
mod domains;
mod error;
mod render;
mod search;
mod solver;

use std::fmt;
use std::ops;
use std::rc::Rc;

pub use crossword::{Crossword, Direction, Variable};
pub use domains::Domains;
pub use error::Error;
pub use render::LetterGrid;
pub use search::{Assignment, CrosswordSearch};
pub use solver::{Solver, SolverOptions};

/// A crossword variable token.
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct VarToken(usize);

impl VarToken {
    /// The position of the variable in its crossword.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for VarToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.0)
    }
}

/// A candidate word.
///
/// Letters are addressed by character index, so the length of a word is
/// its number of characters rather than bytes.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Word(Rc<[char]>);

impl Word {
    pub fn new(word: &str) -> Self {
        Word(word.chars().collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The letter at the given index.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of bounds.
    pub fn letter(&self, idx: usize) -> char {
        self.0[idx]
    }

    /// The letter at the given index, or None past the end of the word.
    pub fn get(&self, idx: usize) -> Option<char> {
        self.0.get(idx).copied()
    }

    pub fn letters(&self) -> impl Iterator<Item = char> + '_ {
        self.0.iter().copied()
    }
}

impl From<&str> for Word {
    fn from(word: &str) -> Self {
        Word::new(word)
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.letters() {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

impl PartialEq<&str> for Word {
    fn eq(&self, other: &&str) -> bool {
        self.letters().eq(other.chars())
    }
}

/// A result during propagation (Err = contradiction).
pub type PsResult<T> = Result<T, Error>;

/// A dictionary mapping crossword variables to the words filling them.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Solution {
    words: Vec<Word>,
}

impl Solution {
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn get(&self, var: VarToken) -> Option<&Word> {
        self.words.get(var.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (VarToken, &Word)> + '_ {
        self.words
            .iter()
            .enumerate()
            .map(|(idx, word)| (VarToken(idx), word))
    }
}

impl ops::Index<VarToken> for Solution {
    type Output = Word;
    fn index(&self, var: VarToken) -> &Word {
        let VarToken(idx) = var;
        &self.words[idx]
    }
}
