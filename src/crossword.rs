//! The crossword structure: its slots and how they cross.

use bit_set::BitSet;
use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::hash::{Hash, Hasher};
use std::path::Path;

use crate::{Error, PsResult, VarToken, Word};

/// The orientation of a slot.
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Direction {
    Across,
    Down,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Across => write!(f, "across"),
            Direction::Down => write!(f, "down"),
        }
    }
}

/// A slot in the grid.
///
/// Two variables are the same slot when they start in the same cell and
/// run in the same direction; the length does not take part in identity.
#[derive(Clone, Debug)]
pub struct Variable {
    pub row: usize,
    pub col: usize,
    pub direction: Direction,
    pub length: usize,
}

impl Variable {
    pub fn new(row: usize, col: usize, direction: Direction, length: usize) -> Self {
        Variable {
            row,
            col,
            direction,
            length,
        }
    }

    /// The cells covered by the slot, in word order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.length).map(move |k| match self.direction {
            Direction::Across => (self.row, self.col + k),
            Direction::Down => (self.row + k, self.col),
        })
    }
}

impl PartialEq for Variable {
    fn eq(&self, other: &Self) -> bool {
        (self.row, self.col, self.direction) == (other.row, other.col, other.direction)
    }
}

impl Eq for Variable {}

impl Hash for Variable {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.row.hash(state);
        self.col.hash(state);
        self.direction.hash(state);
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}) {} : {}",
            self.row, self.col, self.direction, self.length
        )
    }
}

/// The crossword to be filled.
#[derive(Clone)]
pub struct Crossword {
    width: usize,
    height: usize,

    // Open cells, row by row.
    structure: Vec<Vec<bool>>,

    // The vocabulary every slot starts from.
    words: BTreeSet<Word>,

    variables: Vec<Variable>,

    // For the ordered pair (x, y), entry x * n + y holds the index into
    // x's word and the index into y's word of their shared cell.
    overlaps: Vec<Option<(usize, usize)>>,

    // The variables crossing each variable.
    neighbors: Vec<BitSet>,
}

impl Crossword {
    /// Parse a crossword from its structure and word list.
    ///
    /// In the structure, `_` marks an open cell and anything else is
    /// blocked.  Words are listed one per line.
    ///
    /// # Examples
    ///
    /// ```
    /// use crossword_solver::{Crossword, Direction};
    ///
    /// let crossword = Crossword::new("___\n#_#\n#_#\n", "cat\nact\n").unwrap();
    /// assert_eq!(crossword.num_vars(), 2);
    ///
    /// let across = crossword.find(0, 0, Direction::Across).unwrap();
    /// let down = crossword.find(0, 1, Direction::Down).unwrap();
    /// assert_eq!(crossword.overlap(across, down), Some((1, 0)));
    /// ```
    pub fn new(structure: &str, words: &str) -> PsResult<Self> {
        let lines: Vec<&str> = structure.lines().collect();
        let height = lines.len();
        let width = lines
            .iter()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);

        if height == 0 || width == 0 {
            return Err(Error::EmptyStructure);
        }

        let structure: Vec<Vec<bool>> = lines
            .iter()
            .map(|line| {
                let mut row: Vec<bool> = line.chars().map(|c| c == '_').collect();
                row.resize(width, false);
                row
            })
            .collect();

        let variables = find_variables(&structure, width, height);
        let words = parse_words(words.lines());

        Self::build(width, height, structure, words, variables)
    }

    /// Read a crossword from a structure file and a word list file.
    pub fn open<P: AsRef<Path>, Q: AsRef<Path>>(structure: P, words: Q) -> PsResult<Self> {
        let structure = fs::read_to_string(structure)?;
        let words = fs::read_to_string(words)?;
        Self::new(&structure, &words)
    }

    /// Build a crossword from an explicit list of slots.
    ///
    /// The grid is just large enough to hold every slot; cells not
    /// covered by a slot are blocked.
    pub fn from_variables<I, S>(variables: Vec<Variable>, words: I) -> PsResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut width = 0;
        let mut height = 0;
        for (idx, var) in variables.iter().enumerate() {
            if var.length == 0 {
                return Err(Error::ZeroLength(VarToken(idx)));
            }
            for (row, col) in var.cells() {
                height = height.max(row + 1);
                width = width.max(col + 1);
            }
        }

        let mut structure = vec![vec![false; width]; height];
        for var in variables.iter() {
            for (row, col) in var.cells() {
                structure[row][col] = true;
            }
        }

        let words = parse_words(words.into_iter());
        Self::build(width, height, structure, words, variables)
    }

    fn build(
        width: usize,
        height: usize,
        structure: Vec<Vec<bool>>,
        words: BTreeSet<Word>,
        variables: Vec<Variable>,
    ) -> PsResult<Self> {
        let n = variables.len();
        let mut overlaps = vec![None; n * n];
        let mut neighbors = vec![BitSet::new(); n];

        for (x, a) in variables.iter().enumerate() {
            for (y, b) in variables.iter().enumerate() {
                if x == y {
                    continue;
                }
                if a == b {
                    return Err(Error::DuplicateVariable(VarToken(x), VarToken(y)));
                }

                let shared: Vec<(usize, usize)> = a
                    .cells()
                    .enumerate()
                    .filter_map(|(i, cell)| b.cells().position(|c| c == cell).map(|j| (i, j)))
                    .collect();

                match shared.as_slice() {
                    [] => (),
                    [pair] => {
                        overlaps[x * n + y] = Some(*pair);
                        neighbors[x].insert(y);
                    }
                    _ => return Err(Error::AmbiguousOverlap(VarToken(x), VarToken(y))),
                }
            }
        }

        Ok(Crossword {
            width,
            height,
            structure,
            words,
            variables,
            overlaps,
            neighbors,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Check whether a cell can hold a letter.
    pub fn is_open(&self, row: usize, col: usize) -> bool {
        self.structure
            .get(row)
            .and_then(|cells| cells.get(col))
            .copied()
            .unwrap_or(false)
    }

    pub fn words(&self) -> &BTreeSet<Word> {
        &self.words
    }

    pub fn num_vars(&self) -> usize {
        self.variables.len()
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn var_tokens(&self) -> impl Iterator<Item = VarToken> {
        (0..self.variables.len()).map(VarToken)
    }

    pub fn variable(&self, var: VarToken) -> &Variable {
        let VarToken(idx) = var;
        &self.variables[idx]
    }

    /// Look up the slot starting at a cell in the given direction.
    pub fn find(&self, row: usize, col: usize, direction: Direction) -> Option<VarToken> {
        self.variables
            .iter()
            .position(|v| v.row == row && v.col == col && v.direction == direction)
            .map(VarToken)
    }

    /// The indices into the words of `x` and `y` that must hold the same
    /// letter, or None if the slots do not cross.
    pub fn overlap(&self, x: VarToken, y: VarToken) -> Option<(usize, usize)> {
        self.overlaps[x.0 * self.variables.len() + y.0]
    }

    pub fn neighbors(&self, var: VarToken) -> impl Iterator<Item = VarToken> + '_ {
        self.neighbors[var.0].iter().map(VarToken)
    }

    /// The number of slots crossing the given slot.
    pub fn degree(&self, var: VarToken) -> usize {
        self.neighbors[var.0].len()
    }
}

impl fmt::Debug for Crossword {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "Crossword={{ {}x{}", self.width, self.height)?;
        for (idx, var) in self.variables.iter().enumerate() {
            writeln!(f)?;
            write!(f, "  x{}: {}", idx, var)?;
        }
        write!(f, "}}")?;
        Ok(())
    }
}

/// Find every run of two or more open cells, across slots first.
fn find_variables(structure: &[Vec<bool>], width: usize, height: usize) -> Vec<Variable> {
    let mut variables = Vec::new();

    for direction in [Direction::Across, Direction::Down] {
        for row in 0..height {
            for col in 0..width {
                if !structure[row][col] {
                    continue;
                }

                let starts = match direction {
                    Direction::Across => col == 0 || !structure[row][col - 1],
                    Direction::Down => row == 0 || !structure[row - 1][col],
                };
                if !starts {
                    continue;
                }

                let length = match direction {
                    Direction::Across => (col..width).take_while(|&c| structure[row][c]).count(),
                    Direction::Down => (row..height).take_while(|&r| structure[r][col]).count(),
                };
                if length > 1 {
                    variables.push(Variable::new(row, col, direction, length));
                }
            }
        }
    }

    variables
}

fn parse_words<I, S>(lines: I) -> BTreeSet<Word>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .map(|line| line.as_ref().trim().to_uppercase())
        .filter(|word| !word.is_empty())
        .map(|word| Word::new(&word))
        .collect()
}
