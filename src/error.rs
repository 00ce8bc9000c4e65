use thiserror::Error;

use crate::VarToken;

#[derive(Debug, Error)]
pub enum Error {
    #[error("the domain of {0} was wiped out")]
    Contradiction(VarToken),
    #[error("the crossword structure is empty")]
    EmptyStructure,
    #[error("variable {0} has length zero")]
    ZeroLength(VarToken),
    #[error("variables {0} and {1} describe the same slot")]
    DuplicateVariable(VarToken, VarToken),
    #[error("variables {0} and {1} share more than one cell")]
    AmbiguousOverlap(VarToken, VarToken),
    #[error("IO error, more details: {0}")]
    Io(#[from] std::io::Error),
}
