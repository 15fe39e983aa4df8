use thiserror::Error;

pub type Result<T> = std::result::Result<T, MalformedFormulaError>;

/// Structural failure while parsing a formula. Positions are byte offsets
/// into the outermost formula, including inside groups.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MalformedFormulaError {
    #[error("invalid character '{found}' at byte {pos}")]
    InvalidCharacter { pos: usize, found: char },

    #[error("unmatched '(' at byte {pos}")]
    UnmatchedOpen { pos: usize },

    #[error("unmatched ')' at byte {pos}")]
    UnmatchedClose { pos: usize },

    /// Also raised for the second digit of a multi-digit count.
    #[error("digit at byte {pos} has no preceding element or group")]
    DanglingDigit { pos: usize },

    #[error("invalid element symbol '{symbol}' at byte {pos}")]
    InvalidSymbol { pos: usize, symbol: String },

    /// Input handed to single-unit evaluation continues past the first unit.
    #[error("unexpected input after the unit at byte {pos}")]
    TrailingInput { pos: usize },

    #[error("empty group at byte {pos}")]
    EmptyGroup { pos: usize },

    #[error("count at byte {pos} must be greater than zero")]
    ZeroCount { pos: usize },

    #[error("group at byte {pos} exceeds the nesting limit of {limit}")]
    TooDeep { pos: usize, limit: usize },

    #[error("element count overflow")]
    Overflow,
}
