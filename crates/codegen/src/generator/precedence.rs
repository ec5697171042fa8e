//! # Operator Precedence Table
//!
//! Binding strengths for generated C expressions, ordered from tightest
//! (`Atomic`) to loosest (`None`). The numeric levels match the table the
//! original block editor used, so expression blocks ported from it keep
//! their exact parenthesization behavior.

use serde::{Deserialize, Serialize};

use super::error::{GenError, Result};

/// How tightly a generated expression binds.
///
/// An expression fragment carries its own level; the consumer wraps it in
/// parentheses when it binds looser than the slot it is substituted into
/// requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Precedence {
    /// Literals, identifiers, fully-parenthesized calls.
    Atomic = 0,
    /// `expr++`, `expr--`, `()`, `[]`, `.`
    UnaryPostfix = 1,
    /// `-expr`, `!expr`, `~expr`, casts
    UnaryPrefix = 2,
    /// `*`, `/`, `%`
    Multiplicative = 3,
    /// `+`, `-`
    Additive = 4,
    /// `<<`, `>>`
    Shift = 5,
    /// `<`, `<=`, `>`, `>=`
    Relational = 6,
    /// `==`, `!=`
    Equality = 7,
    BitwiseAnd = 8,
    BitwiseXor = 9,
    BitwiseOr = 10,
    LogicalAnd = 11,
    LogicalOr = 12,
    /// `?:`
    Conditional = 13,
    Assignment = 14,
    /// No binding at all; always safe as a wrapping requirement, never safe
    /// as a fragment level inside a tighter slot.
    None = 99,
}

impl Precedence {
    /// Numeric level, higher meaning looser-binding.
    pub fn level(self) -> u8 {
        self as u8
    }

    /// Look up a level from its numeric value, e.g. when a block tree
    /// serialized by an older editor carries raw levels.
    ///
    /// Fails loudly on anything outside the table rather than defaulting.
    pub fn from_level(level: u8) -> Result<Self> {
        let precedence = match level {
            0 => Self::Atomic,
            1 => Self::UnaryPostfix,
            2 => Self::UnaryPrefix,
            3 => Self::Multiplicative,
            4 => Self::Additive,
            5 => Self::Shift,
            6 => Self::Relational,
            7 => Self::Equality,
            8 => Self::BitwiseAnd,
            9 => Self::BitwiseXor,
            10 => Self::BitwiseOr,
            11 => Self::LogicalAnd,
            12 => Self::LogicalOr,
            13 => Self::Conditional,
            14 => Self::Assignment,
            99 => Self::None,
            other => return Err(GenError::UnrecognizedPrecedence(other)),
        };
        Ok(precedence)
    }

    /// Whether an expression at this level needs parentheses when placed in
    /// a slot requiring at least `required` binding strength.
    pub fn needs_parens(self, required: Precedence) -> bool {
        self.level() > required.level()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tighter_levels_never_wrap() {
        assert!(!Precedence::Atomic.needs_parens(Precedence::UnaryPostfix));
        assert!(!Precedence::Additive.needs_parens(Precedence::Additive));
        assert!(!Precedence::Assignment.needs_parens(Precedence::None));
    }

    #[test]
    fn looser_levels_wrap() {
        assert!(Precedence::Additive.needs_parens(Precedence::Multiplicative));
        assert!(Precedence::None.needs_parens(Precedence::Assignment));
        assert!(Precedence::LogicalOr.needs_parens(Precedence::UnaryPostfix));
    }

    #[test]
    fn level_round_trip() {
        for precedence in [
            Precedence::Atomic,
            Precedence::Multiplicative,
            Precedence::Conditional,
            Precedence::None,
        ] {
            assert_eq!(Precedence::from_level(precedence.level()).unwrap(), precedence);
        }
    }

    #[test]
    fn unknown_level_fails_loudly() {
        assert_eq!(
            Precedence::from_level(42),
            Err(GenError::UnrecognizedPrecedence(42))
        );
    }
}
