//! All kinds of errors in this crate.

use crate::cells::Coord;
use ca_rules::ParseRuleError;
use displaydoc::Display;
use thiserror::Error;

/// All kinds of errors in this crate.
#[derive(Clone, Debug, PartialEq, Eq, Display, Error)]
pub enum Error {
    /// Cell at {0:?} is outside the world.
    OutOfBounds(Coord),
    /// Invalid rule: {0:?}.
    ParseRule(#[from] ParseRuleError),
    /// Unknown pattern: {0:?}.
    UnknownPattern(String),
    /// Unknown color: {0:?}.
    UnknownColor(String),
    /// Cell size and delay should be positive.
    NonPositive,
}
