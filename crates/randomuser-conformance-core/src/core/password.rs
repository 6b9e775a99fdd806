// crates/randomuser-conformance-core/src/core/password.rs
// ============================================================================
// Module: Password Policy DSL
// Description: Parser and checker for the `password` query parameter.
// Purpose: Model `upper,lower,1-16` style policies as typed values.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! The Random User API accepts a compact password policy: a comma-separated
//! list of character classes followed by an optional length token.
//!
//! ### Grammar (informal)
//! - **Classes**: `upper`, `lower`, `number`, `special` (case-insensitive)
//! - **Length**: `N` (exact) or `MIN-MAX` (inclusive range), last token only
//! - **Default length**: `8-64` when no length token is present
//!
//! ### Example
//!
//! ```
//! use randomuser_conformance_core::LengthBound;
//! use randomuser_conformance_core::PasswordPolicy;
//!
//! let policy = PasswordPolicy::parse("special,32").unwrap();
//! assert_eq!(policy.length(), LengthBound::Exact(32));
//! assert!(policy.check(&"!".repeat(32)).is_ok());
//! ```

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use thiserror::Error;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum accepted policy input size in bytes.
const MAX_POLICY_INPUT_BYTES: usize = 256;
/// Minimum length applied when the policy has no length token.
pub const DEFAULT_MIN_LENGTH: usize = 8;
/// Maximum length applied when the policy has no length token.
pub const DEFAULT_MAX_LENGTH: usize = 64;

/// Printable ASCII punctuation plus space, as generated for `special`.
pub const SPECIAL_CHARS: &str = " !\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

// ============================================================================
// SECTION: Types
// ============================================================================

/// Character class token of the password policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CharClass {
    /// `A-Z`.
    Upper,
    /// `a-z`.
    Lower,
    /// `0-9`.
    Number,
    /// [`SPECIAL_CHARS`].
    Special,
}

impl CharClass {
    /// Returns the DSL token for the class.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Upper => "upper",
            Self::Lower => "lower",
            Self::Number => "number",
            Self::Special => "special",
        }
    }

    /// Returns true when `ch` belongs to this class.
    #[must_use]
    pub fn contains(self, ch: char) -> bool {
        match self {
            Self::Upper => ch.is_ascii_uppercase(),
            Self::Lower => ch.is_ascii_lowercase(),
            Self::Number => ch.is_ascii_digit(),
            Self::Special => SPECIAL_CHARS.contains(ch),
        }
    }

    /// Parses a class token, ignoring ASCII case.
    fn from_token(token: &str) -> Option<Self> {
        [Self::Upper, Self::Lower, Self::Number, Self::Special]
            .into_iter()
            .find(|class| class.as_str().eq_ignore_ascii_case(token))
    }
}

/// Length constraint of a password policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthBound {
    /// Exactly `n` characters.
    Exact(usize),
    /// Between `min` and `max` characters, inclusive.
    Range {
        /// Inclusive lower bound.
        min: usize,
        /// Inclusive upper bound.
        max: usize,
    },
}

impl LengthBound {
    /// Returns the inclusive `(min, max)` pair.
    #[must_use]
    pub const fn bounds(self) -> (usize, usize) {
        match self {
            Self::Exact(n) => (n, n),
            Self::Range {
                min,
                max,
            } => (min, max),
        }
    }

    /// Returns true when `len` satisfies the bound.
    #[must_use]
    pub const fn accepts(self, len: usize) -> bool {
        let (min, max) = self.bounds();
        len >= min && len <= max
    }
}

impl Default for LengthBound {
    fn default() -> Self {
        Self::Range {
            min: DEFAULT_MIN_LENGTH,
            max: DEFAULT_MAX_LENGTH,
        }
    }
}

impl fmt::Display for LengthBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(n) => write!(f, "{n}"),
            Self::Range {
                min,
                max,
            } => write!(f, "{min}-{max}"),
        }
    }
}

/// Parsed password policy.
///
/// # Invariants
/// - `classes` is non-empty, duplicate-free, and keeps declaration order.
/// - `length` has `min <= max` and `max >= 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordPolicy {
    /// Allowed character classes.
    classes: Vec<CharClass>,
    /// Length constraint (explicit or default).
    length: LengthBound,
    /// True when the length token was present in the input.
    explicit_length: bool,
}

/// Policy parse failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    /// Input was empty or whitespace.
    #[error("password policy is empty")]
    EmptyInput,
    /// Input exceeded the size limit.
    #[error("password policy exceeds size limit: {actual_bytes} bytes (max {max_bytes})")]
    InputTooLarge {
        /// Maximum allowed bytes.
        max_bytes: usize,
        /// Actual input length in bytes.
        actual_bytes: usize,
    },
    /// Token is neither a class nor a length.
    #[error("unknown password policy token `{token}` at {position}")]
    UnknownToken {
        /// Offending token.
        token: String,
        /// Byte offset in the input.
        position: usize,
    },
    /// Length token appears before a class token or more than once.
    #[error("length token `{token}` at {position} must be the last token")]
    MisplacedLength {
        /// Offending token.
        token: String,
        /// Byte offset in the input.
        position: usize,
    },
    /// Numeric part failed to parse.
    #[error("invalid length `{raw}` at {position}")]
    InvalidNumber {
        /// Raw numeric text.
        raw: String,
        /// Byte offset in the input.
        position: usize,
    },
    /// Range minimum exceeds maximum.
    #[error("length range {min}-{max} is inverted")]
    InvertedRange {
        /// Lower bound.
        min: usize,
        /// Upper bound.
        max: usize,
    },
    /// Length allows no characters at all.
    #[error("password length must allow at least one character")]
    ZeroLength,
    /// No character class was named.
    #[error("password policy names no character classes")]
    NoCharClasses,
}

/// Reason a generated password fails its policy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordViolation {
    /// Length is outside the bound.
    #[error("length {actual} outside {bound}")]
    Length {
        /// Observed length in characters.
        actual: usize,
        /// Expected bound.
        bound: LengthBound,
    },
    /// Character outside the allowed class union.
    #[error("character `{ch}` at index {index} is outside the allowed classes")]
    DisallowedChar {
        /// Offending character.
        ch: char,
        /// Character index in the password.
        index: usize,
    },
}

// ============================================================================
// SECTION: Parsing
// ============================================================================

impl PasswordPolicy {
    /// Parses a policy string such as `upper,lower,1-16`.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError`] for empty or oversized input, unknown tokens,
    /// misplaced or malformed length tokens, and policies without classes.
    pub fn parse(input: &str) -> Result<Self, PolicyError> {
        if input.len() > MAX_POLICY_INPUT_BYTES {
            return Err(PolicyError::InputTooLarge {
                max_bytes: MAX_POLICY_INPUT_BYTES,
                actual_bytes: input.len(),
            });
        }
        if input.trim().is_empty() {
            return Err(PolicyError::EmptyInput);
        }

        let mut classes = Vec::new();
        let mut length: Option<LengthBound> = None;
        for (token, position) in split_tokens(input) {
            if token.is_empty() {
                continue;
            }
            if let Some(class) = CharClass::from_token(token) {
                if length.is_some() {
                    return Err(PolicyError::MisplacedLength {
                        token: token.to_string(),
                        position,
                    });
                }
                if !classes.contains(&class) {
                    classes.push(class);
                }
                continue;
            }
            if token.starts_with(|ch: char| ch.is_ascii_digit()) {
                if length.is_some() {
                    return Err(PolicyError::MisplacedLength {
                        token: token.to_string(),
                        position,
                    });
                }
                length = Some(parse_length(token, position)?);
                continue;
            }
            return Err(PolicyError::UnknownToken {
                token: token.to_string(),
                position,
            });
        }

        if classes.is_empty() {
            return Err(PolicyError::NoCharClasses);
        }
        Ok(Self {
            classes,
            explicit_length: length.is_some(),
            length: length.unwrap_or_default(),
        })
    }

    /// Returns the allowed character classes in declaration order.
    #[must_use]
    pub fn classes(&self) -> &[CharClass] {
        &self.classes
    }

    /// Returns the effective length bound.
    #[must_use]
    pub const fn length(&self) -> LengthBound {
        self.length
    }

    /// Returns true when `ch` belongs to any allowed class.
    #[must_use]
    pub fn allows(&self, ch: char) -> bool {
        self.classes.iter().any(|class| class.contains(ch))
    }

    /// Checks a generated password against the policy.
    ///
    /// # Errors
    ///
    /// Returns the first [`PasswordViolation`] found: length first, then
    /// characters in order.
    pub fn check(&self, password: &str) -> Result<(), PasswordViolation> {
        let actual = password.chars().count();
        if !self.length.accepts(actual) {
            return Err(PasswordViolation::Length {
                actual,
                bound: self.length,
            });
        }
        for (index, ch) in password.chars().enumerate() {
            if !self.allows(ch) {
                return Err(PasswordViolation::DisallowedChar {
                    ch,
                    index,
                });
            }
        }
        Ok(())
    }
}

impl fmt::Display for PasswordPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.classes.iter().map(|class| class.as_str()).collect();
        f.write_str(&names.join(","))?;
        if self.explicit_length {
            write!(f, ",{}", self.length)?;
        }
        Ok(())
    }
}

/// Splits the input on commas, yielding trimmed tokens with byte offsets.
fn split_tokens(input: &str) -> impl Iterator<Item = (&str, usize)> {
    let mut offset = 0;
    input.split(',').map(move |raw| {
        let start = offset;
        offset += raw.len() + 1;
        let leading = raw.len() - raw.trim_start().len();
        (raw.trim(), start + leading)
    })
}

/// Parses `N` or `MIN-MAX` into a length bound.
fn parse_length(token: &str, position: usize) -> Result<LengthBound, PolicyError> {
    let bound = match token.split_once('-') {
        Some((min, max)) => LengthBound::Range {
            min: parse_number(min.trim(), position)?,
            max: parse_number(max.trim(), position)?,
        },
        None => LengthBound::Exact(parse_number(token, position)?),
    };
    let (min, max) = bound.bounds();
    if min > max {
        return Err(PolicyError::InvertedRange {
            min,
            max,
        });
    }
    if max == 0 {
        return Err(PolicyError::ZeroLength);
    }
    Ok(bound)
}

/// Parses a non-negative decimal number.
fn parse_number(raw: &str, position: usize) -> Result<usize, PolicyError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PolicyError::InvalidNumber {
            raw: raw.to_string(),
            position,
        });
    }
    raw.parse().map_err(|_| PolicyError::InvalidNumber {
        raw: raw.to_string(),
        position,
    })
}
