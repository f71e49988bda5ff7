//! Short code encoding and decoding.
//!
//! Short codes are the positional base-*B* representation of the global
//! counter value, written with the digits of a fixed alphabet. Because the
//! counter never repeats a value, the resulting codes never collide and no
//! retry loop is needed.

use std::collections::HashSet;
use std::sync::Arc;

/// Default alphabet: digits, lowercase, then uppercase letters (base 62).
pub const DEFAULT_ALPHABET: &str =
    "0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Codes that collide with fixed routes and therefore are never handed out.
pub const RESERVED_CODES: &[&str] = &["health", "info", "latest", "shorten", "urllist"];

/// Characters that carry meaning inside a URL path or on our routes.
const FORBIDDEN_SYMBOLS: &[char] = &['/', '?', '#', '%', '+', '&', '=', '.', '_', '~'];

/// Errors produced while building an [`Encoder`] or decoding a code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("Alphabet must contain at least 2 symbols, got {0}")]
    AlphabetTooSmall(usize),

    #[error("Alphabet contains duplicate symbol '{0}'")]
    DuplicateSymbol(char),

    #[error("Alphabet symbol '{0}' is not allowed in short codes")]
    ForbiddenSymbol(char),

    #[error("Short code is empty")]
    Empty,

    #[error("Symbol '{0}' is not part of the alphabet")]
    InvalidSymbol(char),

    #[error("Short code is too large to decode")]
    Overflow,
}

/// Converts counter values to short codes and back.
///
/// The alphabet is fixed at construction; its length is the numeral base.
/// Cloning is cheap, the symbol table is shared.
#[derive(Debug, Clone)]
pub struct Encoder {
    symbols: Arc<[char]>,
}

impl Encoder {
    /// Builds an encoder over `alphabet`.
    ///
    /// # Errors
    ///
    /// - [`CodecError::AlphabetTooSmall`] for fewer than 2 symbols
    /// - [`CodecError::DuplicateSymbol`] if a symbol repeats
    /// - [`CodecError::ForbiddenSymbol`] for non-ASCII, whitespace, control or
    ///   URL-significant symbols
    pub fn new(alphabet: &str) -> Result<Self, CodecError> {
        let symbols: Vec<char> = alphabet.chars().collect();

        if symbols.len() < 2 {
            return Err(CodecError::AlphabetTooSmall(symbols.len()));
        }

        let mut seen = HashSet::with_capacity(symbols.len());
        for &c in &symbols {
            if !c.is_ascii_graphic() || FORBIDDEN_SYMBOLS.contains(&c) {
                return Err(CodecError::ForbiddenSymbol(c));
            }
            if !seen.insert(c) {
                return Err(CodecError::DuplicateSymbol(c));
            }
        }

        Ok(Self {
            symbols: symbols.into(),
        })
    }

    /// Numeral base of this encoder.
    pub fn base(&self) -> u64 {
        self.symbols.len() as u64
    }

    /// The alphabet as a string, in digit order.
    pub fn alphabet(&self) -> String {
        self.symbols.iter().collect()
    }

    /// Encodes `n`, most significant digit first.
    ///
    /// `0` encodes to the first alphabet symbol; no other output has a
    /// leading zero digit.
    pub fn encode(&self, mut n: u64) -> String {
        let base = self.base();
        let mut digits = Vec::new();

        loop {
            digits.push(self.symbols[(n % base) as usize]);
            n /= base;
            if n == 0 {
                break;
            }
        }

        digits.iter().rev().collect()
    }

    /// Decodes a short code back to its counter value.
    ///
    /// # Errors
    ///
    /// - [`CodecError::Empty`] for an empty string
    /// - [`CodecError::InvalidSymbol`] for a symbol outside the alphabet
    /// - [`CodecError::Overflow`] if the value does not fit in `u64`
    pub fn decode(&self, code: &str) -> Result<u64, CodecError> {
        if code.is_empty() {
            return Err(CodecError::Empty);
        }

        let base = self.base();
        code.chars().try_fold(0u64, |acc, c| {
            let digit = self
                .symbols
                .iter()
                .position(|&s| s == c)
                .ok_or(CodecError::InvalidSymbol(c))?;

            acc.checked_mul(base)
                .and_then(|v| v.checked_add(digit as u64))
                .ok_or(CodecError::Overflow)
        })
    }

    /// Returns true if every character of `text` is an alphabet symbol.
    pub fn can_produce(&self, text: &str) -> bool {
        !text.is_empty() && text.chars().all(|c| self.symbols.contains(&c))
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self {
            symbols: DEFAULT_ALPHABET.chars().collect::<Vec<_>>().into(),
        }
    }
}

/// Returns true if `code` is reserved for a fixed route.
pub fn is_reserved(code: &str) -> bool {
    RESERVED_CODES.contains(&code)
}
