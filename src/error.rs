//! Error types shared across the engine.
//!
//! Every fallible operation returns [`Result`]; a failure is terminal for
//! that single request. Messages are written to be shown to the end user
//! verbatim, so each variant carries the values that caused it.

use num_bigint::BigInt;
use thiserror::Error;

/// Errors produced by the arithmetic engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// `gcd(a, m) != 1`, so `a` has no inverse modulo `m`. Usually means a
    /// malformed field element (e.g. zero) or a non-prime modulus.
    #[error("{a} has no inverse modulo {m} (gcd != 1)")]
    NoInverse { a: BigInt, m: BigInt },

    /// `a` is a quadratic non-residue modulo `p`.
    #[error("{a} has no square root modulo {p}")]
    NoSquareRoot { a: BigInt, p: BigInt },

    /// No valid curve point was found within the embedding search bound.
    #[error("no curve point found for message {message} after {attempts} attempts")]
    EmbeddingExhausted { message: BigInt, attempts: u64 },

    /// A point failed the curve equation check.
    #[error("point ({x}, {y}) does not satisfy the curve equation")]
    InvalidPoint { x: BigInt, y: BigInt },

    /// A ciphertext component was degenerate (e.g. the point at infinity).
    #[error("invalid ciphertext: {0}")]
    InvalidCiphertext(String),

    /// Out-of-range or otherwise malformed input at the engine boundary.
    #[error("malformed input: {0}")]
    MalformedInput(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
