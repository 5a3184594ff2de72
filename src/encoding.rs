//! Embedding integer messages as curve points.
//!
//! Two swappable strategies, each trading recoverability against
//! simplicity:
//!
//! - [`Embedding::Koblitz`] multiplies the message by a padding factor and
//!   probes a small window of candidate x-coordinates. Recovery is exact:
//!   `m = floor(x / factor)`.
//! - [`Embedding::DirectSearch`] walks x = m, m+1, m+2, … until a valid
//!   coordinate appears. Recovery is exact only when the offset used is
//!   transported out-of-band; without it the caller gets `x` back as an
//!   approximation. That gap is a documented property of the strategy, not
//!   a bug to fix here.
//!
//! Both share one predicate: x is a valid coordinate iff x³ + ax + b has a
//! square root mod p.

use num_bigint::BigInt;
use num_traits::Signed;

use crate::curve::{CurveParams, Point};
use crate::error::{Error, Result};
use crate::modular::mod_sqrt;
use crate::trace::{trace_step, Trace};

/// Default padding factor for Koblitz embedding. Each message gets `K`
/// candidate x-coordinates, so failure probability is roughly 2⁻ᴷ.
pub const DEFAULT_KOBLITZ_FACTOR: u64 = 20;

/// Default attempt bound for direct-search embedding.
pub const DEFAULT_DIRECT_ATTEMPTS: u64 = 100;

/// A message embedded as a curve point, along with whatever bookkeeping the
/// strategy needs for recovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedPoint {
    pub point: Point,
    /// Offset consumed by the search: `None` for Koblitz (the point is
    /// self-describing), `Some(j)` for direct search (required for exact
    /// recovery).
    pub offset: Option<BigInt>,
}

/// Strategy for mapping an integer message to a curve point and back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Embedding {
    /// Probe x = m·factor + j for j in [0, factor).
    Koblitz { factor: u64 },
    /// Probe x = m + j for j in [0, max_attempts).
    DirectSearch { max_attempts: u64 },
}

impl Default for Embedding {
    fn default() -> Self {
        Embedding::Koblitz {
            factor: DEFAULT_KOBLITZ_FACTOR,
        }
    }
}

impl Embedding {
    /// Direct search with the default attempt bound.
    pub fn direct() -> Self {
        Embedding::DirectSearch {
            max_attempts: DEFAULT_DIRECT_ATTEMPTS,
        }
    }

    /// Embed a non-negative message as a point on `curve`.
    ///
    /// Fails with [`Error::EmbeddingExhausted`] when no candidate
    /// x-coordinate in the strategy's window yields a quadratic residue.
    pub fn embed(
        &self,
        message: &BigInt,
        curve: &CurveParams,
        mut trace: Option<&mut Trace>,
    ) -> Result<EmbeddedPoint> {
        if message.is_negative() {
            return Err(Error::MalformedInput(format!(
                "message must be non-negative, got {message}"
            )));
        }

        let (base_x, attempts) = match self {
            Embedding::Koblitz { factor } => {
                trace_step!(
                    trace,
                    "Koblitz embedding of m = {message} with factor K = {factor}"
                );
                (message * BigInt::from(*factor), *factor)
            }
            Embedding::DirectSearch { max_attempts } => {
                trace_step!(
                    trace,
                    "direct-search embedding of m = {message}, up to {max_attempts} attempts"
                );
                (message.clone(), *max_attempts)
            }
        };

        for j in 0..attempts {
            let x = &base_x + BigInt::from(j);
            if x >= curve.p {
                break;
            }
            let rhs = curve.equation_rhs(&x);
            match mod_sqrt(&rhs, &curve.p) {
                Some(y) => {
                    trace_step!(
                        trace,
                        "x = {x}: rhs = {rhs} is a residue, y = {y}; embedded as ({x}, {y})"
                    );
                    let offset = match self {
                        Embedding::Koblitz { .. } => None,
                        Embedding::DirectSearch { .. } => Some(BigInt::from(j)),
                    };
                    return Ok(EmbeddedPoint {
                        point: Point::Affine { x, y },
                        offset,
                    });
                }
                None => {
                    trace_step!(trace, "x = {x}: rhs = {rhs} is a non-residue, skipping");
                }
            }
        }

        Err(Error::EmbeddingExhausted {
            message: message.clone(),
            attempts,
        })
    }

    /// Recover the message from an embedded point.
    ///
    /// For direct search, `offset` is the value returned at embedding time;
    /// pass `None` to accept the x-coordinate itself as an approximation.
    pub fn recover(&self, point: &Point, offset: Option<&BigInt>) -> Result<BigInt> {
        let x = point.x().ok_or_else(|| {
            Error::MalformedInput("cannot recover a message from the point at infinity".into())
        })?;
        match self {
            Embedding::Koblitz { factor } => Ok(x / BigInt::from(*factor)),
            Embedding::DirectSearch { .. } => match offset {
                Some(j) => Ok(x - j),
                None => Ok(x.clone()),
            },
        }
    }
}

/// True if `x` is a valid x-coordinate on `curve`, i.e. the curve equation's
/// right-hand side is a quadratic residue.
pub fn is_valid_x(x: &BigInt, curve: &CurveParams) -> bool {
    !x.is_negative() && x < &curve.p && mod_sqrt(&curve.equation_rhs(x), &curve.p).is_some()
}
