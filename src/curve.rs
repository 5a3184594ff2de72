//! Elliptic-curve point algebra in Short Weierstrass form: y² = x³ + ax + b
//! over a prime field F_p.
//!
//! Implements the chord-tangent law:
//! - distinct P, Q: the line through P and Q meets the curve again at -R,
//!   so P + Q = R
//! - P = Q: the tangent at P meets the curve again at -R, so 2P = R
//! - the point at infinity O is the identity element
//!
//! Every operation is a pure function of its inputs; the engine holds no
//! state between calls.

use std::fmt;

use num_bigint::BigInt;
use num_traits::{Signed, Zero};

use crate::error::{Error, Result};
use crate::modular::{self, mod_inverse, modulo};
use crate::trace::{trace_step, Trace};

/// A point on an elliptic curve: affine coordinates or the point at
/// infinity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Point {
    /// The point at infinity (identity element).
    Infinity,
    /// An affine point (x, y) with both coordinates in `[0, p)`.
    Affine { x: BigInt, y: BigInt },
}

impl Point {
    /// Build an affine point from anything convertible to `BigInt`.
    pub fn affine(x: impl Into<BigInt>, y: impl Into<BigInt>) -> Self {
        Point::Affine {
            x: x.into(),
            y: y.into(),
        }
    }

    /// True for the point at infinity.
    pub fn is_infinity(&self) -> bool {
        matches!(self, Point::Infinity)
    }

    /// The x-coordinate, unless this is the point at infinity.
    pub fn x(&self) -> Option<&BigInt> {
        match self {
            Point::Infinity => None,
            Point::Affine { x, .. } => Some(x),
        }
    }

    /// The y-coordinate, unless this is the point at infinity.
    pub fn y(&self) -> Option<&BigInt> {
        match self {
            Point::Infinity => None,
            Point::Affine { y, .. } => Some(y),
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Point::Infinity => write!(f, "O"),
            Point::Affine { x, y } => write!(f, "({x}, {y})"),
        }
    }
}

/// Parameters of a curve y² = x³ + ax + b over F_p, with a designated
/// generator `g` of claimed order `n`.
///
/// Immutable once constructed; `a` and `b` are reduced mod `p` on
/// construction. Presets from [`CurveParams::toy`] and [`CurveParams::demo`]
/// are trusted as published; user-supplied parameters should go through
/// [`CurveParams::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurveParams {
    pub a: BigInt,
    pub b: BigInt,
    pub p: BigInt,
    pub g: Point,
    pub n: BigInt,
}

impl CurveParams {
    /// Assemble curve parameters, reducing `a` and `b` mod `p`.
    pub fn new(
        a: impl Into<BigInt>,
        b: impl Into<BigInt>,
        p: impl Into<BigInt>,
        g: Point,
        n: impl Into<BigInt>,
    ) -> Self {
        let p = p.into();
        Self {
            a: modulo(&a.into(), &p),
            b: modulo(&b.into(), &p),
            p,
            g,
            n: n.into(),
        }
    }

    /// Toy curve y² = x³ + x + 6 over F_11, generator (2, 4) of order 13.
    /// Small enough to follow every step by hand.
    pub fn toy() -> Self {
        Self::new(1, 6, 11, Point::affine(2, 4), 13)
    }

    /// Demo curve y² = x³ + 2x + 2 over F_1021, generator (5, 195) of
    /// order 526. Large enough that traces stop being hand-checkable but
    /// still far from cryptographic size.
    pub fn demo() -> Self {
        Self::new(2, 2, 1021, Point::affine(5, 195), 526)
    }

    /// Check user-supplied parameters: modulus prime and > 3, coefficients
    /// in range, generator affine and on the curve.
    ///
    /// Presets skip this; anything typed in by a user should not.
    pub fn validate(&self) -> Result<()> {
        if self.p <= BigInt::from(3) {
            return Err(Error::MalformedInput(format!(
                "modulus must exceed 3, got {}",
                self.p
            )));
        }
        if !modular::is_prime(&self.p) {
            return Err(Error::MalformedInput(format!(
                "modulus {} is not prime",
                self.p
            )));
        }
        if self.a.is_negative() || self.a >= self.p || self.b.is_negative() || self.b >= self.p {
            return Err(Error::MalformedInput(
                "curve coefficients must lie in [0, p)".into(),
            ));
        }
        if self.g.is_infinity() {
            return Err(Error::MalformedInput(
                "generator must be an affine point".into(),
            ));
        }
        self.check_point(&self.g)
    }

    /// Right-hand side of the curve equation: x³ + ax + b mod p.
    pub fn equation_rhs(&self, x: &BigInt) -> BigInt {
        modulo(&(x * x * x + &self.a * x + &self.b), &self.p)
    }

    /// True if the point satisfies y² = x³ + ax + b (the point at infinity
    /// always qualifies).
    pub fn is_on_curve(&self, point: &Point) -> bool {
        match point {
            Point::Infinity => true,
            Point::Affine { x, y } => modulo(&(y * y), &self.p) == self.equation_rhs(x),
        }
    }

    /// Like [`is_on_curve`](Self::is_on_curve), but reports the failing
    /// point as an [`Error::InvalidPoint`]. Inputs from outside the engine
    /// should pass through here.
    pub fn check_point(&self, point: &Point) -> Result<()> {
        match point {
            Point::Affine { x, y } if !self.is_on_curve(point) => Err(Error::InvalidPoint {
                x: x.clone(),
                y: y.clone(),
            }),
            _ => Ok(()),
        }
    }

    /// Negate a point: -(x, y) = (x, -y mod p).
    pub fn negate(&self, point: &Point) -> Point {
        match point {
            Point::Infinity => Point::Infinity,
            Point::Affine { x, y } => Point::Affine {
                x: x.clone(),
                y: modulo(&-y, &self.p),
            },
        }
    }

    /// Add two points with the chord-tangent law.
    ///
    /// Case analysis:
    /// - O + Q = Q and P + O = P
    /// - same x, different y (vertical chord): P + Q = O
    /// - P = Q with y = 0 (vertical tangent): 2P = O
    /// - P = Q: slope λ = (3x₁² + a) · (2y₁)⁻¹
    /// - P ≠ Q: slope λ = (y₂ - y₁) · (x₂ - x₁)⁻¹
    ///
    /// then x₃ = λ² - x₁ - x₂ and y₃ = λ(x₁ - x₃) - y₁, both mod p.
    ///
    /// [`Error::NoInverse`] can only surface here if an input was off the
    /// curve or the modulus was not prime; the degenerate denominators are
    /// all excluded above.
    pub fn add(&self, p: &Point, q: &Point, mut trace: Option<&mut Trace>) -> Result<Point> {
        let (x1, y1, x2, y2) = match (p, q) {
            (Point::Infinity, _) => {
                trace_step!(trace, "P = O, so P + Q = Q = {q}");
                return Ok(q.clone());
            }
            (_, Point::Infinity) => {
                trace_step!(trace, "Q = O, so P + Q = P = {p}");
                return Ok(p.clone());
            }
            (Point::Affine { x: x1, y: y1 }, Point::Affine { x: x2, y: y2 }) => (x1, y1, x2, y2),
        };

        if x1 == x2 && y1 != y2 {
            trace_step!(trace, "x1 = x2 with y1 != y2: vertical chord, P + Q = O");
            return Ok(Point::Infinity);
        }

        let lambda = if x1 == x2 {
            // Doubling. A vertical tangent (y = 0) yields the identity.
            if y1.is_zero() {
                trace_step!(trace, "doubling with y1 = 0: vertical tangent, 2P = O");
                return Ok(Point::Infinity);
            }
            let numerator = modulo(&(BigInt::from(3) * x1 * x1 + &self.a), &self.p);
            let inv = mod_inverse(&(BigInt::from(2) * y1), &self.p)?;
            let lambda = modulo(&(&numerator * &inv), &self.p);
            trace_step!(
                trace,
                "tangent slope λ = (3·{x1}² + {}) / (2·{y1}) = {lambda} (mod {})",
                self.a,
                self.p
            );
            lambda
        } else {
            let numerator = y2 - y1;
            let inv = mod_inverse(&(x2 - x1), &self.p)?;
            let lambda = modulo(&(&numerator * &inv), &self.p);
            trace_step!(
                trace,
                "chord slope λ = ({y2} - {y1}) / ({x2} - {x1}) = {lambda} (mod {})",
                self.p
            );
            lambda
        };

        let x3 = modulo(&(&lambda * &lambda - x1 - x2), &self.p);
        let y3 = modulo(&(&lambda * (x1 - &x3) - y1), &self.p);
        trace_step!(trace, "x3 = λ² - x1 - x2 = {x3} (mod {})", self.p);
        trace_step!(trace, "y3 = λ(x1 - x3) - y1 = {y3} (mod {})", self.p);

        Ok(Point::Affine { x: x3, y: y3 })
    }

    /// Scalar multiplication k·P by double-and-add over the bits of `k`,
    /// most significant first: double the accumulator at every bit, add `P`
    /// when the bit is set. O(log k) point operations.
    ///
    /// `k = 0` yields the identity. Negative scalars are rejected with
    /// [`Error::MalformedInput`]; callers wanting `-k·P` should negate the
    /// point instead.
    pub fn multiply(&self, k: &BigInt, p: &Point, mut trace: Option<&mut Trace>) -> Result<Point> {
        if k.is_negative() {
            return Err(Error::MalformedInput(format!(
                "scalar must be non-negative, got {k}"
            )));
        }
        if k.is_zero() {
            trace_step!(trace, "k = 0, so k·P = O");
            return Ok(Point::Infinity);
        }

        let bits = k.bits();
        trace_step!(trace, "computing {k}·P by double-and-add over {bits} bits");

        let mut acc = Point::Infinity;
        for i in (0..bits).rev() {
            acc = self.add(&acc, &acc, None)?;
            if k.bit(i) {
                acc = self.add(&acc, p, None)?;
            }
            trace_step!(
                trace,
                "bit {i} = {}: accumulator = {acc}",
                u8::from(k.bit(i))
            );
        }
        Ok(acc)
    }
}
