//! # EC-ElGamal: educational elliptic-curve ElGamal encryption
//!
//! A small engine for elliptic-curve arithmetic over prime fields and the
//! ElGamal encrypt/decrypt protocol built on top of it. Everything is
//! arbitrary-precision, everything is pure, and every operation can emit a
//! step-by-step trace for display.
//!
//! ## Features
//!
//! - **Modular arithmetic**: canonical reduction, extended-Euclid inverses,
//!   square-and-multiply exponentiation, modular square roots
//! - **Point algebra**: chord-tangent addition, double-and-add scalar
//!   multiplication over y² = x³ + ax + b (mod p)
//! - **Message embedding**: Koblitz and direct-search strategies for mapping
//!   integers onto curve points
//! - **ElGamal**: key derivation, encryption, decryption, with typed errors
//!   for every failure mode
//!
//! ⚠ None of this is constant-time or side-channel resistant. It exists to
//! make the algebra visible, not to protect secrets.
//!
//! ## Quick start
//!
//! ```rust
//! use ec_elgamal::{decrypt, encrypt, CurveParams, Embedding, KeyPair};
//! use num_bigint::BigInt;
//!
//! let curve = CurveParams::demo();
//! let embedding = Embedding::default();
//!
//! // Embed the message 42 as a curve point.
//! let pm = embedding.embed(&BigInt::from(42), &curve, None)?.point;
//!
//! // Keys and a (fixed, for the example) ephemeral scalar.
//! let keys = KeyPair::derive(BigInt::from(15), &curve, None)?;
//! let ct = encrypt(&pm, &keys.public, &BigInt::from(27), &curve, None)?;
//!
//! let recovered = decrypt(&ct, &keys.private, &curve, None)?;
//! assert_eq!(embedding.recover(&recovered, None)?, BigInt::from(42));
//! # Ok::<(), ec_elgamal::Error>(())
//! ```
//!
//! ## Module overview
//!
//! - [`modular`] - modular arithmetic over `BigInt`
//! - [`curve`] - curve parameters, points, and the group law
//! - [`encoding`] - plaintext-to-point embedding strategies
//! - [`elgamal`] - the encrypt/decrypt protocol
//! - [`trace`] - per-call step traces
//! - [`error`] - typed failures

pub mod curve;
pub mod elgamal;
pub mod encoding;
pub mod error;
pub mod modular;
pub mod trace;

pub use curve::{CurveParams, Point};
pub use elgamal::{decrypt, encrypt, random_scalar, Ciphertext, KeyPair};
pub use encoding::{EmbeddedPoint, Embedding};
pub use error::{Error, Result};
pub use trace::Trace;
