//! ElGamal encryption over an elliptic-curve group.
//!
//! The protocol, for curve parameters with generator G of order n:
//!
//! - key generation: private scalar d, public key Q = d·G
//! - encrypt(Pm, Q, k): C1 = k·G, shared secret S = k·Q, C2 = Pm + S
//! - decrypt(C1, C2, d): S = d·C1 (= d·k·G = k·Q), Pm = C2 + (-S)
//!
//! The ephemeral scalar `k` must be fresh for every encryption; reusing it
//! lets an eavesdropper relate two ciphertexts. The engine does not enforce
//! freshness, it only provides [`random_scalar`] to make choosing well easy.
//!
//! Nothing here is constant-time; this is classroom cryptography over small
//! fields, not a production scheme.

use num_bigint::{BigInt, RandBigInt};
use num_traits::{One, Signed};
use rand::Rng;

use crate::curve::{CurveParams, Point};
use crate::error::{Error, Result};
use crate::trace::{trace_step, Trace};

/// An ElGamal key pair: private scalar and the matching public point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPair {
    pub private: BigInt,
    pub public: Point,
}

impl KeyPair {
    /// Derive the key pair for a caller-supplied private scalar `d`,
    /// nominally in `(0, n)`: public key Q = d·G.
    pub fn derive(d: BigInt, curve: &CurveParams, mut trace: Option<&mut Trace>) -> Result<Self> {
        if !d.is_positive() {
            return Err(Error::MalformedInput(format!(
                "private key must be positive, got {d}"
            )));
        }
        let public = curve.multiply(&d, &curve.g, trace.as_deref_mut())?;
        trace_step!(trace, "public key Q = d·G = {public}");
        Ok(Self { private: d, public })
    }

    /// Sample a fresh private scalar uniformly from `[1, n)` and derive the
    /// key pair.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, curve: &CurveParams) -> Result<Self> {
        Self::derive(random_scalar(rng, curve), curve, None)
    }
}

/// An ElGamal ciphertext: the pair (C1, C2). Produced fresh per encryption
/// and immutable once returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ciphertext {
    pub c1: Point,
    pub c2: Point,
}

/// Sample a scalar uniformly from `[1, n)`, suitable as a private key or as
/// an ephemeral encryption scalar.
pub fn random_scalar<R: Rng + ?Sized>(rng: &mut R, curve: &CurveParams) -> BigInt {
    rng.gen_bigint_range(&BigInt::one(), &curve.n)
}

/// Encrypt an embedded plaintext point under the public key `q`, using the
/// ephemeral scalar `k`.
///
/// `k` must be positive and fresh per call; the plaintext must be an affine
/// point (embedding never produces the identity).
pub fn encrypt(
    pm: &Point,
    q: &Point,
    k: &BigInt,
    curve: &CurveParams,
    mut trace: Option<&mut Trace>,
) -> Result<Ciphertext> {
    if !k.is_positive() {
        return Err(Error::MalformedInput(format!(
            "ephemeral scalar must be positive, got {k}"
        )));
    }
    if pm.is_infinity() {
        return Err(Error::MalformedInput(
            "plaintext point must not be the point at infinity".into(),
        ));
    }

    let c1 = curve.multiply(k, &curve.g, None)?;
    trace_step!(trace, "C1 = k·G = {c1}");
    let shared = curve.multiply(k, q, None)?;
    trace_step!(trace, "shared secret S = k·Q = {shared}");
    let c2 = curve.add(pm, &shared, trace.as_deref_mut())?;
    trace_step!(trace, "C2 = Pm + S = {c2}");

    Ok(Ciphertext { c1, c2 })
}

/// Decrypt a ciphertext with the private key `d`, recovering the embedded
/// plaintext point.
///
/// Works because d·C1 = d·k·G = k·Q, the same shared secret the sender
/// added. A ciphertext half at infinity is degenerate and rejected.
pub fn decrypt(
    ciphertext: &Ciphertext,
    d: &BigInt,
    curve: &CurveParams,
    mut trace: Option<&mut Trace>,
) -> Result<Point> {
    if ciphertext.c1.is_infinity() {
        return Err(Error::InvalidCiphertext(
            "C1 is the point at infinity".into(),
        ));
    }
    if ciphertext.c2.is_infinity() {
        return Err(Error::InvalidCiphertext(
            "C2 is the point at infinity".into(),
        ));
    }
    if !d.is_positive() {
        return Err(Error::MalformedInput(format!(
            "private key must be positive, got {d}"
        )));
    }

    let shared = curve.multiply(d, &ciphertext.c1, None)?;
    trace_step!(trace, "shared secret S = d·C1 = {shared}");
    let neg_shared = curve.negate(&shared);
    trace_step!(trace, "-S = {neg_shared}");
    let pm = curve.add(&ciphertext.c2, &neg_shared, trace.as_deref_mut())?;
    trace_step!(trace, "Pm = C2 + (-S) = {pm}");
    Ok(pm)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::Embedding;
    use num_traits::Zero;

    #[test]
    fn key_derivation_is_deterministic() {
        let curve = CurveParams::demo();
        let first = KeyPair::derive(BigInt::from(15), &curve, None).unwrap();
        let second = KeyPair::derive(BigInt::from(15), &curve, None).unwrap();
        assert_eq!(first.public, second.public);
        assert!(!first.public.is_infinity());
    }

    #[test]
    fn derive_rejects_non_positive_private_key() {
        let curve = CurveParams::toy();
        for d in [0i64, -5] {
            let err = KeyPair::derive(BigInt::from(d), &curve, None).unwrap_err();
            assert!(matches!(err, Error::MalformedInput(_)));
        }
    }

    #[test]
    fn round_trip_on_the_toy_curve() {
        let curve = CurveParams::toy();
        // Plaintext point: 3·G, guaranteed on the curve.
        let pm = curve.multiply(&BigInt::from(3), &curve.g, None).unwrap();
        let keys = KeyPair::derive(BigInt::from(4), &curve, None).unwrap();
        let ct = encrypt(&pm, &keys.public, &BigInt::from(7), &curve, None).unwrap();
        let recovered = decrypt(&ct, &keys.private, &curve, None).unwrap();
        assert_eq!(recovered, pm);
    }

    #[test]
    fn round_trip_with_embedding_on_the_demo_curve() {
        let curve = CurveParams::demo();
        let embedding = Embedding::default();
        let message = BigInt::from(33);
        let pm = embedding.embed(&message, &curve, None).unwrap().point;

        let keys = KeyPair::derive(BigInt::from(15), &curve, None).unwrap();
        let ct = encrypt(&pm, &keys.public, &BigInt::from(27), &curve, None).unwrap();
        let recovered = decrypt(&ct, &keys.private, &curve, None).unwrap();
        assert_eq!(recovered, pm);
        assert_eq!(embedding.recover(&recovered, None).unwrap(), message);
    }

    #[test]
    fn random_keys_round_trip() {
        let curve = CurveParams::demo();
        let mut rng = rand::thread_rng();
        let keys = KeyPair::generate(&mut rng, &curve).unwrap();
        let pm = curve.multiply(&BigInt::from(9), &curve.g, None).unwrap();
        let k = random_scalar(&mut rng, &curve);
        let ct = encrypt(&pm, &keys.public, &k, &curve, None).unwrap();
        if ct.c2.is_infinity() {
            // The sampled secret landed exactly on -Pm; the ciphertext is
            // degenerate and decrypt reports it as such.
            assert!(decrypt(&ct, &keys.private, &curve, None).is_err());
            return;
        }
        assert_eq!(decrypt(&ct, &keys.private, &curve, None).unwrap(), pm);
    }

    #[test]
    fn encrypt_rejects_bad_inputs() {
        let curve = CurveParams::toy();
        let keys = KeyPair::derive(BigInt::from(4), &curve, None).unwrap();
        let pm = curve.g.clone();

        let err = encrypt(&pm, &keys.public, &BigInt::zero(), &curve, None).unwrap_err();
        assert!(matches!(err, Error::MalformedInput(_)));

        let err = encrypt(
            &Point::Infinity,
            &keys.public,
            &BigInt::from(7),
            &curve,
            None,
        )
        .unwrap_err();
        assert!(matches!(err, Error::MalformedInput(_)));
    }

    #[test]
    fn decrypt_rejects_degenerate_ciphertext() {
        let curve = CurveParams::toy();
        let affine = curve.g.clone();
        let degenerate = Ciphertext {
            c1: Point::Infinity,
            c2: affine.clone(),
        };
        let err = decrypt(&degenerate, &BigInt::from(4), &curve, None).unwrap_err();
        assert!(matches!(err, Error::InvalidCiphertext(_)));

        let degenerate = Ciphertext {
            c1: affine,
            c2: Point::Infinity,
        };
        let err = decrypt(&degenerate, &BigInt::from(4), &curve, None).unwrap_err();
        assert!(matches!(err, Error::InvalidCiphertext(_)));
    }

    #[test]
    fn traces_cover_the_protocol_steps() {
        let curve = CurveParams::toy();
        let keys = KeyPair::derive(BigInt::from(4), &curve, None).unwrap();
        let pm = curve.multiply(&BigInt::from(3), &curve.g, None).unwrap();

        let mut enc_trace = Trace::new();
        let ct = encrypt(
            &pm,
            &keys.public,
            &BigInt::from(7),
            &curve,
            Some(&mut enc_trace),
        )
        .unwrap();
        assert!(enc_trace.lines().iter().any(|l| l.contains("C1")));
        assert!(enc_trace.lines().iter().any(|l| l.contains("shared secret")));

        let mut dec_trace = Trace::new();
        decrypt(&ct, &keys.private, &curve, Some(&mut dec_trace)).unwrap();
        assert!(dec_trace.lines().iter().any(|l| l.contains("-S")));
    }
}
