//! Modular arithmetic over arbitrary-precision integers.
//!
//! All functions are pure and operate on [`BigInt`], so products of field
//! elements near the modulus cannot overflow. Results are always canonical
//! representatives in `[0, p)`, including for negative inputs.

use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};

use crate::error::{Error, Result};

/// Canonical representative of `n` modulo `p`, in `[0, p)`.
///
/// Unlike the `%` operator, this is correct for negative `n`:
/// `modulo(-1, 11) == 10`. Precondition: `p > 0`.
pub fn modulo(n: &BigInt, p: &BigInt) -> BigInt {
    debug_assert!(p.is_positive(), "modulus must be positive");
    let r = n % p;
    if r.is_negative() {
        r + p
    } else {
        r
    }
}

/// Multiplicative inverse of `a` modulo `m` via the extended Euclidean
/// algorithm: the unique `x` in `[0, m)` with `a·x ≡ 1 (mod m)`.
///
/// Fails with [`Error::NoInverse`] when `gcd(a, m) != 1`, notably when
/// `a ≡ 0 (mod m)` or `m` is not prime.
pub fn mod_inverse(a: &BigInt, m: &BigInt) -> Result<BigInt> {
    let a = modulo(a, m);

    // Iterative extended Euclid: track r_i and the Bézout coefficient of a.
    let mut old_r = a.clone();
    let mut r = m.clone();
    let mut old_s = BigInt::one();
    let mut s = BigInt::zero();

    while !r.is_zero() {
        let q = &old_r / &r;
        let next_r = &old_r - &q * &r;
        old_r = std::mem::replace(&mut r, next_r);
        let next_s = &old_s - &q * &s;
        old_s = std::mem::replace(&mut s, next_s);
    }

    if !old_r.is_one() {
        return Err(Error::NoInverse { a, m: m.clone() });
    }
    Ok(modulo(&old_s, m))
}

/// `base^exp mod m` by binary square-and-multiply, O(log exp)
/// multiplications. The base is normalized first.
///
/// `exp` must be non-negative; a negative exponent is reported as
/// [`Error::MalformedInput`].
pub fn mod_pow(base: &BigInt, exp: &BigInt, m: &BigInt) -> Result<BigInt> {
    if exp.is_negative() {
        return Err(Error::MalformedInput(format!(
            "exponent must be non-negative, got {exp}"
        )));
    }

    let mut result = BigInt::one() % m;
    let mut base = modulo(base, m);
    let mut exp = exp.clone();

    while !exp.is_zero() {
        if exp.bit(0) {
            result = &result * &base % m;
        }
        base = &base * &base % m;
        exp >>= 1;
    }
    Ok(result)
}

/// A square root of `a` modulo the prime `p`, if one exists.
///
/// Two policies, deliberately short of a general Tonelli–Shanks:
/// - `p ≡ 3 (mod 4)`: the closed form `a^((p+1)/4) mod p`, verified by
///   squaring so a non-residue is reported as `None` rather than a false
///   positive.
/// - otherwise: exhaustive search over `[1, p)`, tractable only for small
///   `p` and unsuitable for cryptographic-size moduli.
pub fn mod_sqrt(a: &BigInt, p: &BigInt) -> Option<BigInt> {
    let a = modulo(a, p);
    if a.is_zero() {
        return Some(BigInt::zero());
    }

    let three = BigInt::from(3);
    let four = BigInt::from(4);
    if modulo(p, &four) == three {
        let exp = (p + BigInt::one()) / &four;
        let candidate = mod_pow(&a, &exp, p).expect("exponent (p+1)/4 is non-negative");
        if modulo(&(&candidate * &candidate), p) == a {
            return Some(candidate);
        }
        return None;
    }

    // Fallback for p ≡ 1 (mod 4): brute force, hard-capped at the field size.
    let mut r = BigInt::one();
    while &r < p {
        if modulo(&(&r * &r), p) == a {
            return Some(r);
        }
        r += 1;
    }
    None
}

/// Miller–Rabin witness round: true if `n` passes for witness `a`.
fn miller_rabin_round(n: &BigInt, a: &BigInt, d: &BigInt, s: u32) -> bool {
    let n_minus_1 = n - BigInt::one();
    let mut x = mod_pow(a, d, n).expect("odd part of n-1 is non-negative");
    if x.is_one() || x == n_minus_1 {
        return true;
    }
    for _ in 1..s {
        x = &x * &x % n;
        if x == n_minus_1 {
            return true;
        }
    }
    false
}

/// Primality test via Miller–Rabin over a fixed witness set.
///
/// The witnesses {2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37} make the test
/// deterministic for all `n < 3.3·10^24`, which covers every modulus this
/// engine is meant for; beyond that the answer is still correct with
/// overwhelming probability.
pub fn is_prime(n: &BigInt) -> bool {
    const WITNESSES: [u32; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

    let two = BigInt::from(2);
    if n < &two {
        return false;
    }
    for w in WITNESSES {
        let w = BigInt::from(w);
        if n == &w {
            return true;
        }
        if (n % &w).is_zero() {
            return false;
        }
    }

    // Write n - 1 = d * 2^s with d odd.
    let mut d = n - BigInt::one();
    let mut s = 0u32;
    while !d.bit(0) {
        d >>= 1;
        s += 1;
    }

    WITNESSES
        .iter()
        .all(|&w| miller_rabin_round(n, &BigInt::from(w), &d, s))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(n: i64) -> BigInt {
        BigInt::from(n)
    }

    #[test]
    fn modulo_handles_negative_operands() {
        assert_eq!(modulo(&big(-1), &big(11)), big(10));
        assert_eq!(modulo(&big(-22), &big(11)), big(0));
        assert_eq!(modulo(&big(25), &big(11)), big(3));
        assert_eq!(modulo(&big(0), &big(7)), big(0));
    }

    #[test]
    fn inverse_of_two_mod_eleven_is_six() {
        // 2 * 6 = 12 ≡ 1 (mod 11)
        assert_eq!(mod_inverse(&big(2), &big(11)).unwrap(), big(6));
    }

    #[test]
    fn inverse_of_zero_fails() {
        let err = mod_inverse(&big(0), &big(11)).unwrap_err();
        assert!(matches!(err, Error::NoInverse { .. }));
    }

    #[test]
    fn inverse_of_negative_element_is_normalized_first() {
        // -2 ≡ 9 (mod 11), and 9 * 5 = 45 ≡ 1 (mod 11)
        assert_eq!(mod_inverse(&big(-2), &big(11)).unwrap(), big(5));
    }

    #[test]
    fn inverse_round_trips_over_a_whole_field() {
        let p = big(1021);
        let mut a = BigInt::one();
        while a < p {
            let inv = mod_inverse(&a, &p).unwrap();
            assert_eq!(modulo(&(&a * &inv), &p), BigInt::one());
            a += 97; // sample the field rather than walking all of it
        }
    }

    #[test]
    fn no_inverse_under_composite_modulus() {
        // gcd(4, 12) = 4
        assert!(mod_inverse(&big(4), &big(12)).is_err());
    }

    #[test]
    fn pow_matches_fermat() {
        // 2^10 ≡ 1 (mod 11)
        assert_eq!(mod_pow(&big(2), &big(10), &big(11)).unwrap(), big(1));
        assert_eq!(mod_pow(&big(2), &big(5), &big(11)).unwrap(), big(10));
        assert_eq!(mod_pow(&big(7), &big(0), &big(13)).unwrap(), big(1));
    }

    #[test]
    fn pow_normalizes_a_negative_base() {
        // -3 ≡ 8 (mod 11), 8^2 = 64 ≡ 9
        assert_eq!(mod_pow(&big(-3), &big(2), &big(11)).unwrap(), big(9));
    }

    #[test]
    fn pow_rejects_negative_exponent() {
        let err = mod_pow(&big(2), &big(-1), &big(11)).unwrap_err();
        assert!(matches!(err, Error::MalformedInput(_)));
    }

    #[test]
    fn sqrt_fast_path_for_p_congruent_three_mod_four() {
        // p = 11 ≡ 3 (mod 4); 3 is a residue: 5^2 = 25 ≡ 3
        let r = mod_sqrt(&big(3), &big(11)).unwrap();
        assert_eq!(modulo(&(&r * &r), &big(11)), big(3));
    }

    #[test]
    fn sqrt_rejects_non_residue_without_false_positive() {
        // Residues mod 11 are {1, 3, 4, 5, 9}; 2 is not among them.
        assert_eq!(mod_sqrt(&big(2), &big(11)), None);
    }

    #[test]
    fn sqrt_of_zero_is_zero() {
        assert_eq!(mod_sqrt(&big(0), &big(11)), Some(big(0)));
    }

    #[test]
    fn sqrt_brute_force_for_p_congruent_one_mod_four() {
        // p = 13 ≡ 1 (mod 4); 3 is a residue: 4^2 = 16 ≡ 3
        let r = mod_sqrt(&big(3), &big(13)).unwrap();
        assert_eq!(modulo(&(&r * &r), &big(13)), big(3));
        // 5 is a non-residue mod 13
        assert_eq!(mod_sqrt(&big(5), &big(13)), None);
    }

    #[test]
    fn primality_agrees_with_known_values() {
        for p in [2i64, 3, 5, 7, 11, 13, 1021, 7919] {
            assert!(is_prime(&big(p)), "{p} should be prime");
        }
        for n in [0i64, 1, 4, 9, 15, 1023, 7917] {
            assert!(!is_prime(&big(n)), "{n} should be composite");
        }
        // Carmichael number.
        assert!(!is_prime(&big(561)));
    }
}
