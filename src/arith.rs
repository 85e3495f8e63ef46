use core::mem;

use num::bigint::{BigInt, BigUint, RandBigInt};
use num::{Integer, One, Signed, Zero};
use rand::Rng;

use crate::SAMPLING_LIMIT;

/// Errors for big integer arithmetic
#[derive(Debug, PartialEq)]
pub enum Error {
    InvalidModulus,
    NoInverseExists,
    SamplingExhausted,
}

/// Exact integer exponentiation by repeated squaring
///
/// The exponent is unsigned, so there is no reciprocal branch to worry about.
pub fn power(base: &BigUint, exponent: &BigUint) -> BigUint {
    if exponent.is_zero() {
        return BigUint::one();
    }

    if exponent.is_one() {
        return base.clone();
    }

    let squared = base * base;
    // floor(n / 2) is n/2 for even n, and (n-1)/2 for odd n
    let half = exponent >> 1_usize;

    if exponent.is_even() {
        power(&squared, &half)
    } else {
        base * power(&squared, &half)
    }
}

/// Modular exponentiation, following the same recurrence as [power]
///
/// Every intermediate square is reduced, so this is the one to use for key-sized exponents.
pub fn power_mod(base: &BigUint, exponent: &BigUint, modulus: &BigUint) -> Result<BigUint, Error> {
    if modulus.is_zero() {
        return Err(Error::InvalidModulus);
    }

    if modulus.is_one() {
        return Ok(BigUint::zero());
    }

    Ok(reduced_power(&(base % modulus), exponent, modulus))
}

// base is already reduced, modulus > 1
fn reduced_power(base: &BigUint, exponent: &BigUint, modulus: &BigUint) -> BigUint {
    if exponent.is_zero() {
        return BigUint::one();
    }

    if exponent.is_one() {
        return base.clone();
    }

    let squared = (base * base) % modulus;
    let half = exponent >> 1_usize;

    if exponent.is_even() {
        reduced_power(&squared, &half, modulus)
    } else {
        (base * reduced_power(&squared, &half, modulus)) % modulus
    }
}

/// Extended Euclidean algorithm
///
/// Returns (d, x, y) where d = gcd(a, b) and a*x + b*y = d
///
/// Degenerate inputs fall out of the recurrence:
///   b == 0 -> (a, 1, 0)
///   a == 0 -> (b, 0, 1)
pub fn extended_gcd(a: &BigUint, b: &BigUint) -> (BigUint, BigInt, BigInt) {
    let (mut r1, mut r) = (BigInt::from(a.clone()), BigInt::from(b.clone()));
    let (mut s1, mut s) = (BigInt::one(), BigInt::zero());
    let (mut t1, mut t) = (BigInt::zero(), BigInt::one());

    while !r.is_zero() {
        // remainders stay non-negative, so truncating division is floor division
        let q = &r1 / &r;

        let next_r = &r1 - &q * &r;
        r1 = mem::replace(&mut r, next_r);

        let next_s = &s1 - &q * &s;
        s1 = mem::replace(&mut s, next_s);

        let next_t = &t1 - &q * &t;
        t1 = mem::replace(&mut t, next_t);
    }

    let (_, d) = r1.into_parts();

    (d, s1, t1)
}

/// Map an integer to its canonical residue in [0, modulus - 1]
///
/// Negative values are reflected: |value| is reduced, then subtracted from the modulus.
pub fn normalize_negative(value: &BigInt, modulus: &BigUint) -> Result<BigUint, Error> {
    if modulus.is_zero() {
        return Err(Error::InvalidModulus);
    }

    let mut residue = value.magnitude().clone();
    if &residue >= modulus {
        residue = residue % modulus;
    }

    if !value.is_negative() || residue.is_zero() {
        return Ok(residue);
    }

    Ok(modulus - residue)
}

/// Multiplicative inverse of `a` modulo `modulus`
pub fn mod_inverse(a: &BigUint, modulus: &BigUint) -> Result<BigUint, Error> {
    if modulus.is_zero() {
        return Err(Error::InvalidModulus);
    }

    let (d, x, _) = extended_gcd(a, modulus);
    if !d.is_one() {
        return Err(Error::NoInverseExists);
    }

    normalize_negative(&x, modulus)
}

/// Uniformly sample an integer from the inclusive range [lo, hi]
///
/// Caller must ensure lo <= hi
pub fn random_inclusive<R: Rng + ?Sized>(lo: &BigUint, hi: &BigUint, rng: &mut R) -> BigUint {
    rng.gen_biguint_range(lo, &(hi + 1_u32))
}

/// Uniformly sample a unit of Z/nZ, i.e. x in [1, n - 1] with gcd(x, n) == 1
pub fn random_unit<R: Rng + ?Sized>(modulus: &BigUint, rng: &mut R) -> Result<BigUint, Error> {
    let one = BigUint::one();

    if modulus <= &one {
        return Err(Error::InvalidModulus);
    }

    for _ in 0..SAMPLING_LIMIT {
        let x = rng.gen_biguint_range(&one, modulus);
        if x.gcd(modulus).is_one() {
            return Ok(x);
        }
    }

    Err(Error::SamplingExhausted)
}
