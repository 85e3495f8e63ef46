use num::bigint::{BigUint, RandBigInt};
use num::{One, Zero};
use rand::Rng;

use crate::{arith, SAMPLING_LIMIT};

/// Largest divisor tried by the trial division screen
pub const TRIAL_DIVISION_BOUND: u32 = 100;

/// Number of Fermat rounds a generated prime must survive
pub const FERMAT_ROUNDS: usize = 50;

/// Maximum redraws when the second prime collides with the first
pub const DISTINCT_PRIME_LIMIT: usize = 64;

/// Smallest accepted security parameter (bit length of the modulus)
pub const MIN_SECURITY_PARAMETER: usize = 8;

/// Errors for primality testing and prime generation
#[derive(Debug, PartialEq)]
pub enum Error {
    InvalidBitLength,
    InvalidSecurityParameter,
    SamplingExhausted,
}

/// Outcome of a primality test
#[derive(Clone, Debug, PartialEq)]
pub enum Primality {
    /// No witness of compositeness was found
    Probable,
    /// Carries the certificate of compositeness (a divisor or a Fermat witness)
    Composite(BigUint),
}

impl Primality {
    pub fn is_probable(&self) -> bool {
        *self == Primality::Probable
    }
}

/// Screen a candidate by dividing it by every integer in [2, 100]
///
/// Returns the first divisor found, skipping the candidate itself, so small primes pass.
///
/// Only a pre-filter, never a proof of primality.
pub fn trial_division_certificate(n: &BigUint) -> Primality {
    for x in 2..=TRIAL_DIVISION_BOUND {
        let divisor = BigUint::from(x);
        if &divisor != n && (n % &divisor).is_zero() {
            return Primality::Composite(divisor);
        }
    }

    Primality::Probable
}

/// Fermat probable prime test with `rounds` random bases from [2, n - 1]
///
/// Carmichael numbers fool this test for every coprime base, which is accepted here.
///
/// 2 is reported prime. 0 and 1 are their own witnesses.
pub fn fermat_test<R: Rng + ?Sized>(n: &BigUint, rounds: usize, rng: &mut R) -> Primality {
    let two = BigUint::from(2_u8);

    if n < &two {
        return Primality::Composite(n.clone());
    }

    if n == &two {
        return Primality::Probable;
    }

    let n_sub_one = n - 1_u32;

    for _ in 0..rounds {
        // a in [2, n - 1]
        let a = rng.gen_biguint_range(&two, n);

        // n prime => a**(n-1) == 1 mod n
        match arith::power_mod(&a, &n_sub_one, n) {
            Ok(b) if b.is_one() => continue,
            _ => return Primality::Composite(a),
        }
    }

    Primality::Probable
}

/// Bit length of each prime factor for a modulus of `nu` bits
pub fn prime_bit_length(nu: usize) -> Result<usize, Error> {
    if nu < MIN_SECURITY_PARAMETER {
        return Err(Error::InvalidSecurityParameter);
    }

    Ok(nu / 2)
}

/// Generate a random probable prime in [2**(bit_length - 1), 2**bit_length]
///
/// Candidates are drawn uniformly until one passes the trial division screen
/// and [FERMAT_ROUNDS] rounds of the Fermat test.
pub fn generate_prime<R: Rng + ?Sized>(bit_length: usize, rng: &mut R) -> Result<BigUint, Error> {
    if bit_length < 2 {
        return Err(Error::InvalidBitLength);
    }

    let one = BigUint::one();
    let two = BigUint::from(2_u8);
    let lo = &one << (bit_length - 1);
    let hi = &one << bit_length;

    for _ in 0..SAMPLING_LIMIT {
        let p = arith::random_inclusive(&lo, &hi, rng);

        if p > two
            && trial_division_certificate(&p).is_probable()
            && fermat_test(&p, FERMAT_ROUNDS, rng).is_probable()
        {
            return Ok(p);
        }
    }

    Err(Error::SamplingExhausted)
}

/// Generate two different primes of the same bit length
pub fn generate_distinct_primes<R: Rng + ?Sized>(
    bit_length: usize,
    rng: &mut R,
) -> Result<(BigUint, BigUint), Error> {
    let p = generate_prime(bit_length, rng)?;

    for _ in 0..DISTINCT_PRIME_LIMIT {
        let q = generate_prime(bit_length, rng)?;
        if q != p {
            return Ok((p, q));
        }
    }

    Err(Error::SamplingExhausted)
}
