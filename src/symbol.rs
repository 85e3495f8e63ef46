use alloc::vec::Vec;
use core::mem;

use num::bigint::BigUint;
use num::{Integer, One, ToPrimitive, Zero};

use crate::arith;

/// Errors for Legendre and Jacobi symbol evaluation
#[derive(Debug, PartialEq)]
pub enum Error {
    Arith(arith::Error),
    InvalidModulus,
    /// Euler's criterion produced a residue outside {0, 1, p - 1}
    NotPrime(BigUint),
}

/// Factor `n` by trial division
///
/// Returns (prime, exponent) pairs in ascending order of the prime.
///
/// Only meant for small auxiliary moduli: factoring a scheme modulus this way breaks the scheme.
pub fn factorize(n: &BigUint) -> Vec<(BigUint, u32)> {
    let mut factors = Vec::new();

    if n <= &BigUint::one() {
        return factors;
    }

    let mut n = n.clone();

    let mut count = 0_u32;
    while n.is_even() {
        n >>= 1_usize;
        count += 1;
    }
    if count != 0 {
        factors.push((BigUint::from(2_u8), count));
    }

    let mut candidate = BigUint::from(3_u8);
    while &candidate * &candidate <= n {
        count = 0;
        while (&n % &candidate).is_zero() {
            n /= &candidate;
            count += 1;
        }
        if count != 0 {
            factors.push((candidate.clone(), count));
        }
        candidate += 2_u32;
    }

    // whatever survives the loop has no factor below its square root
    if n > BigUint::one() {
        factors.push((n, 1));
    }

    factors
}

/// Legendre symbol (a/p) for prime p, by Euler's criterion
///
/// (a/p) = a**((p-1)/2) mod p, with p - 1 read as -1
pub fn legendre(a: &BigUint, p: &BigUint) -> Result<i8, Error> {
    let two = BigUint::from(2_u8);

    if p < &two {
        return Err(Error::InvalidModulus);
    }

    if p == &two {
        return Ok(if a.is_even() { 0 } else { 1 });
    }

    let p_sub_one = p - 1_u32;
    let exponent = &p_sub_one >> 1_usize;
    let num = arith::power_mod(a, &exponent, p).map_err(Error::Arith)?;

    if num.is_zero() {
        Ok(0)
    } else if num.is_one() {
        Ok(1)
    } else if num == p_sub_one {
        Ok(-1)
    } else {
        Err(Error::NotPrime(p.clone()))
    }
}

/// Jacobi symbol (a/q) for odd q, as the product of Legendre symbols over the factors of q
pub fn jacobi(a: &BigUint, q: &BigUint) -> Result<i8, Error> {
    if q.is_zero() || q.is_even() {
        return Err(Error::InvalidModulus);
    }

    if a.is_zero() {
        return Ok(0);
    }

    if a.is_one() {
        return Ok(1);
    }

    let mut result = 1_i8;

    for (prime, exponent) in factorize(q) {
        match legendre(a, &prime)? {
            0 => return Ok(0),
            -1 if exponent % 2 == 1 => result = -result,
            _ => (),
        }
    }

    Ok(result)
}

/// Jacobi symbol (a/n) for odd n, by quadratic reciprocity
///
/// Never factors n, so this is safe to call on a scheme modulus.
pub fn jacobi_reciprocity(a: &BigUint, n: &BigUint) -> Result<i8, Error> {
    if n.is_zero() || n.is_even() {
        return Err(Error::InvalidModulus);
    }

    let mut a = a % n;
    let mut n = n.clone();
    let mut t = 1_i8;

    while !a.is_zero() {
        while a.is_even() {
            a >>= 1_usize;
            // (2/n) = -1 iff n = 3, 5 mod 8
            let r = small_residue(&n, 8);
            if r == 3 || r == 5 {
                t = -t;
            }
        }

        mem::swap(&mut a, &mut n);

        if small_residue(&a, 4) == 3 && small_residue(&n, 4) == 3 {
            t = -t;
        }

        a = &a % &n;
    }

    if n.is_one() {
        Ok(t)
    } else {
        Ok(0)
    }
}

fn small_residue(n: &BigUint, m: u32) -> u32 {
    (n % BigUint::from(m)).to_u32().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(n: u64) -> BigUint {
        BigUint::from(n)
    }

    #[test]
    fn check_factorize() {
        assert_eq!(factorize(&big(360)), [(big(2), 3), (big(3), 2), (big(5), 1)].to_vec());
        assert_eq!(factorize(&big(3233)), [(big(53), 1), (big(61), 1)].to_vec());
        assert_eq!(factorize(&big(97)), [(big(97), 1)].to_vec());
        assert_eq!(factorize(&big(2)), [(big(2), 1)].to_vec());
        assert_eq!(factorize(&big(1024)), [(big(2), 10)].to_vec());
        assert_eq!(factorize(&big(2 * 49 * 101)), [(big(2), 1), (big(7), 2), (big(101), 1)].to_vec());
        assert!(factorize(&big(1)).is_empty());
        assert!(factorize(&big(0)).is_empty());
    }

    #[test]
    fn check_legendre() {
        for &p in [3_u64, 7, 23, 61, 101].iter() {
            let bp = big(p);
            let squares: Vec<u64> = (1..p).map(|x| x * x % p).collect();

            for a in 0..p {
                let symbol = legendre(&big(a), &bp).unwrap();
                if a == 0 {
                    assert_eq!(symbol, 0);
                } else if squares.contains(&a) {
                    assert_eq!(symbol, 1);
                } else {
                    assert_eq!(symbol, -1);
                }
            }

            // multiples of p
            assert_eq!(legendre(&big(p * 5), &bp).unwrap(), 0);
        }

        assert_eq!(legendre(&big(2), &big(15)), Err(Error::NotPrime(big(15))));
        assert_eq!(legendre(&big(2), &big(1)), Err(Error::InvalidModulus));
    }

    #[test]
    fn check_jacobi() {
        assert_eq!(jacobi(&big(1001), &big(9907)).unwrap(), -1);
        assert_eq!(jacobi(&big(19), &big(45)).unwrap(), 1);
        assert_eq!(jacobi(&big(8), &big(21)).unwrap(), -1);
        assert_eq!(jacobi(&big(5), &big(21)).unwrap(), 1);
        assert_eq!(jacobi(&big(0), &big(21)).unwrap(), 0);
        assert_eq!(jacobi(&big(1), &big(21)).unwrap(), 1);
        assert_eq!(jacobi(&big(7), &big(21)).unwrap(), 0);
        assert_eq!(jacobi(&big(3), &big(20)), Err(Error::InvalidModulus));
    }

    #[test]
    fn check_jacobi_reciprocity() {
        assert_eq!(jacobi_reciprocity(&big(1001), &big(9907)).unwrap(), -1);
        assert_eq!(jacobi_reciprocity(&big(3), &big(0)), Err(Error::InvalidModulus));

        for n in (3_u64..200).step_by(2) {
            for a in 0..n * 2 {
                assert_eq!(
                    jacobi(&big(a), &big(n)).unwrap(),
                    jacobi_reciprocity(&big(a), &big(n)).unwrap(),
                    "mismatch for ({}/{})",
                    a,
                    n
                );
            }
        }
    }
}
