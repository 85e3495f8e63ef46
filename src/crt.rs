use num::bigint::{BigInt, BigUint};
use num::{Integer, One, Zero};

use crate::arith;

/// Errors for the Chinese Remainder Theorem solver
#[derive(Debug, PartialEq)]
pub enum Error {
    Arith(arith::Error),
    /// Moduli are zero or share a factor, so no unique solution exists
    PreconditionViolation,
}

/// Solve y = a mod m, y = b mod n for coprime m and n
///
/// Returns the unique solution in [0, m*n - 1].
pub fn solve(a: &BigUint, m: &BigUint, b: &BigUint, n: &BigUint) -> Result<BigUint, Error> {
    if m.is_zero() || n.is_zero() {
        return Err(Error::PreconditionViolation);
    }

    let (d, x, _) = arith::extended_gcd(m, n);
    if !d.is_one() {
        return Err(Error::PreconditionViolation);
    }

    // t = m**-1 mod n
    let t = arith::normalize_negative(&x, n).map_err(Error::Arith)?;

    // u = (b - a) * t mod n, b - a may be negative
    let diff = BigInt::from(b.clone()) - BigInt::from(a.clone());
    let u = (diff * BigInt::from(t)).mod_floor(&BigInt::from(n.clone()));
    let (_, u) = u.into_parts();

    Ok((a + u * m) % (m * n))
}
