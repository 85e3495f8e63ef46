use num::bigint::BigUint;
use num::ToPrimitive;

#[allow(dead_code)]
pub fn big(n: u64) -> BigUint {
    BigUint::from(n)
}

// deterministic primality check for small generated primes
#[allow(dead_code)]
pub fn is_prime(n: &BigUint) -> bool {
    let n = n.to_u64().unwrap();
    if n < 2 {
        return false;
    }

    let mut d = 2_u64;
    while d * d <= n {
        if n % d == 0 {
            return false;
        }
        d += 1;
    }

    true
}
