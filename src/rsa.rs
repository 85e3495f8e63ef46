use num::bigint::BigUint;
use num::{Integer, One};
use rand::Rng;

use crate::{arith, prime, SAMPLING_LIMIT};

/// Errors for textbook RSA
#[derive(Debug, PartialEq)]
pub enum Error {
    Arith(arith::Error),
    Prime(prime::Error),
    InvalidPrimes,
    InvalidRange,
    SamplingExhausted,
}

/// Public half of a textbook RSA key
#[derive(Clone, Debug, PartialEq)]
pub struct RsaPublicKey {
    pub n: BigUint,
    pub e: BigUint,
}

impl RsaPublicKey {
    /// Encrypt a plaintext from Z/NZ
    pub fn encrypt(&self, m: &BigUint) -> Result<BigUint, Error> {
        encrypt(m, &self.e, &self.n)
    }
}

impl From<&RsaPrivateKey> for RsaPublicKey {
    fn from(key: &RsaPrivateKey) -> Self {
        Self {
            n: key.n.clone(),
            e: key.e.clone(),
        }
    }
}

/// Textbook RSA private key, holding the factorization of N
#[derive(Clone, Debug, PartialEq)]
pub struct RsaPrivateKey {
    p: BigUint,
    q: BigUint,
    n: BigUint,
    e: BigUint,
    d: BigUint,
}

impl RsaPrivateKey {
    /// Generate a key for a `nu`-bit security parameter
    ///
    /// p and q are distinct floor(nu/2)-bit primes, and e is drawn from
    /// [2**(floor(nu/2) - 1), phi(N)] until it is coprime to phi(N).
    pub fn generate<R: Rng + ?Sized>(nu: usize, rng: &mut R) -> Result<Self, Error> {
        let bits = prime::prime_bit_length(nu).map_err(Error::Prime)?;
        let (p, q) = prime::generate_distinct_primes(bits, rng).map_err(Error::Prime)?;

        let phi = totient(&p, &q);
        let lo = BigUint::one() << (bits - 1);

        for _ in 0..SAMPLING_LIMIT {
            let e = arith::random_inclusive(&lo, &phi, rng);
            if e.gcd(&phi).is_one() {
                return Self::from_primes(p, q, e);
            }
        }

        Err(Error::SamplingExhausted)
    }

    /// Build a key from known primes and public exponent, deriving d = e**-1 mod phi(N)
    pub fn from_primes(p: BigUint, q: BigUint, e: BigUint) -> Result<Self, Error> {
        let two = BigUint::from(2_u8);
        if p == q || p < two || q < two {
            return Err(Error::InvalidPrimes);
        }

        let phi = totient(&p, &q);
        let d = arith::mod_inverse(&e, &phi).map_err(Error::Arith)?;
        let n = &p * &q;

        Ok(Self { p, q, n, e, d })
    }

    /// Decrypt a ciphertext from Z/NZ
    pub fn decrypt(&self, c: &BigUint) -> Result<BigUint, Error> {
        decrypt(c, &self.d, &self.n)
    }

    pub fn p(&self) -> &BigUint {
        &self.p
    }

    pub fn q(&self) -> &BigUint {
        &self.q
    }

    pub fn n(&self) -> &BigUint {
        &self.n
    }

    pub fn e(&self) -> &BigUint {
        &self.e
    }

    pub fn d(&self) -> &BigUint {
        &self.d
    }

    /// Euler's totient of the modulus, (p - 1)(q - 1)
    pub fn phi(&self) -> BigUint {
        totient(&self.p, &self.q)
    }
}

/// Generate an RSA key pair, see [RsaPrivateKey::generate]
pub fn generate_keys<R: Rng + ?Sized>(nu: usize, rng: &mut R) -> Result<RsaPrivateKey, Error> {
    RsaPrivateKey::generate(nu, rng)
}

/// C = M**e mod N
pub fn encrypt(m: &BigUint, e: &BigUint, n: &BigUint) -> Result<BigUint, Error> {
    if m >= n {
        return Err(Error::InvalidRange);
    }

    arith::power_mod(m, e, n).map_err(Error::Arith)
}

/// M = C**d mod N
pub fn decrypt(c: &BigUint, d: &BigUint, n: &BigUint) -> Result<BigUint, Error> {
    if c >= n {
        return Err(Error::InvalidRange);
    }

    arith::power_mod(c, d, n).map_err(Error::Arith)
}

fn totient(p: &BigUint, q: &BigUint) -> BigUint {
    (p - 1_u32) * (q - 1_u32)
}
