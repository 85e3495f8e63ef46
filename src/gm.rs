use num::bigint::BigUint;
use num::{Integer, One};
use rand::Rng;

use crate::{arith, crt, prime, symbol, SAMPLING_LIMIT};

/// Errors for Goldwasser-Micali encryption
#[derive(Debug, PartialEq)]
pub enum Error {
    Arith(arith::Error),
    Crt(crt::Error),
    Prime(prime::Error),
    Symbol(symbol::Error),
    InvalidCiphertext,
    InvalidRange,
    SamplingExhausted,
}

/// Goldwasser-Micali public key: the modulus N and a pseudosquare y
#[derive(Clone, Debug, PartialEq)]
pub struct GmPublicKey {
    pub n: BigUint,
    pub y: BigUint,
}

impl GmPublicKey {
    /// Encrypt a single bit under a fresh random unit
    pub fn encrypt<R: Rng + ?Sized>(&self, bit: u8, rng: &mut R) -> Result<BigUint, Error> {
        encrypt(bit, &self.y, &self.n, rng)
    }

    /// Check that a ciphertext is a unit with Jacobi symbol 1
    pub fn is_valid_ciphertext(&self, c: &BigUint) -> bool {
        is_valid_ciphertext(c, &self.n)
    }
}

impl From<&GmPrivateKey> for GmPublicKey {
    fn from(key: &GmPrivateKey) -> Self {
        Self {
            n: key.n.clone(),
            y: key.y.clone(),
        }
    }
}

/// Goldwasser-Micali private key
#[derive(Clone, Debug, PartialEq)]
pub struct GmPrivateKey {
    p: BigUint,
    q: BigUint,
    n: BigUint,
    y: BigUint,
}

impl GmPrivateKey {
    /// Generate a key for a `nu`-bit security parameter
    ///
    /// y is the CRT combination of a nonresidue mod p and a nonresidue mod q,
    /// so it is a nonresidue mod N with Jacobi symbol 1.
    pub fn generate<R: Rng + ?Sized>(nu: usize, rng: &mut R) -> Result<Self, Error> {
        let bits = prime::prime_bit_length(nu).map_err(Error::Prime)?;
        let (p, q) = prime::generate_distinct_primes(bits, rng).map_err(Error::Prime)?;

        let ya = sample_nonresidue(&p, rng)?;
        let yb = sample_nonresidue(&q, rng)?;

        let y = crt::solve(&ya, &p, &yb, &q).map_err(Error::Crt)?;
        let n = &p * &q;

        Ok(Self { p, q, n, y })
    }

    /// Decrypt a ciphertext, rejecting anything outside Z/NZ or not in J_N
    pub fn decrypt(&self, c: &BigUint) -> Result<u8, Error> {
        if c >= &self.n {
            return Err(Error::InvalidRange);
        }

        if !is_valid_ciphertext(c, &self.n) {
            return Err(Error::InvalidCiphertext);
        }

        decrypt(c, &self.p)
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

    pub fn y(&self) -> &BigUint {
        &self.y
    }
}

/// Generate a Goldwasser-Micali key pair, see [GmPrivateKey::generate]
pub fn generate_keys<R: Rng + ?Sized>(nu: usize, rng: &mut R) -> Result<GmPrivateKey, Error> {
    GmPrivateKey::generate(nu, rng)
}

// Draw from [1, p] until the Legendre symbol is -1
fn sample_nonresidue<R: Rng + ?Sized>(p: &BigUint, rng: &mut R) -> Result<BigUint, Error> {
    let one = BigUint::one();

    for _ in 0..SAMPLING_LIMIT {
        let x = arith::random_inclusive(&one, p, rng);
        if symbol::legendre(&x, p).map_err(Error::Symbol)? == -1 {
            return Ok(x);
        }
    }

    Err(Error::SamplingExhausted)
}

/// Encrypt a bit: x**2 mod N for 0, y * x**2 mod N for 1, with x a random unit
pub fn encrypt<R: Rng + ?Sized>(
    bit: u8,
    y: &BigUint,
    n: &BigUint,
    rng: &mut R,
) -> Result<BigUint, Error> {
    if bit > 1 {
        return Err(Error::InvalidRange);
    }

    let x = arith::random_unit(n, rng).map_err(Error::Arith)?;
    let square = (&x * &x) % n;

    if bit == 0 {
        Ok(square)
    } else {
        Ok((y * square) % n)
    }
}

/// Decrypt with the prime factor p: residues mod p are 0, nonresidues are 1
pub fn decrypt(c: &BigUint, p: &BigUint) -> Result<u8, Error> {
    match symbol::legendre(c, p).map_err(Error::Symbol)? {
        1 => Ok(0),
        -1 => Ok(1),
        _ => Err(Error::InvalidCiphertext),
    }
}

/// A well-formed ciphertext is a unit of Z/NZ with Jacobi symbol 1
///
/// Necessary, not sufficient: telling residues from pseudosquares is the hard problem.
pub fn is_valid_ciphertext(c: &BigUint, n: &BigUint) -> bool {
    c.gcd(n).is_one() && symbol::jacobi_reciprocity(c, n) == Ok(1)
}
