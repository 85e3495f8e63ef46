//! Chosen-ciphertext attacks on textbook RSA and Goldwasser-Micali
//!
//! Both schemes are multiplicatively homomorphic, so an attacker holding only
//! the public key can turn a challenge ciphertext into a different ciphertext
//! with a related plaintext. A decryption oracle that refuses the challenge
//! itself will still happily decrypt the related one.

use num::bigint::BigUint;
use rand::Rng;

use crate::gm::{GmPrivateKey, GmPublicKey};
use crate::rsa::{RsaPrivateKey, RsaPublicKey};
use crate::{arith, gm, rsa, SAMPLING_LIMIT};

/// Errors for the malleability attacks and decryption oracles
#[derive(Debug, PartialEq)]
pub enum Error {
    Arith(arith::Error),
    Gm(gm::Error),
    Rsa(rsa::Error),
    /// The oracle was asked to decrypt the challenge ciphertext
    ChallengeCiphertext,
    InvalidRange,
    SamplingExhausted,
}

/// Decryption oracle of the chosen-ciphertext game
pub trait DecryptionOracle {
    type Plaintext;

    /// Decrypt any ciphertext except the challenge
    fn decrypt(&self, ciphertext: &BigUint) -> Result<Self::Plaintext, Error>;
}

/// RSA decryption oracle holding the private key and the challenge ciphertext
pub struct RsaOracle {
    key: RsaPrivateKey,
    challenge: BigUint,
}

impl RsaOracle {
    pub fn new(key: RsaPrivateKey, challenge: BigUint) -> Self {
        Self { key, challenge }
    }

    /// Get the public key the attacker is allowed to see
    pub fn public_key(&self) -> RsaPublicKey {
        RsaPublicKey::from(&self.key)
    }
}

impl DecryptionOracle for RsaOracle {
    type Plaintext = BigUint;

    fn decrypt(&self, ciphertext: &BigUint) -> Result<BigUint, Error> {
        if ciphertext == &self.challenge {
            return Err(Error::ChallengeCiphertext);
        }

        self.key.decrypt(ciphertext).map_err(Error::Rsa)
    }
}

/// Goldwasser-Micali decryption oracle holding the private key and the challenge ciphertext
pub struct GmOracle {
    key: GmPrivateKey,
    challenge: BigUint,
}

impl GmOracle {
    pub fn new(key: GmPrivateKey, challenge: BigUint) -> Self {
        Self { key, challenge }
    }

    /// Get the public key the attacker is allowed to see
    pub fn public_key(&self) -> GmPublicKey {
        GmPublicKey::from(&self.key)
    }
}

impl DecryptionOracle for GmOracle {
    type Plaintext = u8;

    fn decrypt(&self, ciphertext: &BigUint) -> Result<u8, Error> {
        if ciphertext == &self.challenge {
            return Err(Error::ChallengeCiphertext);
        }

        self.key.decrypt(ciphertext).map_err(Error::Gm)
    }
}

/// C' = 2**e * C mod N, an encryption of 2M mod N
pub fn tamper_rsa(c: &BigUint, e: &BigUint, n: &BigUint) -> Result<BigUint, Error> {
    if c >= n {
        return Err(Error::InvalidRange);
    }

    let factor = arith::power_mod(&BigUint::from(2_u8), e, n).map_err(Error::Arith)?;

    Ok(factor * c % n)
}

/// M = M' / 2 mod N, undoing the doubling introduced by [tamper_rsa]
pub fn undo_rsa_doubling(m_prime: &BigUint, n: &BigUint) -> Result<BigUint, Error> {
    if m_prime >= n {
        return Err(Error::InvalidRange);
    }

    let inv_two = arith::mod_inverse(&BigUint::from(2_u8), n).map_err(Error::Arith)?;

    Ok(m_prime * inv_two % n)
}

/// C' = x**2 * C mod N for a random unit x, which encrypts the same bit as C
pub fn tamper_gm<R: Rng + ?Sized>(c: &BigUint, n: &BigUint, rng: &mut R) -> Result<BigUint, Error> {
    if c >= n {
        return Err(Error::InvalidRange);
    }

    let x = arith::random_unit(n, rng).map_err(Error::Arith)?;

    Ok(&x * &x * c % n)
}

/// Recover the plaintext of an RSA challenge without submitting it to the oracle
pub fn recover_rsa_plaintext<O>(
    oracle: &O,
    public: &RsaPublicKey,
    c: &BigUint,
) -> Result<BigUint, Error>
where
    O: DecryptionOracle<Plaintext = BigUint>,
{
    let c_prime = tamper_rsa(c, &public.e, &public.n)?;
    let m_prime = oracle.decrypt(&c_prime)?;

    undo_rsa_doubling(&m_prime, &public.n)
}

/// Recover the bit of a Goldwasser-Micali challenge without submitting it to the oracle
///
/// Redraws the multiplier while it happens to reproduce the challenge.
pub fn recover_gm_bit<O, R>(
    oracle: &O,
    public: &GmPublicKey,
    c: &BigUint,
    rng: &mut R,
) -> Result<u8, Error>
where
    O: DecryptionOracle<Plaintext = u8>,
    R: Rng + ?Sized,
{
    for _ in 0..SAMPLING_LIMIT {
        let c_prime = tamper_gm(c, &public.n, rng)?;
        if &c_prime != c {
            return oracle.decrypt(&c_prime);
        }
    }

    Err(Error::SamplingExhausted)
}
