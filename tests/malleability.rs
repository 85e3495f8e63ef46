use num::bigint::{BigUint, RandBigInt};
use rand::thread_rng;

use quadres::malleability::{
    recover_gm_bit, recover_rsa_plaintext, tamper_gm, tamper_rsa, DecryptionOracle, Error,
    GmOracle, RsaOracle,
};
use quadres::{gm, rsa};

#[test]
fn tampered_rsa_ciphertext_decrypts_to_double() {
    let mut rng = thread_rng();
    let key = rsa::generate_keys(64, &mut rng).unwrap();
    let public = rsa::RsaPublicKey::from(&key);

    for _i in 0..32 {
        let m = rng.gen_biguint_below(&public.n);
        let c = public.encrypt(&m).unwrap();

        let c_prime = tamper_rsa(&c, &public.e, &public.n).unwrap();
        let m_prime = key.decrypt(&c_prime).unwrap();

        assert_eq!(m_prime, (&m * 2_u32) % &public.n);
    }
}

#[test]
fn tampered_gm_ciphertext_keeps_its_bit() {
    let mut rng = thread_rng();
    let key = gm::generate_keys(48, &mut rng).unwrap();
    let public = gm::GmPublicKey::from(&key);

    for &bit in [0_u8, 1].iter() {
        let c = public.encrypt(bit, &mut rng).unwrap();

        for _i in 0..64 {
            let c_prime = tamper_gm(&c, &public.n, &mut rng).unwrap();
            assert!(public.is_valid_ciphertext(&c_prime));
            assert_eq!(key.decrypt(&c_prime).unwrap(), bit);
        }
    }
}

#[test]
fn rsa_chosen_ciphertext_attack() {
    let mut rng = thread_rng();

    for _i in 0..8 {
        let key = rsa::generate_keys(96, &mut rng).unwrap();
        let public = rsa::RsaPublicKey::from(&key);

        // zero is its own double, so the oracle would see the challenge
        let m = rng.gen_biguint_range(&BigUint::from(2_u32), &public.n);
        let challenge = public.encrypt(&m).unwrap();

        let oracle = RsaOracle::new(key, challenge.clone());
        assert_eq!(oracle.decrypt(&challenge), Err(Error::ChallengeCiphertext));

        let recovered = recover_rsa_plaintext(&oracle, &oracle.public_key(), &challenge).unwrap();
        println!("recovered: {}", recovered);
        assert_eq!(recovered, m);
    }
}

#[test]
fn gm_chosen_ciphertext_attack() {
    let mut rng = thread_rng();
    let key = gm::generate_keys(32, &mut rng).unwrap();
    let public = gm::GmPublicKey::from(&key);

    let bits = [1_u8, 0, 1, 1, 0, 0, 1, 0];
    let challenges: Vec<_> = bits
        .iter()
        .map(|&bit| public.encrypt(bit, &mut rng).unwrap())
        .collect();

    for (challenge, &bit) in challenges.into_iter().zip(bits.iter()) {
        let oracle = GmOracle::new(key.clone(), challenge.clone());
        assert_eq!(oracle.decrypt(&challenge), Err(Error::ChallengeCiphertext));

        let recovered = recover_gm_bit(&oracle, &oracle.public_key(), &challenge, &mut rng).unwrap();
        assert_eq!(recovered, bit);
    }
}
