#![no_std]

extern crate alloc;

pub mod arith;
pub mod crt;
pub mod gm;
pub mod malleability;
pub mod prime;
pub mod rsa;
pub mod symbol;

/// Upper bound on draws for every rejection-sampling loop in the crate
pub const SAMPLING_LIMIT: usize = 1 << 16;
