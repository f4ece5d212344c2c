//! The pseudorandom function underlying key derivation, based on the Naor-Reingold
//! construction.
//! * From: "[Number-theoretic constructions of efficient pseudo-random functions](https://dl.acm.org/doi/10.1145/972639.972643)"
//!
//! The reference scheme evaluates F into either G1 (by agents, during encryption) or
//! G2 (by the rule generator, during token generation). Here the target group is the
//! type parameter, so a call with anything but a group of the pairing is simply not
//! expressible.

use bls12_381::Scalar;
use group::{ff::Field, Group};

/// Maps `input` to a group element determined by `base`, the key vector `beta` and the
/// auxiliary scalar `aux`.
///
/// The exponent is the product of `beta[i]` over all set bits `i` of `input` (least
/// significant bit first), multiplied once by `aux`. Folding `aux` into the exponent
/// saves a separate exponentiation at both call sites.
///
/// Please note that this function is definitely **not** implemented as a timing safe
/// function: the number and positions of the scalar multiplications depend on which
/// bits of `input` are set.
///
/// # Panics
///
/// Panics if `input` has a set bit at position `beta.len()` or beyond, i.e. if the
/// input does not fit in the message space the key was generated for.
pub fn prf<G>(base: &G, beta: &[Scalar], aux: &Scalar, input: u32) -> G
where
    G: Group<Scalar = Scalar>,
{
    let mut exponent = Scalar::ONE;

    // Divide the input by 2 (shift right) until at zero.
    let mut x = input;
    let mut i = 0;
    while x > 0 {
        if x & 1 == 1 {
            exponent *= beta[i];
        }
        x >>= 1;
        i += 1;
    }
    exponent *= aux;

    *base * exponent
}
