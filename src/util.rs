use bls12_381::hash_to_curve::{ExpandMsgXmd, HashToCurve};
use bls12_381::{G1Projective, G2Projective, Scalar};
use group::{ff::Field, Group};
use rand::{CryptoRng, RngCore};
use sha2::Sha256;

/// Size of a compressed G1 group element.
pub(crate) const G1_BYTES: usize = 48;

/// Domain-separation tag for the identifier hash.
const ID_HASH_DST: &[u8] = b"MCPOE-V01-CS01-with-BLS12381G1_XMD:SHA-256_SSWU_RO_";

#[inline(always)]
pub fn rand_scalar<R: RngCore + CryptoRng>(rng: &mut R) -> Scalar {
    Scalar::random(rng)
}

#[inline(always)]
pub fn rand_g1<R: RngCore + CryptoRng>(rng: &mut R) -> G1Projective {
    G1Projective::random(rng)
}

#[inline(always)]
pub fn rand_g2<R: RngCore + CryptoRng>(rng: &mut R) -> G2Projective {
    G2Projective::random(rng)
}

/// Deterministically hashes an identifier onto G1 (SHA-256 based hash-to-curve).
///
/// Agents and the alarm system must agree on this map: a ciphertext only matches a
/// token if both were derived from the identical identifier string.
pub fn hash_to_g1(msg: &[u8]) -> G1Projective {
    <G1Projective as HashToCurve<ExpandMsgXmd<Sha256>>>::hash_to_curve(msg, ID_HASH_DST)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_hash_deterministic() {
        assert_eq!(hash_to_g1(b"incident:42"), hash_to_g1(b"incident:42"));
        assert_ne!(hash_to_g1(b"incident:42"), hash_to_g1(b"incident:43"));
    }
}
