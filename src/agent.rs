//! Agents and the ciphertexts they produce.

use crate::prf::prf;
use crate::util::{hash_to_g1, rand_scalar, G1_BYTES};
use crate::{Compress, SystemParameters};
use alloc::sync::Arc;
use arrayref::{array_refs, mut_array_refs};
use bls12_381::{G1Affine, G1Projective, Scalar};
use byteorder::{ByteOrder, LittleEndian};
use rand::{CryptoRng, RngCore};
use subtle::CtOption;

/// Serialized size of the agent index.
const INDEX_BYTES: usize = 4;

/// Serialized size of a [`Ciphertext`].
pub const CT_BYTES: usize = INDEX_BYTES + 2 * G1_BYTES;

/// An agent of the monitoring system: holds the private key material to encrypt status
/// values under a shared identifier.
///
/// Agents are created by [`generate_keys`](crate::generate_keys) and are immutable; one
/// agent can mint arbitrarily many ciphertexts.
#[derive(Clone, Debug)]
pub struct Agent<'a> {
    pub(crate) index: usize,
    pub(crate) g1alpha: G1Projective,
    pub(crate) beta: Arc<[Scalar]>,
    pub(crate) gamma: Scalar,
    pub(crate) sp: &'a SystemParameters,
}

/// An encryption of one agent's status value, bound to an identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ciphertext {
    pub(crate) index: usize,
    pub(crate) part1: G1Projective,
    pub(crate) part2: G1Projective,
}

impl<'a> Agent<'a> {
    /// The agent's position in the key generation order.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Encrypts `plaintext` for the given identifier.
    ///
    /// Draws fresh randomness on every call; encrypting the same inputs twice yields
    /// unequal ciphertexts that nevertheless match the same tokens.
    ///
    /// # Panics
    ///
    /// Panics if `plaintext` does not fit in the message-space bit width fixed at key
    /// generation (see [`prf`]).
    pub fn encrypt<R: RngCore + CryptoRng>(
        &self,
        identifier: &str,
        plaintext: u32,
        rng: &mut R,
    ) -> Ciphertext {
        let hid = hash_to_g1(identifier.as_bytes());
        let r = rand_scalar(rng);

        let part1 = self.sp.g1 * r;
        // ct2 = F(g1^alpha, beta, r, x) * H(id)^gamma
        let part2 = prf(&self.g1alpha, &self.beta, &r, plaintext) + hid * self.gamma;

        Ciphertext {
            index: self.index,
            part1,
            part2,
        }
    }
}

impl Ciphertext {
    /// Index of the agent that produced this ciphertext.
    pub fn index(&self) -> usize {
        self.index
    }
}

impl Compress for Ciphertext {
    const OUTPUT_SIZE: usize = CT_BYTES;
    type Output = [u8; Self::OUTPUT_SIZE];

    fn to_bytes(&self) -> [u8; CT_BYTES] {
        let mut buf = [0u8; CT_BYTES];
        let (index, part1, part2) = mut_array_refs![&mut buf, INDEX_BYTES, G1_BYTES, G1_BYTES];

        LittleEndian::write_u32(index, self.index as u32);
        *part1 = G1Affine::from(self.part1).to_compressed();
        *part2 = G1Affine::from(self.part2).to_compressed();

        buf
    }

    fn from_bytes(bytes: &[u8; CT_BYTES]) -> CtOption<Self> {
        let (index, part1, part2) = array_refs![bytes, INDEX_BYTES, G1_BYTES, G1_BYTES];

        let index = LittleEndian::read_u32(index) as usize;
        let part1 = G1Affine::from_compressed(part1);
        let part2 = G1Affine::from_compressed(part2);

        part1.and_then(|p1| {
            part2.map(|p2| Ciphertext {
                index,
                part1: p1.into(),
                part2: p2.into(),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate_keys;

    #[test]
    fn encryption_is_randomized() {
        let mut rng = rand::thread_rng();
        let sp = SystemParameters::setup(&mut rng);
        let (_, agents) = generate_keys(&sp, 1, 4, &mut rng);

        let c1 = agents[0].encrypt("incident:42", 5, &mut rng);
        let c2 = agents[0].encrypt("incident:42", 5, &mut rng);

        assert_eq!(c1.index(), 0);
        assert_ne!(c1.part1, c2.part1);
        assert_ne!(c1.part2, c2.part2);
    }

    #[test]
    fn eq_serialize_deserialize() {
        let mut rng = rand::thread_rng();
        let sp = SystemParameters::setup(&mut rng);
        let (_, agents) = generate_keys(&sp, 3, 4, &mut rng);

        let c = agents[2].encrypt("incident:42", 9, &mut rng);
        let c2 = Ciphertext::from_bytes(&c.to_bytes()).unwrap();

        assert_eq!(c, c2);
        assert_eq!(c2.index(), 2);
    }
}
