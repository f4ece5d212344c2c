//! System parameters and key generation.
//!
//! [`SystemParameters::setup`] fixes the two group generators everything else is computed
//! against. [`generate_keys`] then mints one key bundle per agent together with the rule
//! generator that collects the agents' public counterparts.

use crate::agent::Agent;
use crate::rule::{AgentInfo, RuleGenerator};
use crate::util::{rand_g1, rand_g2, rand_scalar};
use crate::Error;
use alloc::sync::Arc;
use alloc::vec::Vec;
use bls12_381::{G1Projective, G2Projective, Scalar};
use rand::{CryptoRng, RngCore};

/// The public system parameters: one random generator per source group.
///
/// A single instance is shared (by reference) between the agents, the rule generator and
/// the alarm systems derived from one key generation. The pairing itself needs no handle;
/// it is fixed by the curve.
#[derive(Clone, Copy, Debug)]
pub struct SystemParameters {
    pub(crate) g1: G1Projective,
    pub(crate) g2: G2Projective,
}

impl SystemParameters {
    /// Samples fresh system parameters.
    pub fn setup<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        SystemParameters {
            g1: rand_g1(rng),
            g2: rand_g2(rng),
        }
    }

    /// Loads system parameters from a persisted representation.
    ///
    /// The storage format is an unspecified external interface; this always returns
    /// [`Error::NotImplemented`] and callers must not depend on it.
    pub fn from_bytes(_bytes: &[u8]) -> Result<Self, Error> {
        Err(Error::NotImplemented)
    }
}

/// Generates keys for `n` agents and the rule generator (the setup algorithm).
///
/// Every agent gets a fresh `alpha`, `gamma` and a `message_bits`-sized `beta` vector;
/// the rule generator receives `g2^alpha`, `g2^gamma` and the *same* beta vector (a
/// shared allocation, not a copy — the scheme derives agent and rule PRF keys from the
/// identical vector). Plaintexts handled by these keys must fit in `message_bits` bits.
pub fn generate_keys<'a, R: RngCore + CryptoRng>(
    sp: &'a SystemParameters,
    n: usize,
    message_bits: usize,
    rng: &mut R,
) -> (RuleGenerator<'a>, Vec<Agent<'a>>) {
    let mut infos = Vec::with_capacity(n);
    let mut agents = Vec::with_capacity(n);

    for index in 0..n {
        let alpha = rand_scalar(rng);
        let gamma = rand_scalar(rng);
        let beta: Arc<[Scalar]> = (0..message_bits).map(|_| rand_scalar(rng)).collect();

        infos.push(AgentInfo {
            g2alpha: sp.g2 * alpha,
            beta: beta.clone(),
            g2gamma: sp.g2 * gamma,
        });
        agents.push(Agent {
            index,
            g1alpha: sp.g1 * alpha,
            beta,
            gamma,
            sp,
        });
    }

    (RuleGenerator { agents: infos, sp }, agents)
}
