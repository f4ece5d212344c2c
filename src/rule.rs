//! The rule generator and the tokens it issues.
//!
//! A rule is a slice of signed integers, one per agent in key generation order. A
//! non-negative entry constrains that agent's status to exactly that value; a negative
//! entry is a wildcard and leaves the position unconstrained.

use crate::prf::prf;
use crate::util::rand_scalar;
use crate::{Error, SystemParameters};
use alloc::sync::Arc;
use alloc::vec::Vec;
use bls12_381::{G2Projective, Scalar};
use group::Group;
use rand::{CryptoRng, RngCore};

/// Public information about one agent, held by the rule generator.
///
/// `beta` is the same shared vector the agent itself holds; only `alpha` and `gamma`
/// appear in blinded (`g2`-exponentiated) form.
#[derive(Clone, Debug)]
pub(crate) struct AgentInfo {
    pub(crate) g2alpha: G2Projective,
    pub(crate) beta: Arc<[Scalar]>,
    pub(crate) g2gamma: G2Projective,
}

/// Issues encrypted conjunctive rules over the statuses of the agents it knows about.
#[derive(Clone, Debug)]
pub struct RuleGenerator<'a> {
    pub(crate) agents: Vec<AgentInfo>,
    pub(crate) sp: &'a SystemParameters,
}

/// An encrypted rule: the token an [`AlarmSystem`](crate::AlarmSystem) evaluates.
///
/// The three lists run in parallel over the constrained (non-wildcard) positions only;
/// `product` aggregates the blinded `gamma` keys of exactly those positions.
#[derive(Clone, Debug)]
pub struct RuleToken {
    pub(crate) indices: Vec<usize>,
    pub(crate) g2u: Vec<G2Projective>,
    pub(crate) f2u: Vec<G2Projective>,
    pub(crate) product: G2Projective,
}

impl RuleToken {
    /// The agent positions this token constrains, in increasing order.
    ///
    /// Wildcard positions do not occur here and never influence a test outcome.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }
}

impl<'a> RuleGenerator<'a> {
    /// Generates a token for the given rule. Negative entries denote wildcards.
    ///
    /// Fails with [`Error::RuleCountMismatch`] when `rules` has fewer entries than there
    /// are agents. A longer slice is accepted and its surplus tail ignored; whether that
    /// ought to be rejected as well is left open here, so the check is deliberately the
    /// lenient one.
    pub fn new_token<R: RngCore + CryptoRng>(
        &self,
        rules: &[i32],
        rng: &mut R,
    ) -> Result<RuleToken, Error> {
        if rules.len() < self.agents.len() {
            return Err(Error::RuleCountMismatch);
        }

        let mut token = RuleToken {
            indices: Vec::with_capacity(self.agents.len()),
            g2u: Vec::with_capacity(self.agents.len()),
            f2u: Vec::with_capacity(self.agents.len()),
            // Initialized to the identity as every rule multiplies something into it.
            product: G2Projective::identity(),
        };

        for (i, (&v, info)) in rules.iter().zip(self.agents.iter()).enumerate() {
            if v < 0 {
                continue;
            }

            let u = rand_scalar(rng);
            token.indices.push(i);
            token.g2u.push(self.sp.g2 * u);
            // Note the binding: u plays the role the encryption randomness r plays on
            // the agent side, and the rule value is the PRF input. The test equation
            // only cancels with exactly this arrangement.
            token.f2u.push(prf(&info.g2alpha, &info.beta, &u, v as u32));
            token.product += info.g2gamma * u;
        }

        Ok(token)
    }
}
