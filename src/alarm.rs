//! The alarm system: evaluates rule tokens against ciphertext sets.

use crate::util::hash_to_g1;
use crate::{Ciphertext, Error, RuleToken};
use alloc::vec::Vec;
use bls12_381::{multi_miller_loop, G1Affine, G1Projective, G2Affine, G2Prepared};

/// Holds one token for one identifier and tests ciphertext sets against it.
///
/// The alarm system learns nothing beyond the boolean outcome: neither the encrypted
/// statuses nor the rule values the token encodes.
pub struct AlarmSystem {
    token: RuleToken,
    hid: G1Projective,
}

impl AlarmSystem {
    /// Creates an alarm system for the given token and identifier.
    pub fn new(token: RuleToken, identifier: &str) -> Self {
        AlarmSystem {
            token,
            hid: hash_to_g1(identifier.as_bytes()),
        }
    }

    /// Tests whether the ciphertexts satisfy the token's rule.
    ///
    /// `ciphertexts` is indexed by agent position: the ciphertext of agent `i` must sit
    /// at position `i` for every position the token constrains. Fails with
    /// [`Error::IndexOutOfRange`] when a constrained position is missing from the slice.
    ///
    /// Returns `true` exactly when, for every constrained position, the encrypted status
    /// equals the rule value and the ciphertext was bound to this alarm's identifier.
    pub fn test(&self, ciphertexts: &[Ciphertext]) -> Result<bool, Error> {
        let n = self.token.indices.len();
        let mut lhs = Vec::with_capacity(n + 1);
        let mut rhs = Vec::with_capacity(n);

        for (k, &i) in self.token.indices.iter().enumerate() {
            let ct = ciphertexts.get(i).ok_or(Error::IndexOutOfRange)?;
            lhs.push((
                G1Affine::from(ct.part1),
                G2Prepared::from(G2Affine::from(self.token.f2u[k])),
            ));
            rhs.push((
                G1Affine::from(ct.part2),
                G2Prepared::from(G2Affine::from(self.token.g2u[k])),
            ));
        }
        lhs.push((
            G1Affine::from(self.hid),
            G2Prepared::from(G2Affine::from(self.token.product)),
        ));

        // prod_i e(ct1_i, f2u_i) * e(H(id), product) == prod_i e(ct2_i, g2u_i)
        let lhs_terms: Vec<_> = lhs.iter().map(|(g, h)| (g, h)).collect();
        let rhs_terms: Vec<_> = rhs.iter().map(|(g, h)| (g, h)).collect();
        let p1 = multi_miller_loop(&lhs_terms).final_exponentiation();
        let p2 = multi_miller_loop(&rhs_terms).final_exponentiation();

        Ok(p1 == p2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{generate_keys, Agent, RuleGenerator, SystemParameters};
    use alloc::vec::Vec;

    const ID: &str = "incident:42";

    fn encrypt_all(agents: &[Agent], id: &str, statuses: &[u32]) -> Vec<Ciphertext> {
        let mut rng = rand::thread_rng();
        agents
            .iter()
            .zip(statuses)
            .map(|(agent, &status)| agent.encrypt(id, status, &mut rng))
            .collect()
    }

    fn test_with(rg: &RuleGenerator, cts: &[Ciphertext], rules: &[i32], id: &str) -> bool {
        let mut rng = rand::thread_rng();
        let token = rg.new_token(rules, &mut rng).unwrap();
        AlarmSystem::new(token, id).test(cts).unwrap()
    }

    #[test]
    fn matching_statuses_satisfy_the_rule() {
        let mut rng = rand::thread_rng();
        let sp = SystemParameters::setup(&mut rng);
        let (rg, agents) = generate_keys(&sp, 3, 4, &mut rng);
        let cts = encrypt_all(&agents, ID, &[5, 3, 7]);

        assert!(test_with(&rg, &cts, &[5, 3, 7], ID));
    }

    #[test]
    fn one_changed_rule_value_fails() {
        let mut rng = rand::thread_rng();
        let sp = SystemParameters::setup(&mut rng);
        let (rg, agents) = generate_keys(&sp, 3, 4, &mut rng);
        let cts = encrypt_all(&agents, ID, &[5, 3, 7]);

        assert!(test_with(&rg, &cts, &[5, 3, 7], ID));
        assert!(!test_with(&rg, &cts, &[5, 4, 7], ID));
        assert!(!test_with(&rg, &cts, &[4, 3, 7], ID));
        assert!(!test_with(&rg, &cts, &[5, 3, 6], ID));
    }

    #[test]
    fn wildcard_positions_are_ignored() {
        let mut rng = rand::thread_rng();
        let sp = SystemParameters::setup(&mut rng);
        let (rg, agents) = generate_keys(&sp, 3, 7, &mut rng);

        // Whatever agent 1 reports, rules [5, *, 7] hold.
        for status1 in [3u32, 99] {
            let cts = encrypt_all(&agents, ID, &[5, status1, 7]);
            assert!(test_with(&rg, &cts, &[5, -1, 7], ID));
        }

        // An all-wildcard rule constrains nothing.
        let cts = encrypt_all(&agents, ID, &[1, 2, 3]);
        assert!(test_with(&rg, &cts, &[-1, -1, -1], ID));
    }

    #[test]
    fn identifiers_must_match() {
        let mut rng = rand::thread_rng();
        let sp = SystemParameters::setup(&mut rng);
        let (rg, agents) = generate_keys(&sp, 3, 4, &mut rng);
        let cts = encrypt_all(&agents, ID, &[5, 3, 7]);

        assert!(test_with(&rg, &cts, &[5, 3, 7], ID));
        assert!(!test_with(&rg, &cts, &[5, 3, 7], "incident:43"));
    }

    #[test]
    fn missing_ciphertext_is_an_error() {
        let mut rng = rand::thread_rng();
        let sp = SystemParameters::setup(&mut rng);
        let (rg, agents) = generate_keys(&sp, 3, 4, &mut rng);
        let cts = encrypt_all(&agents, ID, &[5, 3, 7]);

        let token = rg.new_token(&[5, 3, 7], &mut rng).unwrap();
        let alarm = AlarmSystem::new(token, ID);
        assert_eq!(alarm.test(&cts[..2]).unwrap_err(), Error::IndexOutOfRange);

        // With the constrained position missing only by wildcard, two ciphertexts do.
        let token = rg.new_token(&[5, 3, -1], &mut rng).unwrap();
        let alarm = AlarmSystem::new(token, ID);
        assert_eq!(alarm.test(&cts[..2]), Ok(true));
    }
}
