//! Multi-client predicate-only encryption for conjunctive equality tests on the
//! [BLS12-381 pairing-friendly elliptic curve](https://github.com/zkcrypto/bls12_381) in Rust.
//! * From: "Multi-client Predicate-only Encryption for Conjunctive Equality Tests" (van de Kamp, Peter, Everts, Jonker)
//!
//! Several independent agents each encrypt a small integer status value bound to a shared
//! identifier. A trusted rule generator issues an encrypted conjunctive predicate (a
//! [`RuleToken`]) over the agents' expected statuses, with optional per-agent wildcards.
//! An [`AlarmSystem`] holding such a token learns a single bit about a set of ciphertexts:
//! whether every constrained agent encrypted exactly the expected status for that
//! identifier. It learns neither the statuses nor the rule values.
//!
//! # Example
//!
//! ```
//! use mcpoe::{generate_keys, AlarmSystem, SystemParameters};
//!
//! let mut rng = rand::thread_rng();
//!
//! // One-time setup: system parameters and per-agent keys.
//! let sp = SystemParameters::setup(&mut rng);
//! let (rg, agents) = generate_keys(&sp, 3, 4, &mut rng);
//!
//! // Each agent reports its status for the same identifier.
//! let cts: Vec<_> = agents
//!     .iter()
//!     .zip([5u32, 3, 7])
//!     .map(|(agent, status)| agent.encrypt("incident:42", status, &mut rng))
//!     .collect();
//!
//! // A rule over agents 0 and 2; agent 1 is a wildcard.
//! let token = rg.new_token(&[5, -1, 7], &mut rng).unwrap();
//!
//! let alarm = AlarmSystem::new(token, "incident:42");
//! assert_eq!(alarm.test(&cts), Ok(true));
//! ```
//!
//! # Security notes
//!
//! This implementation is **not** constant-time: in particular the pseudorandom function
//! [`prf`](crate::prf::prf) walks the bit pattern of its input (see its documentation).
//! Do not deploy it where side channels on status values are a concern without further
//! hardening.

#![no_std]

#[cfg(test)]
extern crate std;

extern crate alloc;

mod util;

pub mod agent;
pub mod alarm;
pub mod prf;
pub mod rule;
pub mod setup;

pub use agent::{Agent, Ciphertext};
pub use alarm::AlarmSystem;
pub use rule::{RuleGenerator, RuleToken};
pub use setup::{generate_keys, SystemParameters};

/// Errors surfaced by the scheme's fallible operations.
///
/// All failures are returned directly to the caller; none is retried or masked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// The rule slice handed to [`RuleGenerator::new_token`] has fewer positions than
    /// there are agents.
    RuleCountMismatch,
    /// The token constrains an agent position for which no ciphertext was supplied to
    /// [`AlarmSystem::test`].
    IndexOutOfRange,
    /// Loading persisted system parameters is an unspecified external interface.
    NotImplemented,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::RuleCountMismatch => {
                write!(f, "number of rule components does not match number of agents")
            }
            Error::IndexOutOfRange => {
                write!(f, "token references a ciphertext index that was not supplied")
            }
            Error::NotImplemented => write!(f, "not implemented"),
        }
    }
}

/// Artifacts of the system that can be compressed should implement this trait.
pub trait Compress: Copy {
    const OUTPUT_SIZE: usize;
    type Output: Sized + Copy + Clone + AsRef<[u8]>;

    /// Compresses this artifact to a short serialized byte representation.
    fn to_bytes(&self) -> Self::Output;

    /// Decompresses a serialized artifact.
    fn from_bytes(output: &Self::Output) -> subtle::CtOption<Self>;
}
