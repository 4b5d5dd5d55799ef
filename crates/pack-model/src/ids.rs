//! Identity generation.
//!
//! Skin ids and manifest UUIDs come from an injected [`IdGenerator`] so tests
//! can run against predictable values.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Source of fresh, never-repeating identifiers.
pub trait IdGenerator: Send {
    fn next_uuid(&mut self) -> Uuid;
}

/// Random UUID v4 generator used outside of tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_uuid(&mut self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Deterministic generator: `00000000-0000-4000-8000-000000000001`, `...02`, ...
///
/// Values keep the v4 version and RFC 4122 variant bits so they are
/// indistinguishable in shape from random ones.
#[derive(Debug, Clone, Default)]
pub struct SequentialIds {
    counter: u64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ids handed out so far.
    pub fn issued(&self) -> u64 {
        self.counter
    }
}

impl IdGenerator for SequentialIds {
    fn next_uuid(&mut self) -> Uuid {
        self.counter += 1;
        let bits = (0x4000u128 << 64) | (0x8000u128 << 48) | u128::from(self.counter);
        Uuid::from_u128(bits)
    }
}

impl<G: IdGenerator + ?Sized> IdGenerator for Box<G> {
    fn next_uuid(&mut self) -> Uuid {
        (**self).next_uuid()
    }
}

/// Opaque identity of a skin within an editing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkinId(Uuid);

impl SkinId {
    pub fn new(ids: &mut dyn IdGenerator) -> Self {
        Self(ids.next_uuid())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for SkinId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl std::fmt::Display for SkinId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}
