//! Namespace fingerprints
//!
//! Provides [`Fingerprint`], a 32-byte Blake3 digest of a compiled constant
//! table. Two compilations with the same constants, declared at the same
//! paths, have the same fingerprint regardless of declaration order.

use crate::action::ActionType;
use crate::compile::ConstantInfo;
use std::fmt::{self, Display, Formatter};

/// Blake3 digest of a compiled constant table
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    /// Fingerprint of a constant table
    ///
    /// Entries are sorted by constant. Each contributes its constant, its
    /// dotted declaration path and its phase, all NUL-terminated, so the same
    /// constants declared under a different shape hash differently.
    #[must_use]
    pub fn of<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a ActionType, &'a ConstantInfo)>,
    {
        let mut sorted: Vec<_> = entries.into_iter().collect();
        sorted.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));

        let mut hasher = blake3::Hasher::new();
        for (constant, info) in sorted {
            hasher.update(constant.as_str().as_bytes());
            hasher.update(&[0]);
            hasher.update(info.path.to_string().as_bytes());
            hasher.update(&[0]);
            hasher.update(info.phase.map_or("", |phase| phase.as_str()).as_bytes());
            hasher.update(&[0]);
        }
        Self(*hasher.finalize().as_bytes())
    }

    /// Short string representation (first 16 hex chars)
    #[inline]
    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..8])
    }
}

impl Display for Fingerprint {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}
