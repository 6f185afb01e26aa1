//! Recoverable signature wrapper.
//!
//! The engine treats signatures as opaque 65-byte blobs in the
//! `r ‖ s ‖ v` layout, with `v ∈ {27, 28}`. Parsing and recovery live in
//! `custodia-identity`; this crate only carries the bytes around.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

/// A 65-byte recoverable ECDSA signature: `r(32) ‖ s(32) ‖ v(1)`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature(pub [u8; 65]);

impl Signature {
    #[must_use]
    pub fn from_bytes(bytes: [u8; 65]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 65] {
        &self.0
    }

    /// The `r` component.
    #[must_use]
    pub fn r(&self) -> &[u8] {
        &self.0[..32]
    }

    /// The `s` component.
    #[must_use]
    pub fn s(&self) -> &[u8] {
        &self.0[32..64]
    }

    /// The recovery byte, expected to be 27 or 28.
    #[must_use]
    pub fn v(&self) -> u8 {
        self.0[64]
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature(0x{})", hex::encode(self.0))
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

// serde derive only covers arrays up to 32 bytes, so the 65-byte blob
// serializes as a hex string — which is also the friendlier wire form.
impl Serialize for Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(self.0))
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let raw = hex::decode(s.trim_start_matches("0x")).map_err(de::Error::custom)?;
        let bytes: [u8; 65] = raw
            .try_into()
            .map_err(|_| de::Error::custom("signature must be exactly 65 bytes"))?;
        Ok(Self(bytes))
    }
}
