//! Cross-chain state assertions.
//!
//! A [`Proof`] claims that `key → data` is present in a remote chain's
//! store at `height`. The engine never trusts `data` until the external
//! consensus-proof checker has authenticated it against the light-client
//! state of the zone's connection.

use serde::{Deserialize, Serialize};

/// One step of a Merkle proof chain, opaque to this engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofOp {
    #[serde(rename = "type")]
    pub op_type: String,
    #[serde(with = "hex_bytes")]
    pub key: Vec<u8>,
    #[serde(with = "hex_bytes")]
    pub data: Vec<u8>,
}

/// A remote key/value assertion with its proof ops.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proof {
    /// Remote block height the assertion is made against.
    pub height: u64,
    /// Store key on the remote chain.
    #[serde(with = "hex_bytes")]
    pub key: Vec<u8>,
    /// Raw value stored under `key`.
    #[serde(with = "hex_bytes")]
    pub data: Vec<u8>,
    /// Proof chain binding `key → data` to the remote app hash.
    #[serde(default)]
    pub proof_ops: Vec<ProofOp>,
}

impl Proof {
    #[must_use]
    pub fn new(height: u64, key: impl Into<Vec<u8>>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            height,
            key: key.into(),
            data: data.into(),
            proof_ops: Vec::new(),
        }
    }

    /// Hex rendering of the key, used in diagnostics.
    #[must_use]
    pub fn key_hex(&self) -> String {
        hex::encode(&self.key)
    }
}

mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(d)?;
        hex::decode(s).map_err(serde::de::Error::custom)
    }
}
