//! Lockstep sync contract.
//!
//! Components that must agree across simulation replicas list their
//! synced fields explicitly through [`SyncState`]. The host folds those
//! fields into a per-tick hash with [`SyncHasher`]; two replicas that
//! produce different hashes for the same tick have desynced.

use serde::Serialize;

/// Value of a single synced field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SyncValue {
    Bool(bool),
    Int(i64),
    Float(f64),
}

/// A named synced field, as reported to the replay/diff tooling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SyncField {
    pub name: &'static str,
    pub value: SyncValue,
}

/// A component exposing fields for cross-replica comparison.
pub trait SyncState {
    /// Synced fields in a stable order. The order is part of the contract.
    fn sync_fields(&self) -> Vec<SyncField>;
}

impl SyncField {
    pub fn new(name: &'static str, value: SyncValue) -> Self {
        Self { name, value }
    }
}

impl From<bool> for SyncValue {
    fn from(v: bool) -> Self {
        SyncValue::Bool(v)
    }
}

impl From<i64> for SyncValue {
    fn from(v: i64) -> Self {
        SyncValue::Int(v)
    }
}

impl From<f64> for SyncValue {
    fn from(v: f64) -> Self {
        SyncValue::Float(v)
    }
}

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// 64-bit FNV-1a accumulator.
///
/// Floats are hashed by bit pattern, so `-0.0` and `0.0` differ.
#[derive(Debug, Clone, Copy)]
pub struct SyncHasher {
    state: u64,
}

impl Default for SyncHasher {
    fn default() -> Self {
        Self {
            state: FNV_OFFSET_BASIS,
        }
    }
}

impl SyncHasher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        for byte in bytes {
            self.state ^= u64::from(*byte);
            self.state = self.state.wrapping_mul(FNV_PRIME);
        }
    }

    pub fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    pub fn write_value(&mut self, value: SyncValue) {
        match value {
            SyncValue::Bool(b) => self.write_bytes(&[u8::from(b)]),
            SyncValue::Int(i) => self.write_bytes(&i.to_le_bytes()),
            SyncValue::Float(f) => self.write_u64(f.to_bits()),
        }
    }

    /// Fold every field of a component. Names are not hashed; only the
    /// order and values are.
    pub fn write_state<S: SyncState + ?Sized>(&mut self, state: &S) {
        for field in state.sync_fields() {
            self.write_value(field.value);
        }
    }

    pub fn finish(&self) -> u64 {
        self.state
    }
}
