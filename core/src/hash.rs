//! State hashing and the hash-log diagnostic line.
//!
//! RULE: A hash is a pure function of state bits. No addresses,
//! no wall-clock, no map iteration order. Fields are mixed in
//! declaration order, and that order is part of the contract.

use crate::{
    fixed::Fixed,
    types::{StateHash, Tick},
};
use std::fmt;
use std::str::FromStr;

/// Golden-ratio mixing constant.
pub const HASH_K: u64 = 0x9e37_79b9_7f4a_7c15;

/// Accumulator seed for every fresh hash.
pub const HASH_SEED: u64 = 0;

/// `acc ^ (value + K + (acc << 6) + (acc >> 2))`, all mod 2^64.
#[inline]
pub const fn hash_combine(acc: u64, value: u64) -> u64 {
    acc ^ value
        .wrapping_add(HASH_K)
        .wrapping_add(acc << 6)
        .wrapping_add(acc >> 2)
}

/// Incremental field hasher used by every `SystemState` variant.
#[derive(Debug, Clone, Copy)]
pub struct StateHasher {
    acc: u64,
}

impl StateHasher {
    pub fn new() -> Self {
        Self { acc: HASH_SEED }
    }

    /// Mix a fixed-point field, quantized to trunc(value × 1000).
    pub fn fixed(mut self, value: Fixed) -> Self {
        self.acc = hash_combine(self.acc, value.quantize_milli() as u64);
        self
    }

    pub fn u64(mut self, value: u64) -> Self {
        self.acc = hash_combine(self.acc, value);
        self
    }

    pub fn finish(self) -> StateHash {
        self.acc
    }
}

impl Default for StateHasher {
    fn default() -> Self { Self::new() }
}

/// One line of a hash log: `tick=<decimal> hash=0x<16 lowercase hex>`.
///
/// The format is stable so logs from different runs or machines
/// can be diffed by external tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashRecord {
    pub tick: Tick,
    pub hash: StateHash,
}

impl fmt::Display for HashRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tick={} hash=0x{:016x}", self.tick, self.hash)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseHashRecordError(String);

impl fmt::Display for ParseHashRecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "malformed hash record: {}", self.0)
    }
}

impl std::error::Error for ParseHashRecordError {}

impl FromStr for HashRecord {
    type Err = ParseHashRecordError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let err = || ParseHashRecordError(line.to_string());
        let mut parts = line.split_whitespace();
        let tick = parts
            .next()
            .and_then(|p| p.strip_prefix("tick="))
            .and_then(|t| t.parse::<Tick>().ok())
            .ok_or_else(err)?;
        let hex = parts
            .next()
            .and_then(|p| p.strip_prefix("hash=0x"))
            .filter(|h| h.len() == 16)
            .ok_or_else(err)?;
        let hash = u64::from_str_radix(hex, 16).map_err(|_| err())?;
        if parts.next().is_some() {
            return Err(err());
        }
        Ok(Self { tick, hash })
    }
}
