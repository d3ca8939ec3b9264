// trade_core/src/ids.rs

//! Record identifiers.
//!
//! Every document carries a 12-byte identifier rendered as 24 lowercase
//! hexadecimal characters: a 4-byte big-endian creation timestamp (seconds),
//! 5 bytes of per-process randomness and a 3-byte wrapping counter.

use crate::error::{TradeError, TradeResult};
use once_cell::sync::Lazy;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering};

pub const OBJECT_ID_HEX_LEN: usize = 24;

static PROCESS_UNIQUE: Lazy<[u8; 5]> = Lazy::new(|| {
  let random = uuid::Uuid::new_v4();
  let mut bytes = [0u8; 5];
  bytes.copy_from_slice(&random.as_bytes()[..5]);
  bytes
});

static COUNTER: Lazy<AtomicU32> = Lazy::new(|| {
  let random = uuid::Uuid::new_v4();
  let seed = random.as_bytes();
  AtomicU32::new(u32::from_be_bytes([0, seed[0], seed[1], seed[2]]))
});

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId([u8; 12]);

impl ObjectId {
  pub fn new() -> Self {
    let secs = chrono::Utc::now().timestamp().clamp(0, u32::MAX as i64) as u32;
    let count = COUNTER.fetch_add(1, Ordering::SeqCst) & 0x00FF_FFFF;

    let mut bytes = [0u8; 12];
    bytes[..4].copy_from_slice(&secs.to_be_bytes());
    bytes[4..9].copy_from_slice(&*PROCESS_UNIQUE);
    bytes[9..].copy_from_slice(&count.to_be_bytes()[1..]);
    ObjectId(bytes)
  }

  /// Parses the 24-character hex form. Upper- and lowercase digits are accepted.
  pub fn parse_str(value: &str) -> TradeResult<Self> {
    let invalid = || TradeError::InvalidObjectId {
      value: value.to_string(),
    };
    if value.len() != OBJECT_ID_HEX_LEN {
      return Err(invalid());
    }
    let mut bytes = [0u8; 12];
    hex::decode_to_slice(value, &mut bytes).map_err(|_| invalid())?;
    Ok(ObjectId(bytes))
  }

  pub fn to_hex(&self) -> String {
    hex::encode(self.0)
  }

  pub fn timestamp_secs(&self) -> u32 {
    u32::from_be_bytes([self.0[0], self.0[1], self.0[2], self.0[3]])
  }
}

impl Default for ObjectId {
  fn default() -> Self {
    Self::new()
  }
}

impl FromStr for ObjectId {
  type Err = TradeError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::parse_str(s)
  }
}

impl fmt::Display for ObjectId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.to_hex())
  }
}

impl fmt::Debug for ObjectId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "ObjectId({})", self.to_hex())
  }
}

impl Serialize for ObjectId {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&self.to_hex())
  }
}

impl<'de> Deserialize<'de> for ObjectId {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let raw = String::deserialize(deserializer)?;
    ObjectId::parse_str(&raw).map_err(serde::de::Error::custom)
  }
}
