use std::fmt;

use crate::error::{DecodeError, ensure_len};
use crate::sample::{Sample, Value};

pub const ID: u32 = 0x200;
/// Emitted fields with their value before any frame arrives
pub const FIELDS: &[(&str, Value)] = &[("brake", Value::Bool(false))];

/// Brake switch state
#[derive(Debug, Clone, PartialEq)]
pub struct BrakeStatus {
    pub brake: bool,
}

impl BrakeStatus {
    pub fn from_bytes(data: &[u8]) -> Result<Self, DecodeError> {
        ensure_len(ID, data, 7)?;
        Ok(Self { brake: data[6] & 0x01 != 0 })
    }

    pub fn into_sample(self) -> Sample {
        let mut sample = Sample::new(ID);
        sample.push("brake", Value::Bool(self.brake));
        sample
    }
}

impl fmt::Display for BrakeStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Brake: {}", if self.brake { "ON" } else { "off" })
    }
}
