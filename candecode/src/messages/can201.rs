use std::fmt;

use crate::error::{DecodeError, ensure_len};
use crate::sample::{Sample, Value};

pub const ID: u32 = 0x201;
pub const FIELDS: &[(&str, Value)] = &[
    ("rpm", Value::Float(0.0)),
    ("speed", Value::Float(0.0)),
    ("accpos", Value::Float(0.0)),
    ("can201_unknown1", Value::Int(0)),
];

/// Engine speed, vehicle speed and accelerator position.
///
/// Byte pairs are combined with a multiplier of 255, not 256. The scaling was
/// reverse engineered against the instrument cluster and has to stay as is.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineSpeed {
    pub rpm: f64,
    /// kph, offset by -100
    pub speed: f64,
    /// 0-100
    pub accpos: f64,
    /// Meaning unresolved, kept for diagnostics
    pub unknown1: i64,
}

impl EngineSpeed {
    pub fn from_bytes(data: &[u8]) -> Result<Self, DecodeError> {
        ensure_len(ID, data, 7)?;
        Ok(Self {
            rpm: (data[0] as f64 * 255.0 + data[1] as f64) / 4.0,
            speed: (data[4] as f64 * 255.0 + data[5] as f64) / 100.0 - 100.0,
            accpos: data[6] as f64 / 2.0,
            unknown1: (data[2] as i64 * 255 + data[3] as i64) - 0x7FFF,
        })
    }

    pub fn into_sample(self) -> Sample {
        let mut sample = Sample::new(ID);
        sample.push("rpm", Value::Float(self.rpm));
        sample.push("speed", Value::Float(self.speed));
        sample.push("accpos", Value::Float(self.accpos));
        sample.push("can201_unknown1", Value::Int(self.unknown1));
        sample
    }
}

impl fmt::Display for EngineSpeed {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "RPM: {:.0} | Speed: {:.2} kph | Accel: {:.1}% | U1: {}",
            self.rpm, self.speed, self.accpos, self.unknown1
        )
    }
}
