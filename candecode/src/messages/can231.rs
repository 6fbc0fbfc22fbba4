use std::fmt;

use crate::error::{DecodeError, ensure_len};
use crate::sample::{Sample, Value};

pub const ID: u32 = 0x231;
pub const FIELDS: &[(&str, Value)] = &[("clutch", Value::Bool(false)), ("gear_neutral", Value::Bool(false))];

#[derive(Debug, Clone, PartialEq)]
pub struct TransmissionSwitches {
    pub clutch: bool,
    pub gear_neutral: bool,
}

impl TransmissionSwitches {
    pub fn from_bytes(data: &[u8]) -> Result<Self, DecodeError> {
        ensure_len(ID, data, 2)?;
        Ok(Self {
            clutch: data[1] & 0x02 != 0,
            gear_neutral: data[1] & 0x04 != 0,
        })
    }

    pub fn into_sample(self) -> Sample {
        let mut sample = Sample::new(ID);
        sample.push("clutch", Value::Bool(self.clutch));
        sample.push("gear_neutral", Value::Bool(self.gear_neutral));
        sample
    }
}

impl fmt::Display for TransmissionSwitches {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Clutch: {} | Neutral: {}", self.clutch, self.gear_neutral)
    }
}
