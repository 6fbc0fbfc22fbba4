use std::fmt;

use crate::error::{DecodeError, ensure_len};
use crate::sample::{Sample, Value};

pub const ID: u32 = 0x240;
pub const FIELDS: &[(&str, Value)] = &[
    ("calc_load", Value::Float(0.0)),
    ("ect", Value::Int(0)),
    ("can240_unknown1", Value::Int(0)),
    ("throttle_valve", Value::Float(0.0)),
    ("iat", Value::Int(0)),
];

/// Engine load and temperatures. Temperatures use the OBD offset-40 convention.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineLoad {
    /// %
    pub calc_load: f64,
    /// coolant, °C
    pub ect: i64,
    pub unknown1: i64,
    /// %
    pub throttle_valve: f64,
    /// intake air, °C
    pub iat: i64,
}

impl EngineLoad {
    pub fn from_bytes(data: &[u8]) -> Result<Self, DecodeError> {
        ensure_len(ID, data, 5)?;
        Ok(Self {
            calc_load: 100.0 * data[0] as f64 / 255.0,
            ect: data[1] as i64 - 40,
            unknown1: data[2] as i64,
            throttle_valve: 100.0 * data[3] as f64 / 255.0,
            iat: data[4] as i64 - 40,
        })
    }

    pub fn into_sample(self) -> Sample {
        let mut sample = Sample::new(ID);
        sample.push("calc_load", Value::Float(self.calc_load));
        sample.push("ect", Value::Int(self.ect));
        sample.push("can240_unknown1", Value::Int(self.unknown1));
        sample.push("throttle_valve", Value::Float(self.throttle_valve));
        sample.push("iat", Value::Int(self.iat));
        sample
    }
}

impl fmt::Display for EngineLoad {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Load: {:.1}% | ECT: {}°C | Throttle: {:.1}% | IAT: {}°C",
            self.calc_load, self.ect, self.throttle_valve, self.iat
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_engine_load_from_bytes() {
        let data = [0xFF, 0x82, 0x11, 0x00, 0x28, 0x00, 0x00, 0x00];
        let msg = EngineLoad::from_bytes(&data).unwrap();

        assert_eq!(msg.calc_load, 100.0);
        assert_eq!(msg.ect, 90);
        assert_eq!(msg.unknown1, 0x11);
        assert_eq!(msg.throttle_valve, 0.0);
        assert_eq!(msg.iat, 0);
    }

    #[test]
    fn test_engine_load_partial_scale() {
        let data = [0x80, 0x00, 0x00, 0x40, 0x00];
        let msg = EngineLoad::from_bytes(&data).unwrap();

        assert_abs_diff_eq!(msg.calc_load, 50.196, epsilon = 1e-3);
        assert_abs_diff_eq!(msg.throttle_valve, 25.098, epsilon = 1e-3);
        assert_eq!(msg.ect, -40);
        assert_eq!(msg.iat, -40);
    }

    #[test]
    fn test_engine_load_short_data() {
        assert!(EngineLoad::from_bytes(&[0x00; 4]).is_err());
    }
}
