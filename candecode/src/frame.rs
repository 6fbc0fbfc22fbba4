use std::fmt;

use crate::sample::format_data_bytes;

/// A frame as delivered by the transport
#[derive(Debug, Clone, PartialEq)]
pub struct RawFrame {
    pub id: u32,
    /// 0-8 bytes
    pub data: Vec<u8>,
    /// Seconds, wall clock at reception
    pub timestamp: f64,
}

impl RawFrame {
    pub fn new(id: u32, data: &[u8], timestamp: f64) -> Self {
        Self {
            id,
            data: data.to_vec(),
            timestamp,
        }
    }
}

impl fmt::Display for RawFrame {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({:.6}) {:03X}#{}", self.timestamp, self.id, format_data_bytes(&self.data))
    }
}
