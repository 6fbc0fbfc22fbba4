pub mod can200;
pub mod can201;
pub mod can231;
pub mod can240;

pub use can200::BrakeStatus;
pub use can201::EngineSpeed;
pub use can231::TransmissionSwitches;
pub use can240::EngineLoad;

/// Identifiers seen on the bus whose layout is still unknown. They are
/// decoded as raw payload only.
pub const PASSTHROUGH_IDS: &[u32] = &[0x211, 0x212, 0x215, 0x420, 0x430];
