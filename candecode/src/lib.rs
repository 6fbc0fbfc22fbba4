//! Vehicle CAN decoding library
//!
//! Turns raw CAN frames from a passenger car bus into named engineering-unit
//! samples:
//! - A fixed table of hand-written decoders keyed by identifier, with a raw
//!   passthrough default for identifiers whose layout is unknown
//! - A dispatcher that routes frames to their decoder and hands samples to a
//!   post-hook, tracking bus liveness
//! - SocketCAN helpers to open the interface and install filters derived from
//!   the decoder table
//!
//! # Example
//!
//! ```no_run
//! use candecode::{CanBus, DecoderRegistry, FrameDispatcher, Sample};
//!
//! let registry = DecoderRegistry::with_default_decoders();
//! let socket = CanBus::open_can_socket_with_retry("vcan0");
//! CanBus::configure_socket(&socket, &registry.filters(false)).unwrap();
//!
//! let mut dispatcher = FrameDispatcher::new(registry, |sample: &Sample, t: f64| {
//!     println!("{:.3} {}", t, sample);
//! });
//!
//! loop {
//!     if let Ok(Some(frame)) = CanBus::read_raw_frame(&socket, || 0.0) {
//!         dispatcher.on_frame(&frame);
//!     }
//! }
//! ```

pub mod canbus;
pub mod decoder;
pub mod dispatcher;
pub mod error;
pub mod frame;
pub mod messages;
pub mod registry;
pub mod sample;
pub mod sample_handler;

pub use canbus as CanBus;
pub use decoder::{DecodeKind, Decoder, raw_field_name};
pub use dispatcher::{DEFAULT_BUS_TIMEOUT_SECS, DispatchOutcome, DispatchStats, FrameDispatcher, is_stale};
pub use error::{DecodeError, RegistryError};
pub use frame::RawFrame;
pub use registry::{DecoderRegistry, IdFilter};
pub use socketcan::CanSocket;
pub use sample::{Sample, Value, format_data_bytes};
pub use sample_handler::SampleHandler;
