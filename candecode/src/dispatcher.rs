use tracing::{debug, warn};

use crate::frame::RawFrame;
use crate::registry::DecoderRegistry;
use crate::sample_handler::SampleHandler;

/// Silence on the bus longer than this means the bus is down
pub const DEFAULT_BUS_TIMEOUT_SECS: f64 = 1.0;

/// What happened to a frame handed to [`FrameDispatcher::on_frame`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Delivered,
    Unknown,
    DecodeFailed,
}

/// Per-outcome frame counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStats {
    pub delivered: u64,
    pub unknown: u64,
    pub decode_failed: u64,
}

impl DispatchStats {
    pub fn total(&self) -> u64 {
        self.delivered + self.unknown + self.decode_failed
    }
}

/// Routes raw frames to their decoder and hands the result to the post-hook.
///
/// Frames with no decoder and frames that fail to decode are dropped with a
/// diagnostic; neither reaches the hook, so downstream state never sees a
/// partial sample.
pub struct FrameDispatcher<H: SampleHandler> {
    registry: DecoderRegistry,
    hook: H,
    last_live: Option<f64>,
    stats: DispatchStats,
}

impl<H: SampleHandler> FrameDispatcher<H> {
    pub fn new(registry: DecoderRegistry, hook: H) -> Self {
        Self {
            registry,
            hook,
            last_live: None,
            stats: DispatchStats::default(),
        }
    }

    pub fn on_frame(&mut self, frame: &RawFrame) -> DispatchOutcome {
        let Some(decoder) = self.registry.lookup(frame.id) else {
            debug!("No decoder for 0x{:03X}, dropping frame", frame.id);
            self.stats.unknown += 1;
            return DispatchOutcome::Unknown;
        };

        match decoder.decode(&frame.data) {
            Ok(sample) => {
                self.hook.handle_sample(&sample, frame.timestamp);
                self.last_live = Some(frame.timestamp);
                self.stats.delivered += 1;
                DispatchOutcome::Delivered
            }
            Err(e) => {
                warn!("Dropping frame {}: {}", frame, e);
                self.stats.decode_failed += 1;
                DispatchOutcome::DecodeFailed
            }
        }
    }

    /// Timestamp of the most recent successfully decoded frame
    pub fn last_live(&self) -> Option<f64> {
        self.last_live
    }

    pub fn is_bus_down(&self, now: f64, timeout_secs: f64) -> bool {
        is_stale(self.last_live, now, timeout_secs)
    }

    pub fn registry(&self) -> &DecoderRegistry {
        &self.registry
    }

    pub fn hook(&self) -> &H {
        &self.hook
    }

    pub fn stats(&self) -> DispatchStats {
        self.stats
    }

    /// Returns the counters accumulated since the last call and clears them
    pub fn take_stats(&mut self) -> DispatchStats {
        std::mem::take(&mut self.stats)
    }
}

/// True when nothing has been seen yet, or the last event is older than `timeout_secs`
pub fn is_stale(last: Option<f64>, now: f64, timeout_secs: f64) -> bool {
    match last {
        Some(last) => now - last > timeout_secs,
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::{Sample, Value};

    fn recording_dispatcher() -> FrameDispatcher<impl FnMut(&Sample, f64)> {
        let registry = DecoderRegistry::with_default_decoders();
        FrameDispatcher::new(registry, |_sample: &Sample, _timestamp: f64| {})
    }

    #[test]
    fn test_delivers_decoded_sample_with_timestamp() {
        let mut received: Vec<(Sample, f64)> = Vec::new();
        {
            let registry = DecoderRegistry::with_default_decoders();
            let mut dispatcher = FrameDispatcher::new(registry, |s: &Sample, t: f64| {
                received.push((s.clone(), t));
            });
            let frame = RawFrame::new(0x201, &[0x64, 0x00, 0x00, 0x00, 0xC8, 0x00, 0x32, 0x00], 12.5);
            assert_eq!(dispatcher.on_frame(&frame), DispatchOutcome::Delivered);
            assert_eq!(dispatcher.last_live(), Some(12.5));
        }
        assert_eq!(received.len(), 1);
        let (sample, timestamp) = &received[0];
        assert_eq!(*timestamp, 12.5);
        assert_eq!(sample.get("rpm"), Some(&Value::Float(6375.0)));
        assert_eq!(sample.get("speed"), Some(&Value::Float(410.0)));
        assert_eq!(sample.get("accpos"), Some(&Value::Float(25.0)));
    }

    #[test]
    fn test_unknown_identifier_is_dropped() {
        let mut calls = 0;
        {
            let mut dispatcher = FrameDispatcher::new(DecoderRegistry::with_default_decoders(), |_: &Sample, _: f64| {
                calls += 1;
            });
            let frame = RawFrame::new(0x7DF, &[0x02, 0x01, 0x0C], 1.0);
            assert_eq!(dispatcher.on_frame(&frame), DispatchOutcome::Unknown);
            assert_eq!(dispatcher.last_live(), None);
            assert_eq!(dispatcher.stats().unknown, 1);
        }
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_truncated_payload_is_dropped() {
        let mut calls = 0;
        {
            let mut dispatcher = FrameDispatcher::new(DecoderRegistry::with_default_decoders(), |_: &Sample, _: f64| {
                calls += 1;
            });
            let frame = RawFrame::new(0x201, &[0x01], 1.0);
            assert_eq!(dispatcher.on_frame(&frame), DispatchOutcome::DecodeFailed);
            assert_eq!(dispatcher.stats().decode_failed, 1);
            assert_eq!(dispatcher.last_live(), None);
        }
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_bus_liveness() {
        let mut dispatcher = recording_dispatcher();
        assert!(dispatcher.is_bus_down(0.0, DEFAULT_BUS_TIMEOUT_SECS));

        dispatcher.on_frame(&RawFrame::new(0x231, &[0x00, 0x00], 100.0));
        assert!(!dispatcher.is_bus_down(100.5, DEFAULT_BUS_TIMEOUT_SECS));
        assert!(!dispatcher.is_bus_down(101.0, DEFAULT_BUS_TIMEOUT_SECS));
        assert!(dispatcher.is_bus_down(101.01, DEFAULT_BUS_TIMEOUT_SECS));
    }

    #[test]
    fn test_take_stats_resets() {
        let mut dispatcher = recording_dispatcher();
        dispatcher.on_frame(&RawFrame::new(0x231, &[0x00, 0x00], 1.0));
        dispatcher.on_frame(&RawFrame::new(0x999, &[], 1.0));
        let stats = dispatcher.take_stats();
        assert_eq!(stats, DispatchStats { delivered: 1, unknown: 1, decode_failed: 0 });
        assert_eq!(stats.total(), 2);
        assert_eq!(dispatcher.stats(), DispatchStats::default());
    }
}
