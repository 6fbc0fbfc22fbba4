use crate::sample::Sample;

/// Receiver of decoded samples, installed as the dispatcher's post-hook.
pub trait SampleHandler {
    /// Called once per successfully decoded frame with the frame's reception time
    fn handle_sample(&mut self, sample: &Sample, timestamp: f64);
}

impl<F> SampleHandler for F
where
    F: FnMut(&Sample, f64),
{
    fn handle_sample(&mut self, sample: &Sample, timestamp: f64) {
        self(sample, timestamp)
    }
}
