//! Bounded in-memory frame sequence for later export.

use log::info;
use quantum_fluid_core::color::RgbBuffer;

/// Progress is logged every this many stored frames.
const PROGRESS_INTERVAL: usize = 30;

/// Stores subsampled copies of rendered frames up to a fixed cap.
///
/// Reaching the cap only stops recording; the caller keeps simulating and
/// presenting. The cap is logged once.
#[derive(Debug, Clone)]
pub struct FrameRecorder {
    frames: Vec<RgbBuffer>,
    max_frames: usize,
    stride: usize,
    enabled: bool,
    cap_logged: bool,
}

impl FrameRecorder {
    /// A recorder keeping every `stride`-th row and column (0 is treated as 1).
    pub fn new(max_frames: usize, stride: usize) -> Self {
        Self {
            frames: Vec::new(),
            max_frames,
            stride: stride.max(1),
            enabled: true,
            cap_logged: false,
        }
    }

    /// A recorder that never stores anything.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::new(0, 1)
        }
    }

    /// Appends a subsampled copy of `frame`. Returns whether it was stored.
    pub fn record(&mut self, frame: &RgbBuffer) -> bool {
        if !self.enabled {
            return false;
        }
        if self.is_full() {
            if !self.cap_logged {
                info!("recording stopped at {} frames", self.max_frames);
                self.cap_logged = true;
            }
            return false;
        }
        self.frames.push(frame.subsample(self.stride));
        if self.frames.len() % PROGRESS_INTERVAL == 0 {
            info!("recorded {}/{} frames", self.frames.len(), self.max_frames);
        }
        true
    }

    pub fn is_full(&self) -> bool {
        self.frames.len() >= self.max_frames
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frames(&self) -> &[RgbBuffer] {
        &self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quantum_fluid_core::color::Rgb;
    use quantum_fluid_core::grid::Grid;

    fn frame(n: usize, shade: f64) -> RgbBuffer {
        RgbBuffer::from_fn(Grid::square(n).unwrap(), |_| Rgb::new(shade, shade, shade))
    }

    #[test]
    fn stores_subsampled_copies() {
        let mut rec = FrameRecorder::new(10, 2);
        assert!(rec.record(&frame(9, 100.0)));
        let stored = &rec.frames()[0];
        assert_eq!((stored.width(), stored.height()), (5, 5));
        assert_eq!(stored.pixel(4, 4), [100, 100, 100]);
    }

    #[test]
    fn stops_at_cap_without_error() {
        let mut rec = FrameRecorder::new(3, 1);
        for i in 0..3 {
            assert!(rec.record(&frame(4, i as f64)));
        }
        assert!(rec.is_full());
        assert!(!rec.record(&frame(4, 200.0)));
        assert!(!rec.record(&frame(4, 201.0)));
        assert_eq!(rec.len(), 3);
        assert_eq!(rec.frames()[2].pixel(0, 0), [2, 2, 2]);
    }

    #[test]
    fn disabled_recorder_ignores_frames() {
        let mut rec = FrameRecorder::disabled();
        assert!(!rec.record(&frame(4, 1.0)));
        assert!(rec.is_empty());
        assert!(!rec.is_enabled());
    }

    #[test]
    fn zero_stride_keeps_full_resolution() {
        let mut rec = FrameRecorder::new(1, 0);
        rec.record(&frame(6, 0.0));
        assert_eq!(rec.frames()[0].width(), 6);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn never_exceeds_cap(cap in 0usize..40, offered in 0usize..80, stride in 1usize..4) {
                let mut rec = FrameRecorder::new(cap, stride);
                let f = frame(8, 50.0);
                let stored = (0..offered).filter(|_| rec.record(&f)).count();
                prop_assert_eq!(stored, offered.min(cap));
                prop_assert_eq!(rec.len(), offered.min(cap));
            }
        }
    }
}
