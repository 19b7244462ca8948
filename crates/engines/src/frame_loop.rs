//! The synchronous per-frame driver.
//!
//! Each frame runs strictly in order: drain input events, apply any regime
//! switch and the held-pointer perturbation, advance the engine, render,
//! present, record, then yield to the frame limiter. Nothing else touches
//! the engine while a frame runs.

use log::{debug, info, trace};
use quantum_fluid_core::color::RgbBuffer;
use quantum_fluid_core::error::EngineError;
use quantum_fluid_core::Engine;
use serde::Serialize;

use crate::config::SessionConfig;
use crate::input::{InputEvent, InputSource, KeyMap};
use crate::limiter::FrameLimiter;
use crate::recorder::FrameRecorder;
use crate::EngineKind;

/// Receives every rendered frame, e.g. a window or a headless sink.
pub trait Presenter {
    fn present(&mut self, frame: &RgbBuffer) -> Result<(), EngineError>;
}

/// Whether the loop should keep going after a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    Running,
    Stopped,
}

/// What a finished [`FrameLoop::run`] did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub frames: u64,
    pub recorded: usize,
    pub quit: bool,
}

/// Owns one engine and drives it frame by frame.
pub struct FrameLoop<E: Engine = EngineKind> {
    engine: E,
    keymap: KeyMap,
    recorder: FrameRecorder,
    limiter: FrameLimiter,
    display_size: (f64, f64),
    pointer: Option<(f64, f64)>,
    frame: u64,
    playback_fps: u32,
}

impl<E: Engine> FrameLoop<E> {
    /// Wraps `engine` with the input, recording and pacing settings of `config`.
    pub fn new(engine: E, config: &SessionConfig) -> Self {
        let recorder = if config.record {
            FrameRecorder::new(config.max_frames, config.record_stride)
        } else {
            FrameRecorder::disabled()
        };
        let grid = engine.grid();
        let scale = config.display_scale as f64;
        Self {
            engine,
            keymap: KeyMap::new(&config.regimes),
            recorder,
            limiter: FrameLimiter::new(config.target_fps),
            display_size: (grid.width() as f64 * scale, grid.height() as f64 * scale),
            pointer: None,
            frame: 0,
            playback_fps: config.playback_fps,
        }
    }

    /// Runs one frame with the events received since the last one.
    ///
    /// A `Quit` event stops the loop before the engine is advanced. Errors
    /// come only from the presenter.
    pub fn run_frame(
        &mut self,
        events: impl IntoIterator<Item = InputEvent>,
        presenter: &mut dyn Presenter,
    ) -> Result<FrameStatus, EngineError> {
        for event in events {
            if self.handle_event(event) == FrameStatus::Stopped {
                info!("quit after {} frames", self.frame);
                return Ok(FrameStatus::Stopped);
            }
        }
        if let Some((x, y)) = self.pointer {
            self.engine.perturb(x, y, self.display_size);
        }

        self.engine.advance_frame();
        let frame = self.engine.render();
        presenter.present(&frame)?;
        self.recorder.record(&frame);
        self.limiter.wait();
        self.frame += 1;
        Ok(FrameStatus::Running)
    }

    fn handle_event(&mut self, event: InputEvent) -> FrameStatus {
        match event {
            InputEvent::Quit => return FrameStatus::Stopped,
            InputEvent::Key { code } => match self.keymap.resolve(&code) {
                Some(regime) => {
                    if !self.engine.apply_regime(regime) {
                        debug!("regime '{}' not applicable to this engine", regime.name);
                    }
                }
                None => trace!("unmapped key {code:?}"),
            },
            InputEvent::PointerDown { x, y } => self.pointer = Some((x, y)),
            InputEvent::PointerMove { x, y } => {
                if self.pointer.is_some() {
                    self.pointer = Some((x, y));
                }
            }
            InputEvent::PointerUp => self.pointer = None,
        }
        FrameStatus::Running
    }

    /// Polls `source` and runs frames until quit or `max_frames` frames
    /// have been run in total.
    pub fn run(
        &mut self,
        source: &mut dyn InputSource,
        presenter: &mut dyn Presenter,
        max_frames: Option<u64>,
    ) -> Result<RunSummary, EngineError> {
        let mut quit = false;
        while max_frames.map_or(true, |max| self.frame < max) {
            let events = source.poll(self.frame);
            if self.run_frame(events, presenter)? == FrameStatus::Stopped {
                quit = true;
                break;
            }
        }
        Ok(RunSummary {
            frames: self.frame,
            recorded: self.recorder.len(),
            quit,
        })
    }

    /// Writes the recorded frames as a looping GIF at the playback rate.
    ///
    /// Returns `Ok(false)` without touching `path` when nothing was
    /// recorded. Recorded frames are kept whether or not the write succeeds.
    #[cfg(feature = "export")]
    pub fn export_gif(&self, path: &std::path::Path) -> Result<bool, EngineError> {
        if self.recorder.is_empty() {
            info!("no frames recorded, skipping {}", path.display());
            return Ok(false);
        }
        crate::export::write_gif(self.recorder.frames(), path, self.playback_fps)?;
        Ok(true)
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn recorder(&self) -> &FrameRecorder {
        &self.recorder
    }

    /// Frames run so far.
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Current pointer position while a button is held.
    pub fn pointer(&self) -> Option<(f64, f64)> {
        self.pointer
    }

    pub fn display_size(&self) -> (f64, f64) {
        self.display_size
    }
}
