//! PNG and animated GIF export of rendered frames.
//!
//! This module is feature-gated behind `export` (default on) so that front
//! ends that only present frames can depend on this crate without pulling
//! in the `image` crate.

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, RgbImage, RgbaImage};
use log::info;
use quantum_fluid_core::color::RgbBuffer;
use quantum_fluid_core::error::EngineError;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

fn dimensions(buffer: &RgbBuffer) -> Result<(u32, u32), EngineError> {
    let w = u32::try_from(buffer.width()).map_err(|_| EngineError::InvalidDimensions)?;
    let h = u32::try_from(buffer.height()).map_err(|_| EngineError::InvalidDimensions)?;
    Ok((w, h))
}

fn io_error(path: &Path, e: impl std::fmt::Display) -> EngineError {
    EngineError::Io(format!("{}: {e}", path.display()))
}

/// Writes one frame as an RGB PNG.
///
/// Returns `EngineError::InvalidDimensions` if the frame dimensions overflow
/// `u32`, or `EngineError::Io` on write failure.
pub fn write_png(frame: &RgbBuffer, path: &Path) -> Result<(), EngineError> {
    let (w, h) = dimensions(frame)?;
    let img = RgbImage::from_raw(w, h, frame.as_bytes().to_vec())
        .ok_or_else(|| EngineError::Io("RGB buffer size mismatch".into()))?;
    img.save(path).map_err(|e| io_error(path, e))?;
    info!("wrote {}", path.display());
    Ok(())
}

/// Writes `frames` as a GIF that loops forever at `fps` frames per second.
///
/// All frames must share the first frame's size. An empty sequence is
/// rejected with `EngineError::InvalidConfig`.
pub fn write_gif(frames: &[RgbBuffer], path: &Path, fps: u32) -> Result<(), EngineError> {
    let first = frames
        .first()
        .ok_or_else(|| EngineError::InvalidConfig("no frames to export".into()))?;
    if fps == 0 {
        return Err(EngineError::InvalidConfig("playback rate must be at least 1".into()));
    }
    if let Some(odd) = frames
        .iter()
        .find(|f| (f.width(), f.height()) != (first.width(), first.height()))
    {
        return Err(EngineError::DimensionMismatch {
            lhs_w: first.width(),
            lhs_h: first.height(),
            rhs_w: odd.width(),
            rhs_h: odd.height(),
        });
    }
    let (w, h) = dimensions(first)?;

    let file = File::create(path).map_err(|e| io_error(path, e))?;
    let mut encoder = GifEncoder::new(BufWriter::new(file));
    encoder
        .set_repeat(Repeat::Infinite)
        .map_err(|e| io_error(path, e))?;

    let delay = Delay::from_numer_denom_ms(1000, fps);
    for frame in frames {
        let rgba = RgbaImage::from_raw(w, h, frame.to_rgba())
            .ok_or_else(|| EngineError::Io("RGBA buffer size mismatch".into()))?;
        encoder
            .encode_frame(Frame::from_parts(rgba, 0, 0, delay))
            .map_err(|e| io_error(path, e))?;
    }
    info!("wrote {} frames to {}", frames.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::codecs::gif::GifDecoder;
    use image::AnimationDecoder;
    use quantum_fluid_core::color::Rgb;
    use quantum_fluid_core::grid::Grid;
    use std::io::BufReader;

    fn solid(w: usize, h: usize, c: Rgb) -> RgbBuffer {
        RgbBuffer::from_fn(Grid::new(w, h).unwrap(), |_| c)
    }

    #[test]
    fn write_png_round_trip() {
        let frame = RgbBuffer::from_fn(Grid::new(16, 8).unwrap(), |i| {
            Rgb::new((i % 16) as f64 * 10.0, 0.0, 255.0)
        });
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");

        write_png(&frame, &path).unwrap();

        let img = image::open(&path).unwrap().to_rgb8();
        assert_eq!((img.width(), img.height()), (16, 8));
        assert_eq!(img.get_pixel(3, 5).0, [30, 0, 255]);
        assert_eq!(img.into_raw(), frame.into_bytes());
    }

    #[test]
    fn write_gif_stores_every_frame() {
        let frames: Vec<_> = (0..5)
            .map(|i| solid(12, 12, Rgb::new(i as f64 * 50.0, 0.0, 0.0)))
            .collect();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.gif");

        write_gif(&frames, &path, 30).unwrap();

        let decoder = GifDecoder::new(BufReader::new(File::open(&path).unwrap())).unwrap();
        let decoded = decoder.into_frames().collect_frames().unwrap();
        assert_eq!(decoded.len(), 5);
        assert_eq!(decoded[0].buffer().dimensions(), (12, 12));
    }

    #[test]
    fn write_gif_rejects_empty_sequence() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.gif");
        let err = write_gif(&[], &path, 30).unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig(_)));
        assert!(!path.exists());
    }

    #[test]
    fn write_gif_rejects_mixed_sizes() {
        let frames = vec![solid(8, 8, Rgb::new(0.0, 0.0, 0.0)), solid(4, 8, Rgb::new(0.0, 0.0, 0.0))];
        let dir = tempfile::tempdir().unwrap();
        let err = write_gif(&frames, &dir.path().join("mixed.gif"), 30).unwrap_err();
        assert!(matches!(err, EngineError::DimensionMismatch { rhs_w: 4, .. }));
    }

    #[test]
    fn unwritable_path_is_io_error() {
        let frame = solid(4, 4, Rgb::new(1.0, 2.0, 3.0));
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.gif");
        let err = write_gif(&[frame], &path, 30).unwrap_err();
        assert!(matches!(err, EngineError::Io(_)));
    }
}
