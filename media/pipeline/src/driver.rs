/*!
    Pipeline driver.
*/

use std::path::{Path, PathBuf};

use tinge_effects::Effect;
use tinge_sink::MediaSink;
use tinge_source::MediaSource;
use tinge_types::{Error, FrameSink, FrameSource, Result};

/**
    Drive one read → transform → write pass over a source/sink pair.

    Returns the number of frames written. The sink is finished on every
    path, success or error, so no handles stay open; on error the frames
    already written remain in the sink for the caller to inspect or
    discard. A zero-frame source completes successfully with an empty,
    finalized sink.
*/
pub fn run(
    source: &mut impl FrameSource,
    sink: &mut impl FrameSink,
    effect: &Effect,
) -> Result<u64> {
    effect.validate()?;

    let mut index: u64 = 0;
    loop {
        let frame = match source.read_frame() {
            Ok(Some(frame)) => frame,
            Ok(None) => break,
            Err(e) => {
                let e = at_frame(e, index);
                finish_after_error(sink);
                return Err(e);
            }
        };

        let transformed = effect.apply(&frame);
        if let Err(e) = sink.write_frame(&transformed) {
            let e = at_frame(e, index);
            finish_after_error(sink);
            return Err(e);
        }

        index += 1;
    }

    sink.finish()?;
    Ok(index)
}

/// Best-effort finalize on the error path. The stream error already
/// being propagated takes precedence, so a failed finalize is only
/// reported, not returned.
fn finish_after_error(sink: &mut impl FrameSink) {
    if let Err(e) = sink.finish() {
        eprintln!("[pipeline] sink finalize failed after stream error: {e}");
    }
}

/// Pin a mid-stream failure to the frame it happened on. Errors that
/// already carry an index, and geometry violations (a programmer error,
/// not a stream condition), pass through unchanged.
fn at_frame(e: Error, index: u64) -> Error {
    match e {
        Error::FrameFailure { .. } | Error::GeometryMismatch { .. } => e,
        other => Error::frame_failure(index, other.to_string()),
    }
}

/**
    Run the pipeline between two container paths.

    Validates the effect before touching any I/O, opens the source, creates
    the sink with the source's geometry and frame rate, and streams every
    frame through the transform. When the source cannot be opened, no
    output file is created.
*/
pub fn run_file(
    source_path: impl AsRef<Path>,
    sink_path: impl AsRef<Path>,
    effect: &Effect,
) -> Result<PathBuf> {
    let sink_path = sink_path.as_ref();

    effect.validate()?;

    let mut source = MediaSource::open(source_path)?;
    let info = source.stream_info();
    let mut sink = MediaSink::create(sink_path, &info)?;

    let written = run(&mut source, &mut sink, effect)?;
    println!(
        "[pipeline] {}: wrote {written} frames to {}",
        effect.name(),
        sink_path.display()
    );

    Ok(sink_path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tinge_types::{Rational, VideoFrame, VideoStreamInfo};

    struct MemorySource {
        info: VideoStreamInfo,
        frames: Vec<VideoFrame>,
        next: usize,
        fail_at: Option<u64>,
        reads: u64,
    }

    impl MemorySource {
        fn new(count: usize, width: u32, height: u32) -> Self {
            Self {
                info: VideoStreamInfo::new(width, height, Rational::new(30, 1))
                    .with_frame_count(count as u64),
                frames: (0..count)
                    .map(|i| {
                        let mut f = VideoFrame::black(width, height);
                        f.data[0] = i as u8; // make frames distinguishable
                        f
                    })
                    .collect(),
                next: 0,
                fail_at: None,
                reads: 0,
            }
        }

        fn failing_at(mut self, index: u64) -> Self {
            self.fail_at = Some(index);
            self
        }
    }

    impl FrameSource for MemorySource {
        fn stream_info(&self) -> VideoStreamInfo {
            self.info
        }

        fn read_frame(&mut self) -> Result<Option<VideoFrame>> {
            self.reads += 1;
            if self.fail_at == Some(self.next as u64) {
                return Err(Error::frame_failure(self.next as u64, "simulated decode error"));
            }
            match self.frames.get(self.next) {
                Some(frame) => {
                    self.next += 1;
                    Ok(Some(frame.clone()))
                }
                None => Ok(None),
            }
        }
    }

    struct MemorySink {
        info: VideoStreamInfo,
        frames: Vec<VideoFrame>,
        finishes: u64,
        fail_writes: bool,
        fail_finish: bool,
    }

    impl MemorySink {
        fn new(width: u32, height: u32) -> Self {
            Self::for_stream(&VideoStreamInfo::new(width, height, Rational::new(30, 1)))
        }

        fn for_stream(info: &VideoStreamInfo) -> Self {
            Self {
                info: *info,
                frames: Vec::new(),
                finishes: 0,
                fail_writes: false,
                fail_finish: false,
            }
        }
    }

    impl FrameSink for MemorySink {
        fn write_frame(&mut self, frame: &VideoFrame) -> Result<()> {
            if self.fail_writes {
                return Err(Error::unwritable("simulated write error"));
            }
            if frame.geometry() != self.info.geometry() {
                return Err(Error::geometry_mismatch(self.info.geometry(), frame.geometry()));
            }
            self.frames.push(frame.clone());
            Ok(())
        }

        fn finish(&mut self) -> Result<()> {
            self.finishes += 1;
            if self.fail_finish {
                return Err(Error::unwritable("simulated finalize error"));
            }
            Ok(())
        }
    }

    #[test]
    fn maps_every_frame_in_order() {
        let mut source = MemorySource::new(10, 8, 6);
        let mut sink = MemorySink::for_stream(&source.stream_info());

        let written = run(&mut source, &mut sink, &Effect::Invert).unwrap();

        assert_eq!(written, 10);
        assert_eq!(sink.frames.len(), 10);
        assert_eq!(sink.finishes, 1);
        // The sink was declared with the source's stream info, rate
        // included, and nothing along the way changed it.
        assert_eq!(sink.info.frame_rate, Rational::new(30, 1));
        // Frame N of input maps to frame N of output: the marker byte
        // survives inversion in order.
        for (i, frame) in sink.frames.iter().enumerate() {
            assert_eq!(frame.data[0], 255 - i as u8);
            assert_eq!(frame.geometry(), (8, 6));
        }
    }

    #[test]
    fn empty_source_completes_with_empty_sink() {
        let mut source = MemorySource::new(0, 8, 6);
        let mut sink = MemorySink::new(8, 6);

        let written = run(&mut source, &mut sink, &Effect::Greyscale).unwrap();

        assert_eq!(written, 0);
        assert!(sink.frames.is_empty());
        assert_eq!(sink.finishes, 1);
    }

    #[test]
    fn mid_stream_decode_failure_reports_index() {
        let mut source = MemorySource::new(10, 8, 6).failing_at(5);
        let mut sink = MemorySink::new(8, 6);

        let err = run(&mut source, &mut sink, &Effect::Invert).unwrap_err();

        assert_eq!(err.index(), Some(5));
        // Frames 0 through 4 were already written and stay in the sink.
        assert_eq!(sink.frames.len(), 5);
        assert_eq!(sink.finishes, 1);
    }

    #[test]
    fn write_failure_is_pinned_to_the_current_frame() {
        let mut source = MemorySource::new(4, 8, 6);
        let mut sink = MemorySink::new(8, 6);
        sink.fail_writes = true;

        let err = run(&mut source, &mut sink, &Effect::Invert).unwrap_err();

        assert_eq!(err.index(), Some(0));
        assert!(format!("{err}").contains("simulated write error"));
        assert_eq!(sink.finishes, 1);
    }

    #[test]
    fn geometry_mismatch_passes_through_unwrapped() {
        let mut source = MemorySource::new(3, 8, 6);
        let mut sink = MemorySink::new(16, 12); // wrong geometry on purpose

        let err = run(&mut source, &mut sink, &Effect::Invert).unwrap_err();

        assert!(matches!(err, Error::GeometryMismatch { .. }));
        assert_eq!(sink.finishes, 1);
    }

    #[test]
    fn invalid_parameters_fail_before_any_read() {
        let mut source = MemorySource::new(3, 8, 6);
        let mut sink = MemorySink::new(8, 6);
        let effect = Effect::Sepia {
            intensity: f32::NAN,
        };

        let err = run(&mut source, &mut sink, &effect).unwrap_err();

        assert!(matches!(err, Error::InvalidParameters { .. }));
        assert_eq!(source.reads, 0);
        assert!(sink.frames.is_empty());
    }

    #[test]
    fn finalize_failure_on_the_error_path_keeps_the_stream_error() {
        let mut source = MemorySource::new(10, 8, 6).failing_at(5);
        let mut sink = MemorySink::new(8, 6);
        sink.fail_finish = true;

        let err = run(&mut source, &mut sink, &Effect::Invert).unwrap_err();

        // The decode failure wins; the failed finalize is only logged.
        assert_eq!(err.index(), Some(5));
        assert_eq!(sink.finishes, 1);
    }

    #[test]
    fn encoded_round_trip_preserves_geometry_and_rate() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.mp4");
        let second = dir.path().join("second.mp4");

        // Stage a real clip: five black frames at 25 fps.
        let declared = VideoStreamInfo::new(64, 48, Rational::new(25, 1));
        let mut staged = MediaSink::create(&first, &declared).unwrap();
        for _ in 0..5 {
            staged.write_frame(&VideoFrame::black(64, 48)).unwrap();
        }
        staged.finish().unwrap();

        let mut source = MediaSource::open(&first).unwrap();
        let info = source.stream_info();
        assert_eq!(info.geometry(), (64, 48));
        assert_eq!(info.frame_rate, Rational::new(25, 1));

        let mut sink = MediaSink::create(&second, &info).unwrap();
        let written = run(&mut source, &mut sink, &Effect::Invert).unwrap();
        assert_eq!(written, 5);

        let reopened = MediaSource::open(&second).unwrap();
        assert_eq!(reopened.stream_info().geometry(), (64, 48));
        assert_eq!(reopened.stream_info().frame_rate, Rational::new(25, 1));
    }

    #[test]
    fn run_file_missing_source_creates_no_sink() {
        let dir = tempfile::tempdir().unwrap();
        let sink_path = dir.path().join("out.mp4");

        let err = run_file("/nonexistent/input.mp4", &sink_path, &Effect::Invert).unwrap_err();

        assert!(matches!(err, Error::UnreadableMedia { .. }));
        assert!(!sink_path.exists());
    }
}
