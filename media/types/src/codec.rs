/*!
    Codec boundary traits.

    These traits are the seam between the pipeline driver and the FFmpeg
    adapters. They live here, in the dependency-free vocabulary crate, so the
    driver can be exercised against in-memory implementations without linking
    FFmpeg.
*/

use crate::{Result, VideoFrame, VideoStreamInfo};

/**
    An ordered, finite, non-restartable sequence of decoded frames.

    Implementations: frame decoders over a media container, in-memory test
    sources.
*/
pub trait FrameSource {
    /**
        Stream metadata, fixed for the lifetime of the source.
    */
    fn stream_info(&self) -> VideoStreamInfo;

    /**
        Read the next frame, or `None` at end of stream.

        Once `None` has been returned, further calls also return `None`.
        Mid-stream decode failures surface as
        [`Error::FrameFailure`](crate::Error::FrameFailure) with the index
        of the frame that failed.
    */
    fn read_frame(&mut self) -> Result<Option<VideoFrame>>;
}

/**
    An append-only, ordered destination for frames.

    Initialized with the geometry and frame rate of its paired source;
    finalized exactly once, after the last frame or on abort.
*/
pub trait FrameSink {
    /**
        Append one frame.

        Fails with [`Error::GeometryMismatch`](crate::Error::GeometryMismatch)
        if the frame's geometry differs from the sink's declared geometry.
    */
    fn write_frame(&mut self, frame: &VideoFrame) -> Result<()>;

    /**
        Flush and close the sink.

        Idempotent: finishing twice is a no-op, not an error.
    */
    fn finish(&mut self) -> Result<()>;
}
