/*!
    Media output and muxing for the tinge crate ecosystem.

    This crate handles the output side of the pipeline. It takes BGR24
    frames, encodes them with H.264, and writes them into the container
    format implied by the output path extension.

    # Basic Usage

    ```ignore
    use tinge_sink::MediaSink;
    use tinge_types::FrameSink;

    // Geometry and frame rate come from the paired source.
    let mut sink = MediaSink::create("output.mp4", &info)?;

    for frame in frames {
        sink.write_frame(&frame)?;
    }

    // Finalize the container (critical!)
    sink.finish()?;
    ```

    # Finalization

    Always call `finish()`: it drains the encoder and writes the container
    trailer. Without it, players may not know the duration or open the file
    at all. Finishing twice is a no-op.
*/

pub use tinge_types::{Error, FrameSink, Result, VideoFrame, VideoStreamInfo};

mod sink;

pub use sink::MediaSink;
