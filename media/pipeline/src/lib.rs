/*!
    Frame processing pipeline for the tinge crate ecosystem.

    The driver orchestrates one read → transform → write cycle per frame:

    ```ignore
    use tinge_effects::Effect;
    use tinge_pipeline::run_file;

    let effect = Effect::Sepia { intensity: 0.8 };
    let output = run_file("input.mp4", "output.mp4", &effect)?;
    ```

    Each invocation is synchronous, single-threaded, and independent: no
    state is shared between runs, so callers may run several pipelines in
    parallel as long as each has its own source, sink, and staging files.

    # Failure model

    The driver never retries and never skips a frame. Parameter problems
    surface as `InvalidParameters` before any I/O; a failure at frame N
    surfaces as `FrameFailure` with index N, after the sink has been
    finalized so no handles stay open. Frames already written stay on disk;
    discarding the partial artifact is the caller's decision.

    # Staging

    [`Staging`] holds byte-level input and output artifacts in temporary
    files that are guaranteed to be deleted when it drops, on success,
    error, or panic. [`process`] is the end-to-end bytes-in, bytes-out
    entry point built on top of it.
*/

pub use tinge_effects::Effect;
pub use tinge_types::{Error, FrameSink, FrameSource, Result, VideoFrame, VideoStreamInfo};

mod driver;
mod staging;

pub use driver::{run, run_file};
pub use staging::{Staging, process};
