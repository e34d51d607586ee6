/*!
    Media decoding for the tinge crate ecosystem.

    This crate bridges a media container to the [`FrameSource`] abstraction:
    it demuxes the best video stream, decodes it with the software decoder,
    and converts every frame to packed BGR24 at native geometry.

    # Example

    ```ignore
    use tinge_source::MediaSource;
    use tinge_types::FrameSource;

    let mut source = MediaSource::open("input.mp4")?;
    let info = source.stream_info();
    println!("[source] {}x{} @ {}", info.width, info.height, info.frame_rate);

    while let Some(frame) = source.read_frame()? {
        // Process frame
    }
    ```

    The stream is forward-only and non-restartable: once `read_frame`
    returns `None`, it keeps returning `None`. Open a new source to read
    the file again.
*/

pub use tinge_types::{Error, FrameSource, Result, VideoFrame, VideoStreamInfo};

mod source;

pub use source::MediaSource;
