/*!
    Frame source over a media container.
*/

use std::collections::VecDeque;
use std::path::Path;

use ffmpeg_next::{
    codec::context::Context as CodecContext,
    decoder::Video as VideoDecoderFFmpeg,
    format::{self, Pixel},
    frame::Video as VideoFrameFFmpeg,
    media,
    software::scaling::{Context as ScalingContext, Flags as ScalingFlags},
};

use tinge_types::{
    BGR_CHANNELS, Error, FrameSource, Rational, Result, VideoFrame, VideoStreamInfo,
};

/**
    A forward-only frame reader over a media container.

    Demuxes the best video stream, decodes it in software, and scales every
    decoded frame to packed BGR24 at native geometry. Consumed exactly once:
    after end of stream, [`FrameSource::read_frame`] keeps returning `None`.
*/
pub struct MediaSource {
    ictx: format::context::Input,
    decoder: VideoDecoderFFmpeg,
    scaler: ScalingContext,
    stream_index: usize,
    info: VideoStreamInfo,
    pending: VecDeque<VideoFrame>,
    frames_read: u64,
    eof_sent: bool,
    drained: bool,
}

impl MediaSource {
    /**
        Open a media container for frame-by-frame reading.

        Fails with `UnreadableMedia` when the path does not exist, has no
        decodable video stream, or reports zero width, height, or frame
        rate.
    */
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        ffmpeg_next::init().map_err(|e| Error::unreadable(e.to_string()))?;

        let ictx = format::input(&path)
            .map_err(|e| Error::unreadable(format!("{}: {e}", path.display())))?;

        let (stream_index, parameters, frame_rate, frame_count) = {
            let stream = ictx.streams().best(media::Type::Video).ok_or_else(|| {
                Error::unreadable(format!("{}: no video stream", path.display()))
            })?;
            let rate = stream.avg_frame_rate();
            (
                stream.index(),
                stream.parameters(),
                Rational {
                    num: rate.numerator(),
                    den: rate.denominator(),
                },
                u64::try_from(stream.frames()).ok().filter(|&n| n > 0),
            )
        };

        if !frame_rate.is_positive() {
            return Err(Error::unreadable(format!(
                "{}: zero or unknown frame rate",
                path.display()
            )));
        }

        let decoder = CodecContext::from_parameters(parameters)
            .map_err(|e| Error::unreadable(format!("{}: {e}", path.display())))?
            .decoder()
            .video()
            .map_err(|e| Error::unreadable(format!("{}: {e}", path.display())))?;

        let (width, height) = (decoder.width(), decoder.height());
        if width == 0 || height == 0 {
            return Err(Error::unreadable(format!(
                "{}: zero frame geometry",
                path.display()
            )));
        }

        let scaler = ScalingContext::get(
            decoder.format(),
            width,
            height,
            Pixel::BGR24,
            width,
            height,
            ScalingFlags::BILINEAR,
        )
        .map_err(|e| Error::unreadable(format!("{}: {e}", path.display())))?;

        let mut info = VideoStreamInfo::new(width, height, frame_rate);
        if let Some(count) = frame_count {
            info = info.with_frame_count(count);
        }

        Ok(Self {
            ictx,
            decoder,
            scaler,
            stream_index,
            info,
            pending: VecDeque::new(),
            frames_read: 0,
            eof_sent: false,
            drained: false,
        })
    }

    /**
        Demux packets until one for the video stream has been sent to the
        decoder, or end of input, in which case the decoder is told to
        flush.
    */
    fn send_next_packet(&mut self) -> Result<()> {
        loop {
            match self.ictx.packets().next() {
                Some((stream, packet)) => {
                    if stream.index() != self.stream_index {
                        continue;
                    }
                    self.decoder.send_packet(&packet).map_err(|e| {
                        Error::frame_failure(self.frames_read, format!("decode error: {e}"))
                    })?;
                    return Ok(());
                }
                None => {
                    self.decoder.send_eof().map_err(|e| {
                        Error::frame_failure(self.frames_read, format!("decode error: {e}"))
                    })?;
                    self.eof_sent = true;
                    return Ok(());
                }
            }
        }
    }

    /**
        Pull every frame the decoder currently has ready into the pending
        queue.
    */
    fn receive_pending(&mut self) -> Result<()> {
        let mut decoded = VideoFrameFFmpeg::empty();
        loop {
            match self.decoder.receive_frame(&mut decoded) {
                Ok(()) => {
                    let frame = self.convert(&decoded)?;
                    self.pending.push_back(frame);
                }
                Err(ffmpeg_next::Error::Eof) => {
                    self.drained = true;
                    return Ok(());
                }
                // Anything else means the decoder needs more input.
                Err(_) => return Ok(()),
            }
        }
    }

    /**
        Scale one decoded frame to tightly packed BGR24.
    */
    fn convert(&mut self, decoded: &VideoFrameFFmpeg) -> Result<VideoFrame> {
        let mut scaled = VideoFrameFFmpeg::empty();
        self.scaler.run(decoded, &mut scaled).map_err(|e| {
            Error::frame_failure(self.frames_read, format!("pixel conversion error: {e}"))
        })?;

        let (width, height) = self.info.geometry();
        let row_len = width as usize * BGR_CHANNELS;
        let stride = scaled.stride(0);
        let plane = scaled.data(0);

        // Drop any row padding the scaler added.
        let mut data = Vec::with_capacity(row_len * height as usize);
        for y in 0..height as usize {
            let start = y * stride;
            data.extend_from_slice(&plane[start..start + row_len]);
        }

        Ok(VideoFrame::new(data, width, height))
    }
}

impl FrameSource for MediaSource {
    fn stream_info(&self) -> VideoStreamInfo {
        self.info
    }

    fn read_frame(&mut self) -> Result<Option<VideoFrame>> {
        loop {
            if let Some(frame) = self.pending.pop_front() {
                self.frames_read += 1;
                return Ok(Some(frame));
            }
            if self.drained {
                return Ok(None);
            }
            if self.eof_sent {
                self.receive_pending()?;
                if self.pending.is_empty() {
                    self.drained = true;
                }
                continue;
            }
            self.send_next_packet()?;
            self.receive_pending()?;
        }
    }
}

impl std::fmt::Debug for MediaSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaSource")
            .field("info", &self.info)
            .field("frames_read", &self.frames_read)
            .field("drained", &self.drained)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn open_missing_path_is_unreadable() {
        let err = MediaSource::open("/nonexistent/input.mp4").unwrap_err();
        assert!(matches!(err, Error::UnreadableMedia { .. }));
        assert!(format!("{err}").contains("/nonexistent/input.mp4"));
    }

    #[test]
    fn open_non_media_file_is_unreadable() {
        let mut file = tempfile::NamedTempFile::with_suffix(".mp4").unwrap();
        file.write_all(b"definitely not an mp4").unwrap();
        file.flush().unwrap();

        let err = MediaSource::open(file.path()).unwrap_err();
        assert!(matches!(err, Error::UnreadableMedia { .. }));
    }
}
