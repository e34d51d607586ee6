/*!
    Frame sink over a media container.
*/

use std::path::Path;

use ffmpeg_next::{
    Rational as RationalFFmpeg, codec,
    codec::context::Context as CodecContext,
    codec::encoder::video::Encoder as VideoEncoderFFmpeg,
    encoder, format,
    format::Pixel,
    frame::Video as VideoFrameFFmpeg,
    software::scaling::{Context as ScalingContext, Flags as ScalingFlags},
};

use tinge_types::{BGR_CHANNELS, Error, FrameSink, Result, VideoFrame, VideoStreamInfo};

/**
    An append-only frame writer over a media container.

    Encodes BGR24 frames as H.264 yuv420p into the container format implied
    by the output path extension, at the geometry and frame rate declared
    when the sink was created. Presentation timestamps are assigned from the
    frame index, one frame per time-base tick, so input frame N lands at
    output frame N.
*/
pub struct MediaSink {
    octx: format::context::Output,
    encoder: VideoEncoderFFmpeg,
    scaler: ScalingContext,
    stream_index: usize,
    encoder_time_base: RationalFFmpeg,
    stream_time_base: RationalFFmpeg,
    width: u32,
    height: u32,
    frames_written: u64,
    finished: bool,
}

impl MediaSink {
    /**
        Create a media container for frame-by-frame writing.

        Fails with `UnwritableTarget` when the destination cannot be
        created, the stream info declares zero geometry or a non-positive
        frame rate, or no H.264 encoder is available.
    */
    pub fn create(path: impl AsRef<Path>, info: &VideoStreamInfo) -> Result<Self> {
        let path = path.as_ref();

        ffmpeg_next::init().map_err(|e| Error::unwritable(e.to_string()))?;

        if info.width == 0 || info.height == 0 {
            return Err(Error::unwritable("zero frame geometry"));
        }
        if !info.frame_rate.is_positive() {
            return Err(Error::unwritable(format!(
                "non-positive frame rate {}",
                info.frame_rate
            )));
        }

        let unwritable = |e: ffmpeg_next::Error| {
            Error::unwritable(format!("{}: {e}", path.display()))
        };

        let mut octx = format::output(&path).map_err(unwritable)?;

        let video_codec = encoder::find_by_name("libx264")
            .or_else(|| encoder::find(codec::Id::H264))
            .ok_or_else(|| Error::unwritable("no H.264 encoder available"))?;

        let global_header = octx
            .format()
            .flags()
            .contains(format::Flags::GLOBAL_HEADER);

        // One tick per frame: time base is the inverted frame rate.
        let encoder_time_base =
            RationalFFmpeg::new(info.frame_rate.den, info.frame_rate.num);

        let stream_index;
        let opened = {
            let mut ost = octx.add_stream(video_codec).map_err(unwritable)?;
            stream_index = ost.index();

            let mut enc = CodecContext::new_with_codec(video_codec)
                .encoder()
                .video()
                .map_err(unwritable)?;
            enc.set_width(info.width);
            enc.set_height(info.height);
            enc.set_format(Pixel::YUV420P);
            enc.set_time_base(encoder_time_base);
            enc.set_frame_rate(Some(RationalFFmpeg::new(
                info.frame_rate.num,
                info.frame_rate.den,
            )));
            if global_header {
                enc.set_flags(codec::Flags::GLOBAL_HEADER);
            }

            let opened = enc.open().map_err(unwritable)?;
            ost.set_parameters(&opened);
            ost.set_time_base(encoder_time_base);
            opened
        };

        octx.write_header().map_err(unwritable)?;

        // The muxer may adjust the stream time base during write_header.
        let stream_time_base = octx
            .stream(stream_index)
            .map(|s| s.time_base())
            .unwrap_or(encoder_time_base);

        let scaler = ScalingContext::get(
            Pixel::BGR24,
            info.width,
            info.height,
            Pixel::YUV420P,
            info.width,
            info.height,
            ScalingFlags::BILINEAR,
        )
        .map_err(unwritable)?;

        Ok(Self {
            octx,
            encoder: opened,
            scaler,
            stream_index,
            encoder_time_base,
            stream_time_base,
            width: info.width,
            height: info.height,
            frames_written: 0,
            finished: false,
        })
    }

    /**
        Number of frames written so far.
    */
    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    /**
        Write every packet the encoder currently has ready.
    */
    fn write_pending_packets(&mut self) -> Result<()> {
        let mut packet = ffmpeg_next::Packet::empty();
        while self.encoder.receive_packet(&mut packet).is_ok() {
            packet.set_stream(self.stream_index);
            packet.rescale_ts(self.encoder_time_base, self.stream_time_base);
            packet
                .write_interleaved(&mut self.octx)
                .map_err(|e| {
                    Error::frame_failure(self.frames_written, format!("mux error: {e}"))
                })?;
        }
        Ok(())
    }
}

impl FrameSink for MediaSink {
    fn write_frame(&mut self, frame: &VideoFrame) -> Result<()> {
        if self.finished {
            return Err(Error::unwritable("sink already finished"));
        }
        if frame.geometry() != (self.width, self.height) {
            return Err(Error::geometry_mismatch(
                (self.width, self.height),
                frame.geometry(),
            ));
        }

        // Stage the packed data into an FFmpeg frame, honoring its stride.
        let mut bgr = VideoFrameFFmpeg::new(Pixel::BGR24, self.width, self.height);
        let row_len = self.width as usize * BGR_CHANNELS;
        let stride = bgr.stride(0);
        let plane = bgr.data_mut(0);
        for y in 0..self.height as usize {
            plane[y * stride..y * stride + row_len]
                .copy_from_slice(&frame.data[y * row_len..(y + 1) * row_len]);
        }

        let mut yuv = VideoFrameFFmpeg::empty();
        self.scaler.run(&bgr, &mut yuv).map_err(|e| {
            Error::frame_failure(self.frames_written, format!("pixel conversion error: {e}"))
        })?;
        yuv.set_pts(Some(self.frames_written as i64));

        self.encoder.send_frame(&yuv).map_err(|e| {
            Error::frame_failure(self.frames_written, format!("encode error: {e}"))
        })?;
        self.write_pending_packets()?;

        self.frames_written += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;

        self.encoder
            .send_eof()
            .map_err(|e| Error::unwritable(format!("finalize error: {e}")))?;
        self.write_pending_packets()?;
        self.octx
            .write_trailer()
            .map_err(|e| Error::unwritable(format!("finalize error: {e}")))?;
        Ok(())
    }
}

impl std::fmt::Debug for MediaSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaSink")
            .field("geometry", &(self.width, self.height))
            .field("frames_written", &self.frames_written)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tinge_types::Rational;

    fn info() -> VideoStreamInfo {
        VideoStreamInfo::new(64, 48, Rational::new(25, 1))
    }

    #[test]
    fn create_in_missing_directory_is_unwritable() {
        let err = MediaSink::create("/nonexistent/dir/out.mp4", &info()).unwrap_err();
        assert!(matches!(err, Error::UnwritableTarget { .. }));
    }

    #[test]
    fn create_rejects_zero_geometry() {
        let bad = VideoStreamInfo::new(0, 48, Rational::new(25, 1));
        let err = MediaSink::create("/tmp/out.mp4", &bad).unwrap_err();
        assert!(matches!(err, Error::UnwritableTarget { .. }));
    }

    #[test]
    fn geometry_mismatch_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = MediaSink::create(dir.path().join("out.mp4"), &info()).unwrap();

        let err = sink.write_frame(&VideoFrame::black(32, 32)).unwrap_err();
        assert_eq!(err, Error::geometry_mismatch((64, 48), (32, 32)));

        sink.finish().unwrap();
    }

    #[test]
    fn writes_frames_and_finishes_idempotently() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.mp4");
        let mut sink = MediaSink::create(&path, &info()).unwrap();

        for _ in 0..5 {
            sink.write_frame(&VideoFrame::black(64, 48)).unwrap();
        }
        assert_eq!(sink.frames_written(), 5);

        sink.finish().unwrap();
        sink.finish().unwrap(); // second finish is a no-op

        assert!(path.metadata().unwrap().len() > 0);
    }

    #[test]
    fn zero_frame_sink_still_finalizes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.mp4");
        let mut sink = MediaSink::create(&path, &info()).unwrap();
        sink.finish().unwrap();
        assert!(path.exists());
    }
}
