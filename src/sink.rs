//! Frame consumers and the relay that feeds them.

use std::sync::{Arc, Mutex};

use tracing::{trace, warn};

use crate::convert::{convert, resize};
use crate::error::{Error, SinkError};
use crate::frame::Frame;
use crate::source::FrameSource;
use crate::types::StreamConfig;

/// A consumer that needs frames in one specific format and size, such as a
/// video encoder feeding a network transport.
pub trait FrameSink {
    fn config(&self) -> &StreamConfig;

    /// Take ownership of one frame already in [`config`](FrameSink::config)'s
    /// format and size.
    fn consume(&mut self, frame: Frame) -> Result<(), SinkError>;
}

/// Converts each pushed frame to what its sink expects and hands it over.
///
/// A frame already in the sink's format is only rescaled. Nothing is queued:
/// a frame is converted and consumed inside [`push`](Relay::push).
pub struct Relay<S> {
    sink: S,
    relayed: u64,
}

impl<S: FrameSink> Relay<S> {
    pub fn new(sink: S) -> Self {
        Relay { sink, relayed: 0 }
    }

    pub fn push(&mut self, frame: &Frame) -> Result<(), Error> {
        let config = *self.sink.config();
        let out = if frame.pixel_format() == config.pixel_format {
            resize(frame, config.size)?
        } else {
            convert(frame, config.pixel_format, Some(config.size))?
        };
        let timestamp = out.timestamp();
        self.sink.consume(out).map_err(Error::Sink)?;
        self.relayed += 1;
        trace!(
            relayed = self.relayed,
            timestamp = timestamp.as_nanos(),
            "frame relayed"
        );
        Ok(())
    }

    /// Number of frames the sink accepted.
    pub fn relayed(&self) -> u64 {
        self.relayed
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}

/// Start `source` with a callback that pushes every frame through `relay`.
///
/// Frames the relay fails on are dropped with a warning; the source keeps
/// running.
pub fn connect<Src, S>(source: &mut Src, relay: Arc<Mutex<Relay<S>>>) -> Result<(), Src::Error>
where
    Src: FrameSource,
    S: FrameSink + Send + 'static,
{
    source.start(move |frame| {
        let Ok(mut guard) = relay.lock() else {
            warn!("relay lock poisoned, dropping frame");
            return;
        };
        if let Err(e) = guard.push(frame) {
            warn!(error = %e, "dropping frame");
        }
    })
}
