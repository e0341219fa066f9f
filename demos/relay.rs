use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use frame_convert::{
    Frame, FrameSink, FrameSource, PatternSource, PixelFormat, Ratio, Relay, SinkError, Size,
    StreamConfig, Timestamp, connect, convert,
};

/// Stands in for a video encoder: takes I420 at transport resolution.
struct TransportSink {
    config: StreamConfig,
    bytes: usize,
    last_timestamp: Option<Timestamp>,
}

impl FrameSink for TransportSink {
    fn config(&self) -> &StreamConfig {
        &self.config
    }

    fn consume(&mut self, frame: Frame) -> Result<(), SinkError> {
        self.bytes += frame.data().len();
        self.last_timestamp = Some(frame.timestamp());
        Ok(())
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // A wearable camera hands over ARGB bitmaps at 640x480, 24 fps.
    let source_config = StreamConfig {
        pixel_format: PixelFormat::Argb32,
        size: Size::new(640, 480),
        frame_rate: Ratio::from_integer(24),
    };
    let mut source = PatternSource::new(source_config).expect("invalid source config");

    let sink = TransportSink {
        config: StreamConfig {
            pixel_format: PixelFormat::I420,
            size: Size::new(320, 240),
            frame_rate: source_config.frame_rate,
        },
        bytes: 0,
        last_timestamp: None,
    };
    let relay = Arc::new(Mutex::new(Relay::new(sink)));

    println!(
        "Relaying {:?} {}x{} @ {:.1} fps -> {:?} {}x{}",
        source_config.pixel_format,
        source_config.size.width,
        source_config.size.height,
        source_config.frame_rate.as_f64(),
        PixelFormat::I420,
        320,
        240,
    );

    connect(&mut source, relay.clone()).expect("failed to start source");

    let target_frames: u64 = 48;
    let deadline = Instant::now() + Duration::from_secs(10);
    loop {
        std::thread::sleep(Duration::from_millis(100));
        if relay.lock().expect("relay lock poisoned").relayed() >= target_frames {
            break;
        }
        if Instant::now() >= deadline {
            eprintln!("Timed out waiting for {target_frames} frames");
            break;
        }
    }
    source.stop().expect("failed to stop source");

    let relay = relay.lock().expect("relay lock poisoned");
    let sink = relay.sink();
    println!(
        "Done. Relayed {} frames, {} bytes, last ts={:.3}s",
        relay.relayed(),
        sink.bytes,
        sink.last_timestamp.map_or(0.0, |ts| ts.as_secs_f64()),
    );

    // A platform image codec wants NV21 instead: convert one snapshot.
    let snapshot = frame_convert::render_pattern(&source_config, 0, Timestamp::default())
        .expect("failed to render snapshot");
    let i420 = convert(&snapshot, PixelFormat::I420, None).expect("ARGB -> I420");
    let nv21 = convert(&i420, PixelFormat::Nv21, None).expect("I420 -> NV21");
    println!(
        "Snapshot: {:?} {} bytes -> {:?} {} bytes -> {:?} {} bytes",
        snapshot.pixel_format(),
        snapshot.data().len(),
        i420.pixel_format(),
        i420.data().len(),
        nv21.pixel_format(),
        nv21.data().len(),
    );
}
