//! `tracing` output for the browser console.
//!
//! The fmt subscriber formats each event into one buffer; the writer hands
//! the finished line to a sink when it is dropped. On wasm32 the sink is
//! `console.log`.

use std::io::{self, Write};

use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

/// Buffers one formatted event and emits it on drop.
pub struct LineWriter<F: Fn(&str)> {
    buf: Vec<u8>,
    sink: F,
}

impl<F: Fn(&str)> Write for LineWriter<F> {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<F: Fn(&str)> Drop for LineWriter<F> {
    fn drop(&mut self) {
        if self.buf.is_empty() {
            return;
        }
        let line = String::from_utf8_lossy(&self.buf);
        (self.sink)(line.trim_end());
    }
}

#[derive(Clone)]
pub struct MakeLineWriter<F>(pub F);

impl<'a, F> MakeWriter<'a> for MakeLineWriter<F>
where
    F: Fn(&str) + Clone + 'a,
{
    type Writer = LineWriter<F>;

    fn make_writer(&'a self) -> Self::Writer {
        LineWriter {
            buf: Vec::new(),
            sink: self.0.clone(),
        }
    }
}

/// Timestamp-free fmt subscriber writing one line per event to `sink`.
pub fn subscriber<F>(sink: F, level: Level) -> impl tracing::Subscriber + Send + Sync + 'static
where
    F: Fn(&str) + Clone + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_writer(MakeLineWriter(sink))
        .without_time()
        .with_target(false)
        .with_max_level(level)
        .finish()
}

/// Install the console subscriber. A second call keeps the first one.
#[cfg(target_arch = "wasm32")]
pub fn init() {
    let sink = |line: &str| web_sys::console::log_1(&line.into());
    if tracing::subscriber::set_global_default(subscriber(sink, Level::INFO)).is_err() {
        tracing::debug!("console logging already initialised");
    }
}
