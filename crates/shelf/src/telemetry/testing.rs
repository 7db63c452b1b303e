// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! In-memory log sink for asserting on emitted cache events.

use std::io;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;

/// Collects plain-text log lines; clones append to the same buffer.
#[derive(Debug, Clone, Default)]
pub(crate) struct LogCapture {
    lines: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// A subscriber formatting every event into this capture, without ANSI colors.
    pub(crate) fn subscriber(&self) -> impl tracing::Subscriber {
        tracing_subscriber::registry().with(tracing_subscriber::fmt::layer().with_writer(self.clone()).with_ansi(false))
    }

    pub(crate) fn assert_contains(&self, needle: &str) {
        let text = self.text();
        assert!(text.contains(needle), "expected a log line with `{needle}` in:\n{text}");
    }

    pub(crate) fn assert_not_contains(&self, needle: &str) {
        let text = self.text();
        assert!(!text.contains(needle), "unexpected log line with `{needle}` in:\n{text}");
    }

    /// Number of captured lines mentioning `needle`.
    pub(crate) fn count(&self, needle: &str) -> usize {
        self.text().lines().filter(|line| line.contains(needle)).count()
    }

    fn text(&self) -> String {
        String::from_utf8_lossy(&self.lines.lock()).into_owned()
    }
}

impl MakeWriter<'_> for LogCapture {
    type Writer = Self;

    fn make_writer(&self) -> Self::Writer {
        self.clone()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.lines.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_lines_written_through_the_subscriber() {
        let capture = LogCapture::new();
        let _guard = tracing::subscriber::set_default(capture.subscriber());

        tracing::info!(cache.operation = "get", "first");
        tracing::warn!(cache.operation = "get", "second");
        tracing::info!(cache.operation = "set", "third");

        assert_eq!(capture.count("cache.operation=\"get\""), 2);
        capture.assert_contains("third");
        capture.assert_not_contains("fourth");
    }

    #[test]
    fn clones_share_the_buffer() {
        let capture = LogCapture::new();
        let _guard = tracing::subscriber::set_default(capture.clone().subscriber());

        tracing::info!("shared");

        assert_eq!(capture.count("shared"), 1);
    }
}
