// Redacting writer for tracing-subscriber output
use std::io::{self, Write};
use tracing_subscriber::fmt::MakeWriter;

use crate::redact;

/// Wraps a [`MakeWriter`] so every formatted log record passes through the
/// PII redactor before it reaches the sink.
///
/// The fmt layer writes one record per writer, so the record is buffered
/// and redacted as a whole when the writer is flushed or dropped. This
/// covers span fields (such as request paths) as well as event fields.
#[derive(Debug, Clone)]
pub struct RedactingMakeWriter<M> {
    inner: M,
    enabled: bool,
}

impl<M> RedactingMakeWriter<M> {
    pub fn new(inner: M, enabled: bool) -> Self {
        Self { inner, enabled }
    }
}

impl<'a, M> MakeWriter<'a> for RedactingMakeWriter<M>
where
    M: MakeWriter<'a>,
{
    type Writer = RedactingWriter<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        RedactingWriter {
            inner: self.inner.make_writer(),
            enabled: self.enabled,
            buffer: Vec::new(),
        }
    }
}

pub struct RedactingWriter<W: Write> {
    inner: W,
    enabled: bool,
    buffer: Vec<u8>,
}

impl<W: Write> RedactingWriter<W> {
    fn write_record(&mut self) -> io::Result<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        let record = String::from_utf8_lossy(&self.buffer);
        let output = if self.enabled {
            redact(&record)
        } else {
            record.into_owned()
        };
        self.buffer.clear();
        self.inner.write_all(output.as_bytes())
    }
}

impl<W: Write> Write for RedactingWriter<W> {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.write_record()?;
        self.inner.flush()
    }
}

impl<W: Write> Drop for RedactingWriter<W> {
    fn drop(&mut self) {
        // Nowhere to report a failed log write.
        let _ = self.write_record();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;
    use tracing_subscriber::layer::SubscriberExt;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock()).into_owned()
        }
    }

    impl Write for Captured {
        fn write(&mut self, data: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(data);
            Ok(data.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Captured {
        type Writer = Captured;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn json_subscriber(sink: Captured, enabled: bool) -> impl tracing::Subscriber + Send + Sync {
        tracing_subscriber::registry().with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(RedactingMakeWriter::new(sink, enabled)),
        )
    }

    #[test]
    fn test_json_events_and_spans_are_redacted() {
        let sink = Captured::default();

        tracing::subscriber::with_default(json_subscriber(sink.clone(), true), || {
            let span = tracing::info_span!("http_request", path = "/api/members/search?dob=1980-02-14");
            let _guard = span.enter();
            tracing::info!(contact = "mark.jones@example.org", "Member phone 555-867-5309 updated");
        });

        let output = sink.text();
        assert!(!output.is_empty());
        assert!(!output.contains("mark.jones@example.org"));
        assert!(!output.contains("555-867-5309"));
        assert!(!output.contains("1980-02-14"));
        assert!(output.contains("EMAIL["));
        for line in output.lines() {
            assert!(serde_json::from_str::<serde_json::Value>(line).is_ok(), "{}", line);
        }
    }

    #[test]
    fn test_disabled_redaction_passes_records_through() {
        let sink = Captured::default();

        tracing::subscriber::with_default(json_subscriber(sink.clone(), false), || {
            tracing::info!(contact = "mark.jones@example.org", "lookup");
        });

        assert!(sink.text().contains("mark.jones@example.org"));
    }
}
