#![forbid(unsafe_code)]

//! Routes `tracing` output to the browser console.
//!
//! A `tracing-subscriber` fmt layer formats each event (no ANSI, no
//! timestamps: `std::time` is unavailable on `wasm32-unknown-unknown`) into a
//! per-event writer. The writer buffers bytes and emits one console call per
//! complete line, picking `console.log`/`warn`/`error` from the event level.

use tracing::Level;

/// Console method an event is written with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleLevel {
    Log,
    Warn,
    Error,
}

impl ConsoleLevel {
    pub fn for_level(level: &Level) -> Self {
        if *level == Level::ERROR {
            Self::Error
        } else if *level == Level::WARN {
            Self::Warn
        } else {
            Self::Log
        }
    }
}

/// Accumulates formatted bytes and splits them into lines.
#[derive(Debug, Default)]
pub struct LineBuffer {
    buf: Vec<u8>,
}

impl LineBuffer {
    pub fn push(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Remove and return every complete line (without its newline).
    pub fn take_lines(&mut self) -> Vec<String> {
        let Some(last_newline) = self.buf.iter().rposition(|b| *b == b'\n') else {
            return Vec::new();
        };
        let rest = self.buf.split_off(last_newline + 1);
        let complete = std::mem::replace(&mut self.buf, rest);
        String::from_utf8_lossy(&complete)
            .lines()
            .map(str::to_owned)
            .collect()
    }

    /// Remove and return a trailing partial line, if any.
    pub fn take_rest(&mut self) -> Option<String> {
        if self.buf.is_empty() {
            return None;
        }
        let rest = std::mem::take(&mut self.buf);
        Some(String::from_utf8_lossy(&rest).into_owned())
    }
}

#[cfg(target_arch = "wasm32")]
mod sink {
    use std::io;

    use tracing::Metadata;
    use tracing_subscriber::fmt::MakeWriter;
    use wasm_bindgen::JsValue;

    use super::{ConsoleLevel, LineBuffer};

    fn emit(level: ConsoleLevel, line: &str) {
        let value = JsValue::from_str(line);
        match level {
            ConsoleLevel::Log => web_sys::console::log_1(&value),
            ConsoleLevel::Warn => web_sys::console::warn_1(&value),
            ConsoleLevel::Error => web_sys::console::error_1(&value),
        }
    }

    pub struct ConsoleWriter {
        level: ConsoleLevel,
        lines: LineBuffer,
    }

    impl io::Write for ConsoleWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.lines.push(buf);
            for line in self.lines.take_lines() {
                emit(self.level, &line);
            }
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            if let Some(rest) = self.lines.take_rest() {
                emit(self.level, &rest);
            }
            Ok(())
        }
    }

    impl Drop for ConsoleWriter {
        fn drop(&mut self) {
            let _ = io::Write::flush(self);
        }
    }

    pub struct MakeConsoleWriter;

    impl<'a> MakeWriter<'a> for MakeConsoleWriter {
        type Writer = ConsoleWriter;

        fn make_writer(&'a self) -> Self::Writer {
            ConsoleWriter {
                level: ConsoleLevel::Log,
                lines: LineBuffer::default(),
            }
        }

        fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
            ConsoleWriter {
                level: ConsoleLevel::for_level(meta.level()),
                lines: LineBuffer::default(),
            }
        }
    }

    /// Install the console subscriber. Later calls are no-ops.
    pub fn init() {
        let _ = tracing_subscriber::fmt()
            .with_writer(MakeConsoleWriter)
            .with_ansi(false)
            .without_time()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    }
}

#[cfg(target_arch = "wasm32")]
pub use sink::init;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn level_mapping() {
        assert_eq!(ConsoleLevel::for_level(&Level::ERROR), ConsoleLevel::Error);
        assert_eq!(ConsoleLevel::for_level(&Level::WARN), ConsoleLevel::Warn);
        assert_eq!(ConsoleLevel::for_level(&Level::INFO), ConsoleLevel::Log);
        assert_eq!(ConsoleLevel::for_level(&Level::TRACE), ConsoleLevel::Log);
    }

    #[test]
    fn splits_complete_lines_and_keeps_partial() {
        let mut lb = LineBuffer::default();
        lb.push(b"INFO folio: one\nDEBUG fo");
        assert_eq!(lb.take_lines(), vec!["INFO folio: one".to_owned()]);
        lb.push(b"lio: two\n");
        assert_eq!(lb.take_lines(), vec!["DEBUG folio: two".to_owned()]);
        assert_eq!(lb.take_rest(), None);
    }

    #[test]
    fn partial_line_is_flushed_on_demand() {
        let mut lb = LineBuffer::default();
        lb.push(b"no newline");
        assert!(lb.take_lines().is_empty());
        assert_eq!(lb.take_rest().as_deref(), Some("no newline"));
    }
}
