//! A small leveled logger with colored, timestamped output.
//!
//! Loggers are values: construct one and pass it to whatever needs to report
//! progress. Whether escape codes are emitted is fixed when the logger is
//! built, from a flag supplied by the caller, rather than sniffed from the
//! process environment on first use.

use std::{
    fmt::{self, Display},
    io::{self, IsTerminal, Write},
    sync::Mutex,
};

use chrono::{DateTime, Local};
use owo_colors::{AnsiColors, OwoColorize};

/// Severity, ordered from most to least verbose.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

/// The kind of line being written. `Success` shares the `Info` threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tag {
    Debug,
    Info,
    Warn,
    Error,
    Success,
}

impl Tag {
    fn symbol(self) -> &'static str {
        match self {
            Tag::Debug => ">",
            Tag::Info => "i",
            Tag::Warn => "!",
            Tag::Error => "x",
            Tag::Success => "v",
        }
    }

    fn color(self) -> AnsiColors {
        match self {
            Tag::Debug => AnsiColors::Blue,
            Tag::Info | Tag::Success => AnsiColors::Green,
            Tag::Warn => AnsiColors::Yellow,
            Tag::Error => AnsiColors::Red,
        }
    }

    fn level(self) -> LogLevel {
        match self {
            Tag::Debug => LogLevel::Debug,
            Tag::Info | Tag::Success => LogLevel::Info,
            Tag::Warn => LogLevel::Warn,
            Tag::Error => LogLevel::Error,
        }
    }
}

pub struct Logger {
    level: LogLevel,
    color: bool,
    sink: Mutex<Box<dyn Write + Send>>,
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.level)
            .field("color", &self.color)
            .finish_non_exhaustive()
    }
}

impl Logger {
    /// Create a logger writing to `sink`. Colors are used only when
    /// `is_terminal` is true.
    pub fn new<W>(level: LogLevel, sink: W, is_terminal: bool) -> Self
    where
        W: Write + Send + 'static,
    {
        Self {
            level,
            color: is_terminal,
            sink: Mutex::new(Box::new(sink)),
        }
    }

    /// Create a logger writing to standard output, colored when standard
    /// output is a terminal.
    pub fn stdout(level: LogLevel) -> Self {
        let stdout = io::stdout();
        let is_terminal = stdout.is_terminal();
        Self::new(level, stdout, is_terminal)
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn set_level(&mut self, level: LogLevel) {
        self.level = level;
    }

    pub fn uses_color(&self) -> bool {
        self.color
    }

    pub fn debug(&self, message: impl Display) {
        self.write(Tag::Debug, message);
    }

    pub fn info(&self, message: impl Display) {
        self.write(Tag::Info, message);
    }

    pub fn warn(&self, message: impl Display) {
        self.write(Tag::Warn, message);
    }

    pub fn error(&self, message: impl Display) {
        self.write(Tag::Error, message);
    }

    pub fn success(&self, message: impl Display) {
        self.write(Tag::Success, message);
    }

    fn write(&self, tag: Tag, message: impl Display) {
        if tag.level() < self.level {
            return;
        }
        let line = format_message(tag, &message, self.color, Local::now());
        // A logger has nowhere to report its own failures.
        if let Ok(mut sink) = self.sink.lock() {
            let _ = sink.write_all(line.as_bytes());
            let _ = sink.flush();
        }
    }
}

fn format_message(tag: Tag, message: &dyn Display, color: bool, now: DateTime<Local>) -> String {
    let timestamp = now.format("%Y.%m.%d(%w) %H:%M:%S%.3f").to_string();
    if color {
        format!(
            "{} {}{}{} {}\n",
            timestamp.bright_black(),
            "[".dimmed(),
            tag.symbol().color(tag.color()),
            "]".dimmed(),
            message
        )
    } else {
        format!("{} [{}] {}\n", timestamp, tag.symbol(), message)
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        tag_for(metadata.level()).level() >= self.level
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            self.write(tag_for(record.level()), record.args());
        }
    }

    fn flush(&self) {
        if let Ok(mut sink) = self.sink.lock() {
            let _ = sink.flush();
        }
    }
}

fn tag_for(level: log::Level) -> Tag {
    match level {
        log::Level::Error => Tag::Error,
        log::Level::Warn => Tag::Warn,
        log::Level::Info => Tag::Info,
        log::Level::Debug | log::Level::Trace => Tag::Debug,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::TimeZone;

    use super::*;

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Buffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn fixed_time() -> DateTime<Local> {
        // a Wednesday
        Local.with_ymd_and_hms(2025, 1, 8, 9, 5, 3).unwrap()
    }

    #[test]
    fn formats_plain_line() {
        let line = format_message(Tag::Info, &"hello world", false, fixed_time());
        assert_eq!(line, "2025.01.08(3) 09:05:03.000 [i] hello world\n");
    }

    #[test]
    fn colored_line_wraps_tag_in_escape_codes() {
        let line = format_message(Tag::Error, &"boom", true, fixed_time());
        assert!(line.contains("\u{1b}[31mx\u{1b}[39m"), "{:?}", line);
        assert!(line.ends_with(" boom\n"));
    }

    #[test]
    fn level_filters_messages() {
        let buffer = Buffer::default();
        let mut logger = Logger::new(LogLevel::Warn, buffer.clone(), false);
        logger.debug("hidden debug");
        logger.info("hidden info");
        logger.success("hidden success");
        logger.warn("shown warn");
        logger.error("shown error");

        let contents = buffer.contents();
        assert!(!contents.contains("hidden"));
        assert!(contents.contains("[!] shown warn"));
        assert!(contents.contains("[x] shown error"));

        logger.set_level(LogLevel::Debug);
        logger.debug("now shown");
        assert!(buffer.contents().contains("[>] now shown"));
    }

    #[test]
    fn no_escape_codes_without_terminal() {
        let buffer = Buffer::default();
        let logger = Logger::new(LogLevel::Info, buffer.clone(), false);
        logger.success("done");
        assert!(!logger.uses_color());
        assert!(!buffer.contents().contains('\u{1b}'));
        assert!(buffer.contents().contains("[v] done"));
    }

    #[test]
    fn serves_as_log_backend() {
        use log::Log;

        let buffer = Buffer::default();
        let logger = Logger::new(LogLevel::Info, buffer.clone(), false);
        logger.log(
            &log::Record::builder()
                .level(log::Level::Warn)
                .args(format_args!("from the facade"))
                .build(),
        );
        logger.log(
            &log::Record::builder()
                .level(log::Level::Trace)
                .args(format_args!("too verbose"))
                .build(),
        );
        let contents = buffer.contents();
        assert!(contents.contains("[!] from the facade"));
        assert!(!contents.contains("too verbose"));
    }
}
