//! A `log` sink that forwards records over a channel.
//!
//! Host applications that own the terminal (or run headless) install a [`ChannelLogger`] and drain
//! the receiving end wherever it suits them, instead of having the runtime write to stdout.

use crossbeam::channel::{self, Receiver, Sender};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

/// A single formatted log record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogMessage {
    /// The severity of the record.
    pub level: Level,
    /// The module path the record was logged from, unless overridden at the call site.
    pub target: String,
    /// The formatted message.
    pub message: String,
}

/// Forwards every enabled record as a [`LogMessage`].
pub struct ChannelLogger {
    sender: Sender<LogMessage>,
    level: LevelFilter,
}

impl ChannelLogger {
    /// Create a logger that forwards records at `level` or more severe into `sender`.
    pub fn new(sender: Sender<LogMessage>, level: LevelFilter) -> Self {
        Self { sender, level }
    }

    /// Create a logger together with the receiving end of its channel.
    pub fn with_receiver(level: LevelFilter) -> (Self, Receiver<LogMessage>) {
        let (sender, receiver) = channel::unbounded();
        (Self::new(sender, level), receiver)
    }
}

impl Log for ChannelLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        // A dropped receiver just means nobody is listening anymore.
        let _ = self.sender.send(LogMessage {
            level: record.level(),
            target: record.target().to_string(),
            message: record.args().to_string(),
        });
    }

    fn flush(&self) {}
}

/// Install a [`ChannelLogger`] as the global logger and return the receiving end.
///
/// # Errors
/// Fails if a global logger has already been installed.
pub fn init(level: LevelFilter) -> Result<Receiver<LogMessage>, SetLoggerError> {
    let (logger, receiver) = ChannelLogger::with_receiver(level);
    log::set_boxed_logger(Box::new(logger))?;
    log::set_max_level(level);
    Ok(receiver)
}
