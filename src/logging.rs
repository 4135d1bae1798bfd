// src/logging.rs - logger handle injected into services

use std::fmt;
use std::sync::Arc;

use log::{Level, Log, Metadata, Record};

/// Writes records to an explicit sink under a fixed target.
///
/// Components receive one of these at construction instead of calling the
/// global `log` macros, so tests can swap the sink.
#[derive(Clone)]
pub struct Logger {
    target: &'static str,
    sink: Arc<dyn Log>,
}

/// Forwards to whatever logger `env_logger` (or another backend) installed.
struct ProcessSink;

impl Log for ProcessSink {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        log::logger().enabled(metadata)
    }

    fn log(&self, record: &Record<'_>) {
        log::logger().log(record)
    }

    fn flush(&self) {
        log::logger().flush()
    }
}

impl Logger {
    pub fn new(target: &'static str, sink: Arc<dyn Log>) -> Self {
        Self { target, sink }
    }

    pub fn process(target: &'static str) -> Self {
        Self::new(target, Arc::new(ProcessSink))
    }

    pub fn info(&self, args: fmt::Arguments<'_>) {
        self.write(Level::Info, args)
    }

    pub fn warn(&self, args: fmt::Arguments<'_>) {
        self.write(Level::Warn, args)
    }

    pub fn error(&self, args: fmt::Arguments<'_>) {
        self.write(Level::Error, args)
    }

    fn write(&self, level: Level, args: fmt::Arguments<'_>) {
        let metadata = Metadata::builder().level(level).target(self.target).build();
        if !self.sink.enabled(&metadata) {
            return;
        }
        self.sink.log(
            &Record::builder()
                .metadata(metadata)
                .args(args)
                .build(),
        );
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger").field("target", &self.target).finish()
    }
}
