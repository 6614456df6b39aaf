//! Log capture for tests.
//!
//! Records are kept per thread, so tests running in parallel only see what
//! they logged themselves.

use std::cell::RefCell;
use std::sync::Once;

use log::{Level, LevelFilter, Log, Metadata, Record};

struct CaptureLogger;

static LOGGER: CaptureLogger = CaptureLogger;
static INSTALL: Once = Once::new();

thread_local! {
    static RECORDS: RefCell<Vec<(Level, String)>> = const { RefCell::new(Vec::new()) };
}

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        RECORDS.with(|records| {
            records
                .borrow_mut()
                .push((record.level(), record.args().to_string()));
        });
    }

    fn flush(&self) {}
}

/// Run `f` and return what it logged at `level` on this thread.
pub fn capture<T>(level: Level, f: impl FnOnce() -> T) -> (T, Vec<String>) {
    INSTALL.call_once(|| {
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(LevelFilter::Trace);
        }
    });

    RECORDS.with(|records| records.borrow_mut().clear());
    let value = f();
    let messages = RECORDS.with(|records| {
        records
            .borrow_mut()
            .drain(..)
            .filter(|(l, _)| *l == level)
            .map(|(_, message)| message)
            .collect()
    });
    (value, messages)
}
