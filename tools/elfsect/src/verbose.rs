//! Log output for the command-line tool.
//!
//! Three output levels controlled by CLI flags:
//! - **Quiet** (`-q`): errors only
//! - **Default** (no flag): warnings and progress
//! - **Verbose** (`-v`): everything, including each byte range the reader pulls

use std::io::Write;
use std::time::Instant;

use log::{Level, LevelFilter, Log, Metadata, Record};

/// Output verbosity level.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum Verbosity {
    Quiet = 0,
    Default = 1,
    Verbose = 2,
}

impl Verbosity {
    /// Maps the `-q`/`-v` flags to a level.
    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        if quiet {
            Self::Quiet
        } else if verbose {
            Self::Verbose
        } else {
            Self::Default
        }
    }

    fn filter(self) -> LevelFilter {
        match self {
            Self::Quiet => LevelFilter::Error,
            Self::Default => LevelFilter::Info,
            Self::Verbose => LevelFilter::Trace,
        }
    }
}

/// Writes log records to stderr so stdout stays reserved for section data.
struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let mut stderr = std::io::stderr().lock();
        let _ = match record.level() {
            Level::Error | Level::Warn | Level::Info => {
                writeln!(stderr, "{}: {}", record.level().as_str().to_lowercase(), record.args())
            }
            Level::Debug | Level::Trace => {
                writeln!(stderr, "  [{}] {}", record.target(), record.args())
            }
        };
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Initialize logging for the current process.
pub fn init(verbosity: Verbosity) {
    // A second call keeps the first logger; only the level changes.
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(verbosity.filter());
}

/// Returns `true` if verbose mode is active.
pub fn is_verbose() -> bool {
    log::max_level() >= LevelFilter::Trace
}

/// RAII timer that logs elapsed duration on drop when verbose mode is active.
///
/// ```ignore
/// let _t = Timer::start("read .text");
/// // ... work ...
/// // logs "read .text: 42µs" on drop
/// ```
pub struct Timer {
    label: String,
    start: Instant,
}

impl Timer {
    /// Begin timing a labeled operation.
    pub fn start(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            start: Instant::now(),
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        if is_verbose() {
            log::debug!("{}: {:.1?}", self.label, self.start.elapsed());
        }
    }
}
