//! Logging setup for the estimator binary.
//!
//! Records go to stderr so stdout carries only calculation output. A log file
//! can be attached after startup; until then the file layer discards
//! everything. The level filter can be swapped at runtime.

use std::{
    fs::File,
    io::{self, IsTerminal, Write},
    path::Path,
    sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError},
};

use anyhow::{Result, anyhow};
use chrono::Local;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    EnvFilter,
    fmt::{
        self, FmtContext, MakeWriter,
        format::{FormatEvent, FormatFields, Writer},
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    reload,
    util::SubscriberInitExt,
};

/// Filter used when neither a flag, the config file nor `RUST_LOG` sets one.
pub const DEFAULT_FILTER: &str = "warn";

// --- Formatter ---

/// `12:04:31.207  WARN salary_core::input: message key=value`
struct LocalTimeFormat;

impl<S, N> FormatEvent<S, N> for LocalTimeFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let stamp = Local::now().format("%H:%M:%S%.3f");

        if writer.has_ansi_escapes() {
            let color = match *meta.level() {
                Level::ERROR => "31",
                Level::WARN => "33",
                Level::INFO => "32",
                Level::DEBUG => "34",
                Level::TRACE => "35",
            };
            write!(
                writer,
                "\x1b[2m{stamp}\x1b[0m \x1b[1;{color}m{:>5}\x1b[0m ",
                meta.level()
            )?;
        } else {
            write!(writer, "{stamp} {:>5} ", meta.level())?;
        }
        write!(writer, "{}: ", meta.target())?;

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

// --- Attachable log file ---

#[derive(Clone, Default)]
struct LogFile(Arc<Mutex<Option<File>>>);

impl LogFile {
    fn lock(&self) -> MutexGuard<'_, Option<File>> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

struct LogFileWriter<'a>(MutexGuard<'a, Option<File>>);

impl Write for LogFileWriter<'_> {
    fn write(
        &mut self,
        buf: &[u8],
    ) -> io::Result<usize> {
        match &mut *self.0 {
            Some(f) => f.write(buf),
            None => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut *self.0 {
            Some(f) => f.flush(),
            None => Ok(()),
        }
    }
}

impl<'a> MakeWriter<'a> for LogFile {
    type Writer = LogFileWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        LogFileWriter(self.lock())
    }
}

// --- Statics ---

type ReloadFn = Box<dyn Fn(EnvFilter) -> Result<()> + Send + Sync>;

static RELOAD_FILTER: OnceLock<ReloadFn> = OnceLock::new();
static LOG_FILE: OnceLock<LogFile> = OnceLock::new();

fn parse_filter(directives: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directives).map_err(|e| anyhow!("invalid log filter '{directives}': {e}"))
}

// --- Public API ---

/// Installs the global subscriber. Call once at startup.
///
/// `filter` takes precedence over `RUST_LOG`; without either the
/// [`DEFAULT_FILTER`] applies. A second call leaves the first subscriber in
/// place.
pub fn init_logging(filter: Option<&str>) -> Result<()> {
    let filter = match filter {
        Some(directives) => parse_filter(directives)?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
    };
    let (filter_layer, filter_handle) = reload::Layer::new(filter);
    let log_file = LOG_FILE.get_or_init(LogFile::default).clone();

    let stderr_layer = fmt::layer()
        .event_format(LocalTimeFormat)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr);

    let file_layer = fmt::layer()
        .event_format(LocalTimeFormat)
        .with_ansi(false)
        .with_writer(log_file);

    if tracing_subscriber::registry()
        .with(filter_layer)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .is_ok()
    {
        let _ = RELOAD_FILTER.set(Box::new(move |filter| {
            filter_handle
                .reload(filter)
                .map_err(|e| anyhow!("log filter reload failed: {e}"))
        }));
    }
    Ok(())
}

/// Replaces the active filter. Accepts a bare level or any `EnvFilter` directive.
pub fn set_log_level(directives: &str) -> Result<()> {
    let filter = parse_filter(directives)?;
    match RELOAD_FILTER.get() {
        Some(reload) => reload(filter),
        None => anyhow::bail!("logging not yet initialized"),
    }
}

/// Appends log records to `path` from now on, replacing any open log file.
/// The parent directory must exist.
pub fn enable_file_logging(path: &Path) -> Result<()> {
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| anyhow!("cannot open log file '{}': {e}", path.display()))?;

    match LOG_FILE.get() {
        Some(slot) => {
            *slot.lock() = Some(file);
            Ok(())
        }
        None => anyhow::bail!("logging not yet initialized"),
    }
}

/// Closes the log file. Records keep going to stderr.
pub fn disable_file_logging() {
    if let Some(slot) = LOG_FILE.get() {
        *slot.lock() = None;
    }
}
