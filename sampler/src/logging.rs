use crate::errors::{Error, Result};
use chrono::Local;
use std::fmt;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::subscriber::DefaultGuard;
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::EnvFilter;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const FILE_STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// `<timestamp> - <message>` event format.
#[derive(Debug, Clone, Copy)]
pub struct DashFormat;

impl<S, N> FormatEvent<S, N> for DashFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        write!(writer, "{} - ", Local::now().format(TIMESTAMP_FORMAT))?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Console plus timestamped-file logger. Active until dropped.
pub struct Logger {
    path: PathBuf,
    _guard: DefaultGuard,
}

impl Logger {
    pub fn init(log_dir: &Path) -> Result<Self> {
        fs::create_dir_all(log_dir)?;
        let path = log_dir.join(format!(
            "log_output_{}.txt",
            Local::now().format(FILE_STAMP_FORMAT)
        ));
        let file = File::create(&path)?;

        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new("info"))
            .map_err(|e| Error::Logging(e.to_string()))?;

        let subscriber = tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .event_format(DashFormat)
                    .with_ansi(false)
                    .with_writer(std::io::stdout),
            )
            .with(
                tracing_subscriber::fmt::layer()
                    .event_format(DashFormat)
                    .with_ansi(false)
                    .with_writer(Arc::new(file)),
            );

        let guard = tracing::subscriber::set_default(subscriber);
        Ok(Self {
            path,
            _guard: guard,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
