use colored::*;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::FormatEvent;
use tracing_subscriber::fmt::format::{self, Writer};
use tracing_subscriber::registry::LookupSpan;

/// Console log lines: a colored level tag, the module target on the
/// verbose levels, then the message fields.
pub struct S7mapFormatter;

fn level_tag(level: Level) -> (&'static str, fn(ColoredString) -> ColoredString) {
    match level {
        Level::TRACE => ("[.]", |s| s.dimmed()),
        Level::DEBUG => ("[?]", |s| s.cyan()),
        Level::INFO => ("[>]", |s| s.green().bold()),
        Level::WARN => ("[!]", |s| s.yellow().bold()),
        Level::ERROR => ("[x]", |s| s.red().bold()),
    }
}

impl<S, N> FormatEvent<S, N> for S7mapFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> format::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let level = *meta.level();

        let (tag, paint) = level_tag(level);
        write!(writer, "{} ", paint(tag.into()))?;

        // Trace and debug lines name their origin; the user-facing levels
        // stay clean.
        if level == Level::TRACE || level == Level::DEBUG {
            write!(writer, "{} ", format!("{}:", meta.target()).dimmed())?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

/// Installs the global subscriber: env-filterable, defaulting to `info`,
/// logging to stderr so scan results on stdout stay machine-readable.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .event_format(S7mapFormatter)
        .init();
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_level_gets_a_distinct_tag() {
        let levels = [
            Level::TRACE,
            Level::DEBUG,
            Level::INFO,
            Level::WARN,
            Level::ERROR,
        ];
        let tags: Vec<&str> = levels.iter().map(|level| level_tag(*level).0).collect();

        let unique: HashSet<&&str> = tags.iter().collect();
        assert_eq!(unique.len(), tags.len());
        assert!(tags.iter().all(|tag| tag.len() == 3));
    }

    #[test]
    fn failures_are_marked_with_a_cross() {
        assert_eq!(level_tag(Level::ERROR).0, "[x]");
        assert_eq!(level_tag(Level::WARN).0, "[!]");
    }
}
