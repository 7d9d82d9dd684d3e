use std::fmt::{self as std_fmt, Write as _};

use tracing::{
    field::{Field, Visit},
    Event, Level, Subscriber,
};
use tracing_subscriber::{
    fmt::{format, FmtContext, FormatEvent, FormatFields},
    registry::LookupSpan,
};

/// Formats events as `brite: <level>: <message> (<field> <value>, ...)`.
///
/// Field names are shortened to what a reader of the diagnostics cares
/// about, e.g. `display_id = 1` becomes `display 1`.
pub struct Formatter(());

impl Formatter {
    pub fn new() -> Formatter {
        Formatter(())
    }
}

fn label(name: &str) -> &str {
    match name {
        "display_id" => "display",
        "index" => "service",
        other => other,
    }
}

#[derive(Default)]
struct Fields {
    message: String,
    values: Vec<String>,
}

impl Visit for Fields {
    fn record_f64(&mut self, field: &Field, value: f64) {
        // Brightness fractions are f32 from the OS. Narrow them back so they
        // print the way they were reported.
        self.values
            .push(format!("{} {}", label(field.name()), value as f32));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std_fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{value:?}");
        } else {
            self.values
                .push(format!("{} {value:?}", label(field.name())));
        }
    }
}

impl<S, N> FormatEvent<S, N> for Formatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: format::Writer<'_>,
        event: &Event<'_>,
    ) -> std_fmt::Result {
        let level = match *event.metadata().level() {
            Level::TRACE => "trace",
            Level::DEBUG => "debug",
            Level::INFO => "info",
            Level::WARN => "warn",
            Level::ERROR => "error",
        };

        let mut fields = Fields::default();
        event.record(&mut fields);

        write!(writer, "brite: {level}: {}", fields.message)?;
        if !fields.values.is_empty() {
            write!(writer, " ({})", fields.values.join(", "))?;
        }

        writeln!(writer)
    }
}
