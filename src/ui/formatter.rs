use crate::ledger::InvocationLedger;
use crate::value::Value;
use crossterm::style::Stylize;
use std::sync::atomic::{AtomicBool, Ordering};

/// Pretty printing utilities for callmap output
pub struct Formatter;

impl Formatter {
    /// Format a call as `member(arg, arg)`.
    pub fn format_call(member: &str, args: &[Value]) -> String {
        let args: Vec<String> = args.iter().map(Value::to_string).collect();
        format!("{}({})", member, args.join(", "))
    }

    /// Format the ledger, one line per recorded call.
    pub fn format_ledger(ledger: &InvocationLedger) -> String {
        if ledger.is_empty() {
            return "No calls recorded".to_string();
        }

        let mut lines = vec![format!("Invocation Ledger ({} calls)", ledger.total_calls())];
        for member in ledger.members() {
            for (i, args) in ledger.history_for(member).iter().enumerate() {
                lines.push(format!(
                    "  #{:<3} {}",
                    i + 1,
                    Self::format_call(member, args)
                ));
            }
        }
        lines.join("\n")
    }

    /// Format an informational message in blue.
    pub fn info(message: impl AsRef<str>) -> String {
        Self::apply_color(message.as_ref(), ColorKind::Info)
    }

    /// Format a success message in green.
    pub fn success(message: impl AsRef<str>) -> String {
        Self::apply_color(message.as_ref(), ColorKind::Success)
    }

    /// Format a warning message in yellow.
    pub fn warning(message: impl AsRef<str>) -> String {
        Self::apply_color(message.as_ref(), ColorKind::Warning)
    }

    /// Format an error message in red.
    pub fn error(message: impl AsRef<str>) -> String {
        Self::apply_color(message.as_ref(), ColorKind::Error)
    }

    /// Configure whether ANSI colors are enabled.
    pub fn configure_colors(enable: bool) {
        COLOR_ENABLED.store(enable, Ordering::Relaxed);
    }

    /// Auto-configure color output based on environment.
    pub fn configure_colors_from_env() {
        let no_color = std::env::var_os("NO_COLOR").is_some();
        Self::configure_colors(!no_color);
    }

    fn apply_color(message: &str, kind: ColorKind) -> String {
        if !COLOR_ENABLED.load(Ordering::Relaxed) {
            return message.to_string();
        }

        match kind {
            ColorKind::Info => format!("{}", message.blue()),
            ColorKind::Success => format!("{}", message.green()),
            ColorKind::Warning => format!("{}", message.yellow()),
            ColorKind::Error => format!("{}", message.red()),
        }
    }
}

#[derive(Copy, Clone)]
enum ColorKind {
    Info,
    Success,
    Warning,
    Error,
}

static COLOR_ENABLED: AtomicBool = AtomicBool::new(true);
