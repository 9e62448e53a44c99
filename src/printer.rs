//! Output sinks for formatted log blocks

use std::io::{self, Write};

/// Log target used by [`LogPrinter`].
pub const LOG_TARGET: &str = "activity_logger";

/// The part of an exchange a block describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The request, at the moment it is sent
    Request,
    /// The response, once the call has finished
    Response { success: bool },
}

impl Phase {
    /// True for a failed response.
    pub fn is_error(&self) -> bool {
        match self {
            Phase::Request => false,
            Phase::Response { success } => !success,
        }
    }
}

/// Receives every finished block of text.
///
/// Implementations must not panic and have no way to report failure: a
/// broken sink is the implementor's concern.
pub trait Printer: Send + Sync {
    fn emit(&self, text: String, phase: Phase);
}

impl<F> Printer for F
where
    F: Fn(String, Phase) + Send + Sync,
{
    fn emit(&self, text: String, phase: Phase) {
        self(text, phase)
    }
}

/// Writes each block, followed by a newline, to standard output.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutPrinter;

impl Printer for StdoutPrinter {
    fn emit(&self, text: String, _phase: Phase) {
        let mut stdout = io::stdout().lock();
        if let Err(e) = writeln!(stdout, "{}", text).and_then(|_| stdout.flush()) {
            log::debug!("Failed to write log block to stdout: {}", e);
        }
    }
}

/// Routes blocks into the `log` facade: failed responses at `error`,
/// everything else at `info`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogPrinter;

impl Printer for LogPrinter {
    fn emit(&self, text: String, phase: Phase) {
        if phase.is_error() {
            log::error!(target: LOG_TARGET, "{}", text);
        } else {
            log::info!(target: LOG_TARGET, "{}", text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn phase_reports_errors_only_for_failed_responses() {
        assert!(!Phase::Request.is_error());
        assert!(!Phase::Response { success: true }.is_error());
        assert!(Phase::Response { success: false }.is_error());
    }

    #[test]
    fn closures_are_printers() {
        let lines = Arc::new(Mutex::new(Vec::new()));
        let sink = lines.clone();
        let printer: Arc<dyn Printer> = Arc::new(move |text: String, phase: Phase| {
            sink.lock().expect("lock").push((text, phase));
        });

        printer.emit("first".to_string(), Phase::Request);
        printer.emit("second".to_string(), Phase::Response { success: false });

        let lines = lines.lock().expect("lock");
        assert_eq!(
            *lines,
            vec![
                ("first".to_string(), Phase::Request),
                ("second".to_string(), Phase::Response { success: false }),
            ]
        );
    }
}
