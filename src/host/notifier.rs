/// Surfaces fatal conditions to an operator.
pub trait UserNotifier {
    fn report_error(&self, title: &str, message: &str);
}

/// Reports through the `tracing` error channel instead of a dialog.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl UserNotifier for TracingNotifier {
    fn report_error(&self, title: &str, message: &str) {
        tracing::error!(title, "{message}");
    }
}
