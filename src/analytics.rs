//! Fire-and-forget analytics sink.

/// Receives interaction events. Implementations must not fail loudly.
pub trait AnalyticsSink {
    fn track(&mut self, action: &str, category: &str);
}

impl<F> AnalyticsSink for F
where
    F: FnMut(&str, &str),
{
    fn track(&mut self, action: &str, category: &str) {
        self(action, category)
    }
}

/// Logs events through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAnalytics;

impl AnalyticsSink for TracingAnalytics {
    fn track(&mut self, action: &str, category: &str) {
        tracing::info!(target: "spark_page::analytics", category, action, "event tracked");
    }
}
