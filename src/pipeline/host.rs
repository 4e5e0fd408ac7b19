//! Host services handed to [`Page::mount`](super::Page::mount).

use crate::analytics::{AnalyticsSink, TracingAnalytics};
use crate::chrome::{Presenter, TracingPresenter};
use crate::observe::{ErrorSink, TracingSink};
use crate::state::{MemoryStore, PreferenceStore};
use crate::types::{HostCapabilities, Viewport};

/// Everything the page needs from its environment besides the document.
pub struct HostServices {
    pub capabilities: HostCapabilities,
    pub viewport: Viewport,
    pub preferences: Box<dyn PreferenceStore>,
    pub presenter: Box<dyn Presenter>,
    pub analytics: Box<dyn AnalyticsSink>,
    pub error_sink: Box<dyn ErrorSink>,
}

impl Default for HostServices {
    fn default() -> Self {
        Self::headless()
    }
}

impl HostServices {
    /// Desktop capabilities, in-memory preferences, tracing-backed sinks.
    pub fn headless() -> Self {
        Self {
            capabilities: HostCapabilities::desktop(),
            viewport: Viewport::default(),
            preferences: Box::new(MemoryStore::new()),
            presenter: Box::new(TracingPresenter),
            analytics: Box::new(TracingAnalytics),
            error_sink: Box::new(TracingSink),
        }
    }

    pub fn with_capabilities(mut self, capabilities: HostCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn with_preferences(mut self, store: impl PreferenceStore + 'static) -> Self {
        self.preferences = Box::new(store);
        self
    }

    pub fn with_presenter(mut self, presenter: impl Presenter + 'static) -> Self {
        self.presenter = Box::new(presenter);
        self
    }

    pub fn with_analytics(mut self, analytics: impl AnalyticsSink + 'static) -> Self {
        self.analytics = Box::new(analytics);
        self
    }

    pub fn with_error_sink(mut self, sink: impl ErrorSink + 'static) -> Self {
        self.error_sink = Box::new(sink);
        self
    }
}
