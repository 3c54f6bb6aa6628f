use std::sync::Arc;

use crate::analytics::{AnalyticsSink, NoopAnalytics};
use crate::collaborators::{
    CompactJsonViewer, Navigator, PassthroughRedactor, PayloadViewer, PromptRoutes, Redactor,
};
use crate::format::Viewer;
use crate::palette::{HashPalette, Palette};

/// Everything a column needs at render time besides the row itself
///
/// Built once per table session and shared by all rows.
pub struct RenderContext {
    pub viewer: Viewer,
    pub redactor: Box<dyn Redactor>,
    pub payloads: Box<dyn PayloadViewer>,
    pub navigator: Box<dyn Navigator>,
    pub analytics: Arc<dyn AnalyticsSink>,
    pub palette: Box<dyn Palette>,
}

impl RenderContext {
    pub fn new(viewer: Viewer) -> Self {
        Self {
            viewer,
            redactor: Box::new(PassthroughRedactor),
            payloads: Box::new(CompactJsonViewer::default()),
            navigator: Box::new(PromptRoutes::default()),
            analytics: Arc::new(NoopAnalytics),
            palette: Box::new(HashPalette),
        }
    }

    pub fn with_redactor(mut self, redactor: impl Redactor + 'static) -> Self {
        self.redactor = Box::new(redactor);
        self
    }

    pub fn with_payload_viewer(mut self, payloads: impl PayloadViewer + 'static) -> Self {
        self.payloads = Box::new(payloads);
        self
    }

    pub fn with_navigator(mut self, navigator: impl Navigator + 'static) -> Self {
        self.navigator = Box::new(navigator);
        self
    }

    pub fn with_analytics(mut self, analytics: Arc<dyn AnalyticsSink>) -> Self {
        self.analytics = analytics;
        self
    }

    pub fn with_palette(mut self, palette: impl Palette + 'static) -> Self {
        self.palette = Box::new(palette);
        self
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new(Viewer::detect())
    }
}
