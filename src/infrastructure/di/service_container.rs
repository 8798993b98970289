//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::TreeService;
use crate::config::Settings;
use crate::infrastructure::traits::GraphRenderer;

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Presentation collaborator
    pub renderer: Arc<dyn GraphRenderer>,
}

impl ServiceContainer {
    /// Create a new service container with the renderer named in settings.
    pub fn new(settings: Settings) -> Self {
        let renderer = settings.render.renderer();
        Self::with_deps(settings, renderer)
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, renderer: Arc<dyn GraphRenderer>) -> Self {
        let settings = Arc::new(settings);

        Self { settings, renderer }
    }

    pub fn tree_service(&self) -> TreeService {
        TreeService::new((*self.settings).clone(), Arc::clone(&self.renderer))
    }
}
