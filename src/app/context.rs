use crate::ports::{TemplateStore, ToolRunner};

/// Application context holding dependencies for command execution.
pub struct AppContext<T: TemplateStore, R: ToolRunner> {
    templates: T,
    runner: R,
}

impl<T: TemplateStore, R: ToolRunner> AppContext<T, R> {
    /// Create a new application context.
    pub fn new(templates: T, runner: R) -> Self {
        Self { templates, runner }
    }

    /// Get a reference to the template store.
    pub fn templates(&self) -> &T {
        &self.templates
    }

    /// Get a reference to the tool runner.
    pub fn runner(&self) -> &R {
        &self.runner
    }
}
