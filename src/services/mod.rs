mod embedded_template_store;
mod system_tool_runner;

pub use embedded_template_store::EmbeddedTemplateStore;
pub use system_tool_runner::SystemToolRunner;
