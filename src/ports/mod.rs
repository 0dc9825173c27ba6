mod template_store;
mod tool_runner;

pub use template_store::{TemplateKind, TemplateStore};
pub use tool_runner::{ToolError, ToolOutput, ToolRunner};
