//! Guide tools — weather and local-time adapters for a conversational agent.
//!
//! Each tool validates its arguments, performs at most one external lookup,
//! and always answers with a JSON object, even on failure.

pub mod config;
pub mod openweather;
pub mod tools;
pub mod types;

pub use config::{KeySource, ToolsConfig};
pub use tools::{Tool, ToolDescriptor, ToolRegistry};
pub use types::{ToolError, ToolErrorKind, ToolRequest, ToolResult};
