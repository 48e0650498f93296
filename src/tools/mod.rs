pub mod time;
pub mod traits;
pub mod validate;
pub mod weather;

pub use time::TimeTool;
pub use traits::{ParamSpec, ParamType, Tool, ToolDescriptor};
pub use weather::WeatherTool;

use crate::config::ToolsConfig;
use crate::types::{ToolError, ToolRequest, ToolResult};
use anyhow::Result;
use tracing::{info, warn};

struct Registered {
    descriptor: ToolDescriptor,
    tool: Box<dyn Tool>,
}

/// The set of tools exposed to the orchestrator, keyed by name.
///
/// Descriptors are captured once at registration. Dispatch only routes; all
/// validation and execution happen inside the tool.
#[derive(Default)]
pub struct ToolRegistry {
    entries: Vec<Registered>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the weather and time tools configured from `config`.
    pub fn with_defaults(config: &ToolsConfig) -> Result<Self> {
        let mut registry = Self::new();
        registry.register(WeatherTool::from_config(config)?);
        registry.register(TimeTool::from_config(config));
        Ok(registry)
    }

    /// Add a tool. A tool with the same name replaces the earlier one.
    pub fn register(&mut self, tool: impl Tool + 'static) {
        let descriptor = tool.descriptor();
        let entry = Registered {
            descriptor,
            tool: Box::new(tool),
        };

        match self
            .entries
            .iter_mut()
            .find(|e| e.descriptor.name == entry.descriptor.name)
        {
            Some(existing) => {
                warn!("Replacing registered tool '{}'", entry.descriptor.name);
                *existing = entry;
            }
            None => self.entries.push(entry),
        }
    }

    /// Descriptors in registration order.
    pub fn descriptors(&self) -> Vec<&ToolDescriptor> {
        self.entries.iter().map(|e| &e.descriptor).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.descriptor.name == name)
    }

    /// Route a request to its tool. Never fails: every error is a `ToolResult::Error`.
    pub async fn dispatch(&self, request: &ToolRequest) -> ToolResult {
        let Some(entry) = self
            .entries
            .iter()
            .find(|e| e.descriptor.name == request.name)
        else {
            warn!("Unknown tool requested: {}", request.name);
            return ToolError::unknown_tool(&request.name).into();
        };

        info!("Dispatching tool '{}'", request.name);
        match entry.tool.execute(&request.arguments).await {
            Ok(payload) => ToolResult::Ok(payload),
            Err(e) => {
                warn!("Tool '{}' failed: {}", request.name, e);
                ToolResult::Error(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{JsonMap, ToolErrorKind};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingTool {
        name: &'static str,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Tool for CountingTool {
        fn descriptor(&self) -> ToolDescriptor {
            ToolDescriptor {
                name: self.name.into(),
                description: "Counts calls.".into(),
                parameters: Vec::new(),
            }
        }

        async fn execute(&self, _args: &JsonMap) -> Result<JsonMap, ToolError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            let mut out = JsonMap::new();
            out.insert("calls".into(), json!(n));
            Ok(out)
        }
    }

    fn counting(name: &'static str) -> (CountingTool, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            CountingTool {
                name,
                calls: calls.clone(),
            },
            calls,
        )
    }

    #[tokio::test]
    async fn unknown_tool_invokes_nothing() {
        let (tool, calls) = counting("count");
        let mut registry = ToolRegistry::new();
        registry.register(tool);

        let result = registry
            .dispatch(&ToolRequest::new("search_web", JsonMap::new()))
            .await;

        assert_eq!(result.error_kind(), Some(ToolErrorKind::UnknownTool));
        assert_eq!(result.to_value()["tool"], "search_web");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn dispatch_routes_by_name() {
        let (a, a_calls) = counting("a");
        let (b, b_calls) = counting("b");
        let mut registry = ToolRegistry::new();
        registry.register(a);
        registry.register(b);

        let result = registry.dispatch(&ToolRequest::new("b", JsonMap::new())).await;

        assert!(result.is_ok());
        assert_eq!(a_calls.load(Ordering::SeqCst), 0);
        assert_eq!(b_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn duplicate_name_replaces_entry() {
        let (first, _) = counting("dup");
        let (second, _) = counting("dup");
        let mut registry = ToolRegistry::new();
        registry.register(first);
        registry.register(second);

        assert_eq!(registry.descriptors().len(), 1);
        assert!(registry.contains("dup"));
    }

    #[test]
    fn defaults_register_weather_then_time() {
        let registry = ToolRegistry::with_defaults(&ToolsConfig::default()).unwrap();
        let names: Vec<&str> = registry
            .descriptors()
            .iter()
            .map(|d| d.name.as_str())
            .collect();

        assert_eq!(names, vec![weather::NAME, time::NAME]);
    }
}
