//! Backend seam between the dispatcher and concrete UI toolkits.
//!
//! A backend receives the neutral node tree and produces whatever payload its
//! platform consumes. The registry keys backends by platform name so hosts
//! can route one card to several surfaces.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::{json, Value};

use super::UiNode;

pub trait UiBackend: Send + Sync {
    fn platform(&self) -> &'static str;
    fn paint(&self, nodes: &[UiNode]) -> RenderOutput;
}

#[derive(Debug, Clone)]
pub struct RenderOutput {
    pub payload: Value,
    pub warnings: Vec<String>,
}

impl RenderOutput {
    pub fn new(payload: Value) -> Self {
        Self {
            payload,
            warnings: Vec::new(),
        }
    }
}

#[derive(Default)]
pub struct BackendRegistry {
    backends: BTreeMap<String, Arc<dyn UiBackend>>,
}

impl BackendRegistry {
    pub fn register<B>(&mut self, backend: B)
    where
        B: UiBackend + 'static,
    {
        self.backends
            .insert(backend.platform().to_string(), Arc::new(backend));
    }

    pub fn get(&self, platform: &str) -> Option<Arc<dyn UiBackend>> {
        self.backends.get(platform).cloned()
    }

    pub fn paint(&self, platform: &str, nodes: &[UiNode]) -> Option<RenderOutput> {
        self.get(platform).map(|backend| backend.paint(nodes))
    }

    pub fn platforms(&self) -> Vec<String> {
        self.backends.keys().cloned().collect()
    }
}

/// Reference backend that exposes the node tree as JSON.
pub struct JsonBackend;

impl UiBackend for JsonBackend {
    fn platform(&self) -> &'static str {
        "json"
    }

    fn paint(&self, nodes: &[UiNode]) -> RenderOutput {
        RenderOutput::new(json!({
            "platform": self.platform(),
            "nodes": nodes,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{NodeMeta, TextStyle, UiNodeKind};
    use crate::enums::HorizontalAlignment;

    #[test]
    fn registry_returns_registered_backend() {
        let mut registry = BackendRegistry::default();
        registry.register(JsonBackend);
        assert_eq!(registry.platforms(), vec!["json".to_string()]);

        let nodes = vec![UiNode {
            meta: NodeMeta {
                id: None,
                visible: true,
                spacing_px: None,
                separator: false,
            },
            kind: UiNodeKind::Text {
                content: "hi".into(),
                style: TextStyle {
                    size_px: 14,
                    weight: 400,
                    color: "#000000".into(),
                    is_subtle: false,
                },
                alignment: HorizontalAlignment::Left,
                wrap: true,
                max_lines: None,
            },
        }];
        let painted = registry.paint("json", &nodes).expect("backend registered");
        assert_eq!(painted.payload["platform"], "json");
        assert_eq!(painted.payload["nodes"][0]["content"], "hi");
        assert_eq!(painted.payload["nodes"][0]["node"], "text");
    }
}
