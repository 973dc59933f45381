//! Entry point wiring the decode → lint → render → paint pipeline together.

use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use serde_json::Value;
use tracing::debug;

use crate::capabilities::HostCapabilities;
use crate::decode::{DecodeOptions, Decoded, Decoder};
use crate::diagnostics::{codes, DecodeError, Diagnostic};
use crate::hostconfig::HostConfig;
use crate::model::AdaptiveCard;
use crate::render::{
    render_card, BackendRegistry, JsonBackend, RenderContext, RenderOutput, UiBackend, UiNode,
};
use crate::telemetry::{CardTelemetry, NullTelemetry, TelemetryHook};
use crate::textfmt::{DateTimeFormatter, TextFormatter};
use crate::validate;

pub struct CardEngine {
    options: DecodeOptions,
    host_config: HostConfig,
    capabilities: HostCapabilities,
    formatter: Arc<dyn TextFormatter>,
    backends: BackendRegistry,
    telemetry: Arc<dyn TelemetryHook>,
    lang: Option<String>,
}

impl Default for CardEngine {
    fn default() -> Self {
        let mut backends = BackendRegistry::default();
        backends.register(JsonBackend);
        Self {
            options: DecodeOptions::default(),
            host_config: HostConfig::default(),
            capabilities: HostCapabilities::default(),
            formatter: Arc::new(DateTimeFormatter),
            backends,
            telemetry: Arc::new(NullTelemetry),
            lang: None,
        }
    }
}

impl CardEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(mut self, options: DecodeOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_host_config(mut self, host_config: HostConfig) -> Self {
        self.host_config = host_config;
        self
    }

    pub fn with_capabilities(mut self, capabilities: HostCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn with_formatter<F: TextFormatter + 'static>(mut self, formatter: F) -> Self {
        self.formatter = Arc::new(formatter);
        self
    }

    pub fn with_telemetry<T: TelemetryHook + 'static>(mut self, telemetry: T) -> Self {
        self.telemetry = Arc::new(telemetry);
        self
    }

    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }

    pub fn register_backend<B: UiBackend + 'static>(&mut self, backend: B) {
        self.backends.register(backend);
    }

    pub fn backends(&self) -> &BackendRegistry {
        &self.backends
    }

    /// Decodes a raw JSON value into a typed card tree.
    pub fn decode(&self, value: &Value) -> Result<Decoded<AdaptiveCard>, DecodeError> {
        let decoded = Decoder::new(self.options).decode_card(value)?;
        CardTelemetry::new(self.telemetry.as_ref())
            .decoded(decoded.value.body.len(), decoded.diagnostics.len());
        Ok(decoded)
    }

    /// Runs the lint pass over a decoded tree.
    pub fn lint(&self, card: &AdaptiveCard) -> Vec<Diagnostic> {
        validate::lint(card)
    }

    /// Dispatches a decoded tree into the neutral UI node form.
    pub fn render(&self, card: &AdaptiveCard) -> RenderedCard {
        let mut ctx = RenderContext::new(&self.host_config, &self.capabilities, self.formatter.as_ref());
        if let Some(lang) = &self.lang {
            ctx = ctx.with_lang(lang.clone());
        }
        let nodes = render_card(card, &mut ctx);
        let skipped = ctx
            .diagnostics
            .iter()
            .filter(|d| d.code == codes::REQUIREMENT_UNMET)
            .count();
        CardTelemetry::new(self.telemetry.as_ref()).rendered(nodes.len(), skipped);
        debug!(nodes = nodes.len(), skipped, "rendered card body");
        RenderedCard {
            nodes,
            diagnostics: ctx.diagnostics,
        }
    }

    /// Hands rendered nodes to a registered backend.
    pub fn paint(&self, platform: &str, nodes: &[UiNode]) -> Option<RenderOutput> {
        self.backends.paint(platform, nodes)
    }

    /// Full pipeline for hosts that want one call from JSON to payload.
    pub fn process(&self, value: &Value, platform: &str) -> Result<ProcessedCard> {
        let decoded = self
            .decode(value)
            .context("decoding adaptive card payload")?;
        let mut diagnostics = decoded.diagnostics;
        diagnostics.extend(self.lint(&decoded.value));

        let rendered = self.render(&decoded.value);
        diagnostics.extend(rendered.diagnostics);

        let output = self
            .paint(platform, &rendered.nodes)
            .ok_or_else(|| anyhow!("no backend registered for platform '{platform}'"))?;

        Ok(ProcessedCard {
            card: decoded.value,
            nodes: rendered.nodes,
            output,
            diagnostics,
        })
    }
}

pub struct RenderedCard {
    pub nodes: Vec<UiNode>,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug)]
pub struct ProcessedCard {
    pub card: AdaptiveCard,
    pub nodes: Vec<UiNode>,
    pub output: RenderOutput,
    pub diagnostics: Vec<Diagnostic>,
}
