//! Adaptive Card decode and render-dispatch core.
//!
//! This crate turns a raw Adaptive Card JSON document into a strongly-typed,
//! owned tree and dispatches that tree into a neutral UI node form a host
//! toolkit paints. The pipeline is synchronous and pure: decode collects
//! diagnostics instead of logging, rendering skips capability-gated nodes
//! instead of failing, and nothing here touches the network or filesystem.

pub mod capabilities;
pub mod coerce;
pub mod decode;
pub mod diagnostics;
pub mod engine;
pub mod enums;
pub mod hostconfig;
pub mod model;
pub mod render;
pub mod telemetry;
pub mod textfmt;
pub mod validate;

pub use capabilities::{CapabilityVersion, HostCapabilities, Version};
pub use coerce::{coerce_bool, coerce_enum, coerce_number, coerce_str};
pub use decode::{
    decode_action, decode_card, decode_element, DecodeOptions, Decoded, Decoder, UnknownPolicy,
    ACTION_TAGS, ELEMENT_TAGS,
};
pub use diagnostics::{codes, DecodeError, Diagnostic, Severity};
pub use engine::{CardEngine, ProcessedCard, RenderedCard};
pub use hostconfig::HostConfig;
pub use model::{Action, AdaptiveCard, CardElement, ElementProps};
pub use render::{
    render_action, render_card, render_element, BackendRegistry, JsonBackend, RenderContext,
    RenderOutput, UiBackend, UiCommand, UiNode, UiNodeKind,
};
pub use telemetry::{CardTelemetry, NullTelemetry, TelemetryEvent, TelemetryHook};
pub use textfmt::{DateTimeFormatter, NullFormatter, TextFormatter};
pub use validate::{lint, SUPPORTED_VERSION};
