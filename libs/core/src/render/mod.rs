//! Render dispatch: one rule per variant, depth-first, order-preserving.
//!
//! The dispatcher walks a decoded card and produces a neutral [`UiNode`]
//! tree — the capability surface a UI toolkit consumes ("a text node with
//! these tokens", "a vertical stack of these children"). How nodes are
//! painted is the toolkit's business; backends that need a serialized form
//! live in [`backends`].
//!
//! Every `match` below is exhaustive without a wildcard arm, so adding a
//! model variant without a render rule fails the build.

use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::capabilities::HostCapabilities;
use crate::diagnostics::{codes, Diagnostic};
use crate::enums::{
    ChoiceInputStyle, ContainerStyle, FontSize, HorizontalAlignment, ImageSize, ImageStyle,
    Orientation, TextColor, TextInputStyle, TextWeight,
};
use crate::hostconfig::HostConfig;
use crate::model::{
    Action, ActionSet, AdaptiveCard, CardElement, Choice, Column, ColumnSet, Container,
    ElementProps, FactSet, Image, TargetElement, TextBlock,
};
use crate::textfmt::TextFormatter;

pub mod backends;

pub use backends::{BackendRegistry, JsonBackend, RenderOutput, UiBackend};

/// Policy and collaborators one render pass runs with.
pub struct RenderContext<'a> {
    pub lang: Option<String>,
    pub host_config: &'a HostConfig,
    pub capabilities: &'a HostCapabilities,
    pub formatter: &'a dyn TextFormatter,
    pub diagnostics: Vec<Diagnostic>,
    showcard_seq: usize,
}

impl<'a> RenderContext<'a> {
    pub fn new(
        host_config: &'a HostConfig,
        capabilities: &'a HostCapabilities,
        formatter: &'a dyn TextFormatter,
    ) -> Self {
        Self {
            lang: None,
            host_config,
            capabilities,
            formatter,
            diagnostics: Vec::new(),
            showcard_seq: 0,
        }
    }

    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }

    fn next_showcard_id(&mut self) -> String {
        let id = format!("showcard-{}", self.showcard_seq);
        self.showcard_seq += 1;
        id
    }
}

/// Presentation metadata every node carries.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NodeMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub visible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spacing_px: Option<u32>,
    pub separator: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UiNode {
    #[serde(flatten)]
    pub meta: NodeMeta,
    #[serde(flatten)]
    pub kind: UiNodeKind,
}

/// Concrete text styling resolved through the host config.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TextStyle {
    pub size_px: u32,
    pub weight: u32,
    pub color: String,
    pub is_subtle: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum UiNodeKind {
    Text {
        content: String,
        style: TextStyle,
        alignment: HorizontalAlignment,
        wrap: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        max_lines: Option<u32>,
    },
    Image {
        url: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        alt: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        size: Option<ImageSize>,
        #[serde(skip_serializing_if = "Option::is_none")]
        style: Option<ImageStyle>,
        #[serde(skip_serializing_if = "Option::is_none")]
        on_select: Option<Box<UiCommand>>,
    },
    Stack {
        orientation: Orientation,
        children: Vec<UiNode>,
        #[serde(skip_serializing_if = "Option::is_none")]
        style: Option<ContainerStyle>,
        #[serde(skip_serializing_if = "Option::is_none")]
        width: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        on_select: Option<Box<UiCommand>>,
    },
    Input {
        /// Key the toolkit reports collected input under.
        binding: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        required: bool,
        control: InputControl,
    },
    Button {
        title: String,
        command: UiCommand,
    },
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "control", rename_all = "snake_case")]
pub enum InputControl {
    Text {
        #[serde(skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        value: Option<String>,
        multiline: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        max_length: Option<u32>,
        style: TextInputStyle,
        #[serde(skip_serializing_if = "Option::is_none")]
        regex: Option<String>,
    },
    ChoiceSet {
        choices: Vec<Choice>,
        multi_select: bool,
        style: ChoiceInputStyle,
        #[serde(skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        value: Option<String>,
    },
    Date {
        placeholder: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        value: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        min: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        max: Option<String>,
    },
    Time {
        placeholder: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        value: Option<String>,
    },
    Toggle {
        title: String,
        value_on: String,
        value_off: String,
        checked: bool,
    },
}

/// What pressing (or tapping) an interactive node means to the host.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum UiCommand {
    OpenUrl {
        url: String,
    },
    Submit {
        data: Value,
    },
    ToggleVisibility {
        targets: Vec<TargetElement>,
    },
    /// The nested card is pre-rendered as a detached subtree; the host keys
    /// its visibility off `id`, it is never inlined into the parent flow.
    ShowCard {
        id: String,
        body: Vec<UiNode>,
    },
}

/// Renders a whole card body in source order.
pub fn render_card(card: &AdaptiveCard, ctx: &mut RenderContext<'_>) -> Vec<UiNode> {
    card.body
        .iter()
        .filter_map(|element| render_element(element, ctx))
        .collect()
}

/// Renders one element, or skips it (with a diagnostic) when the host does
/// not meet its declared requirements.
pub fn render_element(element: &CardElement, ctx: &mut RenderContext<'_>) -> Option<UiNode> {
    let props = element.props();
    if !ctx.capabilities.satisfies(&props.requires) {
        warn!(
            element = element.type_tag(),
            id = props.id.as_deref().unwrap_or(""),
            "skipping element with unmet host requirements"
        );
        ctx.diagnostics.push(Diagnostic::warning(
            codes::REQUIREMENT_UNMET,
            props
                .id
                .clone()
                .unwrap_or_else(|| element.type_tag().to_string()),
            format!(
                "{} requires features the host does not declare",
                element.type_tag()
            ),
        ));
        return None;
    }

    let kind = match element {
        CardElement::TextBlock(text) => text_block(text, ctx),
        CardElement::Image(image) => image_node(image, ctx),
        CardElement::Container(container) => container_node(container, ctx),
        CardElement::ColumnSet(set) => column_set(set, ctx),
        CardElement::FactSet(set) => fact_set(set, ctx),
        CardElement::ActionSet(set) => action_set(set, ctx),
        CardElement::InputText(input) => UiNodeKind::Input {
            binding: input.id.clone(),
            label: input.label.clone(),
            required: input.is_required.unwrap_or(false),
            control: InputControl::Text {
                placeholder: input.placeholder.clone(),
                value: input.value.clone(),
                multiline: input.is_multiline.unwrap_or(false),
                max_length: input.max_length,
                style: input.style.unwrap_or(TextInputStyle::Text),
                regex: input.regex.clone(),
            },
        },
        CardElement::InputChoiceSet(input) => UiNodeKind::Input {
            binding: input.id.clone(),
            label: input.label.clone(),
            required: input.is_required.unwrap_or(false),
            control: InputControl::ChoiceSet {
                choices: input.choices.clone(),
                multi_select: input.is_multi_select.unwrap_or(false),
                style: input.style.unwrap_or(ChoiceInputStyle::Compact),
                placeholder: input.placeholder.clone(),
                value: input.value.clone(),
            },
        },
        CardElement::InputDate(input) => UiNodeKind::Input {
            binding: input.id.clone(),
            label: None,
            required: false,
            control: InputControl::Date {
                placeholder: input.placeholder.clone(),
                value: input.value.clone(),
                min: input.min.clone(),
                max: input.max.clone(),
            },
        },
        CardElement::InputTime(input) => UiNodeKind::Input {
            binding: input.id.clone(),
            label: None,
            required: false,
            control: InputControl::Time {
                placeholder: input.placeholder.clone(),
                value: input.value.clone(),
            },
        },
        CardElement::InputToggle(input) => UiNodeKind::Input {
            binding: input.id.clone(),
            label: None,
            required: false,
            control: InputControl::Toggle {
                title: input.title.clone(),
                value_on: input.value_on.clone(),
                value_off: input.value_off.clone(),
                checked: input.is_checked.unwrap_or(false),
            },
        },
    };

    let mut meta = node_meta(props, ctx);
    if let UiNodeKind::Input { binding, .. } = &kind {
        // Inputs carry their id as the reporting key; mirror it onto the node
        // so visibility toggles can still address them.
        meta.id.get_or_insert_with(|| binding.clone());
    }
    Some(UiNode { meta, kind })
}

/// Renders one action into the command the host executes.
pub fn render_action(action: &Action, ctx: &mut RenderContext<'_>) -> UiCommand {
    match action {
        Action::OpenUrl(open) => UiCommand::OpenUrl {
            url: open.url.clone(),
        },
        Action::Submit(submit) => UiCommand::Submit {
            data: submit.data.clone(),
        },
        Action::ToggleVisibility(toggle) => UiCommand::ToggleVisibility {
            targets: toggle.target_elements.clone(),
        },
        Action::ShowCard(show) => {
            let id = ctx.next_showcard_id();
            let body = render_card(&show.card, ctx);
            UiCommand::ShowCard { id, body }
        }
    }
}

fn action_button(action: &Action, ctx: &mut RenderContext<'_>) -> UiNode {
    let title = action
        .title()
        .map(str::to_string)
        .unwrap_or_else(|| action.type_tag().to_string());
    UiNode {
        meta: plain_meta(),
        kind: UiNodeKind::Button {
            title,
            command: render_action(action, ctx),
        },
    }
}

fn node_meta(props: &ElementProps, ctx: &RenderContext<'_>) -> NodeMeta {
    NodeMeta {
        id: props.id.clone(),
        visible: props.is_visible,
        spacing_px: props
            .spacing
            .map(|spacing| ctx.host_config.spacing.px(spacing)),
        separator: props.separator.unwrap_or(false),
    }
}

fn plain_meta() -> NodeMeta {
    NodeMeta {
        id: None,
        visible: true,
        spacing_px: None,
        separator: false,
    }
}

fn text_block(text: &TextBlock, ctx: &mut RenderContext<'_>) -> UiNodeKind {
    let content = ctx.formatter.format(ctx.lang.as_deref(), &text.text);
    let is_subtle = text.is_subtle.unwrap_or(false);
    UiNodeKind::Text {
        content,
        style: TextStyle {
            size_px: ctx
                .host_config
                .font_sizes
                .size(text.size.unwrap_or(FontSize::Default)),
            weight: ctx
                .host_config
                .font_weights
                .weight(text.weight.unwrap_or(TextWeight::Default)),
            color: ctx
                .host_config
                .colors
                .color(text.color.unwrap_or(TextColor::Default), is_subtle)
                .to_string(),
            is_subtle,
        },
        alignment: text
            .horizontal_alignment
            .unwrap_or(HorizontalAlignment::Left),
        wrap: text.wrap.unwrap_or(false),
        max_lines: text.max_lines,
    }
}

fn image_node(image: &Image, ctx: &mut RenderContext<'_>) -> UiNodeKind {
    UiNodeKind::Image {
        url: image.url.clone(),
        alt: image.alt_text.clone(),
        size: image.size,
        style: image.style,
        on_select: image
            .select_action
            .as_ref()
            .map(|action| Box::new(render_action(action, ctx))),
    }
}

fn container_node(container: &Container, ctx: &mut RenderContext<'_>) -> UiNodeKind {
    UiNodeKind::Stack {
        orientation: Orientation::Vertical,
        children: container
            .items
            .iter()
            .filter_map(|item| render_element(item, ctx))
            .collect(),
        style: container.style,
        width: None,
        on_select: container
            .select_action
            .as_ref()
            .map(|action| Box::new(render_action(action, ctx))),
    }
}

fn column_set(set: &ColumnSet, ctx: &mut RenderContext<'_>) -> UiNodeKind {
    UiNodeKind::Stack {
        orientation: Orientation::Horizontal,
        children: set
            .columns
            .iter()
            .map(|column| column_node(column, ctx))
            .collect(),
        style: set.style,
        width: None,
        on_select: set
            .select_action
            .as_ref()
            .map(|action| Box::new(render_action(action, ctx))),
    }
}

fn column_node(column: &Column, ctx: &mut RenderContext<'_>) -> UiNode {
    UiNode {
        meta: node_meta(&column.props, ctx),
        kind: UiNodeKind::Stack {
            orientation: Orientation::Vertical,
            children: column
                .items
                .iter()
                .filter_map(|item| render_element(item, ctx))
                .collect(),
            style: column.style,
            width: column.width.clone(),
            on_select: column
                .select_action
                .as_ref()
                .map(|action| Box::new(render_action(action, ctx))),
        },
    }
}

fn fact_set(set: &FactSet, ctx: &mut RenderContext<'_>) -> UiNodeKind {
    let config = ctx.host_config;
    let title_style = TextStyle {
        size_px: config.font_sizes.size(FontSize::Default),
        weight: config.font_weights.weight(config.fact_set.title_weight),
        color: config.colors.color(TextColor::Default, false).to_string(),
        is_subtle: false,
    };
    let value_style = TextStyle {
        size_px: config.font_sizes.size(FontSize::Default),
        weight: config.font_weights.weight(TextWeight::Default),
        color: config.colors.color(TextColor::Default, false).to_string(),
        is_subtle: false,
    };
    let value_wrap = config.fact_set.value_wrap;

    let rows = set
        .facts
        .iter()
        .map(|fact| UiNode {
            meta: plain_meta(),
            kind: UiNodeKind::Stack {
                orientation: Orientation::Horizontal,
                children: vec![
                    UiNode {
                        meta: plain_meta(),
                        kind: UiNodeKind::Text {
                            content: fact.title.clone(),
                            style: title_style.clone(),
                            alignment: HorizontalAlignment::Left,
                            wrap: false,
                            max_lines: None,
                        },
                    },
                    UiNode {
                        meta: plain_meta(),
                        kind: UiNodeKind::Text {
                            content: fact.value.clone(),
                            style: value_style.clone(),
                            alignment: HorizontalAlignment::Left,
                            wrap: value_wrap,
                            max_lines: None,
                        },
                    },
                ],
                style: None,
                width: None,
                on_select: None,
            },
        })
        .collect();

    UiNodeKind::Stack {
        orientation: Orientation::Vertical,
        children: rows,
        style: None,
        width: None,
        on_select: None,
    }
}

fn action_set(set: &ActionSet, ctx: &mut RenderContext<'_>) -> UiNodeKind {
    UiNodeKind::Stack {
        orientation: Orientation::Vertical,
        children: set
            .actions
            .iter()
            .map(|action| action_button(action, ctx))
            .collect(),
        style: None,
        width: None,
        on_select: None,
    }
}
