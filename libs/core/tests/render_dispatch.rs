use cardwalk_core::capabilities::{CapabilityVersion, HostCapabilities, Version};
use cardwalk_core::diagnostics::codes;
use cardwalk_core::engine::CardEngine;
use cardwalk_core::enums::Orientation;
use cardwalk_core::render::{UiCommand, UiNode, UiNodeKind};
use serde_json::{json, Value};

fn load_fixture(name: &str) -> Value {
    let path = format!("tests/fixtures/{name}");
    let data = std::fs::read_to_string(&path).expect("fixture missing");
    serde_json::from_str(&data).expect("fixture is not valid json")
}

fn stack_children(node: &UiNode) -> (&Orientation, &Vec<UiNode>) {
    let UiNodeKind::Stack {
        orientation,
        children,
        ..
    } = &node.kind
    else {
        panic!("expected a stack node, got {:?}", node.kind);
    };
    (orientation, children)
}

#[test]
fn kitchen_sink_renders_every_body_element_in_order() {
    let engine = CardEngine::new();
    let processed = engine
        .process(&load_fixture("kitchen_sink.json"), "json")
        .expect("pipeline succeeds");

    assert_eq!(processed.card.body.len(), 12);
    assert_eq!(processed.nodes.len(), 12);
    assert!(processed.diagnostics.is_empty());

    // Date token substituted before the text reaches the toolkit.
    let UiNodeKind::Text { content, .. } = &processed.nodes[1].kind else {
        panic!("expected text node");
    };
    assert_eq!(content, "Placed Mar 1, 2021");
}

#[test]
fn column_set_renders_side_by_side_groups_in_source_order() {
    let engine = CardEngine::new();
    let processed = engine
        .process(&load_fixture("kitchen_sink.json"), "json")
        .expect("pipeline succeeds");

    let (orientation, columns) = stack_children(&processed.nodes[3]);
    assert_eq!(*orientation, Orientation::Horizontal);
    assert_eq!(columns.len(), 2);

    let (left_orientation, left_items) = stack_children(&columns[0]);
    assert_eq!(*left_orientation, Orientation::Vertical);
    let UiNodeKind::Text { content, .. } = &left_items[0].kind else {
        panic!("expected text in first column");
    };
    assert_eq!(content, "Left");

    assert_eq!(columns[1].meta.id.as_deref(), Some("rightCol"));
    let UiNodeKind::Stack { width, .. } = &columns[1].kind else {
        panic!("expected stack");
    };
    assert_eq!(width.as_deref(), Some("2"));
}

#[test]
fn hidden_containers_stay_addressable_but_invisible() {
    let engine = CardEngine::new();
    let processed = engine
        .process(&load_fixture("kitchen_sink.json"), "json")
        .expect("pipeline succeeds");

    let details = &processed.nodes[5];
    assert_eq!(details.meta.id.as_deref(), Some("details"));
    assert!(!details.meta.visible);

    // The serialized payload keeps the flag for the toolkit.
    let painted = &processed.output.payload["nodes"][5];
    assert_eq!(painted["visible"], false);
}

#[test]
fn action_set_renders_buttons_with_detached_show_card() {
    let engine = CardEngine::new();
    let processed = engine
        .process(&load_fixture("kitchen_sink.json"), "json")
        .expect("pipeline succeeds");

    let (_, buttons) = stack_children(&processed.nodes[11]);
    assert_eq!(buttons.len(), 4);

    let UiNodeKind::Button { title, command } = &buttons[0].kind else {
        panic!("expected button");
    };
    assert_eq!(title, "Track");
    assert!(matches!(command, UiCommand::OpenUrl { url } if url.ends_with("/4521")));

    let UiNodeKind::Button { title, command } = &buttons[2].kind else {
        panic!("expected button");
    };
    assert_eq!(title, "Action.ToggleVisibility");
    let UiCommand::ToggleVisibility { targets } = command else {
        panic!("expected toggle command");
    };
    assert_eq!(targets[0].element_id, "details");

    let UiNodeKind::Button { command, .. } = &buttons[3].kind else {
        panic!("expected button");
    };
    let UiCommand::ShowCard { id, body } = command else {
        panic!("expected show-card command");
    };
    assert_eq!(id, "showcard-0");
    assert_eq!(body.len(), 1);
    let UiNodeKind::Text { content, .. } = &body[0].kind else {
        panic!("expected nested text");
    };
    assert_eq!(content, "Total: $42.00");
}

#[test]
fn inputs_bind_their_reporting_ids() {
    let engine = CardEngine::new();
    let processed = engine
        .process(&load_fixture("kitchen_sink.json"), "json")
        .expect("pipeline succeeds");

    let UiNodeKind::Input { binding, label, .. } = &processed.nodes[6].kind else {
        panic!("expected input node");
    };
    assert_eq!(binding, "note");
    assert_eq!(label.as_deref(), Some("Note"));
    assert_eq!(processed.nodes[6].meta.id.as_deref(), Some("note"));
}

#[test]
fn capability_gate_skips_nodes_the_host_cannot_render() {
    let card = json!({
        "type": "AdaptiveCard",
        "version": "1.5",
        "body": [
            { "type": "TextBlock", "text": "always" },
            { "type": "TextBlock", "text": "gated", "requires": { "acTest": "2.0" } }
        ]
    });

    let stingy = CardEngine::new().with_capabilities(
        HostCapabilities::new().with("acTest", CapabilityVersion::At(Version::new(1, 5))),
    );
    let processed = stingy.process(&card, "json").expect("pipeline succeeds");
    assert_eq!(processed.nodes.len(), 1);
    assert_eq!(processed.diagnostics.len(), 1);
    assert_eq!(processed.diagnostics[0].code, codes::REQUIREMENT_UNMET);

    let generous = CardEngine::new().with_capabilities(
        HostCapabilities::new().with("acTest", CapabilityVersion::Any),
    );
    let processed = generous.process(&card, "json").expect("pipeline succeeds");
    assert_eq!(processed.nodes.len(), 2);
    assert!(processed.diagnostics.is_empty());
}

#[test]
fn lang_flows_through_to_the_formatter() {
    struct EchoLang;
    impl cardwalk_core::textfmt::TextFormatter for EchoLang {
        fn format(&self, lang: Option<&str>, text: &str) -> String {
            format!("[{}] {text}", lang.unwrap_or("none"))
        }
    }

    let engine = CardEngine::new().with_lang("fr-FR").with_formatter(EchoLang);
    let card = json!({
        "type": "AdaptiveCard",
        "version": "1.5",
        "body": [ { "type": "TextBlock", "text": "bonjour" } ]
    });
    let processed = engine.process(&card, "json").expect("pipeline succeeds");
    let UiNodeKind::Text { content, .. } = &processed.nodes[0].kind else {
        panic!("expected text node");
    };
    assert_eq!(content, "[fr-FR] bonjour");
}
