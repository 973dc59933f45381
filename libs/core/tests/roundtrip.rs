//! Decode → serialize → decode stability for cards using recognized fields.

use cardwalk_core::decode::decode_card;
use cardwalk_core::model::AdaptiveCard;
use serde_json::{json, Value};

fn load_fixture(name: &str) -> Value {
    let path = format!("tests/fixtures/{name}");
    let data = std::fs::read_to_string(&path).expect("fixture missing");
    serde_json::from_str(&data).expect("fixture is not valid json")
}

fn roundtrip(card: &Value) -> (AdaptiveCard, AdaptiveCard) {
    let first = decode_card(card).expect("first decode succeeds");
    assert!(
        first.diagnostics.is_empty(),
        "unexpected diagnostics: {:?}",
        first.diagnostics
    );
    let encoded = serde_json::to_value(&first.value).expect("model serializes");
    let second = decode_card(&encoded).expect("re-decode succeeds");
    assert!(
        second.diagnostics.is_empty(),
        "re-decode produced diagnostics: {:?}",
        second.diagnostics
    );
    (first.value, second.value)
}

#[test]
fn kitchen_sink_roundtrips_field_for_field() {
    let (first, second) = roundtrip(&load_fixture("kitchen_sink.json"));
    assert_eq!(first, second);
}

#[test]
fn body_order_survives_the_roundtrip() {
    let (first, second) = roundtrip(&json!({
        "type": "AdaptiveCard",
        "version": "1.4",
        "body": [
            { "type": "TextBlock", "text": "one" },
            { "type": "TextBlock", "text": "two" },
            { "type": "TextBlock", "text": "three" }
        ]
    }));
    assert_eq!(first, second);
    let texts: Vec<_> = second
        .body
        .iter()
        .map(|element| match element {
            cardwalk_core::model::CardElement::TextBlock(text) => text.text.clone(),
            other => panic!("unexpected element {other:?}"),
        })
        .collect();
    assert_eq!(texts, vec!["one", "two", "three"]);
}

#[test]
fn toggle_shorthand_normalizes_to_the_object_form() {
    let (first, second) = roundtrip(&json!({
        "type": "AdaptiveCard",
        "version": "1.5",
        "body": [ { "type": "ActionSet", "actions": [
            { "type": "Action.ToggleVisibility", "targetElements": ["a", "b"] }
        ]}]
    }));
    assert_eq!(first, second);
}

#[test]
fn lowercase_enum_spellings_converge_to_canonical_tokens() {
    // "attention" and "Attention" are the same color; after one roundtrip the
    // canonical token is emitted, and the model stays identical.
    let (first, second) = roundtrip(&json!({
        "type": "AdaptiveCard",
        "version": "1.5",
        "body": [
            { "type": "TextBlock", "text": "warn", "color": "attention", "size": "MEDIUM" }
        ]
    }));
    assert_eq!(first, second);

    let encoded = serde_json::to_value(&second).expect("serializes");
    assert_eq!(encoded["body"][0]["color"], "Attention");
    assert_eq!(encoded["body"][0]["size"], "Medium");
}

#[test]
fn nested_show_cards_roundtrip_as_owned_subtrees() {
    let (first, second) = roundtrip(&json!({
        "type": "AdaptiveCard",
        "version": "1.5",
        "body": [ { "type": "ActionSet", "actions": [
            { "type": "Action.ShowCard", "title": "outer", "card": {
                "type": "AdaptiveCard", "version": "1.5",
                "body": [ { "type": "ActionSet", "actions": [
                    { "type": "Action.ShowCard", "title": "inner", "card": {
                        "type": "AdaptiveCard", "version": "1.5",
                        "body": [ { "type": "TextBlock", "text": "deep" } ]
                    }}
                ]}]
            }}
        ]}]
    }));
    assert_eq!(first, second);
}
