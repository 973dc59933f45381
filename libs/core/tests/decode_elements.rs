use cardwalk_core::decode::{decode_action, decode_card, decode_element, ACTION_TAGS, ELEMENT_TAGS};
use cardwalk_core::diagnostics::codes;
use cardwalk_core::enums::{FontSize, TextColor, TextWeight};
use cardwalk_core::model::CardElement;
use serde_json::{json, Value};

fn minimal_element(tag: &str) -> Value {
    match tag {
        "TextBlock" => json!({"type": "TextBlock", "text": "hi"}),
        "Image" => json!({"type": "Image", "url": "https://example.com/x.png"}),
        "Container" => json!({"type": "Container", "items": []}),
        "ColumnSet" => json!({"type": "ColumnSet", "columns": []}),
        "FactSet" => json!({"type": "FactSet", "facts": []}),
        "ActionSet" => json!({"type": "ActionSet", "actions": []}),
        "Input.Text" => json!({"type": "Input.Text", "id": "t"}),
        "Input.ChoiceSet" => json!({"type": "Input.ChoiceSet", "id": "c"}),
        "Input.Date" => json!({"type": "Input.Date", "id": "d", "placeholder": "Pick a date"}),
        "Input.Time" => json!({"type": "Input.Time", "id": "h", "placeholder": "Pick a time"}),
        "Input.Toggle" => json!({
            "type": "Input.Toggle", "id": "g", "title": "Enabled?",
            "valueOn": "on", "valueOff": "off"
        }),
        other => panic!("no minimal fixture for element tag {other}"),
    }
}

fn minimal_action(tag: &str) -> Value {
    match tag {
        "Action.OpenUrl" => json!({"type": "Action.OpenUrl", "title": "Go", "url": "https://x"}),
        "Action.Submit" => json!({"type": "Action.Submit", "title": "Send"}),
        "Action.ShowCard" => json!({
            "type": "Action.ShowCard", "title": "More",
            "card": {"type": "AdaptiveCard", "version": "1.5", "body": []}
        }),
        "Action.ToggleVisibility" => json!({
            "type": "Action.ToggleVisibility", "targetElements": ["spoiler"]
        }),
        other => panic!("no minimal fixture for action tag {other}"),
    }
}

#[test]
fn every_element_tag_decodes_to_its_variant() {
    for tag in ELEMENT_TAGS {
        let decoded = decode_element(&minimal_element(tag))
            .unwrap_or_else(|err| panic!("{tag} failed to decode: {err}"));
        assert_eq!(decoded.value.type_tag(), *tag);
        assert!(
            decoded.diagnostics.is_empty(),
            "{tag} produced diagnostics: {:?}",
            decoded.diagnostics
        );
    }
}

#[test]
fn every_action_tag_decodes_to_its_variant() {
    for tag in ACTION_TAGS {
        let decoded = decode_action(&minimal_action(tag))
            .unwrap_or_else(|err| panic!("{tag} failed to decode: {err}"));
        assert_eq!(decoded.value.type_tag(), *tag);
    }
}

#[test]
fn discriminator_match_is_case_sensitive() {
    let err = decode_element(&json!({"type": "textblock", "text": "hi"})).unwrap_err();
    assert_eq!(err.code(), codes::UNKNOWN_VARIANT);
}

#[test]
fn text_block_reads_every_field() {
    let decoded = decode_element(&json!({
        "type": "TextBlock",
        "text": "Styled",
        "color": "attention",
        "horizontalAlignment": "Center",
        "isSubtle": true,
        "maxLines": 2,
        "size": "extraLarge",
        "weight": "Bolder",
        "wrap": true,
        "id": "headline",
        "spacing": "Large",
        "separator": true
    }))
    .expect("decodes");

    let CardElement::TextBlock(text) = decoded.value else {
        panic!("wrong variant");
    };
    assert_eq!(text.text, "Styled");
    assert_eq!(text.color, Some(TextColor::Attention));
    assert_eq!(text.size, Some(FontSize::ExtraLarge));
    assert_eq!(text.weight, Some(TextWeight::Bolder));
    assert_eq!(text.max_lines, Some(2));
    assert_eq!(text.props.id.as_deref(), Some("headline"));
    assert_eq!(text.props.separator, Some(true));
}

#[test]
fn heading_style_backfills_size_and_weight_unless_explicit() {
    let decoded = decode_element(&json!({
        "type": "TextBlock", "text": "Title", "style": "heading"
    }))
    .expect("decodes");
    let CardElement::TextBlock(text) = decoded.value else {
        panic!("wrong variant");
    };
    assert_eq!(text.size, Some(FontSize::Large));
    assert_eq!(text.weight, Some(TextWeight::Bolder));

    let decoded = decode_element(&json!({
        "type": "TextBlock", "text": "Title", "style": "heading", "size": "Small"
    }))
    .expect("decodes");
    let CardElement::TextBlock(text) = decoded.value else {
        panic!("wrong variant");
    };
    assert_eq!(text.size, Some(FontSize::Small));
    assert_eq!(text.weight, Some(TextWeight::Bolder));
}

#[test]
fn image_height_defaults_to_auto() {
    let decoded = decode_element(&json!({
        "type": "Image", "url": "data:image/png;base64,iVBORw0KGgo="
    }))
    .expect("decodes");
    let CardElement::Image(image) = decoded.value else {
        panic!("wrong variant");
    };
    assert_eq!(image.height, "auto");
    assert!(image.url.starts_with("data:"));
}

#[test]
fn unusable_optional_fields_warn_and_fall_back() {
    let decoded = decode_element(&json!({
        "type": "TextBlock",
        "text": "hi",
        "maxLines": "three",
        "color": "chartreuse"
    }))
    .expect("decodes despite junk fields");
    let CardElement::TextBlock(text) = decoded.value else {
        panic!("wrong variant");
    };
    assert_eq!(text.max_lines, None);
    assert_eq!(text.color, None);
    assert_eq!(decoded.diagnostics.len(), 2);
    assert!(decoded
        .diagnostics
        .iter()
        .all(|d| d.code == codes::INVALID_FIELD_VALUE));
}

#[test]
fn numeric_enum_ordinals_are_accepted() {
    let decoded = decode_element(&json!({
        "type": "TextBlock", "text": "hi", "weight": 2
    }))
    .expect("decodes");
    let CardElement::TextBlock(text) = decoded.value else {
        panic!("wrong variant");
    };
    assert_eq!(text.weight, Some(TextWeight::Bolder));
}

#[test]
fn body_order_is_preserved_exactly() {
    let decoded = decode_card(&json!({
        "type": "AdaptiveCard",
        "version": "1.5",
        "body": [
            { "type": "TextBlock", "text": "first" },
            { "type": "Image", "url": "https://example.com/second.png" },
            { "type": "TextBlock", "text": "third" }
        ]
    }))
    .expect("decodes");

    let tags: Vec<_> = decoded.value.body.iter().map(CardElement::type_tag).collect();
    assert_eq!(tags, vec!["TextBlock", "Image", "TextBlock"]);
}

#[test]
fn requires_map_is_preserved_in_order() {
    let decoded = decode_element(&json!({
        "type": "TextBlock",
        "text": "gated",
        "requires": { "zeta": "1.0", "alpha": "2.3" }
    }))
    .expect("decodes");
    let keys: Vec<_> = decoded.value.props().requires.keys().cloned().collect();
    assert_eq!(keys, vec!["alpha".to_string(), "zeta".to_string()]);
    assert_eq!(decoded.value.props().requires["alpha"], "2.3");
}
