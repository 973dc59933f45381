//! Post-decode lint pass.
//!
//! Cheap structural checks over an already-typed tree. Findings are always
//! warnings: a duplicate id or an over-new version is a card-quality concern,
//! never grounds for rejecting the card.

use std::collections::BTreeMap;

use crate::capabilities::Version;
use crate::diagnostics::{codes, Diagnostic};
use crate::model::{Action, AdaptiveCard, CardElement};

/// Newest schema version this core tracks.
pub const SUPPORTED_VERSION: Version = Version::new(1, 6);

pub fn lint(card: &AdaptiveCard) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    let mut ids: BTreeMap<String, Vec<String>> = BTreeMap::new();
    lint_card(card, "", &mut ids, &mut diagnostics);

    for (id, paths) in ids {
        if paths.len() > 1 {
            diagnostics.push(Diagnostic::warning(
                codes::DUPLICATE_ID,
                paths[1].clone(),
                format!("id '{id}' appears {} times", paths.len()),
            ));
        }
    }
    diagnostics
}

fn lint_card(
    card: &AdaptiveCard,
    path: &str,
    ids: &mut BTreeMap<String, Vec<String>>,
    diagnostics: &mut Vec<Diagnostic>,
) {
    match Version::parse(&card.version) {
        Some(version) if version > SUPPORTED_VERSION => diagnostics.push(Diagnostic::warning(
            codes::UNSUPPORTED_CARD_VERSION,
            format!("{path}/version"),
            format!("card declares version {version}, newest supported is {SUPPORTED_VERSION}"),
        )),
        Some(_) => {}
        None => diagnostics.push(Diagnostic::warning(
            codes::UNSUPPORTED_CARD_VERSION,
            format!("{path}/version"),
            format!("card version '{}' is not a major.minor pair", card.version),
        )),
    }

    for (index, element) in card.body.iter().enumerate() {
        lint_element(element, &format!("{path}/body/{index}"), ids, diagnostics);
    }
}

fn lint_element(
    element: &CardElement,
    path: &str,
    ids: &mut BTreeMap<String, Vec<String>>,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let declared_id = match element {
        CardElement::InputText(input) => Some(input.id.as_str()),
        CardElement::InputChoiceSet(input) => Some(input.id.as_str()),
        CardElement::InputDate(input) => Some(input.id.as_str()),
        CardElement::InputTime(input) => Some(input.id.as_str()),
        CardElement::InputToggle(input) => Some(input.id.as_str()),
        _ => element.props().id.as_deref(),
    };
    if let Some(id) = declared_id {
        ids.entry(id.to_string()).or_default().push(path.to_string());
    }

    match element {
        CardElement::Container(container) => {
            for (index, item) in container.items.iter().enumerate() {
                lint_element(item, &format!("{path}/items/{index}"), ids, diagnostics);
            }
            lint_opt_action(container.select_action.as_ref(), path, ids, diagnostics);
        }
        CardElement::ColumnSet(set) => {
            for (col, column) in set.columns.iter().enumerate() {
                if let Some(id) = column.props.id.as_deref() {
                    ids.entry(id.to_string())
                        .or_default()
                        .push(format!("{path}/columns/{col}"));
                }
                for (index, item) in column.items.iter().enumerate() {
                    lint_element(
                        item,
                        &format!("{path}/columns/{col}/items/{index}"),
                        ids,
                        diagnostics,
                    );
                }
            }
            lint_opt_action(set.select_action.as_ref(), path, ids, diagnostics);
        }
        CardElement::ActionSet(set) => {
            for (index, action) in set.actions.iter().enumerate() {
                lint_action(action, &format!("{path}/actions/{index}"), ids, diagnostics);
            }
        }
        CardElement::Image(image) => {
            lint_opt_action(image.select_action.as_ref(), path, ids, diagnostics);
        }
        CardElement::InputText(input) => {
            if input.is_required.unwrap_or(false) && input.label.is_none() {
                diagnostics.push(required_without_label(path, &input.id));
            }
        }
        CardElement::InputChoiceSet(input) => {
            if input.is_required.unwrap_or(false) && input.label.is_none() {
                diagnostics.push(required_without_label(path, &input.id));
            }
        }
        CardElement::TextBlock(_)
        | CardElement::FactSet(_)
        | CardElement::InputDate(_)
        | CardElement::InputTime(_)
        | CardElement::InputToggle(_) => {}
    }
}

fn lint_opt_action(
    action: Option<&Action>,
    path: &str,
    ids: &mut BTreeMap<String, Vec<String>>,
    diagnostics: &mut Vec<Diagnostic>,
) {
    if let Some(action) = action {
        lint_action(action, &format!("{path}/selectAction"), ids, diagnostics);
    }
}

fn lint_action(
    action: &Action,
    path: &str,
    ids: &mut BTreeMap<String, Vec<String>>,
    diagnostics: &mut Vec<Diagnostic>,
) {
    if let Action::ShowCard(show) = action {
        lint_card(&show.card, &format!("{path}/card"), ids, diagnostics);
    }
}

fn required_without_label(path: &str, id: &str) -> Diagnostic {
    Diagnostic::warning(
        codes::REQUIRED_INPUT_WITHOUT_LABEL,
        path.to_string(),
        format!("required input '{id}' has no label"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode_card;
    use serde_json::json;

    #[test]
    fn flags_duplicate_ids_across_nesting() {
        let card = decode_card(&json!({
            "type": "AdaptiveCard",
            "version": "1.5",
            "body": [
                { "type": "TextBlock", "text": "a", "id": "dup" },
                { "type": "Container", "items": [
                    { "type": "Input.Text", "id": "dup" }
                ]}
            ]
        }))
        .expect("decodes")
        .value;

        let findings = lint(&card);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].code, codes::DUPLICATE_ID);
        assert_eq!(findings[0].path, "/body/1/items/0");
    }

    #[test]
    fn flags_future_versions_but_not_current_ones() {
        let current = decode_card(&json!({
            "type": "AdaptiveCard", "version": "1.6", "body": []
        }))
        .expect("decodes")
        .value;
        assert!(lint(&current).is_empty());

        let future = decode_card(&json!({
            "type": "AdaptiveCard", "version": "2.0", "body": []
        }))
        .expect("decodes")
        .value;
        let findings = lint(&future);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].code, codes::UNSUPPORTED_CARD_VERSION);
    }

    #[test]
    fn flags_required_inputs_without_labels() {
        let card = decode_card(&json!({
            "type": "AdaptiveCard",
            "version": "1.5",
            "body": [
                { "type": "Input.Text", "id": "name", "isRequired": true },
                { "type": "Input.Text", "id": "mail", "isRequired": true, "label": "Mail" }
            ]
        }))
        .expect("decodes")
        .value;

        let findings = lint(&card);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].code, codes::REQUIRED_INPUT_WITHOUT_LABEL);
        assert!(findings[0].message.contains("'name'"));
    }
}
