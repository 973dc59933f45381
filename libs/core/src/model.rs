//! The typed card document tree.
//!
//! One decode call produces one owned, immutable tree: the root exclusively
//! owns its body, and a `ShowCard` action owns its nested card as a fully
//! independent subtree. Types serialize back to wire-shaped JSON; the decode
//! direction lives in [`crate::decode`] so that every field goes through the
//! coercion layer.

use std::collections::BTreeMap;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::enums::{
    ChoiceInputStyle, ContainerStyle, FontSize, FontType, HorizontalAlignment, ImageSize,
    ImageStyle, Spacing, TextBlockStyle, TextColor, TextInputStyle, TextWeight, VerticalAlignment,
};

fn is_true(flag: &bool) -> bool {
    *flag
}

fn is_auto(text: &str) -> bool {
    text == "auto"
}

/// Root document: a version tag and an ordered body.
#[derive(Debug, Clone, PartialEq)]
pub struct AdaptiveCard {
    pub version: String,
    pub body: Vec<CardElement>,
}

impl Serialize for AdaptiveCard {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut root = serializer.serialize_struct("AdaptiveCard", 3)?;
        root.serialize_field("type", "AdaptiveCard")?;
        root.serialize_field("version", &self.version)?;
        root.serialize_field("body", &self.body)?;
        root.end()
    }
}

/// Cross-cutting fields shared by every body element.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ElementProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "is_true")]
    pub is_visible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub separator: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spacing: Option<Spacing>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub requires: BTreeMap<String, String>,
}

impl Default for ElementProps {
    fn default() -> Self {
        Self {
            id: None,
            is_visible: true,
            separator: None,
            spacing: None,
            requires: BTreeMap::new(),
        }
    }
}

/// The closed set of body element variants, selected by the `type` tag.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type")]
pub enum CardElement {
    TextBlock(TextBlock),
    Image(Image),
    Container(Container),
    ColumnSet(ColumnSet),
    FactSet(FactSet),
    ActionSet(ActionSet),
    #[serde(rename = "Input.Text")]
    InputText(InputText),
    #[serde(rename = "Input.ChoiceSet")]
    InputChoiceSet(InputChoiceSet),
    #[serde(rename = "Input.Date")]
    InputDate(InputDate),
    #[serde(rename = "Input.Time")]
    InputTime(InputTime),
    #[serde(rename = "Input.Toggle")]
    InputToggle(InputToggle),
}

impl CardElement {
    pub fn props(&self) -> &ElementProps {
        match self {
            CardElement::TextBlock(el) => &el.props,
            CardElement::Image(el) => &el.props,
            CardElement::Container(el) => &el.props,
            CardElement::ColumnSet(el) => &el.props,
            CardElement::FactSet(el) => &el.props,
            CardElement::ActionSet(el) => &el.props,
            CardElement::InputText(el) => &el.props,
            CardElement::InputChoiceSet(el) => &el.props,
            CardElement::InputDate(el) => &el.props,
            CardElement::InputTime(el) => &el.props,
            CardElement::InputToggle(el) => &el.props,
        }
    }

    /// The canonical discriminator tag for this variant.
    pub fn type_tag(&self) -> &'static str {
        match self {
            CardElement::TextBlock(_) => "TextBlock",
            CardElement::Image(_) => "Image",
            CardElement::Container(_) => "Container",
            CardElement::ColumnSet(_) => "ColumnSet",
            CardElement::FactSet(_) => "FactSet",
            CardElement::ActionSet(_) => "ActionSet",
            CardElement::InputText(_) => "Input.Text",
            CardElement::InputChoiceSet(_) => "Input.ChoiceSet",
            CardElement::InputDate(_) => "Input.Date",
            CardElement::InputTime(_) => "Input.Time",
            CardElement::InputToggle(_) => "Input.Toggle",
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TextBlock {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<TextColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_type: Option<FontType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horizontal_alignment: Option<HorizontalAlignment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_subtle: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_lines: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<FontSize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<TextWeight>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrap: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<TextBlockStyle>,
    #[serde(flatten)]
    pub props: ElementProps,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    /// Image source; data URIs are passed through untouched.
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "is_auto")]
    pub height: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horizontal_alignment: Option<HorizontalAlignment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub select_action: Option<Action>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<ImageSize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<ImageStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(flatten)]
    pub props: ElementProps,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    pub items: Vec<CardElement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub select_action: Option<Action>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<ContainerStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical_content_alignment: Option<VerticalAlignment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bleed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_height: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rtl: Option<bool>,
    #[serde(flatten)]
    pub props: ElementProps,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSet {
    pub columns: Vec<Column>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub select_action: Option<Action>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<ContainerStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bleed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_height: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horizontal_alignment: Option<HorizontalAlignment>,
    #[serde(flatten)]
    pub props: ElementProps,
}

/// Child of a `ColumnSet`; not addressable through the element discriminator.
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<CardElement>,
    /// `"auto"`, `"stretch"`, a pixel size, or a numeric weight.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub select_action: Option<Action>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<ContainerStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical_content_alignment: Option<VerticalAlignment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bleed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_height: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rtl: Option<bool>,
    #[serde(flatten)]
    pub props: ElementProps,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FactSet {
    pub facts: Vec<Fact>,
    #[serde(flatten)]
    pub props: ElementProps,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Fact {
    pub title: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActionSet {
    pub actions: Vec<Action>,
    #[serde(flatten)]
    pub props: ElementProps,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InputText {
    /// Key under which collected input is reported.
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_multiline: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regex: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<TextInputStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(flatten)]
    pub props: ElementProps,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InputChoiceSet {
    pub id: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<Choice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_multi_select: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<ChoiceInputStyle>,
    /// Initially selected value(s); comma-separated for multi-select.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrap: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(flatten)]
    pub props: ElementProps,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Choice {
    pub title: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InputDate {
    pub id: String,
    pub placeholder: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<String>,
    #[serde(flatten)]
    pub props: ElementProps,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InputTime {
    pub id: String,
    pub placeholder: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(flatten)]
    pub props: ElementProps,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InputToggle {
    pub title: String,
    pub id: String,
    pub value_on: String,
    pub value_off: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_checked: Option<bool>,
    #[serde(flatten)]
    pub props: ElementProps,
}

/// The closed set of action variants, independent from `CardElement`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type")]
pub enum Action {
    #[serde(rename = "Action.OpenUrl")]
    OpenUrl(OpenUrlAction),
    #[serde(rename = "Action.Submit")]
    Submit(SubmitAction),
    #[serde(rename = "Action.ShowCard")]
    ShowCard(ShowCardAction),
    #[serde(rename = "Action.ToggleVisibility")]
    ToggleVisibility(ToggleVisibilityAction),
}

impl Action {
    pub fn title(&self) -> Option<&str> {
        match self {
            Action::OpenUrl(action) => Some(&action.title),
            Action::Submit(action) => Some(&action.title),
            Action::ShowCard(action) => Some(&action.title),
            Action::ToggleVisibility(_) => None,
        }
    }

    pub fn type_tag(&self) -> &'static str {
        match self {
            Action::OpenUrl(_) => "Action.OpenUrl",
            Action::Submit(_) => "Action.Submit",
            Action::ShowCard(_) => "Action.ShowCard",
            Action::ToggleVisibility(_) => "Action.ToggleVisibility",
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OpenUrlAction {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SubmitAction {
    pub title: String,
    /// Opaque payload handed back to the host verbatim on submit.
    #[serde(skip_serializing_if = "Value::is_null")]
    pub data: Value,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ShowCardAction {
    pub title: String,
    /// An owned, independent subtree; not a back-reference into the parent.
    pub card: AdaptiveCard,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ToggleVisibilityAction {
    pub target_elements: Vec<TargetElement>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TargetElement {
    pub element_id: String,
    /// `Some(true)` shows, `Some(false)` hides, `None` toggles.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_visible: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn elements_serialize_with_type_tags() {
        let element = CardElement::InputToggle(InputToggle {
            title: "Notify".into(),
            id: "notify".into(),
            value_on: "yes".into(),
            value_off: "no".into(),
            is_checked: Some(true),
            props: ElementProps::default(),
        });
        let value = serde_json::to_value(&element).unwrap();
        assert_eq!(value["type"], "Input.Toggle");
        assert_eq!(value["valueOn"], "yes");
        assert_eq!(value.get("isVisible"), None);
    }

    #[test]
    fn root_serializes_its_fixed_type() {
        let card = AdaptiveCard {
            version: "1.5".into(),
            body: Vec::new(),
        };
        let value = serde_json::to_value(&card).unwrap();
        assert_eq!(value, json!({"type": "AdaptiveCard", "version": "1.5", "body": []}));
    }

    #[test]
    fn hidden_elements_keep_their_flag() {
        let props = ElementProps {
            is_visible: false,
            ..ElementProps::default()
        };
        let element = CardElement::TextBlock(TextBlock {
            text: "ghost".into(),
            color: None,
            font_type: None,
            horizontal_alignment: None,
            is_subtle: None,
            max_lines: None,
            size: None,
            weight: None,
            wrap: None,
            style: None,
            props,
        });
        let value = serde_json::to_value(&element).unwrap();
        assert_eq!(value["isVisible"], false);
    }
}
