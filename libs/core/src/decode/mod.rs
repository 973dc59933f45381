//! Polymorphic decoder from generic JSON values into the typed card tree.
//!
//! The `type` discriminator is the sole authority for variant selection and
//! is matched exactly (case-sensitive) against the fixed tag tables below.
//! Individual fields go through the coercion layer and fall back to defaults
//! with a recorded diagnostic; required fields and unknown discriminators are
//! typed failures for the node they occur on, contained or propagated
//! according to [`UnknownPolicy`].

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::coerce;
use crate::diagnostics::{codes, DecodeError, Diagnostic};
use crate::enums::Token;
use crate::model::{Action, AdaptiveCard, CardElement, ElementProps};

mod action;
mod element;

/// Canonical element discriminators, in table order.
pub const ELEMENT_TAGS: &[&str] = &[
    "TextBlock",
    "Image",
    "Container",
    "ColumnSet",
    "FactSet",
    "ActionSet",
    "Input.Text",
    "Input.ChoiceSet",
    "Input.Date",
    "Input.Time",
    "Input.Toggle",
];

/// Canonical action discriminators, in table order.
pub const ACTION_TAGS: &[&str] = &[
    "Action.OpenUrl",
    "Action.Submit",
    "Action.ShowCard",
    "Action.ToggleVisibility",
];

const DEFAULT_MAX_DEPTH: usize = 32;

/// What to do when a node inside a collection fails to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownPolicy {
    /// Drop the node, record an error diagnostic, keep decoding siblings.
    #[default]
    Skip,
    /// Abort the whole decode with the node's error.
    Fail,
}

#[derive(Debug, Clone, Copy)]
pub struct DecodeOptions {
    pub unknown: UnknownPolicy,
    /// Combined guard over container nesting and `ShowCard` card chains.
    pub max_depth: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            unknown: UnknownPolicy::Skip,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// A successfully decoded value plus everything worth telling the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded<T> {
    pub value: T,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Decoder {
    options: DecodeOptions,
}

impl Decoder {
    pub fn new(options: DecodeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    pub fn decode_card(&self, value: &Value) -> Result<Decoded<AdaptiveCard>, DecodeError> {
        let mut cx = Cx::new(&self.options);
        let card = cx.card(value)?;
        Ok(Decoded {
            value: card,
            diagnostics: cx.diagnostics,
        })
    }

    pub fn decode_element(&self, value: &Value) -> Result<Decoded<CardElement>, DecodeError> {
        let mut cx = Cx::new(&self.options);
        let element = cx.element(value)?;
        Ok(Decoded {
            value: element,
            diagnostics: cx.diagnostics,
        })
    }

    pub fn decode_action(&self, value: &Value) -> Result<Decoded<Action>, DecodeError> {
        let mut cx = Cx::new(&self.options);
        let action = cx.action(value)?;
        Ok(Decoded {
            value: action,
            diagnostics: cx.diagnostics,
        })
    }
}

/// Decodes a card with default options (skip-unknown, default depth limit).
pub fn decode_card(value: &Value) -> Result<Decoded<AdaptiveCard>, DecodeError> {
    Decoder::default().decode_card(value)
}

pub fn decode_element(value: &Value) -> Result<Decoded<CardElement>, DecodeError> {
    Decoder::default().decode_element(value)
}

pub fn decode_action(value: &Value) -> Result<Decoded<Action>, DecodeError> {
    Decoder::default().decode_action(value)
}

pub(crate) struct Cx<'a> {
    options: &'a DecodeOptions,
    pub(crate) diagnostics: Vec<Diagnostic>,
    depth: usize,
    segments: Vec<String>,
}

impl<'a> Cx<'a> {
    fn new(options: &'a DecodeOptions) -> Self {
        Self {
            options,
            diagnostics: Vec::new(),
            depth: 0,
            segments: Vec::new(),
        }
    }

    pub(crate) fn path(&self) -> String {
        if self.segments.is_empty() {
            "/".to_string()
        } else {
            format!("/{}", self.segments.join("/"))
        }
    }

    fn field_path(&self, field: &str) -> String {
        if self.segments.is_empty() {
            format!("/{field}")
        } else {
            format!("/{}/{field}", self.segments.join("/"))
        }
    }

    fn push(&mut self, segment: impl Into<String>) {
        self.segments.push(segment.into());
    }

    fn pop(&mut self) {
        self.segments.pop();
    }

    fn enter(&mut self) -> Result<(), DecodeError> {
        if self.depth >= self.options.max_depth {
            return Err(DecodeError::RecursionLimit {
                limit: self.options.max_depth,
                path: self.path(),
            });
        }
        self.depth += 1;
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn warn(&mut self, code: &'static str, message: impl Into<String>) {
        self.diagnostics
            .push(Diagnostic::warning(code, self.path(), message));
    }

    fn warn_invalid(&mut self, field: &str) {
        self.diagnostics.push(Diagnostic::warning(
            codes::INVALID_FIELD_VALUE,
            self.field_path(field),
            format!("value for '{field}' has an unusable shape, falling back to default"),
        ));
    }

    /// Applies the configured policy to a failed child decode.
    fn contain<T>(&mut self, result: Result<T, DecodeError>) -> Result<Option<T>, DecodeError> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(error) => match self.options.unknown {
                UnknownPolicy::Skip => {
                    self.diagnostics.push(Diagnostic::from(&error));
                    Ok(None)
                }
                UnknownPolicy::Fail => Err(error),
            },
        }
    }

    fn object<'v>(&self, value: &'v Value) -> Result<&'v Map<String, Value>, DecodeError> {
        value.as_object().ok_or_else(|| DecodeError::MalformedNode {
            path: self.path(),
        })
    }

    pub(crate) fn card(&mut self, value: &Value) -> Result<AdaptiveCard, DecodeError> {
        self.enter()?;
        let result = self.card_inner(value);
        self.leave();
        result
    }

    fn card_inner(&mut self, value: &Value) -> Result<AdaptiveCard, DecodeError> {
        let obj = self.object(value)?;

        // The root shape is fixed, so its tag is advisory rather than a
        // dispatch input. A mismatch is still worth surfacing.
        match obj.get("type").and_then(Value::as_str) {
            Some("AdaptiveCard") => {}
            Some(other) => self.warn(
                codes::ROOT_TYPE_MISMATCH,
                format!("card type is '{other}', expected 'AdaptiveCard'"),
            ),
            None => self.warn(codes::ROOT_TYPE_MISMATCH, "card carries no 'type' field"),
        }

        let version = match obj.get("version").and_then(Value::as_str) {
            Some(version) if !version.trim().is_empty() => version.to_string(),
            _ => {
                self.warn_invalid("version");
                "1.6".to_string()
            }
        };

        let body = self.element_seq(obj, "body", true)?;
        Ok(AdaptiveCard { version, body })
    }

    pub(crate) fn element(&mut self, value: &Value) -> Result<CardElement, DecodeError> {
        self.enter()?;
        let result = self.element_inner(value);
        self.leave();
        result
    }

    fn element_inner(&mut self, value: &Value) -> Result<CardElement, DecodeError> {
        let obj = self.object(value)?;
        let tag = self.discriminator(obj)?;
        match tag.as_str() {
            "TextBlock" => self.text_block(obj).map(CardElement::TextBlock),
            "Image" => self.image(obj).map(CardElement::Image),
            "Container" => self.container(obj).map(CardElement::Container),
            "ColumnSet" => self.column_set(obj).map(CardElement::ColumnSet),
            "FactSet" => self.fact_set(obj).map(CardElement::FactSet),
            "ActionSet" => self.action_set(obj).map(CardElement::ActionSet),
            "Input.Text" => self.input_text(obj).map(CardElement::InputText),
            "Input.ChoiceSet" => self.input_choice_set(obj).map(CardElement::InputChoiceSet),
            "Input.Date" => self.input_date(obj).map(CardElement::InputDate),
            "Input.Time" => self.input_time(obj).map(CardElement::InputTime),
            "Input.Toggle" => self.input_toggle(obj).map(CardElement::InputToggle),
            _ => Err(DecodeError::UnknownVariant {
                tag,
                path: self.path(),
            }),
        }
    }

    pub(crate) fn action(&mut self, value: &Value) -> Result<Action, DecodeError> {
        self.enter()?;
        let result = self.action_inner(value);
        self.leave();
        result
    }

    fn discriminator(&self, obj: &Map<String, Value>) -> Result<String, DecodeError> {
        obj.get("type")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| DecodeError::MissingTypeDiscriminator { path: self.path() })
    }

    // Field readers. Optional readers recover from unusable shapes with an
    // `invalid-field-value` diagnostic; required readers fail the node.

    fn req_str(&mut self, obj: &Map<String, Value>, field: &str) -> Result<String, DecodeError> {
        obj.get(field)
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| DecodeError::MissingRequiredField {
                field: field.to_string(),
                path: self.path(),
            })
    }

    fn opt_str(&mut self, obj: &Map<String, Value>, field: &str) -> Option<String> {
        match obj.get(field) {
            None | Some(Value::Null) => None,
            Some(value) => match coerce::str_opt(value) {
                Some(text) => Some(text.to_string()),
                None => {
                    self.warn_invalid(field);
                    None
                }
            },
        }
    }

    fn opt_bool(&mut self, obj: &Map<String, Value>, field: &str) -> Option<bool> {
        match obj.get(field) {
            None | Some(Value::Null) => None,
            Some(value) => match coerce::bool_opt(value) {
                Some(flag) => Some(flag),
                None => {
                    self.warn_invalid(field);
                    None
                }
            },
        }
    }

    fn opt_u32(&mut self, obj: &Map<String, Value>, field: &str) -> Option<u32> {
        match obj.get(field) {
            None | Some(Value::Null) => None,
            Some(value) => match coerce::number_opt(value) {
                Some(number) if number >= 0.0 => Some(number as u32),
                _ => {
                    self.warn_invalid(field);
                    None
                }
            },
        }
    }

    fn opt_enum<E: Token>(&mut self, obj: &Map<String, Value>, field: &str) -> Option<E> {
        match obj.get(field) {
            None | Some(Value::Null) => None,
            Some(value) => match coerce::enum_opt::<E>(value) {
                Some(variant) => Some(variant),
                None => {
                    self.warn_invalid(field);
                    None
                }
            },
        }
    }

    fn requires_map(&mut self, obj: &Map<String, Value>) -> BTreeMap<String, String> {
        let mut requires = BTreeMap::new();
        match obj.get("requires") {
            None | Some(Value::Null) => {}
            Some(Value::Object(entries)) => {
                for (feature, version) in entries {
                    match version.as_str() {
                        Some(version) => {
                            requires.insert(feature.clone(), version.to_string());
                        }
                        None => self.warn_invalid("requires"),
                    }
                }
            }
            Some(_) => self.warn_invalid("requires"),
        }
        requires
    }

    pub(crate) fn element_props(&mut self, obj: &Map<String, Value>) -> ElementProps {
        ElementProps {
            id: self.opt_str(obj, "id"),
            is_visible: self.opt_bool(obj, "isVisible").unwrap_or(true),
            separator: self.opt_bool(obj, "separator"),
            spacing: self.opt_enum(obj, "spacing"),
            requires: self.requires_map(obj),
        }
    }

    /// Shared props for input variants: the `id` already lives on the input
    /// itself as its reporting key, so it is not duplicated here.
    pub(crate) fn input_props(&mut self, obj: &Map<String, Value>) -> ElementProps {
        ElementProps {
            id: None,
            is_visible: self.opt_bool(obj, "isVisible").unwrap_or(true),
            separator: self.opt_bool(obj, "separator"),
            spacing: self.opt_enum(obj, "spacing"),
            requires: self.requires_map(obj),
        }
    }

    fn opt_action(
        &mut self,
        obj: &Map<String, Value>,
        field: &str,
    ) -> Result<Option<Action>, DecodeError> {
        let raw = match obj.get(field) {
            None | Some(Value::Null) => return Ok(None),
            Some(value) => value,
        };
        self.push(field);
        let decoded = self.action(raw);
        self.pop();
        self.contain(decoded)
    }

    fn element_seq(
        &mut self,
        obj: &Map<String, Value>,
        field: &str,
        required: bool,
    ) -> Result<Vec<CardElement>, DecodeError> {
        let raw = match obj.get(field) {
            Some(Value::Array(items)) => items,
            None | Some(Value::Null) => {
                if required {
                    return Err(DecodeError::MissingRequiredField {
                        field: field.to_string(),
                        path: self.path(),
                    });
                }
                return Ok(Vec::new());
            }
            Some(_) => {
                return Err(DecodeError::MalformedNode {
                    path: self.field_path(field),
                });
            }
        };

        let mut elements = Vec::with_capacity(raw.len());
        for (index, item) in raw.iter().enumerate() {
            self.push(format!("{field}/{index}"));
            let decoded = self.element(item);
            self.pop();
            if let Some(element) = self.contain(decoded)? {
                elements.push(element);
            }
        }
        Ok(elements)
    }

    fn action_seq(
        &mut self,
        obj: &Map<String, Value>,
        field: &str,
    ) -> Result<Vec<Action>, DecodeError> {
        let raw = match obj.get(field) {
            Some(Value::Array(items)) => items,
            None | Some(Value::Null) => {
                return Err(DecodeError::MissingRequiredField {
                    field: field.to_string(),
                    path: self.path(),
                });
            }
            Some(_) => {
                return Err(DecodeError::MalformedNode {
                    path: self.field_path(field),
                });
            }
        };

        let mut actions = Vec::with_capacity(raw.len());
        for (index, item) in raw.iter().enumerate() {
            self.push(format!("{field}/{index}"));
            let decoded = self.action(item);
            self.pop();
            if let Some(action) = self.contain(decoded)? {
                actions.push(action);
            }
        }
        Ok(actions)
    }
}
