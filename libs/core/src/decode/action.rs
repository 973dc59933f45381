//! Per-variant field extractors for actions.

use serde_json::{Map, Value};

use crate::diagnostics::DecodeError;
use crate::model::{
    Action, OpenUrlAction, ShowCardAction, SubmitAction, TargetElement, ToggleVisibilityAction,
};

use super::Cx;

impl Cx<'_> {
    pub(super) fn action_inner(&mut self, value: &Value) -> Result<Action, DecodeError> {
        let obj = self.object(value)?;
        let tag = self.discriminator(obj)?;
        match tag.as_str() {
            "Action.OpenUrl" => self.open_url(obj).map(Action::OpenUrl),
            "Action.Submit" => self.submit(obj).map(Action::Submit),
            "Action.ShowCard" => self.show_card(obj).map(Action::ShowCard),
            "Action.ToggleVisibility" => self.toggle_visibility(obj).map(Action::ToggleVisibility),
            _ => Err(DecodeError::UnknownVariant {
                tag,
                path: self.path(),
            }),
        }
    }

    fn open_url(&mut self, obj: &Map<String, Value>) -> Result<OpenUrlAction, DecodeError> {
        Ok(OpenUrlAction {
            title: self.req_str(obj, "title")?,
            url: self.req_str(obj, "url")?,
        })
    }

    fn submit(&mut self, obj: &Map<String, Value>) -> Result<SubmitAction, DecodeError> {
        Ok(SubmitAction {
            title: self.req_str(obj, "title")?,
            // Opaque data bag: carried through unmodified, absent means null.
            data: obj.get("data").cloned().unwrap_or(Value::Null),
        })
    }

    fn show_card(&mut self, obj: &Map<String, Value>) -> Result<ShowCardAction, DecodeError> {
        let title = self.req_str(obj, "title")?;
        let raw = obj
            .get("card")
            .ok_or_else(|| DecodeError::MissingRequiredField {
                field: "card".to_string(),
                path: self.path(),
            })?;
        self.push("card");
        let card = self.card(raw);
        self.pop();
        Ok(ShowCardAction { title, card: card? })
    }

    fn toggle_visibility(
        &mut self,
        obj: &Map<String, Value>,
    ) -> Result<ToggleVisibilityAction, DecodeError> {
        let raw = match obj.get("targetElements") {
            Some(Value::Array(items)) => items,
            None | Some(Value::Null) => {
                return Err(DecodeError::MissingRequiredField {
                    field: "targetElements".to_string(),
                    path: self.path(),
                });
            }
            Some(_) => {
                return Err(DecodeError::MalformedNode {
                    path: self.field_path("targetElements"),
                });
            }
        };

        let mut target_elements = Vec::with_capacity(raw.len());
        for (index, item) in raw.iter().enumerate() {
            self.push(format!("targetElements/{index}"));
            let decoded = self.target_element(item);
            self.pop();
            if let Some(target) = self.contain(decoded)? {
                target_elements.push(target);
            }
        }
        Ok(ToggleVisibilityAction { target_elements })
    }

    fn target_element(&mut self, value: &Value) -> Result<TargetElement, DecodeError> {
        // The schema allows a bare element id as shorthand for "toggle".
        if let Some(element_id) = value.as_str() {
            return Ok(TargetElement {
                element_id: element_id.to_string(),
                is_visible: None,
            });
        }
        let obj = self.object(value)?;
        Ok(TargetElement {
            element_id: self.req_str(obj, "elementId")?,
            is_visible: self.opt_bool(obj, "isVisible"),
        })
    }
}
