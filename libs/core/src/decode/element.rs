//! Per-variant field extractors for body elements.

use serde_json::{Map, Value};

use crate::diagnostics::DecodeError;
use crate::enums::{FontSize, TextBlockStyle, TextWeight};
use crate::model::{
    ActionSet, Choice, Column, ColumnSet, Container, Fact, FactSet, Image, InputChoiceSet,
    InputDate, InputText, InputTime, InputToggle, TextBlock,
};

use super::Cx;

impl Cx<'_> {
    pub(super) fn text_block(&mut self, obj: &Map<String, Value>) -> Result<TextBlock, DecodeError> {
        let text = self.req_str(obj, "text")?;
        let mut size = self.opt_enum::<FontSize>(obj, "size");
        let mut weight = self.opt_enum::<TextWeight>(obj, "weight");
        let style = self.opt_enum::<TextBlockStyle>(obj, "style");

        // Heading defaults apply only after every sibling field is read, so
        // an explicit size/weight always wins over the style-derived one.
        if style == Some(TextBlockStyle::Heading) {
            size.get_or_insert(FontSize::Large);
            weight.get_or_insert(TextWeight::Bolder);
        }

        Ok(TextBlock {
            text,
            color: self.opt_enum(obj, "color"),
            font_type: self.opt_enum(obj, "fontType"),
            horizontal_alignment: self.opt_enum(obj, "horizontalAlignment"),
            is_subtle: self.opt_bool(obj, "isSubtle"),
            max_lines: self.opt_u32(obj, "maxLines"),
            size,
            weight,
            wrap: self.opt_bool(obj, "wrap"),
            style,
            props: self.element_props(obj),
        })
    }

    pub(super) fn image(&mut self, obj: &Map<String, Value>) -> Result<Image, DecodeError> {
        let url = self.req_str(obj, "url")?;
        let select_action = self.opt_action(obj, "selectAction")?;
        Ok(Image {
            url,
            alt_text: self.opt_str(obj, "altText"),
            background_color: self.opt_str(obj, "backgroundColor"),
            height: self.opt_str(obj, "height").unwrap_or_else(|| "auto".to_string()),
            horizontal_alignment: self.opt_enum(obj, "horizontalAlignment"),
            select_action,
            size: self.opt_enum(obj, "size"),
            style: self.opt_enum(obj, "style"),
            width: self.opt_str(obj, "width"),
            props: self.element_props(obj),
        })
    }

    pub(super) fn container(&mut self, obj: &Map<String, Value>) -> Result<Container, DecodeError> {
        let items = self.element_seq(obj, "items", true)?;
        let select_action = self.opt_action(obj, "selectAction")?;
        Ok(Container {
            items,
            select_action,
            style: self.opt_enum(obj, "style"),
            vertical_content_alignment: self.opt_enum(obj, "verticalContentAlignment"),
            bleed: self.opt_bool(obj, "bleed"),
            background_image: self.opt_str(obj, "backgroundImage"),
            min_height: self.opt_str(obj, "minHeight"),
            rtl: self.opt_bool(obj, "rtl"),
            props: self.element_props(obj),
        })
    }

    pub(super) fn column_set(&mut self, obj: &Map<String, Value>) -> Result<ColumnSet, DecodeError> {
        let columns = self.column_seq(obj)?;
        let select_action = self.opt_action(obj, "selectAction")?;
        Ok(ColumnSet {
            columns,
            select_action,
            style: self.opt_enum(obj, "style"),
            bleed: self.opt_bool(obj, "bleed"),
            min_height: self.opt_str(obj, "minHeight"),
            horizontal_alignment: self.opt_enum(obj, "horizontalAlignment"),
            props: self.element_props(obj),
        })
    }

    fn column_seq(&mut self, obj: &Map<String, Value>) -> Result<Vec<Column>, DecodeError> {
        let raw = match obj.get("columns") {
            Some(Value::Array(items)) => items,
            None | Some(Value::Null) => {
                return Err(DecodeError::MissingRequiredField {
                    field: "columns".to_string(),
                    path: self.path(),
                });
            }
            Some(_) => {
                return Err(DecodeError::MalformedNode {
                    path: self.field_path("columns"),
                });
            }
        };

        let mut columns = Vec::with_capacity(raw.len());
        for (index, item) in raw.iter().enumerate() {
            self.push(format!("columns/{index}"));
            let decoded = self.column(item);
            self.pop();
            if let Some(column) = self.contain(decoded)? {
                columns.push(column);
            }
        }
        Ok(columns)
    }

    // Columns are child-only: there is no discriminator dispatch, the parent
    // already fixes the shape.
    fn column(&mut self, value: &Value) -> Result<Column, DecodeError> {
        let obj = self.object(value)?;
        let items = self.element_seq(obj, "items", false)?;
        let select_action = self.opt_action(obj, "selectAction")?;
        Ok(Column {
            items,
            width: self.opt_width(obj),
            select_action,
            style: self.opt_enum(obj, "style"),
            vertical_content_alignment: self.opt_enum(obj, "verticalContentAlignment"),
            bleed: self.opt_bool(obj, "bleed"),
            background_image: self.opt_str(obj, "backgroundImage"),
            min_height: self.opt_str(obj, "minHeight"),
            rtl: self.opt_bool(obj, "rtl"),
            props: self.element_props(obj),
        })
    }

    /// Column widths may be a keyword string, a pixel string, or a bare
    /// numeric weight; numbers are normalised to their string form.
    fn opt_width(&mut self, obj: &Map<String, Value>) -> Option<String> {
        match obj.get("width") {
            None | Some(Value::Null) => None,
            Some(Value::String(width)) => Some(width.clone()),
            Some(Value::Number(weight)) => Some(weight.to_string()),
            Some(_) => {
                self.warn_invalid("width");
                None
            }
        }
    }

    pub(super) fn fact_set(&mut self, obj: &Map<String, Value>) -> Result<FactSet, DecodeError> {
        let raw = match obj.get("facts") {
            Some(Value::Array(items)) => items,
            None | Some(Value::Null) => {
                return Err(DecodeError::MissingRequiredField {
                    field: "facts".to_string(),
                    path: self.path(),
                });
            }
            Some(_) => {
                return Err(DecodeError::MalformedNode {
                    path: self.field_path("facts"),
                });
            }
        };

        let mut facts = Vec::with_capacity(raw.len());
        for (index, item) in raw.iter().enumerate() {
            self.push(format!("facts/{index}"));
            let decoded = self.fact(item);
            self.pop();
            if let Some(fact) = self.contain(decoded)? {
                facts.push(fact);
            }
        }
        Ok(FactSet {
            facts,
            props: self.element_props(obj),
        })
    }

    fn fact(&mut self, value: &Value) -> Result<Fact, DecodeError> {
        let obj = self.object(value)?;
        Ok(Fact {
            title: self.req_str(obj, "title")?,
            value: self.req_str(obj, "value")?,
        })
    }

    pub(super) fn action_set(&mut self, obj: &Map<String, Value>) -> Result<ActionSet, DecodeError> {
        Ok(ActionSet {
            actions: self.action_seq(obj, "actions")?,
            props: self.element_props(obj),
        })
    }

    pub(super) fn input_text(&mut self, obj: &Map<String, Value>) -> Result<InputText, DecodeError> {
        Ok(InputText {
            id: self.req_str(obj, "id")?,
            is_multiline: self.opt_bool(obj, "isMultiline"),
            max_length: self.opt_u32(obj, "maxLength"),
            placeholder: self.opt_str(obj, "placeholder"),
            regex: self.opt_str(obj, "regex"),
            style: self.opt_enum(obj, "style"),
            value: self.opt_str(obj, "value"),
            error_message: self.opt_str(obj, "errorMessage"),
            is_required: self.opt_bool(obj, "isRequired"),
            label: self.opt_str(obj, "label"),
            props: self.input_props(obj),
        })
    }

    pub(super) fn input_choice_set(
        &mut self,
        obj: &Map<String, Value>,
    ) -> Result<InputChoiceSet, DecodeError> {
        let id = self.req_str(obj, "id")?;
        let choices = self.choice_seq(obj)?;
        Ok(InputChoiceSet {
            id,
            choices,
            is_multi_select: self.opt_bool(obj, "isMultiSelect"),
            style: self.opt_enum(obj, "style"),
            value: self.opt_str(obj, "value"),
            placeholder: self.opt_str(obj, "placeholder"),
            wrap: self.opt_bool(obj, "wrap"),
            error_message: self.opt_str(obj, "errorMessage"),
            is_required: self.opt_bool(obj, "isRequired"),
            label: self.opt_str(obj, "label"),
            props: self.input_props(obj),
        })
    }

    fn choice_seq(&mut self, obj: &Map<String, Value>) -> Result<Vec<Choice>, DecodeError> {
        let raw = match obj.get("choices") {
            Some(Value::Array(items)) => items,
            None | Some(Value::Null) => return Ok(Vec::new()),
            Some(_) => {
                return Err(DecodeError::MalformedNode {
                    path: self.field_path("choices"),
                });
            }
        };

        let mut choices = Vec::with_capacity(raw.len());
        for (index, item) in raw.iter().enumerate() {
            self.push(format!("choices/{index}"));
            let decoded = self.choice(item);
            self.pop();
            if let Some(choice) = self.contain(decoded)? {
                choices.push(choice);
            }
        }
        Ok(choices)
    }

    fn choice(&mut self, value: &Value) -> Result<Choice, DecodeError> {
        let obj = self.object(value)?;
        Ok(Choice {
            title: self.req_str(obj, "title")?,
            value: self.req_str(obj, "value")?,
        })
    }

    pub(super) fn input_date(&mut self, obj: &Map<String, Value>) -> Result<InputDate, DecodeError> {
        Ok(InputDate {
            id: self.req_str(obj, "id")?,
            placeholder: self.req_str(obj, "placeholder")?,
            value: self.opt_str(obj, "value"),
            min: self.opt_str(obj, "min"),
            max: self.opt_str(obj, "max"),
            props: self.input_props(obj),
        })
    }

    pub(super) fn input_time(&mut self, obj: &Map<String, Value>) -> Result<InputTime, DecodeError> {
        Ok(InputTime {
            id: self.req_str(obj, "id")?,
            placeholder: self.req_str(obj, "placeholder")?,
            value: self.opt_str(obj, "value"),
            props: self.input_props(obj),
        })
    }

    pub(super) fn input_toggle(
        &mut self,
        obj: &Map<String, Value>,
    ) -> Result<InputToggle, DecodeError> {
        Ok(InputToggle {
            title: self.req_str(obj, "title")?,
            id: self.req_str(obj, "id")?,
            value_on: self.req_str(obj, "valueOn")?,
            value_off: self.req_str(obj, "valueOff")?,
            is_checked: self.opt_bool(obj, "isChecked"),
            props: self.input_props(obj),
        })
    }
}
