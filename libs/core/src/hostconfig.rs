//! Host-supplied token resolution, consumed at render time only.
//!
//! A host config maps style tokens (font sizes, weights, spacing, colors) to
//! the concrete values its toolkit paints with. Parsing is lenient: every
//! field falls back to the stock value on its own, so a partial or slightly
//! broken config still yields a usable table.

use serde_json::Value;

use crate::coerce;
use crate::enums::{FontSize, Spacing, TextColor, TextWeight};

#[derive(Debug, Clone, PartialEq)]
pub struct HostConfig {
    pub font_sizes: FontSizes,
    pub font_weights: FontWeights,
    pub spacing: SpacingConfig,
    pub colors: ColorPalette,
    pub fact_set: FactSetConfig,
    pub supports_interactivity: bool,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            font_sizes: FontSizes::default(),
            font_weights: FontWeights::default(),
            spacing: SpacingConfig::default(),
            colors: ColorPalette::default(),
            fact_set: FactSetConfig::default(),
            supports_interactivity: true,
        }
    }
}

impl HostConfig {
    pub fn parse(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::default();
        };
        Self {
            font_sizes: FontSizes::parse(obj.get("fontSizes")),
            font_weights: FontWeights::parse(obj.get("fontWeights")),
            spacing: SpacingConfig::parse(obj.get("spacing")),
            colors: ColorPalette::parse(obj.get("containerStyles")),
            fact_set: FactSetConfig::parse(obj.get("factSet")),
            supports_interactivity: obj
                .get("supportsInteractivity")
                .map(|v| coerce::coerce_bool(v, true))
                .unwrap_or(true),
        }
    }
}

fn parse_px(value: Option<&Value>, field: &str, default: u32) -> u32 {
    match value.and_then(Value::as_object).and_then(|obj| obj.get(field)) {
        Some(raw) => coerce::coerce_number(raw, f64::from(default)) as u32,
        None => default,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FontSizes {
    pub small: u32,
    pub default: u32,
    pub medium: u32,
    pub large: u32,
    pub extra_large: u32,
}

impl Default for FontSizes {
    fn default() -> Self {
        Self {
            small: 12,
            default: 14,
            medium: 17,
            large: 21,
            extra_large: 26,
        }
    }
}

impl FontSizes {
    fn parse(value: Option<&Value>) -> Self {
        let stock = Self::default();
        Self {
            small: parse_px(value, "small", stock.small),
            default: parse_px(value, "default", stock.default),
            medium: parse_px(value, "medium", stock.medium),
            large: parse_px(value, "large", stock.large),
            extra_large: parse_px(value, "extraLarge", stock.extra_large),
        }
    }

    pub fn size(&self, token: FontSize) -> u32 {
        match token {
            FontSize::Default => self.default,
            FontSize::Small => self.small,
            FontSize::Medium => self.medium,
            FontSize::Large => self.large,
            FontSize::ExtraLarge => self.extra_large,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FontWeights {
    pub lighter: u32,
    pub default: u32,
    pub bolder: u32,
}

impl Default for FontWeights {
    fn default() -> Self {
        Self {
            lighter: 200,
            default: 400,
            bolder: 600,
        }
    }
}

impl FontWeights {
    fn parse(value: Option<&Value>) -> Self {
        let stock = Self::default();
        Self {
            lighter: parse_px(value, "lighter", stock.lighter),
            default: parse_px(value, "default", stock.default),
            bolder: parse_px(value, "bolder", stock.bolder),
        }
    }

    pub fn weight(&self, token: TextWeight) -> u32 {
        match token {
            TextWeight::Lighter => self.lighter,
            TextWeight::Default => self.default,
            TextWeight::Bolder => self.bolder,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpacingConfig {
    pub extra_small: u32,
    pub small: u32,
    pub default: u32,
    pub medium: u32,
    pub large: u32,
    pub extra_large: u32,
    pub padding: u32,
}

impl Default for SpacingConfig {
    fn default() -> Self {
        Self {
            extra_small: 4,
            small: 3,
            default: 8,
            medium: 20,
            large: 30,
            extra_large: 40,
            padding: 20,
        }
    }
}

impl SpacingConfig {
    fn parse(value: Option<&Value>) -> Self {
        let stock = Self::default();
        Self {
            extra_small: parse_px(value, "extraSmall", stock.extra_small),
            small: parse_px(value, "small", stock.small),
            default: parse_px(value, "default", stock.default),
            medium: parse_px(value, "medium", stock.medium),
            large: parse_px(value, "large", stock.large),
            extra_large: parse_px(value, "extraLarge", stock.extra_large),
            padding: parse_px(value, "padding", stock.padding),
        }
    }

    pub fn px(&self, token: Spacing) -> u32 {
        match token {
            Spacing::None => 0,
            Spacing::ExtraSmall => self.extra_small,
            Spacing::Small => self.small,
            Spacing::Default => self.default,
            Spacing::Medium => self.medium,
            Spacing::Large => self.large,
            Spacing::ExtraLarge => self.extra_large,
            Spacing::Padding => self.padding,
        }
    }
}

/// A foreground color with its subtle variant.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorDefinition {
    pub default: String,
    pub subtle: String,
}

impl ColorDefinition {
    fn new(default: &str, subtle: &str) -> Self {
        Self {
            default: default.to_string(),
            subtle: subtle.to_string(),
        }
    }

    fn parse(value: Option<&Value>, stock: Self) -> Self {
        let Some(obj) = value.and_then(Value::as_object) else {
            return stock;
        };
        Self {
            default: obj
                .get("default")
                .map(|v| coerce::coerce_str(v, &stock.default))
                .unwrap_or(stock.default),
            subtle: obj
                .get("subtle")
                .map(|v| coerce::coerce_str(v, &stock.subtle))
                .unwrap_or(stock.subtle),
        }
    }
}

impl Default for ColorDefinition {
    fn default() -> Self {
        Self::new("#000000", "#666666")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColorPalette {
    pub default: ColorDefinition,
    pub dark: ColorDefinition,
    pub light: ColorDefinition,
    pub accent: ColorDefinition,
    pub good: ColorDefinition,
    pub warning: ColorDefinition,
    pub attention: ColorDefinition,
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self {
            default: ColorDefinition::default(),
            dark: ColorDefinition::new("#000000", "#666666"),
            light: ColorDefinition::new("#FFFFFF", "#DDDDDD"),
            accent: ColorDefinition::new("#0063B1", "#0063B1"),
            good: ColorDefinition::new("#54A254", "#54A254"),
            warning: ColorDefinition::new("#E69500", "#E69500"),
            attention: ColorDefinition::new("#CC3300", "#DDCC3300"),
        }
    }
}

impl ColorPalette {
    fn parse(value: Option<&Value>) -> Self {
        // Colors live under the default container style in host config JSON.
        let colors = value
            .and_then(Value::as_object)
            .and_then(|styles| styles.get("default"))
            .and_then(Value::as_object)
            .and_then(|style| style.get("foregroundColors"));
        let Some(obj) = colors.and_then(Value::as_object) else {
            return Self::default();
        };
        let stock = Self::default();
        Self {
            default: ColorDefinition::parse(obj.get("default"), stock.default),
            dark: ColorDefinition::parse(obj.get("dark"), stock.dark),
            light: ColorDefinition::parse(obj.get("light"), stock.light),
            accent: ColorDefinition::parse(obj.get("accent"), stock.accent),
            good: ColorDefinition::parse(obj.get("good"), stock.good),
            warning: ColorDefinition::parse(obj.get("warning"), stock.warning),
            attention: ColorDefinition::parse(obj.get("attention"), stock.attention),
        }
    }

    pub fn color(&self, token: TextColor, subtle: bool) -> &str {
        let definition = match token {
            TextColor::Default => &self.default,
            TextColor::Dark => &self.dark,
            TextColor::Light => &self.light,
            TextColor::Accent => &self.accent,
            TextColor::Good => &self.good,
            TextColor::Warning => &self.warning,
            TextColor::Attention => &self.attention,
        };
        if subtle {
            &definition.subtle
        } else {
            &definition.default
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FactSetConfig {
    pub title_weight: TextWeight,
    pub title_max_width: u32,
    pub value_wrap: bool,
}

impl Default for FactSetConfig {
    fn default() -> Self {
        Self {
            title_weight: TextWeight::Bolder,
            title_max_width: 150,
            value_wrap: true,
        }
    }
}

impl FactSetConfig {
    fn parse(value: Option<&Value>) -> Self {
        let stock = Self::default();
        let Some(obj) = value.and_then(Value::as_object) else {
            return stock;
        };
        let title = obj.get("title").and_then(Value::as_object);
        Self {
            title_weight: title
                .and_then(|t| t.get("weight"))
                .map(|v| coerce::coerce_enum(v, stock.title_weight))
                .unwrap_or(stock.title_weight),
            title_max_width: parse_px(obj.get("title"), "maxWidth", stock.title_max_width),
            value_wrap: obj
                .get("value")
                .and_then(Value::as_object)
                .and_then(|v| v.get("wrap"))
                .map(|v| coerce::coerce_bool(v, stock.value_wrap))
                .unwrap_or(stock.value_wrap),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn stock_values_cover_every_token() {
        let config = HostConfig::default();
        assert_eq!(config.font_sizes.size(FontSize::Medium), 17);
        assert_eq!(config.font_weights.weight(TextWeight::Bolder), 600);
        assert_eq!(config.spacing.px(Spacing::None), 0);
        assert_eq!(config.colors.color(TextColor::Default, false), "#000000");
        assert_eq!(config.colors.color(TextColor::Default, true), "#666666");
    }

    #[test]
    fn parse_overrides_fields_individually() {
        let config = HostConfig::parse(&json!({
            "fontSizes": { "large": 32, "small": "not a size" },
            "factSet": { "title": { "weight": "Default", "maxWidth": 200 } }
        }));
        assert_eq!(config.font_sizes.size(FontSize::Large), 32);
        assert_eq!(config.font_sizes.size(FontSize::Small), 12);
        assert_eq!(config.font_sizes.size(FontSize::Default), 14);
        assert_eq!(config.fact_set.title_weight, TextWeight::Default);
        assert_eq!(config.fact_set.title_max_width, 200);
    }

    #[test]
    fn non_object_config_yields_stock_table() {
        assert_eq!(HostConfig::parse(&json!("nope")), HostConfig::default());
    }
}
