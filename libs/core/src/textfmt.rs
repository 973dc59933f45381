//! `{{DATE(...)}}` / `{{TIME(...)}}` token substitution.
//!
//! TextBlock content may embed timestamp tokens that hosts expect rendered in
//! a human-readable form. The default implementation is locale-agnostic;
//! hosts needing ICU-grade localisation plug their own [`TextFormatter`]
//! through the render context. The `lang` tag is forwarded untouched.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use time::format_description::well_known::Rfc3339;
use time::format_description::FormatItem;
use time::macros::format_description;
use time::OffsetDateTime;

pub trait TextFormatter: Send + Sync {
    fn format(&self, lang: Option<&str>, text: &str) -> String;
}

/// Leaves text untouched; useful when the host does its own substitution.
#[derive(Debug, Default)]
pub struct NullFormatter;

impl TextFormatter for NullFormatter {
    fn format(&self, _lang: Option<&str>, text: &str) -> String {
        text.to_string()
    }
}

const TIMESTAMP: &str = r"(\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(?:Z|[+-]\d{2}:\d{2}))";

static DATE_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"\{{\{{DATE\({TIMESTAMP}(?:, ?(COMPACT|LONG|SHORT))?\)\}}\}}"
    ))
    .expect("date token pattern must compile")
});

static TIME_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"\{{\{{TIME\({TIMESTAMP}\)\}}\}}"))
        .expect("time token pattern must compile")
});

const COMPACT_DATE: &'static [FormatItem<'static>] =
    format_description!("[month padding:none]/[day padding:none]/[year]");
const SHORT_DATE: &'static [FormatItem<'static>] =
    format_description!("[month repr:short] [day padding:none], [year]");
const LONG_DATE: &'static [FormatItem<'static>] =
    format_description!("[month repr:long] [day padding:none], [year]");
const SHORT_TIME: &'static [FormatItem<'static>] =
    format_description!("[hour repr:12 padding:none]:[minute] [period]");

/// Default formatter: fixed English month and period names.
#[derive(Debug, Default)]
pub struct DateTimeFormatter;

impl TextFormatter for DateTimeFormatter {
    fn format(&self, _lang: Option<&str>, text: &str) -> String {
        let dated = DATE_TOKEN.replace_all(text, |caps: &Captures<'_>| {
            let style = caps.get(2).map(|m| m.as_str()).unwrap_or("COMPACT");
            let pattern = match style {
                "LONG" => LONG_DATE,
                "SHORT" => SHORT_DATE,
                _ => COMPACT_DATE,
            };
            substitute(caps, pattern)
        });
        TIME_TOKEN
            .replace_all(&dated, |caps: &Captures<'_>| substitute(caps, SHORT_TIME))
            .into_owned()
    }
}

/// An unparsable or unformattable timestamp leaves the token as written.
fn substitute(caps: &Captures<'_>, pattern: &[FormatItem<'_>]) -> String {
    let token = caps[0].to_string();
    let Ok(parsed) = OffsetDateTime::parse(&caps[1], &Rfc3339) else {
        return token;
    };
    parsed.format(pattern).unwrap_or(token)
}
