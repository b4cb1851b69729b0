use crate::block::Fields;
use crate::value::{as_text, is_truthy, present};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;

/// A `(group, parameter)` address into the settings table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenKey {
    pub group: &'static str,
    pub param: &'static str,
}

impl TokenKey {
    pub const fn new(group: &'static str, param: &'static str) -> Self {
        Self { group, param }
    }
}

pub const FONT_FAMILY: TokenKey = TokenKey::new("GL01", "P8");
pub const BACKGROUND: TokenKey = TokenKey::new("GL02", "P1");
pub const BLOCK_SURFACE: TokenKey = TokenKey::new("GL02", "P2");
pub const ACCENT: TokenKey = TokenKey::new("GL02", "P3");
pub const TEXT: TokenKey = TokenKey::new("GL02", "P4");
pub const PATTERN: TokenKey = TokenKey::new("GL02", "P8");
pub const CONTAINER_WIDTH: TokenKey = TokenKey::new("GL03", "P6");
pub const RADIUS: TokenKey = TokenKey::new("GL07", "P1");
pub const STICKY_NAV: TokenKey = TokenKey::new("GL11", "P1");

pub const DEFAULT_BACKGROUND: &str = "#09090B";
pub const DEFAULT_TEXT: &str = "#FFFFFF";
pub const DEFAULT_ACCENT: &str = "#3B82F6";
pub const DEFAULT_FONT: &str = "Inter";
pub const DEFAULT_CONTAINER: &str = "1200";
pub const DEFAULT_RADIUS: &str = "8";
pub const DEFAULT_SURFACE: &str = "transparent";
/// Sentinel meaning "no pattern overlay".
pub const NO_PATTERN: &str = "None";

/// Design tokens grouped as `GLxx -> { params: [{id, value}] }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GlobalSettingsTable(pub IndexMap<String, SettingsGroup>);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsGroup {
    #[serde(default)]
    pub params: Vec<SettingParam>,
    #[serde(flatten)]
    pub extra: Fields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingParam {
    pub id: String,
    #[serde(default)]
    pub value: Value,
    #[serde(flatten)]
    pub extra: Fields,
}

impl GlobalSettingsTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw value at `(group, id)`. Identity is the pair, never the position.
    pub fn get(&self, group: &str, id: &str) -> Option<&Value> {
        self.0
            .get(group)?
            .params
            .iter()
            .find(|p| p.id == id)
            .map(|p| &p.value)
    }

    pub fn token(&self, key: TokenKey) -> Option<&Value> {
        self.get(key.group, key.param)
    }

    /// Text of a token, or `fallback` when the token is missing or falsy.
    pub fn text_or<'a>(&'a self, key: TokenKey, fallback: &'a str) -> Cow<'a, str> {
        present(self.token(key))
            .and_then(as_text)
            .unwrap_or(Cow::Borrowed(fallback))
    }

    /// Borrowing variant for hot paths: only string tokens are considered.
    pub fn str_or<'a>(&'a self, key: TokenKey, fallback: &'a str) -> &'a str {
        match self.token(key) {
            Some(Value::String(s)) if !s.is_empty() => s.as_str(),
            _ => fallback,
        }
    }

    /// Compares against the literal string `"true"`; a JSON `true` does not count.
    pub fn is_literal_true(&self, key: TokenKey) -> bool {
        matches!(self.token(key), Some(Value::String(s)) if s == "true")
    }

    /// Sets a parameter, appending it (and its group) when absent.
    pub fn set(&mut self, group: &str, id: &str, value: Value) {
        let group = self.0.entry(group.to_string()).or_default();
        match group.params.iter_mut().find(|p| p.id == id) {
            Some(param) => param.value = value,
            None => group.params.push(SettingParam {
                id: id.to_string(),
                value,
                extra: Fields::new(),
            }),
        }
    }

    pub fn groups(&self) -> impl Iterator<Item = (&str, &SettingsGroup)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Page-level tokens derived from the settings table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignTokens {
    pub background: String,
    pub text: String,
    pub accent: String,
    pub font_family: String,
    pub container_width: String,
    pub radius: String,
    pub sticky_nav: bool,
}

impl DesignTokens {
    pub fn from_settings(settings: &GlobalSettingsTable) -> Self {
        Self {
            background: settings.text_or(BACKGROUND, DEFAULT_BACKGROUND).into_owned(),
            text: settings.text_or(TEXT, DEFAULT_TEXT).into_owned(),
            accent: settings.text_or(ACCENT, DEFAULT_ACCENT).into_owned(),
            font_family: settings.text_or(FONT_FAMILY, DEFAULT_FONT).into_owned(),
            container_width: settings
                .text_or(CONTAINER_WIDTH, DEFAULT_CONTAINER)
                .into_owned(),
            radius: settings.text_or(RADIUS, DEFAULT_RADIUS).into_owned(),
            sticky_nav: settings.is_literal_true(STICKY_NAV),
        }
    }

    /// `:root` custom properties consumed by the generated markup.
    pub fn to_css_vars(&self) -> String {
        format!(
            ":root{{--dna-bg:{};--dna-text:{};--dna-accent:{};--dna-font:'{}',sans-serif;--dna-container:{}px;--dna-radius:{}px;}}",
            css_value(&self.background),
            css_value(&self.text),
            css_value(&self.accent),
            css_value(&self.font_family),
            css_value(&self.container_width),
            css_value(&self.radius),
        )
    }

    /// Light mode swaps the background and text colors.
    pub fn to_light_mode_css(&self) -> String {
        format!(
            ".light-mode{{--dna-bg:{};--dna-text:{};}}",
            css_value(&self.text),
            css_value(&self.background),
        )
    }

    /// Google Fonts family parameter (`Space Grotesk` -> `Space+Grotesk`).
    pub fn font_query(&self) -> String {
        self.font_family
            .chars()
            .filter(|c| c.is_alphanumeric() || *c == ' ' || *c == '-')
            .collect::<String>()
            .replace(' ', "+")
    }
}

/// Strip characters that could close a declaration or the style element.
pub fn css_value(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, '<' | '>' | '{' | '}' | ';' | '\'' | '"' | '\\'))
        .collect()
}

/// Truthiness check for a raw token, exposed for lint and tests.
pub fn token_is_set(settings: &GlobalSettingsTable, key: TokenKey) -> bool {
    settings.token(key).is_some_and(is_truthy)
}
