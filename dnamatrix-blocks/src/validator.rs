use crate::block::{Block, OverrideSection};
use crate::error::{BlockError, BlockResult};
use crate::project::ProjectState;
use crate::registry::resolve_role;
use crate::rules::{rules_for, CollectionRule, Scope};
use crate::settings::{self, token_is_set, GlobalSettingsTable, TokenKey};
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;
use std::sync::OnceLock;

const MAX_BLOCKS_PER_PAGE: usize = 200;
const MAX_COLLECTION_ENTRIES: usize = 100;

const NAMED_COLORS: &[&str] = &["transparent", "currentColor", "inherit", "white", "black"];

/// Block-level color keys checked by the lint.
const BLOCK_COLOR_KEYS: &[(OverrideSection, &str)] = &[
    (OverrideSection::Style, "bgFill"),
    (OverrideSection::Style, "background"),
    (OverrideSection::Style, "backgroundColor"),
    (OverrideSection::Style, "textColor"),
    (OverrideSection::Background, "fixedColor"),
];

const COLOR_TOKENS: &[TokenKey] = &[
    settings::BACKGROUND,
    settings::BLOCK_SURFACE,
    settings::ACCENT,
    settings::TEXT,
];

/// Structural checks applied before a project is accepted.
pub fn validate_project(state: &ProjectState) -> BlockResult<()> {
    let mut seen_ids = HashSet::new();
    for (page, blocks) in &state.pages {
        for (index, block) in blocks.iter().enumerate() {
            if block.id.trim().is_empty() {
                return Err(BlockError::EmptyBlockId {
                    page: page.clone(),
                    index,
                });
            }
            if !seen_ids.insert(block.id.as_str()) {
                return Err(BlockError::DuplicateBlockId {
                    id: block.id.clone(),
                });
            }
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum LintKind {
    UnknownType { code: String },
    LegacyAlias { alias: String, code: String },
    CollectionShape { slot: String },
    TooManyEntries { slot: String, count: usize, max: usize },
    TooManyBlocks { count: usize, max: usize },
    InvalidColor { key: String, value: String },
}

/// A soft finding. Lint never blocks rendering or export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_id: Option<String>,
    #[serde(flatten)]
    pub kind: LintKind,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Info => "info",
            Severity::Warning => "warning",
        };
        write!(f, "{}", level)?;
        if let Some(page) = &self.page {
            write!(f, " [{}", page)?;
            if let Some(id) = &self.block_id {
                write!(f, "/{}", id)?;
            }
            write!(f, "]")?;
        }
        match &self.kind {
            LintKind::UnknownType { code } => {
                write!(f, ": unknown block type '{}', rendered as a diagnostic", code)
            }
            LintKind::LegacyAlias { alias, code } => {
                write!(f, ": legacy type alias '{}', canonical code is {}", alias, code)
            }
            LintKind::CollectionShape { slot } => {
                write!(f, ": '{}' is not a list and will render no entries", slot)
            }
            LintKind::TooManyEntries { slot, count, max } => {
                write!(f, ": '{}' has {} entries (max {})", slot, count, max)
            }
            LintKind::TooManyBlocks { count, max } => {
                write!(f, ": page has {} blocks (max {})", count, max)
            }
            LintKind::InvalidColor { key, value } => {
                write!(f, ": '{}' is not a recognized color: '{}'", key, value)
            }
        }
    }
}

/// Per-role shape lint over every page.
pub fn lint_project(state: &ProjectState) -> Vec<Diagnostic> {
    let mut found = lint_settings(&state.global_settings);
    for (page, blocks) in &state.pages {
        if blocks.len() > MAX_BLOCKS_PER_PAGE {
            found.push(Diagnostic {
                severity: Severity::Warning,
                page: Some(page.clone()),
                block_id: None,
                kind: LintKind::TooManyBlocks {
                    count: blocks.len(),
                    max: MAX_BLOCKS_PER_PAGE,
                },
            });
        }
        for block in blocks {
            found.extend(lint_block(block).into_iter().map(|(severity, kind)| Diagnostic {
                severity,
                page: Some(page.clone()),
                block_id: Some(block.id.clone()),
                kind,
            }));
        }
    }
    for diagnostic in &found {
        match diagnostic.severity {
            Severity::Warning => log::warn!("{}", diagnostic),
            Severity::Info => log::info!("{}", diagnostic),
        }
    }
    found
}

fn lint_block(block: &Block) -> Vec<(Severity, LintKind)> {
    let mut found = Vec::new();

    let Some(role) = resolve_role(&block.block_type).role() else {
        found.push((
            Severity::Warning,
            LintKind::UnknownType {
                code: block.block_type.clone(),
            },
        ));
        return found;
    };

    if !is_canonical_code(&block.block_type) {
        found.push((
            Severity::Info,
            LintKind::LegacyAlias {
                alias: block.block_type.clone(),
                code: role.entry().code.to_string(),
            },
        ));
    }

    let scope = Scope::Block(&block.local_overrides);
    for rule in rules_for(role).collections {
        lint_collection(rule, scope, rule.slot.to_string(), &mut found);
    }

    for (section, key) in BLOCK_COLOR_KEYS {
        if let Some(Value::String(color)) = block.local_overrides.get(*section, key) {
            if !color.is_empty() && !is_valid_color(color) {
                found.push((
                    Severity::Warning,
                    LintKind::InvalidColor {
                        key: format!("{}.{}", section.as_str(), key),
                        value: color.clone(),
                    },
                ));
            }
        }
    }
    found
}

fn lint_collection(
    rule: &CollectionRule,
    scope: Scope<'_>,
    slot: String,
    found: &mut Vec<(Severity, LintKind)>,
) {
    match rule.raw(scope) {
        None => {}
        Some(Value::Array(items)) => {
            if items.len() > MAX_COLLECTION_ENTRIES {
                found.push((
                    Severity::Warning,
                    LintKind::TooManyEntries {
                        slot: slot.clone(),
                        count: items.len(),
                        max: MAX_COLLECTION_ENTRIES,
                    },
                ));
            }
            for (index, item) in items.iter().enumerate() {
                for nested in rule.nested {
                    let path = format!("{}[{}].{}", slot, index, nested.slot);
                    lint_collection(nested, Scope::Item(item), path, found);
                }
            }
        }
        Some(_) => found.push((Severity::Warning, LintKind::CollectionShape { slot })),
    }
}

fn lint_settings(settings: &GlobalSettingsTable) -> Vec<Diagnostic> {
    COLOR_TOKENS
        .iter()
        .filter(|key| token_is_set(settings, **key))
        .filter_map(|key| {
            let value = settings.text_or(*key, "");
            (!is_valid_color(&value)).then(|| Diagnostic {
                severity: Severity::Warning,
                page: None,
                block_id: None,
                kind: LintKind::InvalidColor {
                    key: format!("{}/{}", key.group, key.param),
                    value: value.into_owned(),
                },
            })
        })
        .collect()
}

/// `B` followed by two zone digits and two variant digits.
pub fn is_canonical_code(code: &str) -> bool {
    static CODE_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = CODE_REGEX.get_or_init(|| Regex::new(r"^B\d{4}$").unwrap());
    regex.is_match(code)
}

/// Hex (`#rgb`, `#rrggbb`, `#rrggbbaa`), functional (`rgb()`, `hsl()`, ...),
/// `var()` references and a few keywords.
pub fn is_valid_color(color: &str) -> bool {
    static HEX_COLOR_REGEX: OnceLock<Regex> = OnceLock::new();
    static FUNC_COLOR_REGEX: OnceLock<Regex> = OnceLock::new();
    let hex = HEX_COLOR_REGEX
        .get_or_init(|| Regex::new(r"^#([0-9a-fA-F]{3}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$").unwrap());
    let func = FUNC_COLOR_REGEX
        .get_or_init(|| Regex::new(r"^(rgba?|hsla?|var)\([^;{}<>]*\)$").unwrap());
    hex.is_match(color) || func.is_match(color) || NAMED_COLORS.contains(&color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::OverrideSet;
    use serde_json::json;

    fn project(blocks: Value) -> ProjectState {
        serde_json::from_value(json!({"pages": {"home": blocks}})).unwrap()
    }

    #[test]
    fn test_duplicate_ids_across_pages() {
        let state: ProjectState = serde_json::from_value(json!({
            "pages": {
                "home": [{"id": "a", "type": "B0201"}],
                "about": [{"id": "a", "type": "B0301"}]
            }
        }))
        .unwrap();
        let result = validate_project(&state);
        assert!(matches!(result.unwrap_err(), BlockError::DuplicateBlockId { id } if id == "a"));
    }

    #[test]
    fn test_empty_id_rejected() {
        let state = project(json!([{"id": "x", "type": "B0201"}, {"id": " ", "type": "B0301"}]));
        assert!(matches!(
            validate_project(&state).unwrap_err(),
            BlockError::EmptyBlockId { index: 1, .. }
        ));
    }

    #[test]
    fn test_valid_project_passes() {
        let state = project(json!([{"id": "x", "type": "B9999"}]));
        assert!(validate_project(&state).is_ok(), "unknown types are not structural errors");
    }

    #[test]
    fn test_lint_unknown_and_alias() {
        let state = project(json!([
            {"id": "x", "type": "B9999"},
            {"id": "y", "type": "Reviews"},
            {"id": "z", "type": "B0201"}
        ]));
        let kinds: Vec<_> = lint_project(&state).into_iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            vec![
                LintKind::UnknownType { code: "B9999".into() },
                LintKind::LegacyAlias { alias: "Reviews".into(), code: "B2201".into() },
            ]
        );
    }

    #[test]
    fn test_lint_collection_shape_and_nested() {
        let state = project(json!([
            {"id": "s", "type": "B0801", "localOverrides": {"data": {"stats": {"value": 1}}}},
            {"id": "k", "type": "B0301", "localOverrides": {"data": {"groups": [{"items": "nope"}]}}}
        ]));
        let slots: Vec<_> = lint_project(&state)
            .into_iter()
            .filter_map(|d| match d.kind {
                LintKind::CollectionShape { slot } => Some(slot),
                _ => None,
            })
            .collect();
        assert_eq!(slots, vec!["stats".to_string(), "groups[0].items".to_string()]);
    }

    #[test]
    fn test_lint_colors() {
        let mut overrides = OverrideSet::default();
        overrides.set(OverrideSection::Style, "bgFill", json!("#12345"));
        overrides.set(OverrideSection::Style, "textColor", json!("rgb(1, 2, 3)"));
        let mut state = ProjectState::new();
        state
            .page_mut("home")
            .unwrap()
            .push(Block::new("c", "B0201").with_overrides(overrides));
        state.global_settings.set("GL02", "P3", json!("blue;}"));

        let colors: Vec<_> = lint_project(&state)
            .into_iter()
            .filter_map(|d| match d.kind {
                LintKind::InvalidColor { key, .. } => Some(key),
                _ => None,
            })
            .collect();
        assert_eq!(colors, vec!["GL02/P3".to_string(), "style.bgFill".to_string()]);
    }

    #[test]
    fn test_code_shape() {
        assert!(is_canonical_code("B0203"));
        assert!(!is_canonical_code("B02031"));
        assert!(!is_canonical_code("Hero"));
    }

    #[test]
    fn test_diagnostic_display() {
        let d = Diagnostic {
            severity: Severity::Warning,
            page: Some("home".into()),
            block_id: Some("x".into()),
            kind: LintKind::UnknownType { code: "B9999".into() },
        };
        assert_eq!(
            d.to_string(),
            "warning [home/x]: unknown block type 'B9999', rendered as a diagnostic"
        );
    }
}
