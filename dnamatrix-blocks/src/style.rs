use crate::block::{Block, OverrideSection};
use crate::registry::{resolve_role, Role};
use crate::settings::{self, GlobalSettingsTable};
use crate::value::is_truthy;
use serde::Serialize;

/// Background keys checked in priority order.
const BACKGROUND_KEYS: [&str; 3] = ["bgFill", "background", "backgroundColor"];

pub const STICKY_Z_INDEX: u32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Relative,
    Sticky,
}

impl Position {
    pub fn as_css(self) -> &'static str {
        match self {
            Position::Relative => "relative",
            Position::Sticky => "sticky",
        }
    }
}

/// Effective visual properties of one block. Recomputed on every render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedStyle<'a> {
    pub background_color: &'a str,
    /// `None` means the block inherits the page text color.
    pub text_color: Option<&'a str>,
    /// `None` when the resolved pattern is the `"None"` sentinel.
    pub background_pattern: Option<&'a str>,
    pub is_sticky: bool,
    pub position: Position,
    pub z_index: u32,
}

impl ResolvedStyle<'_> {
    /// Class of the pattern overlay element, if any.
    pub fn pattern_class(&self) -> Option<String> {
        self.background_pattern
            .map(|p| format!("dna-pattern pattern-{}", p.to_lowercase()))
    }
}

/// Merge a block's local overrides over the global tokens.
///
/// Background precedence: locked fixed color, then local `bgFill`,
/// `background`, `backgroundColor`, then the block surface token, then
/// `transparent`.
pub fn resolve_style<'a>(block: &'a Block, settings: &'a GlobalSettingsTable) -> ResolvedStyle<'a> {
    let overrides = &block.local_overrides;

    let locked = overrides
        .get(OverrideSection::Background, "lockBackground")
        .is_some_and(is_truthy);
    let fixed = overrides
        .get_str(OverrideSection::Background, "fixedColor")
        .filter(|c| !c.is_empty());

    let background_color = match (locked, fixed) {
        (true, Some(color)) => color,
        _ => BACKGROUND_KEYS
            .iter()
            .find_map(|key| {
                overrides
                    .get_str(OverrideSection::Style, key)
                    .filter(|v| !v.is_empty())
            })
            .unwrap_or_else(|| settings.str_or(settings::BLOCK_SURFACE, settings::DEFAULT_SURFACE)),
    };

    let text_color = overrides
        .get_str(OverrideSection::Style, "textColor")
        .filter(|v| !v.is_empty());

    let pattern = overrides
        .get_str(OverrideSection::Style, "backgroundPattern")
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| settings.str_or(settings::PATTERN, settings::NO_PATTERN));
    let background_pattern = (pattern != settings::NO_PATTERN).then_some(pattern);

    let is_sticky = is_sticky(block, settings);

    ResolvedStyle {
        background_color,
        text_color,
        background_pattern,
        is_sticky,
        position: if is_sticky { Position::Sticky } else { Position::Relative },
        z_index: if is_sticky { STICKY_Z_INDEX } else { 0 },
    }
}

/// Only Navbar blocks can stick. The flag is the literal string `"true"`,
/// either on the block (`data.stickyLogic`) or globally.
pub fn is_sticky(block: &Block, settings: &GlobalSettingsTable) -> bool {
    if resolve_role(&block.block_type).role() != Some(Role::Navbar) {
        return false;
    }
    block
        .local_overrides
        .get_str(OverrideSection::Data, "stickyLogic")
        == Some("true")
        || settings.is_literal_true(settings::STICKY_NAV)
}

/// Whether any visible block in the sequence is a sticky navbar.
pub fn has_sticky_nav<'a>(
    blocks: impl IntoIterator<Item = &'a Block>,
    settings: &GlobalSettingsTable,
) -> bool {
    blocks
        .into_iter()
        .any(|b| b.is_visible && is_sticky(b, settings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::OverrideSet;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn block(block_type: &str, overrides: serde_json::Value) -> Block {
        let overrides: OverrideSet = serde_json::from_value(overrides).unwrap();
        Block::new("blk-1", block_type).with_overrides(overrides)
    }

    fn settings(raw: serde_json::Value) -> GlobalSettingsTable {
        serde_json::from_value(raw).unwrap()
    }

    #[test]
    fn test_bg_fill_beats_background_color() {
        let b = block("B0201", json!({"style": {"bgFill": "#111", "backgroundColor": "#222"}}));
        let empty = GlobalSettingsTable::new();
        assert_eq!(resolve_style(&b, &empty).background_color, "#111");
    }

    #[test]
    fn test_locked_background_wins() {
        let b = block(
            "B0201",
            json!({
                "style": {"bgFill": "#111"},
                "background": {"lockBackground": true, "fixedColor": "#abcdef"}
            }),
        );
        let empty = GlobalSettingsTable::new();
        assert_eq!(resolve_style(&b, &empty).background_color, "#abcdef");
    }

    #[test]
    fn test_lock_without_color_is_ignored() {
        let b = block(
            "B0201",
            json!({"style": {"background": "#333"}, "background": {"lockBackground": true}}),
        );
        let empty = GlobalSettingsTable::new();
        assert_eq!(resolve_style(&b, &empty).background_color, "#333");
    }

    #[test]
    fn test_surface_token_then_transparent() {
        let b = block("B0201", json!({}));
        let with_surface = settings(json!({"GL02": {"params": [{"id": "P2", "value": "#0f0f0f"}]}}));
        assert_eq!(resolve_style(&b, &with_surface).background_color, "#0f0f0f");
        assert_eq!(
            resolve_style(&b, &GlobalSettingsTable::new()).background_color,
            "transparent"
        );
    }

    #[test]
    fn test_pattern_resolution() {
        let global = settings(json!({"GL02": {"params": [{"id": "P8", "value": "Grid"}]}}));
        let plain = block("B0301", json!({}));
        let local = block("B0301", json!({"style": {"backgroundPattern": "Dots"}}));
        let disabled = block("B0301", json!({"style": {"backgroundPattern": "None"}}));

        assert_eq!(resolve_style(&plain, &global).background_pattern, Some("Grid"));
        assert_eq!(
            resolve_style(&local, &global).pattern_class().as_deref(),
            Some("dna-pattern pattern-dots")
        );
        assert_eq!(resolve_style(&disabled, &global).background_pattern, None);
        assert_eq!(
            resolve_style(&plain, &GlobalSettingsTable::new()).background_pattern,
            None
        );
    }

    #[test]
    fn test_local_sticky_flag_needs_navbar_role() {
        let empty = GlobalSettingsTable::new();
        let nav = block("B0101", json!({"data": {"stickyLogic": "true"}}));
        let hero = block("B0201", json!({"data": {"stickyLogic": "true"}}));

        let resolved = resolve_style(&nav, &empty);
        assert!(resolved.is_sticky);
        assert_eq!(resolved.position, Position::Sticky);
        assert_eq!(resolved.z_index, STICKY_Z_INDEX);
        assert!(!resolve_style(&hero, &empty).is_sticky);
    }

    #[test]
    fn test_sticky_flag_is_string_typed() {
        let empty = GlobalSettingsTable::new();
        let nav = block("Navbar", json!({"data": {"stickyLogic": true}}));
        assert!(!resolve_style(&nav, &empty).is_sticky);

        let global = settings(json!({"GL11": {"params": [{"id": "P1", "value": "true"}]}}));
        assert!(resolve_style(&nav, &global).is_sticky);
    }

    #[test]
    fn test_text_color_inherits_when_unset() {
        let empty = GlobalSettingsTable::new();
        assert_eq!(resolve_style(&block("B0201", json!({})), &empty).text_color, None);
        let colored = block("B0201", json!({"style": {"textColor": "#eee"}}));
        assert_eq!(resolve_style(&colored, &empty).text_color, Some("#eee"));
    }
}
