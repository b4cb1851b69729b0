use crate::block::{Block, Fields};
use crate::error::{BlockError, BlockResult};
use crate::settings::GlobalSettingsTable;
use crate::validator::validate_project;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Page exported by default and created for a fresh project.
pub const DEFAULT_PAGE: &str = "home";

/// The exported/imported unit: pages of blocks plus the global settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectState {
    pub pages: IndexMap<String, Vec<Block>>,
    #[serde(default)]
    pub global_settings: GlobalSettingsTable,
    #[serde(flatten)]
    pub extra: Fields,
}

impl Default for ProjectState {
    fn default() -> Self {
        let mut pages = IndexMap::new();
        pages.insert(DEFAULT_PAGE.to_string(), Vec::new());
        Self {
            pages,
            global_settings: GlobalSettingsTable::new(),
            extra: Fields::new(),
        }
    }
}

impl ProjectState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a project document.
    pub fn from_json(json: &str) -> BlockResult<Self> {
        let raw: Value = serde_json::from_str(json)?;
        match raw.get("pages") {
            Some(Value::Object(_)) => {}
            Some(_) => {
                return Err(BlockError::MalformedProject(
                    "'pages' must be an object of page name to block list".to_string(),
                ))
            }
            None => {
                return Err(BlockError::MalformedProject(
                    "missing 'pages'".to_string(),
                ))
            }
        }
        let state: ProjectState = serde_json::from_value(raw)
            .map_err(|e| BlockError::MalformedProject(e.to_string()))?;
        validate_project(&state)?;
        Ok(state)
    }

    /// Pretty-printed JSON with two-space indentation. This exact text is
    /// what the JSON export writes and what the archive embeds.
    pub fn to_json(&self) -> BlockResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn page(&self, name: &str) -> BlockResult<&[Block]> {
        self.pages
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| BlockError::PageNotFound {
                page: name.to_string(),
            })
    }

    pub fn page_mut(&mut self, name: &str) -> BlockResult<&mut Vec<Block>> {
        self.pages
            .get_mut(name)
            .ok_or_else(|| BlockError::PageNotFound {
                page: name.to_string(),
            })
    }

    /// Every block of every page, in page order.
    pub fn blocks(&self) -> impl Iterator<Item = (&str, &Block)> {
        self.pages
            .iter()
            .flat_map(|(page, blocks)| blocks.iter().map(move |b| (page.as_str(), b)))
    }

    pub fn find_block(&self, id: &str) -> Option<&Block> {
        self.blocks().find(|(_, b)| b.id == id).map(|(_, b)| b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_has_home_page() {
        let state = ProjectState::new();
        assert_eq!(state.page(DEFAULT_PAGE).unwrap().len(), 0);
        assert!(matches!(
            state.page("about").unwrap_err(),
            BlockError::PageNotFound { .. }
        ));
    }

    #[test]
    fn test_from_json_requires_pages_object() {
        let missing = ProjectState::from_json(r#"{"globalSettings": {}}"#);
        assert!(matches!(missing.unwrap_err(), BlockError::MalformedProject(_)));

        let wrong = ProjectState::from_json(r#"{"pages": []}"#);
        assert!(matches!(wrong.unwrap_err(), BlockError::MalformedProject(_)));

        let syntax = ProjectState::from_json("{pages:");
        assert!(matches!(syntax.unwrap_err(), BlockError::Json(_)));
    }

    #[test]
    fn test_settings_optional() {
        let state = ProjectState::from_json(r#"{"pages": {"home": []}}"#).unwrap();
        assert!(state.global_settings.is_empty());
    }

    #[test]
    fn test_to_json_uses_two_space_indent() {
        let json = ProjectState::new().to_json().unwrap();
        assert!(json.starts_with("{\n  \"pages\": {\n    \"home\": []"));
    }

    #[test]
    fn test_unknown_top_level_keys_survive() {
        let json = r#"{"pages": {"home": []}, "globalSettings": {}, "version": 3}"#;
        let state = ProjectState::from_json(json).unwrap();
        let again = ProjectState::from_json(&state.to_json().unwrap()).unwrap();
        assert_eq!(again.extra.get("version"), Some(&serde_json::json!(3)));
        assert_eq!(state, again);
    }
}
