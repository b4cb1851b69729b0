//! Single-owner mutation API over a [`ProjectState`].
//!
//! Every edit the builder performs goes through here. Rendering only ever
//! borrows the state.

use crate::block::{Block, OverrideSection};
use crate::error::{BlockError, BlockResult};
use crate::project::{ProjectState, DEFAULT_PAGE};
use crate::registry::resolve_role;
use crate::render::{render_page, RenderContext};
use crate::view::ViewNode;
use serde_json::Value;
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProjectStore {
    state: ProjectState,
    active_page: String,
    selected: Option<String>,
}

impl Default for ProjectStore {
    fn default() -> Self {
        Self::new(ProjectState::new())
    }
}

impl ProjectStore {
    pub fn new(state: ProjectState) -> Self {
        let active_page = default_page(&state);
        Self {
            state,
            active_page,
            selected: None,
        }
    }

    pub fn state(&self) -> &ProjectState {
        &self.state
    }

    pub fn active_page(&self) -> &str {
        &self.active_page
    }

    pub fn set_active_page(&mut self, page: &str) -> BlockResult<()> {
        self.state.page(page)?;
        self.active_page = page.to_string();
        self.selected = None;
        Ok(())
    }

    /// Blocks of the active page, in document order.
    pub fn blocks(&self) -> &[Block] {
        self.state.page(&self.active_page).unwrap_or(&[])
    }

    pub fn block(&self, id: &str) -> Option<&Block> {
        self.blocks().iter().find(|b| b.id == id)
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Append a new block of the given type to the active page, seeded with
    /// the role's default overrides. Returns the new id.
    pub fn add_block(&mut self, type_code: &str) -> BlockResult<String> {
        let role = resolve_role(type_code)
            .role()
            .ok_or_else(|| BlockError::UnknownBlockType {
                code: type_code.to_string(),
            })?;
        let id = Uuid::new_v4().to_string();
        let block = Block::new(id.clone(), type_code).with_overrides(role.default_overrides());
        self.page_mut()?.push(block);
        log::debug!("added {} block {}", role.label(), id);
        Ok(id)
    }

    pub fn remove_block(&mut self, id: &str) -> BlockResult<Block> {
        let index = self.index_of(id)?;
        let removed = self.page_mut()?.remove(index);
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        Ok(removed)
    }

    /// Swap a block with its neighbour. Moving past either end is an error
    /// and leaves the order unchanged.
    pub fn move_block(&mut self, id: &str, direction: Direction) -> BlockResult<()> {
        let index = self.index_of(id)?;
        let len = self.blocks().len();
        let target = match direction {
            Direction::Up if index > 0 => index - 1,
            Direction::Down if index + 1 < len => index + 1,
            _ => {
                return Err(BlockError::CannotMove {
                    id: id.to_string(),
                    direction: direction.to_string(),
                })
            }
        };
        self.page_mut()?.swap(index, target);
        Ok(())
    }

    /// Flip visibility; returns the new value.
    pub fn toggle_visibility(&mut self, id: &str) -> BlockResult<bool> {
        let block = self.block_mut(id)?;
        block.is_visible = !block.is_visible;
        Ok(block.is_visible)
    }

    /// Set `localOverrides.<section>.<key>`. A `null` value removes the key
    /// so the block inherits again.
    pub fn set_override(
        &mut self,
        id: &str,
        section: &str,
        key: &str,
        value: Value,
    ) -> BlockResult<()> {
        let section = OverrideSection::parse(section)?;
        let overrides = &mut self.block_mut(id)?.local_overrides;
        if value.is_null() {
            overrides.unset(section, key);
        } else {
            overrides.set(section, key, value);
        }
        Ok(())
    }

    pub fn update_setting(&mut self, group: &str, param: &str, value: Value) {
        self.state.global_settings.set(group, param, value);
    }

    /// Select a block, or clear the selection when it is already selected.
    pub fn toggle_selection(&mut self, id: &str) -> BlockResult<Option<&str>> {
        self.index_of(id)?;
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        } else {
            self.selected = Some(id.to_string());
        }
        Ok(self.selected.as_deref())
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn export_json(&self) -> BlockResult<String> {
        self.state.to_json()
    }

    /// Replace the whole project. The document is parsed and validated in
    /// full first; on any error the current state is left untouched.
    pub fn import_json(&mut self, json: &str) -> BlockResult<()> {
        let state = ProjectState::from_json(json)?;
        let blocks: usize = state.pages.values().map(Vec::len).sum();
        log::info!(
            "imported project: {} page(s), {} block(s)",
            state.pages.len(),
            blocks
        );
        if state.pages.get(&self.active_page).is_none() {
            self.active_page = default_page(&state);
        }
        self.state = state;
        self.selected = None;
        Ok(())
    }

    /// Live view of the active page, with the current selection framed.
    pub fn render(&self) -> Vec<ViewNode> {
        let blocks = self.blocks();
        let ctx = RenderContext::for_page(blocks, &self.state.global_settings)
            .with_selection(self.selected.as_deref());
        render_page(blocks, &ctx)
    }

    fn index_of(&self, id: &str) -> BlockResult<usize> {
        self.blocks()
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| BlockError::BlockNotFound { id: id.to_string() })
    }

    fn page_mut(&mut self) -> BlockResult<&mut Vec<Block>> {
        self.state.page_mut(&self.active_page)
    }

    fn block_mut(&mut self, id: &str) -> BlockResult<&mut Block> {
        self.page_mut()?
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| BlockError::BlockNotFound { id: id.to_string() })
    }
}

fn default_page(state: &ProjectState) -> String {
    if state.pages.contains_key(DEFAULT_PAGE) {
        return DEFAULT_PAGE.to_string();
    }
    state
        .pages
        .keys()
        .next()
        .cloned()
        .unwrap_or_else(|| DEFAULT_PAGE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Role;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn store_with(types: &[&str]) -> (ProjectStore, Vec<String>) {
        let mut store = ProjectStore::default();
        let ids = types
            .iter()
            .map(|t| store.add_block(t).unwrap())
            .collect();
        (store, ids)
    }

    fn order(store: &ProjectStore) -> Vec<String> {
        store.blocks().iter().map(|b| b.id.clone()).collect()
    }

    #[test]
    fn test_add_block_uses_catalog_defaults() {
        let (store, ids) = store_with(&["B0901"]);
        let block = store.block(&ids[0]).unwrap();
        assert_eq!(block.block_type, "B0901");
        assert!(block.is_visible);
        assert_eq!(block.local_overrides, Role::Spacer.default_overrides());
        assert_eq!(ids[0].len(), 36);
    }

    #[test]
    fn test_add_unknown_type_fails() {
        let mut store = ProjectStore::default();
        let result = store.add_block("B9999");
        assert!(matches!(result.unwrap_err(), BlockError::UnknownBlockType { .. }));
        assert!(store.blocks().is_empty());
    }

    #[test]
    fn test_move_block_and_edges() {
        let (mut store, ids) = store_with(&["B0101", "B0201", "B0301"]);
        store.move_block(&ids[2], Direction::Up).unwrap();
        assert_eq!(order(&store), vec![ids[0].clone(), ids[2].clone(), ids[1].clone()]);

        let top = store.move_block(&ids[0], Direction::Up);
        assert!(matches!(top.unwrap_err(), BlockError::CannotMove { .. }));
        let bottom = store.move_block(&ids[1], Direction::Down);
        assert!(matches!(bottom.unwrap_err(), BlockError::CannotMove { .. }));
        assert_eq!(order(&store), vec![ids[0].clone(), ids[2].clone(), ids[1].clone()]);
    }

    #[test]
    fn test_remove_clears_selection() {
        let (mut store, ids) = store_with(&["B0201", "B0301"]);
        store.toggle_selection(&ids[0]).unwrap();
        assert_eq!(store.selected(), Some(ids[0].as_str()));
        store.remove_block(&ids[0]).unwrap();
        assert_eq!(store.selected(), None);
        assert_eq!(order(&store), vec![ids[1].clone()]);
    }

    #[test]
    fn test_toggle_selection_twice_clears() {
        let (mut store, ids) = store_with(&["B0201"]);
        assert_eq!(store.toggle_selection(&ids[0]).unwrap(), Some(ids[0].as_str()));
        assert_eq!(store.toggle_selection(&ids[0]).unwrap(), None);
        assert!(store.toggle_selection("missing").is_err());
    }

    #[test]
    fn test_set_override_and_inherit_again() {
        let (mut store, ids) = store_with(&["B0201"]);
        store.set_override(&ids[0], "style", "bgFill", json!("#111")).unwrap();
        assert_eq!(
            store.block(&ids[0]).unwrap().local_overrides.get_str(OverrideSection::Style, "bgFill"),
            Some("#111")
        );
        store.set_override(&ids[0], "style", "bgFill", Value::Null).unwrap();
        assert!(store.block(&ids[0]).unwrap().local_overrides.style.is_none());

        let bad = store.set_override(&ids[0], "colors", "x", json!(1));
        assert!(matches!(bad.unwrap_err(), BlockError::InvalidOverrideSection { .. }));
    }

    #[test]
    fn test_toggle_visibility_hides_from_render() {
        let (mut store, ids) = store_with(&["B0201", "B0301"]);
        assert!(!store.toggle_visibility(&ids[0]).unwrap());
        let rendered = store.render();
        assert_eq!(rendered.len(), 1);
        assert_eq!(rendered[0].as_element().unwrap().get_attr("id"), Some(ids[1].as_str()));
    }

    #[test]
    fn test_import_failure_leaves_state_untouched() {
        let (mut store, ids) = store_with(&["B0201"]);
        store.toggle_selection(&ids[0]).unwrap();
        let before = store.export_json().unwrap();

        assert!(store.import_json("not json").is_err());
        let dup = r#"{"pages": {"home": [{"id": "a", "type": "B0201"}, {"id": "a", "type": "B0301"}]}}"#;
        assert!(matches!(
            store.import_json(dup).unwrap_err(),
            BlockError::DuplicateBlockId { .. }
        ));

        assert_eq!(store.export_json().unwrap(), before);
        assert_eq!(store.selected(), Some(ids[0].as_str()));
    }

    #[test]
    fn test_import_switches_to_existing_page() {
        let mut store = ProjectStore::default();
        store
            .import_json(r#"{"pages": {"landing": [{"id": "a", "type": "Hero"}]}}"#)
            .unwrap();
        assert_eq!(store.active_page(), "landing");
        assert_eq!(store.blocks().len(), 1);
    }

    #[test]
    fn test_update_setting_feeds_render() {
        let (mut store, _) = store_with(&["B0201"]);
        store.update_setting("GL02", "P2", json!("#222"));
        let rendered = store.render();
        let style = rendered[0].as_element().unwrap().get_attr("style").unwrap();
        assert!(style.contains("background-color:#222;"));
    }
}
