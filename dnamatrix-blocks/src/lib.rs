//! # DNA Matrix blocks
//!
//! Data model and live renderer for the DNA Matrix page builder.
//!
//! ## Features
//! - Closed block catalog with exact (editor) and zone-prefix (export) dispatch
//! - Style resolution of local overrides over global design tokens
//! - One rendering rule table shared by the live renderer and the exported site
//! - Project store with lossless JSON import/export
//! - Structural validation and per-role shape lint
//!
//! ## Example
//! ```ignore
//! use dnamatrix_blocks::{parse_project, render_page_html};
//!
//! let json = r#"{
//!   "pages": {"home": [{"id": "h1", "type": "B0201", "localOverrides": {"data": {"title": "Hi"}}}]},
//!   "globalSettings": {}
//! }"#;
//!
//! let project = parse_project(json).expect("invalid project");
//! let html = render_page_html(&project, "home").expect("missing page");
//! ```

pub mod block;
pub mod error;
pub mod project;
pub mod registry;
pub mod render;
pub mod rules;
pub mod settings;
pub mod store;
pub mod style;
pub mod validator;
pub mod value;
pub mod view;

// --- Core types ---
pub use block::{Block, Fields, OverrideSection, OverrideSet};
pub use error::{BlockError, BlockResult};
pub use project::{ProjectState, DEFAULT_PAGE};
pub use registry::{resolve_role, resolve_zone, Resolution, Role, ZoneRoute};
pub use settings::{DesignTokens, GlobalSettingsTable};
pub use store::{Direction, ProjectStore};
pub use style::{resolve_style, ResolvedStyle};
pub use view::{Element, ViewNode};

// --- Rendering ---
pub use render::RenderContext;
pub use rules::{runtime_contract, RuntimeContract};
pub use validator::{lint_project, validate_project, Diagnostic};

/// Parse and validate a project JSON document.
pub fn parse_project(json: &str) -> BlockResult<ProjectState> {
    ProjectState::from_json(json)
}

/// Live view trees for the visible blocks of one page.
pub fn render_page(project: &ProjectState, page: &str) -> BlockResult<Vec<ViewNode>> {
    let blocks = project.page(page)?;
    let ctx = RenderContext::for_page(blocks, &project.global_settings);
    Ok(render::render_page(blocks, &ctx))
}

/// Serialized HTML of one page's visible blocks, concatenated in order.
pub fn render_page_html(project: &ProjectState, page: &str) -> BlockResult<String> {
    let mut html = String::new();
    for node in render_page(project, page)? {
        // Writing into a String cannot fail.
        let _ = node.write_html(&mut html);
    }
    Ok(html)
}
