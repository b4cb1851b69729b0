//! Single-file production site.
//!
//! The document carries the project state and the rendering contract as
//! embedded JSON, plus a small runtime that renders them with React from the
//! CDN. The output only depends on the project and the config, so exporting
//! the same state twice yields identical bytes.

use crate::config::ExportConfig;
use crate::error::ExportResult;
use crate::styles::{token_styles, BASE_STYLES};
use dnamatrix_blocks::rules::{padding_class, universal_layout, UniversalLayout};
use dnamatrix_blocks::style::has_sticky_nav;
use dnamatrix_blocks::view::escape_html;
use dnamatrix_blocks::{
    resolve_style, resolve_zone, runtime_contract, DesignTokens, ProjectState, ResolvedStyle,
    RuntimeContract, ZoneRoute,
};
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt::Write;

const SITE_RUNTIME: &str = include_str!("../assets/site_runtime.js");

/// How one visible block will be rendered by the exported runtime.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedBlock {
    pub id: String,
    pub block_type: String,
    pub route: ZoneRoute,
    /// Set for blocks that fall through to the generic layout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<UniversalLayout>,
    pub padding: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SitePlan {
    pub page: String,
    pub sticky_nav: bool,
    pub blocks: Vec<PlannedBlock>,
}

#[derive(Debug, Clone)]
pub struct SiteExport {
    pub html: String,
    pub plan: SitePlan,
}

/// Data handed to the embedded runtime next to the raw state.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RuntimeData<'a> {
    contract: RuntimeContract,
    tokens: &'a DesignTokens,
    sticky_nav: bool,
    page: &'a str,
    styles: IndexMap<&'a str, ResolvedStyle<'a>>,
}

/// Zone routing and padding for every visible block of the configured page.
pub fn plan_site(state: &ProjectState, page: &str) -> ExportResult<SitePlan> {
    let blocks = state.page(page)?;
    let sticky_nav = has_sticky_nav(blocks, &state.global_settings);
    let planned = blocks
        .iter()
        .filter(|b| b.is_visible)
        .enumerate()
        .map(|(index, block)| {
            let route = resolve_zone(&block.block_type);
            PlannedBlock {
                id: block.id.clone(),
                block_type: block.block_type.clone(),
                route,
                layout: (route == ZoneRoute::Universal)
                    .then(|| universal_layout(&block.local_overrides)),
                padding: padding_class(index, sticky_nav),
            }
        })
        .collect();
    Ok(SitePlan {
        page: page.to_string(),
        sticky_nav,
        blocks: planned,
    })
}

/// Build the self-contained `index.html` for a project.
pub fn export_site(state: &ProjectState, config: &ExportConfig) -> ExportResult<SiteExport> {
    let plan = plan_site(state, &config.page)?;
    let tokens = DesignTokens::from_settings(&state.global_settings);

    let blocks = state.page(&config.page)?;
    let styles = blocks
        .iter()
        .filter(|b| b.is_visible)
        .map(|b| (b.id.as_str(), resolve_style(b, &state.global_settings)))
        .collect();
    let runtime = RuntimeData {
        contract: runtime_contract(),
        tokens: &tokens,
        sticky_nav: plan.sticky_nav,
        page: &config.page,
        styles,
    };

    let mut html = String::new();
    write_head(&mut html, config, &tokens)?;
    html.push_str("<body>\n<div id=\"root\"></div>\n");
    for src in [&config.cdn.react, &config.cdn.react_dom] {
        writeln!(html, "<script crossorigin src=\"{}\"></script>", escape_html(src))?;
    }
    writeln!(html, "<script src=\"{}\"></script>", escape_html(&config.cdn.framer_motion))?;
    writeln!(
        html,
        "<script>window.__DNA_STATE__ = {};\nwindow.__DNA_RUNTIME__ = {};</script>",
        script_json(state)?,
        script_json(&runtime)?
    )?;
    writeln!(html, "<script>\n{}</script>", SITE_RUNTIME)?;
    html.push_str("</body>\n</html>\n");

    log::info!(
        "exported site for page '{}': {} block(s), {} bytes",
        plan.page,
        plan.blocks.len(),
        html.len()
    );
    Ok(SiteExport { html, plan })
}

fn write_head(out: &mut String, config: &ExportConfig, tokens: &DesignTokens) -> ExportResult<()> {
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    out.push_str("<meta charset=\"UTF-8\">\n");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    writeln!(out, "<title>{}</title>", escape_html(&config.title))?;
    out.push_str("<link rel=\"preconnect\" href=\"https://fonts.googleapis.com\">\n");
    out.push_str("<link rel=\"preconnect\" href=\"https://fonts.gstatic.com\" crossorigin>\n");
    writeln!(
        out,
        "<link href=\"{}\" rel=\"stylesheet\">",
        escape_html(&config.font_url(&tokens.font_query()))
    )?;
    writeln!(out, "<script src=\"{}\"></script>", escape_html(&config.cdn.tailwind))?;
    writeln!(out, "<style>{}{}</style>", token_styles(tokens), BASE_STYLES)?;
    out.push_str("</head>\n");
    Ok(())
}

/// JSON that can sit inside a `<script>` element: nothing in it can close
/// the element or break a JS string literal.
pub fn script_json<T: Serialize + ?Sized>(value: &T) -> ExportResult<String> {
    let json = serde_json::to_string(value)?;
    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        match c {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            _ => out.push(c),
        }
    }
    Ok(out)
}
