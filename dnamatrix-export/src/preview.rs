//! Static snapshot of a page as the live renderer draws it. No runtime, no
//! animation: useful for reviewing a project without a browser JS engine.
//!
//! Output bytes depend on the year unless `ExportConfig::year` pins it.

use crate::config::ExportConfig;
use crate::error::ExportResult;
use crate::styles::{token_styles, BASE_STYLES};
use dnamatrix_blocks::view::escape_html;
use dnamatrix_blocks::render::render_page;
use dnamatrix_blocks::{DesignTokens, ProjectState, RenderContext};
use std::fmt::Write;

pub fn export_preview(state: &ProjectState, config: &ExportConfig) -> ExportResult<String> {
    let blocks = state.page(&config.page)?;
    let mut ctx = RenderContext::for_page(blocks, &state.global_settings);
    if let Some(year) = config.year {
        ctx = ctx.with_year(year);
    }
    let mut body = String::new();
    for node in render_page(blocks, &ctx) {
        node.write_html(&mut body)?;
    }
    let tokens = DesignTokens::from_settings(&state.global_settings);

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n");
    writeln!(html, "<title>{} (preview)</title>", escape_html(&config.title))?;
    writeln!(
        html,
        "<link href=\"{}\" rel=\"stylesheet\">",
        escape_html(&config.font_url(&tokens.font_query()))
    )?;
    writeln!(html, "<script src=\"{}\"></script>", escape_html(&config.cdn.tailwind))?;
    writeln!(html, "<style>{}{}</style>", token_styles(&tokens), BASE_STYLES)?;
    html.push_str("</head>\n<body>\n<main>");
    html.push_str(&body);
    html.push_str("</main>\n</body>\n</html>\n");
    Ok(html)
}
