use dnamatrix_blocks::{parse_project, ProjectState, Role, ZoneRoute};
use dnamatrix_blocks::rules::{EXPANDED_PADDING, REGULAR_PADDING};
use dnamatrix_export::{
    export_archive, export_preview, export_site, read_project, write_artifact, ExportConfig,
    ExportError, ExportKind, ExportSession,
};
use pretty_assertions::assert_eq;
use scraper::{Html, Selector};
use sha2::{Digest, Sha256};
use std::fs;
use std::io::{Cursor, Read};
use std::path::PathBuf;

fn get_fixture_path(filename: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(filename);
    path
}

fn fixture_state() -> ProjectState {
    read_project(&get_fixture_path("portfolio-site.json")).unwrap()
}

fn digest(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

fn select_count(html: &str, selector: &str) -> usize {
    let document = Html::parse_document(html);
    let selector = Selector::parse(selector).unwrap();
    document.select(&selector).count()
}

/// The two embedded JSON literals, parsed back.
fn embedded_data(html: &str) -> (serde_json::Value, serde_json::Value) {
    let document = Html::parse_document(html);
    let selector = Selector::parse("script").unwrap();
    let text = document
        .select(&selector)
        .map(|s| s.text().collect::<String>())
        .find(|t| t.starts_with("window.__DNA_STATE__ = "))
        .expect("state script present");
    let rest = text.strip_prefix("window.__DNA_STATE__ = ").unwrap();
    let (state, runtime) = rest.split_once(";\nwindow.__DNA_RUNTIME__ = ").unwrap();
    let runtime = runtime.strip_suffix(';').unwrap();
    (
        serde_json::from_str(state).unwrap(),
        serde_json::from_str(runtime).unwrap(),
    )
}

// Site
#[test]
fn test_empty_project_exports_valid_document() {
    let site = export_site(&ProjectState::new(), &ExportConfig::default()).unwrap();
    assert!(site.plan.blocks.is_empty());
    assert!(!site.plan.sticky_nav);
    assert_eq!(select_count(&site.html, "div#root"), 1);
    assert_eq!(select_count(&site.html, "div#root > *"), 0);
    assert_eq!(select_count(&site.html, "title"), 1);
}

#[test]
fn test_fixture_site_plan() {
    let state = fixture_state();
    let site = export_site(&state, &ExportConfig::default()).unwrap();
    let plan = &site.plan;
    assert!(plan.sticky_nav);

    let routes: Vec<_> = plan
        .blocks
        .iter()
        .map(|b| (b.id.as_str(), b.route))
        .collect();
    assert_eq!(
        routes,
        vec![
            ("nav-7f3c2a91", ZoneRoute::Role(Role::Navbar)),
            ("hero-0b1d44e2", ZoneRoute::Role(Role::Hero)),
            ("skills-5e6f7a8b", ZoneRoute::Universal),
            ("legacy-9c8d7e6f", ZoneRoute::Universal),
            ("reviews-44aa55bb", ZoneRoute::Universal),
            ("footer-31415926", ZoneRoute::Role(Role::Footer)),
        ]
    );
    assert_eq!(plan.blocks[0].padding, REGULAR_PADDING);
    assert_eq!(plan.blocks[1].padding, EXPANDED_PADDING);
    assert_eq!(plan.blocks[2].padding, REGULAR_PADDING);
}

#[test]
fn test_embedded_state_round_trips() {
    let state = fixture_state();
    let site = export_site(&state, &ExportConfig::default()).unwrap();
    let (embedded, runtime) = embedded_data(&site.html);

    let embedded: ProjectState = serde_json::from_value(embedded).unwrap();
    assert_eq!(embedded, state);

    assert_eq!(runtime["page"], "home");
    assert_eq!(runtime["stickyNav"], true);
    assert_eq!(runtime["contract"]["zones"]["B02"], "hero");
    assert_eq!(runtime["styles"]["hero-0b1d44e2"]["backgroundColor"], "#111");
    assert_eq!(runtime["styles"]["reviews-44aa55bb"]["backgroundColor"], "#0A0A0A");
    assert!(runtime["styles"].get("hidden-1a2b3c4d").is_none());
}

#[test]
fn test_site_head_uses_tokens() {
    let site = export_site(&fixture_state(), &ExportConfig::default()).unwrap();
    let document = Html::parse_document(&site.html);
    let link = Selector::parse("link[rel=stylesheet]").unwrap();
    let href = document.select(&link).next().unwrap().value().attr("href").unwrap();
    assert!(href.contains("family=Space+Grotesk:wght@300;400;700;900"));

    let style = Selector::parse("style").unwrap();
    let css: String = document.select(&style).next().unwrap().text().collect();
    assert!(css.starts_with(":root{--dna-bg:#050505;--dna-text:#FFFFFF;--dna-accent:#FF3366;"));
    assert!(css.contains("--dna-radius:16px;"));
}

#[test]
fn test_script_breakout_is_escaped() {
    let state = parse_project(
        r#"{"pages": {"home": [{"id": "h", "type": "B0201", "localOverrides": {"data": {"title": "</script><script>alert(1)</script>"}}}]}}"#,
    )
    .unwrap();
    let site = export_site(&state, &ExportConfig::default()).unwrap();
    assert!(!site.html.contains("</script><script>alert"));
    // tailwind, react, react-dom, framer-motion, data, runtime
    assert_eq!(select_count(&site.html, "script"), 6);

    let (embedded, _) = embedded_data(&site.html);
    assert_eq!(
        embedded["pages"]["home"][0]["localOverrides"]["data"]["title"],
        "</script><script>alert(1)</script>"
    );
}

#[test]
fn test_repeated_exports_are_byte_identical() {
    let state = fixture_state();
    let config = ExportConfig::default();

    let first = export_site(&state, &config).unwrap().html;
    let second = export_site(&state, &config).unwrap().html;
    assert_eq!(digest(first.as_bytes()), digest(second.as_bytes()));

    let first = export_archive(&state).unwrap();
    let second = export_archive(&state).unwrap();
    assert_eq!(digest(&first), digest(&second));
}

#[test]
fn test_unknown_page_is_an_error() {
    let config = ExportConfig {
        page: "blog".to_string(),
        ..ExportConfig::default()
    };
    let result = export_site(&fixture_state(), &config);
    assert!(matches!(result.unwrap_err(), ExportError::Project(_)));
}

// Archive
#[test]
fn test_archive_project_data_matches_json_export() {
    let state = fixture_state();
    let bytes = export_archive(&state).unwrap();
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut project_data = String::new();
    archive
        .by_name("project-data.json")
        .unwrap()
        .read_to_string(&mut project_data)
        .unwrap();
    assert_eq!(project_data, state.to_json().unwrap());
    assert_eq!(archive.len(), 12);
}

// Preview
#[test]
fn test_preview_renders_visible_blocks() {
    let html = export_preview(&fixture_state(), &ExportConfig::default()).unwrap();
    assert_eq!(select_count(&html, "main > div.dna-block"), 6);
    assert_eq!(select_count(&html, "#hidden-1a2b3c4d"), 0);
    assert_eq!(select_count(&html, "#legacy-9c8d7e6f .dna-lost-node"), 1);
}

// Session
#[test]
fn test_session_writes_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let state = fixture_state();
    let config = ExportConfig::default();
    let session = ExportSession::new();

    for kind in [ExportKind::Site, ExportKind::Archive, ExportKind::Json, ExportKind::Preview] {
        let artifact = session.export(kind, &state, &config).unwrap();
        write_artifact(dir.path(), &artifact).unwrap();
        assert!(!session.is_running());
    }

    let mut names: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(
        names,
        vec!["dna-matrix-react-project.zip", "dna-project.json", "index.html", "preview.html"]
    );

    let reloaded = read_project(&dir.path().join("dna-project.json")).unwrap();
    assert_eq!(reloaded, state);
}

#[test]
fn test_session_refuses_concurrent_export() {
    let session = ExportSession::new();
    let state = fixture_state();
    let config = ExportConfig::default();

    let nested = session.run(ExportKind::Site, || {
        session.export(ExportKind::Archive, &state, &config)
    });
    assert!(matches!(nested.unwrap_err(), ExportError::ExportInProgress));
    assert!(!session.is_running());
}
