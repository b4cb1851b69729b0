//! Closed catalog of block types.
//!
//! Two dispatch strategies share the [`Role`] enum:
//! - [`resolve_role`] is the editor's exact lookup over canonical codes and
//!   legacy aliases.
//! - [`resolve_zone`] is the exporter's coarse lookup on the first three
//!   characters of a code, with a generic layout for anything it does not know.

use crate::block::{OverrideSet, OverrideSection};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    Navbar,
    Hero,
    Skills,
    Article,
    Portfolio,
    Timeline,
    Accordion,
    Stats,
    Spacer,
    Tabs,
    ContactForm,
    Footer,
    Badges,
    Preview,
    Methodology,
    TechStack,
    FeaturedProject,
    ProjectsGrid,
    CodeShowcase,
    Logos,
    Testimonials,
    SocialDock,
}

/// Result of an exact lookup. `Unknown` is a normal outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Role(Role),
    Unknown,
}

impl Resolution {
    pub fn role(self) -> Option<Role> {
        match self {
            Resolution::Role(role) => Some(role),
            Resolution::Unknown => None,
        }
    }
}

/// Result of a zone-prefix lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "role")]
pub enum ZoneRoute {
    Role(Role),
    Universal,
}

pub struct CatalogEntry {
    pub role: Role,
    pub label: &'static str,
    /// Code used when the block is added from the catalog.
    pub code: &'static str,
    pub codes: &'static [&'static str],
    pub aliases: &'static [&'static str],
    /// Sidebar icon name.
    pub icon: &'static str,
}

pub const CATALOG: &[CatalogEntry] = &[
    CatalogEntry { role: Role::Navbar, label: "Navbar", code: "B0101", codes: &["B0101", "B0102"], aliases: &["Navbar"], icon: "layout" },
    CatalogEntry { role: Role::Hero, label: "Hero", code: "B0201", codes: &["B0201", "B0202", "B0203"], aliases: &["Hero"], icon: "image" },
    CatalogEntry { role: Role::Skills, label: "Skills", code: "B0301", codes: &["B0301", "B0302"], aliases: &["Skills"], icon: "grid" },
    CatalogEntry { role: Role::Article, label: "Article", code: "B0401", codes: &["B0401", "B0402"], aliases: &["Article"], icon: "type" },
    CatalogEntry { role: Role::Portfolio, label: "Portfolio", code: "B0501", codes: &["B0501", "B0503"], aliases: &["Portfolio"], icon: "layers" },
    CatalogEntry { role: Role::Timeline, label: "Timeline", code: "B0601", codes: &["B0601", "B0602"], aliases: &["Timeline"], icon: "git-graph" },
    CatalogEntry { role: Role::Accordion, label: "Accordion", code: "B0701", codes: &["B0701"], aliases: &["Accordion"], icon: "square" },
    CatalogEntry { role: Role::Stats, label: "Stats", code: "B0801", codes: &["B0801"], aliases: &["Stats"], icon: "bar-chart" },
    CatalogEntry { role: Role::Spacer, label: "Spacer", code: "B0901", codes: &["B0901"], aliases: &["Spacer"], icon: "move-vertical" },
    CatalogEntry { role: Role::Tabs, label: "Tabs", code: "B1001", codes: &["B1001"], aliases: &["Tabs"], icon: "square" },
    CatalogEntry { role: Role::ContactForm, label: "Contact Form", code: "B1301", codes: &["B1301"], aliases: &["Contact", "ContactForm"], icon: "phone" },
    CatalogEntry { role: Role::Footer, label: "Footer", code: "B1401", codes: &["B1401"], aliases: &["Footer"], icon: "map-pin" },
    CatalogEntry { role: Role::Badges, label: "Badges", code: "B1501", codes: &["B1501"], aliases: &["Badges"], icon: "tags" },
    CatalogEntry { role: Role::Preview, label: "Preview", code: "B1601", codes: &["B1601", "B1602"], aliases: &["Preview"], icon: "monitor" },
    CatalogEntry { role: Role::Methodology, label: "Methodology", code: "B1701", codes: &["B1701"], aliases: &["Methodology"], icon: "square" },
    CatalogEntry { role: Role::TechStack, label: "Tech Stack", code: "B1801", codes: &["B1801"], aliases: &["TechStack"], icon: "square" },
    CatalogEntry { role: Role::FeaturedProject, label: "Featured Project", code: "B1901", codes: &["B1901"], aliases: &["FeaturedProject"], icon: "square" },
    CatalogEntry { role: Role::ProjectsGrid, label: "Projects Grid", code: "B1902", codes: &["B1902"], aliases: &["ProjectsGrid"], icon: "square" },
    CatalogEntry { role: Role::CodeShowcase, label: "Code Showcase", code: "B1903", codes: &["B1903"], aliases: &["CodeShowcase"], icon: "square" },
    CatalogEntry { role: Role::Logos, label: "Logos", code: "B2101", codes: &["B2101"], aliases: &["Logos"], icon: "image" },
    CatalogEntry { role: Role::Testimonials, label: "Testimonials", code: "B2201", codes: &["B2201", "B2202"], aliases: &["Reviews", "Testimonials", "RadarChart"], icon: "message-square" },
    CatalogEntry { role: Role::SocialDock, label: "Social Dock", code: "B2401", codes: &["B2401"], aliases: &["Socials", "SocialDock"], icon: "share-2" },
];

/// Zone prefix -> role, as used by the exported site.
pub const ZONES: &[(&str, Role)] = &[
    ("B01", Role::Navbar),
    ("B02", Role::Hero),
    ("B03", Role::Skills),
    ("B04", Role::Article),
    ("B05", Role::Portfolio),
    ("B06", Role::Timeline),
    ("B07", Role::Accordion),
    ("B08", Role::Stats),
    ("B09", Role::Spacer),
    ("B10", Role::Tabs),
    ("B13", Role::ContactForm),
    ("B14", Role::Footer),
    ("B15", Role::Badges),
    ("B16", Role::Preview),
    ("B17", Role::Methodology),
    ("B18", Role::TechStack),
    ("B21", Role::Logos),
    ("B22", Role::Testimonials),
    ("B24", Role::SocialDock),
];

/// Zones whose role depends on the full code.
pub const VARIANT_ZONE: &str = "B19";
pub const VARIANTS: &[(&str, Role)] = &[
    ("B1901", Role::FeaturedProject),
    ("B1902", Role::ProjectsGrid),
    ("B1903", Role::CodeShowcase),
];

fn lookup_table() -> &'static HashMap<&'static str, Role> {
    static TABLE: OnceLock<HashMap<&'static str, Role>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut table = HashMap::new();
        for entry in CATALOG {
            for key in entry.codes.iter().chain(entry.aliases) {
                table.insert(*key, entry.role);
            }
        }
        table
    })
}

/// Exact, case-sensitive lookup over canonical codes and legacy aliases.
pub fn resolve_role(type_code: &str) -> Resolution {
    match lookup_table().get(type_code) {
        Some(role) => Resolution::Role(*role),
        None => Resolution::Unknown,
    }
}

/// Zone-prefix lookup used by the exported site.
pub fn resolve_zone(type_code: &str) -> ZoneRoute {
    let Some(zone) = type_code.get(..3) else {
        return ZoneRoute::Universal;
    };
    if zone == VARIANT_ZONE {
        return VARIANTS
            .iter()
            .find(|(code, _)| *code == type_code)
            .map(|(_, role)| ZoneRoute::Role(*role))
            .unwrap_or(ZoneRoute::Universal);
    }
    ZONES
        .iter()
        .find(|(prefix, _)| *prefix == zone)
        .map(|(_, role)| ZoneRoute::Role(*role))
        .unwrap_or(ZoneRoute::Universal)
}

impl Role {
    pub fn entry(self) -> &'static CatalogEntry {
        // CATALOG holds exactly one entry per role, in declaration order.
        &CATALOG[self as usize]
    }

    pub fn label(self) -> &'static str {
        self.entry().label
    }

    pub fn all() -> impl Iterator<Item = Role> {
        CATALOG.iter().map(|e| e.role)
    }

    /// Overrides a freshly added block starts with.
    pub fn default_overrides(self) -> OverrideSet {
        let mut overrides = OverrideSet::default();
        let data = match self {
            Role::Navbar => json!({
                "header": "DNA",
                "links": [
                    {"label": "Work", "url": "#work"},
                    {"label": "About", "url": "#about"},
                    {"label": "Contact", "url": "#contact"}
                ]
            }),
            Role::Hero => json!({
                "title": "Design\nWithout Limits",
                "description": "Assemble a page from blocks and ship it as a single file.",
                "primaryBtnVisible": true,
                "primaryBtnText": "Get Started"
            }),
            Role::Skills => json!({
                "title": "Skills",
                "groups": [{"title": "Core", "items": [{"name": "Design", "level": 90}]}]
            }),
            Role::Article => json!({"title": "Article", "body": ""}),
            Role::Portfolio => json!({"title": "Portfolio", "items": []}),
            Role::Timeline => json!({
                "title": "Timeline",
                "items": [{"date": "2024", "title": "Started", "description": ""}]
            }),
            Role::Accordion => json!({
                "title": "FAQ",
                "items": [{"question": "What is this?", "answer": "A block."}]
            }),
            Role::Stats => json!({
                "stats": [{"value": "10+", "label": "Years"}, {"value": "50", "label": "Projects"}]
            }),
            Role::Spacer => Value::Null,
            Role::Tabs => json!({"tabs": [{"label": "Overview", "content": ""}]}),
            Role::ContactForm => json!({"title": "Contact"}),
            Role::Footer => json!({"companyName": "DNA"}),
            Role::Badges => json!({"tags": ["Rust", "Design"]}),
            Role::Preview => json!({"title": "Preview"}),
            Role::Methodology => json!({
                "title": "Process",
                "steps": [{"number": "01", "title": "Research", "description": ""}]
            }),
            Role::TechStack => json!({
                "title": "Stack",
                "categories": [{"name": "Frontend", "color": "#3B82F6", "technologies": ["React"]}]
            }),
            Role::FeaturedProject => json!({"projectName": "Project", "tags": []}),
            Role::ProjectsGrid => json!({"title": "Projects", "projects": []}),
            Role::CodeShowcase => json!({"title": "Code", "snippets": []}),
            Role::Logos => json!({"items": []}),
            Role::Testimonials => json!({"title": "Testimonials", "items": []}),
            Role::SocialDock => json!({"socials": []}),
        };
        if let Value::Object(fields) = data {
            overrides.data = Some(fields);
        }
        if self == Role::Spacer {
            overrides.set(OverrideSection::Layout, "height", json!("120"));
        }
        overrides
    }
}

/// Catalog entry for a canonical code or alias.
pub fn catalog_entry(type_code: &str) -> Option<&'static CatalogEntry> {
    resolve_role(type_code).role().map(Role::entry)
}

/// Sidebar icon for a block type; unknown types get a plain square.
pub fn icon_for(type_code: &str) -> &'static str {
    catalog_entry(type_code).map(|e| e.icon).unwrap_or("square")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_order_matches_role_discriminants() {
        for (index, entry) in CATALOG.iter().enumerate() {
            assert_eq!(entry.role as usize, index, "{:?} out of order", entry.role);
        }
    }

    #[test]
    fn test_codes_and_aliases_resolve_to_one_role() {
        let mut seen = HashMap::new();
        for entry in CATALOG {
            for key in entry.codes.iter().chain(entry.aliases) {
                assert!(seen.insert(*key, entry.role).is_none(), "{} listed twice", key);
            }
        }
    }

    #[test]
    fn test_exact_lookup() {
        assert_eq!(resolve_role("B0203"), Resolution::Role(Role::Hero));
        assert_eq!(resolve_role("Hero"), Resolution::Role(Role::Hero));
        assert_eq!(resolve_role("RadarChart"), Resolution::Role(Role::Testimonials));
        assert_eq!(resolve_role("hero"), Resolution::Unknown);
        assert_eq!(resolve_role("B0204"), Resolution::Unknown);
        assert_eq!(resolve_role("B02"), Resolution::Unknown);
        assert_eq!(resolve_role(""), Resolution::Unknown);
    }

    #[test]
    fn test_zone_lookup() {
        assert_eq!(resolve_zone("B0203"), ZoneRoute::Role(Role::Hero));
        assert_eq!(resolve_zone("B0299"), ZoneRoute::Role(Role::Hero));
        assert_eq!(resolve_zone("B1902"), ZoneRoute::Role(Role::ProjectsGrid));
        assert_eq!(resolve_zone("B1999"), ZoneRoute::Universal);
        assert_eq!(resolve_zone("B9901"), ZoneRoute::Universal);
        assert_eq!(resolve_zone("Hero"), ZoneRoute::Universal);
        assert_eq!(resolve_zone("B0"), ZoneRoute::Universal);
    }

    #[test]
    fn test_canonical_codes_agree_across_strategies() {
        for entry in CATALOG {
            for code in entry.codes {
                assert_eq!(resolve_zone(code), ZoneRoute::Role(entry.role), "{}", code);
            }
        }
    }

    #[test]
    fn test_icons() {
        assert_eq!(icon_for("B0101"), "layout");
        assert_eq!(icon_for("Socials"), "share-2");
        assert_eq!(icon_for("nope"), "square");
    }

    #[test]
    fn test_spacer_defaults_to_layout_height() {
        let overrides = Role::Spacer.default_overrides();
        assert!(overrides.data.is_none());
        assert_eq!(overrides.lookup("layout.height"), Some(&serde_json::json!("120")));
    }
}
