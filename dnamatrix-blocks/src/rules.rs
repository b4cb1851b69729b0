//! Role rendering rules: field names, fallback chains, collection fields,
//! padding and reveal presets for every role.
//!
//! The live renderer reads these tables directly. The exported site receives
//! them serialized as [`RuntimeContract`] so both renderers resolve every
//! field the same way.
//!
//! Paths on a block are `section.key` (`data.title`, `media.imageUrl`).
//! Paths on a collection item are plain keys, with `.` meaning the item
//! itself and an `@initial` suffix taking the first character.

use crate::block::OverrideSet;
use crate::registry::{Role, VARIANTS, VARIANT_ZONE, ZONES};
use crate::value::{as_text, present};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use std::borrow::Cow;

pub const EXPANDED_PADDING: &str = "pt-32 pb-24";
pub const REGULAR_PADDING: &str = "py-24";

/// Top padding for the block at `index` among visible blocks.
/// The first content block gets the expanded padding; with a sticky navbar
/// that is the block right after it.
pub fn padding_class(index: usize, sticky_nav: bool) -> &'static str {
    let first_block = index == 0 && !sticky_nav;
    let after_sticky = index == 1 && sticky_nav;
    if first_block || after_sticky {
        EXPANDED_PADDING
    } else {
        REGULAR_PADDING
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Reveal {
    None,
    Fade,
    FadeUp,
    Rise,
    ScaleIn,
    SlideIn,
}

/// Starting frame of a reveal animation. The end frame is always the
/// element's natural state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RevealFrame {
    pub opacity: f64,
    pub x: f64,
    pub y: f64,
    pub scale: f64,
}

impl Reveal {
    pub const ALL: [Reveal; 6] = [
        Reveal::None,
        Reveal::Fade,
        Reveal::FadeUp,
        Reveal::Rise,
        Reveal::ScaleIn,
        Reveal::SlideIn,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Reveal::None => "none",
            Reveal::Fade => "fade",
            Reveal::FadeUp => "fade-up",
            Reveal::Rise => "rise",
            Reveal::ScaleIn => "scale-in",
            Reveal::SlideIn => "slide-in",
        }
    }

    pub fn initial(self) -> Option<RevealFrame> {
        let frame = |x: f64, y: f64, scale: f64| RevealFrame { opacity: 0.0, x, y, scale };
        match self {
            Reveal::None => None,
            Reveal::Fade => Some(frame(0.0, 0.0, 1.0)),
            Reveal::FadeUp => Some(frame(0.0, 20.0, 1.0)),
            Reveal::Rise => Some(frame(0.0, 30.0, 1.0)),
            Reveal::ScaleIn => Some(frame(0.0, 0.0, 0.95)),
            Reveal::SlideIn => Some(frame(-20.0, 0.0, 1.0)),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FieldRule {
    pub slot: &'static str,
    pub paths: &'static [&'static str],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct CollectionRule {
    pub slot: &'static str,
    pub paths: &'static [&'static str],
    pub fields: &'static [FieldRule],
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    pub nested: &'static [CollectionRule],
}

#[derive(Debug, Serialize)]
pub struct RoleRules {
    pub fields: &'static [FieldRule],
    pub collections: &'static [CollectionRule],
    /// Whether the role takes the section padding class.
    pub padded: bool,
    pub reveal: Reveal,
    /// Delay between consecutive collection entries, in seconds.
    pub stagger: f64,
}

/// What a path is resolved against.
#[derive(Debug, Clone, Copy)]
pub enum Scope<'a> {
    Block(&'a OverrideSet),
    Item(&'a Value),
}

impl<'a> Scope<'a> {
    pub fn get(self, path: &str) -> Option<&'a Value> {
        match self {
            Scope::Block(overrides) => overrides.lookup(path),
            Scope::Item(item) if path == "." => Some(item),
            Scope::Item(item) => item.get(path),
        }
    }
}

impl FieldRule {
    /// First truthy scalar along the path chain, else the fallback.
    pub fn resolve<'a>(&self, scope: Scope<'a>) -> Option<Cow<'a, str>> {
        for path in self.paths {
            let (path, modifier) = match path.split_once('@') {
                Some((path, modifier)) => (path, Some(modifier)),
                None => (*path, None),
            };
            let Some(text) = present(scope.get(path)).and_then(as_text) else {
                continue;
            };
            match modifier {
                Some("initial") => match text.chars().next() {
                    Some(c) => return Some(Cow::Owned(c.to_string())),
                    None => continue,
                },
                _ => return Some(text),
            }
        }
        self.fallback.map(Cow::Borrowed)
    }

    /// Whether any path holds a truthy value. Fallbacks do not count.
    pub fn is_set(&self, scope: Scope<'_>) -> bool {
        self.paths
            .iter()
            .any(|p| present(scope.get(p.split('@').next().unwrap_or(p))).is_some())
    }
}

impl CollectionRule {
    /// Entries of the first truthy path, in order. A non-array value yields
    /// no entries.
    pub fn items<'a>(&self, scope: Scope<'a>) -> std::slice::Iter<'a, Value> {
        let found = self.paths.iter().find_map(|p| present(scope.get(p)));
        let slice: &'a [Value] = match found {
            Some(Value::Array(items)) => items.as_slice(),
            _ => &[],
        };
        slice.iter()
    }

    /// The first truthy value along the paths, whatever its shape.
    pub fn raw<'a>(&self, scope: Scope<'a>) -> Option<&'a Value> {
        self.paths.iter().find_map(|p| present(scope.get(p)))
    }

    pub fn text<'a>(&self, item: &'a Value, slot: &str) -> Option<Cow<'a, str>> {
        find_field(self.fields, slot)?.resolve(Scope::Item(item))
    }

    pub fn flag(&self, item: &Value, slot: &str) -> bool {
        find_field(self.fields, slot).is_some_and(|f| f.is_set(Scope::Item(item)))
    }

    pub fn nested(&self, slot: &str) -> Option<&'static CollectionRule> {
        let nested: &'static [CollectionRule] = self.nested;
        nested.iter().find(|c| c.slot == slot)
    }
}

impl RoleRules {
    pub fn text<'a>(&self, overrides: &'a OverrideSet, slot: &str) -> Option<Cow<'a, str>> {
        find_field(self.fields, slot)?.resolve(Scope::Block(overrides))
    }

    pub fn flag(&self, overrides: &OverrideSet, slot: &str) -> bool {
        find_field(self.fields, slot).is_some_and(|f| f.is_set(Scope::Block(overrides)))
    }

    pub fn collection(&self, slot: &str) -> Option<&'static CollectionRule> {
        let collections: &'static [CollectionRule] = self.collections;
        collections.iter().find(|c| c.slot == slot)
    }
}

fn find_field<'r>(fields: &'r [FieldRule], slot: &str) -> Option<&'r FieldRule> {
    let found = fields.iter().find(|f| f.slot == slot);
    if found.is_none() {
        log::debug!("no rule for slot '{}'", slot);
    }
    found
}

macro_rules! field {
    ($slot:literal, [$($path:literal),+ $(,)?]) => {
        FieldRule { slot: $slot, paths: &[$($path),+], fallback: None }
    };
    ($slot:literal, [$($path:literal),+ $(,)?], $fallback:literal) => {
        FieldRule { slot: $slot, paths: &[$($path),+], fallback: Some($fallback) }
    };
}

macro_rules! collection {
    ($slot:literal, [$($path:literal),+ $(,)?], [$($field:expr),* $(,)?]) => {
        CollectionRule { slot: $slot, paths: &[$($path),+], fields: &[$($field),*], nested: &[] }
    };
    ($slot:literal, [$($path:literal),+ $(,)?], [$($field:expr),* $(,)?], [$($nested:expr),+ $(,)?]) => {
        CollectionRule { slot: $slot, paths: &[$($path),+], fields: &[$($field),*], nested: &[$($nested),+] }
    };
}

static NAVBAR: RoleRules = RoleRules {
    fields: &[field!("brand", ["data.header", "data.logoText"], "DNA")],
    collections: &[collection!(
        "links",
        ["data.links"],
        [field!("label", ["label", "text"]), field!("url", ["url"], "#")]
    )],
    padded: false,
    reveal: Reveal::None,
    stagger: 0.0,
};

static HERO: RoleRules = RoleRules {
    fields: &[
        field!("title", ["data.title"]),
        field!("description", ["data.description"]),
        field!("primaryVisible", ["data.primaryBtnVisible"]),
        field!("primaryText", ["data.primaryBtnText"], "Get Started"),
        field!("secondaryVisible", ["data.secondaryBtnVisible"]),
        field!("secondaryText", ["data.secondaryBtnText"], "Learn More"),
        field!("showImage", ["media.showImage"]),
        field!("image", ["media.imageUrl"]),
        field!("shape", ["media.shape"], "auto"),
        field!("levitation", ["media.levitation"]),
        field!("levitationSpeed", ["media.levitationSpeed"], "3"),
    ],
    collections: &[],
    padded: true,
    reveal: Reveal::Rise,
    stagger: 0.0,
};

static SKILLS: RoleRules = RoleRules {
    fields: &[
        field!("title", ["data.title"]),
        field!("description", ["data.description"]),
        field!("grid", ["layout.grid"]),
        field!("hidePercentages", ["data.hidePercentages"]),
    ],
    collections: &[collection!(
        "groups",
        ["data.groups"],
        [field!("title", ["title"])],
        [collection!(
            "items",
            ["items"],
            [field!("name", ["name"]), field!("level", ["level"], "0")]
        )]
    )],
    padded: true,
    reveal: Reveal::FadeUp,
    stagger: 0.1,
};

static ARTICLE: RoleRules = RoleRules {
    fields: &[
        field!("title", ["data.title"]),
        field!("subtitle", ["data.subtitle"]),
        field!("body", ["data.body"]),
    ],
    collections: &[collection!(
        "sections",
        ["data.sections"],
        [field!("title", ["title"]), field!("content", ["content"])]
    )],
    padded: true,
    reveal: Reveal::Fade,
    stagger: 0.1,
};

static PORTFOLIO: RoleRules = RoleRules {
    fields: &[
        field!("title", ["data.title"]),
        field!("subtitle", ["data.subtitle"]),
        field!("columns", ["layout.columns"], "3"),
    ],
    collections: &[collection!(
        "items",
        ["data.items"],
        [
            field!("image", ["url", "src", "imageUrl"]),
            field!("title", ["title"]),
            field!("alt", ["title"], "Portfolio item"),
            field!("link", ["link"]),
            field!("showPlayButton", ["showPlayButton"]),
        ]
    )],
    padded: true,
    reveal: Reveal::ScaleIn,
    stagger: 0.1,
};

static TIMELINE: RoleRules = RoleRules {
    fields: &[
        field!("title", ["data.title"]),
        field!("scrollPath", ["layout.scrollPath"], "vertical"),
    ],
    collections: &[collection!(
        "items",
        ["data.items"],
        [
            field!("date", ["date", "year"]),
            field!("title", ["title"]),
            field!("description", ["desc", "description", "content"]),
        ]
    )],
    padded: true,
    reveal: Reveal::FadeUp,
    stagger: 0.1,
};

static ACCORDION: RoleRules = RoleRules {
    fields: &[field!("title", ["data.title"], "FAQ")],
    collections: &[collection!(
        "items",
        ["data.items"],
        [field!("question", ["question", "title"]), field!("answer", ["answer", "content"])]
    )],
    padded: true,
    reveal: Reveal::Fade,
    stagger: 0.0,
};

static STATS: RoleRules = RoleRules {
    fields: &[field!("columns", ["layout.columns"], "3")],
    collections: &[collection!(
        "stats",
        ["data.stats", "data.items"],
        [field!("value", ["value"]), field!("label", ["label"])]
    )],
    padded: true,
    reveal: Reveal::FadeUp,
    stagger: 0.1,
};

static SPACER: RoleRules = RoleRules {
    fields: &[field!("height", ["layout.height"], "120")],
    collections: &[],
    padded: false,
    reveal: Reveal::None,
    stagger: 0.0,
};

static TABS: RoleRules = RoleRules {
    fields: &[],
    collections: &[collection!(
        "tabs",
        ["data.tabs", "data.items"],
        [field!("label", ["label", "title"]), field!("content", ["content", "text"])]
    )],
    padded: true,
    reveal: Reveal::FadeUp,
    stagger: 0.0,
};

static CONTACT_FORM: RoleRules = RoleRules {
    fields: &[
        field!("title", ["data.title"], "Contact"),
        field!("subtitle", ["data.subtitle"]),
        field!("messageRows", ["layout.messageRows"], "5"),
    ],
    collections: &[],
    padded: true,
    reveal: Reveal::Fade,
    stagger: 0.0,
};

static FOOTER: RoleRules = RoleRules {
    fields: &[
        field!("name", ["data.companyName", "data.title"], "DNA"),
        field!("tagline", ["data.tagline"]),
        field!("copyright", ["data.copyright"], "© {year} All rights reserved"),
    ],
    collections: &[collection!(
        "links",
        ["data.links", "data.footerLinks"],
        [field!("label", ["label", "text"]), field!("url", ["url"], "#")]
    )],
    padded: false,
    reveal: Reveal::None,
    stagger: 0.0,
};

static BADGES: RoleRules = RoleRules {
    fields: &[],
    collections: &[collection!(
        "tags",
        ["data.tags", "data.badges", "data.items"],
        [field!("label", ["name", "label", "."])]
    )],
    padded: true,
    reveal: Reveal::ScaleIn,
    stagger: 0.05,
};

static PREVIEW: RoleRules = RoleRules {
    fields: &[
        field!("title", ["data.title"]),
        field!("url", ["data.previewUrl", "data.url", "media.imageUrl"]),
    ],
    collections: &[],
    padded: true,
    reveal: Reveal::Rise,
    stagger: 0.0,
};

static METHODOLOGY: RoleRules = RoleRules {
    fields: &[field!("title", ["data.title"])],
    collections: &[collection!(
        "steps",
        ["data.steps"],
        [
            field!("number", ["number"]),
            field!("title", ["title"]),
            field!("description", ["description"]),
        ]
    )],
    padded: true,
    reveal: Reveal::SlideIn,
    stagger: 0.1,
};

static TECH_STACK: RoleRules = RoleRules {
    fields: &[field!("title", ["data.title"])],
    collections: &[collection!(
        "categories",
        ["data.categories"],
        [field!("name", ["name"]), field!("color", ["color"])],
        [collection!("technologies", ["technologies"], [field!("label", ["."])])]
    )],
    padded: true,
    reveal: Reveal::FadeUp,
    stagger: 0.05,
};

static FEATURED_PROJECT: RoleRules = RoleRules {
    fields: &[
        field!("name", ["data.projectName"], "Project"),
        field!("description", ["data.description"]),
        field!("image", ["data.image"]),
        field!("liveUrl", ["data.liveUrl"]),
        field!("githubUrl", ["data.githubUrl"]),
    ],
    collections: &[collection!("tags", ["data.tags"], [field!("label", ["."])])],
    padded: true,
    reveal: Reveal::None,
    stagger: 0.0,
};

static PROJECTS_GRID: RoleRules = RoleRules {
    fields: &[field!("title", ["data.title"], "Projects")],
    collections: &[collection!(
        "projects",
        ["data.projects"],
        [
            field!("name", ["name"]),
            field!("description", ["description"]),
            field!("image", ["image"]),
        ]
    )],
    padded: true,
    reveal: Reveal::None,
    stagger: 0.0,
};

static CODE_SHOWCASE: RoleRules = RoleRules {
    fields: &[field!("title", ["data.title"], "Code")],
    collections: &[collection!(
        "snippets",
        ["data.snippets"],
        [field!("title", ["title"]), field!("code", ["code"])]
    )],
    padded: true,
    reveal: Reveal::None,
    stagger: 0.0,
};

static LOGOS: RoleRules = RoleRules {
    fields: &[],
    collections: &[collection!(
        "items",
        ["data.items", "data.logos"],
        [field!("label", ["name", "label", "."])]
    )],
    padded: true,
    reveal: Reveal::Fade,
    stagger: 0.1,
};

static TESTIMONIALS: RoleRules = RoleRules {
    fields: &[
        field!("title", ["data.title"]),
        field!("columns", ["layout.columns"], "2"),
    ],
    collections: &[collection!(
        "items",
        ["data.items", "data.testimonials", "data.reviews"],
        [
            field!("quote", ["quote", "text", "content"]),
            field!("avatar", ["avatar"]),
            field!("name", ["name"], "Anonymous"),
            field!("role", ["role", "position"], "Customer"),
        ]
    )],
    padded: true,
    reveal: Reveal::FadeUp,
    stagger: 0.0,
};

static SOCIAL_DOCK: RoleRules = RoleRules {
    fields: &[],
    collections: &[collection!(
        "socials",
        ["data.socials", "data.links", "data.items"],
        [field!("url", ["url"], "#"), field!("glyph", ["icon", "name@initial"], "•")]
    )],
    padded: true,
    reveal: Reveal::ScaleIn,
    stagger: 0.05,
};

/// Generic layout for zones the exported site does not know.
pub static UNIVERSAL: RoleRules = RoleRules {
    fields: &[
        field!("title", ["data.title"]),
        field!("description", ["data.description"]),
        field!("showImage", ["media.showImage"]),
        field!("image", ["media.imageUrl"]),
        field!("shape", ["media.shape"], "auto"),
    ],
    collections: &[collection!(
        "items",
        ["data.items", "data.sections"],
        [
            field!("title", ["title", "name"]),
            field!("description", ["description", "content", "desc"]),
        ]
    )],
    padded: true,
    reveal: Reveal::Fade,
    stagger: 0.1,
};

pub fn rules_for(role: Role) -> &'static RoleRules {
    match role {
        Role::Navbar => &NAVBAR,
        Role::Hero => &HERO,
        Role::Skills => &SKILLS,
        Role::Article => &ARTICLE,
        Role::Portfolio => &PORTFOLIO,
        Role::Timeline => &TIMELINE,
        Role::Accordion => &ACCORDION,
        Role::Stats => &STATS,
        Role::Spacer => &SPACER,
        Role::Tabs => &TABS,
        Role::ContactForm => &CONTACT_FORM,
        Role::Footer => &FOOTER,
        Role::Badges => &BADGES,
        Role::Preview => &PREVIEW,
        Role::Methodology => &METHODOLOGY,
        Role::TechStack => &TECH_STACK,
        Role::FeaturedProject => &FEATURED_PROJECT,
        Role::ProjectsGrid => &PROJECTS_GRID,
        Role::CodeShowcase => &CODE_SHOWCASE,
        Role::Logos => &LOGOS,
        Role::Testimonials => &TESTIMONIALS,
        Role::SocialDock => &SOCIAL_DOCK,
    }
}

/// Which generic layout an unknown zone degrades to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum UniversalLayout {
    Grid,
    Split,
    Centered,
}

/// Grid when a collection is present, image/text split when media is shown,
/// centered text otherwise.
pub fn universal_layout(overrides: &OverrideSet) -> UniversalLayout {
    let has_items = UNIVERSAL
        .collection("items")
        .is_some_and(|c| c.items(Scope::Block(overrides)).len() > 0);
    if has_items {
        UniversalLayout::Grid
    } else if UNIVERSAL.flag(overrides, "showImage") && UNIVERSAL.flag(overrides, "image") {
        UniversalLayout::Split
    } else {
        UniversalLayout::Centered
    }
}

#[derive(Debug, Serialize)]
pub struct PaddingClasses {
    pub expanded: &'static str,
    pub regular: &'static str,
}

/// Everything the exported site needs to render blocks the same way.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeContract {
    pub roles: IndexMap<Role, &'static RoleRules>,
    pub universal: &'static RoleRules,
    pub zones: IndexMap<&'static str, Role>,
    pub variant_zone: &'static str,
    pub variants: IndexMap<&'static str, Role>,
    pub padding: PaddingClasses,
    pub reveal: IndexMap<&'static str, RevealFrame>,
}

pub fn runtime_contract() -> RuntimeContract {
    RuntimeContract {
        roles: Role::all().map(|role| (role, rules_for(role))).collect(),
        universal: &UNIVERSAL,
        zones: ZONES.iter().copied().collect(),
        variant_zone: VARIANT_ZONE,
        variants: VARIANTS.iter().copied().collect(),
        padding: PaddingClasses {
            expanded: EXPANDED_PADDING,
            regular: REGULAR_PADDING,
        },
        reveal: Reveal::ALL
            .iter()
            .filter_map(|r| r.initial().map(|frame| (r.name(), frame)))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::OverrideSection;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn overrides(raw: Value) -> OverrideSet {
        serde_json::from_value(raw).unwrap()
    }

    #[test]
    fn test_padding_adjacency() {
        assert_eq!(padding_class(0, false), EXPANDED_PADDING);
        assert_eq!(padding_class(1, false), REGULAR_PADDING);
        assert_eq!(padding_class(0, true), REGULAR_PADDING);
        assert_eq!(padding_class(1, true), EXPANDED_PADDING);
        assert_eq!(padding_class(2, true), REGULAR_PADDING);
    }

    #[test]
    fn test_fallback_chain_order() {
        let nav = rules_for(Role::Navbar);
        let both = overrides(json!({"data": {"header": "Head", "logoText": "Logo"}}));
        let logo = overrides(json!({"data": {"header": "", "logoText": "Logo"}}));
        assert_eq!(nav.text(&both, "brand").as_deref(), Some("Head"));
        assert_eq!(nav.text(&logo, "brand").as_deref(), Some("Logo"));
        assert_eq!(nav.text(&OverrideSet::default(), "brand").as_deref(), Some("DNA"));
    }

    #[test]
    fn test_absent_field_without_fallback_is_none() {
        let hero = rules_for(Role::Hero);
        assert_eq!(hero.text(&OverrideSet::default(), "title"), None);
        assert!(!hero.flag(&OverrideSet::default(), "primaryVisible"));
    }

    #[test]
    fn test_collection_chain_and_order() {
        let stats = rules_for(Role::Stats).collection("stats").unwrap();
        let o = overrides(json!({"data": {"items": [{"value": "1"}, {"value": "2"}]}}));
        let values: Vec<_> = stats
            .items(Scope::Block(&o))
            .map(|item| stats.text(item, "value").unwrap().into_owned())
            .collect();
        assert_eq!(values, vec!["1", "2"]);
    }

    #[test]
    fn test_non_array_collection_yields_nothing() {
        let stats = rules_for(Role::Stats).collection("stats").unwrap();
        let o = overrides(json!({"data": {"stats": "oops"}}));
        assert_eq!(stats.items(Scope::Block(&o)).count(), 0);
        assert_eq!(stats.raw(Scope::Block(&o)), Some(&json!("oops")));
    }

    #[test]
    fn test_scalar_items_and_initial_modifier() {
        let badges = rules_for(Role::Badges).collection("tags").unwrap();
        assert_eq!(badges.text(&json!("Rust"), "label").as_deref(), Some("Rust"));
        assert_eq!(badges.text(&json!({"label": "Go"}), "label").as_deref(), Some("Go"));

        let socials = rules_for(Role::SocialDock).collection("socials").unwrap();
        assert_eq!(socials.text(&json!({"name": "github"}), "glyph").as_deref(), Some("g"));
        assert_eq!(socials.text(&json!({"icon": "X", "name": "x"}), "glyph").as_deref(), Some("X"));
        assert_eq!(socials.text(&json!({"name": ""}), "glyph").as_deref(), Some("•"));
        assert_eq!(socials.text(&json!({}), "url").as_deref(), Some("#"));
    }

    #[test]
    fn test_numeric_field_text() {
        let skills = rules_for(Role::Skills).collection("groups").unwrap();
        let items = skills.nested("items").unwrap();
        assert_eq!(items.text(&json!({"level": 85}), "level").as_deref(), Some("85"));
    }

    #[test]
    fn test_universal_layouts() {
        let mut o = OverrideSet::default();
        assert_eq!(universal_layout(&o), UniversalLayout::Centered);
        o.set(OverrideSection::Media, "showImage", json!(true));
        assert_eq!(universal_layout(&o), UniversalLayout::Centered);
        o.set(OverrideSection::Media, "imageUrl", json!("a.png"));
        assert_eq!(universal_layout(&o), UniversalLayout::Split);
        o.set(OverrideSection::Data, "sections", json!([{"title": "x"}]));
        assert_eq!(universal_layout(&o), UniversalLayout::Grid);
    }

    #[test]
    fn test_runtime_contract_shape() {
        let contract = serde_json::to_value(runtime_contract()).unwrap();
        assert_eq!(contract["zones"]["B02"], json!("hero"));
        assert_eq!(contract["variants"]["B1903"], json!("codeShowcase"));
        assert_eq!(contract["padding"]["expanded"], json!(EXPANDED_PADDING));
        assert_eq!(contract["roles"]["navbar"]["fields"][0]["fallback"], json!("DNA"));
        assert_eq!(contract["roles"]["hero"]["reveal"], json!("rise"));
        assert_eq!(contract["reveal"]["fade-up"]["y"], json!(20.0));
        assert!(contract["reveal"].get("none").is_none());
    }

    #[test]
    fn test_every_role_has_rules() {
        for role in Role::all() {
            let rules = rules_for(role);
            for c in rules.collections {
                assert!(!c.paths.is_empty(), "{:?}.{} has no paths", role, c.slot);
            }
        }
    }
}
