//! Live block renderer.
//!
//! Dispatch is the registry's exact lookup. Types it does not know render the
//! "Lost Node" diagnostic instead of failing, so old projects keep opening as
//! the catalog grows.

mod content;
mod header;
mod showcase;

use crate::block::Block;
use crate::registry::{resolve_role, Resolution, Role};
use crate::rules::{padding_class, rules_for, CollectionRule, Reveal, RoleRules, Scope};
use crate::settings::{css_value, GlobalSettingsTable};
use crate::style::{has_sticky_nav, resolve_style, ResolvedStyle};
use crate::view::{Element, ViewNode};
use chrono::Datelike;
use serde_json::Value;
use std::borrow::Cow;

pub const SECTION_BORDER: &str = "border-b border-white/5";
pub const HEADING_CLASS: &str = "text-4xl md:text-5xl font-black uppercase";

/// Page-level facts every block render needs.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub settings: &'a GlobalSettingsTable,
    /// Block currently selected in the editor. Never reaches exported output.
    pub selected: Option<&'a str>,
    /// Whether a visible sticky navbar sits on the page.
    pub sticky_nav: bool,
    /// Year substituted into the default footer copyright.
    pub year: i32,
}

impl<'a> RenderContext<'a> {
    pub fn new(settings: &'a GlobalSettingsTable) -> Self {
        Self {
            settings,
            selected: None,
            sticky_nav: false,
            year: chrono::Local::now().year(),
        }
    }

    /// Context for a page, deriving the sticky-navbar flag from its blocks.
    pub fn for_page(blocks: &[Block], settings: &'a GlobalSettingsTable) -> Self {
        Self {
            sticky_nav: has_sticky_nav(blocks, settings),
            ..Self::new(settings)
        }
    }

    pub fn with_selection(mut self, selected: Option<&'a str>) -> Self {
        self.selected = selected;
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = year;
        self
    }
}

/// Render every visible block of a page, in order.
pub fn render_page(blocks: &[Block], ctx: &RenderContext<'_>) -> Vec<ViewNode> {
    blocks
        .iter()
        .filter(|b| b.is_visible)
        .enumerate()
        .map(|(index, block)| {
            let style = resolve_style(block, ctx.settings);
            render_block(block, &style, index, ctx)
        })
        .collect()
}

/// Render one block wrapped in its styled container.
pub fn render_block(
    block: &Block,
    style: &ResolvedStyle<'_>,
    index: usize,
    ctx: &RenderContext<'_>,
) -> ViewNode {
    let content = match resolve_role(&block.block_type) {
        Resolution::Role(role) => {
            let view = BlockView {
                block,
                rules: rules_for(role),
                padding: padding_class(index, ctx.sticky_nav),
                sticky: style.is_sticky,
                year: ctx.year,
            };
            render_role(role, &view)
        }
        Resolution::Unknown => {
            log::warn!(
                "unknown block type '{}' on block {}",
                block.block_type,
                block.short_id()
            );
            lost_node(block)
        }
    };

    let selected = ctx.selected == Some(block.id.as_str());
    let mut css = format!(
        "position:{};background-color:{};",
        style.position.as_css(),
        css_value(&style.background_color)
    );
    if style.is_sticky {
        css.push_str(&format!("top:0;z-index:{};", style.z_index));
    } else if selected {
        css.push_str("z-index:20;");
    }
    if let Some(color) = style.text_color {
        css.push_str(&format!("color:{};", css_value(color)));
    }

    let mut wrapper = Element::new("div")
        .attr("id", block.id.as_str())
        .attr("data-block-type", block.block_type.as_str())
        .class(if selected {
            "relative group dna-block dna-block-selected"
        } else {
            "relative group dna-block"
        })
        .style(css);
    if let Some(class) = style.pattern_class() {
        wrapper = wrapper.child(Element::new("div").class(class));
    }
    wrapper = wrapper.child(content);
    if selected {
        wrapper = wrapper.child(Element::new("div").class("dna-selection-frame"));
    }
    wrapper.into()
}

fn render_role(role: Role, view: &BlockView<'_>) -> ViewNode {
    log::debug!("rendering {} as {:?}", view.block.short_id(), role);
    match role {
        Role::Navbar => header::navbar(view),
        Role::Hero => header::hero(view),
        Role::Footer => header::footer(view),
        Role::Skills => content::skills(view),
        Role::Article => content::article(view),
        Role::Portfolio => content::portfolio(view),
        Role::Timeline => content::timeline(view),
        Role::Accordion => content::accordion(view),
        Role::Stats => content::stats(view),
        Role::Spacer => content::spacer(view),
        Role::Tabs => content::tabs(view),
        Role::ContactForm => content::contact_form(view),
        Role::Badges => showcase::badges(view),
        Role::Preview => showcase::preview(view),
        Role::Methodology => showcase::methodology(view),
        Role::TechStack => showcase::tech_stack(view),
        Role::FeaturedProject => showcase::featured_project(view),
        Role::ProjectsGrid => showcase::projects_grid(view),
        Role::CodeShowcase => showcase::code_showcase(view),
        Role::Logos => showcase::logos(view),
        Role::Testimonials => showcase::testimonials(view),
        Role::SocialDock => showcase::social_dock(view),
    }
}

/// Visible placeholder for a block type the registry does not know.
pub fn lost_node(block: &Block) -> ViewNode {
    Element::new("div")
        .class("dna-lost-node p-12 border-4 border-dashed border-red-500 bg-red-500/10 text-center flex flex-col items-center gap-4")
        .child(
            Element::new("div")
                .class("w-12 h-12 bg-red-500 text-white rounded-full flex items-center justify-center font-black animate-pulse")
                .text("!"),
        )
        .child(
            Element::new("div")
                .class("space-y-1")
                .child(
                    Element::new("div")
                        .class("text-red-600 font-black text-xs uppercase tracking-[0.3em]")
                        .text("Lost Node Detected"),
                )
                .child(
                    Element::new("div")
                        .class("text-[10px] font-mono opacity-50")
                        .text(format!("TYPE: {} | ID: {}", block.block_type, block.short_id())),
                ),
        )
        .into()
}

/// One block being rendered, with its role rules bound.
pub(crate) struct BlockView<'a> {
    pub block: &'a Block,
    pub rules: &'static RoleRules,
    pub padding: &'static str,
    pub sticky: bool,
    pub year: i32,
}

impl<'a> BlockView<'a> {
    pub fn text(&self, slot: &str) -> Option<Cow<'a, str>> {
        self.rules.text(&self.block.local_overrides, slot)
    }

    /// Text with a rule fallback; an empty string if the rule has none.
    pub fn text_or_empty(&self, slot: &str) -> String {
        self.text(slot).map(Cow::into_owned).unwrap_or_default()
    }

    pub fn flag(&self, slot: &str) -> bool {
        self.rules.flag(&self.block.local_overrides, slot)
    }

    pub fn collection(&self, slot: &str) -> Option<&'static CollectionRule> {
        self.rules.collection(slot)
    }

    /// Entries of a collection slot, zero or more, in order.
    pub fn items(&self, slot: &str) -> (Option<&'static CollectionRule>, std::slice::Iter<'a, Value>) {
        match self.collection(slot) {
            Some(rule) => (Some(rule), rule.items(Scope::Block(&self.block.local_overrides))),
            None => {
                let empty: &'a [Value] = &[];
                (None, empty.iter())
            }
        }
    }

    /// Standard section wrapper: padding class plus the divider border.
    pub fn section(&self) -> Element {
        Element::new("section").class(format!("{} {}", self.padding, SECTION_BORDER))
    }

    /// Tag an element with the role's reveal preset.
    pub fn reveal(&self, element: Element) -> Element {
        reveal(element, self.rules.reveal, None)
    }

    /// Tag a collection entry with the reveal preset and its stagger delay.
    pub fn reveal_entry(&self, element: Element, index: usize) -> Element {
        let delay = (self.rules.stagger > 0.0).then(|| self.rules.stagger * index as f64);
        reveal(element, self.rules.reveal, delay)
    }

    /// Optional heading: an absent title renders nothing.
    pub fn heading(&self, slot: &str, class: &str) -> Option<Element> {
        self.text(slot)
            .map(|title| self.reveal(Element::new("h2").class(class.to_string()).text(title)))
    }
}

pub(crate) fn reveal(element: Element, preset: Reveal, delay: Option<f64>) -> Element {
    if preset == Reveal::None {
        return element;
    }
    let element = element.attr("data-reveal", preset.name());
    match delay {
        Some(d) if d > 0.0 => element.attr("data-reveal-delay", format!("{:.2}", d)),
        _ => element,
    }
}

/// Shaped image with optional levitation, shared by several roles.
pub(crate) fn image(src: &str, shape: &str, levitation: Option<&str>) -> Element {
    let (aspect, radius) = match shape {
        "circle" => ("1/1", "50%"),
        "square" => ("1/1", "var(--dna-radius)"),
        "landscape" => ("4/3", "var(--dna-radius)"),
        "wide" => ("16/9", "var(--dna-radius)"),
        _ => ("auto", "var(--dna-radius)"),
    };
    let mut css = format!("aspect-ratio:{};border-radius:{};", aspect, radius);
    if let Some(speed) = levitation {
        css.push_str(&format!(
            "animation:levitate {}s ease-in-out infinite;",
            css_value(speed)
        ));
    }
    Element::new("div")
        .class("img-wrapper shadow-2xl")
        .style(css)
        .child(
            Element::new("img")
                .attr("src", src)
                .attr("alt", "Content")
                .attr("loading", "lazy"),
        )
}
