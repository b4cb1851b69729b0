use super::{image, BlockView, HEADING_CLASS};
use crate::view::{Element, ViewNode};

pub(crate) fn navbar(view: &BlockView<'_>) -> ViewNode {
    let (links_rule, links) = view.items("links");
    let links = links.filter_map(|link| {
        let rule = links_rule?;
        Some(ViewNode::from(
            Element::new("a")
                .attr("href", rule.text(link, "url").unwrap_or_default())
                .class("hover:text-[var(--dna-accent)] transition-colors")
                .text(rule.text(link, "label").unwrap_or_default()),
        ))
    });

    Element::new("nav")
        .class(if view.sticky {
            "w-full glass-nav"
        } else {
            "relative w-full glass-nav"
        })
        .attr("data-sticky", if view.sticky { "true" } else { "false" })
        .child(
            Element::new("div")
                .class("container-dna h-20 flex items-center justify-between")
                .child(
                    Element::new("div")
                        .class("font-bold text-xl tracking-tighter uppercase")
                        .text(view.text_or_empty("brand")),
                )
                .child(
                    Element::new("div")
                        .class("flex items-center gap-8")
                        .child(
                            Element::new("div")
                                .class("hidden md:flex gap-8 opacity-60 text-[10px] font-black uppercase tracking-[0.2em]")
                                .children(links),
                        )
                        .child(
                            Element::new("button")
                                .attr("data-theme-toggle", "")
                                .attr("aria-label", "Toggle theme")
                                .class("w-10 h-10 rounded-full flex items-center justify-center border border-white/10")
                                .child(sun_icon()),
                        ),
                ),
        )
        .into()
}

/// Icon of the theme toggle in its default dark state.
fn sun_icon() -> Element {
    Element::new("svg")
        .attr("width", "18")
        .attr("height", "18")
        .attr("viewBox", "0 0 24 24")
        .attr("fill", "none")
        .attr("stroke", "currentColor")
        .attr("stroke-width", "2")
        .child(
            Element::new("circle")
                .attr("cx", "12")
                .attr("cy", "12")
                .attr("r", "5"),
        )
        .child(Element::new("path").attr(
            "d",
            "M12 1v2M12 21v2M4.22 4.22l1.42 1.42M18.36 18.36l1.42 1.42M1 12h2M21 12h2M4.22 19.78l1.42-1.42M18.36 5.64l1.42-1.42",
        ))
}

pub(crate) fn hero(view: &BlockView<'_>) -> ViewNode {
    let image_url = view.text("image").filter(|_| view.flag("showImage"));

    let title = view.text("title").map(|t| {
        Element::new("h1")
            .class("hero-title uppercase mb-8")
            .style("white-space:pre-line;")
            .text(t)
    });
    let description = view.text("description").map(|d| {
        Element::new("p")
            .class("text-xl opacity-60 mb-10 leading-relaxed max-w-2xl")
            .style("white-space:pre-line;")
            .text(d)
    });
    let primary = view.flag("primaryVisible").then(|| {
        Element::new("button")
            .class("btn-primary")
            .text(view.text_or_empty("primaryText"))
    });
    let secondary = view.flag("secondaryVisible").then(|| {
        Element::new("button")
            .class("btn-secondary")
            .text(view.text_or_empty("secondaryText"))
    });

    let copy = view.reveal(
        Element::new("div")
            .maybe(title)
            .maybe(description)
            .child(
                Element::new("div")
                    .class(if image_url.is_some() {
                        "flex gap-4 flex-wrap"
                    } else {
                        "flex gap-4 flex-wrap justify-center"
                    })
                    .maybe(primary)
                    .maybe(secondary),
            ),
    );

    let picture = image_url.map(|src| {
        let levitation = view
            .flag("levitation")
            .then(|| view.text_or_empty("levitationSpeed"));
        view.reveal(
            Element::new("div")
                .class("flex justify-center lg:justify-end")
                .child(image(&src, &view.text_or_empty("shape"), levitation.as_deref())),
        )
    });

    Element::new("section")
        .class(format!("{} min-h-[90vh] flex items-center", view.padding))
        .child(
            Element::new("div").class("container-dna").child(
                Element::new("div")
                    .class(if picture.is_some() {
                        "grid grid-cols-1 gap-16 items-center lg:grid-cols-2"
                    } else {
                        "grid grid-cols-1 gap-16 items-center text-center"
                    })
                    .child(copy)
                    .maybe(picture),
            ),
        )
        .into()
}

pub(crate) fn footer(view: &BlockView<'_>) -> ViewNode {
    let (links_rule, links) = view.items("links");
    let links: Vec<ViewNode> = links
        .filter_map(|link| {
            let rule = links_rule?;
            Some(
                Element::new("a")
                    .attr("href", rule.text(link, "url").unwrap_or_default())
                    .class("text-sm")
                    .text(rule.text(link, "label").unwrap_or_default())
                    .into(),
            )
        })
        .collect();

    let copyright = view
        .text_or_empty("copyright")
        .replace("{year}", &view.year.to_string());

    Element::new("footer")
        .class("py-16 border-t border-white/10")
        .child(
            Element::new("div")
                .class("container-dna")
                .child(
                    Element::new("div")
                        .class("text-center mb-8")
                        .child(
                            Element::new("div")
                                .class("text-2xl font-black uppercase mb-4")
                                .text(view.text_or_empty("name")),
                        )
                        .maybe(
                            view.text("tagline")
                                .map(|t| Element::new("p").class("opacity-50 text-sm").text(t)),
                        ),
                )
                .maybe((!links.is_empty()).then(|| {
                    Element::new("div")
                        .class("footer-links mb-8")
                        .children(links)
                }))
                .child(
                    Element::new("div")
                        .class("text-center text-xs opacity-30")
                        .text(copyright),
                ),
        )
        .into()
}

/// Section title shared by roles whose heading sits in a centered header row.
pub(crate) fn centered_heading(view: &BlockView<'_>, slot: &str) -> Option<Element> {
    view.heading(slot, HEADING_CLASS)
        .map(|h| Element::new("div").class("text-center mb-16").child(h))
}

#[cfg(test)]
mod tests {
    use crate::block::{Block, OverrideSet};
    use crate::render::{render_block, RenderContext};
    use crate::settings::GlobalSettingsTable;
    use crate::style::resolve_style;
    use crate::view::ViewNode;
    use serde_json::{json, Value};

    fn render(block_type: &str, overrides: Value) -> ViewNode {
        let overrides: OverrideSet = serde_json::from_value(overrides).unwrap();
        let block = Block::new("b1", block_type).with_overrides(overrides);
        let settings = GlobalSettingsTable::new();
        let ctx = RenderContext::new(&settings).with_year(2031);
        render_block(&block, &resolve_style(&block, &settings), 0, &ctx)
    }

    #[test]
    fn test_navbar_brand_and_links() {
        let node = render(
            "B0101",
            json!({"data": {"logoText": "Acme", "links": [{"text": "Docs"}, {"label": "Blog", "url": "/blog"}]}}),
        );
        let html = node.to_html();
        assert!(html.contains(">Acme</div>"));
        assert!(html.contains("<a href=\"#\" class=\"hover:text-[var(--dna-accent)] transition-colors\">Docs</a>"));
        assert!(html.contains("href=\"/blog\""));
    }

    #[test]
    fn test_hero_omits_absent_title() {
        let html = render("B0203", json!({"data": {"description": "Hi"}})).to_html();
        assert!(!html.contains("<h1"));
        assert!(html.contains("pt-32 pb-24"));
    }

    #[test]
    fn test_hero_button_fallback_text() {
        let html = render("Hero", json!({"data": {"primaryBtnVisible": true}})).to_html();
        assert!(html.contains("<button class=\"btn-primary\">Get Started</button>"));
        assert!(!html.contains("btn-secondary"));
    }

    #[test]
    fn test_hero_image_requires_show_flag() {
        let hidden = render("B0201", json!({"media": {"imageUrl": "a.png"}})).to_html();
        assert!(!hidden.contains("a.png"));
        let shown = render(
            "B0201",
            json!({"media": {"imageUrl": "a.png", "showImage": true, "levitation": true}}),
        )
        .to_html();
        assert!(shown.contains("src=\"a.png\""));
        assert!(shown.contains("animation:levitate 3s"));
    }

    #[test]
    fn test_footer_replaces_every_year_marker() {
        let html = render("B1401", json!({"data": {"copyright": "{year} - {year}"}})).to_html();
        assert!(html.contains(">2031 - 2031</div>"));
    }

    #[test]
    fn test_footer_default_copyright_uses_year() {
        let html = render("B1401", json!({})).to_html();
        assert!(html.contains("© 2031 All rights reserved"));
        assert!(html.contains(">DNA</div>"));
        assert!(!html.contains("footer-links"));
    }
}
