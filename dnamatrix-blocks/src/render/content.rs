use super::header::centered_heading;
use super::{BlockView, HEADING_CLASS};
use crate::rules::Scope;
use crate::settings::css_value;
use crate::view::{Element, ViewNode};

pub(crate) fn skills(view: &BlockView<'_>) -> ViewNode {
    let bento = view.text("grid").as_deref() == Some("bento");
    let hide_percentages = view.flag("hidePercentages");

    let header = view.text("title").map(|title| {
        Element::new("div")
            .class("text-center mb-20 max-w-3xl mx-auto")
            .child(view.reveal(
                Element::new("h2")
                    .class("text-4xl md:text-5xl font-black uppercase mb-6")
                    .text(title),
            ))
            .maybe(
                view.text("description")
                    .map(|d| Element::new("p").class("text-lg opacity-50 leading-relaxed").text(d)),
            )
    });

    let (groups_rule, groups) = view.items("groups");
    let groups = groups.enumerate().filter_map(|(i, group)| {
        let rule = groups_rule?;
        let skills_rule = rule.nested("items")?;
        let bars = skills_rule.items(Scope::Item(group)).map(|skill| {
            let level = skills_rule.text(skill, "level").unwrap_or_default();
            let label_row = Element::new("div")
                .class("flex justify-between mb-2")
                .child(
                    Element::new("span")
                        .class("font-bold text-sm uppercase tracking-wide")
                        .text(skills_rule.text(skill, "name").unwrap_or_default()),
                )
                .maybe((!hide_percentages).then(|| {
                    Element::new("span")
                        .class("text-sm opacity-50")
                        .text(format!("{}%", level))
                }));
            ViewNode::from(
                Element::new("div").child(label_row).child(
                    Element::new("div")
                        .class("h-2 bg-white/5 rounded-full overflow-hidden")
                        .child(
                            Element::new("div")
                                .class("h-full bg-[var(--dna-accent)] rounded-full")
                                .style(format!("width:{}%;", css_value(&level))),
                        ),
                ),
            )
        });
        Some(ViewNode::from(view.reveal_entry(
            Element::new("div")
                .class(if bento { "dna-card" } else { "" })
                .child(
                    Element::new("h3")
                        .class("text-2xl font-black uppercase mb-8 text-[var(--dna-accent)]")
                        .text(rule.text(group, "title").unwrap_or_default()),
                )
                .child(Element::new("div").class("space-y-6").children(bars)),
            i,
        )))
    });

    view.section()
        .child(
            Element::new("div")
                .class("container-dna")
                .maybe(header)
                .child(
                    Element::new("div")
                        .class(if bento {
                            "grid grid-cols-1 md:grid-cols-2 gap-6"
                        } else {
                            "grid grid-cols-1 md:grid-cols-2 gap-12"
                        })
                        .children(groups),
                ),
        )
        .into()
}

pub(crate) fn article(view: &BlockView<'_>) -> ViewNode {
    let header = view.text("title").map(|title| {
        view.reveal(
            Element::new("div")
                .class("mb-12")
                .child(Element::new("h2").class(format!("{} mb-4", HEADING_CLASS)).text(title))
                .maybe(view.text("subtitle").map(|s| {
                    Element::new("p")
                        .class("text-xl opacity-50 uppercase tracking-[0.2em]")
                        .text(s)
                })),
        )
    });
    let body = view
        .text("body")
        .map(|b| Element::new("div").class("text-lg opacity-80 leading-relaxed mb-12").text(b));

    let (rule, sections) = view.items("sections");
    let sections: Vec<ViewNode> = sections
        .enumerate()
        .filter_map(|(i, section)| {
            let rule = rule?;
            Some(
                view.reveal_entry(
                    Element::new("div")
                        .class("dna-card")
                        .child(
                            Element::new("h3")
                                .class("text-2xl font-bold mb-4 text-[var(--dna-accent)]")
                                .text(rule.text(section, "title").unwrap_or_default()),
                        )
                        .child(
                            Element::new("p")
                                .class("opacity-70 leading-relaxed")
                                .text(rule.text(section, "content").unwrap_or_default()),
                        ),
                    i,
                )
                .into(),
            )
        })
        .collect();

    view.section()
        .child(
            Element::new("div").class("container-dna").child(
                Element::new("div")
                    .class("max-w-4xl mx-auto")
                    .maybe(header)
                    .maybe(body)
                    .maybe((!sections.is_empty()).then(|| {
                        Element::new("div").class("space-y-8").children(sections)
                    })),
            ),
        )
        .into()
}

pub(crate) fn portfolio(view: &BlockView<'_>) -> ViewNode {
    let header = view.text("title").map(|title| {
        Element::new("div")
            .class("text-center mb-16")
            .child(view.reveal(
                Element::new("h2").class(format!("{} mb-6", HEADING_CLASS)).text(title),
            ))
            .maybe(view.text("subtitle").map(|s| {
                Element::new("p")
                    .class("text-lg opacity-60 font-medium max-w-2xl mx-auto")
                    .text(s)
            }))
    });

    let (rule, items) = view.items("items");
    let items = items.enumerate().filter_map(|(i, item)| {
        let rule = rule?;
        let mut frame = Element::new("div")
            .class("relative overflow-hidden rounded-lg shadow-lg")
            .child(
                Element::new("div").class("aspect-video w-full overflow-hidden").child(
                    Element::new("img")
                        .attr("src", rule.text(item, "image").unwrap_or_default())
                        .attr("alt", rule.text(item, "alt").unwrap_or_default())
                        .class("w-full h-full object-cover"),
                ),
            );
        if rule.flag(item, "showPlayButton") {
            frame = frame.child(
                Element::new("div")
                    .class("absolute inset-0 flex items-center justify-center pointer-events-none dna-play")
                    .text("▶"),
            );
        }
        let card = view.reveal_entry(
            Element::new("div")
                .class("group cursor-pointer transition-transform duration-300 hover:scale-105")
                .child(frame)
                .maybe(rule.text(item, "title").map(|t| {
                    Element::new("div").class("mt-4 text-center").child(
                        Element::new("h3")
                            .class("font-bold text-lg uppercase tracking-wide")
                            .text(t),
                    )
                })),
            i,
        );
        let node = match rule.text(item, "link").filter(|l| !l.trim().is_empty()) {
            Some(link) => Element::new("a")
                .attr("href", link)
                .attr("target", "_blank")
                .attr("rel", "noopener noreferrer")
                .child(card),
            None => card,
        };
        Some(ViewNode::from(node))
    });

    view.section()
        .child(
            Element::new("div")
                .class("container-dna")
                .maybe(header)
                .child(
                    Element::new("div")
                        .class(format!(
                            "grid grid-cols-1 md:grid-cols-{} gap-6",
                            view.text_or_empty("columns")
                        ))
                        .children(items),
                ),
        )
        .into()
}

pub(crate) fn timeline(view: &BlockView<'_>) -> ViewNode {
    let horizontal = view.text("scrollPath").as_deref() == Some("horizontal");
    let (rule, items) = view.items("items");
    let items = items.enumerate().filter_map(|(i, item)| {
        let rule = rule?;
        Some(ViewNode::from(view.reveal_entry(
            Element::new("div")
                .class(if horizontal { "min-w-[300px]" } else { "flex gap-8" })
                .child(
                    Element::new("div")
                        .class(if horizontal { "mb-4" } else { "flex-shrink-0" })
                        .child(
                            Element::new("div")
                                .class("text-2xl font-black text-[var(--dna-accent)]")
                                .text(rule.text(item, "date").unwrap_or_default()),
                        ),
                )
                .child(
                    Element::new("div")
                        .class(if horizontal { "" } else { "flex-1" })
                        .child(
                            Element::new("h3")
                                .class("text-xl font-bold mb-2 uppercase")
                                .text(rule.text(item, "title").unwrap_or_default()),
                        )
                        .child(
                            Element::new("p")
                                .class("opacity-60 leading-relaxed")
                                .text(rule.text(item, "description").unwrap_or_default()),
                        ),
                ),
            i,
        )))
    });

    view.section()
        .child(
            Element::new("div")
                .class("container-dna")
                .maybe(view.text("title").map(|t| {
                    Element::new("div")
                        .class("text-center mb-16")
                        .child(Element::new("h2").class(HEADING_CLASS).text(t))
                }))
                .child(
                    Element::new("div")
                        .class(if horizontal {
                            "flex gap-12 overflow-x-auto pb-8"
                        } else {
                            "space-y-12 max-w-3xl mx-auto"
                        })
                        .children(items),
                ),
        )
        .into()
}

/// Items render collapsed as `details` elements.
pub(crate) fn accordion(view: &BlockView<'_>) -> ViewNode {
    let (rule, items) = view.items("items");
    let items = items.filter_map(|item| {
        let rule = rule?;
        Some(ViewNode::from(
            Element::new("details")
                .class("dna-card overflow-hidden")
                .child(
                    Element::new("summary")
                        .class("w-full text-left p-6 flex justify-between items-center gap-4 font-bold text-lg")
                        .text(rule.text(item, "question").unwrap_or_default())
                        .child(Element::new("span").text("+")),
                )
                .child(
                    Element::new("div")
                        .class("px-6 pb-6 opacity-70 leading-relaxed")
                        .text(rule.text(item, "answer").unwrap_or_default()),
                ),
        ))
    });

    view.section()
        .child(
            Element::new("div")
                .class("container-dna max-w-4xl mx-auto")
                .maybe(centered_heading(view, "title"))
                .child(Element::new("div").class("space-y-4").children(items)),
        )
        .into()
}

pub(crate) fn stats(view: &BlockView<'_>) -> ViewNode {
    let columns = view.text_or_empty("columns");
    let (rule, stats) = view.items("stats");
    let stats = stats.enumerate().filter_map(|(i, stat)| {
        let rule = rule?;
        Some(ViewNode::from(view.reveal_entry(
            Element::new("div")
                .class("text-center")
                .child(
                    Element::new("div")
                        .class("text-5xl md:text-7xl font-black text-[var(--dna-accent)] mb-4")
                        .text(rule.text(stat, "value").unwrap_or_default()),
                )
                .child(
                    Element::new("div")
                        .class("text-sm uppercase tracking-[0.2em] opacity-50")
                        .text(rule.text(stat, "label").unwrap_or_default()),
                ),
            i,
        )))
    });

    view.section()
        .child(
            Element::new("div").class("container-dna").child(
                Element::new("div")
                    .class(format!("grid grid-cols-1 md:grid-cols-{} gap-12", columns))
                    .children(stats),
            ),
        )
        .into()
}

pub(crate) fn spacer(view: &BlockView<'_>) -> ViewNode {
    Element::new("div")
        .class("dna-spacer")
        .style(format!("height:{}px;", css_value(&view.text_or_empty("height"))))
        .into()
}

/// The first tab is shown; the others are kept hidden in the markup.
pub(crate) fn tabs(view: &BlockView<'_>) -> ViewNode {
    let Some(rule) = view.collection("tabs") else {
        return view.section().into();
    };
    let (_, entries) = view.items("tabs");
    let entries: Vec<_> = entries.collect();

    let buttons = entries.iter().enumerate().map(|(i, tab)| {
        ViewNode::from(
            Element::new("button")
                .attr("data-tab", i.to_string())
                .class(if i == 0 {
                    "px-6 py-4 font-bold uppercase text-sm tracking-[0.1em] border-b-2 border-[var(--dna-accent)] text-[var(--dna-accent)]"
                } else {
                    "px-6 py-4 font-bold uppercase text-sm tracking-[0.1em] opacity-50"
                })
                .text(rule.text(tab, "label").unwrap_or_default()),
        )
    });
    let panels = entries.iter().enumerate().map(|(i, tab)| {
        let mut panel = Element::new("div")
            .attr("data-tab-panel", i.to_string())
            .class("p-8 dna-card");
        if i > 0 {
            panel = panel.attr("hidden", "");
        }
        ViewNode::from(
            view.reveal(panel).child(
                Element::new("div")
                    .class("text-lg opacity-80 leading-relaxed")
                    .text(rule.text(tab, "content").unwrap_or_default()),
            ),
        )
    });

    view.section()
        .child(
            Element::new("div")
                .class("container-dna max-w-5xl mx-auto")
                .child(
                    Element::new("div")
                        .class("flex gap-2 mb-12 border-b border-white/10 overflow-x-auto")
                        .children(buttons),
                )
                .children(panels),
        )
        .into()
}

pub(crate) fn contact_form(view: &BlockView<'_>) -> ViewNode {
    let input_class = "w-full px-6 py-4 bg-white/5 border border-white/10 rounded-lg outline-none";
    view.section()
        .child(
            Element::new("div")
                .class("container-dna max-w-2xl mx-auto")
                .child(
                    Element::new("div")
                        .class("text-center mb-12")
                        .maybe(view.heading("title", &format!("{} mb-4", HEADING_CLASS)))
                        .maybe(
                            view.text("subtitle")
                                .map(|s| Element::new("p").class("opacity-60").text(s)),
                        ),
                )
                .child(
                    Element::new("form")
                        .class("space-y-6")
                        .child(
                            Element::new("input")
                                .attr("type", "text")
                                .attr("placeholder", "Name")
                                .class(input_class),
                        )
                        .child(
                            Element::new("input")
                                .attr("type", "email")
                                .attr("placeholder", "Email")
                                .class(input_class),
                        )
                        .child(
                            Element::new("textarea")
                                .attr("placeholder", "Message")
                                .attr("rows", view.text_or_empty("messageRows"))
                                .class(format!("{} resize-none", input_class)),
                        )
                        .child(
                            Element::new("button")
                                .attr("type", "submit")
                                .class("btn-primary w-full")
                                .text("Send Message"),
                        ),
                ),
        )
        .into()
}

#[cfg(test)]
mod tests {
    use crate::block::{Block, OverrideSet};
    use crate::render::{render_block, RenderContext};
    use crate::settings::GlobalSettingsTable;
    use crate::style::resolve_style;
    use serde_json::{json, Value};

    fn html(block_type: &str, overrides: Value, index: usize) -> String {
        let overrides: OverrideSet = serde_json::from_value(overrides).unwrap();
        let block = Block::new("b1", block_type).with_overrides(overrides);
        let settings = GlobalSettingsTable::new();
        let ctx = RenderContext::new(&settings);
        render_block(&block, &resolve_style(&block, &settings), index, &ctx).to_html()
    }

    #[test]
    fn test_skills_nested_bars() {
        let out = html(
            "B0301",
            json!({"data": {"groups": [{"title": "Lang", "items": [{"name": "Rust", "level": 90}]}]}}),
            1,
        );
        assert!(out.contains("py-24"));
        assert!(out.contains(">Rust</span>"));
        assert!(out.contains(">90%</span>"));
        assert!(out.contains("width:90%;"));
    }

    #[test]
    fn test_skills_whole_float_level() {
        let out = html(
            "B0301",
            json!({"data": {"groups": [{"items": [{"name": "Rust", "level": 90.0}]}]}}),
            1,
        );
        assert!(out.contains(">90%</span>"));
        assert!(out.contains("width:90%;"));
    }

    #[test]
    fn test_inline_styles_are_sanitized() {
        let out = html("B0901", json!({"layout": {"height": "10;position:fixed"}}), 0);
        assert!(out.contains("style=\"height:10position:fixedpx;\""));
        let out = html(
            "B0301",
            json!({"data": {"groups": [{"items": [{"name": "Go", "level": "50%;display:none"}]}]}}),
            1,
        );
        assert!(out.contains("style=\"width:50%display:none%;\""));
    }

    #[test]
    fn test_skills_hide_percentages() {
        let out = html(
            "Skills",
            json!({"data": {"hidePercentages": true, "groups": [{"items": [{"name": "Go", "level": 50}]}]}}),
            0,
        );
        assert!(!out.contains("50%</span>"));
    }

    #[test]
    fn test_stats_reads_items_alias_and_columns() {
        let out = html(
            "B0801",
            json!({"data": {"items": [{"value": "10", "label": "Years"}]}, "layout": {"columns": "4"}}),
            2,
        );
        assert!(out.contains("md:grid-cols-4"));
        assert!(out.contains(">10</div>"));
    }

    #[test]
    fn test_spacer_height_default() {
        assert!(html("B0901", json!({}), 0).contains("height:120px;"));
    }

    #[test]
    fn test_accordion_default_title() {
        let out = html("B0701", json!({"data": {"items": [{"title": "Q", "content": "A"}]}}), 1);
        assert!(out.contains(">FAQ</h2>"));
        assert!(out.contains(">Q<span>+</span></summary>"));
    }

    #[test]
    fn test_portfolio_link_wraps_card() {
        let out = html(
            "B0501",
            json!({"data": {"items": [{"src": "p.png", "link": "https://x.dev"}, {"imageUrl": "q.png", "link": "  "}]}}),
            1,
        );
        assert!(out.contains("<a href=\"https://x.dev\""));
        assert_eq!(out.matches("<a ").count(), 1);
        assert!(out.contains("alt=\"Portfolio item\""));
    }

    #[test]
    fn test_tabs_first_panel_visible() {
        let out = html(
            "B1001",
            json!({"data": {"tabs": [{"label": "One", "content": "1"}, {"title": "Two", "text": "2"}]}}),
            1,
        );
        assert!(out.contains("data-tab-panel=\"1\" class=\"p-8 dna-card\" hidden=\"\""));
        assert!(!out.contains("data-tab-panel=\"0\" class=\"p-8 dna-card\" hidden"));
    }

    #[test]
    fn test_contact_defaults() {
        let out = html("Contact", json!({}), 1);
        assert!(out.contains(">Contact</h2>"));
        assert!(out.contains("Send Message"));
        assert!(out.contains("rows=\"5\""));
    }
}
