use super::header::centered_heading;
use super::{image, BlockView, HEADING_CLASS};
use crate::rules::Scope;
use crate::settings::css_value;
use crate::view::{Element, ViewNode};
use std::borrow::Cow;

pub(crate) fn badges(view: &BlockView<'_>) -> ViewNode {
    let (rule, tags) = view.items("tags");
    let pills = tags.enumerate().filter_map(|(i, tag)| {
        let label = rule?.text(tag, "label")?;
        Some(ViewNode::from(view.reveal_entry(
            Element::new("span")
                .class("px-5 py-2 rounded-full border border-white/10 bg-white/5 text-xs font-bold uppercase tracking-widest")
                .text(label),
            i,
        )))
    });

    view.section()
        .child(
            Element::new("div")
                .class("container-dna flex flex-wrap justify-center gap-3")
                .children(pills),
        )
        .into()
}

pub(crate) fn preview(view: &BlockView<'_>) -> ViewNode {
    let frame = view
        .text("url")
        .map(|src| view.reveal(Element::new("div").child(image(&src, "wide", None))));

    view.section()
        .child(
            Element::new("div")
                .class("container-dna")
                .maybe(centered_heading(view, "title"))
                .maybe(frame),
        )
        .into()
}

pub(crate) fn methodology(view: &BlockView<'_>) -> ViewNode {
    let (rule, steps) = view.items("steps");
    let steps = steps.enumerate().filter_map(|(i, step)| {
        let rule = rule?;
        let number = rule
            .text(step, "number")
            .unwrap_or_else(|| Cow::Owned(format!("{:02}", i + 1)));
        Some(ViewNode::from(view.reveal_entry(
            Element::new("div")
                .class("flex gap-6 items-start")
                .child(
                    Element::new("div")
                        .class("w-14 h-14 flex-shrink-0 rounded-full bg-[var(--dna-accent)] text-white flex items-center justify-center font-black")
                        .text(number),
                )
                .child(
                    Element::new("div")
                        .child(
                            Element::new("h3")
                                .class("text-xl font-bold uppercase mb-2")
                                .text(rule.text(step, "title").unwrap_or_default()),
                        )
                        .maybe(
                            rule.text(step, "description")
                                .map(|d| Element::new("p").class("opacity-60 leading-relaxed").text(d)),
                        ),
                ),
            i,
        )))
    });

    view.section()
        .child(
            Element::new("div")
                .class("container-dna max-w-4xl mx-auto")
                .maybe(centered_heading(view, "title"))
                .child(Element::new("div").class("space-y-10").children(steps)),
        )
        .into()
}

pub(crate) fn tech_stack(view: &BlockView<'_>) -> ViewNode {
    let (rule, categories) = view.items("categories");
    let categories = categories.enumerate().filter_map(|(i, category)| {
        let rule = rule?;
        let tech_rule = rule.nested("technologies")?;
        let chips = tech_rule.items(Scope::Item(category)).filter_map(|tech| {
            Some(ViewNode::from(
                Element::new("span")
                    .class("px-3 py-1 rounded-full bg-white/5 text-xs font-medium")
                    .text(tech_rule.text(tech, "label")?),
            ))
        });
        let dot = Element::new("span").class("w-3 h-3 rounded-full").style(format!(
            "background-color:{};",
            css_value(&rule.text(category, "color").unwrap_or(Cow::Borrowed("var(--dna-accent)")))
        ));
        Some(ViewNode::from(view.reveal_entry(
            Element::new("div")
                .class("dna-card")
                .child(
                    Element::new("div")
                        .class("flex items-center gap-3 mb-6")
                        .child(dot)
                        .child(
                            Element::new("h3")
                                .class("text-lg font-black uppercase tracking-wide")
                                .text(rule.text(category, "name").unwrap_or_default()),
                        ),
                )
                .child(Element::new("div").class("flex flex-wrap gap-2").children(chips)),
            i,
        )))
    });

    view.section()
        .child(
            Element::new("div")
                .class("container-dna")
                .maybe(centered_heading(view, "title"))
                .child(
                    Element::new("div")
                        .class("grid grid-cols-1 md:grid-cols-3 gap-6")
                        .children(categories),
                ),
        )
        .into()
}

pub(crate) fn featured_project(view: &BlockView<'_>) -> ViewNode {
    let (rule, tags) = view.items("tags");
    let tags: Vec<ViewNode> = tags
        .filter_map(|tag| {
            Some(
                Element::new("span")
                    .class("px-3 py-1 rounded-full border border-white/10 text-xs uppercase")
                    .text(rule?.text(tag, "label")?)
                    .into(),
            )
        })
        .collect();

    let link = |slot: &str, label: &str, class: &str| {
        view.text(slot).map(|url| {
            Element::new("a")
                .attr("href", url)
                .attr("target", "_blank")
                .attr("rel", "noopener noreferrer")
                .class(class.to_string())
                .text(label.to_string())
        })
    };

    let copy = Element::new("div")
        .child(
            Element::new("h2")
                .class(format!("{} mb-6", HEADING_CLASS))
                .text(view.text_or_empty("name")),
        )
        .maybe(
            view.text("description")
                .map(|d| Element::new("p").class("text-lg opacity-60 leading-relaxed mb-8").text(d)),
        )
        .maybe((!tags.is_empty()).then(|| {
            Element::new("div").class("flex flex-wrap gap-2 mb-8").children(tags)
        }))
        .child(
            Element::new("div")
                .class("flex gap-4")
                .maybe(link("liveUrl", "Live Demo", "btn-primary"))
                .maybe(link("githubUrl", "GitHub", "btn-secondary")),
        );

    view.section()
        .child(
            Element::new("div").class("container-dna").child(
                Element::new("div")
                    .class("grid grid-cols-1 lg:grid-cols-2 gap-16 items-center")
                    .maybe(view.text("image").map(|src| image(&src, "landscape", None)))
                    .child(copy),
            ),
        )
        .into()
}

pub(crate) fn projects_grid(view: &BlockView<'_>) -> ViewNode {
    let (rule, projects) = view.items("projects");
    let cards = projects.filter_map(|project| {
        let rule = rule?;
        Some(ViewNode::from(
            Element::new("div")
                .class("dna-card overflow-hidden")
                .maybe(rule.text(project, "image").map(|src| {
                    Element::new("div").class("aspect-video mb-6 overflow-hidden rounded-lg").child(
                        Element::new("img")
                            .attr("src", src)
                            .attr("alt", rule.text(project, "name").unwrap_or_default())
                            .class("w-full h-full object-cover"),
                    )
                }))
                .child(
                    Element::new("h3")
                        .class("text-xl font-bold uppercase mb-2")
                        .text(rule.text(project, "name").unwrap_or_default()),
                )
                .maybe(
                    rule.text(project, "description")
                        .map(|d| Element::new("p").class("opacity-60 text-sm").text(d)),
                ),
        ))
    });

    view.section()
        .child(
            Element::new("div")
                .class("container-dna")
                .maybe(centered_heading(view, "title"))
                .child(
                    Element::new("div")
                        .class("grid grid-cols-1 md:grid-cols-3 gap-6")
                        .children(cards),
                ),
        )
        .into()
}

pub(crate) fn code_showcase(view: &BlockView<'_>) -> ViewNode {
    let (rule, snippets) = view.items("snippets");
    let snippets = snippets.filter_map(|snippet| {
        let rule = rule?;
        Some(ViewNode::from(
            Element::new("div")
                .class("rounded-xl overflow-hidden border border-white/10")
                .style("background-color:#0D1117;")
                .maybe(rule.text(snippet, "title").map(|t| {
                    Element::new("div")
                        .class("px-6 py-3 border-b border-white/10 text-xs font-mono opacity-60")
                        .text(t)
                }))
                .child(
                    Element::new("pre")
                        .class("p-6 overflow-x-auto text-sm font-mono")
                        .child(Element::new("code").text(rule.text(snippet, "code").unwrap_or_default())),
                ),
        ))
    });

    view.section()
        .child(
            Element::new("div")
                .class("container-dna max-w-4xl mx-auto")
                .maybe(centered_heading(view, "title"))
                .child(Element::new("div").class("space-y-6").children(snippets)),
        )
        .into()
}

pub(crate) fn logos(view: &BlockView<'_>) -> ViewNode {
    let (rule, items) = view.items("items");
    let logos = items.enumerate().filter_map(|(i, item)| {
        let label = rule?.text(item, "label")?;
        Some(ViewNode::from(view.reveal_entry(
            Element::new("div")
                .class("text-2xl font-black uppercase tracking-tighter")
                .text(label),
            i,
        )))
    });

    view.section()
        .child(
            Element::new("div")
                .class("container-dna flex flex-wrap justify-center items-center gap-12 opacity-40")
                .children(logos),
        )
        .into()
}

pub(crate) fn testimonials(view: &BlockView<'_>) -> ViewNode {
    let (rule, items) = view.items("items");
    let cards = items.filter_map(|item| {
        let rule = rule?;
        let avatar = rule.text(item, "avatar").map(|src| {
            Element::new("img")
                .attr("src", src)
                .attr("alt", rule.text(item, "name").unwrap_or_default())
                .class("testimonial-avatar")
        });
        Some(ViewNode::from(
            view.reveal(Element::new("div").class("testimonial-card"))
                .child(
                    Element::new("p")
                        .class("text-lg leading-relaxed mb-8 opacity-80")
                        .text(format!("\"{}\"", rule.text(item, "quote").unwrap_or_default())),
                )
                .child(
                    Element::new("div")
                        .class("flex items-center gap-4")
                        .maybe(avatar)
                        .child(
                            Element::new("div")
                                .child(
                                    Element::new("div")
                                        .class("font-bold")
                                        .text(rule.text(item, "name").unwrap_or_default()),
                                )
                                .child(
                                    Element::new("div")
                                        .class("text-sm opacity-50")
                                        .text(rule.text(item, "role").unwrap_or_default()),
                                ),
                        ),
                ),
        ))
    });

    view.section()
        .child(
            Element::new("div")
                .class("container-dna")
                .maybe(centered_heading(view, "title"))
                .child(
                    Element::new("div")
                        .class(format!(
                            "grid grid-cols-1 md:grid-cols-{} gap-8",
                            view.text_or_empty("columns")
                        ))
                        .children(cards),
                ),
        )
        .into()
}

pub(crate) fn social_dock(view: &BlockView<'_>) -> ViewNode {
    let (rule, socials) = view.items("socials");
    let links = socials.enumerate().filter_map(|(i, social)| {
        let rule = rule?;
        Some(ViewNode::from(view.reveal_entry(
            Element::new("a")
                .attr("href", rule.text(social, "url").unwrap_or_default())
                .attr("target", "_blank")
                .attr("rel", "noopener noreferrer")
                .class("w-12 h-12 rounded-full border border-white/10 flex items-center justify-center font-bold uppercase hover:bg-[var(--dna-accent)] transition-colors")
                .text(rule.text(social, "glyph").unwrap_or_default()),
            i,
        )))
    });

    view.section()
        .child(
            Element::new("div")
                .class("container-dna flex justify-center gap-4")
                .children(links),
        )
        .into()
}
