//! View tree produced by the live renderer, and its HTML serialization.
//! No script and no inline event handlers; only structure and styles.

use std::fmt::{self, Write};

const VOID_TAGS: &[&str] = &["img", "input", "br", "hr", "meta", "link"];

#[derive(Debug, Clone, PartialEq)]
pub enum ViewNode {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: &'static str,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<ViewNode>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    pub fn class(self, class: impl Into<String>) -> Self {
        self.attr("class", class)
    }

    pub fn style(self, css: impl Into<String>) -> Self {
        self.attr("style", css)
    }

    pub fn child(mut self, child: impl Into<ViewNode>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Adds the child only when present; absent fields render nothing.
    pub fn maybe(mut self, child: Option<impl Into<ViewNode>>) -> Self {
        if let Some(child) = child {
            self.children.push(child.into());
        }
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = ViewNode>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(ViewNode::Text(text.into()))
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

impl From<Element> for ViewNode {
    fn from(element: Element) -> Self {
        ViewNode::Element(element)
    }
}

impl ViewNode {
    pub fn text(text: impl Into<String>) -> Self {
        ViewNode::Text(text.into())
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            ViewNode::Element(e) => Some(e),
            ViewNode::Text(_) => None,
        }
    }

    /// Concatenated text content of the subtree.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            ViewNode::Text(t) => out.push_str(t),
            ViewNode::Element(e) => {
                for child in &e.children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// Depth-first search for the first element matching `pred`.
    pub fn find(&self, pred: &dyn Fn(&Element) -> bool) -> Option<&Element> {
        let element = self.as_element()?;
        if pred(element) {
            return Some(element);
        }
        element.children.iter().find_map(|c| c.find(pred))
    }

    pub fn write_html(&self, out: &mut String) -> fmt::Result {
        match self {
            ViewNode::Text(t) => out.write_str(&escape_html(t)),
            ViewNode::Element(e) => {
                write!(out, "<{}", e.tag)?;
                for (name, value) in &e.attrs {
                    write!(out, " {}=\"{}\"", name, escape_html(value))?;
                }
                out.write_char('>')?;
                if VOID_TAGS.contains(&e.tag) {
                    return Ok(());
                }
                for child in &e.children {
                    child.write_html(out)?;
                }
                write!(out, "</{}>", e.tag)
            }
        }
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_html(&mut out);
        out
    }
}

pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
