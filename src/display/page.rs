//! Loading and error placeholders for page elements
//!
//! Elements are addressed by id through the [`Document`] trait. [`HtmlPage`]
//! is the in-memory document the CLI renders reports into.

use std::fmt::Write as _;

pub const LOADING_MARKUP: &str = r#"<div class="loading"></div>"#;

/// An addressable element whose inner HTML can be replaced
pub trait Element {
    fn inner_html(&self) -> &str;
    fn set_inner_html(&mut self, html: String);
}

/// Element lookup by id
pub trait Document {
    type Element: Element;

    fn get_element_by_id(&mut self, id: &str) -> Option<&mut Self::Element>;
}

/// Replace the element's content with the loading indicator.
/// Does nothing if no element has this id.
pub fn show_loading<D: Document + ?Sized>(document: &mut D, element_id: &str) {
    if let Some(element) = document.get_element_by_id(element_id) {
        element.set_inner_html(LOADING_MARKUP.to_string());
    }
}

/// Replace the element's content with `message` inside an error container.
/// Does nothing if no element has this id.
pub fn show_error<D: Document + ?Sized>(document: &mut D, element_id: &str, message: &str) {
    if let Some(element) = document.get_element_by_id(element_id) {
        element.set_inner_html(error_markup(message));
    }
}

/// Error container markup; the message is inserted as-is.
pub fn error_markup(message: &str) -> String {
    format!(r#"<div class="error-message">{}</div>"#, message)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HtmlElement {
    pub id: String,
    inner_html: String,
}

impl HtmlElement {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            inner_html: String::new(),
        }
    }
}

impl Element for HtmlElement {
    fn inner_html(&self) -> &str {
        &self.inner_html
    }

    fn set_inner_html(&mut self, html: String) {
        self.inner_html = html;
    }
}

/// Ordered collection of `<div id=...>` elements
#[derive(Debug, Clone, Default)]
pub struct HtmlPage {
    title: String,
    elements: Vec<HtmlElement>,
}

impl HtmlPage {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            elements: Vec::new(),
        }
    }

    /// Add an empty element; an existing id is left untouched
    pub fn with_element(mut self, id: &str) -> Self {
        if !self.elements.iter().any(|e| e.id == id) {
            self.elements.push(HtmlElement::new(id));
        }
        self
    }

    pub fn element(&self, id: &str) -> Option<&HtmlElement> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn render(&self) -> String {
        let mut html = String::new();
        let _ = writeln!(html, "<!DOCTYPE html>");
        let _ = writeln!(html, "<html>");
        let _ = writeln!(html, "<head><title>{}</title></head>", self.title);
        let _ = writeln!(html, "<body>");
        for element in &self.elements {
            let _ = writeln!(
                html,
                r#"<div id="{}">{}</div>"#,
                element.id, element.inner_html
            );
        }
        let _ = writeln!(html, "</body>");
        let _ = writeln!(html, "</html>");
        html
    }
}

impl Document for HtmlPage {
    type Element = HtmlElement;

    fn get_element_by_id(&mut self, id: &str) -> Option<&mut HtmlElement> {
        self.elements.iter_mut().find(|e| e.id == id)
    }
}
