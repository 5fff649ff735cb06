//! Badge surface backed by real DOM elements.

use crate::error::{describe_js, WebError};
use dioxus::logger::tracing::warn;
use syncbadge_core::{BadgeSurface, Part};
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

/// `<div role="alert"><span></span></div>` appended to `document.body`
pub struct DomSurface {
    widget: HtmlElement,
    text: HtmlElement,
}

impl DomSurface {
    pub fn mount() -> Result<Self, WebError> {
        let window = web_sys::window().ok_or(WebError::NoWindow)?;
        let document = window.document().ok_or(WebError::NoDocument)?;
        let body = document.body().ok_or(WebError::NoBody)?;

        let widget = create_html_element(&document, "div")?;
        let text = create_html_element(&document, "span")?;
        widget.set_attribute("role", "alert")?;
        widget.append_child(&text)?;
        body.append_child(&widget)?;

        Ok(Self { widget, text })
    }

    fn element(&self, part: Part) -> &HtmlElement {
        match part {
            Part::Widget => &self.widget,
            Part::Text => &self.text,
        }
    }
}

fn create_html_element(document: &Document, tag: &str) -> Result<HtmlElement, WebError> {
    document
        .create_element(tag)?
        .dyn_into::<HtmlElement>()
        .map_err(|_| WebError::Dom(format!("<{}> is not an HTML element", tag)))
}

impl BadgeSurface for DomSurface {
    fn set_style(&self, part: Part, property: &str, value: &str) {
        if let Err(e) = self.element(part).style().set_property(property, value) {
            warn!(
                "Failed to set {}: {} on badge: {}",
                property,
                value,
                describe_js(&e)
            );
        }
    }

    fn set_text(&self, text: &str) {
        self.text.set_text_content(Some(text));
    }

    fn remove(&self) {
        self.widget.remove();
    }
}
