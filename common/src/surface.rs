use crate::styles::Style;

/// The two elements that make up a badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Part {
    /// Outer, positioned element
    Widget,
    /// Inner cell holding the message
    Text,
}

/// Where the badge is drawn. In a browser this is a `<div>` with a
/// `<span>` child; tests use [`crate::memory::MemorySurface`].
pub trait BadgeSurface {
    fn set_style(&self, part: Part, property: &str, value: &str);

    fn set_text(&self, text: &str);

    /// Detach the element from the document
    fn remove(&self);
}

pub(crate) fn apply_style(surface: &dyn BadgeSurface, part: Part, style: &Style) {
    for (property, value) in style.iter() {
        surface.set_style(part, property, value);
    }
}
