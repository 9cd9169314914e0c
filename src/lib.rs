//! Text core for the document-QA client: classifies raw backend answers
//! into display structure and renders lightweight markup to HTML fragments.

mod answer;
mod classifier;
mod emoji;
mod markup;
mod style;

pub use answer::{Answer, ListItem};
pub use style::Style;

/// Classify a raw answer string into its display structure.
pub fn classify(answer: &str) -> Answer {
    classifier::classify(answer)
}

/// Render lightweight markup to an HTML fragment using the default style.
pub fn render(text: &str) -> String {
    markup::render(text)
}

/// Render lightweight markup to an HTML fragment with custom classes.
pub fn render_with_style(text: &str, style: &Style) -> String {
    markup::render_with_style(text, style)
}
