use serde::Serialize;

/// A single extracted list item
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListItem {
    /// Leading number for numbered items, `None` for bulleted ones
    #[serde(rename = "number", skip_serializing_if = "Option::is_none")]
    pub ordinal: Option<String>,
    /// Short label preceding a colon, when the item content has one
    #[serde(rename = "keyTerm", skip_serializing_if = "Option::is_none")]
    pub key_term: Option<String>,
    pub content: String,
}

/// Structural classification of a raw answer string
///
/// Exactly one variant is produced per input, chosen by a fixed priority
/// order: explicit list, then first/second/third narrative, then paragraph
/// split, then plain text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Answer {
    #[serde(rename = "list")]
    List { items: Vec<ListItem> },
    /// A first/second/third narrative without explicit markers; `items`
    /// always holds three entries with ordinals "1", "2", "3"
    #[serde(rename = "implicitList")]
    ImplicitList { items: Vec<ListItem>, summary: String },
    #[serde(rename = "paragraphs")]
    Paragraphs { paragraphs: Vec<String> },
    #[serde(rename = "plainText")]
    PlainText { content: String },
}
