use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Shortcode to glyph table for the `:code:` substitution pass.
static EMOJI: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("smile", "😊"),
        ("laughing", "😂"),
        ("thumbsup", "👍"),
        ("heart", "❤️"),
        ("fire", "🔥"),
        ("rocket", "🚀"),
        ("warning", "⚠️"),
        ("information_source", "ℹ️"),
        ("bulb", "💡"),
        ("books", "📚"),
        ("memo", "📝"),
        ("check", "✅"),
        ("x", "❌"),
        ("question", "❓"),
    ])
});

/// Look up the glyph for a shortcode (without the surrounding colons).
pub fn glyph(code: &str) -> Option<&'static str> {
    EMOJI.get(code).copied()
}
