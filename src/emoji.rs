//! Emoji Resolution
//!
//! Translates `:name:` shortcodes (GitHub / gemoji naming) into display glyphs.

/// Resolves emoji shortcodes to glyphs.
///
/// Built once at startup and handed to whatever needs to display or render
/// an emoji.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmojiResolver;

impl EmojiResolver {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Translates `code` into its glyph.
    ///
    /// Unknown names, malformed codes and the empty string are returned
    /// unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use snippy::emoji::EmojiResolver;
    ///
    /// let resolver = EmojiResolver::new();
    /// assert_eq!(resolver.resolve(":sparkles:"), "✨");
    /// assert_eq!(resolver.resolve(":not_an_emoji:"), ":not_an_emoji:");
    /// assert_eq!(resolver.resolve(""), "");
    /// ```
    #[must_use]
    pub fn resolve(&self, code: &str) -> String {
        code.strip_prefix(':')
            .and_then(|rest| rest.strip_suffix(':'))
            .filter(|name| !name.is_empty())
            .and_then(emojis::get_by_shortcode)
            .map_or_else(|| code.to_string(), |emoji| emoji.as_str().to_string())
    }
}
