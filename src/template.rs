//! Template Rendering
//!
//! Substitution of the `<type>`, `<emoji>` and `<subject>` placeholders, plus
//! the rules tying a template to the include toggles.

use std::fmt;

use crate::{config::ConfigDocument, emoji::EmojiResolver};

pub const TYPE_PLACEHOLDER: &str = "<type>";
pub const EMOJI_PLACEHOLDER: &str = "<emoji>";
pub const SUBJECT_PLACEHOLDER: &str = "<subject>";

/// Template every toggle change is derived from.
pub const CANONICAL_TEMPLATE: &str = "<type>: <emoji> <subject>";

/// Subject used when rendering an illustrative message.
pub const EXAMPLE_SUBJECT: &str = "This is example comment.";

/// Which optional placeholders get populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Toggles {
    pub include_type: bool,
    pub include_emoji: bool,
}

impl Default for Toggles {
    fn default() -> Self {
        Self {
            include_type: true,
            include_emoji: true,
        }
    }
}

impl Toggles {
    /// Whether the user has anything to pick from when committing.
    #[must_use]
    pub fn needs_selection(self) -> bool {
        self.include_type || self.include_emoji
    }
}

/// Renders `template` into a concrete message.
///
/// Placeholders are replaced in a fixed order: `<type>`, then `<emoji>`, then
/// `<subject>`. Whitespace left behind by a disabled placeholder is kept as is.
///
/// Substituted values are not escaped. A type key containing `<emoji>` or
/// `<subject>` is substituted again by the later passes, while a subject
/// containing a placeholder is left verbatim.
///
/// # Examples
///
/// ```
/// use snippy::{emoji::EmojiResolver, template::{render, Toggles}};
///
/// let message = render(
///     "<type>: <emoji> <subject>",
///     "feat",
///     ":sparkles:",
///     "add login page",
///     Toggles::default(),
///     &EmojiResolver::new(),
/// );
/// assert_eq!(message, "feat: ✨ add login page");
/// ```
#[must_use]
pub fn render(
    template: &str,
    type_key: &str,
    emoji_code: &str,
    subject: &str,
    toggles: Toggles,
    resolver: &EmojiResolver,
) -> String {
    let type_value = if toggles.include_type { type_key } else { "" };
    let emoji_value = if toggles.include_emoji {
        resolver.resolve(emoji_code)
    } else {
        String::new()
    };

    template
        .replace(TYPE_PLACEHOLDER, type_value)
        .replace(EMOJI_PLACEHOLDER, &emoji_value)
        .replace(SUBJECT_PLACEHOLDER, subject)
}

/// Renders the document's template with its first commit type and
/// [`EXAMPLE_SUBJECT`].
#[must_use]
pub fn preview(doc: &ConfigDocument, resolver: &EmojiResolver) -> String {
    let (label, emoji) = doc
        .commit_types
        .first()
        .map_or(("", ""), |(key, entry)| (entry.display_label(key), entry.emoji.as_str()));

    render(
        &doc.commit_template,
        label,
        emoji,
        EXAMPLE_SUBJECT,
        doc.toggles(),
        resolver,
    )
}

/// A reason a template cannot be accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateIssue {
    MissingSubject,
    MissingEmoji,
    MissingType,
}

impl fmt::Display for TemplateIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateIssue::MissingSubject => write!(f, "Template must include <subject>."),
            TemplateIssue::MissingEmoji => {
                write!(f, "<emoji> must be included when emoji is enabled.")
            }
            TemplateIssue::MissingType => write!(f, "<type> must be included when type is enabled."),
        }
    }
}

/// Lists every requirement `template` misses under the given toggles.
#[must_use]
pub fn validate(template: &str, toggles: Toggles) -> Vec<TemplateIssue> {
    let mut issues = Vec::new();

    if !template.contains(SUBJECT_PLACEHOLDER) {
        issues.push(TemplateIssue::MissingSubject);
    }
    if toggles.include_emoji && !template.contains(EMOJI_PLACEHOLDER) {
        issues.push(TemplateIssue::MissingEmoji);
    }
    if toggles.include_type && !template.contains(TYPE_PLACEHOLDER) {
        issues.push(TemplateIssue::MissingType);
    }

    issues
}

/// Template derived from [`CANONICAL_TEMPLATE`] for the given toggles.
///
/// ```
/// use snippy::template::{normalized_template, Toggles};
///
/// let toggles = Toggles { include_type: false, include_emoji: true };
/// assert_eq!(normalized_template(toggles), "<emoji> <subject>");
/// ```
#[must_use]
pub fn normalized_template(toggles: Toggles) -> String {
    let mut template = CANONICAL_TEMPLATE.to_string();

    if !toggles.include_type {
        template = template.replace("<type>: ", "");
    }
    if !toggles.include_emoji {
        template = template.replace("<emoji> ", "");
    }

    template
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_OFF: Toggles = Toggles {
        include_type: false,
        include_emoji: false,
    };

    fn resolver() -> EmojiResolver {
        EmojiResolver::new()
    }

    #[test]
    fn test_render_full_template() {
        let message = render(
            CANONICAL_TEMPLATE,
            "feat",
            ":sparkles:",
            "add login page",
            Toggles::default(),
            &resolver(),
        );

        assert_eq!(message, "feat: ✨ add login page");
    }

    #[test]
    fn test_render_strips_disabled_placeholders() {
        let toggles = Toggles {
            include_type: false,
            include_emoji: true,
        };
        let message = render(CANONICAL_TEMPLATE, "fix", ":bug:", "crash", toggles, &resolver());

        assert_eq!(message, ": 🐛 crash");

        let message = render(CANONICAL_TEMPLATE, "fix", ":bug:", "crash", ALL_OFF, &resolver());
        assert_eq!(message, ":  crash");
    }

    #[test]
    fn test_render_unknown_emoji_keeps_code() {
        let message = render(
            "<emoji> <subject>",
            "",
            ":nope_nope:",
            "x",
            Toggles::default(),
            &resolver(),
        );

        assert_eq!(message, ":nope_nope: x");
    }

    #[test]
    fn test_render_resolves_every_placeholder_once() {
        let templates = [
            CANONICAL_TEMPLATE,
            "<subject>",
            "<emoji><type><subject>",
            "[<type>] <subject> <emoji> <type>",
        ];

        for template in templates {
            for toggles in [Toggles::default(), ALL_OFF] {
                let once = render(template, "feat", ":sparkles:", "msg", toggles, &resolver());

                assert!(!once.contains(TYPE_PLACEHOLDER));
                assert!(!once.contains(EMOJI_PLACEHOLDER));
                assert!(!once.contains(SUBJECT_PLACEHOLDER));

                let twice = render(&once, "feat", ":sparkles:", "msg", toggles, &resolver());
                assert_eq!(once, twice);
            }
        }
    }

    #[test]
    fn test_preview_uses_first_entry_label() {
        let doc = ConfigDocument::default();

        assert_eq!(preview(&doc, &resolver()), "feat: ✨ This is example comment.");
    }

    #[test]
    fn test_preview_with_empty_catalogue() {
        let mut doc = ConfigDocument::default();
        doc.commit_types = crate::config::Catalogue::default();

        assert_eq!(preview(&doc, &resolver()), ":  This is example comment.");
    }

    #[test]
    fn test_validate_reports_every_issue() {
        assert!(validate(CANONICAL_TEMPLATE, Toggles::default()).is_empty());
        assert_eq!(
            validate("nothing here", Toggles::default()),
            vec![
                TemplateIssue::MissingSubject,
                TemplateIssue::MissingEmoji,
                TemplateIssue::MissingType
            ]
        );
        assert!(validate("<subject>", ALL_OFF).is_empty());
        assert_eq!(
            validate("<type> <subject>", Toggles::default()),
            vec![TemplateIssue::MissingEmoji]
        );
    }

    #[test]
    fn test_normalized_template() {
        assert_eq!(normalized_template(Toggles::default()), CANONICAL_TEMPLATE);
        assert_eq!(
            normalized_template(Toggles {
                include_type: true,
                include_emoji: false
            }),
            "<type>: <subject>"
        );
        assert_eq!(normalized_template(ALL_OFF), "<subject>");
    }
}
