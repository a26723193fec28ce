use console::style;

/// Horizontal rule printed around every menu.
pub const SEPARATOR: &str = "----------------------------------------";

/// # `MessageType`
/// Trait for message types.
trait MessageType {
    /// The emoji prefix for each message type (e.g., "🚨 ERROR")
    const PREFIX: &'static str;

    /// Whether to output to stderr (true) or stdout (false)
    const TO_STDERR: bool = false;

    /// Colours the prefix for terminal display.
    fn paint(prefix: &str) -> String;
}

// Define the message types
struct Error;
struct Warning;
struct Success;
struct Info;

impl MessageType for Error {
    const PREFIX: &'static str = "🚨 ERROR";
    const TO_STDERR: bool = true;

    fn paint(prefix: &str) -> String {
        style(prefix).red().bold().to_string()
    }
}

impl MessageType for Warning {
    const PREFIX: &'static str = "⚠️ WARNING";

    fn paint(prefix: &str) -> String {
        style(prefix).yellow().bold().to_string()
    }
}

impl MessageType for Success {
    const PREFIX: &'static str = "✅ SUCCESS";

    fn paint(prefix: &str) -> String {
        style(prefix).green().bold().to_string()
    }
}

impl MessageType for Info {
    const PREFIX: &'static str = "ℹ️ INFO";

    fn paint(prefix: &str) -> String {
        style(prefix).blue().bold().to_string()
    }
}

/// # `format_message`
/// Formats a message. The details line is omitted when empty.
///
/// ## Returns
/// * String - The formatted message.
fn format_message<T: MessageType>(title: &str, details: &str) -> String {
    let prefix = T::paint(T::PREFIX);

    if details.is_empty() {
        format!("{prefix}: {title}")
    } else {
        format!("{prefix}: {title}\n{details}")
    }
}

fn print_message<T: MessageType>(title: &str, details: &str) {
    let message = format_message::<T>(title, details);

    if T::TO_STDERR {
        eprintln!("{message}");
    } else {
        println!("{message}");
    }
}

/// # `print_error`
/// Prints an error message with a consistent format for user-friendly display.
///
/// ## Arguments
/// - `title`: The title of the error message.
/// - `details`: The details of the error message, may be empty.
pub fn print_error(title: &str, details: &str) {
    print_message::<Error>(title, details);
}

/// # `print_warning`
/// Prints a warning message with a consistent format for user-friendly display.
pub fn print_warning(title: &str, details: &str) {
    print_message::<Warning>(title, details);
}

/// # `print_success`
/// Prints a success message with a consistent format for user-friendly display.
pub fn print_success(title: &str, details: &str) {
    print_message::<Success>(title, details);
}

/// # `print_info`
/// Prints an informational message with a consistent format for user-friendly display.
pub fn print_info(title: &str, details: &str) {
    print_message::<Info>(title, details);
}

/// Renders a toggle state as a coloured `on` / `off`.
#[must_use]
pub fn on_off(enabled: bool) -> String {
    if enabled {
        style("on").green().bold().to_string()
    } else {
        style("off").red().bold().to_string()
    }
}

/// Prints a dimmed separator line.
pub fn print_separator() {
    println!("{}", style(SEPARATOR).dim());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_message_without_details() {
        console::set_colors_enabled(false);

        assert_eq!(
            format_message::<Error>("Invalid option", ""),
            "🚨 ERROR: Invalid option"
        );
    }

    #[test]
    fn test_format_message_with_details() {
        console::set_colors_enabled(false);

        assert_eq!(
            format_message::<Warning>("No staged files", "git commit -m \"x\""),
            "⚠️ WARNING: No staged files\ngit commit -m \"x\""
        );
    }

    #[test]
    fn test_on_off_plain() {
        console::set_colors_enabled(false);

        assert_eq!(on_off(true), "on");
        assert_eq!(on_off(false), "off");
    }
}
