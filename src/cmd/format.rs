/*!
format.rs

Formatting helpers for human-readable CLI output.

  - StyleOptions::detect() honours NO_COLOR / NO_EMOJI
  - color(role, text, &style)
  - emoji(tag, &style)
  - box_header(title, subtitle, &style)

JSON output paths do not use these helpers.
*/

/* -------------------------------------------------------------------------- */
/* Style Options                                                              */
/* -------------------------------------------------------------------------- */

#[derive(Debug, Clone)]
pub struct StyleOptions {
    pub use_color: bool,
    pub use_emoji: bool,
}

impl StyleOptions {
    pub fn detect() -> Self {
        StyleOptions {
            use_color: std::env::var_os("NO_COLOR").is_none(),
            use_emoji: std::env::var_os("NO_EMOJI").is_none(),
        }
    }

    #[cfg(test)]
    pub fn plain() -> Self {
        StyleOptions {
            use_color: false,
            use_emoji: false,
        }
    }
}

/* -------------------------------------------------------------------------- */
/* Color / Emoji                                                              */
/* -------------------------------------------------------------------------- */

#[derive(Debug, Clone, Copy)]
pub enum Role {
    Primary,
    Secondary,
    Success,
    Error,
    Dim,
}

pub fn color(role: Role, text: impl AsRef<str>, style: &StyleOptions) -> String {
    if !style.use_color {
        return text.as_ref().to_string();
    }
    let code = match role {
        Role::Primary => "38;5;45",    // cyan-ish
        Role::Secondary => "38;5;250", // gray
        Role::Success => "38;5;82",    // green
        Role::Error => "38;5;196",     // red
        Role::Dim => "2",
    };
    format!("\x1b[{code}m{}\x1b[0m", text.as_ref())
}

pub fn emoji(tag: &str, style: &StyleOptions) -> &'static str {
    if !style.use_emoji {
        return "";
    }
    match tag {
        "success" => "✔",
        "error" => "✖",
        "info" => "ℹ",
        "tool" => "🛠",
        "link" => "🔗",
        _ => "",
    }
}

/* -------------------------------------------------------------------------- */
/* Box Header                                                                 */
/* -------------------------------------------------------------------------- */

/// Single-line title (plus optional subtitle) inside a light box.
pub fn box_header(title: impl AsRef<str>, subtitle: Option<&str>, style: &StyleOptions) -> String {
    let title = color(Role::Primary, title.as_ref(), style);
    let inner = match subtitle {
        Some(sub) => format!("{title}  {}", color(Role::Secondary, sub, style)),
        None => title,
    };
    let width = visible_width(&inner) + 2;
    let rule = "─".repeat(width);
    format!("┌{rule}┐\n│ {inner} │\n└{rule}┘")
}

/// Character count ignoring ANSI escape sequences.
fn visible_width(s: &str) -> usize {
    let mut width = 0;
    let mut in_escape = false;
    for c in s.chars() {
        match (in_escape, c) {
            (false, '\x1b') => in_escape = true,
            (true, 'm') => in_escape = false,
            (true, _) => {}
            (false, _) => width += 1,
        }
    }
    width
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_style_has_no_escapes() {
        let style = StyleOptions::plain();
        assert_eq!(color(Role::Error, "boom", &style), "boom");
        assert_eq!(emoji("success", &style), "");
    }

    #[test]
    fn box_header_width_ignores_color() {
        let colored = StyleOptions {
            use_color: true,
            use_emoji: false,
        };
        let plain = box_header("Dispatched", Some("dry run"), &StyleOptions::plain());
        let fancy = box_header("Dispatched", Some("dry run"), &colored);
        let top = |s: &str| s.lines().next().unwrap().to_string();
        assert_eq!(top(&plain), top(&fancy));
        assert!(plain.contains("│ Dispatched  dry run │"));
    }
}
