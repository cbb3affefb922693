//! Syntax highlighting for code panels
//!
//! [`highlight_code`] is a pure function of the code text, its language tag,
//! and the theme. It never alters the text: joining the spans of every line
//! with `\n` gives back the input exactly.

use once_cell::sync::Lazy;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use syntect::easy::HighlightLines;
use syntect::highlighting::{FontStyle, ThemeSet};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use crate::theme::Theme;

static SYNTAX_SET: Lazy<SyntaxSet> = Lazy::new(SyntaxSet::load_defaults_newlines);

static THEME_SET: Lazy<ThemeSet> = Lazy::new(ThemeSet::load_defaults);

const SYNTECT_THEME: &str = "base16-ocean.dark";

/// Map common language names/aliases to syntect syntax names
fn normalize_language(lang: &str) -> &str {
    let base_lang = lang.split(',').next().unwrap_or(lang).trim();

    match base_lang.to_lowercase().as_str() {
        "py" | "python" | "python3" => "Python",
        "rs" | "rust" => "Rust",
        "js" | "javascript" => "JavaScript",
        "ts" | "typescript" => "TypeScript",
        "json" => "JSON",
        "yaml" | "yml" => "YAML",
        "toml" => "TOML",
        "md" | "markdown" => "Markdown",
        "sh" | "bash" | "shell" | "zsh" | "console" => "Bourne Again Shell (bash)",
        "sql" => "SQL",
        "dockerfile" | "docker" => "Dockerfile",
        "ini" | "cfg" | "conf" | "env" => "INI",
        _ => base_lang,
    }
}

fn find_syntax(language: Option<&str>) -> Option<&'static SyntaxReference> {
    let lang = language?;
    let normalized = normalize_language(lang);

    SYNTAX_SET
        .find_syntax_by_name(normalized)
        .or_else(|| SYNTAX_SET.find_syntax_by_extension(&normalized.to_lowercase()))
        .or_else(|| SYNTAX_SET.find_syntax_by_extension(lang))
}

fn syntect_to_ratatui_color(color: syntect::highlighting::Color) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}

fn syntect_style(style: syntect::highlighting::Style, theme: &Theme) -> Style {
    let mut converted =
        Style::default().fg(syntect_to_ratatui_color(style.foreground)).bg(theme.code_bg);
    if style.font_style.contains(FontStyle::BOLD) {
        converted = converted.add_modifier(Modifier::BOLD);
    }
    if style.font_style.contains(FontStyle::ITALIC) {
        converted = converted.add_modifier(Modifier::ITALIC);
    }
    if style.font_style.contains(FontStyle::UNDERLINE) {
        converted = converted.add_modifier(Modifier::UNDERLINED);
    }
    converted
}

/// Highlight a whole code sample into display lines
pub fn highlight_code(code: &str, language: Option<&str>, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = find_syntax(language)
        .and_then(|syntax| highlight_with_syntect(code, syntax, theme))
        .unwrap_or_else(|| {
            code.lines().map(|line| Line::from(highlight_basic(line, language, theme))).collect()
        });

    // `lines()` drops the empty line after a trailing newline
    if code.ends_with('\n') {
        lines.push(Line::default());
    }
    lines
}

/// Highlighting state carries across lines, so multi-line strings and
/// docstrings are coloured correctly.
fn highlight_with_syntect(
    code: &str,
    syntax: &SyntaxReference,
    theme: &Theme,
) -> Option<Vec<Line<'static>>> {
    let syntect_theme = THEME_SET.themes.get(SYNTECT_THEME)?;
    let mut highlighter = HighlightLines::new(syntax, syntect_theme);
    let mut lines = Vec::new();

    for line in LinesWithEndings::from(code) {
        let ranges = match highlighter.highlight_line(line, &SYNTAX_SET) {
            Ok(ranges) => ranges,
            Err(err) => {
                tracing::debug!(error = %err, "syntect failed, using basic highlighting");
                return None;
            }
        };

        let spans: Vec<Span<'static>> = ranges
            .into_iter()
            .filter_map(|(style, text)| {
                let text = text.strip_suffix('\n').unwrap_or(text);
                let text = text.strip_suffix('\r').unwrap_or(text);
                (!text.is_empty()).then(|| Span::styled(text.to_string(), syntect_style(style, theme)))
            })
            .collect();
        lines.push(Line::from(spans));
    }

    Some(lines)
}

fn keywords_for(language: Option<&str>) -> &'static [&'static str] {
    match language.map(normalize_language) {
        Some("Python") => &[
            "def", "class", "if", "elif", "else", "for", "while", "try", "except", "finally",
            "with", "as", "import", "from", "return", "yield", "raise", "pass", "break",
            "continue", "lambda", "and", "or", "not", "in", "is", "None", "True", "False", "async",
            "await", "global", "nonlocal", "self",
        ],
        Some("YAML") => &["true", "false", "null", "yes", "no", "on", "off"],
        Some("Bourne Again Shell (bash)") => &[
            "if", "then", "else", "fi", "for", "do", "done", "while", "case", "esac", "export",
            "function", "return", "local", "echo", "cd", "pip", "python",
        ],
        Some("JSON") => &["true", "false", "null"],
        _ => &[
            "if", "else", "for", "while", "return", "function", "class", "import", "export",
            "const", "let", "var", "true", "false", "null", "nil", "None",
        ],
    }
}

fn hash_comments(language: Option<&str>) -> bool {
    matches!(
        language.map(normalize_language),
        Some("Python" | "YAML" | "Bourne Again Shell (bash)" | "TOML" | "INI")
    )
}

/// Keyword-based highlighting for languages syntect does not know
fn highlight_basic(line: &str, language: Option<&str>, theme: &Theme) -> Vec<Span<'static>> {
    let base_style = Style::default().fg(theme.fg_primary).bg(theme.code_bg);
    let styled = |color: Color| Style::default().fg(color).bg(theme.code_bg);
    let keywords = keywords_for(language);
    let hash_comments = hash_comments(language);

    let mut spans = Vec::new();
    let mut word = String::new();
    let mut chars = line.chars().peekable();

    let flush = |word: &mut String, spans: &mut Vec<Span<'static>>| {
        if !word.is_empty() {
            spans.push(make_span(word, keywords, base_style, theme));
            word.clear();
        }
    };

    while let Some(c) = chars.next() {
        match c {
            '"' | '\'' | '`' => {
                flush(&mut word, &mut spans);
                let mut literal = String::from(c);
                let mut escaped = false;
                for ch in chars.by_ref() {
                    literal.push(ch);
                    if escaped {
                        escaped = false;
                    } else if ch == '\\' {
                        escaped = true;
                    } else if ch == c {
                        break;
                    }
                }
                spans.push(Span::styled(literal, styled(theme.syntax_string)));
            }
            '#' if hash_comments => {
                flush(&mut word, &mut spans);
                let comment: String = std::iter::once('#').chain(chars.by_ref()).collect();
                spans.push(Span::styled(comment, styled(theme.syntax_comment)));
            }
            '/' if !hash_comments && chars.peek() == Some(&'/') => {
                flush(&mut word, &mut spans);
                let comment: String = std::iter::once('/').chain(chars.by_ref()).collect();
                spans.push(Span::styled(comment, styled(theme.syntax_comment)));
            }
            '0'..='9' if word.is_empty() => {
                let mut number = String::from(c);
                while let Some(&ch) = chars.peek() {
                    if !(ch.is_ascii_alphanumeric() || ch == '.' || ch == '_') {
                        break;
                    }
                    number.push(ch);
                    chars.next();
                }
                spans.push(Span::styled(number, styled(theme.syntax_number)));
            }
            c if c.is_alphanumeric() || c == '_' => word.push(c),
            _ => {
                flush(&mut word, &mut spans);
                let style = if "+-*/%=<>!&|^~?:;,.()[]{}".contains(c) {
                    styled(theme.syntax_operator)
                } else {
                    base_style
                };
                spans.push(Span::styled(c.to_string(), style));
            }
        }
    }
    flush(&mut word, &mut spans);

    spans
}

fn make_span(word: &str, keywords: &[&str], base_style: Style, theme: &Theme) -> Span<'static> {
    let style = if keywords.contains(&word) {
        base_style.fg(theme.syntax_keyword).add_modifier(Modifier::BOLD)
    } else if word.starts_with(|c: char| c.is_uppercase()) && word.len() > 1 {
        base_style.fg(theme.syntax_type)
    } else {
        base_style
    };
    Span::styled(word.to_string(), style)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;

    fn text_of(lines: &[Line<'_>]) -> String {
        lines
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn normalize_aliases() {
        assert_eq!(normalize_language("py"), "Python");
        assert_eq!(normalize_language("yml"), "YAML");
        assert_eq!(normalize_language("console"), "Bourne Again Shell (bash)");
        assert_eq!(normalize_language("rust,ignore"), "Rust");
    }

    #[test]
    fn python_and_yaml_are_supported() {
        assert!(find_syntax(Some("python")).is_some());
        assert!(find_syntax(Some("yaml")).is_some());
        assert!(find_syntax(Some("graphviz-ish")).is_none());
    }

    #[test]
    fn python_sample_keeps_its_text() {
        let code = "def planner_node(state):\n    \"\"\"Plan.\n    More.\"\"\"\n    return state";
        let lines = highlight_code(code, Some("python"), &Theme::default());
        assert_eq!(lines.len(), 4);
        assert_eq!(text_of(&lines), code);
    }

    #[test]
    fn python_keywords_get_keyword_colors() {
        let lines = highlight_code("def f():\n    pass", Some("python"), &Theme::default());
        let colors: Vec<_> = lines[0].spans.iter().filter_map(|s| s.style.fg).collect();
        assert!(colors.windows(2).any(|w| w[0] != w[1]), "expected more than one colour");
    }

    #[test]
    fn trailing_newline_is_preserved() {
        let code = "a: 1\n";
        let lines = highlight_code(code, Some("yaml"), &Theme::default());
        assert_eq!(text_of(&lines), code);
    }

    #[test]
    fn unknown_language_uses_basic_highlighting() {
        let theme = Theme::default();
        let lines = highlight_code("if x then \"y\" // note", Some("mystery"), &theme);
        assert_eq!(text_of(&lines), "if x then \"y\" // note");
        let keyword = &lines[0].spans[0];
        assert_eq!(keyword.content, "if");
        assert_eq!(keyword.style.fg, Some(theme.syntax_keyword));
    }

    #[test]
    fn basic_highlighter_colours_python_comments() {
        let theme = Theme::default();
        let spans = highlight_basic("x = 1  # note", Some("python"), &theme);
        let comment = spans.last().unwrap();
        assert_eq!(comment.content, "# note");
        assert_eq!(comment.style.fg, Some(theme.syntax_comment));
    }

    #[test]
    fn no_language_still_renders() {
        let lines = highlight_code("plain text", None, &Theme::default());
        assert_eq!(text_of(&lines), "plain text");
    }

    #[test]
    fn empty_code_has_no_lines() {
        assert!(highlight_code("", Some("python"), &Theme::default()).is_empty());
    }

    proptest! {
        #[test]
        fn basic_highlighting_never_alters_text(line in "[ -~]{0,60}") {
            let spans = highlight_basic(&line, Some("python"), &Theme::default());
            let text: String = spans.iter().map(|s| s.content.as_ref()).collect();
            prop_assert_eq!(text, line);
        }

        #[test]
        fn syntect_highlighting_never_alters_text(code in "[a-z_=():\"' \n]{0,80}") {
            let lines = highlight_code(&code, Some("python"), &Theme::default());
            prop_assert_eq!(text_of(&lines), code);
        }
    }
}
