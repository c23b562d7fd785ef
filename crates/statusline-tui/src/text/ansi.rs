//! Materializing styled lines as terminal escape sequences.

use crossterm::style::{
    Attribute, Color as CColor, Print, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::Command;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;

/// Plain text of a line, styles dropped.
pub fn plain_text(line: &Line<'_>) -> String {
    line.spans.iter().map(|span| span.content.as_ref()).collect()
}

/// Render a line as ANSI text.
///
/// With `color` off this is [`plain_text`].
pub fn to_ansi(line: &Line<'_>, color: bool) -> String {
    if !color {
        return plain_text(line);
    }

    let mut out = String::new();
    for span in &line.spans {
        let style = line.style.patch(span.style);
        if is_plain(style) {
            out.push_str(&span.content);
            continue;
        }
        // Writing into a String cannot fail.
        let _ = write_styled(&mut out, &span.content, style);
    }
    out
}

fn is_plain(style: Style) -> bool {
    style.fg.is_none() && style.bg.is_none() && style.add_modifier.is_empty()
}

fn write_styled(out: &mut String, text: &str, style: Style) -> std::fmt::Result {
    if let Some(fg) = style.fg {
        SetForegroundColor(to_crossterm(fg)).write_ansi(out)?;
    }
    if let Some(bg) = style.bg {
        SetBackgroundColor(to_crossterm(bg)).write_ansi(out)?;
    }
    if style.add_modifier.contains(Modifier::BOLD) {
        SetAttribute(Attribute::Bold).write_ansi(out)?;
    }
    if style.add_modifier.contains(Modifier::DIM) {
        SetAttribute(Attribute::Dim).write_ansi(out)?;
    }
    if style.add_modifier.contains(Modifier::ITALIC) {
        SetAttribute(Attribute::Italic).write_ansi(out)?;
    }
    if style.add_modifier.contains(Modifier::UNDERLINED) {
        SetAttribute(Attribute::Underlined).write_ansi(out)?;
    }
    Print(text).write_ansi(out)?;
    SetAttribute(Attribute::Reset).write_ansi(out)
}

fn to_crossterm(color: Color) -> CColor {
    match color {
        Color::Reset => CColor::Reset,
        Color::Black => CColor::Black,
        Color::Red => CColor::DarkRed,
        Color::Green => CColor::DarkGreen,
        Color::Yellow => CColor::DarkYellow,
        Color::Blue => CColor::DarkBlue,
        Color::Magenta => CColor::DarkMagenta,
        Color::Cyan => CColor::DarkCyan,
        Color::Gray => CColor::Grey,
        Color::DarkGray => CColor::DarkGrey,
        Color::LightRed => CColor::Red,
        Color::LightGreen => CColor::Green,
        Color::LightYellow => CColor::Yellow,
        Color::LightBlue => CColor::Blue,
        Color::LightMagenta => CColor::Magenta,
        Color::LightCyan => CColor::Cyan,
        Color::White => CColor::White,
        Color::Rgb(r, g, b) => CColor::Rgb { r, g, b },
        Color::Indexed(i) => CColor::AnsiValue(i),
    }
}
