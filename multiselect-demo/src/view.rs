//! Layout and drawing of the control in terminal cells.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Color, Print, SetBackgroundColor, SetForegroundColor};
use multiselect::{Controller, FixedSizeList, Presentation, Rect};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ORIGIN_X: u16 = 2;
const INPUT_Y: u16 = 1;
const MAX_WIDTH: u16 = 48;

/// Where things landed on the last draw.
#[derive(Debug, Clone, Copy, Default)]
pub struct Frame {
    pub input: Rect,
    pub clear: Option<Rect>,
    pub header: Option<Rect>,
    pub list: Option<Rect>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Input,
    Clear,
    Header,
    /// Viewport-relative line inside the list.
    Row(u32),
}

impl Frame {
    pub fn hit(&self, x: u16, y: u16) -> Option<Hit> {
        if self.clear.is_some_and(|r| r.contains(x, y)) {
            return Some(Hit::Clear);
        }
        if self.input.contains(x, y) {
            return Some(Hit::Input);
        }
        if self.header.is_some_and(|r| r.contains(x, y)) {
            return Some(Hit::Header);
        }
        match self.list {
            Some(list) if list.contains(x, y) => Some(Hit::Row(u32::from(y - list.y))),
            _ => None,
        }
    }

    fn panel(&self) -> Rect {
        let header = self.header.unwrap_or_default();
        let list = self.list.unwrap_or_default();
        header.union(&list)
    }
}

/// Parse `#rgb` / `#rrggbb`. Anything else falls back to the terminal default.
pub fn parse_color(value: &str) -> Color {
    match value.strip_prefix('#').and_then(rgb) {
        Some((r, g, b)) => Color::Rgb { r, g, b },
        None => Color::Reset,
    }
}

fn rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let pair = |range: std::ops::Range<usize>| u8::from_str_radix(hex.get(range)?, 16).ok();
    match hex.len() {
        3 => {
            let mut digits = hex.chars().map(|c| c.to_digit(16).map(|v| v as u8 * 17));
            Some((digits.next()??, digits.next()??, digits.next()??))
        }
        6 => Some((pair(0..2)?, pair(2..4)?, pair(4..6)?)),
        _ => None,
    }
}

/// `text` cut or padded to exactly `width` columns.
pub fn fit(text: &str, width: usize) -> String {
    if text.width() <= width {
        let mut out = text.to_string();
        out.push_str(&" ".repeat(width - text.width()));
        return out;
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    if width > 0 {
        out.push('…');
        used += 1;
    }
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}

pub fn draw(
    out: &mut impl Write,
    (cols, lines): (u16, u16),
    control: &Controller<usize>,
    list: &mut FixedSizeList,
    hovered: Option<usize>,
    selected: usize,
) -> io::Result<Frame> {
    let options = control.options();
    let colors = &options.presentation;
    let width = cols.saturating_sub(ORIGIN_X * 2).min(MAX_WIDTH);
    if width < 8 || lines < INPUT_Y + 3 {
        return Ok(Frame::default());
    }

    let mut frame = Frame {
        input: Rect::new(ORIGIN_X, INPUT_Y, width, 1),
        ..Frame::default()
    };

    // Input line: text, clear button, chevron.
    let view = control.input_view();
    let (text, text_color) = match &view.placeholder {
        Some(placeholder) => (placeholder.as_str(), Color::DarkGrey),
        None => (view.text.as_str(), parse_color(&colors.text)),
    };
    queue!(
        out,
        MoveTo(ORIGIN_X, INPUT_Y),
        SetBackgroundColor(parse_color(&colors.background)),
        SetForegroundColor(text_color),
        Print(fit(&format!(" {}", text), usize::from(width - 4))),
    )?;
    if control.clear_visible() {
        frame.clear = Some(Rect::new(ORIGIN_X + width - 4, INPUT_Y, 3, 1));
        queue!(out, SetForegroundColor(parse_color(&colors.clear_button)), Print(" × "))?;
    } else {
        queue!(out, Print("   "))?;
    }
    let chevron = if control.is_open() { "▴" } else { "▾" };
    queue!(out, SetForegroundColor(parse_color(&colors.text)), Print(chevron))?;

    let mut y = INPUT_Y + 1;
    let room = u32::from(lines.saturating_sub(y + 2));

    if let Some(header) = control.header().filter(|_| control.is_open()) {
        let height = options.header_height.min(room) as u16;
        let mark = if header.checked { "[x]" } else { "[ ]" };
        for line in 0..height {
            let label = if line == 0 { format!(" {} {}", mark, header.label) } else { String::new() };
            queue!(
                out,
                MoveTo(ORIGIN_X, y + line),
                SetBackgroundColor(parse_color(&colors.background)),
                SetForegroundColor(parse_color(&colors.checkmark)),
                Print(fit(&label, usize::from(width))),
            )?;
        }
        frame.header = Some(Rect::new(ORIGIN_X, y, width, height));
        y += height;
    }

    if let Some(window) = control.window() {
        list.sync(&window);
        let height = window.height().min(room) as u16;
        let offset = i64::from(list.scroll.offset);
        for row in window.visible_rows(&*list) {
            let top = i64::from(row.offset) - offset;
            let background = parse_color(row.background(hovered == Some(row.index)));
            for line in 0..i64::from(window.row_height()) {
                let screen = top + line;
                if screen < 0 || screen >= i64::from(height) {
                    continue;
                }
                queue!(out, MoveTo(ORIGIN_X, y + screen as u16), SetBackgroundColor(background))?;
                if line != 0 {
                    queue!(out, Print(fit("", usize::from(width))))?;
                    continue;
                }
                let mark = if row.show_checkmark() { " ✓ " } else { "   " };
                queue!(
                    out,
                    SetForegroundColor(parse_color(&colors.checkmark)),
                    Print(mark),
                    SetForegroundColor(parse_color(&colors.text)),
                    Print(fit(row.label(), usize::from(width - 3))),
                )?;
            }
        }
        frame.list = Some(Rect::new(ORIGIN_X, y, width, height));
    }

    control.set_region(frame.input.union(&frame.panel()));

    status(out, lines - 1, control, selected, colors)?;
    Ok(frame)
}

fn status(
    out: &mut impl Write,
    y: u16,
    control: &Controller<usize>,
    selected: usize,
    colors: &Presentation,
) -> io::Result<()> {
    let shown = control.filtered().len();
    let total = control.catalog().len();
    let hint = if control.is_open() {
        "type to filter, esc closes"
    } else {
        "click the input to open, q quits"
    };
    queue!(
        out,
        MoveTo(ORIGIN_X, y),
        SetBackgroundColor(Color::Reset),
        SetForegroundColor(parse_color(&colors.clear_button)),
        Print(format!("{} selected | {} of {} shown | {}", selected, shown, total, hint)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("#ffffff"), Color::Rgb { r: 255, g: 255, b: 255 });
        assert_eq!(parse_color("#666"), Color::Rgb { r: 102, g: 102, b: 102 });
        assert_eq!(parse_color("#2196f3"), Color::Rgb { r: 33, g: 150, b: 243 });
        assert_eq!(parse_color("red"), Color::Reset);
        assert_eq!(parse_color("#12"), Color::Reset);
    }

    #[test]
    fn test_fit() {
        assert_eq!(fit("abc", 5), "abc  ");
        assert_eq!(fit("abcdef", 4), "abc…");
        assert_eq!(fit("", 0), "");
    }

    #[test]
    fn test_frame_hit() {
        let frame = Frame {
            input: Rect::new(2, 1, 20, 1),
            clear: Some(Rect::new(18, 1, 3, 1)),
            header: Some(Rect::new(2, 2, 20, 1)),
            list: Some(Rect::new(2, 3, 20, 5)),
        };
        assert_eq!(frame.hit(19, 1), Some(Hit::Clear));
        assert_eq!(frame.hit(3, 1), Some(Hit::Input));
        assert_eq!(frame.hit(3, 2), Some(Hit::Header));
        assert_eq!(frame.hit(3, 5), Some(Hit::Row(2)));
        assert_eq!(frame.hit(30, 5), None);
        assert_eq!(frame.panel(), Rect::new(2, 2, 20, 6));
    }
}
