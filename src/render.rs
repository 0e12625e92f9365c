use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};
use std::io::{self, Write};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb
{
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb
{
    pub const WHITE: Rgb = Rgb { r: 255, g: 255, b: 255 };
    pub const MUTED: Rgb = Rgb { r: 130, g: 130, b: 150 };
    pub const DIM: Rgb = Rgb { r: 70, g: 70, b: 90 };
    pub const RED: Rgb = Rgb { r: 255, g: 70, b: 70 };
    pub const GOLD: Rgb = Rgb { r: 255, g: 215, b: 0 };

    /// Blend towards black; `t` of 1.0 keeps the colour, 0.0 is black.
    pub fn scaled(self, t: f32) -> Rgb
    {
        let t = t.clamp(0.0, 1.0);
        Rgb {
            r: (self.r as f32 * t) as u8,
            g: (self.g as f32 * t) as u8,
            b: (self.b as f32 * t) as u8,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Style
{
    pub fg: Option<Rgb>,
    pub bold: bool,
}

impl Style
{
    pub fn fg(color: Rgb) -> Self
    {
        Self {
            fg: Some(color),
            bold: false,
        }
    }

    pub fn bold(mut self) -> Self
    {
        self.bold = true;
        self
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect
{
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect
{
    pub fn contains(&self, column: u16, row: u16) -> bool
    {
        column >= self.x
            && row >= self.y
            && column < self.x.saturating_add(self.width)
            && row < self.y.saturating_add(self.height)
    }
}

#[derive(Clone, Copy)]
struct Cell
{
    ch: char,
    style: Style,
}

const BLANK: Cell = Cell {
    ch: ' ',
    style: Style {
        fg: None,
        bold: false,
    },
};

/// Off-screen cell grid. Everything drawn outside the grid is clipped.
pub struct Canvas
{
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Canvas
{
    pub fn new(width: u16, height: u16) -> Self
    {
        Self {
            width,
            height,
            cells: vec![BLANK; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16
    {
        self.width
    }

    pub fn height(&self) -> u16
    {
        self.height
    }

    pub fn put(&mut self, x: u16, y: u16, ch: char, style: Style)
    {
        if x < self.width && y < self.height {
            let idx = y as usize * self.width as usize + x as usize;
            self.cells[idx] = Cell { ch, style };
        }
    }

    /// Writes `text` starting at `(x, y)`, returns the column after the last char.
    pub fn text(&mut self, x: u16, y: u16, text: &str, style: Style) -> u16
    {
        let mut col = x;
        for ch in text.chars() {
            if col >= self.width {
                break;
            }
            self.put(col, y, ch, style);
            col += 1;
        }
        col
    }

    /// Same as `text` but never writes past `x + max_width`, marking the cut with `~`.
    pub fn text_clipped(&mut self, x: u16, y: u16, text: &str, max_width: u16, style: Style)
    {
        let len = text.chars().count();
        if len <= max_width as usize {
            self.text(x, y, text, style);
            return;
        }
        if max_width == 0 {
            return;
        }
        let cut: String = text.chars().take(max_width as usize - 1).collect();
        let col = self.text(x, y, &cut, style);
        self.put(col, y, '~', style);
    }

    pub fn text_centered(&mut self, y: u16, text: &str, style: Style)
    {
        let len = text.chars().count() as u16;
        let x = self.width.saturating_sub(len) / 2;
        self.text(x, y, text, style);
    }

    pub fn frame(&mut self, area: Rect, color: Rgb, double: bool)
    {
        if area.width < 2 || area.height < 2 {
            return;
        }
        let (h, v, tl, tr, bl, br) = if double {
            ('═', '║', '╔', '╗', '╚', '╝')
        } else {
            ('─', '│', '╭', '╮', '╰', '╯')
        };
        let style = Style::fg(color);
        let right = area.x.saturating_add(area.width - 1);
        let bottom = area.y.saturating_add(area.height - 1);
        for x in area.x.saturating_add(1)..right.min(self.width) {
            self.put(x, area.y, h, style);
            self.put(x, bottom, h, style);
        }
        for y in area.y.saturating_add(1)..bottom.min(self.height) {
            self.put(area.x, y, v, style);
            self.put(right, y, v, style);
        }
        self.put(area.x, area.y, tl, style);
        self.put(right, area.y, tr, style);
        self.put(area.x, bottom, bl, style);
        self.put(right, bottom, br, style);
    }

    /// Plain text of one row, trailing blanks trimmed.
    pub fn row_text(&self, y: u16) -> String
    {
        if y >= self.height {
            return String::new();
        }
        let start = y as usize * self.width as usize;
        let row: String = self.cells[start..start + self.width as usize]
            .iter()
            .map(|cell| cell.ch)
            .collect();
        row.trim_end().to_string()
    }

    pub fn present(&self, stdout: &mut impl Write) -> io::Result<()>
    {
        let mut output = String::with_capacity(self.cells.len() * 2);
        for y in 0..self.height {
            let start = y as usize * self.width as usize;
            output.push_str(&render_row(&self.cells[start..start + self.width as usize]));
            if y + 1 < self.height {
                output.push_str("\r\n");
            }
        }

        queue!(stdout, MoveTo(0, 0), Clear(ClearType::All))?;
        stdout.write_all(output.as_bytes())?;
        stdout.flush()
    }
}

fn render_row(row: &[Cell]) -> String
{
    let mut line = String::with_capacity(row.len() + 16);
    let mut active = Style::default();
    for cell in row {
        if cell.style != active {
            line.push_str("\x1b[0m");
            if cell.style.bold {
                line.push_str("\x1b[1m");
            }
            if let Some(color) = cell.style.fg {
                line.push_str(&ansi_color(color));
            }
            active = cell.style;
        }
        line.push(cell.ch);
    }
    if active != Style::default() {
        line.push_str("\x1b[0m");
    }
    line
}

fn ansi_color(color: Rgb) -> String
{
    format!("\x1b[38;2;{};{};{}m", color.r, color.g, color.b)
}

/// Greedy word wrap. Words longer than `width` are split.
pub fn wrap(text: &str, width: usize) -> Vec<String>
{
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let mut word: String = word.to_string();
        while word.chars().count() > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let head: String = word.chars().take(width).collect();
            word = word.chars().skip(width).collect();
            lines.push(head);
        }
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
