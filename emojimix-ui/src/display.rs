//! Terminal grid that redraws the whole projection on every change.

use std::cell::RefCell;
use std::io::{self, Write};

use crossterm::style::{Color, Stylize};
use unicode_width::UnicodeWidthStr;

use emojimix_types::PresentableMix;

/// Cells per row.
pub const COLUMNS: usize = 2;
/// Minimum cell width in terminal columns.
const MIN_CELL_WIDTH: usize = 10;

pub struct GridDisplay {
    columns: usize,
    styled: bool,
    frame: RefCell<String>,
    redraws: RefCell<usize>,
}

impl GridDisplay {
    pub fn new(styled: bool) -> Self {
        Self {
            columns: COLUMNS,
            styled,
            frame: RefCell::new(String::new()),
            redraws: RefCell::new(0),
        }
    }

    /// Replace the current frame with a render of `mixes`.
    pub fn present(&self, mixes: &[PresentableMix]) {
        *self.frame.borrow_mut() = self.render(mixes);
        *self.redraws.borrow_mut() += 1;
    }

    #[cfg(test)]
    pub fn redraws(&self) -> usize {
        *self.redraws.borrow()
    }

    /// Write the latest frame to `out`.
    pub fn flush_to(&self, out: &mut impl Write) -> io::Result<()> {
        out.write_all(self.frame.borrow().as_bytes())?;
        out.flush()
    }

    pub fn render(&self, mixes: &[PresentableMix]) -> String {
        if mixes.is_empty() {
            return "(no mixes)\n".to_string();
        }

        let cell_width = mixes
            .iter()
            .map(|m| m.symbols.width() + 4)
            .max()
            .unwrap_or(0)
            .max(MIN_CELL_WIDTH);

        let mut out = String::new();
        for row in mixes.chunks(self.columns) {
            let cells: Vec<String> = row.iter().map(|m| self.cell(m, cell_width)).collect();
            out.push_str(&cells.join(" "));
            out.push('\n');
        }
        out.push_str(&format!("{} mix(es)\n", mixes.len()));
        out
    }

    fn cell(&self, mix: &PresentableMix, width: usize) -> String {
        let padding = width.saturating_sub(mix.symbols.width());
        let left = padding / 2;
        let text = format!("{}{}{}", " ".repeat(left), mix.symbols, " ".repeat(padding - left));
        if !self.styled {
            return format!("[{}]", text);
        }
        let (r, g, b) = mix.color.to_rgb8();
        format!(
            "{}",
            text.on(Color::Rgb { r, g, b }).with(Color::Black)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use emojimix_types::{ColorRgba, MixId};

    fn presentable(id: i64, symbols: &str) -> PresentableMix {
        PresentableMix {
            id: MixId::new(id),
            symbols: symbols.to_string(),
            color: ColorRgba::opaque(0.5, 0.25, 0.75),
        }
    }

    #[test]
    fn empty_projection() {
        assert_eq!(GridDisplay::new(false).render(&[]), "(no mixes)\n");
    }

    #[test]
    fn two_cells_per_row() {
        let display = GridDisplay::new(false);
        let mixes = [presentable(1, "ab"), presentable(2, "cd"), presentable(3, "ef")];
        let rendered = display.render(&mixes);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "[    ab    ] [    cd    ]");
        assert_eq!(lines[1], "[    ef    ]");
        assert_eq!(lines[2], "3 mix(es)");
    }

    #[test]
    fn styled_cells_carry_the_background() {
        if std::env::var_os("NO_COLOR").is_some() {
            return;
        }
        let display = GridDisplay::new(true);
        let rendered = display.render(&[presentable(1, "🍇")]);
        // 0.5, 0.25, 0.75 quantize to 128, 64, 191.
        assert!(rendered.contains("48;2;128;64;191"), "{:?}", rendered);
    }

    #[test]
    fn present_keeps_latest_frame() {
        let display = GridDisplay::new(false);
        display.present(&[presentable(1, "ab")]);
        display.present(&[]);
        assert_eq!(display.redraws(), 2);

        let mut out = Vec::new();
        display.flush_to(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "(no mixes)\n");
    }
}
