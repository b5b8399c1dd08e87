//! Console sink shared by reporters.
//!
//! A `Console` is a cheap, cloneable handle. Reporters receive one at
//! construction and write plain lines or bordered panels to it. The runner
//! hands each worker a buffered console so per-file output can be printed in
//! input order once all checks finish.

use owo_colors::OwoColorize;
use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Clone)]
enum Target {
    Stdout,
    Buffer(Arc<Mutex<Vec<u8>>>),
}

#[derive(Clone)]
/// Output handle for diagnostics and panels.
pub struct Console {
    target: Target,
    color: bool,
}

impl Console {
    /// Console writing straight to stdout.
    pub fn stdout(color: bool) -> Self {
        Self {
            target: Target::Stdout,
            color,
        }
    }

    /// In-memory console; read back with [`Console::take`].
    pub fn buffer(color: bool) -> Self {
        Self {
            target: Target::Buffer(Arc::new(Mutex::new(Vec::new()))),
            color,
        }
    }

    /// Print one line of text.
    pub fn print(&self, line: &str) {
        self.write_raw(&format!("{}\n", line));
    }

    /// Print `body` inside a rounded border with `title` centered on the top edge.
    pub fn panel(&self, title: &str, body: &str) {
        self.write_raw(&render_panel(title, body, self.color));
    }

    /// Drain and return everything written to a buffered console.
    ///
    /// Always empty for stdout consoles.
    pub fn take(&self) -> String {
        match &self.target {
            Target::Stdout => String::new(),
            Target::Buffer(buf) => {
                let mut guard = buf.lock().unwrap_or_else(PoisonError::into_inner);
                let bytes = std::mem::take(&mut *guard);
                String::from_utf8_lossy(&bytes).into_owned()
            }
        }
    }

    fn write_raw(&self, text: &str) {
        // Console writes are best-effort, same as `println!` minus the panic.
        match &self.target {
            Target::Stdout => {
                let mut out = std::io::stdout().lock();
                let _ = out.write_all(text.as_bytes());
            }
            Target::Buffer(buf) => {
                let mut guard = buf.lock().unwrap_or_else(PoisonError::into_inner);
                guard.extend_from_slice(text.as_bytes());
            }
        }
    }
}

const TAB_WIDTH: usize = 8;

/// Replace tabs with spaces up to the next tab stop.
fn expand_tabs(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut col = 0;
    for c in line.chars() {
        if c == '\t' {
            let n = TAB_WIDTH - col % TAB_WIDTH;
            out.extend(std::iter::repeat(' ').take(n));
            col += n;
        } else {
            out.push(c);
            col += 1;
        }
    }
    out
}

fn render_panel(title: &str, body: &str, color: bool) -> String {
    // Tabs are expanded so source and caret lines stay aligned with the border.
    let lines: Vec<String> = body.lines().map(expand_tabs).collect();
    let title_len = title.chars().count() + 2;
    let inner = lines
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0)
        .max(title_len)
        + 2;

    let left = (inner - title_len) / 2;
    let right = inner - title_len - left;
    let shown_title = if color {
        format!(" {} ", title.red().bold())
    } else {
        format!(" {} ", title)
    };

    let mut out = String::new();
    out.push('╭');
    out.push_str(&"─".repeat(left));
    out.push_str(&shown_title);
    out.push_str(&"─".repeat(right));
    out.push_str("╮\n");
    for line in &lines {
        let pad = inner - 2 - line.chars().count();
        out.push_str("│ ");
        out.push_str(line.as_str());
        out.push_str(&" ".repeat(pad));
        out.push_str(" │\n");
    }
    out.push('╰');
    out.push_str(&"─".repeat(inner));
    out.push_str("╯\n");
    out
}
