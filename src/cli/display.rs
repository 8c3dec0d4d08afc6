// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal output for the fastss CLI.
//!
//! OneDark colors on dark terminals, One Light on light ones. The theme comes
//! from `FASTSS_THEME` ("dark" or "light") if set, then from the `COLORFGBG`
//! background hint, and is dark otherwise. `NO_COLOR` and non-TTY stdout turn
//! color off entirely, so piped output stays plain.

use std::sync::OnceLock;

/// Inner width of report boxes, between the two `│` borders.
pub const BOX_WIDTH: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

static THEME: OnceLock<Theme> = OnceLock::new();

fn detect_theme() -> Theme {
    if let Ok(theme) = std::env::var("FASTSS_THEME") {
        match theme.to_lowercase().as_str() {
            "light" | "l" => return Theme::Light,
            "dark" | "d" => return Theme::Dark,
            _ => {}
        }
    }

    // "fg;bg": backgrounds 7 and up are light, except 8 (dark gray).
    if let Ok(colorfgbg) = std::env::var("COLORFGBG") {
        if let Some(Ok(bg)) = colorfgbg.split(';').next_back().map(str::parse::<u8>) {
            if bg >= 7 && bg != 8 {
                return Theme::Light;
            }
        }
    }

    Theme::Dark
}

pub fn theme() -> Theme {
    *THEME.get_or_init(detect_theme)
}

fn rgb((r, g, b): (u8, u8, u8)) -> String {
    format!("\x1b[38;2;{r};{g};{b}m")
}

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";

mod onedark {
    pub const RED: (u8, u8, u8) = (224, 108, 117);
    pub const GREEN: (u8, u8, u8) = (152, 195, 121);
    pub const YELLOW: (u8, u8, u8) = (229, 192, 123);
    pub const BLUE: (u8, u8, u8) = (97, 175, 239);
    pub const CYAN: (u8, u8, u8) = (86, 182, 194);
    pub const GRAY: (u8, u8, u8) = (92, 99, 112);
}

mod onelight {
    pub const RED: (u8, u8, u8) = (228, 86, 73);
    pub const GREEN: (u8, u8, u8) = (80, 161, 79);
    pub const YELLOW: (u8, u8, u8) = (193, 132, 1);
    pub const BLUE: (u8, u8, u8) = (64, 120, 242);
    pub const CYAN: (u8, u8, u8) = (1, 132, 188);
    pub const GRAY: (u8, u8, u8) = (160, 161, 167);
}

macro_rules! theme_color {
    ($name:ident) => {
        #[allow(non_snake_case)]
        pub fn $name() -> String {
            rgb(match theme() {
                Theme::Dark => onedark::$name,
                Theme::Light => onelight::$name,
            })
        }
    };
}

theme_color!(RED);
theme_color!(GREEN);
theme_color!(YELLOW);
theme_color!(BLUE);
theme_color!(CYAN);
theme_color!(GRAY);

/// Whether stdout should get ANSI colors.
pub fn use_colors() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    atty::is(atty::Stream::Stdout)
}

/// `text` in a theme color plus modifiers, or plain when colors are off.
pub fn themed(color_fn: fn() -> String, modifiers: &[&str], text: &str) -> String {
    if use_colors() {
        format!("{}{}{}{}", modifiers.concat(), color_fn(), text, RESET)
    } else {
        text.to_string()
    }
}

/// Printed width of `s`, ignoring ANSI escapes.
pub fn visible_len(s: &str) -> usize {
    let mut in_escape = false;
    let mut len = 0;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
        } else if in_escape && c == 'm' {
            in_escape = false;
        } else if !in_escape {
            len += 1;
        }
    }
    len
}

fn border(text: &str) -> String {
    themed(GRAY, &[], text)
}

/// `│ content          │`
pub fn row(content: &str) {
    let pad = BOX_WIDTH.saturating_sub(visible_len(content) + 1);
    println!("{} {}{}{}", border("│"), content, " ".repeat(pad), border("│"));
}

/// `│ label ....... value │` with the value right-aligned.
pub fn field(label: &str, value: &str) {
    let label = themed(GRAY, &[], label);
    let gap = BOX_WIDTH.saturating_sub(visible_len(&label) + visible_len(value) + 2);
    row(&format!("{label}{}{value}", " ".repeat(gap)));
}

/// `┌─ LABEL ───────────┐`
pub fn section_top(label: &str) {
    let label = format!("─ {} ", themed(CYAN, &[BOLD], label));
    let rest = BOX_WIDTH.saturating_sub(visible_len(&label));
    println!("{}{}{}", border("┌"), label, border(&format!("{}┐", "─".repeat(rest))));
}

/// `├─ LABEL ───────────┤`
pub fn section_mid(label: &str) {
    let label = format!("─ {} ", themed(CYAN, &[BOLD], label));
    let rest = BOX_WIDTH.saturating_sub(visible_len(&label));
    println!("{}{}{}", border("├"), label, border(&format!("{}┤", "─".repeat(rest))));
}

/// `└───────────────────┘`
pub fn section_bot() {
    println!("{}", border(&format!("└{}┘", "─".repeat(BOX_WIDTH))));
}

/// Distance colored by closeness: exact green, one edit blue, more yellow.
pub fn distance_badge(distance: u32) -> String {
    let text = format!("d={distance}");
    match distance {
        0 => themed(GREEN, &[BOLD], &text),
        1 => themed(BLUE, &[], &text),
        _ => themed(YELLOW, &[], &text),
    }
}

/// `part / whole` as a percentage colored green when complete, red otherwise.
pub fn ratio(part: usize, whole: usize) -> String {
    if whole == 0 {
        return themed(GRAY, &[], "n/a");
    }
    let pct = part as f64 / whole as f64 * 100.0;
    let text = format!("{pct:.2}% ({part}/{whole})");
    if part == whole {
        themed(GREEN, &[BOLD], &text)
    } else {
        themed(RED, &[BOLD], &text)
    }
}

/// Human-readable byte size.
pub fn format_size(bytes: u64) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / 1024.0 / 1024.0)
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{bytes} B")
    }
}

/// Microseconds with a speed color.
pub fn timing_us(micros: f64) -> String {
    let text = format!("{micros:.1} µs");
    if micros < 50.0 {
        themed(GREEN, &[], &text)
    } else if micros < 500.0 {
        themed(YELLOW, &[], &text)
    } else {
        themed(RED, &[], &text)
    }
}
