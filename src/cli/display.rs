// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal summaries for the sciqa CLI.
//!
//! Everything here writes to stderr, so the result file and anything piped
//! from stdout stay clean. OneDark colors on dark terminals, One Light on light
//! ones; no colors at all when `NO_COLOR` is set or stderr is not a terminal.
//!
//! # Theme detection order
//!
//! 1. `SCIQA_THEME` env var ("dark" or "light")
//! 2. `COLORFGBG` env var (terminal background hint)
//! 3. Default to dark theme

use std::path::Path;
use std::sync::OnceLock;

use crate::batch::RunReport;
use crate::build::BuildReport;
use crate::config::RunConfig;
use crate::index::CorpusIndex;
use crate::types::Field;

/// Width between │ and │, excluding the border characters.
pub const BOX_WIDTH: usize = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

static THEME: OnceLock<Theme> = OnceLock::new();

fn parse_theme(explicit: Option<&str>, colorfgbg: Option<&str>) -> Theme {
    if let Some(theme) = explicit {
        match theme.to_lowercase().as_str() {
            "light" | "l" => return Theme::Light,
            "dark" | "d" => return Theme::Dark,
            _ => {}
        }
    }

    // "fg;bg": 0-6 and 8 are dark backgrounds, the rest light.
    if let Some(bg) = colorfgbg.and_then(|v| v.split(';').next_back()) {
        if let Ok(bg) = bg.parse::<u8>() {
            if bg >= 7 && bg != 8 {
                return Theme::Light;
            }
        }
    }

    Theme::Dark
}

fn detect_theme() -> Theme {
    parse_theme(
        std::env::var("SCIQA_THEME").ok().as_deref(),
        std::env::var("COLORFGBG").ok().as_deref(),
    )
}

pub fn theme() -> Theme {
    *THEME.get_or_init(detect_theme)
}

fn rgb((r, g, b): (u8, u8, u8)) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";

/// OneDark palette
mod onedark {
    pub const RED: (u8, u8, u8) = (224, 108, 117); // #e06c75
    pub const GREEN: (u8, u8, u8) = (152, 195, 121); // #98c379
    pub const YELLOW: (u8, u8, u8) = (229, 192, 123); // #e5c07b
    pub const CYAN: (u8, u8, u8) = (86, 182, 194); // #56b6c2
    pub const GRAY: (u8, u8, u8) = (92, 99, 112); // #5c6370
}

/// One Light palette
mod onelight {
    pub const RED: (u8, u8, u8) = (228, 86, 73); // #e45649
    pub const GREEN: (u8, u8, u8) = (80, 161, 79); // #50a14f
    pub const YELLOW: (u8, u8, u8) = (193, 132, 1); // #c18401
    pub const CYAN: (u8, u8, u8) = (1, 132, 188); // #0184bc
    pub const GRAY: (u8, u8, u8) = (160, 161, 167); // #a0a1a7
}

macro_rules! theme_color {
    ($name:ident) => {
        #[allow(non_snake_case)]
        pub fn $name() -> String {
            match theme() {
                Theme::Dark => rgb(onedark::$name),
                Theme::Light => rgb(onelight::$name),
            }
        }
    };
}

theme_color!(RED);
theme_color!(GREEN);
theme_color!(YELLOW);
theme_color!(CYAN);
theme_color!(GRAY);

/// Colors only when stderr is a terminal and `NO_COLOR` is unset.
pub fn use_colors() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    atty::is(atty::Stream::Stderr)
}

pub fn themed(color_fn: fn() -> String, modifiers: &[&str], text: &str) -> String {
    if use_colors() {
        format!("{}{}{}{}", modifiers.join(""), color_fn(), text, RESET)
    } else {
        text.to_string()
    }
}

/// Length as displayed, ignoring ANSI escapes.
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

fn border() -> String {
    if use_colors() {
        GRAY()
    } else {
        String::new()
    }
}

fn reset() -> &'static str {
    if use_colors() {
        RESET
    } else {
        ""
    }
}

/// │ content          │
pub fn row(content: &str) {
    let pad = BOX_WIDTH.saturating_sub(visible_len(content));
    let b = border();
    eprintln!("{b}│{}{}{}{b}│{}", reset(), content, " ".repeat(pad), reset());
}

/// ┌─ LABEL ──────────┐
pub fn section_top(label: &str) {
    let label_part = format!("─ {} ", themed(CYAN, &[BOLD], label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    let b = border();
    eprintln!("{b}┌{}{}{b}{}┐{}", reset(), label_part, "─".repeat(remaining), reset());
}

/// └──────────────────┘
pub fn section_bot() {
    eprintln!("{}└{}┘{}", border(), "─".repeat(BOX_WIDTH), reset());
}

/// `label ........ value` row.
pub fn field_row(label: &str, value: &str) {
    let label = format!(" {:<18}", label);
    row(&format!("{}{}", themed(GRAY, &[], &label), value));
}

pub fn format_size(bytes: u64) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / 1024.0 / 1024.0)
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{} B", bytes)
    }
}

/// Keep the tail of a long path.
pub fn truncate_path(path: &Path, max_len: usize) -> String {
    let path = path.display().to_string();
    let count = path.chars().count();
    if count <= max_len {
        path
    } else {
        let tail: String = path.chars().skip(count - max_len.saturating_sub(3)).collect();
        format!("...{}", tail)
    }
}

fn count(value: usize, color: fn() -> String) -> String {
    if value == 0 {
        themed(GRAY, &[], "0")
    } else {
        themed(color, &[BOLD], &value.to_string())
    }
}

pub fn print_run_summary(config: &RunConfig, report: &RunReport) {
    section_top("answer");
    field_row("strategy", &config.strategy.to_string());
    field_row("top n", &config.top_n.to_string());
    field_row("output", &truncate_path(&config.output, 38));
    match &report.resumed_from {
        Some(id) if report.checkpoint_found => field_row("resumed after", id),
        Some(id) => field_row("resumed after", &themed(RED, &[BOLD], &format!("{} (not found)", id))),
        None => field_row("resumed after", &themed(GRAY, &[], "fresh run")),
    }
    field_row("rows read", &report.rows_read.to_string());
    field_row("replayed", &count(report.replayed, CYAN));
    field_row("answered", &count(report.decided, GREEN));
    field_row("undecided", &count(report.undecided, YELLOW));
    field_row("query failures", &count(report.failed, RED));
    field_row("malformed", &count(report.malformed, YELLOW));
    section_bot();
}

pub fn print_build_summary(output: &Path, report: &BuildReport) {
    section_top("index");
    field_row("file", &truncate_path(output, 38));
    field_row("articles read", &report.articles.to_string());
    field_row("indexed", &count(report.indexed, GREEN));
    field_row("filtered out", &count(report.filtered, YELLOW));
    field_row("title terms", &report.title_terms.to_string());
    field_row("text terms", &report.text_terms.to_string());
    field_row("size", &format_size(report.bytes));
    section_bot();
}

pub fn print_inspect(path: &Path, bytes: u64, index: &CorpusIndex) {
    section_top("inspect");
    field_row("file", &truncate_path(path, 38));
    field_row("size", &format_size(bytes));
    field_row("documents", &index.len().to_string());
    for field in Field::ALL {
        let stats = index.field(field);
        field_row(
            &format!("{} terms", field),
            &format!("{} (avg length {:.1})", stats.term_count(), stats.avg_doc_length()),
        );
    }
    let analyzer = index.analyzer();
    field_row(
        "analyzer",
        &format!(
            "stop={} case={} digits={} stem={}",
            analyzer.remove_stop_words,
            analyzer.split_on_case_change,
            analyzer.split_on_numerics,
            analyzer.stem
        ),
    );
    section_bot();
}
