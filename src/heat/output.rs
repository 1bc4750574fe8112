use super::exec::{UserSummary, WindowReport};
use crate::grid::Cell;
use crate::intensity::{legend, IntensityLevel, ShadeOffset};
use crate::model::{DayOutput, HeatOutput, WindowOutput, SCHEMA_VERSION};
use crate::util::{day_label, month_labels};
use anyhow::Result;
use chrono::{Datelike, NaiveDate, Utc, Weekday};
use clap::ValueEnum;
use console::Style;
use serde::Serialize;
use std::fmt::Write as _;

/// How an active day is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusType {
    #[default]
    Color,
    Symbol,
    Number,
}

const EMPTY: &str = "  ";
const SYMBOLS: [&str; 5] = ["..", "--", "~~", "**", "##"];
// 256-colour backgrounds, lightest shade first.
const GREENS: [u8; 5] = [118, 40, 34, 29, 22];
const REDS: [u8; 5] = [52, 88, 124, 160, 196];
const NUMBER_BACKGROUND: u8 = 253;

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub status: StatusType,
    pub verbose: bool,
    pub dark_mode: bool,
    pub offset: ShadeOffset,
    /// Emit ANSI colours. Without them colour mode falls back to symbols.
    pub colors: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            status: StatusType::Color,
            verbose: false,
            dark_mode: false,
            offset: ShadeOffset::ONE,
            colors: true,
        }
    }
}

pub struct Renderer {
    options: RenderOptions,
}

impl Renderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    fn status(&self) -> StatusType {
        match self.options.status {
            StatusType::Color if !self.options.colors => StatusType::Symbol,
            status => status,
        }
    }

    fn paint(&self, background: u8, text: &str) -> String {
        Style::new()
            .on_color256(background)
            .force_styling(self.options.colors)
            .apply_to(text)
            .to_string()
    }

    fn glyph(&self, level: IntensityLevel) -> String {
        let index = usize::from(level.get() - 1);
        match self.status() {
            StatusType::Symbol | StatusType::Number => SYMBOLS[index].to_string(),
            StatusType::Color => {
                let palette = if self.options.dark_mode { &REDS } else { &GREENS };
                self.paint(palette[index], EMPTY)
            }
        }
    }

    /// Text for one grid position, two columns wide (three when verbose).
    pub fn cell(&self, cell: &Cell) -> String {
        let body = match *cell {
            Cell::Blank { day } if self.options.verbose => day_label(day),
            Cell::Blank { .. } => EMPTY.to_string(),
            Cell::Active { count, .. } if self.status() == StatusType::Number => {
                self.paint(NUMBER_BACKGROUND, &format!("{count:>2}"))
            }
            Cell::Active { level, .. } => self.glyph(level),
        };
        if self.options.verbose {
            format!("{body} ")
        } else {
            body
        }
    }

    pub fn months_header(&self, end: NaiveDate) -> String {
        let mut header = String::from("    ");
        for month in month_labels(end) {
            if self.options.verbose {
                let _ = write!(header, "       {month}   ");
            } else {
                let _ = write!(header, "   {month}   ");
            }
        }
        header
    }

    pub fn stats(&self, repository: &str, user: &UserSummary) -> String {
        format!(
            "Git Repository : {repository}\n\
             Git Author     : {}\n\
             Total Days     : {}\n\
             Total Commits  : {}\n\n",
            user.name, user.total_days, user.total_commits
        )
    }

    /// The full block for one window: optional stats, header, grid, borders.
    pub fn window(&self, report: &WindowReport, repository: &str) -> String {
        let mut out = String::from("\n");
        if self.options.verbose {
            for user in &report.users {
                out.push_str(&self.stats(repository, user));
            }
        }

        let header = self.months_header(report.window.end());
        let width = header.chars().count();
        let _ = writeln!(out, "{header}");
        let _ = writeln!(
            out,
            "{}\t{} - {}",
            border(width),
            report.window.start().year(),
            report.window.end().year()
        );

        for (weekday, cells) in report.grid.cells(&report.history, self.options.offset) {
            out.push_str(row_label(weekday));
            out.push_str("  ");
            for cell in &cells {
                out.push_str(&self.cell(cell));
            }
            out.push_str(" \n");
        }

        let _ = writeln!(out, "{}", border(width));
        out.push('\n');
        out
    }

    /// Key mapping glyphs to commit counts. Number mode needs none.
    pub fn legend(&self) -> Option<String> {
        if self.options.status == StatusType::Number {
            return None;
        }

        let mut out = String::from("  == COMMITS ==\n          0\n");
        for entry in legend(self.options.offset) {
            let glyph = self.glyph(entry.level);
            let suffix = if entry.open_ended { "+" } else { " " };
            let _ = writeln!(out, "    {glyph}{glyph}  {}{suffix}", entry.value);
        }
        out.push_str("  ============\n\n");
        Some(out)
    }
}

fn border(width: usize) -> String {
    "=".repeat(width)
}

fn row_label(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Mon",
        Weekday::Wed => "Wed",
        Weekday::Fri => "Fri",
        _ => "   ",
    }
}

pub fn output_text(reports: &[WindowReport], repository: &str, options: RenderOptions) -> Result<()> {
    let renderer = Renderer::new(options);
    for report in reports {
        print!("{}", renderer.window(report, repository));
    }
    if let Some(legend) = renderer.legend() {
        print!("{legend}");
    }
    println!(" ");
    Ok(())
}

pub fn heat_output(
    reports: &[WindowReport],
    repository_path: &str,
    users: Vec<String>,
    offset: ShadeOffset,
) -> HeatOutput {
    let windows = reports
        .iter()
        .map(|report| WindowOutput {
            start: report.window.start(),
            end: report.window.end(),
            total_days: report.history.total_days(),
            total_commits: report.history.total_commits(),
            days: report
                .history
                .iter()
                .filter_map(|daily| {
                    crate::intensity::classify(daily.count, offset).map(|level| DayOutput {
                        date: daily.day,
                        count: daily.count,
                        level: level.get(),
                    })
                })
                .collect(),
        })
        .collect();

    HeatOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        repository_path: repository_path.to_string(),
        users,
        shade_offset: offset.get(),
        windows,
    }
}

pub fn output_json(
    reports: &[WindowReport],
    repository_path: &str,
    users: Vec<String>,
    offset: ShadeOffset,
) -> Result<()> {
    let output = heat_output(reports, repository_path, users, offset);
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
