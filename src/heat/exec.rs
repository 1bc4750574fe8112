use super::output::{output_json, output_text, RenderOptions};
use crate::error::{HeatwaveError, Result};
use crate::git::{CommitSource, GitRepo};
use crate::grid::CalendarGrid;
use crate::history::{AuthorFilter, MergedHistory, UserHistory};
use crate::intensity::ShadeOffset;
use crate::model::{DateWindow, MAX_YEARS};
use anyhow::Context;
use chrono::NaiveDate;
use tracing::debug;

/// Everything needed to compute the heat maps, already validated.
#[derive(Debug, Clone)]
pub struct HeatRequest {
    pub users: Vec<AuthorFilter>,
    pub years: u32,
    pub offset: ShadeOffset,
    /// End of the most recent window.
    pub today: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSummary {
    pub name: String,
    pub total_days: usize,
    pub total_commits: u64,
}

impl UserSummary {
    fn new(filter: &AuthorFilter, history: &UserHistory) -> Self {
        Self {
            name: filter.display_name().to_string(),
            total_days: history.total_days(),
            total_commits: history.total_commits(),
        }
    }
}

/// One year of the heat map, ready to render.
#[derive(Debug, Clone)]
pub struct WindowReport {
    pub window: DateWindow,
    pub users: Vec<UserSummary>,
    pub history: MergedHistory,
    pub grid: CalendarGrid,
}

/// Computes `request.years` windows, newest first. Each window ends where
/// the next newer one starts and sums the histories of every requested user.
pub fn build_reports<S>(source: &S, request: &HeatRequest) -> Result<Vec<WindowReport>>
where
    S: CommitSource + ?Sized,
{
    if !(1..=MAX_YEARS).contains(&request.years) {
        return Err(HeatwaveError::InvalidYears {
            years: request.years,
            max: MAX_YEARS,
        });
    }

    let mut window = DateWindow::trailing_year(request.today);
    let mut reports = Vec::new();

    for _ in 0..request.years {
        let mut history = MergedHistory::new();
        let mut users = Vec::with_capacity(request.users.len());

        for filter in &request.users {
            let user_history = source.fetch_user_history(filter, &window)?;
            users.push(UserSummary::new(filter, &user_history));
            history.absorb(&user_history);
        }

        let grid = CalendarGrid::build(&window);
        debug!(
            start = %window.start(),
            end = %window.end(),
            first_column = ?grid.first_day(),
            weeks = grid.weeks(),
            days = history.total_days(),
            "built window"
        );

        reports.push(WindowReport {
            window,
            users,
            grid,
            history,
        });
        window = window.previous();
    }

    Ok(reports)
}

pub fn exec(repo: &GitRepo, request: &HeatRequest, options: RenderOptions, json: bool) -> anyhow::Result<()> {
    let reports = build_reports(repo, request).context("Failed to read commit history")?;

    if json {
        let users = request
            .users
            .iter()
            .map(|filter| filter.display_name().to_string())
            .collect();
        output_json(
            &reports,
            &repo.path().to_string_lossy(),
            users,
            request.offset,
        )?;
    } else {
        output_text(&reports, &repo.name(), options)?;
    }

    Ok(())
}

pub fn list_committers(repo: &GitRepo) -> anyhow::Result<()> {
    let committers = repo.committers().context("Failed to list committers")?;

    println!("Git Committers:");
    for (author, commits) in committers {
        println!("     {commits:>5} - {author}");
    }
    println!();
    Ok(())
}
