use crate::error::{HeatwaveError, Result};
use crate::git::GitRepo;
use crate::heat::{HeatRequest, RenderOptions, StatusType};
use crate::history::AuthorFilter;
use crate::intensity::ShadeOffset;
use crate::model::MAX_YEARS;
use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::Parser;
use std::path::PathBuf;

const EXAMPLES: &str = "\
Examples:
  Print standard output
      heatwave /path/to/git/repo \"James Stoup\"

  Print number of commits each day and show additional stats
      heatwave /path/to/git/repo stoup --status-type number -v

  Print several users combined output
      heatwave /path/to/git/repo james, bob, \"LORD CODER III\", jack

  Change the default offset to a step of 5
      heatwave /path/to/git/repo captain_derp -o 5";

#[derive(Parser, Debug)]
#[command(name = "heatwave")]
#[command(about = "View a calendar heat map of your git commits right in the terminal")]
#[command(version)]
#[command(after_help = EXAMPLES)]
pub struct Cli {
    #[arg(help = "Path to git repository", default_value = ".")]
    pub git_repo_path: PathBuf,

    #[arg(help = "Author names to show (case-insensitive substring match)")]
    pub user_names: Vec<String>,

    #[arg(short = 'l', long, help = "Lists all the committers for a git repo")]
    pub list_committers: bool,

    #[arg(
        short = 'y',
        long,
        default_value_t = 1,
        value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_YEARS)),
        help = "Print more than one year"
    )]
    pub years: u32,

    #[arg(short = 'a', long, help = "Print heat map for all users, not just a single user")]
    pub all_users: bool,

    #[arg(long, value_enum, default_value_t = StatusType::Color, help = "Choose how to visualize the data")]
    pub status_type: StatusType,

    #[arg(
        short = 'o',
        long,
        default_value_t = 1,
        value_parser = clap::value_parser!(u32).range(1..),
        help = "Manually set the offset for determining the colors"
    )]
    pub shade_offset: u32,

    #[arg(short = 'v', long, help = "Prints additional information")]
    pub verbose: bool,

    #[arg(short = 'd', long, help = "Prints in red for darker color schemes")]
    pub dark_mode: bool,

    #[arg(long, help = "Output as JSON")]
    pub json: bool,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Author filters to aggregate. Trailing commas from `a, b, c` style
    /// lists are dropped.
    pub fn author_filters(&self) -> Vec<AuthorFilter> {
        if self.all_users {
            return vec![AuthorFilter::All];
        }
        self.user_names
            .iter()
            .map(|name| name.trim().trim_end_matches(',').trim())
            .filter(|name| !name.is_empty())
            .map(AuthorFilter::name)
            .collect()
    }

    pub fn request(&self, today: NaiveDate) -> Result<HeatRequest> {
        let users = self.author_filters();
        if users.is_empty() {
            return Err(HeatwaveError::MissingUser);
        }
        Ok(HeatRequest {
            users,
            years: self.years,
            offset: ShadeOffset::new(i64::from(self.shade_offset))?,
            today,
        })
    }

    pub fn render_options(&self) -> Result<RenderOptions> {
        Ok(RenderOptions {
            status: self.status_type,
            verbose: self.verbose,
            dark_mode: self.dark_mode,
            offset: ShadeOffset::new(i64::from(self.shade_offset))?,
            colors: console::colors_enabled(),
        })
    }

    pub fn execute(self) -> anyhow::Result<()> {
        let repo = GitRepo::open(&self.git_repo_path)?.with_progress(!self.json);

        if !self.list_committers && self.author_filters().is_empty() {
            return Err(HeatwaveError::MissingUser.into());
        }

        if self.list_committers {
            return crate::heat::list_committers(&repo);
        }

        let today = Local::now().date_naive();
        let request = self.request(today).context("Invalid heat map request")?;
        let options = self.render_options()?;
        crate::heat::exec(&repo, &request, options, self.json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("heatwave").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults() {
        let cli = parse(&[]);
        assert_eq!(cli.git_repo_path, PathBuf::from("."));
        assert_eq!(cli.years, 1);
        assert_eq!(cli.shade_offset, 1);
        assert_eq!(cli.status_type, StatusType::Color);
        assert!(cli.user_names.is_empty());
    }

    #[test]
    fn comma_separated_users() {
        let cli = parse(&["repo", "james,", "bob,", "LORD CODER III,", "jack"]);
        assert_eq!(
            cli.author_filters(),
            vec![
                AuthorFilter::name("james"),
                AuthorFilter::name("bob"),
                AuthorFilter::name("LORD CODER III"),
                AuthorFilter::name("jack"),
            ]
        );
    }

    #[test]
    fn all_users_replaces_names() {
        let cli = parse(&["repo", "james", "-a"]);
        assert_eq!(cli.author_filters(), vec![AuthorFilter::All]);
    }

    #[test]
    fn missing_user_is_an_error() {
        let cli = parse(&["repo"]);
        let today = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        assert!(matches!(cli.request(today), Err(HeatwaveError::MissingUser)));
    }

    #[test]
    fn zero_offset_is_rejected_by_parser() {
        let res = Cli::try_parse_from(["heatwave", "repo", "me", "-o", "0"]);
        assert!(res.is_err());
        let res = Cli::try_parse_from(["heatwave", "repo", "me", "-y", "0"]);
        assert!(res.is_err());
    }

    #[test]
    fn years_are_capped() {
        let max = MAX_YEARS.to_string();
        assert_eq!(parse(&["repo", "me", "-y", max.as_str()]).years, MAX_YEARS);

        let over = (MAX_YEARS + 1).to_string();
        assert!(Cli::try_parse_from(["heatwave", "repo", "me", "-y", over.as_str()]).is_err());
        assert!(Cli::try_parse_from(["heatwave", "repo", "me", "-y", "4294967295"]).is_err());
    }

    #[test]
    fn request_carries_options() {
        let cli = parse(&["repo", "me", "-y", "3", "-o", "5", "--status-type", "symbol", "-v", "-d"]);
        let today = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let request = cli.request(today).unwrap();
        assert_eq!(request.years, 3);
        assert_eq!(request.offset.get(), 5);
        assert_eq!(request.today, today);

        let options = cli.render_options().unwrap();
        assert_eq!(options.status, StatusType::Symbol);
        assert!(options.verbose);
        assert!(options.dark_mode);
    }
}
