use super::CommitSource;
use crate::error::{HeatwaveError, Result};
use crate::history::{AuthorFilter, UserHistory};
use crate::model::{CommitRecord, DateWindow};
use chrono::{DateTime, NaiveDate};
use gix::{discover, ObjectId, Repository};
use indicatif::{ProgressBar, ProgressStyle};
use std::cell::OnceCell;
use std::collections::{BTreeMap, HashSet, VecDeque};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub struct GitRepo {
    repo: Repository,
    path: PathBuf,
    progress: bool,
    commits: OnceCell<Vec<CommitRecord>>,
}

impl GitRepo {
    /// Open the repository containing `path`. Bare repositories have no
    /// working tree to report on and are refused.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let requested = path.as_ref().to_path_buf();
        if !requested.exists() {
            return Err(HeatwaveError::InvalidRepository(requested));
        }

        let repo = discover(&requested).map_err(|err| {
            debug!(path = %requested.display(), error = %err, "git discovery failed");
            HeatwaveError::InvalidRepository(requested.clone())
        })?;
        if repo.is_bare() {
            return Err(HeatwaveError::BareRepository(requested));
        }

        let path = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();
        info!(path = %path.display(), "opened repository");

        Ok(Self {
            repo,
            path,
            progress: true,
            commits: OnceCell::new(),
        })
    }

    /// Show a spinner on stderr while history is walked.
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory name of the working tree, for display.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.to_string_lossy().into_owned())
    }

    /// Every commit reachable from HEAD. Walked once, then reused.
    pub fn commits(&self) -> Result<&[CommitRecord]> {
        if let Some(commits) = self.commits.get() {
            return Ok(commits.as_slice());
        }
        let walked = self.collect_commits()?;
        Ok(self.commits.get_or_init(|| walked).as_slice())
    }

    /// Commit count per author name, ordered by name.
    pub fn committers(&self) -> Result<Vec<(String, usize)>> {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for record in self.commits()? {
            *counts.entry(record.author.clone()).or_insert(0) += 1;
        }
        Ok(counts.into_iter().collect())
    }

    fn collect_commits(&self) -> Result<Vec<CommitRecord>> {
        let mut head = self.repo.head()?;
        if head.is_unborn() {
            debug!("HEAD is unborn, no history to walk");
            return Ok(Vec::new());
        }
        let head_commit = head.peel_to_commit_in_place()?;

        let mut commits = Vec::new();
        let mut seen: HashSet<ObjectId> = HashSet::new();
        let mut stack: VecDeque<ObjectId> = VecDeque::from([head_commit.id]);

        let pb = if self.progress {
            ProgressBar::new_spinner()
        } else {
            ProgressBar::hidden()
        };
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message("Collecting commits...");

        while let Some(commit_id) = stack.pop_back() {
            if !seen.insert(commit_id) {
                continue;
            }

            let commit = self.repo.find_commit(commit_id)?;
            let signature = commit.author()?;
            let time = signature.time()?;
            let day = local_day(time.seconds, time.offset)?;
            let author = signature.name.to_string();

            commits.push(CommitRecord { day, author });

            for pid in commit.parent_ids() {
                stack.push_back(pid.into());
            }

            pb.inc(1);
        }

        pb.finish_and_clear();
        debug!(count = commits.len(), "walked commit history");
        Ok(commits)
    }
}

impl CommitSource for GitRepo {
    fn fetch_user_history(&self, filter: &AuthorFilter, window: &DateWindow) -> Result<UserHistory> {
        let history = UserHistory::from_commits(self.commits()?, filter, window);
        debug!(
            user = filter.display_name(),
            start = %window.start(),
            end = %window.end(),
            days = history.total_days(),
            "fetched user history"
        );
        Ok(history)
    }
}

/// Calendar day of an author timestamp in the timezone it was recorded with.
fn local_day(seconds: i64, offset: i32) -> Result<NaiveDate> {
    let shifted = seconds
        .checked_add(i64::from(offset))
        .ok_or_else(|| HeatwaveError::InvalidDate(format!("Invalid timestamp: {seconds}")))?;
    DateTime::from_timestamp(shifted, 0)
        .map(|dt| dt.date_naive())
        .ok_or_else(|| HeatwaveError::InvalidDate(format!("Invalid timestamp: {seconds}")))
}
