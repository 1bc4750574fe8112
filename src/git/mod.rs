pub mod repo;

pub use repo::GitRepo;

use crate::error::Result;
use crate::history::{AuthorFilter, UserHistory};
use crate::model::{CommitRecord, DateWindow};

/// Anything that can produce per-day commit counts for an author filter.
pub trait CommitSource {
    fn fetch_user_history(&self, filter: &AuthorFilter, window: &DateWindow) -> Result<UserHistory>;
}

impl CommitSource for [CommitRecord] {
    fn fetch_user_history(&self, filter: &AuthorFilter, window: &DateWindow) -> Result<UserHistory> {
        Ok(UserHistory::from_commits(self, filter, window))
    }
}

impl CommitSource for Vec<CommitRecord> {
    fn fetch_user_history(&self, filter: &AuthorFilter, window: &DateWindow) -> Result<UserHistory> {
        self.as_slice().fetch_user_history(filter, window)
    }
}
