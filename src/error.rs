use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, HeatwaveError>;

#[derive(Error, Debug)]
pub enum HeatwaveError {
    #[error("Invalid Repository Path: {}\nPlease enter a path to a valid git repository!", .0.display())]
    InvalidRepository(PathBuf),
    #[error("Error - unable to access the git repo: {}", .0.display())]
    BareRepository(PathBuf),
    #[error("Must supply a USER NAME if the -l or -a flags are not used")]
    MissingUser,
    #[error("Shade offset must be a positive integer, got {0}")]
    InvalidOffset(i64),
    #[error("Years must be between 1 and {max}, got {years}")]
    InvalidYears { years: u32, max: u32 },
    #[error("Invalid window: end ({end}) is before start ({start})")]
    InvalidWindow { start: NaiveDate, end: NaiveDate },
    #[error("Commit count for {day} must be positive")]
    InvalidCount { day: NaiveDate },
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Git discover error: {0}")]
    GitDiscover(#[from] Box<gix::discover::Error>),
    #[error("Object find with conversion error: {0}")]
    ObjectFindConv(#[from] Box<gix::object::find::existing::with_conversion::Error>),
    #[error("Commit error: {0}")]
    Commit(#[from] Box<gix::object::commit::Error>),
    #[error("Object decode error: {0}")]
    ObjectDecode(#[from] Box<gix::objs::decode::Error>),
    #[error("Reference find error: {0}")]
    RefFind(#[from] Box<gix::reference::find::existing::Error>),
    #[error("Signature time error: {0}")]
    SignatureTime(#[from] gix::date::parse::Error),
    #[error("Head peel error: {0}")]
    HeadPeel(#[from] Box<gix::head::peel::to_commit::Error>),
}

// gix errors are large; box them on the way in so `?` keeps working.
impl From<gix::discover::Error> for HeatwaveError {
    fn from(err: gix::discover::Error) -> Self {
        HeatwaveError::GitDiscover(Box::new(err))
    }
}

impl From<gix::object::find::existing::with_conversion::Error> for HeatwaveError {
    fn from(err: gix::object::find::existing::with_conversion::Error) -> Self {
        HeatwaveError::ObjectFindConv(Box::new(err))
    }
}

impl From<gix::object::commit::Error> for HeatwaveError {
    fn from(err: gix::object::commit::Error) -> Self {
        HeatwaveError::Commit(Box::new(err))
    }
}

impl From<gix::objs::decode::Error> for HeatwaveError {
    fn from(err: gix::objs::decode::Error) -> Self {
        HeatwaveError::ObjectDecode(Box::new(err))
    }
}

impl From<gix::reference::find::existing::Error> for HeatwaveError {
    fn from(err: gix::reference::find::existing::Error) -> Self {
        HeatwaveError::RefFind(Box::new(err))
    }
}

impl From<gix::head::peel::to_commit::Error> for HeatwaveError {
    fn from(err: gix::head::peel::to_commit::Error) -> Self {
        HeatwaveError::HeadPeel(Box::new(err))
    }
}
