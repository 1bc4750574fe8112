pub mod cli;
pub mod error;
pub mod git;
pub mod grid;
pub mod heat;
pub mod history;
pub mod intensity;
pub mod model;
pub mod util;
