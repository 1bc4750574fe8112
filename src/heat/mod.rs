pub mod exec;
pub mod output;

pub use exec::{build_reports, exec, list_committers, HeatRequest, UserSummary, WindowReport};
pub use output::{output_json, output_text, RenderOptions, Renderer, StatusType};
