pub mod cli;
pub mod commit_flow;
pub mod config;
pub mod configure;
pub mod emoji;
pub mod errors;
pub mod git;
pub mod prompt;
pub mod template;
pub mod update;
pub mod utils;
