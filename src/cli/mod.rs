mod args;
mod commands;
mod config_cmd;
mod interactive;
mod plan;
mod render;
mod setup;
mod util;

pub use args::Cli;
