mod app;
mod cli;
mod job_file;
mod logging;
mod terminal;

pub use app::run_app;
