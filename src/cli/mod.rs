pub mod app;
pub mod collector;
pub mod summary;
pub mod ui;

pub use app::Cli;
pub use collector::collect_user_input;
