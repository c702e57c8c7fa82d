mod cli;
mod tui;

pub(crate) use cli::{as_cli, print_info};
pub(crate) use tui::as_tui;
