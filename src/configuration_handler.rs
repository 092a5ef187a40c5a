use crate::{configuration::Configuration, slots::WeekStart};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "weekly_booking", about = "Weekly appointment calendar with booking and cancellation")]
pub struct ConfigurationHandler {
    /// Title reported with the week view
    #[arg(long = "title", env = "WEBSITE_TITLE", default_value = "Weekly Appointments")]
    website_title: String,

    #[arg(long, env = "PORT", default_value = "3000")]
    port: String,

    /// Directory holding the persisted appointments. Without it appointments
    /// only live as long as the process.
    #[arg(long, env = "STORAGE_DIR")]
    storage_dir: Option<PathBuf>,

    #[arg(long, env = "WEEK_START", value_enum, default_value_t = WeekStart::Sunday)]
    week_start: WeekStart,
}

impl ConfigurationHandler {
    pub fn parse_arguments() -> Self {
        Self::parse()
    }
}

impl Configuration for ConfigurationHandler {
    fn website_title(&self) -> String {
        self.website_title.clone()
    }

    fn port(&self) -> String {
        self.port.clone()
    }

    fn storage_dir(&self) -> Option<PathBuf> {
        self.storage_dir.clone()
    }

    fn week_start(&self) -> WeekStart {
        self.week_start
    }
}
