use crate::slots::WeekStart;
use std::path::PathBuf;

pub trait Configuration: Clone + Send + Sync + 'static {
    fn website_title(&self) -> String;
    fn port(&self) -> String;
    fn storage_dir(&self) -> Option<PathBuf>;
    fn week_start(&self) -> WeekStart;
}
