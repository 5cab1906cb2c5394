use crate::data::app_settings::SettingsWrapper;
use crate::data::{EventData, Persistable};
use anyhow::Result;
use std::fs;
use std::path::Path;

pub fn run() -> Result<()> {
    let dir = crate::data::persistence::get_data_dir()?;
    fs::create_dir_all(&dir)?;
    run_in_dir(&dir)?;
    println!("Data files initialized successfully.");
    Ok(())
}

/// Writes all default data files into `dir`. Exposed for unit testing.
pub(crate) fn run_in_dir(dir: &Path) -> Result<()> {
    SettingsWrapper::default().save_to(dir)?;
    EventData::default().save_to(dir)?;
    Ok(())
}
