use std::{
    env::temp_dir,
    fs::{create_dir_all, remove_dir_all},
    path::{Path, PathBuf},
};

use uuid::Uuid;

use crate::types::error::SchedulerError;

pub fn get_temp_root() -> PathBuf {
    let mut p = temp_dir();
    p.push("recrawl");

    p
}

pub fn unique_temp_dir() -> Result<PathBuf, SchedulerError> {
    let dir = get_temp_root().join(Uuid::new_v4().to_string());
    create_dir_all(&dir)?;

    Ok(dir)
}

pub struct TempDir(PathBuf);
impl TempDir {
    pub fn new() -> Result<Self, SchedulerError> {
        Ok(Self(unique_temp_dir()?))
    }
    pub fn path(&self) -> &Path {
        &self.0
    }
}
impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = remove_dir_all(&self.0);
    }
}
