use std::{
    fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::{debug, info};

use crate::domain::cycle::{Cycle, CycleId, UserId};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cycle store I/O failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cycle store at {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Persistence for every user's cycles.
pub trait CycleStore {
    /// All cycles belonging to `user`, newest start date first.
    fn cycles_for_user(&self, user: &UserId) -> Result<Vec<Cycle>, StoreError>;

    /// Replaces the whole set of cycles for `user`; other users are untouched.
    fn save_cycles_for_user(&mut self, user: &UserId, cycles: Vec<Cycle>) -> Result<(), StoreError>;

    fn cycle_by_id(&self, user: &UserId, id: &CycleId) -> Result<Option<Cycle>, StoreError> {
        Ok(self
            .cycles_for_user(user)?
            .into_iter()
            .find(|cycle| &cycle.id == id))
    }
}

fn owned_by(all: &[Cycle], user: &UserId) -> Vec<Cycle> {
    let mut cycles = all
        .iter()
        .filter(|cycle| &cycle.user_id == user)
        .cloned()
        .collect::<Vec<_>>();
    cycles.sort_by(|a, b| b.start_date.cmp(&a.start_date));
    cycles
}

fn replace_for_user(all: &mut Vec<Cycle>, user: &UserId, cycles: Vec<Cycle>) {
    all.retain(|cycle| &cycle.user_id != user);
    all.extend(cycles.into_iter().map(|mut cycle| {
        cycle.user_id = user.clone();
        cycle
    }));
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryCycleStore {
    cycles: Vec<Cycle>,
}

impl InMemoryCycleStore {
    pub fn new(cycles: Vec<Cycle>) -> Self {
        Self { cycles }
    }
}

impl CycleStore for InMemoryCycleStore {
    fn cycles_for_user(&self, user: &UserId) -> Result<Vec<Cycle>, StoreError> {
        Ok(owned_by(&self.cycles, user))
    }

    fn save_cycles_for_user(&mut self, user: &UserId, cycles: Vec<Cycle>) -> Result<(), StoreError> {
        replace_for_user(&mut self.cycles, user, cycles);
        Ok(())
    }
}

/// Every user's cycles in one pretty-printed JSON array.
#[derive(Debug, Clone)]
pub struct JsonFileCycleStore {
    path: PathBuf,
}

impl JsonFileCycleStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Vec<Cycle>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "cycle store missing, starting empty");
                return Ok(Vec::new());
            }
            Err(source) => return Err(self.io_error(source)),
        };
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&content).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    fn write_all(&self, cycles: &[Cycle]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;
        }
        let payload = serde_json::to_string_pretty(cycles).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, payload).map_err(|source| self.io_error(source))
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl CycleStore for JsonFileCycleStore {
    fn cycles_for_user(&self, user: &UserId) -> Result<Vec<Cycle>, StoreError> {
        Ok(owned_by(&self.read_all()?, user))
    }

    fn save_cycles_for_user(&mut self, user: &UserId, cycles: Vec<Cycle>) -> Result<(), StoreError> {
        let mut all = self.read_all()?;
        let count = cycles.len();
        replace_for_user(&mut all, user, cycles);
        self.write_all(&all)?;
        info!(user = %user, cycles = count, path = %self.path.display(), "saved cycles");
        Ok(())
    }
}
