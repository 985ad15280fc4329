use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use thiserror::Error;
use tracing::debug;

use crate::model::{Car, CarPatch};

/// Errors raised by the car store and its backing file
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing file does not exist
    #[error("backing file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// No car carries the requested id
    #[error("car not found: {0}")]
    CarNotFound(String),

    #[error("failed to access '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode '{}': {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode cars: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("lock poisoned")]
    LockPoisoned,
}

/// Read the whole collection from `path`
pub fn load(path: &Path) -> Result<Vec<Car>, StoreError> {
    let data = std::fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => StoreError::FileNotFound(path.to_path_buf()),
        _ => StoreError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    serde_json::from_slice(&data).map_err(|source| StoreError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// Overwrite `path` with the whole collection.
///
/// The JSON is written to `<path>.tmp` first and renamed over the target, so
/// a crash mid-write leaves the previous file intact.
pub fn save(cars: &[Car], path: &Path) -> Result<(), StoreError> {
    let data = serde_json::to_vec_pretty(cars)?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
    let tmp = path.with_extension(format!("{ext}.tmp"));
    let io_err = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    std::fs::write(&tmp, &data).map_err(io_err)?;
    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(io_err(e));
    }

    debug!("Saved {} cars to {}", cars.len(), path.display());
    Ok(())
}

/// In-memory car collection mirrored to a JSON file.
///
/// Lookups scan in insertion order and act on the first car whose id matches;
/// duplicate ids are accepted and later duplicates are unreachable by id.
/// Every mutation holds the write lock until the file has been rewritten.
/// A failed write is returned to the caller but the in-memory change stays.
pub struct Store {
    cars: RwLock<Vec<Car>>,
    path: PathBuf,
}

impl Store {
    /// Create a store over `cars`, persisting to `path`
    pub fn new(path: impl Into<PathBuf>, cars: Vec<Car>) -> Self {
        Self {
            cars: RwLock::new(cars),
            path: path.into(),
        }
    }

    /// Backing file location
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the current collection to the backing file
    pub fn flush(&self) -> Result<(), StoreError> {
        let cars = self.write()?;
        save(&cars, &self.path)
    }

    /// All cars in their current order
    pub fn list(&self) -> Result<Vec<Car>, StoreError> {
        Ok(self.read()?.clone())
    }

    /// First car with the given id
    pub fn find_by_id(&self, id: &str) -> Result<Option<Car>, StoreError> {
        Ok(self.read()?.iter().find(|c| c.id == id).cloned())
    }

    /// Append `car` and persist
    pub fn insert(&self, car: Car) -> Result<Car, StoreError> {
        let mut cars = self.write()?;
        cars.push(car.clone());
        save(&cars, &self.path)?;
        Ok(car)
    }

    /// Overwrite every field of the first match, id included, and persist
    pub fn replace_by_id(&self, id: &str, car: Car) -> Result<Car, StoreError> {
        let mut cars = self.write()?;
        let idx = position(&cars, id)?;
        cars[idx] = car;
        save(&cars, &self.path)?;
        Ok(cars[idx].clone())
    }

    /// Apply `patch` to the first match and persist
    pub fn patch_by_id(&self, id: &str, patch: &CarPatch) -> Result<Car, StoreError> {
        let mut cars = self.write()?;
        let idx = position(&cars, id)?;
        patch.apply(&mut cars[idx]);
        save(&cars, &self.path)?;
        Ok(cars[idx].clone())
    }

    /// Remove the first match and persist
    pub fn delete_by_id(&self, id: &str) -> Result<Car, StoreError> {
        let mut cars = self.write()?;
        let idx = position(&cars, id)?;
        let removed = cars.remove(idx);
        save(&cars, &self.path)?;
        Ok(removed)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Car>>, StoreError> {
        self.cars.read().map_err(|_| StoreError::LockPoisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Car>>, StoreError> {
        self.cars.write().map_err(|_| StoreError::LockPoisoned)
    }
}

fn position(cars: &[Car], id: &str) -> Result<usize, StoreError> {
    cars.iter()
        .position(|c| c.id == id)
        .ok_or_else(|| StoreError::CarNotFound(id.to_string()))
}
