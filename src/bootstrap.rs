//! Startup loading of the car collection

use std::path::Path;

use tracing::{error, info, warn};

use crate::model::default_cars;
use crate::store::{self, Store, StoreError};

/// Build the store from the backing file at `path`.
///
/// A missing file is seeded with the default cars and written out right away.
/// Neither a failed seed write nor an unreadable file stops startup: the first
/// is logged and the seeded cars are served from memory, the second is logged
/// and the store starts empty.
pub fn open_store(path: &Path) -> Store {
    match store::load(path) {
        Ok(cars) => {
            let count = cars.len();
            let store = Store::new(path, cars);
            info!("Loaded {} cars from {}", count, store.path().display());
            store
        }
        Err(StoreError::FileNotFound(_)) => {
            warn!(
                "File {} not found, creating a new one with default cars",
                path.display()
            );
            let store = Store::new(path, default_cars());
            if let Err(e) = store.flush() {
                error!("Error saving cars to file: {}", e);
            }
            store
        }
        Err(e) => {
            error!("Error loading cars from file: {}", e);
            Store::new(path, Vec::new())
        }
    }
}
