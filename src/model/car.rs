//! Car record and its partial-update form

use serde::{Deserialize, Deserializer, Serialize};

/// A single car entry.
///
/// Missing or `null` fields decode to their zero value, so `{}` is a valid
/// (empty) car.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Car {
    #[serde(deserialize_with = "null_as_zero")]
    pub id: String,
    /// Manufacturer
    #[serde(deserialize_with = "null_as_zero")]
    pub name: String,
    #[serde(deserialize_with = "null_as_zero")]
    pub model: String,
    /// Odometer reading
    #[serde(deserialize_with = "null_as_zero")]
    pub run: i64,
    /// Number of previous owners
    #[serde(deserialize_with = "null_as_zero")]
    pub owners: u8,
}

fn null_as_zero<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Car {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        model: impl Into<String>,
        run: i64,
        owners: u8,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            model: model.into(),
            run,
            owners,
        }
    }
}

/// Body of a PATCH request.
///
/// Only supplied, non-zero fields are written to the stored car: an empty
/// string or `0` is treated the same as an absent field. The `id` is decoded
/// for type checking but never applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CarPatch {
    #[serde(rename = "id")]
    _id: Option<String>,
    pub name: Option<String>,
    pub model: Option<String>,
    pub run: Option<i64>,
    pub owners: Option<u8>,
}

impl CarPatch {
    /// Write the supplied fields onto `car`
    pub fn apply(&self, car: &mut Car) {
        if let Some(name) = self.name.as_deref().filter(|s| !s.is_empty()) {
            car.name = name.to_string();
        }
        if let Some(model) = self.model.as_deref().filter(|s| !s.is_empty()) {
            car.model = model.to_string();
        }
        if let Some(run) = self.run.filter(|&r| r != 0) {
            car.run = run;
        }
        if let Some(owners) = self.owners.filter(|&o| o != 0) {
            car.owners = owners;
        }
    }
}

/// Records written out when no backing file exists yet
pub fn default_cars() -> Vec<Car> {
    vec![
        Car::new("1", "Toyota", "Rav 4", 100000, 3),
        Car::new("2", "BMW", "3-Series", 50000, 1),
        Car::new("3", "Haval", "M6", 100000, 2),
    ]
}
