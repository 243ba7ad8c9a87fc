//! In-memory driver and location stores.
//!
//! Both stores hand out sequential ids starting at 1 and never reuse them.
//! Nothing here is synchronized; callers that share a store across threads
//! wrap it in a lock.

use std::collections::BTreeMap;

use crate::coord::Coordinate;
use crate::error::{Result, TrackError};
use crate::location::Location;

/// A registered driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Driver {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
}

/// All registered drivers, keyed by id.
#[derive(Debug, Default)]
pub struct DriverRegistry {
    drivers: BTreeMap<u64, Driver>,
    last_id: u64,
}

impl DriverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a driver under the next free id.
    pub fn create(
        &mut self,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Driver {
        self.last_id += 1;
        let driver = Driver {
            id: self.last_id,
            first_name: first_name.into(),
            last_name: last_name.into(),
        };
        self.drivers.insert(driver.id, driver.clone());
        driver
    }

    pub fn get(&self, id: u64) -> Option<&Driver> {
        self.drivers.get(&id)
    }

    /// All drivers in id order.
    pub fn all(&self) -> Vec<Driver> {
        self.drivers.values().cloned().collect()
    }

    pub fn contains(&self, id: u64) -> bool {
        self.drivers.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.drivers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drivers.is_empty()
    }
}

/// The recorded locations of one driver.
#[derive(Debug)]
pub struct DriverLocations {
    driver_id: u64,
    locations: BTreeMap<u64, Location>,
    last_id: u64,
}

impl DriverLocations {
    pub fn new(driver_id: u64) -> Self {
        Self {
            driver_id,
            locations: BTreeMap::new(),
            last_id: 0,
        }
    }

    pub fn driver_id(&self) -> u64 {
        self.driver_id
    }

    /// Store a location under the next free id and return the stored copy.
    pub fn add(&mut self, mut location: Location) -> &Location {
        self.last_id += 1;
        location.set_id(self.last_id);
        self.locations.entry(self.last_id).or_insert(location)
    }

    /// All locations in the order they were recorded.
    pub fn all(&self) -> Vec<Location> {
        self.locations.values().cloned().collect()
    }

    pub fn get(&self, location_id: u64) -> Option<&Location> {
        self.locations.get(&location_id)
    }

    /// The most recently recorded location that has not been deleted.
    pub fn last(&self) -> Option<&Location> {
        self.locations.values().next_back()
    }

    /// Move an existing location. Its id and timestamp are kept.
    ///
    /// # Errors
    ///
    /// Returns [`TrackError::LocationNotFound`] if there is no such location.
    pub fn update(&mut self, location_id: u64, coord: Coordinate) -> Result<&Location> {
        let driver_id = self.driver_id;
        let location = self
            .locations
            .get_mut(&location_id)
            .ok_or(TrackError::LocationNotFound {
                driver_id,
                location_id,
            })?;
        location.set_coordinate(coord);
        Ok(location)
    }

    /// Remove a location and return it.
    ///
    /// # Errors
    ///
    /// Returns [`TrackError::LocationNotFound`] if there is no such location.
    pub fn delete(&mut self, location_id: u64) -> Result<Location> {
        self.locations
            .remove(&location_id)
            .ok_or(TrackError::LocationNotFound {
                driver_id: self.driver_id,
                location_id,
            })
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

/// Location tracks of all drivers, keyed by driver id.
///
/// A track is created the first time a location is recorded for a driver id.
/// The driver does not have to exist in a [`DriverRegistry`].
#[derive(Debug, Default)]
pub struct LocationRegistry {
    tracks: BTreeMap<u64, DriverLocations>,
}

impl LocationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a location for a driver, creating the driver's track if needed.
    pub fn record(&mut self, driver_id: u64, location: Location) -> &Location {
        self.tracks
            .entry(driver_id)
            .or_insert_with(|| DriverLocations::new(driver_id))
            .add(location)
    }

    /// The track of a driver.
    ///
    /// # Errors
    ///
    /// Returns [`TrackError::DriverNotFound`] if nothing was ever recorded for
    /// the driver.
    pub fn track(&self, driver_id: u64) -> Result<&DriverLocations> {
        self.tracks
            .get(&driver_id)
            .ok_or(TrackError::DriverNotFound { driver_id })
    }

    /// Mutable access to the track of a driver.
    ///
    /// # Errors
    ///
    /// Returns [`TrackError::DriverNotFound`] if nothing was ever recorded for
    /// the driver.
    pub fn track_mut(&mut self, driver_id: u64) -> Result<&mut DriverLocations> {
        self.tracks
            .get_mut(&driver_id)
            .ok_or(TrackError::DriverNotFound { driver_id })
    }

    pub fn contains(&self, driver_id: u64) -> bool {
        self.tracks.contains_key(&driver_id)
    }
}
