//! Process-wide registry of map types, keyed by name.
//!
//! Lets maps be instantiated from their [type name][crate::Map::map_type]
//! alone, for example when reading a serialized transform.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;
use tracing::debug;

use crate::affine::AffineMap;
use crate::error::{MapError, Result};
use crate::linear::{
    ScaleMap, ScaleTranslateMap, TranslationMap, UniformScaleMap,
    UniformScaleTranslateMap, UnitaryMap,
};
use crate::map::{Map, MapRef, MapType};

/// Constructs a default instance of some map type.
pub type MapFactory = fn() -> MapRef;

/// Registry of map factories.
///
/// There is exactly one registry per process, created on first access
/// to [`MapRegistry::instance`] and never torn down. All operations lock
/// the same mutex, held only while the underlying table is read or
/// modified; factories run outside the lock.
#[derive(Debug)]
pub struct MapRegistry {
    factories: Mutex<HashMap<String, MapFactory>>,
}

static REGISTRY: OnceLock<MapRegistry> = OnceLock::new();

impl MapRegistry {
    /// Returns the process-wide registry.
    pub fn instance() -> &'static Self {
        REGISTRY.get_or_init(|| {
            debug!("creating map registry");
            Self { factories: Mutex::new(HashMap::new()) }
        })
    }

    /// Registers `factory` under `name`.
    ///
    /// # Errors
    /// [`MapError::Key`] if `name` is already registered. The existing
    /// factory is kept.
    pub fn register_map(&self, name: &str, factory: MapFactory) -> Result<()> {
        let mut factories = self.factories.lock();
        if factories.contains_key(name) {
            return Err(MapError::Key(name.to_owned()));
        }
        factories.insert(name.to_owned(), factory);
        debug!(map_type = name, "registered map type");
        Ok(())
    }

    /// Removes `name` from the registry. Does nothing if it is absent.
    pub fn unregister_map(&self, name: &str) {
        if self.factories.lock().remove(name).is_some() {
            debug!(map_type = name, "unregistered map type");
        }
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.factories.lock().contains_key(name)
    }

    /// Creates a new map of the type registered under `name`.
    ///
    /// # Errors
    /// [`MapError::Lookup`] if `name` is not registered.
    pub fn create_map(&self, name: &str) -> Result<MapRef> {
        let factory = self
            .factories
            .lock()
            .get(name)
            .copied()
            .ok_or_else(|| MapError::Lookup(name.to_owned()))?;
        Ok(factory())
    }

    /// Removes all registered types.
    pub fn clear(&self) {
        self.factories.lock().clear();
        debug!("cleared map registry");
    }

    /// Returns the registered type names in sorted order.
    pub fn registered_names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.factories.lock().keys().cloned().collect();
        names.sort_unstable();
        names
    }

    /// Registers every elementary map type of this crate under its
    /// [`MapType::NAME`]. Names that are already registered are left
    /// untouched.
    pub fn register_builtin_maps(&self) {
        fn factory<M: Map + Default + 'static>() -> MapRef {
            Arc::new(M::default())
        }
        let builtins: [(&str, MapFactory); 7] = [
            (TranslationMap::NAME, factory::<TranslationMap>),
            (ScaleMap::NAME, factory::<ScaleMap>),
            (UniformScaleMap::NAME, factory::<UniformScaleMap>),
            (ScaleTranslateMap::NAME, factory::<ScaleTranslateMap>),
            (UniformScaleTranslateMap::NAME, factory::<UniformScaleTranslateMap>),
            (UnitaryMap::NAME, factory::<UnitaryMap>),
            (AffineMap::NAME, factory::<AffineMap>),
        ];
        let mut factories = self.factories.lock();
        for (name, f) in builtins {
            factories.entry(name.to_owned()).or_insert(f);
        }
        debug!(count = factories.len(), "registered builtin map types");
    }
}
