//! Error type for map construction, decomposition and registry lookup.

use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MapError {
    /// A map type name was looked up but never registered.
    #[error("cannot create map of unregistered type {0}")]
    Lookup(String),

    /// A map type name was registered twice.
    #[error("map type {0} is already registered")]
    Key(String),

    /// A matrix failed a precondition, or a numeric kernel did not
    /// converge.
    #[error("{0}")]
    Arithmetic(&'static str),
}

pub type Result<T, E = MapError> = core::result::Result<T, E>;
