//! Transforms between the index space of a voxel grid and world space.
//!
//! Provides a family of [maps][Map], from plain translations and scales
//! up to general [affine maps][AffineMap] and [compound maps][CompoundMap]
//! of two parts. Arbitrary affine matrices can be [factored][decompose]
//! into scale, rotation and translation, and affine maps can be
//! [simplified][simplify()] to the cheapest equivalent representation.
//!
//! Map types can also be instantiated by name through the process-wide
//! [`MapRegistry`].
//!
//! All matrices act on row vectors; see [`vf::math`].

pub mod affine;
pub mod compound;
pub mod decompose;
pub mod error;
pub mod inverse;
pub mod linear;
pub mod map;
pub mod registry;
pub mod simplify;

pub use {
    affine::AffineMap,
    compound::{
        CompoundMap, FullyDecomposedMap, PolarDecomposedMap, SymmetricMap,
        UnitaryAndTranslationMap,
    },
    decompose::{
        create_fully_decomposed_map, create_polar_decomposed_map,
        create_symmetric_map,
    },
    error::{MapError, Result},
    inverse::approx_inverse,
    linear::{
        ScaleMap, ScaleTranslateMap, TranslationMap, UniformScaleMap,
        UniformScaleTranslateMap, UnitaryMap,
    },
    map::{
        IndexSpace, IndexToWorld, Map, MapRef, MapType, WorldSpace,
        WorldToIndex,
    },
    registry::{MapFactory, MapRegistry},
    simplify::simplify,
};
