//! The polymorphic transform interface.

use std::borrow::Cow;
use std::fmt::Debug;
use std::sync::Arc;

use vf::prelude::*;

/// Shared handle to a type-erased map.
pub type MapRef = Arc<dyn Map>;

/// Basis of the index space of a voxel grid.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct IndexSpace;

/// Basis of world space.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct WorldSpace;

/// Affine matrix taking index-space points to world space.
pub type IndexToWorld =
    Matrix<[[f64; 4]; 4], RealToReal<3, IndexSpace, WorldSpace>>;
/// Affine matrix taking world-space points to index space.
pub type WorldToIndex =
    Matrix<[[f64; 4]; 4], RealToReal<3, WorldSpace, IndexSpace>>;

/// A transform from index space to world space.
///
/// Points are transformed as row vectors. Maps are immutable once
/// constructed and can be shared freely between threads.
pub trait Map: Debug + Send + Sync {
    /// Returns the name of this map's type, as used by the
    /// [registry][crate::MapRegistry].
    fn map_type(&self) -> Cow<'static, str>;

    /// Transforms `p` from index space to world space.
    fn apply_map(&self, p: &Vec3) -> Vec3;

    /// Transforms `p` from world space back to index space.
    fn apply_inverse_map(&self, p: &Vec3) -> Vec3;

    /// Returns whether `self` is representable by a 4×4 affine matrix.
    fn is_linear(&self) -> bool;

    fn is_affine(&self) -> bool {
        self.is_linear()
    }

    /// Returns whether `self` is a pure, possibly non-uniform, scale.
    fn is_scale(&self) -> bool {
        false
    }

    /// Returns whether `self` is a scale followed by a translation.
    /// Every pure scale is also a scale-translate.
    fn is_scale_translate(&self) -> bool {
        false
    }

    /// Returns whether `self` is a pure scale equal along every axis.
    fn is_uniform_scale(&self) -> bool {
        false
    }

    fn is_uniform_scale_translate(&self) -> bool {
        false
    }

    /// Returns the map taking world space back to index space.
    fn inverse(&self) -> MapRef;

    /// Returns the affine matrix equivalent to `self`.
    fn to_affine(&self) -> Mat4;

    fn determinant(&self) -> f64 {
        self.to_affine().determinant()
    }

    /// Returns the world-space lengths of the unit index-space axes.
    fn voxel_size(&self) -> Vec3 {
        let o = self.apply_map(&Vec3::zero());
        let len = |e: Vec3| (self.apply_map(&e) - o).len();
        vec3(
            len(vec3(1.0, 0.0, 0.0)),
            len(vec3(0.0, 1.0, 0.0)),
            len(vec3(0.0, 0.0, 1.0)),
        )
    }
}

/// Map types with a fixed registry name.
pub trait MapType {
    const NAME: &'static str;
}

impl<M: Map + ?Sized> Map for Arc<M> {
    fn map_type(&self) -> Cow<'static, str> {
        (**self).map_type()
    }
    fn apply_map(&self, p: &Vec3) -> Vec3 {
        (**self).apply_map(p)
    }
    fn apply_inverse_map(&self, p: &Vec3) -> Vec3 {
        (**self).apply_inverse_map(p)
    }
    fn is_linear(&self) -> bool {
        (**self).is_linear()
    }
    fn is_affine(&self) -> bool {
        (**self).is_affine()
    }
    fn is_scale(&self) -> bool {
        (**self).is_scale()
    }
    fn is_scale_translate(&self) -> bool {
        (**self).is_scale_translate()
    }
    fn is_uniform_scale(&self) -> bool {
        (**self).is_uniform_scale()
    }
    fn is_uniform_scale_translate(&self) -> bool {
        (**self).is_uniform_scale_translate()
    }
    fn inverse(&self) -> MapRef {
        (**self).inverse()
    }
    fn to_affine(&self) -> Mat4 {
        (**self).to_affine()
    }
    fn determinant(&self) -> f64 {
        (**self).determinant()
    }
    fn voxel_size(&self) -> Vec3 {
        (**self).voxel_size()
    }
}
