//! Canonicalizing affine maps to the most specific equivalent type.

use std::sync::Arc;

use tracing::trace;
use vf::prelude::*;

use crate::affine::AffineMap;
use crate::linear::{
    ScaleMap, ScaleTranslateMap, UniformScaleMap, UniformScaleTranslateMap,
};
use crate::map::{Map, MapRef};

fn is_uniform(scale: &Vec3) -> bool {
    scale[0].approx_eq(&scale[1]) && scale[0].approx_eq(&scale[2])
}

/// Returns the cheapest map that applies identically to `affine`.
///
/// A diagonal matrix becomes a [`UniformScaleMap`] or [`ScaleMap`]; a
/// diagonal linear part with a translation becomes a
/// [`UniformScaleTranslateMap`] or [`ScaleTranslateMap`]. Anything else
/// is returned unchanged.
pub fn simplify(affine: Arc<AffineMap>) -> MapRef {
    let simplified: MapRef = if affine.is_scale() {
        let scale = affine.apply_map(&vec3(1.0, 1.0, 1.0));
        if is_uniform(&scale) {
            Arc::new(UniformScaleMap::new_unchecked(scale[0]))
        } else {
            Arc::new(ScaleMap::new_unchecked(scale))
        }
    } else if affine.is_scale_translate() {
        let translate = affine.apply_map(&Vec3::zero());
        let scale = affine.apply_map(&vec3(1.0, 1.0, 1.0)) - translate;
        if is_uniform(&scale) {
            Arc::new(UniformScaleTranslateMap::new_unchecked(scale[0], translate))
        } else {
            Arc::new(ScaleTranslateMap::new_unchecked(scale, translate))
        }
    } else {
        affine
    };
    trace!(map_type = %simplified.map_type(), "simplified affine map");
    simplified
}

#[cfg(test)]
mod tests {
    use vf::assert_approx_eq;
    use vf::math::{Mat3, Mat4};

    use super::*;

    fn affine(linear: Mat3, translation: Vec3) -> Arc<AffineMap> {
        let m = Mat4::from_mat3_translation(&linear, &translation);
        Arc::new(AffineMap::new(m).unwrap())
    }

    #[test]
    fn uniform_scale() {
        let m = simplify(affine(Mat3::identity() * 2.0, Vec3::zero()));
        assert_eq!(m.map_type(), "UniformScaleMap");
        assert_eq!(m.apply_map(&vec3(1.0, 2.0, 3.0)), vec3(2.0, 4.0, 6.0));
    }

    #[test]
    fn non_uniform_scale() {
        let m = simplify(affine(
            Mat3::from_diagonal(&vec3(1.0, 2.0, 3.0)),
            Vec3::zero(),
        ));
        assert_eq!(m.map_type(), "ScaleMap");
        assert!(m.is_scale());
    }

    #[test]
    fn scale_translate() {
        let t = vec3(1.0, -1.0, 0.5);
        let m = simplify(affine(Mat3::identity() * 3.0, t));
        assert_eq!(m.map_type(), "UniformScaleTranslateMap");
        assert_eq!(m.apply_map(&Vec3::zero()), t);

        let m = simplify(affine(Mat3::from_diagonal(&vec3(1.0, 2.0, -1.0)), t));
        assert_eq!(m.map_type(), "ScaleTranslateMap");
        assert_approx_eq!(m.apply_map(&vec3(1.0, 1.0, 1.0)), vec3(2.0, 1.0, -0.5));
    }

    #[test]
    fn general_affine_is_unchanged() {
        let a = affine(
            [[1.0, 1.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]].into(),
            vec3(1.0, 2.0, 3.0),
        );
        let m = simplify(a.clone());
        assert_eq!(m.map_type(), "AffineMap");
        assert_eq!(m.to_affine(), a.matrix().to::<()>());
    }
}
