//! Maps composed of two maps applied in sequence.

use std::borrow::Cow;
use std::sync::Arc;

use vf::prelude::*;

use crate::linear::{ScaleMap, TranslationMap, UnitaryMap};
use crate::map::{Map, MapRef};

/// A map that applies `A` first and `B` second.
///
/// Both parts are owned by value; cloning a compound map clones its parts.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct CompoundMap<A, B> {
    first: A,
    second: B,
}

/// A symmetric linear map `U · diag(λ) · Uᵀ`, stored as rotation into the
/// eigenbasis and scale, followed by rotation back.
pub type SymmetricMap = CompoundMap<CompoundMap<UnitaryMap, ScaleMap>, UnitaryMap>;

/// A linear map `S · U`: scale along principal axes, then rotate.
pub type PolarDecomposedMap = CompoundMap<SymmetricMap, UnitaryMap>;

/// A rigid motion: rotation, then translation.
pub type UnitaryAndTranslationMap = CompoundMap<UnitaryMap, TranslationMap>;

/// An affine map factored as scale along principal axes, then rotation,
/// then translation.
pub type FullyDecomposedMap = CompoundMap<SymmetricMap, UnitaryAndTranslationMap>;

impl<A, B> CompoundMap<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }

    pub fn first_map(&self) -> &A {
        &self.first
    }

    pub fn second_map(&self) -> &B {
        &self.second
    }

    pub fn into_parts(self) -> (A, B) {
        (self.first, self.second)
    }
}

impl<A: Map, B: Map> Map for CompoundMap<A, B> {
    fn map_type(&self) -> Cow<'static, str> {
        format!(
            "CompoundMap<{}, {}>",
            self.first.map_type(),
            self.second.map_type()
        )
        .into()
    }

    fn apply_map(&self, p: &Vec3) -> Vec3 {
        self.second.apply_map(&self.first.apply_map(p))
    }

    fn apply_inverse_map(&self, p: &Vec3) -> Vec3 {
        self.first
            .apply_inverse_map(&self.second.apply_inverse_map(p))
    }

    fn is_linear(&self) -> bool {
        self.first.is_linear() && self.second.is_linear()
    }

    fn inverse(&self) -> MapRef {
        Arc::new(CompoundMap::new(self.second.inverse(), self.first.inverse()))
    }

    fn to_affine(&self) -> Mat4 {
        self.first.to_affine() * self.second.to_affine()
    }
}

#[cfg(test)]
mod tests {
    use vf::assert_approx_eq;
    use vf::math::vec3;

    use super::*;

    fn rigid() -> UnitaryAndTranslationMap {
        let rot = UnitaryMap::from_axis_angle(&vec3(1.0, 1.0, 0.0), 0.7).unwrap();
        CompoundMap::new(rot, TranslationMap::new(vec3(1.0, -2.0, 3.0)))
    }

    #[test]
    fn applies_first_then_second() {
        let scale = ScaleMap::new(vec3(2.0, 2.0, 2.0)).unwrap();
        let translate = TranslationMap::new(vec3(1.0, 0.0, 0.0));

        let st = CompoundMap::new(scale, translate);
        assert_eq!(st.apply_map(&vec3(1.0, 1.0, 1.0)), vec3(3.0, 2.0, 2.0));

        let ts = CompoundMap::new(translate, scale);
        assert_eq!(ts.apply_map(&vec3(1.0, 1.0, 1.0)), vec3(4.0, 2.0, 2.0));
    }

    #[test]
    fn inverse_and_matrix_agree() {
        let m = rigid();
        let p = vec3(0.5, 4.0, -1.0);

        assert_approx_eq!(m.apply_inverse_map(&m.apply_map(&p)), p);
        assert_approx_eq!(m.inverse().apply_map(&m.apply_map(&p)), p);
        assert_approx_eq!(m.to_affine().apply_point(&p), m.apply_map(&p));
        assert_approx_eq!(m.determinant(), 1.0);
    }

    #[test]
    fn type_name_nests() {
        assert_eq!(
            rigid().map_type(),
            "CompoundMap<UnitaryMap, TranslationMap>"
        );
        assert_eq!(
            SymmetricMap::default().map_type(),
            "CompoundMap<CompoundMap<UnitaryMap, ScaleMap>, UnitaryMap>"
        );
    }

    #[test]
    fn never_a_scale() {
        let m = CompoundMap::new(ScaleMap::default(), ScaleMap::default());
        assert!(m.is_linear());
        assert!(!m.is_scale() && !m.is_scale_translate());
    }

    #[test]
    fn parts_are_owned_copies() {
        let m = rigid();
        let (rot, trans) = m.into_parts();
        assert_eq!(m.first_map(), &rot);
        assert_eq!(m.second_map(), &trans);
    }
}
