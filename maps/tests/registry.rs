use std::sync::Arc;
use std::thread;

use parking_lot::{Mutex, MutexGuard};
use vf::math::{Vec3, vec3};
use voxform_maps::{
    AffineMap, Map, MapError, MapRef, MapRegistry, MapType, ScaleMap,
    TranslationMap, UniformScaleMap,
};

// Tests share the process-wide registry
static SERIAL: Mutex<()> = Mutex::new(());

fn registry() -> (MutexGuard<'static, ()>, &'static MapRegistry) {
    let guard = SERIAL.lock();
    let reg = MapRegistry::instance();
    reg.clear();
    (guard, reg)
}

fn double() -> MapRef {
    Arc::new(UniformScaleMap::new(2.0).unwrap())
}

fn triple() -> MapRef {
    Arc::new(UniformScaleMap::new(3.0).unwrap())
}

#[test]
fn instance_is_unique() {
    let handles: Vec<_> = (0..8)
        .map(|_| thread::spawn(|| MapRegistry::instance() as *const _ as usize))
        .collect();
    let addr = MapRegistry::instance() as *const _ as usize;
    for h in handles {
        assert_eq!(h.join().unwrap(), addr);
    }
}

#[test]
fn duplicate_registration_keeps_first() {
    let (_guard, reg) = registry();

    reg.register_map("Doubler", double).unwrap();
    assert_eq!(
        reg.register_map("Doubler", triple),
        Err(MapError::Key("Doubler".into()))
    );

    let map = reg.create_map("Doubler").unwrap();
    assert_eq!(map.apply_map(&vec3(1.0, 1.0, 1.0)), vec3(2.0, 2.0, 2.0));
}

#[test]
fn lookup_after_unregister_fails() {
    let (_guard, reg) = registry();

    reg.register_map("Doubler", double).unwrap();
    assert!(reg.is_registered("Doubler"));

    reg.unregister_map("Doubler");
    assert!(!reg.is_registered("Doubler"));
    assert_eq!(
        reg.create_map("Doubler").unwrap_err(),
        MapError::Lookup("Doubler".into())
    );

    // Idempotent
    reg.unregister_map("Doubler");
    reg.register_map("Doubler", triple).unwrap();
    let map = reg.create_map("Doubler").unwrap();
    assert_eq!(map.apply_map(&vec3(1.0, 0.0, 0.0)), vec3(3.0, 0.0, 0.0));
}

#[test]
fn clear_removes_everything() {
    let (_guard, reg) = registry();

    reg.register_builtin_maps();
    assert!(!reg.registered_names().is_empty());

    reg.clear();
    assert!(reg.registered_names().is_empty());
    assert!(matches!(
        reg.create_map(ScaleMap::NAME),
        Err(MapError::Lookup(_))
    ));
}

#[test]
fn builtin_maps_are_identities_by_default() {
    let (_guard, reg) = registry();
    reg.register_builtin_maps();

    assert_eq!(
        reg.registered_names(),
        [
            "AffineMap",
            "ScaleMap",
            "ScaleTranslateMap",
            "TranslationMap",
            "UniformScaleMap",
            "UniformScaleTranslateMap",
            "UnitaryMap",
        ]
    );

    let p = vec3(1.5, -2.0, 4.0);
    for name in reg.registered_names() {
        let map = reg.create_map(&name).unwrap();
        assert_eq!(map.map_type(), name);
        assert!(map.is_linear());
        assert_eq!(map.apply_map(&p), p, "{name}");
        assert_eq!(map.voxel_size(), Vec3::new([1.0; 3]), "{name}");
    }
}

#[test]
fn builtins_do_not_replace_custom_factories() {
    let (_guard, reg) = registry();

    reg.register_map(TranslationMap::NAME, double).unwrap();
    reg.register_builtin_maps();

    let map = reg.create_map(TranslationMap::NAME).unwrap();
    assert_eq!(map.map_type(), UniformScaleMap::NAME);
    assert!(reg.is_registered(AffineMap::NAME));
}

#[test]
fn concurrent_registration_has_one_winner() {
    let (_guard, reg) = registry();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            thread::spawn(move || {
                let f = if i % 2 == 0 { double } else { triple };
                MapRegistry::instance().register_map("Contested", f)
            })
        })
        .collect();

    let oks = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(Result::is_ok)
        .count();

    assert_eq!(oks, 1);
    assert_eq!(reg.registered_names(), ["Contested"]);
}

#[test]
fn factory_may_use_registry() {
    let (_guard, reg) = registry();

    fn nested() -> MapRef {
        let reg = MapRegistry::instance();
        reg.create_map("Doubler").unwrap_or_else(|_| triple())
    }
    reg.register_map("Doubler", double).unwrap();
    reg.register_map("Nested", nested).unwrap();

    let map = reg.create_map("Nested").unwrap();
    assert_eq!(map.apply_map(&vec3(0.0, 1.0, 0.0)), vec3(0.0, 2.0, 0.0));
}
