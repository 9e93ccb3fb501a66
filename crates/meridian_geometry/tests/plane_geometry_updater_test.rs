//! Integration tests for plane geometry updaters.

#[macro_use]
mod common;

use approx::assert_relative_eq;
use meridian_core::{
    constant, dynamic, undefined, Cartesian2, Cartesian3, Color, Entity, EntityHandle,
    EntityProperty, MaterialProperty, Plane, PlaneGraphics, TimeIntervalCollection,
};
use meridian_geometry::kinds::{PlaneGeometry, PlaneOutlineGeometry};
use meridian_geometry::{
    BoundingSphereState, Geometry, PlaneGeometryUpdater, PlaneKind, SceneContext, VertexFormat,
};

use common::{
    changes, containers, count_changes, dynamic_property, erased, primitive_count, time,
};

fn create_basic_plane() -> Entity {
    let mut entity = Entity::new();
    entity.position = Some(constant(Cartesian3::from_degrees(0.0, 0.0, 0.0)));
    entity.plane = Some(PlaneGraphics {
        plane: Some(constant(Plane::new(Cartesian3::UNIT_X, 0.0))),
        dimensions: Some(constant(Cartesian2::new(1.0, 2.0))),
        ..PlaneGraphics::default()
    });
    entity
}

geometry_updater_contract!(PlaneKind, plane, create_basic_plane);

fn updater_for(entity: Entity) -> (EntityHandle, PlaneGeometryUpdater) {
    let handle = EntityHandle::new(entity);
    let updater = PlaneGeometryUpdater::new(handle.clone(), SceneContext::default());
    (handle, updater)
}

fn edit(handle: &EntityHandle, f: impl FnOnce(&mut PlaneGraphics)) {
    handle.modify(EntityProperty::Plane, |entity| {
        if let Some(graphics) = entity.plane.as_mut() {
            f(graphics);
        }
    });
}

#[test]
fn test_time_varying_plane_is_dynamic() {
    let (handle, updater) = updater_for(create_basic_plane());
    edit(&handle, |graphics| {
        graphics.plane = Some(dynamic(Plane::new(Cartesian3::UNIT_X, 0.0)));
    });
    assert!(updater.is_dynamic());
}

#[test]
fn test_time_varying_dimensions_is_dynamic() {
    let (handle, updater) = updater_for(create_basic_plane());
    edit(&handle, |graphics| {
        graphics.dimensions = Some(dynamic(Cartesian2::new(1.0, 2.0)));
    });
    assert!(updater.is_dynamic());
}

#[test]
fn test_plane_is_never_closed() {
    let (_handle, updater) = updater_for(create_basic_plane());
    assert!(!updater.is_closed());
    assert!(!updater.on_terrain());
}

#[test]
fn test_creates_per_material_geometry() {
    let mut entity = create_basic_plane();
    if let Some(graphics) = entity.plane.as_mut() {
        graphics.style.material = Some(MaterialProperty::grid(Color::WHITE).shared());
        graphics.style.outline = Some(constant(true));
        graphics.style.outline_color = Some(constant(Color::BLUE));
    }
    let (_handle, updater) = updater_for(entity);

    let fill = updater
        .create_fill_geometry_instance(&time())
        .expect("fill instance");
    let Geometry::Plane(PlaneGeometry {
        dimensions,
        vertex_format,
        ..
    }) = &fill.geometry
    else {
        panic!("expected plane fill geometry, got {:?}", fill.geometry);
    };
    assert_eq!(*dimensions, Cartesian2::new(1.0, 2.0));
    assert_eq!(*vertex_format, VertexFormat::PositionNormalAndSt);
    assert!(fill.attributes.color.is_none());
    assert!(fill.attributes.show.is_shown());

    let outline = updater
        .create_outline_geometry_instance(&time())
        .expect("outline instance");
    assert!(matches!(outline.geometry, Geometry::PlaneOutline(PlaneOutlineGeometry { .. })));
    assert!(outline.geometry.is_outline());
    assert!(outline.attributes.color.is_some());
}

#[test]
fn test_dynamic_updater_sets_properties() {
    let show = dynamic_property(Some(true));
    let fill = dynamic_property(Some(true));
    let outline = dynamic_property(Some(true));
    let plane = dynamic_property(Some(Plane::new(Cartesian3::UNIT_X, 0.0)));
    let dimensions = dynamic_property(Some(Cartesian2::new(1.0, 2.0)));

    let mut entity = Entity::new();
    entity.position = Some(constant(Cartesian3::from_degrees(0.0, 0.0, 0.0)));
    let mut graphics = PlaneGraphics {
        plane: Some(erased(&plane)),
        dimensions: Some(erased(&dimensions)),
        ..PlaneGraphics::default()
    };
    graphics.style.show = Some(erased(&show));
    graphics.style.fill = Some(erased(&fill));
    graphics.style.outline = Some(erased(&outline));
    entity.plane = Some(graphics);

    let (handle, updater) = updater_for(entity);
    let (primitives, ground) = containers();
    let mut dynamic_updater = updater
        .create_dynamic_updater(primitives.clone(), ground)
        .expect("dynamic updater");
    assert_eq!(primitive_count(&primitives), 0);

    dynamic_updater.update(&time()).expect("update");
    assert_eq!(primitive_count(&primitives), 2);
    assert!(!dynamic_updater.is_destroyed());

    let options = dynamic_updater.options().expect("options resolved");
    assert_eq!(options.id, handle.id());
    assert_eq!(options.plane, plane.get());
    assert_eq!(options.dimensions, dimensions.get());

    handle.modify(EntityProperty::Show, |entity| entity.show = Some(constant(false)));
    dynamic_updater.update(&time()).expect("update");
    assert_eq!(primitive_count(&primitives), 0);
    handle.modify(EntityProperty::Show, |entity| entity.show = Some(constant(true)));

    show.set_value(Some(false));
    handle.notify(EntityProperty::Plane);
    dynamic_updater.update(&time()).expect("update");
    assert_eq!(primitive_count(&primitives), 0);

    show.set_value(Some(true));
    fill.set_value(Some(false));
    handle.notify(EntityProperty::Plane);
    dynamic_updater.update(&time()).expect("update");
    assert_eq!(primitive_count(&primitives), 1);

    fill.set_value(Some(true));
    outline.set_value(Some(false));
    handle.notify(EntityProperty::Plane);
    dynamic_updater.update(&time()).expect("update");
    assert_eq!(primitive_count(&primitives), 1);

    dynamic_updater.destroy();
    assert_eq!(primitive_count(&primitives), 0);
    updater.destroy();
}

#[test]
fn test_geometry_changed_raised_when_expected() {
    let (handle, updater) = updater_for(create_basic_plane());
    let count = count_changes(&updater);

    edit(&handle, |graphics| graphics.dimensions = Some(undefined()));
    assert_eq!(changes(&count), 1);

    handle.modify(EntityProperty::Availability, |entity| {
        entity.availability = Some(TimeIntervalCollection::new());
    });
    assert_eq!(changes(&count), 2);

    edit(&handle, |graphics| graphics.dimensions = None);
    assert_eq!(changes(&count), 3);

    // No valid geometry, so further edits stay silent.
    edit(&handle, |graphics| graphics.style.fill = Some(constant(true)));
    handle.modify(EntityProperty::ViewFrom, |entity| {
        entity.view_from = Some(constant(Cartesian3::UNIT_X));
    });
    assert_eq!(changes(&count), 3);
}

#[test]
fn test_dynamic_bounding_sphere() {
    let mut entity = create_basic_plane();
    if let Some(graphics) = entity.plane.as_mut() {
        graphics.plane = Some(dynamic(Plane::new(Cartesian3::UNIT_X, 0.0)));
        graphics.dimensions = Some(dynamic(Cartesian2::new(1.0, 2.0)));
    }
    let (handle, updater) = updater_for(entity);
    let (primitives, ground) = containers();
    let mut dynamic_updater = updater
        .create_dynamic_updater(primitives, ground)
        .expect("dynamic updater");

    dynamic_updater.update(&time()).expect("update");
    let BoundingSphereState::Done(sphere) = dynamic_updater.bounding_sphere().expect("alive")
    else {
        panic!("expected a bounding sphere after update");
    };
    let position = Cartesian3::from_degrees(0.0, 0.0, 0.0);
    assert_relative_eq!(sphere.center.distance(position), 0.0, epsilon = 1e-6);
    assert_relative_eq!(sphere.radius, 5.0_f64.sqrt() * 0.5, epsilon = 1e-9);

    handle.modify(EntityProperty::Availability, |entity| {
        entity.availability = Some(TimeIntervalCollection::new());
    });
    dynamic_updater.update(&time()).expect("update");
    assert_eq!(
        dynamic_updater.bounding_sphere().expect("alive"),
        BoundingSphereState::Failed
    );
}
