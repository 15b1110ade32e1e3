mod concepts;

use concepts::{
    ErasedABC, GeomWidget, Geometry, Letters, MeasuredWidget, OnlyWidget, Probe, Widget,
    WidgetGeom, A, ABC, AB, ABc, AbC, B, BC, C,
};
use rubber_types::TypeErasure;
use serde_json::json;

#[test]
fn should_expose_operations_of_every_source() {
    let widget = TypeErasure::<dyn GeomWidget>::new(Probe::default());

    assert_eq!(widget.size(), 42);
    assert_eq!(widget.render(), "probe");
}

#[test]
fn should_route_each_operation_to_its_own_adapter() {
    let probe = Probe::default();
    let widget = TypeErasure::<dyn GeomWidget>::new(probe.clone());

    widget.size();
    assert_eq!(probe.take_calls(), vec!["geometry"]);

    widget.render();
    assert_eq!(probe.take_calls(), vec!["widget"]);
}

#[test]
fn should_describe_merged_concept() {
    let description = TypeErasure::<dyn GeomWidget>::DESCRIPTION;

    assert_eq!(description.name(), "merge::concepts::GeomWidget");
    assert!(description.is_merged());
    assert_eq!(description.operations().collect::<Vec<_>>(), vec!["size", "render"]);
    assert_eq!(
        description.to_string(),
        "GeomWidget = Geometry(size) + Widget(render)"
    );
}

#[test]
fn should_collapse_diamond_sources() {
    let description = <dyn ABC as rubber_types::Spec>::DESCRIPTION;
    let leaves: Vec<_> = description.leaves().iter().map(|leaf| leaf.short_name()).collect();

    assert_eq!(leaves, vec!["A", "B", "C"]);
    assert!(description.extends(&<dyn AB as rubber_types::Spec>::DESCRIPTION));
    assert!(description.extends(&<dyn BC as rubber_types::Spec>::DESCRIPTION));

    let letters = TypeErasure::<dyn ABC>::new(Letters);
    assert_eq!(
        [letters.alpha(), letters.beta(), letters.gamma()],
        ["a", "b", "c"]
    );
}

#[test]
fn should_merge_associatively() {
    let grouped_right = TypeErasure::<dyn ABc>::DESCRIPTION;
    let grouped_left = TypeErasure::<dyn AbC>::DESCRIPTION;

    assert!(grouped_right.same_leaves(&grouped_left));
    assert_eq!(grouped_right.leaves(), grouped_left.leaves());
    assert_eq!(
        grouped_right.operations().collect::<Vec<_>>(),
        vec!["alpha", "beta", "gamma"]
    );

    let right = TypeErasure::<dyn ABc>::new(Letters);
    let left = TypeErasure::<dyn AbC>::new(Letters);
    assert_eq!(
        [right.alpha(), right.beta(), right.gamma()],
        [left.alpha(), left.beta(), left.gamma()]
    );
}

#[test]
fn should_read_description_from_a_handle() {
    let widget = TypeErasure::<dyn GeomWidget>::new(Probe::default());

    assert_eq!(
        TypeErasure::description(&widget),
        TypeErasure::<dyn GeomWidget>::DESCRIPTION
    );
    assert!(TypeErasure::description(&widget).has_operation("size"));
}

#[test]
fn should_merge_erasure_types_like_descriptions() {
    let direct = TypeErasure::<dyn GeomWidget>::DESCRIPTION;
    let from_erasures = TypeErasure::<dyn MeasuredWidget>::DESCRIPTION;
    assert_eq!(direct.leaves(), from_erasures.leaves());

    let probe = Probe::default();
    let first = TypeErasure::<dyn GeomWidget>::new(probe.clone());
    let second = TypeErasure::<dyn MeasuredWidget>::new(probe.clone());

    assert_eq!(first.size(), second.size());
    assert_eq!(first.render(), second.render());
    assert_eq!(
        probe.take_calls(),
        vec!["geometry", "geometry", "widget", "widget"]
    );
}

#[test]
fn should_merge_merged_erasure_types() {
    assert!(TypeErasure::<dyn ErasedABC>::DESCRIPTION
        .same_leaves(&TypeErasure::<dyn ABC>::DESCRIPTION));

    let letters = TypeErasure::<dyn ErasedABC>::new(Letters);
    assert_eq!(letters.beta(), "b");
}

#[test]
fn should_treat_single_source_merge_as_identity() {
    let only = TypeErasure::<dyn OnlyWidget>::DESCRIPTION;
    assert_eq!(only.leaves(), TypeErasure::<dyn Widget>::DESCRIPTION.leaves());

    let widget = TypeErasure::<dyn OnlyWidget>::new(Probe::default());
    assert_eq!(widget.render(), "probe");
}

#[test]
fn should_not_depend_on_merge_order() {
    let geom_widget = TypeErasure::<dyn GeomWidget>::DESCRIPTION;
    let widget_geom = TypeErasure::<dyn WidgetGeom>::DESCRIPTION;

    assert_ne!(geom_widget.leaves(), widget_geom.leaves());
    assert!(geom_widget.same_leaves(&widget_geom));

    let probe = Probe::default();
    let first = TypeErasure::<dyn GeomWidget>::new(probe.clone());
    let second = TypeErasure::<dyn WidgetGeom>::new(probe);
    assert_eq!(
        (first.size(), first.render()),
        (second.size(), second.render())
    );
}

#[test]
fn should_accept_merged_handles_where_sources_are_expected() {
    fn measure(geometry: &impl Geometry) -> usize {
        geometry.size()
    }

    let widget = TypeErasure::<dyn GeomWidget>::new(Probe::default());
    assert_eq!(measure(&widget), 42);
}

#[test]
fn should_serialize_description() {
    let value = serde_json::to_value(TypeErasure::<dyn GeomWidget>::DESCRIPTION).unwrap();

    assert_eq!(
        value,
        json!({
            "name": "merge::concepts::GeomWidget",
            "leaves": [
                { "name": "merge::concepts::Geometry", "operations": ["size"] },
                { "name": "merge::concepts::Widget", "operations": ["render"] },
            ],
        })
    );
}
