//! End-to-end generation from trait declarations

use mockgen_model::{MockModel, RenderOptions, ResolvedEntity, TraitDecl};
use mockgen_render::{
    render_entity, DeliveryStrategy, DispatchConfig, GeneratorConfig, MockGenerator,
    OutputLayout, RenderDispatcher,
};
use mockgen_template::TraitEntity;
use mockgen_test_utils::{clock_decl, store_decl, trait_entity};
use pretty_assertions::assert_eq;

fn entities() -> Vec<TraitEntity> {
    vec![
        trait_entity("kv.Store", store_decl(300)),
        trait_entity("time.Clock", clock_decl(100)),
        trait_entity("marker.Empty", TraitDecl::new("Empty", 200)),
    ]
}

#[test]
fn generate_orders_mocks_by_offset() {
    let config = GeneratorConfig::from_toml_str(
        r#"
        [dispatch]
        delivery = "channel"
        threads = 2

        [layout]
        header = "// @generated by mockgen"
        imports = ["std::sync::atomic::{AtomicUsize, Ordering}", "parking_lot::Mutex"]
        "#,
    )
    .unwrap();

    let generated = MockGenerator::new(config).unwrap().generate(&entities());

    assert_eq!(generated.mock_count, 2);
    assert_eq!(generated.report.rendered, 2);
    assert_eq!(generated.report.skipped.len(), 1);
    assert_eq!(generated.report.skipped[0].as_str(), "marker.Empty");

    let source = &generated.source;
    assert!(source.starts_with("// @generated by mockgen\n\nuse std::sync::atomic::{AtomicUsize, Ordering};\nuse parking_lot::Mutex;\n\n"));

    let clock = source.find("pub struct ClockMock").unwrap();
    let store = source.find("pub struct StoreMock").unwrap();
    assert!(clock < store, "mocks must follow source offsets");
    assert!(!source.contains("EmptyMock"));
}

#[test]
fn generate_is_identical_across_strategies() {
    let options = RenderOptions::new()
        .with_func_args_history(true)
        .with_mock_observable(true);
    let layout = OutputLayout::new().with_cfg_gate("test");

    let sequential = MockGenerator::with_dispatcher(
        RenderDispatcher::sequential(options),
        layout.clone(),
    )
    .generate(&entities());

    for delivery in [DeliveryStrategy::Locked, DeliveryStrategy::Channel] {
        let dispatcher = RenderDispatcher::new(
            DispatchConfig::new()
                .with_delivery(delivery)
                .with_options(options),
        )
        .unwrap();
        let parallel = MockGenerator::with_dispatcher(dispatcher, layout.clone()).generate(&entities());
        assert_eq!(parallel, sequential);
    }
}

#[test]
fn rendering_twice_is_identical() {
    let options = RenderOptions::new()
        .with_template_func(true)
        .with_settable_call_count(true);

    for entity in entities() {
        let first = render_entity(&entity, &options).unwrap();
        let second = render_entity(&entity, &options).unwrap();
        assert_eq!(first, second);

        let model = entity.model();
        assert_eq!(
            model.render(entity.key(), model.name(), &options),
            entity.model().render(entity.key(), model.name(), &options)
        );
    }
}

#[test]
fn generated_store_mock_uses_options() {
    let options = RenderOptions::new()
        .with_func_args_history(true)
        .with_mock_observable(true);
    let entities = vec![trait_entity("kv.Store", store_decl(0))];

    let generated = MockGenerator::with_dispatcher(
        RenderDispatcher::sequential(options),
        OutputLayout::new(),
    )
    .generate(&entities);

    let source = generated.source;
    assert!(source.contains("pub get_arg_values: Mutex<Vec<String>>,"));
    assert!(source.contains("pub put_arg_values: Mutex<Vec<(String, Vec<u8>)>>,"));
    assert!(source.contains("pub changes_subject: broadcast::Sender<String>,"));
    assert!(source.contains("impl Store for StoreMock {"));
}
