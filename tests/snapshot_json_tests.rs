use diagram_rs::api::{
    SCENE_SNAPSHOT_JSON_SCHEMA_V1, SceneSnapshotJsonContractV1, WidgetOptions, create_widget,
};
use diagram_rs::playback::{ManualFrameScheduler, PlaybackStatus};
use diagram_rs::render::{Container, NullRenderer};
use diagram_rs::widgets::{GalaxyLifeMap, SolarSystemMotion};
use diagram_rs::{DiagramError, SceneSnapshot};

#[test]
fn snapshot_summarizes_host_state() {
    let mut host = create_widget(
        Container::new("galaxy", NullRenderer::default()),
        Box::new(GalaxyLifeMap::new()),
        ManualFrameScheduler::new(),
        WidgetOptions::default().with_seed(5),
    )
    .expect("galaxy host");
    host.pointer_move(200.0, 200.0).expect("hover");

    let snapshot = host.snapshot();
    assert_eq!(snapshot.widget, "galaxy-life-map");
    assert_eq!(snapshot.mode, "spiral");
    assert_eq!(snapshot.status, PlaybackStatus::Stopped);
    assert_eq!(snapshot.highlighted_region.as_deref(), Some("core"));
    assert_eq!(snapshot.node_count, host.frame().len());
    assert_eq!(snapshot.region_count, host.region_count());
    assert_eq!(
        snapshot.layer_sizes.values().sum::<usize>(),
        snapshot.node_count
    );
    assert_eq!(snapshot.info["galaxy"], "spiral");
}

#[test]
fn contract_payload_round_trips() {
    let host = create_widget(
        Container::new("solar", NullRenderer::default()),
        Box::new(SolarSystemMotion::new()),
        ManualFrameScheduler::new(),
        WidgetOptions::default().with_seed(9),
    )
    .expect("solar host");

    let json = host
        .snapshot_json_contract_v1_pretty()
        .expect("contract json");
    let payload: SceneSnapshotJsonContractV1 = serde_json::from_str(&json).expect("payload");
    assert_eq!(payload.schema_version, SCENE_SNAPSHOT_JSON_SCHEMA_V1);

    let restored = SceneSnapshot::from_json_compat_str(&json).expect("compat parse");
    assert_eq!(restored, host.snapshot());
}

#[test]
fn bare_snapshot_is_accepted_too() {
    let host = create_widget(
        Container::new("galaxy", NullRenderer::default()),
        Box::new(GalaxyLifeMap::new()),
        ManualFrameScheduler::new(),
        WidgetOptions::default().with_seed(5),
    )
    .expect("galaxy host");

    let bare = host.snapshot_json_pretty().expect("bare json");
    let restored = SceneSnapshot::from_json_compat_str(&bare).expect("compat parse");
    assert_eq!(restored, host.snapshot());
}

#[test]
fn unknown_schema_version_is_rejected() {
    let host = create_widget(
        Container::new("galaxy", NullRenderer::default()),
        Box::new(GalaxyLifeMap::new()),
        ManualFrameScheduler::new(),
        WidgetOptions::default().with_seed(5),
    )
    .expect("galaxy host");

    let mut payload: serde_json::Value =
        serde_json::from_str(&host.snapshot_json_contract_v1_pretty().expect("json"))
            .expect("value");
    payload["schema_version"] = serde_json::json!(2);

    let result = SceneSnapshot::from_json_compat_str(&payload.to_string());
    assert!(matches!(
        result,
        Err(DiagramError::InvalidData(message)) if message.contains("schema")
    ));
}

#[test]
fn garbage_input_is_invalid_data() {
    assert!(matches!(
        SceneSnapshot::from_json_compat_str("{\"nope\": true}"),
        Err(DiagramError::InvalidData(_))
    ));
}
