use std::cell::RefCell;
use std::rc::Rc;

use diagram_rs::api::{SceneHost, SceneStatePatch, WidgetOptions, create_widget};
use diagram_rs::extensions::UpdateEvent;
use diagram_rs::playback::ManualFrameScheduler;
use diagram_rs::render::{Container, NullRenderer};
use diagram_rs::widgets::{CircleCanvas, GalaxyLifeMap, ScalarViewer, WidgetConfig};

type Events = Rc<RefCell<Vec<UpdateEvent>>>;

fn host_with(
    widget: Box<dyn WidgetConfig>,
    options: WidgetOptions,
    events: &Events,
) -> SceneHost<NullRenderer> {
    let sink = events.clone();
    create_widget(
        Container::new("stage", NullRenderer::default()),
        widget,
        ManualFrameScheduler::new(),
        options.with_on_update(move |event| sink.borrow_mut().push(event.clone())),
    )
    .expect("host")
}

#[test]
fn hovering_the_galaxy_center_reports_the_bulge() {
    let events = Events::default();
    let mut host = host_with(
        Box::new(GalaxyLifeMap::new()),
        WidgetOptions::default(),
        &events,
    );
    assert!(host.region_count() >= 4);

    host.pointer_move(200.0, 200.0).expect("hover");
    assert_eq!(
        events.borrow().as_slice(),
        &[UpdateEvent::Region {
            region: "core".to_owned(),
            label: "Central Bulge".to_owned(),
            potential: 0.15,
        }]
    );
    assert_eq!(host.state().highlighted_region.as_deref(), Some("core"));
    assert_eq!(host.hovered_region(), Some("core"));
}

#[test]
fn moving_off_every_region_emits_clear() {
    let events = Events::default();
    let mut host = host_with(
        Box::new(GalaxyLifeMap::new()),
        WidgetOptions::default(),
        &events,
    );

    host.pointer_move(200.0, 200.0).expect("hover core");
    host.pointer_move(5.0, 5.0).expect("leave");

    let kinds: Vec<&str> = events.borrow().iter().map(UpdateEvent::kind).collect();
    assert_eq!(kinds, vec!["region", "clear"]);
    assert_eq!(host.state().highlighted_region, None);
    assert_eq!(host.hovered_region(), None);
}

#[test]
fn moving_within_one_region_is_silent() {
    let events = Events::default();
    let mut host = host_with(
        Box::new(GalaxyLifeMap::new()),
        WidgetOptions::default(),
        &events,
    );

    host.pointer_move(200.0, 200.0).expect("hover");
    let renders = host.renderer().render_count;
    host.pointer_move(202.0, 199.0).expect("wiggle");

    assert_eq!(events.borrow().len(), 1);
    assert_eq!(host.renderer().render_count, renders);
}

#[test]
fn pointer_leave_clears_the_hover() {
    let events = Events::default();
    let mut host = host_with(
        Box::new(GalaxyLifeMap::new()),
        WidgetOptions::default(),
        &events,
    );

    host.pointer_move(200.0, 200.0).expect("hover");
    host.pointer_leave().expect("leave surface");
    assert_eq!(events.borrow().last(), Some(&UpdateEvent::Clear));
    assert_eq!(host.state().highlighted_region, None);
}

#[test]
fn hover_survives_a_rebuild_that_keeps_the_region() {
    let events = Events::default();
    let mut host = host_with(
        Box::new(GalaxyLifeMap::new()),
        WidgetOptions::default(),
        &events,
    );

    host.pointer_move(200.0, 200.0).expect("hover");
    host.set_state(SceneStatePatch::default().color("text", "#ffffff"))
        .expect("recolor");
    assert_eq!(host.hovered_region(), Some("core"));

    // Still inside the same region, so no new transition.
    host.pointer_move(201.0, 201.0).expect("move");
    assert_eq!(events.borrow().len(), 1);
}

#[test]
fn mode_switch_drops_a_highlight_the_new_mode_lacks() {
    let events = Events::default();
    let mut host = host_with(
        Box::new(GalaxyLifeMap::new()),
        WidgetOptions::default(),
        &events,
    );

    host.set_state(SceneStatePatch {
        highlighted_region: Some(Some("arms".to_owned())),
        ..SceneStatePatch::default()
    })
    .expect("highlight arms");
    assert_eq!(host.state().highlighted_region.as_deref(), Some("arms"));

    host.set_mode("elliptical").expect("mode");
    assert_eq!(host.state().highlighted_region, None);
}

#[test]
fn static_hosts_register_no_regions_and_ignore_pointers() {
    let events = Events::default();
    let mut host = host_with(
        Box::new(GalaxyLifeMap::new()),
        WidgetOptions::default().static_only(),
        &events,
    );
    assert!(!host.is_interactive());
    assert_eq!(host.region_count(), 0);

    host.pointer_move(200.0, 200.0).expect("ignored");
    assert!(events.borrow().is_empty());
    assert_eq!(host.state().highlighted_region, None);
}

#[test]
fn observer_dot_sits_above_the_inversion_sphere() {
    let events = Events::default();
    let mut host = host_with(
        Box::new(ScalarViewer::new()),
        WidgetOptions::default(),
        &events,
    );

    host.pointer_move(200.0, 200.0).expect("center");
    host.pointer_move(200.0, 260.0).expect("inside sphere");

    let events = events.borrow();
    assert!(matches!(
        &events[0],
        UpdateEvent::Region { region, potential, .. } if region == "you" && *potential == 0.0
    ));
    assert_eq!(events[1], UpdateEvent::Clear);
    assert!(matches!(
        &events[2],
        UpdateEvent::Region { region, potential, .. }
            if region == "inversion" && *potential == 1729.0
    ));
}

#[test]
fn dragging_the_circle_scrubs_the_angle() {
    let events = Events::default();
    let mut host = host_with(
        Box::new(CircleCanvas::new()),
        WidgetOptions::default(),
        &events,
    );

    // 360 px canvas, so the center is (180, 180).
    host.pointer_down(180.0, 80.0).expect("grab");
    assert!((host.progress() - std::f64::consts::FRAC_PI_2).abs() < 1e-12);

    host.pointer_move(80.0, 180.0).expect("drag");
    assert!((host.progress() - std::f64::consts::PI).abs() < 1e-12);

    host.pointer_up();
    host.pointer_move(180.0, 280.0).expect("hover only");
    assert!((host.progress() - std::f64::consts::PI).abs() < 1e-12);

    let progress_events = events
        .borrow()
        .iter()
        .filter(|event| event.kind() == "progress")
        .count();
    assert_eq!(progress_events, 2);
}

#[test]
fn pressing_the_exact_center_does_not_start_a_drag() {
    let events = Events::default();
    let mut host = host_with(
        Box::new(CircleCanvas::new()),
        WidgetOptions::default(),
        &events,
    );

    host.pointer_down(180.0, 180.0).expect("press");
    host.pointer_move(280.0, 180.0).expect("move");
    assert_eq!(host.progress(), 0.0);
    assert!(events.borrow().is_empty());
}

#[test]
fn programmatic_highlight_does_not_fake_a_hover() {
    let events = Events::default();
    let mut host = host_with(
        Box::new(GalaxyLifeMap::new()),
        WidgetOptions::default(),
        &events,
    );

    host.set_state(SceneStatePatch {
        highlighted_region: Some(Some("halo".to_owned())),
        ..SceneStatePatch::default()
    })
    .expect("highlight");
    assert_eq!(host.state().highlighted_region.as_deref(), Some("halo"));
    assert_eq!(host.hovered_region(), None);

    host.pointer_leave().expect("leave surface");
    assert!(events.borrow().is_empty());

    host.pointer_move(200.0, 200.0).expect("hover core");
    let kinds: Vec<&str> = events.borrow().iter().map(UpdateEvent::kind).collect();
    assert_eq!(kinds, vec!["region"]);
    assert_eq!(host.hovered_region(), Some("core"));
}
