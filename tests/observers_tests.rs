use std::cell::RefCell;
use std::rc::Rc;

use diagram_rs::DiagramError;
use diagram_rs::api::{SceneHost, WidgetOptions, create_widget};
use diagram_rs::extensions::{ObserverContext, SceneObserver, UpdateEvent};
use diagram_rs::playback::{ManualFrameScheduler, PlaybackStatus};
use diagram_rs::render::{Container, NullRenderer};
use diagram_rs::widgets::GalaxyLifeMap;

struct RecordingObserver {
    id: String,
    seen: Rc<RefCell<Vec<(String, ObserverContext)>>>,
}

impl SceneObserver for RecordingObserver {
    fn id(&self) -> &str {
        &self.id
    }

    fn on_event(&mut self, event: &UpdateEvent, context: &ObserverContext) {
        self.seen
            .borrow_mut()
            .push((event.kind().to_owned(), context.clone()));
    }
}

fn galaxy_host() -> SceneHost<NullRenderer> {
    create_widget(
        Container::new("galaxy", NullRenderer::default()),
        Box::new(GalaxyLifeMap::new()),
        ManualFrameScheduler::new(),
        WidgetOptions::default(),
    )
    .expect("galaxy host")
}

#[test]
fn observer_receives_events_with_post_change_context() {
    let mut host = galaxy_host();
    let seen = Rc::new(RefCell::new(Vec::new()));
    host.register_observer(Box::new(RecordingObserver {
        id: "recorder".to_owned(),
        seen: Rc::clone(&seen),
    }))
    .expect("observer registration should succeed");

    host.set_mode("barred").expect("mode");
    host.play().expect("play");
    host.pointer_move(200.0, 200.0).expect("hover");

    let seen = seen.borrow();
    let kinds: Vec<&str> = seen.iter().map(|(kind, _)| kind.as_str()).collect();
    assert_eq!(kinds, vec!["modeChange", "playback", "region"]);

    let (_, mode_context) = &seen[0];
    assert_eq!(mode_context.widget, "galaxy-life-map");
    assert_eq!(mode_context.mode, "barred");
    assert_eq!(mode_context.status, PlaybackStatus::Stopped);

    let (_, hover_context) = &seen[2];
    assert_eq!(hover_context.status, PlaybackStatus::Playing);
    assert!(hover_context.highlighted_region.is_some());
}

#[test]
fn on_update_runs_before_observers() {
    let order = Rc::new(RefCell::new(Vec::new()));
    let callback_order = Rc::clone(&order);
    let on_update = move |_: &UpdateEvent| callback_order.borrow_mut().push("callback");
    let mut host = create_widget(
        Container::new("galaxy", NullRenderer::default()),
        Box::new(GalaxyLifeMap::new()),
        ManualFrameScheduler::new(),
        WidgetOptions::default().with_on_update(on_update),
    )
    .expect("galaxy host");

    struct Ordered(Rc<RefCell<Vec<&'static str>>>);
    impl SceneObserver for Ordered {
        fn id(&self) -> &str {
            "ordered"
        }
        fn on_event(&mut self, _: &UpdateEvent, _: &ObserverContext) {
            self.0.borrow_mut().push("observer");
        }
    }
    host.register_observer(Box::new(Ordered(Rc::clone(&order))))
        .expect("register");

    host.set_mode("spiral").expect("same mode still notifies");
    assert_eq!(*order.borrow(), vec!["callback", "observer"]);
}

#[test]
fn duplicate_and_empty_ids_are_rejected() {
    let mut host = galaxy_host();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let observer = |id: &str| {
        Box::new(RecordingObserver {
            id: id.to_owned(),
            seen: Rc::clone(&seen),
        })
    };

    host.register_observer(observer("a")).expect("first");
    assert!(matches!(
        host.register_observer(observer("a")),
        Err(DiagramError::InvalidData(_))
    ));
    assert!(matches!(
        host.register_observer(observer("")),
        Err(DiagramError::InvalidData(_))
    ));
    assert_eq!(host.observer_count(), 1);
}

#[test]
fn unregistered_observer_stops_receiving() {
    let mut host = galaxy_host();
    let seen = Rc::new(RefCell::new(Vec::new()));
    host.register_observer(Box::new(RecordingObserver {
        id: "recorder".to_owned(),
        seen: Rc::clone(&seen),
    }))
    .expect("register");

    host.play().expect("play");
    assert!(host.has_observer("recorder"));
    assert!(host.unregister_observer("recorder"));
    assert!(!host.unregister_observer("recorder"));
    host.pause().expect("pause");

    assert_eq!(seen.borrow().len(), 1);
}

#[test]
fn destroy_drops_observers() {
    let mut host = galaxy_host();
    let seen = Rc::new(RefCell::new(Vec::new()));
    host.register_observer(Box::new(RecordingObserver {
        id: "recorder".to_owned(),
        seen: Rc::clone(&seen),
    }))
    .expect("register");

    host.destroy();
    assert_eq!(host.observer_count(), 0);
    assert!(matches!(
        host.register_observer(Box::new(RecordingObserver {
            id: "late".to_owned(),
            seen,
        })),
        Err(DiagramError::Destroyed)
    ));
}
