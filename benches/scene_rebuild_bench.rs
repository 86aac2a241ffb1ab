use criterion::{Criterion, criterion_group, criterion_main};
use diagram_rs::SceneState;
use diagram_rs::api::{WidgetOptions, create_widget};
use diagram_rs::core::{Point, Viewport};
use diagram_rs::playback::{ManualFrameScheduler, TrailStore};
use diagram_rs::render::{
    BuildContext, ColorPalette, Container, NullRenderer, SvgRenderer, build_scene, frame_to_svg,
};
use diagram_rs::widgets::{GalaxyLifeMap, SolarSystemMotion, WidgetConfig};
use std::hint::black_box;

fn galaxy_state(widget: &GalaxyLifeMap) -> SceneState {
    let palette = ColorPalette::from_css(widget.palette().iter().copied()).expect("palette");
    SceneState::new("spiral", palette)
}

fn bench_galaxy_build(c: &mut Criterion) {
    let widget = GalaxyLifeMap::new();
    let state = galaxy_state(&widget);
    let trails = TrailStore::new(0);
    let ctx = BuildContext {
        viewport: Viewport::square(800.0),
        trails: &trails,
        seed: 42,
    };

    c.bench_function("galaxy_spiral_build", |b| {
        b.iter(|| {
            let _ = build_scene(black_box(&widget), black_box(&state), &ctx).expect("frame");
        })
    });
}

fn bench_galaxy_svg_serialize(c: &mut Criterion) {
    let widget = GalaxyLifeMap::new();
    let state = galaxy_state(&widget);
    let trails = TrailStore::new(0);
    let ctx = BuildContext {
        viewport: Viewport::square(800.0),
        trails: &trails,
        seed: 42,
    };
    let frame = build_scene(&widget, &state, &ctx).expect("frame");

    c.bench_function("galaxy_spiral_svg", |b| {
        b.iter(|| {
            let _ = frame_to_svg(black_box(&frame));
        })
    });
}

fn bench_solar_tick_with_full_trails(c: &mut Criterion) {
    let scheduler = ManualFrameScheduler::new();
    let mut host = create_widget(
        Container::new("solar", NullRenderer::default()),
        Box::new(SolarSystemMotion::new()),
        scheduler.clone(),
        WidgetOptions::default().with_mode("both_true").with_seed(7),
    )
    .expect("solar host");
    host.play().expect("play");
    for _ in 0..200 {
        for handle in scheduler.take_due() {
            host.on_animation_frame(handle).expect("warmup frame");
        }
    }

    c.bench_function("solar_tick_full_trails", |b| {
        b.iter(|| {
            for handle in scheduler.take_due() {
                host.on_animation_frame(black_box(handle)).expect("frame");
            }
        })
    });
}

fn bench_hover_pass(c: &mut Criterion) {
    let mut host = create_widget(
        Container::new("galaxy", SvgRenderer::new()),
        Box::new(GalaxyLifeMap::new()),
        ManualFrameScheduler::new(),
        WidgetOptions::default().with_size(800.0).with_seed(42),
    )
    .expect("galaxy host");
    let inside = Point::new(400.0, 400.0);
    let outside = Point::new(5.0, 5.0);

    c.bench_function("galaxy_hover_enter_leave", |b| {
        b.iter(|| {
            host.pointer_move(inside.x, inside.y).expect("enter");
            host.pointer_move(outside.x, outside.y).expect("leave");
        })
    });
}

criterion_group!(
    benches,
    bench_galaxy_build,
    bench_galaxy_svg_serialize,
    bench_solar_tick_with_full_trails,
    bench_hover_pass
);
criterion_main!(benches);
