use diagram_rs::api::{SceneHost, WidgetOptions, create_widget};
use diagram_rs::playback::ManualFrameScheduler;
use diagram_rs::render::{Container, Page, SvgRenderer, frame_to_svg};
use diagram_rs::widgets::{GalaxyLifeMap, LifeCalculator, PhotonJourney, WidgetConfig};

fn svg_host(widget: Box<dyn WidgetConfig>, options: WidgetOptions) -> SceneHost<SvgRenderer> {
    create_widget(
        Container::new("stage", SvgRenderer::new()),
        widget,
        ManualFrameScheduler::new(),
        options.with_seed(3),
    )
    .expect("svg host")
}

#[test]
fn document_is_a_single_svg_with_defs_and_regions() {
    let host = svg_host(Box::new(GalaxyLifeMap::new()), WidgetOptions::default());
    let svg = host.renderer().document();

    assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
    assert!(svg.ends_with("</svg>"));
    assert!(svg.contains(r#"viewBox="0 0 400 400""#));
    assert!(svg.contains("<defs>"));
    assert!(svg.contains(r#"<radialGradient id="coreGradient">"#));
    assert!(svg.contains(r#"<filter id="armGlow">"#));
    assert!(svg.contains(r#"data-region="core""#));
    assert!(svg.contains("url(#coreGradient)"));
    assert_eq!(svg.matches("<svg").count(), 1);
}

#[test]
fn photon_surface_is_twice_as_wide_as_tall() {
    let host = svg_host(Box::new(PhotonJourney::new()), WidgetOptions::default());
    let document = host.renderer().document();
    assert!(document.contains(r#"viewBox="0 0 600 300""#));
}

#[test]
fn gauge_uses_a_linear_gradient_and_percentage_readout() {
    let host = svg_host(Box::new(LifeCalculator::new()), WidgetOptions::default());
    let svg = host.renderer().document();
    assert!(svg.contains(r#"<linearGradient id="lifeGradient">"#));
    assert!(svg.contains(">64.1%</text>"));
    assert!(svg.contains(r#"font-weight="bold""#));
}

#[test]
fn each_rebuild_replaces_the_document() {
    let mut host = svg_host(Box::new(LifeCalculator::new()), WidgetOptions::default());
    let first = host.renderer().document().to_owned();

    host.apply_preset("void").expect("preset");
    let second = host.renderer().document();
    assert_ne!(first, second);
    assert_eq!(second.matches("<svg").count(), 1);
    assert_eq!(host.renderer().render_count(), 2);
}

#[test]
fn same_seed_renders_identical_documents() {
    let first = svg_host(Box::new(GalaxyLifeMap::new()), WidgetOptions::default());
    let second = svg_host(Box::new(GalaxyLifeMap::new()), WidgetOptions::default());
    assert_eq!(first.renderer().document(), second.renderer().document());
    assert_eq!(frame_to_svg(first.frame()), first.renderer().document());
}

#[test]
fn custom_colors_reach_the_document() {
    let host = svg_host(
        Box::new(GalaxyLifeMap::new()),
        WidgetOptions::default().with_color("arm", "#123456"),
    );
    assert!(host.renderer().document().contains("#123456"));
}

#[test]
fn destroy_releases_the_surface() {
    let mut page = Page::new().with_container("galaxy", SvgRenderer::new());
    let mut host = SceneHost::mount(
        &mut page,
        "galaxy",
        Box::new(GalaxyLifeMap::new()),
        ManualFrameScheduler::new(),
        WidgetOptions::default(),
    )
    .expect("mounted");
    assert!(!page.contains("galaxy"));
    assert!(!host.renderer().document().is_empty());

    host.destroy();
    assert!(host.renderer().is_released());
    assert!(host.renderer().document().is_empty());
}
