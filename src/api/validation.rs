use indexmap::IndexMap;

use crate::core::Viewport;
use crate::error::{DiagramError, DiagramResult};
use crate::render::ColorPalette;
use crate::widgets::WidgetConfig;

pub(super) fn validate_viewport(widget: &dyn WidgetConfig, size: f64) -> DiagramResult<Viewport> {
    if !size.is_finite() || size <= 0.0 {
        return Err(DiagramError::InvalidData(format!(
            "widget size must be finite and > 0, got {size}"
        )));
    }
    let viewport = widget.viewport(size);
    if !viewport.is_valid() {
        return Err(DiagramError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        });
    }
    Ok(viewport)
}

pub(super) fn validate_mode(widget: &dyn WidgetConfig, mode: &str) -> DiagramResult<()> {
    if widget.modes().contains(mode) {
        return Ok(());
    }
    Err(DiagramError::UnknownMode {
        widget: widget.name().to_owned(),
        mode: mode.to_owned(),
    })
}

pub(super) fn validate_progress(value: f64) -> DiagramResult<f64> {
    if !value.is_finite() {
        return Err(DiagramError::InvalidData(format!(
            "progress must be finite, got {value}"
        )));
    }
    Ok(value)
}

/// Resolves `key` against the widget's params and clamps `value` into range.
pub(super) fn validate_param(
    widget: &dyn WidgetConfig,
    key: &str,
    value: f64,
) -> DiagramResult<f64> {
    let spec = widget
        .params()
        .iter()
        .find(|spec| spec.key == key)
        .ok_or_else(|| DiagramError::UnknownParam {
            widget: widget.name().to_owned(),
            param: key.to_owned(),
        })?;
    if !value.is_finite() {
        return Err(DiagramError::InvalidData(format!(
            "param `{key}` must be finite, got {value}"
        )));
    }
    Ok(spec.clamp(value))
}

pub(super) fn validate_params(
    widget: &dyn WidgetConfig,
    params: &IndexMap<String, f64>,
) -> DiagramResult<IndexMap<String, f64>> {
    params
        .iter()
        .map(|(key, value)| Ok((key.clone(), validate_param(widget, key, *value)?)))
        .collect()
}

/// Parses CSS color overrides; roles the widget does not know are accepted
/// and simply never read.
pub(super) fn validate_colors(colors: &IndexMap<String, String>) -> DiagramResult<ColorPalette> {
    let roles = colors
        .iter()
        .map(|(role, css)| (role.as_str(), css.as_str()));
    ColorPalette::from_css(roles)
}
