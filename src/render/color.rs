use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{DiagramError, DiagramResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Builds a color from 8-bit channels and a 0..=1 alpha.
    #[must_use]
    pub fn from_rgba8(red: u8, green: u8, blue: u8, alpha: f64) -> Self {
        Self::rgba(
            f64::from(red) / 255.0,
            f64::from(green) / 255.0,
            f64::from(blue) / 255.0,
            alpha,
        )
    }

    /// Parses `#rgb`, `#rrggbb`, `rgb(r, g, b)` and `rgba(r, g, b, a)`.
    pub fn parse(input: &str) -> DiagramResult<Self> {
        let text = input.trim();
        let color = if let Some(hex) = text.strip_prefix('#') {
            parse_hex(hex)
        } else if let Some(body) = text
            .strip_prefix("rgba(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            parse_channels(body, true)
        } else if let Some(body) = text
            .strip_prefix("rgb(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            parse_channels(body, false)
        } else {
            None
        };

        let color = color.ok_or_else(|| DiagramError::InvalidColor(input.to_owned()))?;
        color.validate()?;
        Ok(color)
    }

    #[must_use]
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self { alpha, ..self }
    }

    pub fn validate(self) -> DiagramResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(DiagramError::InvalidColor(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }

    /// SVG paint string: `#rrggbb` when opaque, `rgba(..)` otherwise.
    #[must_use]
    pub fn to_svg(self) -> String {
        let [r, g, b] = [self.red, self.green, self.blue].map(channel_to_u8);
        if self.alpha >= 1.0 {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("rgba({r}, {g}, {b}, {})", trim_float(self.alpha))
        }
    }
}

fn channel_to_u8(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn trim_float(value: f64) -> String {
    let text = format!("{value:.3}");
    text.trim_end_matches('0').trim_end_matches('.').to_owned()
}

fn parse_hex(hex: &str) -> Option<Color> {
    let nibble = |index: usize| u8::from_str_radix(hex.get(index..=index)?, 16).ok();
    let byte = |index: usize| u8::from_str_radix(hex.get(index..index + 2)?, 16).ok();
    match hex.len() {
        3 => Some(Color::from_rgba8(
            nibble(0)? * 17,
            nibble(1)? * 17,
            nibble(2)? * 17,
            1.0,
        )),
        6 => Some(Color::from_rgba8(byte(0)?, byte(2)?, byte(4)?, 1.0)),
        _ => None,
    }
}

fn parse_channels(body: &str, with_alpha: bool) -> Option<Color> {
    let parts: Vec<&str> = body.split(',').map(str::trim).collect();
    let expected = if with_alpha { 4 } else { 3 };
    if parts.len() != expected {
        return None;
    }
    let channel = |part: &str| part.parse::<u8>().ok();
    let alpha = if with_alpha {
        parts[3].parse::<f64>().ok()?
    } else {
        1.0
    };
    Some(Color::from_rgba8(
        channel(parts[0])?,
        channel(parts[1])?,
        channel(parts[2])?,
        alpha,
    ))
}

/// Semantic color roles (for example `arm`, `lifeHigh`) mapped to colors.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ColorPalette {
    roles: IndexMap<String, Color>,
}

impl ColorPalette {
    /// Builds a palette from CSS color strings. Fails on the first invalid entry.
    pub fn from_css<'a>(
        entries: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> DiagramResult<Self> {
        let mut palette = Self::default();
        for (role, css) in entries {
            palette.set(role, Color::parse(css)?);
        }
        Ok(palette)
    }

    pub fn set(&mut self, role: impl Into<String>, color: Color) {
        self.roles.insert(role.into(), color);
    }

    #[must_use]
    pub fn get(&self, role: &str) -> Option<Color> {
        self.roles.get(role).copied()
    }

    /// Overlays `other` on top of `self`; roles present in both take `other`'s value.
    #[must_use]
    pub fn merged(mut self, other: &Self) -> Self {
        for (role, color) in &other.roles {
            self.roles.insert(role.clone(), *color);
        }
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    pub fn roles(&self) -> impl Iterator<Item = (&str, Color)> {
        let roles = &self.roles;
        roles.iter().map(|(role, color)| (role.as_str(), *color))
    }
}
