use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::foundation::error::{PanoError, PanoResult};

pub use kurbo::Vec2;

/// Linear RGB color with components nominally in `0..=1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` value.
    pub fn from_packed(hex: u32) -> Self {
        let ch = |shift: u32| f64::from((hex >> shift) & 0xff) / 255.0;
        Self::rgb(ch(16), ch(8), ch(0))
    }

    /// Pack into `0xRRGGBB`, clamping each channel.
    pub fn to_packed(self) -> u32 {
        fn to_u8(x: f64) -> u32 {
            (x.clamp(0.0, 1.0) * 255.0).round() as u32
        }
        (to_u8(self.r) << 16) | (to_u8(self.g) << 8) | to_u8(self.b)
    }

    /// Parse `#rgb`, `#rrggbb`, `0xrrggbb` or a CSS color name (case-insensitive).
    pub fn parse(s: &str) -> PanoResult<Self> {
        let t = s.trim();
        let lower = t.to_ascii_lowercase();
        if let Some(packed) = named_color(&lower) {
            return Ok(Self::from_packed(packed));
        }

        let digits = lower
            .strip_prefix('#')
            .or_else(|| lower.strip_prefix("0x"))
            .ok_or_else(|| PanoError::invalid_param(format!("unknown color \"{t}\"")))?;

        let expanded = match digits.len() {
            6 => digits.to_owned(),
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            _ => {
                return Err(PanoError::invalid_param(format!(
                    "hex color must be #RGB or #RRGGBB, got \"{t}\""
                )));
            }
        };
        let packed = u32::from_str_radix(&expanded, 16)
            .map_err(|_| PanoError::invalid_param(format!("invalid hex color \"{t}\"")))?;
        Ok(Self::from_packed(packed))
    }
}

fn named_color(name: &str) -> Option<u32> {
    let packed = match name {
        "black" => 0x000000,
        "white" => 0xffffff,
        "red" => 0xff0000,
        "lime" => 0x00ff00,
        "green" => 0x008000,
        "blue" => 0x0000ff,
        "yellow" => 0xffff00,
        "cyan" | "aqua" => 0x00ffff,
        "magenta" | "fuchsia" => 0xff00ff,
        "gray" | "grey" => 0x808080,
        "silver" => 0xc0c0c0,
        "maroon" => 0x800000,
        "olive" => 0x808000,
        "purple" => 0x800080,
        "teal" => 0x008080,
        "navy" => 0x000080,
        "orange" => 0xffa500,
        "pink" => 0xffc0cb,
        _ => return None,
    };
    Some(packed)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Value bound onto a named uniform slot of a pipeline stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum UniformValue {
    Number(f64),
    Bool(bool),
    String(String),
    Color(Color),
    Vec2(Vec2),
    Vec3(Vec3),
    /// Any other declared value, passed through untouched.
    Json(JsonValue),
}

/// Typed constructors a structured `{type, args}` parameter may name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructuredKind {
    Color,
    Vector2,
    Vector3,
}

impl StructuredKind {
    fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "color" | "colour" => Some(Self::Color),
            "vector2" | "vec2" => Some(Self::Vector2),
            "vector3" | "vec3" => Some(Self::Vector3),
            _ => None,
        }
    }
}

/// A declared parameter, classified.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamSpec<'a> {
    /// Scalar, string, boolean or any value without a `{type, args}` shape.
    Raw(&'a JsonValue),
    Structured {
        tag: &'a str,
        args: &'a [JsonValue],
    },
}

impl<'a> ParamSpec<'a> {
    /// A value is structured when it is an object carrying a string `type` and an array `args`.
    pub fn classify(value: &'a JsonValue) -> Self {
        if let JsonValue::Object(obj) = value {
            if let (Some(JsonValue::String(tag)), Some(JsonValue::Array(args))) =
                (obj.get("type"), obj.get("args"))
            {
                return Self::Structured {
                    tag: tag.as_str(),
                    args: args.as_slice(),
                };
            }
        }
        Self::Raw(value)
    }
}

/// Turn a declared parameter value into the value bound onto a uniform.
///
/// Structured specs build a [`Color`], [`Vec2`] or [`Vec3`]. Unknown tags and a color argument
/// count other than 1 or 3 are rejected with [`PanoError::InvalidParameterSpec`]; everything else
/// is left for the engine to judge.
pub fn parse_param_spec(value: &JsonValue) -> PanoResult<UniformValue> {
    match ParamSpec::classify(value) {
        ParamSpec::Raw(v) => Ok(raw_uniform(v)),
        ParamSpec::Structured { tag, args } => {
            let kind = StructuredKind::from_tag(tag).ok_or_else(|| {
                PanoError::invalid_param(format!("unknown structured parameter type \"{tag}\""))
            })?;
            match kind {
                StructuredKind::Color => build_color(args).map(UniformValue::Color),
                StructuredKind::Vector2 => {
                    let [x, y] = components::<2>(args, "Vector2");
                    Ok(UniformValue::Vec2(Vec2::new(x, y)))
                }
                StructuredKind::Vector3 => {
                    let [x, y, z] = components::<3>(args, "Vector3");
                    Ok(UniformValue::Vec3(Vec3::new(x, y, z)))
                }
            }
        }
    }
}

fn raw_uniform(v: &JsonValue) -> UniformValue {
    match v {
        JsonValue::Number(n) => match n.as_f64() {
            Some(f) => UniformValue::Number(f),
            None => UniformValue::Json(v.clone()),
        },
        JsonValue::Bool(b) => UniformValue::Bool(*b),
        JsonValue::String(s) => UniformValue::String(s.clone()),
        _ => UniformValue::Json(v.clone()),
    }
}

/// Only the argument count is fatal. Unreadable values become black or a zero channel, with a
/// warning, the same way an engine color constructor treats bad input.
fn build_color(args: &[JsonValue]) -> PanoResult<Color> {
    match args {
        [_, _, _] => {
            let [r, g, b] = components::<3>(args, "Color");
            Ok(Color::rgb(r, g, b))
        }
        [arg] => Ok(single_color(arg)),
        _ => Err(PanoError::invalid_param(format!(
            "Color takes 1 or 3 args, got {}",
            args.len()
        ))),
    }
}

fn single_color(arg: &JsonValue) -> Color {
    let black = Color::rgb(0.0, 0.0, 0.0);
    match arg {
        JsonValue::String(s) => Color::parse(s).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "color falls back to black");
            black
        }),
        JsonValue::Number(n) => match n
            .as_u64()
            .and_then(|p| u32::try_from(p).ok())
            .filter(|p| *p <= 0xff_ffff)
        {
            Some(packed) => Color::from_packed(packed),
            None => {
                tracing::warn!(value = %n, "packed color out of range, using black");
                black
            }
        },
        other => {
            tracing::warn!(value = %other, "color arg is not a string or number, using black");
            black
        }
    }
}

/// Missing trailing components default to 0 and extras are ignored. A component that is not a
/// number reads as 0.
fn components<const N: usize>(args: &[JsonValue], what: &str) -> [f64; N] {
    let mut out = [0.0; N];
    for (i, (slot, v)) in out.iter_mut().zip(args).enumerate() {
        match v.as_f64() {
            Some(x) => *slot = x,
            None => tracing::warn!(component = i, value = %v, "{what} component is not a number, using 0"),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/effects/value.rs"]
mod tests;
