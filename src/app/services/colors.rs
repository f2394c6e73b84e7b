use crate::app::domain::settings::color_key;
use crate::app::domain::{ColorClass, ProximityBucket, StyleDescriptor};
use crate::app::infrastructure::host::ConfigSource;

/// Alpha applied to a chip's border.
pub const CHIP_BORDER_ALPHA: f32 = 0.4;
pub const CHIP_BORDER_RADIUS: &str = "3px";

/// Built-in colors. Due-date colors mirror the planner board's badges.
pub fn default_color(class: ColorClass) -> &'static str {
    match class {
        ColorClass::ProjectTag => "#4EC9B0",
        ColorClass::PriorityHigh => "#F44747",
        ColorClass::PriorityMed => "#CCA700",
        ColorClass::PriorityLow => "#75BEFF",
        ColorClass::TimeEstimate => "#C586C0",
        ColorClass::InProgress => "#569CD6",
        ColorClass::Due(ProximityBucket::Overdue) => "#F44747",
        ColorClass::Due(ProximityBucket::Today) => "#CE9178",
        ColorClass::Due(ProximityBucket::Soon) => "#CCA700",
        ColorClass::Due(ProximityBucket::Future) => "#858585",
    }
}

/// Overlay value if present and non-blank, else the built-in default.
pub fn resolve_color(class: ColorClass, config: &impl ConfigSource) -> String {
    config
        .get_or(&color_key(class.name()), default_color(class))
        .trim()
        .to_string()
}

/// Style descriptor for one class under the current configuration.
pub fn resolve_style(class: ColorClass, config: &impl ConfigSource) -> StyleDescriptor {
    let color = resolve_color(class, config);
    if class.is_chip() {
        StyleDescriptor {
            border: Some(translucent(&color, CHIP_BORDER_ALPHA)),
            border_radius: Some(CHIP_BORDER_RADIUS.to_string()),
            color,
        }
    } else {
        StyleDescriptor::plain(color)
    }
}

/// Re-express a `#RGB`/`#RRGGBB` color as `rgba(r, g, b, alpha)`.
///
/// Anything else is returned unchanged.
pub fn translucent(color: &str, alpha: f32) -> String {
    match parse_hex(color) {
        Some((r, g, b)) => format!("rgba({r}, {g}, {b}, {alpha})"),
        None => color.to_string(),
    }
}

fn parse_hex(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        3 => {
            let channel = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|v| v * 17);
            Some((channel(0)?, channel(1)?, channel(2)?))
        }
        6 => {
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            Some((channel(0)?, channel(2)?, channel(4)?))
        }
        _ => None,
    }
}
