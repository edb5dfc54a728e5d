use egui::Color32;
use image::Rgba;

use crate::error::ColorParseError;

/// Unmultiplied sRGBA, stored exactly as the caller supplied it
pub type PaintColor = Rgba<u8>;

pub const BLACK: PaintColor = Rgba([0x00, 0x00, 0x00, 0xFF]);
pub const WHITE: PaintColor = Rgba([0xFF, 0xFF, 0xFF, 0xFF]);
pub const RED: PaintColor = Rgba([0xFF, 0x00, 0x00, 0xFF]);
pub const GREEN: PaintColor = Rgba([0x00, 0xFF, 0x00, 0xFF]);
pub const BLUE: PaintColor = Rgba([0x00, 0x00, 0xFF, 0xFF]);

/// Preset pen sizes offered by the size chooser, in device-independent units
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum BrushSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl BrushSize {
    pub fn dp(self) -> f32 {
        match self {
            Self::Small => 10.0,
            Self::Medium => 20.0,
            Self::Large => 30.0,
        }
    }
}

/// Current pen color and width.
///
/// Read once when a stroke begins; changing it afterwards never touches
/// strokes that already exist.
#[derive(Debug, Clone, PartialEq)]
pub struct BrushConfig {
    color: PaintColor,
    /// Width in pixels, already scaled by `display_density`
    thickness: f32,
    /// Pixels per device-independent unit
    display_density: f32,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl BrushConfig {
    pub fn new(display_density: f32) -> Self {
        let display_density = if display_density.is_finite() && display_density > 0.0 {
            display_density
        } else {
            log::warn!("Ignoring display density {display_density}, using 1.0");
            1.0
        };
        Self {
            color: BLACK,
            thickness: BrushSize::default().dp() * display_density,
            display_density,
        }
    }

    pub fn color(&self) -> PaintColor {
        self.color
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }

    pub fn display_density(&self) -> f32 {
        self.display_density
    }

    /// Set the pen width from a size in device-independent units
    pub fn set_thickness(&mut self, dp: f32) {
        if !dp.is_finite() || dp <= 0.0 {
            log::warn!("Ignoring brush size {dp}");
            return;
        }
        self.thickness = dp * self.display_density;
    }

    pub fn set_brush_size(&mut self, size: BrushSize) {
        self.set_thickness(size.dp());
    }

    pub fn set_color(&mut self, color: PaintColor) {
        self.color = color;
    }

    /// Set the color from an egui color picker
    pub fn set_color32(&mut self, color: Color32) {
        self.color = Rgba(color.to_srgba_unmultiplied());
    }

    /// Set the color from a packed `0xAARRGGBB` value
    pub fn set_color_argb(&mut self, argb: u32) {
        self.color = color_from_argb(argb);
    }

    /// Set the color from a name or hex token. On error the color is unchanged.
    pub fn set_color_token(&mut self, token: &str) -> Result<(), ColorParseError> {
        self.color = parse_color(token)?;
        Ok(())
    }
}

pub fn color_from_argb(argb: u32) -> PaintColor {
    let [a, r, g, b] = argb.to_be_bytes();
    Rgba([r, g, b, a])
}

/// For handing colors back to egui widgets
pub fn to_color32(color: PaintColor) -> Color32 {
    let [r, g, b, a] = color.0;
    Color32::from_rgba_unmultiplied(r, g, b, a)
}

/// Resolve `#RRGGBB`, `#AARRGGBB` or a basic color name
pub fn parse_color(token: &str) -> Result<PaintColor, ColorParseError> {
    let token = token.trim();
    if token.is_empty() {
        return Err(ColorParseError::Empty);
    }

    if let Some(hex) = token.strip_prefix('#') {
        let malformed = || ColorParseError::MalformedHex(token.to_owned());
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(malformed());
        }
        let value = u32::from_str_radix(hex, 16).map_err(|_| malformed())?;
        return match hex.len() {
            6 => Ok(color_from_argb(0xFF00_0000 | value)),
            8 => Ok(color_from_argb(value)),
            _ => Err(malformed()),
        };
    }

    let argb = match token.to_ascii_lowercase().as_str() {
        "black" => 0xFF00_0000,
        "white" => 0xFFFF_FFFF,
        "red" => 0xFFFF_0000,
        "green" | "lime" => 0xFF00_FF00,
        "blue" => 0xFF00_00FF,
        "yellow" => 0xFFFF_FF00,
        "cyan" | "aqua" => 0xFF00_FFFF,
        "magenta" | "fuchsia" => 0xFFFF_00FF,
        "gray" | "grey" => 0xFF88_8888,
        "lightgray" | "lightgrey" => 0xFFCC_CCCC,
        "darkgray" | "darkgrey" => 0xFF44_4444,
        "maroon" => 0xFF80_0000,
        "navy" => 0xFF00_0080,
        "olive" => 0xFF80_8000,
        "purple" => 0xFF80_0080,
        "silver" => 0xFFC0_C0C0,
        "teal" => 0xFF00_8080,
        _ => return Err(ColorParseError::UnknownName(token.to_owned())),
    };
    Ok(color_from_argb(argb))
}
