//! Light and dark themes
//!
//! Each mode has a palette for the keypad and display. `KalkTheme::apply`
//! turns the palette into an egui style; calling it again with the other
//! mode swaps the look on the next frame.

use egui::{Color32, FontFamily, FontId, Rounding, Stroke, Style, TextStyle, Visuals};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            ThemeMode::Light => Palette::LIGHT,
            ThemeMode::Dark => Palette::DARK,
        }
    }
}

impl std::str::FromStr for ThemeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            other => Err(other.to_string()),
        }
    }
}

/// Colors for one theme mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Color32,
    pub display_fill: Color32,
    pub display_text: Color32,
    pub expression_text: Color32,
    pub digit_fill: Color32,
    pub operator_fill: Color32,
    pub function_fill: Color32,
    pub equals_fill: Color32,
    pub key_text: Color32,
    pub accent_text: Color32,
    pub key_stroke: Color32,
    pub particles: [Color32; 4],
}

impl Palette {
    pub const LIGHT: Palette = Palette {
        background: Color32::from_rgb(242, 242, 246),
        display_fill: Color32::from_rgb(255, 255, 255),
        display_text: Color32::from_rgb(20, 20, 28),
        expression_text: Color32::from_rgb(120, 120, 135),
        digit_fill: Color32::from_rgb(255, 255, 255),
        operator_fill: Color32::from_rgb(255, 149, 0),
        function_fill: Color32::from_rgb(214, 214, 222),
        equals_fill: Color32::from_rgb(0, 122, 255),
        key_text: Color32::from_rgb(20, 20, 28),
        accent_text: Color32::from_rgb(255, 255, 255),
        key_stroke: Color32::from_rgb(200, 200, 210),
        particles: [
            Color32::from_rgb(255, 149, 0),
            Color32::from_rgb(0, 122, 255),
            Color32::from_rgb(255, 45, 85),
            Color32::from_rgb(52, 199, 89),
        ],
    };

    pub const DARK: Palette = Palette {
        background: Color32::from_rgb(24, 24, 30),
        display_fill: Color32::from_rgb(12, 12, 16),
        display_text: Color32::from_rgb(240, 240, 245),
        expression_text: Color32::from_rgb(140, 140, 155),
        digit_fill: Color32::from_rgb(52, 52, 62),
        operator_fill: Color32::from_rgb(255, 159, 10),
        function_fill: Color32::from_rgb(90, 90, 104),
        equals_fill: Color32::from_rgb(10, 132, 255),
        key_text: Color32::from_rgb(240, 240, 245),
        accent_text: Color32::from_rgb(255, 255, 255),
        key_stroke: Color32::from_rgb(70, 70, 82),
        particles: [
            Color32::from_rgb(255, 214, 10),
            Color32::from_rgb(100, 210, 255),
            Color32::from_rgb(255, 55, 95),
            Color32::from_rgb(48, 209, 88),
        ],
    };
}

/// Font sizes and spacing shared by both modes.
pub struct KalkTheme {
    pub font_size_body: f32,
    pub font_size_heading: f32,
    pub font_size_small: f32,
    pub window_padding: f32,
    pub item_spacing: f32,
    pub rounding: f32,
}

impl Default for KalkTheme {
    fn default() -> Self {
        Self {
            font_size_body: 15.0,
            font_size_heading: 22.0,
            font_size_small: 12.0,
            window_padding: 10.0,
            item_spacing: 6.0,
            rounding: 6.0,
        }
    }
}

impl KalkTheme {
    /// Install the style for `mode` on the context.
    pub fn apply(&self, ctx: &egui::Context, mode: ThemeMode) {
        ctx.set_style(self.style(mode));
    }

    pub fn style(&self, mode: ThemeMode) -> Style {
        let palette = mode.palette();
        let mut style = Style::default();

        style.text_styles = [
            (TextStyle::Small, FontId::new(self.font_size_small, FontFamily::Proportional)),
            (TextStyle::Body, FontId::new(self.font_size_body, FontFamily::Proportional)),
            (TextStyle::Button, FontId::new(self.font_size_body, FontFamily::Proportional)),
            (TextStyle::Heading, FontId::new(self.font_size_heading, FontFamily::Proportional)),
            (TextStyle::Monospace, FontId::new(self.font_size_body, FontFamily::Monospace)),
        ]
        .into();

        let mut visuals = match mode {
            ThemeMode::Light => Visuals::light(),
            ThemeMode::Dark => Visuals::dark(),
        };
        visuals.window_fill = palette.background;
        visuals.panel_fill = palette.background;
        visuals.extreme_bg_color = palette.display_fill;
        visuals.window_rounding = Rounding::same(self.rounding);
        visuals.menu_rounding = Rounding::same(self.rounding);
        visuals.window_stroke = Stroke::new(1.0, palette.key_stroke);
        visuals.override_text_color = Some(palette.key_text);

        let rounding = Rounding::same(self.rounding);
        for widget in [
            &mut visuals.widgets.noninteractive,
            &mut visuals.widgets.inactive,
            &mut visuals.widgets.hovered,
            &mut visuals.widgets.active,
            &mut visuals.widgets.open,
        ] {
            widget.rounding = rounding;
        }

        style.visuals = visuals;
        style.spacing.window_margin = egui::Margin::same(self.window_padding);
        style.spacing.item_spacing = egui::vec2(self.item_spacing, self.item_spacing);
        style.spacing.button_padding = egui::vec2(8.0, 4.0);
        style
    }
}

/// Menu bar styling helper
pub fn menu_bar<R>(
    ui: &mut egui::Ui,
    palette: &Palette,
    add_contents: impl FnOnce(&mut egui::Ui) -> R,
) -> egui::InnerResponse<R> {
    egui::Frame::none()
        .fill(palette.background)
        .inner_margin(egui::Margin::symmetric(4.0, 2.0))
        .show(ui, |ui| ui.horizontal(add_contents).inner)
}

/// Strip Cmd+/Cmd- so the keypad shortcuts don't zoom the window.
/// Call at the start of `update()`.
pub fn consume_zoom_keys(ctx: &egui::Context) {
    ctx.input_mut(|i| {
        i.events.retain(|event| {
            !matches!(event,
                egui::Event::Key { key, modifiers, .. }
                    if modifiers.command
                        && matches!(key, egui::Key::Plus | egui::Key::Minus | egui::Key::Equals))
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle() {
        assert_eq!(ThemeMode::Light.toggled(), ThemeMode::Dark);
        assert_eq!(ThemeMode::Dark.toggled(), ThemeMode::Light);
        assert_eq!(ThemeMode::default(), ThemeMode::Light);
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!(" Dark ".parse::<ThemeMode>(), Ok(ThemeMode::Dark));
        assert_eq!("light".parse::<ThemeMode>(), Ok(ThemeMode::Light));
        assert!("sepia".parse::<ThemeMode>().is_err());
    }

    #[test]
    fn test_style_follows_mode() {
        let theme = KalkTheme::default();
        let light = theme.style(ThemeMode::Light);
        let dark = theme.style(ThemeMode::Dark);
        assert!(!light.visuals.dark_mode);
        assert!(dark.visuals.dark_mode);
        assert_eq!(light.visuals.panel_fill, Palette::LIGHT.background);
        assert_eq!(dark.visuals.panel_fill, Palette::DARK.background);
    }
}
