//! Keypad button widget

use egui::{Align2, Color32, FontId, Response, Sense, Stroke, Ui, Vec2};

use crate::theme::Palette;

/// Which color family a key is painted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyStyle {
    Digit,
    Operator,
    Function,
    Equals,
}

impl KeyStyle {
    fn colors(self, palette: &Palette) -> (Color32, Color32) {
        match self {
            KeyStyle::Digit => (palette.digit_fill, palette.key_text),
            KeyStyle::Function => (palette.function_fill, palette.key_text),
            KeyStyle::Operator => (palette.operator_fill, palette.accent_text),
            KeyStyle::Equals => (palette.equals_fill, palette.accent_text),
        }
    }
}

/// Draw one keypad key. `scale` below 1.0 shrinks it around its center,
/// used for the press animation. The full `size` is always allocated so the
/// grid does not shift while a key animates.
pub fn key_button(
    ui: &mut Ui,
    label: &str,
    style: KeyStyle,
    size: Vec2,
    scale: f32,
    palette: &Palette,
) -> Response {
    let (rect, response) = ui.allocate_exact_size(size, Sense::click());
    if !ui.is_rect_visible(rect) {
        return response;
    }

    let (mut fill, text) = style.colors(palette);
    if response.is_pointer_button_down_on() {
        fill = darken(fill, 0.75);
    } else if response.hovered() {
        fill = darken(fill, 0.9);
    }

    let key_rect = egui::Rect::from_center_size(rect.center(), rect.size() * scale);
    let rounding = ui.visuals().widgets.inactive.rounding;
    let painter = ui.painter();
    painter.rect_filled(key_rect, rounding, fill);
    painter.rect_stroke(key_rect, rounding, Stroke::new(1.0, palette.key_stroke));
    painter.text(
        key_rect.center(),
        Align2::CENTER_CENTER,
        label,
        FontId::proportional(20.0 * scale),
        text,
    );

    response
}

fn darken(color: Color32, factor: f32) -> Color32 {
    let scale = |c: u8| (c as f32 * factor).round() as u8;
    Color32::from_rgba_unmultiplied(scale(color.r()), scale(color.g()), scale(color.b()), color.a())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_darken() {
        let c = darken(Color32::from_rgb(200, 100, 0), 0.5);
        assert_eq!(c, Color32::from_rgb(100, 50, 0));
    }

    #[test]
    fn test_accent_keys_use_accent_text() {
        let palette = Palette::DARK;
        assert_eq!(KeyStyle::Equals.colors(&palette).1, palette.accent_text);
        assert_eq!(KeyStyle::Digit.colors(&palette).0, palette.digit_fill);
    }
}
