//! kalkulacka application window

use std::collections::HashMap;

use egui::{Context, Id, Key, LayerId, Order, Rect, RichText};
use kalkcore::animation::{ParticleSystem, PressAnimations};
use kalkcore::repaint::RepaintController;
use kalkcore::theme::{consume_zoom_keys, menu_bar, Palette};
use kalkcore::widgets::{key_button, KeyStyle};
use kalkcore::{Config, KalkTheme, ThemeMode};
use tracing::{debug, info};

use crate::engine::{CalcKey, Engine, KeyKind, Operator};

/// Keypad rows as (key, column span).
const KEYPAD: &[&[(CalcKey, f32)]] = &[
    &[
        (CalcKey::Clear, 1.0),
        (CalcKey::Backspace, 1.0),
        (CalcKey::Negate, 1.0),
        (CalcKey::Op(Operator::Divide), 1.0),
    ],
    &[
        (CalcKey::Digit('7'), 1.0),
        (CalcKey::Digit('8'), 1.0),
        (CalcKey::Digit('9'), 1.0),
        (CalcKey::Op(Operator::Multiply), 1.0),
    ],
    &[
        (CalcKey::Digit('4'), 1.0),
        (CalcKey::Digit('5'), 1.0),
        (CalcKey::Digit('6'), 1.0),
        (CalcKey::Op(Operator::Subtract), 1.0),
    ],
    &[
        (CalcKey::Digit('1'), 1.0),
        (CalcKey::Digit('2'), 1.0),
        (CalcKey::Digit('3'), 1.0),
        (CalcKey::Op(Operator::Add), 1.0),
    ],
    &[
        (CalcKey::Digit('0'), 2.0),
        (CalcKey::Point, 1.0),
        (CalcKey::Equals, 1.0),
    ],
];

const COLUMNS: f32 = 4.0;
const DISPLAY_HEIGHT: f32 = 64.0;
const MIN_KEY_HEIGHT: f32 = 32.0;

pub struct KalkulackaApp {
    engine: Engine,
    theme: KalkTheme,
    mode: ThemeMode,
    applied_mode: Option<ThemeMode>,
    effects_enabled: bool,
    particles: ParticleSystem,
    presses: PressAnimations<CalcKey>,
    /// Key rects from the last frame, so keyboard presses can animate the
    /// matching on-screen key.
    key_rects: HashMap<CalcKey, Rect>,
    show_about: bool,
    repaint: RepaintController,
}

impl KalkulackaApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: Config) -> Self {
        let theme = KalkTheme::default();
        theme.apply(&cc.egui_ctx, config.theme);
        Self {
            engine: Engine::new(),
            theme,
            mode: config.theme,
            applied_mode: Some(config.theme),
            effects_enabled: config.effects.enabled,
            particles: ParticleSystem::new(config.effects),
            presses: PressAnimations::new(),
            key_rects: HashMap::new(),
            show_about: false,
            repaint: RepaintController::new(),
        }
    }

    fn palette(&self) -> Palette {
        self.mode.palette()
    }

    fn press(&mut self, key: CalcKey) {
        self.engine.press(key);
        self.presses.trigger(key);
        let colors = self.palette().particles;
        if let Some(rect) = self.key_rects.get(&key) {
            self.particles.burst(rect.center(), &colors);
        }
        debug!(?key, state = ?self.engine.state(), display = %self.engine.display(), "key pressed");
    }

    fn set_mode(&mut self, mode: ThemeMode) {
        if self.mode != mode {
            info!(theme = mode.name(), "switching theme");
            self.mode = mode;
        }
    }

    fn set_effects(&mut self, enabled: bool) {
        self.effects_enabled = enabled;
        self.particles.set_enabled(enabled);
    }

    fn handle_keys(&mut self, ctx: &Context) {
        let mut keys = Vec::new();
        let mut toggle_theme = false;

        ctx.input(|i| {
            for event in &i.events {
                match event {
                    egui::Event::Text(text) => {
                        for c in text.chars() {
                            if c == 't' || c == 'T' {
                                toggle_theme = true;
                            } else if let Some(key) = CalcKey::from_char(c) {
                                keys.push(key);
                            }
                        }
                    }
                    egui::Event::Key { key, pressed: true, modifiers, .. } if !modifiers.command => {
                        match key {
                            Key::Enter => keys.push(CalcKey::Equals),
                            Key::Backspace => keys.push(CalcKey::Backspace),
                            Key::Escape | Key::Delete => keys.push(CalcKey::Clear),
                            _ => {}
                        }
                    }
                    _ => {}
                }
            }
        });

        if toggle_theme {
            self.set_mode(self.mode.toggled());
        }
        for key in keys {
            self.press(key);
        }
    }

    fn render_display(&self, ui: &mut egui::Ui, palette: &Palette) {
        egui::Frame::none()
            .fill(palette.display_fill)
            .stroke(egui::Stroke::new(1.0, palette.key_stroke))
            .rounding(self.theme.rounding)
            .inner_margin(egui::Margin::symmetric(10.0, 6.0))
            .show(ui, |ui| {
                ui.set_min_height(DISPLAY_HEIGHT);
                ui.set_max_height(DISPLAY_HEIGHT);
                let (expression, input) = self.engine.display_lines();
                ui.with_layout(egui::Layout::top_down(egui::Align::Max), |ui| {
                    ui.add(
                        egui::Label::new(
                            RichText::new(expression)
                                .size(14.0)
                                .color(palette.expression_text),
                        )
                        .truncate(true),
                    );
                    ui.add(
                        egui::Label::new(
                            RichText::new(input)
                                .size(28.0)
                                .strong()
                                .color(palette.display_text),
                        )
                        .truncate(true),
                    );
                });
            });
    }

    fn render_keypad(&mut self, ui: &mut egui::Ui, palette: &Palette) {
        let gap = ui.spacing().item_spacing.x;
        let key_w = (ui.available_width() - gap * (COLUMNS - 1.0)) / COLUMNS;
        let rows = KEYPAD.len() as f32;
        let key_h = ((ui.available_height() - gap * (rows - 1.0)) / rows).max(MIN_KEY_HEIGHT);

        let mut clicked = None;
        for row in KEYPAD {
            ui.horizontal(|ui| {
                for &(key, span) in row.iter() {
                    let width = key_w * span + gap * (span - 1.0);
                    let response = key_button(
                        ui,
                        &key.label(),
                        key_style(key.kind()),
                        egui::vec2(width, key_h),
                        self.presses.scale(&key),
                        palette,
                    );
                    self.key_rects.insert(key, response.rect);
                    if response.clicked() {
                        clicked = Some(key);
                    }
                }
            });
        }

        if let Some(key) = clicked {
            self.press(key);
        }
    }

    fn render_about(&mut self, ctx: &Context) {
        egui::Window::new("about kalkulacka")
            .collapsible(false)
            .resizable(false)
            .default_width(240.0)
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.heading("kalkulacka");
                    ui.label(format!("version {}", env!("CARGO_PKG_VERSION")));
                });
                ui.add_space(4.0);
                ui.separator();
                ui.label("evaluates strictly left to right:");
                ui.label("  2 + 3 * 4 = 20");
                ui.add_space(2.0);
                ui.label("keys: 0-9 . + - * / = Enter");
                ui.label("  Backspace, Esc clear, n negate");
                ui.label("  t toggles light/dark");
                ui.vertical_centered(|ui| {
                    if ui.button("ok").clicked() {
                        self.show_about = false;
                    }
                });
            });
    }
}

fn key_style(kind: KeyKind) -> KeyStyle {
    match kind {
        KeyKind::Digit => KeyStyle::Digit,
        KeyKind::Operator => KeyStyle::Operator,
        KeyKind::Function => KeyStyle::Function,
        KeyKind::Equals => KeyStyle::Equals,
    }
}

impl eframe::App for KalkulackaApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.repaint.begin_frame();
        consume_zoom_keys(ctx);

        if self.applied_mode != Some(self.mode) {
            self.theme.apply(ctx, self.mode);
            self.applied_mode = Some(self.mode);
        }

        let dt = self.repaint.dt();
        self.particles.update(dt, ctx.screen_rect().bottom());
        self.presses.update(dt);

        if !self.show_about {
            self.handle_keys(ctx);
        }

        let palette = self.palette();

        egui::TopBottomPanel::top("menu")
            .frame(egui::Frame::none().fill(palette.background))
            .show(ctx, |ui| {
                menu_bar(ui, &palette, |ui| {
                    ui.menu_button("view", |ui| {
                        if ui.selectable_label(self.mode == ThemeMode::Light, "light").clicked() {
                            self.set_mode(ThemeMode::Light);
                            ui.close_menu();
                        }
                        if ui.selectable_label(self.mode == ThemeMode::Dark, "dark").clicked() {
                            self.set_mode(ThemeMode::Dark);
                            ui.close_menu();
                        }
                        ui.separator();
                        let mut effects = self.effects_enabled;
                        if ui.checkbox(&mut effects, "particles").changed() {
                            self.set_effects(effects);
                        }
                    });
                    ui.menu_button("help", |ui| {
                        if ui.button("about").clicked() {
                            self.show_about = true;
                            ui.close_menu();
                        }
                    });
                });
            });

        egui::CentralPanel::default()
            .frame(
                egui::Frame::none()
                    .fill(palette.background)
                    .inner_margin(egui::Margin::same(self.theme.window_padding)),
            )
            .show(ctx, |ui| {
                self.render_display(ui, &palette);
                ui.add_space(self.theme.window_padding);
                self.render_keypad(ui, &palette);
            });

        if self.show_about {
            self.render_about(ctx);
        }

        let painter = ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("particles")));
        self.particles.draw(&painter);

        self.repaint
            .set_animating(self.particles.is_animating() || self.presses.is_animating());
        self.repaint.end_frame(ctx);
    }
}
