//! Custom traits and trait implementations for `egui` types.
//!
//! Centralizes the application style (`MyStyle`) and the modal notification
//! interface (`Notification`) used by `layout.rs`.

use egui::{
    Align, Color32, Context,
    FontFamily::Proportional,
    FontId, Frame, Layout, Spacing, Stroke, Style,
    TextStyle::{Body, Button, Heading, Monospace, Small},
    Vec2, Visuals, Window,
    style::ScrollStyle,
};

/// Defines custom text styles for the egui context.
/// Overrides default `egui` font sizes for different logical text styles.
pub const CUSTOM_TEXT_STYLE: [(egui::TextStyle, egui::FontId); 5] = [
    (Heading, FontId::new(20.0, Proportional)),
    (Body, FontId::new(16.0, Proportional)),
    (Button, FontId::new(16.0, Proportional)),
    (Monospace, FontId::new(15.0, Proportional)),
    (Small, FontId::new(14.0, Proportional)),
];

/// A trait for applying custom styling to the `egui` context (`Context`).
/// Used once at startup by `layout.rs::MovieDashApp::new`.
pub trait MyStyle {
    /// Applies a pre-defined application style to the `egui` context.
    fn set_style_init(&self, visuals: Visuals);
}

impl MyStyle for Context {
    /// Configures the application's look and feel (theme, spacing, text styles).
    fn set_style_init(&self, visuals: Visuals) {
        let scroll = ScrollStyle {
            handle_min_length: 32.0,
            ..ScrollStyle::default()
        };

        let spacing = Spacing {
            scroll,
            item_spacing: [8.0, 6.0].into(),
            ..Spacing::default()
        };

        let style = Style {
            visuals,                               // Apply provided theme (Light/Dark).
            spacing,                               // Apply custom spacing.
            text_styles: CUSTOM_TEXT_STYLE.into(), // Apply custom text styles.
            ..Style::default()
        };

        self.set_style(style);
    }
}

/// Trait for modal notification windows (like error dialogs).
/// Allows `layout.rs` to manage notification types polymorphically via
/// `Box<dyn Notification>`.
pub trait Notification: Send + Sync + 'static {
    /// Renders the notification window using `egui::Window`.
    /// Called repeatedly by `layout.rs::check_notification` while active.
    ///
    /// ### Returns
    /// `true` if the window should remain open, `false` if closed.
    fn show(&mut self, ctx: &Context) -> bool;
}

/// Notification struct for displaying error messages. Implements `Notification`.
pub struct Error {
    /// The error message content. Set by the caller in `layout.rs`.
    pub message: String,
}

impl Notification for Error {
    /// Renders the Error notification window: a closable window with the
    /// message inside a red-tinted frame.
    fn show(&mut self, ctx: &Context) -> bool {
        let mut open = true;

        Window::new("Error")
            .collapsible(false)
            .open(&mut open)
            .show(ctx, |ui| {
                let width_max = ui.available_width() * 0.80;
                ui.allocate_ui_with_layout(
                    Vec2::new(width_max, ui.available_height()),
                    Layout::top_down(Align::LEFT),
                    |ui| {
                        Frame::default()
                            .fill(Color32::from_rgb(255, 200, 200)) // Light red bg
                            .stroke(Stroke::new(1.0, Color32::DARK_RED)) // Dark red border
                            .outer_margin(2.0)
                            .inner_margin(10.0)
                            .show(ui, |ui| {
                                ui.colored_label(Color32::BLACK, &self.message);
                                ui.disable();
                            });
                    },
                );
            });

        open
    }
}
