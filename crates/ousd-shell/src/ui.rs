//! UI helper components

use eframe::egui;
use ousd_shell_core::style::{self, StyleTags};

pub const ACCENT: egui::Color32 = egui::Color32::from_rgb(0x1a, 0x82, 0xff);
pub const CONTAINER_WIDTH: f32 = 940.0;
const NOTICE_MARGIN: f32 = 35.0;

/// Open URL in a new browser tab
#[cfg(target_arch = "wasm32")]
pub fn open_url_new_tab(url: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.open_with_url_and_target(url, "_blank");
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn open_url_new_tab(url: &str) {
    if let Err(e) = open::that(url) {
        tracing::warn!(error = %e, url, "failed to open browser");
    }
}

pub fn notice_fill(tags: &StyleTags) -> egui::Color32 {
    if tags.contains(style::STAKING) {
        ACCENT
    } else {
        egui::Color32::BLACK
    }
}

/// Space below a notice; dapp pages stack them flush.
pub fn notice_margin(tags: &StyleTags) -> f32 {
    if tags.contains(style::DAPP) {
        0.0
    } else {
        NOTICE_MARGIN
    }
}

pub fn notice_frame(tags: &StyleTags) -> egui::Frame {
    let top = if tags.contains(style::STAKING) { 8.0 } else { 12.0 };
    egui::Frame::none()
        .fill(notice_fill(tags))
        .inner_margin(egui::Margin {
            left: 16.0,
            right: 16.0,
            top,
            bottom: 12.0,
        })
}

/// Minimum height of `<main>` for the size tags.
pub fn main_min_height(tags: &StyleTags) -> f32 {
    if tags.contains(style::SHORTER) {
        240.0
    } else if tags.contains(style::SHORT) {
        360.0
    } else if tags.contains(style::MEDIUM) {
        520.0
    } else {
        0.0
    }
}

/// White pill button used inside notices
pub fn notice_button(ui: &mut egui::Ui, label: &str) -> egui::Response {
    ui.add(
        egui::Button::new(egui::RichText::new(label).size(12.0).color(egui::Color32::BLACK))
            .fill(egui::Color32::WHITE)
            .rounding(egui::Rounding::same(16.0)),
    )
}

/// Styled heading with accent color
pub fn styled_heading(ui: &mut egui::Ui, text: &str) {
    ui.heading(egui::RichText::new(text).color(ACCENT));
}

/// Centered column capped at the container width
pub fn container(ui: &mut egui::Ui, add_contents: impl FnOnce(&mut egui::Ui)) {
    let width = ui.available_width().min(CONTAINER_WIDTH);
    ui.horizontal(|ui| {
        ui.add_space(((ui.available_width() - width) / 2.0).max(0.0));
        ui.vertical(|ui| {
            ui.set_width(width);
            add_contents(ui);
        });
    });
}

/// Shortened 0x1234…abcd form of an address
pub fn short_address(address: &alloy::primitives::Address) -> String {
    let full = address.to_string();
    format!("{}…{}", &full[..6], &full[full.len() - 4..])
}
