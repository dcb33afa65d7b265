//! App and marketing footers

use eframe::egui;
use ousd_shell_core::ShellAction;

use crate::ui;

/// Supported locales as (code, label).
pub const LOCALES: &[(&str, &str)] = &[
    ("en_US", "English"),
    ("fr_FR", "Français"),
    ("de_DE", "Deutsch"),
    ("es_ES", "Español"),
    ("zh_CN", "Chinese"),
    ("ko_KR", "Korean"),
];

const DOCS_URL: &str = "https://docs.ousd.com";
const DISCORD_URL: &str = "https://discord.gg/originprotocol";
const GITHUB_URL: &str = "https://github.com/OriginProtocol/origin-dollar";
const TERMS_URL: &str = "https://originprotocol.com/tos";
const PRIVACY_URL: &str = "https://originprotocol.com/privacy";

pub fn locale_label(code: &str) -> &str {
    LOCALES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, label)| *label)
        .unwrap_or(code)
}

pub fn build_info() -> String {
    format!(
        "v{} ({}, {})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIME")
    )
}

pub fn app_footer(ui: &mut egui::Ui, dapp: bool, locale: &str) -> Option<ShellAction> {
    let mut action = None;
    ui.separator();
    ui.horizontal_wrapped(|ui| {
        let mut selected = locale.to_owned();
        egui::ComboBox::from_id_salt("footer_locale")
            .selected_text(locale_label(&selected).to_owned())
            .width(120.0)
            .show_ui(ui, |ui| {
                for (code, label) in LOCALES {
                    ui.selectable_value(&mut selected, (*code).to_owned(), *label);
                }
            });
        if selected != locale {
            action = Some(ShellAction::SetLocale(selected));
        }

        ui.add_space(12.0);
        for (label, url) in [("Docs", DOCS_URL), ("Discord", DISCORD_URL), ("GitHub", GITHUB_URL)] {
            if ui.link(label).clicked() {
                action = Some(ShellAction::OpenExternal(url.to_owned()));
            }
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let text = if dapp {
                build_info()
            } else {
                env!("CARGO_PKG_VERSION").to_owned()
            };
            ui.label(egui::RichText::new(text).weak().small());
        });
    });
    action
}

pub fn marketing_footer(ui: &mut egui::Ui, locale: &str) -> Option<ShellAction> {
    let mut action = None;
    ui.separator();
    ui.add_space(8.0);
    ui.vertical_centered(|ui| {
        ui::styled_heading(ui, "Origin Dollar");
        ui.label(
            egui::RichText::new("OUSD is a stablecoin that earns yield while it sits in your wallet.")
                .weak(),
        );
        ui.add_space(6.0);
        ui.horizontal_wrapped(|ui| {
            for (label, url) in [
                ("Docs", DOCS_URL),
                ("Terms", TERMS_URL),
                ("Privacy", PRIVACY_URL),
                ("Discord", DISCORD_URL),
            ] {
                if ui.link(label).clicked() {
                    action = Some(ShellAction::OpenExternal(url.to_owned()));
                }
            }
        });
        ui.label(egui::RichText::new(locale_label(locale)).weak().small());
    });
    action
}
