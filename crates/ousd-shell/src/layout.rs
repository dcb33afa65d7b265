//! egui rendering of a [`PageShell`].
//!
//! Decisions come from the shell; this module only draws them and collects
//! the actions the user triggered.

use eframe::egui;
use ousd_shell_core::{FooterChoice, NoticeBanner, PageShell, PromotionBanner, ShellAction};

use crate::{footer, ui};

pub fn render(
    ui: &mut egui::Ui,
    shell: &PageShell,
    children: impl FnOnce(&mut egui::Ui, &mut Vec<ShellAction>),
) -> Vec<ShellAction> {
    let mut actions = Vec::new();
    let banners = shell.render_banners();

    notice(ui, &banners.opt_in, &mut actions);
    notice(ui, &banners.uniswap, &mut actions);
    promotion(ui, &banners.promotion, &mut actions);

    let main_tags = shell.main_tags();
    ui.add_space(16.0);
    ui.allocate_ui(
        egui::vec2(ui.available_width(), ui::main_min_height(&main_tags)),
        |ui| {
            ui.set_min_height(ui::main_min_height(&main_tags));
            if shell.wraps_children() {
                ui::container(ui, |ui| children(ui, &mut actions));
            } else {
                children(ui, &mut actions);
            }
        },
    );
    ui.add_space(24.0);

    let footer_action = match shell.render_footer() {
        FooterChoice::App { dapp, locale } => footer::app_footer(ui, dapp, &locale),
        FooterChoice::Marketing { locale } => footer::marketing_footer(ui, &locale),
    };
    actions.extend(footer_action);
    actions
}

fn notice(ui: &mut egui::Ui, banner: &NoticeBanner, actions: &mut Vec<ShellAction>) {
    if !banner.visible {
        return;
    }
    ui::notice_frame(&banner.tags).show(ui, |ui| {
        ui::container(ui, |ui| {
            ui.horizontal_wrapped(|ui| {
                ui.add(egui::Image::new(banner.icon.as_str()).max_width(50.0));
                ui.label(egui::RichText::new(banner.message).color(egui::Color32::WHITE));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui::notice_button(ui, banner.action.label()).clicked() {
                        actions.push(banner.action.to_shell_action());
                    }
                });
            });
        });
    });
    ui.add_space(ui::notice_margin(&banner.tags));
}

fn promotion(ui: &mut egui::Ui, banner: &PromotionBanner, actions: &mut Vec<ShellAction>) {
    ui::notice_frame(&banner.tags).show(ui, |ui| {
        ui::container(ui, |ui| {
            ui.horizontal_wrapped(|ui| {
                ui.vertical(|ui| {
                    if let Some(title) = banner.title {
                        ui.label(
                            egui::RichText::new(title)
                                .size(18.0)
                                .strong()
                                .color(egui::Color32::WHITE),
                        );
                        ui.label(
                            egui::RichText::new(banner.message)
                                .size(14.0)
                                .color(egui::Color32::from_white_alpha(204)),
                        );
                    } else {
                        ui.label(egui::RichText::new(banner.message).color(egui::Color32::WHITE));
                    }
                });
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui::notice_button(ui, banner.action.label()).clicked() {
                        actions.push(banner.action.to_shell_action());
                    }
                });
            });
        });
    });
    ui.add_space(ui::notice_margin(&banner.tags));
}
