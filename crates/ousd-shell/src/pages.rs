//! Page routes and the content each one hands to the shell

use eframe::egui;
use ousd_shell_adapters::{TransactionLogEntry, TransactionLogKind};
use ousd_shell_core::{PageShellProps, ShellAction, ShellState};

use crate::ui;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Home,
    Swap,
    Earn,
    Stake,
}

impl Page {
    pub const ALL: [Page; 4] = [Page::Home, Page::Swap, Page::Earn, Page::Stake];

    pub fn title(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Swap => "Swap",
            Page::Earn => "Earn",
            Page::Stake => "Stake",
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Page::Home => "/",
            Page::Swap => "/swap",
            Page::Earn => "/earn",
            Page::Stake => "/stake",
        }
    }

    /// Layout props for this page. The uniswap notice only applies to the swap page.
    pub fn props(self, locale: &str, show_uniswap_notice: bool) -> PageShellProps {
        let base = PageShellProps {
            locale: locale.to_owned(),
            ..PageShellProps::default()
        };
        match self {
            Page::Home => PageShellProps {
                medium: true,
                ..base
            },
            Page::Swap => PageShellProps {
                dapp: true,
                short: true,
                show_uniswap_notice,
                ..base
            },
            Page::Earn => PageShellProps {
                dapp: true,
                shorter: true,
                ..base
            },
            Page::Stake => PageShellProps {
                dapp: true,
                is_stake_page: true,
                ..base
            },
        }
    }

    /// Resolves an href produced by the link resolver back to a page.
    pub fn from_href(href: &str, base_path: &str) -> Option<Page> {
        let base = base_path.trim_end_matches('/');
        let path = href.strip_prefix(base).unwrap_or(href);
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = path.trim_end_matches('/');
        Page::ALL
            .into_iter()
            .find(|page| page.path().trim_end_matches('/') == path)
    }
}

/// Account panel state the app owns; pages only read it.
pub struct AccountView<'a> {
    pub state: &'a ShellState,
    pub connecting: bool,
    pub opting_in: bool,
    pub last_error: Option<&'a str>,
    pub tx_log: &'a [TransactionLogEntry],
}

/// Extra actions pages raise besides the shell's own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageAction {
    Shell(ShellAction),
    Connect,
    Disconnect,
    Refresh,
}

pub fn render(ui: &mut egui::Ui, page: Page, view: &AccountView<'_>) -> Vec<PageAction> {
    let mut actions = Vec::new();
    match page {
        Page::Home => marketing(ui, &mut actions),
        Page::Swap | Page::Earn | Page::Stake => {
            ui::styled_heading(ui, page.title());
            ui.add_space(8.0);
            account_panel(ui, view, &mut actions);
            ui.add_space(12.0);
            if page == Page::Stake {
                stakes(ui, view.state);
                ui.add_space(12.0);
            }
            transaction_log(ui, view.tx_log);
        }
    }
    actions
}

fn marketing(ui: &mut egui::Ui, actions: &mut Vec<PageAction>) {
    ui.vertical_centered(|ui| {
        ui.add_space(24.0);
        ui.heading(egui::RichText::new("The self-custodial, yield-generating stablecoin").size(28.0));
        ui.add_space(8.0);
        ui.label("OUSD grows in your wallet automatically through rebasing.");
        ui.add_space(16.0);
        if ui.button("Open the dapp").clicked() {
            actions.push(PageAction::Shell(ShellAction::Navigate(
                Page::Swap.path().to_owned(),
            )));
        }
    });
}

fn account_panel(ui: &mut egui::Ui, view: &AccountView<'_>, actions: &mut Vec<PageAction>) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        let session = &view.state.session;
        match session.account {
            Some(account) => {
                ui.horizontal(|ui| {
                    ui.label("Account:");
                    ui.monospace(ui::short_address(&account))
                        .on_hover_text(account.to_string());
                    ui.label(format!("chain {}", session.chain_id));
                });
                ui.horizontal(|ui| {
                    ui.label("Rebasing:");
                    if view.state.rebase_opted_out {
                        ui.colored_label(egui::Color32::from_rgb(255, 170, 0), "opted out");
                    } else {
                        ui.colored_label(egui::Color32::from_rgb(0, 200, 120), "earning yield");
                    }
                    if view.opting_in {
                        ui.spinner();
                        ui.label("waiting for wallet");
                    }
                });
                ui.horizontal(|ui| {
                    if ui.button("Refresh").clicked() {
                        actions.push(PageAction::Refresh);
                    }
                    if ui.button("Disconnect").clicked() {
                        actions.push(PageAction::Disconnect);
                    }
                });
            }
            None => {
                ui.horizontal(|ui| {
                    ui.add_enabled_ui(!view.connecting, |ui| {
                        if ui.button("Connect wallet").clicked() {
                            actions.push(PageAction::Connect);
                        }
                    });
                    if view.connecting {
                        ui.spinner();
                    }
                });
            }
        }
        if let Some(error) = view.last_error {
            ui.colored_label(egui::Color32::from_rgb(220, 80, 80), error);
        }
    });
}

fn stakes(ui: &mut egui::Ui, state: &ShellState) {
    ui.label(egui::RichText::new("Stakes").strong());
    if state.stakes.is_empty() {
        ui.label(egui::RichText::new("No stakes").weak());
        return;
    }
    egui::Grid::new("stakes_grid")
        .striped(true)
        .num_columns(3)
        .show(ui, |ui| {
            ui.label("Amount");
            ui.label("Ends");
            ui.label("Paid");
            ui.end_row();
            for stake in &state.stakes.stakes {
                ui.monospace(stake.amount.to_string());
                ui.monospace(stake.end.to_string());
                ui.label(if stake.paid { "yes" } else { "no" });
                ui.end_row();
            }
        });
}

fn transaction_log(ui: &mut egui::Ui, entries: &[TransactionLogEntry]) {
    ui.label(egui::RichText::new("Transactions").strong());
    if entries.is_empty() {
        ui.label(egui::RichText::new("None yet").weak());
        return;
    }
    for entry in entries.iter().rev() {
        ui.horizontal(|ui| {
            match &entry.kind {
                TransactionLogKind::Submitted(record) => {
                    ui.colored_label(egui::Color32::from_rgb(0, 200, 120), "✔");
                    ui.label(format!("{} ({})", entry.label, entry.asset));
                    ui.monospace(record.hash.to_string());
                }
                TransactionLogKind::Failed => {
                    ui.colored_label(egui::Color32::from_rgb(220, 80, 80), "✖");
                    ui.label(format!("{} ({}) failed", entry.label, entry.asset));
                }
            }
        });
    }
}
