//! Main application state and update loop

use std::future::Future;
use std::sync::{Arc, Mutex};

use eframe::egui;
use ousd_shell_adapters::{Eip1193Adapter, ShellConfig, ShellStores, TransactionLogAdapter};
use ousd_shell_core::{
    HeadMetadata, LinkResolver, OptInFailure, PageShell, PortError, ShellAction, ShellState,
    TransactionOutcome,
};

use crate::pages::{self, AccountView, Page, PageAction};
use crate::{head, layout, ui};

const LOCALE_KEY: &str = "ousd_locale";
const EAGER_CONNECT_KEY: &str = "ousd_eager_connect";

/// Results posted back from background tasks
#[derive(Debug, Clone)]
enum TaskEvent {
    Connected(Result<(), String>),
    Refreshed(Result<(), String>),
    OptInSettled(TransactionOutcome),
}

/// Progress and error flags the account panel reads
#[derive(Debug, Default)]
struct TaskStatus {
    connecting: bool,
    opt_ins_in_flight: usize,
    last_error: Option<String>,
    /// Reconnect on startup after a successful connect
    eager_connect: bool,
}

impl TaskStatus {
    fn apply(&mut self, event: TaskEvent) {
        match event {
            TaskEvent::Connected(result) => {
                self.connecting = false;
                match result {
                    Ok(()) => self.eager_connect = true,
                    Err(e) => self.last_error = Some(e),
                }
            }
            TaskEvent::Refreshed(result) => {
                self.last_error = result.err();
            }
            TaskEvent::OptInSettled(outcome) => {
                self.opt_ins_in_flight = self.opt_ins_in_flight.saturating_sub(1);
                self.last_error = match outcome {
                    TransactionOutcome::Submitted(_) => None,
                    TransactionOutcome::Failed(OptInFailure::UserRejected(_)) => None,
                    TransactionOutcome::Failed(OptInFailure::Other(e)) => {
                        Some(format!("Opt-in failed: {e}"))
                    }
                };
            }
        }
    }
}

/// The main application state
pub struct App {
    config: ShellConfig,
    links: LinkResolver,
    provider: Eip1193Adapter,
    stores: ShellStores,
    tx_log: TransactionLogAdapter,
    page: Page,
    /// Persisted across sessions
    locale: String,
    /// Last metadata pushed to the window/document
    applied_head: Option<HeadMetadata>,
    /// Store snapshot and the revision it was taken at
    snapshot: (u64, ShellState),
    events: Arc<Mutex<Vec<TaskEvent>>>,
    status: TaskStatus,
}

impl App {
    pub fn new(cc: &eframe::CreationContext<'_>, config: ShellConfig) -> Self {
        egui_extras::install_image_loaders(&cc.egui_ctx);

        let locale = cc
            .storage
            .and_then(|s| s.get_string(LOCALE_KEY))
            .unwrap_or_else(|| "en_US".to_owned());
        let eager_connect = cc
            .storage
            .and_then(|s| s.get_string(EAGER_CONNECT_KEY))
            .is_some_and(|v| v == "true");

        let stores = ShellStores::from_config(&config);
        let snapshot = (stores.revision(), stores.snapshot());
        let mut app = Self {
            links: config.link_resolver(),
            provider: Eip1193Adapter::with_config(config.clone()),
            stores,
            tx_log: TransactionLogAdapter::default(),
            config,
            page: Page::default(),
            locale,
            applied_head: None,
            snapshot,
            events: Arc::new(Mutex::new(Vec::new())),
            status: TaskStatus {
                eager_connect,
                ..TaskStatus::default()
            },
        };
        if app.status.eager_connect {
            app.trigger_connect(&cc.egui_ctx);
        }
        app
    }

    /// Re-reads the stores only when a slice was written since the last frame.
    fn current_state(&mut self) -> ShellState {
        let revision = self.stores.revision();
        if revision != self.snapshot.0 {
            self.snapshot = (revision, self.stores.snapshot());
        }
        self.snapshot.1.clone()
    }

    fn trigger_connect(&mut self, ctx: &egui::Context) {
        self.status.connecting = true;
        self.status.last_error = None;
        let provider = self.provider.clone();
        let stores = self.stores.clone();
        let events = Arc::clone(&self.events);

        spawn_task(
            ctx,
            &self.events,
            |reason| TaskEvent::Connected(Err(format!("Connect failed: {reason}"))),
            move || async move {
                let result = match provider.connect().await {
                    Ok(session) => {
                        tracing::info!(account = ?session.account, chain_id = session.chain_id, "wallet connected");
                        stores.session.set(session);
                        stores
                            .refresh_account(&provider)
                            .await
                            .map_err(|e| format!("Connected, but reading account state failed: {e}"))
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "wallet connect failed");
                        Err(format!("Connect failed: {e}"))
                    }
                };
                post(&events, TaskEvent::Connected(result));
            },
        );
    }

    fn trigger_refresh(&self, ctx: &egui::Context) {
        let provider = self.provider.clone();
        let stores = self.stores.clone();
        let events = Arc::clone(&self.events);

        spawn_task(
            ctx,
            &self.events,
            |reason| TaskEvent::Refreshed(Err(format!("Refresh failed: {reason}"))),
            move || async move {
                let result = stores
                    .refresh_account(&provider)
                    .await
                    .map_err(|e| format!("Refresh failed: {e}"));
                post(&events, TaskEvent::Refreshed(result));
            },
        );
    }

    /// Session and contract are read at click time.
    fn trigger_opt_in(&mut self, ctx: &egui::Context, state: &ShellState) {
        self.status.opt_ins_in_flight += 1;
        let state = state.clone();
        let provider = self.provider.clone();
        let tx_log = self.tx_log.clone();
        let stores = self.stores.clone();
        let events = Arc::clone(&self.events);

        spawn_task(
            ctx,
            &self.events,
            |reason| {
                TaskEvent::OptInSettled(TransactionOutcome::Failed(OptInFailure::Other(
                    PortError::Transport(reason),
                )))
            },
            move || async move {
                let outcome = stores.opt_in_and_refresh(&provider, &tx_log, &state).await;
                post(&events, TaskEvent::OptInSettled(outcome));
            },
        );
    }

    fn drain_events(&mut self) {
        let events = match self.events.lock() {
            Ok(mut guard) => std::mem::take(&mut *guard),
            Err(e) => {
                tracing::error!(error = %e, "task event queue poisoned");
                return;
            }
        };
        for event in events {
            self.status.apply(event);
        }
    }

    fn handle_shell_action(&mut self, ctx: &egui::Context, state: &ShellState, action: ShellAction) {
        match action {
            ShellAction::OptIn => self.trigger_opt_in(ctx, state),
            ShellAction::SetLocale(locale) => {
                tracing::debug!(%locale, "locale changed");
                self.locale = locale;
            }
            ShellAction::OpenExternal(url) => ui::open_url_new_tab(&url),
            ShellAction::Navigate(href) => match Page::from_href(&href, &self.config.base_path) {
                Some(page) => self.page = page,
                None => {
                    tracing::warn!(%href, "no page for link; opening externally");
                    ui::open_url_new_tab(&href);
                }
            },
        }
    }

    fn handle_page_action(&mut self, ctx: &egui::Context, state: &ShellState, action: PageAction) {
        match action {
            PageAction::Shell(action) => self.handle_shell_action(ctx, state, action),
            PageAction::Connect => self.trigger_connect(ctx),
            PageAction::Disconnect => {
                self.stores.disconnect();
                self.status.eager_connect = false;
                self.status.last_error = None;
            }
            PageAction::Refresh => self.trigger_refresh(ctx),
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(egui::Visuals::light());
        self.drain_events();

        let state = self.current_state();
        let shell = PageShell::new(
            self.page
                .props(&self.locale, self.config.show_uniswap_notice),
            state.clone(),
            self.links.clone(),
        );

        let head = shell.head();
        if self.applied_head.as_ref() != Some(&head) {
            head::apply(ctx, &head);
            self.applied_head = Some(head);
        }

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.heading(egui::RichText::new("OUSD").size(22.0).strong().color(ui::ACCENT));
                ui.add_space(24.0);
                for page in Page::ALL {
                    ui.selectable_value(&mut self.page, page, page.title());
                }
                if let Some(account) = state.session.account {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.monospace(ui::short_address(&account));
                    });
                }
            });
            ui.add_space(4.0);
        });

        let tx_log = self.tx_log.entries().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "transaction log unavailable");
            Vec::new()
        });
        let view = AccountView {
            state: &state,
            connecting: self.status.connecting,
            opting_in: self.status.opt_ins_in_flight > 0,
            last_error: self.status.last_error.as_deref(),
            tx_log: &tx_log,
        };
        let page = self.page;
        let mut page_actions = Vec::new();

        let shell_actions = egui::CentralPanel::default()
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .show(ui, |ui| {
                        layout::render(ui, &shell, |ui, _| {
                            page_actions = pages::render(ui, page, &view);
                        })
                    })
                    .inner
            })
            .inner;

        for action in shell_actions {
            self.handle_shell_action(ctx, &state, action);
        }
        for action in page_actions {
            self.handle_page_action(ctx, &state, action);
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        storage.set_string(LOCALE_KEY, self.locale.clone());
        storage.set_string(EAGER_CONNECT_KEY, self.status.eager_connect.to_string());
    }
}

fn post(events: &Mutex<Vec<TaskEvent>>, event: TaskEvent) {
    match events.lock() {
        Ok(mut guard) => guard.push(event),
        Err(e) => tracing::error!(error = %e, "task event queue poisoned"),
    }
}

/// Runs a provider task off the UI thread and repaints when it finishes. The
/// future is built where it runs, so provider futures need not be `Send`. If
/// the task cannot start, `on_start_failure` supplies the event that settles it.
#[cfg(not(target_arch = "wasm32"))]
fn spawn_task<F, Fut>(
    ctx: &egui::Context,
    events: &Arc<Mutex<Vec<TaskEvent>>>,
    on_start_failure: impl FnOnce(String) -> TaskEvent + Send + 'static,
    make: F,
) where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + 'static,
{
    let ctx = ctx.clone();
    let events = Arc::clone(events);
    std::thread::spawn(move || {
        match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(rt) => rt.block_on(make()),
            Err(e) => {
                tracing::error!(error = %e, "failed to start task runtime");
                post(&events, on_start_failure(format!("task runtime unavailable: {e}")));
            }
        }
        ctx.request_repaint();
    });
}

#[cfg(target_arch = "wasm32")]
fn spawn_task<F, Fut>(
    ctx: &egui::Context,
    _events: &Arc<Mutex<Vec<TaskEvent>>>,
    _on_start_failure: impl FnOnce(String) -> TaskEvent + 'static,
    make: F,
) where
    F: FnOnce() -> Fut + 'static,
    Fut: Future<Output = ()> + 'static,
{
    let ctx = ctx.clone();
    wasm_bindgen_futures::spawn_local(async move {
        make().await;
        ctx.request_repaint();
    });
}
