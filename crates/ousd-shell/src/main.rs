//! OUSD dapp shell: notices, rebase opt-in and footers rendered with egui

use eframe::egui;
use ousd_shell_adapters::ShellConfig;

mod app;
mod footer;
mod head;
mod layout;
mod pages;
mod ui;

fn load_config() -> ShellConfig {
    ShellConfig::from_env().unwrap_or_else(|e| {
        tracing::error!(error = %e, "invalid configuration; falling back to defaults");
        ShellConfig::default()
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Starting OUSD shell");
    let config = load_config();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("OUSD")
            .with_inner_size([1000.0, 760.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "OUSD",
        native_options,
        Box::new(|cc| Ok(Box::new(app::App::new(cc, config)))),
    )
}

#[cfg(target_arch = "wasm32")]
fn main() {
    use wasm_bindgen::JsCast;

    tracing_wasm::set_as_global_default();
    tracing::info!("Starting OUSD shell");
    let config = load_config();

    wasm_bindgen_futures::spawn_local(async move {
        let Some(canvas) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("the_canvas_id"))
            .and_then(|el| el.dyn_into::<web_sys::HtmlCanvasElement>().ok())
        else {
            tracing::error!("canvas #the_canvas_id not found");
            return;
        };

        let result = eframe::WebRunner::new()
            .start(
                canvas,
                eframe::WebOptions::default(),
                Box::new(|cc| Ok(Box::new(app::App::new(cc, config)))),
            )
            .await;
        if let Err(e) = result {
            tracing::error!(error = ?e, "failed to start eframe");
        }
    });
}
