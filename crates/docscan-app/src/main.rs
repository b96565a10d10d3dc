// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// DocScan: one-button document scanner.
//
// Entry point. Initialises logging and backend services, then launches the
// Dioxus UI with the single scan screen.

mod pages;
mod services;
mod state;

use dioxus::prelude::*;

use pages::scan::Scan;
use services::app_services::AppServices;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("DocScan starting");

    dioxus::launch(app);
}

/// Root component.
fn app() -> Element {
    let svc = use_hook(AppServices::init);

    use_context_provider(|| svc.clone());
    use_context_provider(|| Signal::new(state::AppState::default()));

    rsx! {
        div { class: "app-container",
            style: "display: flex; flex-direction: column; height: 100vh; padding: 16px; box-sizing: border-box; font-family: system-ui, -apple-system, sans-serif;",
            Scan {}
        }
    }
}
