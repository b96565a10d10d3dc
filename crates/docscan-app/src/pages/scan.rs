// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scan screen: one button to scan, one button to share the PDF.
//
// On desktop the capture source is a multi-select image dialog and the share
// surface is a save dialog (docscan-bridge).

use dioxus::prelude::*;

use docscan_core::ScanConfig;
use docscan_core::human_errors::{RESTART_HINT, humanize_error};
use docscan_session::NextStep;

use crate::services::app_services::AppServices;
use crate::state::{AppState, ScanView};

#[component]
pub fn Scan() -> Element {
    let svc = use_context::<AppServices>();
    let state = use_context::<Signal<AppState>>();

    // Open the capture source straight away when configured to. Runs after
    // the first render; `start_scan` only peeks at the state, so this effect
    // subscribes to nothing and never fires again.
    {
        let svc = svc.clone();
        use_effect(move || {
            if auto_start_due(svc.config(), &state.peek().view) {
                start_scan(svc.clone(), state);
            }
        });
    }

    let view = state.read().view.clone();
    let exporting = state.read().exporting;

    rsx! {
        div { style: "flex: 1; display: flex; flex-direction: column; align-items: center; justify-content: center; gap: 16px;",
            {
                match view {
                    ScanView::Idle => rsx! {
                        button {
                            style: "padding: 20px 32px; border-radius: 16px; border: none; background: #007aff; color: white; font-size: 28px;",
                            onclick: {
                                let svc = svc.clone();
                                move |_| start_scan(svc.clone(), state)
                            },
                            "\u{1F50D} Tap to Scan"
                        }
                    },
                    ScanView::Scanning => rsx! {
                        p { style: "color: #666; font-size: 18px;", "Scanning..." }
                    },
                    ScanView::Ready { pages, bytes } => {
                        let size_kb = bytes.div_ceil(1024);
                        rsx! {
                            button {
                                style: "padding: 20px 32px; border-radius: 16px; border: none; background: #34c759; color: white; font-size: 24px;",
                                disabled: exporting,
                                onclick: {
                                    let svc = svc.clone();
                                    move |_| export(svc.clone(), state)
                                },
                                "Share Scanned Document (PDF)"
                            }
                            p { style: "color: #888; font-size: 14px;", "{pages} page(s), {size_kb} KB" }
                        }
                    }
                    ScanView::Cancelled => rsx! {
                        p { style: "color: #666;", "Scan cancelled." }
                    },
                    ScanView::Failed(human) => rsx! {
                        div { style: "max-width: 420px; padding: 16px; border-radius: 12px; background: #fff3f2; border: 1px solid #ff3b30; text-align: center;",
                            strong { "{human.message}" }
                            p { style: "margin: 8px 0 0; color: #666;", "{human.suggestion}" }
                        }
                    },
                }
            }

            if let Some(ref msg) = state.read().status_message {
                p { style: "color: #666; font-size: 14px; text-align: center;", "{msg}" }
            }
        }

        p { style: "text-align: center; opacity: 0.75; font-size: 14px;",
            "{RESTART_HINT} To cancel, leave the app."
        }
    }
}

/// Whether the screen should open the capture source without a tap.
fn auto_start_due(config: &ScanConfig, view: &ScanView) -> bool {
    config.auto_start_scan && view.can_scan()
}

/// Run one capture session, then apply the end-of-session policy.
fn start_scan(svc: AppServices, mut state: Signal<AppState>) {
    if !state.peek().view.can_scan() {
        return;
    }
    {
        let mut s = state.write();
        s.view = ScanView::Scanning;
        s.status_message = None;
    }

    spawn(async move {
        let view = svc.scan().await;
        tracing::info!(?view, "scan finished");
        state.write().view = view.clone();

        match svc.next_step().await {
            NextStep::Stay => {}
            NextStep::Exit => svc.exit().await,
            NextStep::ResetToIdle => {
                // Keep the diagnostic visible under the scan button.
                let message = match &view {
                    ScanView::Failed(human) => Some(format!("{} {}", human.message, human.suggestion)),
                    ScanView::Cancelled => Some("Scan cancelled.".to_owned()),
                    _ => None,
                };
                match svc.reset().await {
                    Ok(idle) => {
                        let mut s = state.write();
                        s.view = idle;
                        s.status_message = message;
                    }
                    Err(e) => tracing::error!(error = %e, "could not reset session"),
                }
            }
        }
    });
}

/// Save the PDF and hand it to the share surface.
fn export(svc: AppServices, mut state: Signal<AppState>) {
    state.write().exporting = true;
    spawn(async move {
        let message = match svc.export().await {
            Ok(handle) => {
                tracing::info!(path = %handle.path().display(), "scan shared");
                None
            }
            Err(e) => {
                tracing::error!(error = %e, "export failed");
                let human = humanize_error(&e);
                Some(format!("{} {}", human.message, human.suggestion))
            }
        };
        let mut s = state.write();
        s.exporting = false;
        s.status_message = message;
    });
}
