// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Central service layer: wires configuration, preferences, the artifact
// store and the platform bridge into one scan controller, and gives the
// Dioxus UI async-friendly methods to drive it.
//
// The controller is held across the capture await, so it sits behind a
// `tokio::sync::Mutex`. Only one scan can be in flight; the UI also hides
// the trigger while scanning.

use std::path::Path;
use std::sync::Arc;

use docscan_bridge::{PlatformBridge, platform_bridge};
use docscan_core::ScanConfig;
use docscan_core::error::Result;
use docscan_session::{NextStep, ScanController};
use docscan_store::{ArtifactStore, Preferences, TempArtifactHandle};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::data_dir;
use crate::state::ScanView;

/// Shared application services accessible from all Dioxus components via
/// `use_context::<AppServices>()`.
#[derive(Clone)]
pub struct AppServices {
    controller: Arc<Mutex<ScanController>>,
    preferences: Preferences,
    config: Arc<ScanConfig>,
}

impl AppServices {
    /// Initialise all services. Call once at app startup.
    pub fn init() -> Self {
        let dir = data_dir::data_dir();
        info!(path = %dir.display(), "initialising app services");
        Self::with_bridge(&dir, platform_bridge())
    }

    fn with_bridge(dir: &Path, bridge: Box<dyn PlatformBridge>) -> Self {
        let config = match load_config(dir) {
            Ok(Some(config)) => config,
            Ok(None) => {
                let config = ScanConfig::default();
                if let Err(e) = persist_config(dir, &config) {
                    warn!(error = %e, "could not write default config");
                }
                config
            }
            Err(e) => {
                warn!(error = %e, "config unreadable, using defaults");
                ScanConfig::default()
            }
        };

        let preferences = Preferences::in_dir(dir);
        let store = ArtifactStore::from_config(&config).with_preferences(preferences.clone());
        let controller = ScanController::new(bridge, &config, store);

        // A previous run may have ended before its PDF was removed.
        if remove_artifact(&controller, &preferences) {
            info!("removed PDF left over from a previous run");
        }

        info!(
            platform = controller.platform_name(),
            policy = ?config.end_of_session,
            "app services initialised"
        );

        Self {
            controller: Arc::new(Mutex::new(controller)),
            preferences,
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    // -- Scanning ------------------------------------------------------------

    /// Run one capture session and return what the screen should show.
    pub async fn scan(&self) -> ScanView {
        let mut controller = self.controller.lock().await;
        if let Err(e) = controller.scan().await.map(|_| ()) {
            warn!(error = %e, "scan request refused");
        }
        ScanView::from_state(controller.state())
    }

    /// Save the PDF and hand it to the export surface.
    pub async fn export(&self) -> Result<TempArtifactHandle> {
        self.controller.lock().await.export()
    }

    pub async fn next_step(&self) -> NextStep {
        self.controller.lock().await.next_step()
    }

    /// Back to Idle so the scan button shows again.
    pub async fn reset(&self) -> Result<ScanView> {
        let mut controller = self.controller.lock().await;
        controller.reset()?;
        Ok(ScanView::from_state(controller.state()))
    }

    /// Remove the temporary PDF and quit.
    pub async fn exit(&self) {
        let controller = self.controller.lock().await;
        remove_artifact(&controller, &self.preferences);
        info!("DocScan exiting");
        std::process::exit(0);
    }
}

/// Best-effort delete of this run's PDF, or of the one the preferences file
/// remembers. Returns whether a file was removed.
fn remove_artifact(controller: &ScanController, preferences: &Preferences) -> bool {
    let backup = preferences.last_artifact_path();
    let has_target = controller.store().current_handle().is_some()
        || backup.as_deref().is_some_and(Path::exists);
    if !has_target {
        debug!("no PDF to remove");
        return false;
    }
    controller.cleanup(backup.as_deref())
}

// -- Config file persistence -------------------------------------------------

const CONFIG_FILE: &str = "config.json";

/// `Ok(None)` when there is no config file yet.
fn load_config(data_dir: &Path) -> Result<Option<ScanConfig>> {
    let path = data_dir.join(CONFIG_FILE);
    let data = match std::fs::read_to_string(&path) {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    Ok(Some(serde_json::from_str(&data)?))
}

fn persist_config(data_dir: &Path, config: &ScanConfig) -> Result<()> {
    let path = data_dir.join(CONFIG_FILE);
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(&path, json)?;
    Ok(())
}
