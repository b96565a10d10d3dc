// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// docscan-session: the scan lifecycle.
//
// `state` holds the session state machine (idle, scanning, and the three
// terminal outcomes). `controller` drives one session end to end: start the
// capture source, await its single outcome, assemble, save, export.

pub mod controller;
pub mod state;

pub use controller::ScanController;
pub use state::{NextStep, ScanSession, SessionFailure, SessionState};
