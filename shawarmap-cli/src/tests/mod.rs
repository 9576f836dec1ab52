//! Shared test harness modules for the ShawarMap CLI.
#![expect(
    clippy::panic,
    reason = "Tests assert panic branches to surface unexpected CLI outcomes"
)]

use super::*;

mod distance_steps;
mod helpers;
