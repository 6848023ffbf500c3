//! Structured logging utilities for callmap.
//!
//! Helpers for consistent, structured `tracing` events. Proxy dispatch only
//! emits `debug` and `trace` events; scenario runs log at `info` and `warn`.

/// Log the ledger left behind by a scenario run, one member per line.
pub fn log_ledger(rendered: &str) {
    for line in rendered.lines() {
        tracing::debug!(ledger = line, "Scenario ledger");
    }
}

/// Log an intercepted call once it is in the ledger.
pub fn log_call_recorded(member: &str, invocation: usize, arg_count: usize) {
    tracing::trace!(member, invocation, args = arg_count, "Call recorded");
}

/// Log a call answered by the call map.
pub fn log_program_resolved(member: &str, invocation: usize, program: &str) {
    tracing::debug!(member, invocation, program, "Mapped program resolved");
}

/// Log a call answered by the fallback chain.
pub fn log_fallback(member: &str, invocation: usize, step: &str) {
    tracing::debug!(member, invocation, step, "No mapping, falling back");
}

pub fn log_call_map_built(members: usize) {
    tracing::debug!(members, "Call map built");
}

/// Log scenario loading.
pub fn log_loading_scenario(path: &str) {
    tracing::info!(scenario = path, "Loading scenario");
}

/// Log scenario execution start.
pub fn log_scenario_start(target: &str, steps: usize) {
    tracing::info!(subject = target, steps, "Running scenario");
}

pub fn log_step_failed(step: usize, member: &str, reason: &str) {
    tracing::warn!(step, member, reason, "Scenario step failed");
}

/// Log scenario completion.
pub fn log_scenario_complete(passed: usize, total: usize) {
    tracing::info!(passed, total, "Scenario completed");
}
