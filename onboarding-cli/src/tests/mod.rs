//! Unit tests for onboarding-cli, organized by module.
//!
//! Each submodule documents the behaviour under test. Tests that touch
//! `ONBOARDING_*` environment variables hold `env_lock()` so they run serially.


use std::sync::{Mutex, MutexGuard, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

pub(crate) fn env_lock() -> MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub(crate) const ENV_VARS: [&str; 3] = [
    "ONBOARDING_PREFETCH_MODE",
    "ONBOARDING_ASSET_LATENCY_MS",
    "ONBOARDING_CUSTOM_LOADING_VIEW",
];

/// Runs `f` with the given `ONBOARDING_*` variables set and all others removed,
/// restoring the previous environment afterwards.
pub(crate) fn with_env<T>(vars: &[(&str, &str)], f: impl FnOnce() -> T) -> T {
    let _guard = env_lock();
    let saved: Vec<_> = ENV_VARS.iter().map(|k| (*k, std::env::var(k).ok())).collect();
    for key in ENV_VARS {
        std::env::remove_var(key);
    }
    for (key, value) in vars {
        std::env::set_var(key, value);
    }
    let out = f();
    for (key, value) in saved {
        match value {
            Some(v) => std::env::set_var(key, v),
            None => std::env::remove_var(key),
        }
    }
    out
}
