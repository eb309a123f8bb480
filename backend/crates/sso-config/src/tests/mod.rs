
use std::env;

use tempfile::TempDir;

/// Sets an environment variable for the lifetime of the guard.
///
/// Callers must be `#[serial]`: the process environment is shared.
pub(crate) struct EnvGuard {
    key: &'static str,
    previous: Option<String>,
}

impl EnvGuard {
    pub(crate) fn set(key: &'static str, value: &str) -> Self {
        let previous = env::var(key).ok();
        // SAFETY: env-mutating tests run serially.
        unsafe { env::set_var(key, value) };
        Self { key, previous }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        // SAFETY: see `EnvGuard::set`.
        unsafe {
            match self.previous.take() {
                Some(value) => env::set_var(self.key, value),
                None => env::remove_var(self.key),
            }
        }
    }
}

/// Fresh config dir exposed through `SSO_CONFIG_DIR`. Keep both values alive.
pub(crate) fn setup_config_dir() -> (TempDir, EnvGuard) {
    let dir = TempDir::new().expect("temp config dir");
    let guard = EnvGuard::set(
        crate::CONFIG_DIR_ENV,
        dir.path().to_str().expect("utf-8 temp path"),
    );
    (dir, guard)
}
