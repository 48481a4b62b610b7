use crate::config;

/// Load settings, falling back to defaults.
///
/// Logging is not up yet when this runs, so the reason for a fallback is
/// handed back for the caller to log.
pub fn load_settings() -> (config::Settings, Option<String>) {
    match config::Settings::load() {
        Ok(s) => match s.validate() {
            Ok(()) => (s, None),
            Err(err) => (
                config::Settings::default(),
                Some(format!("invalid config, using defaults: {err}")),
            ),
        },
        // Config is optional; failures should not prevent the app from starting.
        Err(err) => (
            config::Settings::default(),
            Some(format!("failed to load config, using defaults: {err}")),
        ),
    }
}
