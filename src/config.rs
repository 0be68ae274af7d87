use crate::session::{SessionKeys, DEFAULT_COOKIE_AGE_SECS, DEFAULT_COOKIE_NAME};

#[derive(Debug, Clone)]
pub struct Config {
    // Localization
    pub catalog_file: Option<String>,

    // Session cookies
    pub cookie_name: String,
    pub cookie_age: u32,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            // Message catalog - callers pass this to i18n::catalog::init_global at startup
            catalog_file: std::env::var("ERROR_CATALOG_FILE").ok(),

            // Session cookies
            cookie_name: std::env::var("SESSION_COOKIE_NAME")
                .unwrap_or_else(|_| DEFAULT_COOKIE_NAME.to_string()),
            cookie_age: std::env::var("SESSION_COOKIE_AGE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_COOKIE_AGE_SECS),
        }
    }

    pub fn session_keys(&self) -> SessionKeys {
        SessionKeys::new(&self.cookie_name, self.cookie_age)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    // Env-var tests mutate process state and must not interleave.

    #[test]
    #[serial]
    fn test_defaults_when_env_unset() {
        std::env::remove_var("ERROR_CATALOG_FILE");
        std::env::remove_var("SESSION_COOKIE_NAME");
        std::env::remove_var("SESSION_COOKIE_AGE");

        let config = Config::from_env();
        assert_eq!(config.catalog_file, None);
        assert_eq!(config.cookie_name, "api_token");
        assert_eq!(config.cookie_age, 604_800);
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        std::env::set_var("ERROR_CATALOG_FILE", "/etc/app/errors.json");
        std::env::set_var("SESSION_COOKIE_NAME", "sid");
        std::env::set_var("SESSION_COOKIE_AGE", "3600");

        let config = Config::from_env();
        assert_eq!(config.catalog_file.as_deref(), Some("/etc/app/errors.json"));
        assert_eq!(config.cookie_name, "sid");
        assert_eq!(config.cookie_age, 3600);

        std::env::remove_var("ERROR_CATALOG_FILE");
        std::env::remove_var("SESSION_COOKIE_NAME");
        std::env::remove_var("SESSION_COOKIE_AGE");
    }

    #[test]
    #[serial]
    fn test_unparseable_age_falls_back_to_default() {
        std::env::set_var("SESSION_COOKIE_AGE", "not-a-number");
        let config = Config::from_env();
        assert_eq!(config.cookie_age, 604_800);
        std::env::remove_var("SESSION_COOKIE_AGE");
    }

    #[test]
    #[serial]
    fn test_session_keys_inherit_config() {
        std::env::set_var("SESSION_COOKIE_NAME", "sid");
        let config = Config::from_env();
        let keys = config.session_keys();
        assert_eq!(keys.cookie_name(), "sid");
        std::env::remove_var("SESSION_COOKIE_NAME");
    }
}
