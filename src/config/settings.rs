use error_stack::{Report, Result};
use figment::Figment;
use serde::Deserialize;

use super::{Api, Feed, Logging, ParseError};
use crate::util::figment::FigmentErrorAttachable;

/// Every setting `feedview` reads at startup.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api: Api,
    pub feed: Feed,
    pub logging: Logging,
}

impl Settings {
    pub fn load() -> Result<Self, ParseError> {
        dotenvy::dotenv().ok();

        let config = Self::figment()
            .extract::<Self>()
            .map_err(|e| Report::new(ParseError).attach_figment_error(e))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ParseError> {
        let url = &self.api.base_url;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Report::new(ParseError)
                .attach_printable(format!("unsupported scheme {:?}", url.scheme()))
                .attach_printable("for key \"api.base_url\""));
        }

        if url.cannot_be_a_base() {
            return Err(Report::new(ParseError)
                .attach_printable(format!("{url} cannot be used as a base URL"))
                .attach_printable("for key \"api.base_url\""));
        }

        Ok(())
    }
}

impl Settings {
    const DEFAULT_CONFIG_FILE: &'static str = "feedview.toml";
    const CONFIG_FILE_VAR: &'static str = "FEEDVIEW_CONFIG_FILE";

    /// Creates a default [`Figment`] object to load the settings.
    ///
    /// Sources by priority (lowest first): the config file, `RUST_LOG`
    /// then `FEEDVIEW_*` environment variables.
    pub(crate) fn figment() -> Figment {
        use figment::providers::{Env, Format, Toml};

        let config_file = std::env::var(Self::CONFIG_FILE_VAR)
            .unwrap_or_else(|_| Self::DEFAULT_CONFIG_FILE.to_string());

        Figment::new()
            .merge(Toml::file(config_file))
            .merge(Env::raw().only(&["RUST_LOG"]).map(|_| "logging.targets".into()))
            // figment splits nested keys on `.` only, so every field with an
            // underscore in its name needs an explicit mapping.
            .merge(
                Env::prefixed("FEEDVIEW_")
                    .ignore(&["CONFIG_FILE"])
                    .map(|v| match v.as_str().to_ascii_uppercase().as_str() {
                        "API_BASE_URL" => "api.base_url".into(),
                        "API_TIMEOUT_SECS" => "api.timeout_secs".into(),
                        "FEED_PAGE_SIZE" => "feed.page_size".into(),
                        _ => v.as_str().replacen('_', ".", 1).into(),
                    }),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoggingStyle;
    use figment::Jail;

    #[test]
    fn defaults() {
        Jail::expect_with(|_| {
            let config: Settings = Settings::figment().extract()?;
            assert_eq!(config.api.base_url.as_str(), "https://dummyjson.com/");
            assert_eq!(config.api.timeout(), None);
            assert_eq!(config.feed.page_size.get(), 10);
            assert_eq!(config.logging.style, LoggingStyle::Compact);
            Ok(())
        });
    }

    #[test]
    fn env_overrides() {
        Jail::expect_with(|jail| {
            jail.set_env("FEEDVIEW_API_BASE_URL", "http://localhost:9000/api");
            jail.set_env("FEEDVIEW_API_TIMEOUT_SECS", "15");
            jail.set_env("FEEDVIEW_FEED_PAGE_SIZE", "25");
            jail.set_env("FEEDVIEW_LOGGING_STYLE", "json");
            jail.set_env("FEEDVIEW_LOGGING_TARGETS", "feedview=trace");

            let config: Settings = Settings::figment().extract()?;
            assert_eq!(config.api.base_url.as_str(), "http://localhost:9000/api");
            assert_eq!(config.api.timeout_secs.map(|v| v.get()), Some(15));
            assert_eq!(config.feed.page_size.get(), 25);
            assert_eq!(config.logging.style, LoggingStyle::Json);
            assert_eq!(config.logging.targets, "feedview=trace");
            Ok(())
        });
    }

    #[test]
    fn rust_log_alias_has_lower_priority() {
        Jail::expect_with(|jail| {
            jail.set_env("RUST_LOG", "warn");
            let config: Settings = Settings::figment().extract()?;
            assert_eq!(config.logging.targets, "warn");

            jail.set_env("FEEDVIEW_LOGGING_TARGETS", "debug");
            let config: Settings = Settings::figment().extract()?;
            assert_eq!(config.logging.targets, "debug");
            Ok(())
        });
    }

    #[test]
    fn config_file_then_env() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "feedview.toml",
                r#"
                [api]
                base_url = "https://posts.example.com"

                [feed]
                page_size = 30

                [logging]
                style = "pretty"
                "#,
            )?;
            jail.set_env("FEEDVIEW_FEED_PAGE_SIZE", "5");

            let config: Settings = Settings::figment().extract()?;
            assert_eq!(config.api.base_url.as_str(), "https://posts.example.com/");
            assert_eq!(config.feed.page_size.get(), 5);
            assert_eq!(config.logging.style, LoggingStyle::Pretty);
            Ok(())
        });
    }

    #[test]
    fn custom_config_file_location() {
        Jail::expect_with(|jail| {
            jail.create_file("elsewhere.toml", "[feed]\npage_size = 12\n")?;
            jail.set_env("FEEDVIEW_CONFIG_FILE", "elsewhere.toml");

            let config: Settings = Settings::figment().extract()?;
            assert_eq!(config.feed.page_size.get(), 12);
            Ok(())
        });
    }

    #[test]
    fn zero_page_size_is_rejected() {
        Jail::expect_with(|jail| {
            jail.set_env("FEEDVIEW_FEED_PAGE_SIZE", "0");
            assert!(Settings::figment().extract::<Settings>().is_err());
            Ok(())
        });
    }

    #[test]
    fn validate_rejects_non_http_urls() {
        Jail::expect_with(|jail| {
            jail.set_env("FEEDVIEW_API_BASE_URL", "ftp://files.example.com");
            let config: Settings = Settings::figment().extract()?;
            assert!(config.validate().is_err());
            Ok(())
        });
    }
}
