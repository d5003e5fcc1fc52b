use serde::Deserialize;

use crate::engines::FullscreenApi;

const DEFAULT_WATCH_TIME_INTERVAL: f64 = 30.;

/// Configuration of the player, as given by the JavaScript-side in JSON.
///
/// Every field is optional in the JSON, missing ones taking their default value. Changes only
/// apply to sessions acquired afterwards, the watch-time endpoint excepted.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct PlayerConfiguration {
    /// If `true`, speech recognition keeps listening after the first utterance.
    pub(crate) continuous_transcript: bool,

    /// If `true`, speech recognition starts as soon as a content is loaded.
    pub(crate) auto_start_transcript: bool,

    /// Interval, in seconds of media time, between two periodic watch-time reports.
    ///
    /// To set to `0` to only report on pauses and at the end of the media.
    pub(crate) watch_time_interval_sec: f64,

    /// URL watch-time reports are POSTed to. Reporting is disabled if not set.
    pub(crate) watch_time_endpoint: Option<String>,

    /// Fullscreen APIs to try, by order of preference.
    pub(crate) fullscreen_apis: Vec<FullscreenApi>,
}

impl Default for PlayerConfiguration {
    fn default() -> Self {
        Self {
            continuous_transcript: false,
            auto_start_transcript: true,
            watch_time_interval_sec: DEFAULT_WATCH_TIME_INTERVAL,
            watch_time_endpoint: None,
            fullscreen_apis: FullscreenApi::DEFAULT_PRIORITY.to_vec(),
        }
    }
}

impl PlayerConfiguration {
    /// Parse and validate a JSON configuration.
    pub(crate) fn from_json(json: &str) -> Result<Self, ConfigurationError> {
        let config: Self = serde_json::from_str(json)?;
        if !config.watch_time_interval_sec.is_finite() || config.watch_time_interval_sec < 0. {
            return Err(ConfigurationError::InvalidValue {
                field: "watchTimeIntervalSec",
                message: format!("{} is not a positive number", config.watch_time_interval_sec),
            });
        }
        if config.fullscreen_apis.is_empty() {
            return Err(ConfigurationError::InvalidValue {
                field: "fullscreenApis",
                message: "at least one API has to be given".to_owned(),
            });
        }
        Ok(config)
    }
}

use thiserror::Error;

#[derive(Error, Debug)]
pub(crate) enum ConfigurationError {
    #[error("Could not parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid value for `{field}`: {message}")]
    InvalidValue {
        field: &'static str,
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_gives_defaults() {
        let config = PlayerConfiguration::from_json("{}").unwrap();
        assert_eq!(config, PlayerConfiguration::default());
        assert!(!config.continuous_transcript);
        assert!(config.auto_start_transcript);
        assert_eq!(config.watch_time_interval_sec, 30.);
        assert_eq!(config.fullscreen_apis.len(), 4);
    }

    #[test]
    fn test_partial_json() {
        let config = PlayerConfiguration::from_json(
            r#"{
                "continuousTranscript": true,
                "watchTimeEndpoint": "http://localhost:5199/lxp/course/learner/learnerprogress",
                "fullscreenApis": ["webkit", "standard"]
            }"#,
        )
        .unwrap();
        assert!(config.continuous_transcript);
        assert_eq!(
            config.watch_time_endpoint.as_deref(),
            Some("http://localhost:5199/lxp/course/learner/learnerprogress")
        );
        assert_eq!(
            config.fullscreen_apis,
            vec![FullscreenApi::Webkit, FullscreenApi::Standard]
        );
        assert_eq!(config.watch_time_interval_sec, 30.);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            PlayerConfiguration::from_json("{"),
            Err(ConfigurationError::Parse(_))
        ));
        assert!(matches!(
            PlayerConfiguration::from_json(r#"{"fullscreenApis": ["opera"]}"#),
            Err(ConfigurationError::Parse(_))
        ));
        assert!(matches!(
            PlayerConfiguration::from_json(r#"{"watchTimeIntervalSec": -5}"#),
            Err(ConfigurationError::InvalidValue { field: "watchTimeIntervalSec", .. })
        ));
        assert!(matches!(
            PlayerConfiguration::from_json(r#"{"fullscreenApis": []}"#),
            Err(ConfigurationError::InvalidValue { field: "fullscreenApis", .. })
        ));
    }
}
