//! Where each series comes from.
//!
//! Precedence per indicator: `--<ind>-file` > `--<ind>-url` > `INFL_<IND>_URL`
//! (environment, `.env` honored) > the public BCB endpoint.

use std::path::PathBuf;

use crate::domain::Indicator;

const BCB_BASE_URL: &str = "https://api.bcb.gov.br/dados/serie";

/// A single series location: remote endpoint or local JSON file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeriesSource {
    Url(String),
    File(PathBuf),
}

impl SeriesSource {
    pub fn describe(&self) -> String {
        match self {
            SeriesSource::Url(url) => url.clone(),
            SeriesSource::File(path) => path.display().to_string(),
        }
    }
}

/// Public SGS endpoint for an indicator.
pub fn default_url(indicator: Indicator) -> String {
    format!(
        "{BCB_BASE_URL}/bcdata.sgs.{}/dados?formato=json",
        indicator.sgs_code()
    )
}

fn env_key(indicator: Indicator) -> &'static str {
    match indicator {
        Indicator::Ipca => "INFL_IPCA_URL",
        Indicator::Igpm => "INFL_IGPM_URL",
    }
}

/// Resolved sources for both series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sources {
    pub ipca: SeriesSource,
    pub igpm: SeriesSource,
}

/// Per-indicator overrides as given on the command line.
#[derive(Debug, Clone, Default)]
pub struct SourceOverrides {
    pub ipca_url: Option<String>,
    pub igpm_url: Option<String>,
    pub ipca_file: Option<PathBuf>,
    pub igpm_file: Option<PathBuf>,
}

impl Sources {
    /// Resolve sources from CLI overrides and the process environment.
    pub fn resolve(overrides: &SourceOverrides) -> Self {
        dotenvy::dotenv().ok();
        Self::resolve_with(overrides, |key| std::env::var(key).ok())
    }

    /// Resolve with an explicit environment lookup (used by tests).
    pub fn resolve_with(overrides: &SourceOverrides, env: impl Fn(&str) -> Option<String>) -> Self {
        let pick = |indicator: Indicator, file: &Option<PathBuf>, url: &Option<String>| {
            if let Some(path) = file {
                return SeriesSource::File(path.clone());
            }
            if let Some(url) = url {
                return SeriesSource::Url(url.clone());
            }
            match env(env_key(indicator)).filter(|v| !v.trim().is_empty()) {
                Some(url) => SeriesSource::Url(url),
                None => SeriesSource::Url(default_url(indicator)),
            }
        };

        Self {
            ipca: pick(Indicator::Ipca, &overrides.ipca_file, &overrides.ipca_url),
            igpm: pick(Indicator::Igpm, &overrides.igpm_file, &overrides.igpm_url),
        }
    }

    pub fn get(&self, indicator: Indicator) -> &SeriesSource {
        match indicator {
            Indicator::Ipca => &self.ipca,
            Indicator::Igpm => &self.igpm,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_bcb() {
        let sources = Sources::resolve_with(&SourceOverrides::default(), |_| None);
        assert_eq!(
            sources.ipca,
            SeriesSource::Url(
                "https://api.bcb.gov.br/dados/serie/bcdata.sgs.433/dados?formato=json".to_string()
            )
        );
        assert_eq!(
            sources.igpm,
            SeriesSource::Url(
                "https://api.bcb.gov.br/dados/serie/bcdata.sgs.189/dados?formato=json".to_string()
            )
        );
    }

    #[test]
    fn env_then_flag_then_file() {
        let env = |key: &str| (key == "INFL_IPCA_URL").then(|| "http://env/ipca".to_string());

        let sources = Sources::resolve_with(&SourceOverrides::default(), env);
        assert_eq!(sources.ipca, SeriesSource::Url("http://env/ipca".to_string()));
        assert_eq!(sources.igpm, SeriesSource::Url(default_url(Indicator::Igpm)));

        let overrides = SourceOverrides {
            ipca_url: Some("http://flag/ipca".to_string()),
            ..Default::default()
        };
        let sources = Sources::resolve_with(&overrides, env);
        assert_eq!(sources.ipca, SeriesSource::Url("http://flag/ipca".to_string()));

        let overrides = SourceOverrides {
            ipca_url: Some("http://flag/ipca".to_string()),
            ipca_file: Some(PathBuf::from("ipca.json")),
            ..Default::default()
        };
        let sources = Sources::resolve_with(&overrides, env);
        assert_eq!(sources.get(Indicator::Ipca), &SeriesSource::File(PathBuf::from("ipca.json")));
    }

    #[test]
    fn blank_env_value_is_ignored() {
        let sources = Sources::resolve_with(&SourceOverrides::default(), |_| Some("  ".to_string()));
        assert_eq!(sources.ipca, SeriesSource::Url(default_url(Indicator::Ipca)));
    }
}
