//! Launch-link parsing.
//!
//! A playground session can be opened from a link carrying query parameters:
//! `url` (backend base URL, percent-encoded), `token` (JWT for the backend),
//! and `preset` (name of the process template to select initially). They are
//! read once at startup and override the file configuration.

use url::Url;

/// Parameters extracted from a launch link.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchParams {
    pub backend_url: Option<String>,
    pub jwt_token: Option<String>,
    pub preset: Option<String>,
}

impl LaunchParams {
    /// Parses the recognised query parameters out of a launch link.
    /// Unknown parameters are ignored; percent-encoding is decoded.
    pub fn from_link(raw: &str) -> Result<Self, url::ParseError> {
        let parsed = Url::parse(raw)?;
        let mut params = Self::default();
        for (key, value) in parsed.query_pairs() {
            match key.as_ref() {
                "url" => params.backend_url = Some(value.into_owned()),
                "token" => params.jwt_token = Some(value.into_owned()),
                "preset" => params.preset = Some(value.into_owned()),
                _ => {}
            }
        }
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_three_parameters() {
        let params = LaunchParams::from_link(
            "https://play.example/?url=https%3A%2F%2Feva.example&token=t1&preset=helpful-ai",
        )
        .unwrap();
        assert_eq!(params.backend_url.as_deref(), Some("https://eva.example"));
        assert_eq!(params.jwt_token.as_deref(), Some("t1"));
        assert_eq!(params.preset.as_deref(), Some("helpful-ai"));
    }

    #[test]
    fn missing_parameters_stay_none() {
        let params = LaunchParams::from_link("https://play.example/").unwrap();
        assert_eq!(params, LaunchParams::default());
    }

    #[test]
    fn unknown_parameters_are_ignored() {
        let params =
            LaunchParams::from_link("https://play.example/?utm_source=mail&token=t2").unwrap();
        assert_eq!(params.jwt_token.as_deref(), Some("t2"));
        assert!(params.backend_url.is_none());
    }

    #[test]
    fn garbage_is_a_parse_error() {
        assert!(LaunchParams::from_link("not a url").is_err());
    }
}
