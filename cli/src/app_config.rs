use std::path::PathBuf;

use serde::Serialize;
use talent_core::LOGIN_PATH;

use crate::{
    args::ConfigArgs,
    profile::{get_profile_token_path, Profile},
};

pub const DEFAULT_API_URL: &str = "http://localhost:3000";

#[derive(Debug, Serialize)]
pub struct AppConfig {
    pub profile_name: String,
    pub profile_path: String,
    pub profile_exists: bool,
    pub api_url: String,
    pub token_path: String,
    pub global_search: bool,
    pub open_browser: bool,
    /// Token given on the command line or in the environment
    #[serde(skip)]
    pub token_override: Option<String>,
}

impl AppConfig {
    pub fn from_args(
        args: ConfigArgs,
        profile_name: &str,
        profile_path: PathBuf,
        profile: Option<&Profile>,
    ) -> Self {
        let api_url = args
            .api_url
            .or_else(|| profile.and_then(|p| p.api_url.clone()))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let token_path = profile
            .and_then(|p| p.token_path.clone())
            .unwrap_or_else(|| {
                get_profile_token_path(profile_name)
                    .to_string_lossy()
                    .into_owned()
            });

        AppConfig {
            profile_name: profile_name.to_string(),
            profile_path: profile_path.to_string_lossy().into_owned(),
            profile_exists: profile.is_some(),
            api_url: api_url.trim_end_matches('/').to_string(),
            token_path,
            global_search: profile.is_some_and(|p| p.global_search),
            open_browser: profile.is_some_and(|p| p.open_browser),
            token_override: args.token.filter(|t| !t.trim().is_empty()),
        }
    }

    pub fn login_url(&self) -> String {
        format!("{}{}", self.api_url, LOGIN_PATH)
    }
}
