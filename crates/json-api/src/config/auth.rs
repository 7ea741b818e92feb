//! Auth Config

use clap::Args;

/// API token verification settings.
#[derive(Args)]
pub struct AuthConfig {
    /// Server-side pepper mixed into every API token hash
    #[arg(
        long = "auth-token-pepper",
        env = "AUTH_TOKEN_PEPPER",
        hide_env_values = true,
        value_parser = clap::builder::NonEmptyStringValueParser::new()
    )]
    pub token_pepper: String,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token_pepper", &"**redacted**")
            .finish()
    }
}
