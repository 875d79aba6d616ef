use std::fmt;
use std::str::FromStr;

/// The known Provider Client variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    /// Primary variant.
    OpenAi,
    /// Secondary variant.
    MistralAi,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 2] = [ProviderKind::OpenAi, ProviderKind::MistralAi];

    /// Command token selecting this provider (`/openai`, `/mistralai`).
    pub fn command(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "openai",
            ProviderKind::MistralAi => "mistralai",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "OpenAI",
            ProviderKind::MistralAi => "MistralAI",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "gpt-3.5-turbo",
            ProviderKind::MistralAi => "mistral-large-latest",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "https://api.openai.com/v1",
            ProviderKind::MistralAi => "https://api.mistral.ai/v1",
        }
    }

    /// Prefix of this provider's environment variables (`OPENAI_API_KEY`, `MISTRAL_MODEL`, ...).
    pub fn env_prefix(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "OPENAI",
            ProviderKind::MistralAi => "MISTRAL",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" | "primary" => Ok(ProviderKind::OpenAi),
            "mistralai" | "mistral" | "secondary" => Ok(ProviderKind::MistralAi),
            other => Err(format!("unknown provider: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_accepts_commands_and_aliases() {
        assert_eq!("openai".parse::<ProviderKind>(), Ok(ProviderKind::OpenAi));
        assert_eq!("OpenAI".parse::<ProviderKind>(), Ok(ProviderKind::OpenAi));
        assert_eq!("primary".parse::<ProviderKind>(), Ok(ProviderKind::OpenAi));
        assert_eq!(" mistralai ".parse::<ProviderKind>(), Ok(ProviderKind::MistralAi));
        assert_eq!("secondary".parse::<ProviderKind>(), Ok(ProviderKind::MistralAi));
        assert!("anthropic".parse::<ProviderKind>().is_err());
    }

    #[test]
    fn test_command_round_trips_through_from_str() {
        for kind in ProviderKind::ALL {
            assert_eq!(kind.command().parse::<ProviderKind>(), Ok(kind));
        }
    }
}
