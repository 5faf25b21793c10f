//! User-facing strings
//!
//! Every piece of text the client shows goes through [`Locale::text`], so the
//! login flow and the terminal UI agree on wording.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Display language
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "pt-BR", alias = "pt-br", alias = "pt")]
    PortugueseBr,
}

/// Catalog keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Text {
    WelcomeTitle,
    WelcomeSubtitle,
    UsernamePlaceholder,
    PasswordPlaceholder,
    SubmitButton,
    SigningIn,
    BiometricButton,
    MainTitle,
    BackButton,
    LoginScreenName,
    MainScreenName,
    ErrorTitle,
    MissingFields,
    ConnectionFailed,
    CredentialsRejected,
    BiometricFailed,
    BiometricUnavailable,
    BiometricPrompt,
    DismissHint,
    HintNext,
    HintSelect,
    HintQuit,
}

impl Locale {
    /// Look up a string in this locale
    pub fn text(self, key: Text) -> &'static str {
        match self {
            Locale::English => english(key),
            Locale::PortugueseBr => portuguese(key),
        }
    }

    /// Short tag used in configuration files and on the command line
    pub fn tag(self) -> &'static str {
        match self {
            Locale::English => "en",
            Locale::PortugueseBr => "pt-BR",
        }
    }
}

fn english(key: Text) -> &'static str {
    match key {
        Text::WelcomeTitle => "Welcome!",
        Text::WelcomeSubtitle => "Sign in to continue",
        Text::UsernamePlaceholder => "Username",
        Text::PasswordPlaceholder => "Password",
        Text::SubmitButton => "Sign in",
        Text::SigningIn => "Signing in",
        Text::BiometricButton => "Use device authentication",
        Text::MainTitle => "You are on the main screen",
        Text::BackButton => "Back",
        Text::LoginScreenName => "Login",
        Text::MainScreenName => "Main",
        Text::ErrorTitle => "Error",
        Text::MissingFields => "Username and password are required.",
        Text::ConnectionFailed => "Could not connect to the server. Check your connection.",
        Text::CredentialsRejected => "Login failed. Check your credentials.",
        Text::BiometricFailed => "Biometric authentication failed.",
        Text::BiometricUnavailable => "Biometric authentication is unavailable.",
        Text::BiometricPrompt => "Authenticate to continue",
        Text::DismissHint => "[Enter] OK",
        Text::HintNext => "Next",
        Text::HintSelect => "Select",
        Text::HintQuit => "Quit",
    }
}

fn portuguese(key: Text) -> &'static str {
    match key {
        Text::WelcomeTitle => "Bem-vindo!",
        Text::WelcomeSubtitle => "Faça login para continuar",
        Text::UsernamePlaceholder => "Usuário",
        Text::PasswordPlaceholder => "Senha",
        Text::SubmitButton => "Entrar",
        Text::SigningIn => "Entrando",
        Text::BiometricButton => "Usar Senha do celular",
        Text::MainTitle => "Você está na tela principal",
        Text::BackButton => "Voltar",
        Text::LoginScreenName => "Login",
        Text::MainScreenName => "Principal",
        Text::ErrorTitle => "Erro",
        Text::MissingFields => "Usuário e senha são obrigatórios.",
        Text::ConnectionFailed => "Não foi possível conectar ao servidor. Verifique sua conexão.",
        Text::CredentialsRejected => "Falha ao realizar login. Verifique suas credenciais.",
        Text::BiometricFailed => "Falha na autenticação biométrica.",
        Text::BiometricUnavailable => "Recurso de biometria não disponível.",
        Text::BiometricPrompt => "Autentique-se para continuar",
        Text::DismissHint => "[Enter] OK",
        Text::HintNext => "Próximo",
        Text::HintSelect => "Selecionar",
        Text::HintQuit => "Sair",
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "en" | "en-us" | "english" => Ok(Locale::English),
            "pt" | "pt-br" | "portuguese" => Ok(Locale::PortugueseBr),
            other => Err(format!("unsupported locale '{}' (expected en or pt-BR)", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_locale() {
        assert_eq!("en".parse::<Locale>().unwrap(), Locale::English);
        assert_eq!("pt_BR".parse::<Locale>().unwrap(), Locale::PortugueseBr);
        assert_eq!("PT-br".parse::<Locale>().unwrap(), Locale::PortugueseBr);
        assert!("fr".parse::<Locale>().is_err());
    }

    #[test]
    fn test_locale_serde_tags() {
        let json = serde_json::to_string(&Locale::PortugueseBr).unwrap();
        assert_eq!(json, "\"pt-BR\"");
        let parsed: Locale = serde_json::from_str("\"pt-br\"").unwrap();
        assert_eq!(parsed, Locale::PortugueseBr);
    }

    #[test]
    fn test_key_hints_are_translated() {
        for key in [Text::HintNext, Text::HintSelect, Text::HintQuit, Text::BackButton] {
            assert_ne!(Locale::English.text(key), Locale::PortugueseBr.text(key));
        }
        assert_eq!(Locale::PortugueseBr.text(Text::HintQuit), "Sair");
    }

    #[test]
    fn test_every_locale_has_distinct_error_texts() {
        for locale in [Locale::English, Locale::PortugueseBr] {
            let connection = locale.text(Text::ConnectionFailed);
            let rejected = locale.text(Text::CredentialsRejected);
            let biometric = locale.text(Text::BiometricFailed);
            assert_ne!(connection, rejected);
            assert_ne!(rejected, biometric);
        }
    }
}
