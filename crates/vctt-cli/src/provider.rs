//! LLM backend selected at runtime.

use crate::config::{Config, ProviderKind};
use vctt_domain::traits::LlmProvider;
use vctt_llm::{LlmError, MockProvider, OllamaProvider};

/// One of the supported providers behind a single type.
pub enum Provider {
    /// Offline provider; every prompt gets the same reply
    Mock(MockProvider),
    /// Local Ollama server
    Ollama(OllamaProvider),
}

impl Provider {
    /// Build the provider named in `config`.
    pub fn from_config(config: &Config) -> Self {
        match config.provider {
            ProviderKind::Mock => Provider::Mock(MockProvider::default()),
            ProviderKind::Ollama => Provider::Ollama(OllamaProvider::new(
                config.endpoint.clone(),
                config.orchestrator.model_name.clone(),
            )),
        }
    }
}

impl LlmProvider for Provider {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        match self {
            Provider::Mock(llm) => llm.generate(prompt),
            Provider::Ollama(llm) => llm.generate(prompt),
        }
    }

    fn generate_structured(&self, prompt: &str, schema: &str) -> Result<String, LlmError> {
        match self {
            Provider::Mock(llm) => llm.generate_structured(prompt, schema),
            Provider::Ollama(llm) => llm.generate_structured(prompt, schema),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_from_config() {
        let config = Config {
            provider: ProviderKind::Mock,
            ..Default::default()
        };
        let provider = Provider::from_config(&config);
        assert!(matches!(provider, Provider::Mock(_)));
        assert_eq!(provider.generate("anything").unwrap(), "Default mock response");
    }

    #[test]
    fn test_ollama_uses_model_name() {
        let mut config = Config::default();
        config.orchestrator.model_name = "mistral".to_string();

        match Provider::from_config(&config) {
            Provider::Ollama(llm) => assert_eq!(llm.model(), "mistral"),
            Provider::Mock(_) => panic!("Expected Ollama provider"),
        }
    }
}
