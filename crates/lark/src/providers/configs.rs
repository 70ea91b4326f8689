use super::factory::Vendor;

/// Static per-vendor description of how to resolve credentials and models
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VendorTemplate {
    /// Environment variable holding the API key (always required)
    pub api_key_env: &'static str,
    /// Environment variable holding the base URL, for vendors that need one
    pub base_url_env: Option<&'static str>,
    /// Fixed endpoint used when the vendor has no base URL variable
    pub default_host: Option<&'static str>,
    pub default_model: &'static str,
    /// Model names must start with one of these
    pub model_prefixes: &'static [&'static str],
}

impl VendorTemplate {
    pub fn accepts_model(&self, model: &str) -> bool {
        self.model_prefixes
            .iter()
            .any(|prefix| model.starts_with(prefix))
    }
}

// Unified enum to wrap different provider configurations
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderConfig {
    Qwen(QwenProviderConfig),
    Ark(ArkProviderConfig),
}

impl ProviderConfig {
    /// Build the vendor-specific configuration from resolved credentials
    pub fn build(vendor: Vendor, api_key: String, base_url: Option<String>, model: String) -> Self {
        match vendor {
            Vendor::Qwen => ProviderConfig::Qwen(QwenProviderConfig {
                host: base_url.unwrap_or_default(),
                api_key,
                model,
            }),
            Vendor::Ark => ProviderConfig::Ark(ArkProviderConfig {
                host: base_url
                    .or_else(|| vendor.template().default_host.map(String::from))
                    .unwrap_or_default(),
                api_key,
                model,
            }),
        }
    }

    pub fn vendor(&self) -> Vendor {
        match self {
            ProviderConfig::Qwen(_) => Vendor::Qwen,
            ProviderConfig::Ark(_) => Vendor::Ark,
        }
    }

    pub fn model(&self) -> &str {
        match self {
            ProviderConfig::Qwen(config) => &config.model,
            ProviderConfig::Ark(config) => &config.model,
        }
    }
}

// Define specific config structs for each provider
#[derive(Debug, Clone, PartialEq)]
pub struct QwenProviderConfig {
    pub host: String,
    pub api_key: String,
    pub model: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArkProviderConfig {
    pub host: String,
    pub api_key: String,
    pub model: String,
}
