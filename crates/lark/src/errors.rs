use thiserror::Error;

#[non_exhaustive]
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("unsupported vendor: {0}")]
    UnsupportedVendor(String),

    #[error("unsupported model '{model}' for vendor {vendor}")]
    UnsupportedModel { vendor: String, model: String },

    #[error("{env_var} environment variable is not set")]
    Configuration { env_var: String },

    #[error("failed to initialize {vendor} chat model: {source:#}")]
    Initialization {
        vendor: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to generate response: {0:#}")]
    Generation(#[source] anyhow::Error),

    #[error("stream error: {0:#}")]
    Stream(#[source] anyhow::Error),

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl AgentError {
    pub fn configuration<S: Into<String>>(env_var: S) -> Self {
        AgentError::Configuration {
            env_var: env_var.into(),
        }
    }
}

pub type AgentResult<T> = Result<T, AgentError>;
