use thiserror::Error;

/// Boxed provider error, kept intact so callers see the SDK message verbatim
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum ExporterError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration error: {context}")]
    ConfigSource {
        context: String,
        #[source]
        source: BoxError,
    },

    #[error("Failed to {operation} in region {region}")]
    Fetch {
        region: String,
        operation: &'static str,
        #[source]
        source: BoxError,
    },

    #[error("Malformed quota in region {region}: missing {field}")]
    MalformedQuota { region: String, field: &'static str },

    #[error("Metrics error: {0}")]
    Metrics(#[from] prometheus::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExporterError {
    pub fn config_source(context: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::ConfigSource {
            context: context.into(),
            source: source.into(),
        }
    }

    pub fn fetch(
        region: impl Into<String>,
        operation: &'static str,
        source: impl Into<BoxError>,
    ) -> Self {
        Self::Fetch {
            region: region.into(),
            operation,
            source: source.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ExporterError>;
