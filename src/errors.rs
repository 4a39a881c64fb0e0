use std::fmt;

/// Which upstream provider a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upstream {
    Geocoding,
    Weather,
}

impl Upstream {
    /// Client-facing message for a 503 from this stage.
    pub fn detail(&self) -> &'static str {
        match self {
            Self::Geocoding => "Serviço de localização indisponível",
            Self::Weather => "Serviço de clima indisponível",
        }
    }
}

impl fmt::Display for Upstream {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Geocoding => write!(f, "geocoding"),
            Self::Weather => write!(f, "weather"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Cidade '{0}' não encontrada.")]
    NotFound(String),
    #[error("{upstream} upstream unavailable: {reason}")]
    UpstreamUnavailable { upstream: Upstream, reason: String },
}

impl GatewayError {
    pub fn upstream(upstream: Upstream, reason: impl fmt::Display) -> Self {
        Self::UpstreamUnavailable {
            upstream,
            reason: reason.to_string(),
        }
    }
}

impl warp::reject::Reject for GatewayError {}
