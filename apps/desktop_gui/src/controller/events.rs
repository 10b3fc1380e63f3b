//! Backend-to-UI events and error modeling for the dashboard controller.

use client_core::{ClientError, Prediction, SampleCatalog};

pub enum UiEvent {
    Info(String),
    CatalogLoaded(SampleCatalog),
    CatalogFailed(UiError),
    AnalysisFinished {
        ticket_id: u64,
        result: Result<Prediction, ClientError>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Service,
    Payload,
    Configuration,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    CatalogLoad,
}

/// Alert text for a failure that leaves the page without a sample list.
pub fn describe_startup_failure(error: &UiError) -> String {
    match (error.context(), error.category()) {
        (UiErrorContext::BackendStartup, _) => {
            "Backend worker startup failure; verify the local app environment and relaunch."
                .to_string()
        }
        (_, UiErrorCategory::Transport) => {
            "Could not connect to the HeartGuard backend; check the network and relaunch."
                .to_string()
        }
        (_, UiErrorCategory::Service) => {
            "The HeartGuard backend rejected the sample list request; try again later.".to_string()
        }
        (_, UiErrorCategory::Payload) => {
            "The HeartGuard backend sent an unreadable sample list.".to_string()
        }
        _ => format!("Could not load heart sound samples: {}", error.message()),
    }
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_client_error(context: UiErrorContext, err: &ClientError) -> Self {
        let category = match err {
            ClientError::Transport(_) => UiErrorCategory::Transport,
            ClientError::Status { .. } => UiErrorCategory::Service,
            ClientError::MalformedBody(_) => UiErrorCategory::Payload,
            ClientError::InvalidBaseUrl { .. } => UiErrorCategory::Configuration,
        };
        Self {
            category,
            context,
            message: err.to_string(),
        }
    }

    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("timeout")
            || message_lower.contains("connection")
            || message_lower.contains("network")
            || message_lower.contains("disconnect")
        {
            UiErrorCategory::Transport
        } else if message_lower.contains("malformed") || message_lower.contains("decode") {
            UiErrorCategory::Payload
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startup_alert_wording_follows_context_then_category() {
        let cases = [
            (
                UiError::from_message(UiErrorContext::BackendStartup, "connection refused"),
                "Backend worker startup failure",
            ),
            (
                UiError::from_message(UiErrorContext::CatalogLoad, "connection refused"),
                "Could not connect to the HeartGuard backend",
            ),
            (
                UiError::from_client_error(
                    UiErrorContext::CatalogLoad,
                    &ClientError::Status {
                        status: 503,
                        detail: None,
                    },
                ),
                "rejected the sample list request",
            ),
            (
                UiError::from_client_error(
                    UiErrorContext::CatalogLoad,
                    &ClientError::MalformedBody("missing field `sounds`".into()),
                ),
                "unreadable sample list",
            ),
            (
                UiError::from_message(UiErrorContext::CatalogLoad, "worker exited"),
                "Could not load heart sound samples: worker exited",
            ),
        ];

        for (error, expected) in cases {
            let text = describe_startup_failure(&error);
            assert!(text.contains(expected), "{text:?} should contain {expected:?}");
        }
    }

    #[test]
    fn client_errors_map_to_categories() {
        let err = UiError::from_client_error(
            UiErrorContext::CatalogLoad,
            &ClientError::InvalidBaseUrl {
                url: "ftp://x".into(),
                reason: "unsupported scheme".into(),
            },
        );
        assert_eq!(err.category(), UiErrorCategory::Configuration);
        assert_eq!(err.context(), UiErrorContext::CatalogLoad);
        assert!(err.message().contains("ftp://x"));
    }
}
