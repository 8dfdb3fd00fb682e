use itc_core::{HttpRequest, HttpTransport, TransportError};

pub struct FailingTransport {
    error: TransportError,
}

impl FailingTransport {
    pub fn connection_refused() -> Self {
        Self {
            error: TransportError::Connection {
                url: "https://itunesconnect.apple.com".to_string(),
                message: "connection refused".to_string(),
            },
        }
    }

    pub fn with_error(error: TransportError) -> Self {
        Self { error }
    }
}

impl HttpTransport for FailingTransport {
    fn request(&mut self, _request: HttpRequest) -> Result<Vec<u8>, TransportError> {
        Err(self.error.clone())
    }

    fn clear_cookies(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::ItcAnalyticsGateway;
    use itc_core::{AnalyticsError, AnalyticsGateway, AppId, Config, Credentials};

    #[test]
    fn returns_configured_error() {
        let mut transport = FailingTransport::with_error(TransportError::Status {
            url: "https://example.com".to_string(),
            status: 502,
        });

        let result = transport.request(HttpRequest::get("https://example.com"));

        assert!(matches!(result, Err(TransportError::Status { status: 502, .. })));
    }

    #[test]
    fn unreachable_portal_surfaces_as_transport_error() {
        let mut gateway = ItcAnalyticsGateway::new(
            FailingTransport::connection_refused(),
            Credentials::new("dev@example.com", "secret"),
            Config::default().endpoints().unwrap(),
        );

        let result = gateway.all_time(&AppId::parse("1").unwrap());

        assert!(matches!(
            result,
            Err(AnalyticsError::Transport(TransportError::Connection { .. }))
        ));
    }
}
