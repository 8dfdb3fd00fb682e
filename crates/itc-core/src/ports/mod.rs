mod analytics_gateway;
mod http_transport;

pub use analytics_gateway::{AnalyticsError, AnalyticsGateway};
pub use http_transport::{HttpRequest, HttpTransport, TransportError};
