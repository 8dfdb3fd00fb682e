mod failing_gateway;
mod failing_transport;
mod scripted_transport;
mod stub_gateway;

pub use failing_gateway::FailingAnalyticsGateway;
pub use failing_transport::FailingTransport;
pub use scripted_transport::ScriptedTransport;
pub use stub_gateway::StubAnalyticsGateway;
