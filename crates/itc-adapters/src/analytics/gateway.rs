use chrono::NaiveDate;
use itc_core::{
    AllTimeSummary, AnalyticsEndpoint, AnalyticsError, AnalyticsGateway, AppId, Credentials,
    EndpointConfig, Frequency, HttpRequest, HttpTransport, MeasureSeries, ReportWindow,
    RetentionCohort, ALL_TIME_MEASURES,
};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::dto::{
    AllTimeRequest, AllTimeResponse, MeasuresRequest, MeasuresResponse, RetentionRequest,
    RetentionResponse,
};
use crate::portal::Authenticator;

const JSON_CONTENT_TYPE: &str = "application/json";

/// Analytics API client over a cookie-backed transport.
///
/// Logs in to the portal before every call; the analytics host accepts the
/// session cookies the portal hands out.
pub struct ItcAnalyticsGateway<T: HttpTransport> {
    transport: T,
    authenticator: Authenticator,
    endpoints: EndpointConfig,
}

impl<T: HttpTransport> ItcAnalyticsGateway<T> {
    pub fn new(transport: T, credentials: Credentials, endpoints: EndpointConfig) -> Self {
        Self {
            transport,
            authenticator: Authenticator::new(credentials, endpoints.clone()),
            endpoints,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn authenticator(&self) -> &Authenticator {
        &self.authenticator
    }

    fn api_call<P, R>(
        &mut self,
        endpoint: AnalyticsEndpoint,
        payload: &P,
    ) -> Result<R, AnalyticsError>
    where
        P: Serialize,
        R: DeserializeOwned,
    {
        self.authenticator.login(&mut self.transport)?;

        let body = serde_json::to_vec(payload).map_err(|error| api_error(endpoint, error))?;
        let url = self.endpoints.analytics_url(endpoint);
        let response = self
            .transport
            .request(HttpRequest::post(url, body, JSON_CONTENT_TYPE))?;

        tracing::debug!(%endpoint, bytes = response.len(), "analytics response received");

        serde_json::from_slice(&response).map_err(|error| api_error(endpoint, error))
    }
}

impl<T: HttpTransport> AnalyticsGateway for ItcAnalyticsGateway<T> {
    fn measures(
        &mut self,
        app_id: &AppId,
        window: ReportWindow,
        measure_names: &[String],
    ) -> Result<Vec<MeasureSeries>, AnalyticsError> {
        let endpoint = AnalyticsEndpoint::Measures;
        let request = MeasuresRequest::new(app_id, window, measure_names);
        let response: MeasuresResponse = self.api_call(endpoint, &request)?;

        let mut series = response
            .results
            .into_iter()
            .map(|result| result.into_series())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|message| api_error(endpoint, message))?;

        order_by_request(&mut series, measure_names);

        tracing::debug!(series_count = series.len(), "fetched measures");
        Ok(series)
    }

    fn all_time(&mut self, app_id: &AppId) -> Result<AllTimeSummary, AnalyticsError> {
        let endpoint = AnalyticsEndpoint::AllTime;
        let request = AllTimeRequest {
            adam_id: vec![app_id.to_string()],
            measures: ALL_TIME_MEASURES.iter().map(|name| name.to_string()).collect(),
        };
        let response: AllTimeResponse = self.api_call(endpoint, &request)?;

        response
            .into_summary()
            .map_err(|message| api_error(endpoint, message))
    }

    fn retention(
        &mut self,
        app_id: &AppId,
        end_time: NaiveDate,
    ) -> Result<Vec<RetentionCohort>, AnalyticsError> {
        let endpoint = AnalyticsEndpoint::Retention;
        let request = RetentionRequest {
            adam_id: vec![app_id.to_string()],
            frequency: Frequency::Day,
            end_time: ReportWindow::ending(end_time).api_end_time(),
            dimension_filters: Vec::new(),
        };
        let response: RetentionResponse = self.api_call(endpoint, &request)?;

        let cohorts = response
            .results
            .into_iter()
            .map(|result| result.into_cohort())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|message| api_error(endpoint, message))?;

        tracing::debug!(cohort_count = cohorts.len(), "fetched retention cohorts");
        Ok(cohorts)
    }
}

/// Requested measures first, in request order; anything else the server
/// returned keeps its relative position after them.
fn order_by_request(series: &mut [MeasureSeries], measure_names: &[String]) {
    series.sort_by_key(|measure| {
        measure_names
            .iter()
            .position(|name| *name == measure.measure)
            .unwrap_or(measure_names.len())
    });
}

fn api_error(endpoint: AnalyticsEndpoint, error: impl ToString) -> AnalyticsError {
    AnalyticsError::Api {
        endpoint: endpoint.to_string(),
        message: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedTransport;
    use itc_core::{Config, TransportError};
    use serde_json::{json, Value};

    const LANDING_PAGE: &str =
        r#"<form name="appleConnectForm" method="post" action="/WebObjects/iTunesConnect.woa/wo/1.2">"#;

    fn logged_in_transport() -> ScriptedTransport {
        ScriptedTransport::new()
            .respond_with(LANDING_PAGE)
            .respond_with_cookies(
                "<html>ok</html>",
                &["myacinfo=token; Domain=.apple.com; Path=/"],
            )
    }

    fn gateway(transport: ScriptedTransport) -> ItcAnalyticsGateway<ScriptedTransport> {
        ItcAnalyticsGateway::new(
            transport,
            Credentials::new("dev@example.com", "secret"),
            Config::default().endpoints().unwrap(),
        )
    }

    fn app_id() -> AppId {
        AppId::parse("123456").unwrap()
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn default_measures() -> Vec<String> {
        itc_core::DEFAULT_MEASURES
            .iter()
            .map(|name| name.to_string())
            .collect()
    }

    fn json_body(request: &HttpRequest) -> Value {
        serde_json::from_slice(request.body.as_deref().unwrap()).unwrap()
    }

    #[test]
    fn measures_logs_in_then_posts_json() {
        let transport = logged_in_transport().respond_with(
            r#"{"results": [{"measure": "units", "data": [{"date": "2015-03-01T00:00:00Z", "value": 4}]}]}"#,
        );
        let mut gateway = gateway(transport);

        let series = gateway
            .measures(&app_id(), ReportWindow::ending(date(2015, 4, 1)), &default_measures())
            .unwrap();

        let requests = gateway.transport().requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(
            requests[2].url,
            "https://analytics.itunes.apple.com/analytics/api/v1/data/app/detail/measures"
        );
        assert_eq!(requests[2].content_type.as_deref(), Some("application/json"));
        assert_eq!(
            json_body(&requests[2]),
            json!({
                "adamId": ["123456"],
                "frequency": "MONTH",
                "measures": ["pageViewCount", "units", "iap", "sales", "activeDevices", "sessions"],
                "startTime": null,
                "endTime": "2015-04-01T00:00:00Z"
            })
        );
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].measure, "units");
    }

    #[test]
    fn api_call_carries_portal_session_cookie() {
        let transport = logged_in_transport().respond_with(r#"{"data": {"units": 1}}"#);
        let mut gateway = gateway(transport);

        gateway.all_time(&app_id()).unwrap();

        assert_eq!(
            gateway.transport().cookie_headers()[2].as_deref(),
            Some("myacinfo=token")
        );
    }

    #[test]
    fn every_call_logs_in_again() {
        let transport = logged_in_transport()
            .respond_with(r#"{"data": {"units": 1}}"#)
            .respond_with(LANDING_PAGE)
            .respond_with("<html>ok</html>")
            .respond_with(r#"{"data": {"units": 2}}"#);
        let mut gateway = gateway(transport);

        gateway.all_time(&app_id()).unwrap();
        gateway.all_time(&app_id()).unwrap();

        let login_pages = gateway
            .transport()
            .requests()
            .iter()
            .filter(|request| request.url.ends_with("/WebObjects/iTunesConnect.woa"))
            .count();
        assert_eq!(login_pages, 2);
    }

    #[test]
    fn measures_columns_follow_request_order() {
        let transport = logged_in_transport().respond_with(
            r#"{"results": [
                {"measure": "extra", "data": []},
                {"measure": "sessions", "data": []},
                {"measure": "sales", "data": []}
            ]}"#,
        );
        let mut gateway = gateway(transport);
        let requested = vec!["sales".to_string(), "sessions".to_string()];

        let series = gateway
            .measures(&app_id(), ReportWindow::ending(date(2015, 4, 1)), &requested)
            .unwrap();

        let names: Vec<&str> = series.iter().map(|measure| measure.measure.as_str()).collect();
        assert_eq!(names, vec!["sales", "sessions", "extra"]);
    }

    #[test]
    fn measures_without_results_is_an_api_error() {
        let transport = logged_in_transport().respond_with(r#"{"data": []}"#);
        let mut gateway = gateway(transport);

        let result = gateway.measures(
            &app_id(),
            ReportWindow::ending(date(2015, 4, 1)),
            &default_measures(),
        );

        assert!(matches!(
            result,
            Err(AnalyticsError::Api { ref endpoint, .. }) if endpoint == "app/detail/measures"
        ));
    }

    #[test]
    fn invalid_json_is_an_api_error() {
        let transport = logged_in_transport().respond_with("<html>Service Unavailable</html>");
        let mut gateway = gateway(transport);

        let result = gateway.all_time(&app_id());

        assert!(matches!(result, Err(AnalyticsError::Api { .. })));
    }

    #[test]
    fn all_time_requests_fixed_measures() {
        let transport =
            logged_in_transport().respond_with(r#"{"data": {"units": 5, "sales": 12.5}}"#);
        let mut gateway = gateway(transport);

        let summary = gateway.all_time(&app_id()).unwrap();

        let requests = gateway.transport().requests();
        assert_eq!(
            requests[2].url,
            "https://analytics.itunes.apple.com/analytics/api/v1/data/app/detail/all-time"
        );
        assert_eq!(
            json_body(&requests[2]),
            json!({
                "adamId": ["123456"],
                "measures": ["pageViewCount", "units", "sales", "sessions"]
            })
        );
        assert_eq!(summary.len(), 2);
        assert_eq!(summary.get("sales").unwrap().to_string(), "12.5");
    }

    #[test]
    fn retention_requests_daily_cohorts() {
        let transport = logged_in_transport().respond_with(
            r#"{"results": [{"appPurchase": "2015-03-01T00:00:00Z", "data": [{"value": 1000}, {"retentionPercentage": 45.6}]}]}"#,
        );
        let mut gateway = gateway(transport);

        let cohorts = gateway.retention(&app_id(), date(2015, 4, 29)).unwrap();

        let requests = gateway.transport().requests();
        assert_eq!(
            requests[2].url,
            "https://analytics.itunes.apple.com/analytics/api/v1/data/retention"
        );
        assert_eq!(
            json_body(&requests[2]),
            json!({
                "adamId": ["123456"],
                "frequency": "DAY",
                "endTime": "2015-04-29T00:00:00Z",
                "dimensionFilters": []
            })
        );
        assert_eq!(cohorts.len(), 1);
        assert_eq!(cohorts[0].initial_count, 1000);
    }

    #[test]
    fn authentication_failure_stops_before_api_call() {
        let transport = ScriptedTransport::new()
            .respond_with(LANDING_PAGE)
            .respond_with("Your Apple ID or password was entered incorrectly.");
        let mut gateway = gateway(transport);

        let result = gateway.all_time(&app_id());

        assert_eq!(result, Err(AnalyticsError::Authentication));
        assert_eq!(gateway.transport().requests().len(), 2);
    }

    #[test]
    fn transport_error_on_api_call_propagates() {
        let unavailable = TransportError::Status {
            url: "https://analytics.itunes.apple.com/analytics/api/v1/data/retention".to_string(),
            status: 503,
        };
        let transport = logged_in_transport().fail_with(unavailable.clone());
        let mut gateway = gateway(transport);

        let result = gateway.retention(&app_id(), date(2015, 4, 29));

        assert_eq!(result, Err(AnalyticsError::Transport(unavailable)));
    }
}
