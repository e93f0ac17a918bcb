use std::sync::Arc;

use serde_json::json;
use stockdata_core::control::NewsSentimentRequest;
use stockdata_core::http::{HttpResponse, RecordingHttpClient};
use stockdata_core::{
    ProviderClient,
    ProviderConfig,
    ProviderError,
    ProviderNotice,
    StockControlPlane,
    Url,
};

fn control_with(http: Arc<RecordingHttpClient>) -> StockControlPlane {
    let url = Url::parse("https://provider.test/query").expect("valid url");
    StockControlPlane::new(ProviderClient::new(ProviderConfig::new(url, "demo"), http))
}

#[tokio::test]
async fn stock_price_exposes_quote_fields() {
    let http = Arc::new(RecordingHttpClient::ok_json(
        json!({ "Global Quote": { "05. price": "150.00", "06. volume": "1000000" } }).to_string(),
    ));
    let control = control_with(http.clone());

    let payload = control
        .stock_price("AAPL")
        .await
        .expect("quote should succeed");

    let quote = &payload["Global Quote"];
    assert_eq!(quote["05. price"], "150.00");
    assert_eq!(quote["06. volume"], "1000000");

    let requests = http.requests();
    let request = &requests[0];
    assert_eq!(request.query_value("function"), Some("GLOBAL_QUOTE"));
    assert_eq!(request.query_value("symbol"), Some("AAPL"));
}

#[tokio::test]
async fn empty_ticker_fails_before_any_request() {
    let http = Arc::new(RecordingHttpClient::ok_json("{}"));
    let control = control_with(http.clone());

    let overview = control.company_overview("").await.expect_err("empty ticker");
    let price = control.stock_price("   ").await.expect_err("blank ticker");
    let history = control.monthly_history("").await.expect_err("empty ticker");
    let sentiment = control
        .company_sentiment(&NewsSentimentRequest::default())
        .await
        .expect_err("no filters");

    for err in [overview, price, history, sentiment] {
        assert!(err.is_invalid_argument(), "unexpected error: {err}");
    }
    assert_eq!(http.request_count(), 0);
}

#[tokio::test]
async fn rate_limit_note_is_a_provider_error() {
    let http = Arc::new(RecordingHttpClient::ok_json(
        json!({
            "Note": "Thank you for using Alpha Vantage! Our standard API rate limit is 25 requests per day."
        })
        .to_string(),
    ));
    let control = control_with(http);

    let err = control
        .company_overview("IBM")
        .await
        .expect_err("note must not be returned as data");

    match err {
        ProviderError::Provider { notice, message } => {
            assert_eq!(notice, ProviderNotice::RateLimited);
            assert!(message.starts_with("Thank you for using Alpha Vantage!"));
        }
        other => panic!("expected provider error, got {other:?}"),
    }
}

#[tokio::test]
async fn invalid_symbol_error_message_is_a_provider_error() {
    let http = Arc::new(RecordingHttpClient::ok_json(
        json!({ "Error Message": "Invalid API call. Please retry or visit the documentation." })
            .to_string(),
    ));
    let control = control_with(http);

    let err = control
        .monthly_history("NOPE")
        .await
        .expect_err("error message must fail");

    assert!(matches!(
        err,
        ProviderError::Provider {
            notice: ProviderNotice::InvalidRequest,
            ..
        }
    ));
}

#[tokio::test]
async fn empty_global_quote_means_unknown_symbol() {
    let http = Arc::new(RecordingHttpClient::ok_json(r#"{"Global Quote": {}}"#));
    let control = control_with(http);

    let err = control
        .stock_price("ZZZZ")
        .await
        .expect_err("empty quote must fail");

    assert_eq!(
        err,
        ProviderError::Provider {
            notice: ProviderNotice::EmptyResponse,
            message: "no quote found for ZZZZ".to_string(),
        }
    );
}

#[tokio::test]
async fn upstream_status_never_succeeds() {
    for status in [400_u16, 401, 404, 429, 500, 502] {
        let http = Arc::new(RecordingHttpClient::replying(HttpResponse::with_status(
            status, "",
        )));
        let control = control_with(http);

        let err = control
            .company_overview("IBM")
            .await
            .expect_err("non-2xx must fail");
        assert_eq!(
            err,
            ProviderError::UpstreamStatus {
                status,
                body: String::new(),
            }
        );
    }
}

#[tokio::test]
async fn monthly_history_passes_series_through() {
    let body = json!({
        "Meta Data": {
            "1. Information": "Monthly Prices (open, high, low, close) and Volumes",
            "2. Symbol": "IBM",
            "3. Last Refreshed": "2024-05-31",
            "4. Time Zone": "US/Eastern"
        },
        "Monthly Time Series": {
            "2024-05-31": {
                "1. open": "166.5000",
                "2. high": "171.0000",
                "3. low": "162.6200",
                "4. close": "166.8500",
                "5. volume": "76370413"
            }
        }
    });
    let http = Arc::new(RecordingHttpClient::ok_json(body.to_string()));
    let control = control_with(http);

    let payload = control
        .monthly_history(" IBM ")
        .await
        .expect("history should succeed");

    assert_eq!(serde_json::Value::Object(payload), body);
}

#[tokio::test]
async fn sentiment_forwards_filters() {
    let http = Arc::new(RecordingHttpClient::ok_json(
        json!({ "items": "0", "feed": [] }).to_string(),
    ));
    let control = control_with(http.clone());

    let request = NewsSentimentRequest::for_tickers("AAPL")
        .with_time_range(Some("20240101T0930"), None::<String>)
        .with_limit(5);
    control
        .company_sentiment(&request)
        .await
        .expect("sentiment should succeed");

    let requests = http.requests();
    let sent = &requests[0];
    assert_eq!(sent.query_value("function"), Some("NEWS_SENTIMENT"));
    assert_eq!(sent.query_value("tickers"), Some("AAPL"));
    assert_eq!(sent.query_value("time_from"), Some("20240101T0930"));
    assert_eq!(sent.query_value("time_to"), None);
    assert_eq!(sent.query_value("limit"), Some("5"));
}
