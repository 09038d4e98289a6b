//! Calendar feed source tests against a mock HTTP server.

use quorum_core::ports::CalendarSource;
use quorum_domain::QuorumError;
use quorum_infra::IcalFeedSource;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FEED: &str = "BEGIN:VCALENDAR\r\n\
BEGIN:VEVENT\r\n\
UID:tsc-series\r\n\
SUMMARY:Node.js TSC Meeting\r\n\
DTSTART;TZID=America/Los_Angeles:20250101T140000\r\n\
RRULE:FREQ=WEEKLY;BYDAY=WE\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

#[tokio::test]
async fn fetches_and_parses_feed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/calendar.ics"))
        .respond_with(ResponseTemplate::new(200).set_body_string(FEED))
        .mount(&server)
        .await;

    let source = IcalFeedSource::new().expect("source");
    let events =
        source.list_events(&format!("{}/calendar.ics", server.uri())).await.expect("events");

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].summary.as_deref(), Some("Node.js TSC Meeting"));
    assert_eq!(events[0].tzid.as_deref(), Some("America/Los_Angeles"));
    assert!(events[0].recurrence.is_some());
}

#[tokio::test]
async fn missing_feed_maps_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/calendar.ics"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let source = IcalFeedSource::new().expect("source");
    let err = source
        .list_events(&format!("{}/calendar.ics", server.uri()))
        .await
        .expect_err("should fail");
    assert!(matches!(err, QuorumError::NotFound(_)));
}
