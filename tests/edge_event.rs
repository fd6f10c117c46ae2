use serde_json::{json, Value};
use spa_rewrite::edge::{handle_event, handle_event_json, EdgeEvent};
use spa_rewrite::{RewriteError, RewriteRules};

fn viewer_request(uri: &str) -> Value {
    json!({
        "version": "1.0",
        "context": { "eventType": "viewer-request" },
        "viewer": { "ip": "198.51.1.1" },
        "request": {
            "method": "GET",
            "uri": uri,
            "headers": { "host": { "value": "example.org" } }
        }
    })
}

#[test]
fn rewrites_every_documented_route() {
    let cases = [
        ("/", "/live/index.html"),
        ("/about", "/live/index.html"),
        ("/about/about2", "/live/index.html"),
        ("/image.png", "/live/image.png"),
        ("/assets/image.png", "/live/assets/image.png"),
        ("/feature/IMAP-123/DEMO", "/live/feature/IMAP-123/DEMO/index.html"),
        ("/feature/IMAP-123/DEMO/", "/live/feature/IMAP-123/DEMO/index.html"),
        (
            "/feature/IMAP-123/DEMO/about/about2",
            "/live/feature/IMAP-123/DEMO/index.html",
        ),
        (
            "/feature/IMAP-123/DEMO/image.png",
            "/live/feature/IMAP-123/DEMO/image.png",
        ),
        (
            "/feature/IMAP-123/DEMO/assets/image.png",
            "/live/feature/IMAP-123/DEMO/assets/image.png",
        ),
    ];

    let rules = RewriteRules::default();
    for (input, expected) in cases {
        let event: EdgeEvent = serde_json::from_value(viewer_request(input)).unwrap();
        let request = handle_event(event, &rules).unwrap();
        assert_eq!(request.uri, expected, "input: {input}");
        assert_eq!(request.fields["method"], "GET");
        assert_eq!(request.fields["headers"]["host"]["value"], "example.org");
    }
}

#[test]
fn json_in_json_out() {
    let input = viewer_request("/feature/IMAP-123/DEMO").to_string();
    let output = handle_event_json(&input, &RewriteRules::default()).unwrap();
    let request: Value = serde_json::from_str(&output).unwrap();

    assert_eq!(
        request,
        json!({
            "method": "GET",
            "uri": "/live/feature/IMAP-123/DEMO/index.html",
            "headers": { "host": { "value": "example.org" } }
        })
    );
}

#[test]
fn custom_marker_from_rules() {
    let rules = RewriteRules::new("/live/", "PREVIEW", "index.html").unwrap();
    let input = viewer_request("/pr-42/PREVIEW/settings").to_string();
    let output = handle_event_json(&input, &rules).unwrap();
    let request: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(request["uri"], "/live/pr-42/PREVIEW/index.html");
}

#[test]
fn rejects_relative_uri() {
    let input = viewer_request("image.png").to_string();
    let err = handle_event_json(&input, &RewriteRules::default()).unwrap_err();
    assert!(matches!(err, RewriteError::MissingLeadingSlash(_)));
}
