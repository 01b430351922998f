//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and either an expected parse result or an expected error kind. Comparing
//! parsed JSON (not raw strings) avoids false negatives from field ordering.

use ads_core::{
    Advertisement, AdsClient, ApiError, Category, CreateAdvertisement, HttpMethod, HttpRequest,
    HttpResponse,
};

const BASE_URL: &str = "https://turkobuv.ru/api";

fn client() -> AdsClient {
    AdsClient::new(BASE_URL)
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        other => panic!("unknown method: {other}"),
    }
}

fn simulated_response(case: &serde_json::Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        headers: Vec::new(),
        body: sim["body"].as_str().unwrap().to_string(),
    }
}

fn assert_request_line(name: &str, req: &HttpRequest, expected: &serde_json::Value) {
    assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
    let path = expected["path"].as_str().unwrap();
    assert_eq!(req.path, format!("{BASE_URL}{path}"), "{name}: path");
}

fn assert_error_kind(name: &str, err: ApiError, kind: &str) {
    match kind {
        "Deserialization" => assert!(
            matches!(err, ApiError::DeserializationError(_)),
            "{name}: expected DeserializationError, got {err:?}"
        ),
        "Http" => assert!(
            matches!(err, ApiError::HttpError { .. }),
            "{name}: expected HttpError, got {err:?}"
        ),
        other => panic!("{name}: unknown expected_error: {other}"),
    }
}

// ---------------------------------------------------------------------------
// List advertisements
// ---------------------------------------------------------------------------

#[test]
fn list_advertisements_test_vectors() {
    let raw = include_str!("../../test-vectors/list_advertisements.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();

        let req = c.build_list_advertisements();
        assert_request_line(name, &req, &case["expected_request"]);
        assert!(req.body.is_none(), "{name}: body should be None");

        let result = c.parse_list_advertisements(simulated_response(case));
        if let Some(kind) = case.get("expected_error") {
            assert_error_kind(name, result.unwrap_err(), kind.as_str().unwrap());
        } else {
            let expected: Vec<Advertisement> =
                serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(result.unwrap(), expected, "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// List categories
// ---------------------------------------------------------------------------

#[test]
fn list_categories_test_vectors() {
    let raw = include_str!("../../test-vectors/list_categories.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();

        let req = c.build_list_categories();
        assert_request_line(name, &req, &case["expected_request"]);
        assert!(req.body.is_none(), "{name}: body should be None");

        let result = c.parse_list_categories(simulated_response(case));
        if let Some(kind) = case.get("expected_error") {
            assert_error_kind(name, result.unwrap_err(), kind.as_str().unwrap());
        } else {
            let expected: Vec<Category> =
                serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(result.unwrap(), expected, "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Create advertisement
// ---------------------------------------------------------------------------

#[test]
fn create_advertisement_test_vectors() {
    let raw = include_str!("../../test-vectors/create_advertisement.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input: CreateAdvertisement = serde_json::from_value(case["input"].clone()).unwrap();
        let expected_req = &case["expected_request"];

        let req = c.build_create_advertisement(&input).unwrap();
        assert_request_line(name, &req, expected_req);

        let expected_headers: Vec<(String, String)> = expected_req["headers"]
            .as_array()
            .unwrap()
            .iter()
            .map(|h| {
                let arr = h.as_array().unwrap();
                (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
            })
            .collect();
        assert_eq!(req.headers, expected_headers, "{name}: headers");

        let req_body: serde_json::Value =
            serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(req_body, expected_req["body"], "{name}: body");

        let result = c.parse_create_advertisement(simulated_response(case));
        if let Some(kind) = case.get("expected_error") {
            assert_error_kind(name, result.unwrap_err(), kind.as_str().unwrap());
        } else {
            let expected: Advertisement =
                serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(result.unwrap(), expected, "{name}: parsed result");
        }
    }
}
