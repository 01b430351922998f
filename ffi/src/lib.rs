//! C-ABI wrapper around `ads-core`.
//!
//! # Overview
//! Exposes the sans-IO advertisements client through `extern "C"` functions
//! so a native mobile host can build requests, execute them with its own
//! HTTP stack, and hand the responses back for decoding, without linking to
//! Rust's async runtime or serde directly.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - Per-operation `build_*` / `parse_*` mirrors the core API 1:1.
//! - A single `FfiAdsResult` envelope with `FfiDataTag` + `void* data`
//!   conveys success payloads and errors uniformly.
//! - The C caller owns all returned pointers and must call the matching
//!   `ads_free_*` function to release them.

pub mod types;

use std::ffi::CStr;
use std::os::raw::c_char;
use std::panic::catch_unwind;

use ads_core::{ApiError, CreateAdvertisement, HttpResponse};

use types::*;

/// Copy a C string argument. Returns `None` for null; invalid UTF-8 is
/// replaced rather than rejected.
fn read_str(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    Some(unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned())
}

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a new `AdsClient` bound to `base_url`.
///
/// Returns null if `base_url` is null or if an internal panic occurs.
/// The caller must free the returned pointer with `ads_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn ads_client_new(base_url: *const c_char) -> *mut FfiAdsClient {
    catch_unwind(|| {
        let Some(url) = read_str(base_url) else {
            return std::ptr::null_mut();
        };
        let client = ads_core::AdsClient::new(&url);
        Box::into_raw(Box::new(FfiAdsClient { inner: client }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Create a new `AdsClient` bound to the production endpoint.
#[unsafe(no_mangle)]
pub extern "C" fn ads_client_new_default() -> *mut FfiAdsClient {
    catch_unwind(|| {
        let client = ads_core::AdsClient::from_config(&ads_core::ClientConfig::default());
        Box::into_raw(Box::new(FfiAdsClient { inner: client }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free an `AdsClient` created by `ads_client_new*`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn ads_client_free(client: *mut FfiAdsClient) {
    if !client.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(client) });
        });
    }
}

// ---------------------------------------------------------------------------
// Build request functions
// ---------------------------------------------------------------------------

/// Build `GET /advertisements/`.
///
/// Returns null if `client` is null.
/// The caller must free the returned pointer with `ads_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn ads_build_list_advertisements(
    client: *const FfiAdsClient,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        FfiHttpRequest::from_core(client.inner.build_list_advertisements())
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Build `GET /advertisements/featured/`. Parse with
/// `ads_parse_list_advertisements`.
#[unsafe(no_mangle)]
pub extern "C" fn ads_build_list_featured(client: *const FfiAdsClient) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        FfiHttpRequest::from_core(client.inner.build_list_featured())
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Build `GET /advertisements/search/?q=...`. Parse with
/// `ads_parse_list_advertisements`.
///
/// Returns null if `client` or `query` is null, or if encoding fails.
#[unsafe(no_mangle)]
pub extern "C" fn ads_build_search_advertisements(
    client: *const FfiAdsClient,
    query: *const c_char,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let Some(query) = read_str(query) else {
            return std::ptr::null_mut();
        };
        let client = unsafe { &*client };
        match client.inner.build_search_advertisements(&query) {
            Ok(req) => FfiHttpRequest::from_core(req),
            Err(_) => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Build `GET /categories/`.
#[unsafe(no_mangle)]
pub extern "C" fn ads_build_list_categories(client: *const FfiAdsClient) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        FfiHttpRequest::from_core(client.inner.build_list_categories())
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Build `POST /advertisements/` with a JSON body.
///
/// Returns null if any pointer argument is null, or if serialization fails.
#[unsafe(no_mangle)]
pub extern "C" fn ads_build_create_advertisement(
    client: *const FfiAdsClient,
    title: *const c_char,
    description: *const c_char,
    price: *const c_char,
    category_id: i64,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let (Some(title), Some(description), Some(price)) =
            (read_str(title), read_str(description), read_str(price))
        else {
            return std::ptr::null_mut();
        };
        let client = unsafe { &*client };
        let input = CreateAdvertisement {
            title,
            description,
            price,
            category_id,
        };
        match client.inner.build_create_advertisement(&input) {
            Ok(req) => FfiHttpRequest::from_core(req),
            Err(_) => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Parse response functions
// ---------------------------------------------------------------------------

/// Convert an `FfiHttpResponse` to a core `HttpResponse`. A null body is
/// treated as empty. The body bytes are taken as-is; a 2xx body that is not
/// UTF-8 fails with `DeserializationError`.
fn ffi_response_to_core(resp: &FfiHttpResponse) -> Result<HttpResponse, ApiError> {
    let body = if resp.body.is_null() {
        Vec::new()
    } else {
        unsafe { CStr::from_ptr(resp.body) }.to_bytes().to_vec()
    };
    HttpResponse::from_bytes(resp.status, Vec::new(), body)
}

/// Shared null checks and conversion for every `ads_parse_*` function.
fn parse_with<T>(
    client: *const FfiAdsClient,
    response: *const FfiHttpResponse,
    parse: impl FnOnce(&ads_core::AdsClient, HttpResponse) -> Result<T, ApiError>,
    ok: impl FnOnce(T) -> *mut FfiAdsResult,
) -> *mut FfiAdsResult {
    if client.is_null() {
        return FfiAdsResult::null_arg("client");
    }
    if response.is_null() {
        return FfiAdsResult::null_arg("response");
    }
    let client = unsafe { &*client };
    let resp = unsafe { &*response };
    match ffi_response_to_core(resp).and_then(|r| parse(&client.inner, r)) {
        Ok(value) => ok(value),
        Err(e) => FfiAdsResult::from_error(e),
    }
}

/// Parse the response to a list, featured or search request.
///
/// Returns a result with `data_tag = AdvertisementList` on success.
#[unsafe(no_mangle)]
pub extern "C" fn ads_parse_list_advertisements(
    client: *const FfiAdsClient,
    response: *const FfiHttpResponse,
) -> *mut FfiAdsResult {
    catch_unwind(|| {
        parse_with(
            client,
            response,
            |c, r| c.parse_list_advertisements(r),
            FfiAdsResult::ok_advertisement_list,
        )
    })
    .unwrap_or_else(|_| FfiAdsResult::panic("panic in ads_parse_list_advertisements"))
}

/// Parse the response to a list-categories request.
///
/// Returns a result with `data_tag = CategoryList` on success.
#[unsafe(no_mangle)]
pub extern "C" fn ads_parse_list_categories(
    client: *const FfiAdsClient,
    response: *const FfiHttpResponse,
) -> *mut FfiAdsResult {
    catch_unwind(|| {
        parse_with(
            client,
            response,
            |c, r| c.parse_list_categories(r),
            FfiAdsResult::ok_category_list,
        )
    })
    .unwrap_or_else(|_| FfiAdsResult::panic("panic in ads_parse_list_categories"))
}

/// Parse the response to a create-advertisement request.
///
/// Returns a result with `data_tag = Advertisement` on success (any 2xx).
#[unsafe(no_mangle)]
pub extern "C" fn ads_parse_create_advertisement(
    client: *const FfiAdsClient,
    response: *const FfiHttpResponse,
) -> *mut FfiAdsResult {
    catch_unwind(|| {
        parse_with(
            client,
            response,
            |c, r| c.parse_create_advertisement(r),
            FfiAdsResult::ok_advertisement,
        )
    })
    .unwrap_or_else(|_| FfiAdsResult::panic("panic in ads_parse_create_advertisement"))
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiHttpRequest` returned by any `ads_build_*` function.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn ads_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let req = unsafe { Box::from_raw(req) };
        req.free_fields();
    });
}

/// Free an `FfiAdsResult` returned by any `ads_parse_*` function.
/// Safe to call with null. Uses `data_tag` to determine what `data` points to.
#[unsafe(no_mangle)]
pub extern "C" fn ads_free_result(result: *mut FfiAdsResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        result.free_fields();
    });
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
