//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type but uses C-compatible representations:
//! `*mut c_char` instead of `String`, raw pointers instead of `Vec`, and
//! tagged enums with explicit discriminants. Nullable core fields
//! (`Option<String>`) become null pointers. Conversion and release helpers
//! live here to keep `lib.rs` focused on the `extern "C"` surface.

use std::ffi::{CString, c_void};
use std::os::raw::c_char;

use ads_core::{Advertisement, ApiError, Category, HttpMethod, User};

/// Opaque handle to an `AdsClient`. C callers receive a pointer to this
/// and pass it back into every FFI function.
pub struct FfiAdsClient {
    pub(crate) inner: ads_core::AdsClient,
}

/// Convert an owned string into a heap-allocated C string. Interior NUL
/// bytes are dropped rather than failing the whole conversion.
pub(crate) fn to_c_string(s: String) -> *mut c_char {
    CString::new(s)
        .unwrap_or_else(|e| {
            let mut bytes = e.into_vec();
            bytes.retain(|&b| b != 0);
            CString::new(bytes).unwrap_or_default()
        })
        .into_raw()
}

fn to_nullable_c_string(s: Option<String>) -> *mut c_char {
    s.map(to_c_string).unwrap_or(std::ptr::null_mut())
}

/// Release a C string produced by `to_c_string`. Null is ignored.
pub(crate) fn free_c_string(s: *mut c_char) {
    if !s.is_null() {
        drop(unsafe { CString::from_raw(s) });
    }
}

/// Move a `Vec` onto the heap as a raw pointer + length pair.
fn into_raw_parts<T>(items: Vec<T>) -> (*mut T, u32) {
    if items.is_empty() {
        return (std::ptr::null_mut(), 0);
    }
    let len = items.len() as u32;
    let mut boxed = items.into_boxed_slice();
    let ptr = boxed.as_mut_ptr();
    std::mem::forget(boxed);
    (ptr, len)
}

/// Reclaim a pointer + length pair produced by `into_raw_parts`.
unsafe fn from_raw_parts<T>(ptr: *mut T, len: u32) -> Vec<T> {
    if ptr.is_null() || len == 0 {
        return Vec::new();
    }
    let slice = std::ptr::slice_from_raw_parts_mut(ptr, len as usize);
    unsafe { Box::from_raw(slice) }.into_vec()
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// HTTP method as a C enum.
#[repr(C)]
pub enum FfiHttpMethod {
    Get = 0,
    Post = 1,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
            HttpMethod::Post => FfiHttpMethod::Post,
        }
    }
}

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// An HTTP request described as C-compatible plain data.
///
/// Built by `ads_build_*` functions. The host executes the request and
/// passes the response back through `ads_parse_*`.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: FfiHttpMethod,
    pub path: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
    pub body: *mut c_char,
}

impl FfiHttpRequest {
    /// Convert a core `HttpRequest` into a heap-allocated `FfiHttpRequest`.
    pub(crate) fn from_core(req: ads_core::HttpRequest) -> *mut Self {
        let headers: Vec<FfiHeader> = req
            .headers
            .into_iter()
            .map(|(k, v)| FfiHeader {
                key: to_c_string(k),
                value: to_c_string(v),
            })
            .collect();
        let (headers, headers_len) = into_raw_parts(headers);

        Box::into_raw(Box::new(FfiHttpRequest {
            method: req.method.into(),
            path: to_c_string(req.path),
            headers,
            headers_len,
            body: to_nullable_c_string(req.body),
        }))
    }

    /// Release every field. The struct itself is freed by the caller.
    pub(crate) fn free_fields(&self) {
        free_c_string(self.path);
        free_c_string(self.body);
        for h in unsafe { from_raw_parts(self.headers, self.headers_len) } {
            free_c_string(h.key);
            free_c_string(h.value);
        }
    }
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// An HTTP response described as C-compatible plain data.
///
/// The host constructs this on the stack after executing a request, then
/// passes a pointer to an `ads_parse_*` function. The FFI layer reads but
/// does not free these fields.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

// ---------------------------------------------------------------------------
// Domain types
// ---------------------------------------------------------------------------

#[repr(C)]
pub struct FfiCategory {
    pub id: i64,
    pub name: *mut c_char,
    pub slug: *mut c_char,
    pub description: *mut c_char,
    pub icon: *mut c_char,
    pub advertisements_count: u64,
    /// Null when the server did not send it.
    pub created_at: *mut c_char,
}

impl FfiCategory {
    pub(crate) fn from_core(c: Category) -> Self {
        FfiCategory {
            id: c.id,
            name: to_c_string(c.name),
            slug: to_c_string(c.slug),
            description: to_c_string(c.description),
            icon: to_c_string(c.icon),
            advertisements_count: c.advertisements_count,
            created_at: to_nullable_c_string(c.created_at),
        }
    }

    fn free_fields(&self) {
        free_c_string(self.name);
        free_c_string(self.slug);
        free_c_string(self.description);
        free_c_string(self.icon);
        free_c_string(self.created_at);
    }
}

#[repr(C)]
pub struct FfiUser {
    pub id: i64,
    pub username: *mut c_char,
    pub first_name: *mut c_char,
    pub last_name: *mut c_char,
    pub email: *mut c_char,
}

impl FfiUser {
    fn from_core(u: User) -> Self {
        FfiUser {
            id: u.id,
            username: to_c_string(u.username),
            first_name: to_c_string(u.first_name),
            last_name: to_c_string(u.last_name),
            email: to_c_string(u.email),
        }
    }

    fn free_fields(&self) {
        free_c_string(self.username);
        free_c_string(self.first_name);
        free_c_string(self.last_name);
        free_c_string(self.email);
    }
}

/// An advertisement exposed to C. `category` and `author` are embedded by
/// value and freed together with the advertisement.
#[repr(C)]
pub struct FfiAdvertisement {
    pub id: i64,
    pub title: *mut c_char,
    pub price: *mut c_char,
    pub category: FfiCategory,
    pub author: FfiUser,
    pub status: *mut c_char,
    pub location: *mut c_char,
    pub is_featured: bool,
    pub views_count: u64,
    /// Null when the advertisement has no primary image.
    pub primary_image: *mut c_char,
    pub images_count: u64,
    pub created_at: *mut c_char,
    pub updated_at: *mut c_char,
}

impl FfiAdvertisement {
    pub(crate) fn from_core(a: Advertisement) -> Self {
        FfiAdvertisement {
            id: a.id,
            title: to_c_string(a.title),
            price: to_c_string(a.price),
            category: FfiCategory::from_core(a.category),
            author: FfiUser::from_core(a.author),
            status: to_c_string(a.status),
            location: to_c_string(a.location),
            is_featured: a.is_featured,
            views_count: a.views_count,
            primary_image: to_nullable_c_string(a.primary_image),
            images_count: a.images_count,
            created_at: to_c_string(a.created_at),
            updated_at: to_c_string(a.updated_at),
        }
    }

    fn free_fields(&self) {
        free_c_string(self.title);
        free_c_string(self.price);
        self.category.free_fields();
        self.author.free_fields();
        free_c_string(self.status);
        free_c_string(self.location);
        free_c_string(self.primary_image);
        free_c_string(self.created_at);
        free_c_string(self.updated_at);
    }
}

#[repr(C)]
pub struct FfiAdvertisementList {
    pub items: *mut FfiAdvertisement,
    pub len: u32,
}

#[repr(C)]
pub struct FfiCategoryList {
    pub items: *mut FfiCategory,
    pub len: u32,
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Error codes returned in `FfiAdsResult`.
#[repr(C)]
#[derive(Debug, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    Transport = 1,
    Http = 2,
    Deserialization = 3,
    Serialization = 4,
    Panic = 5,
    NullArg = 6,
}

/// Tag that tells `ads_free_result` what `FfiAdsResult::data` points to.
#[repr(C)]
#[derive(Debug, PartialEq, Eq)]
pub enum FfiDataTag {
    None = 0,
    Advertisement = 1,
    AdvertisementList = 2,
    CategoryList = 3,
}

/// Result envelope for all parse operations.
///
/// On success `error_code` is `Ok`, `error_message` is null, and `data`
/// points to the parsed payload (tagged by `data_tag`).
/// On failure `error_code` describes the category, `error_message` is a
/// human-readable C string, and `data` is null.
#[repr(C)]
pub struct FfiAdsResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub http_status: u16,
    pub data_tag: FfiDataTag,
    pub data: *mut c_void,
}

impl FfiAdsResult {
    fn ok(data_tag: FfiDataTag, data: *mut c_void) -> *mut Self {
        Box::into_raw(Box::new(FfiAdsResult {
            error_code: FfiErrorCode::Ok,
            error_message: std::ptr::null_mut(),
            http_status: 0,
            data_tag,
            data,
        }))
    }

    fn err(error_code: FfiErrorCode, http_status: u16, msg: String) -> *mut Self {
        Box::into_raw(Box::new(FfiAdsResult {
            error_code,
            error_message: to_c_string(msg),
            http_status,
            data_tag: FfiDataTag::None,
            data: std::ptr::null_mut(),
        }))
    }

    /// Build a success result carrying a single `FfiAdvertisement`.
    pub(crate) fn ok_advertisement(ad: Advertisement) -> *mut Self {
        let ffi_ad = Box::new(FfiAdvertisement::from_core(ad));
        Self::ok(FfiDataTag::Advertisement, Box::into_raw(ffi_ad) as *mut c_void)
    }

    /// Build a success result carrying an `FfiAdvertisementList`.
    pub(crate) fn ok_advertisement_list(ads: Vec<Advertisement>) -> *mut Self {
        let items: Vec<FfiAdvertisement> =
            ads.into_iter().map(FfiAdvertisement::from_core).collect();
        let (items, len) = into_raw_parts(items);
        let list = Box::new(FfiAdvertisementList { items, len });
        Self::ok(FfiDataTag::AdvertisementList, Box::into_raw(list) as *mut c_void)
    }

    /// Build a success result carrying an `FfiCategoryList`.
    pub(crate) fn ok_category_list(categories: Vec<Category>) -> *mut Self {
        let items: Vec<FfiCategory> = categories.into_iter().map(FfiCategory::from_core).collect();
        let (items, len) = into_raw_parts(items);
        let list = Box::new(FfiCategoryList { items, len });
        Self::ok(FfiDataTag::CategoryList, Box::into_raw(list) as *mut c_void)
    }

    /// Build an error result from an `ApiError`.
    pub(crate) fn from_error(err: ApiError) -> *mut Self {
        let msg = err.to_string();
        match err {
            ApiError::TransportError(_) => Self::err(FfiErrorCode::Transport, 0, msg),
            ApiError::HttpError { status, .. } => Self::err(FfiErrorCode::Http, status, msg),
            ApiError::DeserializationError(_) => Self::err(FfiErrorCode::Deserialization, 0, msg),
            ApiError::SerializationError(_) => Self::err(FfiErrorCode::Serialization, 0, msg),
        }
    }

    /// Build an error result for a null argument.
    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::err(FfiErrorCode::NullArg, 0, format!("null argument: {name}"))
    }

    /// Build an error result for a caught panic.
    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::err(FfiErrorCode::Panic, 0, msg.to_string())
    }

    /// Release the payload and message. The struct itself is freed by the
    /// caller.
    pub(crate) fn free_fields(&self) {
        free_c_string(self.error_message);
        if self.data.is_null() {
            return;
        }
        match self.data_tag {
            FfiDataTag::Advertisement => {
                let ad = unsafe { Box::from_raw(self.data as *mut FfiAdvertisement) };
                ad.free_fields();
            }
            FfiDataTag::AdvertisementList => {
                let list = unsafe { Box::from_raw(self.data as *mut FfiAdvertisementList) };
                for ad in unsafe { from_raw_parts(list.items, list.len) } {
                    ad.free_fields();
                }
            }
            FfiDataTag::CategoryList => {
                let list = unsafe { Box::from_raw(self.data as *mut FfiCategoryList) };
                for category in unsafe { from_raw_parts(list.items, list.len) } {
                    category.free_fields();
                }
            }
            FfiDataTag::None => {}
        }
    }
}
