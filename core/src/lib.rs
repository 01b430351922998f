//! Client core for the advertisements marketplace API.
//!
//! # Overview
//! Fetches paginated advertisement listings and categories, creates
//! advertisements, and keeps the list screen's state in sync.
//!
//! # Design
//! - `AdsClient` is stateless and sans-IO: `build_*` produces an
//!   `HttpRequest`, `parse_*` consumes an `HttpResponse`. The FFI crate
//!   exposes exactly this layer to native hosts.
//! - `ApiService` pairs an `AdsClient` with a `Transport` and turns each
//!   operation into a single async call returning `Result<T, ApiError>`.
//! - `AdvertisementsViewModel` drives `ApiService` and publishes immutable
//!   `AdvertisementsState` snapshots, applying results through a
//!   `Dispatcher` so mutations happen on the UI context.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod client;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;
pub mod viewmodel;

pub use api::ApiService;
pub use client::AdsClient;
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use dispatch::{main_queue, Dispatcher, Job, MainLoop, MainQueue};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{Transport, UreqTransport};
pub use types::{Advertisement, Category, CreateAdvertisement, PaginatedResponse, User};
pub use viewmodel::{AdvertisementsState, AdvertisementsViewModel};
