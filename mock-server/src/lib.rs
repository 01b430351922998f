use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header::HOST, HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;

pub const PAGE_SIZE: usize = 20;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub icon: String,
    pub advertisements_count: u64,
    pub created_at: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Advertisement as the list endpoints render it, including the backend's
/// extra `expires_at` / `is_expired` keys.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Advertisement {
    pub id: i64,
    pub title: String,
    pub price: String,
    pub category: Category,
    pub author: User,
    pub status: String,
    pub location: String,
    pub is_featured: bool,
    pub views_count: u64,
    pub primary_image: Option<String>,
    pub images_count: u64,
    pub created_at: String,
    pub updated_at: String,
    pub expires_at: Option<String>,
    pub is_expired: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Page<T> {
    pub count: usize,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

#[derive(Deserialize)]
pub struct CreateAdvertisement {
    pub title: String,
    pub description: String,
    pub price: String,
    pub category: i64,
    #[serde(default)]
    pub location: String,
}

#[derive(Deserialize)]
pub struct ListQuery {
    pub page: Option<usize>,
    pub status: Option<String>,
    pub q: Option<String>,
}

#[derive(Clone, Debug)]
struct AdRecord {
    id: i64,
    title: String,
    description: String,
    price: String,
    category_id: i64,
    author_id: i64,
    status: String,
    location: String,
    is_featured: bool,
    views_count: u64,
    primary_image: Option<String>,
    images_count: u64,
    created_at: String,
    updated_at: String,
}

struct SeedAd {
    id: i64,
    title: &'static str,
    price: &'static str,
    category_id: i64,
    status: &'static str,
    is_featured: bool,
    image: Option<&'static str>,
    day: u32,
}

impl SeedAd {
    fn into_record(self) -> AdRecord {
        let timestamp = format!("2024-01-{:02}T12:00:00Z", self.day);
        AdRecord {
            id: self.id,
            title: self.title.to_string(),
            description: format!("{} in good condition", self.title),
            price: self.price.to_string(),
            category_id: self.category_id,
            author_id: 1,
            status: self.status.to_string(),
            location: "Москва".to_string(),
            is_featured: self.is_featured,
            views_count: self.id as u64 * 10,
            primary_image: self.image.map(str::to_string),
            images_count: u64::from(self.image.is_some()),
            created_at: timestamp.clone(),
            updated_at: timestamp,
        }
    }
}

pub struct Store {
    categories: Vec<Category>,
    users: Vec<User>,
    advertisements: Vec<AdRecord>,
    next_id: i64,
}

pub type Db = Arc<RwLock<Store>>;

type ApiError = (StatusCode, Json<Value>);

const SEED_TIME: &str = "2024-01-01T00:00:00Z";

impl Store {
    /// Store with the backend's default categories, one demo author and a
    /// handful of advertisements.
    pub fn seeded() -> Self {
        let categories = [
            (
                "Электроника",
                "electronics",
                "Телефоны, компьютеры, планшеты и другая электроника",
                "📱",
            ),
            (
                "Недвижимость",
                "real-estate",
                "Квартиры, дома, участки земли",
                "🏠",
            ),
            (
                "Транспорт",
                "transport",
                "Автомобили, мотоциклы, велосипеды",
                "🚗",
            ),
            ("Работа", "jobs", "Вакансии и предложения работы", "💼"),
            ("Услуги", "services", "Различные услуги", "🔧"),
            (
                "Одежда и обувь",
                "clothing",
                "Мужская, женская и детская одежда",
                "👕",
            ),
            (
                "Спорт и отдых",
                "sport",
                "Спортивный инвентарь, туризм",
                "⚽",
            ),
            (
                "Дом и сад",
                "home-garden",
                "Мебель, бытовая техника, садовые инструменты",
                "🏡",
            ),
            (
                "Книги и образование",
                "books-education",
                "Книги, учебники, курсы",
                "📚",
            ),
            ("Разное", "other", "Прочие товары и услуги", "📦"),
        ]
        .into_iter()
        .enumerate()
        .map(|(i, (name, slug, description, icon))| Category {
            id: i as i64 + 1,
            name: name.to_string(),
            slug: slug.to_string(),
            description: description.to_string(),
            icon: icon.to_string(),
            advertisements_count: 0,
            created_at: SEED_TIME.to_string(),
        })
        .collect();

        let users = vec![User {
            id: 1,
            username: "demo".to_string(),
            first_name: "Demo".to_string(),
            last_name: "Seller".to_string(),
            email: "demo@example.com".to_string(),
        }];

        let advertisements = [
            SeedAd {
                id: 1,
                title: "iPhone 13",
                price: "45000.00",
                category_id: 1,
                status: "active",
                is_featured: true,
                image: Some("https://cdn.example.com/iphone.jpg"),
                day: 2,
            },
            SeedAd {
                id: 2,
                title: "Велосипед Stels",
                price: "12500.00",
                category_id: 3,
                status: "active",
                is_featured: false,
                image: None,
                day: 3,
            },
            SeedAd {
                id: 3,
                title: "Диван угловой",
                price: "30000.00",
                category_id: 8,
                status: "active",
                is_featured: false,
                image: None,
                day: 4,
            },
            SeedAd {
                id: 4,
                title: "Ноутбук на модерации",
                price: "60000.00",
                category_id: 1,
                status: "pending",
                is_featured: false,
                image: None,
                day: 5,
            },
        ]
        .into_iter()
        .map(SeedAd::into_record)
        .collect();

        Self {
            categories,
            users,
            advertisements,
            next_id: 5,
        }
    }

    fn category(&self, id: i64) -> Option<Category> {
        let mut category = self.categories.iter().find(|c| c.id == id)?.clone();
        category.advertisements_count = self
            .advertisements
            .iter()
            .filter(|a| a.category_id == id && a.status == "active")
            .count() as u64;
        Some(category)
    }

    fn render(&self, record: &AdRecord) -> Option<Advertisement> {
        let category = self.category(record.category_id)?;
        let author = self.users.iter().find(|u| u.id == record.author_id)?.clone();
        Some(Advertisement {
            id: record.id,
            title: record.title.clone(),
            price: record.price.clone(),
            category,
            author,
            status: record.status.clone(),
            location: record.location.clone(),
            is_featured: record.is_featured,
            views_count: record.views_count,
            primary_image: record.primary_image.clone(),
            images_count: record.images_count,
            created_at: record.created_at.clone(),
            updated_at: record.updated_at.clone(),
            expires_at: None,
            is_expired: false,
        })
    }

    /// Records visible under the given `status` filter, newest first.
    fn visible(&self, status: Option<&str>) -> Vec<&AdRecord> {
        let status = status.unwrap_or("active");
        let mut records: Vec<&AdRecord> = self
            .advertisements
            .iter()
            .filter(|a| status == "all" || a.status == status)
            .collect();
        records.sort_by(|a, b| (&b.created_at, b.id).cmp(&(&a.created_at, a.id)));
        records
    }
}

pub fn app() -> Router {
    app_with_store(Store::seeded())
}

pub fn app_with_store(store: Store) -> Router {
    let db: Db = Arc::new(RwLock::new(store));
    let api = Router::new()
        .route("/advertisements/", get(list_advertisements).post(create_advertisement))
        .route("/advertisements/featured/", get(featured_advertisements))
        .route("/advertisements/search/", get(search_advertisements))
        .route("/categories/", get(list_categories))
        .with_state(db);
    Router::new().nest("/api", api)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock advertisements API listening");
    }
    axum::serve(listener, app()).await
}

fn detail(status: StatusCode, message: &str) -> ApiError {
    (status, Json(json!({ "detail": message })))
}

/// Slice `records` into one page, with absolute `next` / `previous` links.
fn paginate(
    store: &Store,
    records: Vec<&AdRecord>,
    page: Option<usize>,
    headers: &HeaderMap,
    path: &str,
) -> Result<Page<Advertisement>, ApiError> {
    let page = page.unwrap_or(1).max(1);
    let count = records.len();
    let start = match (page - 1).checked_mul(PAGE_SIZE) {
        Some(start) if page == 1 || start < count => start,
        _ => return Err(detail(StatusCode::NOT_FOUND, "Invalid page.")),
    };

    let host = headers
        .get(HOST)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("localhost");
    let link = |n: usize| format!("http://{host}/api{path}?page={n}");

    let results = records
        .into_iter()
        .skip(start)
        .take(PAGE_SIZE)
        .filter_map(|r| store.render(r))
        .collect();

    Ok(Page {
        count,
        next: (start + PAGE_SIZE < count).then(|| link(page + 1)),
        previous: (page > 1).then(|| link(page - 1)),
        results,
    })
}

async fn list_advertisements(
    State(db): State<Db>,
    Query(query): Query<ListQuery>,
    headers: HeaderMap,
) -> Result<Json<Page<Advertisement>>, ApiError> {
    let store = db.read().await;
    let records = store.visible(query.status.as_deref());
    paginate(&store, records, query.page, &headers, "/advertisements/").map(Json)
}

async fn featured_advertisements(
    State(db): State<Db>,
    Query(query): Query<ListQuery>,
    headers: HeaderMap,
) -> Result<Json<Page<Advertisement>>, ApiError> {
    let store = db.read().await;
    let records = store
        .visible(Some("active"))
        .into_iter()
        .filter(|a| a.is_featured)
        .collect();
    paginate(&store, records, query.page, &headers, "/advertisements/featured/").map(Json)
}

async fn search_advertisements(
    State(db): State<Db>,
    Query(query): Query<ListQuery>,
    headers: HeaderMap,
) -> Result<Json<Page<Advertisement>>, ApiError> {
    let needle = match query.q.as_deref() {
        Some(q) if !q.is_empty() => q.to_lowercase(),
        _ => {
            return Err(detail(
                StatusCode::BAD_REQUEST,
                "Query parameter \"q\" is required",
            ))
        }
    };

    let store = db.read().await;
    let records = store
        .visible(query.status.as_deref())
        .into_iter()
        .filter(|a| {
            let category = store
                .categories
                .iter()
                .find(|c| c.id == a.category_id)
                .map(|c| c.name.to_lowercase())
                .unwrap_or_default();
            a.title.to_lowercase().contains(&needle)
                || a.description.to_lowercase().contains(&needle)
                || a.location.to_lowercase().contains(&needle)
                || category.contains(&needle)
        })
        .collect();
    paginate(&store, records, query.page, &headers, "/advertisements/search/").map(Json)
}

async fn create_advertisement(
    State(db): State<Db>,
    Json(input): Json<CreateAdvertisement>,
) -> Result<(StatusCode, Json<Advertisement>), ApiError> {
    let mut errors = serde_json::Map::new();
    if input.title.trim().is_empty() {
        errors.insert("title".into(), json!(["This field may not be blank."]));
    }
    let price = match input.price.trim().parse::<f64>() {
        Ok(p) if p >= 0.0 => Some(format!("{p:.2}")),
        Ok(_) => {
            errors.insert(
                "price".into(),
                json!(["Ensure this value is greater than or equal to 0."]),
            );
            None
        }
        Err(_) => {
            errors.insert("price".into(), json!(["A valid number is required."]));
            None
        }
    };

    let mut store = db.write().await;
    if !store.categories.iter().any(|c| c.id == input.category) {
        errors.insert(
            "category".into(),
            json!([format!("Invalid pk \"{}\" - object does not exist.", input.category)]),
        );
    }
    if !errors.is_empty() {
        return Err((StatusCode::BAD_REQUEST, Json(Value::Object(errors))));
    }

    let now = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
    let record = AdRecord {
        id: store.next_id,
        title: input.title,
        description: input.description,
        price: price.unwrap_or_default(),
        category_id: input.category,
        author_id: 1,
        status: "pending".to_string(),
        location: input.location,
        is_featured: false,
        views_count: 0,
        primary_image: None,
        images_count: 0,
        created_at: now.clone(),
        updated_at: now,
    };
    store.next_id += 1;
    store.advertisements.push(record.clone());

    let rendered = store
        .render(&record)
        .ok_or_else(|| detail(StatusCode::INTERNAL_SERVER_ERROR, "render failed"))?;
    Ok((StatusCode::CREATED, Json(rendered)))
}

async fn list_categories(State(db): State<Db>) -> Json<Vec<Category>> {
    let store = db.read().await;
    let mut categories: Vec<Category> = store
        .categories
        .iter()
        .filter_map(|c| store.category(c.id))
        .collect();
    categories.sort_by(|a, b| a.name.cmp(&b.name));
    Json(categories)
}
