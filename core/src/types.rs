//! Domain DTOs for the advertisements API.
//!
//! # Design
//! These types mirror the backend's schema but are defined independently of
//! the mock-server crate; integration tests catch drift between the two.
//! Rust field names already match the snake_case wire keys, so the mapping
//! is the identity everywhere except `CreateAdvertisement::category_id`.
//! Tests pin the literal wire keys so a field rename cannot slip through.
//!
//! Required fields have no `#[serde(default)]`: a missing or mistyped key is
//! a decode error. `Option` fields accept both `null` and an absent key.

use serde::{Deserialize, Serialize};

/// Paginated envelope returned by list endpoints.
///
/// `next` / `previous` are carried through but never followed; `count` is
/// not cross-checked against `results.len()`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaginatedResponse<T> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

/// A single advertisement as returned by list and create endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Advertisement {
    pub id: i64,
    pub title: String,
    /// Kept as text so formatting such as `"1500.00"` survives untouched.
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
}

/// An advertisement category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub advertisements_count: u64,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// The author embedded in an advertisement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
}

/// Request payload for creating a new advertisement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateAdvertisement {
    pub title: String,
    pub description: String,
    pub price: String,
    #[serde(rename = "category")]
    pub category_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn advertisement_json() -> serde_json::Value {
        json!({
            "id": 7,
            "title": "iPhone 13",
            "price": "45000.00",
            "category": {
                "id": 1,
                "name": "Electronics",
                "slug": "electronics",
                "description": "Phones and laptops",
                "icon": "📱",
                "advertisements_count": 12,
                "created_at": "2024-01-01T00:00:00Z"
            },
            "author": {
                "id": 3,
                "username": "seller",
                "first_name": "Ivan",
                "last_name": "Petrov",
                "email": "seller@example.com"
            },
            "status": "active",
            "location": "Moscow",
            "is_featured": true,
            "views_count": 42,
            "primary_image": "https://cdn.example.com/a.jpg",
            "images_count": 3,
            "created_at": "2024-02-01T10:00:00Z",
            "updated_at": "2024-02-02T10:00:00Z"
        })
    }

    #[test]
    fn advertisement_decodes_snake_case_keys() {
        let ad: Advertisement = serde_json::from_value(advertisement_json()).unwrap();
        assert_eq!(ad.id, 7);
        assert_eq!(ad.price, "45000.00");
        assert!(ad.is_featured);
        assert_eq!(ad.views_count, 42);
        assert_eq!(ad.images_count, 3);
        assert_eq!(ad.primary_image.as_deref(), Some("https://cdn.example.com/a.jpg"));
        assert_eq!(ad.created_at, "2024-02-01T10:00:00Z");
        assert_eq!(ad.updated_at, "2024-02-02T10:00:00Z");
        assert_eq!(ad.category.slug, "electronics");
        assert_eq!(ad.author.username, "seller");
    }

    #[test]
    fn advertisement_reencodes_to_the_same_document() {
        let original = advertisement_json();
        let ad: Advertisement = serde_json::from_value(original.clone()).unwrap();
        assert_eq!(serde_json::to_value(&ad).unwrap(), original);
    }

    #[test]
    fn null_primary_image_decodes_to_none() {
        let mut doc = advertisement_json();
        doc["primary_image"] = serde_json::Value::Null;
        let ad: Advertisement = serde_json::from_value(doc).unwrap();
        assert!(ad.primary_image.is_none());

        let back = serde_json::to_value(&ad).unwrap();
        assert!(back["primary_image"].is_null());
    }

    #[test]
    fn missing_id_is_rejected() {
        let mut doc = advertisement_json();
        doc.as_object_mut().unwrap().remove("id");
        let result: Result<Advertisement, _> = serde_json::from_value(doc);
        assert!(result.is_err());
    }

    #[test]
    fn price_as_number_is_rejected() {
        let mut doc = advertisement_json();
        doc["price"] = json!(45000);
        let result: Result<Advertisement, _> = serde_json::from_value(doc);
        assert!(result.is_err());
    }

    #[test]
    fn camel_case_keys_are_not_accepted() {
        let mut doc = advertisement_json();
        let obj = doc.as_object_mut().unwrap();
        let featured = obj.remove("is_featured").unwrap();
        obj.insert("isFeatured".to_string(), featured);
        let result: Result<Advertisement, _> = serde_json::from_value(doc);
        assert!(result.is_err());
    }

    #[test]
    fn negative_views_count_is_rejected() {
        let mut doc = advertisement_json();
        doc["views_count"] = json!(-1);
        let result: Result<Advertisement, _> = serde_json::from_value(doc);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_backend_fields_are_ignored() {
        let mut doc = advertisement_json();
        doc["expires_at"] = json!("2024-03-01T10:00:00Z");
        doc["is_expired"] = json!(false);
        let ad: Advertisement = serde_json::from_value(doc).unwrap();
        assert_eq!(ad.id, 7);
    }

    #[test]
    fn envelope_accepts_null_links() {
        let doc = json!({
            "count": 1,
            "next": null,
            "previous": null,
            "results": [advertisement_json()]
        });
        let page: PaginatedResponse<Advertisement> = serde_json::from_value(doc).unwrap();
        assert_eq!(page.count, 1);
        assert!(page.next.is_none());
        assert!(page.previous.is_none());
        assert_eq!(page.results.len(), 1);
    }

    #[test]
    fn envelope_count_is_not_checked_against_results() {
        let doc = json!({
            "count": 250,
            "next": "https://turkobuv.ru/api/advertisements/?page=2",
            "previous": null,
            "results": []
        });
        let page: PaginatedResponse<Advertisement> = serde_json::from_value(doc).unwrap();
        assert_eq!(page.count, 250);
        assert!(page.results.is_empty());
    }

    #[test]
    fn envelope_without_results_is_rejected() {
        let doc = json!({"count": 0, "next": null, "previous": null});
        let result: Result<PaginatedResponse<Advertisement>, _> = serde_json::from_value(doc);
        assert!(result.is_err());
    }

    #[test]
    fn category_optional_fields_default() {
        let category: Category =
            serde_json::from_value(json!({"id": 2, "name": "Jobs", "slug": "jobs"})).unwrap();
        assert_eq!(category.description, "");
        assert_eq!(category.icon, "");
        assert_eq!(category.advertisements_count, 0);
        assert!(category.created_at.is_none());
    }

    #[test]
    fn category_without_slug_is_rejected() {
        let result: Result<Category, _> = serde_json::from_value(json!({"id": 2, "name": "Jobs"}));
        assert!(result.is_err());
    }

    #[test]
    fn user_without_username_is_rejected() {
        let result: Result<User, _> = serde_json::from_value(json!({"id": 2}));
        assert!(result.is_err());
    }

    #[test]
    fn create_advertisement_maps_category_id_to_category() {
        let input = CreateAdvertisement {
            title: "Bike".to_string(),
            description: "Barely used".to_string(),
            price: "9990.00".to_string(),
            category_id: 3,
        };
        let body = serde_json::to_value(&input).unwrap();
        assert_eq!(
            body,
            json!({
                "title": "Bike",
                "description": "Barely used",
                "price": "9990.00",
                "category": 3
            })
        );
        assert!(body.get("category_id").is_none());
    }
}
