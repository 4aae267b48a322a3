use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use axum_helpers::{
    UuidPath, ValidatedJson,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};

use crate::error::ItemResult;
use crate::models::{CreateItem, Item, PriceRange, UpdateItem};
use crate::repository::ItemRepository;
use crate::service::ItemService;

/// OpenAPI documentation for Items API
#[derive(OpenApi)]
#[openapi(
    paths(
        create_item,
        list_items,
        get_item,
        items_in_price_range,
        items_in_price_range_sorted,
        update_item,
        delete_item,
    ),
    components(
        schemas(Item, CreateItem, UpdateItem, PriceRange, DeleteConfirmation),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Items", description = "Item management endpoints (MongoDB)")
    )
)]
pub struct ApiDoc;

/// Confirmation payload returned by delete
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteConfirmation {
    pub message: String,
}

/// Create the items router with all HTTP endpoints
pub fn router<R: ItemRepository + 'static>(service: ItemService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", put(create_item).get(list_items))
        .route("/price-range", post(items_in_price_range))
        .route("/price-range-sort", post(items_in_price_range_sorted))
        .route("/{id}", get(get_item).put(update_item).delete(delete_item))
        .with_state(shared_service)
}

/// Create a new item
#[utoipa::path(
    put,
    path = "",
    tag = "Items",
    request_body = CreateItem,
    responses(
        (status = 201, description = "Item created successfully", body = Item),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateItem>,
) -> ItemResult<impl IntoResponse> {
    let item = service.create_item(input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// List all items
#[utoipa::path(
    get,
    path = "",
    tag = "Items",
    responses(
        (status = 200, description = "List of items", body = Vec<Item>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_items<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
) -> ItemResult<Json<Vec<Item>>> {
    let items = service.list_items().await?;
    Ok(Json(items))
}

/// Get an item by ID
///
/// A missing item is not an error here: the body is a JSON `null` with
/// status 200.
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Items",
    params(
        ("id" = Uuid, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Item, or null when not found", body = Option<Item>),
        (status = 400, response = BadRequestUuidResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    UuidPath(id): UuidPath,
) -> ItemResult<Json<Option<Item>>> {
    let item = service.find_item(id).await?;
    Ok(Json(item))
}

/// List items within an inclusive price range
#[utoipa::path(
    post,
    path = "/price-range",
    tag = "Items",
    request_body = PriceRange,
    responses(
        (status = 200, description = "Items with min <= price <= max", body = Vec<Item>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn items_in_price_range<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    ValidatedJson(range): ValidatedJson<PriceRange>,
) -> ItemResult<Json<Vec<Item>>> {
    let items = service.items_in_price_range(range, false).await?;
    Ok(Json(items))
}

/// List items within an inclusive price range, most expensive first
#[utoipa::path(
    post,
    path = "/price-range-sort",
    tag = "Items",
    request_body = PriceRange,
    responses(
        (status = 200, description = "Items with min <= price <= max, descending price", body = Vec<Item>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn items_in_price_range_sorted<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    ValidatedJson(range): ValidatedJson<PriceRange>,
) -> ItemResult<Json<Vec<Item>>> {
    let items = service.items_in_price_range(range, true).await?;
    Ok(Json(items))
}

/// Update an item
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Items",
    params(
        ("id" = Uuid, Path, description = "Item ID")
    ),
    request_body = UpdateItem,
    responses(
        (status = 200, description = "Item updated successfully", body = Item),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateItem>,
) -> ItemResult<Json<Item>> {
    let item = service.update_item(id, input).await?;
    Ok(Json(item))
}

/// Delete an item
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Items",
    params(
        ("id" = Uuid, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Item deleted successfully", body = DeleteConfirmation),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    UuidPath(id): UuidPath,
) -> ItemResult<Json<DeleteConfirmation>> {
    service.delete_item(id).await?;
    Ok(Json(DeleteConfirmation {
        message: format!("Item {id} deleted"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ItemError;
    use crate::models::Item;
    use crate::repository::MockItemRepository;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;
    use uuid::Uuid;

    fn app(mock_repo: MockItemRepository) -> Router {
        router(ItemService::new(mock_repo))
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn empty_request(method: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn fixture_item(name: &str, price: f64) -> Item {
        Item::new(CreateItem {
            name: name.to_string(),
            description: None,
            price,
            add_props: None,
        })
    }

    #[tokio::test]
    async fn test_create_item_returns_201_with_generated_id() {
        let mut mock_repo = MockItemRepository::new();
        mock_repo
            .expect_insert()
            .returning(|input| Ok(Item::new(input)));

        let response = app(mock_repo)
            .oneshot(json_request(
                "PUT",
                "/",
                json!({"name": "desk", "price": 120.5, "addProps": true}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["name"], "desk");
        assert_eq!(body["price"], 120.5);
        assert_eq!(body["addProps"], true);
        assert!(Uuid::parse_str(body["_id"].as_str().unwrap()).is_ok());
        assert!(body["createdAt"].is_string());
    }

    #[tokio::test]
    async fn test_create_item_missing_price_returns_400() {
        // Body never reaches the repository
        let mock_repo = MockItemRepository::new();

        let response = app(mock_repo)
            .oneshot(json_request("PUT", "/", json!({"name": "desk"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "JSON_EXTRACTION");
    }

    #[tokio::test]
    async fn test_create_item_empty_name_returns_400() {
        let mock_repo = MockItemRepository::new();

        let response = app(mock_repo)
            .oneshot(json_request("PUT", "/", json!({"name": "", "price": 1.0})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_list_items_returns_all() {
        let mut mock_repo = MockItemRepository::new();
        mock_repo.expect_find_all().returning(|| {
            Ok(vec![fixture_item("a", 1.0), fixture_item("b", 2.0)])
        });

        let response = app(mock_repo)
            .oneshot(empty_request("GET", "/"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_get_item_returns_item() {
        let item = fixture_item("lamp", 24.0);
        let id = item.id;
        let mut mock_repo = MockItemRepository::new();
        mock_repo
            .expect_find_by_id()
            .with(mockall::predicate::eq(id))
            .returning(move |_| Ok(Some(item.clone())));

        let response = app(mock_repo)
            .oneshot(empty_request("GET", &format!("/{id}")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["name"], "lamp");
        assert_eq!(body["_id"], id.to_string());
    }

    #[tokio::test]
    async fn test_get_item_missing_returns_200_with_null_body() {
        let mut mock_repo = MockItemRepository::new();
        mock_repo.expect_find_by_id().returning(|_| Ok(None));

        let response = app(mock_repo)
            .oneshot(empty_request("GET", &format!("/{}", Uuid::now_v7())))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert!(body.is_null());
    }

    #[tokio::test]
    async fn test_get_item_malformed_id_returns_400() {
        let mock_repo = MockItemRepository::new();

        let response = app(mock_repo)
            .oneshot(empty_request("GET", "/not-a-uuid"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "INVALID_ID");
    }

    #[tokio::test]
    async fn test_price_range_forwards_filter_without_sort() {
        let mut mock_repo = MockItemRepository::new();
        mock_repo
            .expect_find_by_price_range()
            .withf(|range, sort_desc| {
                range.min == 10.0 && range.max == 50.0 && !sort_desc
            })
            .returning(|_, _| Ok(vec![fixture_item("mid", 30.0)]));

        let response = app(mock_repo)
            .oneshot(json_request(
                "POST",
                "/price-range",
                json!({"min": 10.0, "max": 50.0}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["name"], "mid");
    }

    #[tokio::test]
    async fn test_price_range_sort_requests_descending_order() {
        let mut mock_repo = MockItemRepository::new();
        mock_repo
            .expect_find_by_price_range()
            .withf(|_, sort_desc| *sort_desc)
            .returning(|_, _| {
                Ok(vec![fixture_item("high", 40.0), fixture_item("low", 15.0)])
            });

        let response = app(mock_repo)
            .oneshot(json_request(
                "POST",
                "/price-range-sort",
                json!({"min": 10.0, "max": 50.0}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body[0]["price"], 40.0);
        assert_eq!(body[1]["price"], 15.0);
    }

    #[tokio::test]
    async fn test_price_range_missing_bound_returns_400() {
        let mock_repo = MockItemRepository::new();

        let response = app(mock_repo)
            .oneshot(json_request("POST", "/price-range", json!({"min": 10.0})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_item_returns_updated_document() {
        let item = fixture_item("lamp", 24.0);
        let id = item.id;
        let mut mock_repo = MockItemRepository::new();
        mock_repo.expect_update().returning(move |_, input| {
            let mut updated = item.clone();
            updated.apply_update(input);
            Ok(updated)
        });

        let response = app(mock_repo)
            .oneshot(json_request(
                "PUT",
                &format!("/{id}"),
                json!({"price": 30.0}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["price"], 30.0);
        assert_eq!(body["name"], "lamp");
    }

    #[tokio::test]
    async fn test_update_missing_item_returns_single_404() {
        let mut mock_repo = MockItemRepository::new();
        mock_repo
            .expect_update()
            .returning(|id, _| Err(ItemError::NotFound(id)));

        let response = app(mock_repo)
            .oneshot(json_request(
                "PUT",
                &format!("/{}", Uuid::now_v7()),
                json!({"price": 30.0}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["error"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_delete_item_returns_confirmation() {
        let id = Uuid::now_v7();
        let mut mock_repo = MockItemRepository::new();
        mock_repo
            .expect_delete()
            .with(mockall::predicate::eq(id))
            .returning(|_| Ok(()));

        let response = app(mock_repo)
            .oneshot(empty_request("DELETE", &format!("/{id}")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["message"], format!("Item {id} deleted"));
    }

    #[tokio::test]
    async fn test_delete_missing_item_returns_404() {
        let mut mock_repo = MockItemRepository::new();
        mock_repo
            .expect_delete()
            .returning(|id| Err(ItemError::NotFound(id)));

        let response = app(mock_repo)
            .oneshot(empty_request("DELETE", &format!("/{}", Uuid::now_v7())))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_repository_failure_returns_500_envelope() {
        let mut mock_repo = MockItemRepository::new();
        mock_repo
            .expect_find_all()
            .returning(|| Err(ItemError::Database("connection reset".to_string())));

        let response = app(mock_repo)
            .oneshot(empty_request("GET", "/"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "DATABASE_ERROR");
        assert_eq!(body["code"], 2001);
    }
}
