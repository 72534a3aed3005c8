use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    PositiveIdPath, ValidatedJson,
    errors::responses::{
        BadRequestIdResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::{IntoParams, OpenApi};

use crate::error::{CatalogError, CatalogResult};
use crate::models::{
    CatalogBrand, CatalogFilter, CatalogItem, CatalogType, CreateCatalogItem, PageRequest,
    PaginatedItems, UpdateCatalogItem, default_page_size,
};
use crate::repository::CatalogRepository;
use crate::service::CatalogService;

pub const TAG: &str = "catalog";

/// OpenAPI documentation for the Catalog API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_items,
        get_items_by_ids,
        get_item,
        get_items_by_name,
        get_items_with_semantic_relevance,
        get_items_by_type_and_brand,
        get_items_by_brand,
        get_item_picture,
        list_brands,
        list_types,
        create_item,
        update_item,
        delete_item,
    ),
    components(
        schemas(
            CatalogItem,
            CatalogBrand,
            CatalogType,
            CreateCatalogItem,
            UpdateCatalogItem,
            PaginatedItems
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestIdResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Catalog item management endpoints")
    )
)]
pub struct ApiDoc;

/// Query parameters for the main item listing
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ListItemsQuery {
    /// Zero-based page index
    #[serde(default)]
    pub page_index: u64,
    /// Items per page
    #[serde(default = "default_page_size")]
    pub page_size: u64,
    /// Case-insensitive name prefix
    pub name: Option<String>,
    /// Restrict to a catalog type
    pub type_id: Option<i32>,
    /// Restrict to a catalog brand
    pub brand_id: Option<i32>,
}

impl ListItemsQuery {
    fn split(self) -> (CatalogFilter, PageRequest) {
        (
            CatalogFilter {
                name: self.name,
                type_id: self.type_id,
                brand_id: self.brand_id,
            },
            PageRequest {
                page_index: self.page_index,
                page_size: self.page_size,
            },
        )
    }
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct IdsQuery {
    /// Comma-separated item ids, e.g. `1,2,3`
    pub ids: String,
}

/// Create the catalog router with all HTTP endpoints
pub fn router<R: CatalogRepository + 'static>(service: CatalogService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/items", get(list_items).post(create_item))
        .route("/items/by", get(get_items_by_ids))
        .route("/items/by/{name}", get(get_items_by_name))
        .route(
            "/items/withsemanticrelevance/{text}",
            get(get_items_with_semantic_relevance),
        )
        .route(
            "/items/type/{type_id}/brand/{brand_id}",
            get(get_items_by_type_and_brand),
        )
        .route("/items/type/all/brand/{brand_id}", get(get_items_by_brand))
        .route(
            "/items/{id}",
            get(get_item).put(update_item).delete(delete_item),
        )
        .route("/items/{id}/pic", get(get_item_picture))
        .route("/catalogbrands", get(list_brands))
        .route("/catalogtypes", get(list_types))
        .with_state(shared_service)
}

/// List catalog items with optional filters
#[utoipa::path(
    get,
    path = "/items",
    tag = TAG,
    params(ListItemsQuery),
    responses(
        (status = 200, description = "One page of catalog items", body = PaginatedItems),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_items<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    Query(query): Query<ListItemsQuery>,
) -> CatalogResult<Json<PaginatedItems>> {
    let (filter, page) = query.split();
    let items = service.get_items(filter, page).await?;
    Ok(Json(items))
}

/// Get catalog items by their ids
#[utoipa::path(
    get,
    path = "/items/by",
    tag = TAG,
    params(IdsQuery),
    responses(
        (status = 200, description = "Items matching the given ids", body = Vec<CatalogItem>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_items_by_ids<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    Query(query): Query<IdsQuery>,
) -> CatalogResult<Json<Vec<CatalogItem>>> {
    let ids: Vec<i64> = query
        .ids
        .split(',')
        .map(|id| id.trim().parse::<i64>())
        .collect::<Result<_, _>>()
        .map_err(|_| {
            CatalogError::Validation(
                "ids value invalid. Must be comma-separated list of numbers".to_string(),
            )
        })?;

    let items = service.get_items_by_ids(&ids).await?;
    Ok(Json(items))
}

/// Get a catalog item by id
#[utoipa::path(
    get,
    path = "/items/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Catalog item id")
    ),
    responses(
        (status = 200, description = "Catalog item found", body = CatalogItem),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_item<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    PositiveIdPath(id): PositiveIdPath,
) -> CatalogResult<Json<CatalogItem>> {
    let item = service.get_item(id).await?;
    Ok(Json(item))
}

/// List catalog items whose name starts with the given prefix
#[utoipa::path(
    get,
    path = "/items/by/{name}",
    tag = TAG,
    params(
        ("name" = String, Path, description = "Name prefix"),
        PageRequest
    ),
    responses(
        (status = 200, description = "One page of matching items", body = PaginatedItems),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_items_by_name<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    Path(name): Path<String>,
    Query(page): Query<PageRequest>,
) -> CatalogResult<Json<PaginatedItems>> {
    let items = service.get_items_by_name(&name, page).await?;
    Ok(Json(items))
}

/// List catalog items by semantic relevance to free text
#[utoipa::path(
    get,
    path = "/items/withsemanticrelevance/{text}",
    tag = TAG,
    params(
        ("text" = String, Path, description = "Free text to search for"),
        PageRequest
    ),
    responses(
        (status = 200, description = "One page of items ordered by relevance", body = PaginatedItems),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_items_with_semantic_relevance<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    Path(text): Path<String>,
    Query(page): Query<PageRequest>,
) -> CatalogResult<Json<PaginatedItems>> {
    let items = service
        .get_items_with_semantic_relevance(&text, page)
        .await?;
    Ok(Json(items))
}

/// List catalog items for a type and brand
#[utoipa::path(
    get,
    path = "/items/type/{type_id}/brand/{brand_id}",
    tag = TAG,
    params(
        ("type_id" = i32, Path, description = "Catalog type id"),
        ("brand_id" = i32, Path, description = "Catalog brand id"),
        PageRequest
    ),
    responses(
        (status = 200, description = "One page of matching items", body = PaginatedItems),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_items_by_type_and_brand<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    Path((type_id, brand_id)): Path<(i32, i32)>,
    Query(page): Query<PageRequest>,
) -> CatalogResult<Json<PaginatedItems>> {
    let items = service
        .get_items_by_type_and_brand(Some(type_id), Some(brand_id), page)
        .await?;
    Ok(Json(items))
}

/// List catalog items for a brand across all types
#[utoipa::path(
    get,
    path = "/items/type/all/brand/{brand_id}",
    tag = TAG,
    params(
        ("brand_id" = i32, Path, description = "Catalog brand id"),
        PageRequest
    ),
    responses(
        (status = 200, description = "One page of matching items", body = PaginatedItems),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_items_by_brand<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    Path(brand_id): Path<i32>,
    Query(page): Query<PageRequest>,
) -> CatalogResult<Json<PaginatedItems>> {
    let items = service
        .get_items_by_type_and_brand(None, Some(brand_id), page)
        .await?;
    Ok(Json(items))
}

/// Get a catalog item's picture
#[utoipa::path(
    get,
    path = "/items/{id}/pic",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Catalog item id")
    ),
    responses(
        (status = 200, description = "Picture bytes with image content type"),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_item_picture<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    PositiveIdPath(id): PositiveIdPath,
) -> CatalogResult<impl IntoResponse> {
    let (bytes, mime) = service.get_item_picture(id).await?;
    Ok(([(header::CONTENT_TYPE, mime)], bytes))
}

/// List all catalog brands
#[utoipa::path(
    get,
    path = "/catalogbrands",
    tag = TAG,
    responses(
        (status = 200, description = "All catalog brands", body = Vec<CatalogBrand>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_brands<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
) -> CatalogResult<Json<Vec<CatalogBrand>>> {
    let brands = service.get_brands().await?;
    Ok(Json(brands))
}

/// List all catalog types
#[utoipa::path(
    get,
    path = "/catalogtypes",
    tag = TAG,
    responses(
        (status = 200, description = "All catalog types", body = Vec<CatalogType>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_types<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
) -> CatalogResult<Json<Vec<CatalogType>>> {
    let types = service.get_types().await?;
    Ok(Json(types))
}

/// Create a catalog item
#[utoipa::path(
    post,
    path = "/items",
    tag = TAG,
    request_body = CreateCatalogItem,
    responses(
        (status = 201, description = "Catalog item created", body = CatalogItem),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_item<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateCatalogItem>,
) -> CatalogResult<impl IntoResponse> {
    let item = service.create_item(input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// Update a catalog item
#[utoipa::path(
    put,
    path = "/items/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Catalog item id")
    ),
    request_body = UpdateCatalogItem,
    responses(
        (status = 200, description = "Catalog item updated", body = CatalogItem),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_item<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    PositiveIdPath(id): PositiveIdPath,
    ValidatedJson(input): ValidatedJson<UpdateCatalogItem>,
) -> CatalogResult<Json<CatalogItem>> {
    let item = service.update_item(id, input).await?;
    Ok(Json(item))
}

/// Delete a catalog item
#[utoipa::path(
    delete,
    path = "/items/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Catalog item id")
    ),
    responses(
        (status = 204, description = "Catalog item deleted"),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_item<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    PositiveIdPath(id): PositiveIdPath,
) -> CatalogResult<impl IntoResponse> {
    service.delete_item(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
