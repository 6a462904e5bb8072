use std::str::FromStr;

use actix_web::{http::header, web, HttpResponse};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::application::order_line_service::OrderLineService;
use crate::domain::errors::DomainError;
use crate::domain::order_line::OrderLine;
use crate::domain::pagination::{PageRequest, SortOrder};
use crate::domain::ports::OrderLineRepository;
use crate::errors::AppError;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct OrderLineRequest {
    pub id: Option<i64>,
    pub quantity: Option<i32>,
    /// Decimal price as a string to avoid floating-point issues, e.g. "9.99"
    pub unity_price: Option<String>,
    pub total_price: Option<String>,
}

impl OrderLineRequest {
    fn into_domain(self) -> Result<OrderLine, AppError> {
        Ok(OrderLine {
            id: self.id,
            quantity: self.quantity,
            unity_price: parse_price("unity_price", self.unity_price)?,
            total_price: parse_price("total_price", self.total_price)?,
        })
    }
}

fn parse_price(field: &str, value: Option<String>) -> Result<Option<BigDecimal>, AppError> {
    value
        .map(|v| {
            BigDecimal::from_str(&v)
                .map_err(|e| AppError::BadRequest(format!("Invalid {} '{}': {}", field, v, e)))
        })
        .transpose()
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderLineResponse {
    pub id: Option<i64>,
    pub quantity: Option<i32>,
    pub unity_price: Option<String>,
    pub total_price: Option<String>,
}

impl From<OrderLine> for OrderLineResponse {
    fn from(line: OrderLine) -> Self {
        Self {
            id: line.id,
            quantity: line.quantity,
            unity_price: line.unity_price.map(|p| p.to_string()),
            total_price: line.total_price.map(|p| p.to_string()),
        }
    }
}

// ── Pagination ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListOrderLinesParams {
    /// Page number (0-based). Defaults to 0.
    #[serde(default)]
    pub page: u32,
    /// Number of items per page. Defaults to 20, maximum 100.
    #[serde(default = "default_size")]
    pub size: u32,
    /// Sort order as `property,direction`, e.g. `quantity,desc`.
    pub sort: Option<String>,
}

fn default_size() -> u32 {
    20
}

impl ListOrderLinesParams {
    fn into_page_request(self) -> Result<PageRequest, AppError> {
        let mut request = PageRequest::of(self.page, self.size.clamp(1, 100));
        if let Some(sort) = self.sort {
            request = request.with_sort(SortOrder::from_str(&sort)?);
        }
        Ok(request)
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ListOrderLinesResponse {
    pub items: Vec<OrderLineResponse>,
    pub total: i64,
    pub page: u32,
    pub size: u32,
}

fn check_path_id(path_id: i64, body_id: Option<i64>) -> Result<(), AppError> {
    match body_id {
        None => Err(AppError::BadRequest("Invalid id: body has no id".to_string())),
        Some(id) if id != path_id => Err(AppError::BadRequest(format!(
            "Invalid id: body id {} does not match path id {}",
            id, path_id
        ))),
        Some(_) => Ok(()),
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /order-lines
#[utoipa::path(
    post,
    path = "/order-lines",
    request_body = OrderLineRequest,
    responses(
        (status = 201, description = "Order line created", body = OrderLineResponse),
        (status = 400, description = "Body already carries an id or has a malformed price"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "order-lines"
)]
pub async fn create_order_line<R: OrderLineRepository>(
    service: web::Data<OrderLineService<R>>,
    body: web::Json<OrderLineRequest>,
) -> Result<HttpResponse, AppError> {
    let line = body.into_inner().into_domain()?;
    if line.id.is_some() {
        return Err(AppError::BadRequest(
            "A new order line cannot already have an id".to_string(),
        ));
    }

    let saved = web::block(move || service.save(line)).await??;

    let mut response = HttpResponse::Created();
    if let Some(id) = saved.id {
        response.insert_header((header::LOCATION, format!("/order-lines/{}", id)));
    }
    Ok(response.json(OrderLineResponse::from(saved)))
}

/// PUT /order-lines/{id}
///
/// Replaces every field of an existing order line.
#[utoipa::path(
    put,
    path = "/order-lines/{id}",
    params(
        ("id" = i64, Path, description = "Order line id"),
    ),
    request_body = OrderLineRequest,
    responses(
        (status = 200, description = "Order line updated", body = OrderLineResponse),
        (status = 400, description = "Id missing, mismatched or unknown"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "order-lines"
)]
pub async fn update_order_line<R: OrderLineRepository>(
    service: web::Data<OrderLineService<R>>,
    path: web::Path<i64>,
    body: web::Json<OrderLineRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let line = body.into_inner().into_domain()?;
    check_path_id(id, line.id)?;

    let saved = web::block(move || {
        if service.find_one(id)?.is_none() {
            return Ok::<_, DomainError>(None);
        }
        service.save(line).map(Some)
    })
    .await??;

    match saved {
        Some(line) => Ok(HttpResponse::Ok().json(OrderLineResponse::from(line))),
        None => Err(AppError::BadRequest("Entity not found".to_string())),
    }
}

/// PATCH /order-lines/{id}
///
/// Only the fields present in the body are written.
#[utoipa::path(
    patch,
    path = "/order-lines/{id}",
    params(
        ("id" = i64, Path, description = "Order line id"),
    ),
    request_body = OrderLineRequest,
    responses(
        (status = 200, description = "Order line updated", body = OrderLineResponse),
        (status = 400, description = "Id missing or mismatched"),
        (status = 404, description = "Order line not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "order-lines"
)]
pub async fn partial_update_order_line<R: OrderLineRepository>(
    service: web::Data<OrderLineService<R>>,
    path: web::Path<i64>,
    body: web::Json<OrderLineRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let line = body.into_inner().into_domain()?;
    check_path_id(id, line.id)?;

    match web::block(move || service.partial_update(line)).await?? {
        Some(line) => Ok(HttpResponse::Ok().json(OrderLineResponse::from(line))),
        None => Err(AppError::NotFound),
    }
}

/// GET /order-lines
///
/// The total element count is also returned in the `X-Total-Count` header.
#[utoipa::path(
    get,
    path = "/order-lines",
    params(ListOrderLinesParams),
    responses(
        (status = 200, description = "Page of order lines", body = ListOrderLinesResponse),
        (status = 400, description = "Unknown sort property or direction"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "order-lines"
)]
pub async fn list_order_lines<R: OrderLineRepository>(
    service: web::Data<OrderLineService<R>>,
    query: web::Query<ListOrderLinesParams>,
) -> Result<HttpResponse, AppError> {
    let request = query.into_inner().into_page_request()?;

    let page = web::block(move || service.find_all(&request)).await??;
    let total = page.total_elements;

    Ok(HttpResponse::Ok()
        .insert_header(("X-Total-Count", total.to_string()))
        .json(ListOrderLinesResponse {
            page: page.page,
            size: page.size,
            total,
            items: page.content.into_iter().map(OrderLineResponse::from).collect(),
        }))
}

/// GET /order-lines/{id}
#[utoipa::path(
    get,
    path = "/order-lines/{id}",
    params(
        ("id" = i64, Path, description = "Order line id"),
    ),
    responses(
        (status = 200, description = "Order line found", body = OrderLineResponse),
        (status = 404, description = "Order line not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "order-lines"
)]
pub async fn get_order_line<R: OrderLineRepository>(
    service: web::Data<OrderLineService<R>>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    match web::block(move || service.find_one(id)).await?? {
        Some(line) => Ok(HttpResponse::Ok().json(OrderLineResponse::from(line))),
        None => Err(AppError::NotFound),
    }
}

/// DELETE /order-lines/{id}
#[utoipa::path(
    delete,
    path = "/order-lines/{id}",
    params(
        ("id" = i64, Path, description = "Order line id"),
    ),
    responses(
        (status = 204, description = "Order line deleted (or never existed)"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "order-lines"
)]
pub async fn delete_order_line<R: OrderLineRepository>(
    service: web::Data<OrderLineService<R>>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    web::block(move || service.delete(id)).await??;
    Ok(HttpResponse::NoContent().finish())
}
