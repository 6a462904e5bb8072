use utoipa::OpenApi;

use crate::handlers::order_lines::{ListOrderLinesResponse, OrderLineRequest, OrderLineResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::order_lines::create_order_line,
        crate::handlers::order_lines::update_order_line,
        crate::handlers::order_lines::partial_update_order_line,
        crate::handlers::order_lines::list_order_lines,
        crate::handlers::order_lines::get_order_line,
        crate::handlers::order_lines::delete_order_line,
    ),
    components(schemas(OrderLineRequest, OrderLineResponse, ListOrderLinesResponse)),
    tags((name = "order-lines", description = "Order line management"))
)]
pub struct ApiDoc;
