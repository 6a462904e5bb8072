use bigdecimal::BigDecimal;
use diesel::prelude::*;

use crate::domain::order_line::OrderLine;
use crate::schema::order_lines;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = order_lines)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderLineRow {
    pub id: i64,
    pub quantity: Option<i32>,
    pub unity_price: Option<BigDecimal>,
    pub total_price: Option<BigDecimal>,
}

impl From<OrderLineRow> for OrderLine {
    fn from(row: OrderLineRow) -> Self {
        OrderLine {
            id: Some(row.id),
            quantity: row.quantity,
            unity_price: row.unity_price,
            total_price: row.total_price,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = order_lines)]
pub struct NewOrderLineRow {
    pub quantity: Option<i32>,
    pub unity_price: Option<BigDecimal>,
    pub total_price: Option<BigDecimal>,
}

/// Full-row update: a `None` field is written as NULL rather than skipped.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = order_lines)]
#[diesel(treat_none_as_null = true)]
pub struct OrderLineChangeset {
    pub quantity: Option<i32>,
    pub unity_price: Option<BigDecimal>,
    pub total_price: Option<BigDecimal>,
}
