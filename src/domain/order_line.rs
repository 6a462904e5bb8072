use bigdecimal::BigDecimal;

/// A single line of an order.
///
/// `id` is `None` until the line has been persisted once; the store assigns it
/// and it never changes afterwards. The price fields are independent: nothing
/// here derives `total_price` from the other two.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderLine {
    pub id: Option<i64>,
    pub quantity: Option<i32>,
    pub unity_price: Option<BigDecimal>,
    pub total_price: Option<BigDecimal>,
}

impl OrderLine {
    /// Overwrite every field that is present on `patch`, leaving the rest as
    /// stored. The id is never touched.
    pub fn merge(&mut self, patch: OrderLine) {
        if let Some(quantity) = patch.quantity {
            self.quantity = Some(quantity);
        }
        if let Some(unity_price) = patch.unity_price {
            self.unity_price = Some(unity_price);
        }
        if let Some(total_price) = patch.total_price {
            self.total_price = Some(total_price);
        }
    }
}
