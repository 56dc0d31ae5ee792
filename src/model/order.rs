use serde::{Deserialize, Serialize};

use crate::model::{Id, StatusField};

pub const TERMINAL_ORDER_STATUSES: &[&str] = &["Delivered", "Completed", "Cancelled"];

/// Order as the dashboards read it from list and queue endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Id,
    pub status: StatusField,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restaurant_id: Option<Id>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<Id>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver_id: Option<Id>,
    #[serde(default)]
    pub items: Vec<OrderLine>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub menu_item_id: Id,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

impl Order {
    pub fn status_name(&self) -> &str {
        self.status.name()
    }

    /// Still moving through kitchen or delivery
    pub fn is_open(&self) -> bool {
        !TERMINAL_ORDER_STATUSES
            .iter()
            .any(|terminal| self.status.is(terminal))
    }

    /// Sum of line totals, used when the backend omits `totalAmount`
    pub fn computed_total(&self) -> f64 {
        self.items
            .iter()
            .map(|line| line.price.unwrap_or(0.0) * f64::from(line.quantity))
            .sum()
    }
}
