use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Area {
    pub area_id: String,
    pub area_name: String,
    pub unit_price: f64,
    pub price_is_uniform: bool,
}
