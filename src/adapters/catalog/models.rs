//! Wire models for the listing API

use crate::domain::Record;
use serde::{Deserialize, Serialize};

/// One page of the listing API response
///
/// ```json
/// {"houses":[{"id":0,"address":"4 Pumpkin Hill Street Antioch, TN 37013",
///   "homeowner":"Nicole Bone","price":105124,"photoURL":"https://.../house.jpg"}]}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HousesPage {
    pub houses: Vec<House>,
}

/// A single house as serialized by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct House {
    pub id: u64,
    pub address: String,
    #[serde(default)]
    pub homeowner: String,
    pub price: i64,
    #[serde(rename = "photoURL")]
    pub photo_url: String,
}

impl From<House> for Record {
    fn from(house: House) -> Self {
        Record::new(
            house.id,
            house.address,
            house.homeowner,
            house.price,
            house.photo_url,
        )
    }
}
