//! Response types for the public wardrobe endpoint.
//!
//! `GET /api/v2/wardrobe/<seller_id>/items` returns a large object per item;
//! only the `id` is read, everything else is ignored. A response without an
//! `items` key is treated as an empty wardrobe.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct WardrobeResponse {
    #[serde(default)]
    pub items: Vec<WardrobeItem>,
}

#[derive(Debug, Deserialize)]
pub struct WardrobeItem {
    pub id: u64,
}
