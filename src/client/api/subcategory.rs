use crate::comment::Subcategory;
use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct RawSubcategory {
    pub id: u32,
    pub name: String,
}

impl From<RawSubcategory> for Subcategory {
    fn from(raw: RawSubcategory) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
        }
    }
}
