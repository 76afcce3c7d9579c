use super::deserialize_some;
use domain::product::Changes;
use domain::Id;
use serde::Deserialize;
use utoipa::ToSchema;

/// Partial update of a product. Absent fields are left unchanged;
/// `"description": null` clears the description.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[schema(as = product::UpdateParams)]
pub(crate) struct UpdateParams {
    pub(crate) name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    pub(crate) description: Option<Option<String>>,
    pub(crate) price: Option<f64>,
    pub(crate) category_id: Option<Id>,
}

impl From<UpdateParams> for Changes {
    fn from(params: UpdateParams) -> Self {
        Changes {
            name: params.name,
            description: params.description,
            price: params.price,
            category_id: params.category_id,
        }
    }
}
