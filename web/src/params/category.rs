use super::deserialize_some;
use domain::category::Changes;
use serde::Deserialize;
use utoipa::ToSchema;

/// Partial update of a category. Absent fields are left unchanged;
/// `"description": null` clears the description.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[schema(as = category::UpdateParams)]
pub(crate) struct UpdateParams {
    pub(crate) name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    pub(crate) description: Option<Option<String>>,
}

impl From<UpdateParams> for Changes {
    fn from(params: UpdateParams) -> Self {
        Changes {
            name: params.name,
            description: params.description,
        }
    }
}
