use crate::Error;
use serde::Deserialize;
use utoipa::IntoParams;

pub(crate) const DEFAULT_LIMIT: i64 = 10;
pub(crate) const MAX_LIMIT: i64 = 100;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub(crate) struct IndexParams {
    /// Number of records to skip (default 0)
    pub(crate) skip: Option<i64>,
    /// Maximum number of records to return, 1 to 100 (default 10)
    pub(crate) limit: Option<i64>,
}

impl IndexParams {
    /// Validated `(skip, limit)`.
    pub(crate) fn bounds(&self) -> Result<(u64, u64), Error> {
        let skip = self.skip.unwrap_or(0);
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT);

        if skip < 0 {
            return Err(Error::invalid_param("skip", "skip must not be negative"));
        }
        if !(1..=MAX_LIMIT).contains(&limit) {
            return Err(Error::invalid_param(
                "limit",
                format!("limit must be between 1 and {MAX_LIMIT}"),
            ));
        }

        Ok((skip as u64, limit as u64))
    }
}
