use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::records::Winner;
use crate::shared::AppError;
use crate::stats::{FilterCriteria, ResultsView, SortDirection, SortField, SortSpec};

/// Query string of `GET /results`. Blank values count as unset.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResultsQuery {
    pub search: Option<String>,
    pub winner: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub sort: Option<String>,
    pub dir: Option<String>,
    /// Field whose column header was clicked, applied on top of `sort`/`dir`
    pub toggle: Option<String>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

fn parse_date(param: &str, raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| AppError::BadRequest(format!("{param} must be a YYYY-MM-DD date, got {raw:?}")))
}

fn parse_field(param: &str, raw: &str) -> Result<SortField, AppError> {
    SortField::from_str(raw)
        .map_err(|_| AppError::BadRequest(format!("unknown {param} field {raw:?}")))
}

impl ResultsQuery {
    pub fn criteria(&self) -> Result<FilterCriteria, AppError> {
        let winner = present(&self.winner)
            .map(|raw| {
                Winner::from_str(raw)
                    .map_err(|_| AppError::BadRequest(format!("unknown winner {raw:?}")))
            })
            .transpose()?;
        let from_date = present(&self.from)
            .map(|raw| parse_date("from", raw))
            .transpose()?;
        let to_date = present(&self.to)
            .map(|raw| parse_date("to", raw))
            .transpose()?;

        Ok(FilterCriteria {
            search_text: self.search.clone().unwrap_or_default(),
            winner,
            from_date,
            to_date,
        })
    }

    pub fn sort_spec(&self) -> Result<SortSpec, AppError> {
        let default = SortSpec::default();
        let field = present(&self.sort)
            .map(|raw| parse_field("sort", raw))
            .transpose()?;
        let direction = present(&self.dir)
            .map(|raw| {
                SortDirection::from_str(raw)
                    .map_err(|_| AppError::BadRequest(format!("unknown sort direction {raw:?}")))
            })
            .transpose()?;

        let spec = match (field, direction) {
            (None, None) => default,
            (Some(field), direction) => SortSpec::new(field, direction.unwrap_or_default()),
            (None, Some(direction)) => SortSpec::new(default.field, direction),
        };

        match present(&self.toggle) {
            Some(raw) => Ok(spec.toggle(parse_field("toggle", raw)?)),
            None => Ok(spec),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ResultsResponse {
    /// The order actually applied, for the caller's next toggle
    pub sort: SortSpec,
    #[serde(flatten)]
    pub view: ResultsView,
}
