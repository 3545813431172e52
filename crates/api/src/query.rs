//! Query-string parameter types for API handlers.
//!
//! Each struct turns raw parameters into the domain filter it names. Empty
//! values (`?status=`) are treated as absent; unparseable enum values are
//! validation errors naming the parameter. Pagination fields are repeated
//! per struct: `serde(flatten)` cannot parse numbers out of a query string.

use std::str::FromStr;

use hearth_core::error::CoreError;
use hearth_core::filter::{Page, ResourceFilter, SignalFilter, UpdateRequestFilter};
use serde::Deserialize;

/// `GET /resources` and `GET /public/resources` parameters.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceParams {
    pub search: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub is_favorite: Option<String>,
    pub tag: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl ResourceParams {
    pub fn page(&self) -> Page {
        Page::new(self.limit, self.offset)
    }

    pub fn filter(&self) -> Result<ResourceFilter, CoreError> {
        Ok(ResourceFilter {
            search: present(&self.search).map(str::to_string),
            category: present(&self.category).map(str::to_string),
            status: parse_present(&self.status)?,
            is_favorite: parse_flag("isFavorite", &self.is_favorite)?,
            tag: present(&self.tag).map(str::to_string),
        })
    }
}

/// `GET /signals` parameters.
#[derive(Debug, Default, Deserialize)]
pub struct SignalParams {
    #[serde(rename = "type")]
    pub signal_type: Option<String>,
    pub lane: Option<String>,
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl SignalParams {
    pub fn page(&self) -> Page {
        Page::new(self.limit, self.offset)
    }

    pub fn filter(&self) -> Result<SignalFilter, CoreError> {
        Ok(SignalFilter {
            signal_type: parse_present(&self.signal_type)?,
            lane: parse_present(&self.lane)?,
            search: present(&self.search).map(str::to_string),
        })
    }
}

/// `GET /update-requests` parameters.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequestParams {
    pub status: Option<String>,
    pub submitted_by: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl UpdateRequestParams {
    pub fn page(&self) -> Page {
        Page::new(self.limit, self.offset)
    }

    pub fn filter(&self) -> Result<UpdateRequestFilter, CoreError> {
        Ok(UpdateRequestFilter {
            status: parse_present(&self.status)?,
            submitted_by: present(&self.submitted_by).map(str::to_string),
        })
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn parse_present<T>(value: &Option<String>) -> Result<Option<T>, CoreError>
where
    T: FromStr<Err = CoreError>,
{
    present(value).map(str::parse).transpose()
}

fn parse_flag(field: &str, value: &Option<String>) -> Result<Option<bool>, CoreError> {
    match present(value) {
        None => Ok(None),
        Some("true") => Ok(Some(true)),
        Some("false") => Ok(Some(false)),
        Some(other) => Err(CoreError::invalid_field(
            field,
            format!("'{other}' is not a boolean; use true or false"),
        )),
    }
}
