//! Sort parameters of listing URLs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Query parameter holding the sort key
pub const SORT_PARAM: &str = "sort";
/// Query parameter holding the sort direction
pub const ORDER_PARAM: &str = "order";

/// Sort direction of a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending
    Asc,
    /// Descending
    Desc,
}

impl SortOrder {
    /// Direction to request when the user toggles away from `current`.
    ///
    /// Only an explicit `desc` flips to `asc`; absent or unknown values fall
    /// back to `desc`.
    pub fn toggled(current: Option<&str>) -> Self {
        match current.map(str::parse::<SortOrder>) {
            Some(Ok(SortOrder::Desc)) => SortOrder::Asc,
            _ => SortOrder::Desc,
        }
    }

    /// Value as written in the `order` parameter
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A string that is neither `asc` nor `desc`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort order '{0}'")]
pub struct UnknownSortOrder(pub String);

impl FromStr for SortOrder {
    type Err = UnknownSortOrder;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(UnknownSortOrder(s.to_owned())),
        }
    }
}

/// Overrides for a column header click: sort by `key`, flip the direction.
pub fn column_overrides(key: &str, current_order: Option<&str>) -> Vec<(String, String)> {
    vec![
        (SORT_PARAM.to_owned(), key.to_owned()),
        order_override(current_order),
    ]
}

/// Overrides for choosing a sort attribute while keeping the direction.
pub fn attribute_overrides(key: &str) -> Vec<(String, String)> {
    vec![(SORT_PARAM.to_owned(), key.to_owned())]
}

/// Overrides for flipping only the direction.
pub fn order_overrides(current_order: Option<&str>) -> Vec<(String, String)> {
    vec![order_override(current_order)]
}

fn order_override(current_order: Option<&str>) -> (String, String) {
    (
        ORDER_PARAM.to_owned(),
        SortOrder::toggled(current_order).as_str().to_owned(),
    )
}
