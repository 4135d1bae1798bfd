// src/middleware/page_extractor.rs - pageNo / pageSize / sortBy from the query string

use std::collections::HashMap;

use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures::future::{Ready, ready};

use crate::handlers::error_handlers::{ApiError, type_mismatch};

pub const DEFAULT_PAGE_NO: i32 = 0;
pub const DEFAULT_PAGE_SIZE: i32 = 10;
pub const DEFAULT_SORT_BY: &str = "id";

/// Paging parameters for `GET /api/posts`. Missing or empty values take the
/// defaults; a value that is not an integer is reported with its raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageParams {
    pub page_no: i32,
    pub page_size: i32,
    pub sort_by: String,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page_no: DEFAULT_PAGE_NO,
            page_size: DEFAULT_PAGE_SIZE,
            sort_by: DEFAULT_SORT_BY.to_string(),
        }
    }
}

impl PageParams {
    /// Parses a raw query string. The error is the offending raw value.
    pub fn from_query(query: &str) -> Result<Self, String> {
        let params = web::Query::<HashMap<String, String>>::from_query(query)
            .map_err(|_| query.to_string())?
            .into_inner();

        let sort_by = match params.get("sortBy").map(|s| s.trim()) {
            Some(s) if !s.is_empty() => s.to_string(),
            _ => DEFAULT_SORT_BY.to_string(),
        };

        Ok(Self {
            page_no: int_param(&params, "pageNo", DEFAULT_PAGE_NO)?,
            page_size: int_param(&params, "pageSize", DEFAULT_PAGE_SIZE)?,
            sort_by,
        })
    }
}

fn int_param(params: &HashMap<String, String>, key: &str, default: i32) -> Result<i32, String> {
    match params.get(key) {
        None => Ok(default),
        Some(raw) if raw.trim().is_empty() => Ok(default),
        Some(raw) => raw.trim().parse::<i32>().map_err(|_| raw.clone()),
    }
}

impl FromRequest for PageParams {
    type Error = ApiError;
    type Future = Ready<Result<PageParams, ApiError>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(PageParams::from_query(req.query_string()).map_err(|raw| type_mismatch(req, &raw)))
    }
}
