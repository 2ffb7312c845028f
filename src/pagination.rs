// ABOUTME: Page-number pagination parameters for list endpoints
// ABOUTME: Clamps client-supplied page/limit values and derives LIMIT/OFFSET
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ladle Project

//! Page/size pagination for list endpoints.

use serde::Deserialize;

use crate::constants::pagination::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Pagination query parameters (`page` starts at 1)
#[derive(Debug, Clone, Copy, Deserialize, Default)]
pub struct PageParams {
    /// 1-based page number
    pub page: Option<u32>,
    /// Page size
    pub limit: Option<u32>,
}

impl PageParams {
    /// Effective page size, clamped to [1, `MAX_PAGE_SIZE`]
    #[must_use]
    pub fn limit(&self) -> i64 {
        i64::from(self.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE))
    }

    /// Row offset for the effective page
    #[must_use]
    pub fn offset(&self) -> i64 {
        let page = i64::from(self.page.unwrap_or(1).max(1));
        (page - 1) * self.limit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = PageParams::default();
        assert_eq!(params.limit(), i64::from(DEFAULT_PAGE_SIZE));
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_offset_advances_by_limit() {
        let params = PageParams {
            page: Some(3),
            limit: Some(20),
        };
        assert_eq!(params.limit(), 20);
        assert_eq!(params.offset(), 40);
    }

    #[test]
    fn test_limit_clamped() {
        let params = PageParams {
            page: Some(1),
            limit: Some(10_000),
        };
        assert_eq!(params.limit(), i64::from(MAX_PAGE_SIZE));

        let params = PageParams {
            page: Some(0),
            limit: Some(0),
        };
        assert_eq!(params.limit(), 1);
        assert_eq!(params.offset(), 0);
    }
}
