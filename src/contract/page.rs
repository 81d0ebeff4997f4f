//! Pagination consistency checks
//!
//! The listing endpoints carry pagination metadata alongside the data array;
//! the numbers must agree with each other, not just match fixed expectations.

use crate::contract::Violation;
use crate::http::ApiResponse;
use crate::models::UserPage;

/// Deserialize a listing response body into a [`UserPage`]
pub fn parse(response: &ApiResponse) -> Result<UserPage, Violation> {
    serde_json::from_str(&response.body).map_err(|e| Violation::InvalidJson(e.to_string()))
}

/// Verify the page's internal arithmetic.
///
/// `total_pages` must equal `ceil(total / per_page)` and the data array must
/// hold exactly `per_page` entries on every non-final page, with only the
/// final page allowed to run short.
pub fn consistent(page: &UserPage) -> Result<(), Violation> {
    if page.page == 0 || page.per_page == 0 {
        return Err(Violation::PageArithmetic {
            detail: format!("page={} per_page={}", page.page, page.per_page),
        });
    }

    let expected_pages = page.total.div_ceil(page.per_page);
    if page.total_pages != expected_pages {
        return Err(Violation::PageArithmetic {
            detail: format!(
                "total_pages={} but total={} over per_page={} gives {}",
                page.total_pages, page.total, page.per_page, expected_pages
            ),
        });
    }

    let expected_len = page.expected_len();
    if page.data.len() as u64 != expected_len {
        return Err(Violation::PageArithmetic {
            detail: format!(
                "page {} holds {} entries but per_page={} total={} requires {}",
                page.page,
                page.data.len(),
                page.per_page,
                page.total,
                expected_len
            ),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;

    fn users(n: usize) -> Vec<User> {
        (0..n)
            .map(|i| User {
                id: i as u64 + 1,
                email: format!("user{i}@reqres.in"),
                first_name: format!("First{i}"),
                last_name: format!("Last{i}"),
                avatar: String::new(),
            })
            .collect()
    }

    #[test]
    fn test_full_page_is_consistent() {
        let page = UserPage {
            page: 1,
            per_page: 6,
            total: 12,
            total_pages: 2,
            data: users(6),
        };
        assert!(consistent(&page).is_ok());
    }

    #[test]
    fn test_short_final_page_is_consistent() {
        let page = UserPage {
            page: 3,
            per_page: 6,
            total: 14,
            total_pages: 3,
            data: users(2),
        };
        assert!(consistent(&page).is_ok());
    }

    #[test]
    fn test_short_non_final_page_is_inconsistent() {
        let page = UserPage {
            page: 1,
            per_page: 6,
            total: 12,
            total_pages: 2,
            data: users(5),
        };
        assert!(matches!(
            consistent(&page),
            Err(Violation::PageArithmetic { .. })
        ));
    }

    #[test]
    fn test_wrong_total_pages_is_inconsistent() {
        let page = UserPage {
            page: 1,
            per_page: 6,
            total: 12,
            total_pages: 3,
            data: users(6),
        };
        assert!(matches!(
            consistent(&page),
            Err(Violation::PageArithmetic { .. })
        ));
    }

    #[test]
    fn test_zero_per_page_is_rejected() {
        let page = UserPage {
            page: 1,
            per_page: 0,
            total: 12,
            total_pages: 2,
            data: vec![],
        };
        assert!(consistent(&page).is_err());
    }
}
