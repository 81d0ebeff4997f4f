//! Typed payloads of the user API
//!
//! Only the shapes the harness reasons about numerically are deserialized into
//! structs; everything else is checked structurally through contracts.

use serde::{Deserialize, Serialize};

/// One user entry as returned in list and single-user payloads
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub avatar: String,
}

/// A paginated user listing
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserPage {
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
    pub total_pages: u64,
    pub data: Vec<User>,
}

impl UserPage {
    /// Number of entries this page must carry: full pages everywhere except a
    /// shorter final page.
    pub fn expected_len(&self) -> u64 {
        let preceding = self.per_page * self.page.saturating_sub(1);
        self.per_page.min(self.total.saturating_sub(preceding))
    }

    /// Find a user by exact first name
    pub fn find_by_first_name(&self, first_name: &str) -> Option<&User> {
        self.data.iter().find(|u| u.first_name == first_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(page: u64, per_page: u64, total: u64, len: usize) -> UserPage {
        UserPage {
            page,
            per_page,
            total,
            total_pages: total.div_ceil(per_page),
            data: (0..len)
                .map(|i| User {
                    id: i as u64,
                    email: format!("user{i}@reqres.in"),
                    first_name: format!("First{i}"),
                    last_name: format!("Last{i}"),
                    avatar: String::new(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_expected_len_full_page() {
        assert_eq!(page(1, 6, 12, 6).expected_len(), 6);
        assert_eq!(page(2, 6, 12, 6).expected_len(), 6);
    }

    #[test]
    fn test_expected_len_short_final_page() {
        assert_eq!(page(3, 6, 14, 2).expected_len(), 2);
        assert_eq!(page(4, 6, 14, 0).expected_len(), 0);
    }

    #[test]
    fn test_find_by_first_name() {
        let p = page(1, 6, 12, 6);
        assert!(p.find_by_first_name("First3").is_some());
        assert!(p.find_by_first_name("Lindsay").is_none());
    }
}
