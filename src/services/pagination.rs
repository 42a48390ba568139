/*
 * Responsibility
 * - offset/limit の検証と、前後ページ有無の計算
 * - limit = 0 は「上限なし」
 */

pub const DEFAULT_LIMIT: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub offset: i64,
    /// `None` = no limit
    pub limit: Option<i64>,
}

impl PageRequest {
    /// Collects every violation instead of stopping at the first one.
    pub fn new(offset: i32, limit: i32) -> Result<Self, Vec<String>> {
        let mut violations = Vec::new();
        if offset < 0 {
            violations.push("offset must be greater than or equal to zero".to_string());
        }
        if limit < 0 {
            violations.push("limit must be greater than or equal to zero".to_string());
        }
        if !violations.is_empty() {
            return Err(violations);
        }

        Ok(Self {
            offset: i64::from(offset),
            limit: (limit > 0).then_some(i64::from(limit)),
        })
    }

    pub fn has_previous_page(&self) -> bool {
        self.offset > 0
    }

    pub fn has_next_page(&self, count: i64) -> bool {
        match self.limit {
            Some(limit) => self.offset + limit < count,
            None => false,
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: Some(i64::from(DEFAULT_LIMIT)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_of_many() {
        let page = PageRequest::new(0, 5).unwrap();
        assert!(!page.has_previous_page());
        assert!(page.has_next_page(10));
    }

    #[test]
    fn middle_page() {
        let page = PageRequest::new(2, 5).unwrap();
        assert!(page.has_previous_page());
        assert!(page.has_next_page(10));
    }

    #[test]
    fn exact_last_page_has_no_next() {
        let page = PageRequest::new(5, 5).unwrap();
        assert!(!page.has_next_page(10));
        assert!(!PageRequest::default().has_next_page(10));
    }

    #[test]
    fn zero_limit_means_everything() {
        let page = PageRequest::new(0, 0).unwrap();
        assert_eq!(page.limit, None);
        assert!(!page.has_next_page(1_000));
    }

    #[test]
    fn negative_values_report_both_violations() {
        let violations = PageRequest::new(-5, -10).unwrap_err();
        assert_eq!(
            violations,
            vec![
                "offset must be greater than or equal to zero",
                "limit must be greater than or equal to zero",
            ]
        );
    }
}
