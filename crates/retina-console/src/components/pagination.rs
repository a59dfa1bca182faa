//! Pagination controls for navigating through data

/// Clamp a requested page into `[1, total_pages]`
#[must_use]
pub fn clamp_page(page: u32, total_pages: u32) -> u32 {
    page.clamp(1, total_pages.max(1))
}

/// Previous/next controls for a paged listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    /// Current page (1-based)
    pub current_page: u32,
    /// Total number of pages
    pub total_pages: u32,
    /// Whether a previous page exists
    pub has_prev: bool,
    /// Whether a next page exists
    pub has_next: bool,
    /// Link to the previous page
    pub prev_href: String,
    /// Link to the next page
    pub next_href: String,
}

impl Pagination {
    /// Build controls; `href` renders the link for a page number
    pub fn new(current_page: u32, total_pages: u32, href: impl Fn(u32) -> String) -> Self {
        let total_pages = total_pages.max(1);
        let current_page = clamp_page(current_page, total_pages);
        let has_prev = current_page > 1;
        let has_next = current_page < total_pages;

        Self {
            current_page,
            total_pages,
            has_prev,
            has_next,
            prev_href: href(current_page.saturating_sub(1).max(1)),
            next_href: href((current_page + 1).min(total_pages)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn link(page: u32) -> String {
        format!("?page={page}")
    }

    #[rstest]
    #[case(1, 1, false, false)]
    #[case(1, 5, false, true)]
    #[case(3, 5, true, true)]
    #[case(5, 5, true, false)]
    fn test_navigation_flags(
        #[case] page: u32,
        #[case] total: u32,
        #[case] has_prev: bool,
        #[case] has_next: bool,
    ) {
        let pagination = Pagination::new(page, total, link);
        assert_eq!(pagination.has_prev, has_prev);
        assert_eq!(pagination.has_next, has_next);
    }

    #[test]
    fn test_out_of_range_page_is_clamped() {
        let pagination = Pagination::new(9, 4, link);
        assert_eq!(pagination.current_page, 4);
        assert_eq!(pagination.prev_href, "?page=3");
        assert_eq!(pagination.next_href, "?page=4");

        let pagination = Pagination::new(0, 0, link);
        assert_eq!(pagination.current_page, 1);
        assert_eq!(pagination.total_pages, 1);
    }

    #[test]
    fn test_clamp_page() {
        assert_eq!(clamp_page(0, 3), 1);
        assert_eq!(clamp_page(2, 3), 2);
        assert_eq!(clamp_page(7, 3), 3);
        assert_eq!(clamp_page(7, 0), 1);
    }
}
