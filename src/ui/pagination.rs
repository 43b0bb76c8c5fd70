/// Show every page when there are at most this many.
pub const SHOW_ALL_THRESHOLD: u32 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(u32),
    /// One marker per gap, however many pages it hides.
    Ellipsis,
}

/// Page buttons for `current` out of `total`: first, last, and the current
/// page with its neighbours, with an ellipsis in each gap.
pub fn page_window(current: u32, total: u32) -> Vec<PageItem> {
    if total == 0 {
        return Vec::new();
    }
    let current = current.clamp(1, total);
    let mut pages: Vec<u32> = if total <= SHOW_ALL_THRESHOLD {
        (1..=total).collect()
    } else {
        vec![
            1,
            total,
            current.saturating_sub(1).max(1),
            current,
            current.saturating_add(1).min(total),
        ]
    };
    pages.sort_unstable();
    pages.dedup();

    let mut items = Vec::with_capacity(pages.len() * 2);
    let mut previous = None;
    for page in pages {
        if previous.is_some_and(|prev| page - prev > 1) {
            items.push(PageItem::Ellipsis);
        }
        items.push(PageItem::Page(page));
        previous = Some(page);
    }
    items
}

pub fn has_previous(current: u32) -> bool {
    current > 1
}

pub fn has_next(current: u32, total: u32) -> bool {
    current < total
}

#[cfg(test)]
mod tests {
    use super::*;
    use PageItem::{Ellipsis, Page};

    #[test]
    fn middle_of_a_long_range() {
        assert_eq!(
            page_window(10, 20),
            vec![Page(1), Ellipsis, Page(9), Page(10), Page(11), Ellipsis, Page(20)]
        );
    }

    #[test]
    fn short_ranges_show_everything() {
        assert_eq!(page_window(4, 7), (1..=7).map(Page).collect::<Vec<_>>());
        assert_eq!(page_window(1, 1), vec![Page(1)]);
    }

    #[test]
    fn near_the_edges() {
        assert_eq!(
            page_window(1, 10),
            vec![Page(1), Page(2), Ellipsis, Page(10)]
        );
        assert_eq!(
            page_window(3, 10),
            vec![Page(1), Page(2), Page(3), Page(4), Ellipsis, Page(10)]
        );
        assert_eq!(
            page_window(10, 10),
            vec![Page(1), Ellipsis, Page(9), Page(10)]
        );
    }

    #[test]
    fn no_pages_no_buttons() {
        assert!(page_window(1, 0).is_empty());
    }

    #[test]
    fn out_of_range_current_is_clamped() {
        assert_eq!(page_window(99, 8), page_window(8, 8));
    }

    #[test]
    fn huge_totals_stay_small() {
        assert_eq!(
            page_window(1, 400_000_000),
            vec![Page(1), Page(2), Ellipsis, Page(400_000_000)]
        );
        assert_eq!(
            page_window(u32::MAX, u32::MAX),
            vec![Page(1), Ellipsis, Page(u32::MAX - 1), Page(u32::MAX)]
        );
        assert_eq!(
            page_window(u32::MAX - 5, u32::MAX),
            vec![
                Page(1),
                Ellipsis,
                Page(u32::MAX - 6),
                Page(u32::MAX - 5),
                Page(u32::MAX - 4),
                Ellipsis,
                Page(u32::MAX),
            ]
        );
    }

    #[test]
    fn previous_and_next_availability() {
        assert!(!has_previous(1));
        assert!(has_previous(2));
        assert!(has_next(1, 2));
        assert!(!has_next(2, 2));
    }
}
