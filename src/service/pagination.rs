//! Cursor pagination over the quotation cache.
//!
//! A cursor is the surrogate id of the last item on the previous page. The window
//! always starts at the first item whose id is greater than the cursor, so a cursor
//! that names a deleted or never-issued id continues from its insertion point
//! instead of restarting from the beginning.

use crate::types::{QuotePage, Quotation};

pub const DEFAULT_PAGE_LIMIT: u32 = 20;
pub const MAX_PAGE_LIMIT: u32 = 50;

/// Clamps a requested page size into `1..=MAX_PAGE_LIMIT`; `None` yields the default.
pub fn clamp_limit(requested: Option<i64>) -> u32 {
    match requested {
        None => DEFAULT_PAGE_LIMIT,
        Some(n) => u32::try_from(n.clamp(1, i64::from(MAX_PAGE_LIMIT))).unwrap_or(MAX_PAGE_LIMIT),
    }
}

/// Slices `items` (ascending by id) into the page that follows `cursor`.
pub fn page(items: &[Quotation], cursor: Option<i64>, limit: u32) -> QuotePage {
    let start = match cursor {
        None => 0,
        Some(c) => items.partition_point(|q| q.id.is_none_or(|id| id <= c)),
    };
    let end = items.len().min(start + limit as usize + 1);
    window(items[start..end].to_vec(), limit)
}

/// Builds a page from the rows starting at the window's first item.
///
/// `rows` may hold more than `limit` items; anything past `limit` only signals
/// that another page exists.
pub(crate) fn window(mut rows: Vec<Quotation>, limit: u32) -> QuotePage {
    let limit = limit as usize;
    let has_more = rows.len() > limit;
    rows.truncate(limit);

    let next_cursor = if has_more {
        rows.last().and_then(|q| q.id)
    } else {
        None
    };

    QuotePage {
        quotes: rows,
        next_cursor,
        has_more,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::QuoteOrigin;

    fn items(ids: &[i64]) -> Vec<Quotation> {
        ids.iter()
            .map(|id| Quotation {
                id: Some(*id),
                text: format!("text {id}"),
                author: format!("author {id}"),
                origin: QuoteOrigin::Cached,
            })
            .collect()
    }

    fn ids(page: &QuotePage) -> Vec<i64> {
        page.quotes.iter().filter_map(|q| q.id).collect()
    }

    #[test]
    fn first_page_then_last_page() {
        let all = items(&[1, 2, 3]);

        let first = page(&all, None, 2);
        assert_eq!(ids(&first), vec![1, 2]);
        assert_eq!(first.next_cursor, Some(2));
        assert!(first.has_more);

        let second = page(&all, first.next_cursor, 2);
        assert_eq!(ids(&second), vec![3]);
        assert_eq!(second.next_cursor, None);
        assert!(!second.has_more);
    }

    #[test]
    fn exact_fit_has_no_more() {
        let all = items(&[1, 2]);
        let p = page(&all, None, 2);
        assert_eq!(ids(&p), vec![1, 2]);
        assert!(!p.has_more);
        assert_eq!(p.next_cursor, None);
    }

    #[test]
    fn unmatched_cursor_continues_from_insertion_point() {
        let all = items(&[2, 4, 6, 8]);

        let p = page(&all, Some(5), 2);
        assert_eq!(ids(&p), vec![6, 8]);
        assert!(!p.has_more);

        let before_all = page(&all, Some(0), 1);
        assert_eq!(ids(&before_all), vec![2]);
        assert_eq!(before_all.next_cursor, Some(2));

        let past_end = page(&all, Some(100), 10);
        assert!(past_end.quotes.is_empty());
        assert!(!past_end.has_more);
    }

    #[test]
    fn empty_input_yields_empty_page() {
        assert_eq!(page(&[], None, 20), QuotePage::empty());
    }

    #[test]
    fn limit_is_clamped() {
        assert_eq!(clamp_limit(None), 20);
        assert_eq!(clamp_limit(Some(1000)), 50);
        assert_eq!(clamp_limit(Some(0)), 1);
        assert_eq!(clamp_limit(Some(-7)), 1);
        assert_eq!(clamp_limit(Some(35)), 35);
    }
}
