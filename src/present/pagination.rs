use serde::Serialize;

use crate::query::RunQuery;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageLink {
    pub number: u32,
    pub href: String,
    pub current: bool,
}

/// Previous/next control. The target is always computed and clamped, even
/// when the control is disabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub target: u32,
    pub href: String,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub current: u32,
    pub total_pages: u32,
    pub pages: Vec<PageLink>,
    pub prev: NavLink,
    pub next: NavLink,
}

/// `1..=total_pages`; a zero page count is treated as a single page.
pub fn page_numbers(total_pages: u32) -> Vec<u32> {
    (1..=total_pages.max(1)).collect()
}

pub fn prev_target(current: u32) -> u32 {
    current.saturating_sub(1).max(1)
}

pub fn next_target(current: u32, total_pages: u32) -> u32 {
    current.saturating_add(1).min(total_pages.max(1))
}

/// Clamp a page into `[1, max(1, total_pages)]`.
pub fn clamp_page(page: u32, total_pages: u32) -> u32 {
    page.clamp(1, total_pages.max(1))
}

/// Page sequence and prev/next controls for `query`, with links that keep
/// the active filters.
pub fn build_pagination(query: &RunQuery, current: u32, total_pages: u32) -> Pagination {
    let total_pages = total_pages.max(1);
    let current = clamp_page(current, total_pages);

    let pages = page_numbers(total_pages)
        .into_iter()
        .map(|number| PageLink {
            number,
            href: query.with_page(number).dashboard_href(),
            current: number == current,
        })
        .collect();

    let prev = prev_target(current);
    let next = next_target(current, total_pages);

    Pagination {
        current,
        total_pages,
        pages,
        prev: NavLink {
            target: prev,
            href: query.with_page(prev).dashboard_href(),
            disabled: current <= 1,
        },
        next: NavLink {
            target: next,
            href: query.with_page(next).dashboard_href(),
            disabled: current >= total_pages,
        },
    }
}
