use std::cmp::Ordering;

use crate::dto::user_dto::UserResponse;

pub const ROWS_PER_PAGE_OPTIONS: [usize; 3] = [5, 10, 25];
pub const DEFAULT_ROWS_PER_PAGE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub(crate) fn apply(self, ord: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    }
}

/// One page of a filtered, sorted collection.
#[derive(Debug)]
pub struct Page<'a, T> {
    pub rows: Vec<&'a T>,
    /// Entries matching the filters, across all pages.
    pub total: usize,
    pub page_count: usize,
}

impl<'a, T> Page<'a, T> {
    pub(crate) fn slice(sorted: Vec<&'a T>, offset: usize, size: usize) -> Self {
        let total = sorted.len();
        let rows = sorted.into_iter().skip(offset).take(size).collect();
        Self {
            rows,
            total,
            page_count: total.div_ceil(size),
        }
    }
}

/// Case-insensitive ordering with a byte-order tiebreak, so equal-looking
/// names still sort deterministically.
pub(crate) fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserSortField {
    Name,
    Email,
    Role,
    CreatedAt,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported page size {0}; expected one of 5, 10, 25")]
pub struct UnsupportedPageSize(pub usize);

/// Table state for the user directory. Pages are 0-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserViewParams {
    search: String,
    sort_field: UserSortField,
    direction: SortDirection,
    page: usize,
    rows_per_page: usize,
}

impl Default for UserViewParams {
    fn default() -> Self {
        Self {
            search: String::new(),
            sort_field: UserSortField::Name,
            direction: SortDirection::Asc,
            page: 0,
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
        }
    }
}

impl UserViewParams {
    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn sort(&self) -> (UserSortField, SortDirection) {
        (self.sort_field, self.direction)
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn rows_per_page(&self) -> usize {
        self.rows_per_page
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.page = 0;
    }

    /// Asking again for the field already sorted ascending flips it to
    /// descending; any other request sorts ascending by `field`.
    pub fn request_sort(&mut self, field: UserSortField) {
        let flip = self.sort_field == field && self.direction == SortDirection::Asc;
        self.sort_field = field;
        self.direction = if flip {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    pub fn set_rows_per_page(&mut self, rows: usize) -> Result<(), UnsupportedPageSize> {
        if !ROWS_PER_PAGE_OPTIONS.contains(&rows) {
            return Err(UnsupportedPageSize(rows));
        }
        self.rows_per_page = rows;
        self.page = 0;
        Ok(())
    }

    fn matches(&self, user: &UserResponse) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        user.name.to_lowercase().contains(&needle)
            || user.email.to_lowercase().contains(&needle)
            || user.role.as_str().contains(&needle)
    }

    fn compare(&self, a: &UserResponse, b: &UserResponse) -> Ordering {
        let ord = match self.sort_field {
            UserSortField::Name => compare_text(&a.name, &b.name),
            UserSortField::Email => compare_text(&a.email, &b.email),
            UserSortField::Role => a.role.as_str().cmp(b.role.as_str()),
            UserSortField::CreatedAt => a.created_at.cmp(&b.created_at),
        };
        self.direction.apply(ord)
    }
}

/// Filters, sorts and paginates `users`. Pure: the same inputs always give
/// the same page.
pub fn user_view<'a>(users: &'a [UserResponse], params: &UserViewParams) -> Page<'a, UserResponse> {
    let mut rows: Vec<&UserResponse> = users.iter().filter(|u| params.matches(u)).collect();
    rows.sort_by(|a, b| params.compare(a, b));
    let offset = params.page.saturating_mul(params.rows_per_page);
    Page::slice(rows, offset, params.rows_per_page)
}
