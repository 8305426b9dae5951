use std::cmp::Ordering;
use std::sync::Arc;

use uuid::Uuid;

use super::api::DirectoryApi;
use super::notice::Notice;
use super::snapshot::Snapshot;
use super::view::{compare_text, Page, SortDirection};
use crate::dto::event_dto::EventResponse;
use crate::models::event::EventStatus;

pub const EVENTS_PER_PAGE: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(EventStatus),
}

impl StatusFilter {
    fn admits(self, status: EventStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => wanted == status,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventSortField {
    Date,
    Title,
}

/// Grid state for event moderation. Pages are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventViewParams {
    filter: StatusFilter,
    search: String,
    sort_field: EventSortField,
    direction: SortDirection,
    page: usize,
}

impl Default for EventViewParams {
    fn default() -> Self {
        Self {
            filter: StatusFilter::All,
            search: String::new(),
            sort_field: EventSortField::Date,
            direction: SortDirection::Desc,
            page: 1,
        }
    }
}

impl EventViewParams {
    pub fn filter(&self) -> StatusFilter {
        self.filter
    }

    pub fn sort(&self) -> (EventSortField, SortDirection) {
        (self.sort_field, self.direction)
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Keeps the current page.
    pub fn set_filter(&mut self, filter: StatusFilter) {
        self.filter = filter;
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.page = 1;
    }

    /// The active field toggles direction; a new field starts ascending.
    pub fn request_sort(&mut self, field: EventSortField) {
        if self.sort_field == field {
            self.direction = self.direction.reversed();
        } else {
            self.sort_field = field;
            self.direction = SortDirection::Asc;
        }
    }

    /// Page 0 is treated as page 1.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    fn matches(&self, event: &EventResponse) -> bool {
        if !self.filter.admits(event.status) {
            return false;
        }
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        event.title.to_lowercase().contains(&needle)
            || event.location.to_lowercase().contains(&needle)
    }

    fn compare(&self, a: &EventResponse, b: &EventResponse) -> Ordering {
        let ord = match self.sort_field {
            EventSortField::Date => a.date.cmp(&b.date),
            EventSortField::Title => compare_text(&a.title, &b.title),
        };
        self.direction.apply(ord)
    }
}

pub fn event_view<'a>(events: &'a [EventResponse], params: &EventViewParams) -> Page<'a, EventResponse> {
    let mut rows: Vec<&EventResponse> = events.iter().filter(|e| params.matches(e)).collect();
    rows.sort_by(|a, b| params.compare(a, b));
    let offset = params.page.saturating_sub(1).saturating_mul(EVENTS_PER_PAGE);
    Page::slice(rows, offset, EVENTS_PER_PAGE)
}

/// Cached event list plus its view state, backed by a [`DirectoryApi`].
pub struct EventBoard {
    api: Arc<dyn DirectoryApi>,
    events: Snapshot<EventResponse>,
    params: EventViewParams,
    notices: Vec<Notice>,
}

impl EventBoard {
    pub fn new(api: Arc<dyn DirectoryApi>) -> Self {
        Self {
            api,
            events: Snapshot::new(),
            params: EventViewParams::default(),
            notices: Vec::new(),
        }
    }

    pub async fn refetch(&mut self) -> bool {
        match self.api.list_events().await {
            Ok(events) => {
                self.events.replace(events);
                true
            }
            Err(err) => {
                self.notices.push(Notice::from_failure(
                    &err,
                    "Failed to fetch events. Please try again later.",
                ));
                false
            }
        }
    }

    pub async fn update_status(&mut self, id: Uuid, status: EventStatus) -> bool {
        match self.api.update_event_status(id, status).await {
            Ok(event) => {
                self.events.patch(event);
                self.notices
                    .push(Notice::success(format!("Event {} successfully", status)));
                true
            }
            Err(err) => {
                self.notices
                    .push(Notice::from_failure(&err, "Failed to update event status."));
                false
            }
        }
    }

    pub async fn delete(&mut self, id: Uuid) -> bool {
        match self.api.delete_event(id).await {
            Ok(()) => {
                self.events.remove(id);
                self.notices.push(Notice::success("Event deleted successfully"));
                true
            }
            Err(err) => {
                self.notices
                    .push(Notice::fixed_failure(&err, "Failed to delete event"));
                false
            }
        }
    }

    pub fn view(&self) -> Page<'_, EventResponse> {
        event_view(self.events.items(), &self.params)
    }

    pub fn events(&self) -> &Snapshot<EventResponse> {
        &self.events
    }

    pub fn params(&self) -> &EventViewParams {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut EventViewParams {
        &mut self.params
    }

    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}
