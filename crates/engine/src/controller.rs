//! Generic list controller shared by every page of the dashboard.

use chrono::{DateTime, Utc};

use crate::{
    EngineError, RecordForm, RecordStore, ResultEngine,
    collab::{Clipboard, ConfirmPrompt, Notice},
    pagination::Pagination,
    schema::{Record, RecordId, Schema},
    search::Query,
    urgency::days_remaining,
};

/// Category tab selection.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    fn admits(&self, category: Option<&str>) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => category == Some(wanted.as_str()),
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::All => "All",
            Self::Only(value) => value.as_str(),
        }
    }
}

/// One row of the derived view.
#[derive(Debug, PartialEq)]
pub struct ViewRow<'a, R> {
    pub record: &'a R,
    /// Set for date-bearing variants only.
    pub days_remaining: Option<i64>,
}

// Manual impls: deriving would require `R: Clone`/`R: Copy`.
impl<R> Clone for ViewRow<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for ViewRow<'_, R> {}

/// The rows of the current page plus the paging state shown under the table.
#[derive(Debug)]
pub struct PageView<'a, R> {
    pub rows: Vec<ViewRow<'a, R>>,
    pub page: usize,
    pub total_pages: usize,
    pub total_rows: usize,
    pub has_prev: bool,
    pub has_next: bool,
}

/// Modal form state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Modal {
    #[default]
    Closed,
    Open {
        editing: Option<RecordId>,
        form: RecordForm,
    },
}

/// What a successful submit did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Submitted {
    Created(RecordId),
    Updated(RecordId),
}

/// Owns one collection and the view state of the page showing it.
#[derive(Debug)]
pub struct RecordListController<S: Schema> {
    store: RecordStore<S::Record>,
    search: String,
    category: CategoryFilter,
    pagination: Option<Pagination>,
    revealed: Option<RecordId>,
    modal: Modal,
}

impl<S: Schema> RecordListController<S> {
    pub fn new(store: RecordStore<S::Record>) -> Self {
        Self {
            store,
            search: String::new(),
            category: CategoryFilter::All,
            pagination: S::PAGE_SIZE.map(Pagination::new),
            revealed: None,
            modal: Modal::Closed,
        }
    }

    /// The base collection.
    pub fn store(&self) -> &RecordStore<S::Record> {
        &self.store
    }

    pub fn search_text(&self) -> &str {
        &self.search
    }

    pub fn category(&self) -> &CategoryFilter {
        &self.category
    }

    /// Set the free-text query. Changing it goes back to page 1.
    pub fn set_search_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text == self.search {
            return;
        }
        tracing::debug!(kind = S::NOUN, query = %text, "search changed");
        self.search = text;
        self.reset_page();
    }

    /// Restrict the view to one category. Changing it goes back to page 1.
    pub fn set_category_filter(&mut self, filter: CategoryFilter) {
        if filter == self.category {
            return;
        }
        tracing::debug!(kind = S::NOUN, category = filter.label(), "category changed");
        self.category = filter;
        self.reset_page();
    }

    /// Step the category tab: All, then each category, then back to All.
    pub fn cycle_category(&mut self) {
        let next = match &self.category {
            CategoryFilter::All => S::CATEGORIES.first(),
            CategoryFilter::Only(current) => S::CATEGORIES
                .iter()
                .position(|category| *category == current.as_str())
                .and_then(|idx| S::CATEGORIES.get(idx + 1)),
        };
        let filter = next.map_or(CategoryFilter::All, |category| {
            CategoryFilter::Only((*category).to_string())
        });
        self.set_category_filter(filter);
    }

    fn reset_page(&mut self) {
        if let Some(pagination) = self.pagination.as_mut() {
            pagination.reset();
        }
    }

    fn admits(&self, query: &Query, record: &S::Record) -> bool {
        self.category.admits(S::category(record)) && query.matches(S::search_text(record))
    }

    /// Number of rows after category and search filtering.
    pub fn filtered_len(&self) -> usize {
        let query = Query::new(&self.search);
        self.store
            .iter()
            .filter(|record| self.admits(&query, record))
            .count()
    }

    /// Filtered, annotated and sorted projection of the collection.
    ///
    /// Pure: two calls with the same inputs return the same rows in the same
    /// order. Date-bearing variants are sorted soonest-expiring first (stable,
    /// so ties keep collection order); the rest keep collection order.
    pub fn derived_view(&self, now: DateTime<Utc>) -> Vec<ViewRow<'_, S::Record>> {
        let query = Query::new(&self.search);
        let mut rows: Vec<_> = self
            .store
            .iter()
            .filter(|record| self.admits(&query, record))
            .map(|record| ViewRow {
                record,
                days_remaining: S::due_date(record).map(|due| days_remaining(due, now)),
            })
            .collect();
        if rows.iter().any(|row| row.days_remaining.is_some()) {
            rows.sort_by_key(|row| row.days_remaining.unwrap_or(i64::MAX));
        }
        rows
    }

    /// The derived view cut down to the current page.
    ///
    /// Non-paginated variants return every row as page 1 of 1.
    pub fn page_view(&self, now: DateTime<Utc>) -> PageView<'_, S::Record> {
        let rows = self.derived_view(now);
        let total_rows = rows.len();
        match self.pagination {
            Some(pagination) => {
                let range = pagination.range(total_rows);
                PageView {
                    rows: rows[range].to_vec(),
                    page: pagination.current(total_rows),
                    total_pages: pagination.total_pages(total_rows),
                    total_rows,
                    has_prev: pagination.has_prev(total_rows),
                    has_next: pagination.has_next(total_rows),
                }
            }
            None => PageView {
                rows,
                page: 1,
                total_pages: 1,
                total_rows,
                has_prev: false,
                has_next: false,
            },
        }
    }

    /// Next page; no-op on the last page or for non-paginated variants.
    pub fn next_page(&mut self) {
        let len = self.filtered_len();
        if let Some(pagination) = self.pagination.as_mut() {
            pagination.next(len);
        }
    }

    /// Previous page; no-op on the first page or for non-paginated variants.
    pub fn prev_page(&mut self) {
        let len = self.filtered_len();
        if let Some(pagination) = self.pagination.as_mut() {
            pagination.prev(len);
        }
    }

    fn clamp_page(&mut self) {
        let len = self.filtered_len();
        if let Some(pagination) = self.pagination.as_mut() {
            pagination.clamp(len);
        }
    }

    /// Validate `form` and prepend a new record built from it.
    ///
    /// On a missing required field nothing changes and
    /// [`EngineError::Validation`] is returned.
    pub fn create(&mut self, form: &RecordForm) -> ResultEngine<RecordId> {
        form.validate()?;
        let id = self.store.fresh_id();
        let record = S::from_form(id.clone(), form)?;
        self.store.prepend(record)?;
        tracing::info!(kind = S::NOUN, %id, "record created");
        self.clamp_page();
        Ok(id)
    }

    /// Replace every field of record `id` with the form values, keeping the
    /// id and the record's position.
    pub fn update(&mut self, id: &RecordId, form: &RecordForm) -> ResultEngine<()> {
        if !self.store.contains(id) {
            return Err(EngineError::KeyNotFound(id.to_string()));
        }
        form.validate()?;
        let record = S::from_form(id.clone(), form)?;
        self.store.replace(record)?;
        tracing::info!(kind = S::NOUN, %id, "record updated");
        self.clamp_page();
        Ok(())
    }

    /// Remove record `id` once the user confirms.
    ///
    /// Returns `true` only when a record was removed. A declined prompt or an
    /// unknown id leaves everything untouched.
    pub fn delete(&mut self, id: &RecordId, prompt: &mut dyn ConfirmPrompt) -> bool {
        if !prompt.confirm(&format!("Delete this {}?", S::NOUN)) {
            return false;
        }
        if self.store.remove(id).is_none() {
            return false;
        }
        tracing::info!(kind = S::NOUN, %id, "record deleted");
        if self.revealed.as_ref() == Some(id) {
            self.revealed = None;
        }
        if matches!(&self.modal, Modal::Open { editing: Some(editing), .. } if editing == id) {
            self.modal = Modal::Closed;
        }
        self.clamp_page();
        true
    }

    /// Best-effort copy of `value`; never fails and never mutates state.
    pub fn copy_to_clipboard(
        &self,
        clipboard: &mut dyn Clipboard,
        value: &str,
        label: &str,
    ) -> Notice {
        match clipboard.write_text(value) {
            Ok(()) => Notice::success(label),
            Err(err) => {
                tracing::warn!(kind = S::NOUN, "clipboard write failed: {err}");
                Notice::error("Unable to copy")
            }
        }
    }

    /// Toggle the revealed secret row; only one row is revealed at a time.
    pub fn toggle_reveal(&mut self, id: &RecordId) {
        self.revealed = match &self.revealed {
            Some(current) if current == id => None,
            _ => Some(id.clone()),
        };
    }

    pub fn is_revealed(&self, id: &RecordId) -> bool {
        self.revealed.as_ref() == Some(id)
    }

    pub fn modal(&self) -> &Modal {
        &self.modal
    }

    pub fn form(&self) -> Option<&RecordForm> {
        match &self.modal {
            Modal::Open { form, .. } => Some(form),
            Modal::Closed => None,
        }
    }

    pub fn form_mut(&mut self) -> Option<&mut RecordForm> {
        match &mut self.modal {
            Modal::Open { form, .. } => Some(form),
            Modal::Closed => None,
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.modal, Modal::Open { editing: Some(_), .. })
    }

    /// Open an empty create form.
    pub fn open_create(&mut self) {
        self.modal = Modal::Open {
            editing: None,
            form: RecordForm::for_schema::<S>(),
        };
    }

    /// Open the edit form pre-populated from record `id`.
    pub fn open_edit(&mut self, id: &RecordId) -> ResultEngine<()> {
        let record = self
            .store
            .get(id)
            .ok_or_else(|| EngineError::KeyNotFound(id.to_string()))?;
        self.modal = Modal::Open {
            editing: Some(record.id().clone()),
            form: S::to_form(record),
        };
        Ok(())
    }

    /// Close the form, dropping whatever was typed.
    pub fn cancel_form(&mut self) {
        self.modal = Modal::Closed;
    }

    /// Submit the open form.
    ///
    /// On success the form closes. On failure it stays open with the message
    /// stored inline, and the error is returned as well.
    pub fn submit_form(&mut self) -> ResultEngine<Submitted> {
        let (editing, form) = match &self.modal {
            Modal::Open { editing, form } => (editing.clone(), form.clone()),
            Modal::Closed => {
                return Err(EngineError::Validation("no form is open".to_string()));
            }
        };
        let result = match editing {
            Some(id) => self.update(&id, &form).map(|()| Submitted::Updated(id)),
            None => self.create(&form).map(Submitted::Created),
        };
        match &result {
            Ok(_) => self.modal = Modal::Closed,
            Err(err) => {
                if let Some(form) = self.form_mut() {
                    form.set_error(err.to_string());
                }
            }
        }
        result
    }

    /// Notice text for a successful submit (`"Customer added"`).
    pub fn submitted_notice(submitted: &Submitted) -> Notice {
        match submitted {
            Submitted::Created(_) => Notice::success(format!("{} added", S::LABEL)),
            Submitted::Updated(_) => Notice::success(format!("{} updated", S::LABEL)),
        }
    }

    /// Notice text for a confirmed delete.
    pub fn deleted_notice() -> Notice {
        Notice::success(format!("{} deleted", S::LABEL))
    }
}
