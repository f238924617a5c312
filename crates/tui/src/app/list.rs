//! Key handling shared by the four record pages.

use chrono::{DateTime, Utc};
use engine::{
    Clipboard, ConfirmPrompt, CredentialSchema, CustomerSchema, ExpenseSchema, IncomeSchema,
    Notice, RecordId, RecordListController, RecordStore, Schema, UrlOpener,
};

use crate::ui::keymap::AppAction;

/// A field value a row shortcut copies, plus the notice shown on success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Copyable<'a> {
    pub value: Option<&'a str>,
    pub notice: &'static str,
}

/// Page-specific row shortcuts on top of the generic list keys.
pub trait RowActions: Schema {
    /// `(key, hint)` pairs for copy shortcuts.
    const COPY_KEYS: &'static [(char, &'static str)] = &[];
    /// Whether `r` toggles a hidden secret on the selected row.
    const REVEAL: bool = false;
    /// Whether `o` opens an external portal for the selected row.
    const PORTAL: bool = false;

    fn copy_field(_record: &Self::Record, _key: char) -> Option<Copyable<'_>> {
        None
    }

    fn portal_url(_record: &Self::Record) -> Option<&str> {
        None
    }
}

impl RowActions for CustomerSchema {
    const COPY_KEYS: &'static [(char, &'static str)] = &[('m', "copy email"), ('y', "copy phone")];

    fn copy_field(record: &Self::Record, key: char) -> Option<Copyable<'_>> {
        match key {
            'm' => Some(Copyable {
                value: record.email.as_deref(),
                notice: "Email copied",
            }),
            'y' => Some(Copyable {
                value: record.phone.as_deref(),
                notice: "Phone copied",
            }),
            _ => None,
        }
    }
}

impl RowActions for CredentialSchema {
    const COPY_KEYS: &'static [(char, &'static str)] =
        &[('l', "copy login"), ('y', "copy password")];
    const REVEAL: bool = true;
    const PORTAL: bool = true;

    fn copy_field(record: &Self::Record, key: char) -> Option<Copyable<'_>> {
        match key {
            'l' => Some(Copyable {
                value: record.login.as_deref(),
                notice: "Login copied",
            }),
            'y' => Some(Copyable {
                value: record.password.as_deref(),
                notice: "Password copied",
            }),
            _ => None,
        }
    }

    fn portal_url(record: &Self::Record) -> Option<&str> {
        record.url.as_deref()
    }
}

impl RowActions for IncomeSchema {}

impl RowActions for ExpenseSchema {}

/// External services a list key may reach.
pub struct Collaborators<'a> {
    pub clipboard: &'a mut dyn Clipboard,
    pub opener: &'a mut dyn UrlOpener,
    pub prompt: &'a mut dyn ConfirmPrompt,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListOutcome {
    Handled,
    Notice(Notice),
    /// Not a list key; the caller tries global shortcuts.
    Ignored,
}

/// One record page: its controller plus row selection and search focus.
#[derive(Debug)]
pub struct ListPage<S: Schema> {
    pub controller: RecordListController<S>,
    /// Index into the rows of the current page.
    pub selected: usize,
    pub search_active: bool,
}

impl<S: RowActions> ListPage<S> {
    pub fn new(store: RecordStore<S::Record>) -> Self {
        Self {
            controller: RecordListController::new(store),
            selected: 0,
            search_active: false,
        }
    }

    /// `true` while keys go to the form or the search box.
    pub fn captures_text(&self) -> bool {
        self.search_active || self.controller.form().is_some()
    }

    pub fn selected_record(&self, now: DateTime<Utc>) -> Option<&S::Record> {
        self.controller
            .page_view(now)
            .rows
            .get(self.selected)
            .map(|row| row.record)
    }

    fn selected_id(&self, now: DateTime<Utc>) -> Option<RecordId> {
        self.selected_record(now)
            .map(|record| engine::Record::id(record).clone())
    }

    fn page_len(&self, now: DateTime<Utc>) -> usize {
        self.controller.page_view(now).rows.len()
    }

    fn select_next(&mut self, now: DateTime<Utc>) {
        let len = self.page_len(now);
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
    }

    fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn clamp_selection(&mut self, now: DateTime<Utc>) {
        self.selected = self.selected.min(self.page_len(now).saturating_sub(1));
    }

    /// Close the form and the search box, keeping the query.
    pub fn reset_modes(&mut self) {
        self.controller.cancel_form();
        self.search_active = false;
    }

    pub fn handle(
        &mut self,
        action: AppAction,
        now: DateTime<Utc>,
        ctx: &mut Collaborators<'_>,
    ) -> ListOutcome {
        if self.controller.form().is_some() {
            return self.handle_form(action, now);
        }
        if self.search_active {
            self.handle_search(action);
            return ListOutcome::Handled;
        }

        match action {
            AppAction::Up => self.select_prev(),
            AppAction::Down => self.select_next(now),
            AppAction::NextPage | AppAction::Input('n') => {
                self.controller.next_page();
                self.selected = 0;
            }
            AppAction::PrevPage | AppAction::Input('p') => {
                self.controller.prev_page();
                self.selected = 0;
            }
            AppAction::Cancel if !self.controller.search_text().is_empty() => {
                self.controller.set_search_text("");
                self.selected = 0;
            }
            AppAction::Input('/') => self.search_active = true,
            AppAction::Input('a') => self.controller.open_create(),
            AppAction::Input('e') => {
                if let Some(id) = self.selected_id(now)
                    && let Err(err) = self.controller.open_edit(&id)
                {
                    return ListOutcome::Notice(Notice::error(err.to_string()));
                }
            }
            AppAction::Input('d') => return self.delete_selected(now, ctx),
            AppAction::Input('f') if !S::CATEGORIES.is_empty() => {
                self.controller.cycle_category();
                self.selected = 0;
            }
            AppAction::Input('r') if S::REVEAL => {
                if let Some(id) = self.selected_id(now) {
                    self.controller.toggle_reveal(&id);
                }
            }
            AppAction::Input('o') if S::PORTAL => return self.open_portal(now, ctx),
            AppAction::Input(key) if S::COPY_KEYS.iter().any(|(k, _)| *k == key) => {
                return self.copy_selected(key, now, ctx);
            }
            _ => return ListOutcome::Ignored,
        }
        ListOutcome::Handled
    }

    fn handle_form(&mut self, action: AppAction, now: DateTime<Utc>) -> ListOutcome {
        if action == AppAction::Submit {
            return match self.controller.submit_form() {
                Ok(submitted) => {
                    self.clamp_selection(now);
                    ListOutcome::Notice(RecordListController::<S>::submitted_notice(&submitted))
                }
                // Shown inline; the form stays open.
                Err(err) if err.is_validation() => ListOutcome::Handled,
                Err(err) => ListOutcome::Notice(Notice::error(err.to_string())),
            };
        }
        if action == AppAction::Cancel {
            self.controller.cancel_form();
            return ListOutcome::Handled;
        }

        let Some(form) = self.controller.form_mut() else {
            return ListOutcome::Handled;
        };
        match action {
            AppAction::NextField | AppAction::Down => form.focus_next(),
            AppAction::PrevField | AppAction::Up => form.focus_prev(),
            AppAction::Left => form.cycle_choice(false),
            AppAction::Right => form.cycle_choice(true),
            AppAction::Backspace => form.pop_char(),
            AppAction::Input(ch) => form.push_char(ch),
            _ => {}
        }
        ListOutcome::Handled
    }

    fn handle_search(&mut self, action: AppAction) {
        match action {
            AppAction::Submit => self.search_active = false,
            AppAction::Cancel => {
                self.search_active = false;
                self.controller.set_search_text("");
            }
            AppAction::Backspace => {
                let mut text = self.controller.search_text().to_string();
                text.pop();
                self.controller.set_search_text(text);
            }
            AppAction::Input(ch) => {
                let mut text = self.controller.search_text().to_string();
                text.push(ch);
                self.controller.set_search_text(text);
            }
            _ => return,
        }
        self.selected = 0;
    }

    fn delete_selected(&mut self, now: DateTime<Utc>, ctx: &mut Collaborators<'_>) -> ListOutcome {
        let Some(id) = self.selected_id(now) else {
            return ListOutcome::Handled;
        };
        if !self.controller.delete(&id, &mut *ctx.prompt) {
            return ListOutcome::Handled;
        }
        self.clamp_selection(now);
        ListOutcome::Notice(RecordListController::<S>::deleted_notice())
    }

    fn copy_selected(
        &mut self,
        key: char,
        now: DateTime<Utc>,
        ctx: &mut Collaborators<'_>,
    ) -> ListOutcome {
        let Some(record) = self.selected_record(now) else {
            return ListOutcome::Handled;
        };
        let Some(copy) = S::copy_field(record, key) else {
            return ListOutcome::Ignored;
        };
        let notice = match copy.value {
            Some(value) => {
                self.controller
                    .copy_to_clipboard(&mut *ctx.clipboard, value, copy.notice)
            }
            None => Notice::info("Nothing to copy"),
        };
        ListOutcome::Notice(notice)
    }

    fn open_portal(&mut self, now: DateTime<Utc>, ctx: &mut Collaborators<'_>) -> ListOutcome {
        let Some(record) = self.selected_record(now) else {
            return ListOutcome::Handled;
        };
        let Some(url) = S::portal_url(record) else {
            return ListOutcome::Notice(Notice::info("No portal URL saved"));
        };
        match ctx.opener.open(url) {
            Ok(()) => ListOutcome::Notice(Notice::info(format!("Opening {url}"))),
            Err(err) => {
                tracing::warn!(url, "portal open failed: {err}");
                ListOutcome::Notice(Notice::error("Unable to open portal"))
            }
        }
    }
}
