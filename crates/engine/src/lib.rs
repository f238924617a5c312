pub use amount::Amount;
pub use collab::{
    Account, AuthProvider, Clipboard, ConfirmPrompt, LocalAuth, Notice, NoticeLevel, UrlOpener,
    User,
};
pub use controller::{CategoryFilter, Modal, PageView, RecordListController, Submitted, ViewRow};
pub use credentials::{Credential, CredentialKind, CredentialSchema};
pub use customers::{Customer, CustomerSchema};
pub use dashboard::{DashboardSummary, Renewal};
pub use error::EngineError;
pub use form::{FormField, RecordForm};
pub use ledger::{ExpenseSchema, IncomeSchema, LedgerEntry};
pub use pagination::Pagination;
pub use schema::{FieldKind, FieldSpec, Record, RecordId, Schema};
pub use seed::{SeedFile, Stores};
pub use store::RecordStore;
pub use urgency::{DATE_FORMAT, Urgency, days_remaining, expiry_hint, parse_date};

mod amount;
mod collab;
mod controller;
mod credentials;
mod customers;
mod dashboard;
mod error;
mod form;
mod ledger;
mod pagination;
mod schema;
pub mod search;
mod seed;
mod store;
mod urgency;

pub type ResultEngine<T> = Result<T, EngineError>;

pub type CustomerController = RecordListController<CustomerSchema>;
pub type CredentialController = RecordListController<CredentialSchema>;
pub type IncomeController = RecordListController<IncomeSchema>;
pub type ExpenseController = RecordListController<ExpenseSchema>;
