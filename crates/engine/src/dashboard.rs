//! Overview figures computed from the live stores.

use chrono::{DateTime, Utc};

use crate::{
    Amount, Credential, Stores,
    ledger::total,
    urgency::{Urgency, days_remaining},
};

/// A credential with its days until expiry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Renewal<'a> {
    pub credential: &'a Credential,
    pub days_remaining: i64,
}

impl Renewal<'_> {
    #[must_use]
    pub const fn urgency(&self) -> Urgency {
        Urgency::from_days(self.days_remaining)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardSummary<'a> {
    pub customers: usize,
    pub credentials: usize,
    pub total_income: Amount,
    pub total_expenses: Amount,
    /// Soonest first.
    pub renewals: Vec<Renewal<'a>>,
}

impl<'a> DashboardSummary<'a> {
    pub fn compute(stores: &'a Stores, now: DateTime<Utc>) -> Self {
        Self::from_parts(
            stores.customers.len(),
            stores.credentials.as_slice(),
            total(stores.income.iter()),
            total(stores.expenses.iter()),
            now,
        )
    }

    /// Build from the pieces the front-end keeps in separate controllers.
    pub fn from_parts(
        customers: usize,
        credentials: &'a [Credential],
        total_income: Amount,
        total_expenses: Amount,
        now: DateTime<Utc>,
    ) -> Self {
        let mut renewals: Vec<_> = credentials
            .iter()
            .map(|credential| Renewal {
                credential,
                days_remaining: days_remaining(credential.expiry, now),
            })
            .collect();
        renewals.sort_by_key(|renewal| renewal.days_remaining);
        Self {
            customers,
            credentials: credentials.len(),
            total_income,
            total_expenses,
            renewals,
        }
    }

    /// Income minus expenses; negative when spending exceeds income.
    #[must_use]
    pub fn net(&self) -> Amount {
        self.total_income - self.total_expenses
    }

    /// Days until the next renewal, `None` without credentials.
    #[must_use]
    pub fn min_days(&self) -> Option<i64> {
        self.renewals.first().map(|renewal| renewal.days_remaining)
    }

    #[must_use]
    pub fn count(&self, urgency: Urgency) -> usize {
        self.renewals
            .iter()
            .filter(|renewal| renewal.urgency() == urgency)
            .count()
    }
}
