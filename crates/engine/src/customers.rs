use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::{
    RecordForm, ResultEngine,
    schema::{FieldKind, FieldSpec, Record, RecordId, Schema},
};

/// A client of the business.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: RecordId,
    pub client_name: String,
    pub company_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gst: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Record for Customer {
    fn id(&self) -> &RecordId {
        &self.id
    }
}

/// Customers page: searchable by name, company, email, phone and GST;
/// paginated by 8.
#[derive(Clone, Copy, Debug, Default)]
pub struct CustomerSchema;

const FIELDS: &[FieldSpec] = &[
    FieldSpec::required("client_name", "Client Name", FieldKind::Text),
    FieldSpec::required("company_name", "Company Name", FieldKind::Text),
    FieldSpec::optional("designation", "Designation", FieldKind::Text),
    FieldSpec::optional("address", "Address", FieldKind::Text),
    FieldSpec::optional("phone", "Phone", FieldKind::Text),
    FieldSpec::optional("email", "Email", FieldKind::Text),
    FieldSpec::optional("gst", "GST", FieldKind::Text),
    FieldSpec::optional("tags", "Tags", FieldKind::Tags),
];

impl Schema for CustomerSchema {
    type Record = Customer;

    const NOUN: &'static str = "customer";
    const LABEL: &'static str = "Customer";
    const PAGE_SIZE: Option<usize> = Some(8);

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn search_text(record: &Customer) -> Vec<Cow<'_, str>> {
        [
            Some(record.client_name.as_str()),
            Some(record.company_name.as_str()),
            record.email.as_deref(),
            record.phone.as_deref(),
            record.gst.as_deref(),
        ]
        .into_iter()
        .flatten()
        .map(Cow::Borrowed)
        .collect()
    }

    fn to_form(record: &Customer) -> RecordForm {
        RecordForm::for_schema::<Self>()
            .with("client_name", record.client_name.as_str())
            .with("company_name", record.company_name.as_str())
            .with("designation", record.designation.clone().unwrap_or_default())
            .with("address", record.address.clone().unwrap_or_default())
            .with("phone", record.phone.clone().unwrap_or_default())
            .with("email", record.email.clone().unwrap_or_default())
            .with("gst", record.gst.clone().unwrap_or_default())
            .with("tags", record.tags.join(", "))
    }

    fn from_form(id: RecordId, form: &RecordForm) -> ResultEngine<Customer> {
        Ok(Customer {
            id,
            client_name: form.text("client_name"),
            company_name: form.text("company_name"),
            designation: form.optional_text("designation"),
            address: form.optional_text("address"),
            phone: form.optional_text("phone"),
            email: form.optional_text("email"),
            gst: form.optional_text("gst"),
            tags: form.tags("tags"),
        })
    }
}
