//! Studio staff and client billing records.

use crate::{InvoiceId, MemberId, ProjectId, Role};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A person on the studio roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub id: MemberId,
    pub name: String,
    pub role: Role,
    #[serde(default)]
    pub email: String,
}

impl TeamMember {
    #[must_use]
    pub fn new(name: impl Into<String>, role: Role, email: impl Into<String>) -> Self {
        Self {
            id: MemberId::new(),
            name: name.into(),
            role,
            email: email.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InvoiceStatus {
    #[default]
    Draft,
    Sent,
    Paid,
    Overdue,
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Draft => "draft",
            Self::Sent => "sent",
            Self::Paid => "paid",
            Self::Overdue => "overdue",
        })
    }
}

/// A bill issued to the client of a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: InvoiceId,
    pub project: ProjectId,
    /// Studio-facing invoice number, e.g. `"INV-2026-014"`.
    pub number: String,
    pub amount: u64,
    #[serde(default)]
    pub status: InvoiceStatus,
    pub issued: NaiveDate,
    pub due: NaiveDate,
}

impl Invoice {
    #[must_use]
    pub fn new(
        project: ProjectId,
        number: impl Into<String>,
        amount: u64,
        issued: NaiveDate,
        due: NaiveDate,
    ) -> Self {
        Self {
            id: InvoiceId::new(),
            project,
            number: number.into(),
            amount,
            status: InvoiceStatus::Draft,
            issued,
            due,
        }
    }

    #[must_use]
    pub fn is_paid(&self) -> bool {
        self.status == InvoiceStatus::Paid
    }
}
