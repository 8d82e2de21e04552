// src/models.rs
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvestorStatus {
    Active,
    Suspended,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Investor {
    pub id: u64,
    pub full_name: String,
    pub first_name: String,
    pub email: String,
    pub phone: String,
    pub username: String,
    pub status: InvestorStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvestmentStatus {
    Active,
    Matured,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Investment {
    pub id: u64,
    pub investor_id: u64,
    pub principal: f64,
    pub bond_units: u32,
    pub purchase_date: NaiveDate,
    pub maturity_date: NaiveDate,
    pub year_of_holding: u32,
    pub status: InvestmentStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    Deposit,
    InterestCredit,
    Withdrawal,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let label = match self {
            TransactionKind::Deposit => "Deposit",
            TransactionKind::InterestCredit => "Interest Credit",
            TransactionKind::Withdrawal => "Withdrawal",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionStatus {
    Completed,
    Pending,
    Failed,
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let label = match self {
            TransactionStatus::Completed => "Completed",
            TransactionStatus::Pending => "Pending",
            TransactionStatus::Failed => "Failed",
        };
        write!(f, "{}", label)
    }
}

/// Append-only record of money movement against one investment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: u64,
    pub investment_id: u64,
    pub date: NaiveDate,
    pub kind: TransactionKind,
    pub amount: f64,
    pub mode: String,
    pub status: TransactionStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgreementStatus {
    Unsigned,
    Signed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agreement {
    pub id: u64,
    pub investor_id: u64,
    pub title: String,
    pub status: AgreementStatus,
    pub signatory_name: Option<String>,
    pub signatory_email: Option<String>,
    // Captured signature image payload, treated as opaque text.
    pub signature: Option<String>,
    pub signed_at: Option<DateTime<Utc>>,
}

/// The full record set the portal serves and the backup pipeline protects.
/// Agreements deliberately stay outside the snapshot format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub investors: Vec<Investor>,
    pub investments: Vec<Investment>,
    pub transactions: Vec<Transaction>,
}

impl Dataset {
    pub fn is_empty(&self) -> bool {
        self.investors.is_empty() && self.investments.is_empty() && self.transactions.is_empty()
    }
}

/// On-disk backup format: the three record arrays plus an explicit creation
/// timestamp. Recency is decided by `created_at`, not by filename; older
/// snapshots without the field still parse and fall back to filename order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupSnapshot {
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    pub investors: Vec<Investor>,
    pub investments: Vec<Investment>,
    pub transactions: Vec<Transaction>,
}

impl BackupSnapshot {
    pub fn from_dataset(data: &Dataset, created_at: DateTime<Utc>) -> Self {
        BackupSnapshot {
            created_at: Some(created_at),
            investors: data.investors.clone(),
            investments: data.investments.clone(),
            transactions: data.transactions.clone(),
        }
    }

    pub fn into_dataset(self) -> Dataset {
        Dataset {
            investors: self.investors,
            investments: self.investments,
            transactions: self.transactions,
        }
    }
}

/// A composed email waiting in the outbox. Delivery is someone else's job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutboxMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
    pub composed_at: DateTime<Utc>,
}
