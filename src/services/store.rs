// src/services/store.rs
use chrono::{NaiveDate, Utc};
use log::info;
use serde::Deserialize;
use std::fmt;
use tokio::sync::RwLock;

use crate::models::{
    Agreement, AgreementStatus, Dataset, Investment, InvestmentStatus, Investor, InvestorStatus,
    OutboxMessage, Transaction, TransactionKind, TransactionStatus,
};
use crate::services::backup::RecoveryReport;

#[derive(Debug)]
pub enum StoreError {
    InvestorNotFound(u64),
    InvestmentNotFound(u64),
    AgreementNotFound(u64),
    AlreadyMatured(u64),
    AlreadySigned(u64),
    InvalidInput(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StoreError::InvestorNotFound(id) => write!(f, "investor {} not found", id),
            StoreError::InvestmentNotFound(id) => write!(f, "investment {} not found", id),
            StoreError::AgreementNotFound(id) => write!(f, "agreement {} not found", id),
            StoreError::AlreadyMatured(id) => write!(f, "investment {} is already matured", id),
            StoreError::AlreadySigned(id) => write!(f, "agreement {} is already signed", id),
            StoreError::InvalidInput(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

#[derive(Debug, Deserialize)]
pub struct NewInvestor {
    pub full_name: String,
    pub first_name: String,
    pub email: String,
    pub phone: String,
    pub username: String,
}

/// The contact-profile subset an investor (or admin) may change after
/// creation. Identity fields are fixed.
#[derive(Debug, Deserialize)]
pub struct InvestorUpdate {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: Option<InvestorStatus>,
}

#[derive(Debug, Deserialize)]
pub struct NewInvestment {
    pub investor_id: u64,
    pub principal: f64,
    pub bond_units: u32,
    pub purchase_date: NaiveDate,
    pub maturity_date: NaiveDate,
    pub year_of_holding: u32,
}

#[derive(Debug, Deserialize)]
pub struct NewTransaction {
    pub investment_id: u64,
    pub date: NaiveDate,
    pub kind: TransactionKind,
    pub amount: f64,
    pub mode: String,
    pub status: TransactionStatus,
}

#[derive(Debug, Default)]
struct StoreState {
    data: Dataset,
    agreements: Vec<Agreement>,
    outbox: Vec<OutboxMessage>,
    last_recovery: Option<RecoveryReport>,
    next_id: u64,
}

/// In-memory record store shared across handlers. Durability comes from the
/// backup pipeline, not from this struct; everything here is lost on restart
/// and recovered through the chain at the next boot.
pub struct DataStore {
    state: RwLock<StoreState>,
}

fn max_id(data: &Dataset) -> u64 {
    let a = data.investors.iter().map(|i| i.id).max().unwrap_or(0);
    let b = data.investments.iter().map(|i| i.id).max().unwrap_or(0);
    let c = data.transactions.iter().map(|t| t.id).max().unwrap_or(0);
    a.max(b).max(c)
}

impl DataStore {
    pub fn from_dataset(data: Dataset) -> Self {
        let next_id = max_id(&data) + 1;
        DataStore {
            state: RwLock::new(StoreState {
                data,
                next_id,
                ..StoreState::default()
            }),
        }
    }

    /// Boot-time constructor: adopt whatever the recovery chain produced and
    /// keep its report around for the admin endpoint.
    pub fn from_recovery(recovery: crate::services::backup::Recovery) -> Self {
        let next_id = max_id(&recovery.dataset) + 1;
        DataStore {
            state: RwLock::new(StoreState {
                data: recovery.dataset,
                last_recovery: Some(recovery.report),
                next_id,
                ..StoreState::default()
            }),
        }
    }

    /// Swap in a recovered dataset wholesale. Agreements and the outbox are
    /// not part of the snapshot format and survive the swap.
    pub async fn replace_dataset(&self, data: Dataset, report: RecoveryReport) {
        let mut state = self.state.write().await;
        info!(
            "Replacing dataset: {} investors -> {} investors",
            state.data.investors.len(),
            data.investors.len()
        );
        state.next_id = max_id(&data) + 1;
        state.data = data;
        state.last_recovery = Some(report);
    }

    pub async fn snapshot(&self) -> Dataset {
        self.state.read().await.data.clone()
    }

    pub async fn last_recovery_report(&self) -> Option<RecoveryReport> {
        self.state.read().await.last_recovery.clone()
    }

    // ---- investors ----

    pub async fn list_investors(&self) -> Vec<Investor> {
        self.state.read().await.data.investors.clone()
    }

    pub async fn get_investor(&self, id: u64) -> Result<Investor, StoreError> {
        self.state
            .read()
            .await
            .data
            .investors
            .iter()
            .find(|i| i.id == id)
            .cloned()
            .ok_or(StoreError::InvestorNotFound(id))
    }

    pub async fn create_investor(&self, new: NewInvestor) -> Result<Investor, StoreError> {
        if new.full_name.trim().is_empty() || new.email.trim().is_empty() {
            return Err(StoreError::InvalidInput(
                "investor name and email are required".to_string(),
            ));
        }
        let mut state = self.state.write().await;
        let id = state.next_id;
        state.next_id += 1;
        let investor = Investor {
            id,
            full_name: new.full_name,
            first_name: new.first_name,
            email: new.email,
            phone: new.phone,
            username: new.username,
            status: InvestorStatus::Active,
        };
        state.data.investors.push(investor.clone());
        info!("Created investor {} ({})", investor.id, investor.full_name);
        Ok(investor)
    }

    pub async fn update_investor(
        &self,
        id: u64,
        update: InvestorUpdate,
    ) -> Result<Investor, StoreError> {
        let mut state = self.state.write().await;
        let investor = state
            .data
            .investors
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(StoreError::InvestorNotFound(id))?;
        if let Some(email) = update.email {
            investor.email = email;
        }
        if let Some(phone) = update.phone {
            investor.phone = phone;
        }
        if let Some(status) = update.status {
            investor.status = status;
        }
        Ok(investor.clone())
    }

    // ---- investments ----

    pub async fn get_investment(&self, id: u64) -> Result<Investment, StoreError> {
        self.state
            .read()
            .await
            .data
            .investments
            .iter()
            .find(|i| i.id == id)
            .cloned()
            .ok_or(StoreError::InvestmentNotFound(id))
    }

    pub async fn list_investments_for(&self, investor_id: u64) -> Result<Vec<Investment>, StoreError> {
        let state = self.state.read().await;
        if !state.data.investors.iter().any(|i| i.id == investor_id) {
            return Err(StoreError::InvestorNotFound(investor_id));
        }
        Ok(state
            .data
            .investments
            .iter()
            .filter(|i| i.investor_id == investor_id)
            .cloned()
            .collect())
    }

    pub async fn create_investment(&self, new: NewInvestment) -> Result<Investment, StoreError> {
        if new.principal <= 0.0 {
            return Err(StoreError::InvalidInput(
                "principal must be positive".to_string(),
            ));
        }
        if new.bond_units == 0 {
            return Err(StoreError::InvalidInput(
                "at least one bond unit is required".to_string(),
            ));
        }
        if new.year_of_holding == 0 {
            return Err(StoreError::InvalidInput(
                "year of holding must be at least 1".to_string(),
            ));
        }
        let mut state = self.state.write().await;
        // Every investment must reference an existing investor.
        if !state.data.investors.iter().any(|i| i.id == new.investor_id) {
            return Err(StoreError::InvestorNotFound(new.investor_id));
        }
        let id = state.next_id;
        state.next_id += 1;
        let investment = Investment {
            id,
            investor_id: new.investor_id,
            principal: new.principal,
            bond_units: new.bond_units,
            purchase_date: new.purchase_date,
            maturity_date: new.maturity_date,
            year_of_holding: new.year_of_holding,
            status: InvestmentStatus::Active,
        };
        state.data.investments.push(investment.clone());
        info!(
            "Created investment {} for investor {}",
            investment.id, investment.investor_id
        );
        Ok(investment)
    }

    /// The only mutation an investment allows: Active -> Matured, one way.
    pub async fn mature_investment(&self, id: u64) -> Result<Investment, StoreError> {
        let mut state = self.state.write().await;
        let investment = state
            .data
            .investments
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(StoreError::InvestmentNotFound(id))?;
        if investment.status == InvestmentStatus::Matured {
            return Err(StoreError::AlreadyMatured(id));
        }
        investment.status = InvestmentStatus::Matured;
        Ok(investment.clone())
    }

    // ---- transactions ----

    pub async fn list_transactions_for(
        &self,
        investment_id: u64,
    ) -> Result<Vec<Transaction>, StoreError> {
        let state = self.state.read().await;
        if !state.data.investments.iter().any(|i| i.id == investment_id) {
            return Err(StoreError::InvestmentNotFound(investment_id));
        }
        Ok(state
            .data
            .transactions
            .iter()
            .filter(|t| t.investment_id == investment_id)
            .cloned()
            .collect())
    }

    pub async fn record_transaction(&self, new: NewTransaction) -> Result<Transaction, StoreError> {
        if new.amount <= 0.0 {
            return Err(StoreError::InvalidInput(
                "transaction amount must be positive".to_string(),
            ));
        }
        let mut state = self.state.write().await;
        // Every transaction must reference an existing investment.
        if !state
            .data
            .investments
            .iter()
            .any(|i| i.id == new.investment_id)
        {
            return Err(StoreError::InvestmentNotFound(new.investment_id));
        }
        let id = state.next_id;
        state.next_id += 1;
        let transaction = Transaction {
            id,
            investment_id: new.investment_id,
            date: new.date,
            kind: new.kind,
            amount: new.amount,
            mode: new.mode,
            status: new.status,
        };
        state.data.transactions.push(transaction.clone());
        Ok(transaction)
    }

    // ---- agreements ----

    pub async fn create_agreement(
        &self,
        investor_id: u64,
        title: String,
    ) -> Result<Agreement, StoreError> {
        let mut state = self.state.write().await;
        if !state.data.investors.iter().any(|i| i.id == investor_id) {
            return Err(StoreError::InvestorNotFound(investor_id));
        }
        let id = state.next_id;
        state.next_id += 1;
        let agreement = Agreement {
            id,
            investor_id,
            title,
            status: AgreementStatus::Unsigned,
            signatory_name: None,
            signatory_email: None,
            signature: None,
            signed_at: None,
        };
        state.agreements.push(agreement.clone());
        Ok(agreement)
    }

    pub async fn get_agreement(&self, id: u64) -> Result<Agreement, StoreError> {
        self.state
            .read()
            .await
            .agreements
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or(StoreError::AgreementNotFound(id))
    }

    /// Unsigned -> Signed, exactly once.
    pub async fn sign_agreement(
        &self,
        id: u64,
        signature: String,
        signatory_name: String,
        signatory_email: String,
    ) -> Result<Agreement, StoreError> {
        if signature.trim().is_empty() {
            return Err(StoreError::InvalidInput(
                "a captured signature is required".to_string(),
            ));
        }
        let mut state = self.state.write().await;
        let agreement = state
            .agreements
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(StoreError::AgreementNotFound(id))?;
        if agreement.status == AgreementStatus::Signed {
            return Err(StoreError::AlreadySigned(id));
        }
        agreement.status = AgreementStatus::Signed;
        agreement.signature = Some(signature);
        agreement.signatory_name = Some(signatory_name);
        agreement.signatory_email = Some(signatory_email);
        agreement.signed_at = Some(Utc::now());
        Ok(agreement.clone())
    }

    // ---- outbox ----

    pub async fn push_outbox(&self, message: OutboxMessage) {
        self.state.write().await.outbox.push(message);
    }

    pub async fn list_outbox(&self) -> Vec<OutboxMessage> {
        self.state.read().await.outbox.clone()
    }
}
