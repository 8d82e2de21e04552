// src/services/email.rs
//
// Named email templates and composition. Messages land in the store's
// outbox; SMTP delivery is handled outside this service.
use chrono::Utc;
use serde::Deserialize;
use std::collections::HashMap;

use crate::models::{Investment, Investor, OutboxMessage};
use crate::services::templates::Templater;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailKind {
    Welcome,
    InvestmentConfirmation,
    InterestCredit,
    MaturityNotice,
}

impl EmailKind {
    pub fn parse(s: &str) -> Option<EmailKind> {
        match s {
            "welcome" => Some(EmailKind::Welcome),
            "investment_confirmation" => Some(EmailKind::InvestmentConfirmation),
            "interest_credit" => Some(EmailKind::InterestCredit),
            "maturity_notice" => Some(EmailKind::MaturityNotice),
            _ => None,
        }
    }

    fn subject(&self) -> &'static str {
        match self {
            EmailKind::Welcome => "Welcome to {{companyName}}, {{firstName}}",
            EmailKind::InvestmentConfirmation => "Your investment with {{companyName}} is confirmed",
            EmailKind::InterestCredit => "Interest credited to your account",
            EmailKind::MaturityNotice => "Your investment has matured",
        }
    }

    fn body(&self) -> &'static str {
        match self {
            EmailKind::Welcome => {
                "Dear {{investorName}},\n\n\
                 Your investor portal account is ready.\n\n\
                 Username: {{username}}\n\
                 Temporary password: {{password}}\n\n\
                 Sign in at {{investorPortalUrl}} and change your password on first login.\n\n\
                 Questions? Write to {{supportEmail}}.\n\n\
                 {{companyName}}, {{currentDate}}"
            }
            EmailKind::InvestmentConfirmation => {
                "Dear {{firstName}},\n\n\
                 We have recorded your investment of {{investmentAmount}} \
                 ({{bondUnits}} bond units).\n\n\
                 You can review it any time at {{investorPortalUrl}}.\n\n\
                 {{companyName}}, {{currentDate}}"
            }
            EmailKind::InterestCredit => {
                "Dear {{firstName}},\n\n\
                 Interest of {{investmentAmount}} has been credited against your holding.\n\n\
                 {{companyName}}, {{currentDate}}"
            }
            EmailKind::MaturityNotice => {
                "Dear {{firstName}},\n\n\
                 Your investment of {{investmentAmount}} has reached maturity and is \
                 eligible for payout. Our team will contact you at {{email}}.\n\n\
                 Questions? Write to {{supportEmail}}.\n\n\
                 {{companyName}}, {{currentYear}}"
            }
        }
    }
}

/// Merge fields for one investor, optionally enriched with one investment.
pub fn merge_fields(
    investor: &Investor,
    investment: Option<&Investment>,
    portal_url: &str,
) -> HashMap<String, String> {
    let mut fields = HashMap::new();
    fields.insert("investorName".to_string(), investor.full_name.clone());
    fields.insert("firstName".to_string(), investor.first_name.clone());
    fields.insert("email".to_string(), investor.email.clone());
    fields.insert("username".to_string(), investor.username.clone());
    fields.insert("investorPortalUrl".to_string(), portal_url.to_string());
    if let Some(inv) = investment {
        fields.insert(
            "investmentAmount".to_string(),
            format!("{:.2}", inv.principal),
        );
        fields.insert("bondUnits".to_string(), inv.bond_units.to_string());
    }
    fields
}

pub fn compose(
    kind: EmailKind,
    templater: &Templater,
    investor: &Investor,
    mut fields: HashMap<String, String>,
) -> OutboxMessage {
    let subject = templater.render(kind.subject(), &fields);
    // Password fields are only meaningful for the welcome mail; anywhere
    // else the placeholder renders empty, which is the contract.
    if kind != EmailKind::Welcome {
        fields.remove("password");
    }
    let body = templater.render(kind.body(), &fields);
    OutboxMessage {
        to: investor.email.clone(),
        subject,
        body,
        composed_at: Utc::now(),
    }
}
