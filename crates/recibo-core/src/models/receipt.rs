//! Receipt data models filled in by the language model.
//!
//! These are advisory target schemas: the pipeline forwards whatever JSON
//! the model produced without enforcing them. Callers wanting typed access
//! can go through [`crate::pipeline::PipelineResult::parse_success`].

use serde::{Deserialize, Serialize};

/// A fully itemized receipt (detailed variant).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DetailedReceipt {
    /// Merchant identity block.
    pub merchant_info: MerchantInfo,

    /// Visit metadata (date, time, server, table).
    pub receipt_info: ReceiptInfo,

    /// Purchased line items.
    pub items: Vec<LineItem>,

    /// Totals block.
    pub totals: Totals,

    /// Suggested tips at common percentages.
    pub tip_suggestions: TipSuggestions,
}

/// Merchant identity as printed on the receipt.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MerchantInfo {
    pub name: String,
    pub address: Vec<String>,
    pub phone: String,
}

/// Visit metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReceiptInfo {
    pub date: String,
    pub time: String,
    pub server: String,
    pub table: String,
}

/// One purchased item.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LineItem {
    pub name: String,
    pub price: f64,
}

/// Totals block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Totals {
    pub subtotal: f64,
    pub tax: f64,
    pub service_charge: ServiceCharge,
    pub total: f64,
}

/// Service charge as percent plus absolute amount.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceCharge {
    pub percent: i64,
    pub amount: f64,
}

/// Suggested tips keyed by percentage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TipSuggestions {
    #[serde(rename = "15%")]
    pub fifteen: f64,

    #[serde(rename = "18%")]
    pub eighteen: f64,

    #[serde(rename = "20%")]
    pub twenty: f64,
}

/// Aggregate spending summary (aggregate variant).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpenseSummary {
    /// Short human-readable label, usually the merchant name.
    pub title: String,

    /// Total amount spent.
    pub amount: f64,

    /// Spending category assigned by the model.
    pub category: ExpenseCategory,
}

/// Spending category used by expense tracking callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpenseCategory {
    Food,
    Transport,
    Housing,
    Utilities,
    Entertainment,
    Shopping,
    Health,
    Other,
}

impl Default for ExpenseCategory {
    fn default() -> Self {
        Self::Other
    }
}
