use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::method::CollectionMethod;
use crate::money::Lira;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    Pending,
    Approved,
    Cancelled,
}

impl std::fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryStatus::Pending => write!(f, "Beklemede"),
            EntryStatus::Approved => write!(f, "Onaylandı"),
            EntryStatus::Cancelled => write!(f, "İptal"),
        }
    }
}

impl std::str::FromStr for EntryStatus {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Beklemede" | "pending" => Ok(EntryStatus::Pending),
            "Onaylandı" | "approved" => Ok(EntryStatus::Approved),
            "İptal" | "cancelled" => Ok(EntryStatus::Cancelled),
            other => Err(format!("Unknown entry status: '{other}'")),
        }
    }
}

/// One recorded collection against a customer account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionEntry {
    pub id: Option<i64>,
    /// Value date of the collection (not the moment it was keyed in).
    pub date: NaiveDate,
    pub customer_code: String,
    pub customer_name: String,
    pub method: CollectionMethod,
    /// Bank name, for bank-routed methods.
    pub bank: Option<String>,
    pub amount: Lira,
    pub document_number: Option<String>,
    pub status: EntryStatus,
    pub region: Option<String>,
    /// Salesperson (plasiyer) the collection is credited to.
    pub salesperson: String,
    pub recorded_at: Option<DateTime<Utc>>,
}

impl CollectionEntry {
    pub fn new(
        date: NaiveDate,
        customer_code: impl Into<String>,
        customer_name: impl Into<String>,
        method: CollectionMethod,
        amount: Lira,
        salesperson: impl Into<String>,
    ) -> Self {
        CollectionEntry {
            id: None,
            date,
            customer_code: customer_code.into(),
            customer_name: customer_name.into(),
            method,
            bank: None,
            amount,
            document_number: None,
            status: EntryStatus::Pending,
            region: None,
            salesperson: salesperson.into(),
            recorded_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn new_entry_defaults() {
        let e = CollectionEntry::new(
            date(2025, 8, 4),
            "C-0042",
            "Yıldız Market",
            CollectionMethod::Nakit,
            Lira::from_kurus(12550),
            "EYÜP",
        );
        assert_eq!(e.status, EntryStatus::Pending);
        assert!(e.id.is_none());
        assert!(e.bank.is_none());
        assert!(e.document_number.is_none());
    }

    #[test]
    fn status_display_roundtrip() {
        for s in [EntryStatus::Pending, EntryStatus::Approved, EntryStatus::Cancelled] {
            assert_eq!(EntryStatus::from_str(&s.to_string()).unwrap(), s);
        }
    }

    #[test]
    fn entry_serializes_with_snake_case_status() {
        let mut e = CollectionEntry::new(
            date(2025, 8, 4),
            "C-0042",
            "Yıldız Market",
            CollectionMethod::Cek,
            Lira::from_kurus(50000),
            "ALİ",
        );
        e.status = EntryStatus::Approved;
        let json = serde_json::to_string(&e).unwrap();
        assert!(json.contains("\"approved\""));
        assert!(json.contains("\"Çek\""));
    }
}
