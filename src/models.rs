use serde::{Deserialize, Serialize};

/// A bank customer as the backend reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub username: Option<String>,
    pub first_name: String,
}

/// How a transaction relates to the current user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Incoming,
    Outgoing,
    System,
    #[serde(other)]
    Other,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Incoming => "incoming",
            Self::Outgoing => "outgoing",
            Self::System => "system",
            Self::Other => "other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub other_user: User,
    /// Signed display string, e.g. `+100` or `-25`.
    pub amount_display: String,
    #[serde(default)]
    pub description: Option<String>,
    pub created_at: String,
}

impl Transaction {
    pub fn is_credit(&self) -> bool {
        self.amount_display.starts_with('+')
    }
}

/// Body of `get_transactions`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TransactionsQuery {
    pub page: u32,
    pub limit: u32,
}

/// Body of `transfer`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferRequest {
    pub recipient: String,
    pub amount: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BalanceReply {
    pub balance: i64,
    pub user: User,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TransactionsPage {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub page: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TransferReceipt {
    pub recipient: User,
    #[serde(default)]
    pub new_balance: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transaction_deserialization_from_realistic_json() {
        let json = r#"{
            "id": 42,
            "type": "incoming",
            "amount": 100,
            "amount_display": "+100",
            "description": "Перевод через Mini App",
            "created_at": "2024-03-05T12:30:00+00:00",
            "other_user": {"id": 7, "username": "bob", "first_name": "Bob"}
        }"#;

        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.id, Some(42));
        assert_eq!(tx.kind, TransactionKind::Incoming);
        assert_eq!(tx.other_user.first_name, "Bob");
        assert_eq!(tx.other_user.username.as_deref(), Some("bob"));
        assert!(tx.is_credit());
    }

    #[test]
    fn unknown_transaction_kind_maps_to_other() {
        let json = r#"{
            "type": "bonus",
            "amount_display": "+10",
            "created_at": "2024-03-05T12:30:00",
            "other_user": {"first_name": "Система"}
        }"#;

        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.kind, TransactionKind::Other);
        assert_eq!(tx.other_user.id, 0);
        assert!(tx.description.is_none());
    }

    #[test]
    fn null_description_is_accepted() {
        let json = r#"{
            "type": "outgoing",
            "amount_display": "-5",
            "description": null,
            "created_at": "2024-03-05T12:30:00",
            "other_user": {"id": 1, "username": null, "first_name": "Ann"}
        }"#;

        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert!(tx.description.is_none());
        assert!(!tx.is_credit());
    }

    #[test]
    fn transactions_page_defaults_when_fields_missing() {
        let page: TransactionsPage = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(page.transactions.is_empty());
        assert!(!page.has_more);
        assert!(page.page.is_none());
    }

    #[test]
    fn request_bodies_serialize_to_backend_shape() {
        let query = serde_json::to_value(TransactionsQuery { page: 2, limit: 10 }).unwrap();
        assert_eq!(query, serde_json::json!({"page": 2, "limit": 10}));

        let transfer = serde_json::to_value(TransferRequest {
            recipient: "@bob".to_string(),
            amount: 250,
        })
        .unwrap();
        assert_eq!(
            transfer,
            serde_json::json!({"recipient": "@bob", "amount": 250})
        );
    }

    #[test]
    fn transfer_receipt_only_needs_first_name() {
        let receipt: TransferReceipt =
            serde_json::from_str(r#"{"recipient": {"first_name": "Bob"}}"#).unwrap();
        assert_eq!(receipt.recipient.first_name, "Bob");
        assert!(receipt.new_balance.is_none());
    }
}
