use crate::host::{ColorScheme, Session};
use crate::i18n::Locale;
use crate::models::{Transaction, User};
use std::fmt;
use std::str::FromStr;
use tokio::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    Dashboard,
    Transfer,
    History,
}

impl View {
    pub const ALL: [Self; 3] = [Self::Dashboard, Self::Transfer, Self::History];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Transfer => "transfer",
            Self::History => "history",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for View {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dashboard" => Ok(Self::Dashboard),
            "transfer" => Ok(Self::Transfer),
            "history" => Ok(Self::History),
            other => Err(format!("unknown view: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Ready,
    /// Startup failed; permanent, nothing but this message is shown.
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub shown_at: Instant,
}

impl Notification {
    pub fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.shown_at) >= ttl
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferForm {
    pub recipient: String,
    pub amount: String,
    pub submitting: bool,
}

/// Everything the views are projected from.
#[derive(Debug, Clone)]
pub struct AppState {
    pub phase: Phase,
    pub view: View,
    pub session: Option<Session>,
    pub user: Option<User>,
    pub balance: Option<i64>,
    pub transactions: Vec<Transaction>,
    /// Last page successfully loaded.
    pub page: u32,
    pub has_more: bool,
    pub history_loading: bool,
    pub transfer_form: TransferForm,
    pub notification: Option<Notification>,
    pub color_scheme: ColorScheme,
    pub locale: Locale,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            phase: Phase::Loading,
            view: View::default(),
            session: None,
            user: None,
            balance: None,
            transactions: Vec::new(),
            page: 1,
            has_more: false,
            history_loading: false,
            transfer_form: TransferForm::default(),
            notification: None,
            color_scheme: ColorScheme::default(),
            locale: Locale::default(),
        }
    }
}

impl AppState {
    /// Merges a fetched page: page 1 replaces the list, later pages append.
    pub fn apply_page(&mut self, page: u32, transactions: Vec<Transaction>, has_more: bool) {
        if page <= 1 {
            self.transactions = transactions;
        } else {
            self.transactions.extend(transactions);
        }
        self.page = page;
        self.has_more = has_more;
    }

    /// Replaces any visible notification.
    pub fn notify(&mut self, kind: NotificationKind, message: impl Into<String>, now: Instant) {
        self.notification = Some(Notification {
            kind,
            message: message.into(),
            shown_at: now,
        });
    }

    pub fn active_notification(&self, now: Instant, ttl: Duration) -> Option<&Notification> {
        self.notification.as_ref().filter(|n| !n.is_expired(now, ttl))
    }

    pub fn prune_notification(&mut self, now: Instant, ttl: Duration) {
        if self
            .notification
            .as_ref()
            .is_some_and(|n| n.is_expired(now, ttl))
        {
            self.notification = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionKind;

    fn tx(n: i64) -> Transaction {
        Transaction {
            id: Some(n),
            kind: TransactionKind::Incoming,
            other_user: User {
                id: n,
                username: None,
                first_name: format!("user{n}"),
            },
            amount_display: format!("+{n}"),
            description: None,
            created_at: "2024-01-01T00:00:00".to_string(),
        }
    }

    #[test]
    fn first_page_replaces_list() {
        let mut state = AppState::default();
        state.apply_page(1, vec![tx(1), tx(2)], true);
        state.apply_page(2, vec![tx(3)], false);
        state.apply_page(1, vec![tx(9)], true);
        assert_eq!(state.transactions, vec![tx(9)]);
        assert_eq!(state.page, 1);
        assert!(state.has_more);
    }

    #[test]
    fn later_pages_append() {
        let mut state = AppState::default();
        state.apply_page(1, vec![tx(1), tx(2), tx(3)], true);
        state.apply_page(2, vec![tx(4), tx(5)], false);
        let ids: Vec<_> = state.transactions.iter().filter_map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert_eq!(state.page, 2);
        assert!(!state.has_more);
    }

    #[test]
    fn new_notification_evicts_previous() {
        let mut state = AppState::default();
        let now = Instant::now();
        state.notify(NotificationKind::Error, "first", now);
        state.notify(NotificationKind::Success, "second", now);
        let n = state.notification.as_ref().unwrap();
        assert_eq!(n.message, "second");
        assert_eq!(n.kind, NotificationKind::Success);
    }

    #[test]
    fn notification_expires_after_ttl() {
        let mut state = AppState::default();
        let ttl = Duration::from_secs(5);
        let now = Instant::now();
        state.notify(NotificationKind::Error, "oops", now);

        assert!(state.active_notification(now + Duration::from_secs(4), ttl).is_some());
        assert!(state.active_notification(now + ttl, ttl).is_none());

        state.prune_notification(now + Duration::from_secs(1), ttl);
        assert!(state.notification.is_some());
        state.prune_notification(now + Duration::from_secs(6), ttl);
        assert!(state.notification.is_none());
    }

    #[test]
    fn view_parse_and_display() {
        for view in View::ALL {
            assert_eq!(view.to_string().parse::<View>().unwrap(), view);
        }
        assert!("settings".parse::<View>().is_err());
    }
}
