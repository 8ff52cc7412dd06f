//! Pure projections of `AppState` to markup. No I/O, no mutation.

use crate::app::{AppState, Notification, NotificationKind, Phase, TransferForm, View};
use crate::i18n::{self, Locale, Text};
use crate::models::{Transaction, TransactionKind, User};
use crate::ui::theme;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

const CURRENCY: &str = "₽";

pub fn render_app(state: &AppState) -> String {
    let locale = state.locale;
    match &state.phase {
        Phase::Failed(message) => format!(
            "<div id=\"loading\"><div class=\"error-message\">{}</div></div>",
            escape_html(message)
        ),
        Phase::Loading => format!(
            "<div id=\"loading\"><div class=\"spinner\"></div><div>{}</div></div>",
            Text::Loading.get(locale)
        ),
        Phase::Ready => {
            let pages = [
                render_dashboard(state),
                render_transfer_page(&state.transfer_form, state.view == View::Transfer, locale),
                render_history_page(state),
            ]
            .concat();
            format!(
                "{theme}<div id=\"app\" lang=\"{lang}\"><div class=\"container\">{banner}{pages}</div>{nav}</div>",
                theme = theme::theme_style(state.color_scheme),
                lang = locale.tag(),
                banner = state
                    .notification
                    .as_ref()
                    .map(render_notification)
                    .unwrap_or_default(),
                nav = render_nav(state.view, locale),
            )
        }
    }
}

fn page_open(view: View, visible: bool) -> String {
    let hidden = if visible { "" } else { " hidden" };
    format!("<section id=\"{view}-page\" class=\"page{hidden}\">")
}

pub fn render_dashboard(state: &AppState) -> String {
    let locale = state.locale;
    let greeting = state
        .user
        .as_ref()
        .map(|u| format!("<div class=\"user-name\">{}</div>", escape_html(&display_name(u))))
        .unwrap_or_default();
    format!(
        "{open}{greeting}<div class=\"balance-card\"><div class=\"balance-label\">{label}</div>{balance}</div>\
         <div class=\"quick-actions\">\
         <button id=\"quick-transfer\" data-action=\"quick-transfer\">{send}</button>\
         <button id=\"quick-history\" data-action=\"quick-history\">{history}</button>\
         </div></section>",
        open = page_open(View::Dashboard, state.view == View::Dashboard),
        label = Text::Balance.get(locale),
        balance = render_balance(state.balance, locale),
        send = Text::Send.get(locale),
        history = Text::NavHistory.get(locale),
    )
}

pub fn render_balance(balance: Option<i64>, locale: Locale) -> String {
    let text = balance.map_or_else(|| "—".to_string(), |b| format!("{}{CURRENCY}", format_amount(b, locale)));
    format!("<div id=\"balance-amount\">{text}</div>")
}

pub fn render_transfer_page(form: &TransferForm, visible: bool, locale: Locale) -> String {
    let (label, disabled) = if form.submitting {
        (Text::Sending.get(locale), " disabled")
    } else {
        (Text::Send.get(locale), "")
    };
    format!(
        "{open}<button id=\"back-btn\" data-action=\"back\">{back}</button>\
         <form id=\"transfer-form\" data-action=\"transfer\">\
         <input id=\"recipient\" name=\"recipient\" placeholder=\"{recipient_ph}\" value=\"{recipient}\">\
         <input id=\"amount\" name=\"amount\" inputmode=\"numeric\" placeholder=\"{amount_ph}\" value=\"{amount}\">\
         <button type=\"submit\"{disabled}>{label}</button>\
         </form></section>",
        open = page_open(View::Transfer, visible),
        back = Text::Back.get(locale),
        recipient_ph = escape_html(Text::RecipientPlaceholder.get(locale)),
        recipient = escape_html(&form.recipient),
        amount_ph = Text::AmountPlaceholder.get(locale),
        amount = escape_html(&form.amount),
    )
}

pub fn render_history_page(state: &AppState) -> String {
    format!(
        "{open}{list}{more}</section>",
        open = page_open(View::History, state.view == View::History),
        list = render_transactions(&state.transactions, state.history_loading, state.locale),
        more = render_load_more(state.has_more, state.locale),
    )
}

pub fn render_transactions(transactions: &[Transaction], loading: bool, locale: Locale) -> String {
    let body = if transactions.is_empty() && !loading {
        format!(
            "<div class=\"loading\"><div>{}</div></div>",
            Text::NoTransactions.get(locale)
        )
    } else {
        transactions
            .iter()
            .map(|tx| render_transaction(tx, locale))
            .collect::<String>()
    };
    let spinner = if loading {
        format!(
            "<div class=\"loading\"><div class=\"spinner\"></div><div>{}</div></div>",
            Text::Loading.get(locale)
        )
    } else {
        String::new()
    };
    format!("<div id=\"transactions-list\">{body}{spinner}</div>")
}

pub fn render_transaction(tx: &Transaction, locale: Locale) -> String {
    let sign_class = if tx.is_credit() { "positive" } else { "negative" };
    format!(
        "<div class=\"transaction-item\">\
         <div class=\"transaction-icon {kind}\">{icon}</div>\
         <div class=\"transaction-info\">\
         <div class=\"transaction-title\">{title}</div>\
         <div class=\"transaction-description\">{description}<br><small>{date}</small></div>\
         </div>\
         <div class=\"transaction-amount {sign_class}\">{amount}{CURRENCY}</div>\
         </div>",
        kind = tx.kind.as_str(),
        icon = transaction_icon(tx.kind),
        title = escape_html(&transaction_title(tx, locale)),
        description = escape_html(tx.description.as_deref().unwrap_or_default()),
        date = escape_html(&format_date(&tx.created_at, locale)),
        amount = escape_html(&tx.amount_display),
    )
}

pub fn render_load_more(has_more: bool, locale: Locale) -> String {
    let hidden = if has_more { "" } else { " hidden" };
    format!(
        "<button id=\"load-more\" class=\"load-more{hidden}\" data-action=\"more\">{}</button>",
        Text::LoadMore.get(locale)
    )
}

pub fn render_notification(notification: &Notification) -> String {
    let class = match notification.kind {
        NotificationKind::Success => "success-message",
        NotificationKind::Error => "error-message",
    };
    format!(
        "<div class=\"{class}\">{}</div>",
        escape_html(&notification.message)
    )
}

pub fn render_nav(current: View, locale: Locale) -> String {
    let items: String = View::ALL
        .iter()
        .map(|&view| {
            let active = if view == current { " active" } else { "" };
            let label = match view {
                View::Dashboard => Text::NavDashboard,
                View::Transfer => Text::NavTransfer,
                View::History => Text::NavHistory,
            };
            format!(
                "<a href=\"#\" class=\"nav-item{active}\" data-page=\"{view}\" data-action=\"nav {view}\">{}</a>",
                label.get(locale)
            )
        })
        .collect();
    format!("<nav class=\"bottom-nav\">{items}</nav>")
}

pub fn transaction_icon(kind: TransactionKind) -> &'static str {
    match kind {
        TransactionKind::Incoming => "\u{1f4e5}",
        TransactionKind::Outgoing => "\u{1f4e4}",
        TransactionKind::System => "\u{1f504}",
        TransactionKind::Other => "\u{1f4b0}",
    }
}

pub fn transaction_title(tx: &Transaction, locale: Locale) -> String {
    match tx.kind {
        TransactionKind::Incoming => i18n::received_from(locale, &tx.other_user.first_name),
        TransactionKind::Outgoing => i18n::sent_to(locale, &tx.other_user.first_name),
        TransactionKind::System => Text::SystemParty.get(locale).to_string(),
        TransactionKind::Other => Text::GenericTransaction.get(locale).to_string(),
    }
}

fn display_name(user: &User) -> String {
    match user.username.as_deref() {
        Some(username) if !username.is_empty() => format!("{} (@{username})", user.first_name),
        _ => user.first_name.clone(),
    }
}

/// Groups thousands the way the locale does (`1 234 567` / `1,234,567`).
pub fn format_amount(value: i64, locale: Locale) -> String {
    let separator = match locale {
        Locale::Ru => '\u{a0}',
        Locale::En => ',',
    };
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 * 2);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    if value < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Calendar date of a backend timestamp in local time; unparseable input is shown as-is.
pub fn format_date(timestamp: &str, locale: Locale) -> String {
    let pattern = match locale {
        Locale::Ru => "%d.%m.%Y",
        Locale::En => "%-m/%-d/%Y",
    };
    parse_date(timestamp).map_or_else(|| timestamp.to_string(), |d| d.format(pattern).to_string())
}

fn parse_date(timestamp: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(timestamp) {
        return Some(dt.with_timezone(&Local).date_naive());
    }
    // Offset-less timestamps are already local wall time.
    if let Ok(dt) = NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(timestamp, "%Y-%m-%d").ok()
}

pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
