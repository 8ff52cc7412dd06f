//! The view-controller: owns the state, talks to the backend, feeds the renderer.
//!
//! Everything runs on one thread. State lives in a `RefCell` that is never
//! borrowed across an `.await`, and the history path is serialized by a
//! busy flag so a fetch issued while another is in flight is dropped.

pub mod state;

use crate::api::Backend;
use crate::error::{ApiError, HostError};
use crate::host::{Host, Session};
use crate::i18n::{self, Locale, Text};
use crate::models::{TransactionsQuery, TransferRequest, User};
use crate::ui::event::Event;
use crate::ui::render;
use std::cell::{Cell, Ref, RefCell};
use tokio::time::{Duration, Instant};

pub use state::{AppState, Notification, NotificationKind, Phase, TransferForm, View};

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const DEFAULT_NOTIFICATION_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy)]
pub struct Settings {
    pub page_size: u32,
    pub notification_ttl: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            notification_ttl: DEFAULT_NOTIFICATION_TTL,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Loaded,
    /// Another history fetch was in flight, or there was nothing more to load.
    Skipped,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferOutcome {
    Sent,
    /// Rejected locally; no request was made.
    Invalid,
    Failed,
}

/// Holds the history busy flag for the duration of one fetch.
struct BusyGuard<'a> {
    flag: &'a Cell<bool>,
    state: &'a RefCell<AppState>,
}

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a Cell<bool>, state: &'a RefCell<AppState>) -> Option<Self> {
        if flag.replace(true) {
            return None;
        }
        state.borrow_mut().history_loading = true;
        Some(Self { flag, state })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
        if let Ok(mut state) = self.state.try_borrow_mut() {
            state.history_loading = false;
        }
    }
}

pub struct App<B> {
    backend: B,
    settings: Settings,
    state: RefCell<AppState>,
    history_busy: Cell<bool>,
}

impl<B: Backend> App<B> {
    pub fn new(backend: B, settings: Settings) -> Self {
        Self {
            backend,
            settings,
            state: RefCell::new(AppState::default()),
            history_busy: Cell::new(false),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn state(&self) -> Ref<'_, AppState> {
        self.state.borrow()
    }

    /// Reads the host context and loads the first screen.
    ///
    /// Without a host context the app switches to a permanent error state
    /// and nothing is requested.
    pub async fn initialize(&self, host: &impl Host) -> Result<(), HostError> {
        let Some(ctx) = host.context() else {
            let mut state = self.state.borrow_mut();
            let message = Text::HostUnavailable.get(state.locale).to_string();
            state.phase = Phase::Failed(message);
            tracing::error!("Host context missing, app cannot start");
            return Err(HostError::Unavailable);
        };
        if !ctx.session.is_header_safe() {
            let mut state = self.state.borrow_mut();
            let message = Text::HostUnavailable.get(state.locale).to_string();
            state.phase = Phase::Failed(message);
            tracing::error!("Init data cannot be sent to the backend");
            return Err(HostError::InvalidSession);
        }

        host.ready();
        host.expand();
        host.disable_vertical_swipes();

        {
            let mut state = self.state.borrow_mut();
            let language = ctx.user.as_ref().and_then(|u| u.language_code.as_deref());
            state.locale = Locale::from_language_code(language);
            state.user = ctx.user.as_ref().map(User::from);
            state.color_scheme = ctx.color_scheme;
            state.session = Some(ctx.session);
        }
        tracing::info!(locale = self.state().locale.tag(), "Host context received");

        self.fetch_balance().await;
        self.fetch_transactions(1).await;

        self.state.borrow_mut().phase = Phase::Ready;
        Ok(())
    }

    pub async fn fetch_balance(&self) -> FetchOutcome {
        let Some(session) = self.session() else {
            tracing::warn!("fetch_balance called before initialization");
            return FetchOutcome::Failed;
        };

        match self.backend.get_balance(&session).await {
            Ok(reply) => {
                let mut state = self.state.borrow_mut();
                state.balance = Some(reply.balance);
                state.user = Some(reply.user);
                FetchOutcome::Loaded
            }
            Err(e) => {
                tracing::warn!("Balance refresh failed: {e}");
                self.notify_error(Text::BalanceLoadFailed.get(self.locale()));
                FetchOutcome::Failed
            }
        }
    }

    /// Loads one page of history; page 1 replaces the list, later pages append.
    pub async fn fetch_transactions(&self, page: u32) -> FetchOutcome {
        let page = page.max(1);
        let Some(session) = self.session() else {
            tracing::warn!("fetch_transactions called before initialization");
            return FetchOutcome::Failed;
        };
        let Some(_busy) = BusyGuard::acquire(&self.history_busy, &self.state) else {
            tracing::debug!(page, "History fetch already in flight, dropping request");
            return FetchOutcome::Skipped;
        };

        let query = TransactionsQuery {
            page,
            limit: self.settings.page_size,
        };
        match self.backend.get_transactions(&session, query).await {
            Ok(result) => {
                tracing::debug!(
                    page,
                    count = result.transactions.len(),
                    has_more = result.has_more,
                    "History page loaded"
                );
                self.state
                    .borrow_mut()
                    .apply_page(page, result.transactions, result.has_more);
                FetchOutcome::Loaded
            }
            Err(e) => {
                tracing::warn!(page, "History fetch failed: {e}");
                self.notify_error(Text::HistoryLoadFailed.get(self.locale()));
                FetchOutcome::Failed
            }
        }
    }

    /// Fetches the page after the last one loaded, if the backend reported more.
    pub async fn load_more(&self) -> FetchOutcome {
        let (has_more, next) = {
            let state = self.state.borrow();
            (state.has_more, state.page.saturating_add(1))
        };
        if !has_more {
            return FetchOutcome::Skipped;
        }
        self.fetch_transactions(next).await
    }

    pub async fn submit_transfer(&self, recipient: &str, amount: &str) -> TransferOutcome {
        {
            let mut state = self.state.borrow_mut();
            state.transfer_form.recipient = recipient.to_string();
            state.transfer_form.amount = amount.to_string();
        }

        let Some(request) = validate_transfer(recipient, amount) else {
            self.notify_error(Text::InvalidTransferForm.get(self.locale()));
            return TransferOutcome::Invalid;
        };
        let Some(session) = self.session() else {
            tracing::warn!("submit_transfer called before initialization");
            return TransferOutcome::Failed;
        };

        self.state.borrow_mut().transfer_form.submitting = true;
        let result = self.backend.transfer(&session, &request).await;
        self.state.borrow_mut().transfer_form.submitting = false;

        match result {
            Ok(receipt) => {
                tracing::info!(amount = request.amount, new_balance = receipt.new_balance, "Transfer sent");
                if let Some(balance) = receipt.new_balance {
                    self.state.borrow_mut().balance = Some(balance);
                }
                let message =
                    i18n::transfer_succeeded(self.locale(), request.amount, &receipt.recipient.first_name);
                self.notify(NotificationKind::Success, message);

                self.fetch_balance().await;
                self.fetch_transactions(1).await;

                self.state.borrow_mut().transfer_form = TransferForm::default();
                self.show(View::Dashboard);
                TransferOutcome::Sent
            }
            Err(e) => {
                tracing::warn!("Transfer failed: {e}");
                let message = transfer_error_message(&e, self.locale());
                self.notify_error(message);
                TransferOutcome::Failed
            }
        }
    }

    /// Switches view; entering history reloads its first page.
    pub async fn navigate(&self, view: View) {
        self.show(view);
        if view == View::History {
            self.fetch_transactions(1).await;
        }
    }

    pub async fn dispatch(&self, event: Event) {
        tracing::debug!(?event, "Dispatching event");
        match event {
            Event::Navigate(view) => self.navigate(view).await,
            Event::Back => self.navigate(View::Dashboard).await,
            Event::QuickTransfer => self.navigate(View::Transfer).await,
            Event::QuickHistory => self.navigate(View::History).await,
            Event::LoadMore => {
                self.load_more().await;
            }
            Event::Refresh => {
                self.fetch_balance().await;
                self.fetch_transactions(1).await;
            }
            Event::SubmitTransfer { recipient, amount } => {
                self.submit_transfer(&recipient, &amount).await;
            }
        }
    }

    /// Full markup for the current state, dropping an expired notification first.
    pub fn render(&self) -> String {
        self.render_at(Instant::now())
    }

    pub fn render_at(&self, now: Instant) -> String {
        let mut state = self.state.borrow_mut();
        state.prune_notification(now, self.settings.notification_ttl);
        render::render_app(&state)
    }

    /// The banner text still visible at `now`, if any.
    pub fn active_notification(&self, now: Instant) -> Option<Notification> {
        self.state
            .borrow()
            .active_notification(now, self.settings.notification_ttl)
            .cloned()
    }

    fn show(&self, view: View) {
        self.state.borrow_mut().view = view;
    }

    fn session(&self) -> Option<Session> {
        self.state.borrow().session.clone()
    }

    fn locale(&self) -> Locale {
        self.state.borrow().locale
    }

    fn notify(&self, kind: NotificationKind, message: impl Into<String>) {
        self.state
            .borrow_mut()
            .notify(kind, message, Instant::now());
    }

    fn notify_error(&self, message: impl Into<String>) {
        self.notify(NotificationKind::Error, message);
    }
}

/// Trimmed non-empty recipient and a strictly positive whole amount.
pub fn validate_transfer(recipient: &str, amount: &str) -> Option<TransferRequest> {
    let recipient = recipient.trim();
    if recipient.is_empty() {
        return None;
    }
    let amount: u64 = amount.trim().parse().ok()?;
    if amount == 0 {
        return None;
    }
    Some(TransferRequest {
        recipient: recipient.to_string(),
        amount,
    })
}

fn transfer_error_message(error: &ApiError, locale: Locale) -> String {
    if !error.is_rejection() {
        return Text::ConnectionFailed.get(locale).to_string();
    }
    error
        .rejection_message()
        .filter(|m| !m.trim().is_empty())
        .unwrap_or(Text::TransferFailed.get(locale))
        .to_string()
}
