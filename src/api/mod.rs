pub mod client;

use crate::error::ApiError;
use crate::host::Session;
use crate::models::{BalanceReply, TransactionsPage, TransactionsQuery, TransferReceipt, TransferRequest};

pub use client::HttpBackend;

/// The bank backend as seen from the client. Every call carries the session.
#[allow(async_fn_in_trait)]
pub trait Backend {
    async fn get_balance(&self, session: &Session) -> Result<BalanceReply, ApiError>;

    async fn get_transactions(
        &self,
        session: &Session,
        query: TransactionsQuery,
    ) -> Result<TransactionsPage, ApiError>;

    async fn transfer(
        &self,
        session: &Session,
        request: &TransferRequest,
    ) -> Result<TransferReceipt, ApiError>;
}
