//! Spawns API requests in background threads; results come back over mpsc channels.

use std::sync::Arc;
use std::sync::mpsc;
use tokio::runtime::Runtime;
use tokio_util::sync::CancellationToken;

use crate::core::api::{ApiClient, ApiError};
use crate::core::chat::{ChatRequest, ChatResponse};
use crate::core::filters::PropertyFilters;
use crate::core::page::PropertyPage;
use crate::core::property::Property;

use super::PendingChat;

pub type PageReceiver = mpsc::Receiver<Result<PropertyPage, ApiError>>;
pub type DetailReceiver = mpsc::Receiver<Result<Property, ApiError>>;

/// Fetch one filtered page.
pub(crate) fn spawn_fetch(
    rt: &Arc<Runtime>,
    client: &ApiClient,
    filters: PropertyFilters,
) -> PageReceiver {
    let (tx, rx) = mpsc::channel();
    let client = client.clone();
    let rt_clone = Arc::clone(rt);
    std::thread::spawn(move || {
        let result = rt_clone.block_on(client.fetch_properties(&filters));
        let _ = tx.send(result);
    });
    rx
}

/// Run a natural-language search for one page.
pub(crate) fn spawn_search(
    rt: &Arc<Runtime>,
    client: &ApiClient,
    query: String,
    page: u32,
    size: u32,
) -> PageReceiver {
    let (tx, rx) = mpsc::channel();
    let client = client.clone();
    let rt_clone = Arc::clone(rt);
    std::thread::spawn(move || {
        let result = rt_clone.block_on(client.nlp_search(&query, page, size));
        let _ = tx.send(result);
    });
    rx
}

/// Refresh one property for the detail view.
pub(crate) fn spawn_detail(rt: &Arc<Runtime>, client: &ApiClient, id: i64) -> DetailReceiver {
    let (tx, rx) = mpsc::channel();
    let client = client.clone();
    let rt_clone = Arc::clone(rt);
    std::thread::spawn(move || {
        let result = rt_clone.block_on(client.fetch_property(id));
        let _ = tx.send(result);
    });
    rx
}

/// Send a chat request. Cancelling the token drops the request; nothing is sent back.
pub(crate) fn spawn_chat(
    rt: &Arc<Runtime>,
    client: &ApiClient,
    request: ChatRequest,
) -> PendingChat {
    let (result_tx, result_rx) = mpsc::channel::<Result<ChatResponse, ApiError>>();
    let cancel_token = CancellationToken::new();
    let cancel_token_clone = cancel_token.clone();
    let client = client.clone();
    let rt_clone = Arc::clone(rt);

    std::thread::spawn(move || {
        rt_clone.block_on(async move {
            tokio::select! {
                _ = cancel_token_clone.cancelled() => {
                    log::debug!("Chat request cancelled");
                }
                result = client.send_chat(&request) => {
                    let _ = result_tx.send(result);
                }
            }
        });
    });

    PendingChat {
        result_rx,
        cancel_token,
    }
}
