use std::sync::{mpsc, Arc};
use std::thread;

use status_logging::{status_debug, status_warn};

use crate::client::StatusClient;
use crate::{EngineEvent, Request, RequestId};

enum EngineCommand {
    Execute { request_id: RequestId, request: Request },
}

/// Runs status calls on a background tokio runtime and reports completions.
///
/// Every submitted request runs to completion; there is no cancellation or retry.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(client: Arc<dyn StatusClient>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let client = client.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(client.as_ref(), command, event_tx).await;
                });
            }
            // Let spawned calls finish before the runtime is dropped.
            runtime.shutdown_timeout(std::time::Duration::from_secs(30));
        });

        Self { cmd_tx, event_rx }
    }

    pub fn submit(&self, request_id: RequestId, request: Request) {
        status_debug!("engine: submitting request {} {:?}", request_id, request);
        if self
            .cmd_tx
            .send(EngineCommand::Execute {
                request_id,
                request,
            })
            .is_err()
        {
            status_warn!("engine: worker thread gone, request {} dropped", request_id);
        }
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: std::time::Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    client: &dyn StatusClient,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let EngineCommand::Execute {
        request_id,
        request,
    } = command;
    let event = execute(client, request_id, request).await;
    let _ = event_tx.send(event);
}

/// Runs one request against `client` and wraps the outcome as an event.
pub async fn execute(
    client: &dyn StatusClient,
    request_id: RequestId,
    request: Request,
) -> EngineEvent {
    match request {
        Request::Lookup { number } => EngineEvent::LookupDone {
            request_id,
            result: client.lookup_single(&number).await,
        },
        Request::Bulk { raw } => EngineEvent::BulkDone {
            request_id,
            result: client.submit_bulk(&raw).await,
        },
        Request::Scan => EngineEvent::ScanDone {
            request_id,
            result: client.refresh_scan().await,
        },
    }
}
