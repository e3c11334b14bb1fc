use std::sync::Arc;

use status_core::{Effect, FailureCause, Msg, RequestFailure, StatusRecord};
use status_engine::{ClientError, EngineEvent, EngineHandle, Request, StatusClient, StatusEntry};
use status_logging::status_info;

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(client: Arc<dyn StatusClient>) -> Self {
        Self {
            engine: EngineHandle::new(client),
        }
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            let request_id = effect.request_id();
            let request = map_effect(effect);
            status_info!("request {} -> {:?}", request_id, request);
            self.engine.submit(request_id, request);
        }
    }

    /// Next completed request as a core message, if one is ready.
    pub fn try_recv(&self) -> Option<Msg> {
        self.engine.try_recv().map(map_event)
    }
}

fn map_effect(effect: Effect) -> Request {
    match effect {
        Effect::LookupSingle { number, .. } => Request::Lookup { number },
        Effect::SubmitBulk { raw, .. } => Request::Bulk { raw },
        Effect::RefreshScan { .. } => Request::Scan,
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::LookupDone { request_id, result } => Msg::LookupCompleted {
            request_id,
            result: result.map(map_entry).map_err(map_error),
        },
        EngineEvent::BulkDone { request_id, result } => Msg::BulkCompleted {
            request_id,
            result: result.map(|ack| ack.to_string()).map_err(map_error),
        },
        EngineEvent::ScanDone { request_id, result } => Msg::ScanCompleted {
            request_id,
            result: result
                .map(|entries| entries.into_iter().map(map_entry).collect())
                .map_err(map_error),
        },
    }
}

fn map_entry(entry: StatusEntry) -> StatusRecord {
    StatusRecord::new(entry.mobile_number, entry.message, entry.colour)
}

fn map_error(err: ClientError) -> RequestFailure {
    let cause = match &err {
        ClientError::Auth(_) => FailureCause::Auth,
        ClientError::Network(_) => FailureCause::Network,
    };
    RequestFailure::new(cause, err.to_string())
}

#[cfg(test)]
mod tests {
    use status_engine::{AuthError, BulkAck};

    use super::*;

    #[test]
    fn effects_map_to_requests() {
        assert_eq!(
            map_effect(Effect::LookupSingle {
                request_id: 1,
                number: "+91".into()
            }),
            Request::Lookup { number: "+91".into() }
        );
        assert_eq!(
            map_effect(Effect::SubmitBulk {
                request_id: 2,
                raw: "+91,+92".into()
            }),
            Request::Bulk {
                raw: "+91,+92".into()
            }
        );
        assert_eq!(map_effect(Effect::RefreshScan { request_id: 3 }), Request::Scan);
    }

    #[test]
    fn auth_errors_keep_their_cause() {
        let msg = map_event(EngineEvent::LookupDone {
            request_id: 4,
            result: Err(ClientError::Auth(AuthError::NoSession)),
        });
        match msg {
            Msg::LookupCompleted { request_id, result } => {
                assert_eq!(request_id, 4);
                let failure = result.unwrap_err();
                assert_eq!(failure.cause, FailureCause::Auth);
                assert!(failure.detail.contains("no authenticated session"));
            }
            other => panic!("unexpected message {other:?}"),
        }
    }

    #[test]
    fn scan_entries_keep_order() {
        let entries = vec![
            StatusEntry {
                mobile_number: "+92".into(),
                message: "b".into(),
                colour: "#000000".into(),
            },
            StatusEntry {
                mobile_number: "+91".into(),
                message: "a".into(),
                colour: "#FFFFFF".into(),
            },
        ];
        let msg = map_event(EngineEvent::ScanDone {
            request_id: 5,
            result: Ok(entries),
        });
        let Msg::ScanCompleted { result, .. } = msg else {
            panic!("expected scan completion");
        };
        let numbers: Vec<_> = result
            .unwrap()
            .into_iter()
            .map(|r| r.mobile_number)
            .collect();
        assert_eq!(numbers, vec!["+92", "+91"]);
    }

    #[test]
    fn bulk_ack_is_passed_through_as_text() {
        let msg = map_event(EngineEvent::BulkDone {
            request_id: 6,
            result: Ok(BulkAck(serde_json::Value::Null)),
        });
        let Msg::BulkCompleted { result, .. } = msg else {
            panic!("expected bulk completion");
        };
        assert_eq!(result.unwrap(), "null");
    }
}
