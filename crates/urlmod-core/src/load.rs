//! Load hook.
//!
//! Network locators are fetched through a [`Transport`] and classified by
//! path suffix; everything else is deferred to the host.

use std::future::Future;

use tracing::{debug, warn};

use crate::context::LoadContext;
use crate::error::{HookError, HookResult};
use crate::format::{CommonJsPolicy, ModuleFormat};
use crate::locator::{is_network_addressed, Locator};
use crate::outcome::{DeferredLoad, LoadOutcome, LoadedModule};
use crate::transport::{Transport, TransportError};

/// Fetches network modules; defers everything else.
#[derive(Debug, Clone)]
pub struct NetworkLoader<T> {
    transport: T,
    commonjs: CommonJsPolicy,
}

impl<T: Transport> NetworkLoader<T> {
    pub fn new(transport: T) -> Self {
        Self::with_policy(transport, CommonJsPolicy::default())
    }

    pub fn with_policy(transport: T, commonjs: CommonJsPolicy) -> Self {
        Self {
            transport,
            commonjs,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn commonjs_policy(&self) -> CommonJsPolicy {
        self.commonjs
    }

    /// Decide on a load request.
    ///
    /// Each call on a network locator issues exactly one fetch.
    pub async fn load(&self, locator: &str, context: LoadContext) -> HookResult<LoadOutcome> {
        if !is_network_addressed(locator) {
            debug!(locator = %locator, "not a network locator, deferring");
            return Ok(LoadOutcome::Deferred(DeferredLoad {
                locator: locator.to_string(),
                context,
            }));
        }

        let parsed = Locator::parse(locator)?;
        debug!(locator = %locator, "fetching module source");

        let response = self
            .transport
            .fetch(&parsed)
            .await
            .map_err(|e| network_error(locator, e))?;

        if !response.is_success() {
            warn!(
                locator = %locator,
                status = response.status,
                reason = %response.reason,
                "module fetch failed"
            );
            return Err(HookError::Fetch {
                locator: locator.to_string(),
                status: response.status,
                reason: response.reason,
            });
        }

        let format = ModuleFormat::from_locator(&parsed, self.commonjs);
        debug!(
            locator = %locator,
            format = %format,
            bytes = response.body.len(),
            "loaded network module"
        );

        Ok(LoadOutcome::Loaded(LoadedModule::terminal(
            format,
            response.body,
        )))
    }

    /// Load, awaiting `next` exactly once if this hook defers.
    ///
    /// Errors returned by `next` are passed through untouched.
    pub async fn load_with<F, Fut, E>(
        &self,
        locator: &str,
        context: LoadContext,
        next: F,
    ) -> Result<LoadedModule, E>
    where
        F: FnOnce(String, LoadContext) -> Fut,
        Fut: Future<Output = Result<LoadedModule, E>>,
        E: From<HookError>,
    {
        match self.load(locator, context).await? {
            LoadOutcome::Loaded(module) => Ok(module),
            LoadOutcome::Deferred(request) => next(request.locator, request.context).await,
        }
    }
}

fn network_error(locator: &str, err: TransportError) -> HookError {
    HookError::Network {
        locator: locator.to_string(),
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::TransportResponse;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    /// Answers every request with the same response and records locators.
    struct FixedTransport {
        response: Result<TransportResponse, TransportError>,
        requests: Mutex<Vec<String>>,
        calls: AtomicUsize,
    }

    impl FixedTransport {
        fn ok(status: u16, reason: &str, body: &[u8]) -> Self {
            Self::with(Ok(TransportResponse::new(status, reason, body.to_vec())))
        }

        fn with(response: Result<TransportResponse, TransportError>) -> Self {
            Self {
                response,
                requests: Mutex::new(Vec::new()),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Transport for FixedTransport {
        async fn fetch(&self, locator: &Locator) -> Result<TransportResponse, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.requests.lock().unwrap().push(locator.to_string());
            tokio::task::yield_now().await;
            self.response.clone()
        }
    }

    #[derive(Debug)]
    enum HostError {
        Hook(HookError),
        Missing(String),
    }

    impl From<HookError> for HostError {
        fn from(err: HookError) -> Self {
            Self::Hook(err)
        }
    }

    #[tokio::test]
    async fn test_local_locator_defers_without_fetch() {
        let transport = Arc::new(FixedTransport::ok(200, "OK", b"x"));
        let loader = NetworkLoader::new(transport.clone());
        let context = LoadContext::new()
            .with_format(ModuleFormat::CommonJs)
            .with_extra("hostField", 1);

        for locator in ["file:///app/main.mjs", "node:fs", "http:foo", "/abs/x.mjs"] {
            let outcome = loader.load(locator, context.clone()).await.unwrap();
            let request = outcome.deferred().expect("deferred");
            assert_eq!(request.locator, locator);
            assert_eq!(request.context, context);
        }
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn test_format_from_suffix() {
        let cases = [
            ("https://example.com/data.json", ModuleFormat::Json),
            ("https://example.com/mod.mjs", ModuleFormat::Module),
            ("https://example.com/lib.wasm", ModuleFormat::Wasm),
            ("https://example.com/old.cjs", ModuleFormat::CommonJs),
            ("https://example.com/plain.js", ModuleFormat::Module),
            ("https://example.com/no-suffix", ModuleFormat::Module),
        ];

        let loader = NetworkLoader::new(FixedTransport::ok(200, "OK", b"{}"));
        for (locator, expected) in cases {
            let outcome = loader.load(locator, LoadContext::new()).await.unwrap();
            let module = outcome.loaded().expect("terminal");
            assert_eq!(module.format, expected, "{}", locator);
            assert!(module.short_circuit);
        }
    }

    #[tokio::test]
    async fn test_cjs_as_module_policy() {
        let loader = NetworkLoader::with_policy(
            FixedTransport::ok(200, "OK", b"module.exports = 1"),
            CommonJsPolicy::AsModule,
        );
        let outcome = loader
            .load("https://example.com/old.cjs", LoadContext::new())
            .await
            .unwrap();
        assert_eq!(outcome.loaded().unwrap().format, ModuleFormat::Module);
    }

    #[tokio::test]
    async fn test_body_bytes_are_returned_verbatim() {
        let body: Vec<u8> = vec![0x00, 0x61, 0x73, 0x6d, 0x01, 0x00, 0x00, 0x00, 0xff, 0xfe];
        let loader = NetworkLoader::new(FixedTransport::ok(200, "OK", &body));

        let outcome = loader
            .load("https://example.com/add.wasm", LoadContext::new())
            .await
            .unwrap();
        let module = outcome.loaded().unwrap();
        assert_eq!(module.source, body);
        assert_eq!(module.format, ModuleFormat::Wasm);
    }

    #[tokio::test]
    async fn test_status_failure_names_locator_status_and_reason() {
        let loader = NetworkLoader::new(FixedTransport::ok(404, "Not Found", b"missing"));
        let err = loader
            .load("https://example.com/missing.mjs", LoadContext::new())
            .await
            .unwrap_err();

        match &err {
            HookError::Fetch {
                locator,
                status,
                reason,
            } => {
                assert_eq!(locator, "https://example.com/missing.mjs");
                assert_eq!(*status, 404);
                assert_eq!(reason, "Not Found");
            }
            other => panic!("expected Fetch error, got {:?}", other),
        }

        let message = err.to_string();
        assert!(message.contains("https://example.com/missing.mjs"));
        assert!(message.contains("404"));
        assert!(message.contains("Not Found"));
    }

    #[tokio::test]
    async fn test_failure_is_not_retried() {
        let transport = Arc::new(FixedTransport::ok(503, "Service Unavailable", b""));
        let loader = NetworkLoader::new(transport.clone());
        let result = loader
            .load("https://example.com/flaky.mjs", LoadContext::new())
            .await;
        assert!(matches!(result, Err(HookError::Fetch { status: 503, .. })));
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn test_connectivity_failure_is_network_error() {
        let transport = FixedTransport::with(Err(TransportError::Connect {
            message: "connection refused".to_string(),
        }));
        let loader = NetworkLoader::new(transport);
        let err = loader
            .load("https://unreachable.invalid/x.mjs", LoadContext::new())
            .await
            .unwrap_err();

        match err {
            HookError::Network { locator, message } => {
                assert_eq!(locator, "https://unreachable.invalid/x.mjs");
                assert!(message.contains("connection refused"));
            }
            other => panic!("expected Network error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_network_locator() {
        let transport = Arc::new(FixedTransport::ok(200, "OK", b""));
        let loader = NetworkLoader::new(transport.clone());
        let err = loader
            .load("https://[oops/x.mjs", LoadContext::new())
            .await
            .unwrap_err();
        assert!(matches!(err, HookError::InvalidLocator { .. }));
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn test_concurrent_loads_fetch_independently() {
        let transport = Arc::new(FixedTransport::ok(200, "OK", b"export default 1"));
        let loader = NetworkLoader::new(transport.clone());

        let (a, b) = tokio::join!(
            loader.load("https://example.com/same.mjs", LoadContext::new()),
            loader.load("https://example.com/same.mjs", LoadContext::new()),
        );
        assert_eq!(a.unwrap(), b.unwrap());
        assert_eq!(transport.calls(), 2);
        assert_eq!(
            *transport.requests.lock().unwrap(),
            vec!["https://example.com/same.mjs", "https://example.com/same.mjs"]
        );
    }

    #[tokio::test]
    async fn test_load_with_calls_next_once_for_local() {
        let loader = NetworkLoader::new(FixedTransport::ok(200, "OK", b""));
        let calls = AtomicUsize::new(0);

        let module = loader
            .load_with("file:///app/a.json", LoadContext::new(), |locator, _| {
                calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    assert_eq!(locator, "file:///app/a.json");
                    Ok::<_, HostError>(LoadedModule {
                        format: ModuleFormat::Json,
                        source: b"{}".to_vec(),
                        short_circuit: false,
                    })
                }
            })
            .await
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(!module.short_circuit);
    }

    #[tokio::test]
    async fn test_load_with_skips_next_for_network() {
        let loader = NetworkLoader::new(FixedTransport::ok(200, "OK", b"export {}"));
        let module = loader
            .load_with("https://example.com/a.mjs", LoadContext::new(), |l, _| async move {
                Err::<LoadedModule, _>(HostError::Missing(l))
            })
            .await
            .unwrap();
        assert_eq!(module.source, b"export {}");
    }

    #[tokio::test]
    async fn test_load_with_passes_next_errors_through() {
        let loader = NetworkLoader::new(FixedTransport::ok(200, "OK", b""));
        let result = loader
            .load_with("node:missing", LoadContext::new(), |l, _| async move {
                Err::<LoadedModule, _>(HostError::Missing(l))
            })
            .await;
        assert!(matches!(result, Err(HostError::Missing(ref l)) if l == "node:missing"));
    }

    #[tokio::test]
    async fn test_load_with_converts_own_errors() {
        let loader = NetworkLoader::new(FixedTransport::ok(500, "Internal Server Error", b""));
        let result = loader
            .load_with("https://example.com/a.mjs", LoadContext::new(), |l, _| async move {
                Err::<LoadedModule, _>(HostError::Missing(l))
            })
            .await;
        assert!(matches!(
            result,
            Err(HostError::Hook(HookError::Fetch { status: 500, .. }))
        ));
    }
}
