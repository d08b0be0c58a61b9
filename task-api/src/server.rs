//! HTTP server for the task endpoints
//!
//! Owns the route table and the listener lifecycle. `start` binds before
//! returning so address problems surface immediately; failures after that are
//! reported through [`RunningServer::failed`].

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use std::{net::SocketAddr, sync::Arc, time::Duration};
use task_core::TaskRepository;
use tokio::{net::TcpListener, sync::oneshot, task::JoinHandle};
use tracing::{error, info};

use crate::{
    cors::{cors_middleware, CorsPolicy},
    error::ServerError,
    handlers::{self, ApiState, SharedState},
    request_logger::request_logging_middleware,
};

/// Task tracking HTTP server
pub struct TaskServer<R> {
    state: SharedState<R>,
    cors: CorsPolicy,
}

impl<R: TaskRepository + 'static> TaskServer<R> {
    /// Create a server answering cross-origin requests from `allowed_origin`
    pub fn new(repository: Arc<R>, allowed_origin: &str) -> Result<Self, ServerError> {
        Ok(Self {
            state: Arc::new(ApiState { repository }),
            cors: CorsPolicy::new(allowed_origin)?,
        })
    }

    /// Build the router with all endpoints
    pub fn router(&self) -> Router {
        Router::new()
            .route(
                "/tasks",
                get(handlers::list_tasks::<R>).fallback(handlers::method_not_allowed),
            )
            .route(
                "/tasks/create",
                put(handlers::create_task::<R>).fallback(handlers::method_not_allowed),
            )
            .route(
                "/tasks/mark-complete",
                post(handlers::mark_complete::<R>).fallback(handlers::method_not_allowed),
            )
            .route("/health", get(handlers::health::<R>))
            .fallback(handlers::not_found)
            .layer(middleware::from_fn_with_state(
                self.cors.clone(),
                cors_middleware,
            ))
            .layer(middleware::from_fn(request_logging_middleware))
            .with_state(self.state.clone())
    }

    /// Bind `addr` and serve in the background
    ///
    /// Address and bind errors are returned here and never arrive through
    /// [`RunningServer::failed`], which only reports failures of the listener
    /// after it is up. Port 0 picks a free port; read it back from
    /// [`RunningServer::local_addr`].
    pub async fn start(self, addr: &str) -> Result<RunningServer, ServerError> {
        let socket_addr: SocketAddr = addr
            .parse()
            .map_err(|e| ServerError::InvalidAddress(format!("'{addr}': {e}")))?;

        let listener = TcpListener::bind(socket_addr)
            .await
            .map_err(ServerError::Bind)?;
        let local_addr = listener.local_addr().map_err(ServerError::Bind)?;

        let app = self.router();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let (failure_tx, failure_rx) = oneshot::channel::<ServerError>();

        let task = tokio::spawn(async move {
            let served = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await;

            if let Err(e) = served {
                error!(error = %e, "Listener stopped unexpectedly");
                let _ = failure_tx.send(ServerError::Serve(e));
            }
        });

        info!(%local_addr, "Task server listening");

        Ok(RunningServer {
            local_addr,
            shutdown_tx,
            failure_rx,
            task,
        })
    }
}

/// Handle to a server started with [`TaskServer::start`]
#[derive(Debug)]
pub struct RunningServer {
    local_addr: SocketAddr,
    shutdown_tx: oneshot::Sender<()>,
    failure_rx: oneshot::Receiver<ServerError>,
    task: JoinHandle<()>,
}

impl RunningServer {
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Resolves only if the listener fails; pends forever after a clean stop
    ///
    /// Must not be awaited again once it has resolved.
    pub async fn failed(&mut self) -> ServerError {
        match (&mut self.failure_rx).await {
            Ok(error) => error,
            Err(_) => std::future::pending().await,
        }
    }

    /// Stop accepting connections and wait up to `deadline` for in-flight
    /// requests to drain; the listener is aborted if they do not
    pub async fn stop(self, deadline: Duration) -> Result<(), ServerError> {
        let Self {
            shutdown_tx,
            mut task,
            ..
        } = self;

        // The listener may already be gone
        let _ = shutdown_tx.send(());

        match tokio::time::timeout(deadline, &mut task).await {
            Ok(Ok(())) => {
                info!("Task server stopped");
                Ok(())
            }
            Ok(Err(join_error)) => Err(ServerError::Join(join_error.to_string())),
            Err(_) => {
                task.abort();
                Err(ServerError::ShutdownTimeout(deadline))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use async_trait::async_trait;
    use mocks::{create_test_tasks, MockTaskRepository};
    use task_core::{NewTask, Task};
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpStream,
        sync::Notify,
        time::Instant,
    };
    use tower::ServiceExt;

    /// Repository whose `list` signals when it starts and then sleeps
    struct SlowRepository {
        inner: MockTaskRepository,
        delay: Duration,
        started: Arc<Notify>,
    }

    impl SlowRepository {
        fn new(delay: Duration) -> Self {
            Self {
                inner: MockTaskRepository::new(),
                delay,
                started: Arc::new(Notify::new()),
            }
        }
    }

    #[async_trait]
    impl TaskRepository for SlowRepository {
        async fn get_by_id(&self, id: u64) -> task_core::Result<Task> {
            self.inner.get_by_id(id).await
        }

        async fn list(&self) -> task_core::Result<Vec<Task>> {
            self.started.notify_one();
            tokio::time::sleep(self.delay).await;
            self.inner.list().await
        }

        async fn create(&self, task: NewTask) -> task_core::Result<Task> {
            self.inner.create(task).await
        }

        async fn update(&self, task: &Task) -> task_core::Result<()> {
            self.inner.update(task).await
        }

        async fn health_check(&self) -> task_core::Result<()> {
            self.inner.health_check().await
        }
    }

    /// Start a slow server and send `GET /tasks` over a raw connection,
    /// returning once the handler is running
    async fn start_with_request_in_flight(
        delay: Duration,
    ) -> (RunningServer, tokio::task::JoinHandle<String>) {
        let repo = SlowRepository::new(delay);
        let started = repo.started.clone();
        let running = TaskServer::new(Arc::new(repo), "http://localhost:5173")
            .unwrap()
            .start("127.0.0.1:0")
            .await
            .unwrap();
        let addr = running.local_addr();

        let client = tokio::spawn(async move {
            let mut stream = TcpStream::connect(addr).await.unwrap();
            stream
                .write_all(b"GET /tasks HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
                .await
                .unwrap();
            let mut response = Vec::new();
            let _ = stream.read_to_end(&mut response).await;
            String::from_utf8_lossy(&response).into_owned()
        });

        started.notified().await;
        (running, client)
    }

    fn test_server(repo: MockTaskRepository) -> TaskServer<MockTaskRepository> {
        TaskServer::new(Arc::new(repo), "http://localhost:5173").unwrap()
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn test_invalid_origin_fails_construction() {
        let result = TaskServer::new(Arc::new(MockTaskRepository::new()), "bad\u{7f}origin");
        assert!(matches!(result, Err(ServerError::InvalidOrigin(_))));
    }

    #[tokio::test]
    async fn test_router_lists_tasks() {
        let server = test_server(MockTaskRepository::with_tasks(create_test_tasks(2)));

        let response = server
            .router()
            .oneshot(Request::get("/tasks").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let tasks: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(tasks.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_router_wrong_method() {
        let server = test_server(MockTaskRepository::new());

        let response = server
            .router()
            .oneshot(
                Request::builder()
                    .method(Method::DELETE)
                    .uri("/tasks")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:5173"
        );
        assert_eq!(body_text(response).await, "Invalid request method");
    }

    #[tokio::test]
    async fn test_unknown_path_is_not_found() {
        let server = test_server(MockTaskRepository::new());

        let response = server
            .router()
            .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_start_and_stop_on_ephemeral_port() {
        let server = test_server(MockTaskRepository::new());

        let running = server.start("127.0.0.1:0").await.unwrap();
        assert_ne!(running.local_addr().port(), 0);

        running.stop(Duration::from_secs(5)).await.unwrap();
    }

    #[tokio::test]
    async fn test_start_rejects_bad_address() {
        let server = test_server(MockTaskRepository::new());

        let result = server.start("not-an-address").await;
        assert!(matches!(result, Err(ServerError::InvalidAddress(_))));
    }

    #[tokio::test]
    async fn test_start_reports_bind_failure() {
        let first = test_server(MockTaskRepository::new())
            .start("127.0.0.1:0")
            .await
            .unwrap();
        let taken = first.local_addr().to_string();

        let result = test_server(MockTaskRepository::new()).start(&taken).await;
        assert!(matches!(result, Err(ServerError::Bind(_))));

        first.stop(Duration::from_secs(5)).await.unwrap();
    }

    #[tokio::test]
    async fn test_failed_pends_after_clean_stop() {
        let mut running = test_server(MockTaskRepository::new())
            .start("127.0.0.1:0")
            .await
            .unwrap();

        let pending = tokio::time::timeout(Duration::from_millis(50), running.failed()).await;
        assert!(pending.is_err());

        running.stop(Duration::from_secs(5)).await.unwrap();
    }

    #[tokio::test]
    async fn test_stop_drains_in_flight_request() {
        let (running, client) = start_with_request_in_flight(Duration::from_millis(300)).await;

        running.stop(Duration::from_secs(5)).await.unwrap();

        let response = client.await.unwrap();
        assert!(response.starts_with("HTTP/1.1 200 OK"), "{response}");
        assert!(response.ends_with("[]"), "{response}");
    }

    #[tokio::test]
    async fn test_stop_aborts_after_deadline() {
        let (running, client) = start_with_request_in_flight(Duration::from_secs(30)).await;

        let began = Instant::now();
        let result = running.stop(Duration::from_millis(200)).await;

        assert!(
            matches!(result, Err(ServerError::ShutdownTimeout(d)) if d == Duration::from_millis(200)),
            "{result:?}"
        );
        assert!(began.elapsed() < Duration::from_secs(5));
        client.abort();
    }
}
