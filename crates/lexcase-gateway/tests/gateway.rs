use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use lexcase_core::{Category, Section, SectionKind, assemble};
use lexcase_gateway::{
    AnalysisSession, Gateway, GatewayConfig, RequestOutcome, SessionError,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;

/// Canned reply for the stub server.
#[derive(Clone)]
struct Reply {
    status: &'static str,
    body: String,
    delay: Duration,
}

impl Reply {
    fn json(status: &'static str, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

struct Stub {
    base_url: String,
    connections: Arc<AtomicUsize>,
    last_request: Arc<Mutex<Option<String>>>,
}

impl Stub {
    fn connections(&self) -> usize {
        self.connections.load(Ordering::SeqCst)
    }

    fn gateway(&self, timeout: Duration) -> Gateway {
        let config = GatewayConfig::new(self.base_url.clone())
            .with_timeout(timeout)
            .with_header("ngrok-skip-browser-warning", "true");
        Gateway::new(&config).unwrap()
    }
}

/// Start a one-reply-per-connection HTTP server on an ephemeral port.
async fn stub(reply: Reply) -> Stub {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let connections = Arc::new(AtomicUsize::new(0));
    let last_request = Arc::new(Mutex::new(None));

    let conns = connections.clone();
    let last = last_request.clone();
    tokio::spawn(async move {
        loop {
            let Ok((stream, _)) = listener.accept().await else {
                return;
            };
            conns.fetch_add(1, Ordering::SeqCst);
            let reply = reply.clone();
            let last = last.clone();
            tokio::spawn(async move {
                serve(stream, reply, last).await;
            });
        }
    });

    Stub {
        base_url: format!("http://127.0.0.1:{port}/api/v1"),
        connections,
        last_request,
    }
}

async fn serve(mut stream: TcpStream, reply: Reply, last: Arc<Mutex<Option<String>>>) {
    let request = read_request(&mut stream).await;
    *last.lock().await = Some(request);

    tokio::time::sleep(reply.delay).await;
    let response = format!(
        "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
        reply.status,
        reply.body.len(),
        reply.body
    );
    let _ = stream.write_all(response.as_bytes()).await;
    let _ = stream.shutdown().await;
}

/// Read headers and a `content-length` body.
async fn read_request(stream: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = stream.read(&mut chunk).await.unwrap_or(0);
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        let text = String::from_utf8_lossy(&buf);
        if let Some(end) = text.find("\r\n\r\n") {
            let content_length = text[..end]
                .lines()
                .find_map(|l| {
                    let (name, value) = l.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if buf.len() >= end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

const CRIMINAL: &str = r#"{
    "case_type": "Criminal",
    "key_facts": ["A stole money"],
    "legal_issues": [{"issue": "Cheating", "importance": "high", "description": "..."}]
}"#;

#[tokio::test]
async fn success_body_feeds_the_assembler() {
    let server = stub(Reply::json("200 OK", CRIMINAL)).await;
    let gw = server.gateway(Duration::from_secs(5));

    let raw = match gw.analyze("A took money promising to buy land").await {
        RequestOutcome::Success(raw) => raw,
        other => panic!("expected success, got {other:?}"),
    };
    assert_eq!(raw.as_str(), CRIMINAL);

    let report = assemble(&raw).unwrap();
    assert_eq!(
        report.kinds(),
        vec![
            SectionKind::CaseType,
            SectionKind::KeyFacts,
            SectionKind::LegalIssues
        ]
    );
    let Some(Section::LegalIssues(items)) = report.get(SectionKind::LegalIssues) else {
        panic!("missing legal issues");
    };
    assert_eq!(items[0].category, Category::Critical);
    assert_eq!(server.connections(), 1);
}

#[tokio::test]
async fn request_body_and_headers() {
    let server = stub(Reply::json("200 OK", "{}")).await;
    let gw = server.gateway(Duration::from_secs(5));
    gw.analyze("Tenant refuses to vacate").await;

    let request = server.last_request.lock().await.clone().unwrap();
    assert!(request.starts_with("POST /api/v1/case/analyze HTTP/1.1"));
    let lower = request.to_ascii_lowercase();
    assert!(lower.contains("content-type: application/json"));
    assert!(lower.contains("ngrok-skip-browser-warning: true"));
    assert!(request.ends_with(r#"{"case_text":"Tenant refuses to vacate"}"#));
}

#[tokio::test]
async fn blank_text_makes_no_request() {
    let server = stub(Reply::json("200 OK", "{}")).await;
    let gw = server.gateway(Duration::from_secs(5));

    let outcome = gw.analyze("  \n ").await;
    assert!(matches!(outcome, RequestOutcome::ValidationError(_)));
    assert_eq!(server.connections(), 0);
}

#[tokio::test]
async fn service_unavailable() {
    let body = r#"{"detail": "AI service is currently unavailable. Please ensure Ollama is running with llama3 model."}"#;
    let server = stub(Reply::json("503 Service Unavailable", body)).await;
    let gw = server.gateway(Duration::from_secs(5));
    assert_eq!(
        gw.analyze("case text").await,
        RequestOutcome::ServiceUnavailable
    );
}

#[tokio::test]
async fn server_detail_is_surfaced_verbatim() {
    let body = r#"{"detail": "AI analysis failed: Expecting value: line 1 column 1"}"#;
    let server = stub(Reply::json("500 Internal Server Error", body)).await;
    let gw = server.gateway(Duration::from_secs(5));
    assert_eq!(
        gw.analyze("case text").await,
        RequestOutcome::ServerError("AI analysis failed: Expecting value: line 1 column 1".into())
    );
}

#[tokio::test]
async fn bare_error_status_is_network_error() {
    let server = stub(Reply::json("502 Bad Gateway", "")).await;
    let gw = server.gateway(Duration::from_secs(5));
    assert!(matches!(
        gw.analyze("case text").await,
        RequestOutcome::NetworkError(_)
    ));
    assert_eq!(server.connections(), 1);
}

#[tokio::test]
async fn slow_backend_times_out() {
    let server = stub(Reply::json("200 OK", CRIMINAL).delayed(Duration::from_secs(5))).await;
    let gw = server.gateway(Duration::from_millis(200));
    assert_eq!(gw.analyze("case text").await, RequestOutcome::Timeout);
    assert_eq!(server.connections(), 1);
}

#[tokio::test]
async fn malformed_success_body_is_not_rendered() {
    let server = stub(Reply::json("200 OK", r#"{"key_facts": "not a list"}"#)).await;
    let gw = server.gateway(Duration::from_secs(5));
    let RequestOutcome::Success(raw) = gw.analyze("case text").await else {
        panic!("transport should succeed");
    };
    assert!(assemble(&raw).is_err());
}

#[tokio::test]
async fn session_rejects_concurrent_submission() {
    let server =
        stub(Reply::json("200 OK", CRIMINAL).delayed(Duration::from_millis(300))).await;
    let gw = server.gateway(Duration::from_secs(5));
    let session = AnalysisSession::new();

    let (first, second) = tokio::join!(session.analyze(&gw, "first submission"), async {
        while !session.is_busy() {
            tokio::task::yield_now().await;
        }
        session.analyze(&gw, "second submission").await
    });

    assert!(first.unwrap().is_success());
    assert_eq!(second.unwrap_err(), SessionError::Busy);
    assert_eq!(server.connections(), 1);
    assert!(!session.is_busy());

    // Free again once the first request resolved.
    assert!(session.analyze(&gw, "third").await.unwrap().is_success());
}
