//! In-process fake Kubernetes API server for tests.

use http::{Request, Response, StatusCode};
use k8s_openapi::serde_json::{Value, json, to_vec};
use kube::Client;
use kube::client::Body;
use tokio::task::JoinHandle;

pub type MockHandle = tower_test::mock::Handle<Request<Body>, Response<Body>>;

/// Single expected request together with the response that should be sent back.
pub struct Exchange {
    path: String,
    queries: Vec<String>,
    status: StatusCode,
    body: Vec<u8>,
}

impl Exchange {
    /// Responds with `200 OK` and the JSON `body`.
    pub fn json(path: &str, body: Value) -> Self {
        Self {
            path: path.to_owned(),
            queries: Vec::new(),
            status: StatusCode::OK,
            body: to_vec(&body).unwrap_or_default(),
        }
    }

    /// Responds with `200 OK` and the raw text `body`.
    pub fn text(path: &str, body: &str) -> Self {
        Self {
            path: path.to_owned(),
            queries: Vec::new(),
            status: StatusCode::OK,
            body: body.as_bytes().to_vec(),
        }
    }

    /// Responds with Kubernetes `Status` object describing failure.
    pub fn failure(path: &str, status: StatusCode, reason: &str, message: &str) -> Self {
        let body = json!({
            "kind": "Status",
            "apiVersion": "v1",
            "metadata": {},
            "status": "Failure",
            "message": message,
            "reason": reason,
            "code": status.as_u16(),
        });

        Self {
            path: path.to_owned(),
            queries: Vec::new(),
            status,
            body: to_vec(&body).unwrap_or_default(),
        }
    }

    /// Responds with `404 Not Found` for the resource `name`.
    pub fn not_found(path: &str, resource: &str, name: &str) -> Self {
        Self::failure(
            path,
            StatusCode::NOT_FOUND,
            "NotFound",
            &format!("{resource} \"{name}\" not found"),
        )
    }

    /// Requires request query to contain the `fragment`.
    pub fn with_query(mut self, fragment: &str) -> Self {
        self.queries.push(fragment.to_owned());
        self
    }
}

/// Returns list object in the shape returned by the Kubernetes API.
pub fn list(kind: &str, items: Vec<Value>) -> Value {
    json!({
        "apiVersion": "v1",
        "kind": kind,
        "metadata": { "resourceVersion": "1" },
        "items": items,
    })
}

/// Creates new [`Client`] backed by a mock service.
pub fn mock_client() -> (Client, MockHandle) {
    let (service, handle) = tower_test::mock::pair::<Request<Body>, Response<Body>>();
    (Client::new(service, "default"), handle)
}

/// Creates new [`Client`] that answers the `exchanges` in order, asserting the request paths.
pub fn fake_cluster(exchanges: Vec<Exchange>) -> (Client, JoinHandle<()>) {
    let (client, mut handle) = mock_client();
    let server = tokio::spawn(async move {
        for exchange in exchanges {
            let (request, send) = handle.next_request().await.expect("expected request was not sent");
            assert_eq!(exchange.path, request.uri().path());
            let actual = request.uri().query().unwrap_or_default();
            for query in &exchange.queries {
                assert!(actual.contains(query.as_str()), "query '{actual}' does not contain '{query}'");
            }

            let response = Response::builder()
                .status(exchange.status)
                .body(Body::from(exchange.body))
                .expect("valid response");
            send.send_response(response);
        }
    });

    (client, server)
}
