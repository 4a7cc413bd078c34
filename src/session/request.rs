//! Materialises request descriptors for the current peer.

use reqwest::Method;
use serde_json::Value;

use super::network::NetworkIdentity;
use super::query::{Params, encode};
use crate::http::RequestDescriptor;

/// Snapshot of the session state a request is built against.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestTarget {
    pub host: String,
    pub port: Option<u16>,
    pub ssl: bool,
    pub identity: NetworkIdentity,
}

impl RequestTarget {
    pub fn scheme(&self) -> &'static str {
        if self.ssl { "https" } else { "http" }
    }

    /// `scheme://host[:port]`
    pub fn base_url(&self) -> String {
        match self.port {
            Some(port) => format!("{}://{}:{}", self.scheme(), self.host, port),
            None => format!("{}://{}", self.scheme(), self.host),
        }
    }

    fn headers(&self) -> Vec<(String, String)> {
        self.identity.headers(self.port)
    }
}

fn is_read(method: &Method) -> bool {
    *method == Method::GET
}

/// Builds a request against the node's `/api` routes.
///
/// `GET` carries `params` in the query string and has no body; every other verb sends
/// `params` as the JSON body.
pub fn build_request(method: &Method, resource: &str, params: &Params, target: &RequestTarget) -> RequestDescriptor {
    let mut url = format!("{}/api/{}", target.base_url(), resource.trim_start_matches('/'));

    let body = if is_read(method) {
        if !params.is_empty() {
            url.push('?');
            url.push_str(&encode(params));
        }
        None
    } else {
        Some(Value::Object(params.clone()))
    };

    RequestDescriptor {
        method: method.clone(),
        url,
        headers: target.headers(),
        body,
    }
}

/// Builds a request against the node's peer-to-peer routes, e.g. `/peer/transactions`.
pub fn build_peer_request(method: &Method, path: &str, body: Value, target: &RequestTarget) -> RequestDescriptor {
    RequestDescriptor {
        method: method.clone(),
        url: format!("{}/peer/{}", target.base_url(), path.trim_start_matches('/')),
        headers: target.headers(),
        body: Some(body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::network::resolve;
    use crate::session::query::trim_params;
    use serde_json::json;

    fn target() -> RequestTarget {
        RequestTarget {
            host: "localhost".to_string(),
            port: Some(7000),
            ssl: false,
            identity: resolve(true, None),
        }
    }

    fn options() -> Params {
        match json!({ "limit": 5, "offset": 3, "details": "testData" }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_get_request_puts_params_in_query() {
        let request = build_request(&Method::GET, "transaction", &options(), &target());

        assert_eq!(request.method, Method::GET);
        assert_eq!(
            request.url,
            "http://localhost:7000/api/transaction?limit=5&offset=3&details=testData"
        );
        assert_eq!(request.body, None);
        assert_eq!(request.headers, target().identity.headers(Some(7000)));
    }

    #[test]
    fn test_post_request_puts_params_in_body() {
        let params = trim_params(&options());
        let request = build_request(&Method::POST, "transaction", &params, &target());

        assert_eq!(request.url, "http://localhost:7000/api/transaction");
        assert_eq!(request.body, Some(Value::Object(params)));
    }

    #[test]
    fn test_post_request_without_params_has_empty_body() {
        let request = build_request(&Method::POST, "transaction", &Params::new(), &target());

        assert_eq!(request.url, "http://localhost:7000/api/transaction");
        assert_eq!(request.body, Some(json!({})));
    }

    #[test]
    fn test_get_request_without_params_has_no_query() {
        let request = build_request(&Method::GET, "blocks/getHeight", &Params::new(), &target());

        assert_eq!(request.url, "http://localhost:7000/api/blocks/getHeight");
    }

    #[test]
    fn test_ssl_without_port_uses_scheme_default() {
        let target = RequestTarget {
            port: None,
            ssl: true,
            ..target()
        };

        assert_eq!(target.base_url(), "https://localhost");
        let request = build_request(&Method::GET, "accounts", &Params::new(), &target);
        assert_eq!(request.url, "https://localhost/api/accounts");
        assert_eq!(request.header("port"), None);
        assert_eq!(request.header("nethash"), Some(target.identity.hash.as_str()));
    }

    #[test]
    fn test_peer_request_route() {
        let request = build_peer_request(&Method::POST, "transactions", json!({ "transaction": {} }), &target());

        assert_eq!(request.url, "http://localhost:7000/peer/transactions");
        assert_eq!(request.body, Some(json!({ "transaction": {} })));
    }
}
