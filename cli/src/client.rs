//! # Payment API Client
//!
//! Posts the three card form fields to the payment endpoint and decodes the
//! answer into a [PaymentOutcome].

use anyhow::{Context, Result};
use std::time::Duration;

/// Body of `POST /api/payment`, values are sent verbatim
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentForm {
    pub card_number: String,
    pub cvv: String,
    pub expiry: String,
}

#[derive(Debug, Default, serde::Deserialize)]
struct PaymentApiResponse {
    status: Option<String>,
    token: Option<String>,
    error: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum PaymentOutcome {
    Processed {
        status: String,
        token: Option<String>,
    },
    Rejected {
        code: u16,
        error: String,
    },
}

/// Maps an HTTP answer of the payment endpoint to an outcome.
///
/// Bodies that are not JSON or lack the expected field are reported as
/// rejections carrying the status code.
pub fn decode_outcome(code: u16, body: &[u8]) -> PaymentOutcome {
    let response = serde_json::from_slice::<PaymentApiResponse>(body).unwrap_or_default();

    match response {
        PaymentApiResponse {
            status: Some(status),
            token,
            ..
        } if (200..300).contains(&code) => PaymentOutcome::Processed { status, token },
        PaymentApiResponse { error, .. } => PaymentOutcome::Rejected {
            code,
            error: error.unwrap_or_else(|| format!("unexpected response (HTTP {code})")),
        },
    }
}

pub struct PaymentClient {
    client: reqwest::Client,
    endpoint: String,
}

impl PaymentClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .context("failed to build http client")?,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sends exactly one POST with `form` as JSON body
    pub async fn submit(&self, form: &PaymentForm) -> Result<PaymentOutcome> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("accept", "application/json")
            .json(form)
            .send()
            .await
            .with_context(|| format!("failed to reach payment endpoint {}", self.endpoint))?;

        let code = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .context("failed to read payment endpoint response")?;

        Ok(decode_outcome(code, &body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
        sync::mpsc,
    };

    /// Minimal HTTP/1.1 endpoint answering every request with `reply`.
    /// Sends `(request line, body)` of each request on the returned channel.
    async fn start_payment_endpoint(
        reply: &'static str,
    ) -> (String, Arc<AtomicUsize>, mpsc::UnboundedReceiver<(String, String)>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/api/payment", listener.local_addr().unwrap());
        let hits = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = mpsc::unbounded_channel();

        let counter = hits.clone();
        tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                let mut raw = Vec::new();
                let mut chunk = [0u8; 1024];
                let (head, body) = loop {
                    let read = stream.read(&mut chunk).await.unwrap();
                    assert!(read > 0, "connection closed before full request");
                    raw.extend_from_slice(&chunk[..read]);

                    let text = String::from_utf8_lossy(&raw).to_string();
                    if let Some((head, body)) = text.split_once("\r\n\r\n") {
                        let content_length = head
                            .lines()
                            .filter_map(|line| line.split_once(':'))
                            .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
                            .map(|(_, value)| value.trim().parse::<usize>().unwrap())
                            .unwrap_or(0);
                        if body.len() >= content_length {
                            break (head.to_string(), body.to_string());
                        }
                    }
                };

                counter.fetch_add(1, Ordering::SeqCst);
                let request_line = head.lines().next().unwrap_or_default().to_string();
                tx.send((request_line, body)).unwrap();

                let response = format!(
                    "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                    reply.len(),
                    reply
                );
                stream.write_all(response.as_bytes()).await.unwrap();
                stream.shutdown().await.unwrap();
            }
        });

        (url, hits, rx)
    }

    #[tokio::test]
    async fn test_submit_posts_form_once_and_decodes_status() {
        let (url, hits, mut requests) = start_payment_endpoint(
            r#"{"status":"Payment processed securely","token":"tok"}"#,
        )
        .await;
        let client = PaymentClient::new(url, Duration::from_secs(5)).unwrap();
        let form = PaymentForm {
            card_number: "4111 1111 1111 1111".into(),
            cvv: "123".into(),
            expiry: "12/30".into(),
        };

        let outcome = client.submit(&form).await.unwrap();

        assert_eq!(
            outcome,
            PaymentOutcome::Processed {
                status: "Payment processed securely".into(),
                token: Some("tok".into()),
            }
        );

        let (request_line, body) = requests.recv().await.unwrap();
        assert_eq!(request_line, "POST /api/payment HTTP/1.1");
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&body).unwrap(),
            serde_json::json!({
                "cardNumber": "4111 1111 1111 1111",
                "cvv": "123",
                "expiry": "12/30"
            })
        );
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(requests.try_recv().is_err());
    }

    #[test]
    fn test_form_serializes_with_camel_case_fields() {
        let form = PaymentForm {
            card_number: "4111 1111 1111 1111".into(),
            cvv: "123".into(),
            expiry: "12/30".into(),
        };

        assert_eq!(
            serde_json::to_value(&form).unwrap(),
            serde_json::json!({
                "cardNumber": "4111 1111 1111 1111",
                "cvv": "123",
                "expiry": "12/30"
            })
        );
    }

    #[test]
    fn test_decode_processed() {
        let outcome = decode_outcome(
            200,
            br#"{"status":"Payment processed securely","token":"abc"}"#,
        );

        assert_eq!(
            outcome,
            PaymentOutcome::Processed {
                status: "Payment processed securely".into(),
                token: Some("abc".into()),
            }
        );
    }

    #[test]
    fn test_decode_rejected_with_error_field() {
        let outcome = decode_outcome(400, br#"{"error":"Invalid card details"}"#);

        assert_eq!(
            outcome,
            PaymentOutcome::Rejected {
                code: 400,
                error: "Invalid card details".into(),
            }
        );
    }

    #[test]
    fn test_decode_non_json_body() {
        let outcome = decode_outcome(502, b"<html>Bad Gateway</html>");

        assert_eq!(
            outcome,
            PaymentOutcome::Rejected {
                code: 502,
                error: "unexpected response (HTTP 502)".into(),
            }
        );
    }

    #[test]
    fn test_decode_success_without_status() {
        let outcome = decode_outcome(200, br#"{"token":"abc"}"#);

        assert!(matches!(outcome, PaymentOutcome::Rejected { code: 200, .. }));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_an_error() {
        let client =
            PaymentClient::new("http://127.0.0.1:9/api/payment", Duration::from_secs(2)).unwrap();
        let form = PaymentForm {
            card_number: "4111111111111111".into(),
            cvv: "123".into(),
            expiry: "12/30".into(),
        };

        assert!(client.submit(&form).await.is_err());
    }
}
