use anyhow::bail;
use clap::{Args, Parser, Subcommand};
use std::time::Duration;
use url::{Host, Url};

use crate::{
    client::{PaymentClient, PaymentForm, PaymentOutcome},
    config,
};

#[derive(Args, Debug, Clone)]
pub struct SubmitArgs {
    #[arg(long)]
    card_number: String,
    #[arg(long)]
    cvv: String,
    /// Card expiration, MM/YY
    #[arg(long)]
    expiry: String,
    /// Overrides PAY_FORM_ENDPOINT
    #[arg(long)]
    endpoint: Option<String>,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Action {
    /// Posts the card fields to the payment endpoint and prints the status
    Submit(SubmitArgs),
}

/// Command line payment form
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct AppArgs {
    #[command(subcommand)]
    pub action: Action,
}

impl AppArgs {
    pub async fn run(&self) -> anyhow::Result<()> {
        match &self.action {
            Action::Submit(args) => {
                let app_config = config::app_config()?;
                let endpoint = args
                    .endpoint
                    .clone()
                    .unwrap_or_else(|| app_config.endpoint.clone());

                if is_plain_http_to_remote(&endpoint) {
                    eprintln!("warning: sending card data over plain http to {endpoint}");
                }

                let client =
                    PaymentClient::new(endpoint, Duration::from_secs(app_config.timeout_secs))?;

                match client.submit(&args.form()).await? {
                    PaymentOutcome::Processed { status, .. } => {
                        println!("{status}");
                        Ok(())
                    }
                    PaymentOutcome::Rejected { code, error } => {
                        bail!("payment rejected by {} (HTTP {code}): {error}", client.endpoint())
                    }
                }
            }
        }
    }
}

impl SubmitArgs {
    fn form(&self) -> PaymentForm {
        PaymentForm {
            card_number: self.card_number.clone(),
            cvv: self.cvv.clone(),
            expiry: self.expiry.clone(),
        }
    }
}

/// `http://` url whose host is not this machine
fn is_plain_http_to_remote(endpoint: &str) -> bool {
    let Ok(url) = Url::parse(endpoint) else {
        return false;
    };
    if url.scheme() != "http" {
        return false;
    }

    match url.host() {
        Some(Host::Domain(domain)) => !domain.eq_ignore_ascii_case("localhost"),
        Some(Host::Ipv4(ip)) => !ip.is_loopback(),
        Some(Host::Ipv6(ip)) => !ip.is_loopback(),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_args_build_form_verbatim() {
        let args = AppArgs::try_parse_from([
            "pay-form",
            "submit",
            "--card-number",
            "4111 1111 1111 1111",
            "--cvv",
            "123",
            "--expiry",
            "12/30",
        ])
        .unwrap();

        let Action::Submit(submit) = args.action;
        let form = submit.form();
        assert_eq!(form.card_number, "4111 1111 1111 1111");
        assert_eq!(form.cvv, "123");
        assert_eq!(form.expiry, "12/30");
        assert!(submit.endpoint.is_none());
    }

    #[test]
    fn test_submit_requires_every_field() {
        let result = AppArgs::try_parse_from(["pay-form", "submit", "--cvv", "123"]);

        assert!(result.is_err());
    }

    #[test]
    fn test_endpoint_override() {
        let args = AppArgs::try_parse_from([
            "pay-form",
            "submit",
            "--card-number",
            "4111111111111111",
            "--cvv",
            "123",
            "--expiry",
            "12/30",
            "--endpoint",
            "https://pay.example.com/api/payment",
        ])
        .unwrap();

        let Action::Submit(submit) = args.action;
        assert_eq!(
            submit.endpoint.as_deref(),
            Some("https://pay.example.com/api/payment")
        );
    }

    #[test]
    fn test_plain_http_warning_skips_loopback() {
        for local in [
            "http://localhost:8000/api/payment",
            "http://LOCALHOST:8000/api/payment",
            "http://127.0.0.1/api/payment",
            "http://127.8.9.10:8000/api/payment",
            "http://[::1]:8000/api/payment",
        ] {
            assert!(!is_plain_http_to_remote(local), "{local} is loopback");
        }
    }

    #[test]
    fn test_plain_http_warning_for_remote_hosts() {
        assert!(is_plain_http_to_remote("http://pay.example.com/api/payment"));
        assert!(is_plain_http_to_remote("http://10.0.0.5:8000/api/payment"));
        assert!(is_plain_http_to_remote("http://[2001:db8::1]/api/payment"));
        assert!(!is_plain_http_to_remote("https://pay.example.com/api/payment"));
    }
}
