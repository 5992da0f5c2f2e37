use std::time::Duration;

use reqwest::blocking::Client;
use serde::Serialize;
use tracing::{debug, error, info};

use crate::config::settings::TelegramSettings;
use crate::engine::protocol::Notify;
use crate::error::{ConfigError, NotifyError};

#[derive(Serialize)]
pub struct SendMessageRequest<'a> {
    pub chat_id: &'a str,
    pub text: &'a str,
}

/// Posts messages to a Telegram bot chat.
pub struct TelegramNotifier {
    http: Client,
    // Carries the bot token; never log it.
    endpoint: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(settings: &TelegramSettings) -> Result<Self, ConfigError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(ConfigError::Client)?;

        let endpoint = format!(
            "{}/bot{}/sendMessage",
            settings.base_url.trim_end_matches('/'),
            settings.bot_token
        );
        debug!(chat_id = %settings.chat_id, timeout = settings.timeout_secs, "telegram notifier ready");

        Ok(Self {
            http,
            endpoint,
            chat_id: settings.chat_id.clone(),
        })
    }

    pub fn try_send(&self, text: &str) -> Result<(), NotifyError> {
        let req = SendMessageRequest {
            chat_id: &self.chat_id,
            text,
        };

        let resp = self
            .http
            .post(&self.endpoint)
            .json(&req)
            .send()
            .map_err(|e| NotifyError::Http(e.without_url()))?;

        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }

        let body = resp.text().unwrap_or_default();
        Err(NotifyError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

impl Notify for TelegramNotifier {
    fn notify(&self, text: &str) -> bool {
        match self.try_send(text) {
            Ok(()) => {
                info!("message success");
                true
            }
            Err(e) => {
                error!(error = %e, response = e.response_text(), "message failure");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn notifier_for(base_url: String) -> TelegramNotifier {
        let settings = TelegramSettings {
            bot_token: "123:abc".into(),
            chat_id: "4242".into(),
            base_url,
            timeout_secs: 5,
        };
        TelegramNotifier::new(&settings).unwrap()
    }

    #[test]
    fn posts_chat_id_and_text() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/bot123:abc/sendMessage")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({
                "chat_id": "4242",
                "text": "Inflation is 3.2%."
            })))
            .with_status(200)
            .with_body(r#"{"ok":true,"result":{}}"#)
            .create();

        assert!(notifier_for(server.url()).notify("Inflation is 3.2%."));
        mock.assert();
    }

    #[test]
    fn any_2xx_counts_as_delivered() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("POST", "/bot123:abc/sendMessage")
            .with_status(204)
            .create();

        assert!(notifier_for(server.url()).notify("hi"));
    }

    #[test]
    fn non_success_status_returns_false_with_body() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("POST", "/bot123:abc/sendMessage")
            .with_status(400)
            .with_body(r#"{"ok":false,"description":"Bad Request: chat not found"}"#)
            .create();

        let notifier = notifier_for(server.url());
        match notifier.try_send("hi") {
            Err(e @ NotifyError::Status { status: 400, .. }) => {
                assert!(e.response_text().contains("chat not found"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(!notifier.notify("hi"));
    }

    #[test]
    fn unreachable_endpoint_returns_false() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let notifier = notifier_for(format!("http://{}", addr));
        let err = notifier.try_send("hi").unwrap_err();
        assert_eq!(err.response_text(), "No response");
        assert!(!err.to_string().contains("123:abc"));
        assert!(!notifier.notify("hi"));
    }
}
