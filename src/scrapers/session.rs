use std::time::Duration;

use reqwest::Client;
use tracing::{error, info};

use crate::error::{Result, ScoutError};
use crate::models::Credentials;
use crate::scrapers::traits::ReviewPageParser;

pub const OPENWORK_BASE_URL: &str = "https://www.openwork.jp";

/// OpenWork serves full review text only to a browser-looking client
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
    AppleWebKit/605.1.15 (KHTML, like Gecko) Version/18.2 Safari/605.1.15";

/// An authenticated OpenWork session. The cookie jar inside the client is
/// the whole session state; drop it and the login is gone.
#[derive(Debug)]
pub struct AuthSession {
    client: Client,
}

impl AuthSession {
    /// Perform the form-login handshake: fetch the login page, lift the CSRF
    /// token out of it, submit the form, then confirm the landing page
    /// actually greets a signed-in member.
    ///
    /// No retries: any failure here aborts the run.
    pub async fn login<P: ReviewPageParser>(
        base_url: &str,
        credentials: &Credentials,
        parser: &P,
    ) -> Result<Self> {
        info!("Attempting to log in to OpenWork");

        let client = Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build()?;

        let login_page = client
            .get(format!("{base_url}/login.php"))
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let csrf_token = match parser.csrf_token(&login_page) {
            Some(token) => token,
            None => {
                error!("CSRF token not found in login page");
                return Err(ScoutError::TokenMissing);
            }
        };

        let target_path = format!("{base_url}/");
        let payload = [
            ("_username", credentials.username.as_str()),
            ("_password", credentials.password.as_str()),
            ("_remember_me", "1"),
            ("_csrf_token", csrf_token.as_str()),
            ("_target_path", target_path.as_str()),
        ];

        client
            .post(format!("{base_url}/login_check"))
            .form(&payload)
            .send()
            .await?
            .error_for_status()?;

        let landing = client
            .get(format!("{base_url}/my_top"))
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        if !parser.greeting_present(&landing) {
            error!("Login verification failed");
            return Err(ScoutError::AuthVerificationFailed);
        }

        info!("Successfully logged in to OpenWork");
        Ok(Self { client })
    }

    /// The cookie-carrying HTTP client behind this session
    pub fn client(&self) -> &Client {
        &self.client
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrapers::parser::OpenworkParser;
    use crate::scrapers::testutil::{login_page_with_token, mount_login_flow};
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn login_succeeds_and_submits_the_token() {
        let server = MockServer::start().await;
        mount_login_flow(&server, "tok-abc123", true).await;

        let credentials = Credentials {
            username: "user@example.com".to_string(),
            password: "hunter2".to_string(),
        };
        let session = AuthSession::login(&server.uri(), &credentials, &OpenworkParser::new())
            .await
            .unwrap();

        // The form POST must carry the token lifted from the login page.
        let requests = server.received_requests().await.unwrap();
        let submit = requests
            .iter()
            .find(|r| r.url.path() == "/login_check")
            .expect("login_check was never called");
        let body = String::from_utf8_lossy(&submit.body);
        assert!(body.contains("tok-abc123"));
        assert!(body.contains("_remember_me=1"));

        drop(session);
    }

    #[tokio::test]
    async fn missing_token_fails_without_submitting_the_form() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/login.php"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string("<html><form></form></html>"),
            )
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/login_check"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let credentials = Credentials {
            username: "u".to_string(),
            password: "p".to_string(),
        };
        let err = AuthSession::login(&server.uri(), &credentials, &OpenworkParser::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ScoutError::TokenMissing));

        server.verify().await;
    }

    #[tokio::test]
    async fn absent_greeting_fails_verification() {
        let server = MockServer::start().await;
        mount_login_flow(&server, "tok-abc123", false).await;

        let credentials = Credentials {
            username: "u".to_string(),
            password: "p".to_string(),
        };
        let err = AuthSession::login(&server.uri(), &credentials, &OpenworkParser::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ScoutError::AuthVerificationFailed));
    }

    #[tokio::test]
    async fn empty_token_value_is_treated_as_missing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/login.php"))
            .respond_with(ResponseTemplate::new(200).set_body_string(login_page_with_token("")))
            .mount(&server)
            .await;

        let credentials = Credentials {
            username: "u".to_string(),
            password: "p".to_string(),
        };
        let err = AuthSession::login(&server.uri(), &credentials, &OpenworkParser::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ScoutError::TokenMissing));
    }

    #[tokio::test]
    async fn failed_submit_status_surfaces_as_network_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/login.php"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(login_page_with_token("tok")),
            )
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/login_check"))
            .and(body_string_contains("tok"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let credentials = Credentials {
            username: "u".to_string(),
            password: "p".to_string(),
        };
        let err = AuthSession::login(&server.uri(), &credentials, &OpenworkParser::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ScoutError::Network(_)));
    }
}
