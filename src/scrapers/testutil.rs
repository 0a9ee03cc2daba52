//! Shared fixtures for exercising the scraping stack against a mock server.

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::models::Credentials;
use crate::scrapers::parser::OpenworkParser;
use crate::scrapers::session::AuthSession;

pub fn login_page_with_token(token: &str) -> String {
    format!(
        r#"<html><body><form action="/login_check" method="post">
            <input type="hidden" name="_csrf_token" value="{token}">
        </form></body></html>"#
    )
}

pub fn company_page(name: &str, intro: Option<&str>) -> String {
    let intro_html = intro
        .map(|text| {
            format!(
                r#"<div id="contentsHeader_text"><div>
                    <p class="mt-20 w-740 madblack break-all">{text}</p>
                </div></div>"#
            )
        })
        .unwrap_or_default();
    format!(
        r##"<html><body>
            <div id="mainTitle"><h2><a href="#">{name}</a></h2></div>
            {intro_html}
        </body></html>"##
    )
}

/// A listing page in OpenWork's markup: (datetime attribute, review text)
/// per item. An empty date string omits the `<time>` tag entirely.
pub fn listing_page(items: &[(&str, &str)]) -> String {
    let articles: String = items
        .iter()
        .map(|(date, content)| {
            let header = if date.is_empty() {
                "<div class=\"article_header-white\"><p></p></div>".to_string()
            } else {
                format!(
                    r#"<div class="article_header-white"><p><time datetime="{date}">{date}</time></p></div>"#
                )
            };
            format!(
                r#"<article class="article">{header}
                    <div class="article_body"><dl><dt>回答</dt><dd class="article_answer">{content}</dd></dl></div>
                </article>"#
            )
        })
        .collect();
    format!(r#"<html><body><div id="anchor01">{articles}</div></body></html>"#)
}

/// Mount the three login-handshake endpoints. `greet` controls whether the
/// landing page looks signed-in.
pub async fn mount_login_flow(server: &MockServer, token: &str, greet: bool) {
    Mock::given(method("GET"))
        .and(path("/login.php"))
        .respond_with(ResponseTemplate::new(200).set_body_string(login_page_with_token(token)))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/login_check"))
        .respond_with(ResponseTemplate::new(200))
        .mount(server)
        .await;
    let landing = if greet {
        "<html><body><p>ようこそ、会員さん</p></body></html>"
    } else {
        "<html><body><p>ログインしてください</p></body></html>"
    };
    Mock::given(method("GET"))
        .and(path("/my_top"))
        .respond_with(ResponseTemplate::new(200).set_body_string(landing))
        .mount(server)
        .await;
}

/// Run the full handshake against the mock server and hand back the session.
pub async fn logged_in_session(server: &MockServer) -> AuthSession {
    mount_login_flow(server, "fixture-token", true).await;
    let credentials = Credentials {
        username: "fixture-user".to_string(),
        password: "fixture-pass".to_string(),
    };
    AuthSession::login(&server.uri(), &credentials, &OpenworkParser::new())
        .await
        .expect("fixture login failed")
}
