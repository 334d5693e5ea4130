//! The password change form.
//!
//! `GET /password/` renders the form; `POST /password/` runs the change
//! and re-renders it with either a success banner or the ordered error
//! list. On failure the username and current password are echoed back so
//! the user only retypes the new password.

use crate::presenter::{self, DIRECTORY_FAILURE_MESSAGE};
use crate::service::ChangeOutcome;
use crate::state::AppState;
use axum::extract::State;
use axum::response::Html;
use axum::Form;
use serde::Deserialize;
use ankpass_policy::PasswordChangeRequest;

/// Form-encoded submission fields. Missing fields default to empty so a
/// partial legacy submission deserializes instead of erroring.
#[derive(Debug, Deserialize)]
pub struct PasswordForm {
    #[serde(default)]
    pub username: String,
    #[serde(default, rename = "currentPassword")]
    pub current_password: String,
    #[serde(default, rename = "newPassword1")]
    pub new_password1: String,
    #[serde(default, rename = "newPassword2")]
    pub new_password2: String,
}

impl From<PasswordForm> for PasswordChangeRequest {
    fn from(form: PasswordForm) -> Self {
        Self {
            username: form.username,
            current_password: form.current_password,
            new_password: form.new_password1,
            new_password_confirm: form.new_password2,
        }
    }
}

/// Banner for a completed password change.
const CHANGED_BANNER: &str = "Password changed.";

/// Banner for a successful credentials-only submission: the directory was
/// contacted but no new password was set, so the changed banner would
/// mislead a human who lands on this path.
const VERIFIED_BANNER: &str = "Credentials verified.";

/// What the form template renders.
#[derive(Debug, Default)]
struct FormView {
    username: String,
    current_password: String,
    errors: Vec<String>,
    banner: Option<&'static str>,
}

/// `GET /password/`
pub async fn show_form() -> Html<String> {
    Html(render_form_page(&FormView::default()))
}

/// `POST /password/`
pub async fn submit_form(
    State(state): State<AppState>,
    Form(form): Form<PasswordForm>,
) -> Html<String> {
    let request: PasswordChangeRequest = form.into();

    let view = match state.service.submit(&request).await {
        ChangeOutcome::Succeeded => FormView {
            banner: Some(if request.is_credentials_only() {
                VERIFIED_BANNER
            } else {
                CHANGED_BANNER
            }),
            ..FormView::default()
        },
        ChangeOutcome::Rejected(outcome) => FormView {
            username: request.username,
            current_password: request.current_password,
            errors: presenter::present(&outcome),
            ..FormView::default()
        },
        ChangeOutcome::Failed => FormView {
            username: request.username,
            current_password: request.current_password,
            errors: vec![DIRECTORY_FAILURE_MESSAGE.to_string()],
            ..FormView::default()
        },
    };

    Html(render_form_page(&view))
}

fn render_form_page(view: &FormView) -> String {
    let banner = if let Some(text) = view.banner {
        format!(r#"<div class="success">{text}</div>"#)
    } else if view.errors.is_empty() {
        String::new()
    } else {
        let items = view
            .errors
            .iter()
            .map(|e| format!("<li>{}</li>", html_escape(e)))
            .collect::<Vec<_>>()
            .join("\n");
        format!(r#"<div class="error"><ul>{items}</ul></div>"#)
    };

    let username = html_escape(&view.username);
    let current_password = html_escape(&view.current_password);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Change password</title>
    <style>
        * {{ box-sizing: border-box; margin: 0; padding: 0; }}
        body {{ font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; background: #f5f5f5; min-height: 100vh; display: flex; align-items: center; justify-content: center; }}
        .container {{ background: white; padding: 2rem; border-radius: 8px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); max-width: 400px; width: 100%; }}
        h1 {{ font-size: 1.5rem; margin-bottom: 1.5rem; color: #333; text-align: center; }}
        .form-group {{ margin-bottom: 1rem; }}
        label {{ display: block; margin-bottom: 0.25rem; color: #333; font-weight: 500; font-size: 0.875rem; }}
        input {{ width: 100%; padding: 0.625rem; border: 1px solid #ddd; border-radius: 4px; font-size: 1rem; }}
        input:focus {{ outline: none; border-color: #0066cc; }}
        button {{ width: 100%; padding: 0.75rem; background: #0066cc; color: white; border: none; border-radius: 4px; font-size: 1rem; cursor: pointer; margin-top: 0.5rem; }}
        button:hover {{ background: #0052a3; }}
        .error {{ background: #fee; border: 1px solid #fcc; color: #c00; padding: 0.75rem 0.75rem 0.75rem 2rem; border-radius: 4px; margin-bottom: 1rem; font-size: 0.875rem; }}
        .success {{ background: #efe; border: 1px solid #cfc; color: #070; padding: 0.75rem; border-radius: 4px; margin-bottom: 1rem; text-align: center; font-size: 0.875rem; }}
    </style>
</head>
<body>
    <div class="container">
        <h1>Change password</h1>

        {banner}

        <form method="post" action="/password/">
            <div class="form-group">
                <label for="username">Username</label>
                <input type="text" id="username" name="username" value="{username}" required autocomplete="username" />
            </div>
            <div class="form-group">
                <label for="currentPassword">Current password</label>
                <input type="password" id="currentPassword" name="currentPassword" value="{current_password}" required autocomplete="current-password" />
            </div>
            <div class="form-group">
                <label for="newPassword1">New password</label>
                <input type="password" id="newPassword1" name="newPassword1" required autocomplete="new-password" />
            </div>
            <div class="form-group">
                <label for="newPassword2">New password (again)</label>
                <input type="password" id="newPassword2" name="newPassword2" required autocomplete="new-password" />
            </div>
            <button type="submit">Change password</button>
        </form>
    </div>
</body>
</html>"#
    )
}

/// Escape text for interpolation into HTML.
fn html_escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<b a="c">&'"#),
            "&lt;b a=&quot;c&quot;&gt;&amp;&#x27;"
        );
    }

    #[test]
    fn test_render_success_banner() {
        let page = render_form_page(&FormView {
            banner: Some(CHANGED_BANNER),
            ..FormView::default()
        });
        assert!(page.contains("Password changed."));
        assert!(!page.contains(r#"class="error""#));
    }

    #[test]
    fn test_render_verified_banner_is_not_the_changed_banner() {
        let page = render_form_page(&FormView {
            banner: Some(VERIFIED_BANNER),
            ..FormView::default()
        });
        assert!(page.contains("Credentials verified."));
        assert!(!page.contains("Password changed."));
    }

    #[test]
    fn test_render_errors_in_order_and_escaped() {
        let page = render_form_page(&FormView {
            username: "ali<ce>".to_string(),
            errors: vec!["first".to_string(), "second".to_string()],
            ..FormView::default()
        });
        let first = page.find("<li>first</li>").unwrap();
        let second = page.find("<li>second</li>").unwrap();
        assert!(first < second);
        assert!(page.contains("ali&lt;ce&gt;"));
        assert!(!page.contains("ali<ce>"));
    }
}
