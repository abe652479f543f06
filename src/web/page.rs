//! Server-side rendering of the verification page through the
//! `templates/verify_email.html` askama template, which HTML-escapes every
//! interpolated value.

use crate::verify::{VerificationForm, CODE_LENGTH};
use askama::Template;
use url::form_urlencoded;

/// One positional code input.
#[derive(Debug)]
pub struct CodeInput {
    pub index: usize,
    pub value: String,
}

#[derive(Debug, Template)]
#[template(path = "verify_email.html")]
pub struct VerifyEmailPage<'a> {
    pub email: &'a str,
    pub alert: Option<&'a str>,
    pub inputs: Vec<CodeInput>,
    pub action: String,
    pub resend_url: Option<&'a str>,
}

impl<'a> VerifyEmailPage<'a> {
    #[must_use]
    pub fn new(form: &'a VerificationForm, resend_url: Option<&'a str>) -> Self {
        let inputs = (0..CODE_LENGTH)
            .map(|index| CodeInput {
                index,
                value: form
                    .fields()
                    .get(index)
                    .map(String::from)
                    .unwrap_or_default(),
            })
            .collect();

        Self {
            email: form.email(),
            alert: form.message(),
            inputs,
            action: form_action(form.email()),
            resend_url,
        }
    }
}

/// Form action that posts back to the page while keeping the email context.
#[must_use]
pub fn form_action(email: &str) -> String {
    let encoded: String = form_urlencoded::byte_serialize(email.as_bytes()).collect();
    format!("/verify-email?email={encoded}")
}

/// # Errors
/// Returns an error if the template fails to render.
pub fn render(form: &VerificationForm, resend_url: Option<&str>) -> askama::Result<String> {
    VerifyEmailPage::new(form, resend_url).render()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::verify::{CodeFields, Redirector};
    use reqwest::StatusCode;

    #[test]
    fn form_action_encodes_email() {
        assert_eq!(
            form_action("a+b@example.com"),
            "/verify-email?email=a%2Bb%40example.com"
        );
    }

    #[test]
    fn page_lists_inputs_in_slot_order() {
        let fields = CodeFields::from_values(["1", "", "3", "", "", "6"]);
        let form = VerificationForm::with_fields("user@example.com", fields);
        let page = VerifyEmailPage::new(&form, None);

        let values: Vec<_> = page.inputs.iter().map(|input| input.value.as_str()).collect();
        assert_eq!(values, ["1", "", "3", "", "", "6"]);
        assert_eq!(page.inputs[5].index, 5);
        assert_eq!(page.action, "/verify-email?email=user%40example.com");
        assert!(page.alert.is_none());
    }

    #[test]
    fn render_shows_six_capped_inputs() {
        let html = render(&VerificationForm::new("user@example.com"), None).unwrap();
        assert_eq!(html.matches(r#"maxlength="1""#).count(), CODE_LENGTH);
        for index in 0..CODE_LENGTH {
            assert!(html.contains(&format!(r#"name="code{index}""#)));
        }
        assert!(html.contains("We have sent a code to your email <strong>user@example.com</strong>"));
        assert!(html.contains("Verify Account"));
        assert!(!html.contains(r#"role="alert""#));
        assert!(!html.contains("Resend"));
    }

    #[test]
    fn render_keeps_fields_and_alert() {
        let fields = CodeFields::from_values(["1", "2", "3", "4", "5", "6"]);
        let mut form = VerificationForm::with_fields("user@example.com", fields);
        form.begin_submit().unwrap();
        form.settle(Ok(StatusCode::BAD_REQUEST), &mut Redirector::new());

        let html = render(&form, Some("https://example.com/resend")).unwrap();
        assert!(html.contains(
            r#"<div class="alert alert-error" role="alert">Invalid or expired verification code</div>"#
        ));
        assert!(html.contains(r#"name="code5" maxlength="1" placeholder="0" autocomplete="one-time-code" value="6""#));
        assert!(html.contains(r#"href="https://example.com/resend""#));
    }

    #[test]
    fn render_escapes_email() {
        let html = render(&VerificationForm::new("<script>@x"), None).unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;@x"));
    }

    #[test]
    fn render_escapes_quotes_in_attributes() {
        let html = render(
            &VerificationForm::new("user@example.com"),
            Some(r#"https://example.com/" onclick="x"#),
        )
        .unwrap();
        assert!(!html.contains(r#"" onclick=""#));
    }
}
