use super::*;

const EXPO_LINK: &str = "exp://localhost:8081/--/payment/success";

fn render(status: &str, target: &str) -> String {
    render_html(&PaymentStatus::parse(status), &RedirectTarget::from(target), &PageOptions::default())
}

fn silent() -> PageOptions {
    PageOptions { loading_ui: false, ..PageOptions::default() }
}

async fn body_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

// =============================================================================
// Response headers
// =============================================================================

#[tokio::test]
async fn response_is_200_with_fixed_headers_for_every_status() {
    for status in ["success", "cancelled", "timeout", ""] {
        for target in [EXPO_LINK, "myapp://payment", "not a uri"] {
            let response =
                render_return_page(&PaymentStatus::parse(status), &RedirectTarget::from(target), &PageOptions::default());
            assert_eq!(response.status(), StatusCode::OK);
            let headers = response.headers();
            assert_eq!(headers[CONTENT_TYPE], "text/html; charset=utf-8");
            assert_eq!(headers[CACHE_CONTROL], "no-store, no-cache, must-revalidate, proxy-revalidate");
            assert_eq!(headers[X_CONTENT_TYPE_OPTIONS], "nosniff");
        }
    }
}

#[tokio::test]
async fn response_body_is_the_rendered_document() {
    let status = PaymentStatus::Success;
    let target = RedirectTarget::from(EXPO_LINK);
    let options = silent();
    let body = body_string(render_return_page(&status, &target, &options)).await;
    assert_eq!(body, render_html(&status, &target, &options));
}

// =============================================================================
// Content selection
// =============================================================================

#[test]
fn success_page_copy() {
    let html = render("success", EXPO_LINK);
    assert!(html.contains(r#"<span class="icon">🎉</span>"#));
    assert!(html.contains("<h1>Payment Confirmed!</h1>"));
    assert!(html.contains("<p>Your wallet balance has been updated.</p>"));
}

#[test]
fn cancelled_page_copy() {
    let html = render("cancelled", EXPO_LINK);
    assert!(html.contains(r#"<span class="icon">🛑</span>"#));
    assert!(html.contains("<h1>Payment Cancelled</h1>"));
    assert!(html.contains("<p>You can return to the app safe and sound.</p>"));
}

#[test]
fn unrecognized_status_renders_issue_copy() {
    let html = render("timeout", EXPO_LINK);
    assert!(html.contains(r#"<span class="icon">⚠️</span>"#));
    assert!(html.contains("<h1>Payment Issue</h1>"));
    assert!(html.contains("<p>You can return to the app safe and sound.</p>"));
    assert!(!html.contains("timeout"));
}

#[test]
fn document_is_complete() {
    let html = render("success", EXPO_LINK);
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.ends_with("</html>"));
    assert!(html.contains(r#"<meta charset="UTF-8">"#));
    assert!(html.contains("<title>Payment Status</title>"));
}

// =============================================================================
// Deep link
// =============================================================================

#[test]
fn navigation_literal_is_target_verbatim() {
    let html = render("success", EXPO_LINK);
    assert!(html.contains(r#"const deepLink = "exp://localhost:8081/--/payment/success";"#));
    assert!(html.contains("window.location.href = deepLink;"));
}

#[test]
fn hostile_target_cannot_break_out_of_script() {
    let html = render("success", r#"x";</script><script>alert(1)//"#);
    assert_eq!(html.matches("</script>").count(), 1);
    assert!(html.contains(r#"const deepLink = "x\";\u003c/script\u003e\u003cscript\u003ealert(1)//";"#));
}

// =============================================================================
// Client-side behavior
// =============================================================================

#[test]
fn nothing_navigates_outside_the_click_handler() {
    for options in [PageOptions::default(), silent()] {
        let html = render_html(&PaymentStatus::Success, &RedirectTarget::from(EXPO_LINK), &options);
        assert_eq!(html.matches("location").count(), 1, "exactly one location assignment");
        assert!(!html.contains("location.replace"));
        assert!(!html.contains("DOMContentLoaded"));
        assert!(!html.contains("onload"));
        assert!(!html.contains("http-equiv"));

        let handler_start = html.find("function returnToApp() {").unwrap();
        let navigate = html.find("window.location.href = deepLink;").unwrap();
        let timer = html.find("setTimeout(").unwrap();
        assert!(handler_start < navigate && navigate < timer);
        assert_eq!(html.matches("setTimeout(").count(), 1);
    }
}

#[test]
fn button_is_bound_to_click_handler() {
    let html = render("success", EXPO_LINK);
    assert!(html.contains(r#"<button onclick="returnToApp()" class="btn" id="return-btn">Return to App</button>"#));
    assert!(!html.contains("<a "));
}

#[test]
fn loading_variant_listens_for_all_signals() {
    let html = render("success", EXPO_LINK);
    assert!(html.contains("addEventListener('visibilitychange'"));
    assert!(html.contains("addEventListener('blur'"));
    assert!(html.contains("addEventListener('pagehide'"));
    assert!(html.contains("if (!appOpened && document.visibilityState === 'visible')"));
}

#[test]
fn loading_variant_shows_retry_affordance() {
    let html = render("cancelled", EXPO_LINK);
    assert!(html.contains(r#"<div class="loading" id="loading"></div>"#));
    assert!(html.contains("btn.style.display = 'none';"));
    assert!(html.contains("<p>Opening app...</p>"));
    assert!(html.contains("Unable to open app. Please try again or close this page."));
    assert!(html.contains("btn.textContent = 'Try Again';"));
    assert!(html.contains("}, 2000);"));
}

#[test]
fn silent_variant_only_logs() {
    let html = render_html(&PaymentStatus::Success, &RedirectTarget::from(EXPO_LINK), &silent());
    assert!(html.contains("console.log('App may not have opened');"));
    assert!(!html.contains("id=\"loading\""));
    assert!(!html.contains("Try Again"));
    assert!(!html.contains("pagehide"));
    assert!(html.contains("addEventListener('visibilitychange'"));
    assert!(html.contains("addEventListener('blur'"));
}

#[test]
fn fallback_delay_is_configurable() {
    let options = PageOptions { fallback_delay_ms: 3500, ..PageOptions::default() };
    let html = render_html(&PaymentStatus::Success, &RedirectTarget::from(EXPO_LINK), &options);
    assert!(html.contains("}, 3500);"));
    assert!(!html.contains("}, 2000);"));
}
