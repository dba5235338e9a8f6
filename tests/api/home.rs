use crate::helpers::spawn_app;

#[tokio::test]
async fn landing_page_renders() {
    let app = spawn_app().await;

    let resp = app.get_home().await;
    assert_eq!(resp.status().as_u16(), 200);
    assert_eq!(
        resp.headers()
            .get("Content-Type")
            .and_then(|v| v.to_str().ok()),
        Some("text/html; charset=utf-8")
    );

    let html = resp.text().await.unwrap();
    for section in [
        "STOP GIVING RETAILERS",
        "A Home for Your Receipts.",
        "PRICING",
        "Tax Pack (CSV/PDF Export)",
        "@receiptIt.app",
    ] {
        assert!(html.contains(section), "missing {section:?}");
    }
    // nothing typed, so the floating CTA only scrolls
    assert!(html.contains(r#"data-cta="scroll_to_top""#));
    assert!(!html.contains("SECURE YOUR ALIAS"));
    // the hero form can open the overlay instead of joining directly
    assert!(html.contains(r#"formaction="/waitlist/claim" formmethod="get""#));
}
