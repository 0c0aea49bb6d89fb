//! Severity-tagged summary formatting for outbound notifications.

use linewatch_model::{ProjectConfig, ReviewAlert, ReviewResult, Severity};

use crate::OutboundEmail;

/// Build the escalation email for a review result, or `None` when the
/// result does not warrant one.
pub fn compose(review: &ReviewResult, project: &ProjectConfig) -> Option<OutboundEmail> {
    if !review.notification_required() {
        return None;
    }
    let to = review
        .recipient
        .clone()
        .unwrap_or_else(|| project.notifications.environmental_lead.clone());
    let top = review.top_severity().unwrap_or(Severity::High);
    let subject = format!(
        "[{}] Compliance alert - {} report {}",
        top.as_str().to_uppercase(),
        review.activity_type,
        review.report_id
    );
    Some(OutboundEmail {
        to,
        cc: project.notifications.cc.clone(),
        subject,
        html_body: render_html(review, project),
    })
}

fn render_html(review: &ReviewResult, project: &ProjectConfig) -> String {
    let mut body = String::new();
    body.push_str(&format!(
        "<h2>Compliance review: {} report {}</h2>\n",
        escape(&review.activity_type),
        escape(&review.report_id)
    ));
    body.push_str(&format!("<p>Project: {}</p>\n", escape(&project.project.name)));
    body.push_str(&format!(
        "<p>Status: <strong>{}</strong> ({} alert(s), {} warning(s), {} check(s) passed)</p>\n",
        review.overall_status(),
        review.alert_count(),
        review.warning_count(),
        review.passed_count()
    ));

    push_section(&mut body, "Alerts", &review.alerts);
    push_section(&mut body, "Warnings", &review.warnings);

    if review.degraded {
        body.push_str(
            "<p><em>Part of this review could not be evaluated; \
             the lists above may be incomplete.</em></p>\n",
        );
    }
    body
}

fn push_section(body: &mut String, heading: &str, entries: &[ReviewAlert]) {
    if entries.is_empty() {
        return;
    }
    body.push_str(&format!("<h3>{heading}</h3>\n<ul>\n"));
    for entry in entries {
        body.push_str(&format!(
            "<li><strong>[{}] {}</strong>: {}<br/>Recommended action: {}",
            entry.severity.as_str().to_uppercase(),
            escape(&entry.title),
            escape(&entry.message),
            escape(&entry.action)
        ));
        if let Some(reference) = &entry.reference {
            body.push_str(&format!(" (Ref: {})", escape(reference)));
        }
        body.push_str("</li>\n");
    }
    body.push_str("</ul>\n");
}

fn escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
