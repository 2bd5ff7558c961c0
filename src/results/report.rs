//! HTML report generation for scenario outcomes

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::models::{OutcomeCounts, TestOutcome};

/// Default report location
pub const DEFAULT_REPORT_PATH: &str = "reports/test_report.html";

const STYLE: &str = r#"
        body { font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; margin: 20px; background-color: #f5f5f5; }
        .container { max-width: 1200px; margin: 0 auto; background: white; padding: 20px; border-radius: 8px; box-shadow: 0 2px 4px rgba(0,0,0,0.1); }
        h1 { color: #333; border-bottom: 3px solid #007bff; padding-bottom: 10px; }
        .summary { display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 15px; margin: 20px 0; }
        .stat-card { background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; padding: 20px; border-radius: 8px; text-align: center; }
        .stat-card.passed { background: linear-gradient(135deg, #11998e 0%, #38ef7d 100%); }
        .stat-card.failed { background: linear-gradient(135deg, #eb3349 0%, #f45c43 100%); }
        .stat-card.skipped { background: linear-gradient(135deg, #fa709a 0%, #fee140 100%); }
        .stat-number { font-size: 32px; font-weight: bold; margin: 10px 0; }
        .stat-label { font-size: 14px; opacity: 0.9; }
        .test-case { background: #f9f9f9; border-left: 4px solid #007bff; padding: 15px; margin: 10px 0; border-radius: 4px; }
        .test-case.passed { border-left-color: #28a745; }
        .test-case.failed { border-left-color: #dc3545; }
        .test-case.skipped { border-left-color: #ffc107; }
        .test-name { font-weight: bold; color: #333; margin-bottom: 5px; }
        .test-status { display: inline-block; padding: 4px 12px; border-radius: 20px; font-size: 12px; font-weight: bold; margin: 5px 0; }
        .test-status.passed { background: #d4edda; color: #155724; }
        .test-status.failed { background: #f8d7da; color: #721c24; }
        .test-status.skipped { background: #fff3cd; color: #856404; }
        .test-details { background: white; padding: 10px; margin-top: 10px; border-radius: 4px; font-family: 'Courier New', monospace; font-size: 12px; max-height: 300px; overflow-y: auto; white-space: pre-wrap; }
        .request-response { margin: 10px 0; padding: 10px; background: #f0f0f0; border-radius: 4px; word-break: break-all; white-space: pre-wrap; }
        .timestamp { color: #666; font-size: 12px; }
        footer { margin-top: 40px; padding-top: 20px; border-top: 1px solid #ddd; color: #666; text-align: center; font-size: 12px; }
"#;

/// Renders scenario outcomes into a static HTML page
#[derive(Clone, Debug)]
pub struct ReportGenerator {
    title: String,
    endpoint: Option<String>,
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self {
            title: "API Test Report".to_string(),
            endpoint: None,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Endpoint shown in the footer
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Render the report stamped with the current time
    pub fn render(&self, outcomes: &[TestOutcome]) -> String {
        self.render_at(outcomes, Local::now())
    }

    pub fn render_at(&self, outcomes: &[TestOutcome], generated_at: DateTime<Local>) -> String {
        let counts = OutcomeCounts::from_outcomes(outcomes);
        let mut output = String::new();

        output.push_str(&format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{STYLE}    </style>
</head>
<body>
    <div class="container">
        <h1>{title}</h1>
        <p class="timestamp">Generated: {generated}</p>

        <div class="summary">
            <div class="stat-card">
                <div class="stat-label">Total Tests</div>
                <div class="stat-number">{total}</div>
            </div>
            <div class="stat-card passed">
                <div class="stat-label">Passed</div>
                <div class="stat-number">{passed}</div>
            </div>
            <div class="stat-card failed">
                <div class="stat-label">Failed</div>
                <div class="stat-number">{failed}</div>
            </div>
            <div class="stat-card skipped">
                <div class="stat-label">Skipped</div>
                <div class="stat-number">{skipped}</div>
            </div>
        </div>

        <div class="test-section">
            <h2>Test Details</h2>
"#,
            title = escape_html(&self.title),
            generated = generated_at.format("%Y-%m-%d %H:%M:%S"),
            total = counts.total,
            passed = counts.passed,
            failed = counts.failed,
            skipped = counts.skipped,
        ));

        for outcome in outcomes {
            output.push_str(&render_outcome(outcome));
        }

        output.push_str("        </div>\n\n        <footer>\n");
        output.push_str(&format!(
            "            <p>{}</p>\n",
            escape_html(&self.title)
        ));
        if let Some(endpoint) = &self.endpoint {
            output.push_str(&format!(
                "            <p>Endpoint: {}</p>\n",
                escape_html(endpoint)
            ));
        }
        output.push_str("        </footer>\n    </div>\n</body>\n</html>\n");

        output
    }

    /// Render and write the report, creating the parent directory if needed
    pub fn write(&self, outcomes: &[TestOutcome], path: impl AsRef<Path>) -> Result<PathBuf> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, self.render(outcomes))
            .with_context(|| format!("Failed to write report: {}", path.display()))?;

        info!("HTML report written to {}", path.display());
        Ok(path.to_path_buf())
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn render_outcome(outcome: &TestOutcome) -> String {
    let class = outcome.status.as_str();
    let mut block = format!(
        r#"            <div class="test-case {class}">
                <div class="test-name">{name}</div>
                <span class="test-status {class}">{status}</span>
                <div class="request-response">
                    <strong>Request:</strong> {request}
                </div>
                <div class="request-response">
                    <strong>Response:</strong> {response}
                </div>
"#,
        name = escape_html(&outcome.name),
        status = outcome.status,
        request = escape_html(outcome.request.as_deref().unwrap_or("N/A")),
        response = escape_html(outcome.response.as_deref().unwrap_or("N/A")),
    );

    if let Some(error) = &outcome.error {
        block.push_str(&format!(
            "                <div class=\"test-details\">{}</div>\n",
            escape_html(error)
        ));
    }
    block.push_str("            </div>\n");
    block
}

/// Escape text for inclusion in HTML element content or attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stat(html: &str, label: &str) -> String {
        let marker = format!("<div class=\"stat-label\">{label}</div>");
        let start = html.find(&marker).unwrap() + marker.len();
        let rest = &html[start..];
        let open = "<div class=\"stat-number\">";
        let from = rest.find(open).unwrap() + open.len();
        let to = rest[from..].find('<').unwrap();
        rest[from..from + to].to_string()
    }

    #[test]
    fn test_empty_report() {
        let html = ReportGenerator::new().render(&[]);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.trim_end().ends_with("</html>"));
        for label in ["Total Tests", "Passed", "Failed", "Skipped"] {
            assert_eq!(stat(&html, label), "0", "{label}");
        }
        assert!(!html.contains("class=\"test-case"));
    }

    #[test]
    fn test_counts_and_details() {
        let outcomes = vec![
            TestOutcome::passed("intake::process_success")
                .with_request("POST /process")
                .with_response("200"),
            TestOutcome::failed("intake::invalid_file_type", "Expected 422, got 200"),
            TestOutcome::skipped("booking::authenticate", "credentials rejected"),
        ];
        let html = ReportGenerator::new()
            .endpoint("/api/v1/intelligent-builder-intake/process")
            .render(&outcomes);

        assert_eq!(stat(&html, "Total Tests"), "3");
        assert_eq!(stat(&html, "Passed"), "1");
        assert_eq!(stat(&html, "Failed"), "1");
        assert_eq!(stat(&html, "Skipped"), "1");
        assert!(html.contains("<span class=\"test-status failed\">FAILED</span>"));
        assert!(html.contains("<strong>Request:</strong> N/A"));
        assert!(html.contains("Expected 422, got 200"));
        assert!(html.contains("Endpoint: /api/v1/intelligent-builder-intake/process"));
    }

    #[test]
    fn test_escapes_content() {
        let outcomes =
            vec![TestOutcome::failed("<script>", "body was <html> & \"quoted\"")];
        let html = ReportGenerator::new().render(&outcomes);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("&lt;html&gt; &amp; &quot;quoted&quot;"));
    }

    #[test]
    fn test_write_creates_directory_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/reports/test_report.html");
        let generator = ReportGenerator::new();

        generator.write(&[TestOutcome::passed("a")], &path).unwrap();
        let first = std::fs::read_to_string(&path).unwrap();
        assert_eq!(stat(&first, "Total Tests"), "1");

        generator.write(&[], &path).unwrap();
        let second = std::fs::read_to_string(&path).unwrap();
        assert_eq!(stat(&second, "Total Tests"), "0");
    }
}
