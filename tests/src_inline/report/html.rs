use super::*;

fn view() -> ReportView {
    let mut preview = Table::new(vec!["Product Name".to_string(), "Correctness".to_string()]);
    preview.push_row(vec!["<script>".to_string(), "9".to_string()]);
    ReportView {
        falling_short: preview.clone(),
        preview,
        metrics_svg: "<svg id='m'></svg>".to_string(),
        timings_svg: "<svg id='t'></svg>".to_string(),
        threshold: 10.0,
        download_link: "<a href=\"data:file/csv;base64,\" download=\"data.csv\">Download results</a>"
            .to_string(),
    }
}

#[test]
fn test_escape() {
    assert_eq!(escape("a<b & \"c\" 'd'>"), "a&lt;b &amp; &quot;c&quot; &#39;d&#39;&gt;");
}

#[test]
fn test_page_with_upload_form_and_no_report() {
    let diagnostics = vec![Diagnostic::Error("Missing columns: Price".to_string())];
    let html = render_page(&PageView {
        diagnostics: &diagnostics,
        upload_action: Some("/score"),
        report: None,
    });
    assert!(html.contains("<h1>Score Your Catalogue:</h1>"));
    assert!(html.contains("action=\"/score\""));
    assert!(html.contains("<div class=\"msg error\">Missing columns: Price</div>"));
    assert!(!html.contains("Overall Metrics"));
}

#[test]
fn test_page_with_report_sections() {
    let report = view();
    let html = render_page(&PageView {
        diagnostics: &[],
        upload_action: None,
        report: Some(&report),
    });
    assert!(!html.contains("<form"));
    assert!(html.contains("<h2>Overall Metrics</h2>"));
    assert!(html.contains("<h2>Processing Times</h2>"));
    assert!(html.contains("<svg id='m'></svg>"));
    assert!(html.contains("Instances where metrics fall short:"));
    assert!(html.contains("download=\"data.csv\""));
    assert!(html.contains("<td>&lt;script&gt;</td>"));
    assert!(!html.contains("<td><script>"));
}

#[test]
fn test_falling_short_section_omitted_when_empty() {
    let mut report = view();
    report.falling_short = Table::new(report.preview.columns.clone());
    let html = render_page(&PageView {
        diagnostics: &[],
        upload_action: None,
        report: Some(&report),
    });
    assert!(!html.contains("fall short"));
}
