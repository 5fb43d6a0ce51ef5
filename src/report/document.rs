//! Printable levy estimate
//!
//! A static re-layout of a computed schedule: issuer header, the row table
//! without the screen-only columns, grand total, validity date, statutory
//! footer and signing officer block.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

use super::format::{format_long_date, format_money, format_quantity, format_short_date, format_whole};
use crate::input::Signatory;
use crate::period::BaseMonth;
use crate::schedule::Schedule;

pub const DOCUMENT_TITLE: &str = "CONSUMER SAFETY LEVY ESTIMATE";

/// Issuing office printed at the top of the estimate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Issuer {
    pub name: String,
    pub address_lines: Vec<String>,
    pub footer: String,
}

impl Default for Issuer {
    fn default() -> Self {
        Self {
            name: "Kenya Dairy Board - Kericho".to_string(),
            address_lines: vec![
                "Ardhi House (Huduma Centre) 5th Floor, Wing B.".to_string(),
                "Tel: 0717997465 / 0734026367".to_string(),
            ],
            footer: "Levy is due before the 10th of every month and is payable immediately \
                     upon submission, as stipulated by the Dairy Industry Act (Cap 336) and \
                     its subsidiary regulations."
                .to_string(),
        }
    }
}

/// Everything needed to print one estimate
#[derive(Debug, Clone, Serialize)]
pub struct EstimateDocument<'a> {
    pub issuer: Issuer,
    pub schedule: &'a Schedule,
    pub signatory: &'a Signatory,
    pub issued_on: NaiveDate,
    pub valid_until: NaiveDate,
    /// ISO currency label printed before amounts
    pub currency: String,
}

impl<'a> EstimateDocument<'a> {
    /// Build a document issued on `issued_on`, valid to the end of that month
    pub fn new(schedule: &'a Schedule, signatory: &'a Signatory, issued_on: NaiveDate) -> Self {
        Self {
            issuer: Issuer::default(),
            schedule,
            signatory,
            issued_on,
            valid_until: BaseMonth::validity_date(issued_on),
            currency: "Ksh".to_string(),
        }
    }

    pub fn with_issuer(mut self, issuer: Issuer) -> Self {
        self.issuer = issuer;
        self
    }

    fn validity_line(&self) -> String {
        format!("This estimate is valid till {}", format_long_date(self.valid_until))
    }

    /// Plain-text rendering
    pub fn render_text(&self) -> String {
        TextLayout(self).to_string()
    }

    /// Standalone HTML page for printing or saving as PDF
    pub fn render_html(&self) -> String {
        HtmlLayout(self).to_string()
    }
}

struct TextLayout<'d, 'a>(&'d EstimateDocument<'a>);

impl fmt::Display for TextLayout<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let doc = self.0;
        let config = &doc.schedule.config;

        writeln!(f, "{}", doc.issuer.name.to_uppercase())?;
        for line in &doc.issuer.address_lines {
            writeln!(f, "{}", line)?;
        }
        writeln!(f, "\n{}\n", DOCUMENT_TITLE)?;
        writeln!(
            f,
            "PRICE PER UNIT: {cur} {:.2}   CF FEE: {cur} {:.2}   DATE: {}",
            config.unit_price,
            config.period_fee,
            format_short_date(doc.issued_on),
            cur = doc.currency,
        )?;
        writeln!(f)?;

        writeln!(
            f,
            "{:>8} {:>11} {:>12} {:>14} {:>14} {:>12}",
            "Month", "Arrears (m)", "Quantity", "Levy",
            format!("Penalty ({})", doc.currency),
            format!("Total ({})", doc.currency),
        )?;
        for row in &doc.schedule.rows {
            writeln!(
                f,
                "{:>8} {:>11} {:>12} {:>14} {:>14} {:>12}",
                row.month_label,
                row.m,
                format_quantity(row.quantity),
                format_money(row.levy),
                format_money(row.penalty),
                format_whole(row.total),
            )?;
        }
        let totals = &doc.schedule.totals;
        writeln!(
            f,
            "{:<20} {:>12} {:>14} {:>14} {:>12}",
            "Totals",
            format_quantity(totals.quantity),
            format_money(totals.levy),
            format_money(totals.penalty),
            format_whole(totals.total),
        )?;

        writeln!(f, "\n{:>84}", doc.validity_line())?;
        writeln!(
            f,
            "\nGrand Total Due ({}): {}",
            doc.currency,
            format_whole(doc.schedule.total_due())
        )?;
        writeln!(f, "\n{}\n", doc.issuer.footer)?;

        if doc.signatory.has_signature() {
            writeln!(f, "[signature on file]")?;
        }
        if let Some(name) = &doc.signatory.officer_name {
            writeln!(f, "{}", name.to_uppercase())?;
        }
        writeln!(f, "AUTHORIZED SIGNATURE")
    }
}

struct HtmlLayout<'d, 'a>(&'d EstimateDocument<'a>);

impl fmt::Display for HtmlLayout<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let doc = self.0;
        let config = &doc.schedule.config;
        let cur = escape_html(&doc.currency);

        writeln!(f, "<!DOCTYPE html>")?;
        writeln!(f, "<html><head><meta charset=\"utf-8\"><title>{}</title>", DOCUMENT_TITLE)?;
        writeln!(f, "<style>{}</style></head><body>", PRINT_CSS)?;

        writeln!(f, "<header>")?;
        writeln!(f, "<h2>{}</h2>", escape_html(&doc.issuer.name.to_uppercase()))?;
        for line in &doc.issuer.address_lines {
            writeln!(f, "<p>{}</p>", escape_html(line))?;
        }
        writeln!(f, "<h1>{}</h1>", DOCUMENT_TITLE)?;
        writeln!(
            f,
            "<div class=\"meta\"><span>PRICE PER UNIT: {cur} {:.2}</span><span>CF FEE: {cur} {:.2}</span><span>DATE: {}</span></div>",
            config.unit_price,
            config.period_fee,
            format_short_date(doc.issued_on),
        )?;
        writeln!(f, "</header>")?;

        writeln!(f, "<table>")?;
        writeln!(
            f,
            "<thead><tr><th>Month</th><th>Arrears (m)</th><th>Quantity</th><th>Levy</th><th>Penalty ({cur})</th><th>Total ({cur})</th></tr></thead>"
        )?;
        writeln!(f, "<tbody>")?;
        for row in &doc.schedule.rows {
            writeln!(
                f,
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape_html(&row.month_label),
                row.m,
                format_quantity(row.quantity),
                format_money(row.levy),
                format_money(row.penalty),
                format_whole(row.total),
            )?;
        }
        writeln!(f, "</tbody>")?;
        let totals = &doc.schedule.totals;
        writeln!(
            f,
            "<tfoot><tr><td colspan=\"2\">Totals</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr></tfoot>",
            format_quantity(totals.quantity),
            format_money(totals.levy),
            format_money(totals.penalty),
            format_whole(totals.total),
        )?;
        writeln!(f, "</table>")?;

        writeln!(f, "<p class=\"validity\">{}</p>", doc.validity_line())?;
        writeln!(
            f,
            "<div class=\"due\"><p>Grand Total Due ({cur})</p><p class=\"amount\">{}</p></div>",
            format_whole(doc.schedule.total_due())
        )?;

        writeln!(f, "<footer>")?;
        writeln!(f, "<p class=\"statute\">{}</p>", escape_html(&doc.issuer.footer))?;
        writeln!(f, "<div class=\"signature\">")?;
        if let Some(url) = &doc.signatory.signature {
            writeln!(f, "<img src=\"{}\" alt=\"Signature\">", escape_html(url))?;
        }
        if let Some(name) = &doc.signatory.officer_name {
            writeln!(f, "<p class=\"officer\">{}</p>", escape_html(&name.to_uppercase()))?;
        }
        writeln!(f, "<p class=\"label\">Authorized Signature</p>")?;
        writeln!(f, "</div>")?;
        writeln!(f, "</footer>")?;
        writeln!(f, "</body></html>")
    }
}

const PRINT_CSS: &str = "body{font-family:sans-serif;max-width:60rem;margin:2rem auto}\
header{text-align:center;border-bottom:2px solid #000;padding-bottom:1.5rem}\
h1{text-decoration:underline}\
.meta{display:flex;justify-content:space-between;font-family:monospace;font-size:.75rem}\
table{width:100%;border-collapse:collapse;margin-top:1.5rem}\
th,td{border:1px solid #ccc;padding:.25rem .5rem;text-align:right}\
tfoot td{font-weight:bold;background:#f4f4f5}\
.validity{text-align:right;font-style:italic;font-weight:bold;font-size:.75rem}\
.due .amount{font-size:1.5rem;font-weight:bold}\
footer{border-top:1px solid #e4e4e7;margin-top:2rem;padding-top:2rem}\
.signature img{height:3rem}\
.officer{font-weight:bold;border-bottom:1px solid #000}\
.label{font-size:.6rem;font-weight:bold;text-transform:uppercase}";

/// Escape text for inclusion in HTML content or attribute values
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::signature_data_url;
    use crate::EstimateSession;

    fn issued() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[test]
    fn test_validity_runs_to_month_end() {
        let session = EstimateSession::seeded();
        let doc = EstimateDocument::new(session.schedule(), session.signatory(), issued());
        assert_eq!(doc.valid_until, NaiveDate::from_ymd_opt(2026, 10, 31).unwrap());
        assert!(doc.render_text().contains("This estimate is valid till 31 October 2026"));
    }

    #[test]
    fn test_text_layout() {
        let session = EstimateSession::seeded();
        let text = EstimateDocument::new(session.schedule(), session.signatory(), issued()).render_text();

        assert!(text.starts_with("KENYA DAIRY BOARD - KERICHO"));
        assert!(text.contains(DOCUMENT_TITLE));
        assert!(text.contains("PRICE PER UNIT: Ksh 0.40"));
        assert!(text.contains("CF FEE: Ksh 50.00"));
        assert!(text.contains("DATE: 19/10/2026"));
        assert!(text.contains("Grand Total Due (Ksh): 18,689"));
        // Screen-only columns are left out
        assert!(!text.contains("Penalty %"));
        assert!(!text.contains("[signature on file]"));
    }

    #[test]
    fn test_html_embeds_signature_and_escapes_name() {
        let mut session = EstimateSession::seeded();
        let signatory = session.signatory_mut();
        signatory.officer_name = Some("A <b>Officer</b>".to_string());
        signatory.signature = Some(signature_data_url("image/png", b"png"));

        let html = EstimateDocument::new(session.schedule(), session.signatory(), issued()).render_html();
        assert!(html.contains("<img src=\"data:image/png;base64,cG5n\""));
        assert!(html.contains("A &lt;B&gt;OFFICER&lt;/B&gt;"));
        assert!(!html.contains("<b>"));
        assert!(html.contains("<td>Oct-25</td>"));
    }

    #[test]
    fn test_custom_issuer() {
        let session = EstimateSession::seeded();
        let issuer = Issuer {
            name: "Water Services Office".to_string(),
            address_lines: vec![],
            footer: "Pay promptly.".to_string(),
        };
        let text = EstimateDocument::new(session.schedule(), session.signatory(), issued())
            .with_issuer(issuer)
            .render_text();
        assert!(text.starts_with("WATER SERVICES OFFICE"));
        assert!(text.contains("Pay promptly."));
    }

    #[test]
    fn test_layouts_end_with_closing_line() {
        let session = EstimateSession::seeded();
        let doc = EstimateDocument::new(session.schedule(), session.signatory(), issued());
        assert!(doc.render_text().ends_with("AUTHORIZED SIGNATURE\n"));
        assert!(doc.render_html().ends_with("</body></html>\n"));
        assert_eq!(doc.render_text(), doc.render_text());
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a & \"b\""), "a &amp; &quot;b&quot;");
    }
}
