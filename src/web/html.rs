//! Server-rendered dashboard page.

use std::fmt::Write;
use std::time::Duration;

use crate::report::chart::{escape_xml, render_svg};
use crate::report::export::CSV_FILE_NAME;
use crate::report::{DisplayRow, Report, COLUMNS};

const PAGE_TITLE: &str = "Data Kripto Realtime";
const STYLE: &str = "body{font-family:sans-serif;margin:2rem;}\
table{border-collapse:collapse;width:100%;margin-bottom:1.5rem;}\
th,td{border:1px solid #ddd;padding:4px 8px;}td.num{text-align:right;}\
.scroll{max-height:420px;overflow-y:auto;}\
.ok{background:#e7f6e7;padding:.75rem;}.err{background:#fde8e8;padding:.75rem;}";

fn layout(body: &str) -> String {
    format!(
        "<!DOCTYPE html><html lang=\"id\"><head><meta charset=\"utf-8\">\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
         <title>{PAGE_TITLE}</title><style>{STYLE}</style></head><body>\
         <h1>💰 Data Realtime Cryptocurrency (CoinGecko API)</h1>\
         <p>Aplikasi ini menampilkan <strong>seluruh data koin kripto</strong> dan \
         <strong>visualisasi koin dengan harga tertinggi</strong> berdasarkan data realtime dari \
         <a href=\"https://www.coingecko.com/en/api\">CoinGecko API</a>.</p>\
         {body}</body></html>"
    )
}

fn number_cell(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("<td class=\"num\">{v}</td>"),
        None => "<td class=\"num\">N/A</td>".to_string(),
    }
}

fn render_table(rows: &[DisplayRow]) -> String {
    let mut out = String::with_capacity(128 * (rows.len() + 1));
    out.push_str("<table><thead><tr>");
    for col in COLUMNS {
        let _ = write!(out, "<th>{}</th>", escape_xml(col));
    }
    out.push_str("</tr></thead><tbody>");
    for row in rows {
        let _ = write!(
            out,
            "<tr><td>{}</td><td>{}</td>{}{}{}</tr>",
            escape_xml(&row.name),
            escape_xml(&row.symbol),
            number_cell(row.price_usd),
            number_cell(row.market_cap),
            number_cell(row.change_24h_pct),
        );
    }
    out.push_str("</tbody></table>");
    out
}

/// Full page: table, ranked table, chart, CSV link.
pub fn render_page(report: &Report, top_n: usize, age: Duration, ttl: Duration) -> String {
    let mut body = String::new();

    body.push_str("<h2>📋 Seluruh Data Cryptocurrency (Realtime)</h2>");
    let _ = write!(body, "<p>{} koin</p>", report.table.len());
    body.push_str("<div class=\"scroll\">");
    body.push_str(&render_table(&report.table));
    body.push_str("</div>");

    let _ = write!(body, "<h2>🔝 Top {top_n} Kripto dengan Harga Tertinggi (USD)</h2>");
    body.push_str(&render_table(&report.ranked.rows));
    body.push_str(&render_svg(&report.chart));

    let _ = write!(
        body,
        "<p><a href=\"/{CSV_FILE_NAME}\" download=\"{CSV_FILE_NAME}\">⬇️ Unduh Seluruh Data CSV</a></p>"
    );
    body.push_str("<p class=\"ok\">✅ Data berhasil dimuat dan divisualisasikan!</p>");
    let _ = write!(
        body,
        "<p><small>Data berumur {} detik; diperbarui paling lambat setiap {} detik.</small></p>",
        age.as_secs(),
        ttl.as_secs(),
    );

    layout(&body)
}

/// Same shell, with an error notice where the tables and chart would be.
pub fn render_error_page(message: &str) -> String {
    let body = format!(
        "<p class=\"err\">⚠️ {}</p><p><a href=\"/\">Muat ulang</a></p>",
        escape_xml(message)
    );
    layout(&body)
}
