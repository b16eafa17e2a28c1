//! Bar chart of the ranked view: a plain model plus an inline SVG rendering.

use std::fmt::Write;

use crate::report::types::RankedView;

pub const X_LABEL: &str = "Nama Koin";
pub const Y_LABEL: &str = "Harga (USD)";

const WIDTH: f64 = 1000.0;
const HEIGHT: f64 = 500.0;
const MARGIN_LEFT: f64 = 80.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 60.0;
const MARGIN_BOTTOM: f64 = 140.0;
const BAR_FILL: &str = "orange";

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub height: f64,
    pub value_label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub bars: Vec<Bar>,
}

impl BarChart {
    pub fn from_ranked(view: &RankedView, top_n: usize) -> Self {
        let bars = view
            .rows
            .iter()
            .filter_map(|row| {
                row.price_usd.map(|price| Bar {
                    label: row.name.clone(),
                    height: price,
                    value_label: format_thousands(price),
                })
            })
            .collect();

        Self {
            title: format!("Top {top_n} Kripto dengan Harga Tertinggi"),
            x_label: X_LABEL.to_string(),
            y_label: Y_LABEL.to_string(),
            bars,
        }
    }

    pub fn max_height(&self) -> f64 {
        self.bars.iter().map(|b| b.height).fold(0.0, f64::max)
    }
}

/// Round to a whole number and group digits by thousands: `1234567.8 -> "1,234,568"`.
pub fn format_thousands(value: f64) -> String {
    let rounded = format!("{value:.0}");
    let (sign, digits) = match rounded.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", rounded.as_str()),
    };
    // "-0" after rounding a tiny negative
    if digits.bytes().all(|b| b == b'0') {
        return "0".to_string();
    }

    let mut out = String::with_capacity(rounded.len() + digits.len() / 3);
    out.push_str(sign);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
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

/// Render the chart as a standalone `<svg>` element.
pub fn render_svg(chart: &BarChart) -> String {
    let mut svg = String::new();
    // writes into a String cannot fail
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {WIDTH} {HEIGHT}" width="100%" role="img" aria-label="{title}">"#,
        title = escape_xml(&chart.title),
    );
    let _ = write!(
        svg,
        r#"<text x="{x}" y="30" text-anchor="middle" font-size="18">{title}</text>"#,
        x = WIDTH / 2.0,
        title = escape_xml(&chart.title),
    );

    let plot_w = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let baseline = MARGIN_TOP + plot_h;

    // axes
    let _ = write!(
        svg,
        r#"<line x1="{MARGIN_LEFT}" y1="{MARGIN_TOP}" x2="{MARGIN_LEFT}" y2="{baseline}" stroke="black"/><line x1="{MARGIN_LEFT}" y1="{baseline}" x2="{x2}" y2="{baseline}" stroke="black"/>"#,
        x2 = MARGIN_LEFT + plot_w,
    );
    let _ = write!(
        svg,
        r#"<text x="{x}" y="{y}" text-anchor="middle" font-size="13">{label}</text>"#,
        x = MARGIN_LEFT + plot_w / 2.0,
        y = HEIGHT - 10.0,
        label = escape_xml(&chart.x_label),
    );
    let _ = write!(
        svg,
        r#"<text x="20" y="{y}" text-anchor="middle" font-size="13" transform="rotate(-90 20 {y})">{label}</text>"#,
        y = MARGIN_TOP + plot_h / 2.0,
        label = escape_xml(&chart.y_label),
    );

    if chart.bars.is_empty() {
        let _ = write!(
            svg,
            r#"<text x="{x}" y="{y}" text-anchor="middle" font-size="14" fill="gray">Tidak ada data harga</text>"#,
            x = MARGIN_LEFT + plot_w / 2.0,
            y = MARGIN_TOP + plot_h / 2.0,
        );
        svg.push_str("</svg>");
        return svg;
    }

    let max = chart.max_height();
    let slot = plot_w / chart.bars.len() as f64;
    let bar_w = slot * 0.8;

    for (i, bar) in chart.bars.iter().enumerate() {
        let h = if max > 0.0 { bar.height / max * plot_h } else { 0.0 };
        let x = MARGIN_LEFT + slot * i as f64 + (slot - bar_w) / 2.0;
        let y = baseline - h;
        let cx = x + bar_w / 2.0;
        let label_y = baseline + 14.0;

        let _ = write!(
            svg,
            r#"<rect x="{x:.2}" y="{y:.2}" width="{bar_w:.2}" height="{h:.2}" fill="{BAR_FILL}"><title>{name}</title></rect>"#,
            name = escape_xml(&bar.label),
        );
        let _ = write!(
            svg,
            r#"<text x="{cx:.2}" y="{vy:.2}" text-anchor="middle" font-size="8">{value}</text>"#,
            vy = y - 4.0,
            value = escape_xml(&bar.value_label),
        );
        let _ = write!(
            svg,
            r#"<text x="{cx:.2}" y="{label_y:.2}" text-anchor="end" font-size="11" transform="rotate(-45 {cx:.2} {label_y:.2})">{name}</text>"#,
            name = escape_xml(&bar.label),
        );
    }

    svg.push_str("</svg>");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::types::DisplayRow;

    fn ranked(prices: &[(&str, Option<f64>)]) -> RankedView {
        RankedView {
            rows: prices
                .iter()
                .map(|(name, price)| DisplayRow {
                    name: name.to_string(),
                    symbol: name.to_lowercase(),
                    price_usd: *price,
                    market_cap: None,
                    change_24h_pct: None,
                })
                .collect(),
        }
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(65000.0), "65,000");
        assert_eq!(format_thousands(1_234_567.8), "1,234,568");
        assert_eq!(format_thousands(999.4), "999");
        assert_eq!(format_thousands(1000.0), "1,000");
        assert_eq!(format_thousands(0.0042), "0");
        assert_eq!(format_thousands(-0.2), "0");
        assert_eq!(format_thousands(-12345.0), "-12,345");
    }

    #[test]
    fn test_one_bar_per_ranked_row() {
        let chart = BarChart::from_ranked(&ranked(&[("Bitcoin", Some(65000.0)), ("Ethereum", Some(3200.4))]), 10);

        assert_eq!(chart.bars.len(), 2);
        assert_eq!(
            chart.bars[0],
            Bar { label: "Bitcoin".into(), height: 65000.0, value_label: "65,000".into() }
        );
        assert_eq!(chart.bars[1].value_label, "3,200");
        assert_eq!(chart.max_height(), 65000.0);
    }

    #[test]
    fn test_svg_contains_bars_and_labels() {
        let chart = BarChart::from_ranked(&ranked(&[("Bitcoin", Some(65000.0)), ("Wrapped <BTC>", Some(64900.0))]), 10);
        let svg = render_svg(&chart);

        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert_eq!(svg.matches("<rect").count(), 2);
        assert!(svg.contains(">65,000</text>"));
        assert!(svg.contains("Wrapped &lt;BTC&gt;"));
        assert!(!svg.contains("<BTC>"));
        assert!(svg.contains("rotate(-45"));
        assert!(svg.contains("Top 10 Kripto dengan Harga Tertinggi"));
    }

    #[test]
    fn test_empty_chart_placeholder() {
        let svg = render_svg(&BarChart::from_ranked(&RankedView::default(), 10));
        assert_eq!(svg.matches("<rect").count(), 0);
        assert!(svg.contains("Tidak ada data harga"));
    }

    #[test]
    fn test_tallest_bar_fills_plot() {
        let svg = render_svg(&BarChart::from_ranked(&ranked(&[("Bitcoin", Some(65000.0))]), 10));
        let plot_h = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
        assert!(svg.contains(&format!(r#"height="{plot_h:.2}""#)));
    }
}
