use owo_colors::OwoColorize;

use crate::aggregate::SentimentSummary;

pub const CHART_TITLE: &str = "Sentiment Analysis of Messages";
pub const X_AXIS_LABEL: &str = "Sentiment";
pub const Y_AXIS_LABEL: &str = "Authors";

const BAR: &str = "█";
const MAX_LABEL_WIDTH: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartStyle {
    /// Columns available to bars, both sides of the zero axis together.
    pub width: usize,
    pub color: bool,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            width: 40,
            color: true,
        }
    }
}

/// Renders a horizontal bar chart with one bar per author.
///
/// Bars are scaled against the largest absolute mean. Negative means grow to
/// the left of the zero axis, so the plot only splits when both signs occur.
pub fn render_chart(summary: &SentimentSummary, style: &ChartStyle) -> String {
    let mut out = String::new();

    if style.color {
        out.push_str(&CHART_TITLE.bold().to_string());
    } else {
        out.push_str(CHART_TITLE);
    }
    out.push_str("\n\n");

    if summary.is_empty() {
        out.push_str("  (no messages yet)\n");
        return out;
    }

    let labels: Vec<String> = summary
        .authors
        .iter()
        .map(|a| truncate_label(&a.author))
        .collect();
    let label_width = labels
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0)
        .max(Y_AXIS_LABEL.len());

    let has_negative = summary.authors.iter().any(|a| a.average_sentiment < 0.0);
    let has_positive = summary.authors.iter().any(|a| a.average_sentiment >= 0.0);
    let width = style.width.max(2);
    let neg_width = match (has_negative, has_positive) {
        (true, true) => width / 2,
        (true, false) => width,
        _ => 0,
    };
    let pos_width = width - neg_width;

    let max_abs = summary
        .authors
        .iter()
        .map(|a| a.average_sentiment.abs())
        .fold(0.0, f64::max);
    let scale = if max_abs > 0.0 { max_abs } else { 1.0 };

    out.push_str(&format!("{Y_AXIS_LABEL:>label_width$}\n"));

    for (author, label) in summary.authors.iter().zip(&labels) {
        let mean = author.average_sentiment;
        let negative = mean < 0.0;
        let region = if negative { neg_width } else { pos_width };
        let len = bar_len(mean.abs(), scale, region);
        let bar = paint(&BAR.repeat(len), negative, style.color);

        let (left, right) = if negative {
            (format!("{}{}", " ".repeat(neg_width - len), bar), " ".repeat(pos_width))
        } else {
            (" ".repeat(neg_width), format!("{}{}", bar, " ".repeat(pos_width - len)))
        };

        out.push_str(&format!(
            "{label:>label_width$} {left}│{right} {mean:.2} ({})\n",
            author.message_count
        ));
    }

    let corner = if neg_width > 0 { "┴" } else { "└" };
    out.push_str(&format!(
        "{}{}{}{}\n",
        " ".repeat(label_width + 1),
        "─".repeat(neg_width),
        corner,
        "─".repeat(pos_width)
    ));

    let plot_start = label_width + 1;
    let axis_col = plot_start + neg_width;
    let mut ticks = Vec::new();
    if neg_width > 0 {
        place(&mut ticks, plot_start, &format!("-{max_abs:.2}"));
    }
    if pos_width > 0 {
        let label = format!("{max_abs:.2}");
        let end = axis_col + pos_width + 1;
        place(&mut ticks, end.saturating_sub(label.len()), &label);
    }
    place(&mut ticks, axis_col, "0");
    let ticks: String = ticks.into_iter().collect();
    out.push_str(ticks.trim_end());
    out.push('\n');

    let plot_len = neg_width + 1 + pos_width;
    let x_label_at = plot_start + plot_len.saturating_sub(X_AXIS_LABEL.len()) / 2;
    out.push_str(&format!("{}{X_AXIS_LABEL}\n", " ".repeat(x_label_at)));

    out
}

fn bar_len(value: f64, scale: f64, region: usize) -> usize {
    let len = (value / scale * region as f64).round() as usize;
    len.min(region)
}

fn paint(bar: &str, negative: bool, color: bool) -> String {
    match (color, negative) {
        (false, _) => bar.to_string(),
        (true, false) => bar.blue().to_string(),
        (true, true) => bar.red().to_string(),
    }
}

fn place(buf: &mut Vec<char>, at: usize, text: &str) {
    for (offset, ch) in text.chars().enumerate() {
        let idx = at + offset;
        if idx >= buf.len() {
            buf.resize(idx + 1, ' ');
        }
        buf[idx] = ch;
    }
}

fn truncate_label(author: &str) -> String {
    if author.chars().count() <= MAX_LABEL_WIDTH {
        return author.to_string();
    }
    let mut label: String = author.chars().take(MAX_LABEL_WIDTH - 1).collect();
    label.push('…');
    label
}
