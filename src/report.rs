//! Report: plain output formats for canonical records.
//!
//! JSON lines for piping into other tools, or a short text summary for a
//! terminal. Charts and tables belong to whatever consumes these.

use salesboard_core::summary::Summary;
use salesboard_core::CanonicalRecord;
use std::fmt::Write as _;
use std::io::{self, Write};

/// Write one JSON object per record, in input order.
pub fn write_jsonl<W: Write>(records: &[CanonicalRecord], out: &mut W) -> io::Result<()> {
    for record in records {
        serde_json::to_writer(&mut *out, record)?;
        out.write_all(b"\n")?;
    }
    Ok(())
}

/// Render the summary block, followed by the given top records.
pub fn render_summary(summary: &Summary, top: &[&CanonicalRecord]) -> String {
    let mut text = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(text, "Records:        {}", summary.record_count);
    let _ = writeln!(text, "Total amount:   {}", format_amount(summary.total_amount));
    let _ = writeln!(text, "Average amount: {}", format_amount(summary.average_amount));

    if !summary.by_status.is_empty() {
        let _ = writeln!(text, "\nStatus");
        for (label, count) in &summary.by_status {
            let _ = writeln!(text, "  {label}: {count}");
        }
    }

    let _ = writeln!(text, "\nSales stage");
    for (label, count) in &summary.by_stage {
        let _ = writeln!(text, "  {label}: {count}");
    }

    let _ = writeln!(text, "\nVisits");
    for (label, count) in summary.by_visit_count.iter().filter(|(_, n)| *n > 0) {
        let _ = writeln!(text, "  {label}: {count}");
    }

    if !summary.monthly.is_empty() {
        let _ = writeln!(text, "\nMonthly");
        for (month, total) in &summary.monthly {
            let _ = writeln!(
                text,
                "  {month}: {} ({} records)",
                format_amount(total.amount),
                total.count
            );
        }
    }

    if !top.is_empty() {
        let _ = writeln!(text, "\nTop {} by amount", top.len());
        for (i, record) in top.iter().enumerate() {
            let _ = writeln!(
                text,
                "  {}. {} {} [{}]",
                i + 1,
                record.customer,
                format_amount(record.amount),
                record.status
            );
        }
    }

    text
}

/// Whole-won amount with thousands separators, e.g. `₩1,234,500`.
pub fn format_amount(amount: f64) -> String {
    let rounded = amount.round();
    let digits = format!("{}", rounded.abs() as u64);
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if rounded < 0.0 {
        format!("-₩{grouped}")
    } else {
        format!("₩{grouped}")
    }
}
