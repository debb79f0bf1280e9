//! Reporting and output formatting for the command line.
//! Only presentation lives here; all numbers come from a `SimulationResult`.

use std::fmt::{self, Write};

use crate::models::{Histogram, HistogramBin, SimulationResult};

const BAR_WIDTH: usize = 40;

/// Group the integer digits in threes: `1234567` -> `1,234,567`.
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Currency with thousands separators and two decimals, e.g. `-$1,234.50`.
pub fn format_currency(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}${}.{}", sign, group_thousands(int_part), frac_part)
}

/// Probability as a percentage with two decimals, e.g. `12.34%`.
pub fn format_percent(probability: f64) -> String {
    format!("{:.2}%", probability * 100.0)
}

/// Whole count with thousands separators.
pub fn format_count(count: usize) -> String {
    group_thousands(&count.to_string())
}

fn write_histogram(out: &mut impl Write, histogram: &Histogram) -> fmt::Result {
    let max_count = histogram.max_count().max(1);
    let scale = BAR_WIDTH as f64 / max_count as f64;

    for bin in &histogram.bins {
        let bar_length = (bin.count as f64 * scale).round() as usize;
        writeln!(
            out,
            "  {:>16} - {:>16} | {} ({})",
            format_currency(bin.lower),
            format_currency(bin.upper),
            "█".repeat(bar_length),
            format_count(bin.count)
        )?;
    }
    Ok(())
}

fn write_report(out: &mut impl Write, result: &SimulationResult, max_rows: usize) -> fmt::Result {
    let s = &result.summary;
    let hist = &result.histogram;

    writeln!(out, "Simulation with {} Events", format_count(s.trial_count))?;
    if let Some(seed) = result.seed {
        writeln!(out, "Seed: {}", seed)?;
    }
    writeln!(out)?;

    for marker in &hist.markers {
        let label = format!("{}:", marker.kind.label());
        writeln!(out, "  {:<11} {}", label, format_currency(marker.value))?;
    }
    writeln!(out, "  {:<11} {}", "Sample SD:", format_currency(s.sample_std))?;
    writeln!(out, "  {:<11} {}", "Minimum:", format_currency(s.min))?;
    writeln!(out, "  {:<11} {}\n", "Maximum:", format_currency(s.max))?;

    let (low, high) = s.two_sigma_interval();
    writeln!(out, "Given the assumptions are correct:")?;
    writeln!(
        out,
        "95% (±2SD from the average) likelihood the profits will be between {} and {}",
        format_currency(low),
        format_currency(high)
    )?;
    writeln!(
        out,
        "There is a {} chance that profit will be below {}",
        format_percent(s.risk_probability),
        format_currency(s.risk_threshold)
    )?;

    if hist.non_finite > 0 {
        writeln!(
            out,
            "\n{} trials overflowed and are not shown in the distribution.",
            format_count(hist.non_finite)
        )?;
    } else if hist.degenerate {
        writeln!(out, "\nAll trials produced the same profit.")?;
    }
    writeln!(out, "\nProfit Distribution:")?;
    write_histogram(out, &coarsen(hist, max_rows))
}

/// Horizontal bar chart of the histogram, one line per bin.
pub fn render_histogram(histogram: &Histogram) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    write_histogram(&mut out, histogram).ok();
    out
}

/// Full text report: markers, interval, risk statement and histogram.
/// `max_rows` limits the histogram to a coarser re-binning for the terminal.
pub fn render_report(result: &SimulationResult, max_rows: usize) -> String {
    let mut out = String::new();
    write_report(&mut out, result, max_rows).ok();
    out
}

/// Merge adjacent bins so at most `max_rows` remain.
fn coarsen(histogram: &Histogram, max_rows: usize) -> Histogram {
    let rows = max_rows.max(1);
    if histogram.bins.len() <= rows {
        return histogram.clone();
    }
    let group = histogram.bins.len().div_ceil(rows);
    let bins = histogram
        .bins
        .chunks(group)
        .map(|chunk| HistogramBin {
            lower: chunk[0].lower,
            upper: chunk[chunk.len() - 1].upper,
            count: chunk.iter().map(|b| b.count).sum(),
        })
        .collect();
    Histogram {
        bins,
        markers: histogram.markers.clone(),
        degenerate: histogram.degenerate,
        non_finite: histogram.non_finite,
    }
}

/// Print the text report to stdout.
pub fn display_report(result: &SimulationResult, max_rows: usize) {
    println!("╔══════════════════════════════════════════════════════════════════════════════╗");
    println!("║               MONTE CARLO SIMULATION FOR MANUFACTURING                       ║");
    println!("╚══════════════════════════════════════════════════════════════════════════════╝\n");
    print!("{}", render_report(result, max_rows));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Summary;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(999.5), "$999.50");
        assert_eq!(format_currency(1_000.0), "$1,000.00");
        assert_eq!(format_currency(250_000.0), "$250,000.00");
        assert_eq!(format_currency(1_234_567.891), "$1,234,567.89");
        assert_eq!(format_currency(-633.333), "-$633.33");
        assert_eq!(format_currency(-0.001), "$0.00");
    }

    #[test]
    fn test_format_percent_and_count() {
        assert_eq!(format_percent(1.0 / 3.0), "33.33%");
        assert_eq!(format_percent(0.0), "0.00%");
        assert_eq!(format_count(500_000), "500,000");
        assert_eq!(format_count(12), "12");
    }

    fn sample_result() -> SimulationResult {
        let summary = Summary {
            trial_count: 3,
            mean: 633.333,
            median: 800.0,
            sample_std: 288.675,
            min: 300.0,
            max: 800.0,
            risk_threshold: 500.0,
            risk_probability: 1.0 / 3.0,
        };
        let markers = crate::histogram::markers_for(&summary);
        let bins = (0..10)
            .map(|i| HistogramBin {
                lower: 300.0 + i as f64 * 50.0,
                upper: 350.0 + i as f64 * 50.0,
                count: if i == 0 { 1 } else if i == 9 { 2 } else { 0 },
            })
            .collect();
        SimulationResult {
            seed: Some(1),
            summary,
            histogram: Histogram { bins, markers, degenerate: false, non_finite: 0 },
        }
    }

    #[test]
    fn test_report_mentions_key_figures() {
        let report = render_report(&sample_result(), 50);
        assert!(report.contains("Simulation with 3 Events"));
        assert!(report.contains("Median:     $800.00"));
        assert!(report.contains("33.33% chance that profit will be below $500.00"));
        assert!(report.contains("Risk Value:"));
    }

    #[test]
    fn test_report_notes_overflowed_trials() {
        let mut result = sample_result();
        result.histogram.degenerate = true;
        result.histogram.non_finite = 1_250;
        let report = render_report(&result, 50);
        assert!(report.contains("1,250 trials overflowed"));
        assert!(!report.contains("same profit"));
    }

    #[test]
    fn test_report_coarsens_histogram() {
        let report = render_report(&sample_result(), 5);
        let rows = report.lines().filter(|l| l.contains(" | ")).count();
        assert_eq!(rows, 5);
        assert!(report.contains("(2)"));
    }
}
