use crate::model::{BOTTLENECK_THRESHOLD_MS, FAST_THRESHOLD_MS, ReportData};
use crate::render::Theme;
use anstyle::Style;
use std::fmt::Write as _;

/// Ranked operations shown in the top list.
const TOP_OPERATIONS: usize = 15;

const RULE_WIDTH: usize = 70;

/// Format a millisecond duration with a unit that fits its magnitude.
pub fn format_time(ms: f64) -> String {
    if ms < 1.0 {
        format!("{:.1}μs", ms * 1000.0)
    } else if ms < 1000.0 {
        format!("{:.2}ms", ms)
    } else {
        format!("{:.2}s", ms / 1000.0)
    }
}

/// Qualitative rating of a mean duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rating {
    Excellent,
    Good,
    Moderate,
    Slow,
    VerySlow,
}

impl Rating {
    pub fn from_mean(ms: f64) -> Self {
        if ms < 10.0 {
            Rating::Excellent
        } else if ms < 50.0 {
            Rating::Good
        } else if ms < 100.0 {
            Rating::Moderate
        } else if ms < 500.0 {
            Rating::Slow
        } else {
            Rating::VerySlow
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Rating::Excellent => "Excellent",
            Rating::Good => "Good",
            Rating::Moderate => "Moderate",
            Rating::Slow => "Slow",
            Rating::VerySlow => "Very Slow",
        }
    }

    // The Moderate icon carries a trailing space: its badge reads "⚠️  Moderate".
    fn icon(self) -> &'static str {
        match self {
            Rating::Excellent => "⚡",
            Rating::Good => "✅",
            Rating::Moderate => "⚠️ ",
            Rating::Slow => "⏳",
            Rating::VerySlow => "🐌",
        }
    }

    fn style(self, theme: &Theme) -> Style {
        match self {
            Rating::Excellent => theme.green,
            Rating::Good => theme.blue,
            Rating::Moderate | Rating::Slow => theme.yellow,
            Rating::VerySlow => theme.red,
        }
    }

    fn badge(self, theme: &Theme) -> String {
        let style = self.style(theme);
        format!("{style}{} {}{style:#}", self.icon(), self.label())
    }
}

/// Boxed title printed before the analysis.
pub fn render_banner(theme: &Theme) -> String {
    let h = theme.header;
    format!(
        "{h}\n  ╔══════════════════════════════════════╗\n  ║  🔬 WIC Performance Profiler        ║\n  ╚══════════════════════════════════════╝\n{h:#}\n"
    )
}

pub fn render_footer(theme: &Theme) -> String {
    let green = theme.green;
    format!("\n{green}✅ Analysis complete!{green:#}\n\n")
}

pub fn render_no_data(theme: &Theme) -> String {
    let yellow = theme.yellow;
    format!("{yellow}⚠️  No performance data found{yellow:#}\n")
}

/// Hint shown on stderr before waiting on an interactive stdin.
pub fn render_stdin_hint(theme: &Theme) -> String {
    let yellow = theme.yellow;
    format!("{yellow}Reading from stdin... (paste logs and press Ctrl+D){yellow:#}\n")
}

/// Render the ranked list, overall totals and bottleneck summary.
pub fn render_text_report(data: &ReportData, theme: &Theme) -> anyhow::Result<String> {
    let mut out = String::new();

    write_header(&mut out, theme, "📊 WIC Performance Analysis")?;
    write_top_operations(&mut out, theme, data)?;

    write_header(&mut out, theme, "📈 Overall Statistics")?;
    write_totals(&mut out, data)?;

    write_header(&mut out, theme, "🔍 Performance Bottlenecks")?;
    write_bottlenecks(&mut out, theme, data)?;

    Ok(out)
}

fn write_header(out: &mut String, theme: &Theme, title: &str) -> std::fmt::Result {
    let h = theme.header;
    writeln!(out, "\n{h}{title}{h:#}")?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))
}

fn write_top_operations(out: &mut String, theme: &Theme, data: &ReportData) -> std::fmt::Result {
    let bold = theme.bold;
    writeln!(out, "\n{bold}Top Operations by Average Time:{bold:#}\n")?;

    for (i, stats) in data.ranked.iter().take(TOP_OPERATIONS).enumerate() {
        let rating = Rating::from_mean(stats.mean);

        writeln!(out, "{:2}. {bold}{}{bold:#}", i + 1, stats.name)?;
        writeln!(out, "     Calls:  {}", stats.count)?;
        writeln!(
            out,
            "     Avg:    {:>10}  {}",
            format_time(stats.mean),
            rating.badge(theme)
        )?;
        writeln!(out, "     Total:  {:>10}", format_time(stats.total))?;
        writeln!(
            out,
            "     Range:  {:>10} - {}",
            format_time(stats.min),
            format_time(stats.max)
        )?;
        if let Some(std) = stats.stddev.filter(|s| *s > 0.0) {
            writeln!(out, "     StdDev: {:>10}", format_time(std))?;
        }
        writeln!(out)?;
    }

    Ok(())
}

fn write_totals(out: &mut String, data: &ReportData) -> std::fmt::Result {
    let totals = &data.totals;
    writeln!(out, "\n  Total Operations:     {}", totals.calls)?;
    writeln!(out, "  Unique Operations:    {}", totals.unique_operations)?;
    writeln!(out, "  Total Time:           {}", format_time(totals.total_ms))?;
    if let Some(avg) = totals.average_per_call_ms {
        writeln!(out, "  Average per Call:     {}", format_time(avg))?;
    }
    Ok(())
}

fn write_bottlenecks(out: &mut String, theme: &Theme, data: &ReportData) -> std::fmt::Result {
    let (red, green) = (theme.red, theme.green);

    if data.bottlenecks.is_empty() {
        writeln!(out, "\n  {green}✅ No significant bottlenecks detected!{green:#}")?;
    } else {
        writeln!(
            out,
            "\n  Operations taking > {BOTTLENECK_THRESHOLD_MS}ms on average:\n"
        )?;
        for b in &data.bottlenecks {
            writeln!(out, "  {red}⚠️  {}{red:#}", b.name)?;
            writeln!(
                out,
                "      Avg: {}, Total: {} ({:.1}% of total time)",
                format_time(b.mean),
                format_time(b.total),
                b.percent_of_total
            )?;
            writeln!(out)?;
        }
    }

    if data.fast_operations > 0 {
        writeln!(
            out,
            "\n  {green}⚡ Fast Operations (< {FAST_THRESHOLD_MS}ms):{green:#} {}",
            data.fast_operations
        )?;
    }

    Ok(())
}
