//! Output formatters for interview reports

use crate::config::OutputFormat;
use crate::error::{AnalyzerError, Result};
use crate::output::report::*;
use crate::processing::metrics::{AnalysisResult, Grade, Metric};
use askama::Template;
use colored::{Color, Colorize};
use std::path::Path;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Trait for formatting interview reports
pub trait OutputFormatter {
    fn format_report(&self, report: &InterviewReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Plain-text report, the layout of the downloadable interview report
pub struct TextFormatter;

/// Colored terminal output
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

pub struct HtmlFormatter {
    include_styles: bool,
}

/// Report generator that coordinates the formatters
pub struct ReportGenerator {
    text_formatter: TextFormatter,
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

fn percent(score: f32) -> String {
    format!("{:.1}%", score * 100.0)
}

impl OutputFormatter for TextFormatter {
    fn format_report(&self, report: &InterviewReport) -> Result<String> {
        let mut lines: Vec<String> = Vec::new();
        lines.push("MOCK INTERVIEW ANALYSIS REPORT".to_string());
        lines.push("=".repeat(50));
        lines.push(format!(
            "Generated on: {}",
            report.metadata.generated_at.format(TIMESTAMP_FORMAT)
        ));
        lines.push(String::new());

        for entry in &report.entries {
            lines.push(format!("QUESTION {}:", entry.number));
            lines.push(format!("Q: {}", entry.question));
            lines.push(format!("A: {}", entry.response));
            lines.push(String::new());

            lines.push("ANALYSIS:".to_string());
            let overall = &entry.analysis.overall_score;
            lines.push(format!(
                "Overall Score: {} (Grade: {})",
                percent(overall.score),
                overall.grade
            ));
            for metric in Metric::WEIGHTED {
                let result = entry.analysis.metric(metric);
                lines.push(format!(
                    "{}: {} - {}",
                    metric.title(),
                    percent(result.score()),
                    result.details()
                ));
            }

            lines.push(String::new());
            lines.push("-".repeat(30));
            lines.push(String::new());
        }

        Ok(lines.join("\n"))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Text
    }
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn grade_color(grade: Grade) -> Color {
        match grade {
            Grade::A => Color::Green,
            Grade::B => Color::BrightGreen,
            Grade::C => Color::Yellow,
            Grade::D => Color::BrightYellow,
            Grade::F => Color::Red,
        }
    }

    fn format_grade_badge(&self, grade: Grade) -> String {
        let badge = format!("[GRADE {}]", grade);
        if self.use_colors {
            badge.color(Self::grade_color(grade)).bold().to_string()
        } else {
            badge
        }
    }

    fn score_color(score: f32) -> Color {
        if score > 0.8 {
            Color::Green
        } else if score >= 0.6 {
            Color::Yellow
        } else {
            Color::Red
        }
    }

    fn format_metric_line(&self, metric: Metric, analysis: &AnalysisResult) -> String {
        let result = analysis.metric(metric);
        format!(
            "  {:<15} {:>7}  {}\n",
            metric.title(),
            self.colorize(&percent(result.score()), Self::score_color(result.score())),
            result.details()
        )
    }

    fn format_auxiliaries(&self, analysis: &AnalysisResult) -> String {
        let mut output = String::new();
        let mut push = |label: &str, value: String| {
            output.push_str(&format!("    {:<22} {}\n", label, value));
        };

        let clarity = &analysis.clarity;
        if let (Some(fillers), Some(total)) = (clarity.filler_count, clarity.total_words) {
            push("filler words", format!("{} of {}", fillers, total));
        }
        if let Some(avg) = clarity.avg_sentence_length {
            push("avg sentence length", format!("{:.1} words", avg));
        }
        if let Some(breakdown) = analysis.sentiment.breakdown {
            push(
                "sentiment breakdown",
                format!(
                    "compound {:.3}, pos {:.3}, neg {:.3}, neu {:.3}",
                    breakdown.compound, breakdown.positive, breakdown.negative, breakdown.neutral
                ),
            );
        }
        if !analysis.keyword_match.matched_keywords.is_empty() {
            push("matched keywords", analysis.keyword_match.matched_keywords.join(", "));
        }
        if let Some(ratio) = analysis.fluency.completeness_ratio {
            push("complete sentences", percent(ratio));
        }
        if let (Some(pause), Some(silence)) = (
            analysis.confidence.pause_penalty,
            analysis.confidence.silence_penalty,
        ) {
            push("pause / silence penalty", format!("{:.2} / {:.2}", pause, silence));
        }
        push(
            "speech quality",
            format!(
                "{} - {}",
                percent(analysis.speech_quality.score),
                analysis.speech_quality.details
            ),
        );

        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &InterviewReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("🎤 INTERVIEW RESPONSE ANALYSIS", 1));
        output.push_str(&format!(
            "Generated: {} | Interview: {}\n",
            report.metadata.generated_at.format(TIMESTAMP_FORMAT),
            report.metadata.interview_type
        ));

        for entry in &report.entries {
            output.push_str(&self.format_header(&format!("Question {}", entry.number), 2));
            output.push_str(&format!("Q: {}\n", self.colorize(&entry.question, Color::Cyan)));
            if self.detailed {
                output.push_str(&format!("A: {}\n", entry.response));
            }

            let overall = &entry.analysis.overall_score;
            output.push_str(&format!(
                "\nOverall Score: {} {}\n",
                percent(overall.score),
                self.format_grade_badge(overall.grade)
            ));

            for metric in Metric::WEIGHTED {
                output.push_str(&self.format_metric_line(metric, &entry.analysis));
            }

            if self.detailed {
                output.push_str(&self.format_header("Details", 3));
                output.push_str(&self.format_auxiliaries(&entry.analysis));
            }

            output.push_str(&self.format_header("Feedback", 3));
            for line in entry.feedback.lines() {
                output.push_str(&format!("{}\n", line));
            }
        }

        if report.entries.len() > 1 {
            let summary = &report.summary;
            output.push_str(&self.format_header("Session Summary", 2));
            output.push_str(&format!("Questions answered: {}\n", summary.questions_answered));
            if let Some(grade) = summary.grade {
                output.push_str(&format!(
                    "Average score: {} {}\n",
                    percent(summary.average_score),
                    self.format_grade_badge(grade)
                ));
            }
            if let Some(strongest) = summary.strongest_metric {
                output.push_str(&format!(
                    "Strongest area: {} ({})\n",
                    self.colorize(strongest.metric.title(), Color::Green),
                    percent(strongest.score)
                ));
            }
            if let Some(weakest) = summary.weakest_metric {
                output.push_str(&format!(
                    "Focus area: {} ({})\n",
                    self.colorize(weakest.metric.title(), Color::Yellow),
                    percent(weakest.score)
                ));
            }
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &InterviewReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn escape_cell(text: &str) -> String {
        text.replace('|', "\\|").replace('\n', " ")
    }

    fn grade_badge(grade: Grade) -> &'static str {
        match grade {
            Grade::A => "🟢",
            Grade::B => "🔵",
            Grade::C => "🟡",
            Grade::D => "🟠",
            Grade::F => "🔴",
        }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &InterviewReport) -> Result<String> {
        let mut output = String::new();

        output.push_str("# 🎤 Mock Interview Analysis Report\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Interview type:** {} | **Analyzer:** v{}\n\n",
                report.metadata.generated_at.format(TIMESTAMP_FORMAT),
                report.metadata.interview_type,
                report.metadata.analyzer_version
            ));
        }

        let summary = &report.summary;
        output.push_str("## Summary\n\n");
        output.push_str(&format!("**Questions answered:** {}\n\n", summary.questions_answered));
        if let Some(grade) = summary.grade {
            output.push_str(&format!(
                "**Average score:** {} {} Grade {}\n\n",
                percent(summary.average_score),
                Self::grade_badge(grade),
                grade
            ));
        }
        if let (Some(strongest), Some(weakest)) = (summary.strongest_metric, summary.weakest_metric) {
            output.push_str(&format!(
                "**Strongest area:** {} ({}) | **Focus area:** {} ({})\n\n",
                strongest.metric.title(),
                percent(strongest.score),
                weakest.metric.title(),
                percent(weakest.score)
            ));
        }

        for entry in &report.entries {
            output.push_str(&format!("## Question {}\n\n", entry.number));
            output.push_str(&format!("> {}\n\n", entry.question));
            output.push_str(&format!("**Answer:** {}\n\n", entry.response));

            let overall = &entry.analysis.overall_score;
            output.push_str(&format!(
                "**Overall:** {} {} Grade {}\n\n",
                percent(overall.score),
                Self::grade_badge(overall.grade),
                overall.grade
            ));

            output.push_str("| Metric | Score | Details |\n");
            output.push_str("|--------|-------|---------|\n");
            for metric in Metric::ALL {
                let result = entry.analysis.metric(metric);
                output.push_str(&format!(
                    "| {} | {} | {} |\n",
                    metric.title(),
                    percent(result.score()),
                    Self::escape_cell(result.details())
                ));
            }
            output.push('\n');

            output.push_str("### Feedback\n\n");
            for line in entry.feedback.lines() {
                let line = line.trim_start_matches('•').trim();
                output.push_str(&format!("- {}\n", line));
            }
            output.push('\n');
        }

        output.push_str("---\n*Speech quality is reported for reference and is not part of the overall score.*\n");

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

/// Askama template for HTML output
#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Mock Interview Analysis Report</title>
    {% if include_styles %}
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            line-height: 1.6;
            color: #333;
            max-width: 900px;
            margin: 0 auto;
            padding: 20px;
            background: #f8f9fa;
        }
        .container {
            background: white;
            padding: 30px;
            border-radius: 8px;
            box-shadow: 0 2px 10px rgba(0,0,0,0.1);
        }
        .header {
            text-align: center;
            margin-bottom: 30px;
            border-bottom: 3px solid #007acc;
            padding-bottom: 20px;
        }
        .grade-badge {
            display: inline-block;
            padding: 4px 14px;
            border-radius: 20px;
            font-weight: bold;
            color: white;
            margin-left: 10px;
        }
        .grade-a { background: #28a745; }
        .grade-b { background: #17a2b8; }
        .grade-c { background: #ffc107; color: #000; }
        .grade-d { background: #fd7e14; }
        .grade-f { background: #dc3545; }
        .section { margin: 25px 0; }
        .section h2 {
            color: #007acc;
            border-bottom: 2px solid #e9ecef;
            padding-bottom: 10px;
        }
        blockquote {
            margin: 10px 0;
            padding: 10px 15px;
            background: #f8f9fa;
            border-left: 4px solid #007acc;
        }
        table { width: 100%; border-collapse: collapse; margin: 15px 0; }
        th, td { text-align: left; padding: 8px; border-bottom: 1px solid #e9ecef; }
        .feedback {
            background: #f8f9fa;
            padding: 15px;
            border-radius: 6px;
            border-left: 4px solid #28a745;
        }
        .metadata {
            background: #e9ecef;
            padding: 15px;
            border-radius: 6px;
            margin-top: 30px;
            font-size: 0.9em;
            color: #6c757d;
        }
    </style>
    {% endif %}
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>🎤 Mock Interview Analysis Report</h1>
            <p>Generated: {{ generated_at }} | Interview: {{ interview_type }}</p>
        </div>

        <div class="section">
            <h2>Summary</h2>
            <p><strong>Questions answered:</strong> {{ questions_answered }}</p>
            {% if has_grade %}
            <h3>Average Score: {{ average_score }} <span class="grade-badge grade-{{ grade_class }}">{{ grade }}</span></h3>
            {% endif %}
            {% if has_extremes %}
            <p><strong>Strongest area:</strong> {{ strongest }} | <strong>Focus area:</strong> {{ weakest }}</p>
            {% endif %}
        </div>

        {% for entry in entries %}
        <div class="section">
            <h2>Question {{ entry.number }}</h2>
            <blockquote>{{ entry.question }}</blockquote>
            <p><strong>Answer:</strong> {{ entry.response }}</p>
            <h3>Overall: {{ entry.overall }} <span class="grade-badge grade-{{ entry.grade_class }}">{{ entry.grade }}</span></h3>
            <table>
                <tr><th>Metric</th><th>Score</th><th>Details</th></tr>
                {% for row in entry.metrics %}
                <tr><td>{{ row.title }}</td><td>{{ row.score }}</td><td>{{ row.details }}</td></tr>
                {% endfor %}
            </table>
            <div class="feedback">
                <ul>
                {% for line in entry.feedback %}
                    <li>{{ line }}</li>
                {% endfor %}
                </ul>
            </div>
        </div>
        {% endfor %}

        <div class="metadata">
            <p><strong>ℹ️ Generated by Interview Analyzer v{{ version }}</strong></p>
            <p>Speech quality is reported for reference and is not part of the overall score.</p>
        </div>
    </div>
</body>
</html>"#, ext = "html")]
struct HtmlTemplate {
    include_styles: bool,
    generated_at: String,
    interview_type: String,
    questions_answered: usize,
    has_grade: bool,
    average_score: String,
    grade: String,
    grade_class: String,
    has_extremes: bool,
    strongest: String,
    weakest: String,
    entries: Vec<HtmlEntry>,
    version: String,
}

struct HtmlEntry {
    number: usize,
    question: String,
    response: String,
    overall: String,
    grade: String,
    grade_class: String,
    metrics: Vec<HtmlMetricRow>,
    feedback: Vec<String>,
}

struct HtmlMetricRow {
    title: &'static str,
    score: String,
    details: String,
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }

    fn create_template_data(&self, report: &InterviewReport) -> HtmlTemplate {
        let summary = &report.summary;
        let describe = |m: &MetricAverage| format!("{} ({})", m.metric.title(), percent(m.score));

        HtmlTemplate {
            include_styles: self.include_styles,
            generated_at: report.metadata.generated_at.format(TIMESTAMP_FORMAT).to_string(),
            interview_type: report.metadata.interview_type.to_string(),
            questions_answered: summary.questions_answered,
            has_grade: summary.grade.is_some(),
            average_score: percent(summary.average_score),
            grade: summary.grade.map(|g| g.to_string()).unwrap_or_default(),
            grade_class: summary
                .grade
                .map(|g| g.to_string().to_lowercase())
                .unwrap_or_default(),
            has_extremes: summary.strongest_metric.is_some() && summary.weakest_metric.is_some(),
            strongest: summary.strongest_metric.as_ref().map(describe).unwrap_or_default(),
            weakest: summary.weakest_metric.as_ref().map(describe).unwrap_or_default(),
            entries: report.entries.iter().map(Self::create_entry).collect(),
            version: report.metadata.analyzer_version.clone(),
        }
    }

    fn create_entry(entry: &ReportEntry) -> HtmlEntry {
        let overall = &entry.analysis.overall_score;
        HtmlEntry {
            number: entry.number,
            question: entry.question.clone(),
            response: entry.response.clone(),
            overall: percent(overall.score),
            grade: overall.grade.to_string(),
            grade_class: overall.grade.to_string().to_lowercase(),
            metrics: Metric::ALL
                .iter()
                .map(|&metric| {
                    let result = entry.analysis.metric(metric);
                    HtmlMetricRow {
                        title: metric.title(),
                        score: percent(result.score()),
                        details: result.details().to_string(),
                    }
                })
                .collect(),
            feedback: entry
                .feedback
                .lines()
                .map(|line| line.trim_start_matches('•').trim().to_string())
                .collect(),
        }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &InterviewReport) -> Result<String> {
        self.create_template_data(report)
            .render()
            .map_err(|e| AnalyzerError::OutputFormatting(e.to_string()))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false, true, true, true)
    }

    pub fn with_options(
        use_colors: bool,
        detailed: bool,
        pretty_json: bool,
        include_metadata: bool,
        include_html_styles: bool,
    ) -> Self {
        Self {
            text_formatter: TextFormatter,
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
            html_formatter: HtmlFormatter::new(include_html_styles),
        }
    }

    pub fn generate_report(&self, report: &InterviewReport, format: &OutputFormat) -> Result<String> {
        let formatter: &dyn OutputFormatter = match format {
            OutputFormat::Console => &self.console_formatter,
            OutputFormat::Text => &self.text_formatter,
            OutputFormat::Json => &self.json_formatter,
            OutputFormat::Markdown => &self.markdown_formatter,
            OutputFormat::Html => &self.html_formatter,
        };
        debug_assert_eq!(formatter.supports_format(), *format);
        formatter.format_report(report)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: &OutputFormat, stem: &str, timestamp: bool) -> String {
    let base_name = Path::new(stem)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "interview".to_string());

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Local::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console | OutputFormat::Text => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
        OutputFormat::Html => "html",
    };

    format!("{}_analysis{}.{}", base_name, timestamp_suffix, extension)
}
