use crate::core::{CardGrading, FlawSeverity, GradingResult};
use crate::grading::{ConditionLabel, GradeTier};
use colored::*;
use serde::{Deserialize, Serialize};
use std::io::Write;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Terminal,
    Json,
    Markdown,
}

pub trait OutputWriter {
    fn write_result(&mut self, result: &GradingResult) -> anyhow::Result<()>;

    fn write_history(&mut self, records: &[CardGrading]) -> anyhow::Result<()>;

    /// Push buffered output to its destination, surfacing write errors that
    /// a drop would discard.
    fn flush(&mut self) -> anyhow::Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn flush(&mut self) -> anyhow::Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn write_result(&mut self, result: &GradingResult) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(result)?;
        writeln!(self.writer, "{json}")?;
        Ok(())
    }

    fn write_history(&mut self, records: &[CardGrading]) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(records)?;
        writeln!(self.writer, "{json}")?;
        Ok(())
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn flush(&mut self) -> anyhow::Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn write_result(&mut self, result: &GradingResult) -> anyhow::Result<()> {
        self.write_header(result)?;
        self.write_sub_grades(result)?;
        self.write_flaws(result)?;
        self.write_recommendation(result)?;
        Ok(())
    }

    fn write_history(&mut self, records: &[CardGrading]) -> anyhow::Result<()> {
        writeln!(self.writer, "# Grading History")?;
        writeln!(self.writer)?;
        if records.is_empty() {
            writeln!(self.writer, "No gradings recorded.")?;
            return Ok(());
        }
        writeln!(
            self.writer,
            "| Date | Card | Grade | Confidence | Verification |"
        )?;
        writeln!(
            self.writer,
            "|------|------|-------|------------|--------------|"
        )?;
        for record in records {
            writeln!(
                self.writer,
                "| {} | {} | {} | {} | {} |",
                record.date_graded.format("%Y-%m-%d %H:%M"),
                record.card_id,
                record.overall_grade,
                record.confidence,
                record.verification_id
            )?;
        }
        Ok(())
    }
}

impl<W: Write> MarkdownWriter<W> {
    fn write_header(&mut self, result: &GradingResult) -> anyhow::Result<()> {
        let grade = result.overall_grade();
        writeln!(self.writer, "# Pre-Grade Report: {}", result.card_id())?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Generated: {}",
            result.timestamp().format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Metric | Value |")?;
        writeln!(self.writer, "|--------|-------|")?;
        writeln!(
            self.writer,
            "| Overall Grade | {} ({}) |",
            grade,
            ConditionLabel::of(grade)
        )?;
        writeln!(
            self.writer,
            "| Confidence | {} |",
            result.confidence()
        )?;
        writeln!(
            self.writer,
            "| Estimated Value | {} |",
            result.estimated_value()
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_sub_grades(&mut self, result: &GradingResult) -> anyhow::Result<()> {
        writeln!(self.writer, "## Sub-Grades")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Axis | Score |")?;
        writeln!(self.writer, "|------|-------|")?;
        for (axis, score) in result.sub_grades().iter() {
            writeln!(self.writer, "| {} | {} |", axis.label(), score)?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_flaws(&mut self, result: &GradingResult) -> anyhow::Result<()> {
        if result.flaws().is_empty() {
            return Ok(());
        }
        writeln!(self.writer, "## Detected Flaws")?;
        writeln!(self.writer)?;
        for flaw in result.flaws() {
            writeln!(
                self.writer,
                "- **{}** ({}): {}",
                flaw.severity, flaw.id, flaw.description
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_recommendation(&mut self, result: &GradingResult) -> anyhow::Result<()> {
        writeln!(self.writer, "## Recommendation")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "{}", result.recommendation())?;
        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn flush(&mut self) -> anyhow::Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn write_result(&mut self, result: &GradingResult) -> anyhow::Result<()> {
        let grade = result.overall_grade();
        let divider = "═".repeat(44);

        writeln!(self.writer, "{}", divider.blue())?;
        writeln!(
            self.writer,
            "    {} {}",
            "PRE-GRADE".bold(),
            result.card_id().bright_white()
        )?;
        writeln!(self.writer, "{}", divider.blue())?;
        writeln!(
            self.writer,
            "  Overall:    {} {}",
            colorize_grade(grade.value(), &grade.to_string()).bold(),
            ConditionLabel::of(grade)
        )?;
        writeln!(
            self.writer,
            "  Confidence: {}",
            result.confidence()
        )?;
        writeln!(
            self.writer,
            "  Value:      {}",
            result.estimated_value().to_string().green()
        )?;
        writeln!(self.writer)?;

        for (axis, score) in result.sub_grades().iter() {
            writeln!(
                self.writer,
                "  {:<11} {}",
                format!("{}:", axis.label()),
                colorize_grade(score.value(), &score.to_string())
            )?;
        }

        if !result.flaws().is_empty() {
            writeln!(self.writer)?;
            writeln!(self.writer, "  {} ({}):", "Flaws".bold(), result.flaws().len())?;
            for flaw in result.flaws() {
                writeln!(
                    self.writer,
                    "    {} {}",
                    colorize_severity(flaw.severity),
                    flaw.description
                )?;
            }
        }

        writeln!(self.writer)?;
        writeln!(self.writer, "  {}", result.recommendation().italic())?;
        Ok(())
    }

    fn write_history(&mut self, records: &[CardGrading]) -> anyhow::Result<()> {
        if records.is_empty() {
            writeln!(self.writer, "No gradings recorded.")?;
            return Ok(());
        }
        writeln!(
            self.writer,
            "{} ({}):",
            "Grading history".bold(),
            records.len()
        )?;
        for record in records {
            let grade = record.overall_grade;
            writeln!(
                self.writer,
                "  {}  {:<24} {:>5}  {}",
                record.date_graded.format("%Y-%m-%d"),
                record.card_id,
                colorize_grade(grade.value(), &grade.to_string()),
                record.verification_id.to_string().dimmed()
            )?;
        }
        Ok(())
    }
}

fn colorize_grade(grade: f64, text: &str) -> ColoredString {
    match GradeTier::from_value(grade) {
        GradeTier::Excellent => text.bright_green(),
        GradeTier::VeryGood => text.green(),
        GradeTier::Good => text.yellow(),
        GradeTier::Worn => text.red(),
    }
}

fn colorize_severity(severity: FlawSeverity) -> ColoredString {
    let label = format!("[{}]", severity);
    match severity {
        FlawSeverity::Minor => label.yellow(),
        FlawSeverity::Moderate => label.bright_red(),
        FlawSeverity::Severe => label.red().bold(),
    }
}

pub fn create_writer(format: OutputFormat, writer: Box<dyn Write>) -> Box<dyn OutputWriter> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(writer)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer)),
    }
}
