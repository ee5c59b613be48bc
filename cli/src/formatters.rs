use std::io::{self, IsTerminal, Write};

use serde_json::json;
use talent_core::{Candidate, ResultSet, SavedCandidate};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::args::OutputFormat;

/// Prints search results and shortlists in the chosen output format
pub struct CandidateFormatter<W: WriteColor> {
    output: OutputFormat,
    out: W,
}

impl CandidateFormatter<StandardStream> {
    pub fn stdout(output: OutputFormat) -> Self {
        let choice = if io::stdout().is_terminal() {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        Self::new(output, StandardStream::stdout(choice))
    }
}

impl<W: WriteColor> CandidateFormatter<W> {
    pub fn new(output: OutputFormat, out: W) -> Self {
        Self { output, out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn print_results(&mut self, results: &ResultSet, quota_label: &str) -> io::Result<()> {
        match self.output {
            OutputFormat::Json => {
                let value = json!({
                    "results": results.results,
                    "pagination": results.pagination,
                    "quota": quota_label,
                });
                self.print_json(&value)
            }
            OutputFormat::Plain => {
                for candidate in &results.results {
                    self.print_plain(candidate)?;
                }
                Ok(())
            }
            OutputFormat::Pretty => {
                if results.results.is_empty() {
                    writeln!(self.out, "No candidates found.")?;
                }
                for (i, candidate) in results.results.iter().enumerate() {
                    self.print_card(i + 1, candidate, None)?;
                }
                if let Some(pagination) = &results.pagination {
                    let mut line = format!("Page {}", pagination.page);
                    if let Some(total_pages) = pagination.total_pages {
                        line.push_str(&format!(" of {}", total_pages));
                    }
                    if let Some(total) = pagination.total {
                        line.push_str(&format!(" ({} candidates)", total));
                    }
                    self.dimmed(&line)?;
                }
                self.quota(quota_label)
            }
        }
    }

    /// Quota label on its own line; JSON output carries it in the payload
    pub fn quota(&mut self, quota_label: &str) -> io::Result<()> {
        if self.output == OutputFormat::Json {
            return Ok(());
        }
        self.out
            .set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
        writeln!(self.out, "{}", quota_label)?;
        self.out.reset()
    }

    pub fn print_shortlist(&mut self, entries: &[SavedCandidate], filter: &str) -> io::Result<()> {
        match self.output {
            OutputFormat::Json => self.print_json(&json!(entries)),
            OutputFormat::Plain => {
                for entry in entries {
                    self.print_plain(&entry.candidate)?;
                }
                Ok(())
            }
            OutputFormat::Pretty => {
                if entries.is_empty() {
                    if filter.is_empty() {
                        writeln!(self.out, "No shortlisted candidates.")?;
                    } else {
                        writeln!(self.out, "No shortlisted candidates match \"{}\".", filter)?;
                    }
                }
                for (i, entry) in entries.iter().enumerate() {
                    self.print_card(i + 1, &entry.candidate, entry.saved_at.as_deref())?;
                }
                Ok(())
            }
        }
    }

    /// One-line notice, highlighted in pretty output
    pub fn notice(&mut self, message: &str) -> io::Result<()> {
        if self.output == OutputFormat::Pretty {
            self.out
                .set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
            writeln!(self.out, "{}", message)?;
            self.out.reset()
        } else {
            writeln!(self.out, "{}", message)
        }
    }

    fn print_json(&mut self, value: &serde_json::Value) -> io::Result<()> {
        let text = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        writeln!(self.out, "{}", text)
    }

    fn print_plain(&mut self, candidate: &Candidate) -> io::Result<()> {
        writeln!(
            self.out,
            "{}\t{}\t{}\t{}\t{}\t{}",
            candidate.id,
            candidate.name,
            candidate.title,
            candidate.location,
            candidate.r#match,
            if candidate.is_saved { "saved" } else { "-" }
        )
    }

    fn print_card(
        &mut self,
        index: usize,
        candidate: &Candidate,
        saved_at: Option<&str>,
    ) -> io::Result<()> {
        self.out
            .set_color(ColorSpec::new().set_fg(Some(Color::Blue)))?;
        write!(self.out, "[{}] ", index)?;
        self.out.set_color(ColorSpec::new().set_bold(true))?;
        write!(self.out, "{}", candidate.name)?;
        self.out.reset()?;

        if candidate.r#match > 0 {
            self.out
                .set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
            write!(self.out, "  {}% match", candidate.r#match)?;
            self.out.reset()?;
        }
        if candidate.is_saved {
            self.out
                .set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
            write!(self.out, "  * saved")?;
            self.out.reset()?;
        }
        writeln!(self.out)?;

        let details: Vec<&str> = [
            candidate.title.as_str(),
            candidate.location.as_str(),
            candidate.experience.as_str(),
        ]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect();
        if !details.is_empty() {
            writeln!(self.out, "    {}", details.join(" | "))?;
        }
        if !candidate.education.is_empty() {
            writeln!(self.out, "    {}", candidate.education)?;
        }
        if !candidate.skills.is_empty() {
            writeln!(self.out, "    skills: {}", candidate.skills.join(", "))?;
        }

        let mut footer = format!("id: {}", candidate.id);
        if !candidate.last_active.is_empty() {
            footer.push_str(&format!(" | active {}", candidate.last_active));
        }
        if let Some(saved_at) = saved_at {
            footer.push_str(&format!(" | saved {}", saved_at));
        }
        self.dimmed(&format!("    {}", footer))
    }

    fn dimmed(&mut self, line: &str) -> io::Result<()> {
        self.out.set_color(ColorSpec::new().set_dimmed(true))?;
        writeln!(self.out, "{}", line)?;
        self.out.reset()
    }
}
