use std::io::Write;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;

use talent_core::{
    ActivityLog, Effect, QuotaState, SearchForm, SearchMode, SearchSession, ShortlistSession,
    TalentApi,
};
use termcolor::StandardStream;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::{
    app_config::AppConfig,
    args::OutputFormat,
    commands::session_expired,
    formatters::CandidateFormatter,
};

const HELP: &str = "\
Commands:
  search <query>        structured search with the current filters
  ai <prompt>           natural-language search
  page <n> | next | prev
  retry                 repeat the last request
  save <id>             save or unsave a candidate from the results
  results               show the current results
  quota                 show remaining free searches
  set <key> <value>     set a filter: location, education, experience
  unset <key>           clear a filter
  global on|off         search beyond your own network
  shortlist [name]      show shortlisted candidates, optionally filtered
  remove <id>           remove a candidate from the shortlist
  help | quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Location,
    Education,
    Experience,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Search(String),
    Ai(String),
    Page(u32),
    Next,
    Prev,
    Retry,
    Save(String),
    Results,
    Quota,
    Set(FormField, String),
    Unset(FormField),
    Global(bool),
    Shortlist(Option<String>),
    Remove(String),
    Help,
    Quit,
}

impl FromStr for FormField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "location" => Ok(FormField::Location),
            "education" => Ok(FormField::Education),
            "experience" => Ok(FormField::Experience),
            other => Err(format!(
                "Unknown filter '{}', expected location, education or experience",
                other
            )),
        }
    }
}

impl FromStr for ShellCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        let required = |what: &str| {
            if rest.is_empty() {
                Err(format!("Usage: {} {}", word, what))
            } else {
                Ok(rest.to_string())
            }
        };

        match word {
            "search" => Ok(ShellCommand::Search(required("<query>")?)),
            "ai" => Ok(ShellCommand::Ai(required("<prompt>")?)),
            "page" => required("<n>")?
                .parse()
                .map(ShellCommand::Page)
                .map_err(|_| format!("Not a page number: {}", rest)),
            "next" => Ok(ShellCommand::Next),
            "prev" => Ok(ShellCommand::Prev),
            "retry" => Ok(ShellCommand::Retry),
            "save" => Ok(ShellCommand::Save(required("<id>")?)),
            "results" => Ok(ShellCommand::Results),
            "quota" => Ok(ShellCommand::Quota),
            "set" => {
                let args = required("<key> <value>")?;
                let (key, value) = args
                    .split_once(char::is_whitespace)
                    .ok_or_else(|| "Usage: set <key> <value>".to_string())?;
                Ok(ShellCommand::Set(key.parse()?, value.trim().to_string()))
            }
            "unset" => Ok(ShellCommand::Unset(required("<key>")?.parse()?)),
            "global" => match rest {
                "on" => Ok(ShellCommand::Global(true)),
                "off" => Ok(ShellCommand::Global(false)),
                _ => Err("Usage: global on|off".to_string()),
            },
            "shortlist" => Ok(ShellCommand::Shortlist(
                (!rest.is_empty()).then(|| rest.to_string()),
            )),
            "remove" => Ok(ShellCommand::Remove(required("<id>")?)),
            "help" | "?" => Ok(ShellCommand::Help),
            "quit" | "exit" => Ok(ShellCommand::Quit),
            other => Err(format!("Unknown command '{}'. Type `help`.", other)),
        }
    }
}

/// Apply a `set`/`unset` to the form
pub fn apply_field(
    form: &mut SearchForm,
    field: FormField,
    value: Option<String>,
) -> Result<(), String> {
    match field {
        FormField::Location => form.location = value,
        FormField::Education => form.education = value,
        FormField::Experience => {
            form.experience = value
                .map(|v| {
                    v.parse::<u32>()
                        .map_err(|_| format!("Experience must be a number of years, got {}", v))
                })
                .transpose()?
        }
    }
    Ok(())
}

enum Flow {
    Continue,
    Quit,
}

/// Interactive session. Structured and AI search keep separate result
/// sets but share the quota and the activity log.
struct Shell<'a> {
    config: &'a AppConfig,
    structured: SearchSession<dyn TalentApi>,
    ai: SearchSession<dyn TalentApi>,
    shortlist: ShortlistSession<dyn TalentApi>,
    shortlist_loaded: bool,
    form: SearchForm,
    active: SearchMode,
    formatter: CandidateFormatter<StandardStream>,
}

impl<'a> Shell<'a> {
    fn new(api: Arc<dyn TalentApi>, config: &'a AppConfig, output: OutputFormat) -> Self {
        let quota = QuotaState::new();
        let activity = ActivityLog::new();

        Self {
            config,
            structured: SearchSession::with_shared(
                api.clone(),
                SearchMode::Structured,
                quota.clone(),
                activity.clone(),
            ),
            ai: SearchSession::with_shared(api.clone(), SearchMode::Ai, quota, activity.clone()),
            shortlist: ShortlistSession::with_activity(api, activity),
            shortlist_loaded: false,
            form: SearchForm {
                global: config.global_search,
                ..Default::default()
            },
            active: SearchMode::Structured,
            formatter: CandidateFormatter::stdout(output),
        }
    }

    fn session(&self) -> &SearchSession<dyn TalentApi> {
        match self.active {
            SearchMode::Structured => &self.structured,
            SearchMode::Ai => &self.ai,
        }
    }

    async fn execute(&mut self, command: ShellCommand) -> anyhow::Result<Flow> {
        debug!(?command, "Shell command");

        let result = match command {
            ShellCommand::Search(query) => self.submit(SearchMode::Structured, query).await,
            ShellCommand::Ai(prompt) => self.submit(SearchMode::Ai, prompt).await,
            ShellCommand::Page(page) => self.session().goto_page(page).await,
            ShellCommand::Next => self.session().next_page().await,
            ShellCommand::Prev => self.session().prev_page().await,
            ShellCommand::Retry => self.session().retry().await,
            ShellCommand::Save(id) => self.session().toggle_save(&id).await,
            ShellCommand::Results => Ok(Effect::Updated),
            ShellCommand::Quota => {
                let label = self.session().quota().label();
                self.formatter.quota(&label)?;
                return Ok(Flow::Continue);
            }
            ShellCommand::Set(field, value) => return self.edit_form(field, Some(value)),
            ShellCommand::Unset(field) => return self.edit_form(field, None),
            ShellCommand::Global(global) => {
                self.form.global = global;
                println!("Global search {}", if global { "on" } else { "off" });
                return Ok(Flow::Continue);
            }
            ShellCommand::Shortlist(filter) => return self.show_shortlist(filter).await,
            ShellCommand::Remove(id) => {
                let effect = self.shortlist.remove(&id).await;
                return match effect {
                    Ok(Effect::Updated) => {
                        self.shortlist_loaded = true;
                        self.print_shortlist()?;
                        Ok(Flow::Continue)
                    }
                    other => self.report(other),
                };
            }
            ShellCommand::Help => {
                println!("{}", HELP);
                return Ok(Flow::Continue);
            }
            ShellCommand::Quit => return Ok(Flow::Quit),
        };

        match result {
            Ok(Effect::Updated) => {
                let session = self.session();
                let snapshot = session.snapshot();
                let label = session.quota().label();
                self.formatter.print_results(&snapshot, &label)?;
                Ok(Flow::Continue)
            }
            other => self.report(other),
        }
    }

    async fn submit(&mut self, mode: SearchMode, query: String) -> talent_core::Result<Effect> {
        self.active = mode;
        self.form.query = query;
        self.session().submit(&self.form).await
    }

    fn edit_form(&mut self, field: FormField, value: Option<String>) -> anyhow::Result<Flow> {
        match apply_field(&mut self.form, field, value) {
            Ok(()) => println!("Filters: {}", self.form_summary().join(", ")),
            Err(message) => self.formatter.notice(&message)?,
        }
        Ok(Flow::Continue)
    }

    fn form_summary(&self) -> Vec<String> {
        let mut summary = vec![];
        if let Some(location) = &self.form.location {
            summary.push(format!("location={}", location));
        }
        if let Some(education) = &self.form.education {
            summary.push(format!("education={}", education));
        }
        if let Some(experience) = self.form.experience {
            summary.push(format!("experience={}", experience));
        }
        summary.push(format!("global={}", self.form.global));
        summary
    }

    async fn show_shortlist(&mut self, filter: Option<String>) -> anyhow::Result<Flow> {
        if filter.is_none() || !self.shortlist_loaded {
            match self.shortlist.refresh().await {
                Ok(Effect::Updated) => self.shortlist_loaded = true,
                other => return self.report(other),
            }
        }

        match filter {
            Some(text) => {
                self.shortlist.type_filter(&text, Instant::now());
                if let Some(deadline) = self.shortlist.filter_deadline() {
                    tokio::time::sleep_until(deadline.into()).await;
                }
                self.shortlist.settle(Instant::now());
            }
            None => self.shortlist.set_filter(""),
        }

        self.print_shortlist()?;
        Ok(Flow::Continue)
    }

    fn print_shortlist(&mut self) -> anyhow::Result<()> {
        let visible = self.shortlist.visible();
        let filter = self.shortlist.filter();
        self.formatter.print_shortlist(&visible, &filter)?;
        Ok(())
    }

    /// Everything but a successful update: skipped submissions and
    /// non-OK effects are shown and the shell keeps running, except for
    /// an expired session.
    fn report(&mut self, result: talent_core::Result<Effect>) -> anyhow::Result<Flow> {
        match result {
            Ok(Effect::Updated) => {}
            Ok(Effect::Notice(message)) => {
                self.formatter.notice(&message)?;
                let label = self.session().quota().label();
                self.formatter.quota(&label)?;
            }
            Ok(Effect::RedirectToLogin) => return Err(session_expired(self.config)),
            Ok(Effect::TransportFailure(reason)) => {
                self.formatter.notice(&format!(
                    "Request failed: {}. Type `retry` to try again.",
                    reason
                ))?;
            }
            Err(skipped) => self.formatter.notice(&skipped.to_string())?,
        }
        Ok(Flow::Continue)
    }
}

pub async fn shell_cmd(
    api: Arc<dyn TalentApi>,
    config: &AppConfig,
    output: OutputFormat,
) -> Result<(), anyhow::Error> {
    let mut shell = Shell::new(api, config, output);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        eprint!("talent> ");
        std::io::stderr().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<ShellCommand>() {
            Ok(command) => command,
            Err(message) => {
                eprintln!("{}", message);
                continue;
            }
        };

        if let Flow::Quit = shell.execute(command).await? {
            break;
        }
    }

    Ok(())
}
