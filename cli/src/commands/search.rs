use std::sync::Arc;

use talent_core::{Effect, SearchForm, SearchMode, SearchSession, TalentApi};

use crate::{
    app_config::AppConfig, args::OutputFormat, commands::finish,
    formatters::CandidateFormatter,
};

/// One structured or AI search, first page only
pub async fn search_cmd(
    api: Arc<dyn TalentApi>,
    config: &AppConfig,
    mode: SearchMode,
    form: SearchForm,
    output: OutputFormat,
) -> Result<(), anyhow::Error> {
    let session = SearchSession::new(api, mode);

    let effect = session.submit(&form).await?;

    let mut formatter = CandidateFormatter::stdout(output);
    match &effect {
        Effect::Updated => {
            formatter.print_results(&session.snapshot(), &session.quota().label())?
        }
        Effect::Notice(_) => formatter.quota(&session.quota().label())?,
        Effect::RedirectToLogin | Effect::TransportFailure(_) => {}
    }

    finish(effect, config)
}
