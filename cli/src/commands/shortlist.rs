use std::sync::Arc;

use talent_core::{Effect, ShortlistSession, TalentApi};

use crate::{
    app_config::AppConfig,
    args::{ShortlistArgs, ShortlistCommand},
    commands::finish,
    formatters::CandidateFormatter,
};

pub async fn shortlist_cmd(
    api: Arc<dyn TalentApi>,
    config: &AppConfig,
    args: ShortlistArgs,
) -> Result<(), anyhow::Error> {
    let shortlist = ShortlistSession::new(api);

    let effect = match args.command.unwrap_or(ShortlistCommand::List) {
        ShortlistCommand::List => shortlist.refresh().await?,
        ShortlistCommand::Remove { id } => {
            let effect = shortlist.remove(&id).await?;
            if effect == Effect::Updated {
                println!("Removed {} from the shortlist", id);
            }
            effect
        }
    };

    if let Some(filter) = &args.filter {
        shortlist.set_filter(filter);
    }

    if effect == Effect::Updated {
        CandidateFormatter::stdout(args.output)
            .print_shortlist(&shortlist.visible(), &shortlist.filter())?;
    }

    finish(effect, config)
}
