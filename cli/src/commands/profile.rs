use crate::{
    args::ProfileCommand,
    profile::{self, Profile},
};

pub fn profile_cmd(subcommand: Option<ProfileCommand>) -> Result<(), anyhow::Error> {
    match subcommand.unwrap_or(ProfileCommand::Current) {
        ProfileCommand::Use { name } => {
            profile::set_current_profile_name(&name)?;

            let config_path = profile::get_profile_config_path(&name);
            if !config_path.exists() {
                Profile::default().save(&config_path)?;
                println!("Created new profile: {}", name);
            }

            println!("Switched to profile: {}", name);
        }
        ProfileCommand::List => {
            let profiles = profile::list_profiles()?;
            let current = profile::get_current_profile_name()
                .unwrap_or_else(|_| profile::DEFAULT_PROFILE.to_string());

            println!("Available profiles:");
            for profile_name in profiles {
                let marker = if profile_name == current { "*" } else { " " };
                let api_url = Profile::from_path(&profile::get_profile_config_path(&profile_name))?
                    .and_then(|p| p.api_url)
                    .unwrap_or_else(|| crate::app_config::DEFAULT_API_URL.to_string());
                println!("{} {} ({})", marker, profile_name, api_url);
            }
        }
        ProfileCommand::Current => {
            let current = profile::get_current_profile_name()?;
            let config_path = profile::get_profile_config_path(&current);
            println!("Current profile: {} ({})", current, config_path.display());
        }
    }

    Ok(())
}
