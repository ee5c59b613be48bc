use crate::app_config::AppConfig;

pub fn config_cmd(config: &AppConfig) -> Result<(), anyhow::Error> {
    println!("{}", serde_json::to_string_pretty(config)?);

    Ok(())
}
