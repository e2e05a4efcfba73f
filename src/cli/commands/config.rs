use anyhow::Result;
use clap::{Args, Subcommand, ValueEnum};

use crate::cli::Output;
use crate::config::ConfigLoader;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Display current merged configuration
    Show {
        /// Output format
        #[arg(short, long, value_enum, default_value = "toml")]
        format: ConfigFormat,
    },
    /// Check that the merged configuration is usable
    Validate,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ConfigFormat {
    Toml,
    Json,
    #[value(alias = "yml")]
    Yaml,
}

pub async fn execute(args: ConfigArgs, custom_config: Option<&str>, output: &Output) -> Result<()> {
    let loader = ConfigLoader::load_with(custom_config, None::<&()>)?;

    match args.command {
        ConfigCommand::Show { format } => {
            let rendered = render(&loader.get_full_config()?, format)?;
            println!("{}", rendered.trim_end());
        }
        ConfigCommand::Validate => {
            let config = loader.extract()?;
            let run = config.run_config()?;
            output.success("Configuration is valid");
            output.key_value("Threshold:", &run.strength_threshold.to_string(), false);
            output.key_value("Workers:", &run.worker_count.to_string(), false);
            output.key_value("Progress every:", &run.progress_interval.to_string(), false);
        }
    }
    Ok(())
}

fn render(value: &serde_json::Value, format: ConfigFormat) -> Result<String> {
    Ok(match format {
        ConfigFormat::Toml => toml::to_string_pretty(value)?,
        ConfigFormat::Json => serde_json::to_string_pretty(value)?,
        ConfigFormat::Yaml => serde_yml::to_string(value)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_formats() {
        let value = json!({ "parallel": { "max_threads": 4 } });

        let toml_out = render(&value, ConfigFormat::Toml).unwrap();
        assert!(toml_out.contains("[parallel]"));
        assert!(toml_out.contains("max_threads = 4"));

        let json_out = render(&value, ConfigFormat::Json).unwrap();
        assert!(json_out.contains("\"max_threads\": 4"));

        let yaml_out = render(&value, ConfigFormat::Yaml).unwrap();
        assert!(yaml_out.contains("max_threads: 4"));
    }
}
