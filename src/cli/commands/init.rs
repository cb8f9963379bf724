//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "whisper.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

const SAMPLE_CONFIG: &str = r#"# Whisper Configuration File
# Rule-based anonymization of personal data in free text

[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

[logging]
# JSON log file in addition to the console
local_enabled = false
local_path = "./logs"
# Rotation: daily | hourly | never
local_rotation = "daily"

[anonymization]
names = true
addresses = true
phone = true
email = true
national_id = true

# Master IP switch, then each pass
ip = true
ip_public = true
ip_private = true

urls = true
medical_references = false
credit_cards = false
iban = false
bank_accounts = false
id_cards = false
passports = false
logins = false
employee_ids = false
legal_cases = false
salary_data = false
# Also turns on medical_references
medical_data = false
grades = false
geolocations = false
biometric = false

# true: [EMAIL_1], [EMAIL_2], ... with a reversible mapping
# false: every match becomes the bare prefix, no mapping kept
use_consistent_tokens = true

[anonymization.tokens]
name = "[NAME]"
address = "[ADDRESS]"
phone = "[PHONE]"
email = "[EMAIL]"
national_id = "[NIR]"
ip_public = "[IP_PUBLIQUE]"
ip_private = "[IP_PRIVEE]"
url = "[URL]"

[lexicon]
# Custom stoplists; the embedded lexicon is used when unset
# path = "${WHISPER_HOME}/lexicon.toml"
"#;

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Whisper configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        match tokio::fs::write(&self.output, SAMPLE_CONFIG).await {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Validate configuration: whisper validate-config");
                println!("  3. Run: whisper anonymize -i input.txt -o output.txt");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5) // Fatal error exit code
            }
        }
    }
}
