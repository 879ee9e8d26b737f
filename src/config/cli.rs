use crate::adapters::storage::StoreMode;
use crate::config::toml_config::IntakeConfig;
use crate::domain::model::{RequestMethod, Submission};
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "exam-intake")]
#[command(about = "Record exam results and list them grouped by student")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Override the data file from the configuration
    #[arg(long, global = true)]
    pub data_file: Option<String>,

    /// Do not persist; show only the current submission
    #[arg(long, global = true)]
    pub transient: bool,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Submit one exam result, then list all records
    Submit(SubmitArgs),
    /// List all records grouped by student
    List,
    /// Handle one request: form-urlencoded body on stdin, status and body on stdout
    Handle {
        #[arg(long, default_value = "POST")]
        method: String,
    },
}

/// Fields are taken as raw strings so the validator reports every problem.
#[derive(Debug, Clone, Args)]
pub struct SubmitArgs {
    #[arg(long)]
    pub matricola: Option<String>,
    #[arg(long)]
    pub cognome: Option<String>,
    #[arg(long)]
    pub nome: Option<String>,
    #[arg(long)]
    pub esame: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub votazione: Option<String>,
    #[arg(long)]
    pub lode: bool,
    #[arg(long)]
    pub corso: Option<String>,
}

impl SubmitArgs {
    pub fn into_submission(self) -> Submission {
        Submission {
            method: RequestMethod::Post,
            student_id: self.matricola,
            last_name: self.cognome,
            first_name: self.nome,
            exam_name: self.esame,
            grade: self.votazione,
            honors: self.lode.then(|| "1".to_string()),
            program: self.corso,
        }
    }
}

impl CliConfig {
    pub fn apply_overrides(&self, config: &mut IntakeConfig) {
        if let Some(data_file) = &self.data_file {
            config.store.data_file = data_file.clone();
        }
        if self.transient {
            config.store.mode = StoreMode::Transient;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_args_become_post_submission() {
        let cli = CliConfig::parse_from([
            "exam-intake",
            "submit",
            "--matricola",
            "123456",
            "--votazione",
            "-3",
            "--lode",
        ]);

        let Command::Submit(args) = cli.command else {
            panic!("expected submit command");
        };
        let submission = args.into_submission();
        assert_eq!(submission.method, RequestMethod::Post);
        assert_eq!(submission.grade.as_deref(), Some("-3"));
        assert_eq!(submission.honors.as_deref(), Some("1"));
        assert!(submission.last_name.is_none());
    }

    #[test]
    fn test_overrides_apply_to_config() {
        let cli = CliConfig::parse_from([
            "exam-intake",
            "list",
            "--data-file",
            "other.json",
            "--transient",
        ]);
        let mut config = IntakeConfig::default();
        cli.apply_overrides(&mut config);

        assert_eq!(config.store.data_file, "other.json");
        assert_eq!(config.store.mode, StoreMode::Transient);
    }
}
