//! Subcommands and their execution against the pledge store.

use std::time::Duration;

use chrono::Utc;
use clap::{Args as ClapArgs, Subcommand};
use thiserror::Error;

use pledgewall_core::constraint::validate_email;
use pledgewall_core::query::{unique_states, DEFAULT_PER_PAGE, DEFAULT_TARGET_PLEDGES};
use pledgewall_core::{
    FormValidation, KeyValueStore, Pagination, PledgeFilter, PledgeForm, PledgeId, PledgeStore,
    ProfileType, WallQuery, COMMITMENT_THEMES, INDIAN_STATES,
};

use crate::formatter::Formatter;

/// Errors surfaced to the user by a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The submitted form failed validation.
    #[error("{0}")]
    Invalid(FormValidation),

    /// No pledge with the requested id.
    #[error("pledge not found: {0}")]
    NotFound(String),

    /// Store error.
    #[error(transparent)]
    Store(#[from] pledgewall_core::Error),
}

/// Pledge wall commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Seed sample pledges if the wall is empty
    Init,
    /// Take the pledge
    Submit(SubmitArgs),
    /// Browse the public wall
    List(ListArgs),
    /// Show impact statistics
    Stats {
        /// Campaign target for the progress figure
        #[arg(long, default_value_t = DEFAULT_TARGET_PLEDGES)]
        target: u64,
    },
    /// List the states present on the wall
    States,
    /// List the commitment catalog and the selectable states
    Catalog,
    /// Show the certificate for a pledge
    Show {
        /// Pledge id, e.g. CLP-0042
        id: String,
    },
    /// Remove every pledge
    Clear,
}

impl Command {
    /// Whether the wall should be seeded before running this command.
    ///
    /// `init` seeds on its own so it can report what it did.
    pub fn wants_seed(&self) -> bool {
        !matches!(self, Command::Init | Command::Clear | Command::Catalog)
    }
}

/// Pledge form fields.
#[derive(ClapArgs, Debug, Default)]
pub struct SubmitArgs {
    /// Full name
    #[arg(long, default_value = "")]
    pub name: String,

    /// Email address
    #[arg(long, default_value = "")]
    pub email: String,

    /// 10-digit mobile number
    #[arg(long, default_value = "")]
    pub mobile: String,

    /// State or union territory
    #[arg(long, default_value = "")]
    pub state: String,

    /// Student, Working Professional or Other
    #[arg(long = "profile", default_value = "")]
    pub profile_type: String,

    /// A commitment from the catalog (repeatable)
    #[arg(long = "commit")]
    pub commitments: Vec<String>,
}

impl From<SubmitArgs> for PledgeForm {
    fn from(args: SubmitArgs) -> Self {
        PledgeForm {
            name: args.name,
            email: args.email,
            mobile: args.mobile,
            state: args.state,
            profile_type: args.profile_type,
            commitments: args.commitments,
        }
    }
}

/// Wall query options.
#[derive(ClapArgs, Debug)]
pub struct ListArgs {
    /// Search by name or pledge id
    #[arg(long)]
    pub search: Option<String>,

    /// Only this profile type
    #[arg(long = "profile")]
    pub profile_type: Option<ProfileType>,

    /// Only this state
    #[arg(long)]
    pub state: Option<String>,

    /// Page number, starting at 1
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Pledges per page
    #[arg(long, default_value_t = DEFAULT_PER_PAGE)]
    pub per_page: usize,
}

impl ListArgs {
    fn to_query(&self) -> WallQuery {
        let mut filter = PledgeFilter::new();
        if let Some(search) = &self.search {
            filter = filter.with_search(search.clone());
        }
        if let Some(profile_type) = self.profile_type {
            filter = filter.with_profile_type(profile_type);
        }
        if let Some(state) = &self.state {
            filter = filter.with_state(state.clone());
        }
        WallQuery::new(filter, Pagination::new(self.page, self.per_page))
    }
}

/// Execution settings shared by all commands.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExecOptions {
    /// Pause before storing a submission.
    pub submit_delay: Duration,

    /// Seed an empty wall before commands that read it.
    pub auto_seed: bool,
}

/// Execute a command and return the rendered output.
pub fn execute<B: KeyValueStore>(
    store: &PledgeStore<B>,
    command: Command,
    formatter: &dyn Formatter,
    options: ExecOptions,
) -> Result<String, CommandError> {
    if options.auto_seed && command.wants_seed() {
        store.initialize();
    }

    match command {
        Command::Init => {
            let message = if store.initialize() {
                format!("Seeded {} sample pledges", store.list().len())
            } else {
                "Wall already initialized".to_string()
            };
            Ok(formatter.format_message(&message))
        }
        Command::Submit(args) => submit(store, args.into(), formatter, options),
        Command::List(args) => {
            let page = store.wall(&args.to_query());
            Ok(formatter.format_wall(&page, Utc::now()))
        }
        Command::Stats { target } => Ok(formatter.format_stats(&store.stats(), target)),
        Command::States => Ok(formatter.format_list("State", &unique_states(&store.list()))),
        Command::Catalog => {
            let mut output = Vec::new();
            for theme in COMMITMENT_THEMES {
                let items: Vec<String> = theme
                    .commitments
                    .iter()
                    .map(|c| c.as_str().to_string())
                    .collect();
                output.push(formatter.format_list(theme.title, &items));
            }
            let states: Vec<String> = INDIAN_STATES.iter().map(|s| s.to_string()).collect();
            output.push(formatter.format_list("State", &states));
            Ok(output.join("\n"))
        }
        Command::Show { id } => {
            let pledge = store
                .find(&PledgeId::from(id.as_str()))
                .ok_or(CommandError::NotFound(id))?;
            Ok(formatter.format_certificate(&pledge))
        }
        Command::Clear => {
            store.clear()?;
            Ok(formatter.format_message("All pledges cleared"))
        }
    }
}

fn submit<B: KeyValueStore>(
    store: &PledgeStore<B>,
    form: PledgeForm,
    formatter: &dyn Formatter,
    options: ExecOptions,
) -> Result<String, CommandError> {
    let mut output = Vec::new();
    if let Some(suggestion) = validate_email(&form.email).suggestion {
        output.push(formatter.format_message(&suggestion));
    }

    let draft = form.into_draft().map_err(CommandError::Invalid)?;

    if !options.submit_delay.is_zero() {
        std::thread::sleep(options.submit_delay);
    }

    let pledge = store.create(draft)?;
    tracing::info!(id = %pledge.id, "pledge submitted");

    output.push(formatter.format_certificate(&pledge));
    Ok(output.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatter::{create_formatter, OutputFormat};
    use pledgewall_core::{MemoryStore, StoreConfig, ValidationError};

    fn store() -> PledgeStore<MemoryStore> {
        PledgeStore::with_config(
            MemoryStore::new(),
            StoreConfig::default().with_seed_count(12).with_rng_seed(99),
        )
    }

    fn submit_args() -> SubmitArgs {
        SubmitArgs {
            name: "Asha Rao".to_string(),
            email: "asha@gmial.com".to_string(),
            mobile: "98765 43210".to_string(),
            state: "Karnataka".to_string(),
            profile_type: "Student".to_string(),
            commitments: vec!["Save electricity".to_string(), "Recycle & compost".to_string()],
        }
    }

    fn run(store: &PledgeStore<MemoryStore>, command: Command) -> Result<String, CommandError> {
        let formatter = create_formatter(OutputFormat::Json);
        execute(store, command, &*formatter, ExecOptions::default())
    }

    #[test]
    fn test_init_seeds_once() {
        let store = store();
        let first = run(&store, Command::Init).unwrap();
        assert!(first.contains("Seeded 12 sample pledges"));
        let second = run(&store, Command::Init).unwrap();
        assert!(second.contains("already initialized"));
    }

    #[test]
    fn test_submit_prints_suggestion_and_certificate() {
        let store = store();
        let output = run(&store, Command::Submit(submit_args())).unwrap();
        assert!(output.contains("Did you mean asha@gmail.com?"));
        assert!(output.contains("CLP-0001"));
        assert_eq!(store.list()[0].mobile, "9876543210");
    }

    #[test]
    fn test_submit_invalid_form() {
        let store = store();
        let mut args = submit_args();
        args.commitments.clear();

        match run(&store, Command::Submit(args)) {
            Err(CommandError::Invalid(validation)) => {
                assert_eq!(
                    validation.errors().values().collect::<Vec<_>>(),
                    vec![&ValidationError::CommitmentsRequired]
                );
            }
            other => panic!("expected validation failure, got {:?}", other),
        }
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_show_missing_pledge() {
        let store = store();
        let err = run(&store, Command::Show { id: "CLP-0404".to_string() }).unwrap_err();
        assert!(matches!(err, CommandError::NotFound(ref id) if id == "CLP-0404"));
    }

    #[test]
    fn test_list_filters_by_profile() {
        let store = store();
        store.initialize();
        let args = ListArgs {
            search: None,
            profile_type: Some(ProfileType::Other),
            state: None,
            page: 1,
            per_page: 50,
        };
        let output = run(&store, Command::List(args)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        let pledges = value["pledges"].as_array().unwrap();
        assert!(pledges.iter().all(|p| p["profileType"] == "Other"));
        assert_eq!(value["totalMatches"].as_u64().unwrap() as usize, pledges.len());
    }

    #[test]
    fn test_clear_empties_wall() {
        let store = store();
        store.initialize();
        run(&store, Command::Clear).unwrap();
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_init_with_auto_seed_reports_seeding() {
        let store = store();
        let formatter = create_formatter(OutputFormat::Json);
        let options = ExecOptions {
            auto_seed: true,
            ..Default::default()
        };

        let output = execute(&store, Command::Init, &*formatter, options).unwrap();
        assert!(output.contains("Seeded 12 sample pledges"), "{}", output);
        assert_eq!(store.list().len(), 12);
    }

    #[test]
    fn test_auto_seed_before_stats() {
        let store = store();
        let formatter = create_formatter(OutputFormat::Json);
        let options = ExecOptions {
            auto_seed: true,
            ..Default::default()
        };

        let output = execute(&store, Command::Stats { target: 100 }, &*formatter, options).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["total"], 12);
    }

    #[test]
    fn test_wants_seed() {
        assert!(!Command::Init.wants_seed());
        assert!(Command::States.wants_seed());
        assert!(!Command::Clear.wants_seed());
        assert!(!Command::Catalog.wants_seed());
    }
}
