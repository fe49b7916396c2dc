//! Subcommands of the console, one group per panel

use crate::output::{self, OutputFormat, Row};
use anyhow::{Context, Result, anyhow, bail};
use backoffice_client::{AdminClient, Decision, HostQueue, SessionFile, endpoints};
use backoffice_core::records::matches_for_trip;
use backoffice_core::{
    Application, ApplicationStatus, Config, JobStatus, ModerationStatus, OfferStatus, Record,
    RecordId,
};
use backoffice_panel::{
    ActionForm, ActionKind, EmailDraft, EmailTemplate, JobDraft, JobForm, JobFormStep,
    PageRequest, Panel, PanelKind, StatusFilter, Submission, TemplateValues, ViewQuery, actions,
    catalog, export,
};
use clap::{Args, Subcommand};
use serde::Serialize;
use serde_json::Value;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Everything a command needs
#[derive(Debug)]
pub struct App {
    /// Resolved configuration
    pub config: Config,
    /// Authenticated backend client
    pub client: AdminClient,
    /// Output format
    pub output: OutputFormat,
}

/// Search, status tab and page shared by list commands
#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    /// Search text, matched case-insensitively
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Status tab: `all` or a status name
    #[arg(short = 't', long = "status", default_value = "all")]
    pub status: String,

    /// Page of groups on grouped panels
    #[arg(short, long, default_value_t = 1)]
    pub page: usize,

    /// Print per-status counts above the list
    #[arg(long)]
    pub counts: bool,
}

impl ListArgs {
    fn query<S: backoffice_core::Status>(&self) -> Result<ViewQuery<S>> {
        let status: StatusFilter<S> = self
            .status
            .parse()
            .with_context(|| format!("invalid status tab '{}'", self.status))?;
        Ok(ViewQuery::new(self.search.clone(), status))
    }
}

fn parse_queue(raw: &str) -> Result<HostQueue, String> {
    let status: ModerationStatus = raw.parse().map_err(|e: backoffice_core::Error| e.to_string())?;
    HostQueue::try_from(status).map_err(|e| e.to_string())
}

fn parse_decision(raw: &str) -> Result<Decision, String> {
    let status: ModerationStatus = raw.parse().map_err(|e: backoffice_core::Error| e.to_string())?;
    Decision::try_from(status).map_err(|e| e.to_string())
}

/// Travel trips and matches
#[derive(Debug, Subcommand)]
pub enum TravelCommands {
    /// List trips
    Trips {
        #[command(flatten)]
        list: ListArgs,
    },
    /// List matches, optionally only those of one trip
    Matches {
        /// Trip whose matches to show
        #[arg(long, value_name = "TRIP_ID")]
        trip: Option<String>,
        #[command(flatten)]
        list: ListArgs,
    },
    /// Show every field of a trip
    Show {
        /// Trip id
        id: String,
    },
    /// Cancel an active trip (its matches are cancelled too)
    Cancel {
        /// Trip id
        id: String,
    },
    /// Block the host of a trip
    BlockHost {
        /// Trip id
        id: String,
    },
    /// Cancel a confirmed or pending match
    CancelMatch {
        /// Match id
        id: String,
    },
    /// Export the filtered trip list as CSV
    Export {
        /// Destination file
        #[arg(short, long, value_name = "FILE")]
        file: PathBuf,
        #[command(flatten)]
        list: ListArgs,
    },
}

/// Host application queues
#[derive(Debug, Subcommand)]
pub enum HostCommands {
    /// List one queue
    List {
        /// Queue: pending, approved or rejected
        #[arg(short, long, default_value = "pending", value_parser = parse_queue)]
        queue: HostQueue,
        #[command(flatten)]
        list: ListArgs,
    },
    /// Show every field of a host
    Show {
        /// Host id
        id: String,
        /// Queue the host is in
        #[arg(short, long, default_value = "pending", value_parser = parse_queue)]
        queue: HostQueue,
    },
    /// Approve a pending host
    Approve {
        /// Host id
        id: String,
    },
    /// Reject a pending host
    Reject {
        /// Host id
        id: String,
        /// Reason shown to the host
        #[arg(short, long)]
        reason: String,
    },
}

/// Read-only reviewed lists (events, properties)
#[derive(Debug, Clone, Args)]
pub struct ReviewedArgs {
    /// List: approved or rejected
    #[arg(short, long, default_value = "approved", value_parser = parse_decision)]
    pub decision: Decision,

    /// Show every field of one record instead of the list
    #[arg(long, value_name = "ID")]
    pub show: Option<String>,

    #[command(flatten)]
    pub list: ListArgs,
}

/// Blocked buy-sell listings
#[derive(Debug, Clone, Args)]
pub struct BlockedArgs {
    /// Show every field of one listing instead of the list
    #[arg(long, value_name = "ID")]
    pub show: Option<String>,

    #[command(flatten)]
    pub list: ListArgs,
}

/// Job postings
#[derive(Debug, Subcommand)]
pub enum JobCommands {
    /// List jobs grouped by department
    List {
        #[command(flatten)]
        list: ListArgs,
    },
    /// Show every field of a job
    Show {
        /// Job id
        id: String,
    },
    /// Create a job from a TOML or JSON draft file
    Create {
        /// Draft file (`.json` is read as JSON, anything else as TOML)
        file: PathBuf,
        /// Publish immediately instead of saving as a draft
        #[arg(long)]
        publish: bool,
    },
    /// Change a job's status
    Status {
        /// Job id
        id: String,
        /// New status: draft, active or closed
        status: JobStatus,
    },
}

/// Job applications
#[derive(Debug, Subcommand)]
pub enum ApplicationCommands {
    /// List applications grouped by job title
    List {
        #[command(flatten)]
        list: ListArgs,
    },
    /// Show every field of an application
    Show {
        /// Application id
        id: String,
    },
    /// Approve a pending application
    Approve {
        /// Application id
        id: String,
    },
    /// Reject a pending application
    Reject {
        /// Application id
        id: String,
        /// Reason recorded with the rejection
        #[arg(short, long)]
        reason: String,
    },
    /// Move an application to any status
    Status {
        /// Application id
        id: String,
        /// New status
        status: ApplicationStatus,
        /// Reason, recorded when rejecting
        #[arg(short, long)]
        reason: Option<String>,
    },
    /// Email the applicant
    Email {
        /// Application id
        id: String,
        /// Template: interview, rejection, offer or custom
        #[arg(short, long, default_value = "custom")]
        template: EmailTemplate,
        /// Subject, replacing the template's
        #[arg(long)]
        subject: Option<String>,
        /// Message, replacing the template's
        #[arg(short, long)]
        message: Option<String>,
        /// Recipient, replacing the applicant's address
        #[arg(long)]
        to: Option<String>,
        /// Value of `{{date}}` (defaults to today)
        #[arg(long)]
        date: Option<String>,
        /// Print the email without sending it
        #[arg(long)]
        dry_run: bool,
    },
    /// Export the filtered list as CSV
    Export {
        /// Destination file
        #[arg(short, long, value_name = "FILE")]
        file: PathBuf,
        #[command(flatten)]
        list: ListArgs,
    },
}

/// Job offers
#[derive(Debug, Subcommand)]
pub enum OfferCommands {
    /// List offers
    List {
        #[command(flatten)]
        list: ListArgs,
    },
    /// Show every field of an offer
    Show {
        /// Offer id
        id: String,
    },
    /// Create an offer from a TOML or JSON file
    Create {
        /// Offer file (`.json` is read as JSON, anything else as TOML)
        file: PathBuf,
    },
    /// Change an offer's status
    Status {
        /// Offer id
        id: String,
        /// New status: draft, pending, accepted or declined
        status: OfferStatus,
    },
}

// Shared panel plumbing

async fn load<T: Record>(panel: &Panel<T>) {
    panel.refresh().await;
    if let Some(message) = panel.error() {
        eprintln!("Could not load {}: {message}", panel.source().endpoint);
    }
}

fn list<T: Record + Row>(app: &App, panel: &Panel<T>, args: &ListArgs, grouped: bool) -> Result<()> {
    let query = args.query::<T::Status>()?;
    if args.counts && app.output == OutputFormat::Table {
        println!("{}", output::counts_line(&panel.counts()));
    }
    if grouped {
        let request = PageRequest::new(args.page, app.config.panel.groups_per_page);
        output::print_groups(app.output, &panel.grouped(&query, request))
    } else {
        output::print_records(app.output, &panel.view(&query))
    }
}

fn show<T: Record>(app: &App, panel: &Panel<T>, id: &RecordId) -> Result<()> {
    let view = panel.detail(id)?;
    output::print_detail(app.output, &view)
}

async fn apply<T: Record>(
    panel: &Panel<T>,
    id: &RecordId,
    submission: Submission<T::Status>,
) -> Result<()> {
    let kind = submission.kind;
    match panel.execute(id, submission).await {
        Ok(outcome) => {
            let message = outcome
                .message
                .unwrap_or_else(|| format!("{kind} applied to {id}"));
            println!("{message}");
            Ok(())
        }
        Err(e) => Err(anyhow!(e.alert())),
    }
}

async fn act<T: Record>(
    panel: &Panel<T>,
    id: &RecordId,
    form_for: impl Fn(&T) -> ActionForm<T::Status>,
    kind: ActionKind,
    reason: Option<&str>,
) -> Result<()> {
    load(panel).await;
    let record = panel
        .store()
        .get(id)
        .ok_or_else(|| anyhow!("record {id} is not in {}", panel.source().endpoint))?;

    let mut form = form_for(&record);
    if !form.is_actionable() {
        bail!("no actions are available for record {id} in its current status");
    }
    form.select(kind)?;
    if let Some(reason) = reason {
        form.set_reason(reason);
    }
    let submission = form.submit()?;
    apply(panel, id, submission).await
}

fn read_document(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

fn create_csv(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    Ok(BufWriter::new(file))
}

// Panels

/// Run a travel command
pub async fn travel(app: &App, command: TravelCommands) -> Result<()> {
    match command {
        TravelCommands::Trips { list: args } => {
            let panel = catalog::trips(app.client.clone());
            load(&panel).await;
            list(app, &panel, &args, false)
        }
        TravelCommands::Matches { trip, list: args } => {
            let panel = catalog::matches(app.client.clone());
            load(&panel).await;
            match trip {
                Some(trip) => {
                    let trip = RecordId::from(trip);
                    let query = args.query()?;
                    let visible = panel.view(&query);
                    let for_trip: Vec<_> = matches_for_trip(&visible, &trip)
                        .into_iter()
                        .cloned()
                        .collect();
                    output::print_records(app.output, &for_trip)
                }
                None => list(app, &panel, &args, true),
            }
        }
        TravelCommands::Show { id } => {
            let panel = catalog::trips(app.client.clone());
            load(&panel).await;
            show(app, &panel, &RecordId::from(id))
        }
        TravelCommands::Cancel { id } => {
            let panel = catalog::trips(app.client.clone());
            act(&panel, &RecordId::from(id), actions::trip_actions, ActionKind::Cancel, None).await
        }
        TravelCommands::BlockHost { id } => {
            let panel = catalog::trips(app.client.clone());
            act(&panel, &RecordId::from(id), actions::trip_actions, ActionKind::Block, None).await
        }
        TravelCommands::CancelMatch { id } => {
            let panel = catalog::matches(app.client.clone());
            act(&panel, &RecordId::from(id), actions::match_actions, ActionKind::Cancel, None).await
        }
        TravelCommands::Export { file, list: args } => {
            let panel = catalog::trips(app.client.clone());
            load(&panel).await;
            let trips = panel.view(&args.query()?);
            let rows = export::write_trips(create_csv(&file)?, &trips)?;
            info!(rows, file = %file.display(), "exported trips");
            println!("Exported {rows} trips to {}", file.display());
            Ok(())
        }
    }
}

/// Run a host command
pub async fn hosts(app: &App, command: HostCommands) -> Result<()> {
    match command {
        HostCommands::List { queue, list: args } => {
            let panel = catalog::hosts(app.client.clone(), queue);
            load(&panel).await;
            list(app, &panel, &args, false)
        }
        HostCommands::Show { id, queue } => {
            let panel = catalog::hosts(app.client.clone(), queue);
            load(&panel).await;
            show(app, &panel, &RecordId::from(id))
        }
        HostCommands::Approve { id } => {
            let panel = catalog::hosts(app.client.clone(), HostQueue::Pending);
            act(&panel, &RecordId::from(id), actions::host_actions, ActionKind::Approve, None).await
        }
        HostCommands::Reject { id, reason } => {
            let panel = catalog::hosts(app.client.clone(), HostQueue::Pending);
            act(
                &panel,
                &RecordId::from(id),
                actions::host_actions,
                ActionKind::Reject,
                Some(&reason),
            )
            .await
        }
    }
}

/// Run an events or properties listing
pub async fn reviewed(app: &App, kind: PanelKind, args: ReviewedArgs) -> Result<()> {
    let panel = match kind {
        PanelKind::Events => catalog::events(app.client.clone(), args.decision),
        PanelKind::Properties => catalog::properties(app.client.clone(), args.decision),
        other => bail!("{other} is not a reviewed-content panel"),
    };
    load(&panel).await;
    match args.show {
        Some(id) => show(app, &panel, &RecordId::from(id)),
        None => list(app, &panel, &args.list, false),
    }
}

/// Run the blocked listings view
pub async fn buy_sell(app: &App, args: BlockedArgs) -> Result<()> {
    let panel = catalog::blocked_listings(app.client.clone());
    load(&panel).await;
    match args.show {
        Some(id) => show(app, &panel, &RecordId::from(id)),
        None => list(app, &panel, &args.list, false),
    }
}

/// Run a job command
pub async fn jobs(app: &App, command: JobCommands) -> Result<()> {
    let panel = catalog::jobs(app.client.clone());
    match command {
        JobCommands::List { list: args } => {
            load(&panel).await;
            list(app, &panel, &args, true)
        }
        JobCommands::Show { id } => {
            load(&panel).await;
            show(app, &panel, &RecordId::from(id))
        }
        JobCommands::Create { file, publish } => {
            let text = read_document(&file)?;
            let mut draft = if is_json(&file) {
                JobDraft::from_json(&text)?
            } else {
                JobDraft::from_toml(&text)?
            };
            draft.publish |= publish;

            let mut form = JobForm::from_draft(draft);
            while form.step() != JobFormStep::Review {
                let step = form.step();
                form.next()
                    .with_context(|| format!("job draft is incomplete at the {step} step"))?;
            }
            let mutation = form.mutation()?;

            let outcome = panel.create(&mutation).await.map_err(|e| anyhow!(e.alert()))?;
            println!("{}", outcome.message.unwrap_or_else(|| "Job created".to_string()));
            Ok(())
        }
        JobCommands::Status { id, status } => {
            load(&panel).await;
            let id = RecordId::from(id);
            apply(&panel, &id, actions::job_status_change(&id, status)).await
        }
    }
}

fn email_values(app: &App, application: &Application, date: Option<String>) -> TemplateValues {
    let date = date.unwrap_or_else(|| chrono::Local::now().format("%Y-%m-%d").to_string());
    TemplateValues::for_application(application, &app.config.panel.company, &date)
}

#[derive(Serialize)]
struct EmailPreview<'a> {
    application: &'a RecordId,
    #[serde(flatten)]
    email: &'a backoffice_panel::ComposedEmail,
}

/// Run an application command
pub async fn applications(app: &App, command: ApplicationCommands) -> Result<()> {
    let panel = catalog::applications(app.client.clone());
    match command {
        ApplicationCommands::List { list: args } => {
            load(&panel).await;
            list(app, &panel, &args, true)
        }
        ApplicationCommands::Show { id } => {
            load(&panel).await;
            let id = RecordId::from(id);
            if panel.store().get(&id).is_none() {
                // Older applications may be missing from the list view.
                let application: Application = app
                    .client
                    .fetch_record(&endpoints::application(&id))
                    .await
                    .map_err(|e| anyhow!(e.user_message()))?;
                panel.store().insert(application);
            }
            show(app, &panel, &id)
        }
        ApplicationCommands::Approve { id } => {
            act(
                &panel,
                &RecordId::from(id),
                actions::application_actions,
                ActionKind::Approve,
                None,
            )
            .await
        }
        ApplicationCommands::Reject { id, reason } => {
            act(
                &panel,
                &RecordId::from(id),
                actions::application_actions,
                ActionKind::Reject,
                Some(&reason),
            )
            .await
        }
        ApplicationCommands::Status { id, status, reason } => {
            let id = RecordId::from(id);
            let submission = actions::application_status_change(&id, status, reason.as_deref())?;
            load(&panel).await;
            apply(&panel, &id, submission).await
        }
        ApplicationCommands::Email {
            id,
            template,
            subject,
            message,
            to,
            date,
            dry_run,
        } => {
            load(&panel).await;
            let id = RecordId::from(id);
            let application = panel
                .store()
                .get(&id)
                .ok_or_else(|| anyhow!("application {id} not found"))?;

            let mut draft = EmailDraft::for_application(&application, template);
            if let Some(subject) = subject {
                draft.subject = subject;
            }
            if let Some(message) = message {
                draft.body = message;
            }
            if let Some(to) = to {
                draft.to = to;
            }
            let email = draft.compose(&email_values(app, &application, date))?;
            if !email.unknown_placeholders.is_empty() {
                warn!(placeholders = ?email.unknown_placeholders, "unknown placeholders left in email");
                eprintln!(
                    "Warning: unknown placeholders left as-is: {}",
                    email.unknown_placeholders.join(", ")
                );
            }

            if dry_run {
                match app.output {
                    OutputFormat::Json => println!(
                        "{}",
                        output::to_json(&EmailPreview {
                            application: &id,
                            email: &email,
                        })?
                    ),
                    OutputFormat::Table => {
                        println!("To: {}\nSubject: {}\n\n{}", email.to, email.subject, email.message);
                    }
                }
                return Ok(());
            }

            let outcome = app
                .client
                .dispatch(&email.mutation(&id))
                .await
                .map_err(|e| anyhow!(e.user_message()))?;
            println!(
                "{}",
                outcome
                    .message
                    .unwrap_or_else(|| format!("Email sent to {}", email.to))
            );
            Ok(())
        }
        ApplicationCommands::Export { file, list: args } => {
            load(&panel).await;
            let applications = panel.view(&args.query()?);
            let rows = export::write_applications(create_csv(&file)?, &applications)?;
            info!(rows, file = %file.display(), "exported applications");
            println!("Exported {rows} applications to {}", file.display());
            Ok(())
        }
    }
}

/// Run an offer command
pub async fn offers(app: &App, command: OfferCommands) -> Result<()> {
    let panel = catalog::offers(app.client.clone());
    match command {
        OfferCommands::List { list: args } => {
            load(&panel).await;
            list(app, &panel, &args, false)
        }
        OfferCommands::Show { id } => {
            load(&panel).await;
            show(app, &panel, &RecordId::from(id))
        }
        OfferCommands::Create { file } => {
            let text = read_document(&file)?;
            let payload: Value = if is_json(&file) {
                serde_json::from_str(&text).context("offer file is not valid JSON")?
            } else {
                toml::from_str(&text).context("offer file is not valid TOML")?
            };
            if !payload.is_object() {
                bail!("offer file must describe a single object");
            }
            let outcome = panel
                .create(&endpoints::create_offer(payload))
                .await
                .map_err(|e| anyhow!(e.alert()))?;
            println!("{}", outcome.message.unwrap_or_else(|| "Offer created".to_string()));
            Ok(())
        }
        OfferCommands::Status { id, status } => {
            load(&panel).await;
            let id = RecordId::from(id);
            apply(&panel, &id, actions::offer_status_change(&id, status)).await
        }
    }
}

// Session and configuration

fn session_file(config: &Config) -> SessionFile {
    SessionFile::new(&config.auth.session_file, config.auth.token_key.clone())
}

/// Persist a token for later runs
pub fn login(config: &Config, token: &str) -> Result<()> {
    let token = token.trim();
    if token.is_empty() {
        bail!("token must not be empty");
    }
    let session = session_file(config);
    session
        .save(token)
        .with_context(|| format!("failed to write {}", session.path().display()))?;
    info!(path = %session.path().display(), "session token saved");
    println!("Token saved to {}", session.path().display());
    Ok(())
}

/// Forget the persisted token
pub fn logout(config: &Config) -> Result<()> {
    let session = session_file(config);
    session
        .clear()
        .with_context(|| format!("failed to update {}", session.path().display()))?;
    println!("Signed out");
    Ok(())
}

/// Describe every panel
pub fn panels(output: OutputFormat) -> Result<()> {
    let specs: Vec<_> = PanelKind::ALL.into_iter().map(PanelKind::spec).collect();
    match output {
        OutputFormat::Json => println!("{}", output::to_json(&specs)?),
        OutputFormat::Table => {
            let rows: Vec<Vec<String>> = specs
                .iter()
                .map(|spec| {
                    let tabs: Vec<&str> = spec.tabs.iter().map(|tab| tab.label).collect();
                    let actions: Vec<&str> = spec.actions.iter().map(|a| a.as_str()).collect();
                    vec![
                        spec.kind.to_string(),
                        spec.title.to_string(),
                        tabs.join(", "),
                        if spec.is_read_only() {
                            "read-only".to_string()
                        } else {
                            actions.join(", ")
                        },
                    ]
                })
                .collect();
            print!("{}", output::render_table(&["Panel", "Title", "Tabs", "Actions"], &rows));
        }
    }
    Ok(())
}

/// Show or validate the resolved configuration
pub fn config(config: &Config, show: bool, validate: bool) -> Result<()> {
    if validate {
        config.validate().context("configuration is invalid")?;
        println!("Configuration is valid");
    }
    if show || !validate {
        let mut shown = config.clone();
        if shown.auth.token.is_some() {
            shown.auth.token = Some("<redacted>".to_string());
        }
        let text = toml::to_string_pretty(&shown).context("failed to serialize configuration")?;
        println!("{text}");
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use backoffice_client::{AuthContext, MockBackend};
    use backoffice_core::TripStatus;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;
    use std::sync::Arc;

    fn mock_app(backend: &Arc<MockBackend>) -> App {
        App {
            config: Config::default(),
            client: AdminClient::new(backend.clone(), AuthContext::anonymous()),
            output: OutputFormat::Json,
        }
    }

    #[rstest]
    #[case("pending", Some(HostQueue::Pending))]
    #[case("Rejected", Some(HostQueue::Rejected))]
    #[case("blocked", None)]
    #[case("gone", None)]
    fn test_parse_queue(#[case] raw: &str, #[case] expected: Option<HostQueue>) {
        assert_eq!(parse_queue(raw).ok(), expected);
    }

    #[test]
    fn test_parse_decision() {
        assert_eq!(parse_decision("approved").unwrap(), Decision::Approved);
        assert!(parse_decision("pending").is_err());
    }

    #[test]
    fn test_list_args_query() {
        let args = ListArgs {
            search: "lagos".to_string(),
            status: "active".to_string(),
            page: 1,
            counts: false,
        };
        let query = args.query::<TripStatus>().unwrap();
        assert_eq!(query.search, "lagos");
        assert_eq!(query.status, StatusFilter::Only(TripStatus::Active));

        let bad = ListArgs {
            status: "flying".to_string(),
            ..args
        };
        assert!(bad.query::<TripStatus>().is_err());
    }

    #[test]
    fn test_login_and_logout_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.auth.session_file = dir.path().join("session.json");

        login(&config, "  secret ").unwrap();
        assert_eq!(session_file(&config).load().unwrap().as_deref(), Some("secret"));

        logout(&config).unwrap();
        assert_eq!(session_file(&config).load().unwrap(), None);
        assert!(login(&config, "   ").is_err());
    }

    #[test]
    fn test_draft_format_from_extension() {
        assert!(is_json(Path::new("job.JSON")));
        assert!(!is_json(Path::new("job.toml")));
        assert!(!is_json(Path::new("job")));
    }

    #[tokio::test]
    async fn test_status_reject_without_reason_sends_nothing() {
        let backend = Arc::new(MockBackend::new().with_get(
            "/carrer/admin/applications",
            json!([{"id": "a1", "name": "Ada", "status": "pending"}]),
        ));
        let app = mock_app(&backend);

        let result = applications(
            &app,
            ApplicationCommands::Status {
                id: "a1".to_string(),
                status: ApplicationStatus::Rejected,
                reason: Some("  ".to_string()),
            },
        )
        .await;

        assert!(result.unwrap_err().to_string().contains("reason"));
        assert!(backend.mutations_sent().is_empty());
    }

    #[tokio::test]
    async fn test_status_reject_with_reason_is_sent() {
        let backend = Arc::new(MockBackend::new().with_get(
            "/carrer/admin/applications",
            json!([{"id": "a1", "name": "Ada", "status": "pending"}]),
        ));
        let app = mock_app(&backend);

        applications(
            &app,
            ApplicationCommands::Status {
                id: "a1".to_string(),
                status: ApplicationStatus::Rejected,
                reason: Some("Role filled".to_string()),
            },
        )
        .await
        .unwrap();

        let sent = backend.mutations_sent();
        assert_eq!(sent.len(), 1);
    }
}
