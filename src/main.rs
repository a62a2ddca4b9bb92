use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use formbuilder::api::{ApiClient, ListQuery, SortOrder};
use formbuilder::config::{self, Config};
use formbuilder::draft::{load_draft, save_draft};
use formbuilder::element::{ElementId, ElementPatch};
use formbuilder::export::{DirectoryDownloader, parse_submission};
use formbuilder::{ElementType, FormError, FormSession};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Form(#[from] FormError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("no element with id `{0}`")]
    ElementNotFound(String),
    #[error("`{0}` is not a column container")]
    NotAContainer(String),
    #[error("responses must be a JSON object keyed by element id")]
    InvalidResponses,
}

#[derive(Parser, Debug)]
#[command(name = "formbuilder", about = "Alumni form builder CLI")]
struct Cli {
    #[arg(long, env = "FORMBUILDER_DRAFT", default_value = "form-draft.json")]
    draft: PathBuf,

    #[arg(long, env = "FORMBUILDER_API_BASE_URL")]
    base_url: Option<String>,

    #[arg(long, env = "FORMBUILDER_API_TOKEN")]
    token: Option<String>,

    #[arg(long, env = "FORMBUILDER_EXPORT_DIR")]
    export_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(flatten)]
    Draft(DraftCommand),
    Api(ApiCommand),
}

#[derive(Subcommand, Debug)]
enum DraftCommand {
    /// Print the draft's element list, or every element and column id with `--ids`.
    Show {
        #[arg(long, default_value_t = false)]
        ids: bool,
    },
    /// Append a new element, or a column element with `--parent`.
    Add {
        element_type: ElementType,
        #[arg(long)]
        parent: Option<String>,
    },
    /// Apply a JSON patch (label, required, placeholder, options, imageUrl, columns).
    Update {
        id: String,
        #[arg(long)]
        data: String,
    },
    Remove {
        id: String,
    },
    Duplicate {
        id: String,
    },
    MoveUp {
        index: usize,
    },
    MoveDown {
        index: usize,
    },
    Reorder {
        from: usize,
        to: usize,
    },
    /// Fill the form with `--responses` and export the submission.
    Submit {
        #[arg(long)]
        responses: Option<String>,
    },
    /// Replace the draft with the elements of an exported submission.
    Import {
        file: PathBuf,
    },
}

#[derive(Args, Debug)]
struct ApiCommand {
    #[command(subcommand)]
    command: ApiSubcommand,
}

#[derive(Subcommand, Debug)]
enum ApiSubcommand {
    Forms(ListArgs),
    Form {
        id: String,
        /// Replace the draft with the fetched form's elements.
        #[arg(long, default_value_t = false)]
        save: bool,
    },
    Answers(ListArgs),
    Answer {
        id: String,
    },
}

#[derive(Args, Debug)]
struct ListArgs {
    #[arg(long)]
    page: Option<u32>,
    #[arg(long)]
    search: Option<String>,
    #[arg(long, value_parser = parse_order)]
    order: Option<SortOrder>,
}

impl From<ListArgs> for ListQuery {
    fn from(args: ListArgs) -> Self {
        Self { page: args.page, search: args.search, order: args.order }
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    match cli.command {
        Command::Api(api) => run_api(&cli.draft, &config, api).await,
        Command::Draft(command) => run_draft(&cli.draft, &config, command),
    }
}

fn resolve_config(cli: &Cli) -> Result<Config, CliError> {
    let mut config = Config::from_env()?;
    if let Some(base_url) = &cli.base_url {
        config.api_base_url = config::parse_base_url(base_url)?;
    }
    if let Some(token) = &cli.token {
        config.api_token = Some(token.clone());
    }
    if let Some(dir) = &cli.export_dir {
        config.export_dir.clone_from(dir);
    }
    Ok(config)
}

// =============================================================================
// DRAFT COMMANDS
// =============================================================================

fn run_draft(draft: &Path, config: &Config, command: DraftCommand) -> Result<(), CliError> {
    let mut session = FormSession::new(None);
    session.setup_elements(load_draft(draft)?);

    match command {
        DraftCommand::Show { ids: true } => return print_json(&session.tree().element_ids()),
        DraftCommand::Show { ids: false } => return print_json(session.elements()),
        DraftCommand::Add { element_type, parent } => {
            let id = match parent {
                Some(parent) => session
                    .add_column_element(&parent, element_type)
                    .ok_or(CliError::NotAContainer(parent))?,
                None => session.add_element(element_type),
            };
            println!("{id}");
        }
        DraftCommand::Update { id, data } => {
            let patch: ElementPatch = serde_json::from_str(&data)?;
            if !session.update_element(&id, &patch) {
                return Err(CliError::ElementNotFound(id));
            }
        }
        DraftCommand::Remove { id } => {
            if !session.remove_element(&id) {
                return Err(CliError::ElementNotFound(id));
            }
        }
        DraftCommand::Duplicate { id } => {
            let copy: ElementId = session.duplicate_element(&id).ok_or(CliError::ElementNotFound(id))?;
            println!("{copy}");
        }
        DraftCommand::MoveUp { index } => {
            check_index(index, session.elements().len())?;
            if !session.move_element_up(index) {
                warn!(index, "already at the top");
            }
        }
        DraftCommand::MoveDown { index } => {
            check_index(index, session.elements().len())?;
            if !session.move_element_down(index) {
                warn!(index, "already at the bottom");
            }
        }
        DraftCommand::Reorder { from, to } => {
            check_index(from, session.elements().len())?;
            session.reorder_elements(from, to);
        }
        DraftCommand::Submit { responses } => return submit(session, config, responses.as_deref()),
        DraftCommand::Import { file } => {
            let contents = std::fs::read_to_string(&file).map_err(|source| FormError::Io { path: file.clone(), source })?;
            let submission = parse_submission(&contents)?;
            info!(
                file = %file.display(),
                elements = submission.elements.len(),
                responses = submission.responses.len(),
                "submission imported"
            );
            session.setup_elements(submission.elements);
        }
    }

    save_draft(draft, &session.into_elements())?;
    Ok(())
}

fn submit(mut session: FormSession, config: &Config, responses: Option<&str>) -> Result<(), CliError> {
    session.toggle_preview(false);
    if let Some(raw) = responses {
        let Value::Object(answers) = serde_json::from_str::<Value>(raw)? else {
            return Err(CliError::InvalidResponses);
        };
        session.record_responses(answers);
    }

    for (id, _) in session.responses().iter() {
        if !session.tree().contains(id) {
            warn!(%id, "answer for an element that is not in the form");
        }
    }
    let answered = session.elements().iter().filter(|element| session.responses().contains(&element.id)).count();
    info!(answered, total = session.elements().len(), "responses recorded");

    let downloader = DirectoryDownloader::new(config.export_dir.clone());
    let document = session.submit(&downloader)?;
    println!("{}", downloader.path_for(&document.file_name).display());
    Ok(())
}

fn check_index(index: usize, len: usize) -> Result<(), CliError> {
    if index >= len {
        return Err(FormError::IndexOutOfRange { index, len }.into());
    }
    Ok(())
}

// =============================================================================
// API COMMANDS
// =============================================================================

async fn run_api(draft: &Path, config: &Config, api: ApiCommand) -> Result<(), CliError> {
    let client = ApiClient::new(config)?;
    match api.command {
        ApiSubcommand::Forms(args) => print_json(&client.list_forms(&args.into()).await?),
        ApiSubcommand::Form { id, save } => {
            let form = client.fetch_form(&id).await?;
            if save {
                let mut session = FormSession::new(Some(id));
                session.setup_elements(form.elements.clone());
                save_draft(draft, session.elements())?;
                info!(draft = %draft.display(), form_id = session.form_id().unwrap_or_default(), "draft replaced");
            }
            print_json(&form)
        }
        ApiSubcommand::Answers(args) => print_json(&client.list_answers(&args.into()).await?),
        ApiSubcommand::Answer { id } => print_json(&client.fetch_answer(&id).await?),
    }
}

fn parse_order(raw: &str) -> Result<SortOrder, String> {
    match raw.to_ascii_uppercase().as_str() {
        "ASC" => Ok(SortOrder::Asc),
        "DESC" => Ok(SortOrder::Desc),
        other => Err(format!("expected ASC or DESC, got {other}")),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
