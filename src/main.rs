//! `student-records` CLI: drives a file-backed record store.
//! Every command initializes the store first (load the blob or seed it),
//! then prints its result as JSON on stdout. Errors go to stderr.

use std::fmt;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use student_records::{
    page_count, FileBlobStore, MarksRange, NewStudent, RecordStore, SortOrder, StoreConfig,
    StoreError, StudentPatch, StudentQuery, Violation, DEFAULT_BLOB_KEY, DEFAULT_PAGE_SIZE,
};

const DATA_DIR_ENV: &str = "STUDENT_RECORDS_DIR";

#[derive(Parser, Debug)]
#[command(name = "student-records", version, about = "Manage student records")]
struct Cli {
    /// Directory holding the record blob (default: $STUDENT_RECORDS_DIR or ./.student-records)
    #[arg(long, global = true)]
    dir: Option<PathBuf>,
    /// Blob key the records are stored under
    #[arg(long, global = true, default_value = DEFAULT_BLOB_KEY)]
    key: String,
    /// Page size for `list` when --limit is not given
    #[arg(long, global = true, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: i64,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load the stored records, seeding them if none exist
    Init,
    /// Discard every record and restore the seed list
    Reset,
    /// Delete the stored records; the next command seeds them again
    Wipe,
    /// Query records
    List(ListArgs),
    /// Add a record
    Add(AddArgs),
    /// Patch fields of an existing record
    Edit(EditArgs),
    /// Delete a record
    Delete { id: String },
    /// Average marks per semester
    Averages,
    /// Report statistics and the generator prompt
    Report {
        /// Print the statistics as JSON instead of the prompt text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
struct ListArgs {
    #[arg(long)]
    min: Option<i64>,
    #[arg(long)]
    max: Option<i64>,
    /// Case-insensitive match on name or usn
    #[arg(long)]
    search: Option<String>,
    /// Exact department, or "All"
    #[arg(long)]
    department: Option<String>,
    #[arg(long, value_enum)]
    sort: Option<SortArg>,
    #[arg(long)]
    page: Option<i64>,
    #[arg(long)]
    limit: Option<i64>,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum SortArg {
    Asc,
    Desc,
}

#[derive(Args, Debug)]
struct AddArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    usn: String,
    #[arg(long, allow_hyphen_values = true)]
    marks: i64,
    #[arg(long, allow_hyphen_values = true)]
    semester: i64,
    #[arg(long)]
    department: String,
    /// Store the values even if they break the form constraints
    #[arg(long)]
    no_validate: bool,
}

#[derive(Args, Debug)]
struct EditArgs {
    id: String,
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    usn: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    marks: Option<i64>,
    #[arg(long, allow_hyphen_values = true)]
    semester: Option<i64>,
    #[arg(long)]
    department: Option<String>,
    #[arg(long)]
    no_validate: bool,
}

#[derive(Debug)]
enum CliError {
    Store(StoreError),
    Invalid(Vec<Violation>),
    NotFound(String),
    Output(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Store(err) => write!(f, "{}", err),
            CliError::Invalid(violations) => {
                let messages: Vec<String> = violations.iter().map(|v| v.to_string()).collect();
                write!(f, "invalid record: {}", messages.join("; "))
            }
            CliError::NotFound(id) => write!(f, "no student with id {}", id),
            CliError::Output(message) => write!(f, "failed to write output: {}", message),
        }
    }
}

impl From<StoreError> for CliError {
    fn from(err: StoreError) -> Self {
        CliError::Store(err)
    }
}

impl CliError {
    fn exit_code(&self) -> i32 {
        match self {
            CliError::Store(_) | CliError::Output(_) => 1,
            CliError::Invalid(_) => 2,
            CliError::NotFound(_) => 3,
        }
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("error: {}", err);
        std::process::exit(err.exit_code());
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn default_data_dir() -> PathBuf {
    std::env::var_os(DATA_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(".student-records"))
}

fn run(cli: Cli) -> Result<(), CliError> {
    let dir = cli.dir.unwrap_or_else(default_data_dir);
    let config = StoreConfig::new()
        .with_key(cli.key)
        .with_page_size(cli.page_size);
    let store = RecordStore::with_config(FileBlobStore::new(dir), config);

    match cli.command {
        Command::Reset => {
            store.reset()?;
            return print_json(&serde_json::json!({ "count": store.len()? }));
        }
        Command::Wipe => return print_json(&serde_json::json!({ "removed": store.wipe()? })),
        _ => store.initialize()?,
    }

    match cli.command {
        Command::Init => print_json(&serde_json::json!({ "count": store.len()? })),
        Command::Reset | Command::Wipe => Ok(()),
        Command::List(args) => {
            let query = args.into_query();
            let limit = query.limit.unwrap_or(store.config().page_size);
            let page = store.query(&query)?;
            print_json(&serde_json::json!({
                "data": page.data,
                "total": page.total,
                "pages": page_count(page.total, limit),
            }))
        }
        Command::Add(args) => {
            let draft = NewStudent::new(
                args.name,
                args.usn,
                args.marks,
                args.semester,
                args.department,
            );
            if !args.no_validate {
                check(&draft)?;
            }
            print_json(&store.create(draft)?)
        }
        Command::Edit(args) => {
            let current = store
                .get(&args.id)?
                .ok_or_else(|| CliError::NotFound(args.id.clone()))?;
            let patch = StudentPatch {
                name: args.name,
                usn: args.usn,
                marks: args.marks,
                semester: args.semester,
                department: args.department,
            };
            if !args.no_validate {
                check(&NewStudent::from(patch.apply(&current)))?;
            }
            let updated = store
                .update(&args.id, &patch)?
                .ok_or_else(|| CliError::NotFound(args.id.clone()))?;
            print_json(&updated)
        }
        Command::Delete { id } => {
            if !store.delete(&id)? {
                return Err(CliError::NotFound(id));
            }
            print_json(&serde_json::json!({ "deleted": id }))
        }
        Command::Averages => print_json(&store.average_marks_by_semester()?),
        Command::Report { json } => match store.report_summary()? {
            None => {
                println!("There is no student data available to generate a report.");
                Ok(())
            }
            Some(summary) if json => print_json(&summary),
            Some(summary) => {
                print!("{}", summary.prompt());
                Ok(())
            }
        },
    }
}

impl ListArgs {
    fn into_query(self) -> StudentQuery {
        let marks_range = match (self.min, self.max) {
            (None, None) => None,
            (min, max) => Some(MarksRange {
                min: min.unwrap_or(i64::MIN),
                max: max.unwrap_or(i64::MAX),
            }),
        };
        StudentQuery {
            marks_range,
            sort: self.sort.map(|s| match s {
                SortArg::Asc => SortOrder::Asc,
                SortArg::Desc => SortOrder::Desc,
            }),
            search: self.search,
            department: self.department,
            page: self.page,
            limit: self.limit,
        }
    }
}

fn check(draft: &NewStudent) -> Result<(), CliError> {
    let violations = draft.validate();
    if violations.is_empty() {
        Ok(())
    } else {
        Err(CliError::Invalid(violations))
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let text = serde_json::to_string_pretty(value).map_err(|e| CliError::Output(e.to_string()))?;
    println!("{}", text);
    Ok(())
}
