//! `codetrack-client` -- line-oriented console front end for the
//! record form.
//!
//! Reads commands from stdin and drives the [`FormController`]; the
//! `tokio::select!` loop owns the name-search debounce timer, so a new
//! `name` edit re-arms the timer and only the last value is searched.
//!
//! # Commands
//!
//! | Command          | Effect                                     |
//! |------------------|--------------------------------------------|
//! | `code <value>`   | Set the code field and look it up          |
//! | `name <value>`   | Set the person name (debounced search)     |
//! | `link <value>`   | Set the link field                         |
//! | `desc <value>`   | Set the description field                  |
//! | `status <value>` | Set the status (ONLINE/DOWNLOADED/WATCHED) |
//! | `pick <n>`       | Fill the form from search result `n`       |
//! | `show`           | Print the current form                     |
//! | `submit`         | Create or update, depending on mode        |
//! | `reset`          | Clear the form                             |
//! | `quit`           | Exit                                       |
//!
//! # Environment variables
//!
//! | Variable             | Required | Default                 |
//! |----------------------|----------|-------------------------|
//! | `CODETRACK_API_URL`  | no       | `http://localhost:3000` |
//! | `SEARCH_DEBOUNCE_MS` | no       | `500`                   |

use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use codetrack_client::api::{ApiClient, ApiError, RecordView};
use codetrack_client::form::{Effect, FormController, Mode, Submission};

/// Default debounce for search-as-you-type.
const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// What the command loop should do after handling a line.
enum SearchTimer {
    Keep,
    Arm(String),
    Disarm,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "codetrack_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let base_url = std::env::var("CODETRACK_API_URL")
        .unwrap_or_else(|_| "http://localhost:3000".to_string());

    let debounce_ms: u64 = std::env::var("SEARCH_DEBOUNCE_MS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_DEBOUNCE_MS);
    let debounce_window = Duration::from_millis(debounce_ms);

    tracing::info!(api_url = %base_url, debounce_ms, "Starting codetrack-client");

    let client = ApiClient::new(base_url);
    let mut form = FormController::new();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut pending_search: Option<String> = None;
    let debounce = tokio::time::sleep(Duration::ZERO);
    tokio::pin!(debounce);

    println!("codetrack console. Type `show` for the form, `quit` to exit.");

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to read stdin");
                        break;
                    }
                };

                let Some(timer) = handle_command(&client, &mut form, line.trim()).await else {
                    break;
                };
                match timer {
                    SearchTimer::Keep => {}
                    SearchTimer::Arm(query) => {
                        pending_search = Some(query);
                        debounce.as_mut().reset(Instant::now() + debounce_window);
                    }
                    SearchTimer::Disarm => pending_search = None,
                }
            }
            () = &mut debounce, if pending_search.is_some() => {
                if let Some(query) = pending_search.take() {
                    run_name_search(&client, &mut form, &query).await;
                }
            }
        }
    }

    println!("bye");
}

/// Execute one console command. Returns `None` to quit, otherwise what
/// to do with the debounce timer.
async fn handle_command(
    client: &ApiClient,
    form: &mut FormController,
    line: &str,
) -> Option<SearchTimer> {
    let (command, rest) = match line.split_once(' ') {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    match command {
        "" => {}
        "quit" | "exit" => return None,
        "code" => {
            form.edit_code(rest);
            if let Some(Effect::FetchRecord { code }) = form.blur_code() {
                run_fetch(client, form, &code).await;
            }
        }
        "name" => {
            return Some(match form.edit_person_name(rest) {
                Effect::ScheduleNameSearch { query } => SearchTimer::Arm(query),
                _ => SearchTimer::Disarm,
            });
        }
        "link" => form.edit_link(rest),
        "desc" => form.edit_description(rest),
        "status" => match rest.parse() {
            Ok(status) => form.set_status(status),
            Err(e) => println!("! {e}"),
        },
        "pick" => match rest.parse::<usize>() {
            Ok(index) => {
                if form.select_result(index) {
                    println!("Selected {}; now updating.", form.fields().code);
                } else {
                    println!("! No search result at index {index}");
                }
            }
            Err(_) => println!("! pick needs a result number"),
        },
        "show" => print_form(form),
        "submit" => run_submit(client, form).await,
        "reset" => {
            form.reset();
            println!("Form cleared.");
        }
        other => println!("! Unknown command '{other}'"),
    }

    Some(SearchTimer::Keep)
}

/// Look up a code; a hit switches the form to update mode.
async fn run_fetch(client: &ApiClient, form: &mut FormController, code: &str) {
    form.begin_loading();
    let result = client.fetch_record(code).await;
    form.finish_loading();

    match result {
        Ok(record) => {
            form.on_record_fetched(record);
            println!("Found {}; now updating.", form.fields().code);
        }
        Err(ApiError::NotFound) => {
            form.on_fetch_not_found(code);
            println!("No record with code {}; creating new.", form.fields().code);
        }
        Err(e) => println!("! Error fetching record: {e}"),
    }
}

/// The debounce timer fired: actually run the name search.
async fn run_name_search(client: &ApiClient, form: &mut FormController, query: &str) {
    form.begin_loading();
    let result = client.search_by_name(query).await;
    form.finish_loading();

    match result {
        Ok(results) => {
            form.on_search_results(results);
            print_results(form.search_results());
        }
        Err(e) => println!("! Error searching records: {e}"),
    }
}

/// Create or update depending on the form's mode, resetting on success.
async fn run_submit(client: &ApiClient, form: &mut FormController) {
    let submission = match form.submit() {
        Ok(submission) => submission,
        Err(e) => {
            println!("! {e}");
            return;
        }
    };

    form.begin_loading();
    let result = match &submission {
        Submission::Create(fields) => client.create_record(fields).await,
        Submission::Update { code, fields } => client.update_record(code, fields).await,
    };
    form.finish_loading();

    match result {
        Ok(record) => {
            match submission {
                Submission::Create(_) => println!("Record {} created.", record.code),
                Submission::Update { .. } => println!("Record {} updated.", record.code),
            }
            form.reset();
        }
        Err(e) => println!("! Error saving record: {e}"),
    }
}

fn print_form(form: &FormController) {
    let mode = match form.mode() {
        Mode::Create => "create",
        Mode::Update => "update",
    };
    let fields = form.fields();
    println!("[{mode}] code={:?}", fields.code);
    println!("  name:   {:?}", fields.person_name);
    println!("  link:   {:?}", fields.link);
    println!("  desc:   {:?}", fields.description);
    println!("  status: {}", fields.status.as_str());

    let modified: Vec<_> = form.modified_fields().collect();
    if !modified.is_empty() {
        println!("  modified: {}", modified.join(", "));
    }
}

fn print_results(results: &[RecordView]) {
    if results.is_empty() {
        println!("No matches.");
        return;
    }
    for (i, record) in results.iter().enumerate() {
        println!(
            "{i}: {} {} [{}]",
            record.code,
            record.person_name,
            record.status.as_str()
        );
    }
    println!("Use `pick <n>` to load one.");
}
