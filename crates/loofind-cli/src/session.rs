//! Search sessions: one-shot commands and the interactive prompt.
//!
//! Each session owns exactly one [`SearchOrchestrator`] and makes exactly one
//! location attempt.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use loofind_core::{
    acquire_once, AppConfig, Coordinates, FixedLocation, LocationError, LocationProvider, Locale,
    PendingSearch, SearchError, SearchGateway, SearchIntent, SearchOrchestrator, SearchOutcome,
    SearchResult,
};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::task::{JoinError, JoinHandle};

use crate::locate::IpLocator;
use crate::render::{render_controls, render_json, render_outcome, render_rejection};
use crate::OutputFormat;

/// The location source chosen for this session.
pub(crate) enum SessionLocator {
    Fixed(FixedLocation),
    Ip(IpLocator),
}

impl LocationProvider for SessionLocator {
    fn name(&self) -> &'static str {
        match self {
            SessionLocator::Fixed(inner) => inner.name(),
            SessionLocator::Ip(inner) => inner.name(),
        }
    }

    async fn locate(&self) -> Result<Coordinates, LocationError> {
        match self {
            SessionLocator::Fixed(inner) => inner.locate().await,
            SessionLocator::Ip(inner) => inner.locate().await,
        }
    }
}

/// Picks the location source: explicit coordinates first, then configured
/// ones, then an IP lookup when enabled.
pub(crate) fn select_locator(
    config: &AppConfig,
    explicit: Option<Coordinates>,
    no_locate: bool,
) -> Option<SessionLocator> {
    if let Some(c) = explicit.or(config.fixed_location) {
        return Some(SessionLocator::Fixed(FixedLocation(c)));
    }
    if no_locate || !config.ip_locate_enabled {
        return None;
    }
    match IpLocator::new(&config.ip_locate_url, config.locate_timeout_secs) {
        Ok(locator) => Some(SessionLocator::Ip(locator)),
        Err(e) => {
            tracing::warn!(error = %e, "IP location lookup unavailable");
            None
        }
    }
}

/// Runs a single search and writes the outcome to `out`. A query submits
/// it as free text; without one the search is around the captured position.
///
/// Waits for the location attempt first (bounded by `locate_timeout`), since
/// there is no later moment to use it. Returns `false` when the search was
/// rejected or failed.
///
/// # Errors
///
/// Returns an error if rendering or writing the outcome fails.
pub(crate) async fn run_once<G, L, W>(
    gateway: &G,
    locale: Locale,
    locator: Option<L>,
    locate_timeout: Duration,
    query: Option<String>,
    format: OutputFormat,
    out: &mut W,
) -> anyhow::Result<bool>
where
    G: SearchGateway + ?Sized,
    L: LocationProvider,
    W: Write,
{
    let mut orchestrator = SearchOrchestrator::new(locale);

    if let Some(locator) = locator {
        if let Some(coordinates) = acquire_once(&locator, locate_timeout).await {
            orchestrator.capture_coordinates(coordinates);
        }
    }
    let intent = match query {
        Some(query) => {
            orchestrator.set_query(query);
            SearchIntent::Submit
        }
        None => SearchIntent::Nearby,
    };

    let outcome = match orchestrator.run(gateway, intent).await {
        Ok(outcome) => outcome,
        Err(rejection) => {
            eprintln!("{}", render_rejection(rejection, locale));
            return Ok(false);
        }
    };

    match format {
        OutputFormat::Text => write!(out, "{}", render_outcome(outcome, locale))?,
        OutputFormat::Json => writeln!(out, "{}", render_json(outcome)?)?,
    }
    out.flush()?;

    Ok(!matches!(outcome, SearchOutcome::Failure(_)))
}

enum Command {
    Quit,
    Nearby,
    Query(String),
    Empty,
}

fn parse_command(line: &str) -> Command {
    match line.trim() {
        "" => Command::Empty,
        "/quit" | "/exit" | "/q" => Command::Quit,
        "/nearby" | "/n" => Command::Nearby,
        text => Command::Query(text.to_string()),
    }
}

/// Waits for the in-flight search, or forever when there is none.
async fn join_in_flight(
    handle: &mut Option<JoinHandle<Result<SearchResult, SearchError>>>,
) -> Result<Result<SearchResult, SearchError>, JoinError> {
    match handle {
        Some(h) => h.await,
        None => std::future::pending().await,
    }
}

/// Interactive session: lines read from `input` are queries, `/nearby`
/// searches around the captured position, `/quit` or end of input exits.
///
/// Input keeps being read while a search runs; submissions made meanwhile
/// are ignored and leave the draft query alone. The location fix is captured
/// whenever it completes. Returns the orchestrator in its final state.
///
/// # Errors
///
/// Returns an error if reading `input` or writing `out` fails.
pub(crate) async fn run_interactive<G, L, R, W>(
    gateway: Arc<G>,
    locale: Locale,
    locator: Option<L>,
    locate_timeout: Duration,
    input: R,
    out: &mut W,
) -> anyhow::Result<SearchOrchestrator>
where
    G: SearchGateway + Send + Sync + 'static,
    L: LocationProvider,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut orchestrator = SearchOrchestrator::new(locale);

    let mut locating = locator.is_some();
    let locate = async {
        match &locator {
            Some(l) => acquire_once(l, locate_timeout).await,
            None => None,
        }
    };
    tokio::pin!(locate);

    let mut lines = input.lines();
    let mut pending: Option<PendingSearch> = None;
    let mut handle: Option<JoinHandle<Result<SearchResult, SearchError>>> = None;

    write!(out, "{}", render_outcome(orchestrator.outcome(), locale))?;
    show_prompt(out, &orchestrator)?;

    loop {
        tokio::select! {
            fix = &mut locate, if locating => {
                locating = false;
                if let Some(coordinates) = fix {
                    if orchestrator.capture_coordinates(coordinates) {
                        tracing::info!(%coordinates, "location captured");
                        show_prompt(out, &orchestrator)?;
                    }
                }
            }
            joined = join_in_flight(&mut handle), if handle.is_some() => {
                handle = None;
                let result = joined.unwrap_or_else(|e| {
                    tracing::error!(error = %e, "search task aborted");
                    Err(SearchError::search_failed(locale))
                });
                if let Some(p) = pending.take() {
                    orchestrator.resolve(p, result);
                }
                write!(out, "{}", render_outcome(orchestrator.outcome(), locale))?;
                show_prompt(out, &orchestrator)?;
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let intent = match parse_command(&line) {
                    Command::Quit => break,
                    Command::Empty => {
                        show_prompt(out, &orchestrator)?;
                        continue;
                    }
                    Command::Nearby => SearchIntent::Nearby,
                    Command::Query(text) => {
                        if !orchestrator.outcome().is_loading() {
                            orchestrator.set_query(text);
                        }
                        SearchIntent::Submit
                    }
                };
                match orchestrator.begin(intent) {
                    Ok(p) => {
                        let prompt = p.prompt().clone();
                        let gateway = Arc::clone(&gateway);
                        handle = Some(tokio::spawn(async move { gateway.search(&prompt).await }));
                        pending = Some(p);
                        write!(out, "{}", render_outcome(orchestrator.outcome(), locale))?;
                        out.flush()?;
                    }
                    Err(rejection) => {
                        writeln!(out, "{}", render_rejection(rejection, locale))?;
                        show_prompt(out, &orchestrator)?;
                    }
                }
            }
        }
    }

    if let Some(h) = handle {
        h.abort();
    }
    Ok(orchestrator)
}

fn show_prompt<W: Write>(out: &mut W, orchestrator: &SearchOrchestrator) -> std::io::Result<()> {
    writeln!(out, "{}", render_controls(orchestrator))?;
    write!(out, "> ")?;
    out.flush()
}
