//! The interactive insert-and-echo loop.
//!
//! A session drops the collection, then reads lines until an empty one (or
//! end of input). Every non-empty line is inserted, read back by its id and
//! echoed. Finally all stored entries are listed.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::db_mongo::models::Entry;
use crate::error::{Error, Result};
use crate::store::DocumentStore;

pub const PROMPT: &str = "Input some text:";
pub const DUMP_HEADER: &str = "That's what we have here:";

/// What a finished session did.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionReport {
    pub inserted: usize,
    pub entries: Vec<Entry>,
}

/// Run a session and close the store afterwards, whether or not the session succeeded.
///
/// A session error is returned in preference to a close error.
pub async fn run_to_completion<S, R, W>(store: S, input: R, output: W) -> Result<SessionReport>
where
    S: DocumentStore,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let outcome = run(&store, input, output).await;
    let closed = store.close().await;

    match (outcome, closed) {
        (Ok(report), Ok(())) => Ok(report),
        (Ok(_), Err(close_err)) => Err(close_err),
        (Err(session_err), Ok(())) => Err(session_err),
        (Err(session_err), Err(close_err)) => {
            tracing::warn!("Failed to close store after session error: {}", close_err);
            Err(session_err)
        }
    }
}

pub async fn run<S, R, W>(store: &S, mut input: R, mut output: W) -> Result<SessionReport>
where
    S: DocumentStore + ?Sized,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    store.drop_all().await?;

    let mut inserted = 0;
    let mut line = String::new();
    loop {
        output.write_all(format!("{PROMPT}\n").as_bytes()).await?;
        output.flush().await?;

        line.clear();
        if input.read_line(&mut line).await? == 0 {
            tracing::debug!("Input closed, ending session");
            break;
        }
        let text = strip_line_ending(&line);
        if text.is_empty() {
            break;
        }

        let id = store.insert(text).await?;
        tracing::debug!("Inserted entry {}", id);

        let entry = store
            .find_by_id(id)
            .await?
            .ok_or(Error::MissingDocument(id))?;
        output
            .write_all(format!("{}\n", entry.input).as_bytes())
            .await?;
        inserted += 1;
    }

    let entries = store.find_all().await?;
    output
        .write_all(format!("\n{DUMP_HEADER}\n").as_bytes())
        .await?;
    for entry in &entries {
        output.write_all(format!("{entry}\n").as_bytes()).await?;
    }
    output.flush().await?;

    tracing::info!(inserted, listed = entries.len(), "Session finished");
    Ok(SessionReport { inserted, entries })
}

fn strip_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}
