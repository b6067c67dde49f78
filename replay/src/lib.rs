use std::collections::HashMap;
use std::io::BufRead;

use completion_stats_core::{CompletionEvent, SessionInvariantViolation, SessionValidator};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors from the strict log-reading path.
#[derive(Error, Debug)]
pub enum ReplayError {
    #[error("failed to read log input: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed event on line {line_number}: {source}")]
    MalformedLine {
        line_number: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Parse one log line. The wire format is one internally tagged JSON object
/// per line.
pub fn parse_log_line(line: &str) -> Result<CompletionEvent, serde_json::Error> {
    serde_json::from_str(line)
}

/// Strict reading path: stops at the first unreadable or unparsable line.
/// Use [`partition_log`] when malformed lines should be set aside instead.
pub fn read_log(reader: impl BufRead) -> Result<Vec<CompletionEvent>, ReplayError> {
    let mut events = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let event = parse_log_line(&line).map_err(|source| ReplayError::MalformedLine {
            line_number: idx + 1,
            source,
        })?;
        events.push(event);
    }
    Ok(events)
}

/// All events recorded for one session, in log order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    pub session_uid: String,
    pub events: Vec<CompletionEvent>,
}

/// Outcome of classifying one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionVerdict {
    pub session_uid: String,
    pub event_count: usize,
    pub violation: Option<SessionInvariantViolation>,
}

impl SessionVerdict {
    pub fn is_valid(&self) -> bool {
        self.violation.is_none()
    }
}

/// Group a flat event log by session, preserving intra-session event order
/// and first-seen session order. A collected log interleaves sessions from
/// concurrent editors; each session's own events stay linear.
pub fn split_sessions(events: Vec<CompletionEvent>) -> Vec<SessionRecord> {
    let mut order: Vec<String> = Vec::new();
    let mut by_session: HashMap<String, Vec<CompletionEvent>> = HashMap::new();

    for event in events {
        let uid = event.session_uid().to_string();
        by_session
            .entry(uid.clone())
            .or_insert_with(|| {
                order.push(uid);
                Vec::new()
            })
            .push(event);
    }

    order
        .into_iter()
        .map(|session_uid| {
            let events = by_session.remove(&session_uid).unwrap_or_default();
            SessionRecord {
                session_uid,
                events,
            }
        })
        .collect()
}

/// Classify one session's event stream.
///
/// Two rules live here rather than in the validator, which by contract keeps
/// absorbing whatever it is fed: the stream must open with
/// `session_started`, and nothing may follow a terminal event.
pub fn classify_session(record: &SessionRecord) -> SessionVerdict {
    let violation = classify_events(&record.events);

    match &violation {
        Some(violation) => warn!(
            session_uid = %record.session_uid,
            last_sequence = ?record.events.last().map(CompletionEvent::sequence),
            %violation,
            "completion session condemned"
        ),
        None => debug!(
            session_uid = %record.session_uid,
            events = record.events.len(),
            "completion session replayed cleanly"
        ),
    }

    SessionVerdict {
        session_uid: record.session_uid.clone(),
        event_count: record.events.len(),
        violation,
    }
}

fn classify_events(events: &[CompletionEvent]) -> Option<SessionInvariantViolation> {
    let Some(CompletionEvent::SessionStarted(started)) = events.first() else {
        return Some(SessionInvariantViolation::MissingSessionStart);
    };

    let mut validator = SessionValidator::new(started);
    let mut violation: Option<SessionInvariantViolation> = None;
    let mut finalized = false;

    for event in &events[1..] {
        // Whichever breach comes first in stream order wins.
        if finalized && violation.is_none() && validator.is_session_valid() {
            violation = Some(SessionInvariantViolation::EventAfterFinalization);
        }
        if event.is_terminal() {
            finalized = true;
        }
        validator.accept(event);
    }

    violation.or_else(|| validator.first_violation().cloned())
}

/// Replay a whole multi-session log and classify every session in it.
pub fn classify_log(events: Vec<CompletionEvent>) -> Vec<SessionVerdict> {
    split_sessions(events).iter().map(classify_session).collect()
}

/// Raw log lines bucketed by what downstream analytics may consume.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LogPartition {
    /// Lines of sessions that replayed cleanly.
    pub valid: Vec<String>,
    /// Lines of condemned sessions.
    pub invalid: Vec<String>,
    /// Lines that did not parse as events. They are set aside without
    /// condemning the session the rest of the log describes.
    pub malformed: Vec<String>,
}

/// Lenient whole-log pass: parse what parses, classify per session, and
/// bucket every non-blank input line.
pub fn partition_log(input: &str) -> LogPartition {
    let mut partition = LogPartition::default();
    let mut parsed: Vec<(String, CompletionEvent)> = Vec::new();

    for line in input.lines() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_log_line(line) {
            Ok(event) => parsed.push((line.to_string(), event)),
            Err(error) => {
                warn!(%error, "dropping malformed log line");
                partition.malformed.push(line.to_string());
            }
        }
    }

    let records = split_sessions(parsed.iter().map(|(_, event)| event.clone()).collect());
    let verdicts: HashMap<String, bool> = records
        .iter()
        .map(|record| {
            (
                record.session_uid.clone(),
                classify_session(record).is_valid(),
            )
        })
        .collect();

    for (line, event) in parsed {
        if verdicts.get(event.session_uid()).copied().unwrap_or(false) {
            partition.valid.push(line);
        } else {
            partition.invalid.push(line);
        }
    }

    partition
}
