// retag/src/commands/process.rs
//! Process command implementation: one batch of JSON-line records through
//! the rewrite stage.
//!
//! Input framing: each non-empty line is a JSON object of record fields.
//! A `time` field holding an RFC 3339 string becomes the event timestamp
//! (records without one are stamped on arrival); every other field is
//! stringified into the record. Emitted records are written as JSON lines
//! of the form `{"tag": ..., "time": ..., "record": {...}}`.

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::Serialize;
use std::fs;
use std::io::{self, BufRead, BufReader, Read, Write};

use retag_core::{BatchProcessor, Event, Record, RewriteConfig, Router};

use crate::cli::ProcessCommand;

/// One emitted triple in the CLI's output framing.
#[derive(Debug, Serialize)]
struct EmittedLine<'a> {
    tag: &'a str,
    time: DateTime<Utc>,
    record: &'a Record,
}

/// A router that writes each emitted record as one JSON line.
struct JsonLineRouter<W: Write> {
    writer: W,
}

impl<W: Write> Router for JsonLineRouter<W> {
    fn emit(&mut self, tag: &str, time: DateTime<Utc>, record: Record) -> Result<()> {
        let line = serde_json::to_string(&EmittedLine {
            tag,
            time,
            record: &record,
        })
        .context("Failed to serialize emitted record")?;
        writeln!(self.writer, "{line}").context("Failed to write emitted record")?;
        Ok(())
    }
}

pub fn run(cmd: ProcessCommand) -> Result<()> {
    let config = RewriteConfig::load_from_file(&cmd.config)?;
    let processor = BatchProcessor::new(&config)?;

    let reader: Box<dyn Read> = match &cmd.input_file {
        Some(path) => Box::new(
            fs::File::open(path)
                .with_context(|| format!("Failed to open input file: {}", path.display()))?,
        ),
        None => Box::new(io::stdin()),
    };
    let events = read_events(BufReader::new(reader))?;
    debug!("Read {} record(s) for tag '{}'.", events.len(), cmd.tag);

    let outcome = match &cmd.output {
        Some(path) => {
            let file = fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            let mut router = JsonLineRouter { writer: file };
            processor.process_batch(&cmd.tag, events, &mut router)?
        }
        None => {
            let stdout = io::stdout();
            let mut router = JsonLineRouter {
                writer: stdout.lock(),
            };
            processor.process_batch(&cmd.tag, events, &mut router)?
        }
    };

    info!(
        "Batch complete: {} emitted, {} suppressed.",
        outcome.emitted, outcome.suppressed
    );
    Ok(())
}

fn read_events(reader: impl BufRead) -> Result<Vec<Event>> {
    let mut events = Vec::new();
    for (number, line) in reader.lines().enumerate() {
        let line = line.context("Failed to read input line")?;
        if line.trim().is_empty() {
            continue;
        }
        let event = parse_event(&line)
            .with_context(|| format!("Invalid record on input line {}", number + 1))?;
        events.push(event);
    }
    Ok(events)
}

fn parse_event(line: &str) -> Result<Event> {
    let value: serde_json::Value =
        serde_json::from_str(line).context("Input line is not valid JSON")?;
    let object = value
        .as_object()
        .ok_or_else(|| anyhow!("Input line is not a JSON object"))?;

    let mut time = Utc::now();
    let mut record = Record::new();

    for (key, value) in object {
        if key == "time" {
            if let Some(text) = value.as_str() {
                time = DateTime::parse_from_rfc3339(text)
                    .context("Invalid RFC 3339 timestamp in 'time' field")?
                    .with_timezone(&Utc);
                continue;
            }
        }
        let text = match value {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        record.set(key.clone(), text);
    }

    Ok(Event { time, record })
}
