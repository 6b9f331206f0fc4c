// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use clap::Parser;
use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};

use eventflux_selector::core::config::{EventFluxQueryContext, QueryPlanConfig};
use eventflux_selector::core::event::{
    AttributeValue, ComplexEventType, StreamEvent, StreamEventChunk,
};
use eventflux_selector::core::exception::{EventFluxError, EventFluxResult};
use eventflux_selector::core::query::output::{CallbackProcessor, StreamCallback};
use eventflux_selector::core::query::processor::{into_processor_ref, lock_processor, Processor};
use eventflux_selector::query_api::definition::attribute::Type as AttributeType;
use eventflux_selector::query_api::definition::StreamDefinition;

#[derive(Parser, Debug)]
#[command(about = "Run a query selector over a file of JSON events", author, version)]
struct Cli {
    /// Query plan (TOML)
    #[arg(long, short = 'p')]
    plan: PathBuf,

    /// Input events, one JSON object per line
    #[arg(long, short = 'e')]
    events: PathBuf,

    /// Number of input lines delivered to the selector per chunk
    #[arg(long, default_value_t = 16)]
    chunk_size: usize,
}

#[derive(Deserialize, Debug)]
struct InputLine {
    #[serde(rename = "type", default = "default_event_type")]
    event_type: String,
    timestamp: Option<i64>,
    data: Vec<JsonValue>,
}

fn default_event_type() -> String {
    "current".to_string()
}

/// Prints every received event as a JSON line keyed by output column name.
#[derive(Debug)]
struct PrintingCallback {
    output_names: Vec<String>,
}

impl StreamCallback for PrintingCallback {
    fn receive(&mut self, events: &[StreamEvent]) {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        for event in events {
            let data: Map<String, JsonValue> = self
                .output_names
                .iter()
                .cloned()
                .zip(event.get_output_data().iter().map(to_json))
                .collect();
            let line = serde_json::json!({
                "timestamp": event.get_timestamp(),
                "type": event.get_event_type().to_string(),
                "data": data,
            });
            if let Err(e) = writeln!(out, "{line}") {
                log::error!("failed to write output event: {e}");
            }
        }
    }
}

fn to_json(value: &AttributeValue) -> JsonValue {
    match value {
        AttributeValue::String(s) => JsonValue::from(s.as_str()),
        AttributeValue::Int(i) => JsonValue::from(*i),
        AttributeValue::Long(l) => JsonValue::from(*l),
        AttributeValue::Float(f) => JsonValue::from(*f),
        AttributeValue::Double(d) => JsonValue::from(*d),
        AttributeValue::Bool(b) => JsonValue::from(*b),
        AttributeValue::Null => JsonValue::Null,
    }
}

fn from_json(value: &JsonValue, attr_type: AttributeType) -> EventFluxResult<AttributeValue> {
    let converted = match (value, attr_type) {
        (JsonValue::Null, _) => Some(AttributeValue::Null),
        (JsonValue::String(s), AttributeType::STRING | AttributeType::OBJECT) => {
            Some(AttributeValue::String(s.clone()))
        }
        (JsonValue::Bool(b), AttributeType::BOOL | AttributeType::OBJECT) => {
            Some(AttributeValue::Bool(*b))
        }
        (JsonValue::Number(n), AttributeType::INT) => n
            .as_i64()
            .and_then(|v| i32::try_from(v).ok())
            .map(AttributeValue::Int),
        (JsonValue::Number(n), AttributeType::LONG) => n.as_i64().map(AttributeValue::Long),
        (JsonValue::Number(n), AttributeType::FLOAT) => {
            n.as_f64().map(|v| AttributeValue::Float(v as f32))
        }
        (JsonValue::Number(n), AttributeType::DOUBLE) => n.as_f64().map(AttributeValue::Double),
        (JsonValue::Number(n), AttributeType::OBJECT) => n
            .as_i64()
            .map(AttributeValue::Long)
            .or_else(|| n.as_f64().map(AttributeValue::Double)),
        _ => None,
    };
    converted.ok_or_else(|| EventFluxError::Config {
        message: format!("value {value} is not a valid {attr_type}"),
    })
}

fn parse_event(line: &str, definition: &StreamDefinition) -> EventFluxResult<StreamEvent> {
    let input: InputLine = serde_json::from_str(line).map_err(|e| EventFluxError::Config {
        message: format!("invalid event line: {e}"),
    })?;
    let attributes = definition.get_attribute_list();
    if input.data.len() != attributes.len() {
        return Err(EventFluxError::Config {
            message: format!(
                "event has {} values but stream '{}' defines {} attributes",
                input.data.len(),
                definition.id,
                attributes.len()
            ),
        });
    }
    let data = input
        .data
        .iter()
        .zip(attributes)
        .map(|(value, attr)| from_json(value, attr.get_type()))
        .collect::<EventFluxResult<Vec<_>>>()?;
    let event_type: ComplexEventType = input
        .event_type
        .parse()
        .map_err(|message| EventFluxError::Config { message })?;
    let timestamp = input
        .timestamp
        .unwrap_or_else(|| chrono::Utc::now().timestamp_millis());
    Ok(StreamEvent::new_with_data(timestamp, data).with_event_type(event_type))
}

fn run(cli: Cli) -> EventFluxResult<usize> {
    let plan = QueryPlanConfig::from_file(&cli.plan)?;
    let definition = plan.input_definition();
    let ctx = Arc::new(EventFluxQueryContext::new(
        definition.id.clone(),
        plan.query.id.clone(),
    ));

    let callback: Box<dyn StreamCallback> = Box::new(PrintingCallback {
        output_names: plan.output_names().into_iter().map(String::from).collect(),
    });
    let terminal = into_processor_ref(CallbackProcessor::new(
        Arc::new(Mutex::new(callback)),
        Arc::clone(&ctx),
    ));
    let rate_limiter = plan.build_rate_limiter(Arc::clone(&ctx), terminal)?;
    let mut selector = plan.build_selector(ctx)?;
    selector.set_next_processor(Arc::clone(&rate_limiter))?;

    let reader = BufReader::new(File::open(&cli.events)?);
    let chunk_size = cli.chunk_size.max(1);
    let mut chunk = StreamEventChunk::with_capacity(chunk_size);
    let mut delivered = 0;
    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let event = parse_event(&line, &definition).map_err(|e| EventFluxError::Config {
            message: format!("{}:{}: {e}", cli.events.display(), line_no + 1),
        })?;
        chunk.add(event);
        delivered += 1;
        if chunk.len() >= chunk_size {
            selector.process(std::mem::take(&mut chunk))?;
        }
    }
    if !chunk.is_empty() {
        selector.process(chunk)?;
    }
    lock_processor(&rate_limiter)?.flush()?;
    Ok(delivered)
}

fn main() {
    // Initialize logging from RUST_LOG environment variable
    env_logger::init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(delivered) => log::info!("processed {delivered} input events"),
        Err(e) => {
            eprintln!("run_selector failed: {e}");
            std::process::exit(1);
        }
    }
}
