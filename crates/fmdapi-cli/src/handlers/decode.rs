//! Decode command handler

use super::utils::{read_document, write_output};
use crate::cli::{DecodeArgs, OutputFormat};
use crate::config::Config;
use crate::error::Result;
use crate::logging::timing::Timer;
use crate::output::{OutputFormatter, OutputWriter};
use fmdapi_core::ResponseDecoder;
use serde_json::Value;

/// What the decode command extracts from the envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Extract {
    Response,
    Records,
    RecordIds,
}

impl Extract {
    fn from_args(args: &DecodeArgs) -> Self {
        if args.records {
            Self::Records
        } else if args.record_ids {
            Self::RecordIds
        } else {
            Self::Response
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Response => "Decoded Response",
            Self::Records => "Records",
            Self::RecordIds => "Record IDs",
        }
    }
}

/// Handle the decode command
pub fn handle_decode(args: DecodeArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    output.info(&format!("Decoding response from {}", args.input.display()))?;

    let envelope = read_document(&args.input)?;
    let decoder = build_decoder(&args, config);
    let extract = Extract::from_args(&args);

    let timer = Timer::with_details("decode", extract.label());
    let decoded = timer.span().in_scope(|| decode(&decoder, extract, &envelope))?;
    timer.finish();

    match &args.output_file {
        Some(path) => {
            let format = match output.format() {
                OutputFormat::Human => OutputFormat::JsonPretty,
                other => other,
            };
            write_output(path, &format.format(&decoded)?)?;
            output.success(&format!("✓ {} saved to {}", extract.label(), path.display()))
        }
        None => {
            output.section(extract.label())?;
            output.records(&decoded)
        }
    }
}

fn build_decoder(args: &DecodeArgs, config: &Config) -> ResponseDecoder {
    if args.skip_message_check || !config.shaping.check_messages {
        ResponseDecoder::new().skip_message_check()
    } else {
        ResponseDecoder::new()
    }
}

fn decode(decoder: &ResponseDecoder, extract: Extract, envelope: &Value) -> Result<Value> {
    let decoded = match extract {
        Extract::Response => Value::Object(decoder.decode(envelope)?),
        Extract::Records => decoder.records(envelope)?,
        Extract::RecordIds => decoder.record_ids(envelope)?,
    };
    Ok(decoded)
}
