use crate::error::InputErrorKind;
use crate::prompt::Prompt;
use crate::schema::{EnumDescriptor, OneofDescriptor, ScalarType};
use crate::value::Value;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use itertools::Itertools;
use std::fmt::Display;

/// Answer that continues into a circulated field.
pub const DESCEND: &str = "descend";
/// Answer that leaves a circulated field out.
pub const STOP: &str = "stop";

/// How text typed for a `bytes` field is turned into bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BytesEncoding {
    /// The UTF-8 bytes of the line as typed.
    #[default]
    Raw,
    /// Standard base64 with padding.
    Base64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleDecision {
    Descend,
    Stop,
}

fn invalid(scalar: ScalarType, input: &str, reason: impl Display) -> InputErrorKind {
    InputErrorKind::InvalidScalarValue {
        scalar: scalar.descriptor_name(),
        input: input.to_string(),
        reason: reason.to_string(),
    }
}

macro_rules! parse_number {
    ($input:expr, $scalar:expr, $ty:ty, $variant:path) => {
        $input
            .trim()
            .parse::<$ty>()
            .map($variant)
            .map_err(|e| invalid($scalar, $input, e))
    };
}

/// Parses one line of text as a value of `scalar`.
pub fn parse_scalar(
    scalar: ScalarType,
    input: &str,
    bytes: BytesEncoding,
) -> Result<Value, InputErrorKind> {
    match scalar {
        ScalarType::Int32 | ScalarType::Sint32 | ScalarType::Sfixed32 => {
            parse_number!(input, scalar, i32, Value::Int32)
        }
        ScalarType::Int64 | ScalarType::Sint64 | ScalarType::Sfixed64 => {
            parse_number!(input, scalar, i64, Value::Int64)
        }
        ScalarType::Uint32 | ScalarType::Fixed32 => parse_number!(input, scalar, u32, Value::Uint32),
        ScalarType::Uint64 | ScalarType::Fixed64 => parse_number!(input, scalar, u64, Value::Uint64),
        ScalarType::Float => parse_number!(input, scalar, f32, Value::Float),
        ScalarType::Double => parse_number!(input, scalar, f64, Value::Double),
        ScalarType::Bool => match input.trim().to_ascii_lowercase().as_str() {
            "true" | "t" | "1" => Ok(Value::Bool(true)),
            "false" | "f" | "0" => Ok(Value::Bool(false)),
            _ => Err(invalid(scalar, input, "expected true or false")),
        },
        ScalarType::String => Ok(Value::String(input.to_string())),
        ScalarType::Bytes => match bytes {
            BytesEncoding::Raw => Ok(Value::Bytes(input.as_bytes().to_vec())),
            BytesEncoding::Base64 => STANDARD
                .decode(input.trim())
                .map(Value::Bytes)
                .map_err(|e| invalid(scalar, input, e)),
        },
    }
}

/// Reads a scalar. A blank line yields `None`.
pub(crate) fn read_scalar<P: Prompt>(
    prompt: &mut P,
    label: &str,
    scalar: ScalarType,
    bytes: BytesEncoding,
) -> Result<Option<Value>, InputErrorKind> {
    let line = prompt.read_line(label)?;
    if line.is_empty() {
        return Ok(None);
    }
    parse_scalar(scalar, &line, bytes).map(Some)
}

/// Reads an enum symbol. A blank answer yields `None`; anything else must match
/// a declared symbol exactly.
pub(crate) fn read_enum<P: Prompt>(
    prompt: &mut P,
    label: &str,
    enum_type: &EnumDescriptor,
) -> Result<Option<Value>, InputErrorKind> {
    let symbol = prompt.read_selection(label, &enum_type.symbols())?;
    if symbol.is_empty() {
        return Ok(None);
    }
    enum_type
        .value(&symbol)
        .map(|v| {
            Some(Value::Enum {
                name: v.name.clone(),
                number: v.number,
            })
        })
        .ok_or_else(|| InputErrorKind::InvalidEnumValue {
            enum_name: enum_type.full_name().to_string(),
            input: symbol,
        })
}

/// Asks which member of a oneof group to fill in.
pub(crate) fn read_oneof<P: Prompt>(
    prompt: &mut P,
    label: &str,
    oneof: &OneofDescriptor,
) -> Result<String, InputErrorKind> {
    let choice = prompt.read_selection(label, oneof.members())?;
    if oneof.members().contains(&choice) {
        Ok(choice)
    } else {
        Err(InputErrorKind::InvalidOneofSelection {
            oneof: oneof.full_name().to_string(),
            input: choice,
            expected: oneof.members().join(", "),
        })
    }
}

/// Asks whether to enter a field whose type leads back along `cycle`.
pub(crate) fn read_cycle_decision<P: Prompt>(
    prompt: &mut P,
    label: &str,
    cycle: &[String],
) -> Result<CycleDecision, InputErrorKind> {
    let question = format!(
        "{} re-enters {}; {} or {}?",
        label,
        cycle.iter().join(" -> "),
        DESCEND,
        STOP
    );
    let choices = [DESCEND.to_string(), STOP.to_string()];
    match prompt.read_selection(&question, &choices)?.as_str() {
        DESCEND => Ok(CycleDecision::Descend),
        STOP => Ok(CycleDecision::Stop),
        other => Err(InputErrorKind::InvalidChoice {
            input: other.to_string(),
            expected: choices.join(", "),
        }),
    }
}

/// Asks whether another entry should be added to a repeated or map field.
/// A blank answer means yes.
pub(crate) fn read_add_more<P: Prompt>(prompt: &mut P, label: &str) -> Result<bool, InputErrorKind> {
    let answer = prompt.read_line(&format!("{} add more? [Y/n]", label))?;
    match answer.trim().to_ascii_lowercase().as_str() {
        "" | "y" | "yes" => Ok(true),
        "n" | "no" => Ok(false),
        _ => Err(InputErrorKind::InvalidChoice {
            input: answer,
            expected: "y, n".to_string(),
        }),
    }
}
