//! Rendering JSON values into the line protocol read by generated harnesses.

use serde_json::{Number, Value};

use crate::error::{TaskforgeError, TaskforgeResult};
use crate::model::{FieldSpec, TypeDescriptor};

/// Serializes a test input into stdin, one protocol line per `\n`.
///
/// Fields are written in declaration order. `input` may be an object keyed by
/// field name or an array holding the values positionally.
///
/// # Errors
///
/// [`TaskforgeError::MalformedTestData`] for a missing field or a value whose
/// shape does not match the declared type.
pub fn serialize_input(input: &Value, fields: &[FieldSpec]) -> TaskforgeResult<String> {
    let mut lines = Vec::new();
    for (i, field) in fields.iter().enumerate() {
        let value = match input {
            Value::Object(map) => map.get(&field.name),
            Value::Array(values) => values.get(i),
            _ => return Err(malformed("test input must be an object or an array")),
        }
        .ok_or_else(|| malformed(format!("test input is missing field `{}`", field.name)))?;

        match field.ty.descriptor() {
            Some(ty) => write_typed(&mut lines, &field.name, ty, value)?,
            None => write_by_shape(&mut lines, &field.name, value)?,
        }
    }

    let mut stdin = String::new();
    for line in lines {
        stdin.push_str(&line);
        stdin.push('\n');
    }
    Ok(stdin)
}

/// Renders the expected output in the form the harness prints it.
///
/// A single-key object is unwrapped to its value first. Lists are
/// space-separated, nested lists print one row per line and any other object
/// is rendered as compact JSON.
///
/// # Errors
///
/// [`TaskforgeError::MalformedTestData`] for a string containing a newline
/// where a list element is expected.
pub fn normalize_expected(value: &Value) -> TaskforgeResult<String> {
    let value = match value {
        Value::Object(map) if map.len() == 1 => map.values().next().unwrap_or(value),
        other => other,
    };
    match value {
        Value::Array(items) if items.iter().any(Value::is_array) => {
            let rows = items
                .iter()
                .map(|row| match row {
                    Value::Array(elements) => join_elements("expected output", elements),
                    scalar => render_element("expected output", scalar),
                })
                .collect::<TaskforgeResult<Vec<_>>>()?;
            Ok(rows.join("\n"))
        }
        Value::Array(items) => join_elements("expected output", items),
        Value::Object(_) => Ok(value.to_string()),
        scalar => Ok(render_scalar(scalar)),
    }
}

fn write_typed(
    lines: &mut Vec<String>,
    name: &str,
    ty: TypeDescriptor,
    value: &Value,
) -> TaskforgeResult<()> {
    match ty {
        TypeDescriptor::Scalar(_) => {
            if value.is_array() || value.is_object() {
                return Err(malformed(format!("field `{name}` is declared {ty} but holds {value}")));
            }
            lines.push(scalar_line(name, value)?);
        }
        TypeDescriptor::List(_) => {
            let items = as_list(name, ty, value)?;
            write_list(lines, name, items)?;
        }
        TypeDescriptor::Matrix(_) => {
            let rows = as_list(name, ty, value)?;
            lines.push(rows.len().to_string());
            for row in rows {
                let items = as_list(name, ty, row)?;
                write_list(lines, name, items)?;
            }
        }
    }
    Ok(())
}

/// Fallback for undeclared types: follow the value itself.
fn write_by_shape(lines: &mut Vec<String>, name: &str, value: &Value) -> TaskforgeResult<()> {
    match value {
        Value::Array(rows) if rows.iter().all(Value::is_array) && !rows.is_empty() => {
            lines.push(rows.len().to_string());
            for row in rows {
                if let Value::Array(items) = row {
                    write_list(lines, name, items)?;
                }
            }
        }
        Value::Array(items) => write_list(lines, name, items)?,
        Value::Object(_) => lines.push(value.to_string()),
        scalar => lines.push(scalar_line(name, scalar)?),
    }
    Ok(())
}

fn write_list(lines: &mut Vec<String>, name: &str, items: &[Value]) -> TaskforgeResult<()> {
    // Readers split the elements line on whitespace.
    if let Some(item) = items.iter().find(|item| !is_single_token(item)) {
        return Err(malformed(format!(
            "field `{name}` has list element {item} that is empty or contains whitespace"
        )));
    }
    lines.push(items.len().to_string());
    lines.push(join_elements(name, items)?);
    Ok(())
}

fn is_single_token(item: &Value) -> bool {
    match item {
        Value::String(text) => !text.is_empty() && !text.chars().any(char::is_whitespace),
        Value::Null => false,
        _ => true,
    }
}

fn as_list<'v>(name: &str, ty: TypeDescriptor, value: &'v Value) -> TaskforgeResult<&'v [Value]> {
    value
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| malformed(format!("field `{name}` is declared {ty} but holds {value}")))
}

fn join_elements(name: &str, items: &[Value]) -> TaskforgeResult<String> {
    let rendered = items
        .iter()
        .map(|item| render_element(name, item))
        .collect::<TaskforgeResult<Vec<_>>>()?;
    Ok(rendered.join(" "))
}

fn render_element(name: &str, item: &Value) -> TaskforgeResult<String> {
    match item {
        Value::Array(_) | Value::Object(_) => {
            Err(malformed(format!("field `{name}` nests deeper than two levels: {item}")))
        }
        scalar => scalar_line(name, scalar),
    }
}

fn scalar_line(name: &str, value: &Value) -> TaskforgeResult<String> {
    let rendered = render_scalar(value);
    if rendered.contains('\n') {
        return Err(malformed(format!("field `{name}` contains a line break")));
    }
    Ok(rendered)
}

fn render_scalar(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(flag) => flag.to_string(),
        Value::String(text) => text.clone(),
        Value::Number(number) => render_number(number),
        compound => compound.to_string(),
    }
}

/// Integers as written; floats in the shortest fixed-point form that reads
/// back as the same `f64`, with no trailing `.0`. Every harness prints
/// floats this way.
fn render_number(number: &Number) -> String {
    match number.as_f64() {
        Some(float) if number.is_f64() => format!("{float}"),
        _ => number.to_string(),
    }
}

fn malformed(message: impl Into<String>) -> TaskforgeError {
    TaskforgeError::MalformedTestData(message.into())
}
