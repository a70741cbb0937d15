//! Rust emitter.

use super::source::SourceBuilder;
use super::{call_arguments, map_field_type, output_descriptor, return_type, USER_CODE_MARKER};
use crate::model::{FieldSpec, Language, ProblemSpec, Scalar, TypeDescriptor};

const HELPERS: &str = r#"#[allow(dead_code)]
fn harness_tokens<T>(line: &str, size: usize) -> Vec<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Debug,
{
    line.split_whitespace().take(size).map(|token| token.parse().unwrap()).collect()
}

#[allow(dead_code)]
fn harness_join<T: std::fmt::Display>(values: &[T]) -> String {
    values.iter().map(|value| value.to_string()).collect::<Vec<_>>().join(" ")
}"#;

pub(super) fn stub(spec: &ProblemSpec) -> String {
    let params = spec
        .inputs
        .iter()
        .map(|field| format!("{}: {}", field.name, map_field_type(&field.ty, Language::Rust)))
        .collect::<Vec<_>>()
        .join(", ");

    let mut out = SourceBuilder::new();
    out.line(
        0,
        format!("fn {}({params}) -> {} {{", spec.function_name, return_type(spec, Language::Rust)),
    )
    .line(1, "// Write your solution here")
    .line(1, "Default::default()")
    .line(0, "}");
    out.finish()
}

pub(super) fn full_program(spec: &ProblemSpec) -> String {
    let mut out = SourceBuilder::new();
    out.line(0, "use std::io::{self, BufRead};")
        .blank()
        .line(0, USER_CODE_MARKER)
        .blank()
        .block(0, HELPERS)
        .blank();

    out.line(0, "fn main() {")
        .line(1, "let mut lines = io::stdin().lock().lines();")
        .line(1, "let mut read_line = move || -> String {")
        .line(2, "let line = lines.next().and_then(Result::ok).unwrap_or_default();")
        .line(2, "line.trim_end_matches('\\r').to_string()")
        .line(1, "};");
    for field in &spec.inputs {
        read_field(&mut out, field);
    }
    out.line(
        1,
        format!("let result = {}({});", spec.function_name, call_arguments(&spec.inputs)),
    );
    match output_descriptor(spec) {
        Some(TypeDescriptor::List(_)) => out.line(1, "println!(\"{}\", harness_join(&result));"),
        Some(TypeDescriptor::Matrix(_)) => out
            .line(1, "for row in &result {")
            .line(2, "println!(\"{}\", harness_join(row));")
            .line(1, "}"),
        Some(TypeDescriptor::Scalar(_)) | None => out.line(1, "println!(\"{}\", result);"),
    };
    out.line(0, "}");
    out.finish()
}

fn read_field(out: &mut SourceBuilder, field: &FieldSpec) {
    let ty = map_field_type(&field.ty, Language::Rust);
    let name = &field.name;
    match field.ty.descriptor() {
        Some(TypeDescriptor::Scalar(Scalar::String)) => {
            out.line(1, format!("let {name}: {ty} = read_line();"));
        }
        Some(TypeDescriptor::Scalar(_)) => {
            out.line(1, format!("let {name}: {ty} = read_line().trim().parse().unwrap();"));
        }
        Some(TypeDescriptor::List(_)) => {
            out.line(1, format!("let {name}: {ty} = {{"))
                .line(2, "let len: usize = read_line().trim().parse().unwrap();")
                .line(2, "harness_tokens(&read_line(), len)")
                .line(1, "};");
        }
        Some(TypeDescriptor::Matrix(_)) => {
            out.line(1, format!("let {name}: {ty} = {{"))
                .line(2, "let rows: usize = read_line().trim().parse().unwrap();")
                .line(2, "(0..rows)")
                .line(3, ".map(|_| {")
                .line(4, "let len: usize = read_line().trim().parse().unwrap();")
                .line(4, "harness_tokens(&read_line(), len)")
                .line(3, "})")
                .line(3, ".collect()")
                .line(1, "};");
        }
        None => {
            out.line(1, format!("let {name}: {ty} = read_line();"));
        }
    }
}
