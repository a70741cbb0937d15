//! `taskforge check` command.

use std::io::Write;
use std::path::Path;

use crate::codegen::UNKNOWN_TYPE;
use crate::config::Config;
use crate::context::ServiceContext;
use crate::model::{FieldSpec, ProblemSpec};

use super::{load_session, write_err};

/// Validate a problem and print its signature.
///
/// # Errors
///
/// Returns an error string if the problem cannot be loaded or is invalid.
pub fn run(
    ctx: &ServiceContext,
    config: &Config,
    problem: &Path,
    out: &mut dyn Write,
) -> Result<(), String> {
    let session = load_session(ctx, config, problem)?;
    let spec = session.spec();

    writeln!(out, "{} ({})", spec.task_name, spec.difficulty).map_err(write_err)?;
    writeln!(out, "Signature: {}", signature(spec)).map_err(write_err)?;
    writeln!(out, "Tests: {}", session.tests().len()).map_err(write_err)?;
    for field in spec.inputs.iter().chain(&spec.outputs) {
        if field.ty.descriptor().is_none() {
            writeln!(
                out,
                "Warning: `{}` has unsupported type `{}`; generated code uses `{UNKNOWN_TYPE}`",
                field.name, field.ty
            )
            .map_err(write_err)?;
        }
    }
    writeln!(out, "OK").map_err(write_err)
}

fn signature(spec: &ProblemSpec) -> String {
    let params: Vec<String> = spec.inputs.iter().map(describe).collect();
    let ret = spec.output().map_or_else(|| UNKNOWN_TYPE.to_string(), |f| f.ty.to_string());
    format!("{}({}) -> {ret}", spec.function_name, params.join(", "))
}

fn describe(field: &FieldSpec) -> String {
    format!("{}: {}", field.name, field.ty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{config, context, SharedFs, SUM_PROBLEM};

    #[test]
    fn prints_signature() {
        let fs = SharedFs::with(&[("p.yaml", SUM_PROBLEM)]);
        let mut out = Vec::new();
        run(&context(&fs), &config(), Path::new("p.yaml"), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "Sum of two (easy)\nSignature: sum(a: int, b: int) -> int\nTests: 0\nOK\n"
        );
    }

    #[test]
    fn warns_about_unsupported_types() {
        let problem = SUM_PROBLEM.replace("    type: int\noutputs", "    type: map<int,int>\noutputs");
        let fs = SharedFs::with(&[("p.yaml", &problem)]);
        let mut out = Vec::new();
        run(&context(&fs), &config(), Path::new("p.yaml"), &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("`b` has unsupported type `map<int,int>`"));
    }

    #[test]
    fn invalid_problem_fails() {
        let problem = SUM_PROBLEM.replace("function_name: sum", "function_name: 2sum");
        let fs = SharedFs::with(&[("p.yaml", &problem)]);
        let err = run(&context(&fs), &config(), Path::new("p.yaml"), &mut Vec::new()).unwrap_err();
        assert!(err.contains("not an identifier"));
    }
}
