//! JavaScript (Node.js) emitter. Types only appear in JSDoc.

use super::source::SourceBuilder;
use super::{call_arguments, map_field_type, output_descriptor, return_type, USER_CODE_MARKER};
use crate::model::{FieldSpec, Language, ProblemSpec, Scalar, TypeDescriptor};

const PRELUDE: &str = r"const harnessLines = require('fs').readFileSync(0, 'utf8').split('\n');
let harnessCursor = 0;

function readLine() {
    const line = harnessCursor < harnessLines.length ? harnessLines[harnessCursor] : '';
    harnessCursor += 1;
    return line.replace(/\r$/, '');
}

function splitTokens(line) {
    return line.split(/\s+/).filter((token) => token.length > 0);
}

function parseIntValue(text) {
    return parseInt(text, 10);
}

function parseFloatValue(text) {
    return parseFloat(text);
}

function parseStringValue(text) {
    return text;
}

function parseBoolValue(text) {
    return text.trim() === 'true';
}

function readList(parse) {
    const size = parseInt(readLine(), 10);
    return splitTokens(readLine()).slice(0, size).map(parse);
}

function readMatrix(parse) {
    const rows = parseInt(readLine(), 10);
    const values = [];
    for (let r = 0; r < rows; r += 1) {
        values.push(readList(parse));
    }
    return values;
}

function expandExponent(text) {
    const [mantissa, exponent] = text.split('e');
    const negative = mantissa.startsWith('-');
    const unsigned = negative ? mantissa.slice(1) : mantissa;
    const point = unsigned.indexOf('.');
    const digits = unsigned.replace('.', '');
    const whole = (point === -1 ? unsigned.length : point) + parseInt(exponent, 10);
    let plain;
    if (whole <= 0) {
        plain = '0.' + '0'.repeat(-whole) + digits;
    } else if (whole >= digits.length) {
        plain = digits + '0'.repeat(whole - digits.length);
    } else {
        plain = digits.slice(0, whole) + '.' + digits.slice(whole);
    }
    return (negative ? '-' : '') + plain;
}

function formatValue(value) {
    if (typeof value === 'number' && Number.isFinite(value)) {
        const text = String(value);
        return text.includes('e') ? expandExponent(text) : text;
    }
    return String(value);
}";

pub(super) fn stub(spec: &ProblemSpec) -> String {
    let mut out = SourceBuilder::new();
    out.line(0, "/**");
    for field in &spec.inputs {
        out.line(0, format!(" * @param {{{}}} {}", map_field_type(&field.ty, Language::JavaScript), field.name));
    }
    out.line(0, format!(" * @returns {{{}}}", return_type(spec, Language::JavaScript)))
        .line(0, " */")
        .line(0, format!("function {}({}) {{", spec.function_name, call_arguments(&spec.inputs)))
        .line(1, "// Write your solution here")
        .line(1, format!("return {};", placeholder(spec)))
        .line(0, "}");
    out.finish()
}

pub(super) fn full_program(spec: &ProblemSpec) -> String {
    let mut out = SourceBuilder::new();
    out.line(0, USER_CODE_MARKER).blank().block(0, PRELUDE).blank();

    for field in &spec.inputs {
        out.line(0, read_field(field));
    }
    out.line(
        0,
        format!("const result = {}({});", spec.function_name, call_arguments(&spec.inputs)),
    );
    match output_descriptor(spec) {
        Some(TypeDescriptor::List(_)) => {
            out.line(0, "console.log(result.map(formatValue).join(' '));")
        }
        Some(TypeDescriptor::Matrix(_)) => {
            out.line(0, "result.forEach((row) => console.log(row.map(formatValue).join(' ')));")
        }
        Some(TypeDescriptor::Scalar(_)) | None => out.line(0, "console.log(formatValue(result));"),
    };
    out.finish()
}

fn read_field(field: &FieldSpec) -> String {
    match field.ty.descriptor() {
        Some(TypeDescriptor::Scalar(s)) => {
            format!("const {} = {}(readLine());", field.name, parser(s))
        }
        Some(TypeDescriptor::List(s)) => format!("const {} = readList({});", field.name, parser(s)),
        Some(TypeDescriptor::Matrix(s)) => {
            format!("const {} = readMatrix({});", field.name, parser(s))
        }
        None => format!("const {} = unknown;", field.name),
    }
}

fn parser(scalar: Scalar) -> &'static str {
    match scalar {
        Scalar::Int => "parseIntValue",
        Scalar::Float => "parseFloatValue",
        Scalar::String => "parseStringValue",
        Scalar::Bool => "parseBoolValue",
    }
}

fn placeholder(spec: &ProblemSpec) -> &'static str {
    match output_descriptor(spec) {
        Some(TypeDescriptor::Scalar(Scalar::Int | Scalar::Float)) => "0",
        Some(TypeDescriptor::Scalar(Scalar::String)) => "''",
        Some(TypeDescriptor::Scalar(Scalar::Bool)) => "false",
        Some(TypeDescriptor::List(_) | TypeDescriptor::Matrix(_)) => "[]",
        None => "undefined",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Difficulty;

    fn problem(inputs: Vec<FieldSpec>, output: &str) -> ProblemSpec {
        ProblemSpec {
            task_name: "t".into(),
            difficulty: Difficulty::Easy,
            description: "d".into(),
            function_name: "maxDiff".into(),
            inputs,
            outputs: vec![FieldSpec::new("result", output)],
        }
    }

    #[test]
    fn stub_documents_types_in_jsdoc() {
        let spec = problem(vec![FieldSpec::new("nums", "list<int>")], "bool");
        assert_eq!(
            stub(&spec),
            "/**\n * @param {number[]} nums\n * @returns {boolean}\n */\n\
             function maxDiff(nums) {\n    // Write your solution here\n    return false;\n}\n"
        );
    }

    #[test]
    fn marker_comes_first() {
        let program = full_program(&problem(vec![FieldSpec::new("n", "int")], "int"));
        assert!(program.starts_with(USER_CODE_MARKER));
    }

    #[test]
    fn numbers_print_without_exponent() {
        let program = full_program(&problem(vec![FieldSpec::new("x", "float")], "float"));
        assert!(program.contains("console.log(formatValue(result));"));
        assert!(program.contains("text.includes('e') ? expandExponent(text) : text"));
    }

    #[test]
    fn reads_and_prints_by_shape() {
        let spec = problem(
            vec![FieldSpec::new("word", "string"), FieldSpec::new("grid", "list<list<float>>")],
            "list<string>",
        );
        let program = full_program(&spec);
        assert!(program.contains("const word = parseStringValue(readLine());"));
        assert!(program.contains("const grid = readMatrix(parseFloatValue);"));
        assert!(program.contains("const result = maxDiff(word, grid);"));
        assert!(program.contains("console.log(result.map(formatValue).join(' '));"));
    }
}
