//! Java emitter. Everything lives inside `public class Main`.

use super::source::SourceBuilder;
use super::{call_arguments, map_field_type, output_descriptor, return_type, USER_CODE_MARKER};
use crate::model::{FieldSpec, Language, ProblemSpec, Scalar, TypeDescriptor};

const IMPORTS: &str = "import java.io.BufferedReader;
import java.io.IOException;
import java.io.InputStreamReader;
import java.io.UncheckedIOException;
import java.math.BigDecimal;
import java.util.*;
import java.util.function.Function;
import java.util.stream.Collectors;";

const HELPERS: &str = r#"private static final BufferedReader HARNESS_READER =
    new BufferedReader(new InputStreamReader(System.in));

private static String readLine() {
    try {
        String line = HARNESS_READER.readLine();
        return line == null ? "" : line;
    } catch (IOException e) {
        throw new UncheckedIOException(e);
    }
}

private static <T> List<T> readList(Function<String, T> parse) {
    int size = Integer.parseInt(readLine().trim());
    List<T> values = new ArrayList<>();
    for (String token : readLine().trim().split("\\s+")) {
        if (!token.isEmpty() && values.size() < size) {
            values.add(parse.apply(token));
        }
    }
    return values;
}

private static <T> List<List<T>> readMatrix(Function<String, T> parse) {
    int rows = Integer.parseInt(readLine().trim());
    List<List<T>> values = new ArrayList<>();
    for (int r = 0; r < rows; r++) {
        values.add(readList(parse));
    }
    return values;
}

private static String formatValue(Object value) {
    if (value instanceof Double && Double.isFinite((Double) value)) {
        return new BigDecimal(value.toString()).stripTrailingZeros().toPlainString();
    }
    return String.valueOf(value);
}

private static String joinValues(List<?> values) {
    return values.stream().map(Main::formatValue).collect(Collectors.joining(" "));
}"#;

pub(super) fn stub(spec: &ProblemSpec) -> String {
    let params = spec
        .inputs
        .iter()
        .map(|field| format!("{} {}", map_field_type(&field.ty, Language::Java), field.name))
        .collect::<Vec<_>>()
        .join(", ");

    let mut out = SourceBuilder::new();
    out.line(
        0,
        format!(
            "public static {} {}({params}) {{",
            return_type(spec, Language::Java),
            spec.function_name
        ),
    )
    .line(1, "// Write your solution here")
    .line(1, format!("return {};", placeholder(spec)))
    .line(0, "}");
    out.finish()
}

pub(super) fn full_program(spec: &ProblemSpec) -> String {
    let mut out = SourceBuilder::new();
    out.block(0, IMPORTS)
        .blank()
        .line(0, "public class Main {")
        .blank()
        .line(1, USER_CODE_MARKER)
        .blank()
        .block(1, HELPERS)
        .blank();

    out.line(1, "public static void main(String[] args) {");
    for field in &spec.inputs {
        out.line(2, read_field(field));
    }
    out.line(
        2,
        format!(
            "{} result = {}({});",
            return_type(spec, Language::Java),
            spec.function_name,
            call_arguments(&spec.inputs)
        ),
    );
    match output_descriptor(spec) {
        Some(TypeDescriptor::List(_)) => out.line(2, "System.out.println(joinValues(result));"),
        Some(TypeDescriptor::Matrix(_)) => out
            .line(2, "for (List<?> row : result) {")
            .line(3, "System.out.println(joinValues(row));")
            .line(2, "}"),
        Some(TypeDescriptor::Scalar(_)) | None => {
            out.line(2, "System.out.println(formatValue(result));")
        }
    };
    out.line(1, "}").line(0, "}");
    out.finish()
}

fn read_field(field: &FieldSpec) -> String {
    let ty = map_field_type(&field.ty, Language::Java);
    let name = &field.name;
    match field.ty.descriptor() {
        Some(TypeDescriptor::Scalar(Scalar::String)) => format!("{ty} {name} = readLine();"),
        Some(TypeDescriptor::Scalar(s)) => {
            format!("{ty} {name} = {}(readLine().trim());", scalar_parser(s))
        }
        Some(TypeDescriptor::List(s)) => format!("{ty} {name} = readList({});", element_parser(s)),
        Some(TypeDescriptor::Matrix(s)) => {
            format!("{ty} {name} = readMatrix({});", element_parser(s))
        }
        None => format!("{ty} {name} = null;"),
    }
}

fn scalar_parser(scalar: Scalar) -> &'static str {
    match scalar {
        Scalar::Int => "Integer.parseInt",
        Scalar::Float => "Double.parseDouble",
        Scalar::String => "String.valueOf",
        Scalar::Bool => "Boolean.parseBoolean",
    }
}

fn element_parser(scalar: Scalar) -> &'static str {
    match scalar {
        Scalar::Int => "Integer::parseInt",
        Scalar::Float => "Double::parseDouble",
        Scalar::String => "token -> token",
        Scalar::Bool => "Boolean::parseBoolean",
    }
}

fn placeholder(spec: &ProblemSpec) -> &'static str {
    match output_descriptor(spec) {
        Some(TypeDescriptor::Scalar(Scalar::Int)) => "0",
        Some(TypeDescriptor::Scalar(Scalar::Float)) => "0.0",
        Some(TypeDescriptor::Scalar(Scalar::String)) => "\"\"",
        Some(TypeDescriptor::Scalar(Scalar::Bool)) => "false",
        Some(TypeDescriptor::List(_) | TypeDescriptor::Matrix(_)) => "new ArrayList<>()",
        None => "null",
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
            function_name: "solve".into(),
            inputs,
            outputs: vec![FieldSpec::new("result", output)],
        }
    }

    #[test]
    fn stub_is_a_static_method() {
        let spec = problem(vec![FieldSpec::new("words", "list<string>")], "list<int>");
        assert_eq!(
            stub(&spec),
            "public static List<Integer> solve(List<String> words) {\n    \
             // Write your solution here\n    return new ArrayList<>();\n}\n"
        );
    }

    #[test]
    fn marker_is_inside_main_class() {
        let program = full_program(&problem(vec![], "int"));
        let class = program.find("public class Main {").unwrap();
        let marker = program.find(USER_CODE_MARKER).unwrap();
        let main = program.find("public static void main").unwrap();
        assert!(class < marker && marker < main);
        assert!(program.contains("    ##USER_CODE_HERE##\n"));
    }

    #[test]
    fn doubles_print_without_trailing_zeros() {
        let program = full_program(&problem(vec![FieldSpec::new("x", "float")], "float"));
        assert!(program.contains("double x = Double.parseDouble(readLine().trim());"));
        assert!(program.contains("System.out.println(formatValue(result));"));
        assert!(program.contains("stripTrailingZeros().toPlainString()"));
        assert!(stub(&problem(vec![], "float")).contains("return 0.0;"));
    }

    #[test]
    fn reads_scalars_lists_and_matrices() {
        let spec = problem(
            vec![
                FieldSpec::new("flag", "bool"),
                FieldSpec::new("nums", "list<float>"),
                FieldSpec::new("board", "list<list<string>>"),
            ],
            "list<list<int>>",
        );
        let program = full_program(&spec);
        assert!(program.contains("boolean flag = Boolean.parseBoolean(readLine().trim());"));
        assert!(program.contains("List<Double> nums = readList(Double::parseDouble);"));
        assert!(program.contains("List<List<String>> board = readMatrix(token -> token);"));
        assert!(program.contains("List<List<Integer>> result = solve(flag, nums, board);"));
        assert!(program.contains("for (List<?> row : result) {"));
    }
}
