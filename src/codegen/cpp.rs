//! C++ emitter.

use super::source::SourceBuilder;
use super::{call_arguments, map_field_type, output_descriptor, return_type, USER_CODE_MARKER};
use crate::model::{FieldSpec, Language, ProblemSpec, Scalar, TypeDescriptor};

const PRELUDE: &str = r#"#include <algorithm>
#include <cstdlib>
#include <iomanip>
#include <iostream>
#include <sstream>
#include <string>
#include <vector>

static std::string read_line() {
    std::string line;
    std::getline(std::cin, line);
    if (!line.empty() && line.back() == '\r') {
        line.pop_back();
    }
    return line;
}

static std::vector<std::string> split_tokens(const std::string& line) {
    std::istringstream stream(line);
    std::vector<std::string> tokens;
    std::string token;
    while (stream >> token) {
        tokens.push_back(token);
    }
    return tokens;
}

static int parse_int(const std::string& text) { return std::stoi(text); }

static double parse_float(const std::string& text) { return std::stod(text); }

static std::string parse_string(const std::string& text) { return text; }

static bool parse_bool(const std::string& text) {
    std::vector<std::string> tokens = split_tokens(text);
    return !tokens.empty() && (tokens[0] == "true" || tokens[0] == "1");
}

template <typename T>
static std::vector<T> read_list(T (*parse)(const std::string&)) {
    std::size_t size = static_cast<std::size_t>(std::stoi(read_line()));
    std::vector<std::string> tokens = split_tokens(read_line());
    std::vector<T> values;
    for (std::size_t i = 0; i < size && i < tokens.size(); ++i) {
        values.push_back(parse(tokens[i]));
    }
    return values;
}

template <typename T>
static std::vector<std::vector<T>> read_matrix(T (*parse)(const std::string&)) {
    std::size_t rows = static_cast<std::size_t>(std::stoi(read_line()));
    std::vector<std::vector<T>> values;
    for (std::size_t r = 0; r < rows; ++r) {
        values.push_back(read_list<T>(parse));
    }
    return values;
}

template <typename T>
static std::string format_value(const T& value) {
    std::ostringstream out;
    out << std::boolalpha << value;
    return out.str();
}

// Fewest fixed-point decimals that read back as the same double.
static std::string format_value(double value) {
    std::ostringstream out;
    for (int decimals = 0; decimals <= 1100; ++decimals) {
        out.str("");
        out << std::fixed << std::setprecision(decimals) << value;
        if (std::strtod(out.str().c_str(), nullptr) == value) {
            break;
        }
    }
    return out.str();
}

template <typename T>
static void print_list(const std::vector<T>& values) {
    for (std::size_t i = 0; i < values.size(); ++i) {
        if (i > 0) {
            std::cout << ' ';
        }
        std::cout << format_value(values[i]);
    }
    std::cout << '\n';
}

template <typename T>
static void print_matrix(const std::vector<std::vector<T>>& rows) {
    for (const auto& row : rows) {
        print_list(row);
    }
}"#;

pub(super) fn stub(spec: &ProblemSpec) -> String {
    let params = spec
        .inputs
        .iter()
        .map(|field| format!("{} {}", map_field_type(&field.ty, Language::Cpp), field.name))
        .collect::<Vec<_>>()
        .join(", ");

    let mut out = SourceBuilder::new();
    out.line(0, format!("{} {}({params}) {{", return_type(spec, Language::Cpp), spec.function_name))
        .line(1, "// Write your solution here")
        .line(1, "return {};")
        .line(0, "}");
    out.finish()
}

pub(super) fn full_program(spec: &ProblemSpec) -> String {
    let mut out = SourceBuilder::new();
    out.block(0, PRELUDE).blank().line(0, USER_CODE_MARKER).blank();

    out.line(0, "int main() {");
    for field in &spec.inputs {
        out.line(1, read_field(field));
    }
    out.line(
        1,
        format!(
            "{} result = {}({});",
            return_type(spec, Language::Cpp),
            spec.function_name,
            call_arguments(&spec.inputs)
        ),
    );
    out.line(
        1,
        match output_descriptor(spec) {
            Some(TypeDescriptor::List(_)) => "print_list(result);",
            Some(TypeDescriptor::Matrix(_)) => "print_matrix(result);",
            Some(TypeDescriptor::Scalar(_)) | None => "std::cout << format_value(result) << '\\n';",
        },
    );
    out.line(1, "return 0;").line(0, "}");
    out.finish()
}

fn read_field(field: &FieldSpec) -> String {
    let ty = map_field_type(&field.ty, Language::Cpp);
    match field.ty.descriptor() {
        Some(TypeDescriptor::Scalar(s)) => {
            format!("{ty} {} = parse_{}(read_line());", field.name, s.name())
        }
        Some(TypeDescriptor::List(s)) => format!(
            "{ty} {} = read_list<{}>(parse_{});",
            field.name,
            element_type(s),
            s.name()
        ),
        Some(TypeDescriptor::Matrix(s)) => format!(
            "{ty} {} = read_matrix<{}>(parse_{});",
            field.name,
            element_type(s),
            s.name()
        ),
        None => format!("{ty} {};", field.name),
    }
}

fn element_type(scalar: Scalar) -> &'static str {
    super::map_type(TypeDescriptor::Scalar(scalar), Language::Cpp)
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
            function_name: "two_sum".into(),
            inputs,
            outputs: vec![FieldSpec::new("result", output)],
        }
    }

    #[test]
    fn stub_has_typed_signature_and_default_return() {
        let spec = problem(vec![FieldSpec::new("nums", "list<int>"), FieldSpec::new("target", "int")], "int");
        assert_eq!(
            stub(&spec),
            "int two_sum(std::vector<int> nums, int target) {\n    // Write your solution here\n    return {};\n}\n"
        );
    }

    #[test]
    fn reads_each_field_in_declaration_order() {
        let spec = problem(
            vec![
                FieldSpec::new("n", "int"),
                FieldSpec::new("arr", "list<int>"),
                FieldSpec::new("grid", "list<list<bool>>"),
            ],
            "int",
        );
        let program = full_program(&spec);
        let n = program.find("int n = parse_int(read_line());").unwrap();
        let arr = program.find("std::vector<int> arr = read_list<int>(parse_int);").unwrap();
        let grid = program
            .find("std::vector<std::vector<bool>> grid = read_matrix<bool>(parse_bool);")
            .unwrap();
        assert!(n < arr && arr < grid);
        assert!(program.contains("int result = two_sum(n, arr, grid);"));
    }

    #[test]
    fn floats_are_doubles_printed_in_shortest_fixed_form() {
        let program = full_program(&problem(vec![FieldSpec::new("x", "float")], "float"));
        assert!(program.contains("double x = parse_float(read_line());"));
        assert!(program.contains("double result = two_sum(x);"));
        assert!(program.contains("std::cout << format_value(result) << '\\n';"));
        assert!(program.contains("static std::string format_value(double value)"));
        assert!(!program.contains("stof"));
    }

    #[test]
    fn matrix_output_is_dumped_row_major() {
        let program = full_program(&problem(vec![FieldSpec::new("n", "int")], "list<list<int>>"));
        assert!(program.contains("print_matrix(result);"));
    }

    #[test]
    fn marker_sits_between_helpers_and_main() {
        let program = full_program(&problem(vec![], "int"));
        let marker = program.find(USER_CODE_MARKER).unwrap();
        assert!(program.find("print_matrix(const").unwrap() < marker);
        assert!(marker < program.find("int main()").unwrap());
    }
}
