//! Identifiers a problem may not use for its function or inputs.
//!
//! Generated programs declare their inputs as locals next to the harness
//! helpers, and call the solver's function by name. Any of these names would
//! collide with a helper, a standard-library name the harness calls, or a
//! keyword of one of the target languages.

/// Names the generated harnesses declare or call.
const HARNESS_NAMES: &[&str] = &[
    // every language
    "main", "result",
    // C++
    "read_line", "split_tokens", "parse_int", "parse_float", "parse_string", "parse_bool",
    "read_list", "read_matrix", "format_value", "print_list", "print_matrix", "std", "cout",
    "cin", "getline", "strtod", "size_t",
    // JavaScript
    "readLine", "harnessLines", "harnessCursor", "splitTokens", "parseIntValue",
    "parseFloatValue", "parseStringValue", "parseBoolValue", "readList", "readMatrix",
    "expandExponent", "formatValue", "require", "console", "parseInt", "parseFloat", "Number",
    "String", "Math", "JSON", "Object", "Array",
    // Rust
    "lines", "io", "BufRead", "harness_tokens", "harness_join", "Vec", "Default", "Some",
    "None", "Ok", "Err", "Result", "Option", "Box", "usize", "i32", "f64", "bool",
    // Java
    "Main", "args", "token", "row", "HARNESS_READER", "joinValues", "List", "ArrayList",
    "Integer", "Double", "Boolean", "Float", "System", "Collectors", "Function",
    "BufferedReader", "InputStreamReader", "IOException", "UncheckedIOException", "BigDecimal",
];

/// Keywords and reserved words of C++, JavaScript, Rust and Java.
const KEYWORDS: &[&str] = &[
    "_", "abstract", "alignas", "alignof", "and", "and_eq", "arguments", "as", "asm", "assert",
    "async", "auto", "await", "become", "bitand", "bitor", "boolean", "box", "break", "byte",
    "case", "catch", "char", "char16_t", "char32_t", "char8_t", "class", "co_await",
    "co_return", "co_yield", "compl", "concept", "const", "const_cast", "consteval",
    "constexpr", "constinit", "continue", "crate", "debugger", "decltype", "default", "delete",
    "do", "double", "dyn", "dynamic_cast", "else", "enum", "eval", "explicit", "export",
    "extends", "extern", "false", "final", "finally", "float", "fn", "for", "friend",
    "function", "goto", "if", "impl", "implements", "import", "in", "inline", "instanceof",
    "int", "interface", "let", "long", "loop", "macro", "match", "mod", "move", "mut",
    "mutable", "namespace", "native", "new", "noexcept", "not", "not_eq", "null", "nullptr",
    "operator", "or", "or_eq", "override", "package", "permits", "priv", "private",
    "protected", "pub", "record", "ref", "register", "reinterpret_cast", "requires", "return",
    "sealed", "self", "Self", "short", "signed", "sizeof", "static", "static_assert",
    "static_cast", "strictfp", "struct", "super", "switch", "synchronized", "template", "this",
    "thread_local", "throw", "throws", "trait", "transient", "true", "try", "type", "typedef",
    "typeid", "typename", "typeof", "undefined", "union", "unsafe", "unsigned", "unsized",
    "use", "using", "var", "virtual", "void", "volatile", "wchar_t", "where", "while", "with",
    "xor", "xor_eq", "yield", "NaN", "Infinity",
];

/// True when `name` cannot be used as a function or input name.
pub(crate) fn is_reserved(name: &str) -> bool {
    HARNESS_NAMES.contains(&name) || KEYWORDS.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn harness_helpers_and_keywords_are_reserved() {
        let names = ["read_line", "readLine", "HARNESS_READER", "lines", "class", "fn", "new", "let"];
        for name in names.into_iter().chain(["main", "token", "formatValue", "size_t"]) {
            assert!(is_reserved(name), "{name}");
        }
    }

    #[test]
    fn ordinary_names_are_free() {
        for name in ["nums", "target", "grid", "two_sum", "maxDiff", "n", "s", "words"] {
            assert!(!is_reserved(name), "{name}");
        }
    }
}
