//! Problem persistence: the YAML problem document and the exported problem
//! directory.
//!
//! All I/O goes through the [`FileSystem`] port so the store works with live,
//! recording and replaying adapters. Export layout:
//!
//! ```text
//! <out>/<function_name>/
//!   ├── Problem.md
//!   ├── Structure.md
//!   ├── inputs/<i>.txt
//!   ├── outputs/<i>.txt
//!   ├── boilerplate/function.<ext>
//!   └── boilerplate-full/function.<ext>
//! ```

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::codegen::BoilerplateSet;
use crate::error::{TaskforgeError, TaskforgeResult};
use crate::model::{ProblemSpec, TypePolicy};
use crate::ports::FileSystem;
use crate::testcase::NormalizedTestCase;

/// A problem definition plus its normalized tests, as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemDocument {
    /// The problem signature and statement.
    #[serde(flatten)]
    pub spec: ProblemSpec,
    /// Judge-ready test cases.
    #[serde(default)]
    pub tests: Vec<NormalizedTestCase>,
}

/// Loads, saves and exports problem documents.
pub struct ProblemStore<'a> {
    fs: &'a dyn FileSystem,
}

impl<'a> ProblemStore<'a> {
    /// Creates a store over the given filesystem.
    #[must_use]
    pub fn new(fs: &'a dyn FileSystem) -> Self {
        Self { fs }
    }

    /// Reads a YAML problem document.
    ///
    /// # Errors
    ///
    /// [`TaskforgeError::Storage`] if the file cannot be read or parsed.
    pub fn load(&self, path: &Path) -> TaskforgeResult<ProblemDocument> {
        let contents = self.fs.read_to_string(path).map_err(|e| {
            TaskforgeError::Storage(format!("Failed to read problem {}: {e}", path.display()))
        })?;
        serde_yaml::from_str(&contents).map_err(|e| {
            TaskforgeError::Storage(format!("Failed to parse problem {}: {e}", path.display()))
        })
    }

    /// Writes `doc` as YAML to `path`.
    ///
    /// # Errors
    ///
    /// [`TaskforgeError::Storage`] if serialization or the write fails.
    pub fn save(&self, path: &Path, doc: &ProblemDocument) -> TaskforgeResult<()> {
        let yaml = serde_yaml::to_string(doc).map_err(|e| {
            TaskforgeError::Storage(format!("Failed to serialize problem {}: {e}", doc.spec.task_name))
        })?;
        self.write(path, &yaml)
    }

    /// Writes the problem directory under `out_dir` and returns its path.
    ///
    /// # Errors
    ///
    /// [`TaskforgeError::InvalidProblem`] if the problem does not validate,
    /// [`TaskforgeError::Storage`] if any write fails.
    pub fn export(
        &self,
        doc: &ProblemDocument,
        boilerplate: &BoilerplateSet,
        out_dir: &Path,
    ) -> TaskforgeResult<PathBuf> {
        doc.spec.validate(TypePolicy::Sentinel)?;
        let root = out_dir.join(&doc.spec.function_name);

        self.write(&root.join("Problem.md"), &doc.spec.description)?;
        self.write(&root.join("Structure.md"), &structure_markdown(&doc.spec))?;
        for (i, test) in doc.tests.iter().enumerate() {
            let name = format!("{i}.txt");
            self.write(&root.join("inputs").join(&name), &test.stdin)?;
            self.write(&root.join("outputs").join(&name), &test.expected_output)?;
        }
        for (language, artifacts) in boilerplate.iter() {
            let file = language.source_file_name();
            self.write(&root.join("boilerplate").join(file), &artifacts.stub)?;
            self.write(&root.join("boilerplate-full").join(file), &artifacts.full_program)?;
        }

        info!(dir = %root.display(), tests = doc.tests.len(), "problem exported");
        Ok(root)
    }

    fn write(&self, path: &Path, contents: &str) -> TaskforgeResult<()> {
        self.fs.write(path, contents).map_err(|e| {
            TaskforgeError::Storage(format!("Failed to write {}: {e}", path.display()))
        })
    }
}

/// `Structure.md`: one line per header and field, no trailing newline.
fn structure_markdown(spec: &ProblemSpec) -> String {
    let mut text = String::new();
    let _ = writeln!(text, "Problem Name: {}", spec.task_name);
    let _ = writeln!(text, "Function Name: {}", spec.function_name);
    text.push_str("Input Structure:\n");
    for field in &spec.inputs {
        let _ = writeln!(text, "Input Field: {} {}", field.ty, field.name);
    }
    text.push_str("Output Structure:");
    for field in &spec.outputs {
        let _ = write!(text, "\nOutput Field: {} {}", field.ty, field.name);
    }
    text
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::error::Error;
    use std::sync::Mutex;

    use super::*;
    use crate::codegen::{generate_boilerplate, USER_CODE_MARKER};
    use crate::model::{Difficulty, FieldSpec};

    /// In-memory filesystem for testing the store without touching disk.
    #[derive(Default)]
    struct MemFs {
        files: Mutex<HashMap<PathBuf, String>>,
    }

    impl MemFs {
        fn get(&self, path: &str) -> Option<String> {
            self.files.lock().unwrap().get(Path::new(path)).cloned()
        }
    }

    impl FileSystem for MemFs {
        fn read_to_string(&self, path: &Path) -> Result<String, Box<dyn Error + Send + Sync>> {
            let files = self.files.lock().unwrap();
            files.get(path).cloned().ok_or_else(|| format!("File not found: {}", path.display()).into())
        }

        fn write(&self, path: &Path, contents: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
            self.files.lock().unwrap().insert(path.to_path_buf(), contents.to_string());
            Ok(())
        }
    }

    fn sample() -> ProblemDocument {
        ProblemDocument {
            spec: ProblemSpec {
                task_name: "Sum of two".into(),
                difficulty: Difficulty::Easy,
                description: "## Sum\nAdd two numbers.".into(),
                function_name: "sum".into(),
                inputs: vec![FieldSpec::new("a", "int"), FieldSpec::new("nums", "list<int>")],
                outputs: vec![FieldSpec::new("result", "int")],
            },
            tests: vec![
                NormalizedTestCase::new("2\n2\n1 2\n", "5"),
                NormalizedTestCase::new("0\n0\n\n", "0"),
            ],
        }
    }

    #[test]
    fn save_and_load_round_trips() {
        let fs = MemFs::default();
        let store = ProblemStore::new(&fs);
        let path = Path::new("/problems/sum.yaml");

        store.save(path, &sample()).unwrap();
        let yaml = fs.get("/problems/sum.yaml").unwrap();
        assert!(yaml.contains("task_name: Sum of two"));
        assert!(yaml.contains("list<int>"));

        assert_eq!(store.load(path).unwrap(), sample());
    }

    #[test]
    fn loads_hand_written_yaml_without_tests() {
        let fs = MemFs::default();
        fs.write(
            Path::new("p.yaml"),
            "task_name: Echo\ndescription: Echo it.\nfunction_name: echo\n\
             inputs:\n  - name: s\n    type: string\noutputs:\n  - name: out\n    type: tuple\n",
        )
        .unwrap();
        let doc = ProblemStore::new(&fs).load(Path::new("p.yaml")).unwrap();
        assert!(doc.tests.is_empty());
        assert_eq!(doc.spec.difficulty, Difficulty::default());
        assert_eq!(doc.spec.outputs[0].ty.to_string(), "tuple");
    }

    #[test]
    fn missing_and_malformed_files_are_storage_errors() {
        let fs = MemFs::default();
        let store = ProblemStore::new(&fs);
        assert!(matches!(store.load(Path::new("nope.yaml")), Err(TaskforgeError::Storage(_))));
        fs.write(Path::new("bad.yaml"), "tests: [unclosed").unwrap();
        assert!(matches!(store.load(Path::new("bad.yaml")), Err(TaskforgeError::Storage(_))));
    }

    #[test]
    fn export_writes_problem_directory() {
        let fs = MemFs::default();
        let doc = sample();
        let boilerplate = generate_boilerplate(&doc.spec);

        let root = ProblemStore::new(&fs).export(&doc, &boilerplate, Path::new("/out")).unwrap();
        assert_eq!(root, PathBuf::from("/out/sum"));

        assert_eq!(fs.get("/out/sum/Problem.md").unwrap(), "## Sum\nAdd two numbers.");
        assert_eq!(
            fs.get("/out/sum/Structure.md").unwrap(),
            "Problem Name: Sum of two\nFunction Name: sum\nInput Structure:\n\
             Input Field: int a\nInput Field: list<int> nums\nOutput Structure:\n\
             Output Field: int result"
        );
        assert_eq!(fs.get("/out/sum/inputs/1.txt").unwrap(), "0\n0\n\n");
        assert_eq!(fs.get("/out/sum/outputs/0.txt").unwrap(), "5");
        for file in ["function.cpp", "function.js", "function.rs", "function.java"] {
            let stub = fs.get(&format!("/out/sum/boilerplate/{file}")).unwrap();
            assert!(!stub.contains(USER_CODE_MARKER), "{file}");
            let full = fs.get(&format!("/out/sum/boilerplate-full/{file}")).unwrap();
            assert_eq!(full.matches(USER_CODE_MARKER).count(), 1, "{file}");
        }
    }

    #[test]
    fn export_refuses_invalid_problem() {
        let fs = MemFs::default();
        let mut doc = sample();
        doc.spec.function_name = "../escape".into();
        let boilerplate = generate_boilerplate(&doc.spec);
        let err = ProblemStore::new(&fs).export(&doc, &boilerplate, Path::new("/out")).unwrap_err();
        assert!(matches!(err, TaskforgeError::InvalidProblem { .. }));
        assert!(fs.files.lock().unwrap().is_empty());
    }
}
