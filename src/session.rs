//! The authoring session: one problem, its generated boilerplate and its tests.

use tracing::debug;

use crate::codegen::{generate_boilerplate, BoilerplateSet};
use crate::error::TaskforgeResult;
use crate::judge::{JudgeReport, Orchestrator, PreparedSource};
use crate::model::{Language, ProblemSpec, TypePolicy};
use crate::store::ProblemDocument;
use crate::testcase::{parse_tests, NormalizedTestCase};

/// Owns the current problem state.
///
/// The boilerplate always matches the problem: every change to it regenerates
/// the whole set, and a rejected change leaves the session untouched.
#[derive(Debug, Clone)]
pub struct AuthoringSession {
    spec: ProblemSpec,
    policy: TypePolicy,
    boilerplate: BoilerplateSet,
    tests: Vec<NormalizedTestCase>,
}

impl AuthoringSession {
    /// Validates `spec` and generates its boilerplate.
    ///
    /// # Errors
    ///
    /// Validation errors from [`ProblemSpec::validate`].
    pub fn new(spec: ProblemSpec, policy: TypePolicy) -> TaskforgeResult<Self> {
        spec.validate(policy)?;
        let boilerplate = generate_boilerplate(&spec);
        Ok(Self { spec, policy, boilerplate, tests: Vec::new() })
    }

    /// Resumes from a stored document.
    ///
    /// # Errors
    ///
    /// Validation errors from [`ProblemSpec::validate`].
    pub fn from_document(doc: ProblemDocument, policy: TypePolicy) -> TaskforgeResult<Self> {
        let mut session = Self::new(doc.spec, policy)?;
        session.tests = doc.tests;
        Ok(session)
    }

    /// Current problem.
    #[must_use]
    pub fn spec(&self) -> &ProblemSpec {
        &self.spec
    }

    /// Boilerplate generated from the current problem.
    #[must_use]
    pub fn boilerplate(&self) -> &BoilerplateSet {
        &self.boilerplate
    }

    /// Current tests, in judging order.
    #[must_use]
    pub fn tests(&self) -> &[NormalizedTestCase] {
        &self.tests
    }

    /// Replaces the problem and regenerates the boilerplate. Tests are kept.
    ///
    /// # Errors
    ///
    /// Validation errors; the session is unchanged.
    pub fn update_spec(&mut self, spec: ProblemSpec) -> TaskforgeResult<()> {
        spec.validate(self.policy)?;
        self.boilerplate = generate_boilerplate(&spec);
        self.spec = spec;
        Ok(())
    }

    /// Appends tests.
    pub fn extend_tests(&mut self, tests: impl IntoIterator<Item = NormalizedTestCase>) {
        self.tests.extend(tests);
    }

    /// Appends an empty test and returns its index.
    pub fn add_blank_test(&mut self) -> usize {
        self.tests.push(NormalizedTestCase::default());
        self.tests.len() - 1
    }

    /// Removes the test at `index`, if there is one.
    pub fn remove_test(&mut self, index: usize) -> Option<NormalizedTestCase> {
        (index < self.tests.len()).then(|| self.tests.remove(index))
    }

    /// Replaces the test at `index` and returns the old one. Out of range
    /// indexes leave the list unchanged.
    pub fn replace_test(
        &mut self,
        index: usize,
        test: NormalizedTestCase,
    ) -> Option<NormalizedTestCase> {
        self.tests.get_mut(index).map(|slot| std::mem::replace(slot, test))
    }

    /// Parses collaborator output and appends every test in it.
    ///
    /// All or nothing: on error no test is added.
    ///
    /// # Errors
    ///
    /// [`crate::TaskforgeError::MalformedTestData`] from [`parse_tests`].
    pub fn ingest_generated_tests(&mut self, text: &str) -> TaskforgeResult<usize> {
        let parsed = parse_tests(text, &self.spec)?;
        let added = parsed.len();
        self.tests.extend(parsed);
        debug!(added, total = self.tests.len(), "tests ingested");
        Ok(added)
    }

    /// Splices `user_code` into the full program for `language`.
    ///
    /// # Errors
    ///
    /// [`crate::TaskforgeError::MarkerCount`] if the program's marker is not unique.
    pub fn prepare(&self, language: Language, user_code: &str) -> TaskforgeResult<PreparedSource> {
        PreparedSource::new(&self.boilerplate.get(language).full_program, user_code)
    }

    /// Judges `user_code` against every current test.
    ///
    /// # Errors
    ///
    /// Preparation errors, raised before anything is submitted.
    pub async fn judge(
        &self,
        orchestrator: &Orchestrator<'_>,
        language: Language,
        user_code: &str,
    ) -> TaskforgeResult<JudgeReport> {
        let source = self.prepare(language, user_code)?;
        Ok(orchestrator.judge(language, &source, &self.tests).await)
    }

    /// Snapshot for storage.
    #[must_use]
    pub fn to_document(&self) -> ProblemDocument {
        ProblemDocument { spec: self.spec.clone(), tests: self.tests.clone() }
    }
}
