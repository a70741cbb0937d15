//! Recorded run ids.

use super::Recording;
use crate::ports::IdGenerator;

impl IdGenerator for Recording<dyn IdGenerator> {
    fn generate_id(&self) -> String {
        let id = self.inner.generate_id();
        self.record_value("generate_id", &(), &id);
        id
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::super::{testing, RecordingIdGenerator};
    use super::*;
    use crate::adapters::live::LiveIdGenerator;

    #[test]
    fn generated_id_lands_in_cassette() {
        let (dir, recorder) = testing::recorder("taskforge_rec_id_gen", "id_gen");
        let ids = RecordingIdGenerator::new(Box::new(LiveIdGenerator), Arc::clone(&recorder));
        let id = ids.generate_id();
        drop(ids);

        let cassette = testing::finish(&dir, recorder);
        assert_eq!(cassette.interactions.len(), 1);
        assert_eq!(cassette.interactions[0].method, "generate_id");
        assert_eq!(cassette.interactions[0].output, serde_json::json!(id));
    }
}
