use bson::Document;
use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};

use super::stage::Stage;

/// Ordered stages. Order is execution order and is kept through serialization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pipeline {
    stages: Vec<Stage>,
}

impl Pipeline {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, stage: Stage) {
        self.stages.push(stage);
    }

    #[must_use]
    pub fn then(mut self, stage: Stage) -> Self {
        self.push(stage);
        self
    }

    #[must_use]
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Stage documents in execution order, the shape an aggregate call takes.
    #[must_use]
    pub fn to_documents(&self) -> Vec<Document> {
        self.stages.iter().map(Stage::to_document).collect()
    }
}

impl FromIterator<Stage> for Pipeline {
    fn from_iter<I: IntoIterator<Item = Stage>>(iter: I) -> Self {
        Self { stages: iter.into_iter().collect() }
    }
}

impl IntoIterator for Pipeline {
    type Item = Stage;
    type IntoIter = std::vec::IntoIter<Stage>;

    fn into_iter(self) -> Self::IntoIter {
        self.stages.into_iter()
    }
}

impl From<Pipeline> for Vec<Document> {
    fn from(p: Pipeline) -> Self {
        p.to_documents()
    }
}

impl Serialize for Pipeline {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.stages.len()))?;
        for stage in &self.stages {
            seq.serialize_element(&stage.to_document())?;
        }
        seq.end()
    }
}

/// Collects stages into a pipeline in exactly the order given.
pub fn pipe<I>(stages: I) -> Pipeline
where
    I: IntoIterator<Item = Stage>,
{
    let pipeline: Pipeline = stages.into_iter().collect();
    log::trace!(
        target: "querykit::aggregate",
        "pipeline [{}]",
        pipeline.stages.iter().map(Stage::name).collect::<Vec<_>>().join(", ")
    );
    pipeline
}
