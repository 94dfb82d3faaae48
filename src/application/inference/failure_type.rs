//! Failure Type Classifier - 二级模型封装（故障类型，多标签）

use std::sync::Arc;

use crate::application::ports::MultiLabelClassifier;
use crate::domain::diagnosis::{FeatureVector, InferenceError, TypePrediction};

pub struct FailureTypeClassifier {
    model: Option<Arc<dyn MultiLabelClassifier>>,
}

impl FailureTypeClassifier {
    pub fn new(model: Arc<dyn MultiLabelClassifier>) -> Self {
        Self { model: Some(model) }
    }

    pub fn unavailable() -> Self {
        Self { model: None }
    }

    pub fn is_available(&self) -> bool {
        self.model.is_some()
    }

    /// 每个标签一个布尔值，全 false 也是合法结果
    pub fn predict(
        &self,
        vector: &FeatureVector,
        labels: &[String],
    ) -> Result<TypePrediction, InferenceError> {
        let model = self
            .model
            .as_ref()
            .ok_or_else(|| InferenceError::model_unavailable("failure type model is not loaded"))?;

        let flags = model.predict(vector.as_slice())?;
        TypePrediction::new(labels, flags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::inference::stubs::{labels, schema, StubTypes};
    use crate::domain::diagnosis::build_feature_vector;
    use crate::domain::reading::{MachineType, RawReading};

    fn vector() -> FeatureVector {
        let raw = RawReading::new(MachineType::M, 300.1, 310.2, 1500, 42.0, 108).unwrap();
        build_feature_vector(&raw, &schema()).unwrap()
    }

    #[test]
    fn test_one_boolean_per_label() {
        let classifier =
            FailureTypeClassifier::new(Arc::new(StubTypes::new(vec![true, false, false, true])));
        let prediction = classifier.predict(&vector(), &labels()).unwrap();
        assert_eq!(prediction.entries().len(), labels().len());
        assert_eq!(prediction.active_labels(), vec!["TWF", "OSF"]);
    }

    #[test]
    fn test_all_false_is_valid() {
        let classifier = FailureTypeClassifier::new(Arc::new(StubTypes::new(vec![false; 4])));
        let prediction = classifier.predict(&vector(), &labels()).unwrap();
        assert!(prediction.active_labels().is_empty());
    }

    #[test]
    fn test_output_count_mismatch() {
        let classifier = FailureTypeClassifier::new(Arc::new(StubTypes::new(vec![true; 5])));
        let result = classifier.predict(&vector(), &labels());
        assert!(matches!(result, Err(InferenceError::SchemaMismatch(_))));
    }

    #[test]
    fn test_unavailable() {
        let result = FailureTypeClassifier::unavailable().predict(&vector(), &labels());
        assert!(matches!(result, Err(InferenceError::ModelUnavailable(_))));
    }
}
