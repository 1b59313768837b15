//! Classifier hierarchy and the decision forest classifier
//!
//! A [`DatumClassifier`] predicts labels for datums with the schema of the
//! data set its transformer is bound to. A [`ProbabilisticClassifier`] also
//! reports the posterior probability of every label, ordered like the sorted
//! label values.

pub mod backend;
pub mod metrics;

pub use self::backend::{
    ForestBackend, ForestModel, ForestParameters, TrainingMatrix, DEFAULT_SAMPLE_RATIO,
};
pub use self::metrics::{ErrorRates, ForestErrorReport};

use crate::core::{
    ClassifierError, DataSet, Datum, Result, SwotError, TrainableDataSet, TrainingInstructions,
};
use crate::data::DataTable;
use crate::persistence::{ClassifierSnapshot, SnapshotMetadata};
use crate::transform::DataSetTransformer;
use crate::utils::index_of_max_value;
use log::{debug, info, warn};
use std::sync::Arc;

/// Lowest posterior probability at which a label is reported by default
pub const DEFAULT_CLASSIFICATION_TOLERANCE: f64 = 0.5;

/// Number of trees grown when not specified
pub const DEFAULT_TREE_COUNT: usize = 500;

const POSTERIOR_SUM_TOLERANCE: f64 = 1e-6;

pub trait DatumClassifier {
    type Transformer: DataSetTransformer;

    fn transformer(&self) -> &Self::Transformer;

    fn training_instructions(&self) -> &dyn TrainingInstructions {
        self.transformer().training_instructions()
    }

    /// The predicted label for a datum, `None` if classification did not provide one
    fn label_for_classified_datum(&self, datum: &dyn Datum) -> Result<Option<String>>;
}

pub trait ProbabilisticClassifier: DatumClassifier {
    /// One probability per label, in label identifier order, summing to one
    fn posterior_probabilities_for_classifying_datum(&self, datum: &dyn Datum) -> Result<Vec<f64>>;

    /// The most probable label, if its probability is at least `tolerance`
    fn label_for_classified_datum_at_probability_tolerance(
        &self,
        datum: &dyn Datum,
        tolerance: f64,
    ) -> Result<Option<String>> {
        let posteriors = self.posterior_probabilities_for_classifying_datum(datum)?;
        match index_of_max_value(&posteriors) {
            Some((index, probability)) if probability >= tolerance => {
                self.training_instructions().label_at_index(index).map(Some)
            }
            _ => Ok(None),
        }
    }
}

/// Probabilistic classifier backed by a decision forest.
///
/// Training happens at construction. The error rates describe that training
/// run and only change with an explicit [`retrain`](Self::retrain).
#[derive(Debug)]
pub struct DecisionForestClassifier<T: DataSetTransformer, B: ForestBackend> {
    transformer: T,
    training_data: Arc<DataTable>,
    backend: B,
    parameters: ForestParameters,
    model: B::Model,
    error_report: ForestErrorReport,
}

impl<T: DataSetTransformer, B: ForestBackend> DecisionForestClassifier<T, B> {
    /// Train a forest of [`DEFAULT_TREE_COUNT`] trees
    pub fn new(transformer: T, training_data: Arc<DataTable>, backend: B) -> Result<Self> {
        Self::with_parameters(transformer, training_data, backend, ForestParameters::default())
    }

    pub fn with_tree_count(
        transformer: T,
        training_data: Arc<DataTable>,
        backend: B,
        tree_count: usize,
    ) -> Result<Self> {
        let parameters = ForestParameters::default().with_tree_count(tree_count);
        Self::with_parameters(transformer, training_data, backend, parameters)
    }

    /// Train a forest on `training_data`, which must have the schema of the
    /// transformer's data set and contain labelled datums.
    pub fn with_parameters(
        transformer: T,
        training_data: Arc<DataTable>,
        backend: B,
        parameters: ForestParameters,
    ) -> Result<Self> {
        let (model, error_report) = train(&transformer, &training_data, &backend, &parameters)?;
        Ok(Self {
            transformer,
            training_data,
            backend,
            parameters,
            model,
            error_report,
        })
    }

    /// Restore a classifier from a snapshot without training.
    ///
    /// The transformer must produce the label values and feature width the
    /// snapshot was taken with.
    pub fn from_snapshot(
        transformer: T,
        training_data: Arc<DataTable>,
        backend: B,
        snapshot: &ClassifierSnapshot,
    ) -> Result<Self> {
        let instructions = transformer.training_instructions();
        if instructions.label_values() != snapshot.label_values
            || transformer.encoded_width(false) != snapshot.feature_count
        {
            warn!(
                "Snapshot layout ({} labels, {} features) does not match the transformer",
                snapshot.label_values.len(),
                snapshot.feature_count
            );
            return Err(ClassifierError::DeserializationFailed.into());
        }
        snapshot.parameters.validate()?;

        let model = backend.deserialize_model(&snapshot.model)?;
        Ok(Self {
            transformer,
            training_data,
            backend,
            parameters: snapshot.parameters,
            model,
            error_report: snapshot.error_report,
        })
    }

    /// Capture the trained state
    pub fn snapshot(&self) -> Result<ClassifierSnapshot> {
        Ok(ClassifierSnapshot {
            model: self.model.serialize()?,
            label_values: self.training_instructions().label_values(),
            feature_count: self.transformer.encoded_width(false),
            parameters: self.parameters,
            error_report: self.error_report,
            metadata: SnapshotMetadata::now(),
        })
    }

    /// Train again with the current parameters. On failure the previous model
    /// and error rates are kept.
    pub fn retrain(&mut self) -> Result<()> {
        let (model, error_report) = train(
            &self.transformer,
            &self.training_data,
            &self.backend,
            &self.parameters,
        )?;
        self.model = model;
        self.error_report = error_report;
        Ok(())
    }

    pub fn tree_count(&self) -> usize {
        self.parameters.tree_count
    }

    /// Takes effect on the next [`retrain`](Self::retrain)
    pub fn set_tree_count(&mut self, tree_count: usize) {
        self.parameters.tree_count = tree_count;
    }

    pub fn sample_ratio(&self) -> f64 {
        self.parameters.sample_ratio
    }

    /// Takes effect on the next [`retrain`](Self::retrain)
    pub fn set_sample_ratio(&mut self, sample_ratio: f64) {
        self.parameters.sample_ratio = sample_ratio;
    }

    pub fn parameters(&self) -> &ForestParameters {
        &self.parameters
    }

    pub fn training_data(&self) -> &Arc<DataTable> {
        &self.training_data
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn model(&self) -> &B::Model {
        &self.model
    }

    pub fn error_report(&self) -> &ForestErrorReport {
        &self.error_report
    }

    pub fn relative_class_error_rate(&self) -> f64 {
        self.error_report.in_sample.relative_class_error
    }

    /// Average cross-entropy on the training set
    pub fn classification_error_rate(&self) -> f64 {
        self.error_report.in_sample.average_cross_entropy
    }

    pub fn root_mean_square_error_rate(&self) -> f64 {
        self.error_report.in_sample.root_mean_square_error
    }

    pub fn average_error_rate(&self) -> f64 {
        self.error_report.in_sample.average_error
    }

    pub fn average_relative_error_rate(&self) -> f64 {
        self.error_report.in_sample.average_relative_error
    }

    pub fn out_of_bag_relative_class_error_rate(&self) -> f64 {
        self.error_report.out_of_bag.relative_class_error
    }

    pub fn out_of_bag_classification_error_rate(&self) -> f64 {
        self.error_report.out_of_bag.average_cross_entropy
    }

    pub fn out_of_bag_root_mean_square_error_rate(&self) -> f64 {
        self.error_report.out_of_bag.root_mean_square_error
    }

    pub fn out_of_bag_average_error_rate(&self) -> f64 {
        self.error_report.out_of_bag.average_error
    }

    pub fn out_of_bag_average_relative_error_rate(&self) -> f64 {
        self.error_report.out_of_bag.average_relative_error
    }
}

/// Encode the labelled datums of the training data
fn training_matrix<T: DataSetTransformer>(
    transformer: &T,
    training_data: &DataTable,
) -> Result<TrainingMatrix> {
    if !training_data.is_labelled() {
        return Err(SwotError::Unlabelled);
    }

    let mut rows = Vec::with_capacity(training_data.datum_count());
    for datum in training_data.datum_array() {
        if training_data.label_identifier_for_datum(datum).is_some() {
            rows.push(transformer.real_number_transform(datum, true)?);
        }
    }
    if rows.is_empty() {
        return Err(SwotError::Unlabelled);
    }
    let skipped = training_data.datum_count() - rows.len();
    if skipped > 0 {
        warn!("Training without {skipped} datums that have no recognised label");
    }

    TrainingMatrix::new(
        rows,
        transformer.encoded_width(false),
        transformer.training_instructions().label_count(),
    )
}

fn train<T: DataSetTransformer, B: ForestBackend>(
    transformer: &T,
    training_data: &DataTable,
    backend: &B,
    parameters: &ForestParameters,
) -> Result<(B::Model, ForestErrorReport)> {
    parameters.validate()?;
    let matrix = training_matrix(transformer, training_data)?;
    debug!(
        "Training matrix: {} rows, {} features, {} classes",
        matrix.len(),
        matrix.feature_count(),
        matrix.class_count()
    );

    let (model, report) = backend.train(&matrix, parameters)?;
    info!(
        "Trained forest of {} trees on {} datums, out-of-bag relative class error {:.4}",
        parameters.tree_count,
        matrix.len(),
        report.out_of_bag.relative_class_error
    );
    Ok((model, report))
}

/// Check backend posteriors against the label count and renormalise them if needed
fn checked_posteriors(mut posteriors: Vec<f64>, label_count: usize) -> Result<Vec<f64>> {
    if posteriors.len() != label_count {
        return Err(ClassifierError::InvalidClassIndex.into());
    }
    if posteriors.iter().any(|p| !p.is_finite() || *p < 0.0) {
        return Err(ClassifierError::Unknown.into());
    }
    let sum: f64 = posteriors.iter().sum();
    if sum <= 0.0 {
        return Err(ClassifierError::Unknown.into());
    }
    if (sum - 1.0).abs() > POSTERIOR_SUM_TOLERANCE {
        warn!("Posterior probabilities sum to {sum}, renormalising");
        for p in &mut posteriors {
            *p /= sum;
        }
    }
    Ok(posteriors)
}

impl<T: DataSetTransformer, B: ForestBackend> DatumClassifier for DecisionForestClassifier<T, B> {
    type Transformer = T;

    fn transformer(&self) -> &T {
        &self.transformer
    }

    fn label_for_classified_datum(&self, datum: &dyn Datum) -> Result<Option<String>> {
        self.label_for_classified_datum_at_probability_tolerance(
            datum,
            DEFAULT_CLASSIFICATION_TOLERANCE,
        )
    }
}

impl<T: DataSetTransformer, B: ForestBackend> ProbabilisticClassifier
    for DecisionForestClassifier<T, B>
{
    fn posterior_probabilities_for_classifying_datum(&self, datum: &dyn Datum) -> Result<Vec<f64>> {
        let features = self.transformer.real_number_transform(datum, false)?;
        let posteriors = self.model.posterior_probabilities(&features)?;
        checked_posteriors(posteriors, self.training_instructions().label_count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ColumnType, Value};
    use crate::data::DataTableRow;
    use crate::transform::NominalTransformer;
    use approx::assert_relative_eq;
    use std::cell::{Cell, RefCell};

    /// Posteriors from inverse squared distance to per-class feature means
    #[derive(Debug, Clone, PartialEq)]
    struct CentroidModel {
        centroids: Vec<Vec<f64>>,
    }

    impl ForestModel for CentroidModel {
        fn posterior_probabilities(&self, features: &[f64]) -> Result<Vec<f64>> {
            let weights: Vec<f64> = self
                .centroids
                .iter()
                .map(|centroid| {
                    let d2: f64 = centroid
                        .iter()
                        .zip(features)
                        .map(|(c, x)| (c - x).powi(2))
                        .sum();
                    1.0 / (1e-9 + d2)
                })
                .collect();
            let total: f64 = weights.iter().sum();
            Ok(weights.into_iter().map(|w| w / total).collect())
        }

        fn serialize(&self) -> Result<String> {
            Ok(serde_json::to_string(&self.centroids)?)
        }
    }

    #[derive(Debug, Default)]
    struct CentroidBackend {
        fail: Cell<bool>,
        seen_parameters: RefCell<Vec<ForestParameters>>,
    }

    impl ForestBackend for CentroidBackend {
        type Model = CentroidModel;

        fn train(
            &self,
            matrix: &TrainingMatrix,
            parameters: &ForestParameters,
        ) -> Result<(CentroidModel, ForestErrorReport)> {
            if self.fail.get() {
                return Err(ClassifierError::Unknown.into());
            }
            self.seen_parameters.borrow_mut().push(*parameters);

            let mut sums = vec![vec![0.0; matrix.feature_count()]; matrix.class_count()];
            let mut counts = vec![0usize; matrix.class_count()];
            for i in 0..matrix.len() {
                let label = matrix.label(i);
                counts[label] += 1;
                for (sum, x) in sums[label].iter_mut().zip(matrix.features(i)) {
                    *sum += x;
                }
            }
            let centroids = sums
                .into_iter()
                .zip(&counts)
                .map(|(sum, &n)| sum.into_iter().map(|s| s / n.max(1) as f64).collect())
                .collect();
            let model = CentroidModel { centroids };

            let posteriors = (0..matrix.len())
                .map(|i| model.posterior_probabilities(matrix.features(i)))
                .collect::<Result<Vec<_>>>()?;
            let rates = ErrorRates::from_posteriors(&posteriors, &matrix.labels())?;
            Ok((
                model,
                ForestErrorReport {
                    in_sample: rates,
                    out_of_bag: rates,
                },
            ))
        }

        fn deserialize_model(&self, serialized: &str) -> Result<CentroidModel> {
            let centroids = serde_json::from_str(serialized)
                .map_err(|_| ClassifierError::DeserializationFailed)?;
            Ok(CentroidModel { centroids })
        }
    }

    /// Returns the same posteriors for every datum
    #[derive(Debug)]
    struct FixedModel(Vec<f64>);

    impl ForestModel for FixedModel {
        fn posterior_probabilities(&self, _features: &[f64]) -> Result<Vec<f64>> {
            Ok(self.0.clone())
        }

        fn serialize(&self) -> Result<String> {
            Err(ClassifierError::SerializationFailed.into())
        }
    }

    #[derive(Debug)]
    struct FixedBackend(Vec<f64>);

    impl ForestBackend for FixedBackend {
        type Model = FixedModel;

        fn train(
            &self,
            _matrix: &TrainingMatrix,
            _parameters: &ForestParameters,
        ) -> Result<(FixedModel, ForestErrorReport)> {
            Ok((FixedModel(self.0.clone()), ForestErrorReport::default()))
        }

        fn deserialize_model(&self, _serialized: &str) -> Result<FixedModel> {
            Err(ClassifierError::DeserializationFailed.into())
        }
    }

    fn fruit_data() -> Arc<DataTable> {
        let types = vec![ColumnType::FloatingPoint, ColumnType::Categorical];
        let mut table = DataTable::new(
            types.clone(),
            Some(vec!["weight".to_string(), "fruit".to_string()]),
            Some(1),
            6,
        )
        .unwrap();
        table
            .add_category_with_name(
                "fruit",
                vec!["grape".to_string(), "melon".to_string(), "plum".to_string()],
            )
            .unwrap();
        table.assign_category_with_name("fruit", 1).unwrap();
        for (weight, fruit) in [
            (Some(5.0), Some("grape")),
            (Some(7.0), Some("grape")),
            (Some(1500.0), Some("melon")),
            (Some(1700.0), Some("melon")),
            (Some(60.0), Some("plum")),
            (Some(80.0), None),
        ] {
            table
                .append_datum(
                    DataTableRow::new(vec![Value::from(weight), Value::from(fruit)], types.clone())
                        .unwrap(),
                )
                .unwrap();
        }
        Arc::new(table)
    }

    fn query(weight: f64) -> DataTableRow {
        DataTableRow::new(
            vec![Value::from(weight), Value::Missing],
            vec![ColumnType::FloatingPoint, ColumnType::Categorical],
        )
        .unwrap()
    }

    fn centroid_classifier() -> DecisionForestClassifier<NominalTransformer, CentroidBackend> {
        let data = fruit_data();
        let transformer = NominalTransformer::new(Arc::clone(&data)).unwrap();
        DecisionForestClassifier::new(transformer, data, CentroidBackend::default()).unwrap()
    }

    #[test]
    fn test_training_skips_unlabelled_datums() {
        let classifier = centroid_classifier();
        assert_eq!(classifier.tree_count(), DEFAULT_TREE_COUNT);
        assert_eq!(classifier.model().centroids, vec![vec![6.0], vec![1600.0], vec![60.0]]);
        assert_eq!(classifier.training_instructions().label_count(), 3);
    }

    #[test]
    fn test_posteriors_and_labels() {
        let classifier = centroid_classifier();
        let posteriors = classifier
            .posterior_probabilities_for_classifying_datum(&query(6.5))
            .unwrap();
        assert_eq!(posteriors.len(), 3);
        assert_relative_eq!(posteriors.iter().sum::<f64>(), 1.0, epsilon = 1e-9);
        assert!(posteriors[0] > 0.99);

        assert_eq!(
            classifier.label_for_classified_datum(&query(1550.0)).unwrap(),
            Some("melon".to_string())
        );
        assert_eq!(
            classifier.label_for_classified_datum(&query(58.0)).unwrap(),
            Some("plum".to_string())
        );
    }

    #[test]
    fn test_probability_tolerance() {
        let data = fruit_data();
        let transformer = NominalTransformer::new(Arc::clone(&data)).unwrap();
        let classifier =
            DecisionForestClassifier::new(transformer, data, FixedBackend(vec![0.2, 0.7, 0.1]))
                .unwrap();

        assert_eq!(
            classifier.label_for_classified_datum(&query(1.0)).unwrap(),
            Some("melon".to_string())
        );
        assert_eq!(
            classifier
                .label_for_classified_datum_at_probability_tolerance(&query(1.0), 0.9)
                .unwrap(),
            None
        );
        assert_eq!(
            classifier
                .label_for_classified_datum_at_probability_tolerance(&query(1.0), 0.7)
                .unwrap(),
            Some("melon".to_string())
        );
    }

    #[test]
    fn test_posterior_validation() {
        let classify = |posteriors: Vec<f64>| {
            let data = fruit_data();
            let transformer = NominalTransformer::new(Arc::clone(&data)).unwrap();
            DecisionForestClassifier::new(transformer, data, FixedBackend(posteriors))
                .unwrap()
                .posterior_probabilities_for_classifying_datum(&query(1.0))
        };

        assert!(matches!(
            classify(vec![0.5, 0.5]),
            Err(SwotError::Classifier(ClassifierError::InvalidClassIndex))
        ));
        assert!(matches!(
            classify(vec![f64::NAN, 0.5, 0.5]),
            Err(SwotError::Classifier(ClassifierError::Unknown))
        ));
        assert!(matches!(
            classify(vec![0.0, 0.0, 0.0]),
            Err(SwotError::Classifier(ClassifierError::Unknown))
        ));

        let renormalised = classify(vec![1.0, 2.0, 1.0]).unwrap();
        assert_relative_eq!(renormalised[1], 0.5);
        assert_relative_eq!(renormalised.iter().sum::<f64>(), 1.0);
    }

    #[test]
    fn test_invalid_parameters() {
        let data = fruit_data();
        let transformer = NominalTransformer::new(Arc::clone(&data)).unwrap();
        let result = DecisionForestClassifier::with_tree_count(
            transformer,
            data,
            CentroidBackend::default(),
            0,
        );
        assert!(matches!(
            result,
            Err(SwotError::Classifier(ClassifierError::InvalidParamCount))
        ));
    }

    #[test]
    fn test_unlabelled_training_data() {
        let types = vec![ColumnType::FloatingPoint];
        let mut table = DataTable::with_column_types(types.clone()).unwrap();
        table
            .append_datum(DataTableRow::new(vec![Value::from(1.0)], types).unwrap())
            .unwrap();
        let data = Arc::new(table);
        let transformer = NominalTransformer::new(Arc::clone(&data)).unwrap();
        assert!(matches!(
            DecisionForestClassifier::new(transformer, data, CentroidBackend::default()),
            Err(SwotError::Unlabelled)
        ));
    }

    #[test]
    fn test_no_recognised_labels() {
        let types = vec![ColumnType::FloatingPoint, ColumnType::Categorical];
        let mut table = DataTable::new(types.clone(), None, Some(1), 1).unwrap();
        table
            .add_category_with_name("class", vec!["a".to_string(), "b".to_string()])
            .unwrap();
        table.assign_category_with_name("class", 1).unwrap();
        table
            .append_datum(
                DataTableRow::new(vec![Value::from(1.0), Value::from("zzz")], types).unwrap(),
            )
            .unwrap();
        assert!(table.is_labelled());

        let data = Arc::new(table);
        let transformer = NominalTransformer::new(Arc::clone(&data)).unwrap();
        let backend = CentroidBackend::default();
        assert!(matches!(
            DecisionForestClassifier::new(transformer, data, backend),
            Err(SwotError::Unlabelled)
        ));
    }

    #[test]
    fn test_tree_count_change_needs_retrain() {
        let mut classifier = centroid_classifier();
        classifier.set_tree_count(25);
        assert_eq!(classifier.tree_count(), 25);
        assert_eq!(classifier.backend().seen_parameters.borrow().len(), 1);

        classifier.retrain().unwrap();
        let seen = classifier.backend().seen_parameters.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[1].tree_count, 25);
    }

    #[test]
    fn test_failed_retrain_keeps_model() {
        let mut classifier = centroid_classifier();
        let before = classifier.model().clone();
        let errors = *classifier.error_report();

        classifier.backend().fail.set(true);
        assert!(classifier.retrain().is_err());
        assert_eq!(classifier.model(), &before);
        assert_eq!(classifier.error_report(), &errors);

        classifier.set_sample_ratio(0.0);
        classifier.backend().fail.set(false);
        assert!(matches!(
            classifier.retrain(),
            Err(SwotError::Classifier(ClassifierError::InvalidParamCount))
        ));
        assert_eq!(classifier.model(), &before);
    }

    #[test]
    fn test_error_rates_exposed() {
        let classifier = centroid_classifier();
        assert_relative_eq!(classifier.relative_class_error_rate(), 0.0);
        assert!(classifier.classification_error_rate() >= 0.0);
        assert!(classifier.root_mean_square_error_rate() < 0.1);
        assert!(classifier.average_error_rate() < 0.1);
        assert!(classifier.average_relative_error_rate() < 0.1);
        assert_relative_eq!(classifier.out_of_bag_relative_class_error_rate(), 0.0);
        assert_relative_eq!(
            classifier.out_of_bag_classification_error_rate(),
            classifier.classification_error_rate()
        );
        assert_relative_eq!(
            classifier.out_of_bag_root_mean_square_error_rate(),
            classifier.root_mean_square_error_rate()
        );
        assert_relative_eq!(
            classifier.out_of_bag_average_error_rate(),
            classifier.average_error_rate()
        );
        assert_relative_eq!(
            classifier.out_of_bag_average_relative_error_rate(),
            classifier.average_relative_error_rate()
        );
    }

    #[test]
    fn test_snapshot_restore() {
        let classifier = centroid_classifier();
        let snapshot = classifier.snapshot().unwrap();
        assert_eq!(snapshot.label_values, vec!["grape", "melon", "plum"]);
        assert_eq!(snapshot.feature_count, 1);

        let data = Arc::clone(classifier.training_data());
        let transformer = NominalTransformer::new(Arc::clone(&data)).unwrap();
        let restored = DecisionForestClassifier::from_snapshot(
            transformer,
            data,
            CentroidBackend::default(),
            &snapshot,
        )
        .unwrap();
        assert_eq!(restored.model(), classifier.model());
        assert_eq!(restored.error_report(), classifier.error_report());
        assert_eq!(
            restored.label_for_classified_datum(&query(1620.0)).unwrap(),
            Some("melon".to_string())
        );
        assert!(restored.backend().seen_parameters.borrow().is_empty());
    }

    #[test]
    fn test_snapshot_layout_mismatch() {
        let classifier = centroid_classifier();
        let mut snapshot = classifier.snapshot().unwrap();
        snapshot.feature_count = 4;

        let data = fruit_data();
        let transformer = NominalTransformer::new(Arc::clone(&data)).unwrap();
        assert!(matches!(
            DecisionForestClassifier::from_snapshot(
                transformer,
                data,
                CentroidBackend::default(),
                &snapshot
            ),
            Err(SwotError::Classifier(ClassifierError::DeserializationFailed))
        ));
    }
}
