pub mod table_classifier;

pub use table_classifier::TableSiteClassifier;
