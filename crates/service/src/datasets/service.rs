use std::sync::Arc;

use tracing::{debug, info};

use crate::datasets::domain::{DataFormat, DataLookup, Dataset, UploadSummary, NOT_FOUND_MESSAGE};
use crate::errors::ServiceError;
use crate::storage::{DatasetStore, MemoryDatasetStore};

/// Upload, list and retrieve datasets against an injected [`DatasetStore`].
#[derive(Clone)]
pub struct DatasetService {
    store: Arc<dyn DatasetStore>,
}

impl DatasetService {
    pub fn new(store: Arc<dyn DatasetStore>) -> Self {
        Self { store }
    }

    /// Service over a fresh, empty in-memory store.
    pub fn in_memory() -> Self {
        Self::new(MemoryDatasetStore::new())
    }

    /// Parse `raw` as CSV and store it under `filename`, replacing any earlier upload.
    pub async fn upload(&self, filename: &str, raw: Vec<u8>) -> Result<UploadSummary, ServiceError> {
        if filename.is_empty() {
            return Err(ServiceError::Decode("upload has no filename".into()));
        }
        let bytes = raw.len();
        let dataset = Dataset::parse(filename, raw)?;
        let rows = dataset.table().row_count();
        let columns = dataset.table().headers().len();

        if self.store.put(dataset).await.is_some() {
            info!(%filename, rows, columns, bytes, "dataset overwritten");
        } else {
            info!(%filename, rows, columns, bytes, "dataset stored");
        }
        Ok(UploadSummary::new(filename, rows))
    }

    pub async fn list_files(&self) -> Vec<String> {
        self.store.list_names().await
    }

    pub async fn get_data(&self, filename: &str, format: DataFormat) -> DataLookup {
        match self.store.get(filename).await {
            None => {
                debug!(%filename, "dataset not found");
                DataLookup::NotFound(NOT_FOUND_MESSAGE)
            }
            Some(dataset) => match format {
                DataFormat::Csv => DataLookup::Csv(dataset),
                DataFormat::Json => DataLookup::Json(dataset),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn records_json(lookup: DataLookup) -> Value {
        match lookup {
            DataLookup::Json(ds) => serde_json::to_value(ds.table().records()).unwrap(),
            other => panic!("expected json lookup, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn upload_then_get_json() -> Result<(), anyhow::Error> {
        let svc = DatasetService::in_memory();
        let summary = svc.upload("ab.csv", b"a,b\n1,2\n3,4".to_vec()).await?;
        assert_eq!(summary, UploadSummary::new("ab.csv", 2));

        let lookup = svc.get_data("ab.csv", DataFormat::Json).await;
        assert_eq!(records_json(lookup), json!([{"a": 1, "b": 2}, {"a": 3, "b": 4}]));
        Ok(())
    }

    #[tokio::test]
    async fn upload_then_get_csv_is_identity() -> Result<(), anyhow::Error> {
        let svc = DatasetService::in_memory();
        let raw = b"name,score\r\n\"Ana, M.\",9.5\r\nBruno,7\r\n".to_vec();
        svc.upload("notas.csv", raw.clone()).await?;

        match svc.get_data("notas.csv", DataFormat::Csv).await {
            DataLookup::Csv(ds) => {
                assert_eq!(ds.raw(), raw.as_slice());
                assert_eq!(ds.filename(), "notas.csv");
            }
            other => panic!("expected csv lookup, got {other:?}"),
        }
        Ok(())
    }

    #[tokio::test]
    async fn json_round_trip_back_to_csv() -> Result<(), anyhow::Error> {
        let svc = DatasetService::in_memory();
        svc.upload("v.csv", b"t,hr,ok\n0,60,true\n1,,false\n".to_vec()).await?;
        let rewritten = match svc.get_data("v.csv", DataFormat::Json).await {
            DataLookup::Json(ds) => ds.table().to_csv()?,
            other => panic!("expected json lookup, got {other:?}"),
        };
        assert_eq!(rewritten, "t,hr,ok\n0,60,true\n1,,false\n");
        Ok(())
    }

    #[tokio::test]
    async fn list_files_and_overwrite() -> Result<(), anyhow::Error> {
        let svc = DatasetService::in_memory();
        assert!(svc.list_files().await.is_empty());
        svc.upload("p1.csv", b"a\n1\n".to_vec()).await?;
        svc.upload("p2.csv", b"a\n2\n".to_vec()).await?;
        assert_eq!(svc.list_files().await, vec!["p1.csv", "p2.csv"]);

        let summary = svc.upload("p1.csv", b"b,c\nx,y\nz,w\n".to_vec()).await?;
        assert_eq!(summary.rows, 2);
        assert_eq!(svc.list_files().await, vec!["p1.csv", "p2.csv"]);
        assert_eq!(
            records_json(svc.get_data("p1.csv", DataFormat::Json).await),
            json!([{"b": "x", "c": "y"}, {"b": "z", "c": "w"}])
        );
        match svc.get_data("p1.csv", DataFormat::Csv).await {
            DataLookup::Csv(ds) => assert_eq!(ds.raw(), b"b,c\nx,y\nz,w\n"),
            other => panic!("expected csv lookup, got {other:?}"),
        }
        Ok(())
    }

    #[tokio::test]
    async fn unknown_file_is_not_found_in_any_format() {
        let svc = DatasetService::in_memory();
        for format in [DataFormat::Json, DataFormat::Csv] {
            match svc.get_data("missing.csv", format).await {
                DataLookup::NotFound(msg) => assert_eq!(msg, "Arquivo não encontrado"),
                other => panic!("expected not found, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn failed_upload_leaves_store_untouched() -> Result<(), anyhow::Error> {
        let svc = DatasetService::in_memory();
        svc.upload("keep.csv", b"a\n1\n".to_vec()).await?;

        let err = svc.upload("keep.csv", vec![0xff, 0xfe, b'\n']).await.unwrap_err();
        assert!(err.is_malformed_input());
        let err = svc.upload("bad.csv", b"a\n1,2\n".to_vec()).await.unwrap_err();
        assert!(matches!(err, ServiceError::Parse(_)));

        assert_eq!(svc.list_files().await, vec!["keep.csv"]);
        assert_eq!(records_json(svc.get_data("keep.csv", DataFormat::Json).await), json!([{"a": 1}]));
        Ok(())
    }

    #[tokio::test]
    async fn empty_filename_is_a_decode_error() {
        let svc = DatasetService::in_memory();
        let err = svc.upload("", b"a\n1\n".to_vec()).await.unwrap_err();
        assert!(matches!(err, ServiceError::Decode(_)));
        assert!(!err.is_malformed_input());
    }

    #[tokio::test]
    async fn services_over_separate_stores_are_isolated() -> Result<(), anyhow::Error> {
        let a = DatasetService::in_memory();
        let b = DatasetService::in_memory();
        a.upload("only-a.csv", b"x\n1\n".to_vec()).await?;
        assert!(b.list_files().await.is_empty());

        let shared = a.clone();
        assert_eq!(shared.list_files().await, vec!["only-a.csv"]);
        Ok(())
    }
}
