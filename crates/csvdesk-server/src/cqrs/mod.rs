pub use mediator::DefaultAsyncMediator;

use crate::features::FeatureState;

pub mod middleware;

pub type AppMediator = DefaultAsyncMediator;

pub fn build_mediator(state: FeatureState) -> AppMediator {
    DefaultAsyncMediator::builder()
        // Records
        .add_handler({
            let state = state.clone();
            move |cmd| {
                let state = state.clone();
                async move {
                    let FeatureState { store, spool } = state;
                    crate::features::records::commands::upload::handle(store, spool, cmd).await
                }
            }
        })
        .add_handler({
            let store = state.store.clone();
            move |cmd| {
                let store = store.clone();
                async move { crate::features::records::commands::clear::handle(store, cmd).await }
            }
        })
        .add_handler({
            let store = state.store.clone();
            move |query| {
                let store = store.clone();
                async move { crate::features::records::queries::list::handle(store, query).await }
            }
        })
        .add_handler(|query| async move {
            crate::features::records::queries::columns::handle(query).await
        })
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        features::{
            records::{
                ClearRecordsCommand, ListColumnsQuery, ListRecordsQuery, UploadCsvCommand,
                UploadedFile,
            },
            shared::test_helpers::memory_store,
        },
        storage::{UploadConfig, UploadSpool},
    };
    use mediator::AsyncMediator;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_mediator_dispatches_record_requests() {
        let tmp = tempfile::tempdir().unwrap();
        let state = FeatureState {
            store: Arc::new(memory_store().await),
            spool: UploadSpool::new(&UploadConfig::with_dir(tmp.path())).await.unwrap(),
        };
        let mut mediator = build_mediator(state);

        let uploaded = mediator
            .send(UploadCsvCommand::new(UploadedFile {
                file_name: Some("people.csv".to_string()),
                content_type: Some("text/csv".to_string()),
                bytes: b"postId,name\n1,Alice\n".to_vec(),
            }))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(uploaded.record_count, 1);

        let listed = mediator
            .send(ListRecordsQuery::default())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(listed.records[0].name, "Alice");

        let columns = mediator.send(ListColumnsQuery).await.unwrap().unwrap();
        assert_eq!(columns.columns.len(), 4);

        mediator.send(ClearRecordsCommand).await.unwrap().unwrap();
        let listed = mediator
            .send(ListRecordsQuery::default())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(listed.pagination.total, 0);
    }
}
