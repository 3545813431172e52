use hearth_core::error::CoreError;

/// Failure of a multi-statement repository workflow.
///
/// Workflows check domain rules inside their transaction, so a refusal can
/// surface after the database has been touched; the transaction is rolled
/// back when it is dropped.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Domain(#[from] CoreError),
}
