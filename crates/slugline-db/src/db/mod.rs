use crate::error::DbResult;
use std::future::Future;
use std::pin::Pin;

pub mod conflict;
pub mod connection;
pub mod identifier;
pub mod oracle;
pub mod query;

pub trait DbProvider: Send + Sync {
    fn get_connection<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = DbResult<connection::DbConnection<'a>>> + Send + 'a>>;
}
