use sea_orm::DatabaseConnection;

use crate::ResultStore;

mod expenses;

/// Run a block inside a DB transaction, committing on success and rolling back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

/// Handle to the expense store. Holds the database connection; all
/// operations go through it.
#[derive(Debug)]
pub struct Store {
    database: DatabaseConnection,
}

impl Store {
    /// Return a builder for `Store`.
    pub fn builder() -> StoreBuilder {
        StoreBuilder::default()
    }

    pub(crate) fn database(&self) -> &DatabaseConnection {
        &self.database
    }
}

/// The builder for `Store`.
#[derive(Default)]
pub struct StoreBuilder {
    database: DatabaseConnection,
}

impl StoreBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> StoreBuilder {
        self.database = db;
        self
    }

    /// Construct `Store`
    pub async fn build(self) -> ResultStore<Store> {
        Ok(Store {
            database: self.database,
        })
    }
}
