//! # Config Commands
//!
//! Configuration readout and the `status` health view.

use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::state::{ConfigState, DbState};
use pharmacy_db::TableCount;

/// Health of the store plus row counts per table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    pub store_name: String,
    pub healthy: bool,
    pub low_stock_threshold: i64,
    pub tables: Vec<TableCount>,
}

/// Gets the current desk configuration.
pub fn get_config(config: &ConfigState) -> ConfigState {
    debug!("get_config command");
    config.clone()
}

/// Checks the store answers queries and counts the rows of every table.
pub async fn status(db: &DbState, config: &ConfigState) -> Result<Status, ApiError> {
    debug!("status command");

    let healthy = db.inner().health_check().await;
    let tables = db.inner().table_counts().await?;

    Ok(Status {
        store_name: config.store_name.clone(),
        healthy,
        low_stock_threshold: config.low_stock_threshold,
        tables,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::customer::{add_customer, NewCustomerRequest};
    use crate::state::test_support::test_state;

    #[tokio::test]
    async fn test_status_counts_rows() {
        let db = test_state().await;
        add_customer(
            &db,
            NewCustomerRequest {
                name: "Ann".to_string(),
                address: None,
                phone: "0123456789".to_string(),
            },
        )
        .await
        .unwrap();

        let status = status(&db, &ConfigState::default()).await.unwrap();

        assert!(status.healthy);
        assert_eq!(status.store_name, "Pharmacy Desk");
        let customers = status.tables.iter().find(|t| t.table == "customer").unwrap();
        assert_eq!(customers.rows, 1);
        assert_eq!(status.tables.len(), 6);
    }
}
