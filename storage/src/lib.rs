#![allow(clippy::result_large_err)]
//! # kbc-storage
//!
//! Client library for the Keboola Storage API.
//!
//! * [Storage API reference](https://keboola.docs.apiary.io/)
//!
//! Tables are created, loaded and exported through asynchronous jobs and files kept in S3.
//! The client uploads and downloads file content directly with the temporary credentials
//! the API hands out, and waits for the jobs to finish.
//!
//! ## Quick Start
//!
//! The token is sent in the `X-StorageApi-Token` header of every request.
//!
//! ```
//! use kbc_storage::client::{Client, ClientConfig};
//!
//! async fn run() {
//!     let config = ClientConfig::new("https://connection.keboola.com", "your-token");
//!     let client = Client::new(config);
//! }
//! ```
//!
//! Or from `KBC_STORAGE_API_URL` and `KBC_STORAGE_API_TOKEN`:
//!
//! ```
//! use kbc_storage::client::{Client, ClientConfig};
//!
//! async fn run() {
//!     let client = Client::new(ClientConfig::from_env().unwrap());
//! }
//! ```
//!
//! ### Usage
//! ```
//! use std::path::Path;
//!
//! use kbc_storage::client::Client;
//! use kbc_storage::http::Error;
//! use kbc_storage::http::buckets::insert::CreateBucketRequest;
//! use kbc_storage::http::buckets::Stage;
//! use kbc_storage::http::storage_table_client::{CreateTableOptions, LoadTableOptions};
//! use kbc_storage::http::tables::export::ExportTableRequest;
//! use kbc_storage::http::tables::preview::PreviewTableRequest;
//!
//! async fn run(client: Client) -> Result<(), Error> {
//!     // Create a bucket
//!     let bucket = client.buckets().create(&CreateBucketRequest {
//!         name: "main".to_string(),
//!         stage: Stage::In,
//!         ..Default::default()
//!     }).await?;
//!
//!     // Create a table from a CSV file with a header row
//!     let table_id = client.tables().create(&bucket.id, "orders", Path::new("orders.csv"), &CreateTableOptions {
//!         primary_key: vec!["id".to_string()],
//!         ..Default::default()
//!     }).await?;
//!
//!     // Append more rows
//!     client.tables().load(&table_id, Path::new("more-orders.csv"), &LoadTableOptions {
//!         incremental: true,
//!         ..Default::default()
//!     }).await?;
//!
//!     // Look at the first rows
//!     let csv = client.tables().preview(&table_id, &PreviewTableRequest::default()).await?;
//!
//!     // Export the whole table to ./orders
//!     let local = client.tables().export_to_file(&table_id, Path::new("."), &ExportTableRequest {
//!         gzip: true,
//!         ..Default::default()
//!     }).await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod http;
pub mod token_source;
mod util;
