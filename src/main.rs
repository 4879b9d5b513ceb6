mod api;
mod catalog;
mod config;
mod identity;
mod matrix;
mod routes;
mod schedule;
mod session;
mod submission;
mod suite;

use crate::api::build_api;

#[tokio::main]
async fn main() {
    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
    let router = build_api().await;
    axum::serve(listener, router).await.unwrap();
}
