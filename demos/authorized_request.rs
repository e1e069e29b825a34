//! Sends catalog requests through an authenticated pipeline against a local mock API.
//!
//! 1. Create a [`SharedSession`]; the identity-provider client keeps a clone to write into.
//! 2. Register an [`AuthGate`] reading that session on a [`Pipeline`] backed by reqwest.
//! 3. Requests sent before login go out unsigned; after login they carry the bearer token.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use bearer_gate::{
	auth::SharedSession,
	gate::AuthGate,
	http::Request,
	pipeline::Pipeline,
	route::{Navigation, RouteTable},
	transport::ReqwestTransport,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(GET).path("/api/games").header("authorization", "Bearer demo-token");
			then.status(200).body(r#"[{"id":1,"title":"Catan"}]"#);
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/api/games");
			then.status(401);
		})
		.await;

	let session = SharedSession::new();
	let pipeline = Pipeline::new(Arc::new(ReqwestTransport::default()))
		.with_interceptor(Arc::new(AuthGate::new(Arc::new(session.clone()))));
	let routes = RouteTable::application();

	if let Navigation::RedirectToLogin { from } = routes.navigate("/games", &session) {
		println!("Navigation to {from} requires login.");
	}

	let anonymous = pipeline.send(Request::get(server.url("/api/games")).body(Vec::new())?).await?;

	println!("Before login: HTTP {}.", anonymous.status());

	session.replace("demo-token");

	let signed = pipeline.send(Request::get(server.url("/api/games")).body(Vec::new())?).await?;

	println!(
		"After login: HTTP {} with body {}.",
		signed.status(),
		String::from_utf8_lossy(signed.body())
	);

	Ok(())
}
