//! Authenticated request gate for the game-lending catalog client. Bearer tokens are read fresh
//! from a shared session and attached to every outbound API call through an ordered interceptor
//! pipeline.
//!
//! ```no_run
//! # async fn demo() -> bearer_gate::error::Result<()> {
//! use std::sync::Arc;
//!
//! use bearer_gate::{
//! 	auth::SharedSession,
//! 	gate::AuthGate,
//! 	http::Request,
//! 	pipeline::Pipeline,
//! 	transport::ReqwestTransport,
//! };
//!
//! let session = SharedSession::new();
//! let pipeline = Pipeline::new(Arc::new(ReqwestTransport::default()))
//! 	.with_interceptor(Arc::new(AuthGate::new(Arc::new(session.clone()))));
//!
//! session.replace("abc123");
//!
//! let request = Request::get("https://api.example.com/games").body(Vec::new()).unwrap();
//! let response = pipeline.send(request).await?;
//! # let _ = response;
//! # Ok(())
//! # }
//! ```

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod config;
pub mod error;
pub mod gate;
pub mod obs;
pub mod pipeline;
pub mod route;
pub mod transport;

mod _prelude {
	pub use std::{
		collections::HashMap,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use parking_lot::RwLock;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use http;
#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
