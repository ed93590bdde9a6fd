//! Reqwest transport shared by the live provider client.
//!
//! [`ReqwestHttpClient`] owns the configured [`ReqwestClient`]; [`read_response`] drains a
//! response into a status plus body pair so callers can classify it without holding the
//! connection.

// std
use std::ops::Deref;
// crates.io
use reqwest::{Response, redirect::Policy};
// self
use crate::{_prelude::*, error::ConfigError};

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
/// Token and CRM requests should not follow redirects; [`ReqwestHttpClient::new`] disables
/// them, and custom clients passed to [`ReqwestHttpClient::with_client`] should do the same.
#[derive(Clone, Debug)]
pub struct ReqwestHttpClient(pub ReqwestClient);
impl ReqwestHttpClient {
	/// Builds a client that never follows redirects.
	pub fn new() -> Result<Self, ConfigError> {
		let client = ReqwestClient::builder().redirect(Policy::none()).build()?;

		Ok(Self(client))
	}

	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

/// Status code and body text of a completed response.
#[derive(Clone, Debug)]
pub(crate) struct ResponseText {
	pub status: u16,
	pub body: String,
}
impl ResponseText {
	pub fn is_ok(&self) -> bool {
		self.status == 200
	}
}

/// Drains `response` into a [`ResponseText`].
pub(crate) async fn read_response(response: Response) -> Result<ResponseText, ReqwestError> {
	let status = response.status().as_u16();
	let body = response.text().await?;

	Ok(ResponseText { status, body })
}
