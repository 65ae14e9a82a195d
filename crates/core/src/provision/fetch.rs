//! Downloading release archives over HTTP.

use std::path::Path;

use futures_util::StreamExt;
use log::debug;
use reqwest::header::LOCATION;
use reqwest::redirect::Policy;
use reqwest::{Client, Response};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::error::{Error, Result};

/// Redirect hops followed before giving up.
pub const MAX_REDIRECTS: usize = 10;

const USER_AGENT: &str = concat!("fzf-harness/", env!("CARGO_PKG_VERSION"));

/// Builds the client used for downloads.
///
/// Redirects are disabled here and followed by [`fetch`] itself, so only the
/// final response body is ever written.
///
/// # Errors
///
/// Returns an error if the TLS backend cannot be initialised.
pub fn http_client() -> Result<Client> {
    Ok(Client::builder()
        .redirect(Policy::none())
        .user_agent(USER_AGENT)
        .build()?)
}

/// Downloads `url` to `destination`, following redirects.
///
/// # Errors
///
/// Returns [`Error::Fetch`] for any response with status 400 or above,
/// [`Error::TooManyRedirects`] after [`MAX_REDIRECTS`] hops, and an IO error
/// if the body cannot be written. A partially written file is removed.
pub async fn fetch(client: &Client, url: &str, destination: &Path) -> Result<()> {
    let response = follow_redirects(client, url).await?;

    debug!(
        "writing {} to {}",
        response.url(),
        destination.display()
    );

    if let Err(e) = write_body(response, destination).await {
        let _ = tokio::fs::remove_file(destination).await;
        return Err(e);
    }

    Ok(())
}

async fn follow_redirects(client: &Client, url: &str) -> Result<Response> {
    let mut current = url.to_string();

    for _ in 0..=MAX_REDIRECTS {
        let response = client.get(&current).send().await?;
        let status = response.status();

        if status.as_u16() >= 400 {
            return Err(Error::fetch_error(&current, status));
        }

        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|location| location.to_str().ok())
            .map(ToString::to_string);

        match location {
            Some(location) if status.is_redirection() => {
                let next = response
                    .url()
                    .join(&location)
                    .map_err(|e| Error::Misc(format!("Bad redirect location `{location}`: {e}")))?;
                debug!("{current} redirected ({status}) to {next}");
                current = next.to_string();
            }
            _ => return Ok(response),
        }
    }

    Err(Error::TooManyRedirects {
        url: url.to_string(),
        limit: MAX_REDIRECTS,
    })
}

async fn write_body(response: Response, destination: &Path) -> Result<()> {
    let mut file = File::create(destination)
        .await
        .map_err(|e| Error::io_error("archive", destination, e))?;

    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        file.write_all(&chunk?)
            .await
            .map_err(|e| Error::io_error("archive", destination, e))?;
    }

    file.flush()
        .await
        .map_err(|e| Error::io_error("archive", destination, e))
}
