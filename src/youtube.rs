use std::future::Future;
use std::time::Duration;

use eyre::{Result, eyre};
use log::{debug, info, warn};
use reqwest::Url;
use serde::Deserialize;

use crate::formats::CaptionFormat;
use crate::matrix::RetrievalAttempt;
use crate::{Cue, Error, TranscriptResult, VideoId};

const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

const WATCH_URL: &str = "https://www.youtube.com/watch";

/// What came back from a single caption request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Successful response with its body, possibly empty
    Body(String),
    /// The endpoint answered with a non-success status
    Status(u16),
    /// No usable response: connect failure, timeout or broken body
    Transport(String),
}

/// The endpoints the pipeline reads from
pub trait VideoHost {
    fn fetch_captions(
        &self,
        video_id: &VideoId,
        attempt: &RetrievalAttempt,
    ) -> impl Future<Output = FetchOutcome> + Send;

    fn fetch_title(&self, video_id: &VideoId) -> impl Future<Output = Result<String>> + Send;
}

#[derive(Debug, Deserialize)]
struct OEmbedResponse {
    title: Option<String>,
}

/// Unauthenticated public YouTube endpoints
#[derive(Debug, Clone)]
pub struct YouTube {
    client: reqwest::Client,
    base_url: Url,
}

impl YouTube {
    /// Every request made through this host is bounded by `timeout`
    pub fn new(base_url: &str, timeout: Duration) -> crate::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Transport(format!("could not build HTTP client: {e}")))?;
        Self::from_client(client, base_url)
    }

    /// Use a preconfigured client; the caller owns its timeout
    pub fn from_client(client: reqwest::Client, base_url: &str) -> crate::Result<Self> {
        let base_url =
            Url::parse(base_url).map_err(|e| Error::Transport(format!("invalid base url {base_url}: {e}")))?;
        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        let prefix = self.base_url.path().trim_end_matches('/');
        url.set_path(&format!("{prefix}/{path}"));
        url.set_query(None);
        url
    }

    pub fn timedtext_url(&self, video_id: &VideoId, attempt: &RetrievalAttempt) -> Url {
        let mut url = self.endpoint("api/timedtext");
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("lang", &attempt.language);
            query.append_pair("v", video_id.as_str());
            if let Some(kind) = attempt.variant.kind() {
                query.append_pair("kind", kind);
            }
            if let Some(fmt) = attempt.variant.fmt() {
                query.append_pair("fmt", fmt);
            }
        }
        url
    }

    pub fn oembed_url(&self, video_id: &VideoId) -> Url {
        let mut url = self.endpoint("oembed");
        url.query_pairs_mut()
            .append_pair("url", &format!("{WATCH_URL}?v={video_id}"))
            .append_pair("format", "json");
        url
    }
}

impl VideoHost for YouTube {
    async fn fetch_captions(&self, video_id: &VideoId, attempt: &RetrievalAttempt) -> FetchOutcome {
        let url = self.timedtext_url(video_id, attempt);
        debug!("Fetching captions: {url}");

        let resp = match self.client.get(url).send().await {
            Ok(resp) => resp,
            Err(e) => return FetchOutcome::Transport(e.to_string()),
        };

        let status = resp.status();
        if !status.is_success() {
            return FetchOutcome::Status(status.as_u16());
        }

        match resp.text().await {
            Ok(body) => FetchOutcome::Body(body),
            Err(e) => FetchOutcome::Transport(e.to_string()),
        }
    }

    async fn fetch_title(&self, video_id: &VideoId) -> Result<String> {
        let url = self.oembed_url(video_id);
        debug!("Fetching title: {url}");

        let resp: OEmbedResponse = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        resp.title
            .ok_or_else(|| eyre!("oEmbed response for {video_id} has no title"))
    }
}

/// Result of one matrix entry
#[derive(Debug)]
enum Attempt {
    Hit { format: CaptionFormat, cues: Vec<Cue> },
    Miss,
    Unreachable(String),
}

async fn try_attempt<H: VideoHost>(host: &H, video_id: &VideoId, attempt: &RetrievalAttempt) -> Attempt {
    match host.fetch_captions(video_id, attempt).await {
        FetchOutcome::Body(body) => {
            if body.trim().is_empty() {
                debug!("Captions {attempt}: empty body");
                return Attempt::Miss;
            }
            let format = CaptionFormat::sniff(&body);
            match format.parse(&body) {
                Some(cues) => Attempt::Hit { format, cues },
                None => {
                    debug!("Captions {attempt}: {format} payload had no usable cues");
                    Attempt::Miss
                }
            }
        }
        FetchOutcome::Status(status) => {
            debug!("Captions {attempt}: HTTP {status}");
            Attempt::Miss
        }
        FetchOutcome::Transport(reason) => {
            warn!("Captions {attempt}: {reason}");
            Attempt::Unreachable(reason)
        }
    }
}

/// Walk the retrieval matrix in order and return the first non-empty parse.
///
/// Exhausting the matrix is a normal outcome ([`TranscriptResult::not_found`]).
/// It is an error only when no attempt got any HTTP response at all.
pub async fn resolve_captions<H: VideoHost>(
    host: &H,
    video_id: &VideoId,
    matrix: &[RetrievalAttempt],
) -> crate::Result<TranscriptResult> {
    let mut unreachable = 0;
    let mut last_reason = None;

    for attempt in matrix {
        match try_attempt(host, video_id, attempt).await {
            Attempt::Hit { format, cues } => {
                info!("Captions for {video_id} found at {attempt} ({format}, {} cues)", cues.len());
                return Ok(TranscriptResult {
                    language: attempt.language.clone(),
                    format: Some(format),
                    cues,
                });
            }
            Attempt::Miss => {}
            Attempt::Unreachable(reason) => {
                unreachable += 1;
                last_reason = Some(reason);
            }
        }
    }

    match last_reason {
        Some(reason) if unreachable == matrix.len() => return Err(Error::Transport(reason)),
        _ => {}
    }

    info!("No captions found for {video_id} after {} attempts", matrix.len());
    Ok(TranscriptResult::not_found())
}

pub fn fallback_title(video_id: &VideoId) -> String {
    format!("Video {video_id}")
}

/// Look up the display title; never fails
pub async fn resolve_title<H: VideoHost>(host: &H, video_id: &VideoId) -> String {
    match host.fetch_title(video_id).await {
        Ok(title) if !title.trim().is_empty() => title.trim().to_string(),
        Ok(_) => {
            debug!("Empty title for {video_id}, using fallback");
            fallback_title(video_id)
        }
        Err(e) => {
            warn!("Title lookup failed for {video_id}: {e}");
            fallback_title(video_id)
        }
    }
}
