//! Cast orchestration for dlna-cast
//!
//! The core state machine that turns a (device, media URL, title) triple into
//! a confirmed "now playing" state: per-attempt device resolution, metadata
//! generation, deadline-bounded set-source/play dispatch, retry with
//! exponential backoff, and progress notification.

use std::time::Duration;

use log::{debug, warn};
use tokio::time::{sleep, timeout};

use crate::{
    config::{
        CAST_ATTEMPT_TIMEOUT_SECS, CAST_RETRY_INITIAL_DELAY_MS, Config, DEVICE_OFFLINE_MSG,
        MAX_CAST_ATTEMPTS, PROGRESS_MSG_BUFFERING, PROGRESS_MSG_CONNECTING, PROGRESS_MSG_PLAYING,
    },
    devices::RendererRegistry,
    error::{Error, Result},
    events::{CastStage, EventBus},
};

use super::dispatcher::{ActionDispatcher, TransportAction};
use super::metadata::encode_didl_metadata;

/// Retry and deadline parameters for cast calls
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum attempts per cast call
    pub max_attempts: u32,
    /// Delay before the first retry, doubled per subsequent attempt
    pub initial_delay: Duration,
    /// Deadline for the dispatch phase of a single attempt
    pub attempt_timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: MAX_CAST_ATTEMPTS,
            initial_delay: Duration::from_millis(CAST_RETRY_INITIAL_DELAY_MS),
            attempt_timeout: Duration::from_secs(CAST_ATTEMPT_TIMEOUT_SECS),
        }
    }
}

impl From<&Config> for RetryPolicy {
    fn from(config: &Config) -> Self {
        Self {
            max_attempts: config.max_cast_attempts,
            initial_delay: config.cast_retry_initial_delay,
            attempt_timeout: config.cast_attempt_timeout,
        }
    }
}

/// Validates a cast request before any network action.
///
/// HTTPS URLs are accepted but logged: some renderer models reject them.
fn validate_cast_input(device_id: &str, url: &str) -> Result<()> {
    if device_id.trim().is_empty() {
        return Err(Error::InvalidInput {
            reason: "device identifier cannot be empty".to_string(),
        });
    }
    if url.is_empty() {
        return Err(Error::InvalidInput {
            reason: "media URL cannot be empty".to_string(),
        });
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(Error::InvalidInput {
            reason: format!("media URL '{url}' must start with http:// or https://"),
        });
    }
    if url.starts_with("https://") {
        warn!("HTTPS URLs may not work with some renderer models, consider using HTTP");
    }
    Ok(())
}

/// Sequences dispatcher calls against a renderer with retry and deadlines.
///
/// Generic over the registry and dispatcher so the state machine can be
/// exercised without a network.
pub struct CastOrchestrator<R, D> {
    registry: R,
    dispatcher: D,
    events: EventBus,
    policy: RetryPolicy,
}

impl<R, D> CastOrchestrator<R, D>
where
    R: RendererRegistry,
    D: ActionDispatcher,
{
    /// Creates an orchestrator over the given collaborators
    pub fn new(registry: R, dispatcher: D, events: EventBus, policy: RetryPolicy) -> Self {
        Self {
            registry,
            dispatcher,
            events,
            policy,
        }
    }

    /// Casts a media URL to a renderer, resolving once playback is
    /// confirmed.
    ///
    /// Attempts are strictly sequential. A failed attempt is retried after
    /// `initial_delay * 2^(attempt-1)` if its error is retryable and the
    /// attempt budget is not exhausted; otherwise the call fails with
    /// [`Error::MaxRetriesExceeded`] wrapping the last error.
    pub async fn cast(&self, device_id: &str, url: &str, title: Option<&str>) -> Result<()> {
        validate_cast_input(device_id, url)?;
        let title = title.unwrap_or_default();

        let mut attempt = 1;
        loop {
            match self.run_attempt(device_id, url, title, attempt).await {
                Ok(()) => return Ok(()),
                Err(err) if !err.is_retryable() => return Err(err),
                Err(err) => {
                    if attempt >= self.policy.max_attempts {
                        return Err(Error::MaxRetriesExceeded {
                            attempts: attempt,
                            last_error: Box::new(err),
                        });
                    }
                    let delay = self.policy.initial_delay * 2u32.pow(attempt - 1);
                    warn!(
                        "Cast attempt {attempt}/{} failed ({err}), retrying in {delay:?}",
                        self.policy.max_attempts
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }

    /// Runs one full resolve/connect/set-source/play pass.
    async fn run_attempt(
        &self,
        device_id: &str,
        url: &str,
        title: &str,
        attempt: u32,
    ) -> Result<()> {
        debug!("Cast attempt {attempt} for '{device_id}'");

        // Resolve fresh each attempt: the device may have disappeared or
        // come back since the last one.
        let device = self
            .registry
            .resolve(device_id)
            .ok_or_else(|| Error::DeviceNotFound {
                device_id: device_id.to_string(),
                context: DEVICE_OFFLINE_MSG.to_string(),
            })?;

        self.events
            .cast_progress(CastStage::Connecting, PROGRESS_MSG_CONNECTING, &device.name);

        if !device.has_av_transport {
            return Err(Error::CapabilityUnavailable {
                device_name: device.name,
            });
        }

        let metadata = encode_didl_metadata(url, title);

        // The deadline races the whole set-source/play pipeline. When it
        // elapses first, the pipeline future is dropped, so a late transport
        // response cannot complete the attempt a second time.
        let pipeline = async {
            self.dispatcher
                .invoke(
                    device_id,
                    TransportAction::SetSource {
                        uri: url.to_string(),
                        metadata,
                    },
                )
                .await?;

            self.events
                .cast_progress(CastStage::Buffering, PROGRESS_MSG_BUFFERING, &device.name);

            self.dispatcher.invoke(device_id, TransportAction::Play).await
        };

        match timeout(self.policy.attempt_timeout, pipeline).await {
            Ok(result) => result.map(|()| {
                debug!("Playback confirmed on '{}' (attempt {attempt})", device.name);
                self.events
                    .cast_progress(CastStage::Playing, PROGRESS_MSG_PLAYING, &device.name);
            }),
            Err(_) => Err(Error::Timeout {
                attempt,
                limit: self.policy.attempt_timeout,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DLNA_ACTION_PLAY, DLNA_ACTION_SET_AV_TRANSPORT_URI};
    use crate::dlna::test_support::{ScriptedDispatcher, StaticRegistry, Step, renderer};
    use crate::events::DlnaEvent;

    use tokio::sync::broadcast::Receiver;
    use tokio::time::Instant;

    fn orchestrator(
        registry: StaticRegistry,
        dispatcher: ScriptedDispatcher,
    ) -> (CastOrchestrator<StaticRegistry, ScriptedDispatcher>, EventBus) {
        let events = EventBus::new();
        let orchestrator =
            CastOrchestrator::new(registry, dispatcher, events.clone(), RetryPolicy::default());
        (orchestrator, events)
    }

    fn drain_stages(events: &mut Receiver<DlnaEvent>) -> Vec<CastStage> {
        let mut stages = Vec::new();
        while let Ok(event) = events.try_recv() {
            if let DlnaEvent::CastProgress(progress) = event {
                stages.push(progress.stage);
            }
        }
        stages
    }

    #[tokio::test]
    async fn test_empty_url_fails_fast_without_dispatch() {
        let dispatcher = ScriptedDispatcher::new();
        let (orchestrator, _events) = orchestrator(
            StaticRegistry::with([renderer("uuid:tv", "TV")]),
            dispatcher.clone(),
        );

        let err = orchestrator.cast("uuid:tv", "", None).await.unwrap_err();
        assert!(matches!(err, Error::InvalidInput { .. }));
        assert!(dispatcher.invocations().is_empty());
    }

    #[tokio::test]
    async fn test_unsupported_scheme_fails_fast_without_dispatch() {
        let dispatcher = ScriptedDispatcher::new();
        let (orchestrator, _events) = orchestrator(
            StaticRegistry::with([renderer("uuid:tv", "TV")]),
            dispatcher.clone(),
        );

        let err = orchestrator
            .cast("uuid:tv", "rtsp://example.com/stream", None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput { .. }));
        assert!(dispatcher.invocations().is_empty());
    }

    #[tokio::test]
    async fn test_empty_device_id_fails_fast() {
        let dispatcher = ScriptedDispatcher::new();
        let (orchestrator, _events) =
            orchestrator(StaticRegistry::default(), dispatcher.clone());

        let err = orchestrator
            .cast("", "http://example.com/a.mp4", None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput { .. }));
        assert!(dispatcher.invocations().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_unknown_device_exhausts_retries_with_backoff() {
        let dispatcher = ScriptedDispatcher::new();
        let (orchestrator, _events) =
            orchestrator(StaticRegistry::default(), dispatcher.clone());

        let start = Instant::now();
        let err = orchestrator
            .cast("uuid:gone", "http://example.com/a.mp4", None)
            .await
            .unwrap_err();

        match err {
            Error::MaxRetriesExceeded {
                attempts,
                last_error,
            } => {
                assert_eq!(attempts, 3);
                assert!(matches!(*last_error, Error::DeviceNotFound { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }

        // backoff of 1s then 2s between the three attempts
        assert_eq!(start.elapsed(), Duration::from_secs(3));
        assert!(dispatcher.invocations().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_source_recovers_on_third_attempt() {
        let dispatcher = ScriptedDispatcher::new();
        dispatcher.script(
            "uuid:tv",
            DLNA_ACTION_SET_AV_TRANSPORT_URI,
            vec![
                Step::Fail("device busy"),
                Step::Fail("device busy"),
                Step::Succeed,
            ],
        );
        let (orchestrator, events) = orchestrator(
            StaticRegistry::with([renderer("uuid:tv", "TV")]),
            dispatcher.clone(),
        );
        let mut events = events.subscribe();

        orchestrator
            .cast("uuid:tv", "http://example.com/a.mp4", Some("My Movie"))
            .await
            .unwrap();

        let stages = drain_stages(&mut events);
        let connecting = stages
            .iter()
            .filter(|s| **s == CastStage::Connecting)
            .count();
        let buffering = stages
            .iter()
            .filter(|s| **s == CastStage::Buffering)
            .count();
        let playing = stages.iter().filter(|s| **s == CastStage::Playing).count();
        assert_eq!(connecting, 3);
        assert_eq!(buffering, 1);
        assert_eq!(playing, 1);
        assert_eq!(
            stages.last().copied(),
            Some(CastStage::Playing),
            "playing must be terminal"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_hung_set_source_times_out_on_every_attempt() {
        let dispatcher = ScriptedDispatcher::new();
        dispatcher.script(
            "uuid:tv",
            DLNA_ACTION_SET_AV_TRANSPORT_URI,
            vec![Step::Hang, Step::Hang, Step::Hang],
        );
        let (orchestrator, events) = orchestrator(
            StaticRegistry::with([renderer("uuid:tv", "TV")]),
            dispatcher.clone(),
        );
        let mut events = events.subscribe();

        let start = Instant::now();
        let err = orchestrator
            .cast("uuid:tv", "http://example.com/a.mp4", None)
            .await
            .unwrap_err();

        match err {
            Error::MaxRetriesExceeded {
                attempts,
                last_error,
            } => {
                assert_eq!(attempts, 3);
                assert!(matches!(*last_error, Error::Timeout { attempt: 3, .. }));
            }
            other => panic!("unexpected error: {other}"),
        }

        // three 30s deadlines plus 1s and 2s backoff
        assert_eq!(start.elapsed(), Duration::from_secs(93));

        let stages = drain_stages(&mut events);
        assert!(
            !stages.contains(&CastStage::Buffering),
            "buffering must never be reached"
        );
        assert!(!stages.contains(&CastStage::Playing));
    }

    #[tokio::test]
    async fn test_capability_unavailable_is_terminal() {
        let mut device = renderer("uuid:speaker", "Speaker");
        device.has_av_transport = false;
        let dispatcher = ScriptedDispatcher::new();
        let (orchestrator, _events) =
            orchestrator(StaticRegistry::with([device]), dispatcher.clone());

        let err = orchestrator
            .cast("uuid:speaker", "http://example.com/a.mp4", None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::CapabilityUnavailable { .. }));
        assert!(dispatcher.invocations().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_default_title_is_used_in_metadata() {
        let dispatcher = ScriptedDispatcher::new();
        let (orchestrator, _events) = orchestrator(
            StaticRegistry::with([renderer("uuid:tv", "TV")]),
            dispatcher.clone(),
        );

        orchestrator
            .cast("uuid:tv", "http://example.com/a.mp4", None)
            .await
            .unwrap();

        let set_source_metadata = dispatcher
            .recorded()
            .into_iter()
            .find_map(|(_, action)| match action {
                TransportAction::SetSource { metadata, .. } => Some(metadata),
                _ => None,
            })
            .expect("set-source was dispatched");
        assert!(set_source_metadata.contains("<dc:title>Video</dc:title>"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_play_failure_is_retried() {
        let dispatcher = ScriptedDispatcher::new();
        dispatcher.script(
            "uuid:tv",
            DLNA_ACTION_PLAY,
            vec![Step::Fail("transport locked"), Step::Succeed],
        );
        let (orchestrator, events) = orchestrator(
            StaticRegistry::with([renderer("uuid:tv", "TV")]),
            dispatcher.clone(),
        );
        let mut events = events.subscribe();

        orchestrator
            .cast("uuid:tv", "http://example.com/a.mp4", None)
            .await
            .unwrap();

        let stages = drain_stages(&mut events);
        // failed attempt emitted connecting and buffering, then the retry
        // restarted from connecting
        assert_eq!(
            stages,
            vec![
                CastStage::Connecting,
                CastStage::Buffering,
                CastStage::Connecting,
                CastStage::Buffering,
                CastStage::Playing,
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_casts_are_independent() {
        let dispatcher = ScriptedDispatcher::new();
        dispatcher.script(
            "uuid:slow",
            DLNA_ACTION_SET_AV_TRANSPORT_URI,
            vec![Step::Hang, Step::Hang, Step::Hang],
        );
        let (orchestrator, _events) = orchestrator(
            StaticRegistry::with([renderer("uuid:slow", "Slow TV"), renderer("uuid:fast", "Fast TV")]),
            dispatcher.clone(),
        );

        let slow = orchestrator.cast("uuid:slow", "http://example.com/a.mp4", None);
        let fast = orchestrator.cast("uuid:fast", "http://example.com/b.mp4", None);
        let (slow_result, fast_result) = futures::future::join(slow, fast).await;

        assert!(fast_result.is_ok());
        assert!(matches!(
            slow_result.unwrap_err(),
            Error::MaxRetriesExceeded { .. }
        ));

        // the fast cast dispatched set-source and play exactly once each
        let fast_invocations: Vec<_> = dispatcher
            .invocations()
            .into_iter()
            .filter(|(device, _)| device == "uuid:fast")
            .collect();
        assert_eq!(
            fast_invocations,
            vec![
                (
                    "uuid:fast".to_string(),
                    DLNA_ACTION_SET_AV_TRANSPORT_URI.to_string()
                ),
                ("uuid:fast".to_string(), DLNA_ACTION_PLAY.to_string()),
            ]
        );
    }
}
