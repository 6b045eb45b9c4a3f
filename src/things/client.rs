//! Dispatcher: turns a command name + params into a `things:///` URL and launches it.

use std::fmt;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use super::commands::ThingsCommand;
use super::error::ThingsError;
use super::launcher::{Launcher, OpenLauncher};
use super::query::{Params, encode_query};

pub const SCHEME: &str = "things";

/// Client behaviour.
#[derive(Clone, Default)]
pub struct Config {
    /// Bring Things to the foreground when launching URLs.
    pub activate: bool,
    /// Replaces the default `open` launcher when set.
    pub launcher: Option<Arc<dyn Launcher>>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("activate", &self.activate)
            .field("custom_launcher", &self.launcher.is_some())
            .finish()
    }
}

/// Stateless handle over a launcher; cheap to clone and safe to share.
#[derive(Clone)]
pub struct Client {
    launcher: Arc<dyn Launcher>,
}

impl Client {
    pub fn new(config: Config) -> Self {
        let launcher: Arc<dyn Launcher> = match config.launcher {
            Some(launcher) => launcher,
            None => Arc::new(OpenLauncher::new(config.activate)),
        };
        Self { launcher }
    }

    /// Validate `input`, build its params, and dispatch it.
    pub async fn invoke<C>(&self, input: &C, cancel: &CancellationToken) -> Result<String, ThingsError>
    where
        C: ThingsCommand + Sync,
    {
        let params = input.build()?;
        self.dispatch(C::COMMAND, &params, cancel).await
    }

    /// Launch `things:///<command>[?<query>]` exactly once and return the URL.
    pub async fn dispatch(
        &self,
        command: &str,
        params: &Params,
        cancel: &CancellationToken,
    ) -> Result<String, ThingsError> {
        let target = target_url(command, params)?;
        tracing::debug!(%command, %target, "dispatching");

        if let Err(source) = self.launcher.launch(&target, cancel).await {
            tracing::warn!(%target, error = %source, "launch failed");
            return Err(ThingsError::Launch { target, source });
        }
        Ok(target)
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client").finish_non_exhaustive()
    }
}

/// Assemble the target URL without launching it.
pub fn target_url(command: &str, params: &Params) -> Result<String, ThingsError> {
    if command.is_empty() {
        return Err(ThingsError::MissingCommand);
    }

    let mut target = format!("{SCHEME}:///{command}");
    let encoded = encode_query(params);
    if !encoded.is_empty() {
        target.push('?');
        target.push_str(&encoded);
    }
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::things::launcher::RecordingLauncher;

    fn recording_client() -> (Client, Arc<RecordingLauncher>) {
        let launcher = Arc::new(RecordingLauncher::new());
        let client = Client::new(Config {
            activate: false,
            launcher: Some(launcher.clone()),
        });
        (client, launcher)
    }

    #[tokio::test]
    async fn dispatch_encodes_spaces_as_percent20() {
        let (client, launcher) = recording_client();
        let params: Params = [("title", "Buy milk")].into_iter().collect();

        let got = client
            .dispatch("add", &params, &CancellationToken::new())
            .await
            .unwrap();

        let want = "things:///add?title=Buy%20milk";
        assert_eq!(got, want);
        assert_eq!(launcher.calls(), vec![want]);
        assert!(!launcher.calls()[0].contains('+'));
    }

    #[tokio::test]
    async fn dispatch_without_params_omits_question_mark() {
        let (client, _) = recording_client();
        let got = client
            .dispatch("version", &Params::new(), &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(got, "things:///version");
    }

    #[tokio::test]
    async fn dispatch_propagates_launcher_error() {
        let launcher = Arc::new(RecordingLauncher::failing("boom"));
        let client = Client::new(Config {
            activate: false,
            launcher: Some(launcher.clone()),
        });

        let err = client
            .dispatch("add", &Params::new(), &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("boom"), "got {err}");
        assert_eq!(err.target(), Some("things:///add"));
        assert_eq!(launcher.calls().len(), 1);
    }

    #[tokio::test]
    async fn dispatch_requires_command() {
        let (client, launcher) = recording_client();
        let err = client
            .dispatch("", &Params::new(), &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ThingsError::MissingCommand));
        assert!(launcher.calls().is_empty());
    }

    #[tokio::test]
    async fn dispatch_reports_cancellation_as_launch_error() {
        let (client, _) = recording_client();
        let cancel = CancellationToken::new();
        cancel.cancel();
        let err = client
            .dispatch("search", &Params::new(), &cancel)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("canceled"), "got {err}");
    }

    #[test]
    fn target_url_is_stable() {
        let params: Params = [("query", "next week"), ("filter", "Work,Home")]
            .into_iter()
            .collect();
        let a = target_url("show", &params).unwrap();
        let b = target_url("show", &params).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, "things:///show?filter=Work%2CHome&query=next%20week");
    }
}
