//! Things URL-scheme engine.
//!
//! commands -> validated inputs producing `Params`
//! query    -> canonical query-string encoding
//! client   -> dispatcher (`things:///<command>?<query>`)
//! launcher -> hands the URL to the OS (`open`) or records it
//! error    -> ThingsError / LaunchError

pub mod client;
pub mod commands;
pub mod error;
pub mod launcher;
pub mod query;

pub use client::{Client, Config};
pub use commands::{
    AddInput, AddProjectInput, JsonInput, SearchInput, ShowInput, ThingsCommand, UpdateInput,
    UpdateProjectInput, VersionInput,
};
pub use error::ThingsError;
pub use launcher::{Launcher, RecordingLauncher};

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tokio_util::sync::CancellationToken;

    fn recording_client() -> (Client, Arc<RecordingLauncher>) {
        let launcher = Arc::new(RecordingLauncher::new());
        let client = Client::new(Config {
            activate: false,
            launcher: Some(launcher.clone()),
        });
        (client, launcher)
    }

    #[tokio::test]
    async fn add_with_tags_dispatches_canonical_url() {
        let (client, launcher) = recording_client();
        let input = AddInput {
            title: Some("Plan trip".into()),
            tags: vec!["Travel".into(), "Planning".into()],
            ..Default::default()
        };

        let url = client
            .invoke(&input, &CancellationToken::new())
            .await
            .unwrap();
        let want = "things:///add?tags=Travel%2CPlanning&title=Plan%20trip";
        assert_eq!(url, want);
        assert_eq!(launcher.calls(), vec![want]);
    }

    #[tokio::test]
    async fn add_without_content_never_launches() {
        let (client, launcher) = recording_client();
        let input = AddInput {
            notes: Some("no title".into()),
            tags: vec!["x".into()],
            ..Default::default()
        };
        let err = client
            .invoke(&input, &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert!(launcher.calls().is_empty());
    }

    #[tokio::test]
    async fn update_validation_precedes_launch() {
        let (client, launcher) = recording_client();
        let cancel = CancellationToken::new();

        let err = client
            .invoke(
                &UpdateInput {
                    id: "todo-id".into(),
                    ..Default::default()
                },
                &cancel,
            )
            .await
            .unwrap_err();
        assert!(err.to_string().contains("authToken"));

        let err = client
            .invoke(
                &UpdateInput {
                    auth_token: "t".into(),
                    ..Default::default()
                },
                &cancel,
            )
            .await
            .unwrap_err();
        assert!(err.to_string().contains("id"));
        assert!(launcher.calls().is_empty());
    }

    #[tokio::test]
    async fn version_dispatches_bare_target() {
        let (client, launcher) = recording_client();
        let url = client
            .invoke(&VersionInput {}, &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(url, "things:///version");
        assert_eq!(launcher.calls(), vec!["things:///version"]);
    }

    #[tokio::test]
    async fn launcher_failure_surfaces_cause() {
        let launcher = Arc::new(RecordingLauncher::failing("open: no application"));
        let client = Client::new(Config {
            activate: true,
            launcher: Some(launcher),
        });
        let err = client
            .invoke(
                &SearchInput {
                    query: Some("milk".into()),
                },
                &CancellationToken::new(),
            )
            .await
            .unwrap_err();
        assert!(err.to_string().contains("open: no application"));
        assert_eq!(err.target(), Some("things:///search?query=milk"));
    }
}
