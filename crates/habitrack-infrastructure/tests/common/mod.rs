use std::sync::Arc;

use habitrack_infrastructure::config::BackendConfig;
use habitrack_infrastructure::http::AppwriteClient;

pub const PROJECT: &str = "habitrack-test";

pub fn backend_config(server: &mockito::Server) -> Arc<BackendConfig> {
    Arc::new(BackendConfig {
        endpoint: format!("{}/v1", server.url()),
        project_id: PROJECT.to_string(),
        platform: "dev.habitrack.cli".to_string(),
        database_id: "main".to_string(),
        habits_collection_id: "habits".to_string(),
        completions_collection_id: "completions".to_string(),
    })
}

pub fn client(server: &mockito::Server) -> Arc<AppwriteClient> {
    Arc::new(AppwriteClient::new(backend_config(server)).expect("client"))
}

pub fn session_cookies() -> String {
    format!(r#"{{"a_session_{}":"secret-1"}}"#, PROJECT)
}
