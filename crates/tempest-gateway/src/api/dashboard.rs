//! Dashboard shell.
//!
//! The page itself is static; the only per-request content is the map token.
//! Script and stylesheet are not bundled: they are whatever the operator puts
//! in `gateway.static_dir`, served under `{base}/static`.

use axum::{extract::State, response::Html};

use crate::app_state::AppState;

pub async fn dashboard(State(state): State<AppState>) -> Html<String> {
    let sessions = state.sessions();
    let token = sessions.create(state.station_coordinates());

    let swept = sessions.sweep();
    if swept > 0 {
        tracing::debug!(swept, "expired map sessions removed");
    }

    let metrics = state.metrics();
    metrics.sessions_minted.inc(&[]);
    metrics.map_sessions.set(sessions.len());

    Html(render(&state.cfg().gateway.base_path, &token))
}

fn render(base: &str, token: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Tempest</title>
  <link rel="stylesheet" href="{base}/static/css/dashboard.css">
</head>
<body>
  <main id="dashboard" data-base-url="{base}">
    <section id="current"></section>
    <section id="charts"></section>
    <div id="map" data-map-id="{token}"></div>
  </main>
  <script src="{base}/static/js/dashboard.js"></script>
</body>
</html>
"#
    )
}

#[cfg(test)]
mod tests {
    use super::render;

    #[test]
    fn embeds_token_and_base() {
        let page = render("/tempest", "abc123");
        assert!(page.contains(r#"data-map-id="abc123""#));
        assert!(page.contains(r#"src="/tempest/static/js/dashboard.js""#));
    }

    #[test]
    fn assets_resolve_under_the_static_mount() {
        let page = render("", "t");
        assert!(page.contains(r#"href="/static/css/dashboard.css""#));
        assert!(page.contains(r#"src="/static/js/dashboard.js""#));
        assert!(page.contains(r#"data-base-url="""#));
    }
}
