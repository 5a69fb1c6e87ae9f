//! The page served at `/`: a short description of the API and a form that
//! posts to `/api/analyze-and-query`.

use axum::{extract::State, response::Html};

use crate::server::GatewayState;

const PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Oravision</title>
<style>
body { font-family: system-ui, sans-serif; max-width: 46rem; margin: 2rem auto; padding: 0 1rem; }
code, pre { background: #f3f3f3; padding: 0.1rem 0.3rem; }
pre { padding: 0.8rem; white-space: pre-wrap; }
label { display: block; margin-top: 0.8rem; }
input { width: 100%; padding: 0.3rem; }
</style>
</head>
<body>
<h1>Oravision</h1>
<p>Image analysis with natural-language answers. Vision backend: <code>{{VISION}}</code>.</p>
<ul>
<li><code>POST /api/analyze-image</code> <code>{imageUrl, features?}</code></li>
<li><code>POST /api/query-ora</code> <code>{imageAnalysis, query}</code></li>
<li><code>POST /api/analyze-and-query</code> <code>{imageUrl, query, features?}</code></li>
<li><code>GET /api/health</code></li>
</ul>
<form id="ask">
<label>Image URL <input name="imageUrl" value="https://example.com/cat.jpg"></label>
<label>Question <input name="query" value="What is in this image?"></label>
<p><button type="submit">Ask</button></p>
</form>
<pre id="out"></pre>
<script>
document.getElementById("ask").addEventListener("submit", async (ev) => {
  ev.preventDefault();
  const form = new FormData(ev.target);
  const res = await fetch("/api/analyze-and-query", {
    method: "POST",
    headers: { "Content-Type": "application/json" },
    body: JSON.stringify({ imageUrl: form.get("imageUrl"), query: form.get("query") }),
  });
  document.getElementById("out").textContent = JSON.stringify(await res.json(), null, 2);
});
</script>
</body>
</html>
"#;

pub async fn index(State(state): State<GatewayState>) -> Html<String> {
    Html(PAGE.replace("{{VISION}}", state.vision.backend_name()))
}
