// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `GET /` and `GET /panel` (spec §4.5.3): a self-contained HTML page that
//! polls `/metrics` and posts to `/upload` via `fetch`.

use crate::http::response::Response;

const PANEL_HTML: &str = r#"<!doctype html>
<html>
<head><meta charset="utf-8"><title>pdfq</title></head>
<body>
<h1>pdfq job queue</h1>
<pre id="metrics">loading…</pre>
<form id="upload-form">
  <input type="file" name="pdf" required>
  <input type="text" name="output_dir" placeholder="uploads/ui" value="uploads/ui">
  <input type="text" name="label" placeholder="label">
  <label><input type="checkbox" name="priority" value="1"> priority</label>
  <label><input type="checkbox" name="redact" value="1"> redact</label>
  <input type="text" name="redactions" placeholder="comma,separated,patterns">
  <button type="submit">upload</button>
</form>
<pre id="upload-result"></pre>
<script>
async function refresh() {
  const resp = await fetch('/metrics');
  document.getElementById('metrics').textContent = JSON.stringify(await resp.json(), null, 2);
}
refresh();
setInterval(refresh, 5000);

document.getElementById('upload-form').addEventListener('submit', async (ev) => {
  ev.preventDefault();
  const resp = await fetch('/upload', { method: 'POST', body: new FormData(ev.target) });
  document.getElementById('upload-result').textContent = JSON.stringify(await resp.json(), null, 2);
  refresh();
});
</script>
</body>
</html>
"#;

pub fn handle() -> Response {
    Response::html(200, "OK", PANEL_HTML)
}
