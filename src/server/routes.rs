use crate::error::{AmoError, Result};
use crate::server::api::{self, AppState};

pub struct HttpResponse {
    pub status_code: u16,
    pub status_text: &'static str,
    pub content_type: &'static str,
    /// Download file name, sent as `Content-Disposition: attachment`.
    pub attachment: Option<String>,
    pub body: String,
}

impl HttpResponse {
    pub fn to_http_string(&self) -> String {
        let disposition = self
            .attachment
            .as_ref()
            .map(|name| {
                let name: String = name
                    .chars()
                    .filter(|c| !c.is_control() && *c != '"')
                    .collect();
                format!("Content-Disposition: attachment; filename=\"{name}\"\r\n")
            })
            .unwrap_or_default();
        format!(
            "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\n{}Connection: close\r\n\r\n{}",
            self.status_code,
            self.status_text,
            self.content_type,
            self.body.len(),
            disposition,
            self.body
        )
    }
}

pub fn route_request(state: &mut AppState, method: &str, path: &str, body: &str) -> HttpResponse {
    let path = path.split('?').next().unwrap_or(path);
    match (method, path) {
        ("GET", "/") | ("GET", "/index.html") => HttpResponse {
            status_code: 200,
            status_text: "OK",
            content_type: "text/html; charset=utf-8",
            attachment: None,
            body: index_html(),
        },
        ("GET", "/api/health") => json_response(api::health_payload()),
        ("GET", "/api/matrix") => json_response(api::matrix_status_payload(state)),
        ("POST", "/api/matrix") => json_response(api::matrix_upload_payload(state, body)),
        ("POST", "/api/matrix/sample") => json_response(api::matrix_sample_payload(state)),
        ("POST", "/api/matrix/remember") => json_response(api::remember_payload(state)),
        ("DELETE", "/api/matrix/remember") => json_response(api::forget_payload(state)),
        ("GET", "/api/baseline") => json_response(api::baseline_payload(state)),
        ("POST", "/api/compute") => json_response(api::compute_payload(state, body)),
        ("POST", "/api/compute/csv") => match api::compute_csv_payload(state, body) {
            Ok((csv, file_name)) => HttpResponse {
                status_code: 200,
                status_text: "OK",
                content_type: "text/csv; charset=utf-8",
                attachment: Some(file_name),
                body: csv,
            },
            Err(err) => amo_error_response(&err),
        },
        _ => error_response(404, "Not Found", "Route not found"),
    }
}

fn json_response(result: Result<String>) -> HttpResponse {
    match result {
        Ok(payload) => HttpResponse {
            status_code: 200,
            status_text: "OK",
            content_type: "application/json",
            attachment: None,
            body: payload,
        },
        Err(err) => amo_error_response(&err),
    }
}

fn amo_error_response(err: &AmoError) -> HttpResponse {
    match err {
        AmoError::Json(inner) => {
            error_response(400, "Bad Request", &format!("Invalid request body: {inner}"))
        }
        err if err.is_client_error() => error_response(400, "Bad Request", &err.to_string()),
        err => error_response(500, "Internal Server Error", &err.to_string()),
    }
}

pub fn payload_too_large() -> HttpResponse {
    error_response(413, "Payload Too Large", "Request body exceeds 1 MiB")
}

fn error_response(status_code: u16, status_text: &'static str, message: &str) -> HttpResponse {
    HttpResponse {
        status_code,
        status_text,
        content_type: "application/json",
        attachment: None,
        body: format!(
            "{{\n  \"status\": \"error\",\n  \"message\": {}\n}}",
            serde_json::to_string(message).unwrap_or_else(|_| "\"Unknown error\"".to_string())
        ),
    }
}

fn index_html() -> String {
    r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width,initial-scale=1" />
  <title>AMO Type Resistance Console</title>
  <style>
    body { font-family: Arial, sans-serif; max-width: 1100px; margin: 24px auto; padding: 0 12px; }
    h1 { margin-bottom: 8px; }
    .card { border: 1px solid #ddd; border-radius: 8px; padding: 14px; margin: 14px 0; }
    label { display:block; margin: 8px 0 4px; font-weight: 600; }
    textarea { width: 100%; min-height: 120px; box-sizing: border-box; font-family: monospace; }
    select, input[type=text] { padding: 6px; min-width: 160px; }
    button { margin-top: 12px; padding: 8px 14px; }
    table { border-collapse: collapse; margin-top: 12px; width: 100%; }
    th, td { border: 1px solid #ddd; padding: 4px 8px; text-align: center; }
    th.sep, td.sep { border: none; width: 12px; }
    .badge { padding: 2px 6px; border-radius: 4px; font-size: 0.85rem; }
    .rImmune { background:#1b5e20; color:#fff; } .rTanked { background:#2e7d32; color:#fff; }
    .rResist { background:#66bb6a; } .rIneffective { background:#c8e6c9; }
    .rNeutral { background:#eee; } .rEffective { background:#ffe0b2; }
    .rWeak { background:#ffb74d; } .rSuffer { background:#ef6c00; color:#fff; }
    .rObliterate { background:#b71c1c; color:#fff; }
    #error { color: #b71c1c; }
  </style>
</head>
<body>
  <h1>AMO Type Resistance Console</h1>
  <p id="status">Loading…</p>
  <p id="error"></p>

  <div class="card">
    <strong>WRNX matrix</strong>
    <label for="matrix-file">Matrix file (CSV / semicolon / tab)</label>
    <input id="matrix-file" type="file" accept=".csv,.tsv,.txt" />
    <label for="matrix-text">…or paste it</label>
    <textarea id="matrix-text" placeholder="Attacker,Fire,Ice&#10;Fire,N,W&#10;Ice,R,N"></textarea>
    <div>
      <button id="load-btn">Load pasted matrix</button>
      <button id="sample-btn">Use sample</button>
      <button id="remember-btn">Remember matrix</button>
      <button id="forget-btn">Forget stored matrix</button>
    </div>
  </div>

  <div class="card">
    <strong>Forms</strong>
    <label for="name">Name</label>
    <input id="name" type="text" value="Goddess" />
    <label>Meso / Alpha / Omega</label>
    <select id="meso"></select> <select id="alpha"></select> <select id="omega"></select>
    <div>
      <button id="compute-btn">Compute</button>
      <button id="csv-btn" disabled>Download CSV</button>
    </div>
    <div id="results"></div>
  </div>

  <script>
    const statusEl = document.getElementById('status');
    const errorEl = document.getElementById('error');
    const selects = ['meso', 'alpha', 'omega'].map(id => document.getElementById(id));
    const results = document.getElementById('results');
    const csvBtn = document.getElementById('csv-btn');

    function escapeHtml(s) {
      return String(s).replace(/[&<>"]/g, c => ({ '&': '&amp;', '<': '&lt;', '>': '&gt;', '"': '&quot;' }[c]));
    }

    async function call(path, options) {
      const response = await fetch(path, options);
      const text = await response.text();
      let data = null;
      try { data = JSON.parse(text); } catch (e) {}
      if (!response.ok) throw new Error(data && data.message ? data.message : 'HTTP ' + response.status);
      return data;
    }

    function showMatrix(data) {
      statusEl.textContent = data.status;
      selects.forEach(sel => {
        const previous = sel.value;
        sel.innerHTML = '';
        data.types.forEach(t => {
          const opt = document.createElement('option');
          opt.value = t;
          opt.textContent = t;
          sel.appendChild(opt);
        });
        if (data.types.includes(previous)) sel.value = previous;
      });
    }

    async function run(action) {
      errorEl.textContent = '';
      try { await action(); } catch (e) { errorEl.textContent = e.message; }
    }

    function computeBody() {
      return JSON.stringify({
        name: document.getElementById('name').value,
        meso: selects[0].value, alpha: selects[1].value, omega: selects[2].value,
      });
    }

    function renderChart(chart) {
      const forms = chart.forms;
      let html = '<table><thead><tr><th rowspan="2">Attack</th>';
      forms.forEach((f, i) => {
        if (i > 0) html += '<th class="sep"></th>';
        html += '<th colspan="3">' + escapeHtml(f.title) + '</th>';
      });
      html += '</tr><tr>';
      forms.forEach((f, i) => {
        if (i > 0) html += '<th class="sep"></th>';
        html += '<th>Cups</th><th>%</th><th>Reaction</th>';
      });
      html += '</tr></thead><tbody>';
      forms[0].rows.forEach((row, r) => {
        html += '<tr><td>' + escapeHtml(row.attacker) + '</td>';
        forms.forEach((f, i) => {
          const cell = f.rows[r];
          if (i > 0) html += '<td class="sep"></td>';
          html += '<td>' + [cell.active, cell.secondary1, cell.secondary2].join(' ') + '</td>'
            + '<td>' + cell.total + '</td>'
            + '<td><span class="badge r' + cell.reaction + '">' + cell.reaction + '</span></td>';
        });
        html += '</tr>';
      });
      html += '</tbody></table><table><thead><tr><th>Form</th><th>Type</th><th>Cup Sum</th><th>Base Sum</th><th>Delta</th></tr></thead><tbody>';
      chart.summaries.forEach(s => {
        html += '<tr><td>' + s.form + '</td><td>' + escapeHtml(s.type_name) + '</td><td>' + s.cup_sum
          + '</td><td>' + s.base_sum + '</td><td>' + s.delta + '</td></tr>';
      });
      html += '</tbody></table>';
      results.innerHTML = html;
    }

    async function uploadMatrix(text) {
      showMatrix(await call('/api/matrix', { method: 'POST', headers: { 'Content-Type': 'text/plain' }, body: text }));
    }

    document.getElementById('matrix-file').addEventListener('change', e => {
      const file = e.target.files && e.target.files[0];
      if (!file) return;
      const reader = new FileReader();
      reader.onload = () => run(() => uploadMatrix(reader.result));
      reader.readAsText(file);
    });
    document.getElementById('load-btn').addEventListener('click', () =>
      run(() => uploadMatrix(document.getElementById('matrix-text').value)));
    document.getElementById('sample-btn').addEventListener('click', () =>
      run(async () => showMatrix(await call('/api/matrix/sample', { method: 'POST' }))));
    document.getElementById('remember-btn').addEventListener('click', () =>
      run(async () => { statusEl.textContent = (await call('/api/matrix/remember', { method: 'POST' })).message; }));
    document.getElementById('forget-btn').addEventListener('click', () =>
      run(async () => { statusEl.textContent = (await call('/api/matrix/remember', { method: 'DELETE' })).message; }));

    document.getElementById('compute-btn').addEventListener('click', () => run(async () => {
      results.innerHTML = '';
      csvBtn.disabled = true;
      renderChart(await call('/api/compute', { method: 'POST', headers: { 'Content-Type': 'application/json' }, body: computeBody() }));
      csvBtn.disabled = false;
    }));

    csvBtn.addEventListener('click', () => run(async () => {
      const response = await fetch('/api/compute/csv', { method: 'POST', headers: { 'Content-Type': 'application/json' }, body: computeBody() });
      if (!response.ok) throw new Error('HTTP ' + response.status);
      const disposition = response.headers.get('Content-Disposition') || '';
      const match = disposition.match(/filename="([^"]+)"/);
      const url = URL.createObjectURL(await response.blob());
      const a = document.createElement('a');
      a.href = url;
      a.download = match ? match[1] : 'Goddess_Triple_Form_Chart.csv';
      a.click();
      URL.revokeObjectURL(url);
    }));

    run(async () => showMatrix(await call('/api/matrix', { method: 'GET' })));
  </script>
</body>
</html>
"#
    .to_string()
}
